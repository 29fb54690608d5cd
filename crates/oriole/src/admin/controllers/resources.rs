// File: src/admin/controllers/resources.rs
// Purpose: Site resources (pages) placed in the template tree

use oriole_router::{Controller, HandlerResult};

use super::crud::{self, Section};
use super::{id_arg, render, required};
use crate::context::RequestContext;

/// Resources are listed inside their template, so the list alias points at
/// the templates page.
static RESOURCES: Section = Section {
    title: "Resources",
    singular: "resource",
    list: "templates_list",
    add: "add_resource",
    edit: "edit_resource",
    activate: "activate_resource",
    deactivate: "deactivate_resource",
    delete: "delete_resource",
    delete_all: "",
    fields: &[("title", "title"), ("url", "url")],
    edit_extra: None,
};

/// `$0` is the parent resource.
fn add(ctx: &RequestContext, args: &[Option<String>]) -> HandlerResult {
    let parent_id = id_arg(args, 0)?;
    let request = ctx.request();
    let mut errors = Vec::new();

    if request.is_post() {
        errors = required(&request.form, RESOURCES.fields);
        if errors.is_empty() {
            ctx.flash("The resource was successfully created.");
            ctx.redirect_to_alias(RESOURCES.list, &[]);
            return Ok(None);
        }
    }

    let action = ctx.route_by_alias(RESOURCES.add, &[&parent_id]);
    let content = crud::form(&action, &RESOURCES, &request.form, &errors);
    render(ctx, &format!("Add resource under #{}", parent_id), content)
}

/// Shared shape of the `set-*/(:num)/(:num)` actions: resource id, then
/// the new value.
fn set(ctx: &RequestContext, args: &[Option<String>], what: &str) -> HandlerResult {
    let id = id_arg(args, 0)?;
    let value = id_arg(args, 1)?;
    ctx.flash(&format!("The {} of resource #{} is now {}.", what, id, value));
    ctx.redirect_to_alias(RESOURCES.list, &[]);
    Ok(None)
}

pub(super) fn register(controller: &mut Controller<RequestContext>) {
    controller
        .action("add", add)
        .action("edit", |ctx, args| crud::edit(ctx, &RESOURCES, args))
        .action("activate", |ctx, args| crud::change(ctx, &RESOURCES, args, "activated"))
        .action("deactivate", |ctx, args| crud::change(ctx, &RESOURCES, args, "deactivated"))
        .action("delete", |ctx, args| crud::change(ctx, &RESOURCES, args, "deleted"))
        .action("setTemplate", |ctx, args| set(ctx, args, "template"))
        .action("setParent", |ctx, args| set(ctx, args, "parent"))
        .action("setOrder", |ctx, args| set(ctx, args, "sort order"));
}
