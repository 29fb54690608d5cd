// File: src/admin/controllers/variable_groups.rs
// Purpose: Variable groups attached to a template

use oriole_router::{Controller, HandlerResult};

use super::crud::{form, Section};
use super::{id_arg, render, required};
use crate::context::RequestContext;

/// Only the form fields and aliases are used; groups have no list page of
/// their own and return to the owning template.
static VARIABLE_GROUPS: Section = Section {
    title: "Variable groups",
    singular: "variable group",
    list: "templates_list",
    add: "add_variable_group",
    edit: "edit_variable_group",
    activate: "",
    deactivate: "",
    delete: "delete_variable_group",
    delete_all: "",
    fields: &[("title", "title"), ("sort_order", "sort order")],
    edit_extra: None,
};

/// `$0` is the template the new group belongs to.
fn add(ctx: &RequestContext, args: &[Option<String>]) -> HandlerResult {
    let template_id = id_arg(args, 0)?;
    let request = ctx.request();
    let mut errors = Vec::new();

    if request.is_post() {
        errors = required(&request.form, VARIABLE_GROUPS.fields);
        if errors.is_empty() {
            ctx.flash("The variable group was successfully created.");
            ctx.redirect_to_alias("edit_template", &[&template_id]);
            return Ok(None);
        }
    }

    let action = ctx.route_by_alias(VARIABLE_GROUPS.add, &[&template_id]);
    let content = form(&action, &VARIABLE_GROUPS, &request.form, &errors);
    render(ctx, "Add variable group", content)
}

fn edit(ctx: &RequestContext, args: &[Option<String>]) -> HandlerResult {
    let id = id_arg(args, 0)?;
    let request = ctx.request();
    let mut errors = Vec::new();

    if request.is_post() {
        errors = required(&request.form, VARIABLE_GROUPS.fields);
        if errors.is_empty() {
            ctx.flash("The variable group was successfully updated.");
            ctx.redirect_to_alias(VARIABLE_GROUPS.edit, &[&id]);
            return Ok(None);
        }
    }

    let action = ctx.route_by_alias(VARIABLE_GROUPS.edit, &[&id]);
    let content = form(&action, &VARIABLE_GROUPS, &request.form, &errors);
    render(ctx, &format!("Edit variable group #{}", id), content)
}

fn delete(ctx: &RequestContext, args: &[Option<String>]) -> HandlerResult {
    let id = id_arg(args, 0)?;
    ctx.flash(&format!("The variable group #{} was successfully deleted.", id));
    ctx.redirect_to_alias(VARIABLE_GROUPS.list, &[]);
    Ok(None)
}

pub(super) fn register(controller: &mut Controller<RequestContext>) {
    controller
        .action("add", add)
        .action("edit", edit)
        .action("delete", delete);
}
