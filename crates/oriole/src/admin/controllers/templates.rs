// File: src/admin/controllers/templates.rs
// Purpose: Page templates section

use maud::{html, Markup};
use oriole_router::Controller;

use super::crud::{self, Section};
use crate::context::RequestContext;

static TEMPLATES: Section = Section {
    title: "Templates",
    singular: "template",
    list: "templates_list",
    add: "add_template",
    edit: "edit_template",
    activate: "activate_template",
    deactivate: "deactivate_template",
    delete: "delete_template",
    delete_all: "delete_all_templates",
    fields: &[("title", "title"), ("file", "file")],
    edit_extra: Some(variable_groups),
};

/// Links into the template's variable groups.
fn variable_groups(ctx: &RequestContext, id: u64) -> Markup {
    html! {
        a class="btn btn-outline-primary" href=(ctx.route_by_alias("add_variable_group", &[&id])) {
            "Add variable group"
        }
        " "
    }
}

pub(super) fn register(controller: &mut Controller<RequestContext>) {
    controller
        .action("list", |ctx, _| crud::list(ctx, &TEMPLATES))
        .action("add", |ctx, _| crud::add(ctx, &TEMPLATES))
        .action("edit", |ctx, args| crud::edit(ctx, &TEMPLATES, args))
        .action("activate", |ctx, args| crud::change(ctx, &TEMPLATES, args, "activated"))
        .action("deactivate", |ctx, args| crud::change(ctx, &TEMPLATES, args, "deactivated"))
        .action("delete", |ctx, args| crud::change(ctx, &TEMPLATES, args, "deleted"))
        .action("deleteAll", |ctx, _| crud::delete_all(ctx, &TEMPLATES));
}
