// File: src/admin/controllers/variables.rs
// Purpose: Template variables section

use oriole_router::{Controller, HandlerResult};

use super::crud::{self, Section};
use super::id_arg;
use crate::context::RequestContext;

static VARIABLES: Section = Section {
    title: "Variables",
    singular: "variable",
    list: "variables_list",
    add: "add_variable",
    edit: "edit_variable",
    activate: "activate_variable",
    deactivate: "deactivate_variable",
    delete: "delete_variable",
    delete_all: "delete_all_variables",
    fields: &[("title", "title"), ("name", "name")],
    edit_extra: None,
};

/// Removes one stored value of a variable, then returns to the list.
fn delete_value(ctx: &RequestContext, args: &[Option<String>]) -> HandlerResult {
    let id = id_arg(args, 0)?;
    ctx.flash(&format!("The variable value #{} was successfully deleted.", id));
    ctx.redirect_to_alias(VARIABLES.list, &[]);
    Ok(None)
}

pub(super) fn register(controller: &mut Controller<RequestContext>) {
    controller
        .action("list", |ctx, _| crud::list(ctx, &VARIABLES))
        .action("add", |ctx, _| crud::add(ctx, &VARIABLES))
        .action("edit", |ctx, args| crud::edit(ctx, &VARIABLES, args))
        .action("activate", |ctx, args| crud::change(ctx, &VARIABLES, args, "activated"))
        .action("deactivate", |ctx, args| crud::change(ctx, &VARIABLES, args, "deactivated"))
        .action("delete", |ctx, args| crud::change(ctx, &VARIABLES, args, "deleted"))
        .action("deleteAll", |ctx, _| crud::delete_all(ctx, &VARIABLES))
        .action("deleteValue", delete_value);
}
