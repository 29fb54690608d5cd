// File: src/admin/controllers/languages.rs
// Purpose: Content languages section

use oriole_router::{Controller, HandlerResult};

use super::crud::{self, Section};
use super::id_arg;
use crate::context::RequestContext;

static LANGUAGES: Section = Section {
    title: "Languages",
    singular: "language",
    list: "languages_list",
    add: "add_language",
    edit: "edit_language",
    activate: "activate_language",
    deactivate: "deactivate_language",
    delete: "delete_language",
    delete_all: "delete_all_languages",
    fields: &[("title", "title"), ("code", "code")],
    edit_extra: None,
};

fn set_default(ctx: &RequestContext, args: &[Option<String>]) -> HandlerResult {
    let id = id_arg(args, 0)?;
    ctx.flash(&format!("The language #{} is now the default one.", id));
    ctx.redirect_to_alias(LANGUAGES.list, &[]);
    Ok(None)
}

pub(super) fn register(controller: &mut Controller<RequestContext>) {
    controller
        .action("list", |ctx, _| crud::list(ctx, &LANGUAGES))
        .action("add", |ctx, _| crud::add(ctx, &LANGUAGES))
        .action("edit", |ctx, args| crud::edit(ctx, &LANGUAGES, args))
        .action("activate", |ctx, args| crud::change(ctx, &LANGUAGES, args, "activated"))
        .action("deactivate", |ctx, args| crud::change(ctx, &LANGUAGES, args, "deactivated"))
        .action("delete", |ctx, args| crud::change(ctx, &LANGUAGES, args, "deleted"))
        .action("deleteAll", |ctx, _| crud::delete_all(ctx, &LANGUAGES))
        .action("setDefault", set_default);
}
