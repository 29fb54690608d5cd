// File: src/admin/controllers/crud.rs
// Purpose: List/add/edit/state actions shared by the admin sections

use maud::{html, Markup};
use oriole_router::HandlerResult;

use super::{id_arg, render, required};
use crate::admin::layout::form_errors;
use crate::context::RequestContext;
use crate::request::Params;

/// Aliases, labels and form fields of one admin section.
pub(crate) struct Section {
    pub title: &'static str,
    pub singular: &'static str,
    pub list: &'static str,
    pub add: &'static str,
    pub edit: &'static str,
    pub activate: &'static str,
    pub deactivate: &'static str,
    pub delete: &'static str,
    pub delete_all: &'static str,
    /// `(form name, label)`; every field is required.
    pub fields: &'static [(&'static str, &'static str)],
    /// Extra markup below the edit form.
    pub edit_extra: Option<fn(&RequestContext, u64) -> Markup>,
}

pub(crate) fn list(ctx: &RequestContext, section: &Section) -> HandlerResult {
    let content = html! {
        div class="mb-3" {
            a class="btn btn-primary" href=(ctx.route_by_alias(section.add, &[])) {
                "Add " (section.singular)
            }
            " "
            a class="btn btn-outline-danger" href=(ctx.route_by_alias(section.delete_all, &[])) {
                "Delete all"
            }
        }
        table class="table" {
            thead {
                tr {
                    th { "ID" }
                    @for (_, label) in section.fields {
                        th { (capitalize(label)) }
                    }
                    th { "Actions" }
                }
            }
            tbody {
                tr {
                    td colspan=(section.fields.len() + 2) { "No " (section.title.to_lowercase()) " yet." }
                }
            }
        }
    };

    render(ctx, section.title, content)
}

pub(crate) fn add(ctx: &RequestContext, section: &Section) -> HandlerResult {
    let request = ctx.request();
    let mut errors = Vec::new();

    if request.is_post() {
        errors = required(&request.form, section.fields);
        if errors.is_empty() {
            ctx.flash(&format!("The {} was successfully created.", section.singular));
            ctx.redirect_to_alias(section.list, &[]);
            return Ok(None);
        }
    }

    let action = ctx.route_by_alias(section.add, &[]);
    let content = form(&action, section, &request.form, &errors);
    render(ctx, &format!("Add {}", section.singular), content)
}

pub(crate) fn edit(ctx: &RequestContext, section: &Section, args: &[Option<String>]) -> HandlerResult {
    let id = id_arg(args, 0)?;
    let request = ctx.request();
    let mut errors = Vec::new();

    if request.is_post() {
        errors = required(&request.form, section.fields);
        if errors.is_empty() {
            ctx.flash(&format!("The {} was successfully updated.", section.singular));
            ctx.redirect_to_alias(section.edit, &[&id]);
            return Ok(None);
        }
    }

    let action = ctx.route_by_alias(section.edit, &[&id]);
    let content = html! {
        (form(&action, section, &request.form, &errors))
        div class="mt-3" {
            @if let Some(extra) = section.edit_extra {
                (extra(ctx, id))
            }
            a class="btn btn-outline-success" href=(ctx.route_by_alias(section.activate, &[&id])) { "Activate" }
            " "
            a class="btn btn-outline-secondary" href=(ctx.route_by_alias(section.deactivate, &[&id])) { "Deactivate" }
            " "
            a class="btn btn-outline-danger" href=(ctx.route_by_alias(section.delete, &[&id])) { "Delete" }
        }
    };
    render(ctx, &format!("Edit {} #{}", section.singular, id), content)
}

/// Activate, deactivate or delete one record, then go back to the list.
pub(crate) fn change(
    ctx: &RequestContext,
    section: &Section,
    args: &[Option<String>],
    done: &str,
) -> HandlerResult {
    let id = id_arg(args, 0)?;
    ctx.flash(&format!("The {} #{} was successfully {}.", section.singular, id, done));
    ctx.redirect_to_alias(section.list, &[]);
    Ok(None)
}

pub(crate) fn delete_all(ctx: &RequestContext, section: &Section) -> HandlerResult {
    ctx.flash(&format!("All {} were successfully deleted.", section.title.to_lowercase()));
    ctx.redirect_to_alias(section.list, &[]);
    Ok(None)
}

pub(crate) fn form(action: &str, section: &Section, values: &Params, errors: &[String]) -> Markup {
    html! {
        (form_errors(errors))
        form method="post" action=(action) {
            @for (name, label) in section.fields {
                div class="mb-3" {
                    label class="form-label" for=(name) { (capitalize(label)) }
                    input class="form-control" type="text" id=(name) name=(name)
                        value=(values.get(name).unwrap_or_default());
                }
            }
            button class="btn btn-primary" type="submit" { "Save" }
        }
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
