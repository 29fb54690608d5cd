// File: src/admin/controllers/home.rs
// Purpose: Admin dashboard

use maud::html;
use oriole_router::{Controller, HandlerResult};

use super::render;
use crate::admin::layout::header_menu;
use crate::context::RequestContext;

fn index(ctx: &RequestContext, _args: &[Option<String>]) -> HandlerResult {
    let content = html! {
        div class="list-group" {
            @for item in header_menu(ctx) {
                a class="list-group-item list-group-item-action" href=(item.link) { (item.title) }
            }
        }
    };

    render(ctx, "Home", content)
}

pub(super) fn register(controller: &mut Controller<RequestContext>) {
    controller.action("index", index);
}
