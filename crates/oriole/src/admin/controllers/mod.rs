// File: src/admin/controllers/mod.rs
// Purpose: Admin controllers and the helpers they share

mod assets;
mod crud;
mod home;
mod languages;
mod resources;
mod templates;
mod variable_groups;
mod variables;

use anyhow::Context;
use maud::Markup;
use oriole_router::{Controller, Controllers, HandlerResult};

use super::layout;
use crate::context::RequestContext;
use crate::request::Params;

/// Namespace the admin route group resolves controllers in.
pub const NAMESPACE: &str = "Oriole\\Controllers";

/// Registers every admin controller.
pub fn register(controllers: &mut Controllers<RequestContext>) {
    home::register(controller(controllers, "HomeController"));
    templates::register(controller(controllers, "TemplatesController"));
    variables::register(controller(controllers, "VariablesController"));
    resources::register(controller(controllers, "ResourcesController"));
    languages::register(controller(controllers, "LanguagesController"));
    variable_groups::register(controller(controllers, "VariableGroupsController"));
    assets::register(controller(controllers, "AssetsController"));
}

fn controller<'a>(
    controllers: &'a mut Controllers<RequestContext>,
    name: &str,
) -> &'a mut Controller<RequestContext> {
    controllers.controller(format!("{}\\{}", NAMESPACE, name))
}

/// Numeric route argument at `index`.
pub(crate) fn id_arg(args: &[Option<String>], index: usize) -> anyhow::Result<u64> {
    let raw = args
        .get(index)
        .and_then(Option::as_deref)
        .with_context(|| format!("missing route argument {}", index))?;

    raw.parse()
        .with_context(|| format!("route argument {} is not an id: {:?}", index, raw))
}

/// Renders `content` inside the admin layout.
pub(crate) fn render(ctx: &RequestContext, title: &str, content: Markup) -> HandlerResult {
    Ok(Some(layout::page(ctx, title, content).into_string()))
}

/// One message per listed field that is missing or blank.
pub(crate) fn required(form: &Params, fields: &[(&str, &str)]) -> Vec<String> {
    fields
        .iter()
        .filter(|(name, _)| form.get(name).map_or(true, |value| value.trim().is_empty()))
        .map(|(_, label)| format!("The {} field is required.", label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_id_arg() {
        let args = vec![Some("7".to_string()), None, Some("x".to_string())];
        assert_eq!(id_arg(&args, 0).unwrap(), 7);
        assert!(id_arg(&args, 1).is_err());
        assert!(id_arg(&args, 2).is_err());
        assert!(id_arg(&args, 3).is_err());
    }

    #[test]
    fn test_required_fields() {
        let form = Params::parse("title=+&name=en");
        assert_eq!(
            required(&form, &[("title", "title"), ("name", "name"), ("code", "code")]),
            vec![
                "The title field is required.".to_string(),
                "The code field is required.".to_string(),
            ]
        );
    }

    #[test]
    fn test_every_controller_is_namespaced() {
        let mut controllers = Controllers::new();
        register(&mut controllers);
        assert_eq!(controllers.len(), 7);
        assert!(controllers.get("Oriole\\Controllers\\TemplatesController").is_some());
        assert!(controllers.get("TemplatesController").is_none());
    }
}
