// File: src/admin/routes.rs
// Purpose: Route table of the admin application

use oriole_router::{GroupOptions, RouteError, RouteOptions, Routes, Verb};

use super::controllers::NAMESPACE;
use crate::app::RoutesConfig;
use crate::config::AppConfig;
use crate::context::RequestContext;

const GET_POST: &[Verb] = &[Verb::Get, Verb::Post];

fn named(alias: &str) -> RouteOptions {
    RouteOptions::named(alias)
}

/// Admin pages under `app.admin_base_path`, bound to `app.admin_domain`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminRoutes;

impl RoutesConfig for AdminRoutes {
    fn set_routes(
        &self,
        routes: &mut Routes<RequestContext>,
        app: &AppConfig,
    ) -> Result<(), RouteError> {
        let options = GroupOptions::new()
            .with_namespace(NAMESPACE)
            .with_domain(app.admin_domain.as_str());

        routes.group_with(&app.admin_base_path, options, |routes| {
            routes.get("", "HomeController::index", named("admin_home"))?;

            routes.group("templates", |routes| {
                routes.get("", "TemplatesController::list", named("templates_list"))?;
                routes.match_verbs(GET_POST, "add", "TemplatesController::add", named("add_template"))?;
                routes.match_verbs(GET_POST, "edit/(:num)", "TemplatesController::edit/$0", named("edit_template"))?;
                routes.get("activate/(:num)", "TemplatesController::activate/$0", named("activate_template"))?;
                routes.get("deactivate/(:num)", "TemplatesController::deactivate/$0", named("deactivate_template"))?;
                routes.get("delete/(:num)", "TemplatesController::delete/$0", named("delete_template"))?;
                routes.get("delete-all", "TemplatesController::deleteAll", named("delete_all_templates"))?;
                Ok(())
            })?;

            routes.group("variables", |routes| {
                routes.get("", "VariablesController::list", named("variables_list"))?;
                routes.match_verbs(GET_POST, "add", "VariablesController::add", named("add_variable"))?;
                routes.match_verbs(GET_POST, "edit/(:num)", "VariablesController::edit/$0", named("edit_variable"))?;
                routes.get("activate/(:num)", "VariablesController::activate/$0", named("activate_variable"))?;
                routes.get("deactivate/(:num)", "VariablesController::deactivate/$0", named("deactivate_variable"))?;
                routes.get("delete/(:num)", "VariablesController::delete/$0", named("delete_variable"))?;
                routes.get("delete-all", "VariablesController::deleteAll", named("delete_all_variables"))?;
                routes.get("delete-value/(:num)", "VariablesController::deleteValue/$0", named("delete_variable_value"))?;
                Ok(())
            })?;

            routes.group("resources", |routes| {
                routes.match_verbs(GET_POST, "add/(:num)", "ResourcesController::add/$0", named("add_resource"))?;
                routes.match_verbs(GET_POST, "edit/(:num)", "ResourcesController::edit/$0", named("edit_resource"))?;
                routes.get("activate/(:num)", "ResourcesController::activate/$0", named("activate_resource"))?;
                routes.get("deactivate/(:num)", "ResourcesController::deactivate/$0", named("deactivate_resource"))?;
                routes.get("delete/(:num)", "ResourcesController::delete/$0", named("delete_resource"))?;
                routes.get("set-template/(:num)/(:num)", "ResourcesController::setTemplate/$0/$1", named("set_resource_template"))?;
                routes.get("set-parent/(:num)/(:num)", "ResourcesController::setParent/$0/$1", named("set_resource_parent"))?;
                routes.get("set-order/(:num)/(:num)", "ResourcesController::setOrder/$0/$1", named("set_resource_order"))?;
                Ok(())
            })?;

            routes.group("languages", |routes| {
                routes.get("", "LanguagesController::list", named("languages_list"))?;
                routes.match_verbs(GET_POST, "add", "LanguagesController::add", named("add_language"))?;
                routes.match_verbs(GET_POST, "edit/(:num)", "LanguagesController::edit/$0", named("edit_language"))?;
                routes.get("activate/(:num)", "LanguagesController::activate/$0", named("activate_language"))?;
                routes.get("deactivate/(:num)", "LanguagesController::deactivate/$0", named("deactivate_language"))?;
                routes.get("delete/(:num)", "LanguagesController::delete/$0", named("delete_language"))?;
                routes.get("delete-all", "LanguagesController::deleteAll", named("delete_all_languages"))?;
                routes.get("set-default/(:num)", "LanguagesController::setDefault/$0", named("set_default_language"))?;
                Ok(())
            })?;

            routes.group("variable-groups", |routes| {
                routes.match_verbs(GET_POST, "add/(:num)", "VariableGroupsController::add/$0", named("add_variable_group"))?;
                routes.match_verbs(GET_POST, "edit/(:num)", "VariableGroupsController::edit/$0", named("edit_variable_group"))?;
                routes.get("delete/(:num)", "VariableGroupsController::delete/$0", named("delete_variable_group"))?;
                Ok(())
            })?;

            routes.get(
                "get-assets/(:any)/(:segment)/(:segment)",
                "AssetsController::get/$0/$1/$2",
                named("get_assets"),
            )?;
            Ok(())
        })?;

        Ok(())
    }
}
