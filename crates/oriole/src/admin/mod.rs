// File: src/admin/mod.rs
// Purpose: The built-in admin application

mod controllers;
pub mod layout;
mod routes;

pub use controllers::{register as register_controllers, NAMESPACE};
pub use routes::AdminRoutes;
