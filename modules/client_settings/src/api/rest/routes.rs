//! Route registration for the UI process boundary

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Extension, Router,
};

use crate::domain::ModuleRegistry;

use super::handlers;

/// Register all REST routes on the given router
pub fn register_routes(router: Router, registry: Arc<ModuleRegistry>) -> Router {
    router
        .route("/client/modules", get(handlers::list_modules))
        .route(
            "/client/modules/{name}/settings",
            get(handlers::get_module_settings).patch(handlers::edit_setting),
        )
        .route("/client/modules/{name}/enabled", put(handlers::set_enabled))
        .route("/client/modules/{name}/bind", put(handlers::bind_key))
        .route(
            "/client/modules/{name}/snapshot",
            get(handlers::get_snapshot).put(handlers::restore_snapshot),
        )
        .route(
            "/client/language",
            get(handlers::get_language)
                .put(handlers::set_language)
                .delete(handlers::unset_language),
        )
        .layer(Extension(registry))
}
