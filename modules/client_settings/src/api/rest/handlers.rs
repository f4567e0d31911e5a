//! HTTP request handlers - thin layer that delegates to the module registry

use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::api::wire::{dto::*, mapper};
use crate::domain::{language, ModuleRegistry};

use super::error::{map_domain_error, Problem};

// ===== Module Handlers =====

/// Query parameters for the module listing
#[derive(Debug, Deserialize)]
pub struct ListModulesQuery {
    /// Include hidden modules in the listing
    #[serde(default)]
    pub include_hidden: bool,
}

/// List modules grouped by category
pub async fn list_modules(
    Extension(registry): Extension<Arc<ModuleRegistry>>,
    Query(query): Query<ListModulesQuery>,
) -> Result<Json<GroupedModulesDto>, Problem> {
    let groups = registry.list_by_category(query.include_hidden);
    Ok(Json(mapper::grouped_modules_dto(&groups)))
}

/// Enable or disable a module
pub async fn set_enabled(
    Extension(registry): Extension<Arc<ModuleRegistry>>,
    Path(name): Path<String>,
    Json(req): Json<SetEnabledRequestDto>,
) -> Result<StatusCode, Problem> {
    registry
        .set_enabled(&name, req.enabled)
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rebind a module's key
pub async fn bind_key(
    Extension(registry): Extension<Arc<ModuleRegistry>>,
    Path(name): Path<String>,
    Json(req): Json<BindRequestDto>,
) -> Result<StatusCode, Problem> {
    registry
        .set_key_bind(&name, req.key)
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Setting Handlers =====

/// Serialized settings tree of a module
pub async fn get_module_settings(
    Extension(registry): Extension<Arc<ModuleRegistry>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<SettingDto>>, Problem> {
    let settings = registry.settings_snapshot(&name).map_err(map_domain_error)?;
    Ok(Json(mapper::serialize_nodes(&settings)))
}

/// Apply an edit request to a setting addressed by path
pub async fn edit_setting(
    Extension(registry): Extension<Arc<ModuleRegistry>>,
    Path(name): Path<String>,
    Json(req): Json<EditRequestDto>,
) -> Result<StatusCode, Problem> {
    registry
        .apply(&name, &req.path, &req.new_value)
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Persistence Handlers =====

/// Serialized snapshot for the store collaborator
pub async fn get_snapshot(
    Extension(registry): Extension<Arc<ModuleRegistry>>,
    Path(name): Path<String>,
) -> Result<Json<ModuleSnapshotDto>, Problem> {
    let info = registry.find(&name).map_err(map_domain_error)?;
    let settings = registry.settings_snapshot(&name).map_err(map_domain_error)?;
    Ok(Json(mapper::snapshot_dto(&info, &settings)))
}

/// Restore a module from a serialized snapshot
pub async fn restore_snapshot(
    Extension(registry): Extension<Arc<ModuleRegistry>>,
    Path(name): Path<String>,
    Json(snapshot): Json<serde_json::Value>,
) -> Result<StatusCode, Problem> {
    let (enabled, key_bind, settings) =
        mapper::parse_snapshot(&snapshot).map_err(map_domain_error)?;
    registry
        .restore(&name, enabled, key_bind, settings)
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Language Handlers =====

/// Current language override and the known language set
pub async fn get_language(
    Extension(registry): Extension<Arc<ModuleRegistry>>,
) -> Result<Json<LanguageDto>, Problem> {
    let current = language::language_override(&registry).map_err(map_domain_error)?;
    let known = language::known_languages(&registry).map_err(map_domain_error)?;
    Ok(Json(LanguageDto {
        language: current.unwrap_or_default(),
        known_languages: known,
    }))
}

/// Override the client language
pub async fn set_language(
    Extension(registry): Extension<Arc<ModuleRegistry>>,
    Json(req): Json<LanguageRequestDto>,
) -> Result<StatusCode, Problem> {
    language::set_language_override(&registry, &req.language).map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Clear the language override
pub async fn unset_language(
    Extension(registry): Extension<Arc<ModuleRegistry>>,
) -> Result<StatusCode, Problem> {
    language::unset_language_override(&registry).map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
