//! Handler for the effect catalog the mixer UI builds its menus from.

use axum::Json;
use serde::Serialize;
use studio_core::effects::{Effect, EffectKind};

use crate::response::ApiResponse;

/// One entry per effect type, with its factory settings.
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    pub label: &'static str,
    /// A ready-to-insert effect carrying the default parameters.
    pub template: Effect,
}

#[derive(Debug, Serialize)]
pub struct CatalogPayload {
    pub effects: Vec<CatalogEntry>,
}

/// GET /api/effects/catalog
pub async fn catalog() -> Json<ApiResponse<CatalogPayload>> {
    let effects = EffectKind::ALL
        .iter()
        .map(|&kind| CatalogEntry {
            kind,
            label: kind.label(),
            template: Effect::with_defaults(kind.as_str(), kind),
        })
        .collect();
    Json(ApiResponse::data(CatalogPayload { effects }))
}
