//! Route definitions for the `/tracks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::track;
use crate::state::AppState;

/// Routes mounted at `/tracks`.
///
/// ```text
/// GET    /?project_id=  -> list_by_project
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(track::list_by_project).post(track::create))
        .route(
            "/{id}",
            get(track::get_by_id).put(track::update).delete(track::delete),
        )
}
