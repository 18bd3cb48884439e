//! Route definitions for the `/ai-analyses` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::ai_analysis;
use crate::state::AppState;

/// Routes mounted at `/ai-analyses` (and the `/ai-analysis` alias).
///
/// ```text
/// GET    /?project_id=&track_id=  -> list_by_project
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// GET    /stats/{project_id}      -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(ai_analysis::list_by_project).post(ai_analysis::create),
        )
        .route("/stats/{project_id}", get(ai_analysis::stats))
        .route(
            "/{id}",
            get(ai_analysis::get_by_id)
                .put(ai_analysis::update)
                .delete(ai_analysis::delete),
        )
}
