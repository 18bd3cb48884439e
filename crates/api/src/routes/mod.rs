pub mod ai_analysis;
pub mod auth;
pub mod project;
pub mod track;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                 service + database health (public)
/// /effects/catalog                        effect types and defaults (public)
///
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/me                                current user (requires auth)
/// /auth/logout                            logout (requires auth)
///
/// /projects                               list, create
/// /projects/{id}                          get, update, delete
///
/// /tracks?project_id=                     list by project, create
/// /tracks/{id}                            get, update, delete
///
/// /ai-analyses?project_id=&track_id=      list by project, create
/// /ai-analyses/{id}                       get, update, delete
/// /ai-analyses/stats/{project_id}         per-project statistics
/// /ai-analysis/...                        alias of /ai-analyses
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/effects/catalog", get(handlers::effects::catalog))
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/tracks", track::router())
        .nest("/ai-analyses", ai_analysis::router())
        .nest("/ai-analysis", ai_analysis::router())
}
