//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Repositories do not check
//! ownership; callers resolve the owning project first.

pub mod ai_analysis_repo;
pub mod project_repo;
pub mod track_repo;
pub mod user_repo;

pub use ai_analysis_repo::AiAnalysisRepo;
pub use project_repo::ProjectRepo;
pub use track_repo::TrackRepo;
pub use user_repo::UserRepo;
