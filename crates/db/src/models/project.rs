//! Project entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::ownership::Owned;
use studio_core::project::ProjectStatus;
use studio_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub bpm: i32,
    pub key_signature: String,
    pub time_signature: String,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    /// Length in seconds.
    pub duration: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Project {
    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

/// DTO for creating a new project. `None` fields take the column defaults.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub bpm: Option<i32>,
    pub key_signature: Option<String>,
    pub time_signature: Option<String>,
    pub status: Option<ProjectStatus>,
    pub duration: Option<f64>,
}

/// DTO for updating an existing project. All fields are optional.
///
/// `description: Some("")` clears the description.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub bpm: Option<i32>,
    pub key_signature: Option<String>,
    pub time_signature: Option<String>,
    pub status: Option<ProjectStatus>,
    pub duration: Option<f64>,
}
