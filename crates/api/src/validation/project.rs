//! Rules for project requests.

use mailstub_core::messages::{
    PROJECT_ID_REQUIRED, PROJECT_NAME_REQUIRED, PROJECT_NAME_TAKEN, PROJECT_NOT_FOUND,
};
use mailstub_core::ids::EntityKind;
use mailstub_core::normalize::normalize;
use mailstub_core::validation::FieldErrors;
use mailstub_db::models::project::Project;
use mailstub_db::Store;
use serde::Deserialize;
use serde_json::Value;

use super::fields::{self, ID, NAME};
use crate::error::AppResult;

/// Body of `POST /projects` and `PUT /projects/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectPayload {
    pub name: Option<Value>,
}

/// A project creation that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Trimmed name.
    pub name: String,
}

/// A rename that passed every rule.
#[derive(Debug, Clone)]
pub struct ProjectRename {
    pub project: Project,
    /// Trimmed new name.
    pub name: String,
}

pub async fn check_create(store: &dyn Store, payload: &ProjectPayload) -> AppResult<NewProject> {
    let mut errors = FieldErrors::new();

    let name = fields::required(&payload.name, NAME, PROJECT_NAME_REQUIRED, &mut errors);
    if let Some(name) = name {
        if store.find_project_by_name(&normalize(name), None).await?.is_some() {
            errors.add(NAME, PROJECT_NAME_TAKEN);
        }
    }

    match name {
        Some(name) if errors.is_empty() => Ok(NewProject {
            name: name.to_string(),
        }),
        _ => Err(errors.into()),
    }
}

pub async fn check_update(
    store: &dyn Store,
    id: &str,
    payload: &ProjectPayload,
) -> AppResult<ProjectRename> {
    let mut errors = FieldErrors::new();

    let project = store.find_project(id).await?;
    if project.is_none() {
        errors.add(ID, PROJECT_NOT_FOUND);
    }

    let name = fields::required(&payload.name, NAME, PROJECT_NAME_REQUIRED, &mut errors);
    if let Some(name) = name {
        // Matching the project's own current name is a no-op rename, not a clash.
        if store
            .find_project_by_name(&normalize(name), Some(id))
            .await?
            .is_some()
        {
            errors.add(NAME, PROJECT_NAME_TAKEN);
        }
    }

    match (project, name) {
        (Some(project), Some(name)) if errors.is_empty() => Ok(ProjectRename {
            project,
            name: name.to_string(),
        }),
        _ => Err(errors.into()),
    }
}

pub async fn check_delete(store: &dyn Store, id: &str) -> AppResult<Project> {
    match store.find_project(id).await? {
        Some(project) => Ok(project),
        None => Err(FieldErrors::single(ID, PROJECT_NOT_FOUND).into()),
    }
}

/// Resolve a required project reference held in `field`.
///
/// Records `"Project ID is required"` when `id` is absent and `"Project not
/// found"` when it points nowhere.
pub(crate) async fn referenced_project(
    store: &dyn Store,
    id: Option<&str>,
    field: &str,
    errors: &mut FieldErrors,
) -> AppResult<Option<Project>> {
    let Some(id) = id else {
        errors.add(field, PROJECT_ID_REQUIRED);
        return Ok(None);
    };

    let project = if fields::is_id_of(EntityKind::Project, id) {
        store.find_project(id).await?
    } else {
        None
    };
    if project.is_none() {
        errors.add(field, PROJECT_NOT_FOUND);
    }
    Ok(project)
}
