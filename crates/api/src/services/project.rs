use mailstub_core::ids::EntityKind;
use mailstub_core::messages::{self, PROJECT_NAME_TAKEN, PROJECT_NOT_FOUND};
use mailstub_core::types::{now, touch};
use mailstub_db::models::project::Project;
use mailstub_db::Store;

use super::{gone, on_duplicate};
use crate::error::AppResult;
use crate::validation::fields::{ID, NAME};
use crate::validation::project::{NewProject, ProjectRename};

pub struct ProjectService;

impl ProjectService {
    /// Every project, oldest first.
    pub async fn list(store: &dyn Store) -> AppResult<Vec<Project>> {
        Ok(store.list_projects().await?)
    }

    pub async fn create(store: &dyn Store, input: NewProject) -> AppResult<Project> {
        let at = now();
        let project = Project {
            id: EntityKind::Project.new_id(),
            name: input.name,
            created_at: at,
            updated_at: at,
        };

        store
            .insert_project(&project)
            .await
            .map_err(on_duplicate(NAME, PROJECT_NAME_TAKEN))?;

        tracing::info!(project_id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    pub async fn rename(store: &dyn Store, input: ProjectRename) -> AppResult<Project> {
        let ProjectRename { project, name } = input;

        let updated = store
            .update_project_name(&project.id, &name, touch(project.updated_at))
            .await
            .map_err(on_duplicate(NAME, PROJECT_NAME_TAKEN))?
            .ok_or_else(|| gone(ID, PROJECT_NOT_FOUND))?;

        tracing::info!(project_id = %updated.id, name = %updated.name, "Project renamed");
        Ok(updated)
    }

    /// Remove the project with all of its users and messages.
    pub async fn delete(store: &dyn Store, project: &Project) -> AppResult<String> {
        if !store.delete_project(&project.id).await? {
            return Err(gone(ID, PROJECT_NOT_FOUND));
        }

        tracing::info!(project_id = %project.id, "Project deleted");
        Ok(messages::deleted(EntityKind::Project))
    }
}
