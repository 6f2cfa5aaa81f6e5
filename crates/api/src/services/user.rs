use mailstub_core::ids::EntityKind;
use mailstub_core::messages::{self, USER_EMAIL_TAKEN, USER_NOT_FOUND};
use mailstub_core::types::{now, touch};
use mailstub_db::models::project::Project;
use mailstub_db::models::user::User;
use mailstub_db::Store;

use super::{gone, on_duplicate};
use crate::error::AppResult;
use crate::validation::fields::{EMAIL, ID};
use crate::validation::user::{NewUser, UserEmailChange};

pub struct UserService;

impl UserService {
    /// Users of `project`, oldest first.
    pub async fn list(store: &dyn Store, project: &Project) -> AppResult<Vec<User>> {
        Ok(store.list_users(&project.id).await?)
    }

    pub async fn create(store: &dyn Store, input: NewUser) -> AppResult<User> {
        let at = now();
        let user = User {
            id: EntityKind::User.new_id(),
            project_id: input.project_id,
            email: input.email,
            created_at: at,
            updated_at: at,
        };

        store
            .insert_user(&user)
            .await
            .map_err(on_duplicate(EMAIL, USER_EMAIL_TAKEN))?;

        tracing::info!(user_id = %user.id, project_id = %user.project_id, "User created");
        Ok(user)
    }

    /// Change a user's address. Messages already delivered keep their
    /// original receiver and stay in this mailbox.
    pub async fn change_email(store: &dyn Store, input: UserEmailChange) -> AppResult<User> {
        let UserEmailChange { user, email } = input;

        let updated = store
            .update_user_email(&user.id, &email, touch(user.updated_at))
            .await
            .map_err(on_duplicate(EMAIL, USER_EMAIL_TAKEN))?
            .ok_or_else(|| gone(ID, USER_NOT_FOUND))?;

        tracing::info!(user_id = %updated.id, "User email changed");
        Ok(updated)
    }

    /// Remove the user and every message in their mailbox.
    pub async fn delete(store: &dyn Store, user: &User) -> AppResult<String> {
        if !store.delete_user(&user.id).await? {
            return Err(gone(ID, USER_NOT_FOUND));
        }

        tracing::info!(user_id = %user.id, project_id = %user.project_id, "User deleted");
        Ok(messages::deleted(EntityKind::User))
    }
}
