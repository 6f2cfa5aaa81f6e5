//! Route definitions for the `/messages` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::message;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// GET    /?userId=   -> list_by_user
/// POST   /           -> create
/// DELETE /           -> delete_many
/// PATCH  /{id}       -> update
/// DELETE /{id}       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(message::list_by_user)
                .post(message::create)
                .delete(message::delete_many),
        )
        .route("/{id}", patch(message::update).delete(message::delete))
}
