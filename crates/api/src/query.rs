//! Query parameter types for list endpoints.

use serde::Deserialize;

/// `GET /users?projectId=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersQuery {
    pub project_id: Option<String>,
}

/// `GET /messages?userId=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQuery {
    pub user_id: Option<String>,
}
