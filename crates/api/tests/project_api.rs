//! HTTP-level tests for `/api/projects`.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_message, create_project, create_user, delete, get, post_json, put_json};
use serde_json::json;

#[tokio::test]
async fn create_project_returns_201_with_prefixed_id() {
    let app = common::app().await;
    let response = post_json(&app, "/api/projects", json!({ "name": "  Acme  " })).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let project = &json["project"];
    assert_eq!(project["name"], "Acme");
    assert!(project["id"].as_str().unwrap().starts_with("p_"));
    assert_eq!(project["createdAt"], project["updatedAt"]);
}

#[tokio::test]
async fn create_project_requires_name() {
    let app = common::app().await;
    for body in [json!({}), json!({ "name": "   " }), json!({ "name": 42 })] {
        let response = post_json(&app, "/api/projects", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errors"]["name"], "Project name is required");
    }
}

#[tokio::test]
async fn duplicate_names_compare_case_and_whitespace_insensitively() {
    let app = common::app().await;
    create_project(&app, "Acme").await;

    let response = post_json(&app, "/api/projects", json!({ "name": " ACME " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["name"], "A project with this name already exists");

    let json = body_json(get(&app, "/api/projects").await).await;
    assert_eq!(json["projects"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_projects_in_creation_order() {
    let app = common::app().await;
    create_project(&app, "First").await;
    create_project(&app, "Second").await;
    create_project(&app, "Third").await;

    let response = get(&app, "/api/projects").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<_> = json["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["First", "Second", "Third"]);
}

#[tokio::test]
async fn rename_to_own_name_in_different_case_succeeds() {
    let app = common::app().await;
    let project = create_project(&app, "Acme").await;
    let id = project["id"].as_str().unwrap();

    let response = put_json(&app, &format!("/api/projects/{id}"), json!({ "name": "ACME" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["project"]["name"], "ACME");
    assert_eq!(json["project"]["createdAt"], project["createdAt"]);
    assert_ne!(json["project"]["updatedAt"], project["updatedAt"]);
}

#[tokio::test]
async fn rename_into_another_projects_name_is_rejected() {
    let app = common::app().await;
    create_project(&app, "Acme").await;
    let other = create_project(&app, "Globex").await;
    let id = other["id"].as_str().unwrap();

    let response = put_json(&app, &format!("/api/projects/{id}"), json!({ "name": "acme" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["name"], "A project with this name already exists");
}

#[tokio::test]
async fn rename_missing_project_reports_id_and_name() {
    let app = common::app().await;
    let response = put_json(&app, "/api/projects/p_missing", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["id"], "Project not found");
    assert_eq!(json["errors"]["name"], "Project name is required");
}

#[tokio::test]
async fn delete_project_cascades_to_users_and_messages() {
    let app = common::app().await;
    let project = create_project(&app, "Acme").await;
    let project_id = project["id"].as_str().unwrap();
    let user = create_user(&app, project_id, "dev@example.com").await;
    let user_id = user["id"].as_str().unwrap();
    let message = create_message(&app, project_id, "dev@example.com", "Welcome").await;
    let message_id = message["id"].as_str().unwrap();

    let response = delete(&app, &format!("/api/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Project deleted successfully");

    let json = body_json(get(&app, "/api/projects").await).await;
    assert!(json["projects"].as_array().unwrap().is_empty());

    let json = body_json(get(&app, &format!("/api/users?projectId={project_id}")).await).await;
    assert_eq!(json["errors"]["projectId"], "Project not found");

    let json = body_json(get(&app, &format!("/api/messages?userId={user_id}")).await).await;
    assert_eq!(json["errors"]["userId"], "User not found");

    let json = body_json(delete(&app, &format!("/api/messages/{message_id}")).await).await;
    assert_eq!(json["errors"]["id"], "Message not found");
}

#[tokio::test]
async fn delete_missing_project_is_a_validation_error() {
    let app = common::app().await;
    let response = delete(&app, "/api/projects/p_missing").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["id"], "Project not found");
}
