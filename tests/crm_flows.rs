//! End-to-end CRM flows against a real PostgreSQL database.
//!
//! Run with `cargo test -- --ignored` after pointing `CRM__DATABASE__*`
//! at a database; migrations are applied automatically. Each test
//! registers its own users, so owner scoping keeps test data isolated.

mod common;

use chrono::{Duration, Utc};
use common::TestApp;

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn cross_owner_client_is_indistinguishable_from_missing() {
    let app = TestApp::with_database().await;

    let (_, token_a) = app.register_user(&app.unique_email("owner_a")).await;
    let (_, token_b) = app.register_user(&app.unique_email("owner_b")).await;

    let client = app.create_client(&token_a, "Acme Corp").await;
    let client_id = client["id"].as_str().unwrap();

    // The owner sees it.
    let response = app
        .client
        .get(app.url(&format!("/api/clients/{client_id}")))
        .bearer_auth(&token_a)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Another user gets the same 404 a missing id would produce.
    let response = app
        .client
        .get(app.url(&format!("/api/clients/{client_id}")))
        .bearer_auth(&token_b)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Client not found");

    // Same for update and delete.
    let response = app
        .client
        .put(app.url(&format!("/api/clients/{client_id}")))
        .bearer_auth(&token_b)
        .json(&serde_json::json!({ "name": "Hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = app
        .client
        .delete(app.url(&format!("/api/clients/{client_id}")))
        .bearer_auth(&token_b)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn duplicate_email_registration_is_rejected() {
    let app = TestApp::with_database().await;
    let email = app.unique_email("duplicate");

    app.register_user(&email).await;

    let response = app
        .client
        .post(app.url("/api/auth/register"))
        .json(&serde_json::json!({
            "email": email,
            "password": "anotherpassword",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User with this email already exists");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn login_failures_are_uniform() {
    let app = TestApp::with_database().await;
    let email = app.unique_email("login");
    app.register_user(&email).await;

    let wrong_password = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({ "email": email, "password": "wrongpassword" }))
        .send()
        .await
        .unwrap();
    let unknown_email = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": app.unique_email("nobody"),
            "password": "whatever123",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_email.status(), 401);

    let body_a: serde_json::Value = wrong_password.json().await.unwrap();
    let body_b: serde_json::Value = unknown_email.json().await.unwrap();
    assert_eq!(body_a, body_b, "both failures must be indistinguishable");
    assert_eq!(body_a["message"], "Invalid credentials");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn login_returns_user_without_password_hash() {
    let app = TestApp::with_database().await;
    let email = app.unique_email("profile");
    let (_, token) = app.register_user(&email).await;

    let response = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({ "email": email, "password": "testpassword123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], email.as_str());
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());

    let response = app
        .client
        .get(app.url("/api/auth/profile"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user"]["firstName"], "Test");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn project_requires_a_client_owned_by_the_caller() {
    let app = TestApp::with_database().await;

    let (_, token_a) = app.register_user(&app.unique_email("proj_a")).await;
    let (_, token_b) = app.register_user(&app.unique_email("proj_b")).await;

    let foreign_client = app.create_client(&token_b, "Foreign Co").await;

    let response = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(&token_a)
        .json(&serde_json::json!({
            "title": "Website redesign",
            "clientId": foreign_client["id"],
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Client not found");

    // With the caller's own client it succeeds and defaults the status.
    let own_client = app.create_client(&token_a, "Own Co").await;
    let response = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(&token_a)
        .json(&serde_json::json!({
            "title": "Website redesign",
            "clientId": own_client["id"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["project"]["status"], "NOT_STARTED");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn interaction_reference_rules() {
    let app = TestApp::with_database().await;
    let (_, token) = app.register_user(&app.unique_email("interactions")).await;

    // Neither reference: rejected before anything is stored.
    let response = app
        .client
        .post(app.url("/api/interactions"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "date": Utc::now(),
            "type": "CALL",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Either clientId or projectId must be provided");

    // Exactly one reference: accepted.
    let client = app.create_client(&token, "Interaction Co").await;
    let response = app
        .client
        .post(app.url("/api/interactions"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "date": Utc::now(),
            "type": "EMAIL",
            "clientId": client["id"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    // Both references: accepted.
    let project = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Launch",
            "clientId": client["id"],
        }))
        .send()
        .await
        .unwrap();
    let project: serde_json::Value = project.json().await.unwrap();

    let response = app
        .client
        .post(app.url("/api/interactions"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "date": Utc::now(),
            "type": "MEETING",
            "clientId": client["id"],
            "projectId": project["project"]["id"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn deleting_a_client_cascades_to_dependents() {
    let app = TestApp::with_database().await;
    let (_, token) = app.register_user(&app.unique_email("cascade")).await;

    let client = app.create_client(&token, "Doomed Co").await;
    let client_id = client["id"].as_str().unwrap().to_string();

    let project: serde_json::Value = app
        .client
        .post(app.url("/api/projects"))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "title": "Doomed project", "clientId": client_id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let project_id = project["project"]["id"].as_str().unwrap().to_string();

    let interaction: serde_json::Value = app
        .client
        .post(app.url("/api/interactions"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "date": Utc::now(),
            "type": "CALL",
            "projectId": project_id,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let interaction_id = interaction["interaction"]["id"].as_str().unwrap().to_string();

    let reminder: serde_json::Value = app
        .client
        .post(app.url("/api/reminders"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Follow up",
            "dueDate": Utc::now() + Duration::days(2),
            "clientId": client_id,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let reminder_id = reminder["reminder"]["id"].as_str().unwrap().to_string();

    let response = app
        .client
        .delete(app.url(&format!("/api/clients/{client_id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Every dependent row is gone with the parent.
    for path in [
        format!("/api/clients/{client_id}"),
        format!("/api/projects/{project_id}"),
        format!("/api/interactions/{interaction_id}"),
        format!("/api/reminders/{reminder_id}"),
    ] {
        let response = app
            .client
            .get(app.url(&path))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404, "expected 404 for {path}");
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn list_pagination_envelope_is_consistent() {
    let app = TestApp::with_database().await;
    let (_, token) = app.register_user(&app.unique_email("paging")).await;

    for i in 0..7 {
        app.create_client(&token, &format!("Client {i}")).await;
    }

    let first: serde_json::Value = app
        .client
        .get(app.url("/api/clients?page=1&limit=3"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first["pagination"]["totalCount"], 7);
    assert_eq!(first["pagination"]["totalPages"], 3);
    assert_eq!(first["pagination"]["hasNextPage"], true);
    assert_eq!(first["pagination"]["hasPreviousPage"], false);
    assert_eq!(first["clients"].as_array().unwrap().len(), 3);

    let last: serde_json::Value = app
        .client
        .get(app.url("/api/clients?page=3&limit=3"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(last["pagination"]["hasNextPage"], false);
    assert_eq!(last["pagination"]["hasPreviousPage"], true);
    assert_eq!(last["clients"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn client_search_matches_across_fields() {
    let app = TestApp::with_database().await;
    let (_, token) = app.register_user(&app.unique_email("search")).await;

    app.create_client(&token, "Blue Harbor Shipping").await;
    app.create_client(&token, "Red Rock Mining").await;

    let found: serde_json::Value = app
        .client
        .get(app.url("/api/clients?search=harbor"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(found["pagination"]["totalCount"], 1);
    assert_eq!(found["clients"][0]["name"], "Blue Harbor Shipping");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn dashboard_facets_are_bounded_and_windowed() {
    let app = TestApp::with_database().await;
    let (_, token) = app.register_user(&app.unique_email("dashboard")).await;

    let client = app.create_client(&token, "Dashboard Co").await;
    let client_id = client["id"].as_str().unwrap().to_string();

    // One project due soon, one completed (excluded), one far out.
    for (title, status, days) in [
        ("Due soon", "IN_PROGRESS", 2),
        ("Done already", "COMPLETED", 2),
        ("Far away", "IN_PROGRESS", 30),
    ] {
        let response = app
            .client
            .post(app.url("/api/projects"))
            .bearer_auth(&token)
            .json(&serde_json::json!({
                "title": title,
                "status": status,
                "deadline": Utc::now() + Duration::days(days),
                "clientId": client_id,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    // Reminders: one due this week, one completed, one beyond the window.
    for (title, days, completed) in [
        ("Call back", 3, false),
        ("Already done", 3, true),
        ("Next month", 30, false),
    ] {
        let response = app
            .client
            .post(app.url("/api/reminders"))
            .bearer_auth(&token)
            .json(&serde_json::json!({
                "title": title,
                "dueDate": Utc::now() + Duration::days(days),
                "completed": completed,
                "clientId": client_id,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    // Six interactions; the dashboard caps at five.
    for i in 0..6 {
        let response = app
            .client
            .post(app.url("/api/interactions"))
            .bearer_auth(&token)
            .json(&serde_json::json!({
                "date": Utc::now() - Duration::hours(i),
                "type": "CALL",
                "clientId": client_id,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    let body: serde_json::Value = app
        .client
        .get(app.url("/api/dashboard"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let data = &body["dashboardData"];

    assert_eq!(data["totalClients"], 1);
    assert_eq!(data["totalProjects"], 3);
    assert_eq!(data["projectsByStatus"]["IN_PROGRESS"], 2);
    assert_eq!(data["projectsByStatus"]["COMPLETED"], 1);

    let reminders = data["upcomingReminders"].as_array().unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0]["title"], "Call back");
    assert_eq!(reminders[0]["client"]["name"], "Dashboard Co");

    let interactions = data["recentInteractions"].as_array().unwrap();
    assert_eq!(interactions.len(), 5);
    // Newest first.
    let dates: Vec<&str> = interactions
        .iter()
        .map(|i| i["date"].as_str().unwrap())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);

    let deadlines = data["upcomingDeadlines"].as_array().unwrap();
    assert_eq!(deadlines.len(), 1);
    assert_eq!(deadlines[0]["title"], "Due soon");
    assert_eq!(deadlines[0]["client"]["name"], "Dashboard Co");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn partial_update_keeps_absent_fields() {
    let app = TestApp::with_database().await;
    let (_, token) = app.register_user(&app.unique_email("update")).await;

    let client = app.create_client(&token, "Original Name").await;
    let client_id = client["id"].as_str().unwrap();
    let original_email = client["email"].as_str().unwrap().to_string();

    let body: serde_json::Value = app
        .client
        .put(app.url(&format!("/api/clients/{client_id}")))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "name": "Renamed" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["client"]["name"], "Renamed");
    assert_eq!(body["client"]["email"], original_email.as_str());
}
