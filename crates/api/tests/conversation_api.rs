//! HTTP-level integration tests for messaging: the approval precondition,
//! project-context inference, threads, read flags, and the inbox.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

/// Owner + approved applicant fixture. Returns
/// `(owner_id, owner_token, applicant_id, applicant_token, project_id)`.
async fn approved_pair(pool: &PgPool) -> (i64, String, i64, String, i64) {
    let (owner_id, owner_token) = common::signup(pool, "owner").await;
    let (applicant_id, applicant_token) = common::signup(pool, "applicant").await;

    let response = common::post_json(
        pool,
        "/api/v1/projects",
        Some(&owner_token),
        serde_json::json!({
            "title": "Kampüs Pazarı",
            "showcase_description": "Herkese açık özet",
            "safe_details": "Gizli detaylar",
        }),
    )
    .await;
    let project = common::body_json(response).await["id"].as_i64().unwrap();

    let response = common::post_json(
        pool,
        &format!("/api/v1/projects/{project}/applications"),
        Some(&applicant_token),
        serde_json::json!({ "message": "İlgileniyorum" }),
    )
    .await;
    let app_id = common::body_json(response).await["id"].as_i64().unwrap();

    common::post_json(
        pool,
        &format!("/api/v1/applications/{app_id}/decision"),
        Some(&owner_token),
        serde_json::json!({ "decision": "approved" }),
    )
    .await;

    (owner_id, owner_token, applicant_id, applicant_token, project)
}

async fn send(
    pool: &PgPool,
    token: &str,
    receiver: i64,
    body: serde_json::Value,
) -> axum::response::Response {
    common::post_json(pool, &format!("/api/v1/messages/{receiver}"), Some(token), body).await
}

// ---------------------------------------------------------------------------
// The approval precondition
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn messaging_is_forbidden_until_approval(pool: PgPool) {
    let (owner_id, owner_token) = common::signup(&pool, "owner").await;
    let (applicant_id, applicant_token) = common::signup(&pool, "applicant").await;

    let response = common::post_json(
        &pool,
        "/api/v1/projects",
        Some(&owner_token),
        serde_json::json!({
            "title": "Kampüs Pazarı",
            "showcase_description": "özet",
        }),
    )
    .await;
    let project = common::body_json(response).await["id"].as_i64().unwrap();

    let body = serde_json::json!({ "content": "Merhaba!", "project_id": project });

    // No application at all: forbidden.
    let response = send(&pool, &applicant_token, owner_id, body.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Pending application: still forbidden, in both directions.
    let response = common::post_json(
        &pool,
        &format!("/api/v1/projects/{project}/applications"),
        Some(&applicant_token),
        serde_json::json!({}),
    )
    .await;
    let app_id = common::body_json(response).await["id"].as_i64().unwrap();

    let response = send(&pool, &applicant_token, owner_id, body.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = send(&pool, &owner_token, applicant_id, body.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Approval flips the same request to success on retry.
    common::post_json(
        &pool,
        &format!("/api/v1/applications/{app_id}/decision"),
        Some(&owner_token),
        serde_json::json!({ "decision": "approved" }),
    )
    .await;

    let response = send(&pool, &applicant_token, owner_id, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = common::body_json(response).await;
    assert_eq!(json["content"], "Merhaba!");
    assert!(json["id"].is_number(), "persisted row comes back to the sender");
    assert!(json["created_at"].is_string(), "server assigns the timestamp");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rejected_applicant_cannot_message(pool: PgPool) {
    let (owner_id, owner_token) = common::signup(&pool, "owner").await;
    let (_, applicant_token) = common::signup(&pool, "applicant").await;

    let response = common::post_json(
        &pool,
        "/api/v1/projects",
        Some(&owner_token),
        serde_json::json!({ "title": "Kampüs Pazarı", "showcase_description": "özet" }),
    )
    .await;
    let project = common::body_json(response).await["id"].as_i64().unwrap();

    let response = common::post_json(
        &pool,
        &format!("/api/v1/projects/{project}/applications"),
        Some(&applicant_token),
        serde_json::json!({}),
    )
    .await;
    let app_id = common::body_json(response).await["id"].as_i64().unwrap();

    common::post_json(
        &pool,
        &format!("/api/v1/applications/{app_id}/decision"),
        Some(&owner_token),
        serde_json::json!({ "decision": "rejected" }),
    )
    .await;

    let response = send(
        &pool,
        &applicant_token,
        owner_id,
        serde_json::json!({ "content": "...", "project_id": project }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(common::body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn two_applicants_cannot_message_each_other(pool: PgPool) {
    let (_, _, applicant_id, applicant_token, project) = approved_pair(&pool).await;
    let (other_id, other_token) = common::signup(&pool, "other").await;

    // A third user, even with the project id in hand, cannot reach the
    // applicant: neither of them owns the project.
    let response = send(
        &pool,
        &other_token,
        applicant_id,
        serde_json::json!({ "content": "selam", "project_id": project }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &pool,
        &applicant_token,
        other_id,
        serde_json::json!({ "content": "selam", "project_id": project }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Body validation and project-context inference
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_message_is_rejected(pool: PgPool) {
    let (owner_id, _, _, applicant_token, project) = approved_pair(&pool).await;

    let response = send(
        &pool,
        &applicant_token,
        owner_id,
        serde_json::json!({ "content": "   ", "project_id": project }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::body_json(response).await["code"], "EMPTY_MESSAGE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn first_message_requires_a_project_hint(pool: PgPool) {
    let (owner_id, _, _, applicant_token, project) = approved_pair(&pool).await;

    // No prior thread, no hint: the engine cannot infer the context.
    let response = send(
        &pool,
        &applicant_token,
        owner_id,
        serde_json::json!({ "content": "Merhaba!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // With the hint, the send goes through...
    let response = send(
        &pool,
        &applicant_token,
        owner_id,
        serde_json::json!({ "content": "Merhaba!", "project_id": project }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // ...and follow-ups inherit the context from the thread.
    let response = send(
        &pool,
        &applicant_token,
        owner_id,
        serde_json::json!({ "content": "Bir şey daha" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        common::body_json(response).await["project_id"],
        serde_json::json!(project)
    );
}

// ---------------------------------------------------------------------------
// Threads and read flags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn thread_lists_both_directions_with_context(pool: PgPool) {
    let (owner_id, owner_token, applicant_id, applicant_token, project) =
        approved_pair(&pool).await;

    send(
        &pool,
        &applicant_token,
        owner_id,
        serde_json::json!({ "content": "Merhaba!", "project_id": project }),
    )
    .await;
    send(
        &pool,
        &owner_token,
        applicant_id,
        serde_json::json!({ "content": "Hoş geldin" }),
    )
    .await;

    let json = common::body_json(
        common::get(&pool, &format!("/api/v1/messages/{applicant_id}"), Some(&owner_token)).await,
    )
    .await;

    assert_eq!(json["counterparty"]["username"], "applicant");
    assert_eq!(json["messages"].as_array().unwrap().len(), 2);
    assert_eq!(json["messages"][0]["content"], "Merhaba!");
    assert_eq!(json["messages"][1]["content"], "Hoş geldin");
    assert_eq!(json["active_project_id"], serde_json::json!(project));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn marking_a_thread_read_clears_the_unread_count(pool: PgPool) {
    let (owner_id, owner_token, applicant_id, applicant_token, project) =
        approved_pair(&pool).await;

    send(
        &pool,
        &applicant_token,
        owner_id,
        serde_json::json!({ "content": "bir", "project_id": project }),
    )
    .await;
    send(
        &pool,
        &applicant_token,
        owner_id,
        serde_json::json!({ "content": "iki" }),
    )
    .await;

    let json = common::body_json(
        common::get(&pool, "/api/v1/messages/unread-count", Some(&owner_token)).await,
    )
    .await;
    assert_eq!(json["data"]["count"], 2);

    let json = common::body_json(
        common::post_json(
            &pool,
            &format!("/api/v1/messages/{applicant_id}/read"),
            Some(&owner_token),
            serde_json::json!({}),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["marked_read"], 2);

    let json = common::body_json(
        common::get(&pool, "/api/v1/messages/unread-count", Some(&owner_token)).await,
    )
    .await;
    assert_eq!(json["data"]["count"], 0);
}

// ---------------------------------------------------------------------------
// Inbox
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn inbox_collapses_counterparties_and_orders_by_recency(pool: PgPool) {
    let (owner_id, owner_token, _, applicant_token, project) = approved_pair(&pool).await;

    // A second approved applicant on another project of the same owner.
    let (other_id, other_token) = common::signup(&pool, "other").await;
    let response = common::post_json(
        &pool,
        "/api/v1/projects",
        Some(&owner_token),
        serde_json::json!({ "title": "İkinci Proje", "showcase_description": "özet" }),
    )
    .await;
    let project_b = common::body_json(response).await["id"].as_i64().unwrap();
    let response = common::post_json(
        &pool,
        &format!("/api/v1/projects/{project_b}/applications"),
        Some(&other_token),
        serde_json::json!({}),
    )
    .await;
    let app_id = common::body_json(response).await["id"].as_i64().unwrap();
    common::post_json(
        &pool,
        &format!("/api/v1/applications/{app_id}/decision"),
        Some(&owner_token),
        serde_json::json!({ "decision": "approved" }),
    )
    .await;

    send(
        &pool,
        &applicant_token,
        owner_id,
        serde_json::json!({ "content": "eski mesaj", "project_id": project }),
    )
    .await;
    send(
        &pool,
        &other_token,
        owner_id,
        serde_json::json!({ "content": "en yeni mesaj", "project_id": project_b }),
    )
    .await;

    let json = common::body_json(common::get(&pool, "/api/v1/messages", Some(&owner_token)).await)
        .await;
    let entries = json["data"].as_array().unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["counterparty"]["id"], serde_json::json!(other_id));
    assert_eq!(entries[0]["last_message"], "en yeni mesaj");
    assert_eq!(entries[1]["last_message"], "eski mesaj");

    // Unchanged data: a second call yields the identical inbox.
    let again = common::body_json(common::get(&pool, "/api/v1/messages", Some(&owner_token)).await)
        .await;
    assert_eq!(json, again);
}
