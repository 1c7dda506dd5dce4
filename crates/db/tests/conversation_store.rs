//! Integration tests for the conversation store:
//! - thread retrieval in both directions, across projects
//! - project-context inference from the latest message
//! - read-flag maintenance
//! - inbox construction over real rows

use sqlx::PgPool;
use codabrate_core::conversation::{build_inbox, ConversationMessage};
use codabrate_db::models::message::CreateMessage;
use codabrate_db::models::project::CreateProject;
use codabrate_db::models::user::CreateUser;
use codabrate_db::repositories::{MessageRepo, ProjectRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            full_name: format!("{username} test"),
            email: format!("{username}@ornek.edu.tr"),
            password_hash: "$argon2id$test".to_string(),
            university: None,
            department: None,
        },
    )
    .await
    .expect("user insert should succeed")
    .id
}

async fn seed_project(pool: &PgPool, owner_id: i64, title: &str) -> i64 {
    ProjectRepo::create(
        pool,
        owner_id,
        &CreateProject {
            title: title.to_string(),
            showcase_description: "özet".to_string(),
            safe_details: None,
            category_tags: None,
        },
    )
    .await
    .expect("project insert should succeed")
    .id
}

async fn send(pool: &PgPool, project: i64, from: i64, to: i64, body: &str) -> i64 {
    MessageRepo::create(
        pool,
        &CreateMessage {
            project_id: project,
            sender_id: from,
            receiver_id: to,
            content: body.to_string(),
        },
    )
    .await
    .expect("message insert should succeed")
    .id
}

// ---------------------------------------------------------------------------
// Threads
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn thread_includes_both_directions_oldest_first(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let member = seed_user(&pool, "member").await;
    let project = seed_project(&pool, owner, "Kampüs Pazarı").await;

    send(&pool, project, member, owner, "Merhaba!").await;
    send(&pool, project, owner, member, "Hoş geldin").await;
    send(&pool, project, member, owner, "Teşekkürler").await;

    let thread = MessageRepo::list_between(&pool, owner, member).await.unwrap();
    assert_eq!(thread.len(), 3);
    assert_eq!(thread[0].content, "Merhaba!");
    assert_eq!(thread[2].content, "Teşekkürler");

    // Symmetric: same thread regardless of argument order.
    let reversed = MessageRepo::list_between(&pool, member, owner).await.unwrap();
    assert_eq!(thread.len(), reversed.len());
    assert_eq!(thread[0].id, reversed[0].id);
}

#[sqlx::test]
async fn thread_spans_projects_and_excludes_third_parties(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let member = seed_user(&pool, "member").await;
    let other = seed_user(&pool, "other").await;
    let project_a = seed_project(&pool, owner, "Proje A").await;
    let project_b = seed_project(&pool, owner, "Proje B").await;

    send(&pool, project_a, member, owner, "A hakkında").await;
    send(&pool, project_b, member, owner, "B hakkında").await;
    send(&pool, project_a, other, owner, "Ben de varım").await;

    let thread = MessageRepo::list_between(&pool, owner, member).await.unwrap();
    assert_eq!(thread.len(), 2, "third-party messages stay out of the pair's thread");
}

#[sqlx::test]
async fn latest_project_is_the_composing_context(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let member = seed_user(&pool, "member").await;
    let project_a = seed_project(&pool, owner, "Proje A").await;
    let project_b = seed_project(&pool, owner, "Proje B").await;

    assert_eq!(
        MessageRepo::latest_project_between(&pool, owner, member)
            .await
            .unwrap(),
        None
    );

    send(&pool, project_a, member, owner, "ilk").await;
    send(&pool, project_b, owner, member, "son").await;

    assert_eq!(
        MessageRepo::latest_project_between(&pool, owner, member)
            .await
            .unwrap(),
        Some(project_b)
    );
}

// ---------------------------------------------------------------------------
// Read flags
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn mark_thread_read_only_touches_received_messages(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let member = seed_user(&pool, "member").await;
    let project = seed_project(&pool, owner, "Kampüs Pazarı").await;

    send(&pool, project, member, owner, "bir").await;
    send(&pool, project, member, owner, "iki").await;
    send(&pool, project, owner, member, "cevap").await;

    assert_eq!(MessageRepo::unread_count(&pool, owner).await.unwrap(), 2);
    assert_eq!(MessageRepo::unread_count(&pool, member).await.unwrap(), 1);

    let flipped = MessageRepo::mark_thread_read(&pool, owner, member).await.unwrap();
    assert_eq!(flipped, 2);

    assert_eq!(MessageRepo::unread_count(&pool, owner).await.unwrap(), 0);
    // The owner's own outgoing message stays unread for the member.
    assert_eq!(MessageRepo::unread_count(&pool, member).await.unwrap(), 1);

    // Idempotent: nothing left to flip.
    assert_eq!(
        MessageRepo::mark_thread_read(&pool, owner, member).await.unwrap(),
        0
    );
}

// ---------------------------------------------------------------------------
// Inbox
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn inbox_groups_by_counterparty_over_real_rows(pool: PgPool) {
    let owner = seed_user(&pool, "owner").await;
    let member = seed_user(&pool, "member").await;
    let other = seed_user(&pool, "other").await;
    let project_a = seed_project(&pool, owner, "Proje A").await;
    let project_b = seed_project(&pool, owner, "Proje B").await;

    send(&pool, project_a, member, owner, "eski").await;
    send(&pool, project_a, other, owner, "selam").await;
    send(&pool, project_b, owner, member, "en yeni").await;

    let rows = MessageRepo::list_all_for_user(&pool, owner).await.unwrap();
    let history: Vec<ConversationMessage> = rows.iter().map(Into::into).collect();
    let inbox = build_inbox(owner, &history);

    assert_eq!(inbox.len(), 2);
    // Most recent counterparty first; both projects collapse into one entry.
    assert_eq!(inbox[0].counterparty_id, member);
    assert_eq!(inbox[0].last_message, "en yeni");
    assert_eq!(inbox[1].counterparty_id, other);

    // Idempotent over unchanged data.
    let again = build_inbox(owner, &history);
    assert_eq!(inbox, again);
}
