use chrono::{Duration, Utc};
use contentforge::constants::usage;
use contentforge::db::{NewContent, Store};

async fn spawn_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory store")
}

fn content_for(user_id: i32, generations: i32, regenerations: i32) -> NewContent {
    NewContent {
        user_id,
        client_id: None,
        title: "Entry".to_string(),
        keywords: vec!["alpha".to_string()],
        length: 200,
        content_type: "blog".to_string(),
        headings: 2,
        generated_content: "text".to_string(),
        generations,
        regenerations,
        usage_month: None,
    }
}

#[tokio::test]
async fn reset_token_is_single_use() {
    let store = spawn_store().await;
    let user = store
        .create_user("Resetter", "reset@x.com", "password1", "user", true)
        .await
        .unwrap();

    store
        .set_reset_token(user.id, "token-one", Utc::now() + Duration::hours(1))
        .await
        .unwrap();

    assert!(
        store
            .reset_password_by_token("token-one", "password2")
            .await
            .unwrap()
    );

    // Consumed tokens are cleared and cannot be replayed
    assert!(
        !store
            .reset_password_by_token("token-one", "password3")
            .await
            .unwrap()
    );

    let (_, hash) = store
        .get_user_by_email_with_password("reset@x.com")
        .await
        .unwrap()
        .unwrap();
    assert!(store.verify_password("password2", &hash).await.unwrap());
    assert!(!store.verify_password("password3", &hash).await.unwrap());
}

#[tokio::test]
async fn expired_reset_token_is_rejected() {
    let store = spawn_store().await;
    let user = store
        .create_user("Late", "late@x.com", "password1", "user", true)
        .await
        .unwrap();

    store
        .set_reset_token(user.id, "stale-token", Utc::now() - Duration::minutes(1))
        .await
        .unwrap();

    assert!(
        !store
            .reset_password_by_token("stale-token", "password2")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn unknown_reset_token_is_rejected() {
    let store = spawn_store().await;

    assert!(
        !store
            .reset_password_by_token("never-issued", "password2")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn regeneration_bumps_only_the_regeneration_counter() {
    let store = spawn_store().await;
    let saved = store.insert_content(&content_for(1, 1, 0)).await.unwrap();

    assert!(
        store
            .record_regeneration(saved.id, "second draft")
            .await
            .unwrap()
    );

    let updated = store.get_content(saved.id).await.unwrap().unwrap();
    assert_eq!(updated.generations, 1);
    assert_eq!(updated.regenerations, 1);
    assert_eq!(updated.generated_content, "second draft");

    assert!(!store.record_regeneration(9999, "nope").await.unwrap());
}

#[tokio::test]
async fn usage_increments_share_one_row_per_user_month() {
    let store = spawn_store().await;

    store
        .increment_usage(1, "2026-08", usage::GENERATION)
        .await
        .unwrap();
    store
        .increment_usage(1, "2026-08", usage::GENERATION)
        .await
        .unwrap();
    store
        .increment_usage(1, "2026-08", usage::REGENERATION)
        .await
        .unwrap();

    // A different month gets its own placeholder
    store
        .increment_usage(1, "2026-09", usage::GENERATION)
        .await
        .unwrap();

    let records = store.list_content().await.unwrap();
    assert_eq!(records.len(), 2);

    let august = records
        .iter()
        .find(|r| r.usage_month.as_deref() == Some("2026-08"))
        .unwrap();
    assert_eq!(august.generations, 2);
    assert_eq!(august.regenerations, 1);
    assert!(august.client_id.is_none());
    assert!(august.title.is_empty());
}

#[tokio::test]
async fn monthly_aggregation_sums_per_user() {
    let store = spawn_store().await;

    // Same user, same month: {3,2} generations and {1,0} regenerations
    store.insert_content(&content_for(7, 3, 1)).await.unwrap();
    store.insert_content(&content_for(7, 2, 0)).await.unwrap();
    // Another user in the same month stays separate
    store.insert_content(&content_for(8, 10, 4)).await.unwrap();

    let rows = store.usage_by_user_month().await.unwrap();
    assert_eq!(rows.len(), 2);

    let month = Utc::now().format("%Y-%m").to_string();
    let for_seven = rows.iter().find(|r| r.user_id == 7).unwrap();
    assert_eq!(for_seven.month, month);
    assert_eq!(for_seven.total_generations, 5);
    assert_eq!(for_seven.total_regenerations, 1);

    let for_eight = rows.iter().find(|r| r.user_id == 8).unwrap();
    assert_eq!(for_eight.total_generations, 10);
    assert_eq!(for_eight.total_regenerations, 4);
}

#[tokio::test]
async fn daily_aggregation_merges_records_from_the_same_day() {
    let store = spawn_store().await;

    store.insert_content(&content_for(1, 2, 1)).await.unwrap();
    store.insert_content(&content_for(1, 3, 0)).await.unwrap();

    let month = Utc::now().format("%Y-%m").to_string();
    let rows = store.usage_by_day(&month).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, Utc::now().format("%Y-%m-%d").to_string());
    assert_eq!(rows[0].generations, 5);
    assert_eq!(rows[0].regenerations, 1);
}

#[tokio::test]
async fn email_uniqueness_is_enforced() {
    let store = spawn_store().await;

    store
        .create_user("One", "same@x.com", "password1", "user", false)
        .await
        .unwrap();

    let duplicate = store
        .create_user("Two", "same@x.com", "password1", "user", false)
        .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn client_profile_update_stamps_updater() {
    let store = spawn_store().await;

    let profile = store
        .create_client_profile("Acme", "https://acme.example", "ctx", 1)
        .await
        .unwrap();
    assert_eq!(profile.created_by, 1);
    assert_eq!(profile.updated_by, 1);

    let updated = store
        .update_client_profile(profile.id, "Acme", "https://acme.example", "new ctx", 2)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.created_by, 1);
    assert_eq!(updated.updated_by, 2);
    assert_eq!(updated.prompt, "new ctx");

    assert!(
        store
            .update_client_profile(9999, "X", "Y", "Z", 2)
            .await
            .unwrap()
            .is_none()
    );
}
