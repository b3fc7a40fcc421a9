//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use roster_core::{
  follower::{FollowerPageQuery, NewFollower, SubscribeStatus},
  store::FollowerStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn follower(tenant: Uuid, external_id: &str, nickname: &str) -> NewFollower {
  NewFollower {
    tenant_id:     tenant,
    external_id:   external_id.to_owned(),
    nickname:      Some(nickname.to_owned()),
    avatar_url:    Some(format!("https://cdn.example.com/{external_id}.png")),
    locale:        Some("en".to_owned()),
    remark:        None,
    status:        SubscribeStatus::Subscribed,
    subscribed_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
  }
}

// ─── Keyed reads ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_by_key() {
  let s = store().await;
  let tenant = Uuid::new_v4();

  let id = s.insert(follower(tenant, "f-1", "Alice")).await.unwrap();
  assert!(id > 0);

  let rec = s.get_by_key(tenant, "f-1").await.unwrap().unwrap();
  assert_eq!(rec.id, id);
  assert_eq!(rec.tenant_id, tenant);
  assert_eq!(rec.nickname.as_deref(), Some("Alice"));
  assert_eq!(rec.status, SubscribeStatus::Subscribed);
  assert!(rec.unsubscribed_at.is_none());
}

#[tokio::test]
async fn get_by_key_missing_returns_none() {
  let s = store().await;
  let rec = s.get_by_key(Uuid::new_v4(), "nobody").await.unwrap();
  assert!(rec.is_none());
}

#[tokio::test]
async fn get_by_key_is_tenant_scoped() {
  let s = store().await;
  let tenant_a = Uuid::new_v4();
  let tenant_b = Uuid::new_v4();

  s.insert(follower(tenant_a, "f-1", "Alice")).await.unwrap();

  assert!(s.get_by_key(tenant_a, "f-1").await.unwrap().is_some());
  assert!(s.get_by_key(tenant_b, "f-1").await.unwrap().is_none());
}

#[tokio::test]
async fn get_by_surrogate_id() {
  let s = store().await;
  let tenant = Uuid::new_v4();

  let id = s.insert(follower(tenant, "f-1", "Alice")).await.unwrap();

  let rec = s.get(id).await.unwrap().unwrap();
  assert_eq!(rec.external_id, "f-1");
  assert!(s.get(id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn list_skips_unknown_ids() {
  let s = store().await;
  let tenant = Uuid::new_v4();

  let a = s.insert(follower(tenant, "f-1", "Alice")).await.unwrap();
  let b = s.insert(follower(tenant, "f-2", "Bob")).await.unwrap();

  let recs = s.list(&[a, b, 9999]).await.unwrap();
  assert_eq!(recs.len(), 2);
}

#[tokio::test]
async fn get_by_keys_returns_only_known_subset() {
  let s = store().await;
  let tenant = Uuid::new_v4();

  s.insert(follower(tenant, "f-1", "Alice")).await.unwrap();
  s.insert(follower(tenant, "f-2", "Bob")).await.unwrap();

  let keys: Vec<String> =
    ["f-1", "f-3"].iter().map(|s| s.to_string()).collect();
  let recs = s.get_by_keys(tenant, &keys).await.unwrap();

  assert_eq!(recs.len(), 1);
  assert_eq!(recs[0].external_id, "f-1");
}

#[tokio::test]
async fn get_by_keys_empty_input_is_noop() {
  let s = store().await;
  let recs = s.get_by_keys(Uuid::new_v4(), &[]).await.unwrap();
  assert!(recs.is_empty());
}

// ─── Writes ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_key_insert_is_rejected() {
  let s = store().await;
  let tenant = Uuid::new_v4();

  s.insert(follower(tenant, "f-1", "Alice")).await.unwrap();
  let err = s.insert(follower(tenant, "f-1", "Alice again")).await;
  assert!(err.is_err());
}

#[tokio::test]
async fn insert_batch_inserts_all_rows() {
  let s = store().await;
  let tenant = Uuid::new_v4();

  s.insert_batch(vec![
    follower(tenant, "f-1", "Alice"),
    follower(tenant, "f-2", "Bob"),
    follower(tenant, "f-3", "Carol"),
  ])
  .await
  .unwrap();

  let page = s
    .page(tenant, &FollowerPageQuery::default())
    .await
    .unwrap();
  assert_eq!(page.total, 3);
}

#[tokio::test]
async fn update_overwrites_attributes_and_keeps_id() {
  let s = store().await;
  let tenant = Uuid::new_v4();

  let id = s.insert(follower(tenant, "f-1", "Alice")).await.unwrap();

  let mut rec = s.get(id).await.unwrap().unwrap();
  rec.nickname = Some("Alicia".to_owned());
  rec.avatar_url = None;
  s.update(&rec).await.unwrap();

  let rec = s.get_by_key(tenant, "f-1").await.unwrap().unwrap();
  assert_eq!(rec.id, id);
  assert_eq!(rec.nickname.as_deref(), Some("Alicia"));
  assert!(rec.avatar_url.is_none());
}

#[tokio::test]
async fn set_unsubscribed_touches_only_status_fields() {
  let s = store().await;
  let tenant = Uuid::new_v4();

  s.insert(follower(tenant, "f-1", "Alice")).await.unwrap();

  let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
  let changed = s.set_unsubscribed(tenant, "f-1", at).await.unwrap();
  assert!(changed);

  let rec = s.get_by_key(tenant, "f-1").await.unwrap().unwrap();
  assert_eq!(rec.status, SubscribeStatus::Unsubscribed);
  assert_eq!(rec.unsubscribed_at, Some(at));
  // Everything else is left alone.
  assert_eq!(rec.nickname.as_deref(), Some("Alice"));
  assert!(rec.subscribed_at.is_some());
}

#[tokio::test]
async fn set_unsubscribed_unknown_key_returns_false() {
  let s = store().await;
  let changed = s
    .set_unsubscribed(Uuid::new_v4(), "nobody", Utc::now())
    .await
    .unwrap();
  assert!(!changed);
}

// ─── Paged reads ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn page_filters_by_status() {
  let s = store().await;
  let tenant = Uuid::new_v4();

  s.insert(follower(tenant, "f-1", "Alice")).await.unwrap();
  s.insert(follower(tenant, "f-2", "Bob")).await.unwrap();
  s.set_unsubscribed(tenant, "f-2", Utc::now()).await.unwrap();

  let page = s
    .page(tenant, &FollowerPageQuery {
      status: Some(SubscribeStatus::Unsubscribed),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(page.total, 1);
  assert_eq!(page.items[0].external_id, "f-2");
}

#[tokio::test]
async fn page_filters_by_nickname_substring() {
  let s = store().await;
  let tenant = Uuid::new_v4();

  s.insert(follower(tenant, "f-1", "Alice Liddell")).await.unwrap();
  s.insert(follower(tenant, "f-2", "Bob")).await.unwrap();

  let page = s
    .page(tenant, &FollowerPageQuery {
      nickname: Some("lice".to_owned()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(page.total, 1);
  assert_eq!(page.items[0].external_id, "f-1");
}

#[tokio::test]
async fn page_respects_limit_and_offset() {
  let s = store().await;
  let tenant = Uuid::new_v4();

  for i in 0..5 {
    s.insert(follower(tenant, &format!("f-{i}"), "n")).await.unwrap();
  }

  let page = s
    .page(tenant, &FollowerPageQuery {
      limit: Some(2),
      offset: Some(2),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(page.total, 5);
  assert_eq!(page.items.len(), 2);
  assert_eq!(page.items[0].external_id, "f-2");
}

#[tokio::test]
async fn page_is_tenant_scoped() {
  let s = store().await;
  let tenant_a = Uuid::new_v4();
  let tenant_b = Uuid::new_v4();

  s.insert(follower(tenant_a, "f-1", "Alice")).await.unwrap();
  s.insert(follower(tenant_b, "f-1", "Other Alice")).await.unwrap();

  let page = s
    .page(tenant_a, &FollowerPageQuery::default())
    .await
    .unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.items[0].tenant_id, tenant_a);
}
