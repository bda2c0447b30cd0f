//! Integration tests for `SqliteStore` against an in-memory database.

use personas_core::{
  Outcome, PersonasManager, SkipReason,
  clock::SystemClock,
  label::NewLabel,
  portrait::{DeleteFlag, NewPortrait, PortraitUpdate},
  request::PersonasRequest,
  store::{LabelCatalog, PortraitStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_portrait(personnel_id: &str, personas_ext: &str) -> NewPortrait {
  NewPortrait {
    personnel_id: personnel_id.into(),
    personas_ext: personas_ext.into(),
    create_time:  "2024-05-01 10:00:00".into(),
    is_deleted:   DeleteFlag::NotDeleted,
  }
}

fn new_label(label_id: i64, label_name: &str) -> NewLabel {
  NewLabel { label_id, label_name: label_name.into() }
}

// ─── Portraits ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_select_portrait() {
  let s = store().await;

  let inserted = s.insert(new_portrait("P1", "新用户,青铜会员")).await.unwrap();
  assert!(inserted.id > 0);
  assert_eq!(inserted.update_time, None);

  let found = s.select_by_person("P1".into()).await.unwrap();
  assert_eq!(found, vec![inserted]);
}

#[tokio::test]
async fn select_missing_person_is_empty() {
  let s = store().await;
  assert!(s.select_by_person("nobody".into()).await.unwrap().is_empty());
}

#[tokio::test]
async fn select_orders_duplicates_by_id() {
  let s = store().await;
  let first = s.insert(new_portrait("P1", "a")).await.unwrap();
  let second = s.insert(new_portrait("P1", "b")).await.unwrap();
  s.insert(new_portrait("P2", "c")).await.unwrap();

  let found = s.select_by_person("P1".into()).await.unwrap();
  let ids: Vec<i64> = found.iter().map(|p| p.id).collect();
  assert_eq!(ids, [first.id, second.id]);
}

#[tokio::test]
async fn update_replaces_ext_and_update_time_only() {
  let s = store().await;
  let p = s.insert(new_portrait("P1", "新用户")).await.unwrap();

  s.update(PortraitUpdate {
    id:           p.id,
    personas_ext: "新用户,VIP".into(),
    update_time:  "2024-05-02 08:00:00".into(),
  })
  .await
  .unwrap();

  let found = s.select_by_person("P1".into()).await.unwrap();
  assert_eq!(found[0].personas_ext, "新用户,VIP");
  assert_eq!(found[0].update_time.as_deref(), Some("2024-05-02 08:00:00"));
  assert_eq!(found[0].create_time, "2024-05-01 10:00:00");
  assert_eq!(found[0].personnel_id, "P1");
}

#[tokio::test]
async fn update_unknown_id_errors() {
  let s = store().await;
  let err = s
    .update(PortraitUpdate {
      id:           42,
      personas_ext: String::new(),
      update_time:  "2024-05-02 08:00:00".into(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::PortraitNotFound(42)));
}

#[tokio::test]
async fn deleted_portrait_is_hidden() {
  let s = store().await;
  let old = s.insert(new_portrait("P1", "old")).await.unwrap();
  let live = s.insert(new_portrait("P1", "live")).await.unwrap();

  assert!(s.delete_portrait(old.id).await.unwrap());
  assert!(!s.delete_portrait(old.id).await.unwrap());

  let found = s.select_by_person("P1".into()).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].id, live.id);
}

#[tokio::test]
async fn empty_ext_round_trips() {
  let s = store().await;
  s.insert(new_portrait("P1", "")).await.unwrap();

  let found = s.select_by_person("P1".into()).await.unwrap();
  assert_eq!(found[0].personas_ext, "");
  assert_eq!(found[0].labels(), [""]);
}

// ─── Label catalog ───────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_lookup_label() {
  let s = store().await;
  let vip = s.insert_label(new_label(10, "VIP")).await.unwrap();
  s.insert_label(new_label(11, "夜间活跃")).await.unwrap();

  let found = s.select_by_label_id(10).await.unwrap();
  assert_eq!(found, vec![vip]);
  assert!(s.select_by_label_id(12).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_labels_skips_deleted() {
  let s = store().await;
  s.insert_label(new_label(11, "夜间活跃")).await.unwrap();
  s.insert_label(new_label(10, "VIP")).await.unwrap();
  s.insert_label(new_label(10, "SVIP")).await.unwrap();

  let names: Vec<String> = s
    .list_labels()
    .await
    .unwrap()
    .into_iter()
    .map(|l| l.label_name)
    .collect();
  assert_eq!(names, ["VIP", "SVIP", "夜间活跃"]);

  assert_eq!(s.delete_label(10).await.unwrap(), 2);
  assert!(s.select_by_label_id(10).await.unwrap().is_empty());
  assert_eq!(s.list_labels().await.unwrap().len(), 1);
}

// ─── Manager over SQLite ─────────────────────────────────────────────────────

fn manager(s: &SqliteStore) -> PersonasManager<SqliteStore, SqliteStore, SystemClock> {
  PersonasManager::new(s.clone(), s.clone(), SystemClock)
}

#[tokio::test]
async fn manager_lifecycle_over_sqlite() {
  let s = store().await;
  s.insert_label(new_label(10, "VIP")).await.unwrap();
  let m = manager(&s);

  // Absent → Present.
  let created = m
    .add_by_label_id(&PersonasRequest::by_label_id("P1", 10))
    .await
    .unwrap();
  assert!(matches!(created, Outcome::Inserted(_)));

  let added = m
    .add_by_label_name(&PersonasRequest::by_label_name("P1", "周末活跃"))
    .await
    .unwrap();
  assert_eq!(added.personas_ext(), Some("新用户,青铜会员,VIP,周末活跃"));

  let removed = m
    .remove_by_label_id(&PersonasRequest::by_label_id("P1", 10))
    .await
    .unwrap();
  assert_eq!(removed.personas_ext(), Some("新用户,青铜会员,周末活跃"));

  let fuzzy = m
    .fuzzy_remove_by_name_key(&PersonasRequest::by_label_name("P1", "活跃"))
    .await
    .unwrap();
  assert_eq!(fuzzy.personas_ext(), Some("新用户,青铜会员"));

  let found = s.select_by_person("P1".into()).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].personas_ext, "新用户,青铜会员");
  assert!(found[0].update_time.is_some());
}

#[tokio::test]
async fn manager_ignores_deleted_catalog_entries() {
  let s = store().await;
  s.insert_label(new_label(10, "VIP")).await.unwrap();
  s.delete_label(10).await.unwrap();
  let m = manager(&s);

  let outcome = m
    .add_by_label_id(&PersonasRequest::by_label_id("P1", 10))
    .await
    .unwrap();

  assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingLabel));
  assert!(s.select_by_person("P1".into()).await.unwrap().is_empty());
}
