//! [`SqliteStore`] — the SQLite implementation of [`PortraitStore`] and
//! [`LabelCatalog`].

use std::path::Path;

use personas_core::{
  label::{Label, NewLabel},
  portrait::{DeleteFlag, NewPortrait, Portrait, PortraitUpdate},
  store::{LabelCatalog, PortraitStore},
};
use tracing::debug;

use crate::{
  Error, Result,
  encode::{LABEL_COLUMNS, PORTRAIT_COLUMNS, RawLabel, RawPortrait, encode_flag},
  schema::SCHEMA,
};

const NOT_DELETED: i64 = 0;
const DELETED: i64 = 1;

// ─── Store ───────────────────────────────────────────────────────────────────

/// Portraits and the label catalog backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Catalog maintenance ───────────────────────────────────────────────────

  /// Add a catalog entry. Several live rows may share a `label_id`; lookups
  /// return them oldest first.
  pub async fn insert_label(&self, input: NewLabel) -> Result<Label> {
    let label_name = input.label_name.clone();
    let label_id   = input.label_id;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO personas_label (label_id, label_name, is_deleted)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![label_id, label_name, NOT_DELETED],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Label {
      id,
      label_id:   input.label_id,
      label_name: input.label_name,
      is_deleted: DeleteFlag::NotDeleted,
    })
  }

  /// All live catalog entries ordered by `label_id`, then insertion.
  pub async fn list_labels(&self) -> Result<Vec<Label>> {
    let raws: Vec<RawLabel> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LABEL_COLUMNS} FROM personas_label
           WHERE is_deleted = ?1
           ORDER BY label_id, id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![NOT_DELETED], RawLabel::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLabel::into_label).collect()
  }

  /// Soft-delete every live catalog entry with `label_id`. Returns the number
  /// of rows affected.
  pub async fn delete_label(&self, label_id: i64) -> Result<usize> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE personas_label SET is_deleted = ?1
           WHERE label_id = ?2 AND is_deleted = ?3",
          rusqlite::params![DELETED, label_id, NOT_DELETED],
        )?)
      })
      .await?;
    debug!(label_id, changed, "catalog label soft-deleted");
    Ok(changed)
  }

  // ── Portrait maintenance ──────────────────────────────────────────────────

  /// Soft-delete the portrait with `id`. Returns `false` if no live portrait
  /// had that id.
  pub async fn delete_portrait(&self, id: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE personas_portrait SET is_deleted = ?1
           WHERE id = ?2 AND is_deleted = ?3",
          rusqlite::params![DELETED, id, NOT_DELETED],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }
}

// ─── PortraitStore impl ──────────────────────────────────────────────────────

impl PortraitStore for SqliteStore {
  type Error = Error;

  async fn select_by_person(&self, personnel_id: String) -> Result<Vec<Portrait>> {
    let raws: Vec<RawPortrait> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PORTRAIT_COLUMNS} FROM personas_portrait
           WHERE personnel_id = ?1 AND is_deleted = ?2
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![personnel_id, NOT_DELETED],
            RawPortrait::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPortrait::into_portrait).collect()
  }

  async fn insert(&self, portrait: NewPortrait) -> Result<Portrait> {
    let personnel_id = portrait.personnel_id.clone();
    let personas_ext = portrait.personas_ext.clone();
    let create_time  = portrait.create_time.clone();
    let flag         = encode_flag(portrait.is_deleted);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO personas_portrait (personnel_id, personas_ext, create_time, is_deleted)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![personnel_id, personas_ext, create_time, flag],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Portrait {
      id,
      personnel_id: portrait.personnel_id,
      personas_ext: portrait.personas_ext,
      create_time:  portrait.create_time,
      update_time:  None,
      is_deleted:   portrait.is_deleted,
    })
  }

  async fn update(&self, update: PortraitUpdate) -> Result<()> {
    let PortraitUpdate { id, personas_ext, update_time } = update;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE personas_portrait SET personas_ext = ?1, update_time = ?2
           WHERE id = ?3",
          rusqlite::params![personas_ext, update_time, id],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::PortraitNotFound(id));
    }
    Ok(())
  }
}

// ─── LabelCatalog impl ───────────────────────────────────────────────────────

impl LabelCatalog for SqliteStore {
  type Error = Error;

  async fn select_by_label_id(&self, label_id: i64) -> Result<Vec<Label>> {
    let raws: Vec<RawLabel> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LABEL_COLUMNS} FROM personas_label
           WHERE label_id = ?1 AND is_deleted = ?2
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![label_id, NOT_DELETED], RawLabel::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLabel::into_label).collect()
  }
}
