//! [`PersonasManager`] — reconciles a person's label set with add and remove
//! requests.
//!
//! Every operation either runs its persist step exactly once or writes
//! nothing. Validation misses are reported as [`Outcome::Skipped`] after an
//! advisory log line; collaborator failures propagate as [`Error`].
//!
//! The manager holds no mutable state. Build one and share it.

use std::fmt;

use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  clock::Clock,
  codec,
  portrait::{DeleteFlag, NewPortrait, Portrait, PortraitUpdate},
  request::PersonasRequest,
  store::{LabelCatalog, PortraitStore},
};

/// Labels seeded into every newly created portrait, in this order.
pub const BOOTSTRAP_LABELS: [&str; 2] = ["新用户", "青铜会员"];

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// Why an operation returned without writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// A field the operation requires was absent from the request.
  MissingInput,
  /// The person has no non-deleted portrait to edit.
  MissingPortrait,
  /// The catalog has no non-deleted entry for the requested `label_id`.
  MissingLabel,
  /// Name-based add of a label the portrait already carries.
  AlreadyTagged,
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::MissingInput => "request is missing a required field",
      Self::MissingPortrait => "person has no portrait",
      Self::MissingLabel => "label id is not in the catalog",
      Self::AlreadyTagged => "label already present",
    })
  }
}

/// What an operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// A new portrait was created.
  Inserted(Portrait),
  /// An existing portrait was rewritten.
  Updated(PortraitUpdate),
  /// Nothing was written.
  Skipped(SkipReason),
}

impl Outcome {
  /// The stored `personas_ext` after the operation, if it wrote one.
  pub fn personas_ext(&self) -> Option<&str> {
    match self {
      Self::Inserted(p) => Some(&p.personas_ext),
      Self::Updated(u) => Some(&u.personas_ext),
      Self::Skipped(_) => None,
    }
  }
}

// ─── Manager ─────────────────────────────────────────────────────────────────

/// The personas tag manager.
#[derive(Debug, Clone)]
pub struct PersonasManager<P, L, C> {
  portraits: P,
  labels:    L,
  clock:     C,
}

impl<P, L, C> PersonasManager<P, L, C>
where
  P: PortraitStore,
  L: LabelCatalog,
  C: Clock,
{
  pub fn new(portraits: P, labels: L, clock: C) -> Self {
    Self { portraits, labels, clock }
  }

  /// Add the catalog label `label_id` to the person's portrait, creating the
  /// portrait with the bootstrap labels if there is none.
  ///
  /// Requires `personnel_id` and `label_id`. An unknown `label_id` leaves
  /// the store untouched, even when no portrait exists yet.
  pub async fn add_by_label_id(&self, request: &PersonasRequest) -> Result<Outcome> {
    let (Some(personnel_id), Some(label_id)) =
      (request.personnel_id.as_deref(), request.label_id)
    else {
      return Ok(Outcome::Skipped(SkipReason::MissingInput));
    };

    let existing   = self.resolve_portrait(personnel_id, request).await?;
    let mut labels = working_labels(existing.as_ref());

    let Some(label_name) = self.resolve_label(label_id, request).await? else {
      return Ok(Outcome::Skipped(SkipReason::MissingLabel));
    };

    if !labels.contains(&label_name) {
      labels.push(label_name);
    }

    self.persist(personnel_id, existing, &labels).await
  }

  /// Add a free-form label to the person's portrait, creating the portrait
  /// with the bootstrap labels if there is none. The catalog is not
  /// consulted.
  ///
  /// Requires `personnel_id` and `label_name`. Adding a label the portrait
  /// already carries writes nothing.
  pub async fn add_by_label_name(&self, request: &PersonasRequest) -> Result<Outcome> {
    let (Some(personnel_id), Some(label_name)) =
      (request.personnel_id.as_deref(), request.label_name.as_deref())
    else {
      return Ok(Outcome::Skipped(SkipReason::MissingInput));
    };

    let existing   = self.first_portrait(personnel_id).await?;
    let mut labels = working_labels(existing.as_ref());

    if labels.iter().any(|l| l == label_name) {
      info!("用户 {personnel_id} 已包含标签 {label_name}");
      return Ok(Outcome::Skipped(SkipReason::AlreadyTagged));
    }
    labels.push(label_name.to_owned());

    self.persist(personnel_id, existing, &labels).await
  }

  /// Remove the first occurrence of the catalog label `label_id` from the
  /// person's portrait.
  ///
  /// Requires `personnel_id` and `label_id`. The portrait is rewritten with
  /// a fresh `update_time` even when it did not carry the label.
  pub async fn remove_by_label_id(&self, request: &PersonasRequest) -> Result<Outcome> {
    let (Some(personnel_id), Some(label_id)) =
      (request.personnel_id.as_deref(), request.label_id)
    else {
      return Ok(Outcome::Skipped(SkipReason::MissingInput));
    };

    let Some(portrait) = self.resolve_portrait(personnel_id, request).await? else {
      return Ok(Outcome::Skipped(SkipReason::MissingPortrait));
    };
    let Some(label_name) = self.resolve_label(label_id, request).await? else {
      return Ok(Outcome::Skipped(SkipReason::MissingLabel));
    };

    let mut labels = portrait.labels();
    if let Some(pos) = labels.iter().position(|l| *l == label_name) {
      labels.remove(pos);
    }

    self.persist(personnel_id, Some(portrait), &labels).await
  }

  /// Remove every label containing `label_name` as a substring from the
  /// person's portrait. Matching is case-sensitive.
  ///
  /// Requires `personnel_id` and `label_name`. The portrait is always
  /// rewritten.
  pub async fn fuzzy_remove_by_name_key(
    &self,
    request: &PersonasRequest,
  ) -> Result<Outcome> {
    let (Some(personnel_id), Some(key)) =
      (request.personnel_id.as_deref(), request.label_name.as_deref())
    else {
      return Ok(Outcome::Skipped(SkipReason::MissingInput));
    };

    let Some(portrait) = self.resolve_portrait(personnel_id, request).await? else {
      return Ok(Outcome::Skipped(SkipReason::MissingPortrait));
    };

    let mut labels = portrait.labels();
    labels.retain(|l| !l.contains(key));

    self.persist(personnel_id, Some(portrait), &labels).await
  }

  // ── Shared steps ──────────────────────────────────────────────────────────

  async fn first_portrait(&self, personnel_id: &str) -> Result<Option<Portrait>> {
    let portraits = self
      .portraits
      .select_by_person(personnel_id.to_owned())
      .await
      .map_err(Error::portrait_store)?;
    Ok(portraits.into_iter().next())
  }

  /// [`Self::first_portrait`], logging when the person has none.
  async fn resolve_portrait(
    &self,
    personnel_id: &str,
    request: &PersonasRequest,
  ) -> Result<Option<Portrait>> {
    let portrait = self.first_portrait(personnel_id).await?;
    if portrait.is_none() {
      warn!(
        "当前用户画像不存在 : {}",
        request.label_name.as_deref().unwrap_or("null")
      );
    }
    Ok(portrait)
  }

  /// Canonical name of catalog label `label_id`, or `None` after logging.
  async fn resolve_label(
    &self,
    label_id: i64,
    request: &PersonasRequest,
  ) -> Result<Option<String>> {
    let labels = self
      .labels
      .select_by_label_id(label_id)
      .await
      .map_err(Error::label_catalog)?;

    match labels.into_iter().next() {
      Some(label) => Ok(Some(label.label_name)),
      None => {
        warn!("Personas [POST] Label FAILURE : {request}");
        Ok(None)
      }
    }
  }

  async fn persist(
    &self,
    personnel_id: &str,
    existing: Option<Portrait>,
    labels: &[String],
  ) -> Result<Outcome> {
    let personas_ext = codec::encode(labels);

    match existing {
      Some(portrait) => {
        let update = PortraitUpdate {
          id: portrait.id,
          personas_ext,
          update_time: self.clock.now(),
        };
        self
          .portraits
          .update(update.clone())
          .await
          .map_err(Error::portrait_store)?;
        debug!(personnel_id, id = update.id, "portrait updated");
        Ok(Outcome::Updated(update))
      }
      None => {
        let portrait = self
          .portraits
          .insert(NewPortrait {
            personnel_id: personnel_id.to_owned(),
            personas_ext,
            create_time: self.clock.now(),
            is_deleted: DeleteFlag::NotDeleted,
          })
          .await
          .map_err(Error::portrait_store)?;
        debug!(personnel_id, id = portrait.id, "portrait created");
        Ok(Outcome::Inserted(portrait))
      }
    }
  }
}

/// Labels to edit: the stored list, or the bootstrap pair for a new portrait.
fn working_labels(existing: Option<&Portrait>) -> Vec<String> {
  match existing {
    Some(portrait) => portrait.labels(),
    None => BOOTSTRAP_LABELS.iter().map(|l| (*l).to_owned()).collect(),
  }
}
