//! Capsule use-case service.
//!
//! # Responsibility
//! - Provide create/list/remove entry points over a `CapsuleStore`.
//! - Own the unlock rule application and presentation sort ordering.
//! - Serialize every load-modify-save cycle behind one in-process lock.
//!
//! # Invariants
//! - Creation validates input before the store is touched.
//! - Assigned ids are unique for the lifetime of the store, including
//!   after deletion of the highest id.
//! - `remove` never rewrites the backing resource when nothing matched.
//! - `list_with_state` is a pure read: it never mutates stored data.

use crate::model::capsule::{Capsule, CapsuleDraft, CapsuleId, CapsuleValidationError};
use crate::store::{CapsuleStore, StoreError};
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for capsule use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller-supplied creation input is incomplete or malformed.
    Validation(CapsuleValidationError),
    /// Removal referenced an id absent from the collection.
    NotFound(String),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "capsule not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<CapsuleValidationError> for ServiceError {
    fn from(value: CapsuleValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Presentation read model: one capsule decorated with its lock state.
///
/// Sealed capsules carry no message; the body is only exposed once the
/// open date has been reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapsuleView {
    pub id: CapsuleId,
    pub title: String,
    /// Body text; `None` while the capsule is still locked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "openDate")]
    pub open_date: NaiveDate,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub locked: bool,
}

/// Use-case facade over a capsule store implementation.
pub struct CapsuleService<S: CapsuleStore> {
    store: S,
    // Serializes the whole load-modify-save cycle; without it two
    // interleaved writers would race and the last save would silently
    // drop the other's change.
    write_lock: Mutex<()>,
}

impl<S: CapsuleStore> CapsuleService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Validates the draft, assigns id and creation time, and persists.
    ///
    /// # Contract
    /// - Returns the stored capsule including the assigned fields.
    /// - On validation failure the store is not read or written.
    pub fn create(&self, draft: &CapsuleDraft) -> ServiceResult<Capsule> {
        let open_date = draft.validate()?;
        let _guard = self.write_lock.lock().expect("service lock poisoned");

        let mut capsules = self.store.load_all()?;
        let now = Utc::now();
        let capsule = Capsule {
            id: next_id(&capsules, now),
            title: draft.title.clone(),
            message: draft.message.clone(),
            open_date,
            created_at: now,
        };
        capsules.push(capsule.clone());
        self.store.save_all(&capsules)?;

        info!(
            "event=capsule_create module=service status=ok id={} open_date={}",
            capsule.id, capsule.open_date
        );
        Ok(capsule)
    }

    /// Returns the raw stored collection in storage order.
    pub fn list(&self) -> ServiceResult<Vec<Capsule>> {
        let _guard = self.write_lock.lock().expect("service lock poisoned");
        Ok(self.store.load_all()?)
    }

    /// Returns the lock-aware presentation view for the given day.
    ///
    /// # Contract
    /// - `locked == (on < open_date)` at day granularity.
    /// - Unlocked capsules precede locked ones; within one lock state,
    ///   ascending `open_date`; ties keep stable stored order.
    /// - Locked entries carry `message = None`.
    pub fn list_with_state(&self, on: NaiveDate) -> ServiceResult<Vec<CapsuleView>> {
        let capsules = self.list()?;

        let mut views: Vec<CapsuleView> = capsules
            .into_iter()
            .map(|capsule| {
                let locked = capsule.is_locked_on(on);
                CapsuleView {
                    id: capsule.id,
                    title: capsule.title,
                    message: if locked { None } else { Some(capsule.message) },
                    open_date: capsule.open_date,
                    created_at: capsule.created_at,
                    locked,
                }
            })
            .collect();

        // sort_by is stable, so equal keys keep stored relative order.
        views.sort_by(|a, b| (a.locked, a.open_date).cmp(&(b.locked, b.open_date)));
        Ok(views)
    }

    /// Removes the capsule whose id matches the given text.
    ///
    /// # Contract
    /// - Ids are compared by canonical string form, so the caller may pass
    ///   the identifier as received on the wire.
    /// - Returns `NotFound` without rewriting the backing resource when
    ///   nothing matched.
    pub fn remove(&self, id: &str) -> ServiceResult<()> {
        let _guard = self.write_lock.lock().expect("service lock poisoned");

        let mut capsules = self.store.load_all()?;
        let before = capsules.len();
        capsules.retain(|capsule| capsule.id.to_string() != id);

        if capsules.len() == before {
            return Err(ServiceError::NotFound(id.to_string()));
        }

        self.store.save_all(&capsules)?;
        info!("event=capsule_remove module=service status=ok id={id}");
        Ok(())
    }
}

/// Picks a fresh id for the next capsule.
///
/// `max(now_millis, max_existing + 1)` stays monotonic under rapid
/// successive creates and never re-issues an id after the highest one is
/// deleted, unlike a bare `max + 1` counter.
fn next_id(capsules: &[Capsule], now: DateTime<Utc>) -> CapsuleId {
    let from_clock = now.timestamp_millis().max(0) as CapsuleId;
    let from_collection = capsules
        .iter()
        .map(|capsule| capsule.id.saturating_add(1))
        .max()
        .unwrap_or(0);
    from_clock.max(from_collection)
}
