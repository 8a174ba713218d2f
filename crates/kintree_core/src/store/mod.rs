//! Member store contracts and backends.
//!
//! # Responsibility
//! - Define the document-store boundary the tree engine depends on.
//! - Ship an in-memory backend (tests, demos) and a SQLite backend
//!   (self-hosted persistence) behind the same contract.
//!
//! # Invariants
//! - Change notification is full-snapshot push, never incremental diffs.
//! - Write paths validate records; read paths hand back snapshots as-is.

use crate::db::DbError;
use crate::model::member::{MemberId, MemberRecord, MemberValidationError, NewMember};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod photos;
pub mod sqlite;

/// The complete flat member collection at one point in time.
///
/// `BTreeMap` keeps iteration deterministic (id-lexicographic); every
/// "insertion order" tie-break downstream derives from it.
pub type Snapshot = BTreeMap<MemberId, MemberRecord>;

/// Result type used by store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Callback receiving the full current snapshot after every change.
pub type SnapshotListener = Box<dyn Fn(&Snapshot) + Send + Sync>;

/// Store-layer error for validation, lookup and backend failures.
#[derive(Debug)]
pub enum StoreError {
    Validation(MemberValidationError),
    NotFound(MemberId),
    Db(DbError),
    /// Connection schema is not at the version this build expects.
    UninitializedDatabase {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "member not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedDatabase {
                expected_version,
                actual_version,
            } => write!(
                f,
                "member store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted member data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemberValidationError> for StoreError {
    fn from(value: MemberValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Document-store boundary for the flat member collection.
///
/// Writes are independent, fire-and-forget operations; consistency across
/// related writes (e.g. the two halves of a spouse link) is eventual and
/// driven entirely by the next snapshot push. Implementations notify every
/// subscribed listener with the full current snapshot after each
/// successful mutation.
pub trait MemberStore {
    /// Creates a member from a draft; the store mints the id and returns
    /// the stored record.
    fn create(&self, draft: NewMember) -> StoreResult<MemberRecord>;

    /// Replaces the stored record for `record.id` wholesale.
    ///
    /// Returns [`StoreError::NotFound`] when no such member exists.
    fn update(&self, record: &MemberRecord) -> StoreResult<()>;

    /// Removes one member. Descendants are untouched; cascading delete is
    /// a service concern built on [`collect_descendants`].
    ///
    /// [`collect_descendants`]: crate::tree::descendants::collect_descendants
    fn remove(&self, id: &MemberId) -> StoreResult<()>;

    /// Returns the complete current collection.
    fn snapshot(&self) -> StoreResult<Snapshot>;

    /// Registers a listener, invoking it immediately with the current
    /// snapshot (initial load) and again after every successful mutation.
    ///
    /// Listeners must not call back into the store.
    fn subscribe(&self, listener: SnapshotListener) -> StoreResult<()>;
}
