//! In-memory member store backend.
//!
//! # Responsibility
//! - Provide the full [`MemberStore`] contract without persistence, for
//!   tests, demos and as the reference backend behavior.
//!
//! # Invariants
//! - Mutation and notification happen under one lock; listeners always
//!   observe a complete, consistent snapshot.

use crate::model::member::{MemberId, MemberRecord, NewMember};
use crate::store::{MemberStore, Snapshot, SnapshotListener, StoreError, StoreResult};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Default)]
struct StoreState {
    records: Snapshot,
    listeners: Vec<SnapshotListener>,
}

/// Mutex-guarded in-memory backend. Ids are minted as UUID v4 text.
#[derive(Default)]
pub struct InMemoryMemberStore {
    state: Mutex<StoreState>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with the given records, as-is.
    ///
    /// Seeding bypasses validation on purpose: it stands in for an
    /// arbitrary snapshot arriving from a remote collection.
    pub fn with_records(records: impl IntoIterator<Item = MemberRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            state: Mutex::new(StoreState {
                records,
                listeners: Vec::new(),
            }),
        }
    }

    // A poisoned lock only means some listener panicked mid-notify; the
    // member data itself is still consistent, so keep serving it.
    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

fn notify(state: &StoreState) {
    for listener in &state.listeners {
        listener(&state.records);
    }
}

impl MemberStore for InMemoryMemberStore {
    fn create(&self, draft: NewMember) -> StoreResult<MemberRecord> {
        let record = draft.into_record(Uuid::new_v4().to_string());
        record.validate()?;

        let mut state = self.state();
        state.records.insert(record.id.clone(), record.clone());
        notify(&state);
        Ok(record)
    }

    fn update(&self, record: &MemberRecord) -> StoreResult<()> {
        record.validate()?;

        let mut state = self.state();
        if !state.records.contains_key(&record.id) {
            return Err(StoreError::NotFound(record.id.clone()));
        }
        state.records.insert(record.id.clone(), record.clone());
        notify(&state);
        Ok(())
    }

    fn remove(&self, id: &MemberId) -> StoreResult<()> {
        let mut state = self.state();
        if state.records.remove(id).is_none() {
            return Err(StoreError::NotFound(id.clone()));
        }
        notify(&state);
        Ok(())
    }

    fn snapshot(&self) -> StoreResult<Snapshot> {
        Ok(self.state().records.clone())
    }

    fn subscribe(&self, listener: SnapshotListener) -> StoreResult<()> {
        let mut state = self.state();
        listener(&state.records);
        state.listeners.push(listener);
        Ok(())
    }
}
