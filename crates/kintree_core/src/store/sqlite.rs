//! SQLite member store backend.
//!
//! # Responsibility
//! - Implement the [`MemberStore`] contract over the `members` table for
//!   self-hosted deployments.
//!
//! # Invariants
//! - The connection must be bootstrapped via [`crate::db::open_db`] (or
//!   the in-memory variant) before a store is constructed.
//! - Listing order is deterministic: `id ASC`.

use crate::db::migrations::{latest_version, schema_version};
use crate::model::member::{MemberId, MemberRecord, MemberStatus, NewMember};
use crate::store::{MemberStore, Snapshot, SnapshotListener, StoreError, StoreResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const MEMBER_SELECT_SQL: &str = "SELECT
    id,
    name,
    parent_id,
    spouse_of,
    dob,
    dod,
    status,
    city,
    contact,
    meta,
    relationship,
    photo_url
FROM members
ORDER BY id ASC";

/// SQLite-backed member store.
pub struct SqliteMemberStore<'conn> {
    conn: &'conn Connection,
    listeners: Mutex<Vec<SnapshotListener>>,
}

impl std::fmt::Debug for SqliteMemberStore<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteMemberStore")
            .field("conn", &self.conn)
            .field("listeners_len", &self.listeners.lock().map(|l| l.len()).unwrap_or(0))
            .finish()
    }
}

impl<'conn> SqliteMemberStore<'conn> {
    /// Wraps a bootstrapped connection, verifying the schema version.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let actual_version = schema_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StoreError::UninitializedDatabase {
                expected_version,
                actual_version,
            });
        }
        Ok(Self {
            conn,
            listeners: Mutex::new(Vec::new()),
        })
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<SnapshotListener>> {
        self.listeners.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn read_snapshot(&self) -> StoreResult<Snapshot> {
        let mut stmt = self.conn.prepare(MEMBER_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut snapshot = Snapshot::new();
        while let Some(row) = rows.next()? {
            let record = parse_member_row(row)?;
            snapshot.insert(record.id.clone(), record);
        }
        Ok(snapshot)
    }

    fn notify(&self) -> StoreResult<()> {
        let listeners = self.listeners();
        if listeners.is_empty() {
            return Ok(());
        }
        let snapshot = self.read_snapshot()?;
        for listener in listeners.iter() {
            listener(&snapshot);
        }
        Ok(())
    }
}

impl MemberStore for SqliteMemberStore<'_> {
    fn create(&self, draft: NewMember) -> StoreResult<MemberRecord> {
        let record = draft.into_record(Uuid::new_v4().to_string());
        record.validate()?;

        self.conn.execute(
            "INSERT INTO members (
                id, name, parent_id, spouse_of, dob, dod, status,
                city, contact, meta, relationship, photo_url
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                record.id,
                record.name,
                record.parent_id,
                record.spouse_of,
                record.dob,
                record.dod,
                record.status.map(status_to_db),
                record.city,
                record.contact,
                record.meta,
                record.relationship,
                record.photo_url,
            ],
        )?;

        self.notify()?;
        Ok(record)
    }

    fn update(&self, record: &MemberRecord) -> StoreResult<()> {
        record.validate()?;

        let changed = self.conn.execute(
            "UPDATE members
             SET
                name = ?1,
                parent_id = ?2,
                spouse_of = ?3,
                dob = ?4,
                dod = ?5,
                status = ?6,
                city = ?7,
                contact = ?8,
                meta = ?9,
                relationship = ?10,
                photo_url = ?11
             WHERE id = ?12;",
            params![
                record.name,
                record.parent_id,
                record.spouse_of,
                record.dob,
                record.dod,
                record.status.map(status_to_db),
                record.city,
                record.contact,
                record.meta,
                record.relationship,
                record.photo_url,
                record.id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(record.id.clone()));
        }

        self.notify()
    }

    fn remove(&self, id: &MemberId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM members WHERE id = ?1;", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }

        self.notify()
    }

    fn snapshot(&self) -> StoreResult<Snapshot> {
        self.read_snapshot()
    }

    fn subscribe(&self, listener: SnapshotListener) -> StoreResult<()> {
        let snapshot = self.read_snapshot()?;
        listener(&snapshot);
        self.listeners().push(listener);
        Ok(())
    }
}

fn parse_member_row(row: &Row<'_>) -> StoreResult<MemberRecord> {
    let status_text: Option<String> = row.get("status")?;
    let status = match status_text {
        None => None,
        Some(text) => Some(
            parse_status(&text)
                .ok_or_else(|| StoreError::InvalidData(format!("invalid status `{text}`")))?,
        ),
    };

    Ok(MemberRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        parent_id: row.get("parent_id")?,
        spouse_of: row.get("spouse_of")?,
        dob: row.get("dob")?,
        dod: row.get("dod")?,
        status,
        city: row.get("city")?,
        contact: row.get("contact")?,
        meta: row.get("meta")?,
        relationship: row.get("relationship")?,
        photo_url: row.get("photo_url")?,
    })
}

fn parse_status(value: &str) -> Option<MemberStatus> {
    match value {
        "Alive" => Some(MemberStatus::Alive),
        "Deceased" => Some(MemberStatus::Deceased),
        _ => None,
    }
}

fn status_to_db(status: MemberStatus) -> &'static str {
    match status {
        MemberStatus::Alive => "Alive",
        MemberStatus::Deceased => "Deceased",
    }
}
