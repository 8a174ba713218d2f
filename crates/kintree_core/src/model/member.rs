//! Member domain model.
//!
//! # Responsibility
//! - Define the canonical flat record stored for every family member.
//! - Provide creation drafts and write-path validation.
//!
//! # Invariants
//! - `id` is opaque, store-assigned and never reused for another member.
//! - `parent_id == None` marks a root member.
//! - Self-referential `parent_id`/`spouse_of` are rejected on write paths.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable opaque identifier assigned by the member store at creation time.
///
/// Kept as a type alias: stores mint the value (UUID text in the shipped
/// backends), the engine never inspects its shape.
pub type MemberId = String;

/// Life status recorded for a member. Absent means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
    Alive,
    Deceased,
}

/// Validation failures raised before a member write is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    /// Display name is blank after trim.
    BlankName,
    /// Member lists itself as its own parent.
    SelfParent(MemberId),
    /// Member lists itself as its own spouse.
    SelfSpouse(MemberId),
}

impl Display for MemberValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "member name must not be blank"),
            Self::SelfParent(id) => write!(f, "member cannot be its own parent: {id}"),
            Self::SelfSpouse(id) => write!(f, "member cannot be its own spouse: {id}"),
        }
    }
}

impl Error for MemberValidationError {}

/// Canonical flat record as held by the member store.
///
/// Relations are plain id references; the hierarchy is derived from them on
/// every snapshot. Field renames match the wire/export schema of the
/// original document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Stable opaque id assigned by the store.
    pub id: MemberId,
    /// Display name, required.
    pub name: String,
    /// Parent reference. `None` marks a root member.
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<MemberId>,
    /// Spouse reference; best-effort symmetric across two records.
    #[serde(rename = "spouseOf", default)]
    pub spouse_of: Option<MemberId>,
    /// Free-form date-of-birth text; parsed tolerantly for ordering only.
    #[serde(default)]
    pub dob: Option<String>,
    /// Free-form date-of-death text.
    #[serde(default)]
    pub dod: Option<String>,
    #[serde(default)]
    pub status: Option<MemberStatus>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub meta: Option<String>,
    /// Relationship label relative to the member this one was added from
    /// ("Child", "Spouse", "Brother/Sister").
    #[serde(default)]
    pub relationship: Option<String>,
    /// Photo URL produced by the external blob store.
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
}

impl MemberRecord {
    /// Creates a record with the given id and name and no other attributes.
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            spouse_of: None,
            dob: None,
            dod: None,
            status: None,
            city: None,
            contact: None,
            meta: None,
            relationship: None,
            photo_url: None,
        }
    }

    /// Checks write-path invariants.
    ///
    /// Snapshots read back from a store are *not* re-validated; the tree
    /// engine tolerates arbitrary record collections.
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::BlankName);
        }
        if self.parent_id.as_ref() == Some(&self.id) {
            return Err(MemberValidationError::SelfParent(self.id.clone()));
        }
        if self.spouse_of.as_ref() == Some(&self.id) {
            return Err(MemberValidationError::SelfSpouse(self.id.clone()));
        }
        Ok(())
    }

    /// Returns whether this member is recorded as deceased.
    pub fn is_deceased(&self) -> bool {
        self.status == Some(MemberStatus::Deceased)
    }
}

/// Creation draft: a [`MemberRecord`] without the store-assigned id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub parent_id: Option<MemberId>,
    pub spouse_of: Option<MemberId>,
    pub dob: Option<String>,
    pub dod: Option<String>,
    pub status: Option<MemberStatus>,
    pub city: Option<String>,
    pub contact: Option<String>,
    pub meta: Option<String>,
    pub relationship: Option<String>,
    pub photo_url: Option<String>,
}

impl NewMember {
    /// Creates a draft with only the name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Materializes the draft into a record with a store-minted id.
    pub fn into_record(self, id: MemberId) -> MemberRecord {
        MemberRecord {
            id,
            name: self.name,
            parent_id: self.parent_id,
            spouse_of: self.spouse_of,
            dob: self.dob,
            dod: self.dod,
            status: self.status,
            city: self.city,
            contact: self.contact,
            meta: self.meta,
            relationship: self.relationship,
            photo_url: self.photo_url,
        }
    }
}
