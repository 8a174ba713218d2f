//! Member administration use-case service.
//!
//! # Responsibility
//! - Provide the add-root/add-child/add-spouse/add-sibling flows with
//!   their relationship labels.
//! - Drive photo attachment through the blob-store boundary.
//! - Run cascading delete as independent per-member removes.
//!
//! # Invariants
//! - All flows work against the current snapshot, never cached state.
//! - Cascading delete never aborts on an individual failure; torn state
//!   self-heals on the next snapshot push.

use crate::export::serializer::{serialize_tree, ExportDocument};
use crate::model::member::{MemberId, MemberRecord, NewMember};
use crate::store::photos::{PhotoError, PhotoStore, PhotoUpload};
use crate::store::{MemberStore, Snapshot, StoreError};
use crate::tree::builder::FamilyTree;
use crate::tree::descendants::collect_descendants;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Relationship label for members added under a parent.
pub const RELATIONSHIP_CHILD: &str = "Child";
/// Relationship label for members added as a spouse.
pub const RELATIONSHIP_SPOUSE: &str = "Spouse";
/// Relationship label for members added as a sibling.
pub const RELATIONSHIP_SIBLING: &str = "Brother/Sister";

/// Errors from member administration flows.
#[derive(Debug)]
pub enum MemberServiceError {
    /// The member a flow is anchored on does not exist.
    MemberNotFound(MemberId),
    Photo(PhotoError),
    Store(StoreError),
}

impl Display for MemberServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::Photo(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MemberServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MemberNotFound(_) => None,
            Self::Photo(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for MemberServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<PhotoError> for MemberServiceError {
    fn from(value: PhotoError) -> Self {
        Self::Photo(value)
    }
}

/// Result of a cascading delete.
///
/// `requested` lists every id a remove was issued for, in pre-order;
/// `failed` the subset whose remove was rejected by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub requested: Vec<MemberId>,
    pub failed: Vec<MemberId>,
}

impl CascadeOutcome {
    pub fn fully_applied(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Admin use-case facade over a member store.
pub struct MemberService<S: MemberStore> {
    store: S,
}

impl<S: MemberStore> MemberService<S> {
    /// Creates the service from a store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the current flat snapshot.
    pub fn snapshot(&self) -> Result<Snapshot, MemberServiceError> {
        Ok(self.store.snapshot()?)
    }

    /// Adds a member with no parent, starting a new lineage.
    pub fn add_root(&self, mut draft: NewMember) -> Result<MemberRecord, MemberServiceError> {
        draft.parent_id = None;
        Ok(self.store.create(draft)?)
    }

    /// Adds a child under an existing member.
    pub fn add_child(
        &self,
        parent_id: &MemberId,
        mut draft: NewMember,
    ) -> Result<MemberRecord, MemberServiceError> {
        self.require_member(parent_id)?;
        draft.parent_id = Some(parent_id.clone());
        draft.relationship = Some(RELATIONSHIP_CHILD.to_string());
        Ok(self.store.create(draft)?)
    }

    /// Adds a spouse linked to an existing member.
    ///
    /// The link is two independent writes: the new record pointing at the
    /// partner, then the partner record pointing back. Between the two, a
    /// snapshot can observe a one-sided link; it heals on the second
    /// write's push.
    pub fn add_spouse(
        &self,
        partner_id: &MemberId,
        mut draft: NewMember,
    ) -> Result<MemberRecord, MemberServiceError> {
        let mut partner = self.require_member(partner_id)?;
        draft.spouse_of = Some(partner_id.clone());
        draft.relationship = Some(RELATIONSHIP_SPOUSE.to_string());
        let created = self.store.create(draft)?;

        partner.spouse_of = Some(created.id.clone());
        self.store.update(&partner)?;
        Ok(created)
    }

    /// Adds a sibling sharing an existing member's parent.
    ///
    /// A sibling of a root member is itself a root.
    pub fn add_sibling(
        &self,
        member_id: &MemberId,
        mut draft: NewMember,
    ) -> Result<MemberRecord, MemberServiceError> {
        let target = self.require_member(member_id)?;
        draft.parent_id = target.parent_id.clone();
        draft.relationship = Some(RELATIONSHIP_SIBLING.to_string());
        Ok(self.store.create(draft)?)
    }

    /// Replaces a member's stored record.
    pub fn update_member(&self, record: &MemberRecord) -> Result<(), MemberServiceError> {
        Ok(self.store.update(record)?)
    }

    /// Uploads a photo through the blob boundary and persists its URL.
    pub fn set_photo<P: PhotoStore>(
        &self,
        member_id: &MemberId,
        photos: &P,
        upload: &PhotoUpload,
    ) -> Result<MemberRecord, MemberServiceError> {
        let mut record = self.require_member(member_id)?;
        let url = photos.upload(member_id, upload)?;
        record.photo_url = Some(url);
        self.store.update(&record)?;
        Ok(record)
    }

    /// Removes a member and all descendants.
    ///
    /// The descendant set is collected against the current snapshot, then
    /// one remove is issued per id. Failures are logged and reported in
    /// the outcome; remaining removes still run.
    pub fn remove_with_descendants(
        &self,
        member_id: &MemberId,
    ) -> Result<CascadeOutcome, MemberServiceError> {
        let snapshot = self.snapshot()?;
        let requested = collect_descendants(member_id, &snapshot);

        let mut failed = Vec::new();
        for id in &requested {
            if let Err(err) = self.store.remove(id) {
                warn!(
                    "event=cascade_remove module=service status=error member_id={id} error={err}"
                );
                failed.push(id.clone());
            }
        }

        Ok(CascadeOutcome { requested, failed })
    }

    /// Builds the hierarchy from the current snapshot.
    pub fn build_tree(&self) -> Result<FamilyTree, MemberServiceError> {
        Ok(FamilyTree::build(&self.snapshot()?))
    }

    /// Exports the current hierarchy as a nested document.
    pub fn export_tree(&self) -> Result<ExportDocument, MemberServiceError> {
        Ok(serialize_tree(&self.build_tree()?))
    }

    fn require_member(&self, id: &MemberId) -> Result<MemberRecord, MemberServiceError> {
        self.snapshot()?
            .remove(id)
            .ok_or_else(|| MemberServiceError::MemberNotFound(id.clone()))
    }
}
