//! Core engine for the KinTree family-tree viewer.
//!
//! The member store pushes full flat snapshots; this crate rebuilds the
//! hierarchy from each one and derives search prunes, bloodline context,
//! descendant sets and the export document from it. This crate is the
//! single source of truth for those invariants.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod tree;

pub use export::serializer::{
    display_name, serialize_subtree, serialize_tree, to_json_string, ExportDocument, ExportNode,
    DECEASED_NAME_PREFIX,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::dates::{cmp_birth_dates, parse_birth_date};
pub use model::member::{MemberId, MemberRecord, MemberStatus, MemberValidationError, NewMember};
pub use service::member_service::{
    CascadeOutcome, MemberService, MemberServiceError, RELATIONSHIP_CHILD, RELATIONSHIP_SIBLING,
    RELATIONSHIP_SPOUSE,
};
pub use store::memory::InMemoryMemberStore;
pub use store::photos::{InMemoryPhotoStore, PhotoError, PhotoStore, PhotoUpload};
pub use store::sqlite::SqliteMemberStore;
pub use store::{MemberStore, Snapshot, SnapshotListener, StoreError, StoreResult};
pub use tree::bloodline::bloodline;
pub use tree::builder::{FamilyTree, TreeNode};
pub use tree::descendants::collect_descendants;
pub use tree::search::{first_match_id, resolve_for_query, PrunedNode};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
