//! Domain model for family members.
//!
//! # Responsibility
//! - Define the canonical flat member record and its creation draft.
//! - Keep date-text interpretation in one place.
//!
//! # Invariants
//! - Every member is identified by a stable opaque `MemberId`.
//! - Relations (`parent_id`, `spouse_of`) are id references, never owned
//!   links; the hierarchy is derived per snapshot.

pub mod dates;
pub mod member;
