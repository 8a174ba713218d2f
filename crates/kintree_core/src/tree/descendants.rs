//! Descendant collection over the flat snapshot.
//!
//! # Responsibility
//! - Compute the full id set removed by a cascading delete.
//!
//! # Invariants
//! - Runs against the *current* flat snapshot, never a previously built
//!   tree, so members added moments ago are not missed.
//! - Pre-order: the member itself first, then descendants, children in
//!   snapshot order.
//! - Visited-set bounded, so indirect self-ancestry still terminates.

use crate::model::member::MemberId;
use crate::store::Snapshot;
use std::collections::HashSet;

/// Returns `member_id` followed by all transitive descendants.
///
/// The id is included even when absent from the snapshot, so a delete
/// issued against an already-gone member still produces its own remove
/// request. Output order among siblings follows snapshot iteration.
pub fn collect_descendants(member_id: &MemberId, records: &Snapshot) -> Vec<MemberId> {
    let mut visited = HashSet::new();
    let mut collected = Vec::new();
    collect(member_id, records, &mut visited, &mut collected);
    collected
}

fn collect(
    member_id: &MemberId,
    records: &Snapshot,
    visited: &mut HashSet<MemberId>,
    collected: &mut Vec<MemberId>,
) {
    if !visited.insert(member_id.clone()) {
        return;
    }
    collected.push(member_id.clone());

    for (child_id, _) in records
        .iter()
        .filter(|(_, record)| record.parent_id.as_ref() == Some(member_id))
    {
        collect(child_id, records, visited, collected);
    }
}
