//! Bloodline expansion around a focal member.
//!
//! # Responsibility
//! - Compute the context view shown when one member is selected: the
//!   member with all descendants, the ancestor chain, and at every
//!   ancestor level that ancestor's other children with their
//!   descendants.
//!
//! # Invariants
//! - Output is duplicate-free and the traversal terminates even when the
//!   reference graph is malformed (visited-set bounded).
//! - Visit order is deterministic: focal subtree first, then per
//!   ancestor level the ancestor followed by its other children's
//!   subtrees.

use crate::model::member::MemberId;
use crate::tree::builder::{FamilyTree, TreeNode};
use std::collections::HashSet;

/// Collects the bloodline of `focal` as a sequence of tree nodes.
///
/// Returns an empty sequence when the focal id is not in the tree.
pub fn bloodline<'tree>(tree: &'tree FamilyTree, focal: &MemberId) -> Vec<&'tree TreeNode> {
    let Some(focal_node) = tree.node(focal) else {
        return Vec::new();
    };

    let mut visited: HashSet<&MemberId> = HashSet::new();
    let mut members: Vec<&TreeNode> = Vec::new();
    collect_subtree(tree, focal, &mut visited, &mut members);

    let mut current = focal_node;
    while let Some(parent_id) = current.record.parent_id.as_ref() {
        let Some(parent) = tree.node(parent_id) else {
            break;
        };
        // A repeat ancestor means the parent chain loops; stop walking up.
        if !visited.insert(&parent.record.id) {
            break;
        }
        members.push(parent);
        for child in &parent.children {
            collect_subtree(tree, child, &mut visited, &mut members);
        }
        current = parent;
    }

    members
}

fn collect_subtree<'tree>(
    tree: &'tree FamilyTree,
    id: &MemberId,
    visited: &mut HashSet<&'tree MemberId>,
    members: &mut Vec<&'tree TreeNode>,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    if !visited.insert(&node.record.id) {
        return;
    }
    members.push(node);
    for child in &node.children {
        collect_subtree(tree, child, visited, members);
    }
}
