//! Name search over a built tree.
//!
//! # Responsibility
//! - Prune the tree to members matching a query plus their ancestor path.
//! - Locate the first directly-matching member for highlighting.
//!
//! # Invariants
//! - Matching is case-insensitive substring match against `name`.
//! - A node survives the prune iff it matches or some descendant does.
//! - Only the first root lineage containing a match is returned; other
//!   lineages are skipped even when they also match.

use crate::model::member::{MemberId, MemberRecord};
use crate::tree::builder::FamilyTree;
use std::collections::HashSet;

/// Shallow copy of a tree node restricted to surviving descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedNode {
    pub record: MemberRecord,
    pub children: Vec<PrunedNode>,
}

/// Resolves a search query to the pruned subtree of the first matching
/// root lineage.
///
/// Returns `None` when nothing matches anywhere, and for blank queries
/// (callers only consult the resolver while a search term is present).
pub fn resolve_for_query(tree: &FamilyTree, query: &str) -> Option<PrunedNode> {
    let needle = normalize_query(query)?;
    let mut visited = HashSet::new();
    tree.roots()
        .iter()
        .find_map(|root| prune(tree, root, &needle, &mut visited))
}

/// Returns the id of the first node in pre-order whose *own* name matches.
///
/// Ancestors kept only as path context are skipped. Used for highlighting,
/// never for filtering.
pub fn first_match_id(subtree: &PrunedNode, query: &str) -> Option<MemberId> {
    let needle = normalize_query(query)?;
    first_match(subtree, &needle)
}

fn prune(
    tree: &FamilyTree,
    id: &MemberId,
    needle: &str,
    visited: &mut HashSet<MemberId>,
) -> Option<PrunedNode> {
    if !visited.insert(id.clone()) {
        return None;
    }
    let node = tree.node(id)?;

    let children: Vec<PrunedNode> = node
        .children
        .iter()
        .filter_map(|child| prune(tree, child, needle, visited))
        .collect();

    if children.is_empty() && !name_matches(&node.record.name, needle) {
        return None;
    }
    Some(PrunedNode {
        record: node.record.clone(),
        children,
    })
}

fn first_match(node: &PrunedNode, needle: &str) -> Option<MemberId> {
    if name_matches(&node.record.name, needle) {
        return Some(node.record.id.clone());
    }
    node.children
        .iter()
        .find_map(|child| first_match(child, needle))
}

fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}
