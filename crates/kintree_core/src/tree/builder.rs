//! Snapshot-to-hierarchy tree builder.
//!
//! # Responsibility
//! - Convert the flat member collection into an arena-style hierarchy.
//! - Link children and spouses, sort siblings by date of birth.
//!
//! # Invariants
//! - Building is a pure function of the snapshot; every push rebuilds
//!   from scratch, nothing is patched incrementally.
//! - A member whose parent reference is absent, dangling or
//!   self-referential is a root. The same definition holds everywhere,
//!   including export.
//! - Sibling order: parsed `dob` ascending, undated members last, ties
//!   keeping snapshot order.

use crate::model::dates::{cmp_birth_dates, parse_birth_date};
use crate::model::member::{MemberId, MemberRecord};
use crate::store::Snapshot;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One member inside a built [`FamilyTree`].
///
/// Relations are ids into the owning tree's arena. Derived per snapshot,
/// never persisted, never mutated by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub record: MemberRecord,
    /// Child ids, sorted by parsed `dob` ascending, undated last.
    pub children: Vec<MemberId>,
    /// Spouse id, resolved from this record's own `spouse_of`.
    pub spouse: Option<MemberId>,
}

/// Arena of tree nodes plus the root list, rebuilt per snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyTree {
    nodes: BTreeMap<MemberId, TreeNode>,
    roots: Vec<MemberId>,
}

impl FamilyTree {
    /// Builds the hierarchy from a flat snapshot.
    ///
    /// Three passes: node creation, parent/spouse linking, sibling sort.
    /// Tolerates anything a remote collection can contain: dangling or
    /// self-referential ids, unparsable dates, empty input.
    pub fn build(records: &Snapshot) -> Self {
        let mut nodes: BTreeMap<MemberId, TreeNode> = records
            .iter()
            .map(|(id, record)| {
                (
                    id.clone(),
                    TreeNode {
                        record: record.clone(),
                        children: Vec::new(),
                        spouse: None,
                    },
                )
            })
            .collect();

        let mut roots = Vec::new();
        for (id, record) in records {
            match resolvable_parent(id, record, records) {
                Some(parent_id) => {
                    if let Some(parent) = nodes.get_mut(parent_id) {
                        parent.children.push(id.clone());
                    }
                }
                None => roots.push(id.clone()),
            }

            if let Some(spouse_id) = record.spouse_of.as_ref() {
                if spouse_id != id && records.contains_key(spouse_id) {
                    if let Some(node) = nodes.get_mut(id) {
                        node.spouse = Some(spouse_id.clone());
                    }
                }
            }
        }

        let birth_dates: BTreeMap<&MemberId, Option<NaiveDate>> = records
            .iter()
            .map(|(id, record)| (id, record.dob.as_deref().and_then(parse_birth_date)))
            .collect();
        for node in nodes.values_mut() {
            if node.children.len() > 1 {
                // Vec::sort_by is stable, so undated siblings keep their
                // snapshot order.
                node.children.sort_by(|a, b| {
                    cmp_birth_dates(
                        birth_dates.get(a).copied().flatten(),
                        birth_dates.get(b).copied().flatten(),
                    )
                });
            }
        }

        Self { nodes, roots }
    }

    /// Looks up one node by member id.
    pub fn node(&self, id: &MemberId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// Root member ids in snapshot order.
    pub fn roots(&self) -> &[MemberId] {
        &self.roots
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates all nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, &TreeNode)> {
        self.nodes.iter()
    }
}

/// Returns the parent id when it actually resolves inside the snapshot.
///
/// Absent, dangling and self-referential parents all make the member a
/// root.
fn resolvable_parent<'r>(
    id: &MemberId,
    record: &'r MemberRecord,
    records: &Snapshot,
) -> Option<&'r MemberId> {
    let parent_id = record.parent_id.as_ref()?;
    if parent_id == id || !records.contains_key(parent_id) {
        return None;
    }
    Some(parent_id)
}
