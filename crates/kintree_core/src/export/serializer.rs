//! Nested JSON export of the member hierarchy.
//!
//! # Responsibility
//! - Serialize the whole tree or one subtree into the exported document
//!   shape: `id, name, dob, dod, status, city, contact, relationship,
//!   meta, photoURL, children[]`.
//!
//! # Invariants
//! - Exactly one root exports as a bare object; zero or several roots
//!   export as an array. Consumers of the format rely on this asymmetry.
//! - Absent fields serialize as `null`; key order is fixed by the struct.
//! - Roots are the tree builder's roots, so dangling-parent members are
//!   exported instead of silently dropped.

use crate::model::member::{MemberId, MemberRecord, MemberStatus};
use crate::tree::builder::FamilyTree;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Honorific prepended to deceased members' names in exports.
pub const DECEASED_NAME_PREFIX: &str = "Late ";

/// One exported member with recursively exported children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: MemberId,
    pub name: String,
    pub dob: Option<String>,
    pub dod: Option<String>,
    pub status: Option<MemberStatus>,
    pub city: Option<String>,
    pub contact: Option<String>,
    pub relationship: Option<String>,
    pub meta: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub children: Vec<ExportNode>,
}

/// Exported document: a bare root object or an array of roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportDocument {
    Single(Box<ExportNode>),
    Forest(Vec<ExportNode>),
}

/// Serializes the whole tree.
pub fn serialize_tree(tree: &FamilyTree) -> ExportDocument {
    let mut visited = HashSet::new();
    let mut roots: Vec<ExportNode> = tree
        .roots()
        .iter()
        .filter_map(|id| export_node(tree, id, &mut visited))
        .collect();

    if roots.len() == 1 {
        ExportDocument::Single(Box::new(roots.remove(0)))
    } else {
        ExportDocument::Forest(roots)
    }
}

/// Serializes one subtree, or `None` when the id is not in the tree.
pub fn serialize_subtree(tree: &FamilyTree, root: &MemberId) -> Option<ExportNode> {
    export_node(tree, root, &mut HashSet::new())
}

/// Renders the export JSON, pretty-printed for diffability.
pub fn to_json_string(document: &ExportDocument) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}

/// Display name with the deceased honorific applied.
pub fn display_name(record: &MemberRecord) -> String {
    if record.is_deceased() {
        format!("{DECEASED_NAME_PREFIX}{}", record.name)
    } else {
        record.name.clone()
    }
}

fn export_node(
    tree: &FamilyTree,
    id: &MemberId,
    visited: &mut HashSet<MemberId>,
) -> Option<ExportNode> {
    if !visited.insert(id.clone()) {
        return None;
    }
    let node = tree.node(id)?;
    let record = &node.record;

    Some(ExportNode {
        id: record.id.clone(),
        name: display_name(record),
        dob: record.dob.clone(),
        dod: record.dod.clone(),
        status: record.status,
        city: record.city.clone(),
        contact: record.contact.clone(),
        relationship: record.relationship.clone(),
        meta: record.meta.clone(),
        photo_url: record.photo_url.clone(),
        children: node
            .children
            .iter()
            .filter_map(|child| export_node(tree, child, visited))
            .collect(),
    })
}
