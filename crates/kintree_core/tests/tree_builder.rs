use kintree_core::{FamilyTree, MemberRecord, Snapshot, TreeNode};

fn member(id: &str, name: &str) -> MemberRecord {
    MemberRecord::new(id, name)
}

fn child_of(id: &str, name: &str, parent: &str, dob: Option<&str>) -> MemberRecord {
    let mut record = MemberRecord::new(id, name);
    record.parent_id = Some(parent.to_string());
    record.dob = dob.map(str::to_string);
    record
}

fn snapshot(records: impl IntoIterator<Item = MemberRecord>) -> Snapshot {
    records
        .into_iter()
        .map(|record| (record.id.clone(), record))
        .collect()
}

fn node<'t>(tree: &'t FamilyTree, id: &str) -> &'t TreeNode {
    tree.node(&id.to_string()).expect("node should exist")
}

#[test]
fn empty_snapshot_builds_empty_tree() {
    let tree = FamilyTree::build(&Snapshot::new());
    assert!(tree.is_empty());
    assert!(tree.roots().is_empty());
}

#[test]
fn build_is_deterministic_for_same_snapshot() {
    let flat = snapshot([
        member("A", "Root"),
        child_of("B", "Child", "A", Some("2000-01-01")),
        child_of("C", "Child2", "A", Some("1990-01-01")),
    ]);

    assert_eq!(FamilyTree::build(&flat), FamilyTree::build(&flat));
}

#[test]
fn siblings_sort_ascending_by_dob() {
    // Scenario: older sibling first even when inserted later.
    let flat = snapshot([
        member("A", "Root"),
        child_of("B", "Child", "A", Some("2000-01-01")),
        child_of("C", "Child2", "A", Some("1990-01-01")),
    ]);

    let tree = FamilyTree::build(&flat);
    assert_eq!(node(&tree, "A").children, vec!["C".to_string(), "B".to_string()]);
}

#[test]
fn undated_siblings_sort_last_keeping_snapshot_order() {
    let flat = snapshot([
        member("A", "Root"),
        child_of("k1", "Dated95", "A", Some("1995-03-01")),
        child_of("k2", "Undated1", "A", None),
        child_of("k3", "Dated90", "A", Some("1990-03-01")),
        child_of("k4", "Undated2", "A", Some("sometime in spring")),
    ]);

    let tree = FamilyTree::build(&flat);
    assert_eq!(
        node(&tree, "A").children,
        vec![
            "k3".to_string(),
            "k1".to_string(),
            "k2".to_string(),
            "k4".to_string()
        ]
    );
}

#[test]
fn every_member_is_root_or_appears_once_under_its_parent() {
    let flat = snapshot([
        member("A", "Root"),
        child_of("B", "Child", "A", None),
        child_of("C", "Grandchild", "B", None),
        member("X", "OtherRoot"),
        child_of("Y", "OtherChild", "X", None),
    ]);

    let tree = FamilyTree::build(&flat);
    assert_eq!(tree.roots().to_vec(), vec!["A".to_string(), "X".to_string()]);

    for (id, record) in &flat {
        let placements = tree
            .iter()
            .filter(|(_, node)| node.children.contains(id))
            .count();
        if record.parent_id.is_none() {
            assert_eq!(placements, 0, "root {id} must not be anyone's child");
        } else {
            assert_eq!(placements, 1, "{id} must appear exactly once");
        }
    }
}

#[test]
fn dangling_parent_reference_makes_member_a_root() {
    // Scenario: X references a parent that does not exist.
    let flat = snapshot([member("A", "Root"), child_of("X", "Orphan", "Z", None)]);

    let tree = FamilyTree::build(&flat);
    assert_eq!(tree.roots().to_vec(), vec!["A".to_string(), "X".to_string()]);
    assert!(node(&tree, "X").children.is_empty());
    assert!(tree.contains(&"X".to_string()));
    assert!(!tree.contains(&"Z".to_string()));
}

#[test]
fn self_parent_reference_makes_member_a_root() {
    let flat = snapshot([child_of("S", "Loner", "S", None)]);

    let tree = FamilyTree::build(&flat);
    assert_eq!(tree.roots().to_vec(), vec!["S".to_string()]);
    assert!(node(&tree, "S").children.is_empty());
}

#[test]
fn spouse_links_resolve_per_record() {
    let mut asha = member("A", "Asha");
    asha.spouse_of = Some("R".to_string());
    let mut ravi = member("R", "Ravi");
    ravi.spouse_of = Some("A".to_string());
    let mut widowed = member("W", "Widowed");
    widowed.spouse_of = Some("gone".to_string());

    let tree = FamilyTree::build(&snapshot([asha, ravi, widowed]));
    assert_eq!(node(&tree, "A").spouse.as_deref(), Some("R"));
    assert_eq!(node(&tree, "R").spouse.as_deref(), Some("A"));
    assert_eq!(node(&tree, "W").spouse, None);
}

#[test]
fn one_sided_spouse_link_resolves_one_way() {
    let mut asha = member("A", "Asha");
    asha.spouse_of = Some("R".to_string());
    let ravi = member("R", "Ravi");

    let tree = FamilyTree::build(&snapshot([asha, ravi]));
    assert_eq!(node(&tree, "A").spouse.as_deref(), Some("R"));
    assert_eq!(node(&tree, "R").spouse, None);
}

#[test]
fn single_child_keeps_unparsable_dob_without_error() {
    let flat = snapshot([
        member("A", "Root"),
        child_of("B", "Child", "A", Some("no idea")),
    ]);

    let tree = FamilyTree::build(&flat);
    assert_eq!(node(&tree, "A").children, vec!["B".to_string()]);
    assert_eq!(node(&tree, "B").record.dob.as_deref(), Some("no idea"));
}
