use kintree_core::{
    serialize_subtree, serialize_tree, to_json_string, ExportDocument, FamilyTree, MemberRecord,
    MemberStatus, Snapshot, DECEASED_NAME_PREFIX,
};

fn member(id: &str, name: &str) -> MemberRecord {
    MemberRecord::new(id, name)
}

fn child_of(id: &str, name: &str, parent: &str) -> MemberRecord {
    let mut record = MemberRecord::new(id, name);
    record.parent_id = Some(parent.to_string());
    record
}

fn snapshot(records: impl IntoIterator<Item = MemberRecord>) -> Snapshot {
    records
        .into_iter()
        .map(|record| (record.id.clone(), record))
        .collect()
}

#[test]
fn single_root_exports_as_bare_object() {
    let tree = FamilyTree::build(&snapshot([member("A", "Root"), child_of("B", "Child", "A")]));

    let document = serialize_tree(&tree);
    assert!(matches!(document, ExportDocument::Single(_)));

    let json = serde_json::to_value(&document).unwrap();
    assert!(json.is_object());
    assert_eq!(json["name"], "Root");
    assert_eq!(json["children"][0]["name"], "Child");
}

#[test]
fn multiple_roots_export_as_array() {
    let tree = FamilyTree::build(&snapshot([member("A", "First"), member("B", "Second")]));

    let document = serialize_tree(&tree);
    assert!(matches!(document, ExportDocument::Forest(ref roots) if roots.len() == 2));

    let json = serde_json::to_value(&document).unwrap();
    assert!(json.is_array());
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn empty_tree_exports_as_empty_array() {
    let document = serialize_tree(&FamilyTree::build(&Snapshot::new()));
    let json = serde_json::to_value(&document).unwrap();
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn deceased_members_get_honorific_prefix() {
    let mut root = member("A", "Motiben");
    root.status = Some(MemberStatus::Deceased);
    root.dod = Some("2015-08-20".to_string());
    let tree = FamilyTree::build(&snapshot([root]));

    let json = serde_json::to_value(&serialize_tree(&tree)).unwrap();
    assert_eq!(json["name"], format!("{DECEASED_NAME_PREFIX}Motiben"));
    assert_eq!(json["status"], "Deceased");
    assert_eq!(json["dod"], "2015-08-20");
}

#[test]
fn absent_fields_export_as_null() {
    let tree = FamilyTree::build(&snapshot([member("A", "Root")]));

    let json = serde_json::to_value(&serialize_tree(&tree)).unwrap();
    for field in ["dob", "dod", "status", "city", "contact", "relationship", "meta", "photoURL"] {
        assert!(json[field].is_null(), "{field} should default to null");
    }
    assert_eq!(json["children"], serde_json::json!([]));
}

#[test]
fn dangling_parent_member_is_exported_as_root() {
    // Unified root definition: an unresolvable parent reference does not
    // drop the member from the export.
    let tree = FamilyTree::build(&snapshot([
        member("A", "Root"),
        child_of("X", "Orphan", "missing"),
    ]));

    let json = serde_json::to_value(&serialize_tree(&tree)).unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|root| root["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Root", "Orphan"]);
}

#[test]
fn children_follow_built_sibling_order() {
    let mut older = child_of("B", "Older", "A");
    older.dob = Some("1990-01-01".to_string());
    let mut younger = child_of("C", "Younger", "A");
    younger.dob = Some("2000-01-01".to_string());
    // Insertion order is C-after-B alphabetically irrelevant; dates win.
    let tree = FamilyTree::build(&snapshot([member("A", "Root"), younger, older]));

    let json = serde_json::to_value(&serialize_tree(&tree)).unwrap();
    assert_eq!(json["children"][0]["name"], "Older");
    assert_eq!(json["children"][1]["name"], "Younger");
}

#[test]
fn subtree_export_covers_only_that_branch() {
    let tree = FamilyTree::build(&snapshot([
        member("A", "Root"),
        child_of("B", "Child", "A"),
        child_of("B1", "Grandchild", "B"),
        child_of("C", "Child2", "A"),
    ]));

    let subtree = serialize_subtree(&tree, &"B".to_string()).expect("B is in the tree");
    assert_eq!(subtree.name, "Child");
    assert_eq!(subtree.children.len(), 1);
    assert_eq!(subtree.children[0].name, "Grandchild");

    assert!(serialize_subtree(&tree, &"missing".to_string()).is_none());
}

#[test]
fn export_json_keeps_declared_key_order() {
    let tree = FamilyTree::build(&snapshot([member("A", "Root")]));
    let json = to_json_string(&serialize_tree(&tree)).unwrap();

    let positions: Vec<usize> = ["\"id\"", "\"name\"", "\"dob\"", "\"photoURL\"", "\"children\""]
        .iter()
        .map(|key| json.find(key).expect("key should be present"))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "keys must appear in declared order");
}

#[test]
fn export_document_roundtrips() {
    let mut root = member("A", "Root");
    root.city = Some("Rajkot".to_string());
    let tree = FamilyTree::build(&snapshot([
        root,
        child_of("B", "Child", "A"),
        child_of("C", "Child2", "A"),
    ]));

    let document = serialize_tree(&tree);
    let json = to_json_string(&document).unwrap();
    let parsed: ExportDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, document);

    let forest_tree = FamilyTree::build(&snapshot([member("A", "First"), member("B", "Second")]));
    let forest = serialize_tree(&forest_tree);
    let forest_json = to_json_string(&forest).unwrap();
    let forest_parsed: ExportDocument = serde_json::from_str(&forest_json).unwrap();
    assert_eq!(forest_parsed, forest);
}
