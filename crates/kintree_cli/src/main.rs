//! CLI probe for the KinTree core.
//!
//! # Responsibility
//! - Load a member snapshot from a JSON file, build the hierarchy and
//!   print, search or export it.
//! - Keep output deterministic for quick local sanity checks.

use kintree_core::{
    resolve_for_query, serialize_tree, to_json_string, FamilyTree, MemberId, PrunedNode, Snapshot,
};
use std::env;
use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        println!("kintree_core version={}", kintree_core::core_version());
        println!("usage: kintree_cli <snapshot.json> [--export | <query>]");
        return ExitCode::SUCCESS;
    };

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("cannot read `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    let snapshot: Snapshot = match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!("`{path}` is not a member snapshot: {err}");
            return ExitCode::FAILURE;
        }
    };

    let tree = FamilyTree::build(&snapshot);
    match args.next() {
        Some(flag) if flag == "--export" => {
            let document = serialize_tree(&tree);
            match to_json_string(&document) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("export failed: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
        Some(query) => match resolve_for_query(&tree, &query) {
            Some(subtree) => print_pruned(&subtree, 0),
            None => println!("no member matches `{query}`"),
        },
        None => {
            if tree.is_empty() {
                println!("snapshot is empty");
            }
            for root in tree.roots() {
                print_member(&tree, root, 0);
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_member(tree: &FamilyTree, id: &MemberId, depth: usize) {
    let Some(node) = tree.node(id) else {
        return;
    };
    println!("{}{}", "  ".repeat(depth), describe(&node.record.name, node.record.dob.as_deref()));
    for child in &node.children {
        print_member(tree, child, depth + 1);
    }
}

fn print_pruned(node: &PrunedNode, depth: usize) {
    println!("{}{}", "  ".repeat(depth), describe(&node.record.name, node.record.dob.as_deref()));
    for child in &node.children {
        print_pruned(child, depth + 1);
    }
}

fn describe(name: &str, dob: Option<&str>) -> String {
    match dob {
        Some(dob) => format!("{name} (b. {dob})"),
        None => name.to_string(),
    }
}
