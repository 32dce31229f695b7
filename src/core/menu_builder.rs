// src/core/menu_builder.rs

use crate::models::{MenuItem, MenuTree, NodeId};

/// Builds the navigable menu for a list of records.
///
/// The root branch is labelled `name` and sits at `depth`; every entry below it
/// sits one level deeper than its parent. Records with children become
/// submenus, everything else becomes a command entry (an absent command is
/// stored as an empty one). Input order is kept as display order.
pub fn build(name: &str, depth: usize, items: &[MenuItem]) -> MenuTree {
    let mut tree = MenuTree::new(name, depth);
    let root = tree.root();
    attach_items(&mut tree, root, items);
    log::debug!("Menu '{}' built with {} nodes.", name, tree.len());
    tree
}

/// Builds the menu for a whole menu file, using the root record as the top menu.
pub fn build_from_root(root: &MenuItem) -> MenuTree {
    if root.command.is_some() && root.is_branch() {
        log::warn!(
            "Menu '{}' has both a command and entries; the command is ignored.",
            root.name
        );
    }
    build(&root.name, 0, &root.children)
}

fn attach_items(tree: &mut MenuTree, parent: NodeId, items: &[MenuItem]) {
    for item in items {
        if item.is_branch() {
            if item.command.is_some() {
                log::warn!(
                    "Entry '{}' has both a command and sub-entries; the command is ignored.",
                    item.name
                );
            }
            let branch = tree.add_branch(parent, item.name.as_str());
            attach_items(tree, branch, &item.children);
        } else {
            tree.add_leaf(
                parent,
                item.name.as_str(),
                item.command.clone().unwrap_or_default(),
            );
        }
    }
}
