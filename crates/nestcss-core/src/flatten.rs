//! Style tree flattening.
//!
//! Walks a [`StyleNode`] with an explicit work-list and produces one
//! [`FlatRule`] per selector that carries declarations of its own. Rules come
//! out in document order: a parent before its children, siblings in key order.

use std::fmt;

use crate::name::hyphenate;
use crate::tree::{StyleEntry, StyleNode};

/// A fully resolved selector with its direct declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRule {
    pub selector: String,
    /// `property:value;` strings in key order. Never empty.
    pub declarations: Vec<String>,
}

impl fmt::Display for FlatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector)?;
        f.write_str("{")?;
        for declaration in &self.declarations {
            f.write_str(declaration)?;
        }
        f.write_str("}")
    }
}

/// Pending traversal work: a node and the selector it lives under.
struct WorkItem<'a> {
    parent: String,
    node: &'a StyleNode,
}

/// Flatten a style tree into rules in document order.
pub fn flatten(root: &StyleNode) -> Vec<FlatRule> {
    let mut rules = Vec::new();
    let mut pending = vec![WorkItem {
        parent: String::new(),
        node: root,
    }];

    while let Some(item) = pending.pop() {
        let mut declarations = Vec::new();
        let mut children = Vec::new();

        for (key, entry) in item.node.iter() {
            match entry {
                StyleEntry::Nested(child) => children.push(WorkItem {
                    parent: child_selector(&item.parent, key),
                    node: child,
                }),
                StyleEntry::Value(value) => {
                    declarations.push(format!("{}:{};", hyphenate(key), value));
                }
            }
        }

        // Last pushed pops first, so push children back to front to visit
        // them in key order.
        pending.extend(children.into_iter().rev());

        if !declarations.is_empty() {
            rules.push(FlatRule {
                selector: item.parent,
                declarations,
            });
        }
    }

    rules
}

/// Compose a descendant class selector.
fn child_selector(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        format!(".{}", hyphenate(key))
    } else {
        format!("{parent} .{}", hyphenate(key))
    }
}
