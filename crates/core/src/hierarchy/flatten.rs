//! Depth-first flattening of the ledger forest.

use std::collections::{HashMap, HashSet};

use hoffstee_shared::types::LedgerId;
use tracing::{debug, warn};

use super::error::HierarchyError;
use super::types::{HierarchyEntry, LedgerNode};

/// Prefix repeated once per depth level unless configured otherwise.
pub const DEFAULT_INDENT_MARKER: &str = "---";

/// Builds dropdown-ready ledger lists.
#[derive(Debug, Clone)]
pub struct HierarchyBuilder {
    indent_marker: String,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_MARKER)
    }
}

impl HierarchyBuilder {
    /// Creates a builder with a custom indent marker.
    #[must_use]
    pub fn new(indent_marker: impl Into<String>) -> Self {
        Self {
            indent_marker: indent_marker.into(),
        }
    }

    /// Returns the indent marker.
    #[must_use]
    pub fn indent_marker(&self) -> &str {
        &self.indent_marker
    }

    /// Flattens `nodes` into pre-order: each ledger is followed immediately
    /// by its whole subtree, siblings keep their input order.
    ///
    /// Ledgers whose parent id is not in `nodes` are left out together with
    /// their descendants.
    ///
    /// # Errors
    ///
    /// - `DuplicateLedger` if two nodes share an id.
    /// - `Cycle` if a parent chain loops back on itself.
    pub fn flatten(&self, nodes: &[LedgerNode]) -> Result<Vec<HierarchyEntry>, HierarchyError> {
        let mut index: HashMap<LedgerId, usize> = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id, i).is_some() {
                return Err(HierarchyError::DuplicateLedger(node.id));
            }
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut roots = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            match node.parent() {
                None => roots.push(i),
                Some(parent) => {
                    if let Some(&p) = index.get(&parent) {
                        children[p].push(i);
                    }
                }
            }
        }

        let mut visited = vec![false; nodes.len()];
        let mut flattened = Vec::with_capacity(nodes.len());
        // Stack holds (node index, depth); pushed in reverse so pops follow input order.
        let mut stack: Vec<(usize, usize)> = roots.iter().rev().map(|&i| (i, 0)).collect();

        while let Some((i, depth)) = stack.pop() {
            if std::mem::replace(&mut visited[i], true) {
                return Err(HierarchyError::Cycle(nodes[i].id));
            }

            let node = &nodes[i];
            flattened.push(HierarchyEntry {
                id: node.id,
                name: node.name.clone(),
                parent_id: node.parent_id,
                depth,
                display_name: format!("{}{}", self.indent_marker.repeat(depth), node.name),
            });

            stack.extend(children[i].iter().rev().map(|&child| (child, depth + 1)));
        }

        if flattened.len() < nodes.len() {
            check_unreached(nodes, &index, &visited)?;
            warn!(
                excluded = nodes.len() - flattened.len(),
                "ledgers under unknown parents left out of hierarchy"
            );
        }

        debug!(
            ledgers = flattened.len(),
            roots = roots.len(),
            "ledger hierarchy flattened"
        );
        Ok(flattened)
    }
}

/// Walks the parent chain of every ledger the traversal did not reach.
///
/// A chain that ends at an unknown parent is an orphan subtree. A chain that
/// revisits a ledger never reaches a root.
fn check_unreached(
    nodes: &[LedgerNode],
    index: &HashMap<LedgerId, usize>,
    visited: &[bool],
) -> Result<(), HierarchyError> {
    let mut orphaned = vec![false; nodes.len()];

    for start in (0..nodes.len()).filter(|&i| !visited[i]) {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = start;

        loop {
            if orphaned[current] {
                break;
            }
            if !seen.insert(current) {
                return Err(HierarchyError::Cycle(nodes[current].id));
            }
            chain.push(current);

            match nodes[current].parent().and_then(|p| index.get(&p)) {
                Some(&parent) => current = parent,
                None => break,
            }
        }

        for i in chain {
            orphaned[i] = true;
        }
    }

    Ok(())
}

/// Flattens with the default `"---"` marker.
///
/// # Errors
///
/// See [`HierarchyBuilder::flatten`].
pub fn build_hierarchy(nodes: &[LedgerNode]) -> Result<Vec<HierarchyEntry>, HierarchyError> {
    HierarchyBuilder::default().flatten(nodes)
}
