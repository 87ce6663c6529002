//! Property-based tests for ledger hierarchy flattening.

use std::collections::{HashMap, HashSet};

use hoffstee_shared::types::LedgerId;
use proptest::prelude::*;

use super::flatten::build_hierarchy;
use super::types::LedgerNode;

/// Strategy for a random forest of up to `max` ledgers in shuffled input order.
///
/// Ledger `i + 1` either is a root or hangs off a ledger created before it,
/// so the result never contains a cycle.
fn forest_strategy(max: usize) -> impl Strategy<Value = Vec<LedgerNode>> {
    (1..=max)
        .prop_flat_map(|n| {
            let parents: Vec<_> = (0..n)
                .map(|i| {
                    if i == 0 {
                        Just(0i64).boxed()
                    } else {
                        prop_oneof![Just(0i64), (1..=i as i64)].boxed()
                    }
                })
                .collect();
            parents
        })
        .prop_map(|parents| {
            parents
                .into_iter()
                .enumerate()
                .map(|(i, parent)| {
                    let id = i as i64 + 1;
                    LedgerNode::child(id, format!("L{id}"), parent)
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn depth_of(id: LedgerId, parents: &HashMap<LedgerId, Option<LedgerId>>) -> usize {
    let mut depth = 0;
    let mut current = id;
    while let Some(Some(parent)) = parents.get(&current) {
        depth += 1;
        current = *parent;
    }
    depth
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every ledger of a forest appears exactly once.
    #[test]
    fn prop_output_is_a_permutation(nodes in forest_strategy(40)) {
        let entries = build_hierarchy(&nodes).unwrap();

        prop_assert_eq!(entries.len(), nodes.len());
        let ids: HashSet<_> = entries.iter().map(|e| e.id).collect();
        prop_assert_eq!(ids.len(), nodes.len());
    }

    /// The prefix repeats the marker exactly `depth` times.
    #[test]
    fn prop_prefix_matches_depth(nodes in forest_strategy(40)) {
        let parents: HashMap<_, _> = nodes.iter().map(|n| (n.id, n.parent())).collect();
        let entries = build_hierarchy(&nodes).unwrap();

        for entry in &entries {
            let depth = depth_of(entry.id, &parents);
            prop_assert_eq!(entry.depth, depth);
            prop_assert_eq!(
                &entry.display_name,
                &format!("{}{}", "---".repeat(depth), entry.name)
            );
        }
    }

    /// Ancestors come first and every subtree is one contiguous run.
    #[test]
    fn prop_preorder_contiguous_subtrees(nodes in forest_strategy(40)) {
        let entries = build_hierarchy(&nodes).unwrap();
        let position: HashMap<_, _> = entries.iter().enumerate().map(|(i, e)| (e.id, i)).collect();

        for (i, entry) in entries.iter().enumerate() {
            if let Some(parent) = nodes.iter().find(|n| n.id == entry.id).and_then(LedgerNode::parent) {
                prop_assert!(position[&parent] < i);
            }

            // The run after an entry holds exactly its descendants, all deeper.
            let run_end = entries[i + 1..]
                .iter()
                .position(|e| e.depth <= entry.depth)
                .map_or(entries.len(), |offset| i + 1 + offset);
            for descendant in &entries[i + 1..run_end] {
                prop_assert!(descendant.depth > entry.depth);
            }
        }
    }

    /// Siblings keep the relative order they had in the input.
    #[test]
    fn prop_sibling_order_preserved(nodes in forest_strategy(40)) {
        let entries = build_hierarchy(&nodes).unwrap();
        let input_position: HashMap<_, _> = nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();

        let mut last_seen: HashMap<Option<LedgerId>, usize> = HashMap::new();
        for entry in &entries {
            let parent = entry.parent_id.filter(|p| !p.is_unset());
            let here = input_position[&entry.id];
            if let Some(&previous) = last_seen.get(&parent) {
                prop_assert!(previous < here);
            }
            last_seen.insert(parent, here);
        }
    }
}
