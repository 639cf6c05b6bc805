//! Dependency ordering of type declarations.

use crate::error::CodegenError;
use crate::extract::DependencyGraph;
use std::collections::{BTreeSet, HashSet};

/// Orders `fragments` so that every item comes after the items it depends
/// on.
///
/// Dependencies on names outside the batch and self-edges are ignored.
/// Among equally ready items, later input items surface first: the input is
/// reversed, the ready queue is seeded in that order and popped from the
/// back.
///
/// # Errors
/// Returns `CodegenError::CircularDependency` naming the items that could
/// not be placed, in input order.
pub fn order(
    fragments: Vec<(String, String)>,
    deps: &DependencyGraph,
) -> Result<Vec<(String, String)>, CodegenError> {
    let present: HashSet<&str> = fragments.iter().map(|(raw, _)| raw.as_str()).collect();

    let mut remaining: Vec<(String, String, BTreeSet<String>)> = fragments
        .iter()
        .rev()
        .map(|(raw, text)| {
            let pending = deps
                .get(raw)
                .map(|set| {
                    set.iter()
                        .filter(|dep| *dep != raw && present.contains(dep.as_str()))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            (raw.clone(), text.clone(), pending)
        })
        .collect();

    let mut ready: Vec<(String, String)> = Vec::new();
    remaining.retain(|(raw, text, pending)| {
        if pending.is_empty() {
            ready.push((raw.clone(), text.clone()));
            false
        } else {
            true
        }
    });

    let mut ordered = Vec::with_capacity(fragments.len());
    while let Some((raw, text)) = ready.pop() {
        remaining.retain_mut(|(other, other_text, pending)| {
            pending.remove(&raw);
            if pending.is_empty() {
                ready.push((other.clone(), other_text.clone()));
                false
            } else {
                true
            }
        });
        ordered.push((raw, text));
    }

    if !remaining.is_empty() {
        let stuck: HashSet<&str> = remaining.iter().map(|(raw, _, _)| raw.as_str()).collect();
        let members = fragments
            .iter()
            .filter(|(raw, _)| stuck.contains(raw.as_str()))
            .map(|(raw, _)| raw.clone())
            .collect();
        return Err(CodegenError::CircularDependency { members });
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fragments(names: &[&str]) -> Vec<(String, String)> {
        names
            .iter()
            .map(|n| ((*n).to_string(), format!("struct {n};")))
            .collect()
    }

    fn graph(edges: &[(&str, &[&str])]) -> DependencyGraph {
        edges
            .iter()
            .map(|(from, to)| {
                (
                    (*from).to_string(),
                    to.iter().map(|t| (*t).to_string()).collect(),
                )
            })
            .collect()
    }

    fn names(ordered: &[(String, String)]) -> Vec<&str> {
        ordered.iter().map(|(raw, _)| raw.as_str()).collect()
    }

    #[test]
    fn test_order_independent_items_tie_break() {
        let ordered = order(fragments(&["A", "B", "C"]), &DependencyGraph::new()).expect("order");
        assert_eq!(names(&ordered), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_order_base_before_derived() {
        let deps = graph(&[("Employee", &["Person"])]);
        let ordered = order(fragments(&["Employee", "Person"]), &deps).expect("order");
        assert_eq!(names(&ordered), vec!["Person", "Employee"]);

        let ordered = order(fragments(&["Person", "Employee"]), &deps).expect("order");
        assert_eq!(names(&ordered), vec!["Person", "Employee"]);
    }

    #[test]
    fn test_order_released_items_follow_lifo() {
        // X and Y both wait on Z; once Z is placed they follow in input order.
        let deps = graph(&[("X", &["Z"]), ("Y", &["Z"])]);
        let ordered = order(fragments(&["X", "Y", "Z"]), &deps).expect("order");
        assert_eq!(names(&ordered), vec!["Z", "X", "Y"]);
    }

    #[test]
    fn test_order_ignores_absent_and_self_edges() {
        let deps = graph(&[("Node", &["Node", "Missing"])]);
        let ordered = order(fragments(&["Node"]), &deps).expect("order");
        assert_eq!(names(&ordered), vec!["Node"]);
    }

    #[test]
    fn test_order_detects_cycle() {
        let deps = graph(&[("A", &["B"]), ("B", &["A"]), ("C", &["A"])]);
        let err = order(fragments(&["A", "B", "C", "D"]), &deps).unwrap_err();
        match err {
            CodegenError::CircularDependency { members } => {
                assert_eq!(members, vec!["A", "B", "C"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_order_empty() {
        let ordered = order(Vec::new(), &DependencyGraph::new()).expect("order");
        assert!(ordered.is_empty());
    }

    proptest! {
        #[test]
        fn dependencies_precede_dependents(edges in proptest::collection::vec((0usize..8, 0usize..8), 0..20)) {
            // Edges only point from higher to lower index, so the graph is acyclic.
            let names: Vec<String> = (0..8).map(|i| format!("T{i}")).collect();
            let mut deps = DependencyGraph::new();
            for (a, b) in edges {
                if a > b {
                    deps.entry(names[a].clone()).or_default().insert(names[b].clone());
                }
            }
            let input: Vec<(String, String)> =
                names.iter().map(|n| (n.clone(), String::new())).collect();

            let ordered = order(input.clone(), &deps).expect("acyclic");
            prop_assert_eq!(ordered.len(), input.len());
            let position = |name: &str| ordered.iter().position(|(raw, _)| raw == name);
            for (item, targets) in &deps {
                for target in targets {
                    prop_assert!(position(target) < position(item));
                }
            }

            let again = order(input, &deps).expect("acyclic");
            prop_assert_eq!(again, ordered);
        }
    }
}
