//! Structural pattern detection over the object graph.
//!
//! Classifies connected groups of same-type records so the assembler can
//! make layout decisions: a region whose records never point at more than
//! one same-type neighbour looks like a singly-linked chain and gets
//! wrapped in a visual cluster; a maximum of two same-type out-edges looks
//! like a binary tree and is left alone (its two-child rendering already
//! reads spatially). Anything with higher arity is an unclassified general
//! graph and renders individually.
//!
//! Detection is two passes over the closure, restricted to record values:
//!
//! 1. For every record, count its homogeneous out-edges (target record
//!    carries the same type tag) and keep the per-tag maximum.
//! 2. Union-find merging over homogeneous edges builds the maximal
//!    regions; each region inherits the classification of its shared tag.
//!
//! Field names are deliberately not part of the homogeneity test: a record
//! with two differently-named same-type fields merges its links into one
//! region under the higher-arity classification. That mirrors the observed
//! behavior this port preserves; the stricter single-field-name policy is
//! pinned down (as absent) by a test rather than silently introduced.

use crate::graph::ObjectGraph;
use log::debug;
use petgraph::{graph::NodeIndex, unionfind::UnionFind};
use std::collections::HashMap;

/// Classification of a region by its maximum same-type out-degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Max one same-type out-edge per node: chain-like (linked list).
    Chain,
    /// Max two same-type out-edges per node: tree-like (binary tree).
    Tree,
}

/// A maximal set of records connected by same-type-to-same-type edges.
#[derive(Debug)]
pub struct Region {
    /// Member nodes in discovery order.
    pub nodes: Vec<NodeIndex>,
    /// The type tag shared by every member.
    pub type_name: String,
    /// `None` when the max same-type out-degree exceeds two (general graph).
    pub kind: Option<RegionKind>,
}

/// Per-type-tag maximum count of homogeneous out-edges on any single node.
///
/// Tags without a single homogeneous edge do not appear in the map.
pub fn max_homogeneous_degree(graph: &ObjectGraph) -> HashMap<String, usize> {
    let mut max_for_type: HashMap<String, usize> = HashMap::new();

    for (idx, value) in graph.nodes_with_indices() {
        let Some(type_name) = value.type_name() else {
            continue;
        };
        let degree = graph.same_type_targets(idx).len();
        if degree > 0 {
            let entry = max_for_type.entry(type_name).or_insert(0);
            *entry = (*entry).max(degree);
        }
    }

    max_for_type
}

/// Finds all maximal same-type regions and classifies them.
///
/// Records with zero homogeneous edges stay unregioned and render
/// individually.
pub fn detect_regions(graph: &ObjectGraph) -> Vec<Region> {
    let max_for_type = max_homogeneous_degree(graph);

    let mut union_find: UnionFind<usize> = UnionFind::new(graph.node_count());
    let mut in_region = vec![false; graph.node_count()];

    for (idx, value) in graph.nodes_with_indices() {
        if value.type_name().is_none() {
            continue;
        }
        for target in graph.same_type_targets(idx) {
            union_find.union(idx.index(), target.index());
            in_region[idx.index()] = true;
            in_region[target.index()] = true;
        }
    }

    // Group members by their union-find representative, preserving
    // discovery order within each region.
    let mut members: HashMap<usize, Vec<NodeIndex>> = HashMap::new();
    let mut roots_in_order: Vec<usize> = Vec::new();
    for (idx, _) in graph.nodes_with_indices() {
        if !in_region[idx.index()] {
            continue;
        }
        let root = union_find.find(idx.index());
        let entry = members.entry(root).or_insert_with(|| {
            roots_in_order.push(root);
            Vec::new()
        });
        entry.push(idx);
    }

    let regions: Vec<Region> = roots_in_order
        .into_iter()
        .map(|root| {
            let nodes = members.remove(&root).unwrap_or_default();
            let type_name = graph
                .value(nodes[0])
                .type_name()
                .unwrap_or_default();
            let kind = match max_for_type.get(&type_name) {
                Some(1) => Some(RegionKind::Chain),
                Some(2) => Some(RegionKind::Tree),
                _ => None,
            };
            Region {
                nodes,
                type_name,
                kind,
            }
        })
        .collect();

    debug!(regions = regions.len(); "Detected homogeneous regions");

    regions
}
