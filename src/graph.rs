//! Reachability and edge extraction over runtime value graphs.
//!
//! [`ObjectGraph`] is the graph representation of everything reachable from
//! a root value: one node per distinct composite identity, one edge per
//! composite-to-composite reference, labelled with the field name or
//! stringified position that produced it.
//!
//! Construction runs in two passes:
//!
//! 1. Closure: an explicit-stack preorder traversal collects every
//!    reachable composite exactly once. The visited-identity set is the
//!    sole termination guarantee, so arbitrary cycles are safe and deep
//!    acyclic structures cannot overflow the native stack.
//! 2. Edge extraction: for each collected node, outgoing references to
//!    other composites become labelled edges. Every target is already in
//!    the closure by construction.
//!
//! [`IdTable`] assigns the stable diagram ids: an identity observed twice
//! within one session reuses its id, so repeat renders of the same objects
//! produce diagrams that reference the same node names.

use crate::value::{Composite, Value};
use log::trace;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use std::collections::HashMap;

/// Reference identity of a composite value within one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjId(usize);

impl ObjId {
    /// Identity of a value, if it has one (composites only).
    pub fn of(v: &Value) -> Option<ObjId> {
        v.addr().map(ObjId)
    }
}

/// Identity → diagram-id assignment table, owned by a render session.
///
/// Callers choose its lifetime: keep one table for stable ids across
/// renders, or [`reset`](IdTable::reset) it for per-request numbering.
#[derive(Debug)]
pub struct IdTable {
    ids: HashMap<ObjId, u64>,
    next: u64,
}

impl Default for IdTable {
    fn default() -> Self {
        Self::new()
    }
}

impl IdTable {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            next: 1,
        }
    }

    /// The stable id for a composite value, assigned on first sight.
    pub fn id_of(&mut self, v: &Value) -> Option<u64> {
        let key = ObjId::of(v)?;
        Some(*self.ids.entry(key).or_insert_with(|| {
            let id = self.next;
            self.next += 1;
            id
        }))
    }

    /// Statement name (`node<id>`) for a composite value.
    pub fn node_name(&mut self, v: &Value) -> Option<String> {
        self.id_of(v).map(|id| format!("node{id}"))
    }

    /// A one-off id for values without identity (e.g. a bare string root).
    pub fn fresh(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Forgets all assignments and restarts numbering.
    pub fn reset(&mut self) {
        self.ids.clear();
        self.next = 1;
    }
}

/// All outgoing references of one composite value.
///
/// Records use the field name as label, sequences the stringified index,
/// and keyed mappings the stringified entry position (matching the ports
/// of their rendered row-per-field table). Sets render as self-contained
/// nodes and emit no edges. Atomic and null targets are skipped.
pub fn node_edges(v: &Value) -> Vec<(String, Value)> {
    let Some(composite) = v.composite() else {
        return Vec::new();
    };

    match &*composite {
        Composite::List(items) => items
            .iter()
            .enumerate()
            .filter(|(_, el)| el.is_composite())
            .map(|(i, el)| (i.to_string(), el.clone()))
            .collect(),
        Composite::Map(entries) => entries
            .values()
            .enumerate()
            .filter(|(_, el)| el.is_composite())
            .map(|(i, el)| (i.to_string(), el.clone()))
            .collect(),
        Composite::Record { fields, .. } => fields
            .iter()
            .filter(|(_, el)| el.is_composite())
            .map(|(k, el)| (k.clone(), el.clone()))
            .collect(),
        Composite::Set(_) => Vec::new(),
    }
}

// Child values descended into during closure. Unlike `node_edges` this
// includes set members: they become nodes even though no edge points at
// them from the set.
fn child_values(v: &Value) -> Vec<Value> {
    let Some(composite) = v.composite() else {
        return Vec::new();
    };

    match &*composite {
        Composite::List(items) | Composite::Set(items) => items.clone(),
        Composite::Map(entries) => entries.values().cloned().collect(),
        Composite::Record { fields, .. } => fields.values().cloned().collect(),
    }
}

/// Graph of all composites reachable from one root.
#[derive(Debug)]
pub struct ObjectGraph {
    graph: DiGraph<Value, String>,
    index_of: HashMap<ObjId, NodeIndex>,
}

impl ObjectGraph {
    /// Builds the closure of `root` and its edge set.
    pub fn from_root(root: &Value) -> Self {
        let mut object_graph = Self {
            graph: DiGraph::new(),
            index_of: HashMap::new(),
        };

        // Pass 1: closure via explicit work-list, preorder discovery order.
        let mut stack = vec![root.clone()];
        while let Some(v) = stack.pop() {
            let Some(key) = ObjId::of(&v) else {
                continue;
            };
            if object_graph.index_of.contains_key(&key) {
                continue;
            }

            let idx = object_graph.graph.add_node(v.clone());
            object_graph.index_of.insert(key, idx);

            // Reverse push so the first field/element is discovered first.
            for child in child_values(&v).into_iter().rev() {
                if child.is_composite() {
                    stack.push(child);
                }
            }
        }

        // Pass 2: labelled edges between closure members.
        let node_indices: Vec<NodeIndex> = object_graph.graph.node_indices().collect();
        for idx in node_indices {
            let v = object_graph.graph[idx].clone();
            for (label, target) in node_edges(&v) {
                if let Some(&target_idx) =
                    ObjId::of(&target).and_then(|key| object_graph.index_of.get(&key))
                {
                    object_graph.graph.add_edge(idx, target_idx, label);
                }
            }
        }

        trace!(
            nodes = object_graph.node_count(),
            edges = object_graph.edge_count();
            "Built object graph",
        );

        object_graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in discovery order, with their indices.
    pub fn nodes_with_indices(&self) -> impl Iterator<Item = (NodeIndex, &Value)> {
        self.graph.node_indices().map(|idx| (idx, &self.graph[idx]))
    }

    pub fn value(&self, idx: NodeIndex) -> &Value {
        &self.graph[idx]
    }

    /// All edges as (source, label, target) triples, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, &str, NodeIndex)> {
        self.graph.edge_indices().map(|edge_idx| {
            let (source, target) = self
                .graph
                .edge_endpoints(edge_idx)
                .expect("edge index from iteration is valid");
            (source, self.graph[edge_idx].as_str(), target)
        })
    }

    /// Homogeneous out-edge targets: edges whose endpoint records share the
    /// source's type tag.
    pub fn same_type_targets(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let Some(source_type) = self.graph[idx].type_name() else {
            return Vec::new();
        };

        self.graph
            .edges(idx)
            .filter(|edge| {
                self.graph[edge.target()].type_name().as_deref() == Some(source_type.as_str())
            })
            .map(|edge| edge.target())
            .collect()
    }
}
