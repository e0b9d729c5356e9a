// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Edge, EdgeId, Node, NodeId};

/// Counters never start (or reseed) below this, so a near-empty foreign
/// graph cannot hand out ids already used by freshly seeded content.
const ID_FLOOR: u64 = 1;

static DIGIT_RUNS: OnceLock<Regex> = OnceLock::new();

fn digit_runs() -> &'static Regex {
    DIGIT_RUNS.get_or_init(|| Regex::new(r"\d+").expect("digit-run pattern compiles"))
}

fn max_digit_run(id: &str) -> u64 {
    digit_runs()
        .find_iter(id)
        .filter_map(|run| run.as_str().parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}

/// Issues unique, monotonically increasing node/edge ids.
///
/// Node ids are bare decimal strings; edge ids carry an `e` prefix so the
/// two namespaces stay distinguishable in mixed contexts (signatures,
/// snapshots, selection sets).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IdAllocator {
    next_node: u64,
    next_edge: u64,
}

impl IdAllocator {
    pub(crate) fn new() -> Self {
        Self {
            next_node: ID_FLOOR,
            next_edge: ID_FLOOR,
        }
    }

    pub(crate) fn next_node_id(&mut self) -> NodeId {
        let mut buffer = itoa::Buffer::new();
        let id = NodeId::new(buffer.format(self.next_node)).expect("decimal counter is a valid id");
        self.next_node = self.next_node.saturating_add(1);
        id
    }

    pub(crate) fn next_edge_id(&mut self) -> EdgeId {
        let mut buffer = itoa::Buffer::new();
        let mut value = String::with_capacity(21);
        value.push('e');
        value.push_str(buffer.format(self.next_edge));
        let id = EdgeId::new(value).expect("prefixed decimal counter is a valid id");
        self.next_edge = self.next_edge.saturating_add(1);
        id
    }

    /// Re-synchronizes both counters against a loaded graph.
    ///
    /// Every decimal run inside an id contributes; ids with no parsable run
    /// contribute 0. Idempotent, and never regresses a counter.
    pub(crate) fn reseed(&mut self, nodes: &[Node], edges: &[Edge]) {
        let node_max = nodes
            .iter()
            .map(|node| max_digit_run(node.node_id().as_str()))
            .max()
            .unwrap_or(0);
        let edge_max = edges
            .iter()
            .map(|edge| max_digit_run(edge.edge_id().as_str()))
            .max()
            .unwrap_or(0);

        self.next_node = self.next_node.max(node_max.saturating_add(1)).max(ID_FLOOR);
        self.next_edge = self.next_edge.max(edge_max.saturating_add(1)).max(ID_FLOOR);
    }
}

#[cfg(test)]
mod tests {
    use super::IdAllocator;
    use crate::model::{Edge, EdgeId, Node, NodeId, NodeKind, Position};

    fn node(id: &str) -> Node {
        Node::new(
            NodeId::new(id).expect("node id"),
            NodeKind::Factor,
            Position::default(),
            id.to_owned(),
        )
    }

    fn edge(id: &str) -> Edge {
        Edge::new(
            EdgeId::new(id).expect("edge id"),
            NodeId::new("1").expect("source id"),
            NodeId::new("2").expect("target id"),
        )
    }

    #[test]
    fn ids_are_strictly_increasing_and_namespaced() {
        let mut alloc = IdAllocator::new();

        assert_eq!(alloc.next_node_id().as_str(), "1");
        assert_eq!(alloc.next_node_id().as_str(), "2");
        assert_eq!(alloc.next_edge_id().as_str(), "e1");
        assert_eq!(alloc.next_edge_id().as_str(), "e2");
        assert_eq!(alloc.next_node_id().as_str(), "3");
    }

    #[test]
    fn reseed_advances_past_loaded_ids() {
        let mut alloc = IdAllocator::new();
        let nodes = [node("3"), node("7"), node("2")];
        let edges = [edge("e10"), edge("e4")];

        alloc.reseed(&nodes, &edges);

        assert_eq!(alloc.next_node_id().as_str(), "8");
        assert_eq!(alloc.next_edge_id().as_str(), "e11");
    }

    #[test]
    fn reseed_is_idempotent_and_never_regresses() {
        let mut alloc = IdAllocator::new();
        alloc.reseed(&[node("12")], &[]);
        alloc.reseed(&[node("12")], &[]);
        assert_eq!(alloc.next_node_id().as_str(), "13");

        alloc.reseed(&[node("2")], &[]);
        assert_eq!(alloc.next_node_id().as_str(), "14");
    }

    #[test]
    fn reseed_treats_unparsable_ids_as_zero() {
        let mut alloc = IdAllocator::new();
        alloc.reseed(&[node("imported"), node("also-imported")], &[edge("edge")]);

        assert_eq!(alloc.next_node_id().as_str(), "1");
        assert_eq!(alloc.next_edge_id().as_str(), "e1");
    }

    #[test]
    fn reseed_reads_every_digit_run() {
        let mut alloc = IdAllocator::new();
        alloc.reseed(&[node("imported-3-of-25")], &[]);

        assert_eq!(alloc.next_node_id().as_str(), "26");
    }
}
