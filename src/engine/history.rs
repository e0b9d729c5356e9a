// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;
use std::fmt::Write as _;

use crate::model::{Canvas, Edge, Node};

/// Default bound on the undo stack.
pub const MAX_HISTORY: usize = 50;

/// An immutable `{nodes, edges}` pair captured at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Snapshot {
    pub fn capture(canvas: &Canvas) -> Self {
        Self {
            nodes: canvas.nodes().to_vec(),
            edges: canvas.edges().to_vec(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn signature(&self) -> String {
        content_signature(&self.nodes, &self.edges)
    }

    pub fn into_canvas(self) -> Canvas {
        Canvas::from_parts(self.nodes, self.edges)
    }
}

/// Structural signature of a graph, used to recognize no-op pushes.
///
/// Deliberately not a deep hash: node payloads beyond the label and edge
/// style/provenance/extra fields are excluded, so cosmetic metadata churn
/// does not create history entries.
pub(crate) fn content_signature(nodes: &[Node], edges: &[Edge]) -> String {
    let mut signature = String::new();
    for node in nodes {
        let position = node.position();
        let _ = writeln!(
            signature,
            "n|{}|{}|{}|{}|{:?}",
            node.node_id(),
            position.x,
            position.y,
            node.kind().as_str(),
            node.label(),
        );
    }
    for edge in edges {
        let _ = writeln!(
            signature,
            "e|{}|{}|{}|{:?}|{:?}|{:?}|{:?}",
            edge.edge_id(),
            edge.source(),
            edge.target(),
            edge.label(),
            edge.weight(),
            edge.belief(),
            edge.probability(),
        );
    }
    signature
}

/// Bounded undo/redo stacks plus the signature recorded at the last push.
///
/// `past` holds pre-mutation snapshots, oldest first; `future` holds redo
/// candidates. Any genuinely new push clears `future` (a new edit abandons
/// the redo branch), and so does a signature-equal push, which otherwise
/// leaves the stacks alone: duplicate pushes from event re-entrancy must
/// not grow history, but even a "nothing changed" action still signals the
/// user's intent to diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: VecDeque<Snapshot>,
    // None until the first push after construction/clear; an empty canvas
    // signs as "", so a sentinel string would shadow real content.
    last_signature: Option<String>,
    max_depth: usize,
}

impl History {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            last_signature: None,
            max_depth,
        }
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub(crate) fn record(&mut self, snapshot: Snapshot) {
        let signature = snapshot.signature();
        if self.last_signature.as_deref() == Some(signature.as_str()) {
            if !self.future.is_empty() {
                self.future.clear();
            }
            return;
        }

        self.push_past(snapshot);
        self.future.clear();
        self.last_signature = Some(signature);
    }

    /// Pops the most recent past entry, parking `current` for redo.
    ///
    /// The remembered signature is re-stamped to the restored state so a
    /// follow-up no-op action is recognized as a no-op instead of being
    /// treated as a divergent edit.
    pub(crate) fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let restored = self.past.pop_back()?;
        self.future.push_front(current);
        self.last_signature = Some(restored.signature());
        Some(restored)
    }

    pub(crate) fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let restored = self.future.pop_front()?;
        self.push_past(current);
        self.last_signature = Some(restored.signature());
        Some(restored)
    }

    pub(crate) fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.last_signature = None;
    }

    fn push_past(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);
        while self.past.len() > self.max_depth {
            self.past.pop_front();
        }
    }
}
