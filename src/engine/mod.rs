// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The canvas state engine.
//!
//! One `CanvasEngine` owns one graph plus everything derived from it:
//! selection, bounded undo/redo history, id counters, clipboard, and the
//! document vault. All mutation is synchronous and single-writer; the only
//! deferred work is the two debounce windows that coalesce drag/nudge
//! bursts into single history entries, and those are plain deadlines the
//! host fires through `tick`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, warn};

pub(crate) mod alloc;
pub mod changes;
mod coalesce;
pub mod documents;
pub mod history;
pub mod selection;

pub use changes::{EdgeChange, NodeChange};
pub use documents::{
    Attachment, AttachmentError, DocumentCandidate, DOC_MAX_DECLARED_BYTES,
    DOC_PREVIEW_CHAR_LIMIT, DOC_TOTAL_CHAR_BUDGET, DOC_TRUNCATION_MARKER,
};
pub use history::{History, Snapshot, MAX_HISTORY};
pub use selection::Selection;

use crate::model::{
    Canvas, DocumentId, Edge, EdgeId, Node, NodeId, NodeKind, Position, ScenarioId,
};
use crate::store::snapshot::{self as snapshot_store, SnapshotError, SnapshotSink};
use self::alloc::IdAllocator;
use self::coalesce::Coalescer;
use self::documents::DocumentVault;

/// Offset applied to duplicated and pasted nodes.
const DUPLICATE_OFFSET: f64 = 50.0;

const DEFAULT_NODE_KIND: NodeKind = NodeKind::Decision;

/// Engine knobs; defaults match interactive use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTuning {
    pub max_history: usize,
    pub drag_debounce: Duration,
    pub nudge_debounce: Duration,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            max_history: MAX_HISTORY,
            drag_debounce: Duration::from_millis(200),
            nudge_debounce: Duration::from_millis(500),
        }
    }
}

/// Partial merge-update for a node; absent fields leave stored values
/// alone. The kind arrives as a raw string because type updates come from
/// untyped surfaces and are validated against [`NodeKind`] on application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub kind: Option<String>,
    pub position: Option<Position>,
    pub extra: BTreeMap<String, Value>,
}

/// Partial merge-update for an edge payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgePatch {
    pub label: Option<String>,
    pub weight: Option<f64>,
    pub belief: Option<f64>,
    pub provenance: Option<String>,
    pub probability: Option<String>,
    pub style: Option<String>,
    pub extra: BTreeMap<String, Value>,
}

/// Hydration input: any subset of the recognized fields. Fields the caller
/// does not set leave the corresponding engine state untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydratePartial {
    pub nodes: Option<Vec<Node>>,
    pub edges: Option<Vec<Edge>>,
    pub scenario_id: Option<ScenarioId>,
}

#[derive(Debug, Clone, PartialEq)]
struct ClipboardPayload {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl ClipboardPayload {
    fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[derive(Debug)]
pub struct CanvasEngine {
    canvas: Canvas,
    selection: Arc<Selection>,
    history: History,
    alloc: IdAllocator,
    clipboard: Option<ClipboardPayload>,
    vault: DocumentVault,
    scenario_id: Option<ScenarioId>,
    touched: BTreeSet<NodeId>,
    drag: Coalescer,
    nudge: Coalescer,
    tuning: EngineTuning,
}

impl Default for CanvasEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasEngine {
    pub fn new() -> Self {
        Self::with_tuning(EngineTuning::default())
    }

    pub fn with_tuning(tuning: EngineTuning) -> Self {
        Self {
            canvas: Canvas::default(),
            selection: Arc::new(Selection::default()),
            history: History::new(tuning.max_history),
            alloc: IdAllocator::new(),
            clipboard: None,
            vault: DocumentVault::new(),
            scenario_id: None,
            touched: BTreeSet::new(),
            drag: Coalescer::new(tuning.drag_debounce),
            nudge: Coalescer::new(tuning.nudge_debounce),
            tuning,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Current selection. The returned handle is identity-stable across
    /// recomputations that do not change the sets (see [`Selection`]).
    pub fn selection(&self) -> Arc<Selection> {
        Arc::clone(&self.selection)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn scenario_id(&self) -> Option<&ScenarioId> {
        self.scenario_id.as_ref()
    }

    /// Node ids the user has edited since the last hydration.
    pub fn touched_node_ids(&self) -> &BTreeSet<NodeId> {
        &self.touched
    }

    pub fn undo(&mut self) {
        let current = Snapshot::capture(&self.canvas);
        if let Some(restored) = self.history.undo(current) {
            self.canvas = restored.into_canvas();
        }
    }

    pub fn redo(&mut self) {
        let current = Snapshot::capture(&self.canvas);
        if let Some(restored) = self.history.redo(current) {
            self.canvas = restored.into_canvas();
        }
    }

    /// Fires any debounce window whose idle deadline has passed.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(snapshot) = self.drag.poll(now) {
            self.history.record(snapshot);
        }
        if let Some(snapshot) = self.nudge.poll(now) {
            self.history.record(snapshot);
        }
    }

    /// Cancels both debounce windows, dropping their pending snapshots.
    ///
    /// Called on teardown and before any wholesale state replacement so a
    /// stale deadline cannot push pre-replacement history afterwards.
    pub fn cancel_pending(&mut self) {
        self.drag.cancel();
        self.nudge.cancel();
    }

    pub fn has_pending_push(&self) -> bool {
        self.drag.is_armed() || self.nudge.is_armed()
    }

    /// Restores a fresh engine under the same tuning.
    pub fn reset(&mut self) {
        *self = Self::with_tuning(self.tuning);
    }

    fn push_history(&mut self) {
        let snapshot = Snapshot::capture(&self.canvas);
        self.history.record(snapshot);
    }

    fn set_selection(&mut self, node_ids: BTreeSet<NodeId>, edge_ids: BTreeSet<EdgeId>) {
        selection::replace_if_changed(&mut self.selection, node_ids, edge_ids);
    }
}

// Extracted mutation-surface implementation for canvas edits.
include!("engine_impl.rs");
