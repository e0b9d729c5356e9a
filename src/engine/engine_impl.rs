// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Mutation surface of the engine.
/// Keeps `engine::mod` focused on construction, lifecycle, and undo/redo.
impl CanvasEngine {
    /// Adds a node with a label derived from its id, at the given or
    /// default position and kind.
    pub fn add_node(&mut self, kind: Option<NodeKind>, position: Option<Position>) -> NodeId {
        self.push_history();
        let node_id = self.alloc.next_node_id();
        let label = format!("Node {node_id}");
        let node = Node::new(
            node_id.clone(),
            kind.unwrap_or(DEFAULT_NODE_KIND),
            position.unwrap_or_default(),
            label,
        );
        self.canvas.nodes_mut().push(node);
        node_id
    }

    /// Connects two nodes. Endpoints are not checked for existence;
    /// referential integrity lives in the validation layer above.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> EdgeId {
        self.push_history();
        let edge_id = self.alloc.next_edge_id();
        let edge = Edge::new(edge_id.clone(), source, target);
        self.canvas.edges_mut().push(edge);
        edge_id
    }

    /// Shallow-merges a patch into a node.
    ///
    /// An unknown kind string rejects the whole update: no state change,
    /// one warning, no error surfaced to the caller.
    pub fn update_node(&mut self, node_id: &NodeId, patch: NodePatch) {
        let kind = match patch.kind.as_deref() {
            Some(raw) => match raw.parse::<NodeKind>() {
                Ok(kind) => Some(kind),
                Err(err) => {
                    warn!(node_id = %node_id, %err, "rejecting node update");
                    return;
                }
            },
            None => None,
        };
        if !self.canvas.contains_node(node_id) {
            return;
        }

        self.push_history();
        let Some(node) = self.canvas.node_mut(node_id) else {
            return;
        };
        if let Some(kind) = kind {
            node.set_kind(kind);
        }
        if let Some(label) = patch.label {
            node.set_label(label);
        }
        if let Some(position) = patch.position {
            node.set_position(position);
        }
        for (key, value) in patch.extra {
            node.extra_mut().insert(key, value);
        }
        self.touched.insert(node_id.clone());
    }

    /// Shallow-merges a patch into an edge payload; absent fields keep
    /// their stored values.
    pub fn update_edge(&mut self, edge_id: &EdgeId, patch: EdgePatch) {
        if !self.canvas.contains_edge(edge_id) {
            return;
        }

        self.push_history();
        let Some(edge) = self.canvas.edge_mut(edge_id) else {
            return;
        };
        if let Some(label) = patch.label {
            edge.set_label(Some(label));
        }
        if let Some(weight) = patch.weight {
            edge.set_weight(Some(weight));
        }
        if let Some(belief) = patch.belief {
            edge.set_belief(Some(belief));
        }
        if let Some(provenance) = patch.provenance {
            edge.set_provenance(Some(provenance));
        }
        if let Some(probability) = patch.probability {
            edge.set_probability(Some(probability));
        }
        if let Some(style) = patch.style {
            edge.set_style(Some(style));
        }
        for (key, value) in patch.extra {
            edge.extra_mut().insert(key, value);
        }
    }

    /// Removes selected nodes, selected edges, and every edge referencing
    /// a removed node; clears the selection afterwards.
    pub fn delete_selected(&mut self) {
        self.push_history();
        self.delete_selected_inner();
    }

    pub fn duplicate_selected(&mut self) {
        self.push_history();
        let selection = Arc::clone(&self.selection);
        let nodes: Vec<Node> = self
            .canvas
            .nodes()
            .iter()
            .filter(|node| selection.contains_node(node.node_id()))
            .cloned()
            .collect();
        let edges: Vec<Edge> = self
            .canvas
            .edges()
            .iter()
            .filter(|edge| {
                selection.contains_node(edge.source()) && selection.contains_node(edge.target())
            })
            .cloned()
            .collect();
        let new_node_ids = self.insert_copies(&nodes, &edges);
        self.set_selection(new_node_ids, BTreeSet::new());
    }

    /// Replaces the clipboard with the selected nodes and their internal
    /// edges. The graph is untouched.
    pub fn copy_selected(&mut self) {
        self.capture_clipboard();
    }

    /// Copy plus delete, as one history entry.
    pub fn cut_selected(&mut self) {
        self.push_history();
        self.capture_clipboard();
        self.delete_selected_inner();
    }

    /// Inserts clipboard content under fresh ids; the clipboard is kept,
    /// so repeated pastes keep working (each with its own id map).
    pub fn paste(&mut self) {
        let Some(payload) = self.clipboard.clone() else {
            return;
        };
        if payload.is_empty() {
            return;
        }
        self.push_history();
        let new_node_ids = self.insert_copies(&payload.nodes, &payload.edges);
        self.set_selection(new_node_ids, BTreeSet::new());
    }

    pub fn select_all(&mut self) {
        let node_ids = self
            .canvas
            .nodes()
            .iter()
            .map(|node| node.node_id().clone())
            .collect();
        let edge_ids = self
            .canvas
            .edges()
            .iter()
            .map(|edge| edge.edge_id().clone())
            .collect();
        self.set_selection(node_ids, edge_ids);
    }

    pub fn nudge_selected(&mut self, dx: f64, dy: f64) {
        self.nudge_selected_at(dx, dy, Instant::now());
    }

    /// Shifts every selected node; bursts of repeated nudges coalesce into
    /// one history entry through the nudge debounce window.
    pub fn nudge_selected_at(&mut self, dx: f64, dy: f64, now: Instant) {
        if self.selection.node_ids().is_empty() {
            return;
        }
        let canvas = &self.canvas;
        self.nudge.note(now, || Snapshot::capture(canvas));

        let selection = Arc::clone(&self.selection);
        for node in self.canvas.nodes_mut().iter_mut() {
            if selection.contains_node(node.node_id()) {
                let moved = node.position().offset(dx, dy);
                node.set_position(moved);
                self.touched.insert(node.node_id().clone());
            }
        }
    }

    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) {
        self.apply_node_changes_at(changes, Instant::now());
    }

    /// Structurally merges a batch of node change records.
    ///
    /// An empty batch is a complete no-op. A batch made up entirely of
    /// in-flight drag positions goes through the drag debounce window;
    /// anything else pushes history immediately.
    pub fn apply_node_changes_at(&mut self, changes: &[NodeChange], now: Instant) {
        if changes.is_empty() {
            return;
        }
        if changes.iter().all(NodeChange::is_drag) {
            let canvas = &self.canvas;
            self.drag.note(now, || Snapshot::capture(canvas));
        } else {
            self.push_history();
        }

        let mut node_ids = self.selection.node_ids().clone();
        let mut selection_dirty = false;
        for change in changes {
            match change {
                NodeChange::Position {
                    node_id, position, ..
                } => {
                    if let Some(node) = self.canvas.node_mut(node_id) {
                        node.set_position(*position);
                        self.touched.insert(node_id.clone());
                    }
                }
                NodeChange::Remove { node_id } => {
                    self.canvas.nodes_mut().retain(|node| node.node_id() != node_id);
                    self.touched.remove(node_id);
                }
                NodeChange::Select { node_id, selected } => {
                    selection_dirty = true;
                    if *selected {
                        node_ids.insert(node_id.clone());
                    } else {
                        node_ids.remove(node_id);
                    }
                }
            }
        }
        if selection_dirty {
            let edge_ids = self.selection.edge_ids().clone();
            self.set_selection(node_ids, edge_ids);
        }
    }

    /// Structurally merges a batch of edge change records; empty batches
    /// are complete no-ops.
    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        if changes.is_empty() {
            return;
        }
        self.push_history();

        let mut edge_ids = self.selection.edge_ids().clone();
        let mut selection_dirty = false;
        for change in changes {
            match change {
                EdgeChange::Remove { edge_id } => {
                    self.canvas.edges_mut().retain(|edge| edge.edge_id() != edge_id);
                }
                EdgeChange::Select { edge_id, selected } => {
                    selection_dirty = true;
                    if *selected {
                        edge_ids.insert(edge_id.clone());
                    } else {
                        edge_ids.remove(edge_id);
                    }
                }
            }
        }
        if selection_dirty {
            let node_ids = self.selection.node_ids().clone();
            self.set_selection(node_ids, edge_ids);
        }
    }

    /// Selection report from the rendering surface, carrying the full
    /// selected objects. Set-equal reports keep the previous selection
    /// handle identity.
    pub fn on_selection_change(&mut self, nodes: &[Node], edges: &[Edge]) {
        let node_ids = nodes.iter().map(|node| node.node_id().clone()).collect();
        let edge_ids = edges.iter().map(|edge| edge.edge_id().clone()).collect();
        self.set_selection(node_ids, edge_ids);
    }

    /// Replaces whichever of nodes/edges the partial carries, then clears
    /// history, selection, and touched bookkeeping, and reseeds the id
    /// counters against the resulting graph. Clipboard, documents, and
    /// anything UI-adjacent stay untouched.
    pub fn hydrate(&mut self, partial: HydratePartial) {
        let HydratePartial {
            nodes,
            edges,
            scenario_id,
        } = partial;

        if let Some(nodes) = nodes {
            *self.canvas.nodes_mut() = nodes;
        }
        if let Some(edges) = edges {
            *self.canvas.edges_mut() = edges;
        }
        if let Some(scenario_id) = scenario_id {
            self.scenario_id = Some(scenario_id);
        }

        self.cancel_pending();
        self.history.clear();
        self.set_selection(BTreeSet::new(), BTreeSet::new());
        self.touched.clear();
        self.alloc.reseed(self.canvas.nodes(), self.canvas.edges());
    }

    pub fn add_document(
        &mut self,
        candidate: DocumentCandidate,
    ) -> Result<DocumentId, AttachmentError> {
        self.vault.add(candidate, std::time::SystemTime::now())
    }

    pub fn remove_document(&mut self, document_id: &DocumentId) -> bool {
        self.vault.remove(document_id)
    }

    pub fn documents(&self) -> &[Attachment] {
        self.vault.documents()
    }

    pub fn stored_document_chars(&self) -> usize {
        self.vault.stored_chars()
    }

    pub fn export_canvas(&self) -> Result<String, SnapshotError> {
        snapshot_store::encode_canvas(&self.canvas, self.scenario_id.as_ref())
    }

    /// Whole-graph import: decode, then hydrate (which reseeds ids and
    /// clears history/selection exactly as `hydrate` does).
    pub fn import_canvas(&mut self, text: &str) -> Result<(), SnapshotError> {
        let decoded = snapshot_store::decode_canvas(text)?;
        self.hydrate(HydratePartial {
            nodes: Some(decoded.nodes),
            edges: Some(decoded.edges),
            scenario_id: decoded.scenario_id,
        });
        Ok(())
    }

    /// Best-effort persistence: export/sink failures are logged at debug
    /// level and otherwise ignored.
    pub fn save_snapshot(&self, sink: &mut dyn SnapshotSink, key: &str) {
        let text = match self.export_canvas() {
            Ok(text) => text,
            Err(err) => {
                debug!(%err, "canvas export failed; skipping snapshot save");
                return;
            }
        };
        if let Err(err) = sink.put(key, &text) {
            debug!(%err, "snapshot sink rejected write");
        }
    }

    /// Loads and imports a stored snapshot. A missing key or failing sink
    /// is best-effort (`Ok(false)`); a present but malformed payload is a
    /// hard error.
    pub fn load_snapshot(
        &mut self,
        sink: &dyn SnapshotSink,
        key: &str,
    ) -> Result<bool, SnapshotError> {
        let text = match sink.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return Ok(false),
            Err(err) => {
                debug!(%err, "snapshot sink read failed");
                return Ok(false);
            }
        };
        self.import_canvas(&text)?;
        Ok(true)
    }

    fn delete_selected_inner(&mut self) {
        let selection = Arc::clone(&self.selection);
        self.canvas
            .nodes_mut()
            .retain(|node| !selection.contains_node(node.node_id()));
        self.canvas.edges_mut().retain(|edge| {
            !selection.contains_edge(edge.edge_id())
                && !selection.contains_node(edge.source())
                && !selection.contains_node(edge.target())
        });
        self.touched.retain(|node_id| !selection.contains_node(node_id));
        self.set_selection(BTreeSet::new(), BTreeSet::new());
    }

    fn capture_clipboard(&mut self) {
        let selection = Arc::clone(&self.selection);
        let nodes: Vec<Node> = self
            .canvas
            .nodes()
            .iter()
            .filter(|node| selection.contains_node(node.node_id()))
            .cloned()
            .collect();
        let edges: Vec<Edge> = self
            .canvas
            .edges()
            .iter()
            .filter(|edge| {
                selection.contains_node(edge.source()) && selection.contains_node(edge.target())
            })
            .cloned()
            .collect();
        self.clipboard = Some(ClipboardPayload { nodes, edges });
    }

    /// Inserts offset copies of the given nodes plus the subset of edges
    /// whose endpoints both remap, and returns the new node ids.
    fn insert_copies(&mut self, nodes: &[Node], edges: &[Edge]) -> BTreeSet<NodeId> {
        let mut remap: BTreeMap<NodeId, NodeId> = BTreeMap::new();
        let mut new_node_ids = BTreeSet::new();

        for node in nodes {
            let new_id = self.alloc.next_node_id();
            let mut copy = node.cloned_as(new_id.clone());
            copy.set_position(node.position().offset(DUPLICATE_OFFSET, DUPLICATE_OFFSET));
            remap.insert(node.node_id().clone(), new_id.clone());
            self.canvas.nodes_mut().push(copy);
            new_node_ids.insert(new_id);
        }

        for edge in edges {
            let (Some(source), Some(target)) = (remap.get(edge.source()), remap.get(edge.target()))
            else {
                continue;
            };
            let new_id = self.alloc.next_edge_id();
            let copy = edge.cloned_as(new_id, source.clone(), target.clone());
            self.canvas.edges_mut().push(copy);
        }

        new_node_ids
    }
}
