// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::model::{EdgeId, NodeId};

/// The derived set of selected node/edge ids.
///
/// Consumers compare selections by identity (`Arc::ptr_eq`) to skip
/// redundant work, so the engine only allocates a new `Selection` when the
/// recomputed sets actually differ. Spurious re-identity would send a
/// reactive renderer into a feedback loop; that makes the stability
/// guarantee a correctness contract, not an optimization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    node_ids: BTreeSet<NodeId>,
    edge_ids: BTreeSet<EdgeId>,
}

impl Selection {
    pub fn from_parts(node_ids: BTreeSet<NodeId>, edge_ids: BTreeSet<EdgeId>) -> Self {
        Self { node_ids, edge_ids }
    }

    pub fn node_ids(&self) -> &BTreeSet<NodeId> {
        &self.node_ids
    }

    pub fn edge_ids(&self) -> &BTreeSet<EdgeId> {
        &self.edge_ids
    }

    pub fn contains_node(&self, node_id: &NodeId) -> bool {
        self.node_ids.contains(node_id)
    }

    pub fn contains_edge(&self, edge_id: &EdgeId) -> bool {
        self.edge_ids.contains(edge_id)
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty() && self.edge_ids.is_empty()
    }
}

/// Installs the recomputed sets only when they differ from the current
/// ones, by value. Returns whether a replacement happened.
pub(crate) fn replace_if_changed(
    current: &mut Arc<Selection>,
    node_ids: BTreeSet<NodeId>,
    edge_ids: BTreeSet<EdgeId>,
) -> bool {
    if *current.node_ids() == node_ids && *current.edge_ids() == edge_ids {
        return false;
    }
    *current = Arc::new(Selection::from_parts(node_ids, edge_ids));
    true
}
