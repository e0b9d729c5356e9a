// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Change records reported by the rendering surface.
//!
//! The surface owns gesture recognition; the engine only sees batches of
//! discrete, kind-tagged records and merges them structurally into the
//! canvas. A batch made up entirely of in-flight drag positions is
//! coalesced into the drag history window; any other kind pushes history
//! immediately.

use crate::model::{EdgeId, NodeId, Position};

#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    Position {
        node_id: NodeId,
        position: Position,
        /// True while the pointer is still down; the final drop reports
        /// `false`.
        dragging: bool,
    },
    Remove {
        node_id: NodeId,
    },
    Select {
        node_id: NodeId,
        selected: bool,
    },
}

impl NodeChange {
    pub fn is_drag(&self) -> bool {
        matches!(self, Self::Position { dragging: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeChange {
    Remove { edge_id: EdgeId },
    Select { edge_id: EdgeId, selected: bool },
}

#[cfg(test)]
mod tests {
    use super::NodeChange;
    use crate::model::{NodeId, Position};

    #[test]
    fn only_in_flight_position_changes_count_as_drag() {
        let node_id = NodeId::new("1").expect("node id");

        assert!(NodeChange::Position {
            node_id: node_id.clone(),
            position: Position::default(),
            dragging: true,
        }
        .is_drag());

        assert!(!NodeChange::Position {
            node_id: node_id.clone(),
            position: Position::default(),
            dragging: false,
        }
        .is_drag());

        assert!(!NodeChange::Remove { node_id }.is_drag());
    }
}
