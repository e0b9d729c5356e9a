// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::canvas::Canvas;
use super::edge::Edge;
use super::ids::{EdgeId, NodeId};
use super::node::{Node, NodeKind, Position};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

/// Small decision canvas: one decision, two options, a risk on one of them.
pub(crate) fn demo_canvas() -> Canvas {
    let nodes = vec![
        Node::new(nid("1"), NodeKind::Goal, Position::new(200.0, 0.0), "Launch v2"),
        Node::new(nid("2"), NodeKind::Option, Position::new(80.0, 140.0), "Ship now"),
        Node::new(nid("3"), NodeKind::Option, Position::new(320.0, 140.0), "Wait a quarter"),
        Node::new(nid("4"), NodeKind::Risk, Position::new(80.0, 280.0), "Churn spike"),
        Node::new(nid("5"), NodeKind::Factor, Position::new(320.0, 280.0), "Competitor launch"),
    ];

    let mut supports = Edge::new(eid("e1"), nid("2"), nid("1"));
    supports.set_label(Some("supports"));
    supports.set_belief(Some(0.7));

    let mut threatens = Edge::new(eid("e2"), nid("4"), nid("2"));
    threatens.set_label(Some("threatens"));
    threatens.set_belief(Some(0.4));

    let mut informs = Edge::new(eid("e3"), nid("5"), nid("3"));
    informs.set_label(Some("informs"));

    Canvas::from_parts(nodes, vec![supports, threatens, informs])
}
