// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::ids::NodeId;

/// The fixed vocabulary of node types a decision canvas understands.
///
/// The engine validates type *updates* against this set; everything else in
/// a node's payload stays opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Goal,
    Decision,
    Option,
    Outcome,
    Risk,
    Factor,
    Evidence,
    Note,
}

impl NodeKind {
    pub const ALL: [NodeKind; 8] = [
        Self::Goal,
        Self::Decision,
        Self::Option,
        Self::Outcome,
        Self::Risk,
        Self::Factor,
        Self::Evidence,
        Self::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Decision => "decision",
            Self::Option => "option",
            Self::Outcome => "outcome",
            Self::Risk => "risk",
            Self::Factor => "factor",
            Self::Evidence => "evidence",
            Self::Note => "note",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = ParseNodeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goal" => Ok(Self::Goal),
            "decision" => Ok(Self::Decision),
            "option" => Ok(Self::Option),
            "outcome" => Ok(Self::Outcome),
            "risk" => Ok(Self::Risk),
            "factor" => Ok(Self::Factor),
            "evidence" => Ok(Self::Evidence),
            "note" => Ok(Self::Note),
            _ => Err(ParseNodeKindError {
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeKindError {
    value: String,
}

impl ParseNodeKindError {
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNodeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node kind {:?}", self.value)
    }
}

impl std::error::Error for ParseNodeKindError {}

/// A 2D canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    node_id: NodeId,
    kind: NodeKind,
    position: Position,
    label: String,
    extra: BTreeMap<String, Value>,
}

impl Node {
    pub fn new(
        node_id: NodeId,
        kind: NodeKind,
        position: Position,
        label: impl Into<String>,
    ) -> Self {
        Self {
            node_id,
            kind,
            position,
            label: label.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Clone of this node under a different id, payload included.
    pub fn cloned_as(&self, node_id: NodeId) -> Self {
        Self {
            node_id,
            kind: self.kind,
            position: self.position,
            label: self.label.clone(),
            extra: self.extra.clone(),
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut BTreeMap<String, Value> {
        &mut self.extra
    }
}
