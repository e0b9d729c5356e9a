// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Textual canvas snapshots and the key/value sink they are persisted to.
//!
//! The document format is a plain node list plus edge list; no version
//! field. Forward safety comes from the engine reseeding its id counters
//! against whatever it loads, and from unknown JSON keys being ignored on
//! decode.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    Canvas, Edge, EdgeId, IdError, Node, NodeId, NodeKind, ParseNodeKindError, Position,
    ScenarioId,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl NodeRecord {
    pub fn from_node(node: &Node) -> Self {
        let position = node.position();
        Self {
            id: node.node_id().as_str().to_owned(),
            kind: node.kind().as_str().to_owned(),
            x: position.x,
            y: position.y,
            label: node.label().to_owned(),
            extra: node.extra().clone(),
        }
    }

    pub fn into_node(self) -> Result<Node, SnapshotError> {
        let node_id = NodeId::new(self.id.clone()).map_err(|source| SnapshotError::InvalidId {
            field: "node id",
            value: self.id,
            source: Box::new(source),
        })?;
        let kind = self
            .kind
            .parse::<NodeKind>()
            .map_err(|source| SnapshotError::UnknownNodeKind { source })?;

        let mut node = Node::new(node_id, kind, Position::new(self.x, self.y), self.label);
        *node.extra_mut() = self.extra;
        Ok(node)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belief: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl EdgeRecord {
    pub fn from_edge(edge: &Edge) -> Self {
        Self {
            id: edge.edge_id().as_str().to_owned(),
            source: edge.source().as_str().to_owned(),
            target: edge.target().as_str().to_owned(),
            label: edge.label().map(ToOwned::to_owned),
            weight: edge.weight(),
            belief: edge.belief(),
            provenance: edge.provenance().map(ToOwned::to_owned),
            probability: edge.probability().map(ToOwned::to_owned),
            style: edge.style().map(ToOwned::to_owned),
            extra: edge.extra().clone(),
        }
    }

    pub fn into_edge(self) -> Result<Edge, SnapshotError> {
        let edge_id = EdgeId::new(self.id.clone()).map_err(|source| SnapshotError::InvalidId {
            field: "edge id",
            value: self.id,
            source: Box::new(source),
        })?;
        let source_id =
            NodeId::new(self.source.clone()).map_err(|source| SnapshotError::InvalidId {
                field: "edge source",
                value: self.source,
                source: Box::new(source),
            })?;
        let target_id =
            NodeId::new(self.target.clone()).map_err(|source| SnapshotError::InvalidId {
                field: "edge target",
                value: self.target,
                source: Box::new(source),
            })?;

        let mut edge = Edge::new(edge_id, source_id, target_id);
        edge.set_label(self.label);
        edge.set_weight(self.weight);
        edge.set_belief(self.belief);
        edge.set_provenance(self.provenance);
        edge.set_probability(self.probability);
        edge.set_style(self.style);
        *edge.extra_mut() = self.extra;
        Ok(edge)
    }
}

/// Model-level result of decoding a canvas document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedCanvas {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub scenario_id: Option<ScenarioId>,
}

pub fn encode_canvas(
    canvas: &Canvas,
    scenario_id: Option<&ScenarioId>,
) -> Result<String, SnapshotError> {
    let document = CanvasDocument {
        nodes: canvas.nodes().iter().map(NodeRecord::from_node).collect(),
        edges: canvas.edges().iter().map(EdgeRecord::from_edge).collect(),
        scenario_id: scenario_id.map(|id| id.as_str().to_owned()),
    };
    serde_json::to_string_pretty(&document).map_err(|source| SnapshotError::Json { source })
}

pub fn decode_canvas(text: &str) -> Result<DecodedCanvas, SnapshotError> {
    let document: CanvasDocument =
        serde_json::from_str(text).map_err(|source| SnapshotError::Json { source })?;

    let nodes = document
        .nodes
        .into_iter()
        .map(NodeRecord::into_node)
        .collect::<Result<Vec<_>, _>>()?;
    let edges = document
        .edges
        .into_iter()
        .map(EdgeRecord::into_edge)
        .collect::<Result<Vec<_>, _>>()?;
    let scenario_id = document
        .scenario_id
        .map(|raw| {
            ScenarioId::new(raw.clone()).map_err(|source| SnapshotError::InvalidId {
                field: "scenario id",
                value: raw,
                source: Box::new(source),
            })
        })
        .transpose()?;

    Ok(DecodedCanvas {
        nodes,
        edges,
        scenario_id,
    })
}

#[derive(Debug)]
pub enum SnapshotError {
    Json {
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: Box<IdError>,
    },
    UnknownNodeKind {
        source: ParseNodeKindError,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "canvas document json error: {source}"),
            Self::InvalidId {
                field,
                value,
                source,
            } => write!(f, "invalid id for {field}: {value:?}: {source}"),
            Self::UnknownNodeKind { source } => {
                write!(f, "invalid node kind in canvas document: {source}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::UnknownNodeKind { source } => Some(source),
        }
    }
}

/// Opaque key/value storage collaborator for snapshots.
///
/// Hosts back this with whatever they have (browser storage, a file, a
/// test map). The engine treats sink failures as best-effort where
/// documented, so implementations may fail freely (quota, blocked
/// storage).
pub trait SnapshotSink {
    fn put(&mut self, key: &str, value: &str) -> Result<(), SinkError>;
    fn get(&self, key: &str) -> Result<Option<String>, SinkError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError {
    message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SinkError {}

/// In-memory sink, used by tests and headless hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    entries: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotSink for MemorySink {
    fn put(&mut self, key: &str, value: &str) -> Result<(), SinkError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, SinkError> {
        Ok(self.entries.get(key).cloned())
    }
}
