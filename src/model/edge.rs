// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde_json::Value;

use super::ids::{EdgeId, NodeId};

/// A directed connection between two nodes.
///
/// The engine does not enforce referential integrity: source/target may
/// reference ids that are not (or no longer) present, and multiple edges
/// between the same ordered pair are allowed. Validation is a concern of
/// layers above the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    edge_id: EdgeId,
    source: NodeId,
    target: NodeId,
    label: Option<String>,
    weight: Option<f64>,
    belief: Option<f64>,
    provenance: Option<String>,
    probability: Option<String>,
    style: Option<String>,
    extra: BTreeMap<String, Value>,
}

impl Edge {
    pub fn new(edge_id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self {
            edge_id,
            source,
            target,
            label: None,
            weight: None,
            belief: None,
            provenance: None,
            probability: None,
            style: None,
            extra: BTreeMap::new(),
        }
    }

    /// Clone of this edge under a different id and endpoint pair, payload
    /// included.
    pub fn cloned_as(&self, edge_id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self {
            edge_id,
            source,
            target,
            label: self.label.clone(),
            weight: self.weight,
            belief: self.belief,
            provenance: self.provenance.clone(),
            probability: self.probability.clone(),
            style: self.style.clone(),
            extra: self.extra.clone(),
        }
    }

    pub fn edge_id(&self) -> &EdgeId {
        &self.edge_id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn set_source(&mut self, source: NodeId) {
        self.source = source;
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn set_target(&mut self, target: NodeId) {
        self.target = target;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn set_weight(&mut self, weight: Option<f64>) {
        self.weight = weight;
    }

    /// Confidence scalar; callers keep it in `[0, 1]`, the engine does not
    /// clamp.
    pub fn belief(&self) -> Option<f64> {
        self.belief
    }

    pub fn set_belief(&mut self, belief: Option<f64>) {
        self.belief = belief;
    }

    pub fn provenance(&self) -> Option<&str> {
        self.provenance.as_deref()
    }

    pub fn set_provenance<T: Into<String>>(&mut self, provenance: Option<T>) {
        self.provenance = provenance.map(Into::into);
    }

    pub fn probability(&self) -> Option<&str> {
        self.probability.as_deref()
    }

    pub fn set_probability<T: Into<String>>(&mut self, probability: Option<T>) {
        self.probability = probability.map(Into::into);
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn set_style<T: Into<String>>(&mut self, style: Option<T>) {
        self.style = style.map(Into::into);
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut BTreeMap<String, Value> {
        &mut self.extra
    }
}

#[cfg(test)]
mod tests {
    use super::Edge;
    use crate::model::{EdgeId, NodeId};

    fn edge(id: &str, source: &str, target: &str) -> Edge {
        Edge::new(
            EdgeId::new(id).expect("edge id"),
            NodeId::new(source).expect("source id"),
            NodeId::new(target).expect("target id"),
        )
    }

    #[test]
    fn edge_starts_with_empty_payload() {
        let edge = edge("e1", "1", "2");

        assert_eq!(edge.edge_id().as_str(), "e1");
        assert_eq!(edge.source().as_str(), "1");
        assert_eq!(edge.target().as_str(), "2");
        assert_eq!(edge.label(), None);
        assert_eq!(edge.weight(), None);
        assert_eq!(edge.belief(), None);
        assert_eq!(edge.provenance(), None);
        assert_eq!(edge.probability(), None);
        assert_eq!(edge.style(), None);
        assert!(edge.extra().is_empty());
    }

    #[test]
    fn edge_payload_fields_update_independently() {
        let mut edge = edge("e1", "1", "2");

        edge.set_label(Some("supports"));
        edge.set_weight(Some(2.0));
        edge.set_belief(Some(0.8));
        edge.set_probability(Some("likely"));

        assert_eq!(edge.label(), Some("supports"));
        assert_eq!(edge.weight(), Some(2.0));
        assert_eq!(edge.belief(), Some(0.8));
        assert_eq!(edge.probability(), Some("likely"));
        assert_eq!(edge.style(), None);

        edge.set_label::<&str>(None);
        assert_eq!(edge.label(), None);
        assert_eq!(edge.weight(), Some(2.0));
    }

    #[test]
    fn cloned_as_remaps_endpoints_and_keeps_payload() {
        let mut original = edge("e1", "1", "2");
        original.set_belief(Some(0.4));
        original.set_style(Some("dashed"));

        let copy = original.cloned_as(
            EdgeId::new("e7").expect("edge id"),
            NodeId::new("10").expect("source id"),
            NodeId::new("11").expect("target id"),
        );

        assert_eq!(copy.edge_id().as_str(), "e7");
        assert_eq!(copy.source().as_str(), "10");
        assert_eq!(copy.target().as_str(), "11");
        assert_eq!(copy.belief(), Some(0.4));
        assert_eq!(copy.style(), Some("dashed"));
    }
}
