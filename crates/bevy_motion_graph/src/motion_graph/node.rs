use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

/// Identifies a node within a [`MotionGraph`](super::MotionGraph).
///
/// Ids are assigned in creation order, are never reused, and double as the
/// node's position in the graph's node arena.
#[derive(
    Reflect,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
pub struct NodeId(pub usize);

/// A directed link to another node of the same graph.
#[derive(Reflect, Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    /// Similarity error of the transition this edge represents, when the
    /// error map supplies one. Chain edges within a single motion carry no
    /// error.
    pub error: Option<f32>,
}

impl Edge {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            error: None,
        }
    }

    pub fn with_error(target: NodeId, error: f32) -> Self {
        Self {
            target,
            error: Some(error),
        }
    }
}

/// One specific frame of one specific motion, plus its outgoing edges.
#[derive(Reflect, Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub motion: usize,
    pub frame: usize,
    /// Cached label of the owning motion, kept in sync whenever the node's
    /// motion assignment changes.
    pub label: String,
    pub edges: Vec<Edge>,
}

impl Node {
    pub(crate) fn new(id: NodeId, motion: usize, frame: usize, label: impl Into<String>) -> Self {
        Self {
            id,
            motion,
            frame,
            label: label.into(),
            edges: Vec::new(),
        }
    }

    /// Re-tags the node with a motion assignment, keeping the cached label in
    /// sync.
    pub(crate) fn set_motion(&mut self, motion: usize, frame: usize, label: &str) {
        self.motion = motion;
        self.frame = frame;
        if self.label != label {
            self.label = label.to_owned();
        }
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
