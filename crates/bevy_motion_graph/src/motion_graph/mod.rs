pub mod frame_index;
pub mod loader;
pub mod node;
pub mod serial;

use std::collections::BTreeMap;

use bevy::{
    asset::{Asset, ReflectAsset},
    log::{debug, warn},
    reflect::Reflect,
};
use serde::{Deserialize, Serialize};

pub use frame_index::FrameIndex;
pub use node::{Edge, Node, NodeId};

use crate::{error_map::ErrorMap, errors::GraphValidationError, motion_clip::Motion};

/// Label and length of one source motion, recorded at seeding time so that
/// serialization and label resolution need no access to the original clips.
#[derive(Reflect, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionInfo {
    pub label: String,
    pub frame_count: usize,
}

/// Snapshot of a frame query, for a visualization layer to highlight.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphCursor {
    pub motion: usize,
    pub frame: usize,
    pub node: Option<NodeId>,
}

/// Directed graph over the frames of a motion set.
///
/// Nodes live in an append-only arena and are addressed by [`NodeId`]; edges
/// store target ids, never references. Within one motion the nodes form a
/// single chain ordered by frame, seeded as one coarse edge from frame 0 to
/// the last frame and refined by splicing transition nodes into it. Cross-
/// motion edges are added only by [`MotionGraph::build_transitions`].
#[derive(Asset, Reflect, Debug, Clone, Default)]
#[reflect(Asset)]
pub struct MotionGraph {
    nodes: Vec<Node>,
    motions: Vec<MotionInfo>,
    frame_index: FrameIndex,
    /// Frame-ordered chain membership per motion. A node appears here once it
    /// is linked into its motion's chain; nodes created but not yet spliced
    /// are absent.
    chains: Vec<BTreeMap<usize, NodeId>>,
}

impl MotionGraph {
    /// Seeds a graph from a motion set: two endpoint nodes and one coarse
    /// edge per motion.
    ///
    /// An empty motion set yields an empty graph. A motion with zero frames
    /// is rejected.
    pub fn from_motions<M: Motion>(motions: &[M]) -> Result<Self, GraphValidationError> {
        let mut graph = Self::default();
        if motions.is_empty() {
            return Ok(graph);
        }

        if let Some(empty) = motions.iter().find(|m| m.frame_count() == 0) {
            return Err(GraphValidationError::EmptyMotion {
                label: empty.label().to_owned(),
            });
        }

        let max_frames = motions.iter().map(Motion::frame_count).max().unwrap_or(0);
        graph.frame_index = FrameIndex::new(motions.len(), max_frames);
        graph.chains = vec![BTreeMap::new(); motions.len()];

        for (i, m) in motions.iter().enumerate() {
            let last = m.frame_count() - 1;

            let n1 = graph.add_node(i, 0, m.label());
            let n2 = graph.add_node(i, last, m.label());
            graph.nodes[n1.0].add_edge(Edge::new(n2));

            graph.frame_index.assign(i, 0, n1);
            graph.frame_index.assign(i, last, n2);
            graph.chains[i].insert(0, n1);
            graph.chains[i].insert(last, n2);

            graph.motions.push(MotionInfo {
                label: m.label().to_owned(),
                frame_count: m.frame_count(),
            });
        }

        debug!(
            "seeded motion graph: {} motions, {} nodes",
            graph.motions.len(),
            graph.nodes.len()
        );
        Ok(graph)
    }

    /// Seeds a graph and inserts every transition reported by `map`.
    pub fn construct<M: Motion>(
        motions: &[M],
        map: &impl ErrorMap,
    ) -> Result<Self, GraphValidationError> {
        let mut graph = Self::from_motions(motions)?;
        graph.build_transitions(map);
        Ok(graph)
    }

    /// Inserts a transition node pair for every frame pair reported by `map`,
    /// splicing each node into its motion's chain and joining the two with a
    /// cross-motion edge.
    ///
    /// Relations whose labels match no seeded motion are skipped.
    pub fn build_transitions(&mut self, map: &impl ErrorMap) {
        for relation in 0..map.relation_count() {
            let (label_a, label_b) = map.relation_labels(relation);
            let (Some(motion_a), Some(motion_b)) =
                (self.motion_index(label_a), self.motion_index(label_b))
            else {
                warn!("skipping relation {label_a:?} -> {label_b:?}: unknown motion label");
                continue;
            };

            for (ordinal, pair) in map.minimal_frame_pairs(relation).iter().enumerate() {
                let node_a = self.resolve_node(motion_a, pair.frame_a);
                let node_b = self.resolve_node(motion_b, pair.frame_b);
                self.insert_transition(
                    node_a,
                    motion_a,
                    pair.frame_a,
                    node_b,
                    motion_b,
                    pair.frame_b,
                    pair.error,
                    ordinal,
                );
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph; an out-of-range id is a
    /// caller bug.
    pub fn node(&self, id: NodeId) -> &Node {
        assert!(
            id.0 < self.nodes.len(),
            "can't find the node index: {}/{}",
            id.0,
            self.nodes.len()
        );
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Motion table recorded at seeding (or load) time, in motion order.
    pub fn motions(&self) -> &[MotionInfo] {
        &self.motions
    }

    pub fn frame_index(&self) -> &FrameIndex {
        &self.frame_index
    }

    /// True if `(motion, frame)` holds a transition point a traversal can
    /// branch through.
    ///
    /// A node stored at id 0 is not reported; existing graph consumers depend
    /// on that.
    pub fn has_transition(&self, motion: usize, frame: usize) -> bool {
        matches!(self.frame_index.lookup(motion, frame), Some(id) if id.0 > 0)
    }

    /// Node registered at `(motion, frame)`, if any. Bounds contract as in
    /// [`FrameIndex::lookup`].
    pub fn node_id_at(&self, motion: usize, frame: usize) -> Option<NodeId> {
        self.frame_index.lookup(motion, frame)
    }

    /// Frame query packaged for a visualization layer, which keeps the cursor
    /// itself rather than the graph tracking it.
    pub fn cursor_at(&self, motion: usize, frame: usize) -> GraphCursor {
        GraphCursor {
            motion,
            frame,
            node: self.frame_index.lookup(motion, frame),
        }
    }

    fn motion_index(&self, label: &str) -> Option<usize> {
        self.motions.iter().position(|m| m.label == label)
    }

    fn add_node(&mut self, motion: usize, frame: usize, label: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, motion, frame, label));
        id
    }

    /// Node registered for `(motion, frame)`, creating and registering a
    /// fresh one if the slot is empty or holds an id no node carries.
    fn resolve_node(&mut self, motion: usize, frame: usize) -> NodeId {
        match self.frame_index.lookup(motion, frame) {
            Some(id) if id.0 < self.nodes.len() => id,
            _ => {
                let label = self.motions[motion].label.clone();
                let id = self.add_node(motion, frame, &label);
                self.frame_index.assign(motion, frame, id);
                id
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_transition(
        &mut self,
        node_a: NodeId,
        motion_a: usize,
        frame_a: usize,
        node_b: NodeId,
        motion_b: usize,
        frame_b: usize,
        error: Option<f32>,
        ordinal: usize,
    ) {
        let label_a = self.motions[motion_a].label.clone();
        let label_b = self.motions[motion_b].label.clone();
        debug!("transition {label_a}_{label_b}_{ordinal}: {label_a}@{frame_a} -> {label_b}@{frame_b}");

        self.nodes[node_a.0].set_motion(motion_a, frame_a, &label_a);
        self.nodes[node_b.0].set_motion(motion_b, frame_b, &label_b);

        self.splice_into_chain(node_a);
        self.splice_into_chain(node_b);

        // No cycle edges within a single motion.
        if motion_a != motion_b {
            self.nodes[node_a.0].add_edge(Edge { target: node_b, error });
        }
    }

    /// Links `node` into its motion's chain.
    ///
    /// The chain neighbors are the nodes at the greatest frame strictly below
    /// and the smallest frame strictly above `node`'s frame; every `pred ->
    /// succ` edge between them is redirected through `node`, so `pred -> node
    /// -> succ` replaces `pred -> succ` and traversal stays monotonic in
    /// frame order. A node already sitting on the chain (seeded endpoints,
    /// repeated insertions at the same frame) is left alone.
    fn splice_into_chain(&mut self, node: NodeId) {
        let (motion, frame) = {
            let n = &self.nodes[node.0];
            (n.motion, n.frame)
        };

        let (pred, succ) = {
            let chain = &self.chains[motion];
            if chain.contains_key(&frame) {
                return;
            }
            let pred = chain.range(..frame).next_back().map(|(_, id)| *id);
            let succ = chain.range(frame + 1..).next().map(|(_, id)| *id);
            match (pred, succ) {
                (Some(pred), Some(succ)) => (pred, succ),
                _ => return,
            }
        };

        let mut relinked = 0;
        for edge in &mut self.nodes[pred.0].edges {
            if edge.target == succ {
                edge.target = node;
                relinked += 1;
            }
        }
        for _ in 0..relinked {
            self.nodes[node.0].add_edge(Edge::new(succ));
        }
        if relinked > 0 {
            self.chains[motion].insert(frame, node);
        }
    }
}
