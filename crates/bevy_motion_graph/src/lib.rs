//! # Bevy Motion Graph
//!
//! **Bevy Motion Graph** builds directed motion graphs for [Bevy](https://bevyengine.org/).
//!
//! ## Introduction
//!
//! A motion graph stitches a set of independent motion clips into one
//! traversable structure. Each node pins a specific frame of a specific clip;
//! edges within a clip chain its frames in playback order, and cross-clip
//! edges mark frames where two clips pass through similar enough poses that a
//! character controller may jump from one clip into the other. Deciding
//! *which* frame pairs are similar is delegated to a pose-similarity analysis
//! behind the [`ErrorMap`] trait; this crate is concerned with turning its
//! output into a correctly spliced graph and persisting the result.
//!
//! There are two kinds of assets introduced by this library:
//! - [`MotionClip`], defined in `*.clip.ron` files. A clip is consumed purely
//!   through its label and frame count; the actual animation data lives
//!   wherever your playback system keeps it. For example:
//!   ```ron
//!   (
//!       label: "Walk",
//!       frame_count: 120,
//!   )
//!   ```
//! - [`MotionGraph`], defined in `*.mograph.txt` files. This is the
//!   constructed graph in a line-oriented text format:
//!   ```text
//!   # Graph Version 0.1
//!   MotionNum 2
//!   MotionLabel Walk frameNum 5
//!   MotionLabel Run frameNum 4
//!   MotionName Walk frame 0
//!   MotionName Walk frame 4
//!   MotionName Run frame 0
//!   MotionName Run frame 3
//!   MotionLink 0 1 1
//!   MotionLink 1 0
//!   MotionLink 2 1 3
//!   MotionLink 3 0
//!   ```
//!
//! Graphs can also be built directly:
//!
//! ```
//! use bevy_motion_graph::prelude::*;
//!
//! let clips = vec![MotionClip::new("Walk", 120), MotionClip::new("Run", 90)];
//!
//! // Normally produced by a pose-similarity analysis.
//! let mut candidates = TransitionCandidates::with_step_count(10);
//! candidates.add_relation("Walk", "Run", vec![FramePair::new(40, 20)]);
//!
//! let graph = MotionGraph::construct(&clips, &candidates).unwrap();
//! assert_eq!(graph.node_count(), 6);
//! assert!(graph.has_transition(0, 40));
//!
//! let mut out = Vec::new();
//! graph.write_to(&mut out).unwrap();
//! ```
//!
//! Construction is single-threaded and synchronous; a graph is built in one
//! pass and is immutable from the point of view of traversal afterwards.
//!
//! [`ErrorMap`]: crate::error_map::ErrorMap
//! [`MotionClip`]: crate::motion_clip::MotionClip
//! [`MotionGraph`]: crate::motion_graph::MotionGraph

pub mod error_map;
pub mod errors;
pub mod motion_clip;
pub mod motion_graph;
pub mod plugin;

pub mod prelude {
    pub use super::error_map::{ErrorMap, FramePair, TransitionCandidates};
    pub use super::motion_clip::{Motion, MotionClip};
    pub use super::motion_graph::{
        Edge, FrameIndex, GraphCursor, MotionGraph, MotionInfo, Node, NodeId,
    };
    pub use super::plugin::MotionGraphPlugin;
}
