use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

/// A frame pair reported by an error map: one candidate point where playback
/// may switch between the two motions of a relation.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FramePair {
    pub frame_a: usize,
    pub frame_b: usize,
    /// Similarity error for this pair, when the analysis computes one.
    pub error: Option<f32>,
}

impl FramePair {
    pub fn new(frame_a: usize, frame_b: usize) -> Self {
        Self {
            frame_a,
            frame_b,
            error: None,
        }
    }

    pub fn with_error(frame_a: usize, frame_b: usize, error: f32) -> Self {
        Self {
            frame_a,
            frame_b,
            error: Some(error),
        }
    }
}

/// Output interface of a pose-similarity analysis over a motion set.
///
/// A relation pairs two motions (by label) that contain similar poses; its
/// frame pairs are the candidate transition points between them. How the
/// analysis arrives at these (similarity threshold, window minima, how many
/// candidates it keeps) is up to the implementation; graph construction only
/// consumes the result.
pub trait ErrorMap {
    fn relation_count(&self) -> usize;
    /// Labels of the two motions paired by `relation`.
    fn relation_labels(&self, relation: usize) -> (&str, &str);
    /// Candidate transition frame pairs for `relation`, in reported order.
    fn minimal_frame_pairs(&self, relation: usize) -> &[FramePair];
}

#[derive(Debug, Clone)]
struct Relation {
    label_a: String,
    label_b: String,
    pairs: Vec<FramePair>,
}

/// Plain-data [`ErrorMap`]: relations and frame pairs recorded up front.
///
/// Useful for precomputed similarity data and for tests. A step count, if
/// set, caps how many frame pairs are kept per relation, matching analyses
/// that report at most a fixed number of blend candidates.
#[derive(Debug, Clone, Default)]
pub struct TransitionCandidates {
    step_count: Option<usize>,
    relations: Vec<Relation>,
}

impl TransitionCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step_count(step_count: usize) -> Self {
        Self {
            step_count: Some(step_count),
            relations: Vec::new(),
        }
    }

    pub fn add_relation(
        &mut self,
        label_a: impl Into<String>,
        label_b: impl Into<String>,
        mut pairs: Vec<FramePair>,
    ) {
        if let Some(cap) = self.step_count {
            pairs.truncate(cap);
        }
        self.relations.push(Relation {
            label_a: label_a.into(),
            label_b: label_b.into(),
            pairs,
        });
    }
}

impl ErrorMap for TransitionCandidates {
    fn relation_count(&self) -> usize {
        self.relations.len()
    }

    fn relation_labels(&self, relation: usize) -> (&str, &str) {
        let relation = &self.relations[relation];
        (&relation.label_a, &relation.label_b)
    }

    fn minimal_frame_pairs(&self, relation: usize) -> &[FramePair] {
        &self.relations[relation].pairs
    }
}
