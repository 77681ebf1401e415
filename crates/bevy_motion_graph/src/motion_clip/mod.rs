pub mod loader;
pub mod serial;

use bevy::{
    asset::{Asset, ReflectAsset},
    reflect::Reflect,
};

/// Read-only view of a source motion clip: everything graph construction
/// needs to know about it.
pub trait Motion {
    fn label(&self) -> &str;
    fn frame_count(&self) -> usize;
}

/// A source animation sequence, reduced to the label and frame count the
/// motion graph consumes.
///
/// Defined in `*.clip.ron` files; the actual animation data stays with the
/// playback system. The label identifies the clip in graph files and in the
/// relations reported by an error map, so it must be unique within a motion
/// set and must not contain whitespace.
#[derive(Asset, Reflect, Debug, Clone, PartialEq, Eq, Default)]
#[reflect(Asset)]
pub struct MotionClip {
    pub label: String,
    pub frame_count: usize,
}

impl MotionClip {
    pub fn new(label: impl Into<String>, frame_count: usize) -> Self {
        Self {
            label: label.into(),
            frame_count,
        }
    }
}

impl Motion for MotionClip {
    fn label(&self) -> &str {
        &self.label
    }

    fn frame_count(&self) -> usize {
        self.frame_count
    }
}
