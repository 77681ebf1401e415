use bevy::reflect::Reflect;

use super::node::NodeId;

/// Per-motion, per-frame table mapping `(motion, frame)` to the node created
/// for that frame, if any.
///
/// The table is rectangular: every motion row spans the maximum frame count
/// over all motions, and slots past a shorter motion's end are simply never
/// queried for it. Allocated once per construction pass, never shrunk.
#[derive(Reflect, Debug, Clone, Default)]
pub struct FrameIndex {
    slots: Vec<Vec<Option<NodeId>>>,
}

impl FrameIndex {
    pub fn new(motion_count: usize, max_frames: usize) -> Self {
        Self {
            slots: vec![vec![None; max_frames]; motion_count],
        }
    }

    pub fn motion_count(&self) -> usize {
        self.slots.len()
    }

    pub fn max_frames(&self) -> usize {
        self.slots.first().map(Vec::len).unwrap_or(0)
    }

    /// Node registered for `(motion, frame)`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `motion` or `frame` is outside the allocated table. An
    /// out-of-range query is a caller bug, not a runtime condition.
    pub fn lookup(&self, motion: usize, frame: usize) -> Option<NodeId> {
        let row = self.row(motion);
        assert!(
            frame < row.len(),
            "frame index out of range: {frame}/{}",
            row.len()
        );
        row[frame]
    }

    /// Registers `node` for `(motion, frame)`, overwriting any previous
    /// assignment. Same bounds contract as [`FrameIndex::lookup`].
    pub fn assign(&mut self, motion: usize, frame: usize, node: NodeId) {
        let count = self.slots.len();
        assert!(motion < count, "motion index out of range: {motion}/{count}");
        let row = &mut self.slots[motion];
        assert!(
            frame < row.len(),
            "frame index out of range: {frame}/{}",
            row.len()
        );
        row[frame] = Some(node);
    }

    fn row(&self, motion: usize) -> &[Option<NodeId>] {
        assert!(
            motion < self.slots.len(),
            "motion index out of range: {motion}/{}",
            self.slots.len()
        );
        &self.slots[motion]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_index_is_empty() {
        let index = FrameIndex::new(2, 5);

        assert_eq!(index.motion_count(), 2);
        assert_eq!(index.max_frames(), 5);
        for motion in 0..2 {
            for frame in 0..5 {
                assert_eq!(index.lookup(motion, frame), None);
            }
        }
    }

    #[test]
    fn test_assign_overwrites_slot() {
        let mut index = FrameIndex::new(1, 3);

        index.assign(0, 2, NodeId(0));
        assert_eq!(index.lookup(0, 2), Some(NodeId(0)));

        index.assign(0, 2, NodeId(7));
        assert_eq!(index.lookup(0, 2), Some(NodeId(7)));
    }

    #[test]
    #[should_panic(expected = "motion index out of range")]
    fn test_lookup_motion_out_of_range() {
        let index = FrameIndex::new(1, 3);
        index.lookup(1, 0);
    }

    #[test]
    #[should_panic(expected = "frame index out of range")]
    fn test_lookup_frame_out_of_range() {
        let index = FrameIndex::new(1, 3);
        index.lookup(0, 3);
    }

    #[test]
    #[should_panic(expected = "motion index out of range")]
    fn test_assign_motion_out_of_range() {
        let mut index = FrameIndex::new(1, 3);
        index.assign(2, 0, NodeId(0));
    }
}
