use serde::{Deserialize, Serialize};

use super::MotionClip;

#[derive(Serialize, Deserialize, Clone)]
pub struct MotionClipSerial {
    pub label: String,
    pub frame_count: usize,
}

impl From<&MotionClip> for MotionClipSerial {
    fn from(value: &MotionClip) -> Self {
        Self {
            label: value.label.clone(),
            frame_count: value.frame_count,
        }
    }
}

impl From<MotionClipSerial> for MotionClip {
    fn from(value: MotionClipSerial) -> Self {
        Self {
            label: value.label,
            frame_count: value.frame_count,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clip_from_ron() {
        let serial: MotionClipSerial =
            ron::de::from_str("(label: \"Walk\", frame_count: 120)").unwrap();
        let clip: MotionClip = serial.into();

        assert_eq!(clip, MotionClip::new("Walk", 120));
    }
}
