//! Animation definitions for sprite frame sequences.
//!
//! An [`Animation`] is pure data: the ordered frames, how long each one is
//! shown, and how many times the sequence loops. Playback is driven by
//! `AnimateAction`, which maps normalized action time onto a frame index.

use serde::{Deserialize, Serialize};

/// Definition of a frame sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Frame indices in display order.
    pub frames: Vec<u32>,
    /// Seconds each frame is shown.
    pub frame_duration: f32,
    /// How many times the sequence plays (minimum 1).
    #[serde(default = "default_loops")]
    pub loops: u32,
    /// Whether stopping playback restores the frame shown before it started.
    #[serde(default)]
    pub restore_original_frame: bool,
}

fn default_loops() -> u32 {
    1
}

impl Animation {
    /// Create from an explicit frame list at the given frame rate.
    pub fn from_frames(frames: Vec<u32>, fps: f32) -> Self {
        Self {
            frames,
            frame_duration: 1.0 / fps,
            loops: 1,
            restore_original_frame: false,
        }
    }

    /// Create from a consecutive run of frames (a strip in the atlas).
    pub fn strip(start: u32, count: u32, fps: f32) -> Self {
        Self::from_frames((start..start + count).collect(), fps)
    }

    /// Parse a definition from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_loops(mut self, loops: u32) -> Self {
        self.loops = loops.max(1);
        self
    }

    pub fn restoring_original_frame(mut self) -> Self {
        self.restore_original_frame = true;
        self
    }

    /// Number of frames in one pass of the sequence.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Duration of the whole animation including loops.
    pub fn total_duration(&self) -> f32 {
        self.frame_duration * self.frames.len() as f32 * self.loops.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_generates_consecutive_frames() {
        let anim = Animation::strip(4, 3, 10.0);
        assert_eq!(anim.frames, vec![4, 5, 6]);
        assert!((anim.frame_duration - 0.1).abs() < 1e-6);
    }

    #[test]
    fn total_duration_includes_loops() {
        let anim = Animation::strip(0, 4, 10.0).with_loops(3);
        assert!((anim.total_duration() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn parses_from_json() {
        let anim = Animation::from_json(
            r#"{ "frames": [0, 1, 2], "frame_duration": 0.25, "restore_original_frame": true }"#,
        )
        .unwrap();
        assert_eq!(anim.frame_count(), 3);
        assert_eq!(anim.loops, 1);
        assert!(anim.restore_original_frame);
    }
}
