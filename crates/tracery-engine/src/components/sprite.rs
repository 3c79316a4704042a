/// Identifies which texture atlas a sprite's frames come from.
/// Index into the surrounding layer's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// Sprite state — the frame-displayable part of a node.
///
/// Frames are linear indices into the atlas; an [`Animation`] definition maps
/// playback time onto them.
///
/// [`Animation`]: crate::components::Animation
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteState {
    /// Which atlas this sprite's frames belong to.
    pub atlas: AtlasId,
    /// Currently displayed frame index.
    pub frame: u32,
}

impl SpriteState {
    pub fn new(atlas: AtlasId) -> Self {
        Self { atlas, frame: 0 }
    }

    pub fn with_frame(mut self, frame: u32) -> Self {
        self.frame = frame;
        self
    }
}

impl Default for SpriteState {
    fn default() -> Self {
        Self::new(AtlasId(0))
    }
}
