use glam::Vec2;

use crate::components::color::Color;
use crate::components::sprite::SpriteState;

/// Unique node identifier, assigned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeId(pub u32);

/// The property set an action can drive on its target.
///
/// Position and scale are world-space, rotation is in degrees, alpha is
/// opacity in [0.0, 1.0]. Frame display is an optional capability: targets
/// without one return `None` and frame-driving actions refuse to bind to
/// them at init time rather than failing mid-playback.
pub trait Animatable {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);

    fn rotation(&self) -> f32;
    fn set_rotation(&mut self, degrees: f32);

    fn scale(&self) -> Vec2;
    fn set_scale(&mut self, scale: Vec2);

    fn alpha(&self) -> f32;
    fn set_alpha(&mut self, alpha: f32);

    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);

    /// Frame capability, if this target can display sprite frames.
    fn frame_display(&mut self) -> Option<&mut dyn FrameDisplayable> {
        None
    }
}

/// Capability for targets that can show one frame of a sprite sequence.
pub trait FrameDisplayable {
    fn current_frame(&self) -> u32;
    fn set_current_frame(&mut self, frame: u32);
}

impl FrameDisplayable for SpriteState {
    fn current_frame(&self) -> u32 {
        self.frame
    }

    fn set_current_frame(&mut self, frame: u32) {
        self.frame = frame;
    }
}

/// Fat node — a single struct with optional components.
/// Designed for simplicity and rapid prototyping over ECS purity.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Whether this node is drawn.
    pub visible: bool,
    /// Position in world space.
    pub pos: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Scale per axis (1.0 = natural size).
    pub scale: Vec2,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Tint color applied when rendering.
    pub color: Color,
    /// Sprite state (optional — nodes without one cannot display frames).
    pub sprite: Option<SpriteState>,
}

impl Node {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            alpha: 1.0,
            color: Color::WHITE,
            sprite: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteState) -> Self {
        self.sprite = Some(sprite);
        self
    }
}

impl Animatable for Node {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    fn scale(&self) -> Vec2 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn frame_display(&mut self) -> Option<&mut dyn FrameDisplayable> {
        self.sprite
            .as_mut()
            .map(|s| s as &mut dyn FrameDisplayable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::sprite::AtlasId;

    #[test]
    fn builder_sets_fields() {
        let n = Node::new(NodeId(3))
            .with_tag("hero")
            .with_pos(Vec2::new(10.0, 20.0))
            .with_rotation(45.0)
            .with_alpha(0.5);
        assert_eq!(n.tag, "hero");
        assert_eq!(n.pos, Vec2::new(10.0, 20.0));
        assert_eq!(n.rotation, 45.0);
        assert_eq!(n.alpha, 0.5);
    }

    #[test]
    fn frame_display_requires_a_sprite() {
        let mut bare = Node::new(NodeId(1));
        assert!(bare.frame_display().is_none());

        let mut with_sprite =
            Node::new(NodeId(2)).with_sprite(SpriteState::new(AtlasId(0)).with_frame(4));
        let fd = with_sprite.frame_display().unwrap();
        assert_eq!(fd.current_frame(), 4);
        fd.set_current_frame(7);
        assert_eq!(with_sprite.sprite.unwrap().frame, 7);
    }
}
