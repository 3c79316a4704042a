pub mod animation;
pub mod color;
pub mod node;
pub mod sprite;

pub use animation::Animation;
pub use color::Color;
pub use node::{Animatable, FrameDisplayable, Node, NodeId};
pub use sprite::{AtlasId, SpriteState};
