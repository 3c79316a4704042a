pub mod action;
pub mod components;
pub mod core;
pub mod math;
pub mod path;

// Re-export key types at crate root for convenience
pub use action::{
    build_action, Action, ActionChain, ActionInfo, ActionInitializer, ActionManager, ActionState,
    ActionValue, AlphaAction, AnimateAction, Curve, Interpolator, JumpAction, MoveAction,
    NodeProperty, PathAction, PropertyAction, RotateAction, ScaleAction, SequenceAction, Timing,
    TintAction,
};
pub use components::{
    Animatable, Animation, AtlasId, Color, FrameDisplayable, Node, NodeId, SpriteState,
};
pub use core::{EngineError, EngineResult, Scene};
pub use path::{
    stroke_geometry, ArcSegment, Cap, CardinalSplineSegment, CubicSegment, Join, LineSegment,
    Path, QuadraticSegment, Segment, StrokeAttributes, Subpath,
};

#[cfg(feature = "fill")]
pub use path::{GeometryVertex, Tessellator};
