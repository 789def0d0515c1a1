//! Geometry and drag core for a draggable step connector between two
//! anchors of a node-link diagram.

pub mod config;
pub mod edge;
pub mod error;
pub mod model;
pub mod render;
pub mod store;
pub mod svg;
pub mod geometry {
    pub mod smooth_step;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod curvature;
    pub mod drag;
    pub mod resting;
}

pub use config::{EdgeConfig, OvershootMetric, Theme};
pub use edge::{EdgeVisual, EdgeVisualState, UpdateOutcome};
pub use error::{EdgeError, Result};
pub use model::{AnchorPair, EdgeRecord, PathDescription, PathSegment, Point, Position};
pub use render::{DragHandle, RenderFrame, StrokePath};
pub use store::{DiagramStore, MemoryStore};
