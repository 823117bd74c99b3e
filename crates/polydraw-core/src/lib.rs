//! PolyDraw Core Library
//!
//! Platform-agnostic shapes, camera projection and interaction state for the
//! PolyDraw polygon tool.

pub mod camera;
pub mod controller;
pub mod input;
pub mod scene;
pub mod shapes;

pub use camera::{OrthographicCamera, ViewConfig, client_to_ndc, client_to_world};
pub use controller::{InteractionState, SceneController};
pub use input::{Command, InputState, MouseButton, PointerEvent};
pub use scene::{SceneGraph, SceneNode};
pub use shapes::{MarkerStyle, NodeId, PolygonStyle, Renderable, Shape, ShapeId, VertexMarker};
