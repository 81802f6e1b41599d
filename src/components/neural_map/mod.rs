mod animation;
mod component;
mod engine;
mod params;
mod render;
mod state;
mod types;

pub use component::NeuralMapCanvas;
pub use engine::{LoadStatus, NeuralMap, Surface};
pub use params::PhysicsParams;
pub use state::{Link, LoadSummary, NeuralMapState, Node, radius_for_level};
pub use types::{
	FALLBACK_STATUS_COLOR, GraphData, GraphLink, GraphNode, NeuralTreeResponse, NodeStatus,
};
