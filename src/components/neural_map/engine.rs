use log::{debug, warn};
use rand::Rng;

use super::params::PhysicsParams;
use super::state::{LoadSummary, NeuralMapState};
use super::types::GraphData;

/// Something the neural map can be drawn onto.
pub trait Surface {
	/// Drawing area in pixels, `(width, height)`.
	fn size(&self) -> (f64, f64);

	/// Paints one frame. Must not change `state`.
	fn draw(&self, state: &NeuralMapState);
}

/// Outcome of a load, for callers that want to tell the quiet paths apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
	/// The map has no surface; nothing was loaded.
	Inert,
	/// The graph has no nodes.
	Empty,
	/// The graph has at least one node.
	Loaded(LoadSummary),
}

struct Active<S> {
	surface: S,
	state: NeuralMapState,
}

/// Neural map layout engine bound to a drawing surface.
///
/// Built without a surface, the map is inert: every call is a no-op.
/// Otherwise it starts running and advances one step per [`NeuralMap::frame`].
pub struct NeuralMap<S> {
	active: Option<Active<S>>,
	running: bool,
}

impl<S: Surface> NeuralMap<S> {
	/// Binds a map to `surface`, or builds an inert map when there is none.
	pub fn new(surface: Option<S>, params: PhysicsParams) -> Self {
		let active = surface.map(|surface| {
			let (width, height) = surface.size();
			Active {
				state: NeuralMapState::new(width, height, params),
				surface,
			}
		});
		if active.is_none() {
			warn!("Neural map has no drawing surface, staying inert");
		}
		Self {
			running: active.is_some(),
			active,
		}
	}

	/// True when the map was built without a surface.
	pub fn is_inert(&self) -> bool {
		self.active.is_none()
	}

	/// True while frames advance the simulation.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Simulation state, absent for an inert map.
	pub fn state(&self) -> Option<&NeuralMapState> {
		self.active.as_ref().map(|a| &a.state)
	}

	/// Replaces the graph with `data`.
	pub fn load(&mut self, data: &GraphData) -> LoadStatus {
		self.load_with_rng(data, &mut rand::thread_rng())
	}

	/// [`NeuralMap::load`] with a caller-supplied source of initial scatter.
	pub fn load_with_rng<R: Rng>(&mut self, data: &GraphData, rng: &mut R) -> LoadStatus {
		let Some(active) = self.active.as_mut() else {
			return LoadStatus::Inert;
		};
		let summary = active.state.load_with_rng(data, rng);
		if summary.nodes == 0 {
			LoadStatus::Empty
		} else {
			LoadStatus::Loaded(summary)
		}
	}

	/// Loads a neural tree from JSON. Text that is not a tree loads an empty
	/// graph.
	pub fn load_json(&mut self, text: &str) -> LoadStatus {
		let data = GraphData::from_json(text).unwrap_or_else(|e| {
			warn!("Ignoring neural tree: {}", e);
			GraphData::default()
		});
		self.load(&data)
	}

	/// Resumes stepping. Does nothing on an inert map.
	pub fn start(&mut self) {
		if self.active.is_some() && !self.running {
			debug!("Neural map started");
			self.running = true;
		}
	}

	/// Freezes the layout until the next [`NeuralMap::start`].
	pub fn stop(&mut self) {
		if self.running {
			debug!("Neural map stopped");
			self.running = false;
		}
	}

	/// Runs one step and one draw. Returns whether another frame is wanted.
	pub fn frame(&mut self) -> bool {
		let Some(active) = self.active.as_mut() else {
			return false;
		};
		if !self.running {
			return false;
		}
		active.state.step();
		active.surface.draw(&active.state);
		true
	}

	/// New drawing bounds; nodes are pulled inside on the next step.
	pub fn resize(&mut self, width: f64, height: f64) {
		if let Some(active) = self.active.as_mut() {
			active.state.resize(width, height);
		}
	}

	/// Grabs the node under the pointer. Returns whether one was hit.
	pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
		self.active
			.as_mut()
			.is_some_and(|a| a.state.begin_drag(x, y))
	}

	/// Moves the grabbed node to the pointer.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		if let Some(active) = self.active.as_mut() {
			active.state.drag_to(x, y);
		}
	}

	/// Lets go of the grabbed node.
	pub fn end_drag(&mut self) {
		if let Some(active) = self.active.as_mut() {
			active.state.end_drag();
		}
	}
}
