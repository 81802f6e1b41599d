/// Force constants for the neural map layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
	/// Pull toward the canvas center, per unit of distance.
	pub center_gravity: f64,
	/// Repulsion numerator; the force falls off with squared distance.
	pub repulsion: f64,
	/// Nodes farther apart than this do not repel.
	pub repulsion_range: f64,
	/// Rest length of link springs.
	pub spring_length: f64,
	/// Spring stiffness, scaled by each link's strength.
	pub spring_constant: f64,
	/// Velocity multiplier applied after every step.
	pub damping: f64,
}

impl Default for PhysicsParams {
	fn default() -> Self {
		Self {
			center_gravity: 0.001,
			repulsion: 500.0,
			repulsion_range: 100.0,
			spring_length: 150.0,
			spring_constant: 0.01,
			damping: 0.9,
		}
	}
}
