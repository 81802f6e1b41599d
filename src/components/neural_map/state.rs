use std::collections::HashMap;
use std::f64::consts::PI;

use log::{debug, warn};
use rand::Rng;

use super::params::PhysicsParams;
use super::types::{GraphData, NodeStatus};

/// Radius of a level 0 node.
pub const MIN_RADIUS: f64 = 15.0;
/// Extra radius a level 100 node gains over [`MIN_RADIUS`].
pub const RADIUS_RANGE: f64 = 20.0;

/// Node radius for a module level in `[0, 100]`.
pub fn radius_for_level(level: f64) -> f64 {
	MIN_RADIUS + level / 100.0 * RADIUS_RANGE
}

/// A simulated cognitive module.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Module name.
	pub id: String,
	/// Horizontal position in canvas pixels.
	pub x: f64,
	/// Vertical position in canvas pixels.
	pub y: f64,
	/// Horizontal velocity, pixels per step.
	pub vx: f64,
	/// Vertical velocity, pixels per step.
	pub vy: f64,
	/// Disc radius, from [`radius_for_level`].
	pub radius: f64,
	/// Module level, clamped to `[0, 100]`.
	pub level: f64,
	/// Progression stage.
	pub status: NodeStatus,
	/// CSS color of the disc and glow.
	pub color: String,
	/// Glyph drawn at the center.
	pub icon: String,
}

/// A spring between two nodes, by index into [`NeuralMapState::nodes`].
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	/// Index of the required module.
	pub source: usize,
	/// Index of the dependent module.
	pub target: usize,
	/// Spring and stroke weight, clamped to `[0, 1]`.
	pub strength: f64,
}

/// Which node, if any, is held by the pointer.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Index of the held node.
	pub node_idx: Option<usize>,
}

/// What a load kept and what it threw away.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
	/// Nodes now in the graph.
	pub nodes: usize,
	/// Links now in the graph.
	pub links: usize,
	/// Nodes rejected for an empty or repeated id.
	pub skipped_nodes: usize,
	/// Links whose endpoints did not resolve.
	pub dropped_links: usize,
}

/// Nodes, links and forces of one neural map, independent of any canvas.
pub struct NeuralMapState {
	/// Nodes in load order.
	pub nodes: Vec<Node>,
	/// Links whose endpoints both resolved.
	pub links: Vec<Link>,
	/// Pointer grab.
	pub drag: DragState,
	/// Force constants.
	pub params: PhysicsParams,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
}

fn finite_or_zero(v: f64) -> f64 {
	if v.is_finite() { v } else { 0.0 }
}

impl NeuralMapState {
	/// An empty map for a `width` by `height` canvas.
	pub fn new(width: f64, height: f64, params: PhysicsParams) -> Self {
		Self {
			nodes: Vec::new(),
			links: Vec::new(),
			drag: DragState::default(),
			params,
			width,
			height,
		}
	}

	/// Replaces the graph with `data`, scattering nodes with `rng` before
	/// laying them out on a circle.
	pub fn load_with_rng<R: Rng>(&mut self, data: &GraphData, rng: &mut R) -> LoadSummary {
		let mut id_to_idx = HashMap::new();
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut skipped_nodes = 0;

		for node in &data.nodes {
			if node.id.is_empty() || id_to_idx.contains_key(&node.id) {
				warn!("Skipping neural map node with empty or duplicate id {:?}", node.id);
				skipped_nodes += 1;
				continue;
			}
			let level = finite_or_zero(node.level).clamp(0.0, 100.0);
			id_to_idx.insert(node.id.clone(), nodes.len());
			nodes.push(Node {
				id: node.id.clone(),
				x: rng.r#gen::<f64>() * self.width,
				y: rng.r#gen::<f64>() * self.height,
				vx: 0.0,
				vy: 0.0,
				radius: radius_for_level(level),
				level,
				status: node.status,
				color: node.color.clone(),
				icon: node.icon.clone(),
			});
		}

		let links: Vec<Link> = data
			.links
			.iter()
			.filter_map(|link| {
				let (&source, &target) =
					(id_to_idx.get(&link.source)?, id_to_idx.get(&link.target)?);
				Some(Link {
					source,
					target,
					strength: finite_or_zero(link.strength).clamp(0.0, 1.0),
				})
			})
			.collect();

		let summary = LoadSummary {
			nodes: nodes.len(),
			links: links.len(),
			skipped_nodes,
			dropped_links: data.links.len() - links.len(),
		};

		self.nodes = nodes;
		self.links = links;
		self.drag = DragState::default();
		self.place_on_circle();

		debug!(
			"Loaded neural map: {} nodes, {} links ({} dropped)",
			summary.nodes, summary.links, summary.dropped_links
		);
		summary
	}

	/// Replaces the graph with `data`.
	pub fn load(&mut self, data: &GraphData) -> LoadSummary {
		self.load_with_rng(data, &mut rand::thread_rng())
	}

	fn place_on_circle(&mut self) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let r = self.width.min(self.height) / 3.0;
		let n = self.nodes.len() as f64;
		for (i, node) in self.nodes.iter_mut().enumerate() {
			let angle = (i as f64) * 2.0 * PI / n;
			node.x = cx + r * angle.cos();
			node.y = cy + r * angle.sin();
		}
	}

	/// Advances the simulation by one frame.
	pub fn step(&mut self) {
		let p = self.params;
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let mut deltas = vec![(0.0, 0.0); self.nodes.len()];

		for (i, node) in self.nodes.iter().enumerate() {
			let (mut ax, mut ay) = (
				(cx - node.x) * p.center_gravity,
				(cy - node.y) * p.center_gravity,
			);
			for (j, other) in self.nodes.iter().enumerate() {
				if i == j {
					continue;
				}
				let (dx, dy) = (node.x - other.x, node.y - other.y);
				let dist = (dx * dx + dy * dy).sqrt();
				// Coincident nodes have no direction to push along.
				if dist > 0.0 && dist < p.repulsion_range {
					let force = p.repulsion / (dist * dist);
					ax += dx / dist * force;
					ay += dy / dist * force;
				}
			}
			deltas[i] = (ax, ay);
		}

		for link in &self.links {
			let (s, t) = (&self.nodes[link.source], &self.nodes[link.target]);
			let (dx, dy) = (t.x - s.x, t.y - s.y);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist == 0.0 {
				continue;
			}
			let force = (dist - p.spring_length) * p.spring_constant * link.strength;
			let (fx, fy) = (dx / dist * force, dy / dist * force);
			deltas[link.source].0 += fx;
			deltas[link.source].1 += fy;
			deltas[link.target].0 -= fx;
			deltas[link.target].1 -= fy;
		}

		let (w, h, dragged) = (self.width, self.height, self.drag.node_idx);
		for (i, (node, (ax, ay))) in self.nodes.iter_mut().zip(deltas).enumerate() {
			// The dragged node follows the pointer, not the forces.
			if dragged != Some(i) {
				node.vx += ax;
				node.vy += ay;
				node.x += node.vx;
				node.y += node.vy;
				node.vx *= p.damping;
				node.vy *= p.damping;
			}
			// max/min rather than clamp: a canvas narrower than the node
			// would make clamp panic.
			node.x = node.x.max(node.radius).min(w - node.radius);
			node.y = node.y.max(node.radius).min(h - node.radius);
		}
	}

	/// First node, in load order, whose disc contains the point.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		self.nodes.iter().position(|node| {
			let (dx, dy) = (node.x - x, node.y - y);
			(dx * dx + dy * dy).sqrt() < node.radius
		})
	}

	/// Grabs the node under the pointer, if any.
	pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
		self.drag.node_idx = self.node_at_position(x, y);
		self.drag.node_idx.is_some()
	}

	/// Puts the held node exactly at the pointer.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		if let Some(node) = self.drag.node_idx.and_then(|i| self.nodes.get_mut(i)) {
			node.x = x;
			node.y = y;
		}
	}

	/// Releases the dragged node. Its velocity is left as it was.
	pub fn end_drag(&mut self) {
		self.drag.node_idx = None;
	}

	/// Changes the clamping bounds.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Looks a node up by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::neural_map::types::{GraphLink, GraphNode};

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn link(source: &str, target: &str, strength: f64) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			strength,
		}
	}

	fn loaded(data: &GraphData) -> NeuralMapState {
		let mut state = NeuralMapState::new(W, H, PhysicsParams::default());
		state.load_with_rng(data, &mut StdRng::seed_from_u64(7));
		state
	}

	fn assert_in_bounds(state: &NeuralMapState) {
		for node in &state.nodes {
			assert!(node.x >= node.radius && node.x <= state.width - node.radius, "{node:?}");
			assert!(node.y >= node.radius && node.y <= state.height - node.radius, "{node:?}");
		}
	}

	#[test]
	fn radius_grows_with_level() {
		assert_eq!(radius_for_level(0.0), 15.0);
		assert_eq!(radius_for_level(100.0), 35.0);
		let mut prev = radius_for_level(0.0);
		for level in 1..=100 {
			let r = radius_for_level(level as f64);
			assert!(r > prev);
			prev = r;
		}
	}

	#[test]
	fn nodes_start_on_a_circle_around_center() {
		let data = GraphData {
			nodes: (0..4).map(|i| GraphNode::new(format!("m{i}"), 10.0)).collect(),
			..Default::default()
		};
		let state = loaded(&data);
		let r = H / 3.0;
		let expected = [(W / 2.0 + r, H / 2.0), (W / 2.0, H / 2.0 + r), (W / 2.0 - r, H / 2.0)];
		for (node, (ex, ey)) in state.nodes.iter().zip(expected) {
			assert!((node.x - ex).abs() < 1e-9 && (node.y - ey).abs() < 1e-9);
			assert_eq!((node.vx, node.vy), (0.0, 0.0));
		}
	}

	#[test]
	fn load_replaces_previous_graph() {
		let mut state = loaded(&GraphData {
			nodes: vec![GraphNode::new("n1", 0.0), GraphNode::new("n2", 0.0)],
			links: vec![link("n1", "n2", 1.0)],
			..Default::default()
		});
		assert_eq!((state.nodes.len(), state.links.len()), (2, 1));

		state.load_with_rng(
			&GraphData {
				nodes: vec![GraphNode::new("n3", 0.0)],
				..Default::default()
			},
			&mut StdRng::seed_from_u64(1),
		);
		let ids: Vec<&str> = state.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["n3"]);
		assert!(state.links.is_empty());
	}

	#[test]
	fn dangling_links_are_dropped() {
		let mut state = NeuralMapState::new(W, H, PhysicsParams::default());
		let summary = state.load_with_rng(
			&GraphData {
				nodes: vec![GraphNode::new("a", 0.0)],
				links: vec![link("a", "ghost", 1.0)],
				..Default::default()
			},
			&mut StdRng::seed_from_u64(3),
		);
		assert_eq!(summary.links, 0);
		assert_eq!(summary.dropped_links, 1);
		assert!(state.links.is_empty());
	}

	#[test]
	fn duplicate_and_empty_ids_are_skipped() {
		let state = loaded(&GraphData {
			nodes: vec![
				GraphNode::new("logic", 10.0),
				GraphNode::new("", 10.0),
				GraphNode::new("logic", 80.0),
			],
			..Default::default()
		});
		assert_eq!(state.nodes.len(), 1);
		assert_eq!(state.nodes[0].level, 10.0);
	}

	#[test]
	fn out_of_range_input_is_clamped() {
		let state = loaded(&GraphData {
			nodes: vec![GraphNode::new("a", 250.0), GraphNode::new("b", f64::NAN)],
			links: vec![link("a", "b", 4.0)],
			..Default::default()
		});
		assert_eq!(state.nodes[0].radius, 35.0);
		assert_eq!(state.nodes[1].radius, 15.0);
		assert_eq!(state.links[0].strength, 1.0);
	}

	#[test]
	fn nodes_stay_in_bounds() {
		let nodes: Vec<GraphNode> = (0..24)
			.map(|i| GraphNode::new(format!("m{i}"), (i * 4) as f64))
			.collect();
		let links = (1..24)
			.flat_map(|i| {
				let id = format!("m{i}");
				[link(&id, "m0", 1.0), link(&id, &format!("m{}", i / 2), 0.5)]
			})
			.collect();
		let mut state = loaded(&GraphData {
			nodes,
			links,
			..Default::default()
		});
		for _ in 0..500 {
			state.step();
			assert_in_bounds(&state);
		}
	}

	#[test]
	fn shrinking_canvas_pulls_nodes_back_inside() {
		let mut state = loaded(&GraphData {
			nodes: (0..6).map(|i| GraphNode::new(format!("m{i}"), 50.0)).collect(),
			..Default::default()
		});
		state.resize(120.0, 90.0);
		state.step();
		assert_in_bounds(&state);
	}

	#[test]
	fn lone_node_settles_toward_center() {
		let mut state = loaded(&GraphData {
			nodes: vec![GraphNode::new("solo", 0.0)],
			..Default::default()
		});
		let dist = |s: &NeuralMapState| (s.nodes[0].x - W / 2.0).hypot(s.nodes[0].y - H / 2.0);
		let speed = |s: &NeuralMapState| s.nodes[0].vx.hypot(s.nodes[0].vy);

		let (mut prev_dist, mut prev_speed) = (dist(&state), speed(&state));
		for tick in 0..300 {
			state.step();
			let (d, v) = (dist(&state), speed(&state));
			assert!(d <= prev_dist, "moved away from center on tick {tick}");
			if tick > 30 {
				assert!(v <= prev_speed, "sped up on tick {tick}");
			}
			(prev_dist, prev_speed) = (d, v);
		}
		assert!(prev_dist < 10.0);
	}

	#[test]
	fn close_nodes_push_apart() {
		let mut state = loaded(&GraphData {
			nodes: vec![GraphNode::new("a", 0.0), GraphNode::new("b", 0.0)],
			..Default::default()
		});
		state.nodes[0].x = 390.0;
		state.nodes[1].x = 410.0;
		state.nodes[0].y = 300.0;
		state.nodes[1].y = 300.0;
		state.step();
		assert!(state.nodes[0].x < 390.0);
		assert!(state.nodes[1].x > 410.0);
	}

	#[test]
	fn stretched_link_pulls_endpoints_together() {
		let mut state = loaded(&GraphData {
			nodes: vec![GraphNode::new("a", 0.0), GraphNode::new("b", 0.0)],
			links: vec![link("a", "b", 1.0)],
			..Default::default()
		});
		state.params.center_gravity = 0.0;
		state.nodes[0].x = 100.0;
		state.nodes[1].x = 700.0;
		state.step();
		assert!(state.nodes[0].vx > 0.0);
		assert!(state.nodes[1].vx < 0.0);
		assert!((state.nodes[0].vx + state.nodes[1].vx).abs() < 1e-12);
	}

	#[test]
	fn hit_test_prefers_load_order() {
		let mut state = loaded(&GraphData {
			nodes: vec![GraphNode::new("a", 0.0), GraphNode::new("b", 100.0)],
			..Default::default()
		});
		state.nodes[0].x = 300.0;
		state.nodes[0].y = 300.0;
		state.nodes[1].x = 305.0;
		state.nodes[1].y = 300.0;
		assert_eq!(state.node_at_position(304.0, 300.0), Some(0));
		assert_eq!(state.node_at_position(335.0, 300.0), Some(1));
		assert_eq!(state.node_at_position(50.0, 50.0), None);
	}

	#[test]
	fn dragged_node_tracks_pointer_exactly() {
		let mut state = loaded(&GraphData {
			nodes: vec![GraphNode::new("a", 50.0), GraphNode::new("b", 50.0)],
			links: vec![link("a", "b", 1.0)],
			..Default::default()
		});
		let (x, y) = (state.nodes[0].x, state.nodes[0].y);
		assert!(state.begin_drag(x + 3.0, y - 2.0));

		for (px, py) in [(420.0, 250.0), (300.0, 310.5), (512.25, 128.0)] {
			state.drag_to(px, py);
			assert_eq!((state.nodes[0].x, state.nodes[0].y), (px, py));
			state.step();
			assert_eq!((state.nodes[0].x, state.nodes[0].y), (px, py));
		}
	}

	#[test]
	fn release_keeps_velocity() {
		let mut state = loaded(&GraphData {
			nodes: vec![GraphNode::new("a", 0.0)],
			..Default::default()
		});
		state.step();
		let before = (state.nodes[0].vx, state.nodes[0].vy);
		let (x, y) = (state.nodes[0].x, state.nodes[0].y);
		state.begin_drag(x, y);
		state.drag_to(200.0, 200.0);
		state.step();
		state.end_drag();
		assert_eq!((state.nodes[0].vx, state.nodes[0].vy), before);
	}

	#[test]
	fn miss_does_not_start_drag() {
		let mut state = loaded(&GraphData {
			nodes: vec![GraphNode::new("a", 0.0)],
			..Default::default()
		});
		assert!(!state.begin_drag(1.0, 1.0));
		state.drag_to(2.0, 2.0);
		assert_ne!((state.nodes[0].x, state.nodes[0].y), (2.0, 2.0));
	}
}
