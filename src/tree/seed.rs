use crate::components::neural_map::{GraphData, GraphLink, GraphNode, NodeStatus};

struct ModuleDef {
	name: &'static str,
	icon: &'static str,
	color: &'static str,
	requires: &'static [&'static str],
}

const MODULES: &[ModuleDef] = &[
	ModuleDef { name: "logic", icon: "🧮", color: "#00FFFF", requires: &[] },
	ModuleDef { name: "empathy", icon: "❤️", color: "#FF69B4", requires: &[] },
	ModuleDef { name: "creativity", icon: "🎨", color: "#FFD700", requires: &[] },
	ModuleDef { name: "fear", icon: "⚠️", color: "#8B00FF", requires: &[] },
	ModuleDef { name: "trust", icon: "🤝", color: "#00FF00", requires: &["empathy"] },
	ModuleDef { name: "humor", icon: "😄", color: "#FF6347", requires: &["creativity", "empathy"] },
	ModuleDef { name: "curiosity", icon: "🔍", color: "#FFA500", requires: &[] },
	ModuleDef { name: "ethics", icon: "⚖️", color: "#4169E1", requires: &["logic", "empathy"] },
];

/// Modules every player starts with unlocked.
const CORE_MODULES: &[&str] = &["logic", "empathy", "curiosity", "fear"];

const CORE_LEVEL: f64 = 5.0;

/// The neural tree of a player who has not made any decision yet.
pub fn seed_tree() -> GraphData {
	let level_of = |name: &str| {
		if CORE_MODULES.contains(&name) {
			CORE_LEVEL
		} else {
			0.0
		}
	};

	let nodes: Vec<GraphNode> = MODULES
		.iter()
		.map(|m| {
			let level = level_of(m.name);
			GraphNode {
				id: m.name.into(),
				level,
				status: NodeStatus::from_level(level),
				color: m.color.into(),
				icon: m.icon.into(),
			}
		})
		.collect();

	// Links point from the required module to the one it unlocks.
	let links = MODULES
		.iter()
		.flat_map(|m| {
			m.requires.iter().map(move |req| GraphLink {
				source: (*req).into(),
				target: m.name.into(),
				strength: level_of(m.name) / 100.0,
			})
		})
		.collect();

	// Mean level as a percentage of the 100-point cap.
	let total: f64 = nodes.iter().map(|n| n.level).sum();
	let evolution_score = total / nodes.len() as f64;

	GraphData {
		nodes,
		links,
		evolution_score: Some(evolution_score),
		loop_number: Some(0),
	}
}
