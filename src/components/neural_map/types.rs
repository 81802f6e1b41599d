use serde::{Deserialize, Deserializer};

use crate::tree::TreeError;

/// Color used for statuses the map does not recognise.
pub const FALLBACK_STATUS_COLOR: &str = "#666666";

fn default_color() -> String {
	"#FFFFFF".into()
}

fn default_icon() -> String {
	"🧠".into()
}

// The server sends `null` for fields it has no value for; treat that like a
// missing field so one sparse record cannot sink the whole tree.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de> + Default,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn color_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_color))
}

fn icon_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_icon))
}

/// Progression stage of a cognitive module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
	/// Not yet unlocked.
	#[default]
	Locked,
	/// Unlocked, level below 20.
	Nascent,
	/// Level below 50.
	Developing,
	/// Level below 90.
	Active,
	/// Level 90 and above.
	Mastered,
	/// Any status string the map does not know about.
	#[serde(other)]
	Unknown,
}

impl NodeStatus {
	/// Status the game assigns to a module at `level`.
	pub fn from_level(level: f64) -> Self {
		if level <= 0.0 {
			Self::Locked
		} else if level < 20.0 {
			Self::Nascent
		} else if level < 50.0 {
			Self::Developing
		} else if level < 90.0 {
			Self::Active
		} else {
			Self::Mastered
		}
	}

	/// Inner-disc color for this status.
	pub fn color(self) -> &'static str {
		match self {
			Self::Locked => "#3a3a3a",
			Self::Nascent => "#ffa500",
			Self::Developing => "#ffd700",
			Self::Active => "#00ffff",
			Self::Mastered => "#00ff88",
			Self::Unknown => FALLBACK_STATUS_COLOR,
		}
	}
}

/// A cognitive module as sent by the game server.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Module name, unique within a graph.
	#[serde(default, deserialize_with = "null_as_default")]
	pub id: String,
	/// Module level, 0 to 100.
	#[serde(default, deserialize_with = "null_as_default")]
	pub level: f64,
	/// Progression stage.
	#[serde(default, deserialize_with = "null_as_default")]
	pub status: NodeStatus,
	/// CSS color of the node disc.
	#[serde(default = "default_color", deserialize_with = "color_or_default")]
	pub color: String,
	/// Short glyph drawn at the node center.
	#[serde(default = "default_icon", deserialize_with = "icon_or_default")]
	pub icon: String,
}

impl GraphNode {
	/// A node with the server's fallback color and icon.
	pub fn new(id: impl Into<String>, level: f64) -> Self {
		Self {
			id: id.into(),
			level,
			status: NodeStatus::from_level(level),
			color: default_color(),
			icon: default_icon(),
		}
	}
}

/// Unlock dependency between two modules, referenced by id.
///
/// A missing endpoint deserializes as an empty id, which never resolves, so
/// the link is dropped at load.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Id of the required module.
	#[serde(default, deserialize_with = "null_as_default")]
	pub source: String,
	/// Id of the dependent module.
	#[serde(default, deserialize_with = "null_as_default")]
	pub target: String,
	/// Visual weight and spring scale, 0 to 1.
	#[serde(default, deserialize_with = "null_as_default")]
	pub strength: f64,
}

/// Neural tree snapshot. Missing arrays deserialize as empty.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// Cognitive modules.
	#[serde(default, deserialize_with = "null_as_default")]
	pub nodes: Vec<GraphNode>,
	/// Unlock dependencies.
	#[serde(default, deserialize_with = "null_as_default")]
	pub links: Vec<GraphLink>,
	/// Overall evolution score, 0 to 100.
	#[serde(default)]
	pub evolution_score: Option<f64>,
	/// Loop the snapshot was taken in.
	#[serde(default)]
	pub loop_number: Option<u32>,
}

/// Envelope returned by the neural-tree endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct NeuralTreeResponse {
	/// Whether the server produced a tree.
	#[serde(default)]
	pub success: bool,
	/// The tree itself.
	#[serde(default)]
	pub tree_data: GraphData,
	/// Layout hint, `force_directed_graph` in practice.
	#[serde(default)]
	pub visualization_type: Option<String>,
}

impl NeuralTreeResponse {
	/// Unwraps the tree, rejecting envelopes the server marked unsuccessful.
	pub fn into_graph(self) -> Result<GraphData, TreeError> {
		if self.success {
			Ok(self.tree_data)
		} else {
			Err(TreeError::Rejected)
		}
	}
}

impl GraphData {
	/// Parses either a bare tree or a full endpoint envelope.
	pub fn from_json(text: &str) -> Result<Self, TreeError> {
		let value: serde_json::Value = serde_json::from_str(text)?;
		if value.get("tree_data").is_some() {
			serde_json::from_value::<NeuralTreeResponse>(value)?.into_graph()
		} else {
			Ok(serde_json::from_value(value)?)
		}
	}
}
