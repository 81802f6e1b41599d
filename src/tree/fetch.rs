use gloo_net::http::Request;
use log::debug;

use super::TreeError;
use crate::components::neural_map::GraphData;

/// Game server address used when the page does not name one.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Endpoint serving a player's neural tree.
pub fn neural_tree_url(api_base: &str, player_id: &str) -> String {
	format!(
		"{}/api/evolution/neural-tree/{}",
		api_base.trim_end_matches('/'),
		urlencoding::encode(player_id)
	)
}

/// Fetches a player's neural tree from the game server.
pub async fn fetch_neural_tree(api_base: &str, player_id: &str) -> Result<GraphData, TreeError> {
	let url = neural_tree_url(api_base, player_id);
	debug!("Fetching neural tree from {}", url);

	let response = Request::get(&url)
		.send()
		.await
		.map_err(|e| TreeError::Request(e.to_string()))?;
	if !response.ok() {
		return Err(TreeError::Status(response.status()));
	}
	let body = response
		.text()
		.await
		.map_err(|e| TreeError::Request(e.to_string()))?;
	GraphData::from_json(&body)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn url_joins_base_and_player() {
		assert_eq!(
			neural_tree_url("http://localhost:8000/", "p1"),
			"http://localhost:8000/api/evolution/neural-tree/p1"
		);
	}

	#[test]
	fn url_encodes_player_id() {
		assert_eq!(
			neural_tree_url(DEFAULT_API_BASE, "a b/c"),
			"http://localhost:8000/api/evolution/neural-tree/a%20b%2Fc"
		);
	}
}
