/// Failures while obtaining a neural tree from the game server.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
	/// The payload was not a neural tree.
	#[error("invalid neural tree payload: {0}")]
	Parse(#[from] serde_json::Error),

	/// The request never produced a response.
	#[error("neural tree request failed: {0}")]
	Request(String),

	/// The server answered with a non-success status code.
	#[error("neural tree request returned status {0}")]
	Status(u16),

	/// The server answered but flagged the tree as unavailable.
	#[error("server reported no neural tree")]
	Rejected,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_failure() {
		assert_eq!(
			TreeError::Status(404).to_string(),
			"neural tree request returned status 404"
		);
		assert_eq!(TreeError::Rejected.to_string(), "server reported no neural tree");
		assert!(
			TreeError::Request("offline".into())
				.to_string()
				.contains("offline")
		);
	}
}
