//! Where neural trees come from: the game server, or a local seed.

mod error;
mod fetch;
mod seed;

pub use error::TreeError;
pub use fetch::{DEFAULT_API_BASE, fetch_neural_tree, neural_tree_url};
pub use seed::seed_tree;
