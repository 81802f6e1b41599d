//! PROTOCOL:LOOP neural map: a Leptos client-side app drawing a player's
//! cognitive modules as a force-directed graph.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Pulled in for its `js` feature so `rand` can seed itself in the browser.
#[cfg(target_arch = "wasm32")]
use getrandom as _;

// Modules
mod components;
mod pages;
pub mod tree;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

pub use crate::components::neural_map::{
	FALLBACK_STATUS_COLOR, GraphData, GraphLink, GraphNode, Link, LoadStatus, LoadSummary,
	NeuralMap, NeuralMapCanvas, NeuralMapState, NeuralTreeResponse, Node, NodeStatus,
	PhysicsParams, Surface, radius_for_level,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the neural map and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		<Title text="PROTOCOL:LOOP | Neural Map" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
