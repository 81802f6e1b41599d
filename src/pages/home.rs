use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::warn;

use crate::components::neural_map::{GraphData, NeuralMapCanvas};
use crate::tree::{DEFAULT_API_BASE, fetch_neural_tree, seed_tree};

/// The player's tree when one is named and reachable, otherwise the seed tree.
async fn load_tree(api_base: String, player_id: Option<String>) -> GraphData {
	let Some(player_id) = player_id else {
		return seed_tree();
	};
	match fetch_neural_tree(&api_base, &player_id).await {
		Ok(tree) => tree,
		Err(e) => {
			warn!("Falling back to the seed neural tree: {}", e);
			seed_tree()
		}
	}
}

/// Fullscreen neural map with the evolution overlay.
///
/// `?player=<id>` picks whose tree to show, `?api=<url>` where to ask for it.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let tree = LocalResource::new(move || {
		let (api_base, player_id) = query.with(|q| {
			(
				q.get("api").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
				q.get("player"),
			)
		});
		load_tree(api_base, player_id)
	});
	let graph_data = Signal::derive(move || tree.get().unwrap_or_default());
	let (paused, set_paused) = signal(false);

	let score = move || {
		graph_data.with(|d| {
			d.evolution_score
				.map(|s| format!("{:.1}%", s))
				.unwrap_or_else(|| "--".into())
		})
	};
	let loop_number = move || {
		graph_data.with(|d| {
			d.loop_number
				.map(|n| n.to_string())
				.unwrap_or_else(|| "--".into())
		})
	};

	view! {
		<div class="fullscreen-graph">
			<NeuralMapCanvas data=graph_data fullscreen=true paused=Some(paused.into()) />
			<div class="graph-overlay">
				<h1>"NEURAL MAP"</h1>
				<p class="subtitle">"Drag a module to reposition it."</p>
				<p class="stat">"EVOLUTION " {score}</p>
				<p class="stat">"LOOP " {loop_number}</p>
				<button on:click=move |_| set_paused.update(|p| *p = !*p)>
					{move || if paused.get() { "RESUME" } else { "PAUSE" }}
				</button>
			</div>
		</div>
	}
}
