use leptos::prelude::*;

/// Fallback for unknown routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"SIGNAL LOST"</h1>
			<p>"This sector of the facility does not exist."</p>
			<a href="/">"Return to the neural map"</a>
		</div>
	}
}
