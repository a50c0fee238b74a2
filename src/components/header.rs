use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
	view! {
		<header class="app-header">
			<div class="container header-row">
				<div class="logo">"🌿"</div>
				<div>
					<h1>"EcoFlow LCA"</h1>
					<p class="subtitle">"Model product life cycles as interactive flowcharts"</p>
				</div>
			</div>
		</header>
	}
}
