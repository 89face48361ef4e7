use leptos::prelude::*;
use log::error;

use crate::components::scenario_graph::{GraphData, LayoutDirection, ScenarioGraph};

/// Scenario graph as the scenario design service delivers it.
const SAMPLE_SCENARIO: &str = r#"{
	"nodes": [
		{"id": 1, "label": "Phishing mail received", "is_entry_node": true},
		{"id": 2, "label": "condition"},
		{"id": 3, "label": "User reports mail", "group": 2},
		{"id": 4, "label": "User opens attachment", "group": 3},
		{"id": 5, "label": "condition"},
		{"id": 6, "label": "Ransomware spreads", "group": 3},
		{"id": 7, "label": "Incident contained", "group": 2}
	],
	"edges": [
		{"from": 1, "to": 2},
		{"from": 2, "to": 3, "label": "reported"},
		{"from": 2, "to": 4, "label": "opened"},
		{"from": 4, "to": 5},
		{"from": 5, "to": 6},
		{"from": 5, "to": 7},
		{"from": 3, "to": 7},
		{"from": 3, "to": 7},
		{"from": 3, "to": 7}
	]
}"#;

fn sample_data() -> GraphData {
	GraphData::from_json(SAMPLE_SCENARIO).unwrap_or_else(|err| {
		error!("{err}");
		GraphData::default()
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(sample_data);
	let direction = RwSignal::new(LayoutDirection::UpDown);
	let flip_direction = move |_| {
		direction.update(|d| {
			*d = match d {
				LayoutDirection::UpDown => LayoutDirection::LeftRight,
				LayoutDirection::LeftRight => LayoutDirection::UpDown,
			}
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="scenario-graph-page">
				<h1>"Scenario graph"</h1>
				<p class="subtitle">"Drag the background to pan. Scroll to zoom."</p>
				<button class="layout-toggle" on:click=flip_direction>
					"Switch layout direction"
				</button>
				<ScenarioGraph data=graph_data direction=direction />
			</div>
		</ErrorBoundary>
	}
}
