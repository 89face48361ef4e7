use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use super::canvas::{CanvasEngine, CanvasGraph};
use super::engine::{GraphHandle, GraphView, render_graph};
use super::options::{LayoutDirection, OptionsUpdate};
use super::types::GraphData;
use super::viewport::{ResizeListener, WindowViewport};

type CanvasView = GraphView<CanvasGraph, ResizeListener>;

const ZOOM_STEP: f64 = 1.2;

fn with_graph(view: &Rc<RefCell<Option<CanvasView>>>, f: impl FnOnce(&CanvasGraph)) {
	if let Some(view) = view.borrow().as_ref() {
		f(&*view.handle().borrow());
	}
}

fn direction_update(direction: LayoutDirection) -> OptionsUpdate {
	OptionsUpdate {
		direction: Some(direction),
		..OptionsUpdate::default()
	}
}

/// Hierarchical scenario graph with pan, zoom and navigation buttons.
///
/// Each change of `data` releases the previous drawing and its resize listener before the
/// graph is drawn again. Changes of `direction` relayout the live drawing in place.
#[component]
pub fn ScenarioGraph(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into, default = Signal::stored(LayoutDirection::UpDown))] direction: Signal<
		LayoutDirection,
	>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let view: Rc<RefCell<Option<CanvasView>>> = Rc::new(RefCell::new(None));
	let show_navigation = RwSignal::new(false);
	let view_init = view.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let data = data.get();
		if let Some(mut previous) = view_init.borrow_mut().take() {
			previous.dispose();
		}

		let Some(viewport) = WindowViewport::new() else {
			error!("no browser window to host the scenario graph");
			return;
		};
		match render_graph(&CanvasEngine, canvas, &data.nodes, &data.edges, &viewport) {
			Ok(rendered) => {
				{
					let mut graph = rendered.handle().borrow_mut();
					graph.update_options(&direction_update(direction.get_untracked()));
					show_navigation.set(graph.options().interaction.navigation_buttons);
				}
				*view_init.borrow_mut() = Some(rendered);
			}
			Err(err) => {
				show_navigation.set(false);
				error!("could not render scenario graph: {err}");
			}
		}
	});

	let view_dir = view.clone();
	Effect::new(move |_| {
		let update = direction_update(direction.get());
		if let Some(view) = view_dir.borrow().as_ref() {
			view.handle().borrow_mut().update_options(&update);
		}
	});

	let view_md = view.clone();
	let on_mousedown = move |ev: MouseEvent| {
		with_graph(&view_md, |graph| {
			let (x, y) = graph.local_point(ev.client_x() as f64, ev.client_y() as f64);
			graph.pointer_down(x, y);
		});
	};

	let view_mm = view.clone();
	let on_mousemove = move |ev: MouseEvent| {
		with_graph(&view_mm, |graph| {
			let (x, y) = graph.local_point(ev.client_x() as f64, ev.client_y() as f64);
			graph.pointer_move(x, y);
		});
	};

	let view_mu = view.clone();
	let on_mouseup = move |_: MouseEvent| with_graph(&view_mu, CanvasGraph::pointer_up);

	let view_ml = view.clone();
	let on_mouseleave = move |_: MouseEvent| with_graph(&view_ml, CanvasGraph::pointer_up);

	let view_wh = view.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		with_graph(&view_wh, |graph| {
			let (x, y) = graph.local_point(ev.client_x() as f64, ev.client_y() as f64);
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			graph.zoom_at(x, y, factor);
		});
	};

	let buttons = {
		let (view_in, view_out, view_fit) = (view.clone(), view.clone(), view.clone());
		view! {
			<div
				class="graph-navigation"
				style:display=move || if show_navigation.get() { "flex" } else { "none" }
			>
				<button title="Zoom in" on:click=move |_| with_graph(&view_in, |g| g.zoom(ZOOM_STEP))>
					"+"
				</button>
				<button
					title="Zoom out"
					on:click=move |_| with_graph(&view_out, |g| g.zoom(1.0 / ZOOM_STEP))
				>
					"−"
				</button>
				<button title="Fit graph" on:click=move |_| with_graph(&view_fit, CanvasGraph::fit)>
					"⤢"
				</button>
			</div>
		}
	};

	view! {
		<div class="scenario-graph" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="scenario-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{buttons}
		</div>
	}
}
