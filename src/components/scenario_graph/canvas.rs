use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::draw;
use super::engine::{DrawingEngine, GraphHandle};
use super::error::RenderError;
use super::options::{GraphOptions, OptionsUpdate};
use super::scene::{FRAME_DT, Scene};
use super::types::{RenderEdge, RenderNode};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Draws scenario graphs onto a `<canvas>` with a hierarchical force layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanvasEngine;

impl DrawingEngine for CanvasEngine {
	type Container = HtmlCanvasElement;
	type Handle = CanvasGraph;
	type Error = RenderError;

	fn draw(
		&self,
		canvas: HtmlCanvasElement,
		nodes: Vec<RenderNode>,
		edges: Vec<RenderEdge>,
		options: GraphOptions,
	) -> Result<CanvasGraph, RenderError> {
		let window = web_sys::window().ok_or(RenderError::NoWindow)?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(RenderError::NoContext)?
			.dyn_into()
			.map_err(|_| RenderError::NoContext)?;

		let width = canvas
			.parent_element()
			.map(|p| p.client_width() as f64)
			.filter(|w| *w > 0.0)
			.unwrap_or(800.0);
		canvas.set_width(width as u32);
		canvas.set_height(options.height as u32);

		let scene = Rc::new(RefCell::new(Scene::new(&nodes, &edges, options, width)));
		let graph = CanvasGraph {
			canvas,
			scene,
			frame: Rc::new(RefCell::new(None)),
			frame_id: Rc::new(Cell::new(None)),
			window,
		};
		graph.start(ctx);
		Ok(graph)
	}
}

/// A scenario graph live on a canvas. Dropping it stops the animation loop.
pub struct CanvasGraph {
	canvas: HtmlCanvasElement,
	scene: Rc<RefCell<Scene>>,
	frame: FrameCallback,
	frame_id: Rc<Cell<Option<i32>>>,
	window: Window,
}

impl CanvasGraph {
	fn start(&self, ctx: CanvasRenderingContext2d) {
		let (scene, frame_id) = (self.scene.clone(), self.frame_id.clone());
		let weak_frame: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&self.frame);
		let window = self.window.clone();
		*self.frame.borrow_mut() = Some(Closure::new(move || {
			{
				let mut s = scene.borrow_mut();
				s.tick(FRAME_DT);
				draw::render(&s, &ctx);
			}
			let Some(frame) = weak_frame.upgrade() else {
				return;
			};
			if let Some(ref cb) = *frame.borrow() {
				frame_id.set(
					window
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));
		if let Some(ref cb) = *self.frame.borrow() {
			self.frame_id.set(
				self.window
					.request_animation_frame(cb.as_ref().unchecked_ref())
					.ok(),
			);
		}
	}

	pub fn pointer_down(&self, x: f64, y: f64) {
		self.scene.borrow_mut().pointer_down(x, y);
	}

	pub fn pointer_move(&self, x: f64, y: f64) {
		self.scene.borrow_mut().pointer_move(x, y);
	}

	pub fn pointer_up(&self) {
		self.scene.borrow_mut().pointer_up();
	}

	pub fn options(&self) -> GraphOptions {
		self.scene.borrow().options.clone()
	}

	pub fn zoom_at(&self, x: f64, y: f64, factor: f64) {
		self.scene.borrow_mut().zoom_at(x, y, factor);
	}

	pub fn zoom(&self, factor: f64) {
		self.scene.borrow_mut().zoom(factor);
	}

	pub fn fit(&self) {
		self.scene.borrow_mut().fit();
	}

	/// Canvas-relative coordinates of a pointer event.
	pub fn local_point(&self, client_x: f64, client_y: f64) -> (f64, f64) {
		let rect = self.canvas.get_bounding_client_rect();
		(client_x - rect.left(), client_y - rect.top())
	}
}

impl GraphHandle for CanvasGraph {
	fn update_options(&mut self, update: &OptionsUpdate) {
		let mut scene = self.scene.borrow_mut();
		if !scene.apply_options(update) {
			return;
		}
		let (width, height) = (scene.width as u32, scene.height as u32);
		if self.canvas.height() != height {
			self.canvas.set_height(height);
			debug!("graph canvas resized to {width}x{height}");
		}
	}

	fn stabilize_layout(&mut self) {
		self.scene.borrow_mut().stabilize();
	}
}

impl Drop for CanvasGraph {
	fn drop(&mut self) {
		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		self.frame.borrow_mut().take();
	}
}
