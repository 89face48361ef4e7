use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::engine::Viewport;

fn inner_height(window: &Window) -> f64 {
	window
		.inner_height()
		.ok()
		.and_then(|h| h.as_f64())
		.unwrap_or(0.0)
}

/// The browser window as a resizable viewport.
pub struct WindowViewport {
	window: Window,
}

impl WindowViewport {
	pub fn new() -> Option<Self> {
		web_sys::window().map(|window| Self { window })
	}
}

impl Viewport for WindowViewport {
	type Subscription = ResizeListener;

	fn height(&self) -> f64 {
		inner_height(&self.window)
	}

	fn on_resize(&self, mut handler: Box<dyn FnMut(f64)>) -> ResizeListener {
		let window = self.window.clone();
		let callback = Closure::<dyn FnMut()>::new(move || handler(inner_height(&window)));
		if let Err(err) = self
			.window
			.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
		{
			warn!("could not listen for window resize: {err:?}");
		}
		ResizeListener {
			window: self.window.clone(),
			callback,
		}
	}
}

/// A registered `resize` listener, removed from the window on drop.
pub struct ResizeListener {
	window: Window,
	callback: Closure<dyn FnMut()>,
}

impl Drop for ResizeListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
	}
}
