use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error};

use super::classify::{classify_edges, classify_nodes};
use super::options::{GraphOptions, OptionsUpdate, graph_height};
use super::types::{GraphEdge, GraphNode, RenderEdge, RenderNode};

/// A live graph drawing that can be reconfigured after creation.
pub trait GraphHandle {
	fn update_options(&mut self, update: &OptionsUpdate);
	fn stabilize_layout(&mut self);
}

/// Turns classified nodes and edges into an interactive drawing inside a container.
pub trait DrawingEngine {
	type Container;
	type Handle: GraphHandle;
	type Error;

	fn draw(
		&self,
		container: Self::Container,
		nodes: Vec<RenderNode>,
		edges: Vec<RenderEdge>,
		options: GraphOptions,
	) -> Result<Self::Handle, Self::Error>;
}

/// Source of the viewport height and its resize notifications.
pub trait Viewport {
	/// Dropping the subscription stops further notifications.
	type Subscription;

	fn height(&self) -> f64;
	fn on_resize(&self, handler: Box<dyn FnMut(f64)>) -> Self::Subscription;
}

/// A rendered graph together with the resize subscription that keeps it sized.
///
/// The subscription only holds a weak reference to the handle and is released when the
/// view is dropped or disposed.
pub struct GraphView<H, S> {
	handle: Rc<RefCell<H>>,
	subscription: Option<S>,
}

impl<H, S> GraphView<H, S> {
	pub fn handle(&self) -> &Rc<RefCell<H>> {
		&self.handle
	}

	/// Stops following viewport resizes. The drawing itself stays alive.
	pub fn dispose(&mut self) {
		if self.subscription.take().is_some() {
			debug!("graph view resize subscription released");
		}
	}
}

/// Classifies `nodes` and `edges`, draws them, and keeps the drawing's height in step with
/// the viewport.
///
/// Engine failures are returned unchanged; nothing is subscribed in that case.
pub fn render_graph<E, V>(
	engine: &E,
	container: E::Container,
	nodes: &[GraphNode],
	edges: &[GraphEdge],
	viewport: &V,
) -> Result<GraphView<E::Handle, V::Subscription>, E::Error>
where
	E: DrawingEngine,
	E::Handle: 'static,
	V: Viewport,
{
	let options = GraphOptions::with_height(graph_height(viewport.height()));
	let handle = engine
		.draw(container, classify_nodes(nodes), classify_edges(edges), options)
		.inspect_err(|_| error!("drawing engine rejected the scenario graph"))?;
	let handle = Rc::new(RefCell::new(handle));
	handle.borrow_mut().stabilize_layout();

	let weak = Rc::downgrade(&handle);
	let subscription = viewport.on_resize(Box::new(move |viewport_height| {
		if let Some(handle) = weak.upgrade() {
			handle
				.borrow_mut()
				.update_options(&OptionsUpdate::height(graph_height(viewport_height)));
		}
	}));
	debug!(
		"rendered scenario graph with {} nodes and {} edges",
		nodes.len(),
		edges.len()
	);

	Ok(GraphView {
		handle,
		subscription: Some(subscription),
	})
}
