use std::collections::HashMap;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

use super::hierarchy::assign_levels;
use super::options::{GraphOptions, LayoutDirection, OptionsUpdate};
use super::types::{RenderEdge, RenderNode, Smooth};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const NODE_RADIUS: f64 = 10.0;
pub const HIT_RADIUS: f64 = 12.0;
pub const FRAME_DT: f32 = 0.016;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
const FIT_MARGIN: f64 = 40.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub color: String,
	pub radius: f64,
	pub hidden: bool,
	pub level: usize,
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub from: DefaultNodeIdx,
	pub to: DefaultNodeIdx,
	pub smooth: Option<Smooth>,
	pub label: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Simulation and view state of one drawn scenario graph.
pub struct Scene {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub options: GraphOptions,
	pub width: f64,
	pub height: f64,
}

fn simulation_parameters(options: &GraphOptions) -> SimulationParameters {
	SimulationParameters {
		force_charge: options.physics.charge() as f32,
		force_spring: options.physics.spring as f32,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: options.physics.damping as f32,
	}
}

impl Scene {
	pub fn new(nodes: &[RenderNode], edges: &[RenderEdge], options: GraphOptions, width: f64) -> Self {
		let mut graph = ForceGraph::new(simulation_parameters(&options));
		let levels = assign_levels(nodes, edges);

		let mut id_to_idx = HashMap::new();
		for node in nodes {
			let color = node.color.clone().unwrap_or_else(|| {
				node.group
					.map(|g| COLORS[g as usize % COLORS.len()].into())
					.unwrap_or(COLORS[0].into())
			});
			let idx = graph.add_node(NodeData {
				x: 0.0,
				y: 0.0,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					color,
					radius: node.size.unwrap_or(NODE_RADIUS),
					hidden: node.is_hidden(),
					level: levels.get(&node.id).copied().unwrap_or(0),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let mut edge_infos = Vec::with_capacity(edges.len());
		for edge in edges {
			match (id_to_idx.get(&edge.from), id_to_idx.get(&edge.to)) {
				(Some(&from), Some(&to)) => {
					graph.add_edge(from, to, EdgeData::default());
					edge_infos.push(EdgeInfo {
						from,
						to,
						smooth: edge.smooth,
						label: edge.label.clone(),
					});
				}
				_ => warn!("skipping edge {} -> {}: unknown endpoint", edge.from, edge.to),
			}
		}

		let height = options.height;
		let mut scene = Self {
			graph,
			edges: edge_infos,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			options,
			width,
			height,
		};
		scene.seed_positions();
		scene
	}

	/// Spreads the nodes of each level evenly across the cross axis, in insertion order.
	fn seed_positions(&mut self) {
		let mut per_level: HashMap<usize, usize> = HashMap::new();
		self.graph.visit_nodes(|node| {
			*per_level.entry(node.data.user_data.level).or_insert(0) += 1;
		});

		let layout = &self.options.layout;
		let (spacing, separation, direction) =
			(layout.node_spacing, layout.level_separation, layout.direction);
		let mut slots: HashMap<usize, usize> = HashMap::new();
		self.graph.visit_nodes_mut(|node| {
			let level = node.data.user_data.level;
			let slot = slots.entry(level).or_insert(0);
			let count = per_level.get(&level).copied().unwrap_or(1);
			let cross = (*slot as f64 - (count as f64 - 1.0) / 2.0) * spacing;
			*slot += 1;
			let along = level as f64 * separation;
			let (x, y) = match direction {
				LayoutDirection::UpDown => (cross, along),
				LayoutDirection::LeftRight => (along, cross),
			};
			node.data.x = x as f32;
			node.data.y = y as f32;
		});
	}

	/// Merges `update` into the scene options, resizing and re-laying out as needed.
	///
	/// Returns whether anything changed.
	pub fn apply_options(&mut self, update: &OptionsUpdate) -> bool {
		let direction = self.options.layout.direction;
		if !self.options.apply(update) {
			return false;
		}
		if self.options.height != self.height {
			self.resize(self.width, self.options.height);
		}
		if self.options.layout.direction != direction {
			self.seed_positions();
			self.fit();
		}
		true
	}

	/// Advances the simulation, then pins every node back onto its level.
	pub fn tick(&mut self, dt: f32) {
		if !self.options.physics.enabled {
			return;
		}
		self.graph.update(dt);
		if !self.options.layout.enabled {
			return;
		}
		let (separation, direction) = (
			self.options.layout.level_separation as f32,
			self.options.layout.direction,
		);
		self.graph.visit_nodes_mut(|node| {
			let along = node.data.user_data.level as f32 * separation;
			match direction {
				LayoutDirection::UpDown => node.data.y = along,
				LayoutDirection::LeftRight => node.data.x = along,
			}
		});
	}

	pub fn stabilize(&mut self) {
		let iterations = self.options.physics.stabilization_iterations;
		for _ in 0..iterations {
			self.tick(FRAME_DT);
		}
		debug!("layout stabilized after {iterations} iterations");
		self.fit();
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	/// Centers the visible nodes and zooms so they fill the canvas.
	pub fn fit(&mut self) {
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		self.graph.visit_nodes(|node| {
			if node.data.user_data.hidden {
				return;
			}
			let (x, y, r) = (node.x() as f64, node.y() as f64, node.data.user_data.radius);
			min_x = min_x.min(x - r);
			min_y = min_y.min(y - r);
			max_x = max_x.max(x + r);
			max_y = max_y.max(y + r);
		});
		if !min_x.is_finite() {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		}

		let (bw, bh) = (max_x - min_x + 2.0 * FIT_MARGIN, max_y - min_y + 2.0 * FIT_MARGIN);
		let k = (self.width / bw).min(self.height / bh).clamp(MIN_ZOOM, 1.0);
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Zooms by `factor` keeping the graph point under `(sx, sy)` in place.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		if !self.options.interaction.zoom_view {
			return;
		}
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn zoom(&mut self, factor: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	/// Topmost visible node under the screen point, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			if info.hidden {
				return;
			}
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < info.radius.max(HIT_RADIUS) {
				found = Some(node.index());
			}
		});
		found
	}

	/// Starts dragging the node under the pointer when nodes are draggable, panning otherwise.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		let hit = self
			.options
			.interaction
			.drag_nodes
			.then(|| self.node_at_position(x, y))
			.flatten();
		if let Some(idx) = hit {
			let (mut node_x, mut node_y) = (0.0, 0.0);
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					(node_x, node_y) = (node.x(), node.y());
				}
			});
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: node_x,
				node_start_y: node_y,
			};
		} else if self.options.interaction.drag_view {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if let (true, Some(idx)) = (self.drag.active, self.drag.node_idx) {
			let (dx, dy) = (
				(x - self.drag.start_x) / self.transform.k,
				(y - self.drag.start_y) / self.transform.k,
			);
			let (nx, ny) = (
				self.drag.node_start_x + dx as f32,
				self.drag.node_start_y + dy as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	pub fn pointer_up(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::scenario_graph::classify::{classify_edges, classify_nodes};
	use crate::components::scenario_graph::types::{GraphEdge, GraphNode};

	fn scene() -> Scene {
		let mut start = GraphNode::new("s", "Start");
		start.is_entry_node = Some(true);
		let nodes = classify_nodes(&[
			start,
			GraphNode::new("c", "condition"),
			GraphNode::new("a", "Inject A"),
			GraphNode::new("b", "Inject B"),
		]);
		let edges = classify_edges(&[
			GraphEdge::new("s", "c"),
			GraphEdge::new("c", "a"),
			GraphEdge::new("c", "b"),
			GraphEdge::new("c", "b"),
			GraphEdge::new("b", "missing"),
		]);
		Scene::new(&nodes, &edges, GraphOptions::with_height(600.0), 800.0)
	}

	fn info(scene: &Scene) -> Vec<NodeInfo> {
		let mut infos = Vec::new();
		scene.graph.visit_nodes(|node| infos.push(node.data.user_data.clone()));
		infos
	}

	#[test]
	fn builds_nodes_with_levels_and_styles() {
		let scene = scene();
		let infos = info(&scene);
		let start = infos.iter().find(|n| n.label == "Start:entry point").unwrap();
		assert_eq!(start.level, 0);
		assert_eq!(start.color, "orange");
		let condition = infos.iter().find(|n| n.hidden).unwrap();
		assert_eq!(condition.level, 1);
		assert_eq!(condition.radius, 5.0);
		assert!(infos.iter().filter(|n| n.level == 2).count() == 2);
	}

	#[test]
	fn skips_edges_with_unknown_endpoints() {
		let scene = scene();
		assert_eq!(scene.edges.len(), 4);
		assert!(scene.edges.iter().all(|e| e.smooth.is_some()));
	}

	#[test]
	fn ticks_keep_nodes_on_their_level() {
		let mut scene = scene();
		for _ in 0..50 {
			scene.tick(FRAME_DT);
		}
		let separation = scene.options.layout.level_separation;
		scene.graph.visit_nodes(|node| {
			let expected = node.data.user_data.level as f64 * separation;
			assert!((node.y() as f64 - expected).abs() < 1e-3);
		});
	}

	#[test]
	fn fit_centers_visible_nodes_within_zoom_bounds() {
		let mut scene = scene();
		scene.stabilize();
		assert!(scene.transform.k >= MIN_ZOOM && scene.transform.k <= 1.0);
		let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
		let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
		scene.graph.visit_nodes(|node| {
			if !node.data.user_data.hidden {
				let (x, y, r) = (node.x() as f64, node.y() as f64, node.data.user_data.radius);
				min_x = min_x.min(x - r);
				max_x = max_x.max(x + r);
				min_y = min_y.min(y - r);
				max_y = max_y.max(y + r);
			}
		});
		let center_x = (min_x + max_x) / 2.0 * scene.transform.k + scene.transform.x;
		let center_y = (min_y + max_y) / 2.0 * scene.transform.k + scene.transform.y;
		assert!((center_x - scene.width / 2.0).abs() < 1e-6);
		assert!((center_y - scene.height / 2.0).abs() < 1e-6);
	}

	#[test]
	fn zoom_is_clamped_and_keeps_anchor_point() {
		let mut scene = scene();
		let before = scene.screen_to_graph(100.0, 50.0);
		scene.zoom_at(100.0, 50.0, 1.1);
		let after = scene.screen_to_graph(100.0, 50.0);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);

		for _ in 0..100 {
			scene.zoom(0.5);
		}
		assert_eq!(scene.transform.k, MIN_ZOOM);
	}

	fn screen_position(scene: &Scene, idx: DefaultNodeIdx) -> (f64, f64) {
		let (x, y) = scene.positions()[&idx];
		(
			x * scene.transform.k + scene.transform.x,
			y * scene.transform.k + scene.transform.y,
		)
	}

	#[test]
	fn panning_moves_view_only_while_active() {
		let mut scene = scene();
		let (x0, y0) = (scene.transform.x, scene.transform.y);
		scene.pointer_move(50.0, 50.0);
		assert_eq!((scene.transform.x, scene.transform.y), (x0, y0));

		scene.pointer_down(-1000.0, -1000.0);
		scene.pointer_move(-980.0, -1005.0);
		assert_eq!((scene.transform.x, scene.transform.y), (x0 + 20.0, y0 - 5.0));
		scene.pointer_up();
		scene.pointer_move(100.0, 100.0);
		assert_eq!((scene.transform.x, scene.transform.y), (x0 + 20.0, y0 - 5.0));
	}

	#[test]
	fn pressing_on_a_node_pans_when_nodes_are_not_draggable() {
		let mut scene = scene();
		assert!(!scene.options.interaction.drag_nodes);
		let idx = *scene.positions().keys().next().unwrap();
		let (sx, sy) = screen_position(&scene, idx);
		let (before, transform_x) = (scene.positions(), scene.transform.x);

		scene.pointer_down(sx, sy);
		scene.pointer_move(sx + 30.0, sy);
		scene.pointer_up();
		assert_eq!(scene.positions(), before);
		assert_eq!(scene.transform.x, transform_x + 30.0);
	}

	#[test]
	fn enabled_dragging_moves_the_hit_node() {
		let mut scene = scene();
		scene.options.interaction.drag_nodes = true;
		let idx = scene
			.positions()
			.into_keys()
			.find(|idx| {
				let mut hidden = false;
				scene.graph.visit_nodes(|node| {
					if node.index() == *idx {
						hidden = node.data.user_data.hidden;
					}
				});
				!hidden
			})
			.unwrap();
		let (x0, y0) = scene.positions()[&idx];
		let (sx, sy) = screen_position(&scene, idx);
		let transform_x = scene.transform.x;

		scene.pointer_down(sx, sy);
		scene.pointer_move(sx + 30.0, sy);
		scene.pointer_up();

		let (x1, y1) = scene.positions()[&idx];
		assert!((x1 - (x0 + 30.0 / scene.transform.k)).abs() < 1e-3);
		assert!((y1 - y0).abs() < 1e-3);
		assert_eq!(scene.transform.x, transform_x);
	}

	#[test]
	fn height_updates_resize_the_scene_and_unchanged_updates_are_skipped() {
		let mut scene = scene();
		assert!(!scene.apply_options(&OptionsUpdate::default()));
		assert!(!scene.apply_options(&OptionsUpdate::height(600.0)));
		assert_eq!(scene.height, 600.0);

		assert!(scene.apply_options(&OptionsUpdate::height(420.0)));
		assert_eq!(scene.height, 420.0);
		assert_eq!(scene.width, 800.0);
	}

	#[test]
	fn switching_direction_relays_siblings_apart() {
		let mut start = GraphNode::new("s", "Start");
		start.is_entry_node = Some(true);
		let nodes = classify_nodes(&[start, GraphNode::new("a", "A"), GraphNode::new("b", "B")]);
		let edges = classify_edges(&[GraphEdge::new("s", "a"), GraphEdge::new("s", "b")]);
		let mut scene = Scene::new(&nodes, &edges, GraphOptions::with_height(600.0), 800.0);
		scene.stabilize();

		let update = OptionsUpdate {
			direction: Some(LayoutDirection::LeftRight),
			..OptionsUpdate::default()
		};
		assert!(scene.apply_options(&update));
		for _ in 0..300 {
			scene.tick(FRAME_DT);
		}

		let separation = scene.options.layout.level_separation;
		let mut siblings = Vec::new();
		scene.graph.visit_nodes(|node| {
			let expected = node.data.user_data.level as f64 * separation;
			assert!((node.x() as f64 - expected).abs() < 1e-3);
			if node.data.user_data.level == 1 {
				siblings.push(node.y() as f64);
			}
		});
		assert_eq!(siblings.len(), 2);
		assert!((siblings[0] - siblings[1]).abs() > 1.0);
	}

	#[test]
	fn disabled_physics_freezes_layout() {
		let mut scene = scene();
		scene.options.physics.enabled = false;
		let before = scene.positions();
		scene.tick(FRAME_DT);
		assert_eq!(before, scene.positions());
	}

	#[test]
	fn empty_scene_fits_to_identity() {
		let mut scene = Scene::new(&[], &[], GraphOptions::with_height(300.0), 400.0);
		scene.stabilize();
		assert_eq!(scene.transform.k, 1.0);
		assert_eq!((scene.transform.x, scene.transform.y), (200.0, 150.0));
	}
}
