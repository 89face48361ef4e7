//! Renderer configuration and the viewport height policy.

/// Vertical space reserved for the page chrome around the graph.
pub const CHROME_OFFSET: f64 = 120.0;

/// Height the graph may occupy inside a viewport of `viewport_height` pixels.
pub fn graph_height(viewport_height: f64) -> f64 {
	(viewport_height - CHROME_OFFSET).max(0.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutDirection {
	UpDown,
	LeftRight,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HierarchicalLayout {
	pub enabled: bool,
	pub direction: LayoutDirection,
	pub level_separation: f64,
	pub node_spacing: f64,
}

impl Default for HierarchicalLayout {
	fn default() -> Self {
		Self {
			enabled: true,
			direction: LayoutDirection::UpDown,
			level_separation: 150.0,
			node_spacing: 140.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Interaction {
	pub drag_nodes: bool,
	pub drag_view: bool,
	pub zoom_view: bool,
	pub navigation_buttons: bool,
}

impl Default for Interaction {
	fn default() -> Self {
		Self {
			drag_nodes: false,
			drag_view: true,
			zoom_view: true,
			navigation_buttons: true,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Physics {
	pub enabled: bool,
	/// Preferred distance between neighbouring nodes.
	pub node_distance: f64,
	/// 0 keeps plain repulsion, 1 pushes nodes fully apart.
	pub avoid_overlap: f64,
	pub spring: f64,
	pub damping: f64,
	pub stabilization_iterations: usize,
}

impl Default for Physics {
	fn default() -> Self {
		Self {
			enabled: true,
			node_distance: 150.0,
			avoid_overlap: 0.5,
			spring: 0.05,
			damping: 0.9,
			stabilization_iterations: 300,
		}
	}
}

impl Physics {
	/// Repulsion strength fed to the simulation.
	pub fn charge(&self) -> f64 {
		self.node_distance * (1.0 + self.avoid_overlap.clamp(0.0, 1.0))
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphOptions {
	pub height: f64,
	pub layout: HierarchicalLayout,
	pub interaction: Interaction,
	pub physics: Physics,
}

impl GraphOptions {
	pub fn with_height(height: f64) -> Self {
		Self {
			height,
			..Self::default()
		}
	}

	/// Merges the fields set in `update`. Returns whether anything changed.
	pub fn apply(&mut self, update: &OptionsUpdate) -> bool {
		let before = self.clone();
		if let Some(height) = update.height {
			self.height = height;
		}
		if let Some(enabled) = update.physics_enabled {
			self.physics.enabled = enabled;
		}
		if let Some(direction) = update.direction {
			self.layout.direction = direction;
		}
		*self != before
	}
}

/// Partial configuration pushed into a live graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionsUpdate {
	pub height: Option<f64>,
	pub physics_enabled: Option<bool>,
	pub direction: Option<LayoutDirection>,
}

impl OptionsUpdate {
	pub fn height(height: f64) -> Self {
		Self {
			height: Some(height),
			..Self::default()
		}
	}
}
