//! Scenario graph view: node and edge classification, rendering and its browser wiring.

mod canvas;
mod classify;
mod component;
mod draw;
mod engine;
mod error;
mod geometry;
mod hierarchy;
mod options;
mod scene;
mod types;
mod viewport;

pub use component::ScenarioGraph;
pub use options::LayoutDirection;
pub use types::GraphData;
