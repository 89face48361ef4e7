use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::GraphDataError;

/// Identifier of a node as delivered by the server, either numeric or textual.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
	Int(i64),
	Text(String),
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Int(id) => write!(f, "{id}"),
			NodeId::Text(id) => f.write_str(id),
		}
	}
}

impl Default for NodeId {
	fn default() -> Self {
		NodeId::Text(String::new())
	}
}

impl From<i64> for NodeId {
	fn from(id: i64) -> Self {
		NodeId::Int(id)
	}
}

impl From<i32> for NodeId {
	fn from(id: i32) -> Self {
		NodeId::Int(id.into())
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		NodeId::Text(id.to_owned())
	}
}

impl From<String> for NodeId {
	fn from(id: String) -> Self {
		NodeId::Text(id)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: NodeId,
	#[serde(default)]
	pub label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_entry_node: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hidden: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub group: Option<u32>,
	/// Layout level assigned by the server; computed from the edges when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub level: Option<usize>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
}

impl GraphNode {
	#[cfg(test)]
	pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			..Self::default()
		}
	}

	/// Absence of the flag counts as `false`.
	pub fn is_entry(&self) -> bool {
		self.is_entry_node.unwrap_or(false)
	}

	pub fn is_hidden(&self) -> bool {
		self.hidden.unwrap_or(false)
	}
}

/// Bend direction of a curved edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
	#[serde(rename = "curvedCW")]
	Clockwise,
	#[serde(rename = "curvedCCW")]
	CounterClockwise,
}

impl Orientation {
	/// Side of the straight connection the curve bulges towards.
	pub fn sign(self) -> f64 {
		match self {
			Orientation::Clockwise => 1.0,
			Orientation::CounterClockwise => -1.0,
		}
	}
}

/// Curvature descriptor of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Smooth {
	#[serde(rename = "type")]
	pub orientation: Orientation,
	pub roundness: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrow {
	To,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	pub from: NodeId,
	pub to: NodeId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub smooth: Option<Smooth>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub arrows: Option<Arrow>,
}

#[cfg(test)]
impl GraphEdge {
	pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
			..Self::default()
		}
	}
}

/// A node after classification, ready to hand to a drawing engine.
pub type RenderNode = GraphNode;

/// An edge after disambiguation, ready to hand to a drawing engine.
pub type RenderEdge = GraphEdge;

/// Node and edge lists of a scenario graph as computed by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	pub fn from_json(json: &str) -> Result<Self, GraphDataError> {
		Ok(serde_json::from_str(json)?)
	}
}
