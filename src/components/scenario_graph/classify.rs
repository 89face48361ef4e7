use std::collections::HashMap;

use log::debug;

use super::types::{Arrow, GraphEdge, GraphNode, NodeId, Orientation, RenderEdge, RenderNode, Smooth};

pub const ENTRY_COLOR: &str = "orange";
pub const ENTRY_SUFFIX: &str = ":entry point";
pub const CONDITION_LABEL: &str = "condition";
pub const CONDITION_COLOR: &str = "#9467bd";
pub const CONDITION_SIZE: f64 = 5.0;

pub const BASE_ROUNDNESS: f64 = 0.4;
pub const ROUNDNESS_STEP: f64 = 0.3;

/// Applies the entry and condition styling rules, leaving every other node as delivered.
pub fn classify_nodes(nodes: &[GraphNode]) -> Vec<RenderNode> {
	let classified: Vec<RenderNode> = nodes.iter().map(classify_node).collect();
	debug!("classified {} nodes", classified.len());
	classified
}

fn classify_node(node: &GraphNode) -> RenderNode {
	let mut out = node.clone();
	if node.is_entry() {
		out.label.push_str(ENTRY_SUFFIX);
		out.color = Some(ENTRY_COLOR.into());
	} else if node.label == CONDITION_LABEL {
		out.label.clear();
		out.size = Some(CONDITION_SIZE);
		out.color = Some(CONDITION_COLOR.into());
		out.hidden = Some(true);
	}
	out
}

/// Adds arrowheads and gives each undescribed edge of a `(from, to)` group its own curvature.
///
/// The n-th undescribed edge of a group (counting from zero, in input order) gets roundness
/// `0.4 + 0.3 * n`, clockwise for even `n` and counter-clockwise for odd `n`. Edges that
/// already carry a descriptor keep it, so running this on its own output changes nothing.
pub fn classify_edges(edges: &[GraphEdge]) -> Vec<RenderEdge> {
	let mut seen: HashMap<(&NodeId, &NodeId), usize> = HashMap::new();
	let classified: Vec<RenderEdge> = edges
		.iter()
		.map(|edge| {
			let mut out = edge.clone();
			out.arrows = Some(Arrow::To);
			if out.smooth.is_none() {
				let n = seen.entry((&edge.from, &edge.to)).or_insert(0);
				out.smooth = Some(group_smooth(*n));
				*n += 1;
			}
			out
		})
		.collect();
	debug!(
		"classified {} edges across {} parallel groups",
		classified.len(),
		seen.len()
	);
	classified
}

fn group_smooth(n: usize) -> Smooth {
	let orientation = if n % 2 == 0 {
		Orientation::Clockwise
	} else {
		Orientation::CounterClockwise
	};
	Smooth {
		orientation,
		roundness: BASE_ROUNDNESS + ROUNDNESS_STEP * n as f64,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn approx(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn entry_node_gets_suffix_and_entry_color() {
		let mut node = GraphNode::new(1, "condition");
		node.is_entry_node = Some(true);
		node.color = Some("blue".into());

		let out = classify_nodes(&[node]);
		assert_eq!(out[0].label, "condition:entry point");
		assert_eq!(out[0].color.as_deref(), Some(ENTRY_COLOR));
		assert_eq!(out[0].hidden, None);
		assert_eq!(out[0].id, NodeId::Int(1));
	}

	#[test]
	fn condition_node_is_hidden_small_and_unlabelled() {
		let out = classify_nodes(&[GraphNode::new("c", "condition")]);
		assert_eq!(out[0].label, "");
		assert_eq!(out[0].hidden, Some(true));
		assert_eq!(out[0].size, Some(CONDITION_SIZE));
		assert_eq!(out[0].color.as_deref(), Some(CONDITION_COLOR));
		assert_ne!(CONDITION_COLOR, ENTRY_COLOR);
	}

	#[test]
	fn explicit_false_entry_flag_still_allows_condition_rule() {
		let mut node = GraphNode::new("c", "condition");
		node.is_entry_node = Some(false);
		assert_eq!(classify_nodes(&[node])[0].hidden, Some(true));
	}

	#[test]
	fn other_nodes_pass_through_unchanged() {
		let mut node = GraphNode::new(7, "Conditions apply");
		node.color = Some("#123456".into());
		node.size = Some(30.0);
		node.group = Some(2);
		node.title = Some("inject".into());
		let plain = GraphNode::new("x", "Condition");

		let out = classify_nodes(&[node.clone(), plain.clone()]);
		assert_eq!(out, vec![node, plain]);
	}

	#[test]
	fn parallel_edges_get_growing_alternating_curvature() {
		let edges = vec![
			GraphEdge::new("A", "B"),
			GraphEdge::new("A", "B"),
			GraphEdge::new("A", "B"),
		];
		let out = classify_edges(&edges);
		let smooth: Vec<Smooth> = out.iter().map(|e| e.smooth.unwrap()).collect();

		assert!(approx(smooth[0].roundness, 0.4));
		assert!(approx(smooth[1].roundness, 0.7));
		assert!(approx(smooth[2].roundness, 1.0));
		assert_eq!(smooth[0].orientation, Orientation::Clockwise);
		assert_eq!(smooth[1].orientation, Orientation::CounterClockwise);
		assert_eq!(smooth[2].orientation, Orientation::Clockwise);
		assert!(out.iter().all(|e| e.arrows == Some(Arrow::To)));
	}

	#[test]
	fn groups_are_keyed_by_direction() {
		let edges = vec![
			GraphEdge::new("A", "B"),
			GraphEdge::new("B", "A"),
			GraphEdge::new("A", "C"),
			GraphEdge::new("A", "B"),
		];
		let out = classify_edges(&edges);
		for single in &out[1..3] {
			let smooth = single.smooth.unwrap();
			assert!(approx(smooth.roundness, BASE_ROUNDNESS));
			assert_eq!(smooth.orientation, Orientation::Clockwise);
		}
		let second = out[3].smooth.unwrap();
		assert!(approx(second.roundness, 0.7));
		assert_eq!(second.orientation, Orientation::CounterClockwise);
	}

	#[test]
	fn existing_descriptors_are_kept_and_rerun_is_a_no_op() {
		let preset = Smooth {
			orientation: Orientation::CounterClockwise,
			roundness: 0.15,
		};
		let mut first = GraphEdge::new("A", "B");
		first.smooth = Some(preset);
		let edges = vec![first, GraphEdge::new("A", "B"), GraphEdge::new("A", "B")];

		let once = classify_edges(&edges);
		assert_eq!(once[0].smooth, Some(preset));
		assert!(approx(once[1].smooth.unwrap().roundness, 0.4));
		assert!(approx(once[2].smooth.unwrap().roundness, 0.7));

		let twice = classify_edges(&once);
		assert_eq!(once, twice);
	}

	#[test]
	fn order_and_count_are_preserved() {
		let edges = vec![
			GraphEdge::new(1, 2),
			GraphEdge::new(2, 3),
			GraphEdge::new(1, 2),
			GraphEdge::new(3, 1),
		];
		let out = classify_edges(&edges);
		assert_eq!(out.len(), edges.len());
		for (input, output) in edges.iter().zip(&out) {
			assert_eq!((&input.from, &input.to), (&output.from, &output.to));
		}
		assert!(edges.iter().all(|e| e.smooth.is_none()));
	}

	#[test]
	fn empty_inputs_yield_empty_outputs() {
		assert!(classify_nodes(&[]).is_empty());
		assert!(classify_edges(&[]).is_empty());
	}
}
