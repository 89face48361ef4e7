use std::collections::{HashMap, HashSet, VecDeque};

use super::types::{GraphEdge, GraphNode, NodeId};

/// Drains `queue`, placing each unlevelled successor one level below its predecessor.
fn descend<'a>(
	successors: &HashMap<&'a NodeId, Vec<&'a NodeId>>,
	levels: &mut HashMap<NodeId, usize>,
	queue: &mut VecDeque<(&'a NodeId, usize)>,
) {
	while let Some((id, level)) = queue.pop_front() {
		for next in successors.get(id).into_iter().flatten() {
			if !levels.contains_key(*next) {
				levels.insert((*next).clone(), level + 1);
				queue.push_back((*next, level + 1));
			}
		}
	}
}

/// Assigns every node a layout level.
///
/// A level delivered by the server is kept as is. The remaining nodes are reached by
/// breadth-first search along edge direction, one level below their predecessor, starting
/// from the server-levelled nodes, then from entry nodes, or from nodes without incoming
/// edges when the graph has no entry node. Nodes still unreached afterwards (cycles
/// without a root) seed further passes in input order.
pub fn assign_levels(nodes: &[GraphNode], edges: &[GraphEdge]) -> HashMap<NodeId, usize> {
	let known: HashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();
	let mut successors: HashMap<&NodeId, Vec<&NodeId>> = HashMap::new();
	let mut has_incoming: HashSet<&NodeId> = HashSet::new();
	for edge in edges {
		if known.contains(&edge.from) && known.contains(&edge.to) {
			successors.entry(&edge.from).or_default().push(&edge.to);
			if edge.from != edge.to {
				has_incoming.insert(&edge.to);
			}
		}
	}

	let mut levels: HashMap<NodeId, usize> = HashMap::with_capacity(nodes.len());
	let mut queue: VecDeque<(&NodeId, usize)> = VecDeque::new();
	for node in nodes {
		if let Some(level) = node.level {
			levels.insert(node.id.clone(), level);
			queue.push_back((&node.id, level));
		}
	}
	descend(&successors, &mut levels, &mut queue);

	let mut roots: Vec<&NodeId> = nodes.iter().filter(|n| n.is_entry()).map(|n| &n.id).collect();
	if roots.is_empty() {
		roots = nodes
			.iter()
			.map(|n| &n.id)
			.filter(|id| !has_incoming.contains(id))
			.collect();
	}
	let seeds = roots.into_iter().chain(nodes.iter().map(|n| &n.id));
	for seed in seeds {
		if levels.contains_key(seed) {
			continue;
		}
		levels.insert(seed.clone(), 0);
		queue.push_back((seed, 0));
		descend(&successors, &mut levels, &mut queue);
	}
	levels
}
