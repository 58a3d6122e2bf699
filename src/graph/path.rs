//! Shortest connection between two nodes.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use super::store::GraphStore;
use super::types::Edge;

/// An ordered chain of nodes and the edges linking them.
///
/// `edges[i]` joins `nodes[i]` and `nodes[i + 1]`, in either direction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphPath<'a> {
	/// Node ids from start to end, inclusive.
	pub nodes: Vec<&'a str>,
	/// Edges walked, in order.
	pub edges: Vec<&'a Edge>,
}

/// Unweighted shortest path over every edge kind, ignoring edge direction.
///
/// Ties go to whichever edge the adjacency index lists first. Returns `None`
/// when either node is unknown or they are not connected.
pub fn find_path<'a>(store: &'a GraphStore, from: &str, to: &str) -> Option<GraphPath<'a>> {
	let start = store.node(from)?.id.as_str();
	let goal = store.node(to)?.id.as_str();

	let mut visited: HashSet<&'a str> = HashSet::from([start]);
	let mut prev: HashMap<&'a str, (&'a str, &'a Edge)> = HashMap::new();
	let mut queue = VecDeque::from([start]);

	while let Some(current) = queue.pop_front() {
		if current == goal {
			return Some(unwind(&prev, start, goal));
		}
		for edge in store.edges_touching(current) {
			let Some(next) = edge.other_end(current) else {
				continue;
			};
			if !visited.insert(next) {
				continue;
			}
			prev.insert(next, (current, edge));
			queue.push_back(next);
		}
	}
	None
}

fn unwind<'a>(prev: &HashMap<&'a str, (&'a str, &'a Edge)>, start: &'a str, goal: &'a str) -> GraphPath<'a> {
	let mut nodes = vec![goal];
	let mut edges = Vec::new();
	let mut node = goal;
	while node != start {
		let (parent, edge) = prev[node];
		edges.push(edge);
		nodes.push(parent);
		node = parent;
	}
	nodes.reverse();
	edges.reverse();
	GraphPath { nodes, edges }
}
