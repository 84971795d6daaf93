//! Adjacency of meshed gears

use super::GearId;

/// Undirected graph of gears whose teeth interlock.
///
/// Neighbours are kept in insertion order so that every traversal over the graph
/// is reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GearGraph {
	adjacency: Vec<Option<Vec<GearId>>>,
}

impl GearGraph {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains(&self, gear: GearId) -> bool {
		matches!(self.adjacency.get(gear.0), Some(Some(_)))
	}

	/// Registers a node, registering a gear twice is a no-op
	pub fn add_gear(&mut self, gear: GearId) {
		if self.contains(gear) {
			log::warn!("Gear {gear:?} already exists in the graph");
			return;
		}
		if self.adjacency.len() <= gear.0 {
			self.adjacency.resize(gear.0 + 1, None);
		}
		self.adjacency[gear.0] = Some(Vec::new());
	}

	/// Deregisters a node along with all of its edges
	pub fn remove_gear(&mut self, gear: GearId) {
		if !self.contains(gear) {
			log::warn!("Gear {gear:?} does not exist in the graph");
			return;
		}
		self.clear_edges_of(gear);
		self.adjacency[gear.0] = None;
	}

	/// Registers a meshing between two gears.
	/// Returns whether a new edge was created.
	pub fn add_edge(&mut self, a: GearId, b: GearId) -> bool {
		if !self.contains(a) || !self.contains(b) {
			log::warn!("Gears {a:?} and {b:?} are not both registered in the graph");
			return false;
		}
		if a == b {
			log::warn!("Gear {a:?} cannot mesh with itself");
			return false;
		}
		if self.has_edge(a, b) || self.has_edge(b, a) {
			log::warn!("Gears {a:?} and {b:?} are already touching");
			return false;
		}
		self.push_neighbor(a, b);
		self.push_neighbor(b, a);
		true
	}

	fn push_neighbor(&mut self, gear: GearId, neighbor: GearId) {
		if let Some(Some(neighbors)) = self.adjacency.get_mut(gear.0) {
			neighbors.push(neighbor);
		}
	}

	/// Whether `b` is listed among the neighbours of `a`
	pub fn has_edge(&self, a: GearId, b: GearId) -> bool {
		self.neighbors(a).contains(&b)
	}

	/// Removes all edges touching `gear`
	pub fn clear_edges_of(&mut self, gear: GearId) {
		if let Some(Some(neighbors)) = self.adjacency.get_mut(gear.0) {
			neighbors.clear();
		}
		for neighbors in self.adjacency.iter_mut().flatten() {
			neighbors.retain(|&n| n != gear);
		}
	}

	/// Neighbours of `gear` in the order the edges were added
	pub fn neighbors(&self, gear: GearId) -> &[GearId] {
		match self.adjacency.get(gear.0) {
			Some(Some(neighbors)) => neighbors,
			_ => &[],
		}
	}

	/// Total number of undirected edges
	pub fn edge_count(&self) -> usize {
		self.adjacency.iter().flatten().map(Vec::len).sum::<usize>() / 2
	}

	pub fn clear(&mut self) {
		self.adjacency.clear();
	}

	/// Finds a path from `from` to `to` that does not use the direct edge between them.
	///
	/// The search is depth-first in neighbour insertion order and returns the first
	/// path found, listing every gear walked after `from` and ending with `to`.
	pub fn find_alternate_path(&self, from: GearId, to: GearId) -> Option<Vec<GearId>> {
		let mut visited = vec![false; self.adjacency.len()];
		let mut path = Vec::new();
		if self.find_path_recursive(from, from, to, &mut visited, &mut path) {
			Some(path)
		} else {
			None
		}
	}

	fn find_path_recursive(
		&self,
		origin: GearId,
		current: GearId,
		target: GearId,
		visited: &mut Vec<bool>,
		path: &mut Vec<GearId>,
	) -> bool {
		visited[current.0] = true;
		for &neighbor in self.neighbors(current) {
			if neighbor == target {
				if current == origin {
					// The edge being tested
					continue;
				}
				path.push(target);
				return true;
			}
			if visited[neighbor.0] {
				continue;
			}
			path.push(neighbor);
			if self.find_path_recursive(origin, neighbor, target, visited, path) {
				return true;
			}
			path.pop();
		}
		visited[current.0] = false;
		false
	}
}
