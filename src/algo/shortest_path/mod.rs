//! Shortest path distances along centerline edges.
//!
//! Boundary and junction edges both need graph distances measured along the
//! vessel path rather than straight-line distances. This module provides a
//! weighted undirected [`Adjacency`] (edge weight = Euclidean length) and a
//! single-source Dijkstra search over it.
//!
//! # Example
//!
//! ```
//! use vasgraph::algo::shortest_path::Adjacency;
//! use vasgraph::centerline::EdgeList;
//! use nalgebra::Point3;
//!
//! let points: Vec<_> = (0..3).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
//! let edges: EdgeList = [(0, 1), (1, 2)].into_iter().collect();
//!
//! let adjacency = Adjacency::new(&points, &edges);
//! let result = adjacency.dijkstra(2).unwrap();
//! assert!((result.distance(0) - 2.0).abs() < 1e-12);
//! assert_eq!(result.path_to(0), Some(vec![2, 1, 0]));
//! ```

mod dijkstra;

pub use dijkstra::Adjacency;

/// Result of a single-source shortest path search.
///
/// Every node is reachable: a search that leaves nodes at infinite distance
/// fails with [`GraphError::UnreachableNodes`](crate::error::GraphError::UnreachableNodes)
/// instead of producing a result.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: usize,
    distances: Vec<f64>,
    predecessors: Vec<Option<usize>>,
}

impl ShortestPaths {
    pub(crate) fn new(source: usize, distances: Vec<f64>, predecessors: Vec<Option<usize>>) -> Self {
        Self {
            source,
            distances,
            predecessors,
        }
    }

    /// The node the search started from.
    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Distance from the source to `v`.
    #[inline]
    pub fn distance(&self, v: usize) -> f64 {
        self.distances[v]
    }

    /// All distances, indexed by node.
    #[inline]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Previous node on the shortest path to `v`, `None` for the source.
    #[inline]
    pub fn predecessor(&self, v: usize) -> Option<usize> {
        self.predecessors[v]
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// The node farthest from the source and its distance.
    pub fn farthest(&self) -> Option<(usize, f64)> {
        self.distances
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, d)| match best {
                Some((_, bd)) if bd >= d => best,
                _ => Some((i, d)),
            })
    }

    /// Reconstruct the shortest path from the source to `target`.
    ///
    /// The returned path includes both endpoints. Returns `None` if `target`
    /// is out of range.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if target >= self.len() {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(pred) = self.predecessors[current] {
            path.push(pred);
            current = pred;

            if path.len() > self.len() {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}
