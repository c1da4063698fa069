//! Label-setting Dijkstra search.
//!
//! Centerline graphs have at most a few thousand nodes, so the frontier is
//! scanned linearly instead of kept in a heap. The scan visits nodes in index
//! order and only replaces the current best on a strictly smaller distance,
//! which makes the lowest index win distance ties.

use nalgebra::Point3;

use crate::centerline::EdgeList;
use crate::error::{GraphError, Result};

use super::ShortestPaths;

/// Weighted undirected adjacency built from an edge list.
///
/// Every stored edge is usable in both directions; its weight is the
/// Euclidean distance between its endpoints. Building the adjacency once and
/// running several searches over it is cheaper than rebuilding per source.
#[derive(Debug, Clone)]
pub struct Adjacency {
    neighbors: Vec<Vec<(usize, f64)>>,
}

impl Adjacency {
    /// Build the adjacency of `edges` over `points`.
    ///
    /// Self loops are ignored. Parallel edges are kept; they do not change
    /// any distance.
    pub fn new(points: &[Point3<f64>], edges: &EdgeList) -> Self {
        let mut neighbors = vec![Vec::new(); points.len()];

        for (s, t) in edges.iter() {
            if s == t {
                continue;
            }
            let w = (points[t] - points[s]).norm();
            neighbors[s].push((t, w));
            neighbors[t].push((s, w));
        }

        Self { neighbors }
    }

    /// Number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.neighbors.len()
    }

    /// Neighbors of `v` with edge weights.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[(usize, f64)] {
        &self.neighbors[v]
    }

    /// Compute shortest path distances from `source` to every node.
    ///
    /// Fails with [`GraphError::UnreachableNodes`] if the graph is not
    /// connected, and with [`GraphError::InvalidInput`] if `source` is out of
    /// range.
    pub fn dijkstra(&self, source: usize) -> Result<ShortestPaths> {
        let n = self.num_nodes();
        if source >= n {
            return Err(GraphError::InvalidInput(format!(
                "shortest path source {} out of range for {} nodes",
                source, n
            )));
        }

        let mut distances = vec![f64::INFINITY; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        distances[source] = 0.0;

        for _ in 0..n {
            // Closest unvisited node
            let mut current = None;
            let mut best = f64::INFINITY;
            for v in 0..n {
                if !visited[v] && distances[v] < best {
                    best = distances[v];
                    current = Some(v);
                }
            }

            // Frontier exhausted: everything left is unreachable
            let Some(u) = current else {
                break;
            };
            visited[u] = true;

            for &(v, w) in &self.neighbors[u] {
                if visited[v] {
                    continue;
                }
                let alt = distances[u] + w;
                if alt < distances[v] {
                    distances[v] = alt;
                    predecessors[v] = Some(u);
                }
            }
        }

        let unreachable: Vec<usize> = (0..n).filter(|&v| !visited[v]).collect();
        if !unreachable.is_empty() {
            return Err(GraphError::UnreachableNodes {
                origin: source,
                nodes: unreachable,
            });
        }

        Ok(ShortestPaths::new(source, distances, predecessors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn y_shape() -> (Vec<Point3<f64>>, EdgeList) {
        // Trunk along x, two branches at 45 degrees from point 2
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
            Point3::new(4.0, 2.0, 0.0),
            Point3::new(3.0, -1.0, 0.0),
            Point3::new(4.0, -2.0, 0.0),
        ];
        let edges = [(0, 1), (1, 2), (2, 3), (3, 4), (2, 5), (5, 6)]
            .into_iter()
            .collect();
        (points, edges)
    }

    #[test]
    fn test_dijkstra_line() {
        let points: Vec<_> = (0..5).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let edges: EdgeList = (0..4).map(|i| (i, i + 1)).collect();
        let result = Adjacency::new(&points, &edges).dijkstra(0).unwrap();

        for i in 0..5 {
            assert!((result.distance(i) - i as f64).abs() < 1e-12);
        }
        assert_eq!(result.predecessor(0), None);
        assert_eq!(result.predecessor(3), Some(2));
    }

    #[test]
    fn test_dijkstra_ignores_edge_orientation() {
        let (points, edges) = y_shape();
        let result = Adjacency::new(&points, &edges).dijkstra(4).unwrap();

        let branch = 2.0_f64.sqrt();
        assert!((result.distance(0) - (2.0 + 2.0 * branch)).abs() < 1e-12);
        assert!((result.distance(6) - 4.0 * branch).abs() < 1e-12);
        assert_eq!(result.path_to(6), Some(vec![4, 3, 2, 5, 6]));
    }

    #[test]
    fn test_dijkstra_bidirected_edges_same_distances() {
        let (points, edges) = y_shape();
        let single = Adjacency::new(&points, &edges).dijkstra(0).unwrap();
        let double = Adjacency::new(&points, &edges.bidirected())
            .dijkstra(0)
            .unwrap();
        assert_eq!(single.distances(), double.distances());
    }

    #[test]
    fn test_dijkstra_shortcut() {
        // Square 0-1-2-3 with a diagonal 0-2
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let edges: EdgeList = [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]
            .into_iter()
            .collect();
        let result = Adjacency::new(&points, &edges).dijkstra(0).unwrap();

        assert!((result.distance(2) - 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(result.path_to(2), Some(vec![0, 2]));
    }

    #[test]
    fn test_dijkstra_reports_unreachable_nodes() {
        let points: Vec<_> = (0..5).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let edges: EdgeList = [(0, 1), (1, 2), (3, 4)].into_iter().collect();

        match Adjacency::new(&points, &edges).dijkstra(1) {
            Err(GraphError::UnreachableNodes { origin, nodes }) => {
                assert_eq!(origin, 1);
                assert_eq!(nodes, vec![3, 4]);
            }
            other => panic!("expected UnreachableNodes, got {:?}", other),
        }
    }

    #[test]
    fn test_dijkstra_source_out_of_range() {
        let (points, edges) = y_shape();
        let result = Adjacency::new(&points, &edges).dijkstra(7);
        assert!(matches!(result, Err(GraphError::InvalidInput(_))));
    }

    #[test]
    fn test_farthest() {
        let (points, edges) = y_shape();
        let result = Adjacency::new(&points, &edges).dijkstra(0).unwrap();

        // Both branch tips are equally far; the lower index wins
        let (v, d) = result.farthest().unwrap();
        assert_eq!(v, 4);
        assert!((d - (2.0 + 2.0 * 2.0_f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_triangle_inequality_along_edges() {
        let (points, edges) = y_shape();
        let adjacency = Adjacency::new(&points, &edges);
        let result = adjacency.dijkstra(3).unwrap();

        for u in 0..adjacency.num_nodes() {
            for &(v, w) in adjacency.neighbors(u) {
                assert!((result.distance(u) - result.distance(v)).abs() <= w + 1e-12);
            }
        }
    }
}
