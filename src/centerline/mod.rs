//! Centerline input data.
//!
//! A [`Centerline`] is the raw geometry handed to the graph pipeline: ordered
//! 3D points, the path connectivity between them, and two per-point
//! attributes (bifurcation label and cross-sectional area).
//!
//! ```
//! use vasgraph::centerline::{Centerline, EdgeList};
//! use nalgebra::Point3;
//!
//! let points: Vec<_> = (0..4).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
//! let edges: EdgeList = [(0, 1), (1, 2), (2, 3)].into_iter().collect();
//! let centerline = Centerline::new(points, edges, vec![-1; 4], vec![1.0; 4]).unwrap();
//!
//! let boundary = centerline.boundary();
//! assert_eq!(boundary.inlet, 0);
//! assert_eq!(boundary.outlets, vec![3]);
//! ```

mod edges;

pub use edges::EdgeList;

use nalgebra::Point3;

use crate::error::{GraphError, Result};

/// Bifurcation label of points that do not belong to a junction.
pub const SEGMENT_LABEL: i64 = -1;

/// Terminal points of a vascular tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryIndices {
    /// The single inlet.
    pub inlet: usize,
    /// All outlets, in discovery order.
    pub outlets: Vec<usize>,
}

impl BoundaryIndices {
    /// Create boundary indices.
    pub fn new(inlet: usize, outlets: Vec<usize>) -> Self {
        Self { inlet, outlets }
    }

    /// Iterate over all boundary points, inlet first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.inlet).chain(self.outlets.iter().copied())
    }

    /// Number of boundary points.
    pub fn len(&self) -> usize {
        1 + self.outlets.len()
    }

    /// Always false: there is at least an inlet.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `i` is the inlet or one of the outlets.
    pub fn contains(&self, i: usize) -> bool {
        self.inlet == i || self.outlets.contains(&i)
    }
}

/// Raw centerline geometry with per-point attributes.
#[derive(Debug, Clone)]
pub struct Centerline {
    points: Vec<Point3<f64>>,
    edges: EdgeList,
    bifurcation_ids: Vec<i64>,
    areas: Vec<f64>,
}

impl Centerline {
    /// Create a centerline, checking that all arrays agree.
    ///
    /// Fails with [`GraphError::InvalidInput`] when the attribute arrays do not
    /// have one entry per point, when an edge references a missing point, or
    /// when the centerline has fewer than two points.
    pub fn new(
        points: Vec<Point3<f64>>,
        edges: EdgeList,
        bifurcation_ids: Vec<i64>,
        areas: Vec<f64>,
    ) -> Result<Self> {
        let n = points.len();
        if n < 2 {
            return Err(GraphError::InvalidInput(format!(
                "centerline needs at least 2 points, got {}",
                n
            )));
        }
        if bifurcation_ids.len() != n {
            return Err(GraphError::InvalidInput(format!(
                "{} bifurcation ids for {} points",
                bifurcation_ids.len(),
                n
            )));
        }
        if areas.len() != n {
            return Err(GraphError::InvalidInput(format!(
                "{} areas for {} points",
                areas.len(),
                n
            )));
        }
        if let Some(max) = edges.max_index() {
            if max >= n {
                return Err(GraphError::InvalidInput(format!(
                    "edge references point {} but centerline has {} points",
                    max, n
                )));
            }
        }
        if edges.is_empty() {
            return Err(GraphError::InvalidInput("centerline has no edges".to_string()));
        }

        Ok(Self {
            points,
            edges,
            bifurcation_ids,
            areas,
        })
    }

    /// Point coordinates.
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Path connectivity.
    #[inline]
    pub fn edges(&self) -> &EdgeList {
        &self.edges
    }

    /// Per-point bifurcation labels.
    #[inline]
    pub fn bifurcation_ids(&self) -> &[i64] {
        &self.bifurcation_ids
    }

    /// Per-point cross-sectional areas.
    #[inline]
    pub fn areas(&self) -> &[f64] {
        &self.areas
    }

    /// Number of points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Number of distinct junction labels.
    pub fn num_junctions(&self) -> usize {
        let mut labels: Vec<i64> = self
            .bifurcation_ids
            .iter()
            .copied()
            .filter(|&id| id != SEGMENT_LABEL)
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }

    /// Total length of all edges.
    pub fn total_length(&self) -> f64 {
        self.edges
            .iter()
            .map(|(s, t)| (self.points[t] - self.points[s]).norm())
            .sum()
    }

    /// Boundary points: the inlet is point 0, the outlets are the points
    /// that terminate a branch.
    pub fn boundary(&self) -> BoundaryIndices {
        BoundaryIndices::new(0, self.edges.terminal_targets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> (Vec<Point3<f64>>, EdgeList) {
        let points = (0..n).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let edges = (0..n - 1).map(|i| (i, i + 1)).collect();
        (points, edges)
    }

    #[test]
    fn test_attribute_length_mismatch() {
        let (points, edges) = line(4);
        let result = Centerline::new(points, edges, vec![-1; 3], vec![1.0; 4]);
        assert!(matches!(result, Err(GraphError::InvalidInput(_))));
    }

    #[test]
    fn test_dangling_edge() {
        let (points, mut edges) = line(4);
        edges.push(3, 9);
        let result = Centerline::new(points, edges, vec![-1; 4], vec![1.0; 4]);
        assert!(matches!(result, Err(GraphError::InvalidInput(_))));
    }

    #[test]
    fn test_counts_junctions_and_length() {
        let (points, edges) = line(6);
        let ids = vec![-1, -1, 3, 3, -1, -1];
        let centerline = Centerline::new(points, edges, ids, vec![1.0; 6]).unwrap();
        assert_eq!(centerline.num_junctions(), 1);
        assert!((centerline.total_length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_contains() {
        let boundary = BoundaryIndices::new(0, vec![5, 9]);
        assert!(boundary.contains(0));
        assert!(boundary.contains(9));
        assert!(!boundary.contains(4));
        assert_eq!(boundary.iter().collect::<Vec<_>>(), vec![0, 5, 9]);
        assert_eq!(boundary.len(), 3);
    }
}
