//! Annotated centerline graphs.
//!
//! A [`Graph`] is the end product of the pipeline: the decimated centerline
//! points as nodes, and a multigraph of anatomical, boundary and junction
//! edges with per-edge features. It is immutable once built.
//!
//! # Edge layout
//!
//! | Range | Type | Relative position | Distance |
//! |-------|------|-------------------|----------|
//! | anatomical, both directions | [`EdgeType::Anatomical`] | unit | Euclidean |
//! | boundary (optional) | [`EdgeType::BoundaryInlet`] / [`EdgeType::BoundaryOutlet`] | unit | along the graph |
//! | junction, both directions (optional) | [`EdgeType::Junction`] | raw | along the graph |
//!
//! # Example
//!
//! ```
//! use vasgraph::prelude::*;
//! use nalgebra::Point3;
//!
//! let points: Vec<_> = (0..5).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
//! let edges: EdgeList = (0..4).map(|i| (i, i + 1)).collect();
//! let centerline = Centerline::new(points, edges, vec![-1; 5], vec![1.0; 5]).unwrap();
//!
//! let options = GraphOptions::new(0.6)
//!     .with_remove_caps(0)
//!     .with_junction_edges(false);
//! let graph = build_graph(&centerline, &options).unwrap();
//!
//! assert_eq!(graph.num_nodes(), 3);
//! assert_eq!(graph.sampled_indices(), &[0, 2, 4]);
//! // 2 anatomical edges in both directions, 1 boundary edge to the middle node
//! assert_eq!(graph.num_edges(), 5);
//! ```

mod assemble;
mod build;
mod types;

pub use assemble::{anatomical_edges, continuity_mask, node_types};
pub use build::{build_graph, build_graph_with_progress, GraphOptions};
pub use types::{unit_direction, EdgeSet, EdgeType, NodeType, MIN_DIRECTION_NORM};

use nalgebra::{Point3, Vector3};

use crate::centerline::{BoundaryIndices, EdgeList};
use crate::error::{GraphError, Result};

/// A centerline graph with node and edge features.
#[derive(Debug, Clone)]
pub struct Graph {
    positions: Vec<Point3<f64>>,
    areas: Vec<f64>,
    bifurcation_ids: Vec<i64>,
    node_types: Vec<NodeType>,
    inlet_mask: Vec<bool>,
    outlet_mask: Vec<bool>,
    continuity_mask: Vec<bool>,
    junction_inlet_mask: Vec<bool>,
    junction_mask: Vec<bool>,
    edges: EdgeSet,
    has_edge_types: bool,
    boundary: BoundaryIndices,
    sampled_indices: Vec<usize>,
    original_points: usize,
}

impl Graph {
    /// Number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.positions.len()
    }

    /// Number of directed edges of all types.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of directed edges of one type.
    pub fn num_edges_of(&self, edge_type: EdgeType) -> usize {
        self.edges.count(edge_type)
    }

    // Node features

    /// Node positions.
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Cross-sectional area per node.
    pub fn areas(&self) -> &[f64] {
        &self.areas
    }

    /// Bifurcation label per node.
    pub fn bifurcation_ids(&self) -> &[i64] {
        &self.bifurcation_ids
    }

    /// Type per node.
    pub fn node_types(&self) -> &[NodeType] {
        &self.node_types
    }

    /// One-hot node types, width [`NodeType::COUNT`].
    pub fn node_type_one_hot(&self) -> Vec<[f64; NodeType::COUNT]> {
        self.node_types.iter().map(|t| t.one_hot()).collect()
    }

    /// True at the inlet.
    pub fn inlet_mask(&self) -> &[bool] {
        &self.inlet_mask
    }

    /// True at the outlets.
    pub fn outlet_mask(&self) -> &[bool] {
        &self.outlet_mask
    }

    /// True at nodes inside a run of at least three segment nodes.
    pub fn continuity_mask(&self) -> &[bool] {
        &self.continuity_mask
    }

    /// True at junction inlets. All false without junction edges.
    pub fn junction_inlet_mask(&self) -> &[bool] {
        &self.junction_inlet_mask
    }

    /// True at nodes touched by a junction edge. All false without junction
    /// edges.
    pub fn junction_mask(&self) -> &[bool] {
        &self.junction_mask
    }

    // Edge features

    /// Edge endpoints.
    pub fn edges(&self) -> &EdgeList {
        &self.edges.edges
    }

    /// Relative position of each edge's target with respect to its source.
    pub fn rel_positions(&self) -> &[Vector3<f64>] {
        &self.edges.rel_positions
    }

    /// Distance per edge.
    pub fn distances(&self) -> &[f64] {
        &self.edges.distances
    }

    /// Type per edge.
    pub fn edge_types(&self) -> &[EdgeType] {
        &self.edges.types
    }

    /// One-hot edge types, width [`EdgeType::COUNT`].
    ///
    /// Only present when the graph was built with boundary edges; without
    /// them every edge would carry the same code.
    pub fn edge_type_one_hot(&self) -> Option<Vec<[f64; EdgeType::COUNT]>> {
        self.has_edge_types
            .then(|| self.edges.types.iter().map(|t| t.one_hot()).collect())
    }

    // Index mapping

    /// Boundary nodes of the graph.
    pub fn boundary(&self) -> &BoundaryIndices {
        &self.boundary
    }

    /// Original centerline index of every node.
    pub fn sampled_indices(&self) -> &[usize] {
        &self.sampled_indices
    }

    /// Number of points of the centerline the graph was built from.
    pub fn num_original_points(&self) -> usize {
        self.original_points
    }

    /// Pick the values of a per-point field of the original centerline for
    /// the graph's nodes.
    ///
    /// This is how time-varying fields (pressure, flow rate) sampled on the
    /// full centerline are attached to the decimated graph.
    pub fn select_field<T: Copy>(&self, values: &[T]) -> Result<Vec<T>> {
        if values.len() != self.original_points {
            return Err(GraphError::InvalidInput(format!(
                "field has {} values, centerline had {} points",
                values.len(),
                self.original_points
            )));
        }
        Ok(self.sampled_indices.iter().map(|&i| values[i]).collect())
    }

    /// Number of outgoing edges per node.
    pub fn out_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.num_nodes()];
        for &s in self.edges.edges.sources() {
            degrees[s] += 1;
        }
        degrees
    }
}
