//! # vasgraph
//!
//! Turn 1D vascular centerline meshes into annotated graphs for graph neural
//! network surrogates of blood flow.
//!
//! A centerline is an ordered point set with path edges, a bifurcation label
//! and a cross-sectional area per point. [`graph::build_graph`] decimates it,
//! adds boundary edges (every node linked to its nearest inlet or outlet) and
//! junction edges (bifurcation inlets linked across the junction), and returns
//! a [`graph::Graph`] with node and edge features.
//!
//! ## Features
//!
//! - **Decimation**: nearest-pair collapse that never removes the inlet or an
//!   outlet, with optional cap trimming
//! - **Graph distances**: Dijkstra over the anatomical graph
//! - **Edge synthesis**: pruned boundary edges and symmetric junction edges
//! - **File input**: PLY centerlines
//!
//! ## Quick Start
//!
//! ```no_run
//! use vasgraph::prelude::*;
//!
//! let centerline = vasgraph::io::load("aorta.ply").unwrap();
//! let graph = build_graph(&centerline, &GraphOptions::default()).unwrap();
//!
//! println!("Nodes: {}", graph.num_nodes());
//! println!("Edges: {}", graph.num_edges());
//! ```
//!
//! ## Building Centerlines Programmatically
//!
//! ```
//! use vasgraph::prelude::*;
//! use nalgebra::Point3;
//!
//! // A trunk splitting into two branches at point 2
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(3.0, 1.0, 0.0),
//!     Point3::new(3.0, -1.0, 0.0),
//! ];
//! let edges: EdgeList = [(0, 1), (1, 2), (2, 3), (2, 4)].into_iter().collect();
//!
//! let centerline = Centerline::new(points, edges, vec![-1; 5], vec![1.0; 5]).unwrap();
//! assert_eq!(centerline.boundary().outlets, vec![3, 4]);
//!
//! let options = GraphOptions::new(1.0).with_remove_caps(0);
//! let graph = build_graph(&centerline, &options).unwrap();
//! assert_eq!(graph.num_nodes(), 5);
//! assert_eq!(graph.node_types()[0], NodeType::Inlet);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod centerline;
pub mod error;
pub mod graph;
pub mod io;

/// Prelude module for convenient imports.
///
/// ```
/// use vasgraph::prelude::*;
/// ```
pub mod prelude {
    pub use crate::centerline::{BoundaryIndices, Centerline, EdgeList};
    pub use crate::error::{GraphError, Result};
    pub use crate::graph::{build_graph, EdgeType, Graph, GraphOptions, NodeType};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_line_end_to_end() {
        let points: Vec<_> = (0..5).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let edges: EdgeList = (0..4).map(|i| (i, i + 1)).collect();
        let centerline = Centerline::new(points, edges, vec![-1; 5], vec![1.0; 5]).unwrap();

        let options = GraphOptions::new(0.6)
            .with_remove_caps(0)
            .with_junction_edges(false);
        let graph = build_graph(&centerline, &options).unwrap();

        assert_eq!(graph.sampled_indices(), &[0, 2, 4]);
        assert_eq!(graph.edges().max_index(), Some(2));
        assert_eq!(graph.out_degrees(), vec![2, 2, 1]);

        // Node 1 is as far from the inlet as from the outlet; the inlet wins
        assert_eq!(graph.num_edges_of(EdgeType::BoundaryInlet), 1);
        assert_eq!(graph.num_edges_of(EdgeType::BoundaryOutlet), 0);
    }

    #[test]
    fn test_every_edge_type_present_on_branching_tree() {
        // Trunk 0-3, junction 4 (label 1) splitting into 5-7 and 8-10
        let mut points = Vec::new();
        for i in 0..5 {
            points.push(Point3::new(i as f64, 0.0, 0.0));
        }
        for k in 1..=3 {
            points.push(Point3::new(4.0 + k as f64, k as f64, 0.0));
        }
        for k in 1..=3 {
            points.push(Point3::new(4.0 + k as f64, -(k as f64), 0.0));
        }
        let edges: EdgeList = [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 7),
            (4, 8),
            (8, 9),
            (9, 10),
        ]
        .into_iter()
        .collect();
        let mut ids = vec![-1; 11];
        ids[4] = 1;
        // The second branch starts with its own run of the junction label
        ids[8] = 1;

        let centerline = Centerline::new(points, edges, ids, vec![1.0; 11]).unwrap();
        let graph = build_graph(&centerline, &GraphOptions::new(1.0).with_remove_caps(0)).unwrap();

        for edge_type in [
            EdgeType::Anatomical,
            EdgeType::BoundaryInlet,
            EdgeType::BoundaryOutlet,
            EdgeType::Junction,
        ] {
            assert!(graph.num_edges_of(edge_type) > 0, "{:?}", edge_type);
        }
        assert_eq!(graph.boundary().outlets, vec![7, 10]);
        assert!(graph.junction_inlet_mask()[3]);
        assert_eq!(graph.node_types()[4], NodeType::Junction);
    }
}
