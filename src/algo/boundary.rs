//! Boundary edge synthesis.
//!
//! Boundary edges give every node a direct connection to the inlet or outlet
//! closest to it along the vessel, so boundary conditions can reach the
//! interior in a single message-passing step.
//!
//! Sources are enumerated inlet first, then outlets in order. For each node,
//! the source with the smallest graph distance wins; the first source in
//! enumeration order wins exact ties. A node whose closest source is at
//! distance zero (a boundary node itself) gets no boundary edge.

use nalgebra::Point3;
use rayon::prelude::*;

use crate::algo::shortest_path::{Adjacency, ShortestPaths};
use crate::centerline::BoundaryIndices;
use crate::error::Result;
use crate::graph::{unit_direction, EdgeSet, EdgeType};

/// Nodes closer than this to their nearest boundary point get no edge.
pub const SELF_DISTANCE: f64 = 1e-12;

/// Synthesize pruned boundary edges.
///
/// Edges point from the boundary node to the interior node. Relative
/// positions are unit vectors; distances are graph distances over
/// `adjacency`. The output is grouped by boundary source (inlet, then outlets)
/// with ascending target index inside each group.
///
/// With `parallel` set, the shortest path searches run on the rayon pool; the
/// output is identical either way.
///
/// # Errors
///
/// Propagates [`GraphError::UnreachableNodes`](crate::error::GraphError::UnreachableNodes)
/// when the graph is disconnected.
pub fn boundary_edges(
    points: &[Point3<f64>],
    boundary: &BoundaryIndices,
    adjacency: &Adjacency,
    parallel: bool,
) -> Result<EdgeSet> {
    let sources: Vec<(usize, EdgeType)> = std::iter::once((boundary.inlet, EdgeType::BoundaryInlet))
        .chain(boundary.outlets.iter().map(|&o| (o, EdgeType::BoundaryOutlet)))
        .collect();

    let searches: Vec<ShortestPaths> = if parallel {
        sources
            .par_iter()
            .map(|&(b, _)| adjacency.dijkstra(b))
            .collect::<Result<_>>()?
    } else {
        sources
            .iter()
            .map(|&(b, _)| adjacency.dijkstra(b))
            .collect::<Result<_>>()?
    };

    let nearest = nearest_sources(&searches, points.len());

    let mut result = EdgeSet::with_capacity(points.len());
    for (k, (&(b, edge_type), search)) in sources.iter().zip(&searches).enumerate() {
        for p in (0..points.len()).filter(|&p| nearest[p] == Some(k)) {
            result.push(
                b,
                p,
                unit_direction(points[p] - points[b]),
                search.distance(p),
                edge_type,
            );
        }
    }

    log::debug!(
        "boundary edges: {} from {} sources over {} nodes",
        result.len(),
        sources.len(),
        points.len()
    );

    Ok(result)
}

/// For each node, the index of the closest search source, or `None` when the
/// node is itself a source.
fn nearest_sources(searches: &[ShortestPaths], n: usize) -> Vec<Option<usize>> {
    (0..n)
        .map(|p| {
            let (best, best_distance) = searches
                .iter()
                .map(|s| s.distance(p))
                .enumerate()
                .fold((0, f64::INFINITY), |(bk, bd), (k, d)| {
                    if d < bd {
                        (k, d)
                    } else {
                        (bk, bd)
                    }
                });
            (best_distance >= SELF_DISTANCE).then_some(best)
        })
        .collect()
}
