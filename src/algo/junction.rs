//! Junction edge synthesis.
//!
//! A junction region is a run of points sharing a bifurcation label other
//! than `-1`. The segment point just upstream of the first run with a label
//! is that junction's inlet; every segment point right after a run with the
//! label is an outlet attachment. Junction edges connect the inlet directly to
//! each attachment, in both directions, skipping the junction interior.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use nalgebra::Point3;

use crate::algo::shortest_path::Adjacency;
use crate::centerline::SEGMENT_LABEL;
use crate::error::{GraphError, Result};
use crate::graph::{EdgeSet, EdgeType};

/// Junction edges and the masks derived from them.
#[derive(Debug, Clone)]
pub struct JunctionEdges {
    /// Forward edges (inlet to attachment) followed by their reverses.
    pub edges: EdgeSet,
    /// Recorded inlet point per junction label.
    pub inlets: BTreeMap<i64, usize>,
    /// True at junction inlet points.
    pub inlet_mask: Vec<bool>,
    /// True at every point touched by a junction edge.
    pub mask: Vec<bool>,
}

impl JunctionEdges {
    /// Number of forward (inlet to attachment) edges.
    pub fn num_links(&self) -> usize {
        self.edges.len() / 2
    }
}

/// Detect junctions and synthesize junction edges.
///
/// Points are scanned in index order. Only the first `-1 -> label` transition
/// records an inlet for `label`; later runs with the same label (other
/// branches leaving the same junction) reuse it.
///
/// Forward edges carry the raw coordinate difference as relative position and
/// the graph distance from the inlet over `adjacency`. The reverse of each
/// edge has the negated position and the same distance.
///
/// # Errors
///
/// - [`GraphError::MalformedJunctionLabeling`] when a run ends before any
///   inlet was recorded for its label.
/// - [`GraphError::UnreachableNodes`] when the graph is disconnected.
pub fn junction_edges(
    points: &[Point3<f64>],
    bifurcation_ids: &[i64],
    adjacency: &Adjacency,
) -> Result<JunctionEdges> {
    let n = bifurcation_ids.len();
    let mut inlets: BTreeMap<i64, usize> = BTreeMap::new();
    let mut inlet_mask = vec![false; n];
    let mut mask = vec![false; n];
    let mut links: Vec<(usize, usize)> = Vec::new();

    for i in 0..n {
        if bifurcation_ids[i] != SEGMENT_LABEL {
            continue;
        }

        if i + 1 < n && bifurcation_ids[i + 1] != SEGMENT_LABEL {
            if let Entry::Vacant(entry) = inlets.entry(bifurcation_ids[i + 1]) {
                entry.insert(i);
                inlet_mask[i] = true;
                mask[i] = true;
            }
        }

        if i > 0 && bifurcation_ids[i - 1] != SEGMENT_LABEL {
            let label = bifurcation_ids[i - 1];
            let &inlet = inlets
                .get(&label)
                .ok_or(GraphError::MalformedJunctionLabeling { point: i, label })?;
            links.push((inlet, i));
            mask[i] = true;
        }
    }

    let mut distances: HashMap<usize, Vec<f64>> = HashMap::with_capacity(inlets.len());
    for &inlet in inlets.values() {
        let search = adjacency.dijkstra(inlet)?;
        distances.insert(inlet, search.distances().to_vec());
    }

    let mut edges = EdgeSet::with_capacity(2 * links.len());
    for &(u, v) in &links {
        edges.push(
            u,
            v,
            points[v] - points[u],
            distances[&u][v],
            EdgeType::Junction,
        );
    }
    for k in 0..links.len() {
        let (u, v) = links[k];
        let rel = -edges.rel_positions[k];
        let distance = edges.distances[k];
        edges.push(v, u, rel, distance, EdgeType::Junction);
    }

    log::debug!(
        "junction edges: {} junctions, {} links",
        inlets.len(),
        links.len()
    );

    Ok(JunctionEdges {
        edges,
        inlets,
        inlet_mask,
        mask,
    })
}
