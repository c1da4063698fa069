//! Merging edge sets and computing node features.

use nalgebra::Point3;

use crate::algo::decimate::Decimation;
use crate::algo::junction::JunctionEdges;
use crate::centerline::{BoundaryIndices, EdgeList, SEGMENT_LABEL};

use super::{unit_direction, EdgeSet, EdgeType, Graph, NodeType};

impl Graph {
    /// Assemble the final graph from decimated geometry and synthesized
    /// edges.
    ///
    /// Edge order: anatomical edges, their reverses, boundary edges (if any),
    /// junction edges (if any).
    pub(super) fn assemble(
        decimation: Decimation,
        areas: Vec<f64>,
        bifurcation_ids: Vec<i64>,
        original_points: usize,
        boundary_edges: Option<EdgeSet>,
        junctions: Option<JunctionEdges>,
    ) -> Self {
        let Decimation {
            points,
            edges,
            boundary,
            sampled_indices,
        } = decimation;
        let n = points.len();

        let has_edge_types = boundary_edges.is_some();
        let mut all_edges = anatomical_edges(&points, &edges);
        if let Some(b) = boundary_edges {
            all_edges.append(b);
        }
        let (junction_inlet_mask, junction_mask) = match junctions {
            Some(j) => {
                all_edges.append(j.edges);
                (j.inlet_mask, j.mask)
            }
            None => (vec![false; n], vec![false; n]),
        };

        let node_types = node_types(&bifurcation_ids, &boundary);
        let inlet_mask = node_types.iter().map(|&t| t == NodeType::Inlet).collect();
        let outlet_mask = node_types.iter().map(|&t| t == NodeType::Outlet).collect();
        let continuity_mask = continuity_mask(&node_types);

        Self {
            positions: points,
            areas,
            bifurcation_ids,
            node_types,
            inlet_mask,
            outlet_mask,
            continuity_mask,
            junction_inlet_mask,
            junction_mask,
            edges: all_edges,
            has_edge_types,
            boundary,
            sampled_indices,
            original_points,
        }
    }
}

/// Anatomical edges in both directions with unit relative positions and
/// Euclidean lengths.
pub fn anatomical_edges(points: &[Point3<f64>], edges: &EdgeList) -> EdgeSet {
    let both = edges.bidirected();
    let mut result = EdgeSet::with_capacity(both.len());
    for (s, t) in both.iter() {
        let diff = points[t] - points[s];
        result.push(s, t, unit_direction(diff), diff.norm(), EdgeType::Anatomical);
    }
    result
}

/// Classify nodes by bifurcation label, then mark the boundary.
pub fn node_types(bifurcation_ids: &[i64], boundary: &BoundaryIndices) -> Vec<NodeType> {
    let mut types: Vec<NodeType> = bifurcation_ids
        .iter()
        .map(|&id| {
            if id == SEGMENT_LABEL {
                NodeType::Segment
            } else {
                NodeType::Junction
            }
        })
        .collect();

    for &outlet in &boundary.outlets {
        types[outlet] = NodeType::Outlet;
    }
    types[boundary.inlet] = NodeType::Inlet;
    types
}

/// True at interior nodes whose predecessor, self and successor (by index)
/// are all segment nodes. Always false at the first and last node.
pub fn continuity_mask(types: &[NodeType]) -> Vec<bool> {
    let n = types.len();
    (0..n)
        .map(|i| {
            i > 0
                && i + 1 < n
                && types[i - 1..=i + 1].iter().all(|&t| t == NodeType::Segment)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anatomical_edges_bidirected() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 3.0),
        ];
        let edges: EdgeList = [(0, 1), (1, 2)].into_iter().collect();
        let set = anatomical_edges(&points, &edges);

        assert_eq!(set.len(), 4);
        assert_eq!(set.distances, vec![2.0, 3.0, 2.0, 3.0]);
        assert_eq!(set.rel_positions[0], nalgebra::Vector3::y());
        assert_eq!(set.rel_positions[2], -nalgebra::Vector3::y());
        assert_eq!(set.count(EdgeType::Anatomical), 4);
    }

    #[test]
    fn test_node_types_boundary_overrides_label() {
        let ids = vec![3, -1, 3, -1, -1];
        let boundary = BoundaryIndices::new(0, vec![4]);
        let types = node_types(&ids, &boundary);
        assert_eq!(
            types,
            vec![
                NodeType::Inlet,
                NodeType::Segment,
                NodeType::Junction,
                NodeType::Segment,
                NodeType::Outlet
            ]
        );
    }

    #[test]
    fn test_continuity_mask() {
        use NodeType::*;
        let types = vec![
            Inlet, Segment, Segment, Segment, Junction, Segment, Segment, Segment, Outlet,
        ];
        let mask = continuity_mask(&types);
        assert_eq!(
            mask,
            vec![false, false, true, false, false, false, true, false, false]
        );
    }

    #[test]
    fn test_continuity_mask_endpoints_false() {
        let types = vec![NodeType::Segment; 4];
        let mask = continuity_mask(&types);
        assert_eq!(mask, vec![false, true, true, false]);
        assert!(continuity_mask(&[]).is_empty());
    }
}
