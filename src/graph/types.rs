//! Node and edge classification, and edge sets with features.

use nalgebra::Vector3;

use crate::centerline::EdgeList;

/// Relative positions shorter than this are left unnormalized.
pub const MIN_DIRECTION_NORM: f64 = 1e-12;

/// Classification of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Vessel segment point (bifurcation label `-1`).
    Segment,
    /// Point inside a junction region.
    Junction,
    /// The inlet.
    Inlet,
    /// An outlet.
    Outlet,
}

impl NodeType {
    /// Number of node types, the width of the one-hot encoding.
    pub const COUNT: usize = 4;

    /// Integer code: segment 0, junction 1, inlet 2, outlet 3.
    pub fn code(self) -> usize {
        match self {
            NodeType::Segment => 0,
            NodeType::Junction => 1,
            NodeType::Inlet => 2,
            NodeType::Outlet => 3,
        }
    }

    /// One-hot encoding of [`code`](Self::code).
    pub fn one_hot(self) -> [f64; Self::COUNT] {
        let mut v = [0.0; Self::COUNT];
        v[self.code()] = 1.0;
        v
    }
}

/// Classification of a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// Edge from the centerline path connectivity.
    Anatomical,
    /// Synthesized edge from the inlet.
    BoundaryInlet,
    /// Synthesized edge from an outlet.
    BoundaryOutlet,
    /// Synthesized edge across a junction.
    Junction,
}

impl EdgeType {
    /// Number of edge types, the width of the one-hot encoding.
    pub const COUNT: usize = 4;

    /// Integer code: anatomical 0, boundary-inlet 1, boundary-outlet 2,
    /// junction 3.
    pub fn code(self) -> usize {
        match self {
            EdgeType::Anatomical => 0,
            EdgeType::BoundaryInlet => 1,
            EdgeType::BoundaryOutlet => 2,
            EdgeType::Junction => 3,
        }
    }

    /// One-hot encoding of [`code`](Self::code).
    pub fn one_hot(self) -> [f64; Self::COUNT] {
        let mut v = [0.0; Self::COUNT];
        v[self.code()] = 1.0;
        v
    }
}

/// Unit vector along `v`, or `v` itself when it is too short to normalize.
#[inline]
pub fn unit_direction(v: Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm > MIN_DIRECTION_NORM {
        v / norm
    } else {
        v
    }
}

/// Directed edges with per-edge features.
///
/// All arrays are parallel: entry `i` of each describes edge `i`.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    /// Endpoints.
    pub edges: EdgeList,
    /// Relative position of the target with respect to the source.
    pub rel_positions: Vec<Vector3<f64>>,
    /// Distance between the endpoints (Euclidean or along the graph).
    pub distances: Vec<f64>,
    /// Edge classification.
    pub types: Vec<EdgeType>,
}

impl EdgeSet {
    /// Create an empty edge set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty edge set with room for `capacity` edges.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: EdgeList::with_capacity(capacity),
            rel_positions: Vec::with_capacity(capacity),
            distances: Vec::with_capacity(capacity),
            types: Vec::with_capacity(capacity),
        }
    }

    /// Append an edge with its features.
    pub fn push(
        &mut self,
        source: usize,
        target: usize,
        rel_position: Vector3<f64>,
        distance: f64,
        edge_type: EdgeType,
    ) {
        self.edges.push(source, target);
        self.rel_positions.push(rel_position);
        self.distances.push(distance);
        self.types.push(edge_type);
    }

    /// Append all edges of `other`.
    pub fn append(&mut self, other: EdgeSet) {
        self.edges.extend_from(&other.edges);
        self.rel_positions.extend(other.rel_positions);
        self.distances.extend(other.distances);
        self.types.extend(other.types);
    }

    /// Number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of edges of the given type.
    pub fn count(&self, edge_type: EdgeType) -> usize {
        self.types.iter().filter(|&&t| t == edge_type).count()
    }
}
