//! Centerline graph algorithms.
//!
//! - **Decimation**: nearest-pair collapse with protected boundary points
//! - **Shortest paths**: Dijkstra over the undirected anatomical graph
//! - **Boundary edges**: links from each node to its closest inlet or outlet
//! - **Junction edges**: links across bifurcation regions

pub mod boundary;
pub mod decimate;
pub mod junction;
pub mod progress;
pub mod shortest_path;

pub use progress::Progress;
