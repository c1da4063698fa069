//! The graph construction pipeline.

use crate::algo::boundary::boundary_edges;
use crate::algo::decimate::{decimate, DecimateOptions};
use crate::algo::junction::junction_edges;
use crate::algo::progress::Progress;
use crate::algo::shortest_path::Adjacency;
use crate::centerline::Centerline;
use crate::error::Result;

use super::{EdgeType, Graph};

/// Options for graph construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    /// Fraction of centerline points to keep (default: 0.06).
    pub resample_fraction: f64,

    /// Points trimmed next to the inlet and each outlet (default: 1).
    pub remove_caps: usize,

    /// Whether to synthesize boundary edges (default: true).
    pub add_boundary_edges: bool,

    /// Whether to synthesize junction edges (default: true).
    pub add_junction_edges: bool,

    /// Whether to run independent shortest path searches in parallel
    /// (default: true). Does not change the result.
    pub parallel: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            resample_fraction: 0.06,
            remove_caps: 1,
            add_boundary_edges: true,
            add_junction_edges: true,
            parallel: true,
        }
    }
}

impl GraphOptions {
    /// Default options with the given resample fraction.
    pub fn new(resample_fraction: f64) -> Self {
        Self {
            resample_fraction,
            ..Self::default()
        }
    }

    /// Set the number of cap points trimmed at each end.
    pub fn with_remove_caps(mut self, remove_caps: usize) -> Self {
        self.remove_caps = remove_caps;
        self
    }

    /// Set whether to synthesize boundary edges.
    pub fn with_boundary_edges(mut self, add: bool) -> Self {
        self.add_boundary_edges = add;
        self
    }

    /// Set whether to synthesize junction edges.
    pub fn with_junction_edges(mut self, add: bool) -> Self {
        self.add_junction_edges = add;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The decimation part of these options.
    pub fn decimate_options(&self) -> DecimateOptions {
        DecimateOptions::new(self.resample_fraction).with_remove_caps(self.remove_caps)
    }
}

/// Build a graph from a centerline.
///
/// See [`build_graph_with_progress`].
pub fn build_graph(centerline: &Centerline, options: &GraphOptions) -> Result<Graph> {
    build_graph_with_progress(centerline, options, &Progress::none())
}

/// Build a graph from a centerline, reporting each stage to `progress`.
///
/// The inlet is point 0 and the outlets are the branch ends of the edge list.
/// The centerline is decimated, boundary and junction edges are synthesized
/// over the decimated anatomical graph as requested, and everything is merged
/// into one [`Graph`].
///
/// # Errors
///
/// Any error of decimation or edge synthesis. No graph is produced on error.
pub fn build_graph_with_progress(
    centerline: &Centerline,
    options: &GraphOptions,
    progress: &Progress,
) -> Result<Graph> {
    const STAGES: usize = 4;

    progress.report(0, STAGES, "Decimating");
    let boundary = centerline.boundary();
    let decimation = decimate(
        centerline.points().to_vec(),
        centerline.edges(),
        &boundary,
        &options.decimate_options(),
    )?;

    let areas: Vec<f64> = decimation
        .sampled_indices
        .iter()
        .map(|&i| centerline.areas()[i])
        .collect();
    let bifurcation_ids: Vec<i64> = decimation
        .sampled_indices
        .iter()
        .map(|&i| centerline.bifurcation_ids()[i])
        .collect();

    let adjacency = Adjacency::new(&decimation.points, &decimation.edges);

    progress.report(1, STAGES, "Synthesizing boundary edges");
    let boundary_edges = if options.add_boundary_edges {
        Some(boundary_edges(
            &decimation.points,
            &decimation.boundary,
            &adjacency,
            options.parallel,
        )?)
    } else {
        None
    };

    progress.report(2, STAGES, "Synthesizing junction edges");
    let junctions = if options.add_junction_edges {
        Some(junction_edges(&decimation.points, &bifurcation_ids, &adjacency)?)
    } else {
        None
    };

    progress.report(3, STAGES, "Assembling graph");
    let graph = Graph::assemble(
        decimation,
        areas,
        bifurcation_ids,
        centerline.num_points(),
        boundary_edges,
        junctions,
    );
    progress.report(STAGES, STAGES, "Done");

    log::debug!(
        "graph: {} nodes, {} edges ({} anatomical, {} boundary, {} junction)",
        graph.num_nodes(),
        graph.num_edges(),
        graph.num_edges_of(EdgeType::Anatomical),
        graph.num_edges_of(EdgeType::BoundaryInlet) + graph.num_edges_of(EdgeType::BoundaryOutlet),
        graph.num_edges_of(EdgeType::Junction)
    );

    Ok(graph)
}
