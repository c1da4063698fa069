//! Centerline point decimation.
//!
//! Raw centerlines are sampled far more densely than a surrogate model needs.
//! Decimation reduces the point count to a target fraction by repeatedly
//! collapsing the shortest remaining edge, while keeping the inlet and every
//! outlet in the point set.
//!
//! Before collapsing, an optional number of "cap" points can be trimmed next
//! to the inlet and each outlet. Flow near the ends of a centerline is often
//! polluted by boundary-condition artifacts, so those points are dropped and
//! the boundary moves inward.
//!
//! # Example
//!
//! ```
//! use vasgraph::algo::decimate::{decimate, DecimateOptions};
//! use vasgraph::centerline::{BoundaryIndices, EdgeList};
//! use nalgebra::Point3;
//!
//! let points: Vec<_> = (0..5).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
//! let edges: EdgeList = (0..4).map(|i| (i, i + 1)).collect();
//! let boundary = BoundaryIndices::new(0, vec![4]);
//!
//! let result = decimate(points, &edges, &boundary, &DecimateOptions::new(0.6)).unwrap();
//! assert_eq!(result.sampled_indices, vec![0, 2, 4]);
//! assert_eq!(result.boundary.outlets, vec![2]);
//! ```
//!
//! # Tie-breaking
//!
//! Edges are scanned in edge-list order and the first edge whose length is
//! within [`TIE_TOLERANCE`] of the minimum is collapsed. Given the same input
//! the output is always the same.

mod collapse;

use nalgebra::Point3;

use crate::centerline::{BoundaryIndices, EdgeList};
use crate::error::{GraphError, Result};

use collapse::RedirectArena;

/// Edges shorter than this are considered already collapsed.
pub const COLLAPSED_LENGTH: f64 = 1e-13;

/// Lengths within this tolerance of the minimum count as ties.
pub const TIE_TOLERANCE: f64 = 1e-12;

/// Options for centerline decimation.
#[derive(Debug, Clone, PartialEq)]
pub struct DecimateOptions {
    /// Fraction of the original points to keep, in `(0, 1]`.
    ///
    /// Cap trimming removes points on top of this target.
    pub resample_fraction: f64,

    /// Number of points to trim next to the inlet and next to each outlet.
    pub remove_caps: usize,
}

impl Default for DecimateOptions {
    fn default() -> Self {
        Self {
            resample_fraction: 1.0,
            remove_caps: 0,
        }
    }
}

impl DecimateOptions {
    /// Keep the given fraction of points, without cap trimming.
    pub fn new(resample_fraction: f64) -> Self {
        Self {
            resample_fraction,
            remove_caps: 0,
        }
    }

    /// Set the number of cap points trimmed at each end.
    pub fn with_remove_caps(mut self, remove_caps: usize) -> Self {
        self.remove_caps = remove_caps;
        self
    }

    /// Check that the options are usable.
    pub fn validate(&self) -> Result<()> {
        let f = self.resample_fraction;
        if !(f > 0.0 && f <= 1.0) {
            return Err(GraphError::invalid_param(
                "resample_fraction",
                f,
                "must be in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Number of points the collapse phase aims for, before cap trimming.
    pub fn target_points(&self, original_points: usize) -> usize {
        ((original_points as f64) * self.resample_fraction).round() as usize
    }
}

/// Output of [`decimate`].
#[derive(Debug, Clone)]
pub struct Decimation {
    /// Retained points, in their original relative order.
    pub points: Vec<Point3<f64>>,
    /// Edges re-indexed into the retained points.
    pub edges: EdgeList,
    /// Boundary indices re-indexed into the retained points.
    pub boundary: BoundaryIndices,
    /// Original index of every retained point, ascending.
    pub sampled_indices: Vec<usize>,
}

impl Decimation {
    /// Number of retained points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}

/// Decimate a centerline.
///
/// Consumes the point array and shrinks it in place. The returned boundary
/// indices refer to the retained points: the inlet moves `remove_caps` points
/// downstream and every outlet `remove_caps` points upstream.
///
/// # Errors
///
/// - [`GraphError::InvalidParameter`] if the resample fraction is out of range.
/// - [`GraphError::DegenerateGeometry`] if cap trimming runs off the point set
///   or overlaps itself, if the target would leave fewer points than there are
///   boundary points, or if no collapsible edge is left before the target is
///   reached.
pub fn decimate(
    mut points: Vec<Point3<f64>>,
    edges: &EdgeList,
    boundary: &BoundaryIndices,
    options: &DecimateOptions,
) -> Result<Decimation> {
    options.validate()?;

    let n = points.len();
    let mut arena = RedirectArena::new(n);

    let boundary = arena.trim_caps(boundary, options.remove_caps)?;
    let trimmed = n - arena.num_alive();

    let collapses = n - options.target_points(n).min(n);
    let retained = arena.num_alive().saturating_sub(collapses);
    if retained < boundary.len().max(2) {
        return Err(GraphError::degenerate(format!(
            "keeping {} of {} points leaves {} after trimming {} cap points, \
             fewer than the {} boundary points",
            options.target_points(n),
            n,
            retained,
            trimmed,
            boundary.len()
        )));
    }

    arena.collapse(&points, edges, &boundary, collapses)?;

    let redirect = arena.compress();
    let sampled_indices: Vec<usize> = (0..n).filter(|&i| redirect[i] == i).collect();

    let mut new_index = vec![usize::MAX; n];
    for (j, &i) in sampled_indices.iter().enumerate() {
        new_index[i] = j;
    }

    let edges: EdgeList = edges
        .iter()
        .map(|(s, t)| (redirect[s], redirect[t]))
        .filter(|(s, t)| s != t)
        .map(|(s, t)| (new_index[s], new_index[t]))
        .collect();

    let boundary = BoundaryIndices::new(
        new_index[boundary.inlet],
        boundary.outlets.iter().map(|&o| new_index[o]).collect(),
    );

    let mut i = 0;
    points.retain(|_| {
        let keep = redirect[i] == i;
        i += 1;
        keep
    });

    log::debug!(
        "decimated {} -> {} points ({} cap points, {} collapses), {} edges",
        n,
        points.len(),
        trimmed,
        collapses,
        edges.len()
    );

    Ok(Decimation {
        points,
        edges,
        boundary,
        sampled_indices,
    })
}
