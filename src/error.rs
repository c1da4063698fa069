//! Error types for vasgraph.
//!
//! Every failure of the graph pipeline is reported through [`GraphError`].
//! A mesh either produces a complete graph or one of these errors; partial
//! graphs are never returned.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`GraphError`].
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while building a centerline graph.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Shortest-path search left nodes at infinite distance.
    ///
    /// The centerline graph is disconnected. Retrying with a larger
    /// resample fraction sometimes helps when decimation split a thin branch.
    #[error("{} node(s) unreachable from node {origin}: {nodes:?}", .nodes.len())]
    UnreachableNodes {
        /// The node the search started from.
        origin: usize,
        /// Nodes that were never reached, in ascending order.
        nodes: Vec<usize>,
    },

    /// A junction outlet was found before any junction inlet with its label.
    #[error("point {point} leaves junction {label}, but no inlet was recorded for that junction")]
    MalformedJunctionLabeling {
        /// The outlet attachment point.
        point: usize,
        /// The bifurcation label of the preceding point.
        label: i64,
    },

    /// Decimation cannot produce a valid point set with the given parameters.
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// What went wrong.
        reason: String,
    },

    /// Input arrays are inconsistent with each other.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a centerline from file.
    #[error("failed to load centerline from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl GraphError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        GraphError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a degenerate geometry error.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        GraphError::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    /// Whether retrying with different decimation parameters can help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GraphError::DegenerateGeometry { .. } | GraphError::UnreachableNodes { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_message_lists_nodes() {
        let err = GraphError::UnreachableNodes {
            origin: 0,
            nodes: vec![3, 4],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 node(s)"));
        assert!(msg.contains("[3, 4]"));
    }

    #[test]
    fn test_retryable() {
        assert!(GraphError::degenerate("too few points").is_retryable());
        assert!(!GraphError::MalformedJunctionLabeling { point: 4, label: 7 }.is_retryable());
        assert!(!GraphError::invalid_param("resample_fraction", 0.0, "must be in (0, 1]").is_retryable());
    }
}
