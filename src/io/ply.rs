//! PLY centerline support.
//!
//! A centerline is stored as two elements:
//!
//! ```text
//! element vertex N
//! property float x
//! property float y
//! property float z
//! property int bifurcation_id
//! property float area
//! element edge M
//! property int vertex1
//! property int vertex2
//! ```
//!
//! `bifurcation_id` may also be spelled `BifurcationId`. When it is absent
//! every point is a segment point. `area` is required.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::centerline::{Centerline, EdgeList, SEGMENT_LABEL};
use crate::error::{GraphError, Result};

/// Load a centerline from a PLY file.
///
/// # Example
///
/// ```no_run
/// use vasgraph::io::ply;
///
/// let centerline = ply::load("aorta.ply").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Centerline> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let load_error = |message: String| GraphError::LoadError {
        path: path.to_path_buf(),
        message,
    };

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| load_error(e.to_string()))?;

    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| load_error("PLY file has no vertex element".to_string()))?;

    let n = vertex_element.len();
    let mut points: Vec<Point3<f64>> = Vec::with_capacity(n);
    let mut bifurcation_ids: Vec<i64> = Vec::with_capacity(n);
    let mut areas: Vec<f64> = Vec::with_capacity(n);
    for (i, vertex) in vertex_element.iter().enumerate() {
        let coord = |name: &str| {
            get_float_property(vertex, name)
                .ok_or_else(|| load_error(format!("vertex {} missing {} coordinate", i, name)))
        };
        points.push(Point3::new(coord("x")?, coord("y")?, coord("z")?));

        let area = get_float_property(vertex, "area")
            .ok_or_else(|| load_error(format!("vertex {} missing area", i)))?;
        areas.push(area);

        let label = get_int_property(vertex, "bifurcation_id")
            .or_else(|| get_int_property(vertex, "BifurcationId"))
            .unwrap_or(SEGMENT_LABEL);
        bifurcation_ids.push(label);
    }

    let edge_element = ply
        .payload
        .get("edge")
        .ok_or_else(|| load_error("PLY file has no edge element".to_string()))?;

    let mut edges = EdgeList::with_capacity(edge_element.len());
    for (i, edge) in edge_element.iter().enumerate() {
        let endpoint = |name: &str| {
            get_int_property(edge, name)
                .filter(|&v| v >= 0)
                .map(|v| v as usize)
                .ok_or_else(|| load_error(format!("edge {} has no valid {}", i, name)))
        };
        edges.push(endpoint("vertex1")?, endpoint("vertex2")?);
    }

    log::debug!(
        "loaded {}: {} points, {} edges",
        path.display(),
        points.len(),
        edges.len()
    );

    Centerline::new(points, edges, bifurcation_ids, areas)
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

/// Integer properties; floats are accepted when they hold a whole number.
fn get_int_property(element: &DefaultElement, name: &str) -> Option<i64> {
    match element.get(name)? {
        Property::Int(v) => Some(*v as i64),
        Property::UInt(v) => Some(*v as i64),
        Property::Short(v) => Some(*v as i64),
        Property::UShort(v) => Some(*v as i64),
        Property::Char(v) => Some(*v as i64),
        Property::UChar(v) => Some(*v as i64),
        Property::Float(v) if v.fract() == 0.0 => Some(*v as i64),
        Property::Double(v) if v.fract() == 0.0 => Some(*v as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_ply(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".ply").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const Y_PLY: &str = "ply
format ascii 1.0
element vertex 5
property float x
property float y
property float z
property int bifurcation_id
property float area
element edge 4
property int vertex1
property int vertex2
end_header
0 0 0 -1 2.0
1 0 0 3 1.5
2 1 0 -1 1.0
2 -1 0 -1 1.0
1.5 0 1 -1 0.5
0 1
1 2
1 3
3 4
";

    #[test]
    fn test_load_centerline() {
        let file = write_ply(Y_PLY);
        let centerline = load(file.path()).unwrap();

        assert_eq!(centerline.num_points(), 5);
        assert_eq!(centerline.edges().len(), 4);
        assert_eq!(centerline.bifurcation_ids(), &[-1, 3, -1, -1, -1]);
        assert_eq!(centerline.areas(), &[2.0, 1.5, 1.0, 1.0, 0.5]);
        assert_eq!(centerline.points()[2], Point3::new(2.0, 1.0, 0.0));

        let boundary = centerline.boundary();
        assert_eq!(boundary.inlet, 0);
        assert_eq!(boundary.outlets, vec![2, 4]);
    }

    #[test]
    fn test_load_through_format_detection() {
        let file = write_ply(Y_PLY);
        let centerline = crate::io::load(file.path()).unwrap();
        assert_eq!(centerline.num_junctions(), 1);
    }

    #[test]
    fn test_missing_labels_default_to_segment() {
        let file = write_ply(
            "ply
format ascii 1.0
element vertex 2
property float x
property float y
property float z
property float area
element edge 1
property int vertex1
property int vertex2
end_header
0 0 0 1
1 0 0 1
0 1
",
        );
        let centerline = load(file.path()).unwrap();
        assert_eq!(centerline.bifurcation_ids(), &[SEGMENT_LABEL, SEGMENT_LABEL]);
    }

    #[test]
    fn test_missing_edges_is_load_error() {
        let file = write_ply(
            "ply
format ascii 1.0
element vertex 2
property float x
property float y
property float z
property float area
end_header
0 0 0 1
1 0 0 1
",
        );
        assert!(matches!(
            load(file.path()),
            Err(GraphError::LoadError { .. })
        ));
    }

    #[test]
    fn test_out_of_range_edge_is_invalid_input() {
        let file = write_ply(
            "ply
format ascii 1.0
element vertex 2
property float x
property float y
property float z
property float area
element edge 1
property int vertex1
property int vertex2
end_header
0 0 0 1
1 0 0 1
0 5
",
        );
        assert!(matches!(
            load(file.path()),
            Err(GraphError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load("/nonexistent/centerline.ply"),
            Err(GraphError::Io(_))
        ));
    }
}
