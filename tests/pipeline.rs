#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use shapemesh::export::{MeshRenderer, PlotData};
use shapemesh::io::PolyFileData;
use shapemesh::math::{Point2, PointKey};
use shapemesh::mesh::MeshResult;
use shapemesh::{MesherConfig, ShapeMeshError, ShapeMesher};

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn rect(x0: f64, y0: f64, w: f64, h: f64) -> Vec<Point2> {
    vec![p(x0, y0), p(x0 + w, y0), p(x0 + w, y0 + h), p(x0, y0 + h)]
}

fn mesher() -> ShapeMesher {
    ShapeMesher::new(MesherConfig::default().with_verbose(false))
}

fn mesh_area(result: &MeshResult) -> f64 {
    result
        .triangles
        .iter()
        .map(|&[a, b, c]| {
            let (a, b, c) = (result.vertices[a], result.vertices[b], result.vertices[c]);
            (b - a).perp(&(c - a)) * 0.5
        })
        .sum()
}

#[derive(Default)]
struct RecordingRenderer {
    calls: usize,
    last_shape_map: Vec<usize>,
}

impl MeshRenderer for RecordingRenderer {
    fn save(&mut self, plot: &PlotData<'_>, _path: &Path) -> shapemesh::Result<()> {
        self.calls += 1;
        self.last_shape_map = plot.shape_map.to_vec();
        Ok(())
    }

    fn show(&mut self, _plot: &PlotData<'_>) -> shapemesh::Result<()> {
        Err(ShapeMeshError::UnsupportedFormat("interactive display".into()))
    }
}

#[test]
fn adjacent_regions_are_tagged_by_owner() {
    let mut m = mesher();
    m.new_shape("west", &rect(0.0, 0.0, 2.0, 2.0), "polygon").unwrap();
    m.new_shape("east", &rect(2.0, 0.0, 2.0, 2.0), "polygon").unwrap();
    m.meshit(false).unwrap();
    m.refine_mesh("q20a0.2").unwrap();

    let centroids = m.result().unwrap().centroids.clone();
    let owners = m.shape_map().unwrap().to_vec();
    assert_eq!(owners.len(), centroids.len());
    for (c, owner) in centroids.iter().zip(&owners) {
        let expected = usize::from(c.x >= 2.0);
        assert_eq!(*owner, expected, "centroid ({}, {})", c.x, c.y);
    }
    assert!(owners.contains(&0) && owners.contains(&1));
}

#[test]
fn overlapping_shapes_resolve_to_later_one() {
    let mut m = mesher();
    m.new_shape("A", &rect(0.0, 0.0, 4.0, 4.0), "polygon").unwrap();
    m.new_shape("B", &rect(0.0, 0.0, 4.0, 4.0), "polygon").unwrap();
    m.meshit(false).unwrap();
    assert!(m.shape_map().unwrap().iter().all(|&i| i == 1));
}

#[test]
fn convex_polygon_boundary_closure() {
    let hexagon: Vec<Point2> = (0..6)
        .map(|i| {
            let a = std::f64::consts::FRAC_PI_3 * f64::from(i);
            p(3.0 * a.cos(), 3.0 * a.sin())
        })
        .collect();
    let mut m = mesher();
    m.new_shape("hex", &hexagon, "polygon").unwrap();
    m.meshit(false).unwrap();

    let result = m.result().unwrap();
    let hex_keys: HashSet<PointKey> = hexagon.iter().map(PointKey::new).collect();
    for (v, &b) in result.vertices.iter().zip(&result.boundary_mask) {
        if hex_keys.contains(&PointKey::new(v)) {
            assert!(b);
        }
        if v.coords.norm() < 2.5 {
            assert!(!b, "interior vertex ({}, {}) flagged", v.x, v.y);
        }
    }
}

#[test]
fn same_angle_refinement_keeps_fidelity() {
    let mut m = mesher();
    m.new_shape("field", &rect(0.0, 0.0, 10.0, 3.0), "polygon").unwrap();
    m.new_shape("well", &[p(4.0, 1.5)], "point").unwrap();
    m.meshit(false).unwrap();
    let first = m.result().unwrap().clone();

    m.refine_mesh("q20").unwrap();
    let refined = m.result().unwrap();
    assert!(refined.triangles.len() >= first.triangles.len());

    let keys: HashSet<PointKey> = refined.vertices.iter().map(PointKey::new).collect();
    for (v, &b) in first.vertices.iter().zip(&first.boundary_mask) {
        if b {
            assert!(keys.contains(&PointKey::new(v)));
        }
    }
    assert!(keys.contains(&PointKey::new(&p(4.0, 1.5))));
}

#[test]
fn poly_unit_square_meshes() {
    let text = "4 2 0 0\n1 0 0\n2 1 0\n3 1 1\n4 0 1\n4 0\n1 1 2\n2 2 3\n3 3 4\n4 4 1\n0\n";
    let data = PolyFileData::parse(text).unwrap();
    assert_eq!(data.segments, vec![[0, 1], [1, 2], [2, 3], [3, 0]]);

    let mut m = mesher();
    m.meshit_poly(data, true).unwrap();
    let result = m.result().unwrap();
    let area: f64 = result
        .triangles
        .iter()
        .map(|&[a, b, c]| {
            let (a, b, c) = (result.vertices[a], result.vertices[b], result.vertices[c]);
            (b - a).perp(&(c - a)) * 0.5
        })
        .sum();
    assert!((area - 1.0).abs() < 1e-9);
    assert_eq!(m.mesh_input().unwrap().segments.len(), 4);
}

#[test]
fn poly_file_from_disk() {
    let path = std::env::temp_dir().join(format!("shapemesh-{}.poly", std::process::id()));
    std::fs::write(&path, "3 2 0 0\n1 0 0\n2 2 0\n3 1 1.5\n0 0\n0\n").unwrap();
    let mut m = mesher();
    m.meshit_poly_file(&path, false).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(m.result().unwrap().triangles.len(), 1);
}

#[test]
fn export_checks_extension_first() {
    let mut m = mesher();
    m.new_shape("A", &rect(0.0, 0.0, 1.0, 1.0), "polygon").unwrap();
    m.meshit(false).unwrap();

    let mut renderer = RecordingRenderer::default();
    let err = m
        .plot(Some(PathBuf::from("mesh.bmp")), &mut renderer)
        .unwrap_err();
    assert!(matches!(err, ShapeMeshError::UnsupportedFormat(_)));
    assert_eq!(renderer.calls, 0);

    m.plot(Some(PathBuf::from("mesh.png")), &mut renderer).unwrap();
    assert_eq!(renderer.calls, 1);
    assert_eq!(renderer.last_shape_map.len(), m.result().unwrap().triangles.len());
}

#[test]
fn invalid_kind_does_not_register() {
    let mut m = mesher();
    let err = m.new_shape("A", &rect(0.0, 0.0, 1.0, 1.0), "square").unwrap_err();
    assert!(matches!(err, ShapeMeshError::InvalidShapeKind(_)));
    assert!(m.registry().is_empty());
}

#[test]
fn simplified_shapes_still_mesh() {
    let mut m = mesher();
    let noisy: Vec<Point2> = (0..=20)
        .map(|i| p(f64::from(i) * 0.5, if i % 2 == 0 { 0.0 } else { 0.001 }))
        .chain([p(10.0, 5.0), p(0.0, 5.0)])
        .collect();
    m.new_shape("noisy", &noisy, "polygon").unwrap();
    m.simplify(0.01, None).unwrap();
    assert_eq!(m.registry().get("noisy").unwrap().geometry().boundary_coords().len(), 5);
    m.meshit(false).unwrap();
    assert_eq!(m.mesh_input().unwrap().vertices.len(), 4);
}

#[test]
fn concave_l_shape_fills_its_hull() {
    let l_shape = vec![
        p(0.0, 0.0),
        p(4.0, 0.0),
        p(4.0, 2.0),
        p(2.0, 2.0),
        p(2.0, 4.0),
        p(0.0, 4.0),
    ];
    let mut m = mesher();
    m.new_shape("L", &l_shape, "polygon").unwrap();
    m.meshit(true).unwrap();

    let result = m.result().unwrap();
    // L area 12 plus the notch (2, 2), (4, 2), (2, 4) closed by the hull.
    assert!((mesh_area(result) - 14.0).abs() < 1e-9);
    assert!(result
        .centroids
        .iter()
        .any(|c| c.x > 2.0 && c.y > 2.0 && c.x + c.y < 6.0));
    assert!(result.vertices.iter().all(|v| v.x + v.y <= 6.0 + 1e-9));
    assert_eq!(result.boundary_count(), 0);
    assert!(m.shape_map().unwrap().iter().all(|&i| i == 0));
}

#[test]
fn concave_adjacent_squares_constrain_through_shared_corner() {
    let mut m = mesher();
    m.new_shape("west", &rect(0.0, 0.0, 1.0, 1.0), "polygon").unwrap();
    m.new_shape("east", &rect(1.0, 0.0, 1.0, 1.0), "polygon").unwrap();
    m.meshit(true).unwrap();

    let input = m.mesh_input().unwrap();
    assert_eq!(input.vertices.len(), 6);
    assert_eq!(input.segments.len(), 6);
    let shared = input.vertices.iter().position(|v| *v == p(1.0, 0.0)).unwrap();
    assert_eq!(input.segments.iter().filter(|s| s.contains(&shared)).count(), 2);

    assert!((mesh_area(m.result().unwrap()) - 2.0).abs() < 1e-9);
    m.refine_mesh("pq20a0.1").unwrap();
    let refined = m.result().unwrap();
    assert!((mesh_area(refined) - 2.0).abs() < 1e-9);
    assert!(refined.triangles.len() >= 20);
}
