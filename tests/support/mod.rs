//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::Point3;
use solidgen::{Solid, float_types::Real, polygon::Polygon};

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// of a solid.
pub fn bounding_box(solid: &Solid) -> [Real; 6] {
    let (mins, maxs) = solid.bounding_box().expect("solid has vertices");
    [mins.x, mins.y, mins.z, maxs.x, maxs.y, maxs.z]
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Vertex positions of a polygon as plain arrays.
pub fn positions(polygon: &Polygon) -> Vec<[Real; 3]> {
    polygon.positions().map(|p| [p.x, p.y, p.z]).collect()
}

/// Checks the polygon invariants and that every face of a convex solid looks
/// away from `interior`.
pub fn assert_convex_outward(solid: &Solid, interior: Point3<Real>) {
    solid.validate().expect("all polygons valid");
    for (i, polygon) in solid.polygons.iter().enumerate() {
        let outward = polygon.plane.normal.dot(&(polygon.centroid() - interior));
        assert!(outward > 0.0, "polygon {i} faces inward: {polygon:?}");
        // the interior sits behind every plane
        assert!(
            polygon.plane.signed_distance(&interior) < 0.0,
            "interior point in front of polygon {i}"
        );
    }
}

/// Two builds of the same options agree polygon for polygon, bit for bit.
/// Tags are left out since every build draws a fresh one.
pub fn assert_same_geometry(a: &Solid, b: &Solid) {
    assert_eq!(a.polygons.len(), b.polygons.len());
    for (i, (pa, pb)) in a.polygons.iter().zip(&b.polygons).enumerate() {
        assert_eq!(pa.vertices, pb.vertices, "polygon {i} vertices differ");
        assert_eq!(pa.plane, pb.plane, "polygon {i} planes differ");
        assert_eq!(pa.shared.color, pb.shared.color, "polygon {i} colors differ");
    }
    assert_eq!(a.properties, b.properties);
}

/// Every polygon carries the same tag, and it is `Some`.
pub fn assert_single_tag(solid: &Solid) {
    let tag = solid.tag().expect("solid is tagged");
    assert!(solid.polygons.iter().all(|p| p.shared.tag == Some(tag)));
}
