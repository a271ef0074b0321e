mod support;

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use solidgen::{
    PrimitiveError, Solid, TagCounter,
    options::{CapStyle, Center, CylinderOptions, MAX_SEGMENTS},
};
use support::{assert_convex_outward, assert_single_tag, bounding_box};

fn build(options: &CylinderOptions) -> Solid {
    Solid::cylinder(options, &TagCounter::new()).unwrap()
}

#[test]
fn cylinder_defaults() {
    let cylinder = build(&CylinderOptions::default());
    assert_eq!(cylinder.polygons.len(), 32 + 2);
    assert_single_tag(&cylinder);

    // axis through the origin, base on z = 0
    let bb = bounding_box(&cylinder);
    assert_relative_eq!(bb[0], -1.0, epsilon = 1e-12);
    assert_relative_eq!(bb[3], 1.0, epsilon = 1e-12);
    assert_eq!(bb[2], 0.0);
    assert_eq!(bb[5], 1.0);
    assert_convex_outward(&cylinder, Point3::new(0.0, 0.0, 0.5));
}

#[test]
fn cylinder_connectors() {
    let options = CylinderOptions {
        segments: Some(10),
        ..CylinderOptions::new(2.0, 10.0)
    };
    let cylinder = build(&options);
    assert_eq!(cylinder.polygons.len(), 12);

    let start = cylinder.properties.connector("cylinder", "start").unwrap();
    assert_eq!(start.point, Point3::origin());
    assert_eq!(start.axisvector, Vector3::new(0.0, 0.0, -1.0));
    assert_eq!(start.normalvector, Vector3::new(1.0, 0.0, 0.0));

    let end = cylinder.properties.connector("cylinder", "end").unwrap();
    assert_eq!(end.point, Point3::new(0.0, 0.0, 10.0));
    assert_eq!(end.axisvector, Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(end.normalvector, Vector3::new(1.0, 0.0, 0.0));
}

#[test]
fn cylinder_polygon_layout() {
    let options = CylinderOptions {
        segments: Some(8),
        ..CylinderOptions::new(1.0, 2.0)
    };
    let cylinder = build(&options);
    assert_eq!(cylinder.polygons.len(), 10);

    let bottom = &cylinder.polygons[0];
    assert_eq!(bottom.vertices.len(), 8);
    assert_relative_eq!(bottom.plane.normal, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-12);

    let side = &cylinder.polygons[1];
    assert_eq!(side.vertices.len(), 4);
    assert_relative_eq!(side.plane.normal.z, 0.0, epsilon = 1e-12);

    let top = &cylinder.polygons[9];
    assert_eq!(top.vertices.len(), 8);
    assert_relative_eq!(top.plane.normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    assert_relative_eq!(top.plane.w, 2.0, epsilon = 1e-12);
}

#[test]
fn cylinder_first_side_starts_at_angle_zero() {
    let options = CylinderOptions {
        segments: Some(32),
        ..CylinderOptions::new(1.0, 1.0)
    };
    let cylinder = build(&options);
    let side = &cylinder.polygons[1];
    // [p(0, t1), p(0, t0), p(1, t0), p(1, t1)], angle measured from +x towards -y
    let p = |i: usize| side.vertices[i].pos;
    assert_relative_eq!(p(0), Point3::new(0.9807852804032304, -0.19509032201612825, 0.0), epsilon = 1e-12);
    assert_relative_eq!(p(1), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(p(2), Point3::new(1.0, 0.0, 1.0), epsilon = 1e-12);
    assert_relative_eq!(p(3), Point3::new(0.9807852804032304, -0.19509032201612825, 1.0), epsilon = 1e-12);
}

#[test]
fn cone_drops_the_apex_cap() {
    let options = CylinderOptions {
        r1: Some(2.0),
        r2: Some(0.0),
        h: Some(3.0),
        segments: Some(12),
        ..Default::default()
    };
    let cone = build(&options);
    assert_eq!(cone.polygons.len(), 12 + 1);
    assert!(cone.polygons[1..].iter().all(|p| p.vertices.len() == 3));
    assert_convex_outward(&cone, Point3::new(0.0, 0.0, 1.0));

    let inverted = build(&CylinderOptions {
        r1: Some(0.0),
        r2: Some(2.0),
        ..options
    });
    assert_eq!(inverted.polygons.len(), 13);
    assert_convex_outward(&inverted, Point3::new(0.0, 0.0, 2.0));
}

#[test]
fn fan_caps_emit_three_polygons_per_slice() {
    let options = CylinderOptions {
        segments: Some(10),
        caps: CapStyle::Fan,
        ..CylinderOptions::new(1.0, 1.0)
    };
    let cylinder = build(&options);
    assert_eq!(cylinder.polygons.len(), 30);
    assert_eq!(cylinder.polygons[0].vertices.len(), 3);
    assert_eq!(cylinder.polygons[1].vertices.len(), 4);
    assert_eq!(cylinder.polygons[2].vertices.len(), 3);
    assert_convex_outward(&cylinder, Point3::new(0.0, 0.0, 0.5));
}

#[test]
fn fan_caps_split_frustum_sides() {
    let options = CylinderOptions {
        r1: Some(1.0),
        r2: Some(0.5),
        segments: Some(6),
        caps: CapStyle::Fan,
        ..Default::default()
    };
    let frustum = build(&options);
    assert_eq!(frustum.polygons.len(), 24);
    assert!(frustum.polygons.iter().all(|p| p.vertices.len() == 3));
    assert_convex_outward(&frustum, Point3::new(0.0, 0.0, 0.5));
}

#[test]
fn cylinder_centering() {
    let options = CylinderOptions {
        center: Some(Center::All(true)),
        ..CylinderOptions::new(2.0, 10.0)
    };
    let bb = bounding_box(&build(&options));
    assert_eq!(bb[2], -5.0);
    assert_eq!(bb[5], 5.0);

    let options = CylinderOptions {
        center: Some(Center::PerAxis([false, false, false])),
        r1: Some(1.0),
        r2: Some(3.0),
        ..Default::default()
    };
    let cylinder = build(&options);
    let bb = bounding_box(&cylinder);
    assert_relative_eq!(bb[0], 0.0, epsilon = 1e-12);
    assert_relative_eq!(bb[1], 0.0, epsilon = 1e-12);
    assert_eq!(bb[2], 0.0);
    let start = cylinder.properties.connector("cylinder", "start").unwrap();
    assert_eq!(start.point, Point3::new(3.0, 3.0, 0.0));
}

#[test]
fn cylinder_between_points_ignores_center() {
    let options = CylinderOptions {
        r: Some(0.5),
        start: Some([1.0, 1.0, 1.0]),
        end: Some([1.0, 5.0, 1.0]),
        center: Some(Center::All(false)),
        segments: Some(16),
        ..Default::default()
    };
    let cylinder = build(&options);
    let bb = bounding_box(&cylinder);
    assert_eq!(bb[1], 1.0);
    assert_eq!(bb[4], 5.0);
    assert_relative_eq!(bb[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(bb[3], 1.5, epsilon = 1e-12);

    let end = cylinder.properties.connector("cylinder", "end").unwrap();
    assert_eq!(end.axisvector, Vector3::new(0.0, 1.0, 0.0));
    assert_relative_eq!(end.normalvector.dot(&end.axisvector), 0.0, epsilon = 1e-12);
    assert_convex_outward(&cylinder, Point3::new(1.0, 3.0, 1.0));
}

#[test]
fn cylinder_on_a_skew_axis_faces_outward() {
    let options = CylinderOptions {
        r1: Some(1.0),
        r2: Some(2.0),
        start: Some([-1.0, 2.0, 0.5]),
        end: Some([3.0, -1.0, 4.0]),
        segments: Some(20),
        ..Default::default()
    };
    let cylinder = build(&options);
    assert_convex_outward(&cylinder, Point3::new(1.0, 0.5, 2.25));
}

#[test]
fn cylinder_diameters() {
    let options = CylinderOptions {
        d1: Some(4.0),
        d2: Some(2.0),
        ..Default::default()
    };
    let cylinder = build(&options);
    let bb = bounding_box(&cylinder);
    assert_relative_eq!(bb[0], -2.0, epsilon = 1e-12);
    assert_relative_eq!(bb[3], 2.0, epsilon = 1e-12);
}

#[test]
fn cylinder_configuration_errors() {
    let both_zero = CylinderOptions {
        r: Some(0.0),
        ..Default::default()
    };
    let missing_end = CylinderOptions {
        start: Some([0.0, 0.0, 0.0]),
        ..Default::default()
    };
    let same_points = CylinderOptions {
        start: Some([1.0, 2.0, 3.0]),
        end: Some([1.0, 2.0, 3.0]),
        ..Default::default()
    };
    let few_segments = CylinderOptions {
        segments: Some(2),
        ..Default::default()
    };
    let huge_segments = CylinderOptions {
        segments: Some(i64::MAX),
        ..Default::default()
    };
    let negative_height = CylinderOptions {
        h: Some(-1.0),
        ..Default::default()
    };
    let negative_radius = CylinderOptions {
        r1: Some(-1.0),
        ..Default::default()
    };
    for (options, field) in [
        (both_zero, "r"),
        (missing_end, "end"),
        (same_points, "end"),
        (few_segments, "fn"),
        (huge_segments, "fn"),
        (negative_height, "h"),
        (negative_radius, "r1"),
    ] {
        match Solid::cylinder(&options, &TagCounter::new()) {
            Err(PrimitiveError::Configuration(e)) => assert_eq!(e.field, field),
            other => panic!("expected a configuration error for {field}, got {other:?}"),
        }
    }
}

#[test]
fn long_thin_cylinder_builds() {
    let cylinder = build(&CylinderOptions::new(0.001, 1000.0));
    assert_eq!(cylinder.polygons.len(), 34);
    assert_convex_outward(&cylinder, Point3::new(0.0, 0.0, 500.0));
    let bb = bounding_box(&cylinder);
    assert_relative_eq!(bb[2], 0.0);
    assert_relative_eq!(bb[5], 1000.0);
}

#[test]
fn segment_count_has_an_upper_bound() {
    let at_limit = CylinderOptions {
        segments: Some(MAX_SEGMENTS as i64),
        ..Default::default()
    };
    assert_eq!(build(&at_limit).polygons.len(), MAX_SEGMENTS + 2);

    let above = CylinderOptions {
        segments: Some(MAX_SEGMENTS as i64 + 1),
        ..Default::default()
    };
    match Solid::cylinder(&above, &TagCounter::new()) {
        Err(PrimitiveError::Configuration(e)) => assert_eq!(e.field, "fn"),
        other => panic!("expected a configuration error, got {other:?}"),
    }
}
