mod support;

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use solidgen::{PrimitiveError, Solid, TagCounter, float_types::Real, options::TorusOptions};
use support::{assert_same_geometry, assert_single_tag, bounding_box};

fn build(options: &TorusOptions) -> Solid {
    Solid::torus(options, &TagCounter::new()).unwrap()
}

/// Every face looks away from the tube centre circle of radius `ro`.
fn assert_tube_outward(solid: &Solid, ro: Real) {
    solid.validate().expect("all polygons valid");
    for (i, polygon) in solid.polygons.iter().enumerate() {
        let c = polygon.centroid();
        let radial = Vector3::new(c.x, c.y, 0.0).normalize();
        let tube = Point3::from(radial * ro);
        let outward = polygon.plane.normal.dot(&(c - tube));
        assert!(outward > 0.0, "polygon {i} faces into the tube");
    }
}

#[test]
fn torus_defaults() {
    let torus = build(&TorusOptions::default());
    assert_eq!(torus.polygons.len(), 512);
    assert!(torus.polygons.iter().all(|p| p.vertices.len() == 4));
    assert_single_tag(&torus);
    assert_eq!(torus.properties.point("torus", "center"), Some(Point3::origin()));

    let bb = bounding_box(&torus);
    assert_relative_eq!(bb[3], 5.0, epsilon = 1e-12);
    assert_relative_eq!(bb[5], 1.0, epsilon = 1e-12);
    assert_relative_eq!(bb[2], -1.0, epsilon = 1e-12);
    assert_tube_outward(&torus, 4.0);
}

#[test]
fn torus_first_and_last_quads() {
    let torus = build(&TorusOptions::default());

    let first = &torus.polygons[0];
    let expected = [
        Point3::new(4.923879532511286, 0.0, -0.3826834323650904),
        Point3::new(5.0, 0.0, 0.0),
        Point3::new(4.903926402016152, -0.9754516100806412, 0.0),
        Point3::new(4.8292685679658085, -0.9606012435662499, -0.3826834323650904),
    ];
    for (vertex, p) in first.vertices.iter().zip(expected) {
        assert_relative_eq!(vertex.pos, p, epsilon = 1e-12);
    }
    assert_relative_eq!(
        first.plane.normal,
        Vector3::new(0.9762410328686741, -0.09615134934208333, -0.1941864149810719),
        epsilon = 1e-9
    );
    assert_relative_eq!(first.plane.w, 4.8812051643433705, epsilon = 1e-9);

    let last = &torus.polygons[511];
    let expected = [
        Point3::new(4.616661044273995, 0.9183109777059866, -0.7071067811865477),
        Point3::new(4.8292685679658085, 0.9606012435662521, -0.3826834323650904),
        Point3::new(4.923879532511286, 0.0, -0.3826834323650904),
        Point3::new(4.707106781186547, 0.0, -0.7071067811865477),
    ];
    for (vertex, p) in last.vertices.iter().zip(expected) {
        assert_relative_eq!(vertex.pos, p, epsilon = 1e-12);
    }
    // the revolution closes on the first meridian exactly
    assert_eq!(last.vertices[2].pos, first.vertices[0].pos);
    assert_relative_eq!(
        last.plane.normal,
        Vector3::new(0.8286954742331524, 0.08161938021295423, -0.5537166132229949),
        epsilon = 1e-9
    );
    assert_relative_eq!(last.plane.w, 4.292294858367102, epsilon = 1e-9);
}

#[test]
fn torus_custom_parameters() {
    let options = TorusOptions {
        ro: Some(5.0),
        ri: Some(3.0),
        fni: Some(4),
        fno: Some(5),
        roti: Some(45.0),
    };
    let torus = build(&options);
    assert_eq!(torus.polygons.len(), 20);

    let first = &torus.polygons[0];
    let expected = [
        Point3::new(7.121320343559642, 0.0, -2.1213203435596433),
        Point3::new(7.121320343559643, 0.0, 2.1213203435596424),
        Point3::new(2.200609008547969, -6.77277811736764, 2.1213203435596424),
        Point3::new(2.2006090085479686, -6.772778117367639, -2.1213203435596433),
    ];
    for (vertex, p) in first.vertices.iter().zip(expected) {
        assert_relative_eq!(vertex.pos, p, epsilon = 1e-12);
    }
    assert_relative_eq!(
        first.plane.normal,
        Vector3::new(0.8090169943749475, -0.5877852522924731, 0.0),
        epsilon = 1e-9
    );
    assert_relative_eq!(first.plane.w, 5.76126918032779, epsilon = 1e-9);

    let last = &torus.polygons[19];
    assert_relative_eq!(
        last.vertices[0].pos,
        Point3::new(0.8895609352015047, 2.7377870455838953, -2.121320343559642),
        epsilon = 1e-12
    );
    assert_relative_eq!(last.plane.normal, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-9);
    assert_relative_eq!(last.plane.w, 2.121320343559641, epsilon = 1e-9);
    assert_tube_outward(&torus, 5.0);
}

#[test]
fn torus_profile_rotation_only_moves_the_tube_samples() {
    let plain = build(&TorusOptions {
        fni: Some(6),
        fno: Some(8),
        ..Default::default()
    });
    let rotated = build(&TorusOptions {
        fni: Some(6),
        fno: Some(8),
        roti: Some(30.0),
        ..Default::default()
    });
    assert_eq!(plain.polygons.len(), rotated.polygons.len());
    // a hexagonal profile rotated by 30 degrees puts a vertex on the top of the tube
    let top = |solid: &Solid| bounding_box(solid)[5];
    assert!(top(&rotated) > top(&plain));
    assert_relative_eq!(top(&rotated), 1.0, epsilon = 1e-12);
}

#[test]
fn torus_configuration_errors() {
    let fat_tube = TorusOptions {
        ri: Some(4.0),
        ro: Some(4.0),
        ..Default::default()
    };
    let negative = TorusOptions {
        ri: Some(-1.0),
        ..Default::default()
    };
    let few_inner = TorusOptions {
        fni: Some(2),
        ..Default::default()
    };
    let few_outer = TorusOptions {
        fno: Some(-5),
        ..Default::default()
    };
    let many_inner = TorusOptions {
        fni: Some(100_000),
        ..Default::default()
    };
    let bad_rotation = TorusOptions {
        roti: Some(Real::INFINITY),
        ..Default::default()
    };
    for (options, field) in [
        (fat_tube, "ri"),
        (negative, "ri"),
        (few_inner, "fni"),
        (few_outer, "fno"),
        (many_inner, "fni"),
        (bad_rotation, "roti"),
    ] {
        match Solid::torus(&options, &TagCounter::new()) {
            Err(PrimitiveError::Configuration(e)) => assert_eq!(e.field, field),
            other => panic!("expected a configuration error for {field}, got {other:?}"),
        }
    }
}

#[test]
fn torus_is_deterministic() {
    let options = TorusOptions {
        ri: Some(0.7),
        ro: Some(3.0),
        fni: Some(9),
        fno: Some(17),
        roti: Some(15.0),
        ..Default::default()
    };
    let tags = TagCounter::new();
    let first = Solid::torus(&options, &tags).unwrap();
    let second = Solid::torus(&options, &tags).unwrap();
    assert_ne!(first.tag(), second.tag());
    assert_same_geometry(&first, &second);
}
