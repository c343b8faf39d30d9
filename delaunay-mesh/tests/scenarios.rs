use approx::assert_relative_eq;

use delaunay_mesh::{DelaunayMesh, InsertError, Vec2, DUPLICATE_TOLERANCE};

fn mesh_of(points: &[(f64, f64)]) -> DelaunayMesh {
    let mut mesh = DelaunayMesh::new();
    for &(x, y) in points {
        mesh.insert(Vec2::new(x, y)).unwrap();
    }
    mesh
}

fn has_edge(mesh: &DelaunayMesh, a: Vec2, b: Vec2) -> bool {
    mesh.triangles().any(|(t, _)| {
        let [p, q, r] = mesh.triangle_vertices(t);
        [(p, q), (q, r), (r, p)]
            .iter()
            .any(|&(u, v)| (u, v) == (a, b) || (u, v) == (b, a))
    })
}

#[test]
fn single_point_leaves_no_interior_edges() {
    let mesh = mesh_of(&[(0.0, 0.0)]);

    assert_eq!(mesh.vertices().len(), 4);
    assert_eq!(mesh.triangle_count(), 3);
    assert!(mesh.edges().is_empty());
    assert_eq!(mesh.interior_triangles().count(), 0);
}

#[test]
fn square_is_split_along_a_diagonal() {
    let mut mesh = mesh_of(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

    assert_eq!(mesh.vertices().len(), 7);
    assert_eq!(mesh.triangle_count(), 9);
    assert_eq!(mesh.interior_triangles().count(), 2);
    assert_eq!(mesh.edges().len(), 6);
    assert_eq!(mesh.validate(), Ok(()));
    assert_eq!(mesh.check_delaunay(), Ok(()));

    let diagonals = [
        has_edge(&mesh, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)),
        has_edge(&mesh, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)),
    ];
    assert!(diagonals[0] != diagonals[1]);

    let interior = mesh
        .interior_triangles()
        .map(|(t, _)| t.index())
        .collect::<Vec<_>>();
    let circles = mesh.circumcircles();
    for t in interior {
        let circle = circles[t].unwrap();
        assert_relative_eq!(circle.center.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(circle.center.y, 5.0, epsilon = 1e-9);
        assert_relative_eq!(circle.radius, 50f64.sqrt(), epsilon = 1e-9);
    }
}

#[test]
fn later_insertion_flips_an_illegal_edge() {
    let a = Vec2::new(0.0, 0.0);
    let b = Vec2::new(10.0, 0.0);
    let c = Vec2::new(5.0, 1.0);
    let d = Vec2::new(5.0, -1.0);
    let e = Vec2::new(5.0, 10.0);

    let mut mesh = DelaunayMesh::new();
    for &p in &[a, b, c] {
        assert_eq!(mesh.insert(p).unwrap().flips, 0);
    }
    assert!(has_edge(&mesh, a, b));

    // `d` lies inside the circumcircle of `abc`
    assert!(mesh.insert(d).unwrap().flips > 0);
    mesh.insert(e).unwrap();

    assert!(!has_edge(&mesh, a, b));
    assert!(has_edge(&mesh, c, d));
    assert_eq!(mesh.validate(), Ok(()));
    assert_eq!(mesh.check_delaunay(), Ok(()));
}

#[test]
fn protected_insertion_counts() {
    let mut mesh = DelaunayMesh::new();
    let points = [
        (0.0, 0.0),
        (3.0, 4.0),
        (3.0 + DUPLICATE_TOLERANCE / 2.0, 4.0),
        (-7.0, 2.0),
        (0.0, 0.0),
        (12.0, -5.0),
    ];

    let mut accepted = 0;
    for &(x, y) in &points {
        let triangles = mesh.triangle_count();
        match mesh.insert_protected(Vec2::new(x, y)) {
            Ok(_) => {
                accepted += 1;
                assert_eq!(mesh.triangle_count(), triangles + 2);
            }
            Err(err) => {
                assert!(matches!(err, InsertError::DuplicatePoint { .. }));
                assert_eq!(mesh.triangle_count(), triangles);
            }
        }
    }

    assert_eq!(accepted, 4);
    assert_eq!(mesh.vertices().len(), 3 + accepted);
    assert_eq!(mesh.real_vertices()[3], Vec2::new(12.0, -5.0));
}

#[test]
fn duplicate_is_reported_against_the_existing_vertex() {
    let mut mesh = mesh_of(&[(1.0, 1.0), (2.0, 2.0)]);

    let err = mesh.insert_protected(Vec2::new(2.0, 2.05)).unwrap_err();

    match &err {
        InsertError::DuplicatePoint { existing } => {
            assert_eq!(existing.index(), 4);
            assert_eq!(mesh.vertex(*existing), Vec2::new(2.0, 2.0));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(err.to_string(), "point too close to existing vertex #4");
}

#[test]
fn queries_are_idempotent() {
    let mut mesh = mesh_of(&[(0.0, 0.0), (4.0, 1.0), (2.0, 5.0), (-3.0, 3.0), (1.0, -4.0)]);

    assert_eq!(mesh.edges(), mesh.edges());

    let circles = mesh.circumcircles().to_vec();
    assert_eq!(mesh.circumcircles(), &circles[..]);

    let voronoi = mesh.voronoi_edges();
    assert_eq!(mesh.voronoi_edges(), voronoi);
}

#[test]
fn voronoi_edges_start_at_interior_circumcenters() {
    let mut mesh = mesh_of(&[(0.0, 0.0), (4.0, 0.0), (0.0, 2.0)]);

    let edges = mesh.voronoi_edges();

    // one interior triangle with three neighbors
    assert_eq!(edges.len(), 3);
    for (from, to) in edges {
        assert_relative_eq!(from.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(from.y, 1.0, epsilon = 1e-9);
        assert!(to.dist(from) > 0.0);
    }
}

#[test]
fn boundary_triangles_have_no_edges_but_keep_circumcircles() {
    let mut mesh = mesh_of(&[(0.0, 0.0), (4.0, 0.0), (0.0, 2.0)]);

    let boundary = mesh
        .triangles()
        .filter(|(t, _)| mesh.is_boundary(*t))
        .count();
    assert_eq!(boundary, mesh.triangle_count() - 1);
    assert_eq!(mesh.edges().len(), 3);
    assert_eq!(mesh.circumcircles().len(), mesh.triangle_count());
    assert!(mesh
        .triangles()
        .any(|(_, tri)| tri.vertices.iter().any(|&v| mesh.is_super_vertex(v))));
}

#[test]
fn integer_grid_is_fully_triangulated() {
    let mut points = vec![];
    for y in 0..15 {
        for x in 0..15 {
            points.push((f64::from(x), f64::from(y)));
        }
    }
    let mesh = mesh_of(&points);

    assert_eq!(mesh.validate(), Ok(()));
    assert_eq!(mesh.check_delaunay(), Ok(()));

    // two triangles per grid cell, none of them flat
    assert_eq!(mesh.interior_triangles().count(), 2 * 14 * 14);
    assert_eq!(mesh.edges().len(), 3 * 2 * 14 * 14);
}

#[test]
fn collinear_insertions_leave_no_interior_edges() {
    let diagonal = mesh_of(&[(12.0, 8.0), (9.0, 6.0), (6.0, 4.0), (3.0, 2.0), (0.0, 0.0)]);
    assert_eq!(diagonal.validate(), Ok(()));
    assert!(diagonal.edges().is_empty());

    let row = mesh_of(&[
        (0.0, 0.0),
        (0.0, 1.0),
        (0.0, 2.0),
        (0.0, 3.0),
        (0.0, 4.0),
        (0.0, 5.0),
        (0.0, 6.0),
    ]);
    assert_eq!(row.validate(), Ok(()));
    assert!(row.edges().is_empty());
}
