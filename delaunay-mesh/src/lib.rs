//!
//! Incremental planar Delaunay triangulation.
//!
//! Points are inserted one at a time into a mesh seeded with a super triangle;
//! the mesh can then be queried for its edges, circumcircles and the edges of
//! the dual Voronoi diagram.
//!
//! ```
//! use delaunay_mesh::{DelaunayMesh, Vec2};
//!
//! let mut mesh = DelaunayMesh::new();
//! for &(x, y) in &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
//!     mesh.insert(Vec2::new(x, y)).unwrap();
//! }
//!
//! // two triangles, three edges each
//! assert_eq!(mesh.edges().len(), 6);
//! assert!(mesh.check_delaunay().is_ok());
//! ```
//!

pub mod arena;
pub mod error;
pub mod flip;
pub mod geo;
pub mod mesh;
pub mod svg;
pub mod validation;

pub use error::{InsertError, ValidationError};
pub use geo::{Bbox, Circle, Vec2};
pub use mesh::{
    DelaunayMesh, Insertion, MeshConfig, Triangle, TriangleId, VertexId, DUPLICATE_TOLERANCE,
    SUPER_TRIANGLE_SIZE,
};
