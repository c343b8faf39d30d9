use thiserror::Error;

use crate::mesh::{TriangleId, VertexId};

/// Reasons a point could not be inserted. The mesh is left untouched in both
/// cases.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsertError {
    /// The triangle walk did not reach a triangle containing the point.
    #[error("triangle walk failed after {steps} steps")]
    LocationFailed { steps: usize },

    /// The point is within the duplicate tolerance of an existing vertex.
    #[error("point too close to existing vertex {existing:?}")]
    DuplicatePoint { existing: VertexId },
}

/// Broken invariants reported by [`DelaunayMesh::validate`](crate::DelaunayMesh::validate)
/// and [`DelaunayMesh::check_delaunay`](crate::DelaunayMesh::check_delaunay).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("triangle {triangle:?} points to {neighbor:?} which does not point back")]
    AsymmetricNeighbor {
        triangle: TriangleId,
        neighbor: TriangleId,
    },

    #[error("triangle {triangle:?} is not counter-clockwise")]
    Clockwise { triangle: TriangleId },

    /// A triangle made only of inserted points has zero area.
    #[error("triangle {triangle:?} has no area")]
    Degenerate { triangle: TriangleId },

    #[error("vertex {vertex:?} lies inside the circumcircle of triangle {triangle:?}")]
    NotDelaunay {
        triangle: TriangleId,
        vertex: VertexId,
    },
}
