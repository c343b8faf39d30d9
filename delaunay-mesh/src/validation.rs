use crate::error::ValidationError;
use crate::geo::{sign, Circle};
use crate::mesh::{DelaunayMesh, VertexId};

/// Relative slack allowed when deciding whether a vertex is inside a
/// circumcircle, points this close to the circle count as on it.
pub const DELAUNAY_EPSILON: f64 = 1e-9;

impl DelaunayMesh {
    /// Check that adjacency is symmetric, that no triangle is clockwise and
    /// that triangles away from the super triangle have a positive area.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (t, tri) in self.triangles() {
            let [a, b, c] = self.triangle_vertices(t);
            let area = sign(c, a, b);
            if area < 0.0 {
                return Err(ValidationError::Clockwise { triangle: t });
            }
            if area == 0.0 && !tri.vertices.iter().any(|&v| self.is_super_vertex(v)) {
                return Err(ValidationError::Degenerate { triangle: t });
            }

            for &n in tri.neighbors.iter().flatten() {
                let back = self
                    .triangle(n)
                    .neighbors
                    .iter()
                    .filter(|&&m| m == Some(t))
                    .count();

                if back != 1 {
                    return Err(ValidationError::AsymmetricNeighbor {
                        triangle: t,
                        neighbor: n,
                    });
                }
            }
        }

        Ok(())
    }

    /// Every `(triangle, vertex)` pair where a vertex lies strictly inside the
    /// circumcircle of an interior triangle it doesn't belong to. Flat
    /// interior triangles have no circumcircle and are reported as
    /// degenerate.
    pub fn delaunay_violations(&self) -> Vec<ValidationError> {
        let mut violations = vec![];

        for (t, tri) in self.interior_triangles() {
            let [a, b, c] = self.triangle_vertices(t);
            let circle = match Circle::circumcircle(a, b, c) {
                Some(circle) => circle,
                None => {
                    violations.push(ValidationError::Degenerate { triangle: t });
                    continue;
                }
            };
            let slack = Circle::new(circle.center, circle.radius * (1.0 - DELAUNAY_EPSILON));

            for (i, &p) in self.vertices().iter().enumerate() {
                let vertex = VertexId::new(i);
                if tri.vertex_slot(vertex).is_none() && slack.contains(p) {
                    violations.push(ValidationError::NotDelaunay {
                        triangle: t,
                        vertex,
                    });
                }
            }
        }

        violations
    }

    /// First empty circumcircle violation, if any.
    pub fn check_delaunay(&self) -> Result<(), ValidationError> {
        match self.delaunay_violations().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
