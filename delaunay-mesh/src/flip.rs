//!
//! Restores the Delaunay property around a freshly inserted vertex by
//! flipping the edges facing it.
//!

use tracing::trace;

use crate::geo::{sign, Circle, Vec2};
use crate::mesh::{DelaunayMesh, Triangle, TriangleId, VertexId};

/// The edge of a triangle facing the new vertex, with the triangle on the
/// other side.
#[derive(Debug, Clone, Copy)]
struct FacingEdge {
    /// slot of the new vertex in the triangle
    p_slot: usize,
    neighbor: TriangleId,
    /// slot of the vertex of `neighbor` not on the shared edge
    q_slot: usize,
}

impl DelaunayMesh {
    /// Flip every edge facing `p` whose far vertex lies inside the
    /// circumcircle of the triangle on `p`'s side, starting from the given
    /// triangles. Returns the number of flips performed.
    pub(crate) fn restore_delaunay(&mut self, p: VertexId, worklist: &mut Vec<TriangleId>) -> usize {
        let mut flips = 0;

        while let Some(t) = worklist.pop() {
            // a flip pops one triangle and pushes two, every flip adds an
            // edge to `p`, so the worklist can't outgrow the mesh
            debug_assert!(
                worklist.len() <= self.triangles.len() + 3,
                "runaway Delaunay repair around {:?}",
                p
            );

            let edge = match self.facing_edge(t, p) {
                Some(edge) => edge,
                None => continue,
            };

            if !self.is_illegal(t, edge) {
                continue;
            }

            self.flip(t, edge);
            flips += 1;

            worklist.push(t);
            worklist.push(edge.neighbor);
        }

        flips
    }

    fn facing_edge(&self, t: TriangleId, p: VertexId) -> Option<FacingEdge> {
        let tri = &self.triangles[t];

        let p_slot = tri.vertex_slot(p)?;
        let neighbor = tri.neighbors[p_slot]?;
        let q_slot = self.triangles[neighbor].neighbor_slot(t);
        debug_assert!(
            q_slot.is_some(),
            "{:?} doesn't point back to {:?}",
            neighbor,
            t
        );
        let q_slot = q_slot?;

        Some(FacingEdge {
            p_slot,
            neighbor,
            q_slot,
        })
    }

    fn is_illegal(&self, t: TriangleId, edge: FacingEdge) -> bool {
        let tri = &self.triangles[t];
        let p = self.vertices[tri.vertices[edge.p_slot]];
        let r = self.vertices[tri.vertices[(edge.p_slot + 1) % 3]];
        let s = self.vertices[tri.vertices[(edge.p_slot + 2) % 3]];
        let q = self.vertices[self.triangles[edge.neighbor].vertices[edge.q_slot]];

        // the quadrilateral must be strictly convex for the flipped triangles
        // `(r, q, p)` and `(q, s, p)` to keep a positive area, circles through
        // the super triangle are too large to be trusted on this
        if sign(p, r, q) <= 0.0 || sign(p, q, s) <= 0.0 {
            return false;
        }

        match Circle::circumcircle(r, s, p) {
            Some(circle) => circle.contains(q),
            // `p` fell right on the edge `r-s`: the flat triangle can only be
            // fixed by connecting `p` to `q`, any other degenerate triangle is
            // left for later insertions to sort out
            None => lies_within(p, r, s) && sign(q, r, s) < 0.0,
        }
    }

    /// Replace the edge shared by `t` and its neighbor with the other diagonal
    /// of the quadrilateral they form. Both triangles keep their ids.
    ///
    /// ```text
    ///        s                     s
    ///      / | \                 /   \
    ///     p  |  q      =>       p --- q
    ///      \ | /                 \   /
    ///        r                     r
    /// ```
    fn flip(&mut self, t: TriangleId, edge: FacingEdge) {
        let n = edge.neighbor;
        let Triangle {
            vertices: tv,
            neighbors: tn,
        } = self.triangles[t];
        let Triangle {
            vertices: nv,
            neighbors: nn,
        } = self.triangles[n];

        let k = edge.p_slot;
        let j = edge.q_slot;

        let (p, r, s) = (tv[k], tv[(k + 1) % 3], tv[(k + 2) % 3]);
        let q = nv[j];
        debug_assert_eq!(nv[(j + 1) % 3], s);
        debug_assert_eq!(nv[(j + 2) % 3], r);

        // the four triangles around the quadrilateral
        let t_opp_r = tn[(k + 1) % 3];
        let t_opp_s = tn[(k + 2) % 3];
        let n_opp_s = nn[(j + 1) % 3];
        let n_opp_r = nn[(j + 2) % 3];

        self.triangles[t] = Triangle::new([r, q, p], [Some(n), t_opp_s, n_opp_s]);
        self.triangles[n] = Triangle::new([q, s, p], [t_opp_r, Some(t), n_opp_r]);

        if let Some(o) = n_opp_s {
            self.replace_neighbor(o, n, t);
        }
        if let Some(o) = t_opp_r {
            self.replace_neighbor(o, t, n);
        }

        trace!(?t, ?n, ?p, ?q, "flipped edge");
    }
}

/// Whether `p` lies strictly between `a` and `b`, assuming the three points
/// are collinear.
fn lies_within(p: Vec2, a: Vec2, b: Vec2) -> bool {
    let ab = b - a;
    let ap = p - a;
    let dot = ab.x * ap.x + ab.y * ap.y;

    dot > 0.0 && dot < ab.norm2()
}
