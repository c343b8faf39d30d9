//!
//! Incremental Delaunay triangulation over an index arena.
//!
//! The mesh is seeded with a huge "super triangle" so that every inserted
//! point falls inside an existing triangle. Points are located by walking
//! from triangle to triangle, the containing triangle is split in three and
//! the Delaunay property is then restored by flipping edges (see `flip.rs`).
//!

use tracing::{debug, trace, warn};

use crate::arena::{Arena, ArenaId};
use crate::error::InsertError;
use crate::geo::{sign, Circle, Vec2};

/// Half extent of the seeding super triangle, input points are expected to
/// be well within `[-SUPER_TRIANGLE_SIZE / 2, SUPER_TRIANGLE_SIZE / 2]`.
pub const SUPER_TRIANGLE_SIZE: f64 = 1.0e7;

/// Minimum distance between a point and the existing vertices for
/// [`DelaunayMesh::insert_protected`] to accept it.
pub const DUPLICATE_TOLERANCE: f64 = 0.1;

/// Number of synthetic vertices making up the super triangle, they're always
/// the first vertices of the mesh.
pub const SUPER_VERTICES: usize = 3;

pub type VertexId = ArenaId<Vec2>;
pub type TriangleId = ArenaId<Triangle>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshConfig {
    pub super_triangle_size: f64,
    pub duplicate_tolerance: f64,
}

/// Three counter-clockwise vertices and the three triangles across their
/// opposite edges: `neighbors[i]` shares the edge that doesn't touch
/// `vertices[i]`, `None` on the outer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub vertices: [VertexId; 3],
    pub neighbors: [Option<TriangleId>; 3],
}

/// Outcome of a successful insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub vertex: VertexId,
    pub flips: usize,
}

#[derive(Debug, Clone)]
pub struct DelaunayMesh {
    pub(crate) vertices: Arena<Vec2>,
    pub(crate) triangles: Arena<Triangle>,
    circumcircles: Option<Vec<Option<Circle>>>,
    cursor: TriangleId,
    config: MeshConfig,
}

impl Default for MeshConfig {
    fn default() -> Self {
        MeshConfig {
            super_triangle_size: SUPER_TRIANGLE_SIZE,
            duplicate_tolerance: DUPLICATE_TOLERANCE,
        }
    }
}

impl Triangle {
    pub fn new(vertices: [VertexId; 3], neighbors: [Option<TriangleId>; 3]) -> Self {
        Triangle {
            vertices,
            neighbors,
        }
    }

    /// The directed edges `a -> b`, `b -> c` and `c -> a`.
    pub fn edges(&self) -> [(VertexId, VertexId); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    pub fn vertex_slot(&self, v: VertexId) -> Option<usize> {
        self.vertices.iter().position(|&w| w == v)
    }

    pub fn neighbor_slot(&self, t: TriangleId) -> Option<usize> {
        self.neighbors.iter().position(|&n| n == Some(t))
    }
}

impl DelaunayMesh {
    pub fn new() -> Self {
        DelaunayMesh::with_config(MeshConfig::default())
    }

    pub fn with_config(config: MeshConfig) -> Self {
        let s = config.super_triangle_size;

        let mut vertices = Arena::new();
        let a = vertices.push(Vec2::new(-s, -s));
        let b = vertices.push(Vec2::new(s, -s));
        let c = vertices.push(Vec2::new(0.0, s));

        let mut triangles = Arena::new();
        let root = triangles.push(Triangle::new([a, b, c], [None, None, None]));

        DelaunayMesh {
            vertices,
            triangles,
            circumcircles: None,
            cursor: root,
            config,
        }
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// All the vertices, the super triangle ones included.
    pub fn vertices(&self) -> &[Vec2] {
        self.vertices.values()
    }

    /// Only the inserted vertices, in insertion order.
    pub fn real_vertices(&self) -> &[Vec2] {
        &self.vertices.values()[SUPER_VERTICES..]
    }

    pub fn vertex(&self, v: VertexId) -> Vec2 {
        self.vertices[v]
    }

    pub fn is_super_vertex(&self, v: VertexId) -> bool {
        v.index() < SUPER_VERTICES
    }

    pub fn triangles(&self) -> impl Iterator<Item = (TriangleId, &Triangle)> + '_ {
        self.triangles.iter()
    }

    pub fn triangle(&self, t: TriangleId) -> &Triangle {
        &self.triangles[t]
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangle_vertices(&self, t: TriangleId) -> [Vec2; 3] {
        let [a, b, c] = self.triangles[t].vertices;
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// Whether the triangle touches the super triangle or the outer boundary.
    pub fn is_boundary(&self, t: TriangleId) -> bool {
        let tri = &self.triangles[t];

        tri.vertices.iter().any(|&v| self.is_super_vertex(v))
            || tri.neighbors.iter().any(Option::is_none)
    }

    pub fn interior_triangles(&self) -> impl Iterator<Item = (TriangleId, &Triangle)> + '_ {
        self.triangles
            .iter()
            .filter(move |(t, _)| !self.is_boundary(*t))
    }

    /// Find a triangle containing `p` by walking from the last located one.
    ///
    /// Gives up after as many steps as there are triangles, or when the walk
    /// leaves the mesh; in both cases the walk restarts from the first
    /// triangle next time.
    pub fn locate(&mut self, p: Vec2) -> Option<TriangleId> {
        let mut current = self.cursor;

        'walk: for _ in 0..=self.triangles.len() {
            let neighbors = self.triangles[current].neighbors;
            let [a, b, c] = self.triangle_vertices(current);

            // slot of the neighbor across each directed edge
            for &(from, to, slot) in &[(a, b, 2), (b, c, 0), (c, a, 1)] {
                if sign(p, from, to) >= 0.0 {
                    continue;
                }

                match neighbors[slot] {
                    Some(next) => {
                        current = next;
                        continue 'walk;
                    }
                    None => break 'walk,
                }
            }

            self.cursor = current;
            return Some(current);
        }

        self.cursor = TriangleId::new(0);
        None
    }

    /// Insert `p` into the triangulation and restore the Delaunay property.
    ///
    /// When `p` cannot be located the mesh is left exactly as it was.
    pub fn insert(&mut self, p: Vec2) -> Result<Insertion, InsertError> {
        let containing = match self.locate(p) {
            Some(t) => t,
            None => {
                debug!(x = p.x, y = p.y, "triangle walk failed");
                return Err(InsertError::LocationFailed {
                    steps: self.triangles.len(),
                });
            }
        };

        let vertex = self.vertices.push(p);
        let mut worklist = self.split(containing, vertex).to_vec();
        let flips = self.restore_delaunay(vertex, &mut worklist);

        self.circumcircles = None;

        trace!(?vertex, ?containing, flips, "inserted point");
        Ok(Insertion { vertex, flips })
    }

    /// Like [`insert`](Self::insert) but rejects points closer than the
    /// configured tolerance to an existing vertex.
    pub fn insert_protected(&mut self, p: Vec2) -> Result<Insertion, InsertError> {
        let tolerance2 = self.config.duplicate_tolerance.powi(2);

        if let Some((existing, _)) = self.vertices.iter().find(|(_, v)| v.dist2(p) < tolerance2) {
            debug!(?existing, x = p.x, y = p.y, "rejected near duplicate point");
            return Err(InsertError::DuplicatePoint { existing });
        }

        self.insert(p)
    }

    /// Split `t` in three around vertex `p`, reusing `t` for the first child.
    fn split(&mut self, t: TriangleId, p: VertexId) -> [TriangleId; 3] {
        let Triangle {
            vertices: [a, b, c],
            neighbors: [nbc, nca, nab],
        } = self.triangles[t];

        let abp = t;
        let bcp = self.triangles.next_id();
        let cap = TriangleId::new(bcp.index() + 1);

        self.triangles[abp] = Triangle::new([a, b, p], [Some(bcp), Some(cap), nab]);
        self.triangles
            .push(Triangle::new([b, c, p], [Some(cap), Some(abp), nbc]));
        self.triangles
            .push(Triangle::new([c, a, p], [Some(abp), Some(bcp), nca]));

        if let Some(n) = nbc {
            self.replace_neighbor(n, t, bcp);
        }
        if let Some(n) = nca {
            self.replace_neighbor(n, t, cap);
        }

        [abp, bcp, cap]
    }

    /// Make `t` point to `new` where it used to point to `old`.
    pub(crate) fn replace_neighbor(&mut self, t: TriangleId, old: TriangleId, new: TriangleId) {
        let slot = self.triangles[t].neighbor_slot(old);
        debug_assert!(
            slot.is_some(),
            "triangle {:?} is not a neighbor of {:?}",
            old,
            t
        );

        match slot {
            Some(slot) => self.triangles[t].neighbors[slot] = Some(new),
            None => warn!(?t, ?old, ?new, "broken adjacency, neighbor not found"),
        }
    }

    /// Both sides of every edge of the interior triangles, edges shared by two
    /// of them are reported twice.
    pub fn edges(&self) -> Vec<(Vec2, Vec2)> {
        self.interior_triangles()
            .flat_map(|(_, tri)| tri.edges().to_vec())
            .map(|(a, b)| (self.vertices[a], self.vertices[b]))
            .collect()
    }

    /// The circumcircle of every triangle, indexed like the triangles.
    /// Degenerate triangles have no circumcircle.
    pub fn circumcircles(&mut self) -> &[Option<Circle>] {
        self.refresh_circumcircles();
        self.circumcircles.as_deref().unwrap_or(&[])
    }

    /// Segments joining the circumcenters of each interior triangle with the
    /// ones of its neighbors.
    pub fn voronoi_edges(&mut self) -> Vec<(Vec2, Vec2)> {
        self.refresh_circumcircles();
        let circles = match &self.circumcircles {
            Some(circles) => circles,
            None => return vec![],
        };

        let mut edges = vec![];
        for (t, tri) in self.interior_triangles() {
            let from = match circles[t.index()] {
                Some(c) => c.center,
                None => continue,
            };

            for n in tri.neighbors.iter().flatten() {
                if let Some(to) = circles[n.index()] {
                    edges.push((from, to.center));
                }
            }
        }

        edges
    }

    fn refresh_circumcircles(&mut self) {
        if self.circumcircles.is_some() {
            return;
        }

        let circles = self
            .triangles
            .iter()
            .map(|(t, _)| {
                let [a, b, c] = self.triangle_vertices(t);
                Circle::circumcircle(a, b, c)
            })
            .collect();

        self.circumcircles = Some(circles);
    }
}

impl Default for DelaunayMesh {
    fn default() -> Self {
        DelaunayMesh::new()
    }
}
