use std::io;
use std::io::Write;

use crate::geo::{Bbox, Vec2};
use crate::mesh::DelaunayMesh;

#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub voronoi: bool,
    pub circumcircles: bool,
    /// Space around the vertices, relative to the largest side of their
    /// bounding box.
    pub margin: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        SvgOptions {
            voronoi: false,
            circumcircles: false,
            margin: 0.05,
        }
    }
}

/// Write the interior edges of the mesh and, optionally, its Voronoi edges and
/// circumcircles. The view is fit on the inserted vertices.
pub fn dump_svg(w: &mut impl Write, mesh: &mut DelaunayMesh, opts: &SvgOptions) -> io::Result<()> {
    let mut bbox = Bbox::from_points(mesh.real_vertices().iter().copied())
        .unwrap_or_else(|| Bbox::new(Vec2::zero()));
    let side = bbox.width().max(bbox.height()).max(1.0);
    bbox.enlarge(side * opts.margin);

    let stroke = side / 500.0;

    writeln!(
        w,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        bbox.min().x,
        bbox.min().y,
        bbox.width(),
        bbox.height()
    )?;
    writeln!(
        w,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="white"/>"#,
        bbox.min().x,
        bbox.min().y,
        bbox.width(),
        bbox.height()
    )?;

    if opts.circumcircles {
        writeln!(
            w,
            r#"<g fill="none" stroke="lightgray" stroke-width="{}">"#,
            stroke
        )?;

        let interior = mesh
            .interior_triangles()
            .map(|(t, _)| t.index())
            .collect::<Vec<_>>();
        let circles = mesh.circumcircles();
        for circle in interior.iter().filter_map(|&t| circles[t]) {
            writeln!(
                w,
                r#"<circle cx="{}" cy="{}" r="{}"/>"#,
                circle.center.x, circle.center.y, circle.radius
            )?;
        }
        writeln!(w, "</g>")?;
    }

    if opts.voronoi {
        writeln!(w, r#"<g stroke="tomato" stroke-width="{}">"#, stroke)?;
        for (a, b) in mesh.voronoi_edges() {
            write_line(w, a, b)?;
        }
        writeln!(w, "</g>")?;
    }

    writeln!(w, r#"<g stroke="black" stroke-width="{}">"#, stroke)?;
    for (a, b) in mesh.edges() {
        write_line(w, a, b)?;
    }
    writeln!(w, "</g>")?;

    writeln!(w, r#"<g fill="steelblue">"#)?;
    for p in mesh.real_vertices() {
        writeln!(
            w,
            r#"<circle cx="{}" cy="{}" r="{}"/>"#,
            p.x,
            p.y,
            stroke * 2.0
        )?;
    }
    writeln!(w, "</g>")?;

    writeln!(w, "</svg>")
}

fn write_line(w: &mut impl Write, a: Vec2, b: Vec2) -> io::Result<()> {
    writeln!(
        w,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
        a.x, a.y, b.x, b.y
    )
}
