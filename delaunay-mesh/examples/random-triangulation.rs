use std::env;
use std::fs::File;
use std::io;
use std::io::BufWriter;

use rand::prelude::*;

use delaunay_mesh::svg::{dump_svg, SvgOptions};
use delaunay_mesh::{Bbox, DelaunayMesh, Vec2};

pub fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut rng = thread_rng();

    let mut bbox = Bbox::new(Vec2::zero());
    bbox.expand(Vec2::new(800.0, 800.0));

    let mut mesh = DelaunayMesh::new();
    let opts = SvgOptions {
        voronoi: true,
        ..SvgOptions::default()
    };

    let npoints = env::args()
        .nth(1)
        .and_then(|n| n.parse().ok())
        .unwrap_or(50);

    for i in 0..npoints {
        // don't spam too much
        if npoints <= 100 {
            let mut out = BufWriter::new(File::create(format!("triangulation-{}.svg", i))?);
            dump_svg(&mut out, &mut mesh, &opts)?;
        }

        let x = rng.gen_range(bbox.min().x, bbox.max().x);
        let y = rng.gen_range(bbox.min().y, bbox.max().y);

        if let Err(err) = mesh.insert_protected(Vec2::new(x, y)) {
            eprintln!("skipping point {} {}: {}", x, y, err);
        }
    }

    // don't create huge files
    if npoints <= 1_000 {
        let mut out = BufWriter::new(File::create("triangulation.svg")?);
        dump_svg(&mut out, &mut mesh, &opts)?;
    }

    Ok(())
}
