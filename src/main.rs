use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::path::PathBuf;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use delaunay_mesh::svg::{dump_svg, SvgOptions};
use delaunay_mesh::DelaunayMesh;

mod points;
mod render;

use points::{DensityField, Distribution};
use render::RenderOptions;

/// Triangulate a random point set and draw it with its Voronoi diagram.
#[derive(Debug, StructOpt)]
#[structopt(name = "planar-mesh")]
struct Opt {
    /// Number of points to generate
    #[structopt(short = "n", long = "points", default_value = "200")]
    npoints: usize,

    /// Seed of the point generator
    #[structopt(short = "s", long = "seed", default_value = "42")]
    seed: u64,

    /// Canvas width in pixels
    #[structopt(
        long = "width",
        default_value = "800",
        parse(try_from_str = "parse_size")
    )]
    width: u32,

    /// Canvas height in pixels
    #[structopt(
        long = "height",
        default_value = "800",
        parse(try_from_str = "parse_size")
    )]
    height: u32,

    /// Point distribution, `uniform` or `noise`
    #[structopt(short = "d", long = "distribution", default_value = "uniform")]
    distribution: Distribution,

    /// Draw the Voronoi edges
    #[structopt(long = "voronoi")]
    voronoi: bool,

    /// Draw the circumcircles of the interior triangles
    #[structopt(long = "circles")]
    circles: bool,

    /// Accept points arbitrarily close to each other
    #[structopt(long = "unprotected")]
    unprotected: bool,

    /// Output file, `.svg` or any image format
    #[structopt(
        short = "o",
        long = "output",
        default_value = "triangulation.png",
        parse(from_os_str)
    )]
    output: PathBuf,
}

/// Canvas sizes must be at least one pixel.
fn parse_size(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(0) => Err("size must be positive".to_string()),
        Ok(size) => Ok(size),
        Err(err) => Err(err.to_string()),
    }
}

fn main() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let opt = Opt::from_args();
    let mut rng = Pcg32::seed_from_u64(opt.seed);

    let points = match opt.distribution {
        Distribution::Uniform => points::uniform(
            &mut rng,
            f64::from(opt.width),
            f64::from(opt.height),
            opt.npoints,
        ),
        Distribution::Noise => DensityField::generate(opt.width as usize, opt.height as usize)
            .sample(&mut rng, opt.npoints),
    };

    let mut mesh = DelaunayMesh::new();
    let mut rejected = 0;
    for p in points {
        let res = if opt.unprotected {
            mesh.insert(p)
        } else {
            mesh.insert_protected(p)
        };

        if let Err(err) = res {
            debug!(%err, "point not inserted");
            rejected += 1;
        }
    }

    info!(
        vertices = mesh.real_vertices().len(),
        triangles = mesh.interior_triangles().count(),
        rejected,
        "triangulation done"
    );

    let is_svg = opt
        .output
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let mut out = BufWriter::new(File::create(&opt.output)?);
        let svg_opts = SvgOptions {
            voronoi: opt.voronoi,
            circumcircles: opt.circles,
            ..SvgOptions::default()
        };
        return dump_svg(&mut out, &mut mesh, &svg_opts);
    }

    let img = render::render(
        &mut mesh,
        &RenderOptions {
            width: opt.width,
            height: opt.height,
            voronoi: opt.voronoi,
            circumcircles: opt.circles,
        },
    );

    img.save(&opt.output)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_size_must_be_positive() {
        assert_eq!(parse_size("640"), Ok(640));
        assert!(parse_size("0").is_err());
        assert!(parse_size("-3").is_err());
        assert!(parse_size("wide").is_err());
    }
}
