use image::{Rgb, RgbImage};

use delaunay_mesh::{DelaunayMesh, Vec2};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const EDGE: Rgb<u8> = Rgb([20, 20, 20]);
const VORONOI: Rgb<u8> = Rgb([230, 80, 60]);
const CIRCLE: Rgb<u8> = Rgb([200, 200, 200]);
const VERTEX: Rgb<u8> = Rgb([40, 90, 180]);

/// Upper bound on the samples used to draw a single circle.
const MAX_CIRCLE_SAMPLES: usize = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub voronoi: bool,
    pub circumcircles: bool,
}

/// Rasterize the mesh, coordinates are taken as pixels.
pub fn render(mesh: &mut DelaunayMesh, opts: &RenderOptions) -> RgbImage {
    let mut img = RgbImage::from_pixel(opts.width, opts.height, BACKGROUND);

    if opts.circumcircles {
        let interior = mesh
            .interior_triangles()
            .map(|(t, _)| t.index())
            .collect::<Vec<_>>();
        let circles = mesh.circumcircles();

        for circle in interior.iter().filter_map(|&t| circles[t]) {
            let samples = ((std::f64::consts::PI * 2.0 * circle.radius).ceil() as usize)
                .max(8)
                .min(MAX_CIRCLE_SAMPLES);

            for i in 0..samples {
                let angle = i as f64 / samples as f64 * std::f64::consts::PI * 2.0;
                let p = circle.center + Vec2::new(angle.cos(), angle.sin()) * circle.radius;
                put(&mut img, p, CIRCLE);
            }
        }
    }

    if opts.voronoi {
        for (a, b) in mesh.voronoi_edges() {
            draw_line(&mut img, a, b, VORONOI);
        }
    }

    for (a, b) in mesh.edges() {
        draw_line(&mut img, a, b, EDGE);
    }

    for &p in mesh.real_vertices() {
        for dy in -1..=1 {
            for dx in -1..=1 {
                put(&mut img, p + Vec2::new(f64::from(dx), f64::from(dy)), VERTEX);
            }
        }
    }

    img
}

fn put(img: &mut RgbImage, p: Vec2, color: Rgb<u8>) {
    if p.x < 0.0 || p.y < 0.0 {
        return;
    }

    let (x, y) = (p.x as u32, p.y as u32);
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, color);
    }
}

/// DDA line drawing, the segment is clipped to the image first since Voronoi
/// edges can reach the far away super triangle.
fn draw_line(img: &mut RgbImage, a: Vec2, b: Vec2, color: Rgb<u8>) {
    let max = Vec2::new(f64::from(img.width()), f64::from(img.height()));
    let (a, b) = match clip(a, b, Vec2::zero(), max) {
        Some(seg) => seg,
        None => return,
    };

    let d = b - a;
    let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        put(img, a + d * (i as f64 / steps as f64), color);
    }
}

/// Liang-Barsky clipping of the segment `a-b` against the box `min-max`.
fn clip(a: Vec2, b: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for &(p, q) in &[
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }

        if t0 > t1 {
            return None;
        }
    }

    Some((a + d * t0, a + d * t1))
}
