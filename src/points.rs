use std::str::FromStr;

use rand::Rng;
use simdnoise::NoiseBuilder;

use delaunay_mesh::Vec2;

/// How many candidates to try per requested point before giving up on a
/// sparse density field.
const MAX_ATTEMPTS_PER_POINT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    Uniform,
    Noise,
}

impl FromStr for Distribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(Distribution::Uniform),
            "noise" => Ok(Distribution::Noise),
            _ => Err(format!(
                "unknown distribution {:?}, expected uniform or noise",
                s
            )),
        }
    }
}

/// Fractal noise sampled on a pixel grid, scaled to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct DensityField {
    density: Vec<f32>,
    width: usize,
    height: usize,
}

impl DensityField {
    pub fn generate(width: usize, height: usize) -> Self {
        let gen = NoiseBuilder::fbm_2d(width, height);
        let density = gen.generate_scaled(0.0, 1.0);

        DensityField {
            density,
            width,
            height,
        }
    }

    pub fn density_at(&self, x: usize, y: usize) -> f32 {
        self.density[y * self.width + x]
    }

    /// Rejection sample up to `n` points, denser where the noise is higher.
    /// An empty field yields no points.
    pub fn sample(&self, rng: &mut impl Rng, n: usize) -> Vec<Vec2> {
        if self.width == 0 || self.height == 0 {
            return vec![];
        }

        let mut points = Vec::with_capacity(n.min(self.density.len()));

        for _ in 0..n.saturating_mul(MAX_ATTEMPTS_PER_POINT) {
            if points.len() == n {
                break;
            }

            let x = rng.gen_range(0, self.width);
            let y = rng.gen_range(0, self.height);
            if rng.gen::<f32>() < self.density_at(x, y) {
                // jitter inside the pixel to avoid lattice aligned points
                let jx: f64 = rng.gen();
                let jy: f64 = rng.gen();
                points.push(Vec2::new(x as f64 + jx, y as f64 + jy));
            }
        }

        points
    }
}

pub fn uniform(rng: &mut impl Rng, width: f64, height: f64, n: usize) -> Vec<Vec2> {
    if !(width > 0.0 && height > 0.0) {
        return vec![];
    }

    (0..n)
        .map(|_| Vec2::new(rng.gen_range(0.0, width), rng.gen_range(0.0, height)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn parses_distribution_names() {
        assert_eq!("uniform".parse::<Distribution>(), Ok(Distribution::Uniform));
        assert_eq!("noise".parse::<Distribution>(), Ok(Distribution::Noise));
        assert!("gaussian".parse::<Distribution>().is_err());
    }

    #[test]
    fn uniform_points_are_in_bounds_and_reproducible() {
        let a = uniform(&mut Pcg32::seed_from_u64(7), 100.0, 50.0, 30);
        let b = uniform(&mut Pcg32::seed_from_u64(7), 100.0, 50.0, 30);

        assert_eq!(a, b);
        assert!(a
            .iter()
            .all(|p| p.x >= 0.0 && p.x < 100.0 && p.y >= 0.0 && p.y < 50.0));
    }

    #[test]
    fn empty_canvas_has_no_points() {
        let mut rng = Pcg32::seed_from_u64(3);

        assert!(uniform(&mut rng, 0.0, 50.0, 10).is_empty());
        assert!(uniform(&mut rng, 50.0, 0.0, 10).is_empty());

        let field = DensityField {
            density: vec![],
            width: 0,
            height: 16,
        };
        assert!(field.sample(&mut rng, usize::MAX).is_empty());
    }

    #[test]
    fn zero_density_accepts_nothing() {
        let field = DensityField {
            density: vec![0.0; 4],
            width: 2,
            height: 2,
        };

        assert!(field.sample(&mut Pcg32::seed_from_u64(5), 16).is_empty());
    }

    #[test]
    fn dense_fields_fill_the_request() {
        let field = DensityField {
            density: vec![1.0; 4],
            width: 2,
            height: 2,
        };

        // every candidate is accepted, only the request size stops sampling
        let points = field.sample(&mut Pcg32::seed_from_u64(9), 1_000);
        assert_eq!(points.len(), 1_000);
    }

    #[test]
    fn noise_samples_stay_on_the_grid() {
        let field = DensityField::generate(64, 32);
        let points = field.sample(&mut Pcg32::seed_from_u64(1), 20);

        assert!(points.len() <= 20);
        assert!(points
            .iter()
            .all(|p| p.x >= 0.0 && p.x <= 64.0 && p.y >= 0.0 && p.y <= 32.0));
    }
}
