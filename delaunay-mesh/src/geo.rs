use std::ops::{Add, Div, Mul, Sub};

/// Below this ratio between the signed area of a triangle and the product of
/// its edge lengths the three corners are considered collinear.
pub const COLLINEAR_EPSILON: f64 = 1e-12;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bbox {
    min: Vec2,
    max: Vec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

/// Orientation of `p` with respect to the directed line `a -> b`.
///
/// Positive when `p` is on the left, negative when on the right and zero when
/// the three points are collinear.
pub fn sign(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Center of the circle passing through `a`, `b` and `c`, `None` when the
/// points are (nearly) collinear.
pub fn circumcenter(a: Vec2, b: Vec2, c: Vec2) -> Option<Vec2> {
    // work relative to `a` to keep the magnitudes small
    let b = b - a;
    let c = c - a;

    let d = 2.0 * (b.x * c.y - b.y * c.x);
    if d == 0.0 || d.abs() <= 2.0 * COLLINEAR_EPSILON * b.norm() * c.norm() {
        return None;
    }

    let b2 = b.norm2();
    let c2 = c.norm2();
    let offset = Vec2::new((c.y * b2 - b.y * c2) / d, (b.x * c2 - c.x * b2) / d);

    let center = a + offset;
    if center.is_finite() {
        Some(center)
    } else {
        None
    }
}

impl Vec2 {
    pub fn zero() -> Self {
        Vec2::new(0.0, 0.0)
    }

    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    pub fn dist(&self, p: Vec2) -> f64 {
        self.dist2(p).sqrt()
    }

    pub fn dist2(&self, p: Vec2) -> f64 {
        (*self - p).norm2()
    }

    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    pub fn norm2(&self) -> f64 {
        self.x.powi(2) + self.y.powi(2)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Bbox {
    pub fn new(p: Vec2) -> Self {
        Bbox { min: p, max: p }
    }

    /// Smallest box containing all the given points, `None` for an empty
    /// iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bbox = Bbox::new(points.next()?);
        for p in points {
            bbox.expand(p);
        }
        Some(bbox)
    }

    pub fn min(&self) -> Vec2 {
        self.min
    }

    pub fn max(&self) -> Vec2 {
        self.max
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn expand(&mut self, p: Vec2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);

        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Grows the box by `margin` on every side.
    pub fn enlarge(&mut self, margin: f64) {
        self.min = self.min - Vec2::new(margin, margin);
        self.max = self.max + Vec2::new(margin, margin);
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.min.x <= p.x && self.min.y <= p.y && self.max.x >= p.x && self.max.y >= p.y
    }
}

impl Circle {
    pub fn new(center: Vec2, radius: f64) -> Self {
        Circle { center, radius }
    }

    pub fn circumcircle(a: Vec2, b: Vec2, c: Vec2) -> Option<Self> {
        let center = circumcenter(a, b, c)?;
        Some(Circle::new(center, center.dist(a)))
    }

    /// Whether `p` is strictly inside the circle, points on the boundary are
    /// outside.
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.dist2(p) < self.radius.powi(2)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(mut self, rhs: Vec2) -> Self::Output {
        self.x += rhs.x;
        self.y += rhs.y;
        self
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(mut self, rhs: Vec2) -> Self::Output {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(mut self, rhs: f64) -> Self::Output {
        self.x *= rhs;
        self.y *= rhs;
        self
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(mut self, rhs: f64) -> Self::Output {
        self.x /= rhs;
        self.y /= rhs;
        self
    }
}
