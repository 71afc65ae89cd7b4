//! Core geometry types: Point, Size, Rect, Affine, Quad.
//!
//! These are the coordinate types used throughout gilt-canvas for positioning
//! layers, composing their transforms and testing pointer hits. All values are
//! logical pixels as `f64`.

use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D position in logical pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are within `epsilon` of `other`.
    #[inline]
    pub fn approx_eq(self, other: Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point { x: -self.x, y: -self.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in logical pixels (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Scale both dimensions by `factor`.
    #[inline]
    pub fn scale(self, factor: f64) -> Size {
        Size { width: self.width * factor, height: self.height * factor }
    }

    /// The smaller of the two dimensions.
    #[inline]
    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle defined by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// A rectangle of `size` centred on the origin, as layers are drawn in
    /// their local space.
    #[inline]
    pub fn centered(size: Size) -> Self {
        Self {
            x: -size.width / 2.0,
            y: -size.height / 2.0,
            width: size.width,
            height: size.height,
        }
    }

    /// The top-left corner.
    #[inline]
    pub const fn origin(self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Contract the rectangle inward by `top`, `right`, `bottom`, `left`.
    ///
    /// Width and height are clamped to zero.
    #[inline]
    pub fn inset(self, top: f64, right: f64, bottom: f64, left: f64) -> Rect {
        Rect {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(0.0),
            height: (self.height - top - bottom).max(0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Affine
// ---------------------------------------------------------------------------

/// A 2×3 affine matrix in the `[a c e; b d f]` layout used by 2D drawing APIs.
///
/// A point maps as `x' = a·x + c·y + e`, `y' = b·x + d·y + f`. The builder
/// methods (`translate`, `rotate`, ...) post-multiply, so the most recently
/// appended operation is applied to points first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    /// Create a matrix from its six components.
    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// A pure translation.
    #[inline]
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: tx, f: ty }
    }

    /// A pure rotation by `degrees` (clockwise on a y-down surface).
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    /// A pure scale.
    #[inline]
    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self { a: sx, b: 0.0, c: 0.0, d: sy, e: 0.0, f: 0.0 }
    }

    /// A horizontal skew by `degrees`.
    pub fn skewing_x(degrees: f64) -> Self {
        Self { c: degrees.to_radians().tan(), ..Self::IDENTITY }
    }

    /// A vertical skew by `degrees`.
    pub fn skewing_y(degrees: f64) -> Self {
        Self { b: degrees.to_radians().tan(), ..Self::IDENTITY }
    }

    /// `self · translation(tx, ty)`.
    #[inline]
    pub fn translate(self, tx: f64, ty: f64) -> Self {
        self * Self::translation(tx, ty)
    }

    /// `self · rotation(degrees)`.
    #[inline]
    pub fn rotate(self, degrees: f64) -> Self {
        self * Self::rotation(degrees)
    }

    /// `self · scaling(sx, sy)`.
    #[inline]
    pub fn scale(self, sx: f64, sy: f64) -> Self {
        self * Self::scaling(sx, sy)
    }

    /// Scale about `origin` rather than about `(0, 0)`.
    pub fn scale_about(self, sx: f64, sy: f64, origin: Point) -> Self {
        self.translate(origin.x, origin.y)
            .scale(sx, sy)
            .translate(-origin.x, -origin.y)
    }

    /// `self · skewing_x(degrees)`.
    #[inline]
    pub fn skew_x(self, degrees: f64) -> Self {
        self * Self::skewing_x(degrees)
    }

    /// `self · skewing_y(degrees)`.
    #[inline]
    pub fn skew_y(self, degrees: f64) -> Self {
        self * Self::skewing_y(degrees)
    }

    /// `parent · self`: place this transform inside `parent`'s space.
    #[inline]
    pub fn pre_multiply(self, parent: Affine) -> Self {
        parent * self
    }

    /// Map a point through this transform.
    #[inline]
    pub fn transform_point(&self, point: Point) -> Point {
        Point {
            x: self.a * point.x + self.c * point.y + self.e,
            y: self.b * point.x + self.d * point.y + self.f,
        }
    }

    /// The components as `[a, b, c, d, e, f]`.
    #[inline]
    pub const fn to_array(self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Recover angle, scale, skew and translation from this matrix.
    ///
    /// Uses the usual 2×3 decomposition: the angle is `atan2(b, a)`, the x
    /// scale is the first row magnitude, the y scale is the determinant over
    /// that magnitude, and the x skew comes from the normalised cross term.
    /// The y skew is folded into the others and always reported as zero.
    pub fn decompose(&self) -> Decomposed {
        let denom = self.a * self.a + self.b * self.b;
        let scale_x = denom.sqrt();
        let scale_y = (self.a * self.d - self.c * self.b) / scale_x;
        let skew_x = (self.a * self.c + self.b * self.d).atan2(denom);
        Decomposed {
            angle: self.b.atan2(self.a).to_degrees(),
            scale_x,
            scale_y,
            skew_x: skew_x.to_degrees(),
            skew_y: 0.0,
            translate_x: self.e,
            translate_y: self.f,
        }
    }

    /// Whether every component is within `epsilon` of `other`'s.
    pub fn approx_eq(&self, other: &Affine, epsilon: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(lhs, rhs)| (lhs - rhs).abs() <= epsilon)
    }
}

impl Mul for Affine {
    type Output = Affine;

    fn mul(self, rhs: Affine) -> Affine {
        Affine {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }
}

/// The components recovered by [`Affine::decompose`]. Angles are in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decomposed {
    pub angle: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

// ---------------------------------------------------------------------------
// Quad
// ---------------------------------------------------------------------------

/// The four on-canvas corners of a transformed layer box.
///
/// Corners are always stored top-left, top-right, bottom-right, bottom-left.
/// Hit testing relies on that winding.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    pub corners: [Point; 4],
}

impl Quad {
    /// Derive the corners of a `size` box whose centre sits at the origin of
    /// `matrix`.
    pub fn from_centered(matrix: &Affine, size: Size) -> Self {
        let half_w = size.width / 2.0;
        let half_h = size.height / 2.0;
        Self {
            corners: [
                matrix.transform_point(Point::new(-half_w, -half_h)),
                matrix.transform_point(Point::new(half_w, -half_h)),
                matrix.transform_point(Point::new(half_w, half_h)),
                matrix.transform_point(Point::new(-half_w, half_h)),
            ],
        }
    }

    pub fn top_left(&self) -> Point {
        self.corners[0]
    }

    pub fn top_right(&self) -> Point {
        self.corners[1]
    }

    pub fn bottom_right(&self) -> Point {
        self.corners[2]
    }

    pub fn bottom_left(&self) -> Point {
        self.corners[3]
    }

    /// Whether `point` lies inside or on the edge of this quad.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point_in_polygon(point, &self.corners)
    }
}

// ---------------------------------------------------------------------------
// Point in polygon
// ---------------------------------------------------------------------------

/// Crossing-number containment test.
///
/// A horizontal ray is cast from `point`; each edge it crosses toggles the
/// parity. Points exactly on an edge (including horizontal edges) count as
/// inside. When the ray passes through a vertex, the crossing is only counted
/// if the neighbouring vertex lies on the far side, so a vertex shared by two
/// edges toggles once.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let len = polygon.len();
    if len < 3 {
        return false;
    }

    let Point { x, y } = point;
    let mut inside = false;
    let mut j = len - 1;

    for i in 0..len {
        let current = polygon[i];
        let previous = polygon[j];
        let before_previous = polygon[if j == 0 { len - 1 } else { j - 1 }];
        let side = (current.y - previous.y) * (x - current.x)
            - (current.x - previous.x) * (y - current.y);

        if previous.y < current.y {
            if y >= previous.y && y < current.y {
                if side == 0.0 {
                    return true;
                }
                if side > 0.0 && (y != previous.y || y > before_previous.y) {
                    inside = !inside;
                }
            }
        } else if current.y < previous.y {
            if y > current.y && y <= previous.y {
                if side == 0.0 {
                    return true;
                }
                if side < 0.0 && (y != previous.y || y < before_previous.y) {
                    inside = !inside;
                }
            }
        } else if y == current.y
            && ((x >= previous.x && x <= current.x) || (x >= current.x && x <= previous.x))
        {
            return true;
        }

        j = i;
    }

    inside
}

// ===========================================================================
// Tests
// ===========================================================================
