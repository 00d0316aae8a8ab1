//! 2D point/offset value.
//!
//! `Point` doubles as a position and as an offset. The mutating helpers work
//! in place and return `&mut Self` so calls can be chained:
//!
//! ```
//! use layerkit_core::Point;
//!
//! let mut p = Point::default();
//! p.set(1.0, 2.0).add(&Point::new(3.0, 4.0)).multiply(2.0);
//! assert_eq!(p, Point::new(8.0, 12.0));
//! ```
//!
//! `Point` also implements the `std::ops` operators. With `Add` or `Sub` in
//! scope, `p.add(..)` on a `Point` value resolves to the by-value operator
//! method, so call the in-place form as `Point::add(&mut p, ..)` or through a
//! `&mut Point`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Overwrites both coordinates.
    pub fn set(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Overwrites this point with the coordinates of `other`.
    pub fn copy_from(&mut self, other: &Point) -> &mut Self {
        self.set(other.x, other.y)
    }

    /// Component-wise addition in place.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&mut self, other: &Point) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    /// Component-wise subtraction in place.
    #[allow(clippy::should_implement_trait)]
    pub fn sub(&mut self, other: &Point) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    /// Scales both coordinates in place.
    pub fn multiply(&mut self, scalar: f64) -> &mut Self {
        self.x *= scalar;
        self.y *= scalar;
        self
    }

    /// Euclidean norm.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        Point::add(self, &rhs);
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        Point::sub(self, &rhs);
    }
}

impl MulAssign<f64> for Point {
    fn mul_assign(&mut self, rhs: f64) {
        self.multiply(rhs);
    }
}

impl Add for Point {
    type Output = Point;

    fn add(mut self, rhs: Point) -> Point {
        self += rhs;
        self
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(mut self, rhs: Point) -> Point {
        self -= rhs;
        self
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(mut self, rhs: f64) -> Point {
        self *= rhs;
        self
    }
}
