// File: crates/diagram-core/src/geometry.rs
// Summary: Lightweight geometry helpers for surface-unit math.

use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle in left/top/width/height form, matching SVG `rect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
    pub fn right(&self) -> f64 { self.x + self.width }
    pub fn bottom(&self) -> f64 { self.y + self.height }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Grow by `d` on every side, keeping the center fixed.
    pub fn inflate(&self, d: f64) -> Self {
        Self::from_xywh(self.x - d, self.y - d, self.width + 2.0 * d, self.height + 2.0 * d)
    }
}

/// Point on a circle of `radius` around `center` at `angle` radians,
/// measured clockwise from the positive x axis (y grows downward).
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Normalize an angle into `[0, 2π)`.
pub fn normalize_angle(a: f64) -> f64 {
    a.rem_euclid(2.0 * PI)
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_edges() {
        let r = Rect::from_xywh(10.0, 10.0, 20.0, 5.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(30.0, 15.0)));
        assert!(!r.contains(Point::new(30.1, 12.0)));
    }

    #[test]
    fn inflate_recenters() {
        let r = Rect::from_xywh(50.0, 100.0, 40.0, 60.0).inflate(5.0);
        assert_eq!(r, Rect::from_xywh(45.0, 95.0, 50.0, 70.0));
    }

    #[test]
    fn polar_quarter_turn_points_down() {
        let p = polar(Point::new(0.0, 0.0), 10.0, PI / 2.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(5, 0, 3), 3);
        assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
    }
}
