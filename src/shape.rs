//! Vector path builders for the icon's shapes.
//!
//! tiny-skia only ships rectangles and circles, so rounded rectangles and
//! open arcs are assembled here from cubic Bézier segments.

use resvg::tiny_skia::{Path, PathBuilder};

/// Control-point distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_75;

/// A filled circle.
pub fn circle(cx: f32, cy: f32, radius: f32) -> Option<Path> {
    PathBuilder::from_circle(cx, cy, radius)
}

/// A rectangle with four equally rounded corners.
///
/// The radius is clamped so opposite corners never overlap.
pub fn rounded_rect(left: f32, top: f32, right: f32, bottom: f32, radius: f32) -> Option<Path> {
    let r = radius.min((right - left) / 2.0).min((bottom - top) / 2.0).max(0.0);
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(left + r, top);
    pb.line_to(right - r, top);
    pb.cubic_to(right - r + k, top, right, top + r - k, right, top + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(left + r, bottom);
    pb.cubic_to(left + r - k, bottom, left, bottom - r + k, left, bottom - r);
    pb.line_to(left, top + r);
    pb.cubic_to(left, top + r - k, left + r - k, top, left + r, top);
    pb.close();
    pb.finish()
}

/// An open circular arc.
///
/// Angles are in degrees, clockwise from 3 o'clock in y-down space. The
/// sweep is split into segments of at most 90° so the cubic approximation
/// stays within a fraction of a pixel.
pub fn arc(cx: f32, cy: f32, radius: f32, start_degrees: f32, sweep_degrees: f32) -> Option<Path> {
    if radius <= 0.0 || sweep_degrees == 0.0 {
        return None;
    }

    let segments = (sweep_degrees.abs() / 90.0).ceil().max(1.0) as usize;
    let step = sweep_degrees.to_radians() / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let point = |angle: f32| (cx + radius * angle.cos(), cy + radius * angle.sin());

    let mut angle = start_degrees.to_radians();
    let mut pb = PathBuilder::new();
    let (x0, y0) = point(angle);
    pb.move_to(x0, y0);

    for _ in 0..segments {
        let next = angle + step;
        let (sx, sy) = point(angle);
        let (ex, ey) = point(next);
        // Tangents are perpendicular to the radius at each end.
        let c1 = (sx - k * radius * angle.sin(), sy + k * radius * angle.cos());
        let c2 = (ex + k * radius * next.sin(), ey - k * radius * next.cos());
        pb.cubic_to(c1.0, c1.1, c2.0, c2.1, ex, ey);
        angle = next;
    }

    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_rect_bounds() {
        let path = rounded_rect(10.0, 20.0, 110.0, 70.0, 8.0).unwrap();
        let b = path.bounds();

        assert!((b.left() - 10.0).abs() < 1e-3);
        assert!((b.top() - 20.0).abs() < 1e-3);
        assert!((b.right() - 110.0).abs() < 1e-3);
        assert!((b.bottom() - 70.0).abs() < 1e-3);
    }

    #[test]
    fn rounded_rect_clamps_radius() {
        // A radius larger than half the side degenerates into a circle-ish shape.
        let path = rounded_rect(0.0, 0.0, 20.0, 20.0, 50.0).unwrap();
        let b = path.bounds();
        assert!((b.width() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn three_quarter_arc_bounds() {
        // From 12 o'clock clockwise to 9 o'clock: covers the right half,
        // the bottom and the left edge, but not the upper-left quadrant.
        let path = arc(50.0, 50.0, 10.0, -90.0, 270.0).unwrap();
        let b = path.bounds();

        assert!((b.left() - 40.0).abs() < 0.05);
        assert!((b.right() - 60.0).abs() < 0.05);
        assert!((b.top() - 40.0).abs() < 0.05);
        assert!((b.bottom() - 60.0).abs() < 0.05);
    }

    #[test]
    fn arc_endpoints() {
        let path = arc(0.0, 0.0, 10.0, -90.0, 270.0).unwrap();
        let points = path.points();

        let first = points.first().unwrap();
        let last = points.last().unwrap();
        assert!(first.x.abs() < 1e-3 && (first.y + 10.0).abs() < 1e-3);
        assert!((last.x + 10.0).abs() < 1e-3 && last.y.abs() < 1e-3);
    }

    #[test]
    fn degenerate_arc_is_none() {
        assert!(arc(0.0, 0.0, 0.0, 0.0, 90.0).is_none());
        assert!(arc(0.0, 0.0, 5.0, 0.0, 0.0).is_none());
    }
}
