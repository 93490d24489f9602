//! Geometry utilities: primitive shapes to regions, and the planar
//! predicates the region operations rely on.
//!
//! Everything here is pure and deterministic.

use dungeondraw_core::ShapeError;

use crate::region::{Region, RegionPolygon};
use crate::shapes::{LineShape, Point, Rect};

/// Point coincidence threshold
pub const EPS_POS: f64 = 1e-9;
/// Areas at or below this are treated as zero
pub const EPS_AREA: f64 = 1e-9;

/// Twice the signed area of triangle `abc`; positive when counter-clockwise.
#[inline]
pub fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[inline]
fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) - EPS_POS
        && p.x <= a.x.max(b.x) + EPS_POS
        && p.y >= a.y.min(b.y) - EPS_POS
        && p.y <= a.y.max(b.y) + EPS_POS
}

/// Closed segment intersection test: touching endpoints and collinear
/// overlaps both count.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);

    let s1 = sign(o1);
    let s2 = sign(o2);
    let s3 = sign(o3);
    let s4 = sign(o4);

    if s1 * s2 < 0 && s3 * s4 < 0 {
        return true;
    }

    (s1 == 0 && on_segment(a, b, c))
        || (s2 == 0 && on_segment(a, b, d))
        || (s3 == 0 && on_segment(c, d, a))
        || (s4 == 0 && on_segment(c, d, b))
}

#[inline]
fn sign(v: f64) -> i8 {
    if v > EPS_AREA {
        1
    } else if v < -EPS_AREA {
        -1
    } else {
        0
    }
}

/// Distance from `p` to the segment `ab`.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 <= EPS_AREA {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}

/// Signed shoelace area of a ring given without a closing point.
pub fn ring_signed_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let p = ring[i];
        let q = ring[(i + 1) % ring.len()];
        sum += p.x * q.y - q.x * p.y;
    }
    sum / 2.0
}

/// Even-odd containment; points on the boundary report `false`.
pub fn point_in_ring(p: Point, ring: &[Point]) -> bool {
    let mut inside = false;
    let n = ring.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// True when `p` lies on an edge of `ring`.
pub fn point_on_ring(p: Point, ring: &[Point]) -> bool {
    (0..ring.len()).any(|i| {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        point_segment_distance(p, a, b) <= EPS_POS
    })
}

/// Drop consecutive duplicates and a repeated closing point.
pub fn clean_ring(points: impl IntoIterator<Item = Point>) -> Vec<Point> {
    let mut ring: Vec<Point> = Vec::new();
    for p in points {
        if let Some(last) = ring.last() {
            if last.distance_to(&p) <= EPS_POS {
                continue;
            }
        }
        ring.push(p);
    }
    while ring.len() > 1 {
        let first = ring[0];
        let last = ring[ring.len() - 1];
        if first.distance_to(&last) <= EPS_POS {
            ring.pop();
        } else {
            break;
        }
    }
    ring
}

/// Axis-aligned rectangle as a region.
///
/// A rectangle with zero, negative or non-finite extent yields an empty
/// region, which every region operation treats as an identity.
pub fn rect_to_polygon(rect: &Rect) -> Region {
    if rect.is_degenerate() {
        tracing::debug!("Degenerate rectangle {:?} treated as empty", rect);
        return Region::empty();
    }
    Region::from_polygon(RegionPolygon::new(rect.corners().to_vec()))
}

/// Simple polygon from a freehand point list, treated as a closed ring.
///
/// Unlike rectangles, a malformed freehand ring is an input error and is
/// reported rather than degraded to an empty region.
pub fn points_to_polygon(points: &[Point]) -> Result<Region, ShapeError> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(ShapeError::NonFinite);
    }

    let mut ring = clean_ring(points.iter().copied());
    if ring.len() < 3 {
        return Err(ShapeError::TooFewPoints { count: ring.len() });
    }

    let area = ring_signed_area(&ring);
    if area.abs() <= EPS_AREA {
        return Err(ShapeError::ZeroArea);
    }

    check_simple(&ring)?;

    if area < 0.0 {
        ring.reverse();
    }
    Ok(Region::from_polygon(RegionPolygon::new(ring)))
}

/// Reject rings whose edges cross, touch, or fold back over each other.
fn check_simple(ring: &[Point]) -> Result<(), ShapeError> {
    let n = ring.len();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];

        // Adjacent edge: only a fold-back along the same line is invalid
        let c = ring[(i + 2) % n];
        if sign(orient(a, b, c)) == 0 {
            let dot = (b.x - a.x) * (c.x - b.x) + (b.y - a.y) * (c.y - b.y);
            if dot < 0.0 {
                return Err(ShapeError::Degenerate {
                    reason: format!("ring folds back on itself at point {}", (i + 1) % n),
                });
            }
        }

        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let c = ring[j];
            let d = ring[(j + 1) % n];
            if segments_intersect(a, b, c, d) {
                return Err(ShapeError::SelfIntersecting {
                    first_edge: i,
                    second_edge: j,
                });
            }
        }
    }
    Ok(())
}

/// Zero-width segment for intersection tests against regions.
pub fn two_points_to_line_string(x1: f64, y1: f64, x2: f64, y2: f64) -> LineShape {
    LineShape::new(Point::new(x1, y1), Point::new(x2, y2))
}
