//! Floor regions: zero or more simple polygons with holes.

use crate::geometry::{
    clean_ring, point_in_ring, point_on_ring, ring_signed_area, segments_intersect, EPS_AREA,
    EPS_POS,
};
use crate::ops::{perform_boolean, BooleanOp};
use crate::shapes::{LineShape, Point};

/// One polygon of a region. Rings are stored without a closing point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionPolygon {
    pub exterior: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

impl RegionPolygon {
    pub fn new(exterior: Vec<Point>) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(exterior: Vec<Point>, holes: Vec<Vec<Point>>) -> Self {
        Self { exterior, holes }
    }

    /// Exterior area minus hole area.
    pub fn area(&self) -> f64 {
        let outer = ring_signed_area(&self.exterior).abs();
        let inner: f64 = self.holes.iter().map(|h| ring_signed_area(h).abs()).sum();
        (outer - inner).max(0.0)
    }

    /// Closed containment: boundary points count as inside.
    pub fn contains_point(&self, p: Point) -> bool {
        if point_on_ring(p, &self.exterior) {
            return true;
        }
        if !point_in_ring(p, &self.exterior) {
            return false;
        }
        self.holes
            .iter()
            .all(|h| point_on_ring(p, h) || !point_in_ring(p, h))
    }

    fn rings(&self) -> impl Iterator<Item = &Vec<Point>> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }
}

/// Planar "floor" area.
///
/// Always either empty or a set of valid polygons; operations on empty or
/// degenerate inputs are identities rather than errors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    polygons: Vec<RegionPolygon>,
}

impl Region {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_polygon(polygon: RegionPolygon) -> Self {
        Self::from_polygons(vec![polygon])
    }

    /// Build from polygons, discarding rings too small to carry area.
    pub fn from_polygons(polygons: Vec<RegionPolygon>) -> Self {
        let polygons = polygons
            .into_iter()
            .filter_map(|p| {
                let exterior = clean_ring(p.exterior);
                if exterior.len() < 3 || ring_signed_area(&exterior).abs() <= EPS_AREA {
                    return None;
                }
                let holes = p
                    .holes
                    .into_iter()
                    .map(clean_ring)
                    .filter(|h| h.len() >= 3 && ring_signed_area(h).abs() > EPS_AREA)
                    .collect();
                Some(RegionPolygon { exterior, holes })
            })
            .collect();
        Self { polygons }
    }

    pub fn polygons(&self) -> &[RegionPolygon] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn area(&self) -> f64 {
        self.polygons.iter().map(RegionPolygon::area).sum()
    }

    /// `(min_x, min_y, max_x, max_y)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.polygons.iter().flat_map(|p| p.exterior.iter());
        let first = points.next()?;
        let init = (first.x, first.y, first.x, first.y);
        Some(points.fold(init, |(x0, y0, x1, y1), p| {
            (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))
        }))
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.polygons.iter().any(|poly| poly.contains_point(p))
    }

    /// Set union. Empty operands are identities.
    pub fn union(&self, other: &Region) -> Region {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        perform_boolean(self, other, BooleanOp::Union)
    }

    /// Removes the overlap with `other` from this region.
    pub fn difference(&self, other: &Region) -> Region {
        if self.is_empty() || other.is_empty() || !self.bounds_overlap(other) {
            return self.clone();
        }
        perform_boolean(self, other, BooleanOp::Difference)
    }

    pub fn intersection(&self, other: &Region) -> Region {
        if self.is_empty() || other.is_empty() || !self.bounds_overlap(other) {
            return Region::empty();
        }
        perform_boolean(self, other, BooleanOp::Intersection)
    }

    /// True when the overlap has positive area; regions that only share
    /// boundary do not intersect.
    pub fn intersects(&self, other: &Region) -> bool {
        if self.is_empty() || other.is_empty() || !self.bounds_overlap(other) {
            return false;
        }
        self.intersection(other).area() > EPS_AREA
    }

    /// True when the segment touches the closed region anywhere.
    pub fn intersects_line(&self, line: &LineShape) -> bool {
        let Some((x0, y0, x1, y1)) = self.bounds() else {
            return false;
        };
        let (lx0, lx1) = (line.start.x.min(line.end.x), line.start.x.max(line.end.x));
        let (ly0, ly1) = (line.start.y.min(line.end.y), line.start.y.max(line.end.y));
        if lx1 < x0 - EPS_POS || lx0 > x1 + EPS_POS || ly1 < y0 - EPS_POS || ly0 > y1 + EPS_POS {
            return false;
        }

        if self.contains_point(line.start) || self.contains_point(line.end) {
            return true;
        }
        if line.length() <= EPS_POS {
            return false;
        }

        // Both endpoints outside: it intersects only by crossing a ring
        self.polygons.iter().flat_map(|p| p.rings()).any(|ring| {
            (0..ring.len()).any(|i| {
                segments_intersect(line.start, line.end, ring[i], ring[(i + 1) % ring.len()])
            })
        })
    }

    fn bounds_overlap(&self, other: &Region) -> bool {
        match (self.bounds(), other.bounds()) {
            (Some(a), Some(b)) => a.0 <= b.2 && b.0 <= a.2 && a.1 <= b.3 && b.1 <= a.3,
            _ => false,
        }
    }
}
