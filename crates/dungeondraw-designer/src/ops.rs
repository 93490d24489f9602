//! Boolean region operations backed by `csgrs` sketches.

use csgrs::sketch::Sketch;
use csgrs::traits::CSG;

use crate::region::{Region, RegionPolygon};
use crate::shapes::Point;

pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
}

pub fn perform_boolean(a: &Region, b: &Region, op: BooleanOp) -> Region {
    let csg_a = region_to_sketch(a);
    let csg_b = region_to_sketch(b);

    let result_csg = match op {
        BooleanOp::Union => csg_a.union(&csg_b),
        BooleanOp::Difference => csg_a.difference(&csg_b),
        BooleanOp::Intersection => csg_a.intersection(&csg_b),
    };

    sketch_to_region(&result_csg)
}

fn ring_coords(ring: &[Point]) -> Vec<[f64; 2]> {
    ring.iter().map(|p| [p.x, p.y]).collect()
}

/// Holes are cut out of their exterior, then polygons are unioned.
pub fn region_to_sketch(region: &Region) -> Sketch<()> {
    let mut sketch: Sketch<()> = Sketch::new();
    for poly in region.polygons() {
        let mut piece: Sketch<()> = Sketch::polygon(&ring_coords(&poly.exterior), None);
        for hole in &poly.holes {
            let cut: Sketch<()> = Sketch::polygon(&ring_coords(hole), None);
            piece = piece.difference(&cut);
        }
        sketch = sketch.union(&piece);
    }
    sketch
}

pub fn sketch_to_region(sketch: &Sketch<()>) -> Region {
    let mp = sketch.to_multipolygon();
    let polygons = mp
        .0
        .iter()
        .map(|poly| {
            let exterior = poly
                .exterior()
                .0
                .iter()
                .map(|c| Point::new(c.x, c.y))
                .collect();
            let holes = poly
                .interiors()
                .iter()
                .map(|ring| ring.0.iter().map(|c| Point::new(c.x, c.y)).collect())
                .collect();
            RegionPolygon::with_holes(exterior, holes)
        })
        .collect();
    // from_polygons strips closing points and drops zero-area slivers
    Region::from_polygons(polygons)
}
