use geo::Coord;

/// Shortest euclidean distance from `p` to the segment `[a, b]`.
///
/// The projection of `p` onto the segment's line is clamped to the segment,
/// so points beyond either end measure to that endpoint. A zero-length
/// segment measures to `a`.
#[inline]
pub fn point_to_segment_distance(p: Coord, a: Coord, b: Coord) -> f64 {
    let ab = b - a;
    let ap = p - a;

    let ab_squared = ab.x * ab.x + ab.y * ab.y;
    if ab_squared == 0.0 {
        return ap.x.hypot(ap.y);
    }

    let t = (ap.x * ab.x + ap.y * ab.y) / ab_squared;
    let nearest = if t < 0.0 {
        a
    } else if t > 1.0 {
        b
    } else {
        a + ab * t
    };

    let delta = p - nearest;
    delta.x.hypot(delta.y)
}
