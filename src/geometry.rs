use egui::{Pos2, pos2};

/// Test whether `point` lies on the segment `a`..`b`, within `tolerance`.
///
/// The point is projected onto the infinite line through the segment; a
/// projection parameter outside `[0, 1]` means the point is beyond an
/// endpoint and is rejected outright (no extension). A zero-length segment
/// degenerates to a plain distance check against `a`.
pub fn is_point_on_segment(point: Pos2, a: Pos2, b: Pos2, tolerance: f32) -> bool {
    let len = a.distance(b);
    if len == 0.0 {
        return point.distance(a) <= tolerance;
    }
    let t = ((point.x - a.x) * (b.x - a.x) + (point.y - a.y) * (b.y - a.y)) / (len * len);
    if !(0.0..=1.0).contains(&t) {
        return false;
    }
    let projection = pos2(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
    point.distance(projection) <= tolerance
}

/// Rotate `point` about `center` by `angle_degrees` (clockwise in screen space,
/// since y grows downward).
pub fn rotate_point(point: Pos2, center: Pos2, angle_degrees: f32) -> Pos2 {
    let rad = angle_degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    pos2(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}

/// Insert interpolated points so that no consecutive pair of `path` is more
/// than `min_segment_length` apart. Paths with fewer than two points are
/// returned unchanged. The point count never decreases.
pub fn densify(path: &[Pos2], min_segment_length: f32) -> Vec<Pos2> {
    if path.len() < 2 {
        return path.to_vec();
    }

    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);
    for pair in path.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let segments = (p1.distance(p2) / min_segment_length).ceil() as usize;
        if segments > 1 {
            for j in 1..=segments {
                let t = j as f32 / segments as f32;
                out.push(pos2(p1.x + (p2.x - p1.x) * t, p1.y + (p2.y - p1.y) * t));
            }
        } else {
            out.push(p2);
        }
    }
    out
}
