use super::types::Smooth;

pub type Point = (f64, f64);

/// Control point of the quadratic curve drawn for a smoothed edge.
///
/// The point sits on the perpendicular bisector of `from -> to`, offset by
/// `roundness * distance / 2` towards the side given by the orientation.
/// Returns `None` when both ends coincide.
pub fn control_point(from: Point, to: Point, smooth: &Smooth) -> Option<Point> {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return None;
	}
	let (mx, my) = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
	let (nx, ny) = (-dy / dist, dx / dist);
	let offset = smooth.orientation.sign() * smooth.roundness * dist / 2.0;
	Some((mx + nx * offset, my + ny * offset))
}

/// Point at parameter `t` of the quadratic Bezier `p0, c, p2`.
pub fn quadratic_point(p0: Point, c: Point, p2: Point, t: f64) -> Point {
	let u = 1.0 - t;
	(
		u * u * p0.0 + 2.0 * u * t * c.0 + t * t * p2.0,
		u * u * p0.1 + 2.0 * u * t * c.1 + t * t * p2.1,
	)
}

/// Unit vector from `a` towards `b`, or `None` when they coincide.
pub fn direction(a: Point, b: Point) -> Option<Point> {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let dist = (dx * dx + dy * dy).sqrt();
	(dist >= 0.001).then(|| (dx / dist, dy / dist))
}

/// Triangle of an arrowhead whose tip touches `tip`, pointing along `dir`.
pub fn arrow_head(tip: Point, dir: Point, size: f64) -> [Point; 3] {
	let (back_x, back_y) = (tip.0 - dir.0 * size, tip.1 - dir.1 * size);
	let (px, py) = (-dir.1 * size * 0.5, dir.0 * size * 0.5);
	[tip, (back_x + px, back_y + py), (back_x - px, back_y - py)]
}
