use std::collections::HashMap;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::geometry::{Point, arrow_head, control_point, direction, quadratic_point};
use super::scene::Scene;

const BACKGROUND: &str = "#ffffff";
const EDGE_COLOR: &str = "#848484";
const LABEL_COLOR: &str = "#343434";

pub fn render(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
	ctx.save();
	let _ = ctx.translate(scene.transform.x, scene.transform.y);
	let _ = ctx.scale(scene.transform.k, scene.transform.k);
	draw_edges(scene, ctx);
	draw_nodes(scene, ctx);
	ctx.restore();
}

fn draw_edges(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let k = scene.transform.k;
	let (line_width, arrow_size) = (1.0 / k.max(0.5), 8.0);
	let positions = scene.positions();
	let mut radii = HashMap::new();
	scene.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		radii.insert(node.index(), if info.hidden { 0.0 } else { info.radius });
	});

	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_fill_style_str(EDGE_COLOR);
	ctx.set_line_width(line_width);
	for edge in &scene.edges {
		let (Some(&start), Some(&end)) = (positions.get(&edge.from), positions.get(&edge.to))
		else {
			continue;
		};
		let control = edge.smooth.and_then(|smooth| control_point(start, end, &smooth));
		let towards_end = control.unwrap_or(start);
		let Some(dir) = direction(towards_end, end) else {
			continue;
		};
		let end_radius = radii.get(&edge.to).copied().unwrap_or(0.0);
		let tip: Point = (end.0 - dir.0 * end_radius, end.1 - dir.1 * end_radius);
		let line_end = (tip.0 - dir.0 * arrow_size, tip.1 - dir.1 * arrow_size);

		ctx.begin_path();
		ctx.move_to(start.0, start.1);
		match control {
			Some(c) => ctx.quadratic_curve_to(c.0, c.1, line_end.0, line_end.1),
			None => ctx.line_to(line_end.0, line_end.1),
		}
		ctx.stroke();

		let [a, b, c] = arrow_head(tip, dir, arrow_size);
		ctx.begin_path();
		ctx.move_to(a.0, a.1);
		ctx.line_to(b.0, b.1);
		ctx.line_to(c.0, c.1);
		ctx.close_path();
		ctx.fill();

		if let Some(label) = &edge.label {
			let (lx, ly) = match control {
				Some(c) => quadratic_point(start, c, end, 0.5),
				None => ((start.0 + end.0) / 2.0, (start.1 + end.1) / 2.0),
			};
			ctx.set_fill_style_str(LABEL_COLOR);
			ctx.set_font("11px sans-serif");
			ctx.set_text_align("center");
			let _ = ctx.fill_text(label, lx, ly - 4.0);
			ctx.set_fill_style_str(EDGE_COLOR);
		}
	}
}

fn draw_nodes(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	ctx.set_font("14px sans-serif");
	scene.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if info.hidden {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);

		ctx.begin_path();
		let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if !info.label.is_empty() {
			ctx.set_fill_style_str(LABEL_COLOR);
			let _ = ctx.fill_text(&info.label, x, y + info.radius + 16.0);
		}
	});
}
