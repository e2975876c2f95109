//! Shape vertex generators.
//!
//! Rounded rectangles, ellipses, and stroked polylines. All closed shapes
//! are emitted in increasing-angle order (positive shoelace area; clockwise
//! as seen on a y-down screen), so overlapping pieces of one stroke add up
//! under the non-zero rule instead of cancelling.
//!
//! Arc step size follows `agg_arc.h`: `da = 2 * acos(r / (r + 0.125 / scale))`
//! keeps the chord error around an eighth of a pixel.

use crate::basics::{
    uround, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP,
    PATH_FLAGS_CLOSE, PI,
};
use crate::path::PathStorage;

/// Angular step that keeps arc flattening error below 1/8 px.
fn arc_step(radius: f64, scale: f64) -> f64 {
    let r = radius.abs();
    (r / (r + 0.125 / scale)).acos() * 2.0
}

/// Emit points of an arc around `(cx, cy)` from `a1` to `a2` (radians,
/// increasing). Both endpoints are included.
fn push_arc(points: &mut Vec<(f64, f64)>, cx: f64, cy: f64, r: f64, a1: f64, a2: f64) {
    if r <= 0.0 {
        points.push((cx, cy));
        return;
    }
    let da = arc_step(r, 1.0);
    let n = (((a2 - a1) / da).ceil() as u32).max(1);
    for i in 0..=n {
        let a = a1 + (a2 - a1) * i as f64 / n as f64;
        points.push((cx + a.cos() * r, cy + a.sin() * r));
    }
}

// ============================================================================
// Polygon
// ============================================================================

/// A closed polygon over an owned point list.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    points: Vec<(f64, f64)>,
    idx: usize,
}

impl Polygon {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points, idx: 0 }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Twice the signed area (shoelace). Positive for the winding every
    /// generator in this module uses.
    pub fn signed_area2(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let (x1, y1) = self.points[i];
                let (x2, y2) = self.points[(i + 1) % n];
                x1 * y2 - x2 * y1
            })
            .sum()
    }
}

impl VertexSource for Polygon {
    fn rewind(&mut self, _path_id: u32) {
        self.idx = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        let i = self.idx;
        self.idx += 1;
        match self.points.get(i) {
            Some(&(px, py)) => {
                *x = px;
                *y = py;
                if i == 0 {
                    PATH_CMD_MOVE_TO
                } else {
                    PATH_CMD_LINE_TO
                }
            }
            None if i == self.points.len() && !self.points.is_empty() => {
                PATH_CMD_END_POLY | PATH_FLAGS_CLOSE
            }
            None => PATH_CMD_STOP,
        }
    }
}

// ============================================================================
// RoundedRect
// ============================================================================

/// Rectangle `(x1, y1)-(x2, y2)` with circular corners.
///
/// The radius is clamped to half the shorter side, so a radius larger than
/// the box degrades to a stadium or circle rather than self-intersecting.
pub fn rounded_rect(x1: f64, y1: f64, x2: f64, y2: f64, r: f64) -> Polygon {
    let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
    let (y1, y2) = if y1 > y2 { (y2, y1) } else { (y1, y2) };
    let r = r.max(0.0).min((x2 - x1) / 2.0).min((y2 - y1) / 2.0);

    let mut points = Vec::new();
    if r <= 0.0 {
        points.extend_from_slice(&[(x1, y1), (x2, y1), (x2, y2), (x1, y2)]);
        return Polygon::new(points);
    }
    push_arc(&mut points, x1 + r, y1 + r, r, PI, 1.5 * PI);
    push_arc(&mut points, x2 - r, y1 + r, r, 1.5 * PI, 2.0 * PI);
    push_arc(&mut points, x2 - r, y2 - r, r, 0.0, 0.5 * PI);
    push_arc(&mut points, x1 + r, y2 - r, r, 0.5 * PI, PI);
    Polygon::new(points)
}

// ============================================================================
// Ellipse
// ============================================================================

/// Ellipse centred at `(cx, cy)`, approximated by `num` segments.
#[derive(Debug, Clone)]
pub struct Ellipse {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    num: u32,
    step: u32,
}

impl Ellipse {
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        let ra = (rx.abs() + ry.abs()) / 2.0;
        let num = if ra > 0.0 {
            uround(2.0 * PI / arc_step(ra, 1.0)).max(8)
        } else {
            0
        };
        Self {
            cx,
            cy,
            rx,
            ry,
            num,
            step: 0,
        }
    }

    pub fn num_steps(&self) -> u32 {
        self.num
    }
}

impl VertexSource for Ellipse {
    fn rewind(&mut self, _path_id: u32) {
        self.step = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.num == 0 || self.step > self.num {
            return PATH_CMD_STOP;
        }
        if self.step == self.num {
            self.step += 1;
            return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE;
        }
        let angle = self.step as f64 / self.num as f64 * 2.0 * PI;
        *x = self.cx + angle.cos() * self.rx;
        *y = self.cy + angle.sin() * self.ry;
        let cmd = if self.step == 0 {
            PATH_CMD_MOVE_TO
        } else {
            PATH_CMD_LINE_TO
        };
        self.step += 1;
        cmd
    }
}

// ============================================================================
// Stroked polylines
// ============================================================================

/// Outline a polyline of the given width: one butt-capped quad per segment
/// plus a disc at every interior joint (round joins). Rasterize with the
/// non-zero rule.
pub fn stroke_polyline(points: &[(f64, f64)], width: f64) -> PathStorage {
    let mut path = PathStorage::new();
    let hw = width / 2.0;
    if hw <= 0.0 {
        return path;
    }
    for pair in points.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        let len = (x2 - x1).hypot(y2 - y1);
        if len <= f64::EPSILON {
            continue;
        }
        let nx = -(y2 - y1) / len * hw;
        let ny = (x2 - x1) / len * hw;
        path.add_polygon(&[
            (x1 - nx, y1 - ny),
            (x2 - nx, y2 - ny),
            (x2 + nx, y2 + ny),
            (x1 + nx, y1 + ny),
        ]);
    }
    if points.len() > 2 && hw > 0.5 {
        for &(x, y) in &points[1..points.len() - 1] {
            let mut disc = Ellipse::new(x, y, hw, hw);
            append_source(&mut path, &mut disc);
        }
    }
    path
}

/// Copy every vertex of `vs` into `path`.
pub fn append_source(path: &mut PathStorage, vs: &mut dyn VertexSource) {
    use crate::basics::{is_close, is_move_to, is_stop};
    let (mut x, mut y) = (0.0, 0.0);
    vs.rewind(0);
    loop {
        let cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        if is_move_to(cmd) {
            path.move_to(x, y);
        } else if is_close(cmd) {
            path.close_polygon();
        } else {
            path.line_to(x, y);
        }
    }
}
