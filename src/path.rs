//! Vertex storage with built-in curve flattening.
//!
//! Quadratic and cubic Bézier segments are flattened into line-to vertices
//! as they are appended, using a step count proportional to the control
//! polygon length (the incremental scheme of `agg_curves.h`). The stored
//! path is therefore always polygonal and can be fed straight to the
//! rasterizer.

use crate::basics::{
    is_vertex, uround, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO,
    PATH_CMD_STOP, PATH_FLAGS_CLOSE,
};

/// Minimum number of segments per curve.
const CURVE_MIN_STEPS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Vertex {
    x: f64,
    y: f64,
    cmd: u32,
}

/// A sequence of polygonal contours.
#[derive(Debug, Clone, Default)]
pub struct PathStorage {
    vertices: Vec<Vertex>,
    iter: usize,
}

impl PathStorage {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            iter: 0,
        }
    }

    pub fn total_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.push(x, y, PATH_CMD_MOVE_TO);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.push(x, y, PATH_CMD_LINE_TO);
    }

    /// Close the current contour. Consecutive closes collapse into one.
    pub fn close_polygon(&mut self) {
        if self.vertices.last().map_or(false, |v| is_vertex(v.cmd)) {
            self.push(0.0, 0.0, PATH_CMD_END_POLY | PATH_FLAGS_CLOSE);
        }
    }

    /// Append a closed polygon through `points`.
    pub fn add_polygon(&mut self, points: &[(f64, f64)]) {
        let mut it = points.iter();
        if let Some(&(x, y)) = it.next() {
            self.move_to(x, y);
            for &(x, y) in it {
                self.line_to(x, y);
            }
            self.close_polygon();
        }
    }

    /// Last vertex coordinate, or `None` if there is no vertex yet.
    pub fn last_vertex(&self) -> Option<(f64, f64)> {
        self.vertices
            .iter()
            .rev()
            .find(|v| is_vertex(v.cmd))
            .map(|v| (v.x, v.y))
    }

    /// Quadratic Bézier from the last vertex through control `(cx, cy)`.
    pub fn curve3(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let Some((x0, y0)) = self.last_vertex() else {
            self.move_to(x, y);
            return;
        };
        let len = (cx - x0).hypot(cy - y0) + (x - cx).hypot(y - cy);
        let steps = self.curve_steps(len);
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let mt = 1.0 - t;
            let a = mt * mt;
            let b = 2.0 * mt * t;
            let c = t * t;
            self.line_to(a * x0 + b * cx + c * x, a * y0 + b * cy + c * y);
        }
    }

    /// Cubic Bézier from the last vertex through two control points.
    pub fn curve4(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        let Some((x0, y0)) = self.last_vertex() else {
            self.move_to(x, y);
            return;
        };
        let len = (c1x - x0).hypot(c1y - y0) + (c2x - c1x).hypot(c2y - c1y) + (x - c2x).hypot(y - c2y);
        let steps = self.curve_steps(len);
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let mt = 1.0 - t;
            let a = mt * mt * mt;
            let b = 3.0 * mt * mt * t;
            let c = 3.0 * mt * t * t;
            let d = t * t * t;
            self.line_to(
                a * x0 + b * c1x + c * c2x + d * x,
                a * y0 + b * c1y + c * c2y + d * y,
            );
        }
    }

    fn curve_steps(&self, len: f64) -> u32 {
        uround(len * 0.25).max(CURVE_MIN_STEPS)
    }

    /// Shift every vertex by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for v in self.vertices.iter_mut().filter(|v| is_vertex(v.cmd)) {
            v.x += dx;
            v.y += dy;
        }
    }

    /// Axis-aligned bounds of all vertices as `(x1, y1, x2, y2)`.
    pub fn bounding_rect(&self) -> Option<(f64, f64, f64, f64)> {
        self.vertices
            .iter()
            .filter(|v| is_vertex(v.cmd))
            .fold(None, |acc, v| match acc {
                None => Some((v.x, v.y, v.x, v.y)),
                Some((x1, y1, x2, y2)) => {
                    Some((x1.min(v.x), y1.min(v.y), x2.max(v.x), y2.max(v.y)))
                }
            })
    }

    fn push(&mut self, x: f64, y: f64, cmd: u32) {
        self.vertices.push(Vertex { x, y, cmd });
    }
}

impl VertexSource for PathStorage {
    fn rewind(&mut self, _path_id: u32) {
        self.iter = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        match self.vertices.get(self.iter) {
            Some(v) => {
                self.iter += 1;
                *x = v.x;
                *y = v.y;
                v.cmd
            }
            None => PATH_CMD_STOP,
        }
    }
}
