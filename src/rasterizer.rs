//! Anti-aliased polygon rasterizer.
//!
//! Contours go in as move_to/line_to/close in floating-point pixels; they are
//! converted to 24.8 fixed point, split into per-pixel cells carrying signed
//! cover and area, sorted, and swept row by row into a `ScanlineU8`.
//!
//! The exact-area cell scheme is AGG's (`agg_rasterizer_cells_aa.h` and
//! `agg_rasterizer_scanline_aa_nogamma.h`), without the clipper: the
//! renderer clips spans to the canvas instead.

use crate::basics::{
    is_close, is_move_to, is_stop, is_vertex, poly_coord, FillingRule, VertexSource,
    POLY_SUBPIXEL_MASK, POLY_SUBPIXEL_SCALE, POLY_SUBPIXEL_SHIFT,
};
use crate::scanline::ScanlineU8;

const AA_SHIFT: u32 = 8;
const AA_SCALE: u32 = 1 << AA_SHIFT;
const AA_MASK: u32 = AA_SCALE - 1;
const AA_SCALE2: u32 = AA_SCALE * 2;
const AA_MASK2: u32 = AA_SCALE2 - 1;

/// Segments wider than this are halved before cell conversion so the
/// intermediate products stay in range.
const DX_LIMIT: i64 = 16384 << POLY_SUBPIXEL_SHIFT;

const ONE: i32 = POLY_SUBPIXEL_SCALE as i32;

// ============================================================================
// Cells
// ============================================================================

/// Accumulated edge contribution for one pixel.
///
/// `cover` is the net vertical extent crossing the cell, `area` twice the
/// signed area to the left of the edge fragments inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub cover: i32,
    pub area: i32,
}

impl Cell {
    const EMPTY: Cell = Cell {
        x: i32::MAX,
        y: i32::MAX,
        cover: 0,
        area: 0,
    };

    #[inline]
    fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct RowIndex {
    start: u32,
    num: u32,
}

/// Edge-to-cell converter with per-row sorted access.
pub struct CellStore {
    cells: Vec<Cell>,
    order: Vec<u32>,
    rows: Vec<RowIndex>,
    current: Cell,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    sorted: bool,
}

impl CellStore {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            order: Vec::new(),
            rows: Vec::new(),
            current: Cell::EMPTY,
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: i32::MIN,
            max_y: i32::MIN,
            sorted: false,
        }
    }

    pub fn reset(&mut self) {
        self.cells.clear();
        self.order.clear();
        self.rows.clear();
        self.current = Cell::EMPTY;
        self.min_x = i32::MAX;
        self.min_y = i32::MAX;
        self.max_x = i32::MIN;
        self.max_y = i32::MIN;
        self.sorted = false;
    }

    pub fn min_x(&self) -> i32 {
        self.min_x
    }
    pub fn min_y(&self) -> i32 {
        self.min_y
    }
    pub fn max_x(&self) -> i32 {
        self.max_x
    }
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Cells of row `y` ordered by x. Only valid after `sort`.
    pub fn row(&self, y: i32) -> impl Iterator<Item = &Cell> + '_ {
        let (start, num) = match y
            .checked_sub(self.min_y)
            .and_then(|i| self.rows.get(i as usize))
        {
            Some(r) => (r.start as usize, r.num as usize),
            None => (0, 0),
        };
        self.order[start..start + num]
            .iter()
            .map(move |&i| &self.cells[i as usize])
    }

    #[inline]
    fn flush_current(&mut self) {
        if self.current.area | self.current.cover != 0 {
            self.cells.push(self.current);
        }
    }

    #[inline]
    fn move_current(&mut self, x: i32, y: i32) {
        if !self.current.is_at(x, y) {
            self.flush_current();
            self.current = Cell {
                x,
                y,
                cover: 0,
                area: 0,
            };
        }
    }

    #[inline]
    fn extend_bounds(&mut self, ex: i32, ey: i32) {
        self.min_x = self.min_x.min(ex);
        self.max_x = self.max_x.max(ex);
        self.min_y = self.min_y.min(ey);
        self.max_y = self.max_y.max(ey);
    }

    /// Walk a segment that stays within pixel row `ey`. `y1`/`y2` are the
    /// fractional heights inside that row.
    fn row_segment(&mut self, ey: i32, x1: i32, y1: i32, x2: i32, y2: i32) {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1 & POLY_SUBPIXEL_MASK as i32;
        let fx2 = x2 & POLY_SUBPIXEL_MASK as i32;

        if y1 == y2 {
            self.move_current(ex2, ey);
            return;
        }

        if ex1 == ex2 {
            let dy = y2 - y1;
            self.current.cover += dy;
            self.current.area += (fx1 + fx2) * dy;
            return;
        }

        // Crosses several cells: distribute dy proportionally with an
        // error accumulator so the pieces sum exactly.
        let (mut p, first, step, dx) = if x2 < x1 {
            (fx1 as i64 * (y2 - y1) as i64, 0, -1, x1 as i64 - x2 as i64)
        } else {
            (
                (ONE - fx1) as i64 * (y2 - y1) as i64,
                ONE,
                1,
                x2 as i64 - x1 as i64,
            )
        };

        let mut dy = (p / dx) as i32;
        let mut rem = p % dx;
        if rem < 0 {
            dy -= 1;
            rem += dx;
        }

        self.current.cover += dy;
        self.current.area += (fx1 + first) * dy;

        let mut ex = ex1 + step;
        self.move_current(ex, ey);
        let mut y = y1 + dy;

        if ex != ex2 {
            p = ONE as i64 * (y2 - y + dy) as i64;
            let mut lift = (p / dx) as i32;
            let mut lift_rem = p % dx;
            if lift_rem < 0 {
                lift -= 1;
                lift_rem += dx;
            }
            rem -= dx;

            while ex != ex2 {
                dy = lift;
                rem += lift_rem;
                if rem >= 0 {
                    rem -= dx;
                    dy += 1;
                }
                self.current.cover += dy;
                self.current.area += ONE * dy;
                y += dy;
                ex += step;
                self.move_current(ex, ey);
            }
        }

        dy = y2 - y;
        self.current.cover += dy;
        self.current.area += (fx2 + ONE - first) * dy;
    }

    /// Add one edge in 24.8 fixed point.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let dx = x2 as i64 - x1 as i64;
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = ((x1 as i64 + x2 as i64) >> 1) as i32;
            let cy = ((y1 as i64 + y2 as i64) >> 1) as i32;
            self.line(x1, y1, cx, cy);
            self.line(cx, cy, x2, y2);
            return;
        }

        let dy = y2 as i64 - y1 as i64;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let mut ey = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 & POLY_SUBPIXEL_MASK as i32;
        let fy2 = y2 & POLY_SUBPIXEL_MASK as i32;

        self.extend_bounds(ex1, ey);
        self.extend_bounds(ex2, ey2);
        self.move_current(ex1, ey);

        if ey == ey2 {
            self.row_segment(ey, x1, fy1, x2, fy2);
            return;
        }

        // Vertical edge: one cell per row, constant area.
        if dx == 0 {
            let ex = x1 >> POLY_SUBPIXEL_SHIFT;
            let two_fx = (x1 - (ex << POLY_SUBPIXEL_SHIFT)) << 1;
            let (first, step) = if dy < 0 { (0, -1) } else { (ONE, 1) };

            let mut d = first - fy1;
            self.current.cover += d;
            self.current.area += two_fx * d;

            ey += step;
            self.move_current(ex, ey);

            d = first + first - ONE;
            let area = two_fx * d;
            while ey != ey2 {
                self.current.cover = d;
                self.current.area = area;
                ey += step;
                self.move_current(ex, ey);
            }
            d = fy2 - ONE + first;
            self.current.cover += d;
            self.current.area += two_fx * d;
            return;
        }

        // General edge: split at row boundaries and walk each row.
        let (mut p, first, step, dy_abs) = if dy < 0 {
            (fy1 as i64 * dx, 0, -1, -dy)
        } else {
            ((ONE - fy1) as i64 * dx, ONE, 1, dy)
        };

        let mut d = (p / dy_abs) as i32;
        let mut rem = p % dy_abs;
        if rem < 0 {
            d -= 1;
            rem += dy_abs;
        }

        let mut x_from = x1 + d;
        self.row_segment(ey, x1, fy1, x_from, first);

        ey += step;
        self.move_current(x_from >> POLY_SUBPIXEL_SHIFT, ey);

        if ey != ey2 {
            p = ONE as i64 * dx;
            let mut lift = (p / dy_abs) as i32;
            let mut lift_rem = p % dy_abs;
            if lift_rem < 0 {
                lift -= 1;
                lift_rem += dy_abs;
            }
            rem -= dy_abs;

            while ey != ey2 {
                d = lift;
                rem += lift_rem;
                if rem >= 0 {
                    rem -= dy_abs;
                    d += 1;
                }
                let x_to = x_from + d;
                self.row_segment(ey, x_from, ONE - first, x_to, first);
                x_from = x_to;

                ey += step;
                self.move_current(x_from >> POLY_SUBPIXEL_SHIFT, ey);
            }
        }
        self.row_segment(ey, x_from, ONE - first, x2, fy2);
    }

    /// Bucket cells by row (counting sort), then order each row by x.
    pub fn sort(&mut self) {
        if self.sorted {
            return;
        }
        self.flush_current();
        self.current = Cell::EMPTY;

        if self.cells.is_empty() {
            return;
        }

        let rows = (self.max_y - self.min_y + 1) as usize;
        self.rows.clear();
        self.rows.resize(rows, RowIndex::default());
        self.order.clear();
        self.order.resize(self.cells.len(), 0);

        for cell in &self.cells {
            self.rows[(cell.y - self.min_y) as usize].start += 1;
        }
        let mut start = 0u32;
        for row in &mut self.rows {
            let count = row.start;
            row.start = start;
            start += count;
        }
        for (i, cell) in self.cells.iter().enumerate() {
            let row = &mut self.rows[(cell.y - self.min_y) as usize];
            self.order[(row.start + row.num) as usize] = i as u32;
            row.num += 1;
        }

        let cells = &self.cells;
        for row in &self.rows {
            let slice = &mut self.order[row.start as usize..(row.start + row.num) as usize];
            slice.sort_unstable_by_key(|&i| cells[i as usize].x);
        }

        self.sorted = true;
    }
}

impl Default for CellStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Rasterizer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Initial,
    MoveTo,
    LineTo,
    Closed,
}

/// Polygon rasterizer producing 8-bit coverage scanlines.
///
/// Contours are closed implicitly on the next `move_to_d` and before
/// sweeping. Adding a vertex after a sweep starts a new shape.
pub struct Rasterizer {
    cells: CellStore,
    filling_rule: FillingRule,
    start_x: i32,
    start_y: i32,
    last_x: i32,
    last_y: i32,
    status: Status,
    scan_y: i32,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            cells: CellStore::new(),
            filling_rule: FillingRule::NonZero,
            start_x: 0,
            start_y: 0,
            last_x: 0,
            last_y: 0,
            status: Status::Initial,
            scan_y: 0,
        }
    }

    pub fn reset(&mut self) {
        self.cells.reset();
        self.status = Status::Initial;
    }

    pub fn filling_rule(&mut self, rule: FillingRule) {
        self.filling_rule = rule;
    }

    pub fn min_x(&self) -> i32 {
        self.cells.min_x()
    }
    pub fn min_y(&self) -> i32 {
        self.cells.min_y()
    }
    pub fn max_x(&self) -> i32 {
        self.cells.max_x()
    }
    pub fn max_y(&self) -> i32 {
        self.cells.max_y()
    }

    pub fn close_polygon(&mut self) {
        if self.status == Status::LineTo {
            self.cells
                .line(self.last_x, self.last_y, self.start_x, self.start_y);
            self.last_x = self.start_x;
            self.last_y = self.start_y;
            self.status = Status::Closed;
        }
    }

    pub fn move_to_d(&mut self, x: f64, y: f64) {
        if self.cells.is_sorted() {
            self.reset();
        }
        self.close_polygon();
        self.start_x = poly_coord(x);
        self.start_y = poly_coord(y);
        self.last_x = self.start_x;
        self.last_y = self.start_y;
        self.status = Status::MoveTo;
    }

    pub fn line_to_d(&mut self, x: f64, y: f64) {
        let (nx, ny) = (poly_coord(x), poly_coord(y));
        self.cells.line(self.last_x, self.last_y, nx, ny);
        self.last_x = nx;
        self.last_y = ny;
        self.status = Status::LineTo;
    }

    pub fn add_vertex(&mut self, x: f64, y: f64, cmd: u32) {
        if is_move_to(cmd) {
            self.move_to_d(x, y);
        } else if is_vertex(cmd) {
            self.line_to_d(x, y);
        } else if is_close(cmd) {
            self.close_polygon();
        }
    }

    /// Feed every vertex of `vs`.
    pub fn add_path(&mut self, vs: &mut dyn VertexSource, path_id: u32) {
        let (mut x, mut y) = (0.0, 0.0);
        vs.rewind(path_id);
        if self.cells.is_sorted() {
            self.reset();
        }
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            self.add_vertex(x, y, cmd);
        }
    }

    /// Close, sort, and position at the first row. `false` if empty.
    pub fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        self.cells.sort();
        if self.cells.total_cells() == 0 {
            return false;
        }
        self.scan_y = self.cells.min_y();
        true
    }

    /// Coverage 0..=255 from a doubled area, honouring the filling rule.
    #[inline]
    pub fn calculate_alpha(&self, area: i32) -> u32 {
        let mut cover = (area >> (POLY_SUBPIXEL_SHIFT * 2 + 1 - AA_SHIFT)).abs();
        if self.filling_rule == FillingRule::EvenOdd {
            cover &= AA_MASK2 as i32;
            if cover > AA_SCALE as i32 {
                cover = AA_SCALE2 as i32 - cover;
            }
        }
        cover.min(AA_MASK as i32) as u32
    }

    /// Emit the next non-empty row into `sl`. `false` when exhausted.
    pub fn sweep_scanline(&mut self, sl: &mut ScanlineU8) -> bool {
        loop {
            if self.scan_y > self.cells.max_y() {
                return false;
            }
            sl.reset_spans();

            let mut cells = self.cells.row(self.scan_y).peekable();
            let mut cover: i32 = 0;

            while let Some(cell) = cells.next() {
                let x = cell.x;
                let mut area = cell.area;
                cover += cell.cover;

                while let Some(next) = cells.peek() {
                    if next.x != x {
                        break;
                    }
                    area += next.area;
                    cover += next.cover;
                    cells.next();
                }

                // Partial pixel at x, then a solid run up to the next cell.
                let run_start = if area != 0 {
                    let alpha = self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha != 0 {
                        sl.add_cell(x, alpha);
                    }
                    x + 1
                } else {
                    x
                };

                if let Some(next) = cells.peek() {
                    if next.x > run_start {
                        let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                        if alpha != 0 {
                            sl.add_span(run_start, (next.x - run_start) as u32, alpha);
                        }
                    }
                }
            }

            if sl.num_spans() > 0 {
                break;
            }
            self.scan_y += 1;
        }

        sl.finalize(self.scan_y);
        self.scan_y += 1;
        true
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
