//! Unpacked scanline container.
//!
//! One coverage byte per pixel in a flat array indexed by `x - min_x`, with
//! spans pointing into it. Adjacent cells merge into a single span.

/// A horizontal run of pixels within one scanline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Span {
    pub x: i32,
    pub len: i32,
    pub cover_offset: usize,
}

/// Per-pixel 8-bit coverage for one row.
///
/// Protocol: `reset(min_x, max_x)` once per shape, then for each row
/// `reset_spans`, `add_cell`/`add_span` with increasing x, `finalize(y)`.
pub struct ScanlineU8 {
    min_x: i32,
    last_x: i32,
    y: i32,
    covers: Vec<u8>,
    spans: Vec<Span>,
}

const NO_LAST_X: i32 = 0x7FFF_FFF0;

impl ScanlineU8 {
    pub fn new() -> Self {
        Self {
            min_x: 0,
            last_x: NO_LAST_X,
            y: 0,
            covers: Vec::new(),
            spans: Vec::new(),
        }
    }

    /// Size the cover buffer for x in `min_x..=max_x`.
    pub fn reset(&mut self, min_x: i32, max_x: i32) {
        let len = (max_x - min_x + 2).max(0) as usize;
        if len > self.covers.len() {
            self.covers.resize(len, 0);
        }
        self.min_x = min_x;
        self.reset_spans();
    }

    pub fn reset_spans(&mut self) {
        self.last_x = NO_LAST_X;
        self.spans.clear();
    }

    pub fn add_cell(&mut self, x: i32, cover: u32) {
        let xi = (x - self.min_x) as usize;
        self.covers[xi] = cover as u8;
        self.push_run(x, xi, 1);
    }

    pub fn add_span(&mut self, x: i32, len: u32, cover: u32) {
        let xi = (x - self.min_x) as usize;
        self.covers[xi..xi + len as usize].fill(cover as u8);
        self.push_run(x, xi, len as i32);
    }

    fn push_run(&mut self, x: i32, xi: usize, len: i32) {
        match self.spans.last_mut() {
            Some(span) if xi as i32 == self.last_x + 1 => span.len += len,
            _ => self.spans.push(Span {
                x,
                len,
                cover_offset: xi,
            }),
        }
        self.last_x = xi as i32 + len - 1;
    }

    pub fn finalize(&mut self, y: i32) {
        self.y = y;
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn covers(&self) -> &[u8] {
        &self.covers
    }

    /// Coverage bytes of one span.
    pub fn span_covers(&self, span: &Span) -> &[u8] {
        &self.covers[span.cover_offset..span.cover_offset + span.len as usize]
    }
}

impl Default for ScanlineU8 {
    fn default() -> Self {
        Self::new()
    }
}
