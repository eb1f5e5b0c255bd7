use type_core::render::{Color, Point, Stroke, Surface};

/// Character-cell surface, one unit per cell
#[derive(Debug, Clone)]
pub struct TermSurface {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl TermSurface {
    pub fn new(cols: usize, rows: usize) -> TermSurface {
        TermSurface {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    fn plot(&mut self, x: f32, y: f32, c: char) {
        if x < 0.0 || y < 0.0 {
            return;
        }

        let (col, row) = (x as usize, y as usize);
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = c;
        }
    }

    /// Render the leftmost `cols` columns
    pub fn to_string_cropped(&self, cols: usize) -> String {
        let cols = cols.min(self.cols);
        let mut out = String::with_capacity((cols + 1) * self.rows);

        for row in self.cells.chunks(self.cols) {
            out.extend(row[..cols].iter());
            out.push('\n');
        }

        out
    }
}

fn stroke_char(stroke: Stroke) -> char {
    match stroke.color.0[3] {
        a if a < 0.25 => '.',
        a if a < 0.75 => '+',
        _ => '#',
    }
}

impl Surface for TermSurface {
    fn size(&self) -> (f32, f32) {
        (self.cols as f32, self.rows as f32)
    }

    fn clear(&mut self, fill: Color) {
        let c = if fill.0[3] > 0.5 { '#' } else { ' ' };

        for cell in self.cells.iter_mut() {
            *cell = c;
        }
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        let c = stroke_char(stroke);

        if let [p] = points {
            self.plot(p.x, p.y, c);
        }

        for seg in points.windows(2) {
            let (a, b) = (seg[0], seg[1]);
            let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0) as usize;

            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                self.plot(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t, c);
            }
        }
    }
}
