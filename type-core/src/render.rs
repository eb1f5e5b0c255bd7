//! Waveform Rendering
use crate::analyzer;

/// A point in surface coordinates, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// RGBA color, components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0, 1.0]);
    pub const TRANSPARENT: Color = Color([0.0, 0.0, 0.0, 0.0]);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            width: 2.0,
            color: Color([1.0, 1.0, 1.0, 0.1]),
        }
    }
}

/// Something the waveform can be drawn onto
pub trait Surface {
    /// Width and height in surface units
    fn size(&self) -> (f32, f32);

    /// Overwrite the whole surface with `fill`
    fn clear(&mut self, fill: Color);

    /// Draw one connected line through `points`
    fn polyline(&mut self, points: &[Point], stroke: Stroke);
}

/// Size of the waveform surface for a given viewport width
///
/// The surface is wider than the viewport and a quarter as tall as a 16:9 video
/// filling the viewport's width.
pub fn surface_size(viewport_width: f32) -> (f32, f32) {
    const VIDEO_RATIO: f32 = 960.0 / 540.0;

    let video_height = viewport_width / VIDEO_RATIO;

    (1.8 * viewport_width, video_height / 4.0)
}

/// Draws the raw magnitude buffer as a single polyline
#[derive(Debug, Clone)]
pub struct Waveform {
    pub stroke: Stroke,
    pub fill: Color,
    points: Vec<Point>,
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform::new(Stroke::default())
    }
}

impl Waveform {
    pub fn new(stroke: Stroke) -> Waveform {
        Waveform {
            stroke,
            fill: Color::TRANSPARENT,
            points: Vec::new(),
        }
    }

    /// Map `buf` into surface coordinates
    ///
    /// Each sample advances `x` by `width * 2 / len`, so only the first half of the buffer
    /// lands on the surface.  `y` grows downwards with the magnitude.
    pub fn points(&mut self, size: (f32, f32), buf: &[analyzer::Magnitude]) -> &[Point] {
        let (width, height) = size;
        self.points.clear();

        if buf.is_empty() {
            return &self.points;
        }

        let step = width * 2.0 / buf.len() as f32;

        let mut x = 0.0;
        for m in buf.iter() {
            self.points.push(Point {
                x,
                y: *m as f32 / analyzer::MAGNITUDE_MAX * height,
            });
            x += step;
        }

        &self.points
    }

    /// Clear `surface` and draw `buf` onto it
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S, buf: &[analyzer::Magnitude]) {
        let size = surface.size();
        let (fill, stroke) = (self.fill, self.stroke);

        surface.clear(fill);

        let points = self.points(size, buf);
        if !points.is_empty() {
            surface.polyline(points, stroke);
        }
    }
}
