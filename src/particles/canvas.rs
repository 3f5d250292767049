#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn white(a: f64) -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            a,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotStyle {
    pub fill: Rgba,
    pub glow_blur: f64,
    pub glow_color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub width: f64,
}

/// 2-D drawing surface the particle field paints onto.
pub trait Canvas {
    fn resize(&mut self, width: f64, height: f64);

    fn clear(&mut self);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, style: &DotStyle);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), style: &LineStyle);
}
