/// Software `Surface`: an RGBA framebuffer with an affine transform.
///
/// Text is not rasterized; `draw_string` records a `TextRun` that the
/// presenter overlays in whatever font the output device has.

use image::{Rgba, RgbaImage};

use crate::surface::{ImageAttributes, Surface};

// ── Transform ─────────────────────────────────────────────────────────────────

/// Row-vector affine map: `(x, y) -> (a·x + c·y + tx, b·x + d·y + ty)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Clockwise on screen (y grows downward).
    pub fn rotation_about(degrees: f32, origin: (f32, f32)) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (ox, oy) = origin;
        Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: ox - cos * ox + sin * oy,
            ty: oy - sin * ox - cos * oy,
        }
    }

    /// The map that applies `self` first, then `next`.
    pub fn then(&self, next: &Affine) -> Affine {
        Affine {
            a: self.a * next.a + self.b * next.c,
            b: self.a * next.b + self.b * next.d,
            c: self.c * next.a + self.d * next.c,
            d: self.c * next.b + self.d * next.d,
            tx: self.tx * next.a + self.ty * next.c + next.tx,
            ty: self.tx * next.b + self.ty * next.d + next.ty,
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    pub fn inverse(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f32::EPSILON {
            return None;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(Affine {
            a,
            b,
            c,
            d,
            tx: -(self.tx * a + self.ty * c),
            ty: -(self.tx * b + self.ty * d),
        })
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

pub struct Canvas {
    pixels: RgbaImage,
    transform: Affine,
    text: Vec<TextRun>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width.max(1), height.max(1)),
            transform: Affine::IDENTITY,
            text: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn text_runs(&self) -> &[TextRun] {
        &self.text
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Start a new frame: fill with `color`, drop text, reset the transform.
    pub fn begin_frame(&mut self, color: Rgba<u8>) {
        for px in self.pixels.pixels_mut() {
            *px = color;
        }
        self.text.clear();
        self.transform = Affine::IDENTITY;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width.max(1), height.max(1));
        self.text.clear();
    }

    /// Device-space bounding box of `rect` under the current transform,
    /// clipped to the canvas.
    fn device_bounds(&self, x: f32, y: f32, w: f32, h: f32) -> Option<(u32, u32, u32, u32)> {
        let corners = [
            self.transform.apply(x, y),
            self.transform.apply(x + w, y),
            self.transform.apply(x, y + h),
            self.transform.apply(x + w, y + h),
        ];
        let min_x = corners.iter().map(|p| p.0).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);

        let x0 = min_x.floor().max(0.0) as u32;
        let y0 = min_y.floor().max(0.0) as u32;
        let x1 = (max_x.ceil().max(0.0) as u32).min(self.pixels.width());
        let y1 = (max_y.ceil().max(0.0) as u32).min(self.pixels.height());
        if x0 >= x1 || y0 >= y1 {
            None
        } else {
            Some((x0, y0, x1, y1))
        }
    }
}

fn blend(dst: &mut Rgba<u8>, src: &Rgba<u8>) {
    let alpha = src[3] as u32;
    if alpha == 255 {
        *dst = *src;
        return;
    }
    for c in 0..3 {
        dst[c] = ((src[c] as u32 * alpha + dst[c] as u32 * (255 - alpha)) / 255) as u8;
    }
    dst[3] = (alpha + dst[3] as u32 * (255 - alpha) / 255).min(255) as u8;
}

impl Surface for Canvas {
    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32, attributes: Option<&ImageAttributes>) {
        let (iw, ih) = image.dimensions();
        let Some(inverse) = self.transform.inverse() else {
            return;
        };
        let Some((x0, y0, x1, y1)) =
            self.device_bounds(x as f32, y as f32, iw as f32, ih as f32)
        else {
            return;
        };

        for dy in y0..y1 {
            for dx in x0..x1 {
                // Sample at pixel centres.
                let (sx, sy) = inverse.apply(dx as f32 + 0.5, dy as f32 + 0.5);
                let u = (sx - x as f32).floor();
                let v = (sy - y as f32).floor();
                if u < 0.0 || v < 0.0 || u >= iw as f32 || v >= ih as f32 {
                    continue;
                }
                let src = image.get_pixel(u as u32, v as u32);
                if src[3] == 0 {
                    continue;
                }
                if attributes.is_some_and(|a| a.is_keyed(src)) {
                    continue;
                }
                blend(self.pixels.get_pixel_mut(dx, dy), src);
            }
        }
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32) {
        self.text.push(TextRun {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn rotate_at(&mut self, degrees: f32, origin: (f32, f32)) {
        self.transform = Affine::rotation_about(degrees, origin).then(&self.transform);
    }

    fn reset_transform(&mut self) {
        self.transform = Affine::IDENTITY;
    }
}
