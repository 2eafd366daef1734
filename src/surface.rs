/// The renderer contract the game draws through.
///
/// Entities only ever issue draw-image, draw-string and transform calls;
/// rasterization belongs to whatever implements `Surface`.

use image::{Rgb, Rgba, RgbaImage};

/// Optional per-draw rules.  Currently only a colour-key range: pixels whose
/// every channel lies inside `[low, high]` are not painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageAttributes {
    pub key_low: Rgb<u8>,
    pub key_high: Rgb<u8>,
}

impl ImageAttributes {
    pub fn color_key(low: Rgb<u8>, high: Rgb<u8>) -> Self {
        Self {
            key_low: low,
            key_high: high,
        }
    }

    pub fn is_keyed(&self, pixel: &Rgba<u8>) -> bool {
        (0..3).all(|c| pixel[c] >= self.key_low[c] && pixel[c] <= self.key_high[c])
    }
}

pub trait Surface {
    /// Draw `image` with its top-left corner at `(x, y)`, through the
    /// current transform.
    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32, attributes: Option<&ImageAttributes>);

    fn draw_string(&mut self, text: &str, x: i32, y: i32);

    /// Prepend a clockwise rotation of `degrees` about `origin` to the
    /// current transform.
    fn rotate_at(&mut self, degrees: f32, origin: (f32, f32));

    fn reset_transform(&mut self);
}
