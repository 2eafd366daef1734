/// The image primitive: a named sprite that can be moved, resized and
/// rotated without degrading its source pixels.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgb, Rgba, RgbaImage};

use crate::error::ResourceLoadError;
use crate::surface::{ImageAttributes, Surface};

/// How the arguments to [`BitmapImage::resize`] are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleMode {
    /// Arguments are the new width and height in pixels.
    Exact,
    /// Arguments are factors applied to the original dimensions.
    Scaled,
}

/// Normalize any integer angle into `[0, 360)`.
pub fn normalize_degrees(degrees: i32) -> i32 {
    if degrees < 0 {
        // 360 - 0 would escape the range for exact negative multiples.
        (360 - (degrees.unsigned_abs() % 360) as i32) % 360
    } else {
        degrees % 360
    }
}

#[derive(Clone, Debug)]
pub struct BitmapImage {
    name: String,
    path: Option<PathBuf>,
    x: i32,
    y: i32,
    rotation: i32,
    /// Quality reference every resize starts from.
    original: RgbaImage,
    /// What actually gets drawn.
    working: RgbaImage,
}

impl BitmapImage {
    /// Decode the image at `path`.
    pub fn load(path: impl AsRef<Path>, name: impl Into<String>) -> Result<Self, ResourceLoadError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ResourceLoadError::Missing {
                path: path.to_path_buf(),
            });
        }
        let decoded = image::open(path).map_err(|source| ResourceLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let mut bitmap = Self::from_rgba(name, decoded.to_rgba8());
        bitmap.path = Some(path.to_path_buf());
        Ok(bitmap)
    }

    /// Wrap an in-memory buffer.  Zero-sized buffers are grown to 1×1.
    pub fn from_rgba(name: impl Into<String>, pixels: RgbaImage) -> Self {
        let pixels = if pixels.width() == 0 || pixels.height() == 0 {
            RgbaImage::new(1, 1)
        } else {
            pixels
        };
        Self {
            name: name.into(),
            path: None,
            x: 0,
            y: 0,
            rotation: 0,
            working: pixels.clone(),
            original: pixels,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// File the image was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.working.width()
    }

    pub fn height(&self) -> u32 {
        self.working.height()
    }

    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.working
    }

    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    // ── Operations ────────────────────────────────────────────────────────────

    /// Regenerate the working buffer from the original at the requested size.
    pub fn resize(&mut self, width: f64, height: f64, mode: ScaleMode) {
        let (new_w, new_h) = match mode {
            ScaleMode::Exact => (width, height),
            ScaleMode::Scaled => (
                self.original.width() as f64 * width,
                self.original.height() as f64 * height,
            ),
        };
        let new_w = (new_w.round().max(1.0)) as u32;
        let new_h = (new_h.round().max(1.0)) as u32;

        // Nearest keeps exact colours so colour keys still match after scaling.
        self.working = imageops::resize(&self.original, new_w, new_h, FilterType::Nearest);
    }

    pub fn rotate(&mut self, degrees: i32) {
        self.rotation = normalize_degrees(degrees);
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Make every working pixel whose RGB equals `color` fully transparent.
    pub fn remove_chroma_key(&mut self, color: Rgb<u8>) {
        for px in self.working.pixels_mut() {
            if px[0] == color[0] && px[1] == color[1] && px[2] == color[2] {
                *px = Rgba([255, 255, 255, 0]);
            }
        }
    }

    /// Adopt the working buffer, at its current size, as the new original.
    pub fn commit_as_original(&mut self) {
        self.original = self.working.clone();
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, attributes: Option<&ImageAttributes>) {
        if self.rotation != 0 {
            let origin = (
                self.x as f32 + self.width() as f32 / 2.0,
                self.y as f32 + self.height() as f32 / 2.0,
            );
            surface.rotate_at(self.rotation as f32, origin);
        }
        surface.draw_image(&self.working, self.x, self.y, attributes);
        if self.rotation != 0 {
            surface.reset_transform();
        }
    }
}
