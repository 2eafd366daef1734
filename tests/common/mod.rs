#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use unhappy_reptiles::bitmap::BitmapImage;
use unhappy_reptiles::composite::CompositeImage;
use unhappy_reptiles::surface::{ImageAttributes, Surface};

/// One call made against a `RecordingSurface`.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Image {
        width: u32,
        height: u32,
        x: i32,
        y: i32,
        keyed: bool,
        /// Rotation in effect when the image was drawn.
        rotation: Option<f32>,
    },
    Text(String, i32, i32),
    RotateAt(f32, (f32, f32)),
    Reset,
}

/// Records draw calls instead of rasterizing.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
    rotation: Option<f32>,
}

impl RecordingSurface {
    pub fn images(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Image { .. }))
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(t, _, _) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32, attributes: Option<&ImageAttributes>) {
        self.calls.push(Call::Image {
            width: image.width(),
            height: image.height(),
            x,
            y,
            keyed: attributes.is_some(),
            rotation: self.rotation,
        });
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32) {
        self.calls.push(Call::Text(text.to_string(), x, y));
    }

    fn rotate_at(&mut self, degrees: f32, origin: (f32, f32)) {
        self.rotation = Some(self.rotation.unwrap_or(0.0) + degrees);
        self.calls.push(Call::RotateAt(degrees, origin));
    }

    fn reset_transform(&mut self) {
        self.rotation = None;
        self.calls.push(Call::Reset);
    }
}

pub fn solid(name: &str, width: u32, height: u32) -> BitmapImage {
    BitmapImage::from_rgba(name, RgbaImage::from_pixel(width, height, Rgba([200, 50, 50, 255])))
}

/// A creature-sized composite with every frame name the creature uses.
pub fn creature_sprite(width: u32, height: u32) -> CompositeImage {
    let mut sprite = CompositeImage::new();
    for k in 0..6 {
        sprite.add_image(solid(&format!("flap{k}"), width, height));
    }
    sprite.add_image(solid("dead", width, height));
    sprite
}
