/// A named group of bitmaps drawn together as one sprite.
///
/// All members share the composite's origin; there are no per-member
/// offsets.  Names are expected to be unique within one composite.

use crate::bitmap::{normalize_degrees, BitmapImage, ScaleMode};
use crate::physics::Rect;
use crate::surface::{ImageAttributes, Surface};

#[derive(Clone, Debug, Default)]
pub struct CompositeImage {
    images: Vec<BitmapImage>,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    rotation: i32,
}

impl CompositeImage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_image(&mut self, mut image: BitmapImage) {
        image.move_to(self.x, self.y);
        self.images.push(image);
        self.recalculate_dimensions();
    }

    /// Remove the first member called `name`, handing it back.
    pub fn remove_image(&mut self, name: &str) -> Option<BitmapImage> {
        let index = self.images.iter().position(|i| i.name() == name)?;
        let removed = self.images.remove(index);
        self.recalculate_dimensions();
        Some(removed)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&BitmapImage> {
        self.images.iter().find(|i| i.name() == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut BitmapImage> {
        self.images.iter_mut().find(|i| i.name() == name)
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        for image in &mut self.images {
            image.move_to(x, y);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64, mode: ScaleMode) {
        for image in &mut self.images {
            image.resize(width, height, mode);
        }
        self.recalculate_dimensions();
    }

    pub fn rotate(&mut self, degrees: i32) {
        self.rotation = normalize_degrees(degrees);
        for image in &mut self.images {
            image.rotate(self.rotation);
        }
    }

    /// Draw every member in insertion order.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, attributes: Option<&ImageAttributes>) {
        for image in &self.images {
            image.draw(surface, attributes);
        }
    }

    /// Draw only the member called `name`.  Returns whether it exists.
    pub fn draw_single<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        name: &str,
        attributes: Option<&ImageAttributes>,
    ) -> bool {
        match self.find_by_name(name) {
            Some(image) => {
                image.draw(surface, attributes);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[BitmapImage] {
        &self.images
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Width of the widest member.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the tallest member.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width as i32, self.height as i32)
    }

    fn recalculate_dimensions(&mut self) {
        self.width = self.images.iter().map(BitmapImage::width).max().unwrap_or(0);
        self.height = self.images.iter().map(BitmapImage::height).max().unwrap_or(0);
    }
}
