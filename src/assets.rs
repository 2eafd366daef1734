/// Sprite loading.
///
/// Every sprite is looked up in the asset directory first.  A missing or
/// unreadable file is not fatal: a procedurally drawn stand-in takes its
/// place and a warning is logged, so the game always starts.

use std::path::Path;

use image::{Rgb, Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::bitmap::BitmapImage;
use crate::composite::CompositeImage;

/// Sprite background colour baked into the original art.
pub const CHROMA_KEY: Rgb<u8> = Rgb([0, 155, 0]);
/// Fill used by the placeholder scenery for "see-through" areas; it sits
/// inside the background's draw-time colour-key range.
const SCENERY_KEY: Rgba<u8> = Rgba([0, 200, 0, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Reference resolution the placeholder scenery is painted at.
const SCENE_W: u32 = 640;
const SCENE_H: u32 = 400;

#[derive(Clone, Debug)]
pub struct SpriteSet {
    pub background: CompositeImage,
    pub slingshot: CompositeImage,
    pub creature: CompositeImage,
    pub block: BitmapImage,
    pub flash: BitmapImage,
}

impl SpriteSet {
    pub fn load(dir: &Path) -> Self {
        let mut background = CompositeImage::new();
        background.add_image(scenery(dir, "background.bmp", "back", paint_sky));
        background.add_image(scenery(dir, "midground.bmp", "mid", paint_hills));
        background.add_image(scenery(dir, "foreground.bmp", "fore", paint_ground));

        let mut slingshot = CompositeImage::new();
        slingshot.add_image(sprite(dir, "slingshot2.png", "slingBack", || {
            paint_slingshot(Rgba([92, 58, 30, 255]))
        }));
        slingshot.add_image(sprite(dir, "slingshot1.png", "slingFore", || {
            paint_slingshot(Rgba([140, 94, 52, 255]))
        }));
        slingshot.add_image(sprite(dir, "cross.png", "cross", paint_cross));

        let mut creature = CompositeImage::new();
        for k in 0..6 {
            let file = format!("flap{k}.png");
            let name = format!("flap{k}");
            creature.add_image(sprite(dir, &file, &name, || paint_reptile(k, false)));
        }
        creature.add_image(sprite(dir, "dead.png", "dead", || paint_reptile(5, true)));

        Self {
            background,
            slingshot,
            creature,
            block: sprite(dir, "box.png", "box", paint_box),
            flash: sprite(dir, "flash.png", "flash", paint_flash),
        }
    }

    /// The full set without touching the filesystem.
    pub fn placeholders() -> Self {
        Self::load(Path::new(""))
    }
}

/// Load a scenery layer as-is; keying happens at draw time.
fn scenery(dir: &Path, file: &str, name: &str, fallback: impl FnOnce() -> RgbaImage) -> BitmapImage {
    load_or(dir, file, name, fallback)
}

/// Load a sprite and bake its chroma-key background into transparency.
fn sprite(dir: &Path, file: &str, name: &str, fallback: impl FnOnce() -> RgbaImage) -> BitmapImage {
    let mut image = load_or(dir, file, name, fallback);
    image.remove_chroma_key(CHROMA_KEY);
    image.commit_as_original();
    image
}

fn load_or(dir: &Path, file: &str, name: &str, fallback: impl FnOnce() -> RgbaImage) -> BitmapImage {
    if dir.as_os_str().is_empty() {
        return BitmapImage::from_rgba(name, fallback());
    }
    match BitmapImage::load(dir.join(file), name) {
        Ok(image) => {
            debug!(file, name, "loaded sprite");
            image
        }
        Err(e) => {
            warn!(error = %e, name, "using placeholder sprite");
            BitmapImage::from_rgba(name, fallback())
        }
    }
}

// ── Placeholder art ───────────────────────────────────────────────────────────

fn paint_sky() -> RgbaImage {
    RgbaImage::from_fn(SCENE_W, SCENE_H, |_, y| {
        let t = y as f32 / SCENE_H as f32;
        Rgba([
            (110.0 + 90.0 * t) as u8,
            (170.0 + 60.0 * t) as u8,
            (235.0 + 15.0 * t) as u8,
            255,
        ])
    })
}

fn paint_hills() -> RgbaImage {
    RgbaImage::from_fn(SCENE_W, SCENE_H, |x, y| {
        let ridge = 250.0 + 35.0 * (x as f32 / 70.0).sin() + 15.0 * (x as f32 / 23.0).cos();
        if (y as f32) > ridge {
            Rgba([46, 104, 58, 255])
        } else {
            SCENERY_KEY
        }
    })
}

fn paint_ground() -> RgbaImage {
    let grass = (SCENE_H as f32 * 0.93) as u32;
    RgbaImage::from_fn(SCENE_W, SCENE_H, |_, y| {
        if y > grass + 4 {
            Rgba([122, 84, 48, 255])
        } else if y > grass {
            Rgba([70, 140, 40, 255])
        } else {
            SCENERY_KEY
        }
    })
}

fn paint_slingshot(wood: Rgba<u8>) -> RgbaImage {
    const W: u32 = 30;
    const H: u32 = 60;
    RgbaImage::from_fn(W, H, |x, y| {
        let (x, y) = (x as i32, y as i32);
        let handle = (13..=16).contains(&x) && y >= 30;
        let left_fork = y >= 10 && y < 32 && (x - (3 + (y - 10) / 2)).abs() <= 1;
        let right_fork = y >= 10 && y < 32 && (x - (26 - (y - 10) / 2)).abs() <= 1;
        if handle || left_fork || right_fork {
            wood
        } else {
            CLEAR
        }
    })
}

/// Crosshair centred 15 px below the top edge, where the pointer sits.
fn paint_cross() -> RgbaImage {
    RgbaImage::from_fn(30, 30, |x, y| {
        let (dx, dy) = (x as i32 - 15, y as i32 - 15);
        let arm = (dx == 0 && dy.abs() <= 6) || (dy == 0 && dx.abs() <= 6);
        if arm && (dx.abs() > 1 || dy.abs() > 1) {
            Rgba([220, 30, 30, 255])
        } else {
            CLEAR
        }
    })
}

/// Wing tip height sweeps from high (`k = 0`) to low (`k = 5`).
fn paint_reptile(k: u32, dead: bool) -> RgbaImage {
    const W: u32 = 64;
    const H: u32 = 48;
    let body = if dead {
        Rgba([120, 120, 110, 255])
    } else {
        Rgba([150, 110, 60, 255])
    };
    let wing = if dead {
        Rgba([90, 90, 85, 255])
    } else {
        Rgba([190, 70, 50, 255])
    };
    let tip_y = 4.0 + k as f32 * 7.0;

    RgbaImage::from_fn(W, H, |x, y| {
        let (fx, fy) = (x as f32, y as f32);
        let in_body = ((fx - 30.0) / 16.0).powi(2) + ((fy - 28.0) / 8.0).powi(2) <= 1.0;
        let in_head = (fx - 50.0).powi(2) + (fy - 22.0).powi(2) <= 36.0;
        let in_beak = (56.0..=63.0).contains(&fx) && (fy - 23.0).abs() <= (63.0 - fx) / 3.0;
        // Wing: a wedge from the shoulder (x 20..40, y 26) out to the tip row.
        let reach = (fx - 20.0) / 20.0;
        let wing_edge = 26.0 + (tip_y - 26.0) * (1.0 - (reach - 0.5).abs() * 2.0).max(0.0);
        let in_wing = (20.0..=40.0).contains(&fx)
            && fy >= wing_edge.min(26.0)
            && fy <= wing_edge.max(26.0);
        let in_eye = !dead && (fx - 52.0).abs() <= 1.0 && (fy - 20.0).abs() <= 1.0;

        if in_eye {
            Rgba([20, 20, 20, 255])
        } else if in_wing {
            wing
        } else if in_body || in_head || in_beak {
            body
        } else {
            CLEAR
        }
    })
}

fn paint_box() -> RgbaImage {
    const S: u32 = 40;
    RgbaImage::from_fn(S, S, |x, y| {
        let edge = x < 3 || y < 3 || x >= S - 3 || y >= S - 3;
        let brace = (x as i32 - y as i32).abs() <= 1;
        if edge || brace {
            Rgba([101, 67, 33, 255])
        } else {
            Rgba([181, 136, 84, 255])
        }
    })
}

fn paint_flash() -> RgbaImage {
    RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 150]))
}
