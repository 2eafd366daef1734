/// Frame compositing: paints one tick's state onto a `Surface`, back to front.

use image::Rgb;

use crate::entities::GameState;
use crate::surface::{ImageAttributes, Surface};

/// Green range the scenery layers treat as see-through.
pub fn scenery_key() -> ImageAttributes {
    ImageAttributes::color_key(Rgb([0, 155, 0]), Rgb([100, 255, 100]))
}

/// Layers: scenery, boxes, creature frame, slingshot, hit flash, score text.
///
/// Consumes the creature's one-frame hit flag, so the flash is shown once.
pub fn compose_frame<S: Surface + ?Sized>(state: &mut GameState, surface: &mut S) {
    let key = scenery_key();
    state.background.draw(surface, Some(&key));

    for block in &state.blocks {
        block.draw(surface);
    }

    state.creature.draw(surface);
    state.slingshot.draw(surface, None);

    if state.creature.take_just_hit() {
        state.flash.draw(surface, None);
    }

    state.scoreboard.draw(surface, state.width);
}
