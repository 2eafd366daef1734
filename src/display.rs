/// Terminal presentation of a composed canvas.
///
/// The composed `Canvas` is presented with half-block glyphs: every cell
/// shows two stacked pixels, top as foreground and bottom as background.
/// Each of those pixels covers `scale`×`scale` logical pixels of the canvas.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use image::Rgba;
use unhappy_reptiles::audio::Cue;
use unhappy_reptiles::canvas::Canvas;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::Yellow;
const C_HUD_BG: Color = Color::Black;
const C_HINT: Color = Color::DarkGrey;

const HALF_BLOCK: char = '▀';
const BELL: &str = "\x07";
const HINT: &str = "CLICK : Shoot   Q : Quit";

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Logical playfield size for a terminal of `cols`×`rows` cells.  The last
/// row is kept for the controls hint.
pub fn logical_size(cols: u16, rows: u16, scale: u16) -> (i32, i32) {
    let scale = scale.max(1) as i32;
    let play_rows = rows.saturating_sub(1).max(1) as i32;
    ((cols.max(1) as i32) * scale, play_rows * 2 * scale)
}

/// Centre of a terminal cell in logical pixels.
pub fn cell_to_logical(col: u16, row: u16, scale: u16) -> (i32, i32) {
    let scale = scale.max(1) as i32;
    (col as i32 * scale + scale / 2, row as i32 * 2 * scale + scale)
}

fn sample(canvas: &Canvas, col: u32, half_row: u32, scale: u32) -> Color {
    let x = (col * scale + scale / 2).min(canvas.width() - 1);
    let y = (half_row * scale + scale / 2).min(canvas.height() - 1);
    let Rgba([r, g, b, _]) = *canvas.pixels().get_pixel(x, y);
    Color::Rgb { r, g, b }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Present one composed frame, then ring the bell for any shot cue.
pub fn render<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    scale: u16,
    cues: impl IntoIterator<Item = Cue>,
) -> std::io::Result<()> {
    let scale = scale.max(1) as u32;
    let cols = canvas.width() / scale;
    let rows = canvas.height() / (2 * scale);

    draw_pixels(out, canvas, scale, cols, rows)?;
    draw_text(out, canvas, scale, cols, rows)?;
    draw_controls_hint(out, rows)?;

    for cue in cues {
        if cue == Cue::Shot {
            out.queue(Print(BELL))?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows as u16))?;
    out.flush()?;
    Ok(())
}

pub fn clear<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.flush()
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_pixels<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    scale: u32,
    cols: u32,
    rows: u32,
) -> std::io::Result<()> {
    for row in 0..rows {
        out.queue(cursor::MoveTo(0, row as u16))?;
        // Only emit colour changes; most neighbouring cells share colours.
        let mut fg = None;
        let mut bg = None;
        for col in 0..cols {
            let top = sample(canvas, col, row * 2, scale);
            let bottom = sample(canvas, col, row * 2 + 1, scale);
            if fg != Some(top) {
                out.queue(style::SetForegroundColor(top))?;
                fg = Some(top);
            }
            if bg != Some(bottom) {
                out.queue(style::SetBackgroundColor(bottom))?;
                bg = Some(bottom);
            }
            out.queue(Print(HALF_BLOCK))?;
        }
    }
    Ok(())
}

// ── HUD text ──────────────────────────────────────────────────────────────────

fn draw_text<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    scale: u32,
    cols: u32,
    rows: u32,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(style::SetBackgroundColor(C_HUD_BG))?;
    for run in canvas.text_runs() {
        let col = (run.x.max(0) as u32) / scale;
        let row = (run.y.max(0) as u32) / (2 * scale);
        if col >= cols || row >= rows {
            continue;
        }
        let room = (cols - col) as usize;
        let text: String = run.text.chars().take(room).collect();
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, row: u32) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(1, row as u16))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(HINT))?;
    Ok(())
}
