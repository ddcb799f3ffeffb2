use crate::game::{Game, Lifecycle};
use crate::grid::Grid;
use crate::pos::{Dir, Pos};

type Rgba = (u8, u8, u8, u8);

const BACKGROUND: Rgba = (20, 20, 30, 255);
const CHECKER: Rgba = (25, 25, 35, 255);
const TARGET: Rgba = (220, 50, 50, 255);
const HEAD: Rgba = (100, 255, 100, 255);
const EYE: Rgba = (0, 0, 0, 255);
const PANEL: Rgba = (0, 0, 0, 170);
const LOST_TEXT: Rgba = (255, 100, 100, 255);
const WON_TEXT: Rgba = (120, 255, 120, 255);
const HINT_TEXT: Rgba = (200, 200, 200, 255);

const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;

/// Paints a [`Game`] into an RGBA frame buffer of `frame_size()` pixels.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    cell: u32,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(grid: Grid, cell_size: u32) -> Self {
        Self {
            cell: cell_size,
            width: u32::from(grid.width()) * cell_size,
            height: u32::from(grid.height()) * cell_size,
        }
    }

    pub fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn draw(&self, game: &Game, frame: &mut [u8]) {
        for px in frame.chunks_exact_mut(4) {
            px.copy_from_slice(&[BACKGROUND.0, BACKGROUND.1, BACKGROUND.2, BACKGROUND.3]);
        }
        let (cols, rows) = (self.width / self.cell, self.height / self.cell);
        for y in 0..rows {
            for x in 0..cols {
                if (x + y) % 2 == 0 {
                    self.fill_cell(frame, x, y, CHECKER);
                }
            }
        }

        let target = game.target();
        self.fill_cell(frame, u32::from(target.x), u32::from(target.y), TARGET);

        // Brightest next to the head, fading towards the tail.
        let snake = game.snake();
        let len = snake.len();
        for (k, p) in snake.body().enumerate() {
            let from_head = len - 1 - k;
            if from_head == 0 {
                continue;
            }
            let green = 200 - (from_head * 10).min(100) as u8;
            self.fill_cell(frame, u32::from(p.x), u32::from(p.y), (50, green, 50, 255));
        }
        let head = snake.head();
        self.fill_cell(frame, u32::from(head.x), u32::from(head.y), HEAD);
        self.draw_eyes(frame, head, snake.dir());

        match game.lifecycle() {
            Lifecycle::GameOver => self.draw_banner(frame, "GAME OVER", LOST_TEXT),
            Lifecycle::Won => self.draw_banner(frame, "YOU WON", WON_TEXT),
            Lifecycle::Running | Lifecycle::Stopped => {}
        }
    }

    fn draw_eyes(&self, frame: &mut [u8], head: Pos, dir: Dir) {
        let base_x = u32::from(head.x) * self.cell;
        let base_y = u32::from(head.y) * self.cell;
        let size = (self.cell / 8).max(1);
        let near = self.cell / 4;
        let far = self.cell.saturating_sub(near + size);

        let eyes = match dir {
            Dir::Right => [(far, near), (far, far)],
            Dir::Left => [(near, near), (near, far)],
            Dir::Up => [(near, near), (far, near)],
            Dir::Down => [(near, far), (far, far)],
        };
        for (ex, ey) in eyes {
            self.fill_rect(frame, base_x + ex, base_y + ey, size, size, EYE);
        }
    }

    fn draw_banner(&self, frame: &mut [u8], title: &str, color: Rgba) {
        let hint = "PRESS ANY KEY";
        let widest = title.len().max(hint.len()) as u32;
        let scale = if text_width(widest, 2) + 8 <= self.width { 2 } else { 1 };
        let line_h = GLYPH_H * scale;
        let gap = 2 * scale;

        let panel_w = (text_width(widest, scale) + 8 * scale).min(self.width);
        let panel_h = 2 * line_h + gap + 8 * scale;
        let panel_x = (self.width.saturating_sub(panel_w)) / 2;
        let panel_y = (self.height.saturating_sub(panel_h)) / 2;
        self.fill_rect(frame, panel_x, panel_y, panel_w, panel_h, PANEL);

        let top = panel_y + 4 * scale;
        self.draw_centered(frame, title, top, scale, color);
        self.draw_centered(frame, hint, top + line_h + gap, scale, HINT_TEXT);
    }

    fn draw_centered(&self, frame: &mut [u8], text: &str, y: u32, scale: u32, color: Rgba) {
        let w = text_width(text.chars().count() as u32, scale);
        let mut x = self.width.saturating_sub(w) / 2;
        for ch in text.chars() {
            self.draw_char(frame, ch, x, y, scale, color);
            x += (GLYPH_W + 1) * scale;
        }
    }

    fn draw_char(&self, frame: &mut [u8], ch: char, x: u32, y: u32, scale: u32, color: Rgba) {
        let Some(rows) = glyph_5x7(ch) else {
            return;
        };
        for (ry, row) in rows.iter().enumerate() {
            for rx in 0..GLYPH_W {
                if (row >> (GLYPH_W - 1 - rx)) & 1 == 1 {
                    let px = x + rx * scale;
                    let py = y + ry as u32 * scale;
                    self.fill_rect(frame, px, py, scale, scale, color);
                }
            }
        }
    }

    fn fill_cell(&self, frame: &mut [u8], gx: u32, gy: u32, color: Rgba) {
        self.fill_rect(frame, gx * self.cell, gy * self.cell, self.cell, self.cell, color);
    }

    fn fill_rect(&self, frame: &mut [u8], x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x2 = (x + w).min(self.width);
        let y2 = (y + h).min(self.height);
        for py in y..y2 {
            for px in x..x2 {
                self.blend_pixel(frame, px, py, color);
            }
        }
    }

    fn blend_pixel(&self, frame: &mut [u8], x: u32, y: u32, (r, g, b, a): Rgba) {
        let idx = ((y * self.width + x) * 4) as usize;
        let Some(px) = frame.get_mut(idx..idx + 4) else {
            return;
        };
        let a = u16::from(a);
        let inv = 255 - a;
        for (dst, src) in px.iter_mut().zip([r, g, b]) {
            *dst = ((u16::from(src) * a + u16::from(*dst) * inv) / 255) as u8;
        }
        px[3] = 255;
    }
}

fn text_width(chars: u32, scale: u32) -> u32 {
    (chars * (GLYPH_W + 1)).saturating_sub(1) * scale
}

/// Only the letters the banners use.
fn glyph_5x7(ch: char) -> Option<[u8; 7]> {
    Some(match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'E' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b11111],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        _ => return None,
    })
}
