use ratatui::{buffer::Buffer, layout::Rect, style::Color};
use strum::Display;

use crate::{constants::game, pages::game::object::Aabb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Sprite {
    Clouds,
    Bird,
    BirdRising,
    BirdFalling,
    PipeTop,
    PipeBottom,
    Bomb,
    Explosion,
    Star,
    Ground,
}

impl Sprite {
    pub fn glyph(&self) -> &'static str {
        match self {
            Sprite::Clouds => "░",
            Sprite::Bird => "▓",
            Sprite::BirdRising => "▲",
            Sprite::BirdFalling => "▼",
            Sprite::PipeTop | Sprite::PipeBottom => "█",
            Sprite::Bomb => "●",
            Sprite::Explosion => "✸",
            Sprite::Star => "★",
            Sprite::Ground => "█",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Sprite::Clouds => game::CLOUD_COLOR,
            Sprite::Bird | Sprite::BirdRising | Sprite::BirdFalling => game::BIRD_COLOR,
            Sprite::PipeTop | Sprite::PipeBottom => game::PIPE_COLOR,
            Sprite::Bomb => game::BOMB_COLOR,
            Sprite::Explosion => game::EXPLOSION_COLOR,
            Sprite::Star => game::STAR_COLOR,
            Sprite::Ground => game::GROUND_COLORS[0],
        }
    }
}

/// Drawing surface the session paints itself onto, in world coordinates.
pub trait Painter {
    fn draw_sprite(&mut self, sprite: Sprite, bounds: Aabb);

    /// Text centred horizontally on `x`, top row at `y`.
    fn render_text(&mut self, text: &str, x: i32, y: i32, color: Color);
}

/// Scales the 600x750 world onto a terminal area.
pub struct BufferPainter<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> BufferPainter<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        BufferPainter { buf, area }
    }

    fn column(&self, x: i32) -> i32 {
        (x * self.area.width as i32).div_euclid(game::WORLD_WIDTH)
    }

    fn row(&self, y: i32) -> i32 {
        (y * self.area.height as i32).div_euclid(game::WORLD_HEIGHT)
    }

    fn world_x(&self, column: i32) -> i32 {
        if self.area.width == 0 {
            0
        } else {
            column * game::WORLD_WIDTH / self.area.width as i32
        }
    }

    // Columns and rows whose cells overlap `bounds`, clipped to the area.
    fn cells(&self, bounds: Aabb) -> (std::ops::Range<i32>, std::ops::Range<i32>) {
        let ceil_div = |a: i32, b: i32| -((-a).div_euclid(b));
        let width = self.area.width as i32;
        let height = self.area.height as i32;

        let first_col = self.column(bounds.left()).max(0);
        let last_col = ceil_div(bounds.right() * width, game::WORLD_WIDTH).min(width);
        let first_row = self.row(bounds.top()).max(0);
        let last_row = ceil_div(bounds.bottom() * height, game::WORLD_HEIGHT).min(height);

        (first_col..last_col, first_row..last_row)
    }

    fn put(&mut self, column: i32, row: i32, symbol: &str, color: Color) {
        let x = self.area.x as i32 + column;
        let y = self.area.y as i32 + row;
        if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_symbol(symbol).set_fg(color);
            }
        }
    }
}

impl Painter for BufferPainter<'_> {
    fn draw_sprite(&mut self, sprite: Sprite, bounds: Aabb) {
        let (columns, rows) = self.cells(bounds);
        for column in columns {
            let color = match sprite {
                Sprite::Ground => {
                    let stripe = (self.world_x(column) - bounds.left()).div_euclid(game::GROUND_STRIPE_WIDTH);
                    game::GROUND_COLORS[stripe.rem_euclid(2) as usize]
                },
                _ => sprite.color(),
            };
            for row in rows.clone() {
                self.put(column, row, sprite.glyph(), color);
            }
        }
    }

    fn render_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let row = self.row(y);
        if row < 0 || row >= self.area.height as i32 {
            return;
        }
        let start = self.column(x) - text.chars().count() as i32 / 2;
        for (offset, c) in text.chars().enumerate() {
            let column = start + offset as i32;
            if (0..self.area.width as i32).contains(&column) {
                self.put(column, row, c.encode_utf8(&mut [0; 4]), color);
            }
        }
    }
}
