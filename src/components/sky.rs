use std::time::{Duration, Instant};

use rand::prelude::*;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::StatefulWidget,
};

use crate::{constants::sky, pages::game::session::Backdrop};

/// Night-sky stars, one optional glyph index per cell.
#[derive(Debug, Clone)]
pub struct SkyState {
    density: f32,
    twinkle_interval: Duration,
    last_twinkle: Option<Instant>,
    stars: Vec<Vec<Option<usize>>>,
    width: usize,
    height: usize,
}

impl Default for SkyState {
    fn default() -> Self {
        SkyState::new(sky::STAR_DENSITY, sky::TWINKLE_RATE)
    }
}

impl SkyState {
    pub fn new(density: f32, twinkle_rate: f32) -> Self {
        Self {
            density,
            twinkle_interval: Duration::from_secs_f32(1.0 / twinkle_rate),
            last_twinkle: None,
            stars: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let u: f32 = rng.gen();
        if u < self.density {
            Some(rng.gen_range(0..sky::NIGHT_STARS.len()))
        } else {
            None
        }
    }

    fn resize<R: Rng>(&mut self, area: Rect, rng: &mut R) {
        let width = area.width as usize;
        let height = area.height as usize;
        if width == self.width && height == self.height {
            return;
        }

        for row in self.stars.iter_mut() {
            row.truncate(width);
        }
        for row in 0..self.stars.len() {
            while self.stars[row].len() < width {
                let star = self.sample(rng);
                self.stars[row].push(star);
            }
        }
        self.stars.truncate(height);
        while self.stars.len() < height {
            let row = (0..width).map(|_| self.sample(rng)).collect();
            self.stars.push(row);
        }

        self.width = width;
        self.height = height;
    }

    // Re-rolls one cell per row.
    fn twinkle<R: Rng>(&mut self, now: Instant, rng: &mut R) {
        if self.last_twinkle.is_some_and(|last| now.saturating_duration_since(last) < self.twinkle_interval) {
            return;
        }
        self.last_twinkle = Some(now);
        if self.width == 0 {
            return;
        }
        for row in 0..self.stars.len() {
            let column = rng.gen_range(0..self.width);
            self.stars[row][column] = self.sample(rng);
        }
    }

    pub fn update<R: Rng>(&mut self, area: Rect, now: Instant, rng: &mut R) {
        self.resize(area, rng);
        self.twinkle(now, rng);
    }

    #[cfg(test)]
    pub fn star_count(&self) -> usize {
        self.stars.iter().flatten().filter(|star| star.is_some()).count()
    }
}

/// Day or night backdrop filling the whole play area.
#[derive(Debug)]
pub struct Sky {
    backdrop: Backdrop,
}

impl Sky {
    pub fn new(backdrop: Backdrop) -> Self {
        Self { backdrop }
    }

    pub fn color(&self) -> Color {
        match self.backdrop {
            Backdrop::Day => sky::DAY_COLOR,
            Backdrop::Night => sky::NIGHT_COLOR,
        }
    }
}

impl StatefulWidget for Sky {
    type State = SkyState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut SkyState)
    where
        Self: Sized,
    {
        buf.set_style(area, Style::default().bg(self.color()));
        if self.backdrop == Backdrop::Day {
            return;
        }

        state.update(area, Instant::now(), &mut thread_rng());
        for (row, stars) in state.stars.iter().enumerate() {
            for (column, star) in stars.iter().enumerate() {
                let Some(index) = star else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + column as u16, area.y + row as u16)) {
                    cell.set_char(sky::NIGHT_STARS[*index]).set_fg(sky::NIGHT_STAR_COLOR);
                }
            }
        }
    }
}
