use ratatui::style::Color;

pub const DAY_COLOR: Color = Color::Rgb(78, 192, 202);
pub const NIGHT_COLOR: Color = Color::Rgb(16, 22, 48);

pub const NIGHT_STARS: [char; 3] = ['.', '+', '*'];
pub const NIGHT_STAR_COLOR: Color = Color::Rgb(230, 230, 190);

// Share of night-sky cells holding a star.
pub const STAR_DENSITY: f32 = 1.0 / 40.0;
// Twinkle updates per second.
pub const TWINKLE_RATE: f32 = 3.0;
