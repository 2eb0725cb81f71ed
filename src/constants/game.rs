use std::time::Duration;

use ratatui::style::Color;

// World space, in pixels. Origin top-left, y grows downwards.
pub const WORLD_WIDTH: i32 = 600;
pub const WORLD_HEIGHT: i32 = 750;
pub const GROUND_HEIGHT: i32 = 70;
pub const GROUND_Y: i32 = WORLD_HEIGHT - GROUND_HEIGHT;
pub const CLOUDS_HEIGHT: i32 = 150;

pub const GRAVITY: f32 = 0.5;
pub const TERMINAL_VELOCITY: f32 = 8.0;
pub const CLASSIC_FLAP_VELOCITY: f32 = -10.0;
pub const HOVER_FLAP_VELOCITY: f32 = -5.0;

pub const SCROLL_SPEED: i32 = 4;
pub const GROUND_SCROLL_WRAP: i32 = 35;
pub const GROUND_STRIPE_WIDTH: i32 = 12;

pub const BIRD_SPAWN_X: i32 = 100;
pub const BIRD_SPAWN_Y: i32 = WORLD_HEIGHT / 2;
pub const BIRD_HALF_EXTENT: i32 = 25;

pub const PIPE_WIDTH: i32 = 60;
pub const PIPE_HEIGHT: i32 = 300;
pub const PIPE_GAP: i32 = 250;
pub const PIPE_SPAWN_X: i32 = WORLD_WIDTH;
pub const PIPE_INTERVAL: Duration = Duration::from_millis(1500);
pub const GAP_CENTER_JITTER: i32 = 100;

pub const ITEM_GAP_MARGIN: i32 = 40;
pub const ITEM_CONFLICT_DISTANCE: i32 = 40;
pub const BOMB_SIZE: i32 = 40;
pub const STAR_SIZE: i32 = 30;
pub const EXPLOSION_FRAMES: u32 = 11;

pub const PASS_POINTS: u32 = 1;
pub const STAR_POINTS: u32 = 3;
pub const NIGHT_SCORE: u32 = 10;

pub const SCORE_TEXT_X: i32 = WORLD_WIDTH / 2;
pub const SCORE_TEXT_Y: i32 = 20;

// Without key release reports a held key is only visible through autorepeat:
// the first repeat can take this long to arrive after the press,
pub const KEY_REPEAT_DELAY: Duration = Duration::from_millis(660);
// and later repeats come at least this often.
pub const KEY_REPEAT_GAP: Duration = Duration::from_millis(150);
pub const CUE_DURATION: Duration = Duration::from_millis(600);

pub const BIRD_COLOR: Color = Color::Yellow;
pub const PIPE_COLOR: Color = Color::Green;
pub const BOMB_COLOR: Color = Color::Red;
pub const EXPLOSION_COLOR: Color = Color::LightRed;
pub const STAR_COLOR: Color = Color::LightYellow;
pub const CLOUD_COLOR: Color = Color::White;
pub const GROUND_COLORS: [Color; 2] = [Color::Rgb(222, 216, 149), Color::Rgb(115, 191, 46)];
pub const DAY_TEXT_COLOR: Color = Color::Black;
pub const NIGHT_TEXT_COLOR: Color = Color::White;

pub const IDLE_BANNER: &str = "click or hold space to fly";
pub const GAME_OVER_BANNER: &str = "GAME OVER - click to try again";
