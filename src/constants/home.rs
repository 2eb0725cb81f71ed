use ratatui::style::Color;

pub const TITLE_COLOR: Color = Color::LightYellow;
pub const SELECTED_COLOR: Color = Color::Cyan;
pub const OPTION_PADDING: usize = 2;

pub const HINT_TEXT: &str = "up/down to choose, enter to play, h for help";
