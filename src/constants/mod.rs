pub mod game;
pub mod home;
pub mod sky;

// Outer frame, including the rounded border.
pub const WIDTH: u16 = 64;
pub const HEIGHT: u16 = 40;

pub const TITLE_TEXT: &str = r#"
 ___ _          _  _
/ __| |___  _  | || |___ _ __ _ __  ___ _ _
\__ \ / / || | | __ / _ \ '_ \ '_ \/ -_) '_|
|___/_\_\\_, | |_||_\___/ .__/ .__/\___|_|
         |__/           |_|  |_|
"#;
