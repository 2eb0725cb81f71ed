use color_eyre::eyre::Result;
use crossterm::event::MouseEvent;
use ratatui::{layout::Rect, Frame};
use serde::Deserialize;
use strum::Display;

use crate::{action::Action, config::Config, tui::Event};

pub mod game;
pub mod home;

/// Pages double as key binding scopes under `keybindings.pages`.
#[derive(Debug, Deserialize, Hash, Eq, PartialEq, Clone, Copy, Display)]
pub enum PageId {
    Home,
    Game,
}

/// A full-screen view. Key presses reach a page as bound actions through
/// `update`; only raw mouse input arrives through `handle_events`.
pub trait Page {
    fn id(&self) -> PageId;

    #[allow(unused_variables)]
    fn register_config_handler(&mut self, config: &Config) -> Result<()> {
        Ok(())
    }

    fn handle_events(&mut self, event: &Event) -> Result<Option<Action>> {
        match event {
            Event::Mouse(mouse_event) => self.handle_mouse_events(*mouse_event),
            _ => Ok(None),
        }
    }

    #[allow(unused_variables)]
    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    #[allow(unused_variables)]
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()>;
}
