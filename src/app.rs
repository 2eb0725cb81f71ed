use color_eyre::eyre::{eyre, Result};
use ratatui::{
    layout::{Constraint, Layout, Margin},
    prelude::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
    Frame,
};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    action::{act, Action, ActionState, Command},
    components::help::Help,
    config::Config,
    constants::{HEIGHT, WIDTH},
    pages::{game::rules::Variant, game::GamePage, home::HomePage, Page, PageId},
    tui,
};

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    show_help: bool,
    pages: Vec<Box<dyn Page>>,
    active_page_index: usize,
}

impl App {
    pub fn new(tick_rate: f64, frame_rate: f64, variant: Option<Variant>) -> Result<Self> {
        let mut config = Config::new()?;
        if let Some(variant) = variant {
            config.game.variant = variant;
        }

        let home_page = HomePage::new()?;
        let game_page = GamePage::default();

        Ok(Self {
            tick_rate,
            frame_rate,
            should_quit: false,
            should_suspend: false,
            show_help: false,
            config,
            pages: vec![Box::new(home_page), Box::new(game_page)],
            active_page_index: 0,
        })
    }

    fn get_active_page(&mut self) -> Result<&mut Box<dyn Page>> {
        let index = self.active_page_index;
        self.pages.get_mut(index).ok_or_else(|| eyre!("No page at index {index}"))
    }

    fn set_active_page(&mut self, id: PageId) {
        if let Some(index) = self.pages.iter().position(|page| page.id() == id) {
            log::debug!("Switching to {id} page");
            self.active_page_index = index;
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = tui::Tui::new()?;
        tui.tick_rate(self.tick_rate);
        tui.frame_rate(self.frame_rate);
        tui.enter()?;

        for page in self.pages.iter_mut() {
            page.register_config_handler(&self.config)?;
        }

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Tick => action_tx.send(act!(Command::Tick))?,
                    tui::Event::Render => action_tx.send(act!(Command::Render))?,
                    tui::Event::Resize(x, y) => action_tx.send(act!(Command::Resize(x, y)))?,
                    tui::Event::Key(key) => {
                        let active_page_id = self.get_active_page()?.id();
                        if let Some(action) = self.config.keybindings.lookup(&active_page_id, &key) {
                            log::debug!("Got action: {action:?}");
                            action_tx.send(action.clone())?;
                        }
                    },
                    _ => {},
                }
                if let Some(action) = self.get_active_page()?.handle_events(&e)? {
                    action_tx.send(action)?;
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                let Action { command, .. } = &action;
                if *command != Command::Tick && *command != Command::Render {
                    log::debug!("{command:?}");
                }
                match command {
                    Command::Quit => self.should_quit = true,
                    Command::Suspend => self.should_suspend = true,
                    Command::Resume => self.should_suspend = false,
                    Command::ToggleShowHelp => self.show_help = !self.show_help,
                    Command::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.render(&mut tui, &action_tx)?;
                    },
                    Command::Render => {
                        self.render(&mut tui, &action_tx)?;
                    },
                    Command::StartGame(_) => self.set_active_page(PageId::Game),
                    Command::ReturnHome => self.set_active_page(PageId::Home),
                    Command::Error(message) => log::error!("{message}"),
                    _ => {},
                }
                if reaches_page(self.show_help, &action) {
                    if let Some(action) = self.get_active_page()?.update(action)? {
                        action_tx.send(action)?
                    }
                }
            }
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(act!(Command::Resume))?;
                tui.resume()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn render(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        tui.draw(|f| {
            let area = f.area();

            let [_, area, _] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(HEIGHT), Constraint::Fill(1)]).areas(area);
            let [_, area, _] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(WIDTH), Constraint::Fill(1)]).areas(area);

            let border = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().bg(Color::Black));
            f.render_widget(border, area);

            let area = area.inner(Margin { horizontal: 1, vertical: 1 });

            if let Some(page) = self.pages.get_mut(self.active_page_index) {
                if let Err(e) = page.draw(f, area) {
                    let _ = action_tx.send(act!(Command::Error(format!("Failed to draw: {:?}", e))));
                }
            }

            if self.show_help {
                self.draw_help(f, area);
            };
        })?;

        Ok(())
    }

    fn draw_help(&self, f: &mut Frame<'_>, rect: Rect) {
        let mut groups = vec![("System".to_string(), self.config.keybindings.global.clone())];
        if let Some(page) = self.pages.get(self.active_page_index) {
            let id = page.id();
            if let Some(bindings) = self.config.keybindings.pages.get(&id) {
                groups.push((id.to_string(), bindings.clone()));
            }
        }

        f.render_widget(Help::new(groups), rect);
    }
}

// The help overlay pauses the page underneath. Releases still get through so
// a key let go under the overlay does not stay held.
fn reaches_page(show_help: bool, action: &Action) -> bool {
    !show_help || action.state == ActionState::End
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::GameAction;

    #[test]
    fn test_help_pauses_page() {
        assert!(reaches_page(false, &act!(Command::Tick)));
        assert!(!reaches_page(true, &act!(Command::Tick)));
        assert!(!reaches_page(true, &act!(Command::Game(GameAction::Flap))));
        assert!(!reaches_page(true, &act!(Command::Game(GameAction::Flap), ActionState::Repeat)));
    }

    #[test]
    fn test_release_reaches_page_under_help() {
        assert!(reaches_page(true, &act!(Command::Game(GameAction::Flap), ActionState::End)));
    }
}
