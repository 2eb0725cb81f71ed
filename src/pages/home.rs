use color_eyre::eyre::Result;
use derive_builder::Builder;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use strum::IntoEnumIterator;

use super::{Page, PageId};
use crate::{
    action::{act, Action, Command, HomeAction},
    components::{
        multiline::MultiLine,
        sky::{Sky, SkyState},
    },
    config::Config,
    constants::{home, TITLE_TEXT},
    pages::game::{rules::Variant, session::Backdrop},
};

#[derive(Builder)]
pub struct HomePage {
    options: Vec<Variant>,
    #[builder(default)]
    selected_option_index: usize,
    #[builder(default)]
    sky: SkyState,
}

impl HomePage {
    pub fn new() -> Result<Self> {
        Ok(HomePageBuilder::default().options(Variant::iter().collect()).build()?)
    }

    pub fn selected(&self) -> Variant {
        self.options.get(self.selected_option_index).copied().unwrap_or_default()
    }

    pub fn select(&mut self, variant: Variant) {
        if let Some(index) = self.options.iter().position(|option| *option == variant) {
            self.selected_option_index = index;
        }
    }

    pub fn up(&mut self) {
        self.selected_option_index = self.selected_option_index.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected_option_index + 1 < self.options.len() {
            self.selected_option_index += 1;
        }
    }

    fn option_lines(&self) -> Vec<Line<'static>> {
        let summaries: Vec<&str> = self.options.iter().map(|variant| variant.summary()).collect();
        let width = summaries.iter().map(|summary| summary.chars().count()).max().unwrap_or(0);
        let padding = " ".repeat(home::OPTION_PADDING);

        let mut lines = Vec::new();
        for (index, summary) in summaries.into_iter().enumerate() {
            if index > 0 {
                lines.push(Line::from(""));
            }
            let text = format!("{padding}{summary:<width$}{padding}");
            let style = if index == self.selected_option_index {
                Style::default().fg(Color::Black).bg(home::SELECTED_COLOR)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::styled(text, style));
        }
        lines
    }
}

impl Page for HomePage {
    fn id(&self) -> PageId {
        PageId::Home
    }

    fn register_config_handler(&mut self, config: &Config) -> Result<()> {
        self.select(config.game.variant);
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if let Command::Home(command) = action.command {
            match command {
                HomeAction::Up => self.up(),
                HomeAction::Down => self.down(),
                HomeAction::Select => return Ok(Some(act!(Command::StartGame(self.selected())))),
            }
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        f.render_stateful_widget(Sky::new(Backdrop::Night), rect, &mut self.sky);

        let title_lines: Vec<&str> = TITLE_TEXT.lines().filter(|s| !s.is_empty()).collect();
        let title = MultiLine::new(title_lines).ignore_whitespace(true).style(Style::default().fg(home::TITLE_COLOR));
        let options = self.option_lines();

        let [title_area, option_area, hint_area] = Layout::vertical([
            Constraint::Length(title.height()),
            Constraint::Length(options.len() as u16),
            Constraint::Length(1),
        ])
        .flex(Flex::SpaceAround)
        .areas(rect);

        // Left-aligned art block, centred as a whole.
        let [title_area] = Layout::horizontal([Constraint::Length(title.width())]).flex(Flex::Center).areas(title_area);
        f.render_widget(title, title_area);

        let option_width = options.iter().map(|line| line.width()).max().unwrap_or(0) as u16;
        let [option_area] = Layout::horizontal([Constraint::Length(option_width)]).flex(Flex::Center).areas(option_area);
        f.render_widget(Paragraph::new(options), option_area);

        let hint = MultiLine::new(vec![home::HINT_TEXT]).centered(true).style(Style::default().fg(Color::Gray));
        f.render_widget(hint, hint_area);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::action::ActionState;

    #[test]
    fn test_menu_lists_every_variant() {
        let page = HomePage::new().unwrap();
        assert_eq!(page.options, vec![Variant::Classic, Variant::Hover]);
        assert_eq!(page.selected(), Variant::Classic);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut page = HomePage::new().unwrap();
        page.up();
        assert_eq!(page.selected(), Variant::Classic);
        page.down();
        page.down();
        assert_eq!(page.selected(), Variant::Hover);
        page.up();
        assert_eq!(page.selected(), Variant::Classic);
    }

    #[test]
    fn test_select_starts_game() {
        let mut page = HomePage::new().unwrap();
        page.update(act!(Command::Home(HomeAction::Down))).unwrap();
        let action = page.update(act!(Command::Home(HomeAction::Select))).unwrap();
        assert_eq!(action, Some(Action { command: Command::StartGame(Variant::Hover), state: ActionState::Start }));
    }

    #[test]
    fn test_config_preselects_variant() {
        let mut page = HomePage::new().unwrap();
        let mut config = Config::default();
        config.game.variant = Variant::Hover;
        page.register_config_handler(&config).unwrap();
        assert_eq!(page.selected(), Variant::Hover);
    }

    #[test]
    fn test_draw_shows_options() {
        let mut page = HomePage::new().unwrap();
        let mut terminal = Terminal::new(TestBackend::new(62, 38)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                page.draw(f, area).unwrap();
            })
            .unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains(Variant::Classic.summary()));
        assert!(text.contains(Variant::Hover.summary()));
        assert!(text.contains(home::HINT_TEXT));
    }
}
