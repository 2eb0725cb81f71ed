pub mod bird;
pub mod collision;
pub mod item;
pub mod object;
pub mod painter;
pub mod pipe;
pub mod pointer;
pub mod rules;
pub mod session;
pub mod spawner;

use std::{collections::VecDeque, time::Instant};

use color_eyre::eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    Frame,
};

use super::{Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, GameAction},
    components::{
        multiline::MultiLine,
        sky::{Sky, SkyState},
    },
    constants::game,
    pages::game::{
        painter::BufferPainter,
        pointer::PointerTracker,
        rules::Variant,
        session::{Backdrop, Phase, Session, Sound},
    },
};

pub struct GamePage {
    session: Session,
    pointer: PointerTracker,
    rng: StdRng,
    sky: SkyState,
    cues: VecDeque<(Sound, Instant)>,
}

impl Default for GamePage {
    fn default() -> Self {
        GamePage::new(StdRng::from_entropy())
    }
}

impl GamePage {
    pub fn new(rng: StdRng) -> Self {
        GamePage {
            session: Session::new(Variant::default()),
            pointer: PointerTracker::default(),
            rng,
            sky: SkyState::default(),
            cues: VecDeque::new(),
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn start(&mut self, variant: Variant) {
        log::info!("Starting a {variant} game");
        self.session = Session::new(variant);
        self.pointer.reset();
        self.cues.clear();
    }

    fn tick(&mut self, now: Instant) {
        let input = self.pointer.sample(now);
        let phase = self.session.phase();
        let backdrop = self.session.backdrop();

        for sound in self.session.tick(input, now, &mut self.rng) {
            log::debug!("Sound: {sound}");
            self.cues.push_back((sound, now));
        }
        self.cues.retain(|(_, at)| now.saturating_duration_since(*at) < game::CUE_DURATION);

        if self.session.phase() != phase {
            log::info!("{phase} -> {} at score {}", self.session.phase(), self.session.score());
        }
        if self.session.backdrop() != backdrop {
            log::debug!("Backdrop turned {}", self.session.backdrop());
        }
    }

    fn banner(&self) -> Option<&'static str> {
        match self.session.phase() {
            Phase::Idle => Some(game::IDLE_BANNER),
            Phase::GameOver => Some(game::GAME_OVER_BANNER),
            Phase::Flying => None,
        }
    }

    fn cue_line(&self) -> String {
        self.cues.iter().map(|(sound, _)| format!("*{}*", sound.to_string().to_lowercase())).collect::<Vec<_>>().join(" ")
    }

    fn text_style(&self) -> Style {
        let color = match self.session.backdrop() {
            Backdrop::Day => game::DAY_TEXT_COLOR,
            Backdrop::Night => game::NIGHT_TEXT_COLOR,
        };
        Style::default().fg(color)
    }
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer.mouse_down(Instant::now()),
            MouseEventKind::Up(MouseButton::Left) => self.pointer.mouse_up(),
            _ => {},
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::Tick => self.tick(Instant::now()),
            Command::StartGame(variant) => self.start(variant),
            Command::Game(GameAction::Flap) => match action.state {
                ActionState::Start | ActionState::Repeat => self.pointer.key_down(Instant::now()),
                ActionState::End => self.pointer.key_up(),
            },
            Command::Game(GameAction::Leave) => {
                log::info!("Leaving with score {}", self.session.score());
                return Ok(Some(act!(Command::ReturnHome)));
            },
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        f.render_stateful_widget(Sky::new(self.session.backdrop()), area, &mut self.sky);
        self.session.paint(&mut BufferPainter::new(f.buffer_mut(), area));

        let style = self.text_style();
        let [_, banner_area, _, cue_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        if let Some(banner) = self.banner() {
            let banner = MultiLine::new(vec![banner]).centered(true).style(style.add_modifier(Modifier::BOLD));
            f.render_widget(banner, banner_area);
        }
        let cues = self.cue_line();
        if !cues.is_empty() {
            f.render_widget(MultiLine::new(vec![cues]).centered(true).style(style), cue_area);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;

    fn page(variant: Variant) -> GamePage {
        let mut page = GamePage::new(StdRng::seed_from_u64(8));
        page.update(act!(Command::StartGame(variant))).unwrap();
        page
    }

    fn screen(page: &mut GamePage) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                page.draw(f, area).unwrap();
            })
            .unwrap();
        let buffer: &Buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_flap_key_takes_off() {
        let mut page = page(Variant::Classic);
        page.update(act!(Command::Game(GameAction::Flap), ActionState::Start)).unwrap();
        page.tick(Instant::now());
        assert_eq!(page.session().phase(), Phase::Flying);
        assert_eq!(page.session().world().bird.velocity(), game::CLASSIC_FLAP_VELOCITY);
        assert_eq!(page.cue_line(), "*flap*");
    }

    #[test]
    fn test_mouse_click_takes_off() {
        let mut page = page(Variant::Hover);
        let click = |kind| MouseEvent { kind, column: 3, row: 4, modifiers: crossterm::event::KeyModifiers::NONE };
        page.handle_mouse_events(click(MouseEventKind::Down(MouseButton::Left))).unwrap();
        page.handle_mouse_events(click(MouseEventKind::Up(MouseButton::Left))).unwrap();
        page.tick(Instant::now());
        assert_eq!(page.session().phase(), Phase::Flying);
    }

    #[test]
    fn test_right_button_is_ignored() {
        let mut page = page(Variant::Classic);
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 0,
            row: 0,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        page.handle_mouse_events(event).unwrap();
        page.tick(Instant::now());
        assert_eq!(page.session().phase(), Phase::Idle);
    }

    #[test]
    fn test_leave_returns_home() {
        let mut page = page(Variant::Classic);
        let action = page.update(act!(Command::Game(GameAction::Leave))).unwrap();
        assert_eq!(action, Some(act!(Command::ReturnHome)));
    }

    #[test]
    fn test_restart_picks_new_variant() {
        let mut page = page(Variant::Classic);
        page.update(act!(Command::StartGame(Variant::Hover))).unwrap();
        assert_eq!(page.session().rules().variant, Variant::Hover);
        assert_eq!(page.session().phase(), Phase::Idle);
    }

    #[test]
    fn test_banner_follows_phase() {
        let mut page = page(Variant::Classic);
        assert!(screen(&mut page).contains(game::IDLE_BANNER));

        page.update(act!(Command::Game(GameAction::Flap))).unwrap();
        page.tick(Instant::now());
        let flying = screen(&mut page);
        assert!(!flying.contains(game::IDLE_BANNER));
        assert!(flying.contains("*flap*"));
    }

    #[test]
    fn test_cues_expire() {
        let mut page = page(Variant::Classic);
        let start = Instant::now();
        page.update(act!(Command::Game(GameAction::Flap))).unwrap();
        page.tick(start);
        assert_eq!(page.cues.len(), 1);
        page.tick(start + game::CUE_DURATION);
        assert!(page.cues.is_empty());
    }
}
