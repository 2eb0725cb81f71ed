use std::{collections::HashMap, fmt::Debug, path::PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{
    de::{DeserializeOwned, Deserializer, Error as _},
    Deserialize,
};

use crate::{
    action::{Action, ActionState, Command, GameAction, HomeAction},
    pages::{game::rules::Variant, PageId},
};

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub variant: Variant,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub game: GameConfig,
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        let default_config: Config =
            serde_yaml::from_str(CONFIG).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        let data_dir = crate::utils::get_data_dir();
        let config_dir = crate::utils::get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("_config_dir", config_dir.to_string_lossy().to_string())?
            .set_default("game.variant", default_config.game.variant.to_string())?;

        let config_files = [("config.yaml", config::FileFormat::Yaml)];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(config::File::from(config_dir.join(file)).format(*format).required(false));
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!("No configuration file in {}, using defaults", config_dir.display());
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cfg.merge_keybindings(default_config.keybindings);

        Ok(cfg)
    }

    /// Fills in every default binding the user config did not override.
    fn merge_keybindings(&mut self, defaults: KeyBindings) {
        for (scope, default_bindings) in defaults.pages {
            let user_bindings = self.keybindings.pages.entry(scope).or_default();
            for (key, action) in default_bindings.0 {
                user_bindings.0.entry(key).or_insert(action);
            }
        }
        for (key, action) in defaults.global.0 {
            self.keybindings.global.0.entry(key).or_insert(action);
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawPageKeyBindings {
    pub click: Option<HashMap<String, String>>,
    pub hold: Option<HashMap<String, String>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawKeyBindings {
    #[serde(default)]
    pub global: RawPageKeyBindings,
    #[serde(default)]
    pub pages: HashMap<String, RawPageKeyBindings>,
}

#[derive(Clone, Debug, Default)]
pub struct PageKeyBindings(pub HashMap<KeyEvent, Action>);

impl PageKeyBindings {
    pub fn get(&self, key: &KeyEvent) -> Option<&Action> {
        self.0.get(&normalize_key_event(key))
    }
}

#[derive(Clone, Debug, Default)]
pub struct KeyBindings {
    pub global: PageKeyBindings,
    pub pages: HashMap<PageId, PageKeyBindings>,
}

impl KeyBindings {
    /// Global bindings win over page bindings.
    pub fn lookup(&self, page: &PageId, key: &KeyEvent) -> Option<&Action> {
        self.global.get(key).or_else(|| self.pages.get(page).and_then(|bindings| bindings.get(key)))
    }
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw_keybindings = RawKeyBindings::deserialize(deserializer)?;

        let global_keybindings = PageKeyBindings(
            parse_page_keybindings::<Command>(&raw_keybindings.global)
                .map_err(D::Error::custom)?
                .into_iter()
                .map(|(event, (command, state))| (event, Action { command, state }))
                .collect(),
        );
        let page_keybindings = raw_keybindings
            .pages
            .into_iter()
            .map(|(page, keybindings)| match_page_keybindings(&page, keybindings))
            .collect::<Result<HashMap<_, _>, String>>()
            .map_err(D::Error::custom)?;

        Ok(KeyBindings { global: global_keybindings, pages: page_keybindings })
    }
}

macro_rules! parse_and_map_actions {
    ( $( ( $page_id_variant:path, $action_type:ty, $action_variant:path ) ),* ) => {
        fn match_page_keybindings(
            page: &str,
            raw_page_keybindings: RawPageKeyBindings,
        ) -> Result<(PageId, PageKeyBindings), String> {
            let page_id: PageId = serde_yaml::from_str(page).map_err(|e| format!("Unknown page `{page}`: {e}"))?;
            let map = match page_id {
                $(
                    $page_id_variant => {
                        parse_page_keybindings::<$action_type>(&raw_page_keybindings)?
                            .into_iter()
                            .map(|(event, (command, state))| (event, Action { command: $action_variant(command), state }))
                            .collect()
                    },
                )*
            };

            Ok((page_id, PageKeyBindings(map)))
        }
    };
}

parse_and_map_actions![(PageId::Home, HomeAction, Command::Home), (PageId::Game, GameAction, Command::Game)];

fn parse_binding_pairs<T: DeserializeOwned>(map: &Option<HashMap<String, String>>) -> Result<HashMap<KeyEvent, T>, String> {
    let Some(map) = map else {
        return Ok(HashMap::new());
    };
    map.iter()
        .map(|(key_str, action_str)| -> Result<(KeyEvent, T), String> {
            let action: T =
                serde_yaml::from_str(action_str).map_err(|e| format!("Unknown action `{action_str}`: {e}"))?;
            Ok((parse_key_event(key_str)?, action))
        })
        .collect()
}

fn parse_page_keybindings<T>(raw_page_keybindings: &RawPageKeyBindings) -> Result<HashMap<KeyEvent, (T, ActionState)>, String>
where
    T: DeserializeOwned + Clone + Debug,
{
    let click_keybindings = parse_binding_pairs(&raw_page_keybindings.click)?;
    let hold_keybindings = parse_binding_pairs(&raw_page_keybindings.hold)?;

    Ok(merge_keybinding_maps(click_keybindings, hold_keybindings))
}

/// Click bindings fire on press only. Hold bindings map press, repeat and
/// release of the same key to `Start`, `Repeat` and `End`.
fn merge_keybinding_maps<A: Clone>(
    click: HashMap<KeyEvent, A>,
    hold: HashMap<KeyEvent, A>,
) -> HashMap<KeyEvent, (A, ActionState)> {
    let mut click: HashMap<KeyEvent, (A, ActionState)> =
        click.into_iter().map(|(event, command)| (event, (command, ActionState::default()))).collect();
    for (mut key_event, action) in hold {
        click.insert(key_event, (action.clone(), ActionState::Start));
        key_event.kind = KeyEventKind::Release;
        click.insert(key_event, (action.clone(), ActionState::End));
        key_event.kind = KeyEventKind::Repeat;
        click.insert(key_event, (action, ActionState::Repeat));
    }

    click
}

// Terminals with keyboard enhancement may tag events with lock or keypad
// state; bindings never carry it.
fn normalize_key_event(key: &KeyEvent) -> KeyEvent {
    KeyEvent { state: KeyEventState::NONE, ..*key }
}

fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    if raw.chars().filter(|c| *c == '>').count() != raw.chars().filter(|c| *c == '<').count() {
        return Err(format!("Unable to parse `{}`", raw));
    }
    let raw = if !raw.contains("><") {
        let raw = raw.strip_prefix('<').unwrap_or(raw);
        let raw = raw.strip_prefix('>').unwrap_or(raw);
        raw
    } else {
        raw
    };
    let raw = raw.trim_start_matches('<').trim_end_matches('>');

    let raw_lower = raw.to_ascii_lowercase();
    let (remaining, modifiers) = extract_modifiers(&raw_lower);
    parse_key_code_with_modifiers(remaining, modifiers)
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        match current {
            rest if rest.starts_with("ctrl-") => {
                modifiers.insert(KeyModifiers::CONTROL);
                current = &rest[5..];
            },
            rest if rest.starts_with("alt-") => {
                modifiers.insert(KeyModifiers::ALT);
                current = &rest[4..];
            },
            rest if rest.starts_with("shift-") => {
                modifiers.insert(KeyModifiers::SHIFT);
                current = &rest[6..];
            },
            _ => break,
        };
    }

    (current, modifiers)
}

fn parse_key_code_with_modifiers(raw: &str, mut modifiers: KeyModifiers) -> Result<KeyEvent, String> {
    let c = match raw {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        },
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        "hyphen" | "minus" => KeyCode::Char('-'),
        "tab" => KeyCode::Tab,
        f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(format!("Unable to parse {raw}")),
        },
        c if c.chars().count() == 1 => {
            let mut c = c.chars().next().ok_or_else(|| format!("Unable to parse {raw}"))?;
            if modifiers.contains(KeyModifiers::SHIFT) {
                c = c.to_ascii_uppercase();
            }
            KeyCode::Char(c)
        },
        _ => return Err(format!("Unable to parse {raw}")),
    };
    Ok(KeyEvent::new(c, modifiers))
}

pub fn key_event_to_string(key_event: &KeyEvent) -> String {
    let char;
    let key_code = match key_event.code {
        KeyCode::Backspace => "backspace",
        KeyCode::Enter => "enter",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "pageup",
        KeyCode::PageDown => "pagedown",
        KeyCode::Tab => "tab",
        KeyCode::BackTab => "backtab",
        KeyCode::Delete => "delete",
        KeyCode::Insert => "insert",
        KeyCode::F(c) => {
            char = format!("f{c}");
            &char
        },
        KeyCode::Char(' ') => "space",
        KeyCode::Char(c) => {
            char = c.to_string();
            &char
        },
        KeyCode::Esc => "esc",
        _ => "",
    };

    let mut modifiers = Vec::with_capacity(3);

    if key_event.modifiers.intersects(KeyModifiers::CONTROL) {
        modifiers.push("ctrl");
    }

    if key_event.modifiers.intersects(KeyModifiers::ALT) {
        modifiers.push("alt");
    }

    if key_event.modifiers.intersects(KeyModifiers::SHIFT) {
        modifiers.push("shift");
    }

    let mut key = modifiers.join("-");

    if !key.is_empty() {
        key.push('-');
    }
    key.push_str(key_code);

    key
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn defaults() -> Config {
        serde_yaml::from_str(CONFIG).unwrap()
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::empty(), kind)
    }

    #[test]
    fn test_default_config_parses() {
        let config = defaults();
        assert_eq!(config.game.variant, Variant::Classic);
        assert!(config.keybindings.pages.contains_key(&PageId::Home));
        assert!(config.keybindings.pages.contains_key(&PageId::Game));
    }

    #[test]
    fn test_hold_binding_reports_every_phase() {
        let bindings = defaults().keybindings;
        let space = |kind| bindings.lookup(&PageId::Game, &key(KeyCode::Char(' '), kind)).cloned();
        let flap = |state| Some(Action { command: Command::Game(GameAction::Flap), state });

        assert_eq!(space(KeyEventKind::Press), flap(ActionState::Start));
        assert_eq!(space(KeyEventKind::Repeat), flap(ActionState::Repeat));
        assert_eq!(space(KeyEventKind::Release), flap(ActionState::End));
    }

    #[test]
    fn test_click_binding_ignores_release() {
        let bindings = defaults().keybindings;
        let enter = |kind| bindings.lookup(&PageId::Home, &key(KeyCode::Enter, kind)).cloned();
        assert_eq!(
            enter(KeyEventKind::Press),
            Some(Action { command: Command::Home(HomeAction::Select), state: ActionState::Start })
        );
        assert_eq!(enter(KeyEventKind::Release), None);
    }

    #[test]
    fn test_global_binding_wins() {
        let bindings = defaults().keybindings;
        let quit = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for page in [PageId::Home, PageId::Game] {
            assert_eq!(bindings.lookup(&page, &quit).map(|action| action.command.clone()), Some(Command::Quit));
        }
    }

    #[test]
    fn test_key_state_is_ignored() {
        let bindings = defaults().keybindings;
        let mut space = key(KeyCode::Char(' '), KeyEventKind::Press);
        space.state = KeyEventState::NUM_LOCK;
        assert!(bindings.lookup(&PageId::Game, &space).is_some());
    }

    #[test]
    fn test_user_bindings_override_defaults() {
        let mut config: Config = serde_yaml::from_str(
            r#"
keybindings:
  pages:
    Game:
      click:
        "<space>": Leave
"#,
        )
        .unwrap();
        config.merge_keybindings(defaults().keybindings);

        let space = key(KeyCode::Char(' '), KeyEventKind::Press);
        assert_eq!(
            config.keybindings.lookup(&PageId::Game, &space).map(|action| action.command.clone()),
            Some(Command::Game(GameAction::Leave))
        );
        let up = key(KeyCode::Up, KeyEventKind::Press);
        assert_eq!(
            config.keybindings.lookup(&PageId::Game, &up).map(|action| action.command.clone()),
            Some(Command::Game(GameAction::Flap))
        );
        assert_eq!(config.game.variant, Variant::Classic);
    }

    #[test]
    fn test_bad_bindings_are_errors() {
        let unknown_action = "keybindings:\n  pages:\n    Game:\n      click:\n        \"<x>\": Dive\n";
        assert!(serde_yaml::from_str::<Config>(unknown_action).is_err());
        let unknown_page = "keybindings:\n  pages:\n    Shop:\n      click:\n        \"<x>\": Up\n";
        assert!(serde_yaml::from_str::<Config>(unknown_page).is_err());
        let unknown_key = "keybindings:\n  global:\n    click:\n      \"<hyper-x>\": Quit\n";
        assert!(serde_yaml::from_str::<Config>(unknown_key).is_err());
    }

    #[test]
    fn test_variant_from_yaml() {
        let config: Config = serde_yaml::from_str("game:\n  variant: Hover\n").unwrap();
        assert_eq!(config.game.variant, Variant::Hover);
    }

    #[test]
    fn test_simple_keys() {
        assert_eq!(parse_key_event("a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty()));

        assert_eq!(parse_key_event("enter").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));

        assert_eq!(parse_key_event("<esc>").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::empty()));

        assert_eq!(parse_key_event("<f1>").unwrap(), KeyEvent::new(KeyCode::F(1), KeyModifiers::empty()));
    }

    #[test]
    fn test_with_modifiers() {
        assert_eq!(parse_key_event("ctrl-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));

        assert_eq!(parse_key_event("alt-enter").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));

        assert_eq!(parse_key_event("shift-esc").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::SHIFT));
    }

    #[test]
    fn test_multiple_modifiers() {
        assert_eq!(
            parse_key_event("ctrl-alt-a").unwrap(),
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)
        );

        assert_eq!(
            parse_key_event("ctrl-shift-enter").unwrap(),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL | KeyModifiers::SHIFT)
        );
    }

    #[test]
    fn test_reverse_multiple_modifiers() {
        assert_eq!(
            key_event_to_string(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)),
            "ctrl-alt-a".to_string()
        );
        assert_eq!(key_event_to_string(&KeyEvent::new(KeyCode::Char(' '), KeyModifiers::empty())), "space");
    }

    #[test]
    fn test_invalid_keys() {
        assert!(parse_key_event("invalid-key").is_err());
        assert!(parse_key_event("ctrl-invalid-key").is_err());
        assert!(parse_key_event("f13").is_err());
        assert!(parse_key_event("<a").is_err());
    }

    #[test]
    fn test_case_insensitivity() {
        assert_eq!(parse_key_event("CTRL-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));

        assert_eq!(parse_key_event("AlT-eNtEr").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
    }
}
