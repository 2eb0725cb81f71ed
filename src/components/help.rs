use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Padding, Row, Table, Widget},
};

use crate::{
    action::ActionState,
    config::{key_event_to_string, PageKeyBindings},
};

/// Key binding tables, one bordered group per scope.
#[derive(Debug)]
pub struct Help {
    keybinding_groups: Vec<(String, Vec<(String, String)>)>,
    column_spacing: u16,
    margin_vertical: u16,
    margin_horizontal: u16,
}

impl Help {
    pub fn new(keybinding_groups: Vec<(String, PageKeyBindings)>) -> Self {
        let groups = keybinding_groups
            .into_iter()
            .map(|(group_name, keybindings)| {
                let mut keybindings: Vec<(String, String)> = keybindings
                    .0
                    .into_iter()
                    .filter(|(_, action)| action.state == ActionState::Start)
                    .map(|(event, action)| (key_event_to_string(&event), action.command.describe()))
                    .collect();
                keybindings.sort();
                (group_name, keybindings)
            })
            .collect();

        Self { keybinding_groups: groups, column_spacing: 5, margin_vertical: 1, margin_horizontal: 2 }
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(String, Vec<(String, String)>)] {
        &self.keybinding_groups
    }

    fn render_group(
        &self,
        area: Rect,
        buf: &mut Buffer,
        group_name: &str,
        keybindings: &[(String, String)],
        key_length: u16,
        val_length: u16,
    ) {
        let rows: Vec<Row> = keybindings.iter().map(|(key, val)| Row::new(vec![key.clone(), val.clone()])).collect();
        let widths = [Constraint::Length(key_length), Constraint::Min(val_length)];

        let table = Table::new(rows, widths)
            .column_spacing(self.column_spacing)
            .header(Row::new(vec!["Key", "Command"]).style(Style::new().bold()).bottom_margin(1))
            .block(
                Block::new()
                    .title(group_name.to_string())
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::new().bold().fg(Color::Cyan))
                    .padding(Padding::symmetric(self.margin_horizontal, self.margin_vertical)),
            );

        Clear.render(area, buf);
        table.render(area, buf);
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let key_length = self
            .keybinding_groups
            .iter()
            .flat_map(|(_, keybindings)| keybindings.iter().map(|(key, _)| key.len()))
            .max()
            .unwrap_or(0) as u16;
        let val_length = self
            .keybinding_groups
            .iter()
            .flat_map(|(_, keybindings)| keybindings.iter().map(|(_, val)| val.len()))
            .max()
            .unwrap_or(0) as u16;

        // + column spacing + margins + border
        let width = key_length + val_length + self.column_spacing + (self.margin_horizontal * 2) + 2;
        // + margins + header + border
        let heights = self
            .keybinding_groups
            .iter()
            .map(|(_, keybindings)| Constraint::Length(keybindings.len() as u16 + (self.margin_vertical * 2) + 2 + 2));

        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
        let areas = Layout::vertical(heights).flex(Flex::Center).split(area);

        for ((group_name, keybindings), area) in self.keybinding_groups.iter().zip(areas.iter()) {
            self.render_group(*area, buf, group_name, keybindings, key_length, val_length);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::Config, pages::PageId};

    fn help() -> Help {
        let config: Config = serde_yaml::from_str(include_str!("../../.config/config.yaml")).unwrap();
        Help::new(vec![
            ("System".to_string(), config.keybindings.global),
            ("Game".to_string(), config.keybindings.pages.get(&PageId::Game).unwrap().clone()),
        ])
    }

    #[test]
    fn test_hold_bindings_listed_once() {
        let help = help();
        let (name, game) = &help.groups()[1];
        assert_eq!(name, "Game");
        let flaps = game.iter().filter(|(key, _)| key == "space").count();
        assert_eq!(flaps, 1);
        assert!(game.contains(&("esc".to_string(), "Leave".to_string())));
    }

    #[test]
    fn test_groups_are_sorted() {
        let help = help();
        let (_, system) = &help.groups()[0];
        let mut sorted = system.clone();
        sorted.sort();
        assert_eq!(system, &sorted);
        assert!(system.contains(&("ctrl-c".to_string(), "Quit".to_string())));
    }

    #[test]
    fn test_renders_group_titles() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 40));
        help().render(buf.area, &mut buf);
        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("System"));
        assert!(text.contains("Flap"));
    }
}
