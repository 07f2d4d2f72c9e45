use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Width of the column of key names
const KEY_COLUMN: usize = 16;

static COMMANDS: &[(&str, &str)] = &[
    ("j, DOWN", "Scroll down one week"),
    ("k, UP", "Scroll up one week"),
    ("z, PAGE DOWN", "Scroll down one page"),
    ("w, PAGE UP", "Scroll up one page"),
    ("l, RIGHT", "Select the next day"),
    ("h, LEFT", "Select the previous day"),
    ("0, HOME", "Jump to today"),
    ("s", "Start weeks one day later"),
    ("click", "Select a day"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

static FOOTER: &str = "Press the Any Key to dismiss.";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let mut lines = COMMANDS
            .iter()
            .map(|&(keys, what)| {
                Line::from(vec![
                    Span::raw(format!("{keys:KEY_COLUMN$}")).bold(),
                    Span::raw(what),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::raw(FOOTER));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        // Leave a blank column on either side of the border
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        Help(Style::new()).render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_render() {
        let lines = render(49, 17);
        assert_eq!(lines[0].trim(), "");
        assert!(lines[1].contains(" Commands "));
        assert!(lines[1].trim().starts_with('┌'));
        assert!(lines[2].contains("│j, DOWN         Scroll down one week "));
        assert!(lines[9].contains("│s               Start weeks one day later│"));
        assert!(lines[14].contains("│Press the Any Key to dismiss. "));
        assert!(lines[15].trim().starts_with('└'));
        assert_eq!(lines[16].trim(), "");
    }

    #[test]
    fn test_render_cramped() {
        let lines = render(12, 4);
        assert!(lines[0].starts_with('┌'));
        assert!(lines[3].starts_with('└'));
    }
}
