use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const YEAR_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const MONTH_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.add_modifier(Modifier::ITALIC);

pub(crate) const ZONE_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) mod week {
    use super::*;

    /// Background of every day in February, April, and the other
    /// odd-numbered (counting from zero) months
    pub(crate) const ODD_MONTH_STYLE: Style = Style::new().bg(Color::Indexed(235));

    pub(crate) const TODAY_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);

    pub(crate) const SUNDAY_STYLE: Style = Style::new().fg(Color::LightRed);

    pub(crate) const SATURDAY_STYLE: Style = Style::new().fg(Color::LightBlue);

    pub(crate) const OUT_OF_FOCUS_STYLE: Style = Style::new().fg(Color::DarkGray);

    pub(crate) const PAST_STYLE: Style = Style::new().add_modifier(Modifier::DIM);

    pub(crate) const DIVIDER_STYLE: Style = Style::new().fg(Color::DarkGray);

    pub(crate) const RULE_STYLE: Style = Style::new().fg(Color::Gray);

    pub(crate) const MONTH_SEPARATOR_STYLE: Style = Style::new()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    pub(crate) const SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
}
