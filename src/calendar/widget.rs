use super::canvas::{CellShade, DayKind, LabelTone, MonthSeparator, RowCanvas};
use super::pager::WeekPager;
use super::week_view::{cell_span, weekday_columns, SimpleWeekView, DAY_NUMBER_MARGIN};
use crate::theme::{week::*, MONTH_STYLE, STATUS_STYLE, WEEKDAY_STYLE, YEAR_STYLE, ZONE_STYLE};
use ratatui::prelude::*;
use time::Month::January;

/// Number of columns on the left side of the calendar, used as the margin in
/// which the year is written
const LEFT_MARGIN: u16 = 6;

const LONGEST_MONTH_NAME_LEN: u16 = 9; // September

/// Columns between the right edge of the calendar and the start of the month
/// name
const MONTH_GUTTER: u16 = 2;

/// Number of columns on the right side of the calendar, used as the margin in
/// which the month is written
const RIGHT_MARGIN: u16 = LONGEST_MONTH_NAME_LEN + MONTH_GUTTER;

/// Number of lines taken up by the header and its rule
const HEADER_LINES: u16 = 2;

/// Number of lines at the bottom used for the status line
const STATUS_LINES: u16 = 1;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

/// Columns of padding on either side of each row
const ROW_PADDING: u16 = 1;

const ACS_HLINE: char = '─';
const DASHED_VLINE: char = '┆';
const HEAVY_HLINE: char = '━';
const HEAVY_VLINE: char = '┃';
const HEAVY_ULCORNER: char = '┏';
const HEAVY_LRCORNER: char = '┛';

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Calendar;

impl StatefulWidget for Calendar {
    type State = WeekPager;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut WeekPager) {
        let days = state.adapter().days_per_week();
        let main_width = ROW_PADDING * 2 + DAY_WIDTH * u16::from(days);
        let left = (area.width.saturating_sub(main_width) / 2).max(LEFT_MARGIN) - LEFT_MARGIN;
        let [_, area, _] = Layout::horizontal([
            Constraint::Length(left),
            Constraint::Length((LEFT_MARGIN + main_width + RIGHT_MARGIN).min(area.width)),
            Constraint::Min(0),
        ])
        .areas(area);
        let [header, rows, status] = Layout::vertical([
            Constraint::Length(HEADER_LINES),
            Constraint::Min(0),
            Constraint::Length(STATUS_LINES),
        ])
        .areas(area);
        let main = Rect {
            x: area.x.saturating_add(LEFT_MARGIN),
            y: rows.y,
            width: main_width,
            height: rows.height,
        }
        .intersection(area);
        if let Err(e) = state.layout(main, ROW_PADDING) {
            log::error!("Failed to lay out weeks: {e}");
            return;
        }

        let week_start = state.adapter().week_start();
        for (i, wd) in weekday_columns(week_start, days).into_iter().enumerate() {
            let (x, _) = cell_span(main.width, ROW_PADDING, days, i);
            let name = wd.to_string();
            mvprint(
                buf,
                main.x + x + DAY_NUMBER_MARGIN,
                header.y,
                name.get(..2).unwrap_or(&name),
                WEEKDAY_STYLE,
            );
        }
        if header.height > 1 {
            for x in main.left()..main.right() {
                if let Some(cell) = buf.cell_mut((x, header.y + 1)) {
                    cell.set_char(ACS_HLINE).set_style(RULE_STYLE);
                }
            }
        }

        for (i, (rect, view)) in state.rows().enumerate() {
            view.draw(&mut BufferCanvas::new(rect, buf));
            if let Some(year) = margin_year(i, view) {
                mvprint(buf, area.x, rect.y, &year.to_string(), YEAR_STYLE);
            }
            let new_month = view.first_month() != view.last_month()
                || view.cells().first().is_some_and(|c| c.day() == 1);
            if i == 0 || new_month {
                if let Some(month) = view.last_month() {
                    mvprint(
                        buf,
                        rect.right() + MONTH_GUTTER,
                        rect.y,
                        &month.to_string(),
                        MONTH_STYLE,
                    );
                }
            }
        }

        let zone = state.zone().name();
        let zone_width = u16::try_from(zone.len()).unwrap_or(u16::MAX);
        let zone_x = main.right().saturating_sub(zone_width).max(main.x);
        mvprintn(
            buf,
            main.x,
            status.y,
            &state.status(),
            zone_x.saturating_sub(main.x + 1),
            STATUS_STYLE,
        );
        mvprint(buf, zone_x, status.y, zone, ZONE_STYLE);
    }
}

// The top row shows the year it ends in; later rows show a year only when
// it begins in them
fn margin_year(i: usize, view: &SimpleWeekView) -> Option<i32> {
    if i == 0 {
        view.cells().last().map(|c| c.date.year())
    } else {
        view.cells()
            .iter()
            .find(|c| c.month() == January && c.day() == 1)
            .map(|c| c.date.year())
    }
}

fn mvprint(buf: &mut Buffer, x: u16, y: u16, s: &str, style: Style) {
    mvprintn(buf, x, y, s, u16::MAX, style);
}

// Prints at most `width` columns of `s`, cut off at the edge of the buffer
fn mvprintn(buf: &mut Buffer, x: u16, y: u16, s: &str, width: u16, style: Style) {
    if buf.area.contains(Position::new(x, y)) {
        buf.set_stringn(x, y, s, usize::from(width), style);
    }
}

fn label_style(tone: LabelTone) -> Style {
    let mut style = match tone.kind {
        DayKind::Weekday => Style::new(),
        DayKind::Saturday => SATURDAY_STYLE,
        DayKind::Sunday => SUNDAY_STYLE,
        DayKind::Today => TODAY_STYLE,
    };
    if tone.out_of_focus && tone.kind != DayKind::Today {
        style = style.patch(OUT_OF_FOCUS_STYLE);
    }
    if tone.past {
        style = style.patch(PAST_STYLE);
    }
    style
}

/// Paints a week row into a region of a buffer
#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    row: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(row: Rect, buf: &'a mut Buffer) -> Self {
        Self { row, buf }
    }

    fn bottom(&self) -> u16 {
        self.row.bottom().saturating_sub(1)
    }

    // Lines above the rule
    fn label_lines(&self) -> std::ops::Range<u16> {
        self.row.top()..self.bottom()
    }

    fn mvaddch(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if x < self.row.width {
            if let Some(cell) = self.buf.cell_mut((self.row.x + x, y)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }

    fn restyle(&mut self, left: u16, right: u16, y: u16, style: Style) {
        for x in left..right.min(self.row.width) {
            if let Some(cell) = self.buf.cell_mut((self.row.x + x, y)) {
                cell.set_style(style);
            }
        }
    }

    fn hline(&mut self, left: u16, right: u16, y: u16, ch: char, style: Style) {
        for x in left..right {
            self.mvaddch(x, y, ch, style);
        }
    }
}

impl RowCanvas for BufferCanvas<'_> {
    fn fill_cell(&mut self, left: u16, right: u16, shade: CellShade) {
        let style = match shade {
            CellShade::OddMonth => ODD_MONTH_STYLE,
            CellShade::Today => TODAY_STYLE,
        };
        for y in self.label_lines() {
            self.restyle(left, right, y, style);
        }
    }

    fn draw_label(&mut self, x: u16, label: &str, tone: LabelTone) {
        mvprintn(
            self.buf,
            self.row.x + x,
            self.row.y,
            label,
            self.row.width.saturating_sub(x),
            label_style(tone),
        );
    }

    fn draw_divider(&mut self, x: u16) {
        for y in self.label_lines() {
            self.mvaddch(x, y, DASHED_VLINE, DIVIDER_STYLE);
        }
    }

    fn draw_rule(&mut self) {
        self.hline(0, self.row.width, self.bottom(), ACS_HLINE, RULE_STYLE);
    }

    fn draw_month_separator(&mut self, separator: MonthSeparator) {
        let top = self.row.y.checked_sub(1);
        match separator {
            MonthSeparator::Top => {
                if let Some(top) = top {
                    self.hline(0, self.row.width, top, HEAVY_HLINE, MONTH_SEPARATOR_STYLE);
                }
            }
            MonthSeparator::Step { x } => {
                let bottom = self.bottom();
                self.hline(0, x, bottom, HEAVY_HLINE, MONTH_SEPARATOR_STYLE);
                for y in self.label_lines() {
                    self.mvaddch(x, y, HEAVY_VLINE, MONTH_SEPARATOR_STYLE);
                }
                self.mvaddch(x, bottom, HEAVY_LRCORNER, MONTH_SEPARATOR_STYLE);
                if let Some(top) = top {
                    self.mvaddch(x, top, HEAVY_ULCORNER, MONTH_SEPARATOR_STYLE);
                    self.hline(x + 1, self.row.width, top, HEAVY_HLINE, MONTH_SEPARATOR_STYLE);
                }
            }
        }
    }

    fn draw_selection(&mut self, left: u16, right: u16) {
        self.restyle(left + 1, right.saturating_sub(1), self.row.y, SELECTION_STYLE);
    }
}
