use super::canvas::{CellShade, DayKind, LabelTone, MonthSeparator, RowCanvas};
use super::julian::{date_from_julian_day, first_julian_day, julian_day, WeekdayExt};
use super::zone::TimeZone;
use thiserror::Error;
use time::{Date, Month, OffsetDateTime, Weekday};

/// Height of a row in lines when none has been requested
pub(crate) const DEFAULT_HEIGHT: u16 = 2;

/// Rows are never drawn shorter than this: one line for the labels, one for
/// the rule
pub(crate) const MIN_HEIGHT: u16 = 2;

pub(crate) const DEFAULT_NUM_DAYS: u8 = 7;

const DEFAULT_WEEK_START: Weekday = Weekday::Sunday;

/// Columns between the left edge of a cell and its label
pub(crate) const DAY_NUMBER_MARGIN: u16 = 1;

/// Parameters for binding a week to a view.  Every field other than `week`
/// may be left unset, in which case the view keeps its current value; the
/// exception is `focus_month`, which reverts to "no focus month" when unset.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct WeekParams {
    /// Height of the row in lines
    pub(crate) height: Option<u16>,
    /// `Some(None)` clears the selection
    pub(crate) selected_day: Option<Option<Weekday>>,
    pub(crate) week_start: Option<Weekday>,
    pub(crate) focus_month: Option<Month>,
    /// Weeks since the week of 1 January 1970.  Required.
    pub(crate) week: Option<u32>,
    /// Number of days in the row, 1 through 7; anything else is ignored
    pub(crate) num_days: Option<u8>,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ParamError {
    #[error("you must specify the week number for this view")]
    MissingWeek,
    #[error("week {week} lies outside the supported calendar")]
    WeekOutOfRange { week: u32 },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) julian_day: i64,
    pub(crate) date: Date,
    pub(crate) in_focus_month: bool,
    /// True for February, April, and the other months with an odd zero-based
    /// index; used to alternate background shading
    pub(crate) odd_month: bool,
}

impl DayCell {
    fn new(date: Date, focus_month: Option<Month>) -> DayCell {
        DayCell {
            julian_day: julian_day(date),
            date,
            in_focus_month: focus_month == Some(date.month()),
            odd_month: (u8::from(date.month()) - 1) % 2 == 1,
        }
    }

    pub(crate) fn month(&self) -> Month {
        self.date.month()
    }

    pub(crate) fn day(&self) -> u8 {
        self.date.day()
    }

    /// The day of the month, prefixed by the abbreviated month name on the
    /// first of the month
    pub(crate) fn label(&self) -> String {
        if self.day() == 1 {
            format!("{} 1", month_abbrev(self.month()))
        } else {
            self.day().to_string()
        }
    }
}

/// A single week row: the dates it shows and where they go.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SimpleWeekView {
    week: Option<u32>,
    height: u16,
    width: u16,
    padding: u16,
    selected_day: Option<Weekday>,
    week_start: Weekday,
    num_cells: u8,
    first_julian_day: i64,
    focus_month: Option<Month>,
    first_month: Option<Month>,
    last_month: Option<Month>,
    cells: Vec<DayCell>,
    // Cell index of today, if it is in this row
    today: Option<usize>,
    today_julian_day: i64,
}

impl SimpleWeekView {
    pub(crate) fn new() -> SimpleWeekView {
        SimpleWeekView {
            week: None,
            height: DEFAULT_HEIGHT,
            width: 0,
            padding: 0,
            selected_day: None,
            week_start: DEFAULT_WEEK_START,
            num_cells: DEFAULT_NUM_DAYS,
            first_julian_day: -1,
            focus_month: None,
            first_month: None,
            last_month: None,
            cells: Vec::new(),
            today: None,
            today_julian_day: -1,
        }
    }

    /// Binds the view to the week in `params`, determining "today" from `now`
    /// in `zone`.
    pub(crate) fn set_week_params(
        &mut self,
        params: &WeekParams,
        zone: &TimeZone,
        now: OffsetDateTime,
    ) -> Result<(), ParamError> {
        let week = params.week.ok_or(ParamError::MissingWeek)?;
        // Nothing is stored until the whole row has been built, so a failed
        // bind leaves the view as it was.
        let week_start = params.week_start.unwrap_or(self.week_start);
        let num_cells = params
            .num_days
            .filter(|n| (1..=DEFAULT_NUM_DAYS).contains(n))
            .unwrap_or(self.num_cells);
        let first_julian_day = first_julian_day(week, week_start);
        let mut cursor =
            date_from_julian_day(first_julian_day).ok_or(ParamError::WeekOutOfRange { week })?;
        let today = zone.today(now);
        let mut cells = Vec::with_capacity(usize::from(num_cells));
        let mut today_index = None;
        for i in 0..usize::from(num_cells) {
            cells.push(DayCell::new(cursor, params.focus_month));
            if cursor == today {
                today_index = Some(i);
            }
            cursor = cursor
                .next_day()
                .ok_or(ParamError::WeekOutOfRange { week })?;
        }
        // The loop leaves the cursor one day past the row; if that crossed
        // into a new month, step back before reading the last month.
        if cursor.day() == 1 {
            if let Some(prev) = cursor.previous_day() {
                cursor = prev;
            }
        }
        if let Some(height) = params.height {
            self.height = height.max(MIN_HEIGHT);
        }
        if let Some(selected_day) = params.selected_day {
            self.selected_day = selected_day;
        }
        self.week_start = week_start;
        self.num_cells = num_cells;
        self.week = Some(week);
        self.first_julian_day = first_julian_day;
        self.focus_month = params.focus_month;
        self.first_month = cells.first().map(DayCell::month);
        self.last_month = Some(cursor.month());
        self.cells = cells;
        self.today = today_index;
        self.today_julian_day = julian_day(today);
        Ok(())
    }

    pub(crate) fn on_size_changed(&mut self, width: u16) {
        self.width = width;
    }

    pub(crate) fn set_padding(&mut self, padding: u16) {
        self.padding = padding;
    }

    pub(crate) fn week(&self) -> Option<u32> {
        self.week
    }

    pub(crate) fn height(&self) -> u16 {
        self.height
    }

    pub(crate) fn first_month(&self) -> Option<Month> {
        self.first_month
    }

    pub(crate) fn last_month(&self) -> Option<Month> {
        self.last_month
    }

    pub(crate) fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Cell index of the selected day, if it is displayed in this row
    pub(crate) fn selected_position(&self) -> Option<usize> {
        let pos = usize::from(self.selected_day?.offset_from(self.week_start));
        (pos < self.cells.len()).then_some(pos)
    }

    /// Returns the columns `left..right` occupied by cell `i`
    pub(crate) fn cell_span(&self, i: usize) -> (u16, u16) {
        cell_span(self.width, self.padding, self.num_cells, i)
    }

    /// Returns the date under column `x`, or `None` if `x` falls in the
    /// padding on either side of the row
    pub(crate) fn day_from_location(&self, x: u16) -> Option<Date> {
        let day_start = self.padding;
        if x < day_start || x > self.width.saturating_sub(self.padding) {
            return None;
        }
        let usable = u32::from(self.width.saturating_sub(self.padding.saturating_mul(2)));
        if usable == 0 || self.cells.is_empty() {
            return None;
        }
        let n = u32::from(self.num_cells);
        // The right edge of the last cell is inclusive.
        let position = ((u32::from(x - day_start) * n) / usable).min(n - 1);
        date_from_julian_day(self.first_julian_day + i64::from(position))
    }

    /// Handles a tap at column `x`: the weekday of the tapped date becomes
    /// the selected day, and the date is returned
    pub(crate) fn select_from_location(&mut self, x: u16) -> Option<Date> {
        let date = self.day_from_location(x)?;
        self.selected_day = Some(date.weekday());
        Some(date)
    }

    pub(crate) fn month_separator(&self) -> Option<MonthSeparator> {
        let i = self.cells.iter().position(|c| c.day() == 1)?;
        if i == 0 {
            Some(MonthSeparator::Top)
        } else {
            Some(MonthSeparator::Step {
                x: self.cell_span(i).0,
            })
        }
    }

    pub(crate) fn draw<C: RowCanvas + ?Sized>(&self, canvas: &mut C) {
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.odd_month {
                let (left, right) = self.cell_span(i);
                canvas.fill_cell(left, right, CellShade::OddMonth);
            }
        }
        if let Some(i) = self.today {
            let (left, right) = self.cell_span(i);
            canvas.fill_cell(left, right, CellShade::Today);
        }
        for (i, cell) in self.cells.iter().enumerate() {
            let (left, _) = self.cell_span(i);
            let kind = if self.today == Some(i) {
                DayKind::Today
            } else {
                DayKind::for_weekday(cell.date.weekday())
            };
            let tone = LabelTone {
                kind,
                past: cell.julian_day < self.today_julian_day,
                out_of_focus: self.focus_month.is_some() && !cell.in_focus_month,
            };
            canvas.draw_label(left + DAY_NUMBER_MARGIN, &cell.label(), tone);
            if i > 0 {
                canvas.draw_divider(left);
            }
        }
        canvas.draw_rule();
        if let Some(separator) = self.month_separator() {
            canvas.draw_month_separator(separator);
        }
        if let Some(i) = self.selected_position() {
            let (left, right) = self.cell_span(i);
            canvas.draw_selection(left, right);
        }
    }
}

impl Default for SimpleWeekView {
    fn default() -> SimpleWeekView {
        SimpleWeekView::new()
    }
}

/// Returns the columns `left..right` occupied by cell `i` of `num_cells` in a
/// row `width` columns wide with `padding` columns of padding on each side
pub(crate) fn cell_span(width: u16, padding: u16, num_cells: u8, i: usize) -> (u16, u16) {
    let usable = usize::from(width.saturating_sub(padding.saturating_mul(2)));
    let n = usize::from(num_cells.max(1));
    let edge = |j: usize| u16::try_from(j * usable / n).unwrap_or(u16::MAX).saturating_add(padding);
    (edge(i), edge(i + 1))
}

pub(crate) fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Returns the leading `n` weekdays of a week starting on `week_start`
pub(crate) fn weekday_columns(week_start: Weekday, n: u8) -> Vec<Weekday> {
    (0..n.min(7)).map(|i| week_start.nth_next(i)).collect()
}
