use super::holder::SimpleWeekViewHolder;
use super::julian::{julian_day, week_of_julian_day};
use super::week_view::{ParamError, DEFAULT_NUM_DAYS};
use super::zone::TimeZone;
use time::{Date, Month, OffsetDateTime, Weekday};

/// Number of rows in the calendar: every week from the end of 1969 through
/// the start of 2037
pub(crate) const WEEK_COUNT: u32 = 3497;

/// Number of rows the viewport is divided into by default
pub(crate) const DEFAULT_NUM_WEEKS: u16 = 6;

/// Adapter settings.  Unset fields leave the adapter's current value alone.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct AdapterParams {
    /// `Some(None)` clears the focus month
    pub(crate) focus_month: Option<Option<Month>>,
    pub(crate) week_start: Option<Weekday>,
    pub(crate) selected_date: Option<Date>,
    pub(crate) num_weeks: Option<u16>,
    pub(crate) days_per_week: Option<u8>,
}

/// Maps row positions (weeks since 1970) to the parameters of the week shown
/// in that row
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WeeksAdapter {
    selected_date: Date,
    // The row containing `selected_date`
    selected_week: u32,
    week_start: Weekday,
    num_weeks: u16,
    days_per_week: u8,
    focus_month: Option<Month>,
}

impl WeeksAdapter {
    pub(crate) fn new(selected_date: Date, params: &AdapterParams) -> WeeksAdapter {
        let mut adapter = WeeksAdapter {
            selected_date,
            selected_week: 0,
            week_start: Weekday::Sunday,
            num_weeks: DEFAULT_NUM_WEEKS,
            days_per_week: DEFAULT_NUM_DAYS,
            focus_month: None,
        };
        adapter.update_params(params);
        adapter
    }

    pub(crate) fn update_params(&mut self, params: &AdapterParams) {
        if let Some(focus_month) = params.focus_month {
            self.focus_month = focus_month;
        }
        if let Some(num_weeks) = params.num_weeks.filter(|&n| n > 0) {
            self.num_weeks = num_weeks;
        }
        if let Some(week_start) = params.week_start {
            self.week_start = week_start;
        }
        if let Some(date) = params.selected_date {
            self.selected_date = date;
        }
        if let Some(days) = params
            .days_per_week
            .filter(|d| (1..=DEFAULT_NUM_DAYS).contains(d))
        {
            self.days_per_week = days;
        }
        self.selected_week = self.week_of(self.selected_date);
        log::debug!(
            "Adapter updated: selected {} in week {}, weeks start on {}",
            self.selected_date,
            self.selected_week,
            self.week_start
        );
    }

    pub(crate) fn item_count(&self) -> u32 {
        WEEK_COUNT
    }

    pub(crate) fn selected_date(&self) -> Date {
        self.selected_date
    }

    pub(crate) fn selected_week(&self) -> u32 {
        self.selected_week
    }

    pub(crate) fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub(crate) fn days_per_week(&self) -> u8 {
        self.days_per_week
    }

    /// Returns the row containing `date`, clamped to the rows the adapter
    /// provides
    pub(crate) fn week_of(&self, date: Date) -> u32 {
        week_of_julian_day(julian_day(date), self.week_start)
            .unwrap_or(0)
            .min(WEEK_COUNT - 1)
    }

    /// Height of each row when the rows share `viewport_height` lines
    pub(crate) fn row_height(&self, viewport_height: u16) -> u16 {
        viewport_height / self.num_weeks
    }

    /// Binds `holder` to the week at `position`
    pub(crate) fn bind(
        &self,
        holder: &mut SimpleWeekViewHolder,
        position: u32,
        viewport_height: u16,
        zone: &TimeZone,
        now: OffsetDateTime,
    ) -> Result<(), ParamError> {
        let mut drawing_params = *holder.drawing_params();
        let selected_day = (position == self.selected_week).then(|| self.selected_date.weekday());
        drawing_params.height = Some(self.row_height(viewport_height));
        drawing_params.selected_day = Some(selected_day);
        drawing_params.week_start = Some(self.week_start);
        drawing_params.num_days = Some(self.days_per_week);
        drawing_params.week = Some(position);
        drawing_params.focus_month = self.focus_month;
        holder.set_drawing_params(drawing_params, zone, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::week_view::MIN_HEIGHT;
    use time::macros::{date, datetime};
    use time::Weekday::*;

    const NOW: OffsetDateTime = datetime!(2025-01-22 12:00 UTC);

    fn adapter() -> WeeksAdapter {
        WeeksAdapter::new(
            date!(2025 - 01 - 22),
            &AdapterParams {
                focus_month: Some(Some(Month::January)),
                ..AdapterParams::default()
            },
        )
    }

    #[test]
    fn test_selected_week() {
        let mut adapter = adapter();
        assert_eq!(adapter.item_count(), WEEK_COUNT);
        assert_eq!(adapter.selected_week(), 2873);
        adapter.update_params(&AdapterParams {
            selected_date: Some(date!(2025 - 01 - 26)),
            ..AdapterParams::default()
        });
        assert_eq!(adapter.selected_week(), 2874);
        adapter.update_params(&AdapterParams {
            week_start: Some(Monday),
            ..AdapterParams::default()
        });
        // Monday the 20th through Sunday the 26th
        assert_eq!(adapter.selected_week(), 2873);
    }

    #[test]
    fn test_selected_week_clamped() {
        let adapter = WeeksAdapter::new(date!(1960 - 05 - 05), &AdapterParams::default());
        assert_eq!(adapter.selected_week(), 0);
        let adapter = WeeksAdapter::new(date!(2100 - 05 - 05), &AdapterParams::default());
        assert_eq!(adapter.selected_week(), WEEK_COUNT - 1);
    }

    #[test]
    fn test_clear_focus_month() {
        let mut adapter = adapter();
        let mut holder = SimpleWeekViewHolder::default();
        adapter.update_params(&AdapterParams::default());
        adapter
            .bind(&mut holder, 2873, 21, &TimeZone::utc(), NOW)
            .unwrap();
        assert_eq!(holder.drawing_params().focus_month, Some(Month::January));
        adapter.update_params(&AdapterParams {
            focus_month: Some(None),
            ..AdapterParams::default()
        });
        adapter
            .bind(&mut holder, 2873, 21, &TimeZone::utc(), NOW)
            .unwrap();
        assert_eq!(holder.drawing_params().focus_month, None);
        assert!(holder.view().cells().iter().all(|c| !c.in_focus_month));
    }

    #[test]
    fn test_invalid_params_ignored() {
        let mut adapter = adapter();
        adapter.update_params(&AdapterParams {
            num_weeks: Some(0),
            days_per_week: Some(8),
            ..AdapterParams::default()
        });
        assert_eq!(adapter.row_height(24), 4);
        assert_eq!(adapter.days_per_week(), 7);
    }

    #[test]
    fn test_bind_selected_row() {
        let adapter = adapter();
        let mut holder = SimpleWeekViewHolder::default();
        adapter
            .bind(&mut holder, 2873, 21, &TimeZone::utc(), NOW)
            .unwrap();
        let params = holder.drawing_params();
        assert_eq!(params.week, Some(2873));
        assert_eq!(params.height, Some(3));
        assert_eq!(params.selected_day, Some(Some(Wednesday)));
        assert_eq!(params.week_start, Some(Sunday));
        assert_eq!(params.focus_month, Some(Month::January));
        assert_eq!(holder.view().selected_position(), Some(3));
        assert_eq!(holder.view().height(), 3);
        assert_eq!(holder.view().cells()[0].date, date!(2025 - 01 - 19));
    }

    #[test]
    fn test_rebind_other_row() {
        let adapter = adapter();
        let mut holder = SimpleWeekViewHolder::default();
        adapter
            .bind(&mut holder, 2873, 21, &TimeZone::utc(), NOW)
            .unwrap();
        adapter
            .bind(&mut holder, 2880, 6, &TimeZone::utc(), NOW)
            .unwrap();
        assert_eq!(holder.drawing_params().selected_day, Some(None));
        assert_eq!(holder.view().selected_position(), None);
        assert_eq!(holder.view().week(), Some(2880));
        assert_eq!(holder.view().height(), MIN_HEIGHT);
    }

    #[test]
    fn test_bind_days_per_week() {
        let mut adapter = adapter();
        adapter.update_params(&AdapterParams {
            days_per_week: Some(5),
            week_start: Some(Monday),
            ..AdapterParams::default()
        });
        let mut holder = SimpleWeekViewHolder::default();
        adapter
            .bind(&mut holder, 2873, 12, &TimeZone::utc(), NOW)
            .unwrap();
        let dates = holder
            .view()
            .cells()
            .iter()
            .map(|c| c.date)
            .collect::<Vec<_>>();
        assert_eq!(
            dates,
            [
                date!(2025 - 01 - 20),
                date!(2025 - 01 - 21),
                date!(2025 - 01 - 22),
                date!(2025 - 01 - 23),
                date!(2025 - 01 - 24),
            ]
        );
    }
}
