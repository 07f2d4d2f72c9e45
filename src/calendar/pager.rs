use super::adapter::{AdapterParams, WeeksAdapter};
use super::holder::SimpleWeekViewHolder;
use super::julian::{julian_day, week_of_julian_day};
use super::week_view::{ParamError, SimpleWeekView, MIN_HEIGHT};
use super::zone::TimeZone;
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};
use thiserror::Error;
use time::{
    format_description::FormatItem, macros::format_description, Date, OffsetDateTime, Weekday,
};

/// A press and release further apart than this is not a tap
pub(crate) const CLICK_TIME_OUT: Duration = Duration::from_millis(500);

static ANNOUNCE_FMT: &[FormatItem<'_>] =
    format_description!("[weekday], [month repr:long] [day padding:none], [year]");

/// The scrolling window of week rows.  Holders are recycled: there is one per
/// visible row, each rebound to a new week whenever the window moves.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WeekPager {
    adapter: WeeksAdapter,
    zone: TimeZone,
    now: OffsetDateTime,
    // First visible row; `None` until laid out, or after a jump, in which
    // case the next layout centers the selected week
    top: Option<u32>,
    visible: u32,
    holders: Vec<SimpleWeekViewHolder>,
    rows: Vec<Rect>,
    pending_tap: Option<PendingTap>,
    last_hover: Option<Date>,
    announcement: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PendingTap {
    row: usize,
    at: Instant,
}

impl WeekPager {
    pub(crate) fn new(adapter: WeeksAdapter, zone: TimeZone, now: OffsetDateTime) -> WeekPager {
        WeekPager {
            adapter,
            zone,
            now,
            top: None,
            visible: 0,
            holders: Vec::new(),
            rows: Vec::new(),
            pending_tap: None,
            last_hover: None,
            announcement: None,
        }
    }

    pub(crate) fn adapter(&self) -> &WeeksAdapter {
        &self.adapter
    }

    pub(crate) fn zone(&self) -> &TimeZone {
        &self.zone
    }

    pub(crate) fn today(&self) -> Date {
        self.zone.today(self.now)
    }

    pub(crate) fn set_now(&mut self, now: OffsetDateTime) {
        self.now = now;
    }

    /// Binds one holder per row that fits in `area`.  Rows span the width of
    /// `area`, with `padding` columns of padding on either side.
    pub(crate) fn layout(&mut self, area: Rect, padding: u16) -> Result<(), ParamError> {
        let height = self.adapter.row_height(area.height).max(MIN_HEIGHT);
        let count = self.adapter.item_count();
        self.visible = u32::from(area.height / height).clamp(1, count);
        let last_top = count - self.visible;
        let top = match self.top {
            Some(top) => top.min(last_top),
            None => self
                .adapter
                .selected_week()
                .saturating_sub(self.visible / 2)
                .min(last_top),
        };
        self.top = Some(top);
        let visible = usize::try_from(self.visible).unwrap_or(usize::MAX);
        self.holders
            .resize_with(visible, || SimpleWeekViewHolder::new(SimpleWeekView::new()));
        self.rows.clear();
        for (i, holder) in std::iter::zip(0u16.., self.holders.iter_mut()) {
            self.adapter
                .bind(holder, top + u32::from(i), area.height, &self.zone, self.now)?;
            let view = holder.view_mut();
            view.on_size_changed(area.width);
            view.set_padding(padding);
            self.rows.push(Rect {
                x: area.x,
                y: area.y.saturating_add(i.saturating_mul(height)),
                width: area.width,
                height: view.height(),
            });
        }
        Ok(())
    }

    /// The laid-out rows and their screen positions, top to bottom
    pub(crate) fn rows(&self) -> impl Iterator<Item = (Rect, &SimpleWeekView)> + '_ {
        std::iter::zip(
            self.rows.iter().copied(),
            self.holders.iter().map(SimpleWeekViewHolder::view),
        )
    }

    pub(crate) fn one_week_forwards(&mut self) -> Result<(), OutOfRangeError> {
        self.scroll_by(1)
    }

    pub(crate) fn one_week_backwards(&mut self) -> Result<(), OutOfRangeError> {
        self.scroll_by(-1)
    }

    pub(crate) fn one_page_forwards(&mut self) -> Result<(), OutOfRangeError> {
        self.scroll_by(i64::from(self.visible))
    }

    pub(crate) fn one_page_backwards(&mut self) -> Result<(), OutOfRangeError> {
        self.scroll_by(-i64::from(self.visible))
    }

    // Scrolls as far as possible towards `delta` rows away, failing only if
    // the window cannot move at all
    fn scroll_by(&mut self, delta: i64) -> Result<(), OutOfRangeError> {
        let Some(top) = self.top else {
            return Ok(());
        };
        let last_top = i64::from(self.adapter.item_count() - self.visible);
        let target = (i64::from(top) + delta).clamp(0, last_top);
        let target = u32::try_from(target).map_err(|_| OutOfRangeError)?;
        if target == top && delta != 0 {
            return Err(OutOfRangeError);
        }
        self.top = Some(target);
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.jump_to_date(self.today());
    }

    pub(crate) fn jump_to_date(&mut self, date: Date) {
        self.adapter.update_params(&AdapterParams {
            selected_date: Some(date),
            ..AdapterParams::default()
        });
        self.top = None;
    }

    /// Moves the selected date `days` days forwards (or backwards), scrolling
    /// to keep it in view
    pub(crate) fn move_selection(&mut self, days: i64) -> Result<(), OutOfRangeError> {
        let date = self
            .adapter
            .selected_date()
            .checked_add(time::Duration::days(days))
            .ok_or(OutOfRangeError)?;
        let week = self.adapter.week_of(date);
        // `week_of()` clamps, so compare against the unclamped row
        if week_of_julian_day(julian_day(date), self.adapter.week_start()) != Some(week) {
            return Err(OutOfRangeError);
        }
        self.adapter.update_params(&AdapterParams {
            selected_date: Some(date),
            ..AdapterParams::default()
        });
        if let Some(top) = self.top {
            if week < top {
                self.top = Some(week);
            } else if week >= top + self.visible {
                self.top = Some(week + 1 - self.visible);
            }
        }
        Ok(())
    }

    /// Makes the day after the current week start the new week start
    pub(crate) fn cycle_week_start(&mut self) -> Weekday {
        let week_start = self.adapter.week_start().next();
        self.adapter.update_params(&AdapterParams {
            week_start: Some(week_start),
            ..AdapterParams::default()
        });
        self.top = None;
        log::info!("Weeks now start on {week_start}");
        week_start
    }

    /// Returns the index of the row under the given screen position and the
    /// column relative to that row
    pub(crate) fn hit_test(&self, column: u16, row: u16) -> Option<(usize, u16)> {
        let pos = Position::new(column, row);
        let i = self.rows.iter().position(|r| r.contains(pos))?;
        let rect = self.rows.get(i)?;
        Some((i, column - rect.x))
    }

    pub(crate) fn press(&mut self, column: u16, row: u16, at: Instant) {
        self.pending_tap = self
            .hit_test(column, row)
            .map(|(row, _)| PendingTap { row, at });
    }

    /// Completes a tap begun by [`WeekPager::press`].  If the release lands
    /// on the same row in time, the date under it becomes the selected date
    /// and is returned.
    pub(crate) fn release(&mut self, column: u16, row: u16, at: Instant) -> Option<Date> {
        let tap = self.pending_tap.take()?;
        if at.saturating_duration_since(tap.at) > CLICK_TIME_OUT {
            log::debug!("Ignoring slow tap");
            return None;
        }
        let (i, x) = self.hit_test(column, row)?;
        if i != tap.row {
            return None;
        }
        let holder = self.holders.get_mut(i)?;
        let date = holder.view_mut().select_from_location(x)?;
        log::info!("Selected {date} in week {:?}", holder.view().week());
        self.adapter.update_params(&AdapterParams {
            selected_date: Some(date),
            ..AdapterParams::default()
        });
        Some(date)
    }

    /// Updates the announcement for the date under the pointer.  Returns
    /// `true` if the hovered date changed.
    pub(crate) fn hover(&mut self, column: u16, row: u16) -> bool {
        let date = self
            .hit_test(column, row)
            .and_then(|(i, x)| self.holders.get(i)?.view().day_from_location(x));
        if date == self.last_hover {
            return false;
        }
        self.last_hover = date;
        self.announcement = date.map(announce);
        if let Some(ref s) = self.announcement {
            log::debug!("Hovering {s}");
        }
        true
    }

    /// Text for the status line: the hovered date if there is one, else the
    /// selected date
    pub(crate) fn status(&self) -> String {
        self.announcement
            .clone()
            .unwrap_or_else(|| announce(self.adapter.selected_date()))
    }
}

/// Formats `date` the way it is announced to the user, e.g., "Wednesday,
/// January 22, 2025"
pub(crate) fn announce(date: Date) -> String {
    date.format(ANNOUNCE_FMT)
        .unwrap_or_else(|_| date.to_string())
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("no more weeks in that direction")]
pub(crate) struct OutOfRangeError;
