use time::Weekday;

/// Drawing surface for a single week row.  Coordinates are columns relative
/// to the left edge of the row.
pub(crate) trait RowCanvas {
    /// Shades the columns `left..right` on every line of the row above its
    /// rule
    fn fill_cell(&mut self, left: u16, right: u16, shade: CellShade);

    fn draw_label(&mut self, x: u16, label: &str, tone: LabelTone);

    /// Draws a dashed divider down the column `x`
    fn draw_divider(&mut self, x: u16);

    /// Draws the rule along the bottom line of the row
    fn draw_rule(&mut self);

    fn draw_month_separator(&mut self, separator: MonthSeparator);

    fn draw_selection(&mut self, left: u16, right: u16);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CellShade {
    OddMonth,
    Today,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DayKind {
    Weekday,
    Saturday,
    Sunday,
    Today,
}

impl DayKind {
    pub(crate) fn for_weekday(wd: Weekday) -> DayKind {
        match wd {
            Weekday::Saturday => DayKind::Saturday,
            Weekday::Sunday => DayKind::Sunday,
            _ => DayKind::Weekday,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LabelTone {
    pub(crate) kind: DayKind,
    pub(crate) past: bool,
    pub(crate) out_of_focus: bool,
}

/// The line between two months within a row.
///
/// The separator runs along the bottom edge of the row up to the first day of
/// the new month, climbs that day's left edge, and continues along the top
/// edge to the end of the row.  When the month starts in the first cell, only
/// the top edge is drawn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MonthSeparator {
    Top,
    Step { x: u16 },
}
