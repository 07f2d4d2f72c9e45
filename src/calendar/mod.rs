mod adapter;
mod canvas;
mod holder;
mod julian;
mod pager;
mod week_view;
mod widget;
mod zone;
pub(crate) use self::adapter::{AdapterParams, WeeksAdapter, DEFAULT_NUM_WEEKS};
pub(crate) use self::julian::weekday_from_index0;
pub(crate) use self::pager::WeekPager;
pub(crate) use self::widget::Calendar;
pub(crate) use self::zone::TimeZone;
