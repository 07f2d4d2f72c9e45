use super::week_view::{ParamError, SimpleWeekView, WeekParams};
use super::zone::TimeZone;
use time::OffsetDateTime;

/// Pairs a recycled row view with the parameters it was last bound to
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct SimpleWeekViewHolder {
    drawing_params: WeekParams,
    view: SimpleWeekView,
}

impl SimpleWeekViewHolder {
    pub(crate) fn new(view: SimpleWeekView) -> SimpleWeekViewHolder {
        SimpleWeekViewHolder {
            drawing_params: WeekParams::default(),
            view,
        }
    }

    pub(crate) fn drawing_params(&self) -> &WeekParams {
        &self.drawing_params
    }

    pub(crate) fn set_drawing_params(
        &mut self,
        drawing_params: WeekParams,
        zone: &TimeZone,
        now: OffsetDateTime,
    ) -> Result<(), ParamError> {
        self.drawing_params = drawing_params;
        self.view.set_week_params(&self.drawing_params, zone, now)
    }

    pub(crate) fn view(&self) -> &SimpleWeekView {
        &self.view
    }

    pub(crate) fn view_mut(&mut self) -> &mut SimpleWeekView {
        &mut self.view
    }
}
