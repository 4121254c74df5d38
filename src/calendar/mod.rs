mod grid;
mod range;
mod widget;
mod window;
pub(crate) use self::range::{WeekRule, YearMonth};
pub(crate) use self::widget::Calendar;
pub(crate) use self::window::MonthWindow;
