use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;
use time::{Date, Duration, Month, Weekday};

/// Months the calendar may scroll to on either side of the launch month
pub(crate) const MONTH_RADIUS: i32 = 10;

/// A year/month pair, the granularity at which the calendar scrolls
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: Month) -> YearMonth {
        YearMonth { year, month }
    }

    pub(crate) fn of(date: Date) -> YearMonth {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Months since the start of year zero; backs ordering and offset
    /// arithmetic.
    fn index(self) -> i32 {
        self.year * 12 + i32::from(u8::from(self.month)) - 1
    }

    /// Moves `months` months forwards (backwards when negative), rolling
    /// over year boundaries.
    pub(crate) fn offset(self, months: i32) -> YearMonth {
        let index = self.index() + months;
        let month = u8::try_from(index.rem_euclid(12) + 1)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .expect("a month index reduced modulo 12 is a valid month number");
        YearMonth {
            year: index.div_euclid(12),
            month,
        }
    }

    pub(crate) fn first_day(self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1)
            .expect("the first of a displayed month is a valid date")
    }

    pub(crate) fn last_day(self) -> Date {
        Date::from_calendar_date(self.year, self.month, self.month.length(self.year))
            .expect("the last of a displayed month is a valid date")
    }

    pub(crate) fn contains(self, date: Date) -> bool {
        YearMonth::of(date) == self
    }
}

impl Ord for YearMonth {
    fn cmp(&self, other: &YearMonth) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for YearMonth {
    fn partial_cmp(&self, other: &YearMonth) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for YearMonth {
    /// `<full month name>/<year>`, the calendar's title format
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// The active calendar presentation
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum DisplayMode {
    /// Every day of every month in the range is shown
    #[default]
    FullMonth,
    /// Only the days selected by the session's [`WeekRule`] are shown
    Week,
}

/// Which days the folded week view keeps visible.
///
/// The two rules produce materially different windows; a session picks one
/// at launch and keeps it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum WeekRule {
    /// The seven days beginning at the most recent week start on or before
    /// today
    #[default]
    TrailingWeek,
    /// The days from the first of today's month up to the day before the
    /// current week begins. Inverts, and is rejected, when the current week
    /// began on or before the first of the month.
    LeadingPartial,
}

/// Inclusive month bounds the calendar may scroll across
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DisplayRange {
    first: YearMonth,
    last: YearMonth,
}

impl DisplayRange {
    pub(crate) fn new(first: YearMonth, last: YearMonth) -> Result<DisplayRange, InvertedRangeError> {
        if first <= last {
            Ok(DisplayRange { first, last })
        } else {
            Err(InvertedRangeError { first, last })
        }
    }

    /// The months within `radius` months of `anchor`, on both sides
    fn around(anchor: YearMonth, radius: i32) -> DisplayRange {
        DisplayRange {
            first: anchor.offset(-radius),
            last: anchor.offset(radius),
        }
    }

    fn single(month: YearMonth) -> DisplayRange {
        DisplayRange {
            first: month,
            last: month,
        }
    }

    pub(crate) fn first(&self) -> YearMonth {
        self.first
    }

    pub(crate) fn last(&self) -> YearMonth {
        self.last
    }

    pub(crate) fn contains(&self, month: YearMonth) -> bool {
        self.first <= month && month <= self.last
    }

    /// The month of `self` closest to `month`
    pub(crate) fn clamp(&self, month: YearMonth) -> YearMonth {
        month.clamp(self.first, self.last)
    }
}

/// Inclusive run of days left visible by the folded week views
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DaySpan {
    first: Date,
    last: Date,
}

impl DaySpan {
    pub(crate) fn first(&self) -> Date {
        self.first
    }

    pub(crate) fn last(&self) -> Date {
        self.last
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.first <= date && date <= self.last
    }
}

/// Visibility and highlight outcome for one rendered calendar day
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CellDecision {
    pub(crate) visible: bool,
    pub(crate) highlighted: bool,
}

impl CellDecision {
    pub(crate) fn shown(highlighted: bool) -> CellDecision {
        CellDecision {
            visible: true,
            highlighted,
        }
    }

    pub(crate) fn hidden() -> CellDecision {
        CellDecision {
            visible: false,
            highlighted: false,
        }
    }
}

/// A freshly configured calendar window: the scrollable month range, the
/// month to scroll to first, and (for the folded views) the days left
/// visible
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WindowSetup {
    pub(crate) range: DisplayRange,
    pub(crate) focus: YearMonth,
    pub(crate) span: Option<DaySpan>,
}

pub(crate) fn full_month_window(today: Date) -> WindowSetup {
    let anchor = YearMonth::of(today);
    WindowSetup {
        range: DisplayRange::around(anchor, MONTH_RADIUS),
        focus: anchor,
        span: None,
    }
}

pub(crate) fn week_window(
    today: Date,
    week_start: Weekday,
    rule: WeekRule,
) -> Result<WindowSetup, InvertedRangeError> {
    let start_of_week = week_start_on_or_before(today, week_start);
    match rule {
        WeekRule::TrailingWeek => {
            let last = start_of_week
                .checked_add(Duration::days(6))
                .expect("a week out from a clock-supplied date is a valid date");
            let month = YearMonth::of(start_of_week);
            Ok(WindowSetup {
                range: DisplayRange::single(month),
                focus: month,
                span: Some(DaySpan {
                    first: start_of_week,
                    last,
                }),
            })
        }
        WeekRule::LeadingPartial => {
            let start_of_month = today.replace_day(1).expect("every month has a first day");
            let last = start_of_week
                .previous_day()
                .expect("the eve of a clock-supplied week start is a valid date");
            let range = DisplayRange::new(YearMonth::of(start_of_month), YearMonth::of(last))?;
            Ok(WindowSetup {
                range,
                focus: YearMonth::of(start_of_month),
                span: Some(DaySpan {
                    first: start_of_month,
                    last,
                }),
            })
        }
    }
}

/// The most recent date on or before `date` falling on the `week_start`
/// weekday
pub(crate) fn week_start_on_or_before(date: Date, week_start: Weekday) -> Date {
    let back = (date.weekday().number_days_from_sunday() + 7
        - week_start.number_days_from_sunday())
        % 7;
    date.checked_sub(Duration::days(i64::from(back)))
        .expect("the week start of a clock-supplied date is a valid date")
}

/// A computed display range ended before it started
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("calendar range {first} to {last} ends before it starts")]
pub(crate) struct InvertedRangeError {
    first: YearMonth,
    last: YearMonth,
}
