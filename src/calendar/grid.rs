use super::range::{week_start_on_or_before, YearMonth};
use std::iter::successors;
use time::{Date, Duration, Weekday};

const DAYS_IN_WEEK: usize = 7;

/// One calendar row: seven consecutive dates beginning on the session's week
/// start. Rows at the edges of a month carry dates of the adjacent months.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Week([Date; DAYS_IN_WEEK]);

impl Week {
    fn starting(first: Date) -> Week {
        let mut days = [first; DAYS_IN_WEEK];
        for i in 1..DAYS_IN_WEEK {
            days[i] = days[i - 1]
                .next_day()
                .expect("dates within a displayed month stay in range");
        }
        Week(days)
    }

    pub(super) fn days(&self) -> impl Iterator<Item = Date> + '_ {
        self.0.iter().copied()
    }
}

/// The week rows of `month` aligned to `week_start`: every week containing at
/// least one day of the month, oldest first. Four to six rows.
pub(super) fn month_weeks(month: YearMonth, week_start: Weekday) -> Vec<Week> {
    let mut weeks = Vec::with_capacity(6);
    let mut row_start = week_start_on_or_before(month.first_day(), week_start);
    let last = month.last_day();
    while row_start <= last {
        weeks.push(Week::starting(row_start));
        row_start = row_start
            .checked_add(Duration::days(7))
            .expect("dates within a displayed month stay in range");
    }
    weeks
}

/// The weekdays in column order for a week beginning on `week_start`
pub(super) fn week_order(week_start: Weekday) -> impl Iterator<Item = Weekday> {
    successors(Some(week_start), |wd| Some(wd.next())).take(DAYS_IN_WEEK)
}
