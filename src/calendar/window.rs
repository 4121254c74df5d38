use super::range::{
    full_month_window, week_window, CellDecision, DaySpan, DisplayMode, DisplayRange,
    InvertedRangeError, WeekRule, YearMonth,
};
use thiserror::Error;
use time::{Date, Weekday};

/// Session state for the calendar screen: the active display mode, the month
/// range it was configured with, and the viewport month the title reflects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthWindow {
    today: Date,
    week_start: Weekday,
    rule: WeekRule,
    mode: DisplayMode,
    range: DisplayRange,
    span: Option<DaySpan>,
    focus: YearMonth,
    visible: YearMonth,
}

impl MonthWindow {
    /// Opens the calendar in the full-month mode, centered on today's month.
    pub(crate) fn launch(today: Date, week_start: Weekday, rule: WeekRule) -> MonthWindow {
        let setup = full_month_window(today);
        MonthWindow {
            today,
            week_start,
            rule,
            mode: DisplayMode::FullMonth,
            range: setup.range,
            span: setup.span,
            focus: setup.focus,
            visible: setup.focus,
        }
    }

    /// Scrolls the initial viewport to the month closest to `month` that the
    /// configured range allows.
    pub(crate) fn open_at(mut self, month: YearMonth) -> MonthWindow {
        self.visible = self.range.clamp(month);
        self
    }

    pub(crate) fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub(crate) fn visible_month(&self) -> YearMonth {
        self.visible
    }

    /// The `<full month name>/<year>` heading for the current viewport
    pub(crate) fn title(&self) -> String {
        self.visible.to_string()
    }

    /// Records the date the clock reported for this render pass. The
    /// highlight follows it; the configured range does not.
    pub(crate) fn observe_today(&mut self, today: Date) {
        self.today = today;
    }

    /// Flips the display mode, reconfiguring the range, the visible days,
    /// and the viewport from the currently observed today. All-or-nothing:
    /// when the week rule rejects its range the previous state stays in
    /// effect.
    pub(crate) fn toggle(&mut self) -> Result<(), InvertedRangeError> {
        let (mode, setup) = match self.mode {
            DisplayMode::FullMonth => (
                DisplayMode::Week,
                week_window(self.today, self.week_start, self.rule)?,
            ),
            DisplayMode::Week => (DisplayMode::FullMonth, full_month_window(self.today)),
        };
        self.mode = mode;
        self.range = setup.range;
        self.span = setup.span;
        self.focus = setup.focus;
        self.visible = setup.focus;
        Ok(())
    }

    /// Visibility and highlight for one candidate cell, selected by the
    /// active mode
    pub(crate) fn decide(&self, date: Date) -> CellDecision {
        let visible = match self.mode {
            DisplayMode::FullMonth => self.range.contains(YearMonth::of(date)),
            DisplayMode::Week => self.span.is_some_and(|span| span.contains(date)),
        };
        if visible {
            CellDecision::shown(date == self.today)
        } else {
            CellDecision::hidden()
        }
    }

    pub(crate) fn month_forwards(&mut self) -> Result<(), EndOfRangeError> {
        let next = self.visible.offset(1);
        if self.range.contains(next) {
            self.visible = next;
            Ok(())
        } else {
            Err(EndOfRangeError)
        }
    }

    pub(crate) fn month_backwards(&mut self) -> Result<(), EndOfRangeError> {
        let previous = self.visible.offset(-1);
        if self.range.contains(previous) {
            self.visible = previous;
            Ok(())
        } else {
            Err(EndOfRangeError)
        }
    }

    /// Returns the viewport to the mode's scroll target
    pub(crate) fn jump_to_today(&mut self) {
        self.visible = match self.mode {
            DisplayMode::FullMonth => self.range.clamp(YearMonth::of(self.today)),
            DisplayMode::Week => self.focus,
        };
    }
}

/// Scrolling was asked to leave the configured month range
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("reached the edge of the calendar range")]
pub(crate) struct EndOfRangeError;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month;
    use time::Weekday::Sunday;

    fn launch_jan15() -> MonthWindow {
        MonthWindow::launch(date!(2024 - 01 - 15), Sunday, WeekRule::TrailingWeek)
    }

    #[test]
    fn launch_configures_the_full_month_view() {
        let window = launch_jan15();
        assert_eq!(window.mode, DisplayMode::FullMonth);
        assert_eq!(window.range.first(), YearMonth::new(2023, Month::March));
        assert_eq!(window.range.last(), YearMonth::new(2024, Month::November));
        assert_eq!(window.visible, YearMonth::new(2024, Month::January));
        assert_eq!(window.title(), "January/2024");
    }

    #[test]
    fn full_month_highlights_only_today() {
        let window = launch_jan15();
        assert_eq!(window.decide(date!(2024 - 01 - 15)), CellDecision::shown(true));
        assert_eq!(window.decide(date!(2024 - 01 - 16)), CellDecision::shown(false));
        assert_eq!(window.decide(date!(2023 - 03 - 01)), CellDecision::shown(false));
    }

    #[test]
    fn full_month_hides_dates_outside_the_range() {
        let window = launch_jan15();
        assert_eq!(window.decide(date!(2023 - 02 - 28)), CellDecision::hidden());
        assert_eq!(window.decide(date!(2024 - 12 - 01)), CellDecision::hidden());
    }

    #[test]
    fn toggle_folds_to_the_trailing_week() {
        let mut window = MonthWindow::launch(date!(2024 - 03 - 15), Sunday, WeekRule::TrailingWeek);
        window
            .toggle()
            .expect("the trailing rule cannot produce an inverted range");
        assert_eq!(window.mode, DisplayMode::Week);
        assert_eq!(window.range.first(), YearMonth::new(2024, Month::March));
        assert_eq!(window.range.last(), YearMonth::new(2024, Month::March));
        assert_eq!(window.visible, YearMonth::new(2024, Month::March));
        let span = window.span.expect("the folded view keeps a day span");
        assert_eq!(span.first(), date!(2024 - 03 - 10));
        assert_eq!(span.last(), date!(2024 - 03 - 16));
        assert_eq!(window.decide(date!(2024 - 03 - 15)), CellDecision::shown(true));
        assert_eq!(window.decide(date!(2024 - 03 - 12)), CellDecision::shown(false));
        assert_eq!(window.decide(date!(2024 - 03 - 09)), CellDecision::hidden());
        assert_eq!(window.decide(date!(2024 - 03 - 17)), CellDecision::hidden());
    }

    #[test]
    fn toggling_twice_returns_to_the_full_month_state() {
        let mut window = launch_jan15();
        let before = window;
        window
            .toggle()
            .expect("the trailing rule cannot produce an inverted range");
        window.toggle().expect("unfolding always succeeds");
        assert_eq!(window, before);
    }

    #[test]
    fn rejected_toggle_leaves_the_state_alone() {
        // 2024-03-01 was a Friday, which inverts the leading-partial span
        let mut window =
            MonthWindow::launch(date!(2024 - 03 - 01), Sunday, WeekRule::LeadingPartial);
        let before = window;
        assert!(window.toggle().is_err());
        assert_eq!(window, before);
    }

    #[test]
    fn leading_partial_shows_the_elapsed_part_of_the_month() {
        let mut window =
            MonthWindow::launch(date!(2024 - 03 - 20), Sunday, WeekRule::LeadingPartial);
        window
            .toggle()
            .expect("the week started after the first of the month");
        let span = window.span.expect("the folded view keeps a day span");
        assert_eq!(span.first(), date!(2024 - 03 - 01));
        assert_eq!(span.last(), date!(2024 - 03 - 16));
        assert_eq!(window.decide(date!(2024 - 03 - 08)), CellDecision::shown(false));
        // today itself falls outside the elapsed part
        assert_eq!(window.decide(date!(2024 - 03 - 20)), CellDecision::hidden());
    }

    #[test]
    fn paging_is_clamped_to_the_range() {
        let mut window = launch_jan15();
        for _ in 0..10 {
            window
                .month_forwards()
                .expect("ten months forwards stay in range");
        }
        assert_eq!(window.visible, YearMonth::new(2024, Month::November));
        assert_eq!(window.month_forwards(), Err(EndOfRangeError));
        assert_eq!(window.visible, YearMonth::new(2024, Month::November));
        for _ in 0..20 {
            window
                .month_backwards()
                .expect("twenty months backwards from the far edge stay in range");
        }
        assert_eq!(window.visible, YearMonth::new(2023, Month::March));
        assert_eq!(window.month_backwards(), Err(EndOfRangeError));
    }

    #[test]
    fn paging_in_the_folded_view_has_nowhere_to_go() {
        let mut window = launch_jan15();
        window
            .toggle()
            .expect("the trailing rule cannot produce an inverted range");
        assert_eq!(window.month_forwards(), Err(EndOfRangeError));
        assert_eq!(window.month_backwards(), Err(EndOfRangeError));
    }

    #[test]
    fn highlight_follows_the_observed_day() {
        let mut window = launch_jan15();
        let range = window.range;
        window.observe_today(date!(2024 - 01 - 16));
        assert_eq!(window.decide(date!(2024 - 01 - 15)), CellDecision::shown(false));
        assert_eq!(window.decide(date!(2024 - 01 - 16)), CellDecision::shown(true));
        assert_eq!(window.range, range);
    }

    #[test]
    fn open_at_clamps_into_the_range() {
        let window = launch_jan15().open_at(YearMonth::new(2030, Month::June));
        assert_eq!(window.visible, YearMonth::new(2024, Month::November));
        let window = launch_jan15().open_at(YearMonth::new(2023, Month::June));
        assert_eq!(window.visible, YearMonth::new(2023, Month::June));
    }

    #[test]
    fn jump_to_today_returns_to_the_scroll_target() {
        let mut window = launch_jan15();
        window
            .month_backwards()
            .expect("one month backwards stays in range");
        window.jump_to_today();
        assert_eq!(window.visible, YearMonth::new(2024, Month::January));
    }
}
