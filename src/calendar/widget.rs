use super::grid::{month_weeks, week_order};
use super::range::{CellDecision, YearMonth};
use super::window::MonthWindow;
use crate::theme::{ADJACENT_MONTH_STYLE, BASE_STYLE, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE};
use ratatui::prelude::*;
use std::iter::zip;
use time::{Date, Weekday};

/// Number of columns per day of week
const DAY_WIDTH: u16 = 5;

/// Width of the calendar grid in columns
const GRID_WIDTH: u16 = DAY_WIDTH * 7 - 1;

/// Number of lines taken up by the month title and the gap under it
const TITLE_LINES: u16 = 2;

/// Number of lines taken up by the weekday header and its rule
const HEADER_LINES: u16 = 2;

/// Number of lines taken up by each week row of the calendar
const WEEK_LINES: u16 = 2;

const ACS_HLINE: char = '─';

/// Renders a [`MonthWindow`]: the month title, a weekday header aligned to
/// the session's week start, and one row per week of the visible month.
/// Cells the window hides are left blank, and week rows with no visible cell
/// are collapsed entirely, so the folded week view shrinks to a single row.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Calendar;

impl StatefulWidget for Calendar {
    type State = MonthWindow;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut MonthWindow) {
        let left = area.width.saturating_sub(GRID_WIDTH) / 2;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(left),
                Constraint::Length(GRID_WIDTH.min(area.width)),
                Constraint::Min(0),
            ])
            .split(area);
        let mut canvas = BufferCanvas::new(chunks[1], buf);
        canvas.draw_title(&state.title());
        canvas.draw_header(state.week_start());
        let month = state.visible_month();
        let mut row = 0u16;
        for week in month_weeks(month, state.week_start()) {
            if !week.days().any(|date| state.decide(date).visible) {
                continue;
            }
            for (col, date) in zip(0u16.., week.days()) {
                let decision = state.decide(date);
                if decision.visible {
                    canvas.draw_day(row, col, day_cell(date, decision, month));
                }
            }
            row += 1;
        }
    }
}

fn day_cell(date: Date, decision: CellDecision, month: YearMonth) -> Span<'static> {
    let s = if decision.highlighted {
        format!("[{:2}]", date.day())
    } else {
        format!(" {:2} ", date.day())
    };
    let style = if decision.highlighted {
        TODAY_STYLE
    } else if month.contains(date) {
        BASE_STYLE
    } else {
        ADJACENT_MONTH_STYLE
    };
    Span::styled(s, style)
}

fn weekday_label(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Sunday => "Su",
        Weekday::Monday => "Mo",
        Weekday::Tuesday => "Tu",
        Weekday::Wednesday => "We",
        Weekday::Thursday => "Th",
        Weekday::Friday => "Fr",
        Weekday::Saturday => "Sa",
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.len()).unwrap_or(GRID_WIDTH);
        let x = GRID_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, title, Some(TITLE_STYLE));
    }

    fn draw_header(&mut self, week_start: Weekday) {
        for (col, wd) in zip(0u16.., week_order(week_start)) {
            self.mvprint(
                TITLE_LINES,
                col * DAY_WIDTH,
                format!(" {} ", weekday_label(wd)),
                Some(WEEKDAY_STYLE),
            );
        }
        self.hline(TITLE_LINES + 1, 0, ACS_HLINE, GRID_WIDTH);
    }

    fn draw_day(&mut self, row: u16, col: u16, s: Span<'_>) {
        self.mvprint(
            TITLE_LINES + HEADER_LINES + row * WEEK_LINES,
            col * DAY_WIDTH,
            s.content,
            Some(s.style),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_string(
                self.area.x + x,
                self.area.y + y,
                s,
                style.unwrap_or_default(),
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
