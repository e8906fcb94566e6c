use chrono::{Datelike, Month, NaiveDate};
use std::fmt::{self, Display};

use crate::calendar::{month_name, MonthLayout, DAYS_PER_WEEK};
use crate::host::{GlyphKind, Position, Screen, Tone};

pub struct DayCell {
    day_num: u32,
    weekend: bool,
    is_today: bool,
}

impl DayCell {
    fn new(day_num: u32) -> Self {
        DayCell {
            day_num,
            weekend: false,
            is_today: false,
        }
    }

    fn weekend(mut self, weekend: bool) -> Self {
        self.weekend = weekend;
        self
    }

    fn today(mut self, is_today: bool) -> Self {
        self.is_today = is_today;
        self
    }

    fn tone(&self) -> Tone {
        if self.is_today {
            Tone::Today
        } else if self.weekend {
            Tone::Weekend
        } else {
            Tone::Normal
        }
    }
}

impl Display for DayCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>2}", self.day_num)
    }
}

/// A single month laid out on the 160x120 screen.
pub struct MonthView {
    year: i32,
    month: Month,
    layout: MonthLayout,
    today: Option<u32>,
}

impl MonthView {
    const TITLE_Y: i32 = 20;
    const MONTH_X: i32 = 60;
    const YEAR_X: i32 = 110;

    const HEADER: [&'static str; 7] = ["S", "M", "T", "W", "T", "F", "S"];
    const HEADER_Y: i32 = 35;

    const GRID_X: i32 = 35;
    const GRID_Y: i32 = 50;
    const COLUMN_WIDTH: i32 = 15;
    const ROW_HEIGHT: i32 = 10;

    pub fn new(year: i32, month: Month, today: NaiveDate) -> Self {
        let today = if today.year() == year && today.month() == month.number_from_month() {
            Some(today.day())
        } else {
            None
        };

        MonthView {
            year,
            month,
            layout: MonthLayout::new(year, month),
            today,
        }
    }

    fn is_weekend(column: u32) -> bool {
        column == 0 || column == DAYS_PER_WEEK - 1
    }

    fn cell_position(column: u32, row: u32) -> Position {
        Position::new(
            Self::GRID_X + Self::COLUMN_WIDTH * column as i32,
            Self::GRID_Y + Self::ROW_HEIGHT * row as i32,
        )
    }

    pub fn draw<S: Screen + ?Sized>(&self, screen: &mut S) {
        let kind = GlyphKind::Text;

        screen.create_text(
            month_name(self.month.number_from_month()),
            Position::new(Self::MONTH_X, Self::TITLE_Y),
            Tone::Header,
            kind,
        );
        screen.create_text(
            &self.year.to_string(),
            Position::new(Self::YEAR_X, Self::TITLE_Y),
            Tone::Header,
            kind,
        );

        for (column, head) in Self::HEADER.iter().enumerate() {
            let tone = if Self::is_weekend(column as u32) {
                Tone::Weekend
            } else {
                Tone::Header
            };
            screen.create_text(
                head,
                Position::new(
                    Self::GRID_X + Self::COLUMN_WIDTH * column as i32,
                    Self::HEADER_Y,
                ),
                tone,
                kind,
            );
        }

        for (day, column, row) in self.layout.cells() {
            let cell = DayCell::new(day)
                .weekend(Self::is_weekend(column))
                .today(self.today == Some(day));

            screen.create_text(
                &cell.to_string(),
                Self::cell_position(column, row),
                cell.tone(),
                kind,
            );
        }
    }
}

/// Repaints the whole month, dropping whatever was drawn before.
pub fn render<S: Screen + ?Sized>(screen: &mut S, year: i32, month: Month, today: NaiveDate) {
    screen.destroy_all_of_kind(GlyphKind::Text);
    MonthView::new(year, month, today).draw(screen);
}
