use chrono::Month;
use num_traits::FromPrimitive;

pub const MIN_YEAR: i32 = 1970;
pub const MAX_YEAR: i32 = 9999;

pub const DAYS_PER_WEEK: u32 = 7;

// Offsets of the first of each month relative to the year's weekday shift
const MONTH_OFFSETS: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn is_valid_year(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Weekday of the first day of `month` in `year`, with 0 being Sunday.
///
/// `month` is expected to be in `1..=12`.
pub fn starting_weekday(year: i32, month: u32) -> u32 {
    // January and February count towards the previous year
    let y = if month < 3 { year - 1 } else { year };

    let shift = y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        + MONTH_OFFSETS[month as usize - 1]
        + 1;

    shift.rem_euclid(DAYS_PER_WEEK as i32) as u32
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn month_name(month: u32) -> &'static str {
    Month::from_u32(month).map(|m| m.name()).unwrap_or("")
}

/// Shape of a single month on a 7 column grid starting on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLayout {
    pub starting_weekday: u32,
    pub days_in_month: u32,
}

impl MonthLayout {
    pub fn new(year: i32, month: Month) -> Self {
        let month = month.number_from_month();
        MonthLayout {
            starting_weekday: starting_weekday(year, month),
            days_in_month: days_in_month(year, month),
        }
    }

    /// Yields `(day, column, row)` for every day of the month.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, u32)> {
        let offset = self.starting_weekday;
        (1..=self.days_in_month).map(move |day| {
            let slot = offset + day - 1;
            (day, slot % DAYS_PER_WEEK, slot / DAYS_PER_WEEK)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2400));
        assert!(is_leap_year(2024));
        assert!(is_leap_year(1972));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1970));
    }

    #[test]
    fn month_lengths() {
        for year in &[1970, 1900, 2000, 2023, 2024, 9999] {
            assert_eq!(days_in_month(*year, 2) == 29, is_leap_year(*year));
            for month in &[4, 6, 9, 11] {
                assert_eq!(days_in_month(*year, *month), 30);
            }
            for month in &[1, 3, 5, 7, 8, 10, 12] {
                assert_eq!(days_in_month(*year, *month), 31);
            }
        }
    }

    #[test]
    fn known_starting_weekdays() {
        // Monday
        assert_eq!(starting_weekday(2024, 1), 1);
        // Saturday
        assert_eq!(starting_weekday(2000, 1), 6);
        // Thursday
        assert_eq!(starting_weekday(1970, 1), 4);
        // Sunday
        assert_eq!(starting_weekday(2023, 10), 0);
    }

    #[test]
    fn starting_weekday_matches_chrono() {
        for year in MIN_YEAR..=2400 {
            for month in 1..=12 {
                let first = NaiveDate::from_ymd_opt(year, month, 1)
                    .expect("first of month is always a valid date");
                assert_eq!(
                    starting_weekday(year, month),
                    first.weekday().num_days_from_sunday(),
                    "{}-{:02}",
                    year,
                    month
                );
            }
        }
    }

    #[test]
    fn starting_weekday_repeats_every_gregorian_cycle() {
        for month in 1..=12 {
            assert_eq!(
                starting_weekday(2024, month),
                starting_weekday(2024 + 400, month)
            );
        }
    }

    #[test]
    fn layout_wraps_rows() {
        // February 2015 starts on Sunday and fills exactly four rows
        let layout = MonthLayout::new(2015, Month::February);
        assert_eq!(layout.starting_weekday, 0);
        assert_eq!(layout.days_in_month, 28);
        assert_eq!(layout.cells().last(), Some((28, 6, 3)));

        let cells: Vec<_> = MonthLayout::new(2024, Month::January).cells().collect();
        assert_eq!(cells.len(), 31);
        assert_eq!(cells[0], (1, 1, 0));
        assert_eq!(cells[5], (6, 6, 0));
        assert_eq!(cells[6], (7, 0, 1));
        assert_eq!(cells[30], (31, 3, 4));
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "");
    }
}
