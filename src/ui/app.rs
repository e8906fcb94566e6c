use chrono::{Datelike, Month};
use num_traits::FromPrimitive;

use super::month_view;
use crate::calendar::{is_valid_year, MAX_YEAR, MIN_YEAR};
use crate::error::{Error, ErrorKind, Result};
use crate::host::{Button, DialogLayout, Host};

const YEAR_DIGITS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    pub year: i32,
    pub month: Month,
    /// The screen no longer shows `year`/`month`
    pub dirty: bool,
}

impl CalendarState {
    pub fn new(year: i32, month: Month) -> Self {
        CalendarState {
            year,
            month,
            dirty: true,
        }
    }

    pub fn next_month(&mut self) {
        self.month = self.month.succ();
        if self.month == Month::January {
            self.year += 1;
        }
        self.dirty = true;
    }

    pub fn prev_month(&mut self) {
        self.month = self.month.pred();
        if self.month == Month::December {
            self.year -= 1;
        }
        self.dirty = true;
    }

    pub fn next_year(&mut self) {
        self.year += 1;
        self.dirty = true;
    }

    pub fn prev_year(&mut self) {
        self.year -= 1;
        self.dirty = true;
    }

    pub fn jump_to_year(&mut self, input: Option<i32>) -> Result<i32> {
        match input {
            Some(year) if is_valid_year(year) => {
                self.year = year;
                self.dirty = true;
                Ok(year)
            }
            other => Err(Error::from(ErrorKind::InvalidUserInput(other))),
        }
    }

    pub fn go_to(&mut self, year: i32, month: Month) {
        self.year = year;
        self.month = month;
        self.dirty = true;
    }

    pub fn check_bounds(&self) -> Result<()> {
        if is_valid_year(self.year) {
            Ok(())
        } else {
            Err(Error::from(ErrorKind::OutOfRangeYear(self.year)))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Running,
    /// The host environment was reset during this frame
    Reset,
}

pub struct App {
    initial: CalendarState,
    state: CalendarState,
}

impl App {
    pub fn new(year: i32, month: Month) -> Result<Self> {
        let state = CalendarState::new(year, month);
        state.check_bounds()?;

        Ok(App {
            initial: state,
            state,
        })
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    /// Runs one frame. Must be called once per display refresh.
    pub fn update<H: Host + ?Sized>(&mut self, host: &mut H) -> Flow {
        if let Err(err) = self.state.check_bounds() {
            log::warn!("{}, resetting calendar", err);
            host.show_long_text(&err.notice(), DialogLayout::Bottom);
            host.reset();
            self.state = self.initial;
            return Flow::Reset;
        }

        if self.state.dirty {
            let today = host.today();
            log::debug!(
                "Rendering {} {}",
                self.state.month.name(),
                self.state.year
            );
            month_view::render(host, self.state.year, self.state.month, today);
            self.state.dirty = false;
        }

        if host.is_pressed(Button::A) {
            self.ask_for_year(host);
            host.set_pressed(Button::A, false);
        }

        if host.is_pressed(Button::Left) {
            self.state.prev_month();
            host.set_pressed(Button::Left, false);
        } else if host.is_pressed(Button::Right) {
            self.state.next_month();
            host.set_pressed(Button::Right, false);
        }

        if host.is_pressed(Button::Up) {
            self.state.next_year();
            host.set_pressed(Button::Up, false);
        } else if host.is_pressed(Button::Down) {
            self.state.prev_year();
            host.set_pressed(Button::Down, false);
        }

        if host.is_pressed(Button::B) {
            let today = host.today();
            if let Some(month) = Month::from_u32(today.month()) {
                self.state.go_to(today.year(), month);
            }
            host.set_pressed(Button::B, false);
        }

        Flow::Running
    }

    fn ask_for_year<H: Host + ?Sized>(&mut self, host: &mut H) {
        let prompt = format!("Jump to year ({}-{}):", MIN_YEAR, MAX_YEAR);
        let input = host.ask_for_number(&prompt, YEAR_DIGITS);

        match self.state.jump_to_year(input) {
            Ok(year) => {
                log::info!("Jumped to {}", year);
                host.show_long_text(&format!("Jumped to {}", year), DialogLayout::Bottom);
            }
            Err(err) => {
                log::info!("Rejected year input: {}", err);
                host.show_long_text(&err.notice(), DialogLayout::Bottom);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockHost;
    use crate::host::Controller;
    use chrono::NaiveDate;

    fn started(year: i32, month: Month) -> (App, MockHost) {
        let mut app = App::new(year, month).unwrap();
        let mut host = MockHost::new();
        assert_eq!(app.update(&mut host), Flow::Running);
        (app, host)
    }

    #[test]
    fn rejects_out_of_range_start() {
        assert!(App::new(1969, Month::January).is_err());
        assert!(App::new(10000, Month::January).is_err());
        assert!(App::new(1970, Month::January).is_ok());
        assert!(App::new(9999, Month::December).is_ok());
    }

    #[test]
    fn month_wraps_into_adjacent_years() {
        let mut state = CalendarState::new(2024, Month::January);
        state.prev_month();
        assert_eq!((state.year, state.month), (2023, Month::December));
        state.next_month();
        assert_eq!((state.year, state.month), (2024, Month::January));

        let mut state = CalendarState::new(2024, Month::December);
        state.next_month();
        assert_eq!((state.year, state.month), (2025, Month::January));
    }

    #[test]
    fn first_frame_paints_once() {
        let (mut app, mut host) = started(2024, Month::January);
        assert_eq!(host.clears, 1);
        assert!(!app.state().dirty);
        assert!(host.glyph("January").is_some());

        app.update(&mut host);
        app.update(&mut host);
        assert_eq!(host.clears, 1);
    }

    #[test]
    fn navigation_repaints_on_next_frame() {
        let (mut app, mut host) = started(2024, Month::January);

        host.press(Button::Right);
        app.update(&mut host);
        assert_eq!(app.state().month, Month::February);
        assert!(app.state().dirty);
        assert_eq!(host.clears, 1);
        assert!(!host.is_pressed(Button::Right));

        app.update(&mut host);
        assert_eq!(host.clears, 2);
        assert!(!app.state().dirty);
        assert!(host.glyph("February").is_some());
        assert!(host.glyph("January").is_none());
    }

    #[test]
    fn left_wins_over_right() {
        let (mut app, mut host) = started(2024, Month::January);

        host.press(Button::Left);
        host.press(Button::Right);
        app.update(&mut host);
        assert_eq!((app.state().year, app.state().month), (2023, Month::December));
        assert!(host.is_pressed(Button::Right));

        app.update(&mut host);
        assert_eq!((app.state().year, app.state().month), (2024, Month::January));
        assert!(!host.is_pressed(Button::Right));
    }

    #[test]
    fn year_and_month_move_in_same_frame() {
        let (mut app, mut host) = started(2024, Month::June);

        host.press(Button::Right);
        host.press(Button::Up);
        host.press(Button::Down);
        app.update(&mut host);

        assert_eq!((app.state().year, app.state().month), (2025, Month::July));
        assert!(host.is_pressed(Button::Down));
        assert!(!host.is_pressed(Button::Up));
    }

    #[test]
    fn held_button_moves_once() {
        let (mut app, mut host) = started(2024, Month::June);

        host.press(Button::Up);
        app.update(&mut host);
        app.update(&mut host);
        app.update(&mut host);
        assert_eq!(app.state().year, 2025);
    }

    #[test]
    fn jump_to_valid_year() {
        let (mut app, mut host) = started(2024, Month::March);

        host.press(Button::A);
        host.answer(Some(2050));
        app.update(&mut host);

        assert_eq!(app.state().year, 2050);
        assert_eq!(app.state().month, Month::March);
        assert!(app.state().dirty);
        assert_eq!(
            host.prompts,
            vec![("Jump to year (1970-9999):".to_owned(), 4)]
        );
        assert_eq!(host.notices, vec!["Jumped to 2050".to_owned()]);
        assert!(!host.is_pressed(Button::A));
    }

    #[test]
    fn jump_to_invalid_year_keeps_state() {
        let (mut app, mut host) = started(2024, Month::March);

        host.press(Button::A);
        host.answer(Some(500));
        app.update(&mut host);

        assert_eq!(app.state().year, 2024);
        assert!(!app.state().dirty);
        assert_eq!(
            host.notices,
            vec!["Please enter between 1970-9999".to_owned()]
        );
        assert!(!host.is_pressed(Button::A));

        host.press(Button::A);
        host.answer(None);
        app.update(&mut host);
        assert_eq!(app.state().year, 2024);
        assert_eq!(host.notices.len(), 2);
    }

    #[test]
    fn leaving_year_range_resets_once() {
        let (mut app, mut host) = started(1970, Month::May);

        host.press(Button::Down);
        assert_eq!(app.update(&mut host), Flow::Running);
        assert_eq!(app.state().year, 1969);
        assert_eq!(host.resets, 0);

        host.press(Button::Down);
        assert_eq!(app.update(&mut host), Flow::Reset);
        assert_eq!(host.resets, 1);
        assert_eq!(host.clears, 1);
        assert_eq!(
            host.notices,
            vec!["Year must be between 1970-9999.\nResetting calendar.".to_owned()]
        );
        assert_eq!(*app.state(), CalendarState::new(1970, Month::May));

        assert_eq!(app.update(&mut host), Flow::Running);
        assert_eq!(host.resets, 1);
        assert_eq!(host.clears, 2);
        assert!(host.glyph("May").is_some());
    }

    #[test]
    fn leaving_upper_bound_resets() {
        let (mut app, mut host) = started(9999, Month::December);

        host.press(Button::Right);
        app.update(&mut host);
        assert_eq!(app.state().year, 10000);

        assert_eq!(app.update(&mut host), Flow::Reset);
        assert_eq!(host.resets, 1);
    }

    #[test]
    fn today_button() {
        let mut app = App::new(1999, Month::February).unwrap();
        let mut host = MockHost::on(NaiveDate::from_ymd_opt(2031, 8, 3).unwrap());
        app.update(&mut host);

        host.press(Button::B);
        app.update(&mut host);
        assert_eq!((app.state().year, app.state().month), (2031, Month::August));
        assert!(app.state().dirty);
        assert!(!host.is_pressed(Button::B));
    }
}
