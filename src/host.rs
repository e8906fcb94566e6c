//! Capabilities the calendar needs from the engine it runs on.
//!
//! The calendar never talks to a display or an input device directly. A host
//! implements the traits below and hands itself to [`crate::ui::App::update`]
//! once per frame.

use chrono::{Local, NaiveDate};
use derive_more::Constructor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Confirm, opens the jump-to-year prompt
    A,
    /// Jumps back to the current month
    B,
    Left,
    Right,
    Up,
    Down,
}

/// Category tag of a glyph, used to clear whole groups at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphKind {
    Text,
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Normal,
    Header,
    Weekend,
    Today,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogLayout {
    Bottom,
    Center,
}

/// Centre of a glyph in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Constructor)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Glyph {
    pub text: String,
    pub position: Position,
    pub tone: Tone,
    pub kind: GlyphKind,
}

pub trait Screen {
    fn create_text(&mut self, text: &str, position: Position, tone: Tone, kind: GlyphKind);
    fn destroy_all_of_kind(&mut self, kind: GlyphKind);
}

/// Edge triggered buttons. A press stays set until the calendar clears it.
pub trait Controller {
    fn is_pressed(&self, button: Button) -> bool;
    fn set_pressed(&mut self, button: Button, pressed: bool);
}

pub trait Dialog {
    /// Blocks until the user entered a number of at most `digits` digits.
    /// `None` if the prompt was dismissed.
    fn ask_for_number(&mut self, prompt: &str, digits: u32) -> Option<i32>;
    fn show_long_text(&mut self, text: &str, layout: DialogLayout);
}

pub trait Lifecycle {
    fn reset(&mut self);
}

pub trait Clock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Wall clock of the machine running the calendar.
pub struct LocalClock;

impl Clock for LocalClock {}

pub trait Host: Screen + Controller + Dialog + Lifecycle + Clock {}

impl<T> Host for T where T: Screen + Controller + Dialog + Lifecycle + Clock {}
