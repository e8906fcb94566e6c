//! Runs the calendar inside a terminal.
//!
//! The handheld's 160x120 pixel screen is mapped onto a grid of
//! [`COLUMNS`]x[`ROWS`] character cells. Buttons are filled from key events
//! of a [`Dispatcher`], which also feeds the blocking dialogs.

use std::collections::HashSet;
use std::io::{self, Write};

use termion::event::Key;
use termion::{clear, color, cursor, style};

use crate::cmds::Cmd;
use crate::config::Config;
use crate::events::Dispatcher;
use crate::host::{
    Button, Clock, Controller, Dialog, DialogLayout, Glyph, GlyphKind, Lifecycle, Position, Screen,
    Tone,
};

pub const SCREEN_WIDTH: i32 = 160;
pub const SCREEN_HEIGHT: i32 = 120;

const PIXELS_PER_COLUMN: i32 = 5;
const PIXELS_PER_ROW: i32 = 10;

pub const COLUMNS: usize = (SCREEN_WIDTH / PIXELS_PER_COLUMN) as usize;
pub const ROWS: usize = (SCREEN_HEIGHT / PIXELS_PER_ROW) as usize;

const DIALOG_BOTTOM_Y: i32 = 90;
const DIALOG_CENTER_Y: i32 = 50;
const DIALOG_HINT: &str = "(any key)";

/// Top left cell of a glyph centred on `position`.
fn cell_of(position: Position, width: usize) -> (i32, i32) {
    let column = position.x / PIXELS_PER_COLUMN - width as i32 / 2;
    let row = position.y / PIXELS_PER_ROW;
    (column.max(0), row.max(0))
}

pub struct TerminalHost<'d, W: Write> {
    out: W,
    dispatcher: &'d Dispatcher,
    glyphs: Vec<Glyph>,
    pressed: HashSet<Button>,
    stale: bool,
}

impl<'d, W: Write> TerminalHost<'d, W> {
    pub fn new(out: W, dispatcher: &'d Dispatcher) -> Self {
        TerminalHost {
            out,
            dispatcher,
            glyphs: Vec::new(),
            pressed: HashSet::new(),
            stale: true,
        }
    }

    /// Turns a key into a button press. Returns `false` if the key asks to quit.
    pub fn handle_key(&mut self, key: Key, config: &Config) -> bool {
        match config.cmd(&key) {
            Some(Cmd::Press(button)) => {
                self.pressed.insert(button);
                true
            }
            Some(Cmd::Exit) => false,
            None => true,
        }
    }

    /// Draws all glyphs if anything changed since the last call.
    pub fn present(&mut self) -> io::Result<()> {
        if !self.stale {
            return Ok(());
        }

        write!(self.out, "{}", clear::All)?;
        for glyph in &self.glyphs {
            let (column, row) = cell_of(glyph.position, glyph.text.chars().count());
            write!(
                self.out,
                "{}",
                cursor::Goto(column as u16 + 1, row as u16 + 1)
            )?;
            match glyph.tone {
                Tone::Normal => write!(self.out, "{}", color::Fg(color::White))?,
                Tone::Header => write!(self.out, "{}", color::Fg(color::Yellow))?,
                Tone::Weekend => write!(self.out, "{}", color::Fg(color::LightRed))?,
                Tone::Today => write!(self.out, "{}", style::Invert)?,
            }
            write!(self.out, "{}{}", glyph.text, style::Reset)?;
        }
        self.out.flush()?;

        self.stale = false;
        Ok(())
    }

    /// Plain text picture of the current screen, one line per row.
    pub fn snapshot(&self) -> String {
        let mut grid = vec![vec![' '; COLUMNS]; ROWS];

        for glyph in &self.glyphs {
            let (column, row) = cell_of(glyph.position, glyph.text.chars().count());
            if let Some(line) = grid.get_mut(row as usize) {
                for (offset, c) in glyph.text.chars().enumerate() {
                    if let Some(cell) = line.get_mut(column as usize + offset) {
                        *cell = c;
                    }
                }
            }
        }

        grid.iter()
            .map(|line| line.iter().collect::<String>().trim_end().to_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn show_overlay(&mut self, lines: &[&str], layout: DialogLayout) {
        self.destroy_all_of_kind(GlyphKind::Overlay);

        let top = match layout {
            DialogLayout::Bottom => DIALOG_BOTTOM_Y,
            DialogLayout::Center => DIALOG_CENTER_Y,
        };
        for (idx, line) in lines.iter().enumerate() {
            self.create_text(
                line,
                Position::new(SCREEN_WIDTH / 2, top + PIXELS_PER_ROW * idx as i32),
                Tone::Header,
                GlyphKind::Overlay,
            );
        }

        if let Err(err) = self.present() {
            log::error!("Could not draw dialog: {}", err);
        }
    }
}

impl<W: Write> Screen for TerminalHost<'_, W> {
    fn create_text(&mut self, text: &str, position: Position, tone: Tone, kind: GlyphKind) {
        self.glyphs
            .push(Glyph::new(text.to_owned(), position, tone, kind));
        self.stale = true;
    }

    fn destroy_all_of_kind(&mut self, kind: GlyphKind) {
        self.glyphs.retain(|g| g.kind != kind);
        self.stale = true;
    }
}

impl<W: Write> Controller for TerminalHost<'_, W> {
    fn is_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    fn set_pressed(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.pressed.insert(button);
        } else {
            self.pressed.remove(&button);
        }
    }
}

impl<W: Write> Dialog for TerminalHost<'_, W> {
    fn ask_for_number(&mut self, prompt: &str, digits: u32) -> Option<i32> {
        let mut input = String::new();

        let answer = loop {
            let field = format!("> {}_", input);
            self.show_overlay(&[prompt, field.as_str()], DialogLayout::Center);

            match self.dispatcher.next_key() {
                Some(Key::Char(c)) if c.is_ascii_digit() => {
                    if input.len() < digits as usize {
                        input.push(c);
                    }
                }
                Some(Key::Backspace) => {
                    input.pop();
                }
                Some(Key::Char('\n')) => break input.parse::<i32>().ok(),
                Some(Key::Esc) | None => break None,
                Some(_) => {}
            }
        };

        self.destroy_all_of_kind(GlyphKind::Overlay);
        answer
    }

    fn show_long_text(&mut self, text: &str, layout: DialogLayout) {
        let mut lines: Vec<&str> = text.lines().collect();
        lines.push(DIALOG_HINT);
        self.show_overlay(&lines, layout);

        if self.dispatcher.next_key().is_none() {
            log::warn!("Input closed while showing dialog");
        }

        self.destroy_all_of_kind(GlyphKind::Overlay);
    }
}

impl<W: Write> Lifecycle for TerminalHost<'_, W> {
    fn reset(&mut self) {
        log::info!("Resetting terminal screen");
        self.glyphs.clear();
        self.pressed.clear();
        self.stale = true;
    }
}

impl<W: Write> Clock for TerminalHost<'_, W> {}
