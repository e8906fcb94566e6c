use chrono::{Datelike, Month};
use num_traits::FromPrimitive;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use termion::event::Key;

use crate::calendar::{is_valid_year, MAX_YEAR, MIN_YEAR};
use crate::cmds::Cmd;
use crate::error::{Error, ErrorKind, Result};
use crate::host::{Button, Clock};

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "POCKETCAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("pocketcal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".pocketcal.toml"));
    }

    locations
}

/// Loads the config from `path` if given, otherwise from the first existing
/// default location. Falls back to the default config if there is none.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Loading config from '{}'", path.display());
        return Config::from_str(&fs::read_to_string(path)?);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => {
            log::info!("Loading config from '{}'", location.display());
            Config::from_str(&fs::read_to_string(location)?)
        }
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct KeySection {
    confirm: char,
    today: char,
    quit: char,
    left: char,
    right: char,
    up: char,
    down: char,
}

impl Default for KeySection {
    fn default() -> Self {
        KeySection {
            confirm: 'a',
            today: ' ',
            quit: 'q',
            left: 'h',
            right: 'l',
            up: 'k',
            down: 'j',
        }
    }
}

impl KeySection {
    fn key_map(&self) -> KeyMap {
        let mut key_map = KeyMap::new();

        key_map.insert(Key::Left, Cmd::Press(Button::Left));
        key_map.insert(Key::Right, Cmd::Press(Button::Right));
        key_map.insert(Key::Up, Cmd::Press(Button::Up));
        key_map.insert(Key::Down, Cmd::Press(Button::Down));
        key_map.insert(Key::Char('\n'), Cmd::Press(Button::A));
        key_map.insert(Key::Ctrl('c'), Cmd::Exit);

        key_map.insert(Key::Char(self.left), Cmd::Press(Button::Left));
        key_map.insert(Key::Char(self.right), Cmd::Press(Button::Right));
        key_map.insert(Key::Char(self.up), Cmd::Press(Button::Up));
        key_map.insert(Key::Char(self.down), Cmd::Press(Button::Down));
        key_map.insert(Key::Char(self.confirm), Cmd::Press(Button::A));
        key_map.insert(Key::Char(self.today), Cmd::Press(Button::B));
        key_map.insert(Key::Char(self.quit), Cmd::Exit);

        key_map
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ConfigFile {
    /// Milliseconds between two frames
    tick_rate: u64,
    start_year: Option<i32>,
    start_month: Option<u32>,
    keys: KeySection,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            tick_rate: 33,
            start_year: None,
            start_month: None,
            keys: KeySection::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub key_map: KeyMap,
    pub tick_rate: Duration,
    pub start_year: Option<i32>,
    pub start_month: Option<Month>,
}

impl Default for Config {
    fn default() -> Config {
        let file = ConfigFile::default();
        Config {
            key_map: file.keys.key_map(),
            tick_rate: Duration::from_millis(file.tick_rate),
            start_year: None,
            start_month: None,
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(s)?;

        if file.tick_rate == 0 {
            return Err(Error::new(
                ErrorKind::ConfigValue,
                "tick_rate must be greater than zero",
            ));
        }

        if let Some(year) = file.start_year {
            if !is_valid_year(year) {
                return Err(Error::new(
                    ErrorKind::ConfigValue,
                    &format!("start_year must be between {}-{}", MIN_YEAR, MAX_YEAR),
                ));
            }
        }

        let start_month = match file.start_month {
            Some(month) => Some(Month::from_u32(month).ok_or_else(|| {
                Error::new(ErrorKind::ConfigValue, "start_month must be between 1-12")
            })?),
            None => None,
        };

        Ok(Config {
            key_map: file.keys.key_map(),
            tick_rate: Duration::from_millis(file.tick_rate),
            start_year: file.start_year,
            start_month,
        })
    }
}

impl Config {
    pub fn cmd(&self, key: &Key) -> Option<Cmd> {
        self.key_map.get(key).copied()
    }

    /// Month the calendar opens on. Command line arguments win over the
    /// config file, which wins over the clock.
    pub fn start<C: Clock + ?Sized>(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        clock: &C,
    ) -> Result<(i32, Month)> {
        let today = clock.today();

        let year = year.or(self.start_year).unwrap_or_else(|| today.year());
        let month = match month {
            Some(month) => Month::from_u32(month).ok_or_else(|| {
                Error::new(ErrorKind::InvalidArgument, "month must be between 1-12")
            })?,
            None => match self.start_month {
                Some(month) => month,
                None => Month::from_u32(today.month()).unwrap_or(Month::January),
            },
        };

        Ok((year, month))
    }
}
