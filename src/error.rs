use std::convert::From;
use std::error;
use std::fmt;
use std::io;

use crate::calendar::{MAX_YEAR, MIN_YEAR};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    OutOfRangeYear(i32),
    InvalidUserInput(Option<i32>),
    ConfigParse,
    ConfigValue,
    InvalidArgument,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    /// Text shown to the user in a notice dialog.
    pub fn notice(&self) -> String {
        match self.kind {
            ErrorKind::OutOfRangeYear(_) => format!(
                "Year must be between {}-{}.\nResetting calendar.",
                MIN_YEAR, MAX_YEAR
            ),
            ErrorKind::InvalidUserInput(_) => {
                format!("Please enter between {}-{}", MIN_YEAR, MAX_YEAR)
            }
            _ => self.to_string(),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(
            ErrorKind::ConfigParse,
            &format!("Could not parse configuration: {}", toml_error),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::IOError(err) => Some(err),
            _ => None,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::OutOfRangeYear(year) => format!("year {} out of range", year),
            ErrorKind::InvalidUserInput(Some(value)) => format!("invalid year {}", value),
            ErrorKind::InvalidUserInput(None) => "no year entered".to_owned(),
            ErrorKind::ConfigParse => "invalid configuration format".to_owned(),
            ErrorKind::ConfigValue => "invalid configuration value".to_owned(),
            ErrorKind::InvalidArgument => "invalid command line argument".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}
