//! # Errors

use std::fmt::{self, Display, Formatter};

/// The `zen` error type.
#[derive(Debug)]
pub enum Error {
    /// Wrapper around `std::io::Error`, covering both terminal I/O and file I/O.
    Io(std::io::Error),
    /// Error returned when the window size obtained through a system call is invalid (zero rows
    /// or columns).
    InvalidWindowSize,
    /// Error setting or retrieving the cursor position through the Device Status Report fallback.
    CursorPosition,
    /// An unrecognized command line flag was passed.
    UnrecognizedOption(String),
    /// Too many command line arguments were given; holds the full argument list.
    TooManyArguments(Vec<String>),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Io({err:?})"),
            Self::InvalidWindowSize => write!(f, "InvalidWindowSize"),
            Self::CursorPosition => write!(f, "CursorPosition"),
            Self::UnrecognizedOption(opt) => write!(f, "UnrecognizedOption({opt:?})"),
            Self::TooManyArguments(args) => write!(f, "TooManyArguments({args:?})"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    /// Convert an IO Error into a `zen` Error.
    fn from(err: std::io::Error) -> Self { Self::Io(err) }
}
