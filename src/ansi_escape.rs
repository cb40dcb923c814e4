//! # ANSI escape sequences
//!
//! Named VT100-family escape sequences used by the terminal session and the renderer. See
//! <http://vt100.net/docs/vt100-ug/chapter3.html>.

/// Clear the entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Reset all formatting (SGR 0).
pub(crate) const RESET_FMT: &str = "\x1b[m";

/// Invert foreground and background color (SGR 7).
pub(crate) const REVERSE_VIDEO: &str = "\x1b[7m";

/// Move the cursor to row 1, column 1.
pub const MOVE_CURSOR_TO_START: &str = "\x1b[H";

/// DECTCEM: make the cursor invisible.
pub(crate) const HIDE_CURSOR: &str = "\x1b[?25l";
/// DECTCEM: make the cursor visible.
pub(crate) const SHOW_CURSOR: &str = "\x1b[?25h";

/// Erase the current line from the cursor to the end of the line.
pub(crate) const CLEAR_LINE_RIGHT_OF_CURSOR: &str = "\x1b[K";

/// Device Status Report: ask the terminal to report the cursor position.
pub(crate) const DEVICE_STATUS_REPORT: &str = "\x1b[6n";

/// Move the cursor far enough right and down that it lands on the bottom-right cell.
pub(crate) const REPOSITION_CURSOR_END: &str = "\x1b[999C\x1b[999B";
