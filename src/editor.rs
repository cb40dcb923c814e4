#![allow(clippy::wildcard_imports)]

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write as _};
use std::path::Path;
use std::time::Instant;

use crate::row::Row;
use crate::syntax::{Conf as SyntaxConf, HlType};
use crate::{ansi_escape::*, sys, terminal, Config, Error};

const fn ctrl_key(key: u8) -> u8 { key & 0x1f }
const EXIT: u8 = ctrl_key(b'Q');
const DELETE_BIS: u8 = ctrl_key(b'H');
const REFRESH_SCREEN: u8 = ctrl_key(b'L');
const SAVE: u8 = ctrl_key(b'S');
const FIND: u8 = ctrl_key(b'F');
const BACKSPACE: u8 = 127;

const HELP_MESSAGE: &str = "^S save | ^Q quit | ^F find";

/// `set_status!` sets a formatted status message for the editor.
/// Example usage: `set_status!(editor, "{} written to {}", file_size, file_name)`
macro_rules! set_status { ($editor:expr, $($arg:expr),*) => ($editor.status_msg = Some(StatusMessage::new(format!($($arg),*)))) }

/// Enum of input keys, decoded from the raw byte stream.
enum Key {
    Arrow(AKey),
    Page(PageKey),
    Home,
    End,
    Delete,
    Escape,
    Char(u8),
}

/// Enum of arrow keys.
enum AKey {
    Left,
    Right,
    Up,
    Down,
}

/// Enum of page keys.
enum PageKey {
    Up,
    Down,
}

/// Describes the cursor position and the viewport offset.
#[derive(Default, Clone)]
struct CursorState {
    /// Logical column (indexing `chars`, not rendered columns).
    x: usize,
    /// Row number, 0-indexed.
    y: usize,
    /// Row offset of the viewport's top-left cell, in rendered coordinates.
    rowoff: usize,
    /// Column offset of the viewport's top-left cell, in rendered coordinates.
    coloff: usize,
}

impl CursorState {
    fn move_to_next_line(&mut self) { (self.x, self.y) = (0, self.y + 1); }

    /// Adjust `rowoff`/`coloff` so that the cursor, at rendered column `rx`, remains visible.
    fn scroll(&mut self, rx: usize, screen_rows: usize, screen_cols: usize) {
        self.rowoff = self.rowoff.clamp(self.y.saturating_sub(screen_rows.saturating_sub(1)), self.y);
        self.coloff = self.coloff.clamp(rx.saturating_sub(screen_cols.saturating_sub(1)), rx);
    }
}

/// The `Editor` struct: the state and configuration of the text editor.
#[derive(Default)]
pub struct Editor {
    /// If not `None`, the current prompt mode (Save or Find). If `None`, regular edit mode.
    prompt_mode: Option<PromptMode>,
    /// The current state of the cursor and viewport.
    cursor: CursorState,
    /// The number of rows usable for text, excluding the status bar and the message bar.
    screen_rows: usize,
    /// The number of columns usable for text.
    screen_cols: usize,
    /// The rows of the open buffer.
    rows: Vec<Row>,
    /// Whether the document has been modified since it was opened or last saved.
    dirty: bool,
    /// The editor's configuration.
    config: Config,
    /// The number of Ctrl-Q presses remaining before quitting without saving is allowed.
    quit_times: usize,
    /// The file name. `None` until set by `open` or by a successful save-as.
    file_name: Option<String>,
    /// The current status message being shown, if any.
    status_msg: Option<StatusMessage>,
    /// The syntax rule selected for the current file name, if any.
    syntax: Option<&'static SyntaxConf>,
    /// The original terminal mode, restored when the `Editor` is dropped.
    orig_term_mode: Option<sys::TermMode>,
}

/// A status message shown at the bottom of the screen, with a 5-second time-to-live.
struct StatusMessage {
    msg: String,
    time: Instant,
}

impl StatusMessage {
    fn new(msg: String) -> Self { Self { msg, time: Instant::now() } }
}

/// Pretty-format a size in bytes.
fn format_size(n: u64) -> String {
    if n < 1024 {
        return format!("{n}B");
    }
    // i is the largest value such that 1024 ^ i < n
    let i = (64 - n.leading_zeros() + 9) / 10 - 1;
    // Compute the size with two decimal places (rounded down) as the last two digits of q.
    let q = 100 * n / (1024 << ((i - 1) * 10));
    format!("{}.{:02}{}B", q / 100, q % 100, b" kMGTPEZ"[i as usize] as char)
}

impl Editor {
    /// Initialize the text editor: register the window-resize signal handler, enter raw mode,
    /// and query the initial window size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if enabling raw mode, registering the resize handler, or querying the window
    /// size fails.
    pub fn new(config: Config) -> Result<Self, Error> {
        sys::register_winsize_change_signal_handler()?;
        let mut editor = Self { quit_times: config.quit_times, config, ..Self::default() };
        editor.orig_term_mode = Some(sys::enable_raw_mode()?);
        editor.update_window_size()?;
        set_status!(editor, "{}", HELP_MESSAGE);
        Ok(editor)
    }

    /// The current row, if the cursor points at an existing row.
    fn current_row(&self) -> Option<&Row> { self.rows.get(self.cursor.y) }

    /// The cursor's rendered column.
    fn rx(&self) -> usize {
        self.current_row().map_or(0, |row| row.cx_to_rx(self.cursor.x, self.config.tab_stop))
    }

    /// Whether the buffer is empty: a single, empty row.
    fn is_empty(&self) -> bool { self.rows.len() <= 1 && self.rows.first().is_none_or(|r| r.size() == 0) }

    /// Move the cursor following an arrow key.
    fn move_cursor(&mut self, key: &AKey) {
        match key {
            AKey::Left if self.cursor.x > 0 => self.cursor.x -= 1,
            AKey::Left if self.cursor.y > 0 => {
                self.cursor.y -= 1;
                self.cursor.x = usize::MAX;
            }
            AKey::Right => match self.current_row() {
                Some(row) if self.cursor.x < row.size() => self.cursor.x += 1,
                Some(_) => self.cursor.move_to_next_line(),
                None => (),
            },
            AKey::Up if self.cursor.y > 0 => self.cursor.y -= 1,
            AKey::Down if self.cursor.y < self.rows.len() => self.cursor.y += 1,
            AKey::Left | AKey::Up | AKey::Down => (),
        }
        self.update_cursor_x_position();
    }

    /// Clamp `cursor.x` to the length of the current row (0 on the virtual past-the-end row).
    fn update_cursor_x_position(&mut self) {
        self.cursor.x = self.cursor.x.min(self.current_row().map_or(0, Row::size));
    }

    /// Block until a key is pressed, decoding escape sequences as needed. Checks for a pending
    /// window-resize signal on every iteration of the wait.
    fn loop_until_keypress(&mut self) -> Result<Key, Error> {
        loop {
            if sys::has_window_size_changed() {
                self.update_window_size()?;
                self.refresh_screen()?;
            }
            let mut bytes = sys::stdin()?.bytes();
            match bytes.next().transpose()? {
                Some(b'\x1b') => {
                    // Unconditionally read two bytes past ESC before branching on their content,
                    // so an unrecognized sequence doesn't leave a byte unconsumed in the stream.
                    let seq0 = bytes.next().transpose()?;
                    let seq1 = bytes.next().transpose()?;
                    return Ok(match (seq0, seq1) {
                        (Some(b'['), Some(b'A')) => Key::Arrow(AKey::Up),
                        (Some(b'['), Some(b'B')) => Key::Arrow(AKey::Down),
                        (Some(b'['), Some(b'C')) => Key::Arrow(AKey::Right),
                        (Some(b'['), Some(b'D')) => Key::Arrow(AKey::Left),
                        (Some(b'[' | b'O'), Some(b'H')) => Key::Home,
                        (Some(b'[' | b'O'), Some(b'F')) => Key::End,
                        (Some(b'['), Some(c @ b'0'..=b'8')) => match (c, bytes.next().transpose()?) {
                            (c, Some(b'~')) if c == b'1' || c == b'7' => Key::Home,
                            (c, Some(b'~')) if c == b'4' || c == b'8' => Key::End,
                            (b'3', Some(b'~')) => Key::Delete,
                            (b'5', Some(b'~')) => Key::Page(PageKey::Up),
                            (b'6', Some(b'~')) => Key::Page(PageKey::Down),
                            _ => Key::Escape,
                        },
                        _ => Key::Escape,
                    });
                }
                Some(a) => return Ok(Key::Char(a)),
                None => continue,
            }
        }
    }

    /// Update `screen_rows`/`screen_cols` from the current window size.
    fn update_window_size(&mut self) -> Result<(), Error> {
        let (rows, cols) = sys::get_window_size().or_else(|_| terminal::get_window_size_using_cursor())?;
        // Make room for the status bar and the message bar.
        self.screen_rows = rows.saturating_sub(2);
        self.screen_cols = cols;
        Ok(())
    }

    /// Select a syntax rule for the current file name, or clear it if none matches.
    fn select_syntax_highlight(&mut self) {
        self.syntax = self.file_name.as_deref().and_then(SyntaxConf::select);
    }

    /// Recompute the render/highlight buffers for row `y`.
    fn update_row(&mut self, y: usize) { self.rows[y].update(self.syntax, self.config.tab_stop); }

    /// Recompute the render/highlight buffers for every row, e.g. after the syntax rule changes.
    fn update_all_rows(&mut self) {
        for row in &mut self.rows {
            row.update(self.syntax, self.config.tab_stop);
        }
    }

    /// Insert a byte at the current cursor position. Appends a new row first if the cursor is on
    /// the virtual past-the-end line.
    fn insert_char(&mut self, c: u8) {
        if self.cursor.y == self.rows.len() {
            self.rows.push(Row::new(Vec::new()));
        }
        self.rows[self.cursor.y].insert_char(self.cursor.x, c);
        self.update_row(self.cursor.y);
        self.cursor.x += 1;
        self.dirty = true;
    }

    /// Insert a newline at the current cursor position, splitting the current row if the cursor
    /// is in the middle of it.
    fn insert_newline(&mut self) {
        if self.cursor.x == 0 {
            self.rows.insert(self.cursor.y, Row::new(Vec::new()));
        } else {
            let tail = self.rows[self.cursor.y].split_off(self.cursor.x);
            self.update_row(self.cursor.y);
            self.rows.insert(self.cursor.y + 1, Row::new(tail));
            self.update_row(self.cursor.y + 1);
        }
        self.cursor.move_to_next_line();
        self.dirty = true;
    }

    /// Delete the byte before the cursor, merging with the previous row if at the start of one.
    fn delete_char(&mut self) {
        if (self.cursor.x, self.cursor.y) == (0, 0) || self.cursor.y == self.rows.len() {
            return;
        }
        if self.cursor.x > 0 {
            self.rows[self.cursor.y].delete_char(self.cursor.x - 1);
            self.update_row(self.cursor.y);
            self.cursor.x -= 1;
        } else {
            let removed = self.rows.remove(self.cursor.y);
            let previous_size = self.rows[self.cursor.y - 1].size();
            self.rows[self.cursor.y - 1].append_bytes(&removed.chars);
            self.update_row(self.cursor.y - 1);
            self.cursor.y -= 1;
            self.cursor.x = previous_size;
        }
        self.dirty = true;
    }

    /// Open a file: set `file_name`, select syntax, and load its rows. Any I/O failure, including
    /// a missing file, is fatal.
    fn open(&mut self, path: &Path) -> Result<(), Error> {
        self.file_name = Some(path.to_string_lossy().into_owned());
        self.select_syntax_highlight();
        let file = File::open(path)?;
        for line in BufReader::new(file).split(b'\n') {
            let mut bytes = line?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            self.rows.push(Row::new(bytes));
        }
        if self.rows.is_empty() {
            self.rows.push(Row::new(Vec::new()));
        }
        self.update_all_rows();
        self.dirty = false;
        Ok(())
    }

    /// Serialize the buffer to `file_name`: each row's bytes followed by `\n`, including the
    /// final row.
    fn save(&self, file_name: &str) -> Result<usize, io::Error> {
        let mut file = File::create(file_name)?;
        let mut written = 0;
        for row in &self.rows {
            file.write_all(&row.chars)?;
            file.write_all(b"\n")?;
            written += row.chars.len() + 1;
        }
        file.sync_all()?;
        Ok(written)
    }

    /// Save to `file_name`, reporting the outcome in the status bar. Returns whether the save
    /// succeeded.
    fn save_and_handle_io_errors(&mut self, file_name: &str) -> bool {
        match self.save(file_name) {
            Ok(written) => {
                set_status!(self, "{} bytes written to disk", written);
                self.dirty = false;
                true
            }
            Err(err) => {
                set_status!(self, "Can't save! I/O error: {}", err);
                false
            }
        }
    }

    /// Save to `file_name` obtained from the Save prompt: set it as the current file name,
    /// re-select syntax, and re-highlight all rows.
    fn save_as(&mut self, file_name: String) -> Result<(), Error> {
        if self.save_and_handle_io_errors(&file_name) {
            self.file_name = Some(file_name);
            self.select_syntax_highlight();
            self.update_all_rows();
        }
        Ok(())
    }

    /// Draw the rows of text (and `~` filler / welcome banner for rows past the end of the
    /// buffer).
    fn draw_rows(&self, buffer: &mut Vec<u8>) -> Result<(), Error> {
        for y in 0..self.screen_rows {
            let filerow = y + self.cursor.rowoff;
            if filerow >= self.rows.len() {
                if self.is_empty() && y == self.screen_rows / 3 {
                    let welcome = format!("zen {}", env!("ZEN_VERSION"));
                    write!(buffer, "~{:^1$.1$}", welcome, self.screen_cols.saturating_sub(1))?;
                } else {
                    buffer.push(b'~');
                }
            } else {
                self.rows[filerow].draw(self.cursor.coloff, self.screen_cols, buffer)?;
            }
            write!(buffer, "{RESET_FMT}{CLEAR_LINE_RIGHT_OF_CURSOR}\r\n")?;
        }
        Ok(())
    }

    /// Draw the status bar: file name/line count on the left, filetype and cursor position on
    /// the right.
    fn draw_status_bar(&self, buffer: &mut Vec<u8>) -> Result<(), Error> {
        let modified = if self.dirty { " (modified)" } else { "" };
        let file_name = self.file_name.as_deref().unwrap_or("[No Name]");
        let mut left = format!("{:.20} - {} lines{modified}", file_name, self.rows.len());
        left.truncate(self.screen_cols);

        let filetype = self.syntax.map_or("no ft", |s| s.name);
        let right = format!("{filetype} | {}/{}", self.cursor.y + 1, self.rows.len());

        let rw = self.screen_cols.saturating_sub(left.len());
        write!(buffer, "{REVERSE_VIDEO}{left}{right:>rw$.rw$}{RESET_FMT}\r\n")?;
        Ok(())
    }

    /// Draw the message bar: the current status message, if not expired.
    fn draw_message_bar(&self, buffer: &mut Vec<u8>) -> Result<(), Error> {
        buffer.extend_from_slice(CLEAR_LINE_RIGHT_OF_CURSOR.as_bytes());
        if let Some(sm) = self.status_msg.as_ref().filter(|sm| sm.time.elapsed() < self.config.message_duration) {
            write!(buffer, "{:.*}", self.screen_cols, sm.msg)?;
        }
        Ok(())
    }

    /// Refresh the screen: scroll, draw rows/status bar/message bar, reposition the cursor, and
    /// flush the whole frame in a single write.
    fn refresh_screen(&mut self) -> Result<(), Error> {
        let rx = self.rx();
        self.cursor.scroll(rx, self.screen_rows, self.screen_cols);
        let mut buffer = Vec::new();
        write!(buffer, "{HIDE_CURSOR}{MOVE_CURSOR_TO_START}")?;
        self.draw_rows(&mut buffer)?;
        self.draw_status_bar(&mut buffer)?;
        self.draw_message_bar(&mut buffer)?;
        let (cursor_col, cursor_row) = if self.prompt_mode.is_none() {
            (rx - self.cursor.coloff + 1, self.cursor.y - self.cursor.rowoff + 1)
        } else {
            (self.status_msg.as_ref().map_or(1, |s| s.msg.len() + 1), self.screen_rows + 2)
        };
        write!(buffer, "\x1b[{cursor_row};{cursor_col}H{SHOW_CURSOR}")?;
        io::stdout().write_all(&buffer)?;
        io::stdout().flush().map_err(Error::from)
    }

    /// Process a key that has been pressed while not in prompt mode. Returns whether the program
    /// should exit, and optionally a prompt mode to switch to.
    fn process_keypress(&mut self, key: &Key) -> (bool, Option<PromptMode>) {
        // Reset unless overridden below: any keypress other than Ctrl-Q resets the counter.
        let mut quit_times = self.config.quit_times;
        let mut prompt_mode = None;

        match key {
            Key::Arrow(arrow) => self.move_cursor(arrow),
            Key::Page(PageKey::Up) => {
                self.cursor.y = self.cursor.rowoff.min(self.rows.len());
                for _ in 0..self.screen_rows {
                    self.move_cursor(&AKey::Up);
                }
            }
            Key::Page(PageKey::Down) => {
                self.cursor.y =
                    (self.cursor.rowoff + self.screen_rows.saturating_sub(1)).min(self.rows.len());
                for _ in 0..self.screen_rows {
                    self.move_cursor(&AKey::Down);
                }
            }
            Key::Home => self.cursor.x = 0,
            Key::End =>
                if let Some(row) = self.current_row() {
                    self.cursor.x = row.size();
                },
            Key::Char(b'\r') => self.insert_newline(),
            Key::Char(BACKSPACE | DELETE_BIS) => self.delete_char(),
            Key::Delete => {
                self.move_cursor(&AKey::Right);
                self.delete_char();
            }
            Key::Escape | Key::Char(REFRESH_SCREEN) => (),
            Key::Char(EXIT) => {
                quit_times = self.quit_times - 1;
                if !self.dirty || quit_times == 0 {
                    return (true, None);
                }
                let times = if quit_times > 1 { "times" } else { "time" };
                set_status!(self, "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more {} to quit.", quit_times, times);
            }
            Key::Char(SAVE) => match self.file_name.clone() {
                Some(file_name) => _ = self.save_and_handle_io_errors(&file_name),
                None => prompt_mode = Some(PromptMode::Save(Vec::new())),
            },
            Key::Char(FIND) =>
                prompt_mode = Some(PromptMode::Find(Vec::new(), self.cursor.clone(), FindSession::default())),
            Key::Char(c) => self.insert_char(*c),
        }
        self.quit_times = quit_times;
        (false, prompt_mode)
    }

    /// Open `file_name`, if given, then run the input loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns `Err` on any fatal terminal or file I/O error.
    pub fn run(&mut self, file_name: Option<String>) -> Result<(), Error> {
        if let Some(name) = file_name {
            self.open(sys::path(&name).as_path())?;
        } else {
            self.rows.push(Row::new(Vec::new()));
        }
        loop {
            if let Some(mode) = self.prompt_mode.as_ref() {
                set_status!(self, "{}", mode.status_msg());
            }
            self.refresh_screen()?;
            let key = self.loop_until_keypress()?;
            self.prompt_mode = match self.prompt_mode.take() {
                None => match self.process_keypress(&key) {
                    (true, _) => return Ok(()),
                    (false, prompt_mode) => prompt_mode,
                },
                Some(prompt_mode) => prompt_mode.process_keypress(self, &key)?,
            };
        }
    }
}

impl Drop for Editor {
    /// Restore the original terminal mode and clear the screen.
    fn drop(&mut self) {
        if let Some(orig_term_mode) = self.orig_term_mode.take() {
            sys::set_term_mode(&orig_term_mode).expect("could not restore original terminal mode");
        }
        if !std::thread::panicking() {
            print!("{CLEAR_SCREEN}{MOVE_CURSOR_TO_START}");
            io::stdout().flush().expect("could not flush stdout");
        }
    }
}

/// Per-find-session state: which row last matched, the scan direction, and the highlight
/// snapshot painted over the current match (restored before the next keystroke, or on drop of
/// the enclosing `PromptMode::Find`).
struct FindSession {
    last_match: Option<usize>,
    direction: isize,
    /// (row index, rendered start offset, overwritten highlight tags).
    painted: Option<(usize, usize, Vec<HlType>)>,
}

impl Default for FindSession {
    fn default() -> Self { Self { last_match: None, direction: 1, painted: None } }
}

impl FindSession {
    /// Restore any highlight this session previously painted.
    fn restore(&mut self, rows: &mut [Row]) {
        if let Some((row_idx, start, snapshot)) = self.painted.take() {
            if let Some(row) = rows.get_mut(row_idx) {
                row.restore_hl(start, &snapshot);
            }
        }
    }

    /// Scan at most `rows.len()` rows, starting at `last_match + direction` (wrapping), for
    /// `query` as a substring of a row's rendered bytes. On a hit, paints the match and updates
    /// `last_match`; otherwise clears `last_match`.
    fn search(&mut self, rows: &mut [Row], query: &[u8], tab_stop: usize) -> Option<(usize, usize)> {
        let numrows = rows.len();
        if query.is_empty() || numrows == 0 {
            self.last_match = None;
            return None;
        }
        let mut current = self.last_match.map_or(-1_isize, |m| m as isize);
        for _ in 0..numrows {
            current = (current + self.direction).rem_euclid(numrows as isize);
            let idx = current as usize;
            if let Some(rx) = rows[idx].find(query) {
                self.last_match = Some(idx);
                let cx = rows[idx].rx_to_cx(rx, tab_stop);
                let snapshot = rows[idx].paint_match(rx..rx + query.len());
                self.painted = Some((idx, rx, snapshot));
                return Some((idx, cx));
            }
        }
        self.last_match = None;
        None
    }
}

/// The prompt mode: a modal line-input dialog.
enum PromptMode {
    /// Save(prompt buffer)
    Save(Vec<u8>),
    /// Find(prompt buffer, saved cursor state, session)
    Find(Vec<u8>, CursorState, FindSession),
}

impl PromptMode {
    /// The status message to show for the current prompt mode.
    fn status_msg(&self) -> String {
        match self {
            Self::Save(buffer) => format!("Save as: {}", String::from_utf8_lossy(buffer)),
            Self::Find(buffer, ..) =>
                format!("Search: {} (Use ESC/Arrows/Enter)", String::from_utf8_lossy(buffer)),
        }
    }

    /// Process a keypress event for the current prompt mode.
    fn process_keypress(self, ed: &mut Editor, key: &Key) -> Result<Option<Self>, Error> {
        ed.status_msg = None;
        match self {
            Self::Save(buffer) => match process_prompt_keypress(buffer, key) {
                PromptState::Active(buffer) => return Ok(Some(Self::Save(buffer))),
                PromptState::Cancelled => set_status!(ed, "Save aborted"),
                PromptState::Completed(buffer) =>
                    ed.save_as(String::from_utf8_lossy(&buffer).into_owned())?,
            },
            Self::Find(buffer, saved_cursor, mut session) => {
                session.restore(&mut ed.rows);
                match process_prompt_keypress(buffer, key) {
                    PromptState::Active(query) => {
                        match key {
                            Key::Arrow(AKey::Right | AKey::Down) => session.direction = 1,
                            Key::Arrow(AKey::Left | AKey::Up) => session.direction = -1,
                            _ => {
                                session.last_match = None;
                                session.direction = 1;
                            }
                        }
                        if session.last_match.is_none() {
                            session.direction = 1;
                        }
                        if let Some((row, cx)) = session.search(&mut ed.rows, &query, ed.config.tab_stop) {
                            ed.cursor.y = row;
                            ed.cursor.x = cx;
                            ed.cursor.coloff = 0;
                            ed.cursor.rowoff = ed.rows.len();
                        }
                        return Ok(Some(Self::Find(query, saved_cursor, session)));
                    }
                    PromptState::Cancelled => ed.cursor = saved_cursor,
                    PromptState::Completed(_) => (),
                }
            }
        }
        Ok(None)
    }
}

/// The state of the prompt after processing a keypress event.
enum PromptState {
    Active(Vec<u8>),
    Completed(Vec<u8>),
    Cancelled,
}

/// Process a prompt keypress event and return the new state for the prompt buffer.
fn process_prompt_keypress(mut buffer: Vec<u8>, key: &Key) -> PromptState {
    match key {
        Key::Char(b'\r') if !buffer.is_empty() => return PromptState::Completed(buffer),
        Key::Escape => return PromptState::Cancelled,
        Key::Char(BACKSPACE | DELETE_BIS) => _ = buffer.pop(),
        Key::Char(c) if !c.is_ascii_control() => buffer.push(*c),
        _ => (),
    }
    PromptState::Active(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_size_output() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1), "1B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1024), "1.00kB");
        assert_eq!(format_size(1536), "1.50kB");
        assert_eq!(format_size(21 * 1024 - 11), "20.98kB");
        assert_eq!(format_size(21 * 1024), "21.00kB");
        assert_eq!(format_size(1024 * 1024), "1.00MB");
        assert_eq!(format_size(100 * 1024 * 1024 * 1024), "100.00GB");
    }

    #[test]
    fn editor_insert_char() {
        let mut editor = Editor::default();
        editor.insert_char(b'X');
        editor.insert_char(b'Y');
        editor.insert_char(b'Z');

        assert_eq!(editor.cursor.x, 3);
        assert_eq!(editor.rows.len(), 1);
        assert_eq!(editor.rows[0].chars, [b'X', b'Y', b'Z']);
        assert!(editor.dirty);
    }

    #[test]
    fn editor_insert_newline_splits_row() {
        let mut editor = Editor::default();
        for b in b"helloworld" {
            editor.insert_char(*b);
        }
        editor.cursor.x = 5;
        editor.insert_newline();

        assert_eq!(editor.rows.len(), 2);
        assert_eq!(editor.rows[0].chars, b"hello");
        assert_eq!(editor.rows[1].chars, b"world");
        assert_eq!((editor.cursor.x, editor.cursor.y), (0, 1));
    }

    #[test]
    fn editor_delete_char_within_row() {
        let mut editor = Editor::default();
        for b in b"Hello world!" {
            editor.insert_char(*b);
        }
        editor.delete_char();
        assert_eq!(editor.rows[0].chars, b"Hello world");
    }

    #[test]
    fn editor_delete_char_merges_rows() {
        let mut editor = Editor::default();
        for b in b"foo" {
            editor.insert_char(*b);
        }
        editor.insert_newline();
        for b in b"bar" {
            editor.insert_char(*b);
        }
        // cursor is now at (3, 1); move to the start of the second row and delete.
        editor.cursor.x = 0;
        editor.delete_char();

        assert_eq!(editor.rows.len(), 1);
        assert_eq!(editor.rows[0].chars, b"foobar");
        assert_eq!((editor.cursor.x, editor.cursor.y), (3, 0));
    }

    #[test]
    fn editor_delete_char_noop_at_origin() {
        let mut editor = Editor::default();
        editor.delete_char();
        assert_eq!(editor.rows.len(), 0);
    }

    #[test]
    fn move_cursor_left_wraps_to_previous_row() {
        let mut editor = Editor::default();
        for b in b"hi" {
            editor.insert_char(*b);
        }
        editor.insert_newline();
        editor.insert_char(b'!');
        editor.cursor.x = 0;

        editor.move_cursor(&AKey::Left);
        assert_eq!((editor.cursor.x, editor.cursor.y), (2, 0));
    }

    #[test]
    fn move_cursor_right_wraps_to_next_row() {
        let mut editor = Editor::default();
        for b in b"hi" {
            editor.insert_char(*b);
        }
        editor.insert_newline();
        editor.insert_char(b'!');
        editor.cursor.x = 2;
        editor.cursor.y = 0;

        editor.move_cursor(&AKey::Right);
        assert_eq!((editor.cursor.x, editor.cursor.y), (0, 1));
    }

    #[test]
    fn move_cursor_right_on_virtual_row_is_noop() {
        let mut editor = Editor::default();
        editor.rows.push(Row::new(Vec::new()));
        editor.cursor.y = 1; // one past the single empty row
        editor.move_cursor(&AKey::Right);
        assert_eq!((editor.cursor.x, editor.cursor.y), (0, 1));
    }

    #[test]
    fn move_cursor_up_down_clamp_x_to_row_length() {
        let mut editor = Editor::default();
        for b in b"abcdefgh" {
            editor.insert_char(*b);
        }
        editor.insert_newline();
        for b in b"ij" {
            editor.insert_char(*b);
        }
        // cursor at (2, 1)
        editor.move_cursor(&AKey::Up);
        assert_eq!((editor.cursor.x, editor.cursor.y), (2, 0));

        editor.cursor.x = 8;
        editor.move_cursor(&AKey::Down);
        assert_eq!((editor.cursor.x, editor.cursor.y), (2, 1));
    }

    #[test]
    fn cursor_scroll_keeps_cursor_in_view() {
        let mut cursor = CursorState::default();
        cursor.y = 10;
        cursor.scroll(0, 4, 80);
        assert_eq!(cursor.rowoff, 7);

        cursor.y = 2;
        cursor.scroll(0, 4, 80);
        assert_eq!(cursor.rowoff, 2);
    }

    #[test]
    fn quit_confirmation_counts_down_and_resets() {
        let mut editor = Editor { quit_times: Config::default().quit_times, ..Editor::default() };
        editor.dirty = true;

        let (should_quit, _) = editor.process_keypress(&Key::Char(EXIT));
        assert!(!should_quit);
        assert_eq!(editor.quit_times, 2);

        // Any other keypress resets the counter.
        editor.process_keypress(&Key::Char(b'x'));
        assert_eq!(editor.quit_times, 3);

        editor.process_keypress(&Key::Char(EXIT));
        editor.process_keypress(&Key::Char(EXIT));
        let (should_quit, _) = editor.process_keypress(&Key::Char(EXIT));
        assert!(should_quit);
    }

    #[test]
    fn save_and_open_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roundtrip.txt");

        let mut editor = Editor::default();
        for b in b"abc" {
            editor.insert_char(*b);
        }
        let written = editor.save(path.to_str().expect("utf8 path")).expect("save");
        assert_eq!(written, 4); // "abc\n"

        let contents = std::fs::read(&path).expect("read back");
        assert_eq!(contents, b"abc\n");

        let mut reopened = Editor::default();
        reopened.open(&path).expect("open");
        assert_eq!(reopened.rows.len(), 1);
        assert_eq!(reopened.rows[0].chars, b"abc");
        assert!(!reopened.dirty);
    }

    #[test]
    fn page_down_scrolls_two_screens() {
        let mut editor = Editor::default();
        editor.screen_rows = 4;
        for i in 0..10 {
            editor.rows.push(Row::new(format!("line{i}").into_bytes()));
        }
        editor.update_all_rows();

        editor.process_keypress(&Key::Page(PageKey::Down));
        // The preset step lands on row 3; the loop of `screen_rows` further DOWN presses
        // advances it again, landing on row 7.
        assert_eq!(editor.cursor.y, 7);
    }

    #[test]
    fn page_up_returns_to_rowoff() {
        let mut editor = Editor::default();
        editor.screen_rows = 4;
        editor.cursor.rowoff = 5;
        editor.cursor.y = 8;
        for i in 0..10 {
            editor.rows.push(Row::new(format!("line{i}").into_bytes()));
        }
        editor.update_all_rows();

        editor.process_keypress(&Key::Page(PageKey::Up));
        // The preset step lands on row 5; the loop of `screen_rows` further UP presses
        // advances it again, landing on row 1.
        assert_eq!(editor.cursor.y, 1);
    }

    #[test]
    fn find_session_wraps_and_advances_to_next_match() {
        let mut rows: Vec<Row> =
            ["foo", "bar", "foobar"].into_iter().map(|s| Row::new(s.as_bytes().to_vec())).collect();
        for row in &mut rows {
            row.update(None, 4);
        }
        let mut session = FindSession::default();

        let (row, _) = session.search(&mut rows, b"foo", 4).expect("first match in row 0");
        assert_eq!(row, 0);
        assert!(rows[0].hl.iter().any(|&h| h == HlType::Match));

        // A caller restores the previous match's highlight before searching again, as
        // `PromptMode::process_keypress` does on every keystroke.
        session.restore(&mut rows);
        assert!(rows[0].hl.iter().all(|&h| h != HlType::Match));

        let (row, _) = session.search(&mut rows, b"foo", 4).expect("second match in row 2");
        assert_eq!(row, 2);
        assert!(rows[2].hl.iter().any(|&h| h == HlType::Match));
    }

    #[test]
    fn incremental_find_moves_to_second_match_and_escape_restores_cursor() {
        let mut editor = Editor::default();
        for line in ["foo", "bar", "foobar"] {
            editor.rows.push(Row::new(line.as_bytes().to_vec()));
        }
        editor.update_all_rows();
        let original = (editor.cursor.x, editor.cursor.y);

        let (_, prompt_mode) = editor.process_keypress(&Key::Char(FIND));
        let mut prompt_mode = prompt_mode.expect("Ctrl-F enters find mode");
        for b in b"foo" {
            prompt_mode = prompt_mode
                .process_keypress(&mut editor, &Key::Char(*b))
                .expect("no I/O in this path")
                .expect("still typing the query");
        }
        assert_eq!(editor.cursor.y, 0);

        prompt_mode = prompt_mode
            .process_keypress(&mut editor, &Key::Arrow(AKey::Down))
            .expect("no I/O in this path")
            .expect("still in find mode");
        assert_eq!(editor.cursor.y, 2);

        let result = prompt_mode.process_keypress(&mut editor, &Key::Escape).expect("no I/O in this path");
        assert!(result.is_none());
        assert_eq!((editor.cursor.x, editor.cursor.y), original);
    }
}
