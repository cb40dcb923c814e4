//! # Row
//!
//! A single line of text and its two derived representations: the tab-expanded render bytes and
//! the per-byte syntax highlight tags. Every mutation of `chars` is followed by [`Row::update`],
//! which recomputes both in one pass; nothing here can fail, since rows are pure transformations
//! on owned memory.

use std::io::Write as _;

use crate::ansi_escape::{RESET_FMT, REVERSE_VIDEO};
use crate::error::Error;
use crate::syntax::{Conf as SyntaxConf, HlType};

/// A row of text: the logical bytes the user typed, the rendered (tab-expanded) bytes, and one
/// highlight tag per rendered byte.
#[derive(Default)]
pub struct Row {
    /// The logical bytes of the row, with no trailing newline.
    pub(crate) chars: Vec<u8>,
    /// The rendered bytes: tabs expanded to spaces up to the next `TAB_STOP` column, everything
    /// else copied verbatim. Contains no `b'\t'`.
    pub(crate) render: Vec<u8>,
    /// One highlight tag per byte of `render`.
    pub(crate) hl: Vec<HlType>,
}

impl Row {
    /// Create a new row holding `chars`. The render/highlight buffers start empty; call
    /// [`Row::update`] before drawing or measuring it.
    pub fn new(chars: Vec<u8>) -> Self { Self { chars, ..Self::default() } }

    /// The number of logical bytes in the row.
    pub fn size(&self) -> usize { self.chars.len() }

    /// The number of rendered bytes in the row.
    pub fn rsize(&self) -> usize { self.render.len() }

    /// Insert one byte at logical position `at`, clamping out-of-range positions to the end.
    pub fn insert_char(&mut self, at: usize, c: u8) { self.chars.insert(at.min(self.chars.len()), c); }

    /// Delete the byte at logical position `at`. A no-op if `at` is out of range.
    pub fn delete_char(&mut self, at: usize) {
        if at < self.chars.len() {
            self.chars.remove(at);
        }
    }

    /// Append `bytes` to the end of the row.
    pub fn append_bytes(&mut self, bytes: &[u8]) { self.chars.extend_from_slice(bytes); }

    /// Remove and return the logical bytes at `at..`, leaving `self.chars[..at]` behind.
    pub fn split_off(&mut self, at: usize) -> Vec<u8> { self.chars.split_off(at) }

    /// Recompute `render` (tab expansion) and `hl` (syntax highlighting) from `chars`.
    pub fn update(&mut self, syntax: Option<&SyntaxConf>, tab_stop: usize) {
        self.render.clear();
        let mut rx = 0_usize;
        for &c in &self.chars {
            if c == b'\t' {
                let spaces = tab_stop - (rx % tab_stop);
                self.render.extend(std::iter::repeat_n(b' ', spaces));
                rx += spaces;
            } else {
                self.render.push(c);
                rx += 1;
            }
        }
        self.update_syntax(syntax);
    }

    /// Map a logical column to a rendered column, accounting for tab expansion.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let mut rx = 0;
        for &c in self.chars.iter().take(cx) {
            if c == b'\t' {
                rx += (tab_stop - 1) - (rx % tab_stop);
            }
            rx += 1;
        }
        rx
    }

    /// Map a rendered column to a logical column: the inverse of [`Row::cx_to_rx`].
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &c) in self.chars.iter().enumerate() {
            if c == b'\t' {
                cur_rx += (tab_stop - 1) - (cur_rx % tab_stop);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.chars.len()
    }

    /// Recompute the highlight tag for each rendered byte. With no syntax selected, or when the
    /// rule doesn't highlight numbers, every byte is `NORMAL`.
    fn update_syntax(&mut self, syntax: Option<&SyntaxConf>) {
        self.hl.clear();
        self.hl.resize(self.render.len(), HlType::Normal);
        let Some(syntax) = syntax else { return };
        if !syntax.highlight_numbers {
            return;
        }
        let mut prev_sep = true;
        let mut prev_hl = HlType::Normal;
        for (i, &c) in self.render.iter().enumerate() {
            let hl = if (c.is_ascii_digit() && (prev_sep || prev_hl == HlType::Number))
                || (c == b'.' && prev_hl == HlType::Number)
            {
                HlType::Number
            } else {
                HlType::Normal
            };
            self.hl[i] = hl;
            prev_sep = is_sep(c);
            prev_hl = hl;
        }
    }

    /// Paint `range` of rendered bytes with `HlType::Match`, returning a snapshot of the tags it
    /// overwrote so the caller can restore them later.
    pub fn paint_match(&mut self, range: std::ops::Range<usize>) -> Vec<HlType> {
        let snapshot = self.hl[range.clone()].to_vec();
        for tag in &mut self.hl[range] {
            *tag = HlType::Match;
        }
        snapshot
    }

    /// Restore a highlight snapshot previously taken by [`Row::paint_match`] at `start`.
    pub fn restore_hl(&mut self, start: usize, snapshot: &[HlType]) {
        self.hl[start..start + snapshot.len()].copy_from_slice(snapshot);
    }

    /// Find `needle` as a substring of `render`, returning the byte offset of the first match.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        self.render.windows(needle.len()).position(|w| w == needle)
    }

    /// Draw the rendered bytes `[coloff, coloff + max_len)` to `buffer`, emitting SGR color
    /// changes driven by `hl` and inverse video for control bytes. Always ends by resetting the
    /// active color, even though that is redundant right after the final SGR reset.
    pub fn draw(&self, coloff: usize, max_len: usize, buffer: &mut Vec<u8>) -> Result<(), Error> {
        let start = coloff.min(self.render.len());
        let end = start.saturating_add(max_len).min(self.render.len());
        let mut current_hl = HlType::Normal;
        for (c, hl) in self.render[start..end].iter().zip(&self.hl[start..end]) {
            if c.is_ascii_control() {
                write!(buffer, "{REVERSE_VIDEO}")?;
                buffer.push(if *c <= 26 { b'@' + c } else { b'?' });
                write!(buffer, "{RESET_FMT}")?;
                if current_hl != HlType::Normal {
                    write!(buffer, "{current_hl}")?;
                }
            } else {
                if *hl != current_hl {
                    write!(buffer, "{hl}")?;
                    current_hl = *hl;
                }
                buffer.push(*c);
            }
        }
        write!(buffer, "{RESET_FMT}")?;
        Ok(())
    }
}

/// Whether `c` terminates a number token: whitespace, null, or one of `,.()+-/*=~%<>[];`.
const fn is_sep(c: u8) -> bool {
    c.is_ascii_whitespace()
        || matches!(
            c,
            b'\0' | b',' | b'.' | b'(' | b')' | b'+' | b'-' | b'/' | b'*' | b'=' | b'~' | b'%' | b'<' | b'>' | b'[' | b']' | b';'
        )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn c_syntax() -> &'static SyntaxConf { SyntaxConf::select("main.c").expect("c rule exists") }

    #[test]
    fn update_expands_tabs_to_tab_stop_boundary() {
        let mut row = Row::new(b"a\tb".to_vec());
        row.update(None, 4);
        assert_eq!(row.render, b"a   b");
        assert_eq!(row.rsize(), row.render.len());
        assert_eq!(row.rx_to_cx(4, 4), 2);
    }

    #[test]
    fn update_with_no_syntax_is_all_normal() {
        let mut row = Row::new(b"x 12 3.5".to_vec());
        row.update(None, 4);
        assert!(row.hl.iter().all(|&h| h == HlType::Normal));
    }

    #[test]
    fn number_highlighting_matches_scenario() {
        let mut row = Row::new(b"x 12 3.5 a4".to_vec());
        row.update(Some(c_syntax()), 4);
        let expected = "NNNDDNNNNNN"
            .chars()
            .map(|ch| if ch == 'D' { HlType::Number } else { HlType::Normal })
            .collect::<Vec<_>>();
        assert_eq!(row.hl, expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(5, 5)]
    fn cx_to_rx_is_identity_without_tabs(#[case] cx: usize, #[case] expected_rx: usize) {
        let mut row = Row::new(b"hello".to_vec());
        row.update(None, 4);
        assert_eq!(row.cx_to_rx(cx, 4), expected_rx);
    }

    #[test]
    fn cx_to_rx_and_rx_to_cx_round_trip_without_tabs() {
        let mut row = Row::new(b"hello world".to_vec());
        row.update(None, 4);
        for cx in 0..=row.size() {
            let rx = row.cx_to_rx(cx, 4);
            assert_eq!(row.rx_to_cx(rx, 4), cx);
        }
    }

    #[test]
    fn insert_and_delete_char_round_trip() {
        let mut row = Row::new(b"helo".to_vec());
        row.insert_char(3, b'l');
        assert_eq!(row.chars, b"hello");
        row.delete_char(3);
        assert_eq!(row.chars, b"helo");
    }

    #[test]
    fn insert_char_clamps_out_of_range_position() {
        let mut row = Row::new(b"ab".to_vec());
        row.insert_char(99, b'!');
        assert_eq!(row.chars, b"ab!");
    }

    #[test]
    fn delete_char_out_of_range_is_noop() {
        let mut row = Row::new(b"ab".to_vec());
        row.delete_char(99);
        assert_eq!(row.chars, b"ab");
    }

    #[test]
    fn split_off_splits_logical_bytes() {
        let mut row = Row::new(b"hello world".to_vec());
        let tail = row.split_off(5);
        assert_eq!(row.chars, b"hello");
        assert_eq!(tail, b" world");
    }

    #[test]
    fn find_locates_substring_in_render() {
        let mut row = Row::new(b"foobar".to_vec());
        row.update(None, 4);
        assert_eq!(row.find(b"bar"), Some(3));
        assert_eq!(row.find(b"baz"), None);
    }

    #[test]
    fn paint_match_and_restore_hl_round_trip() {
        let mut row = Row::new(b"foobar".to_vec());
        row.update(None, 4);
        let before = row.hl.clone();
        let snapshot = row.paint_match(0..3);
        assert!(row.hl[0..3].iter().all(|&h| h == HlType::Match));
        row.restore_hl(0, &snapshot);
        assert_eq!(row.hl, before);
    }

    #[test]
    fn draw_emits_control_bytes_in_reverse_video() {
        let mut row = Row::new(vec![1]);
        row.update(None, 4);
        let mut buf = Vec::new();
        row.draw(0, 10, &mut buf).expect("draw never fails");
        let rendered = String::from_utf8_lossy(&buf);
        assert!(rendered.contains(REVERSE_VIDEO));
        assert!(rendered.contains('A')); // 0x01 renders as '@' + 1 == 'A'
    }
}
