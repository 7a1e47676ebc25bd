/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     console.rs
 * Purpose:  Standard input/output collaborator used by GET, PUT and PUTLINE.
 * 
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * 
 * License:
 * This file is part of the SADAL interpreter project.
 * 
 * SADAL is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

use std::io::{self, BufRead, Write};
use std::sync::OnceLock;

use regex::Regex;

/// Line-buffered access to the program's input and output streams.
///
/// GET statements consume input in three shapes: whitespace-delimited
/// words (numbers, booleans), single characters, and the rest of a line
/// (strings). The console keeps the current input line so the shapes can
/// be mixed freely.
pub struct Console<'io> {
    reader: Box<dyn BufRead + 'io>,
    writer: Box<dyn Write + 'io>,

    /// Current input line, terminator stripped.
    line: String,

    /// Byte offset of the first unread character in `line`.
    pos: usize,

    /// Whether `line` holds a line read from `reader`.
    loaded: bool,
}

impl<'io> Console<'io> {
    pub fn new(reader: impl BufRead + 'io, writer: impl Write + 'io) -> Self {
        Self {
            reader: Box::new(reader),
            writer: Box::new(writer),
            line: String::new(),
            pos: 0,
            loaded: false,
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Reads the next whitespace-delimited word, crossing lines as needed.
    ///
    /// # Returns
    /// - `Ok(Some(word))` on success
    /// - `Ok(None)` at end of input
    pub fn read_word(&mut self) -> io::Result<Option<String>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }

        let rest = &self.line[self.pos..];
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = rest[..len].to_string();
        self.pos += len;

        Ok(Some(word))
    }

    /// Reads one non-whitespace character.
    pub fn read_char(&mut self) -> io::Result<Option<char>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }

        let ch = self.line[self.pos..].chars().next();
        if let Some(c) = ch {
            self.pos += c.len_utf8();
        }

        Ok(ch)
    }

    /// Reads the remainder of the current line.
    ///
    /// Leading whitespace is dropped. When nothing but whitespace is left
    /// on the current line (typically right after a number was read), the
    /// next whole line is returned instead.
    pub fn read_line_rest(&mut self) -> io::Result<Option<String>> {
        if self.loaded {
            let rest = self.line[self.pos..].trim_start();
            if !rest.is_empty() {
                let text = rest.to_string();
                self.pos = self.line.len();
                return Ok(Some(text));
            }
        }

        if !self.next_line()? {
            return Ok(None);
        }

        let text = self.line.clone();
        self.pos = self.line.len();
        Ok(Some(text))
    }

    /// Advances past whitespace, loading lines until a non-blank one.
    ///
    /// Returns `false` at end of input.
    fn skip_whitespace(&mut self) -> io::Result<bool> {
        loop {
            if self.loaded {
                let rest = &self.line[self.pos..];
                let trimmed = rest.trim_start();
                if !trimmed.is_empty() {
                    self.pos += rest.len() - trimmed.len();
                    return Ok(true);
                }
            }

            if !self.next_line()? {
                return Ok(false);
            }
        }
    }

    fn next_line(&mut self) -> io::Result<bool> {
        self.line.clear();
        self.pos = 0;

        if self.reader.read_line(&mut self.line)? == 0 {
            self.loaded = false;
            return Ok(false);
        }

        while self.line.ends_with('\n') || self.line.ends_with('\r') {
            self.line.pop();
        }

        self.loaded = true;
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Compiled once per process. `None` only if the pattern text is invalid,
/// in which case every word is rejected.
fn integer_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[+-]?[0-9]+$").ok())
        .as_ref()
}

fn real_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$").ok())
        .as_ref()
}

fn pattern_matches(pattern: Option<&Regex>, word: &str) -> bool {
    pattern.is_some_and(|re| re.is_match(word))
}

/// Parses an integer typed at a GET prompt. Out-of-range values fail.
pub fn parse_integer(word: &str) -> Option<i64> {
    if !pattern_matches(integer_pattern(), word) {
        return None;
    }
    word.parse().ok()
}

/// Parses a real typed at a GET prompt. Plain integers are accepted.
pub fn parse_real(word: &str) -> Option<f64> {
    if !pattern_matches(real_pattern(), word) {
        return None;
    }
    word.parse().ok()
}

/// `true`/`false` in any letter case.
pub fn parse_boolean(word: &str) -> Option<bool> {
    match word.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
