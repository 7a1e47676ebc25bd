/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
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

use std::io::{self, Write};

use log::warn;
use serde::Serialize;

use crate::config::DiagnosticFormat;
use crate::error::SadalError;

/// One recorded error: where it happened and what went wrong.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl From<SadalError> for Diagnostic {
    fn from(err: SadalError) -> Self {
        Self {
            line: err.line,
            code: err.code,
            message: err.message,
            help: err.help,
        }
    }
}

/// Monotonically growing list of the errors seen during a run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error. The count only ever goes up.
    pub fn report(&mut self, err: SadalError) {
        warn!("{}: {}", err.line, err.message);
        self.entries.push(err.into());
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }
}

/// Renders diagnostics for people (`text`) or tools (`json`).
///
/// The text form is the classic `<line>: <message>`. With `show_source`
/// on, the offending source line and any help note follow it:
///
/// ```text
/// 4: Run-Time Error-Illegal division by zero
///    |
///  4 |     Z := X / 0;
///    |
/// help: check the divisor before dividing
/// ```
pub struct DiagnosticPrinter {
    /// Full source code of the program, used to quote lines.
    source: String,

    format: DiagnosticFormat,

    show_source: bool,
}

impl DiagnosticPrinter {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            format: DiagnosticFormat::Text,
            show_source: false,
        }
    }

    pub fn with_format(mut self, format: DiagnosticFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_source_lines(mut self, show: bool) -> Self {
        self.show_source = show;
        self
    }

    /// Writes every diagnostic in order.
    pub fn print_all<W: Write>(&self, out: &mut W, diagnostics: &Diagnostics) -> io::Result<()> {
        for diag in diagnostics.iter() {
            self.print(out, diag)?;
        }
        Ok(())
    }

    pub fn print<W: Write>(&self, out: &mut W, diag: &Diagnostic) -> io::Result<()> {
        match self.format {
            DiagnosticFormat::Json => {
                serde_json::to_writer(&mut *out, diag)?;
                writeln!(out)
            }
            DiagnosticFormat::Text => self.print_text(out, diag),
        }
    }

    fn print_text<W: Write>(&self, out: &mut W, diag: &Diagnostic) -> io::Result<()> {
        writeln!(out, "{}: {}", diag.line, diag.message)?;

        if !self.show_source {
            return Ok(());
        }

        // Lines are 1-indexed in diagnostics, but vectors are 0-indexed.
        let src_line = self
            .source
            .lines()
            .nth(diag.line.saturating_sub(1))
            .unwrap_or("");

        writeln!(out, "   |")?;
        writeln!(out, "{:>3} | {}", diag.line, src_line)?;
        writeln!(out, "   |")?;

        if let Some(help) = &diag.help {
            writeln!(out, "help: {}", help)?;
        }

        Ok(())
    }
}
