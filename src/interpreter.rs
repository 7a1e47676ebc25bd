/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     interpreter.rs
 * Purpose:  Top-level driver: runs one SADAL program end to end.
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

use std::io::{BufRead, Write};

use log::{info, warn};

use crate::config::Config;
use crate::console::Console;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::state::InterpreterState;

/// Outcome of a single program run.
#[derive(Debug)]
pub struct RunReport {
    /// Tables and diagnostics as the run left them. Nothing committed
    /// before a failure is rolled back.
    pub state: InterpreterState,

    /// `true` when the program ran to completion without diagnostics.
    pub succeeded: bool,
}

impl RunReport {
    pub fn error_count(&self) -> usize {
        self.state.error_count()
    }
}

/// Parses and executes `source`.
///
/// GET statements read from `input`; PUT/PUTLINE and the success report
/// write to `output`. The first error stops the run and is recorded as
/// the run's only diagnostic.
///
/// # Example
/// ```rust
/// use sadal::config::Config;
/// use sadal::interpreter::run;
///
/// let mut out = Vec::new();
/// let report = run(
///     "PROCEDURE P IS X : INTEGER := 3; BEGIN PUT(X + 2); END P;",
///     std::io::empty(),
///     &mut out,
///     &Config::default(),
/// );
/// assert!(report.succeeded);
/// assert_eq!(String::from_utf8(out).unwrap(), "5\n(DONE)\n");
/// ```
pub fn run<'a>(
    source: &str,
    input: impl BufRead + 'a,
    output: impl Write + 'a,
    config: &'a Config,
) -> RunReport {
    let console = Console::new(input, output);
    let mut parser = Parser::new(Lexer::new(source), console, config);

    let result = parser.program();
    if let Err(err) = parser.flush() {
        warn!("failed to flush program output: {}", err);
    }

    let mut state = parser.into_state();
    if let Err(err) = result {
        state.diagnostics.report(err);
    }

    let succeeded = state.error_count() == 0;
    info!(
        "program {} finished: {} error(s)",
        state.procedure.as_deref().unwrap_or("<unnamed>"),
        state.error_count()
    );

    RunReport { state, succeeded }
}
