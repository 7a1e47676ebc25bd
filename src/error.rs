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

use std::path::PathBuf;

use thiserror::Error;

/// Result type returned by every production of the parser/evaluator.
pub type PResult<T> = Result<T, SadalError>;

/// A failure raised while parsing or executing a SADAL program.
///
/// The first `SadalError` of a construct aborts it and travels up the
/// production chain unchanged; the program driver records it once.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{line}: {message}")]
pub struct SadalError {
    /// Stable error code (E_SYNTAX, E_TYPE, …)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Source line the error was detected on
    pub line: usize,

    /// Optional note / help text
    pub help: Option<String>,
}

impl SadalError {
    /// Generic constructor
    pub fn new(code: &'static str, message: impl Into<String>, line: usize) -> Self {
        Self {
            code,
            message: message.into(),
            line,
            help: None,
        }
    }

    /// Syntax error (unexpected token for the current production)
    pub fn syntax_error(message: impl Into<String>, line: usize) -> Self {
        Self::new("E_SYNTAX", message, line)
    }

    /// Type error (value kind does not match a declared type)
    pub fn type_error(message: impl Into<String>, line: usize) -> Self {
        Self::new("E_TYPE", message, line)
    }

    /// Reference error (undeclared, uninitialized or redefined variable)
    pub fn reference_error(message: impl Into<String>, line: usize) -> Self {
        Self::new("E_REFERENCE", message, line)
    }

    /// Runtime error (during evaluation)
    pub fn runtime_error(message: impl Into<String>, line: usize) -> Self {
        Self::new("E_RUNTIME", format!("Run-Time Error-{}", message.into()), line)
    }

    /// Broken interpreter contract, never caused by the program text
    pub fn internal_error(message: impl Into<String>, line: usize) -> Self {
        Self::new("E_INTERNAL", message, line)
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// `true` for errors the short-circuit discard mode may not suppress.
    pub fn is_syntax(&self) -> bool {
        matches!(self.code, "E_SYNTAX" | "E_INTERNAL")
    }
}

/// Failure of a single runtime-value operator.
///
/// Operators never see source positions; the parser attaches the line
/// when it turns one of these into a [`SadalError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Illegal operand types for {op}: {left} and {right}")]
    IllegalOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("Illegal operand type for {op}: {operand}")]
    IllegalOperand {
        op: &'static str,
        operand: &'static str,
    },

    #[error("Illegal division by zero")]
    DivisionByZero,

    #[error("Illegal mod by zero")]
    ModByZero,

    #[error("Zero raised to a negative power")]
    ZeroToNegativePower,

    #[error("Integer overflow in {op}")]
    Overflow { op: &'static str },
}

/// Violation of the token cursor's single-slot pushback contract.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("token '{rejected}' pushed back while '{buffered}' is still buffered")]
pub struct PushbackError {
    pub buffered: String,
    pub rejected: String,
}

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
