/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     state.rs
 * Purpose:  The mutable tables a single SADAL program run threads through
 *           every production.
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

use crate::diagnostics::Diagnostics;
use crate::environment::Environment;
use crate::symbols::SymbolTable;

/// Everything a program run mutates besides the token stream.
///
/// Declarations and assignments commit into these tables as they go. A
/// later failure never rolls back what was already committed, so the
/// state after a failed run shows exactly how far execution got.
#[derive(Debug, Clone, Default)]
pub struct InterpreterState {
    /// Name of the procedure being run, once its header has been read.
    pub procedure: Option<String>,
    pub symbols: SymbolTable,
    pub env: Environment,
    pub diagnostics: Diagnostics,
}

impl InterpreterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.count()
    }
}
