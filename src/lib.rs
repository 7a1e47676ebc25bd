/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     lib.rs
 * Purpose:  Crate root for the SADAL interpreter library.
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

//! SADAL: a small Ada-like procedural language, parsed and executed in a
//! single pass.
//!
//! ```text
//! Source → Lexer → TokenCursor → Parser/Evaluator → Console output
//!                                      ↓
//!                  SymbolTable / Environment / Diagnostics
//! ```

pub mod config;
pub mod console;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod state;
pub mod symbols;
pub mod value;

pub use config::Config;
pub use error::{PResult, SadalError};
pub use interpreter::{run, RunReport};
pub use value::Value;
