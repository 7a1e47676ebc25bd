/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     mod.rs
 * Purpose:  Parser/evaluator module layout.
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

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Program and procedure body productions
pub mod parser;

/// Token stream with single-slot pushback.
pub mod cursor;

/// Declaration part:
/// - identifier lists, types, initializers
pub mod declarations;

/// Statement-level productions:
/// - assignment / PUT / PUTLINE / GET / IF
pub mod statements;

/// Expression-level productions:
/// - Expr → Relation → SimpleExpr → STerm → Term → Factor → Primary → Name
/// - short-circuit discard mode, string indexing
pub mod expressions;

/// Shared parser helpers:
/// - token matching
/// - pushback
/// - error mapping and discard-mode recovery
pub mod helpers;

pub use cursor::TokenCursor;
pub use parser::Parser;
