/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     symbols.rs
 * Purpose:  Declared-type registry for SADAL variables.
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

use std::collections::HashMap;
use std::fmt;

use crate::lexer::TokenKind;

/// The five scalar types a SADAL variable can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Integer,
    Float,
    Boolean,
    Character,
    String,
}

impl ScalarType {
    /// Maps a type keyword token onto its scalar type.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Integer => Some(ScalarType::Integer),
            TokenKind::Float => Some(ScalarType::Float),
            TokenKind::Boolean => Some(ScalarType::Boolean),
            TokenKind::Character => Some(ScalarType::Character),
            TokenKind::String => Some(ScalarType::String),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::Integer => "INTEGER",
            ScalarType::Float => "FLOAT",
            ScalarType::Boolean => "BOOLEAN",
            ScalarType::Character => "CHARACTER",
            ScalarType::String => "STRING",
        };
        write!(f, "{}", name)
    }
}

/// Maps variable names to their declared types.
///
/// Entries are write-once: a name is registered at most once per program
/// and its type never changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<String, ScalarType>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with its declared type.
    ///
    /// # Returns
    /// - `true` if the name was new and is now registered
    /// - `false` if the name already existed (the table is left untouched)
    pub fn declare(&mut self, name: &str, ty: ScalarType) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(name.to_string(), ty);
        true
    }

    pub fn lookup(&self, name: &str) -> Option<ScalarType> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
