/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     value.rs
 * Purpose:  Runtime value representation and the type-checked operators of
 *           the SADAL expression grammar.
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

use std::cmp::Ordering;
use std::fmt;

use crate::error::ValueError;
use crate::symbols::ScalarType;

/// SADAL runtime value representation.
///
/// This is the core type that flows through the evaluator. Every expression
/// production ultimately returns one of these, and exactly one variant is
/// active at a time.
///
/// `Error` is the "no valid value" sentinel. It only appears while an
/// operand is being parsed for its syntax alone (the discarded side of a
/// short-circuited `AND`/`OR`); every operator rejects it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Bool(bool),
    Char(char),
    String(String),
    Error,
}

impl Value {
    /// Returns a stable type name string (useful for errors).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Real(_) => "Real",
            Value::Bool(_) => "Boolean",
            Value::Char(_) => "Character",
            Value::String(_) => "String",
            Value::Error => "Error",
        }
    }

    /// The declared type a value of this kind may be stored under.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self {
            Value::Integer(_) => Some(ScalarType::Integer),
            Value::Real(_) => Some(ScalarType::Float),
            Value::Bool(_) => Some(ScalarType::Boolean),
            Value::Char(_) => Some(ScalarType::Character),
            Value::String(_) => Some(ScalarType::String),
            Value::Error => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Real(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    fn illegal(&self, op: &'static str, other: &Value) -> ValueError {
        ValueError::IllegalOperands {
            op,
            left: self.type_name(),
            right: other.type_name(),
        }
    }

    // -------------------------------------------------------------------------
    // Arithmetic
    // -------------------------------------------------------------------------

    pub fn add(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_add(*b)
                .map(Value::Integer)
                .ok_or(ValueError::Overflow { op: "+" }),
            (Value::Real(a), Value::Real(b)) => Ok(Value::Real(a + b)),
            _ => Err(self.illegal("+", other)),
        }
    }

    pub fn sub(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_sub(*b)
                .map(Value::Integer)
                .ok_or(ValueError::Overflow { op: "-" }),
            (Value::Real(a), Value::Real(b)) => Ok(Value::Real(a - b)),
            _ => Err(self.illegal("-", other)),
        }
    }

    pub fn mul(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_mul(*b)
                .map(Value::Integer)
                .ok_or(ValueError::Overflow { op: "*" }),
            (Value::Real(a), Value::Real(b)) => Ok(Value::Real(a * b)),
            _ => Err(self.illegal("*", other)),
        }
    }

    /// Integer division truncates toward zero.
    pub fn div(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Integer(_), Value::Integer(0)) => Err(ValueError::DivisionByZero),
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_div(*b)
                .map(Value::Integer)
                .ok_or(ValueError::Overflow { op: "/" }),
            (Value::Real(_), Value::Real(b)) if *b == 0.0 => Err(ValueError::DivisionByZero),
            (Value::Real(a), Value::Real(b)) => Ok(Value::Real(a / b)),
            _ => Err(self.illegal("/", other)),
        }
    }

    /// `MOD` is defined on integers only; the sign follows the dividend.
    pub fn modulo(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Integer(_), Value::Integer(0)) => Err(ValueError::ModByZero),
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_rem(*b)
                .map(Value::Integer)
                .ok_or(ValueError::Overflow { op: "MOD" }),
            _ => Err(self.illegal("MOD", other)),
        }
    }

    /// Exponentiation over reals.
    ///
    /// # Rules
    /// - `x ** 0.0` is `1.0` for every `x`, including `0.0`
    /// - `0.0 ** y` is `0.0` for `y > 0`
    /// - `0.0 ** y` for `y < 0` fails
    /// - a negative exponent computes the reciprocal of the positive power
    pub fn pow(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Real(base), Value::Real(exp)) => {
                if *exp == 0.0 {
                    Ok(Value::Real(1.0))
                } else if *base == 0.0 && *exp > 0.0 {
                    Ok(Value::Real(0.0))
                } else if *base == 0.0 {
                    Err(ValueError::ZeroToNegativePower)
                } else if *exp < 0.0 {
                    Ok(Value::Real(1.0 / base.powf(-exp)))
                } else {
                    Ok(Value::Real(base.powf(*exp)))
                }
            }
            _ => Err(self.illegal("**", other)),
        }
    }

    /// Unary minus.
    pub fn negate(&self) -> Result<Value, ValueError> {
        match self {
            Value::Integer(i) => i
                .checked_neg()
                .map(Value::Integer)
                .ok_or(ValueError::Overflow { op: "-" }),
            Value::Real(r) => Ok(Value::Real(-r)),
            _ => Err(ValueError::IllegalOperand {
                op: "sign operation",
                operand: self.type_name(),
            }),
        }
    }

    /// Unary plus: the identity on numbers, an error on everything else.
    pub fn identity(&self) -> Result<Value, ValueError> {
        if self.is_numeric() {
            Ok(self.clone())
        } else {
            Err(ValueError::IllegalOperand {
                op: "sign operation",
                operand: self.type_name(),
            })
        }
    }

    // -------------------------------------------------------------------------
    // Concatenation
    // -------------------------------------------------------------------------

    pub fn concat(&self, other: &Value) -> Result<Value, ValueError> {
        let joined = match (self, other) {
            (Value::String(a), Value::String(b)) => format!("{}{}", a, b),
            (Value::String(a), Value::Char(b)) => format!("{}{}", a, b),
            (Value::Char(a), Value::String(b)) => format!("{}{}", a, b),
            (Value::Char(a), Value::Char(b)) => format!("{}{}", a, b),
            _ => return Err(self.illegal("&", other)),
        };
        Ok(Value::String(joined))
    }

    // -------------------------------------------------------------------------
    // Relational
    // -------------------------------------------------------------------------

    /// Orders two values of the same totally ordered kind.
    ///
    /// Reals are compared by the callers directly. Booleans only take part
    /// when `with_bool` is set (equality operators).
    fn compare(&self, other: &Value, op: &'static str, with_bool: bool) -> Result<Ordering, ValueError> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (Value::Char(a), Value::Char(b)) => Ok(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) if with_bool => Ok(a.cmp(b)),
            _ => Err(self.illegal(op, other)),
        }
    }

    pub fn equals(&self, other: &Value) -> Result<Value, ValueError> {
        if let (Value::Real(a), Value::Real(b)) = (self, other) {
            return Ok(Value::Bool(a == b));
        }
        self.compare(other, "=", true)
            .map(|o| Value::Bool(o == Ordering::Equal))
    }

    pub fn not_equals(&self, other: &Value) -> Result<Value, ValueError> {
        if let (Value::Real(a), Value::Real(b)) = (self, other) {
            return Ok(Value::Bool(a != b));
        }
        self.compare(other, "/=", true)
            .map(|o| Value::Bool(o != Ordering::Equal))
    }

    pub fn less_than(&self, other: &Value) -> Result<Value, ValueError> {
        if let (Value::Real(a), Value::Real(b)) = (self, other) {
            return Ok(Value::Bool(a < b));
        }
        self.compare(other, "<", false)
            .map(|o| Value::Bool(o == Ordering::Less))
    }

    pub fn less_equal(&self, other: &Value) -> Result<Value, ValueError> {
        if let (Value::Real(a), Value::Real(b)) = (self, other) {
            return Ok(Value::Bool(a <= b));
        }
        self.compare(other, "<=", false)
            .map(|o| Value::Bool(o != Ordering::Greater))
    }

    pub fn greater_than(&self, other: &Value) -> Result<Value, ValueError> {
        if let (Value::Real(a), Value::Real(b)) = (self, other) {
            return Ok(Value::Bool(a > b));
        }
        self.compare(other, ">", false)
            .map(|o| Value::Bool(o == Ordering::Greater))
    }

    pub fn greater_equal(&self, other: &Value) -> Result<Value, ValueError> {
        if let (Value::Real(a), Value::Real(b)) = (self, other) {
            return Ok(Value::Bool(a >= b));
        }
        self.compare(other, ">=", false)
            .map(|o| Value::Bool(o != Ordering::Less))
    }

    // -------------------------------------------------------------------------
    // Logical
    // -------------------------------------------------------------------------

    pub fn and(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
            _ => Err(self.illegal("AND", other)),
        }
    }

    pub fn or(&self, other: &Value) -> Result<Value, ValueError> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
            _ => Err(self.illegal("OR", other)),
        }
    }

    pub fn not(&self) -> Result<Value, ValueError> {
        match self {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            _ => Err(ValueError::IllegalOperand {
                op: "NOT",
                operand: self.type_name(),
            }),
        }
    }
}

impl fmt::Display for Value {
    /// Renders a value the way PUT and PUTLINE print it.
    ///
    /// ```text
    /// Integer(42)      → 42
    /// Real(3.5)        → 3.5
    /// Real(10.0)       → 10
    /// Bool(true)       → true
    /// Char('x')        → x
    /// String("cat")    → cat
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::String(s) => write!(f, "{}", s),
            Value::Error => write!(f, "ERROR"),
        }
    }
}
