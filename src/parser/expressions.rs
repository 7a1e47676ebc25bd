/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     expressions.rs
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
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * The SADAL expression grammar. Every production returns the value of
 * the text it consumed.
 *
 *   Expr       ::= Relation { (AND | OR) Relation }
 *   Relation   ::= SimpleExpr [ (= | /= | < | <= | > | >=) SimpleExpr ]
 *   SimpleExpr ::= STerm { (+ | - | &) STerm }
 *   STerm      ::= [ + | - ] Term
 *   Term       ::= Factor { (* | / | MOD) Factor }
 *   Factor     ::= Primary [ ** [ + | - ] Primary ] | NOT Primary
 *   Primary    ::= Name | ICONST | FCONST | SCONST | CCONST | BCONST
 *                | ( Expr )
 *   Name       ::= IDENT [ ( Range ) ]
 *   Range      ::= SimpleExpr [ . . SimpleExpr ]
 *
 * The sign of an STerm travels down to the first Primary of its first
 * Factor. Every operand of a SimpleExpr may carry one; the right-hand
 * Factor of a Term may not. The right side of a short-circuited AND/OR is parsed in
 * discard mode: it must be well-formed, but its evaluation failures are
 * swallowed and its value is thrown away.
 * ==========================================================================
 */

use log::debug;

use crate::error::{PResult, SadalError};
use crate::lexer::{Token, TokenKind, TokenSource};
use crate::parser::parser::Parser;
use crate::value::Value;

/// An explicit unary sign in front of an STerm or an exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl<'a, S: TokenSource> Parser<'a, S> {
    /// Expr ::= Relation { (AND | OR) Relation }
    pub fn expr(&mut self) -> PResult<Value> {
        let mut value = self.relation()?;

        loop {
            let tok = self.next();
            if !matches!(tok.kind, TokenKind::And | TokenKind::Or) {
                self.push_back(tok)?;
                return Ok(value);
            }

            let left = value.as_bool();
            if left.is_none() {
                self.recover(SadalError::runtime_error(
                    "Left operand of logical operation must be boolean",
                    tok.line,
                ))?;
            }

            let decided = match (tok.kind, left) {
                (TokenKind::And, Some(false)) => Some(false),
                (TokenKind::Or, Some(true)) => Some(true),
                _ => None,
            };

            if let Some(result) = decided {
                debug!("short-circuit {} on line {}", tok.lexeme, tok.line);
                self.discarded(|p| p.relation())?;
                value = Value::Bool(result);
                continue;
            }

            let right = self.relation()?;
            value = match (left, &right) {
                (Some(a), Value::Bool(b)) => Value::Bool(if tok.is(TokenKind::And) {
                    a && *b
                } else {
                    a || *b
                }),
                (None, _) => Value::Error,
                _ => self.recover(SadalError::runtime_error(
                    "Right operand of logical operation must be boolean",
                    tok.line,
                ))?,
            };
        }
    }

    /// Relation ::= SimpleExpr [ relop SimpleExpr ]
    fn relation(&mut self) -> PResult<Value> {
        let left = self.simple_expr()?;

        let tok = self.next();
        if !tok.kind.is_relational() {
            self.push_back(tok)?;
            return Ok(left);
        }

        let right = self.simple_expr()?;
        let result = match tok.kind {
            TokenKind::Eq => left.equals(&right),
            TokenKind::Neq => left.not_equals(&right),
            TokenKind::LThan => left.less_than(&right),
            TokenKind::Lte => left.less_equal(&right),
            TokenKind::GThan => left.greater_than(&right),
            _ => left.greater_equal(&right),
        };
        self.apply(result, tok.line)
    }

    /// SimpleExpr ::= STerm { (+ | - | &) STerm }
    fn simple_expr(&mut self) -> PResult<Value> {
        let mut value = self.signed_term()?;

        loop {
            let tok = self.next();
            if !matches!(tok.kind, TokenKind::Plus | TokenKind::Minus | TokenKind::Concat) {
                self.push_back(tok)?;
                return Ok(value);
            }

            let right = self.signed_term()?;
            let result = match tok.kind {
                TokenKind::Plus => value.add(&right),
                TokenKind::Minus => value.sub(&right),
                _ => value.concat(&right),
            };
            value = self.apply(result, tok.line)?;
        }
    }

    /// STerm ::= [ + | - ] Term
    fn signed_term(&mut self) -> PResult<Value> {
        let sign = self.sign()?;
        self.term(sign)
    }

    /// Term ::= Factor { (* | / | MOD) Factor }
    fn term(&mut self, sign: Option<Sign>) -> PResult<Value> {
        let mut value = self.factor(sign)?;

        loop {
            let tok = self.next();
            if !matches!(tok.kind, TokenKind::Mult | TokenKind::Div | TokenKind::Mod) {
                self.push_back(tok)?;
                return Ok(value);
            }

            let right = self.factor(None)?;
            let result = match tok.kind {
                TokenKind::Mult => value.mul(&right),
                TokenKind::Div => value.div(&right),
                _ => value.modulo(&right),
            };
            value = self.apply(result, tok.line)?;
        }
    }

    /// Factor ::= Primary [ ** [sign] Primary ] | NOT Primary
    fn factor(&mut self, sign: Option<Sign>) -> PResult<Value> {
        let tok = self.next();

        if tok.is(TokenKind::Not) {
            let operand = self.primary(None)?;
            let negated = self.apply(operand.not(), tok.line)?;
            return self.apply_sign(sign, negated, tok.line);
        }

        self.push_back(tok)?;
        let base = self.primary(sign)?;

        let tok = self.next();
        if !tok.is(TokenKind::Exp) {
            self.push_back(tok)?;
            return Ok(base);
        }

        let exp_sign = self.sign()?;
        let exponent = self.primary(exp_sign)?;
        self.apply(base.pow(&exponent), tok.line)
    }

    /// Primary ::= Name | literal | ( Expr )
    fn primary(&mut self, sign: Option<Sign>) -> PResult<Value> {
        let tok = self.next();

        let value = match tok.kind {
            TokenKind::Ident => self.name(tok.clone())?,
            TokenKind::LParen => {
                let inner = self.expr()?;
                self.expect(TokenKind::RParen, "Missing right parenthesis")?;
                inner
            }
            TokenKind::IConst => match tok.lexeme.parse::<i64>() {
                Ok(i) => Value::Integer(i),
                Err(_) => self.recover(SadalError::runtime_error(
                    format!("Integer constant out of range: {}", tok.lexeme),
                    tok.line,
                ))?,
            },
            TokenKind::FConst => match tok.lexeme.parse::<f64>() {
                Ok(r) => Value::Real(r),
                Err(_) => {
                    return Err(SadalError::syntax_error(
                        format!("Malformed real constant: {}", tok.lexeme),
                        tok.line,
                    ))
                }
            },
            TokenKind::SConst => Value::String(tok.lexeme.clone()),
            TokenKind::CConst => match tok.lexeme.chars().next() {
                Some(c) => Value::Char(c),
                None => {
                    return Err(SadalError::internal_error(
                        "Empty character constant",
                        tok.line,
                    ))
                }
            },
            TokenKind::BConst => Value::Bool(tok.lexeme.eq_ignore_ascii_case("true")),
            _ => return Err(self.unexpected(&tok, "Invalid primary expression")),
        };

        self.apply_sign(sign, value, tok.line)
    }

    /// Name ::= IDENT [ ( Range ) ]
    ///
    /// `ident` has already been consumed by the caller.
    fn name(&mut self, ident: Token) -> PResult<Value> {
        let value = match self.variable(&ident) {
            Ok(value) => value,
            Err(err) => self.recover(err)?,
        };

        let tok = self.next();
        if !tok.is(TokenKind::LParen) {
            self.push_back(tok)?;
            return Ok(value);
        }

        let (start, end) = self.range()?;
        self.expect(TokenKind::RParen, "Missing ) after index")?;

        match index(&value, &start, end.as_ref()) {
            Ok(slice) => Ok(slice),
            Err(message) => self.recover(SadalError::runtime_error(message, tok.line)),
        }
    }

    /// Range ::= SimpleExpr [ . . SimpleExpr ]
    ///
    /// The second index is `None` when the range is a single position.
    fn range(&mut self) -> PResult<(Value, Option<Value>)> {
        let start = self.simple_expr()?;

        let tok = self.next();
        if !tok.is(TokenKind::Dot) {
            self.push_back(tok)?;
            return Ok((start, None));
        }

        self.expect(TokenKind::Dot, "Missing second dot in range operator")?;
        let end = self.simple_expr()?;
        Ok((start, Some(end)))
    }

    /// Consumes an optional `+`/`-`.
    fn sign(&mut self) -> PResult<Option<Sign>> {
        let tok = self.next();
        match tok.kind {
            TokenKind::Plus => Ok(Some(Sign::Plus)),
            TokenKind::Minus => Ok(Some(Sign::Minus)),
            _ => {
                self.push_back(tok)?;
                Ok(None)
            }
        }
    }

    fn apply_sign(&self, sign: Option<Sign>, value: Value, line: usize) -> PResult<Value> {
        match sign {
            None => Ok(value),
            Some(Sign::Plus) => self.apply(value.identity(), line),
            Some(Sign::Minus) => self.apply(value.negate(), line),
        }
    }
}

/// Indexes a string value by character position.
///
/// A single index yields a character; a `start..end` pair yields the
/// inclusive substring.
fn index(target: &Value, start: &Value, end: Option<&Value>) -> Result<Value, String> {
    let text = match target {
        Value::String(s) => s,
        other => return Err(format!("Illegal operand type for indexing: {}", other.type_name())),
    };

    let integer = |v: &Value| v.as_integer().ok_or_else(|| "Range indices must be integers".to_string());
    let start = integer(start)?;
    let end = end.map(integer).transpose()?;

    if let Some(end) = end {
        if start > end {
            return Err("Invalid range - start index > end index".to_string());
        }
    }

    let chars: Vec<char> = text.chars().collect();
    let position = |i: i64| {
        usize::try_from(i)
            .ok()
            .filter(|&i| i < chars.len())
            .ok_or_else(|| "String index out of bounds".to_string())
    };

    let first = position(start)?;
    match end {
        None => Ok(Value::Char(chars[first])),
        Some(end) => {
            let last = position(end)?;
            Ok(Value::String(chars[first..=last].iter().collect()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::console::Console;
    use crate::lexer::Lexer;
    use crate::symbols::ScalarType;
    use std::io;

    fn eval_with(src: &str, vars: &[(&str, Value)]) -> PResult<Value> {
        let config = Config::default();
        let mut parser = Parser::new(Lexer::new(src), Console::new(io::empty(), io::sink()), &config);
        for (name, value) in vars {
            if let Some(ty) = value.scalar_type() {
                parser.state.symbols.declare(name, ty);
            }
            parser.state.env.bind(name, value.clone());
        }
        parser.expr()
    }

    fn eval(src: &str) -> PResult<Value> {
        eval_with(src, &[])
    }

    fn message(src: &str) -> String {
        eval(src).unwrap_err().message
    }

    #[test]
    fn precedence() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), Value::Integer(14));
        assert_eq!(eval("(2 + 3) * 4").unwrap(), Value::Integer(20));
        assert_eq!(eval("10 - 4 - 3").unwrap(), Value::Integer(3));
        assert_eq!(eval("7 MOD 3 + 1").unwrap(), Value::Integer(2));
        assert_eq!(eval("1 + 2 = 3 AND 4 > 3").unwrap(), Value::Bool(true));
    }

    #[test]
    fn relation_is_optional() {
        assert_eq!(eval("\"abc\"").unwrap(), Value::String("abc".into()));
        assert_eq!(eval("'a' < 'b'").unwrap(), Value::Bool(true));
    }

    #[test]
    fn booleans_are_not_ordered() {
        assert!(eval("true < false").is_err());
        assert_eq!(eval("true = true").unwrap(), Value::Bool(true));
    }

    #[test]
    fn mixed_kinds_are_rejected() {
        assert!(message("1 + 1.0").starts_with("Run-Time Error-Illegal operand types"));
        assert!(eval("1 = 1.0").is_err());
        assert!(eval("\"a\" & 1").is_err());
    }

    #[test]
    fn concatenation() {
        assert_eq!(
            eval("\"ab\" & 'c' & \"de\"").unwrap(),
            Value::String("abcde".into())
        );
        assert_eq!(eval("'x' & 'y'").unwrap(), Value::String("xy".into()));
    }

    #[test]
    fn sign_binds_to_first_primary() {
        assert_eq!(eval("-2.0 ** 2.0").unwrap(), Value::Real(4.0));
        assert_eq!(eval("-3 * 2").unwrap(), Value::Integer(-6));
        assert_eq!(eval("-3 + 5").unwrap(), Value::Integer(2));
        assert_eq!(eval("-(2 + 3)").unwrap(), Value::Integer(-5));
        assert_eq!(eval("2.0 ** -1.0").unwrap(), Value::Real(0.5));
    }

    #[test]
    fn sign_on_non_numbers_fails() {
        assert_eq!(
            message("-\"abc\""),
            "Run-Time Error-Illegal operand type for sign operation: String"
        );
        assert!(eval("+NOT true").is_err());
        assert!(eval("-true").is_err());
    }

    #[test]
    fn every_simple_expr_operand_takes_a_sign() {
        assert_eq!(eval("1 + -2").unwrap(), Value::Integer(-1));
        assert_eq!(eval("2.5 - -1.0").unwrap(), Value::Real(3.5));
        assert_eq!(eval("\"a\" & -\"b\"").unwrap_err().message, "Run-Time Error-Illegal operand type for sign operation: String");
    }

    #[test]
    fn term_operand_rejects_a_sign() {
        let vars = [("i", Value::Integer(4))];
        assert!(eval_with("i / -1", &vars).unwrap_err().is_syntax());
        assert!(eval("2 * +3").unwrap_err().is_syntax());
    }

    #[test]
    fn exponent_rules() {
        assert_eq!(eval("0.0 ** 0.0").unwrap(), Value::Real(1.0));
        assert_eq!(eval("5.5 ** 0.0").unwrap(), Value::Real(1.0));
        assert_eq!(eval("0.0 ** 3.0").unwrap(), Value::Real(0.0));
        assert!(eval("0.0 ** -2.0").is_err());
        assert!(eval("2 ** 2").is_err());
    }

    #[test]
    fn division_and_mod_by_zero() {
        assert_eq!(message("7 / 0"), "Run-Time Error-Illegal division by zero");
        assert_eq!(message("7 MOD 0"), "Run-Time Error-Illegal mod by zero");
        assert_eq!(message("7.0 / 0.0"), "Run-Time Error-Illegal division by zero");
        assert!(eval("7.0 MOD 2.0").is_err());
    }

    #[test]
    fn not_requires_boolean() {
        assert_eq!(eval("NOT false").unwrap(), Value::Bool(true));
        assert!(eval("NOT 1").is_err());
    }

    #[test]
    fn short_circuit_discards_right_operand() {
        assert_eq!(eval("false AND undeclared > 1").unwrap(), Value::Bool(false));
        assert_eq!(eval("true OR 1 / 0 = 1").unwrap(), Value::Bool(true));
        assert_eq!(eval("false AND 5").unwrap(), Value::Bool(false));
        assert_eq!(eval("true OR \"x\" & 1 = 2").unwrap(), Value::Bool(true));
    }

    #[test]
    fn short_circuit_still_checks_syntax() {
        assert!(eval("false AND (1 +").unwrap_err().is_syntax());
        assert!(eval("true OR )").unwrap_err().is_syntax());
    }

    #[test]
    fn discard_mode_ends_with_the_operand() {
        assert!(eval("false AND x = 1 OR y = 2").is_err());
        assert_eq!(eval("false AND x = 1 OR true").unwrap(), Value::Bool(true));
    }

    #[test]
    fn logical_operands_must_be_boolean() {
        assert_eq!(
            message("1 AND true"),
            "Run-Time Error-Left operand of logical operation must be boolean"
        );
        assert_eq!(
            message("true AND 1"),
            "Run-Time Error-Right operand of logical operation must be boolean"
        );
        assert_eq!(eval("true AND false").unwrap(), Value::Bool(false));
        assert_eq!(eval("false OR true").unwrap(), Value::Bool(true));
    }

    #[test]
    fn variables_are_looked_up() {
        let vars = [("n", Value::Integer(4))];
        assert_eq!(eval_with("n * n", &vars).unwrap(), Value::Integer(16));
        assert_eq!(message("m"), "Undeclared variable: m");
    }

    #[test]
    fn string_indexing() {
        let vars = [("s", Value::String("hello".into()))];
        assert_eq!(eval_with("s(1)", &vars).unwrap(), Value::Char('e'));
        assert_eq!(eval_with("s(1..3)", &vars).unwrap(), Value::String("ell".into()));
        assert_eq!(eval_with("s(0..4)", &vars).unwrap(), Value::String("hello".into()));
        assert_eq!(eval_with("s(2..2)", &vars).unwrap(), Value::String("l".into()));
    }

    #[test]
    fn string_indexing_errors() {
        let vars = [("s", Value::String("hello".into())), ("n", Value::Integer(3))];
        let msg = |src: &str| eval_with(src, &vars).unwrap_err().message;

        assert_eq!(msg("s(5)"), "Run-Time Error-String index out of bounds");
        assert_eq!(msg("s(-1)"), "Run-Time Error-String index out of bounds");
        assert_eq!(msg("s(1..5)"), "Run-Time Error-String index out of bounds");
        assert_eq!(msg("s(3..1)"), "Run-Time Error-Invalid range - start index > end index");
        assert_eq!(msg("s(1.0)"), "Run-Time Error-Range indices must be integers");
        assert!(msg("n(0)").contains("indexing"));
        assert_eq!(msg("s(1. 3)"), "Missing second dot in range operator");
    }

    #[test]
    fn indexing_counts_characters() {
        let vars = [("s", Value::String("héllo".into()))];
        assert_eq!(eval_with("s(1)", &vars).unwrap(), Value::Char('é'));
    }

    #[test]
    fn declared_but_unset_variable() {
        let config = Config::default();
        let mut parser = Parser::new(Lexer::new("x + 1"), Console::new(io::empty(), io::sink()), &config);
        parser.state.symbols.declare("x", ScalarType::Integer);
        assert_eq!(parser.expr().unwrap_err().message, "Uninitialized variable: x");
    }
}
