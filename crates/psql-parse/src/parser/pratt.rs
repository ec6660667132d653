//! Pratt parsing utilities for expression and set-operation precedence.
//!
//! Binding powers, lowest to highest:
//!
//! | Level | Operators                                   |
//! |-------|---------------------------------------------|
//! | 1-2   | OR                                          |
//! | 3-4   | AND                                         |
//! | 5     | NOT (prefix)                                |
//! | 7-8   | = <> < <= > >= IS BETWEEN IN LIKE (no chain)|
//! | 9-10  | \|\|                                        |
//! | 11-12 | + -                                         |
//! | 13-14 | * /                                         |
//! | 15    | - (prefix)                                  |
//! | 17    | COLLATE (postfix)                           |

use crate::ast::{BinaryOp, SetOperator, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of the comparison and predicate tier.
pub const COMPARISON: (u8, u8) = (7, 8);

/// Binding power of postfix COLLATE.
pub const COLLATE: (u8, u8) = (17, 18);

/// Returns the binding power for a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Keyword(Keyword::Not) => Some(5),
        TokenKind::Minus => Some(15),
        _ => None,
    }
}

/// Returns the binding power for an infix or postfix operator.
///
/// Returns (`left_bp`, `right_bp`) where `left_bp < right_bp` gives
/// left-associativity. `NOT` is not listed: it only acts as an infix
/// operator in front of BETWEEN, IN or LIKE, which needs one token of
/// lookahead the parser does itself.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
        | TokenKind::Keyword(Keyword::Is | Keyword::Between | Keyword::In | Keyword::Like) => {
            Some(COMPARISON)
        }

        TokenKind::Concat => Some((9, 10)),
        TokenKind::Plus | TokenKind::Minus => Some((11, 12)),
        TokenKind::Star | TokenKind::Slash => Some((13, 14)),

        TokenKind::Keyword(Keyword::Collate) => Some(COLLATE),

        _ => None,
    }
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::Concat => Some(BinaryOp::Concat),
        _ => None,
    }
}

/// Converts a token to a unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        TokenKind::Minus => Some(UnaryOp::Neg),
        _ => None,
    }
}

/// Returns the operator and binding power of a set operation.
///
/// INTERSECT binds tighter than UNION and EXCEPT; all are
/// left-associative.
#[must_use]
pub const fn set_op_binding_power(kind: &TokenKind) -> Option<(SetOperator, u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Union) => Some((SetOperator::Union, 1, 2)),
        TokenKind::Keyword(Keyword::Except) => Some((SetOperator::Except, 1, 2)),
        TokenKind::Keyword(Keyword::Intersect) => Some((SetOperator::Intersect, 3, 4)),
        _ => None,
    }
}
