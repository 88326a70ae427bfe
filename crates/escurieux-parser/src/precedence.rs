//! Binding powers of the infix parselets, lowest first.
//! 中缀解析器的绑定优先级，从低到高。
//!
//! An infix parselet extends the current left operand only while its
//! precedence is strictly greater than the caller's minimum.

pub const STATEMENT: f64 = 0.5;
pub const ASSIGNMENT: f64 = 0.9;
pub const CONDITIONAL: f64 = 2.0;
pub const SUM: f64 = 3.0;
pub const PRODUCT: f64 = 4.0;
pub const EXPONENT: f64 = 5.0;
pub const PREFIX: f64 = 6.0;
pub const POSTFIX: f64 = 7.0;
pub const CALL: f64 = 8.0;
pub const PROPERTY_ACCESS: f64 = 9.0;

/// No infix parselet binds this tightly; used to read a single prefix production.
pub const PREFIX_ONLY: f64 = f64::INFINITY;
