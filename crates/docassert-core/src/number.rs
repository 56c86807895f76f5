use std::fmt;

use serde_json::Number as JsonNumber;

use crate::ParseError;

/// A numeric scalar that remembers whether it was written as an integer or a float.
///
/// The distinction is part of the value's logical type: `1` and `1.0` are
/// never semantically equal.
///
/// ```
/// # use docassert_core::Number;
/// let int = Number::integer(1);
/// let float = Number::float(1.0)?;
/// assert_ne!(int, float);
/// # Ok::<(), docassert_core::ParseError>(())
/// ```
#[derive(Clone, Debug)]
pub enum Number {
    /// Integral number covering the full `i64` and `u64` ranges.
    Integer(i128),
    /// Integral number outside the `i128` range, kept as its decimal text.
    BigInteger(String),
    /// Finite IEEE-754 double.
    Float(f64),
}

impl Number {
    /// Creates an integer number.
    #[must_use]
    pub fn integer<I>(value: I) -> Self
    where
        I: Into<i128>,
    {
        Self::Integer(value.into())
    }

    /// Creates a float number after validating finiteness.
    ///
    /// ```
    /// # use docassert_core::Number;
    /// assert!(Number::float(f64::NAN).is_err());
    /// ```
    pub fn float(value: f64) -> Result<Self, ParseError> {
        if value.is_finite() {
            Ok(Self::Float(value))
        } else {
            Err(ParseError::NotFinite { value })
        }
    }

    /// Indicates whether the number is integral.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::BigInteger(_))
    }

    /// Reads a JSON number from its literal text.
    ///
    /// A literal without fraction or exponent is an integer of any width;
    /// everything else is a float.
    pub(crate) fn from_json_number(num: &JsonNumber) -> Result<Self, ParseError> {
        let literal = num.as_str();
        if is_integer_literal(literal) {
            return Ok(match literal.parse::<i128>() {
                Ok(value) => Self::Integer(value),
                Err(_) => Self::BigInteger(literal.to_owned()),
            });
        }
        match num.as_f64() {
            Some(f) => Self::float(f),
            None => Err(ParseError::NumberOutOfRange { value: literal.to_owned() }),
        }
    }

    /// Converts the number into a `serde_json::Number`.
    #[must_use]
    pub fn to_json_number(&self) -> JsonNumber {
        match self {
            Self::Integer(i) => {
                JsonNumber::from_i128(*i).unwrap_or_else(|| float_to_json(*i as f64))
            }
            Self::BigInteger(digits) => serde_json::from_str(digits)
                .unwrap_or_else(|_| float_to_json(digits.parse().unwrap_or_default())),
            Self::Float(f) => float_to_json(*f),
        }
    }
}

fn is_integer_literal(literal: &str) -> bool {
    let digits = literal.strip_prefix('-').unwrap_or(literal);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn float_to_json(value: f64) -> JsonNumber {
    // Float values are finite by construction.
    JsonNumber::from_f64(value).unwrap_or_else(|| JsonNumber::from(0))
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::BigInteger(a), Self::BigInteger(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_number())
    }
}
