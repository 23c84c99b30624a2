// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

use basalt::{ArithmeticOperator, DataType, Literal};

use crate::RuntimeErrorKind;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
}

impl Value {
    #[must_use]
    pub fn default_for(data_type: DataType) -> Self {
        match data_type {
            DataType::Integer | DataType::Long | DataType::Boolean | DataType::Unknown => Self::Integer(0),
            DataType::Single | DataType::Double => Self::Float(0.0),
            DataType::String => Self::String(String::new()),
        }
    }

    #[must_use]
    pub fn array(data_type: DataType, len: usize) -> Self {
        Self::Array(vec![Self::default_for(data_type); len])
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(..) | Self::Float(..) => "number",
            Self::String(..) => "string",
            Self::Array(..) => "array",
        }
    }

    fn number(&self) -> Result<Number, RuntimeErrorKind> {
        match self {
            Self::Integer(integer) => Ok(Number::Integer(*integer)),
            Self::Float(float) => Ok(Number::Float(*float)),
            other => Err(RuntimeErrorKind::TypeMismatch {
                expected: "number",
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Rounds floats to the nearest integer.
    pub fn to_integer(&self) -> Result<i64, RuntimeErrorKind> {
        self.number()?.to_integer()
    }

    /// Converts the value for storage in a variable of `data_type`.
    pub fn coerce(self, data_type: DataType) -> Result<Self, RuntimeErrorKind> {
        match data_type {
            DataType::Integer => self.ranged(data_type, i16::MIN.into(), i16::MAX.into()),
            DataType::Long => self.ranged(data_type, i32::MIN.into(), i32::MAX.into()),
            DataType::Boolean => Ok(Self::Integer(self.to_integer()?)),
            DataType::Single | DataType::Double => Ok(Self::Float(self.number()?.as_f64())),

            DataType::String => match self {
                Self::String(..) => Ok(self),
                other => Err(RuntimeErrorKind::TypeMismatch {
                    expected: "string",
                    found: other.type_name().to_string(),
                }),
            },

            DataType::Unknown => Ok(self),
        }
    }

    fn ranged(self, data_type: DataType, min: i64, max: i64) -> Result<Self, RuntimeErrorKind> {
        let integer = self.to_integer()?;
        if integer < min || integer > max {
            return Err(RuntimeErrorKind::Overflow { data_type });
        }

        Ok(Self::Integer(integer))
    }

    /// Interprets a line read from a file as a value of `data_type`.
    pub fn parse_as(text: &str, data_type: DataType) -> Result<Self, RuntimeErrorKind> {
        if data_type == DataType::String {
            return Ok(Self::String(text.to_string()));
        }

        let trimmed = text.trim();
        let value = if let Ok(integer) = trimmed.parse::<i64>() {
            Self::Integer(integer)
        } else if let Ok(float) = trimmed.parse::<f64>() {
            Self::Float(float)
        } else {
            return Err(RuntimeErrorKind::TypeMismatch {
                expected: "number",
                found: format!("`{text}`"),
            });
        };

        value.coerce(data_type)
    }

    pub fn negate(self) -> Result<Self, RuntimeErrorKind> {
        match self.number()? {
            Number::Integer(integer) => Ok(integer.checked_neg().map_or(Self::Float(-(integer as f64)), Self::Integer)),
            Number::Float(float) => Ok(Self::Float(-float)),
        }
    }

    pub fn arithmetic(operator: ArithmeticOperator, lhs: Self, rhs: Self) -> Result<Self, RuntimeErrorKind> {
        if let (ArithmeticOperator::Add, Self::String(lhs), Self::String(rhs)) = (operator, &lhs, &rhs) {
            return Ok(Self::String(format!("{lhs}{rhs}")));
        }

        let lhs = lhs.number()?;
        let rhs = rhs.number()?;

        match operator {
            ArithmeticOperator::Add => Ok(lhs.combine(rhs, i64::checked_add, |a, b| a + b)),
            ArithmeticOperator::Subtract => Ok(lhs.combine(rhs, i64::checked_sub, |a, b| a - b)),
            ArithmeticOperator::Multiply => Ok(lhs.combine(rhs, i64::checked_mul, |a, b| a * b)),

            ArithmeticOperator::Divide => {
                let divisor = rhs.as_f64();
                if divisor == 0.0 {
                    return Err(RuntimeErrorKind::DivisionByZero);
                }

                Ok(Self::Float(lhs.as_f64() / divisor))
            }

            ArithmeticOperator::IntegerDivide | ArithmeticOperator::Modulo => {
                let (lhs, rhs) = (lhs.to_integer()?, rhs.to_integer()?);
                if rhs == 0 {
                    return Err(RuntimeErrorKind::DivisionByZero);
                }

                let result = match operator {
                    ArithmeticOperator::IntegerDivide => lhs.checked_div(rhs),
                    _ => lhs.checked_rem(rhs),
                };

                result
                    .map(Self::Integer)
                    .ok_or(RuntimeErrorKind::Overflow { data_type: DataType::Long })
            }

            ArithmeticOperator::Power => Ok(Self::Float(lhs.as_f64().powf(rhs.as_f64()))),
        }
    }

    /// The text `PRINT` writes: non-negative numbers get a leading space
    /// where the sign would go.
    #[must_use]
    pub fn format_for_print(&self) -> String {
        match self {
            Self::Integer(integer) if *integer >= 0 => format!(" {self}"),
            Self::Float(float) if *float >= 0.0 => format!(" {self}"),
            _ => self.to_string(),
        }
    }
}

impl From<&Literal> for Value {
    fn from(value: &Literal) -> Self {
        match value {
            Literal::Integer(integer) => Self::Integer(*integer),
            Literal::FloatingPoint(float) => Self::Float(*float),
            Literal::String(string) => Self::String(string.clone()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(integer) => integer.fmt(f),
            Self::Float(float) => f.write_str(&format_float(*float)),
            Self::String(string) => f.write_str(string),
            Self::Array(elements) => write!(f, "ARRAY({})", elements.len()),
        }
    }
}

/// Whole floats print without a fraction and the zero before the point is
/// dropped, so `0.5` prints as `.5`.
fn format_float(float: f64) -> String {
    if float.fract() == 0.0 && float.abs() < 1e15 {
        return format!("{}", float as i64);
    }

    let text = float.to_string();
    if let Some(rest) = text.strip_prefix("0.") {
        return format!(".{rest}");
    }

    if let Some(rest) = text.strip_prefix("-0.") {
        return format!("-.{rest}");
    }

    text
}

#[derive(Clone, Copy, Debug)]
enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Self::Integer(integer) => integer as f64,
            Self::Float(float) => float,
        }
    }

    fn to_integer(self) -> Result<i64, RuntimeErrorKind> {
        match self {
            Self::Integer(integer) => Ok(integer),
            Self::Float(float) => {
                let rounded = float.round();
                if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
                    return Err(RuntimeErrorKind::Overflow { data_type: DataType::Long });
                }

                Ok(rounded as i64)
            }
        }
    }

    /// Integers stay integers unless the result overflows.
    fn combine(self, rhs: Self, integers: impl FnOnce(i64, i64) -> Option<i64>, floats: impl FnOnce(f64, f64) -> f64) -> Value {
        if let (Self::Integer(lhs), Self::Integer(rhs)) = (self, rhs) {
            if let Some(result) = integers(lhs, rhs) {
                return Value::Integer(result);
            }
        }

        Value::Float(floats(self.as_f64(), rhs.as_f64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(ArithmeticOperator::Add, Value::Integer(2), Value::Integer(3), Value::Integer(5))]
    #[case(ArithmeticOperator::Add, Value::Integer(2), Value::Float(0.5), Value::Float(2.5))]
    #[case(ArithmeticOperator::Add, Value::String("ab".into()), Value::String("cd".into()), Value::String("abcd".into()))]
    #[case(ArithmeticOperator::Subtract, Value::Integer(2), Value::Integer(5), Value::Integer(-3))]
    #[case(ArithmeticOperator::Multiply, Value::Integer(i64::MAX), Value::Integer(2), Value::Float(i64::MAX as f64 * 2.0))]
    #[case(ArithmeticOperator::Divide, Value::Integer(7), Value::Integer(2), Value::Float(3.5))]
    #[case(ArithmeticOperator::IntegerDivide, Value::Integer(7), Value::Integer(2), Value::Integer(3))]
    #[case(ArithmeticOperator::IntegerDivide, Value::Float(7.6), Value::Integer(2), Value::Integer(4))]
    #[case(ArithmeticOperator::Modulo, Value::Integer(7), Value::Integer(3), Value::Integer(1))]
    #[case(ArithmeticOperator::Modulo, Value::Integer(-7), Value::Integer(3), Value::Integer(-1))]
    #[case(ArithmeticOperator::Power, Value::Integer(2), Value::Integer(10), Value::Float(1024.0))]
    fn arithmetic(#[case] operator: ArithmeticOperator, #[case] lhs: Value, #[case] rhs: Value, #[case] expected: Value) {
        assert_eq!(Value::arithmetic(operator, lhs, rhs).unwrap(), expected);
    }

    #[rstest]
    #[case(ArithmeticOperator::Divide)]
    #[case(ArithmeticOperator::IntegerDivide)]
    #[case(ArithmeticOperator::Modulo)]
    fn division_by_zero(#[case] operator: ArithmeticOperator) {
        let error = Value::arithmetic(operator, Value::Integer(1), Value::Integer(0)).unwrap_err();
        assert!(matches!(error, RuntimeErrorKind::DivisionByZero));
    }

    #[test]
    fn strings_and_numbers_do_not_mix() {
        let error = Value::arithmetic(ArithmeticOperator::Add, Value::String("a".into()), Value::Integer(1)).unwrap_err();
        assert!(matches!(error, RuntimeErrorKind::TypeMismatch { expected: "number", .. }));
    }

    #[rstest]
    #[case(Value::Float(2.5), DataType::Integer, Value::Integer(3))]
    #[case(Value::Integer(3), DataType::Double, Value::Float(3.0))]
    #[case(Value::Integer(40_000), DataType::Long, Value::Integer(40_000))]
    #[case(Value::String("x".into()), DataType::String, Value::String("x".into()))]
    fn coerce(#[case] value: Value, #[case] data_type: DataType, #[case] expected: Value) {
        assert_eq!(value.coerce(data_type).unwrap(), expected);
    }

    #[test]
    fn integer_overflow() {
        let error = Value::Integer(40_000).coerce(DataType::Integer).unwrap_err();
        assert!(matches!(error, RuntimeErrorKind::Overflow { data_type: DataType::Integer }));
    }

    #[rstest]
    #[case(Value::Integer(5), " 5")]
    #[case(Value::Integer(-5), "-5")]
    #[case(Value::Float(2.0), " 2")]
    #[case(Value::Float(0.5), " .5")]
    #[case(Value::Float(-0.25), "-.25")]
    #[case(Value::Float(3.75), " 3.75")]
    #[case(Value::String("hi".into()), "hi")]
    fn format_for_print(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.format_for_print(), expected);
    }

    #[rstest]
    #[case(" 42 ", DataType::Integer, Value::Integer(42))]
    #[case("1.5", DataType::Single, Value::Float(1.5))]
    #[case(" padded ", DataType::String, Value::String(" padded ".into()))]
    fn parse_as(#[case] text: &str, #[case] data_type: DataType, #[case] expected: Value) {
        assert_eq!(Value::parse_as(text, data_type).unwrap(), expected);
    }

    #[test]
    fn parse_as_rejects_words_for_numbers() {
        assert!(Value::parse_as("twelve", DataType::Long).is_err());
    }
}
