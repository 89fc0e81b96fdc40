//! Value coercion between widget-native and model-declared kinds.
//!
//! [`change_type`] is the single coercion routine used when reading widgets
//! back into a model. It works in four steps:
//!
//! 1. `Null` becomes the zero value for value-like kinds, `Null` otherwise.
//! 2. A value that already has the target kind is returned unchanged.
//! 3. `Optional(inner)` targets are unwrapped and re-checked against `inner`.
//!    A blank string becomes `Null` unless `inner` is itself a string.
//! 4. A culture-aware typed conversion is attempted (string parsing, date
//!    narrowing and widening); failing that, a generic primitive conversion
//!    (exact numeric widening, rounding, booleans, display to string). If both
//!    fail the result is [`BindError::TypeMismatch`].
//!
//! The [`Culture`] controls the decimal separator and the date formats used
//! by step 4. The free function uses [`Culture::invariant`].

use std::fmt::Write;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use formbind_core::{BindError, BindResult, Settings, Value, ValueKind};

static INVARIANT: LazyLock<Culture> = LazyLock::new(Culture::invariant);

/// Coerces `value` to `target` using the invariant culture.
///
/// # Examples
///
/// ```
/// use formbind_binder::change_type;
/// use formbind_core::{Value, ValueKind};
///
/// assert_eq!(change_type(&Value::Null, &ValueKind::Int).unwrap(), Value::Int(0));
/// assert_eq!(change_type(&Value::from("42"), &ValueKind::Int).unwrap(), Value::Int(42));
/// assert_eq!(change_type(&Value::Float(2.5), &ValueKind::Int).unwrap(), Value::Int(2));
/// assert!(change_type(&Value::from("abc"), &ValueKind::Int).is_err());
/// ```
pub fn change_type(value: &Value, target: &ValueKind) -> BindResult<Value> {
    INVARIANT.change_type(value, target)
}

/// Locale data used when parsing and formatting strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
    /// The character separating the integer and fractional parts.
    pub decimal_separator: char,
    /// `chrono` formats for dates, tried in order. The first one formats.
    pub date_formats: Vec<String>,
    /// `chrono` formats for date-times, tried in order. The first one formats.
    pub datetime_formats: Vec<String>,
    /// `chrono` formats for times, tried in order. The first one formats.
    pub time_formats: Vec<String>,
}

impl Culture {
    /// The culture-independent defaults: `.` separator and ISO 8601 layouts.
    pub fn invariant() -> Self {
        Self::from_settings(&Settings::default())
    }

    /// Builds a culture from the culture fields of `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            decimal_separator: settings.decimal_separator,
            date_formats: settings.date_formats.clone(),
            datetime_formats: settings.datetime_formats.clone(),
            time_formats: settings.time_formats.clone(),
        }
    }

    /// Coerces `value` to `target`. See the module documentation for the steps.
    pub fn change_type(&self, value: &Value, target: &ValueKind) -> BindResult<Value> {
        if value.is_null() {
            return Ok(target.zero_value());
        }
        if value.kind().as_ref() == Some(target) {
            return Ok(value.clone());
        }
        if let ValueKind::Optional(inner) = target {
            if **inner != ValueKind::String && matches!(value, Value::String(s) if s.trim().is_empty()) {
                return Ok(Value::Null);
            }
            return self.change_type(value, inner);
        }
        self.convert_typed(value, target)
            .or_else(|| convert_primitive(value, target))
            .ok_or_else(|| BindError::mismatch(value, target))
    }

    /// Renders a value as display text.
    pub fn format(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Float(f) => self.format_float(*f),
            Value::Date(d) => format_with(self.date_formats.first(), d),
            Value::DateTime(dt) => format_with(self.datetime_formats.first(), dt),
            Value::Time(t) => format_with(self.time_formats.first(), t),
            other => other.to_string(),
        }
    }

    fn format_float(&self, f: f64) -> String {
        let text = f.to_string();
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }

    fn parse_float(&self, s: &str) -> Option<f64> {
        let normalized = s.trim().replace(self.decimal_separator, ".");
        normalized.parse::<f64>().ok().filter(|f| f.is_finite())
    }

    fn parse_date(&self, s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        self.date_formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .or_else(|| self.parse_datetime_only(s).map(|dt| dt.date()))
    }

    fn parse_datetime(&self, s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        self.parse_datetime_only(s).or_else(|| {
            self.date_formats
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(|d| d.and_time(NaiveTime::default()))
        })
    }

    fn parse_datetime_only(&self, s: &str) -> Option<NaiveDateTime> {
        self.datetime_formats
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    }

    fn parse_time(&self, s: &str) -> Option<NaiveTime> {
        let s = s.trim();
        self.time_formats
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
    }

    /// The typed, culture-aware conversion step.
    fn convert_typed(&self, value: &Value, target: &ValueKind) -> Option<Value> {
        match (value, target) {
            (Value::String(s), ValueKind::Int) => s.trim().parse::<i64>().ok().map(Value::Int),
            (Value::String(s), ValueKind::Float) => self.parse_float(s).map(Value::Float),
            (Value::String(s), ValueKind::Bool) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            (Value::String(s), ValueKind::Date) => self.parse_date(s).map(Value::Date),
            (Value::String(s), ValueKind::DateTime) => self.parse_datetime(s).map(Value::DateTime),
            (Value::String(s), ValueKind::Time) => self.parse_time(s).map(Value::Time),
            (Value::Date(d), ValueKind::DateTime) => {
                Some(Value::DateTime(d.and_time(NaiveTime::default())))
            }
            (Value::DateTime(dt), ValueKind::Date) => Some(Value::Date(dt.date())),
            (Value::DateTime(dt), ValueKind::Time) => Some(Value::Time(dt.time())),
            (Value::Time(t), ValueKind::DateTime) => {
                Some(Value::DateTime(NaiveDate::default().and_time(*t)))
            }
            (Value::Float(_) | Value::Date(_) | Value::DateTime(_) | Value::Time(_), ValueKind::String) => {
                Some(Value::String(self.format(value)))
            }
            _ => None,
        }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

/// Formats with the given pattern, falling back to the type's own display
/// when no pattern is configured or the pattern is malformed.
fn format_with<T: FormatWith>(fmt: Option<&String>, value: &T) -> String {
    fmt.and_then(|fmt| value.format_as(fmt))
        .unwrap_or_else(|| value.default_text())
}

/// Chrono types that format through a strftime-style pattern.
trait FormatWith {
    fn format_as(&self, fmt: &str) -> Option<String>;
    fn default_text(&self) -> String;
}

macro_rules! impl_format_with {
    ($($ty:ty),*) => {
        $(
            impl FormatWith for $ty {
                fn format_as(&self, fmt: &str) -> Option<String> {
                    let mut out = String::new();
                    write!(out, "{}", self.format(fmt)).ok()?;
                    Some(out)
                }

                fn default_text(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_format_with!(NaiveDate, NaiveDateTime, NaiveTime);

/// The generic fallback conversion between primitive kinds.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn convert_primitive(value: &Value, target: &ValueKind) -> Option<Value> {
    // 2^63 as f64; every finite float strictly below it fits in i64.
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    match (value, target) {
        (Value::Int(i), ValueKind::Float) => {
            let f = *i as f64;
            (f as i128 == i128::from(*i)).then_some(Value::Float(f))
        }
        (Value::Float(f), ValueKind::Int) => {
            let rounded = f.round_ties_even();
            (rounded.is_finite() && (-I64_BOUND..I64_BOUND).contains(&rounded))
                .then(|| Value::Int(rounded as i64))
        }
        (Value::Bool(b), ValueKind::Int) => Some(Value::Int(i64::from(*b))),
        (Value::Bool(b), ValueKind::Float) => Some(Value::Float(if *b { 1.0 } else { 0.0 })),
        (Value::Int(i), ValueKind::Bool) => Some(Value::Bool(*i != 0)),
        (Value::Float(f), ValueKind::Bool) => Some(Value::Bool(*f != 0.0)),
        (Value::String(s), ValueKind::Bool) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "yes" | "on" | "y" => Some(Value::Bool(true)),
            "0" | "no" | "off" | "n" => Some(Value::Bool(false)),
            _ => None,
        },
        (Value::List(_), ValueKind::String) => None,
        (other, ValueKind::String) => Some(Value::String(other.to_string())),
        _ => None,
    }
}
