//! FILENAME: core/cellset-engine/src/coercion.rs
//! PURPOSE: Converts a row-key column of raw strings into typed values.
//! CONTEXT: The data type of a level is given as a label such as `int`,
//! `float`, `localDate[yyyy-MM-dd]` or `zonedDateTime[...]`. Numbers must
//! parse: a bad number is an error. Dates are best effort: when a temporal
//! column fails to parse, a warning is logged and the column keeps its raw
//! strings.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, ParseError};
use log::warn;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::discovery::LevelCoordinate;
use crate::error::{CellsetError, CellsetResult};
use crate::view::IndexColumn;

static LOCAL_DATE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^localDate\[(.*)\]$").expect("valid localDate regex"));

static ZONED_DATE_TIME_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^zonedDateTime\[(.*)\]$").expect("valid zonedDateTime regex"));

/// Date pattern token -> chrono directive, applied in this order.
/// "MMM" maps to a numeric month like "MM": textual months never parse.
static DATE_TOKEN_DIRECTIVES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        ("yyyy", "%Y"),
        ("MMM", "%m"),
        ("MM", "%m"),
        ("dd", "%d"),
        ("^d", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ]
    .into_iter()
    .map(|(token, directive)| (Regex::new(token).expect("valid date token"), directive))
    .collect()
});

/// Text form of `EEE MMM dd HH:mm:ss zzz yyyy` with a numeric zone.
const ZONED_TEXT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Zone-less forms, read as UTC.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// The coercion a type label asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelDataType {
    Integer,
    Float,
    /// chrono format string, already translated from the date pattern.
    LocalDate(String),
    ZonedDateTime,
    Text,
}

impl LevelDataType {
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return LevelDataType::Text;
        };
        match label {
            "int" => LevelDataType::Integer,
            "float" => LevelDataType::Float,
            _ => {
                if let Some(captures) = LOCAL_DATE_LABEL.captures(label) {
                    LevelDataType::LocalDate(date_pattern_to_chrono(&captures[1]))
                } else if ZONED_DATE_TIME_LABEL.is_match(label) {
                    LevelDataType::ZonedDateTime
                } else {
                    LevelDataType::Text
                }
            }
        }
    }
}

/// Translates a `yyyy-MM-dd` style pattern into a chrono format string.
pub fn date_pattern_to_chrono(pattern: &str) -> String {
    DATE_TOKEN_DIRECTIVES
        .iter()
        .fold(pattern.to_string(), |format, (token, directive)| {
            token.replace_all(&format, NoExpand(*directive)).into_owned()
        })
}

/// Parses a date-time without a known pattern.
pub fn parse_date_time(value: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .or_else(|_| DateTime::parse_from_str(value, ZONED_TEXT_FORMAT))
        .or_else(|err| {
            NAIVE_DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|naive| naive.and_utc().fixed_offset())
                .ok_or(err)
        })
}

/// Coerces one row-key column according to its type label.
pub fn coerce_column(
    level: &LevelCoordinate,
    label: Option<&str>,
    values: Vec<String>,
) -> CellsetResult<IndexColumn> {
    match LevelDataType::from_label(label) {
        LevelDataType::Integer => values
            .iter()
            .map(|v| parse_integer(v).ok_or_else(|| invalid_number(level, v)))
            .collect::<CellsetResult<Vec<_>>>()
            .map(IndexColumn::Integer),
        LevelDataType::Float => values
            .iter()
            .map(|v| v.trim().parse::<f64>().map_err(|_| invalid_number(level, v)))
            .collect::<CellsetResult<Vec<_>>>()
            .map(IndexColumn::Float),
        LevelDataType::LocalDate(format) => {
            let parsed: Result<Vec<NaiveDate>, ParseError> = values
                .iter()
                .map(|v| NaiveDate::parse_from_str(v.trim(), &format))
                .collect();
            Ok(match parsed {
                Ok(dates) => IndexColumn::Date(dates),
                Err(err) => fall_back_to_text(label, err, values),
            })
        }
        LevelDataType::ZonedDateTime => {
            let parsed: Result<Vec<_>, ParseError> =
                values.iter().map(|v| parse_date_time(v)).collect();
            Ok(match parsed {
                Ok(date_times) => IndexColumn::DateTime(date_times),
                Err(err) => fall_back_to_text(label, err, values),
            })
        }
        LevelDataType::Text => Ok(IndexColumn::Text(values)),
    }
}

/// Integer text, or a decimal with no fractional part such as "1.0".
fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    value.parse::<i64>().ok().or_else(|| {
        let float = value.parse::<f64>().ok()?;
        let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
        (float.is_finite() && float.fract() == 0.0 && in_range).then(|| float as i64)
    })
}

fn fall_back_to_text(label: Option<&str>, err: ParseError, values: Vec<String>) -> IndexColumn {
    warn!(
        "Failed to convert type {} to a date, using string instead. {}",
        label.unwrap_or_default(),
        err
    );
    IndexColumn::Text(values)
}

fn invalid_number(level: &LevelCoordinate, value: &str) -> CellsetError {
    CellsetError::InvalidNumber {
        level: format!("{}/{}", level.hierarchy, level.level),
        value: value.to_string(),
    }
}
