use crate::types::{CellValue, Column, ColumnType};
use std::num::IntErrorKind;
use tracing::debug;

/// Cell contents treated as missing values
pub const MISSING_VALUE_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_TOKENS: [&str; 3] = ["True", "TRUE", "true"];
const FALSE_TOKENS: [&str; 3] = ["False", "FALSE", "false"];

/// What a single raw cell looks like on its own
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind {
    Missing,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text,
}

pub fn is_missing(raw: &str) -> bool {
    MISSING_VALUE_TOKENS.contains(&raw)
}

/// Classify one raw cell. Integers that overflow 64 bits are text, not floats.
pub fn classify(raw: &str) -> ValueKind {
    if is_missing(raw) {
        return ValueKind::Missing;
    }

    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(value) => return ValueKind::Integer(value),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return ValueKind::Text;
        }
        Err(_) => {}
    }

    if let Ok(value) = trimmed.parse::<f64>() {
        return ValueKind::Float(value);
    }

    if TRUE_TOKENS.contains(&trimmed) {
        ValueKind::Boolean(true)
    } else if FALSE_TOKENS.contains(&trimmed) {
        ValueKind::Boolean(false)
    } else {
        ValueKind::Text
    }
}

/// Tally of value kinds observed across a complete column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnProfile {
    pub integers: usize,
    pub floats: usize,
    pub booleans: usize,
    pub texts: usize,
    pub missing: usize,
}

impl ColumnProfile {
    pub fn from_values<S: AsRef<str>>(values: &[S]) -> Self {
        let mut profile = Self::default();
        for value in values {
            profile.observe(classify(value.as_ref()));
        }
        profile
    }

    pub fn observe(&mut self, kind: ValueKind) {
        match kind {
            ValueKind::Missing => self.missing += 1,
            ValueKind::Integer(_) => self.integers += 1,
            ValueKind::Float(_) => self.floats += 1,
            ValueKind::Boolean(_) => self.booleans += 1,
            ValueKind::Text => self.texts += 1,
        }
    }

    pub fn present(&self) -> usize {
        self.integers + self.floats + self.booleans + self.texts
    }

    /// Resolve the storage type for the column.
    ///
    /// An empty column (no rows) is text; a column of only missing values is
    /// real, matching how an all-null numeric column is read.
    pub fn resolve(&self) -> ColumnType {
        if self.present() == 0 {
            return if self.missing == 0 {
                ColumnType::Text
            } else {
                ColumnType::Real
            };
        }

        let numerics = self.integers + self.floats;
        if self.texts > 0 || (self.booleans > 0 && numerics > 0) {
            ColumnType::Text
        } else if self.booleans > 0 {
            ColumnType::Boolean
        } else if self.floats > 0 {
            ColumnType::Real
        } else {
            ColumnType::Integer
        }
    }
}

/// Turns raw column text into a typed column, looking at every value first
#[derive(Debug, Clone, Default)]
pub struct ColumnTypeResolver;

impl ColumnTypeResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve_column<S: AsRef<str>>(&self, name: String, raw_values: &[S]) -> Column {
        let profile = ColumnProfile::from_values(raw_values);
        let column_type = profile.resolve();

        debug!(
            column = %name,
            column_type = %column_type,
            integers = profile.integers,
            floats = profile.floats,
            booleans = profile.booleans,
            texts = profile.texts,
            missing = profile.missing,
            "Resolved column type"
        );

        let values = raw_values
            .iter()
            .map(|raw| convert_cell(raw.as_ref(), column_type))
            .collect();

        Column {
            name,
            column_type,
            values,
        }
    }
}

/// Convert one raw cell into the resolved column type
pub fn convert_cell(raw: &str, column_type: ColumnType) -> CellValue {
    match (classify(raw), column_type) {
        (ValueKind::Missing, _) => CellValue::Null,
        (ValueKind::Integer(value), ColumnType::Integer) => CellValue::Integer(value),
        (ValueKind::Integer(value), ColumnType::Real) => CellValue::Real(value as f64),
        (ValueKind::Float(value), ColumnType::Real) => {
            if value.is_nan() {
                CellValue::Null
            } else {
                CellValue::Real(value)
            }
        }
        (ValueKind::Boolean(value), ColumnType::Boolean) => CellValue::Integer(i64::from(value)),
        _ => CellValue::Text(raw.to_string()),
    }
}
