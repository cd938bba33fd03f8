//! Load-time column classification.
//!
//! Every column of an uploaded file is classified exactly once, when the
//! file is read, into one of three buckets: a known base field, a
//! recognized restaurant dimension, or an ignored column. Downstream
//! views consume the resulting [`TableSchema`] instead of re-deriving
//! column roles from raw headers.

use polars::prelude::{DataFrame, DataType};
use serde::{Deserialize, Serialize};

/// Columns every source file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Year", "Week", "Month", "Product", "Total"];

/// Bookkeeping columns some exports carry; never treated as restaurants.
pub const KNOWN_EXTRA_COLUMNS: [&str; 4] = ["Case kg", "SeasonFlag", "HolidayFlag", "Date"];

/// Role assigned to a source column at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnClass {
    /// One of [`REQUIRED_COLUMNS`]
    Base,
    /// A numeric per-restaurant sales column
    Restaurant,
    /// Anything else: non-numeric extras and known bookkeeping columns
    Ignored,
}

/// The classification of one cleaned table's columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Recognized restaurant dimensions, sorted by name
    pub restaurants: Vec<String>,
    /// Columns present in the source but carried no further
    pub ignored: Vec<String>,
}

impl TableSchema {
    /// Classify a column name against this schema.
    pub fn classify(&self, name: &str) -> ColumnClass {
        if REQUIRED_COLUMNS.contains(&name) {
            ColumnClass::Base
        } else if self.restaurants.iter().any(|r| r == name) {
            ColumnClass::Restaurant
        } else {
            ColumnClass::Ignored
        }
    }

    /// Union another file's classification into this one. A column seen
    /// as a restaurant in any file stays a restaurant.
    pub fn merge(&mut self, other: &TableSchema) {
        for r in &other.restaurants {
            if !self.restaurants.contains(r) {
                self.restaurants.push(r.clone());
            }
        }
        for i in &other.ignored {
            if !self.ignored.contains(i) {
                self.ignored.push(i.clone());
            }
        }
        self.restaurants.sort();
        self.ignored.retain(|i| !self.restaurants.contains(i));
        self.ignored.sort();
    }
}

/// Classify the columns of a single source frame.
///
/// With a catalog, only cataloged names count as restaurants; without
/// one, every numeric extra column does.
pub fn classify_columns(df: &DataFrame, catalog: Option<&[String]>) -> TableSchema {
    let mut schema = TableSchema::default();

    for name in df.get_column_names() {
        if REQUIRED_COLUMNS.contains(&name) {
            continue;
        }

        let numeric = df
            .column(name)
            .map(|col| is_numeric(col.dtype()))
            .unwrap_or(false);
        let cataloged = catalog
            .map(|list| list.iter().any(|c| c == name))
            .unwrap_or(true);

        if numeric && cataloged && !KNOWN_EXTRA_COLUMNS.contains(&name) {
            schema.restaurants.push(name.to_string());
        } else {
            schema.ignored.push(name.to_string());
        }
    }

    schema.restaurants.sort();
    schema.ignored.sort();
    schema
}

pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}

/// Map a month name to its 1-based number.
///
/// The table is bilingual: Russian and English full month names, matched
/// case-insensitively after trimming.
pub fn month_number(name: &str) -> Option<u32> {
    let key = name.trim().to_lowercase();
    let number = match key.as_str() {
        "январь" | "january" => 1,
        "февраль" | "february" => 2,
        "март" | "march" => 3,
        "апрель" | "april" => 4,
        "май" | "may" => 5,
        "июнь" | "june" => 6,
        "июль" | "july" => 7,
        "август" | "august" => 8,
        "сентябрь" | "september" => 9,
        "октябрь" | "october" => 10,
        "ноябрь" | "november" => 11,
        "декабрь" | "december" => 12,
        _ => return None,
    };
    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_table_is_bilingual() {
        assert_eq!(month_number("January"), Some(1));
        assert_eq!(month_number(" май "), Some(5));
        assert_eq!(month_number("DECEMBER"), Some(12));
        assert_eq!(month_number("Brumaire"), None);
    }

    #[test]
    fn known_extras_never_become_restaurants() {
        let schema = TableSchema {
            restaurants: vec!["Riverside Mall".into()],
            ignored: vec!["Case kg".into()],
        };
        assert_eq!(schema.classify("Year"), ColumnClass::Base);
        assert_eq!(schema.classify("Riverside Mall"), ColumnClass::Restaurant);
        assert_eq!(schema.classify("Case kg"), ColumnClass::Ignored);
    }
}
