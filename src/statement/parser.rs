use super::rules::normalize_label;
use crate::error::InputError;
use crate::numeric::{Cell, Parsed};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One physical table row as handed over by the document extractor.
///
/// Row order carries no meaning. Every field may be absent; rows without a
/// label or value are skipped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawRow {
    #[serde(default, alias = "account")]
    pub label: Option<String>,
    #[serde(default)]
    pub code: Option<Cell>,
    #[serde(default)]
    pub value: Option<Cell>,
}

impl RawRow {
    pub fn new(label: &str, code: Option<&str>, value: impl Into<Cell>) -> Self {
        Self {
            label: Some(label.to_string()),
            code: code.map(Cell::from),
            value: Some(value.into()),
        }
    }

    fn code_text(&self) -> Option<String> {
        let code = match self.code.as_ref()? {
            Cell::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Text(text) => text.trim().to_string(),
        };
        (!code.is_empty()).then_some(code)
    }
}

/// A canonical line item produced from one row.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FinancialLineItem {
    /// Normalized label (uppercase, code prefix stripped).
    pub label: String,
    pub code: Option<String>,
    pub value: f64,
}

/// Turn raw rows into line items.
///
/// Rows with no label, no value, or a recognised missing marker are dropped.
/// A value cell that holds text which is not a number is a structural error
/// and aborts the parse.
pub fn parse_rows(rows: &[RawRow]) -> Result<Vec<FinancialLineItem>, InputError> {
    let mut items = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        let label = match row.label.as_deref().map(normalize_label) {
            Some(label) if !label.is_empty() => label,
            _ => {
                tracing::debug!(row = row_number, "skipping row without label");
                continue;
            }
        };

        let Some(cell) = row.value.as_ref() else {
            tracing::debug!(row = row_number, %label, "skipping row without value");
            continue;
        };

        let value = match cell.parse() {
            Parsed::Missing => {
                tracing::debug!(row = row_number, %label, "skipping row with missing marker");
                continue;
            }
            Parsed::Invalid => {
                return Err(InputError::NonNumericValue {
                    row: row_number,
                    label,
                    value: cell.raw(),
                })
            }
            Parsed::Number(n) if !n.is_finite() => {
                return Err(InputError::NonFiniteValue {
                    row: row_number,
                    label,
                })
            }
            Parsed::Number(n) => n,
        };

        items.push(FinancialLineItem {
            label,
            code: row.code_text(),
            value,
        });
    }

    Ok(items)
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default, alias = "account")]
    label: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

/// Read rows from CSV with `label` (or `account`), `code` and `value`
/// columns. Extra columns are ignored.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<CsvRow>() {
        let row = record?;
        rows.push(RawRow {
            label: row.label,
            code: row.code.map(Cell::Text),
            value: row.value.map(Cell::Text),
        });
    }

    Ok(rows)
}
