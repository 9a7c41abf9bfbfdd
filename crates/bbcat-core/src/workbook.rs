//! Shape of the fitment-rules workbook as exported from the master
//! spreadsheet.
//!
//! Each sheet groups one bottle type. Row 0 is the sheet title, row 1 names
//! the component columns, and every later row is one bottle variant with an
//! `"X"` under each column that fits. Merged and repeated cells are already
//! expanded by the exporter; every cell is plain text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesWorkbook {
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// The column header row, if the sheet has one.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.rows.get(1).map(Vec::as_slice)
    }

    /// Rows after the title and header.
    #[must_use]
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(2..).unwrap_or_default()
    }
}
