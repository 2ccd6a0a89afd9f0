//! JSON and CSV export of tabular views.

use serde::{Deserialize, Serialize};

use crate::ui::TableView;

/// A listing ready to be written out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableExport {
    /// What the rows are, e.g. "Doctor"
    pub record_type: String,
    /// Export timestamp (RFC 3339)
    pub exported_at: String,
    /// Column titles
    pub columns: Vec<String>,
    /// Display rows, one cell per column
    pub rows: Vec<Vec<String>>,
    /// Row count
    pub total: usize,
}

impl TableExport {
    /// Snapshot a view for export.
    pub fn from_view(record_type: &str, view: &TableView) -> Self {
        Self {
            record_type: record_type.to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            columns: view.titles.clone(),
            rows: view.rows.clone(),
            total: view.rows.len(),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format, titles first.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();
        push_line(&mut csv, &self.columns);
        for row in &self.rows {
            push_line(&mut csv, row);
        }
        csv
    }
}

fn push_line(csv: &mut String, cells: &[String]) {
    let line = cells
        .iter()
        .map(|cell| escape_csv(cell))
        .collect::<Vec<_>>()
        .join(",");
    csv.push_str(&line);
    csv.push('\n');
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
