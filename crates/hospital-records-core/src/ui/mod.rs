//! Form and render interface consumed by the controllers.
//!
//! A [`Ui`] collects one scalar per labelled widget and renders messages and
//! tables. The terminal front end implements it over stdin/stdout; tests use
//! [`ScriptedUi`].

mod scripted;

pub use scripted::*;

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::Tabular;

/// Shown instead of an empty table.
pub const NO_DATA: &str = "No data to show";

/// Blocking form widgets and renderers.
pub trait Ui {
    /// Single-line text input.
    fn text(&mut self, label: &str) -> String;

    /// Multi-line text input.
    fn text_area(&mut self, label: &str) -> String;

    /// Radio group; returns the index of the selected option.
    fn choice(&mut self, label: &str, options: &[&str]) -> usize;

    fn date(&mut self, label: &str) -> NaiveDate;

    fn time(&mut self, label: &str) -> NaiveTime;

    /// Bounded integer input; implementations keep the value in `min..=max`.
    fn number(&mut self, label: &str, min: u32, max: u32) -> u32;

    fn checkbox(&mut self, label: &str) -> bool;

    /// True when the button was pressed.
    fn button(&mut self, label: &str) -> bool;

    /// Plain text output.
    fn write(&mut self, text: &str);

    fn success(&mut self, message: &str);

    fn info(&mut self, message: &str);

    fn warning(&mut self, message: &str);

    fn error(&mut self, message: &str);

    /// Draw a non-empty view.
    fn render(&mut self, view: &TableView);

    /// Show a view, or a warning when it has no rows.
    fn table(&mut self, view: &TableView) {
        if view.is_empty() {
            self.warning(NO_DATA);
        } else {
            self.render(view);
        }
    }
}

/// How a [`TableView`] is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Empty,
    /// One row, drawn as title/value pairs.
    Record,
    Table,
}

/// Rows of display strings under fixed column titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub titles: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Draw a single row as a table rather than a record.
    #[serde(default, skip_serializing)]
    pub always_table: bool,
}

impl TableView {
    /// View over a slice of records.
    pub fn of<T: Tabular>(records: &[T]) -> Self {
        Self {
            titles: T::TITLES.iter().map(|t| t.to_string()).collect(),
            rows: records.iter().map(Tabular::to_row).collect(),
            always_table: false,
        }
    }

    /// View over a single record.
    pub fn one<T: Tabular>(record: &T) -> Self {
        Self::of(std::slice::from_ref(record))
    }

    /// Keep the table layout for a single row.
    pub fn as_table(mut self) -> Self {
        self.always_table = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn layout(&self) -> Layout {
        match self.rows.len() {
            0 => Layout::Empty,
            1 if !self.always_table => Layout::Record,
            _ => Layout::Table,
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        self.titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(title.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.layout() {
            Layout::Empty => writeln!(f, "{NO_DATA}"),
            Layout::Record => {
                let width = self
                    .titles
                    .iter()
                    .map(|t| t.chars().count())
                    .max()
                    .unwrap_or(0);
                for (title, value) in self.titles.iter().zip(&self.rows[0]) {
                    writeln!(f, "{title:<width$}  {value}")?;
                }
                Ok(())
            }
            Layout::Table => {
                let widths = self.column_widths();
                let line = |cells: &[String]| {
                    cells
                        .iter()
                        .zip(&widths)
                        .map(|(cell, width)| format!("{cell:<width$}"))
                        .collect::<Vec<_>>()
                        .join(" | ")
                };
                writeln!(f, "{}", line(&self.titles).trim_end())?;
                let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
                writeln!(f, "{}", rule.join("-+-"))?;
                for row in &self.rows {
                    writeln!(f, "{}", line(row).trim_end())?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DoctorSummary;

    fn summaries(n: usize) -> Vec<DoctorSummary> {
        (0..n)
            .map(|i| DoctorSummary {
                id: format!("DR-00000{i}-240101"),
                name: format!("Doctor {i}"),
            })
            .collect()
    }

    #[test]
    fn test_layout_by_row_count() {
        assert_eq!(TableView::of(&summaries(0)).layout(), Layout::Empty);
        assert_eq!(TableView::of(&summaries(1)).layout(), Layout::Record);
        assert_eq!(TableView::of(&summaries(2)).layout(), Layout::Table);
        assert_eq!(TableView::of(&summaries(1)).as_table().layout(), Layout::Table);
    }

    #[test]
    fn test_record_display() {
        let view = TableView::of(&summaries(1));
        let text = view.to_string();
        assert_eq!(text, "Doctor ID  DR-000000-240101\nName       Doctor 0\n");
    }

    #[test]
    fn test_table_display_aligns_columns() {
        let view = TableView::of(&summaries(2));
        let lines: Vec<String> = view.to_string().lines().map(String::from).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Doctor ID        | Name");
        assert!(lines[1].starts_with("-----------------+-"));
        assert_eq!(lines[2], "DR-000000-240101 | Doctor 0");
    }

    #[test]
    fn test_empty_table_warns() {
        let mut ui = ScriptedUi::new();
        ui.table(&TableView::of(&summaries(0)));
        assert!(ui.has_message(Level::Warning, NO_DATA));
        assert!(ui.tables().is_empty());
    }
}
