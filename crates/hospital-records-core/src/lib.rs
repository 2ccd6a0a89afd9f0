//! Hospital Records Core Library
//!
//! Department, doctor, patient, medical test and prescription records kept in
//! SQLite, with the validation and identity layer every record type shares.
//!
//! # Architecture
//!
//! ```text
//!   Ui (form widgets) ──► Controller ──► Service ──► Database (SQLite)
//!                                          │
//!                     ┌────────────────────┼─────────────────────┐
//!                     ▼                    ▼                     ▼
//!                sanitize/validate   verify references     generate ID
//!                  (validation)      + snapshot names         (ids)
//! ```
//!
//! # Core Principle
//!
//! **A foreign reference is written only after it verifies.** The schema has
//! no `REFERENCES` clauses; services check every referenced ID inside the
//! same transaction as the dependent write.
//!
//! # Modules
//!
//! - [`validation`]: text sanitizer and email/phone/ID-shape validators
//! - [`ids`]: entity kinds, clocks and timestamp-derived identifiers
//! - [`models`]: record types plus their raw Add/Update inputs
//! - [`db`]: SQLite database layer
//! - [`service`]: validated record operations
//! - [`ui`]: form/render interface consumed by controllers
//! - [`controllers`]: form-driven Add/Update/Delete/Show/Search flows
//! - [`export`]: JSON and CSV export of tabular views
//! - [`config`]: layered settings

pub mod config;
pub mod controllers;
pub mod db;
pub mod export;
pub mod ids;
pub mod models;
pub mod service;
pub mod ui;
pub mod validation;

// Re-export commonly used types
pub use config::Settings;
pub use controllers::{
    DepartmentController, DoctorController, MedicalTestController, Outcome,
    PatientController, PrescriptionController,
};
pub use db::Database;
pub use ids::{Clock, EntityKind, FixedClock, SystemClock};
pub use models::{
    Confirmation, Department, Doctor, Gender, MedicalTest, Patient, Prescription,
};
pub use service::Records;
pub use ui::{ScriptedUi, TableView, Ui};

use thiserror::Error;

/// Errors reported by record operations.
///
/// Every variant is recoverable: controllers report it and return to idle.
#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("Invalid {kind} ID")]
    NotFound { kind: EntityKind, id: String },

    #[error("Invalid {kind} ID")]
    UnknownReference { kind: EntityKind, id: String },

    #[error("Invalid {field} format.")]
    InvalidFormat { field: &'static str },

    #[error("{0} is required.")]
    MissingField(&'static str),

    #[error("{field} must be between {min} and {max}.")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{kind} ID {id} is already taken; wait a second and save again")]
    IdCollision { kind: EntityKind, id: String },
}

impl RecordsError {
    /// True for failures detected before anything touched the database.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RecordsError::InvalidFormat { .. }
                | RecordsError::MissingField(_)
                | RecordsError::OutOfRange { .. }
        )
    }
}

impl From<rusqlite::Error> for RecordsError {
    fn from(e: rusqlite::Error) -> Self {
        RecordsError::Database(db::DbError::Sqlite(e))
    }
}

pub type RecordsResult<T> = Result<T, RecordsError>;
