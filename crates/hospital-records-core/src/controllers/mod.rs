//! Form-driven record flows.
//!
//! Each controller composes a [`Ui`] with a record service. Every operation
//! reports its own failures to the `Ui` and returns an [`Outcome`]; nothing
//! here panics or propagates an error further.

mod departments;
mod doctors;
mod medical_tests;
mod patients;
mod prescriptions;

pub use departments::*;
pub use doctors::*;
pub use medical_tests::*;
pub use patients::*;
pub use prescriptions::*;

use tracing::warn;

use crate::ids::EntityKind;
use crate::models::{Confirmation, Gender, Tabular};
use crate::service::Records;
use crate::ui::{TableView, Ui};
use crate::{RecordsError, RecordsResult};

/// Shown when a target or reference ID exists.
pub const VERIFIED: &str = "Verified";

/// Result of one controller operation.
#[derive(Debug)]
pub enum Outcome<T> {
    Completed(T),
    /// Nothing was done yet: blank target ID, button not pressed, or deletion
    /// not confirmed.
    Pending,
    /// Already reported to the `Ui`.
    Failed(RecordsError),
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RecordsError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Completed(value) => Outcome::Completed(f(value)),
            Outcome::Pending => Outcome::Pending,
            Outcome::Failed(err) => Outcome::Failed(err),
        }
    }
}

/// Wording shared by one entity's forms.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Entity {
    pub kind: EntityKind,
    /// Lower-case noun used inside sentences.
    pub noun: &'static str,
}

impl Entity {
    pub const fn new(kind: EntityKind, noun: &'static str) -> Self {
        Self { kind, noun }
    }

    /// Target ID prompt, e.g. "Enter Doctor ID of the doctor to be updated".
    pub fn prompt(&self, verb: &str) -> String {
        format!("Enter {} ID of the {} to be {verb}", self.kind, self.noun)
    }

    /// Success line, e.g. "Doctor details saved successfully.".
    pub fn done(&self, verb: &str) -> String {
        format!("{} details {verb} successfully.", capitalize(self.noun))
    }

    /// Prefix for persistence failures, e.g. "saving doctor details".
    pub fn context(&self, verb: &str) -> String {
        format!("{verb} {} details", self.noun)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Report `err` and turn it into a failed outcome.
///
/// Validation and verification failures are shown as-is; persistence
/// failures are prefixed with what was being attempted.
pub(crate) fn fail<T>(ui: &mut dyn Ui, context: &str, err: RecordsError) -> Outcome<T> {
    match &err {
        RecordsError::Database(_) | RecordsError::IdCollision { .. } => {
            ui.error(&format!("Error {context}: {err}"))
        }
        _ => ui.error(&err.to_string()),
    }
    Outcome::Failed(err)
}

/// Lift a service result into an outcome, reporting any failure.
pub(crate) fn settle<T>(ui: &mut dyn Ui, context: &str, result: RecordsResult<T>) -> Outcome<T> {
    match result {
        Ok(value) => Outcome::Completed(value),
        Err(err) => fail(ui, context, err),
    }
}

/// Ask for a target ID and verify it.
///
/// `Err` carries the outcome to return: pending on blank input, failed when
/// the ID does not verify.
pub(crate) fn verified_target<T>(
    ui: &mut dyn Ui,
    records: Records<'_>,
    kind: EntityKind,
    prompt: &str,
) -> Result<String, Outcome<T>> {
    let id = records.rules().id(&ui.text(prompt));
    if id.is_empty() {
        return Err(Outcome::Pending);
    }
    match records.verify(kind, &id) {
        Ok(true) => {
            ui.success(VERIFIED);
            Ok(id)
        }
        Ok(false) => {
            warn!(%kind, id = %id, "target id did not verify");
            Err(fail(ui, "verifying ID", RecordsError::NotFound { kind, id }))
        }
        Err(err) => Err(fail(ui, "verifying ID", err)),
    }
}

/// Ask for an optional foreign ID and verify it when given.
///
/// Returns the raw input for the service to resolve again inside its write
/// transaction.
pub(crate) fn reference_field<T>(
    ui: &mut dyn Ui,
    records: Records<'_>,
    kind: EntityKind,
    label: &str,
) -> Result<String, Outcome<T>> {
    let raw = ui.text(label);
    match records.resolve_reference(kind, &raw) {
        Ok(Some(reference)) => {
            ui.success(VERIFIED);
            Ok(reference.id)
        }
        Ok(None) => Ok(String::new()),
        Err(err) => Err(fail(ui, "verifying ID", err)),
    }
}

/// Gender radio with a free-text "Other".
pub(crate) fn gender_field(ui: &mut dyn Ui) -> Gender {
    match ui.choice("Gender", &Gender::OPTIONS) {
        0 => Gender::Female,
        1 => Gender::Male,
        _ => Gender::Other(ui.text("Please mention")),
    }
}

/// Verify a target, fetch it and show its current state under `heading`.
pub(crate) fn show_target<T: Tabular, U>(
    ui: &mut dyn Ui,
    records: Records<'_>,
    entity: Entity,
    verb: &str,
    heading: &str,
    get: impl FnOnce(&str) -> RecordsResult<T>,
) -> Result<(String, T), Outcome<U>> {
    let id = verified_target(ui, records, entity.kind, &entity.prompt(verb))?;
    match get(&id) {
        Ok(record) => {
            ui.write(heading);
            ui.table(&TableView::one(&record));
            Ok((id, record))
        }
        Err(err) => Err(fail(ui, &entity.context("fetching"), err)),
    }
}

/// Show-all: every record as one view.
pub(crate) fn show_all<T: Tabular>(
    ui: &mut dyn Ui,
    entity: Entity,
    rows: RecordsResult<Vec<T>>,
) -> Outcome<usize> {
    match rows {
        Ok(rows) => {
            ui.table(&TableView::of(&rows));
            Outcome::Completed(rows.len())
        }
        Err(err) => fail(ui, &entity.context("fetching"), err),
    }
}

/// Search: verify the ID, then show the record.
pub(crate) fn search<T: Tabular>(
    ui: &mut dyn Ui,
    records: Records<'_>,
    entity: Entity,
    get: impl FnOnce(&str) -> RecordsResult<T>,
) -> Outcome<T> {
    let heading = format!("Here are the details of the {} you searched for:", entity.noun);
    match show_target(ui, records, entity, "searched", &heading, get) {
        Ok((_, record)) => Outcome::Completed(record),
        Err(outcome) => outcome,
    }
}

/// Delete: verify, show, then require the checkbox and the button.
pub(crate) fn delete<T: Tabular>(
    ui: &mut dyn Ui,
    records: Records<'_>,
    entity: Entity,
    get: impl FnOnce(&str) -> RecordsResult<T>,
    remove: impl FnOnce(&str, Confirmation) -> RecordsResult<bool>,
) -> Outcome<String> {
    let heading = format!("Here are the details of the {} to be deleted:", entity.noun);
    let id = match show_target(ui, records, entity, "deleted", &heading, get) {
        Ok((id, _)) => id,
        Err(outcome) => return outcome,
    };

    let acknowledged = ui.checkbox("Check this box to confirm deletion");
    let committed = acknowledged && ui.button("Delete");
    match remove(&id, Confirmation::new(acknowledged, committed)) {
        Ok(true) => {
            ui.success(&entity.done("deleted"));
            Outcome::Completed(id)
        }
        Ok(false) => Outcome::Pending,
        Err(err) => fail(ui, &entity.context("deleting"), err),
    }
}
