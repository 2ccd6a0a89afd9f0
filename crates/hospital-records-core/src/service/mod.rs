//! Validated record operations.
//!
//! Pipeline for every write: sanitize → validate → verify references and
//! snapshot their names → generate ID → persist. Verification and the write
//! it guards share one transaction, so a failed step leaves nothing behind.

mod departments;
mod doctors;
mod patients;
mod prescriptions;

pub use departments::*;
pub use doctors::*;
pub use medical_tests::*;
pub use patients::*;
pub use prescriptions::*;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::db::{Database, DbError};
use crate::ids::{generate_id, Clock, EntityKind};
use crate::models::DATE_FORMAT;
use crate::validation::TextRules;
use crate::{RecordsError, RecordsResult};

/// A verified foreign reference and the name snapshotted with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub id: String,
    pub name: Option<String>,
}

/// Shared context for the per-entity services.
#[derive(Clone, Copy)]
pub struct Records<'a> {
    db: &'a Database,
    clock: &'a dyn Clock,
    rules: TextRules,
}

impl<'a> Records<'a> {
    /// Create a context over a database and clock.
    pub fn new(db: &'a Database, clock: &'a dyn Clock) -> Self {
        Self {
            db,
            clock,
            rules: TextRules::default(),
        }
    }

    /// Override the sanitization rules.
    pub fn with_rules(mut self, rules: TextRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn db(&self) -> &'a Database {
        self.db
    }

    pub fn clock(&self) -> &'a dyn Clock {
        self.clock
    }

    pub fn rules(&self) -> TextRules {
        self.rules
    }

    pub fn departments(&self) -> DepartmentService<'a> {
        DepartmentService::new(*self)
    }

    pub fn doctors(&self) -> DoctorService<'a> {
        DoctorService::new(*self)
    }

    pub fn patients(&self) -> PatientService<'a> {
        PatientService::new(*self)
    }

    pub fn medical_tests(&self) -> MedicalTestService<'a> {
        MedicalTestService::new(*self)
    }

    pub fn prescriptions(&self) -> PrescriptionService<'a> {
        PrescriptionService::new(*self)
    }

    /// Existence check on a user-supplied ID.
    pub fn verify(&self, kind: EntityKind, id: &str) -> RecordsResult<bool> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(false);
        }
        let found = self.db.exists(kind, id)?;
        debug!(%kind, id, found, "verified id");
        Ok(found)
    }

    /// Sanitized ID of an existing record, or `NotFound`.
    pub(crate) fn require_existing(&self, kind: EntityKind, id: &str) -> RecordsResult<String> {
        let id = self.rules.id(id);
        if self.verify(kind, &id)? {
            Ok(id)
        } else {
            warn!(%kind, id = %id, "target id did not verify");
            Err(RecordsError::NotFound { kind, id })
        }
    }

    /// Verify an optional foreign reference and snapshot its display name.
    ///
    /// Blank input is no reference. A non-blank ID that does not verify
    /// aborts the caller.
    pub fn resolve_reference(
        &self,
        kind: EntityKind,
        raw_id: &str,
    ) -> RecordsResult<Option<Reference>> {
        let Some(id) = self.rules.optional_id(raw_id) else {
            return Ok(None);
        };
        if !self.db.exists(kind, &id)? {
            warn!(%kind, id = %id, "reference did not verify");
            return Err(RecordsError::UnknownReference { kind, id });
        }
        let name = self.db.display_name(kind, &id)?;
        Ok(Some(Reference { id, name }))
    }

    /// Fresh ID for `kind` from the clock.
    pub(crate) fn next_id(&self, kind: EntityKind) -> String {
        generate_id(kind, self.clock.now())
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

/// Lift an insert failure, turning a primary-key clash into `IdCollision`.
pub(crate) fn insert_failure(kind: EntityKind) -> impl Fn(DbError) -> RecordsError {
    move |err| match err {
        DbError::DuplicateKey(id) => {
            warn!(%kind, id = %id, "generated id collided with an existing record");
            RecordsError::IdCollision { kind, id }
        }
        other => RecordsError::Database(other),
    }
}

/// Age from a stored `DD-MM-YYYY` date of birth.
pub(crate) fn age_from_stored(date_of_birth: &str, today: NaiveDate) -> Option<u32> {
    NaiveDate::parse_from_str(date_of_birth, DATE_FORMAT)
        .ok()
        .map(|dob| crate::models::calculate_age(dob, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(14, 5, 7)
                .unwrap(),
        )
    }

    #[test]
    fn test_verify_blank_is_false() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let records = Records::new(&db, &clock);
        assert!(!records.verify(EntityKind::Department, "   ").unwrap());
    }

    #[test]
    fn test_resolve_reference_blank_is_none() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let records = Records::new(&db, &clock);
        assert_eq!(
            records.resolve_reference(EntityKind::Patient, "  ").unwrap(),
            None
        );
    }

    #[test]
    fn test_resolve_reference_unknown() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let records = Records::new(&db, &clock);
        let err = records
            .resolve_reference(EntityKind::Doctor, " DR-000000-240101 ")
            .unwrap_err();
        assert!(matches!(
            err,
            RecordsError::UnknownReference { kind: EntityKind::Doctor, ref id } if id == "DR-000000-240101"
        ));
    }

    #[test]
    fn test_age_from_stored() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(age_from_stored("10-03-1990", today), Some(33));
        assert_eq!(age_from_stored("1990-03-10", today), None);
    }
}
