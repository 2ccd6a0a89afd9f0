//! Entity kinds and timestamp-derived identifiers.
//!
//! Every ID is `<prefix>-<SSMMHH>-<YYMMDD>`. Two records of the same kind
//! created within the same second receive the same ID; inserting the second
//! one fails with [`RecordsError::IdCollision`].

use std::cell::Cell;
use std::fmt;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{DATE_FORMAT, TIME_FORMAT};
use crate::{RecordsError, RecordsResult};

static GENERATED_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(D|DR|P|T|M)-\d{6}-\d{6}$").expect("valid generated id pattern")
});

/// The five record kinds, one table each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Department,
    Doctor,
    Patient,
    MedicalTest,
    Prescription,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Department,
        EntityKind::Doctor,
        EntityKind::Patient,
        EntityKind::MedicalTest,
        EntityKind::Prescription,
    ];

    /// ID prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Department => "D",
            EntityKind::Doctor => "DR",
            EntityKind::Patient => "P",
            EntityKind::MedicalTest => "T",
            EntityKind::Prescription => "M",
        }
    }

    /// Backing table.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Department => "department_record",
            EntityKind::Doctor => "doctor_record",
            EntityKind::Patient => "patient_record",
            EntityKind::MedicalTest => "medical_test_record",
            EntityKind::Prescription => "prescription_record",
        }
    }

    /// Column holding the display name snapshotted by dependent records.
    pub fn name_column(self) -> Option<&'static str> {
        match self {
            EntityKind::Department | EntityKind::Doctor | EntityKind::Patient => Some("name"),
            EntityKind::MedicalTest => Some("test_name"),
            EntityKind::Prescription => None,
        }
    }

    /// Human-readable name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Department => "Department",
            EntityKind::Doctor => "Doctor",
            EntityKind::Patient => "Patient",
            EntityKind::MedicalTest => "Medical Test",
            EntityKind::Prescription => "Prescription",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source of wall-clock time for ID generation and registration stamps.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at: Cell::new(at) }
    }

    pub fn set(&self, at: NaiveDateTime) {
        self.at.set(at);
    }

    pub fn advance(&self, seconds: i64) {
        self.at.set(self.at.get() + Duration::seconds(seconds));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at.get()
    }
}

/// Generate the ID for a record of `kind` created at `at`.
pub fn generate_id(kind: EntityKind, at: NaiveDateTime) -> String {
    format!(
        "{}-{}-{}",
        kind.prefix(),
        at.format("%S%M%H"),
        at.format("%y%m%d")
    )
}

/// Patient ID from registration strings (`DD-MM-YYYY`, `HH:MM:SS`).
pub fn patient_id_from_registration(date: &str, time: &str) -> RecordsResult<String> {
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
        RecordsError::InvalidFormat {
            field: "date of registration",
        }
    })?;
    let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).map_err(|_| {
        RecordsError::InvalidFormat {
            field: "time of registration",
        }
    })?;
    Ok(generate_id(EntityKind::Patient, date.and_time(time)))
}

/// True when `id` has the shape [`generate_id`] emits for `kind`.
pub fn is_generated_id(kind: EntityKind, id: &str) -> bool {
    GENERATED_ID_RE
        .captures(id)
        .map(|caps| &caps[1] == kind.prefix())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_generate_id_group_order() {
        let when = at(2024, 3, 9, 14, 5, 7);
        assert_eq!(generate_id(EntityKind::Department, when), "D-070514-240309");
        assert_eq!(generate_id(EntityKind::Doctor, when), "DR-070514-240309");
        assert_eq!(generate_id(EntityKind::MedicalTest, when), "T-070514-240309");
        assert_eq!(generate_id(EntityKind::Prescription, when), "M-070514-240309");
    }

    #[test]
    fn test_patient_id_matches_canonical_order() {
        let id = patient_id_from_registration("09-03-2024", "14:05:07").unwrap();
        assert_eq!(id, "P-070514-240309");
        assert_eq!(id, generate_id(EntityKind::Patient, at(2024, 3, 9, 14, 5, 7)));
    }

    #[test]
    fn test_patient_id_rejects_bad_registration() {
        assert!(matches!(
            patient_id_from_registration("2024-03-09", "14:05:07"),
            Err(RecordsError::InvalidFormat { .. })
        ));
        assert!(patient_id_from_registration("09-03-2024", "2pm").is_err());
    }

    #[test]
    fn test_same_second_collides() {
        let when = at(2024, 1, 1, 0, 0, 0);
        assert_eq!(
            generate_id(EntityKind::Patient, when),
            generate_id(EntityKind::Patient, when)
        );
    }

    #[test]
    fn test_is_generated_id_checks_prefix() {
        assert!(is_generated_id(EntityKind::Doctor, "DR-070514-240309"));
        assert!(!is_generated_id(EntityKind::Department, "DR-070514-240309"));
        assert!(!is_generated_id(EntityKind::Department, "D-12-240101"));
    }

    #[test]
    fn test_fixed_clock_advance() {
        let clock = FixedClock::new(at(2024, 12, 31, 23, 59, 59));
        clock.advance(1);
        assert_eq!(clock.now(), at(2025, 1, 1, 0, 0, 0));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_entity_kind_metadata() {
        assert_eq!(EntityKind::MedicalTest.to_string(), "Medical Test");
        assert_eq!(EntityKind::Prescription.name_column(), None);
        for kind in EntityKind::ALL {
            assert!(kind.table().ends_with("_record"));
        }
    }

    proptest! {
        #[test]
        fn prop_generated_ids_are_well_formed(
            secs in 0i64..4_102_444_800,
            kind_idx in 0usize..5,
        ) {
            let kind = EntityKind::ALL[kind_idx];
            let when = chrono::DateTime::from_timestamp(secs, 0).unwrap().naive_utc();
            let id = generate_id(kind, when);
            prop_assert!(is_generated_id(kind, &id), "{}", id);
        }
    }
}
