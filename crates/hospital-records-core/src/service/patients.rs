//! Patient service.

use tracing::info;

use super::{age_from_stored, insert_failure, Records};
use crate::ids::{patient_id_from_registration, EntityKind};
use crate::models::{
    calculate_age, Confirmation, Gender, Patient, PatientInput, PatientUpdate, DATE_FORMAT,
    TIME_FORMAT,
};
use crate::validation::check_range;
use crate::{RecordsError, RecordsResult};

const KIND: EntityKind = EntityKind::Patient;

/// Upper bound of the weight input, in kg.
pub const MAX_WEIGHT_KG: u32 = 400;
/// Upper bound of the height input, in cm.
pub const MAX_HEIGHT_CM: u32 = 275;

/// Patient operations.
pub struct PatientService<'a> {
    records: Records<'a>,
}

impl<'a> PatientService<'a> {
    pub fn new(records: Records<'a>) -> Self {
        Self { records }
    }

    /// True iff a patient with exactly this ID exists.
    pub fn verify(&self, id: &str) -> RecordsResult<bool> {
        self.records.verify(KIND, id)
    }

    /// Register a new patient.
    ///
    /// The registration date and time are stamped from the clock and the ID
    /// is derived from that stamp.
    pub fn add(&self, input: &PatientInput) -> RecordsResult<Patient> {
        let rules = self.records.rules();
        let name = rules.required("Full name", &input.name)?;
        let gender = match &input.gender {
            Gender::Other(text) => Gender::Other(rules.text(text)).stored().to_string(),
            other => other.stored().to_string(),
        };

        let registered_at = self.records.clock().now();
        let date_of_registration = registered_at.format(DATE_FORMAT).to_string();
        let time_of_registration = registered_at.format(TIME_FORMAT).to_string();
        let id = patient_id_from_registration(&date_of_registration, &time_of_registration)?;

        let patient = Patient {
            id,
            name,
            age: calculate_age(input.date_of_birth, registered_at.date()),
            gender,
            date_of_birth: input.date_of_birth.format(DATE_FORMAT).to_string(),
            blood_group: rules.text(&input.blood_group),
            contact_number_1: rules.phone("contact number", &input.contact_number_1)?,
            contact_number_2: rules
                .optional_phone("alternate contact number", &input.contact_number_2)?,
            aadhar_or_voter_id: rules.text(&input.aadhar_or_voter_id),
            weight: check_range("Weight (in kg)", input.weight, 0, MAX_WEIGHT_KG)?,
            height: check_range("Height (in cm)", input.height, 0, MAX_HEIGHT_CM)?,
            address: rules.text(&input.address),
            city: rules.text(&input.city),
            state: rules.text(&input.state),
            pin_code: rules.text(&input.pin_code),
            next_of_kin_name: rules.text(&input.next_of_kin_name),
            next_of_kin_relation_to_patient: rules.text(&input.next_of_kin_relation_to_patient),
            next_of_kin_contact_number: rules
                .phone("next of kin's contact number", &input.next_of_kin_contact_number)?,
            email_id: rules.email("email", &input.email_id)?,
            date_of_registration,
            time_of_registration,
        };

        self.records
            .db()
            .insert_patient(&patient)
            .map_err(insert_failure(KIND))?;
        info!(id = %patient.id, "patient registered");
        Ok(patient)
    }

    /// Overwrite the mutable fields of an existing patient.
    ///
    /// Date of birth is fixed; age is recomputed from it.
    pub fn update(&self, id: &str, update: &PatientUpdate) -> RecordsResult<Patient> {
        let rules = self.records.rules();
        let db = self.records.db();
        let tx = db.transaction()?;

        let id = self.records.require_existing(KIND, id)?;
        let mut patient = db
            .get_patient(&id)?
            .ok_or_else(|| RecordsError::NotFound { kind: KIND, id: id.clone() })?;

        patient.age =
            age_from_stored(&patient.date_of_birth, self.records.today()).unwrap_or(patient.age);
        patient.contact_number_1 = rules.phone("contact number", &update.contact_number_1)?;
        patient.contact_number_2 =
            rules.optional_phone("alternate contact number", &update.contact_number_2)?;
        patient.weight = check_range("Weight (in kg)", update.weight, 0, MAX_WEIGHT_KG)?;
        patient.height = check_range("Height (in cm)", update.height, 0, MAX_HEIGHT_CM)?;
        patient.address = rules.text(&update.address);
        patient.city = rules.text(&update.city);
        patient.state = rules.text(&update.state);
        patient.pin_code = rules.text(&update.pin_code);
        patient.next_of_kin_name = rules.text(&update.next_of_kin_name);
        patient.next_of_kin_relation_to_patient =
            rules.text(&update.next_of_kin_relation_to_patient);
        patient.next_of_kin_contact_number = rules.phone(
            "next of kin's contact number",
            &update.next_of_kin_contact_number,
        )?;
        patient.email_id = rules.email("email", &update.email_id)?;

        db.update_patient(&patient)?;
        tx.commit()?;
        info!(id = %patient.id, "patient updated");
        Ok(patient)
    }

    /// Delete a patient once both confirmation steps are done.
    pub fn delete(&self, id: &str, confirmation: Confirmation) -> RecordsResult<bool> {
        let id = self.records.require_existing(KIND, id)?;
        if !confirmation.is_confirmed() {
            return Ok(false);
        }
        let deleted = self.records.db().delete_patient(&id)?;
        info!(id = %id, "patient deleted");
        Ok(deleted)
    }

    /// Search by exact ID.
    pub fn get(&self, id: &str) -> RecordsResult<Patient> {
        let id = self.records.require_existing(KIND, id)?;
        self.records
            .db()
            .get_patient(&id)?
            .ok_or(RecordsError::NotFound { kind: KIND, id })
    }

    /// All patients.
    pub fn list(&self) -> RecordsResult<Vec<Patient>> {
        Ok(self.records.db().list_patients()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::ids::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(14, 5, 7)
                .unwrap(),
        )
    }

    fn input() -> PatientInput {
        PatientInput {
            name: "Ravi Kumar".into(),
            gender: Gender::Male,
            date_of_birth: NaiveDate::from_ymd_opt(1993, 6, 15).unwrap(),
            blood_group: "B+".into(),
            contact_number_1: "9123456789".into(),
            contact_number_2: "".into(),
            aadhar_or_voter_id: "AAD-1".into(),
            weight: 70,
            height: 175,
            address: "4 Lake Rd".into(),
            city: "Chennai".into(),
            state: "TN".into(),
            pin_code: "600001".into(),
            next_of_kin_name: "Meena".into(),
            next_of_kin_relation_to_patient: "Sister".into(),
            next_of_kin_contact_number: "9000000000".into(),
            email_id: "".into(),
        }
    }

    #[test]
    fn test_add_stamps_registration() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let service = Records::new(&db, &clock).patients();

        let patient = service.add(&input()).unwrap();
        assert_eq!(patient.id, "P-070514-240309");
        assert_eq!(patient.date_of_registration, "09-03-2024");
        assert_eq!(patient.time_of_registration, "14:05:07");
        assert_eq!(patient.age, 30);
        assert_eq!(patient.email_id, None);
        assert_eq!(patient.contact_number_2, None);
    }

    #[test]
    fn test_add_rejects_bad_kin_phone() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let service = Records::new(&db, &clock).patients();

        let mut bad = input();
        bad.next_of_kin_contact_number = "12".into();
        assert!(matches!(
            service.add(&bad).unwrap_err(),
            RecordsError::InvalidFormat { .. }
        ));
        assert_eq!(db.count(KIND).unwrap(), 0);
    }

    #[test]
    fn test_add_rejects_weight_out_of_range() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let service = Records::new(&db, &clock).patients();

        let mut heavy = input();
        heavy.weight = MAX_WEIGHT_KG + 1;
        assert!(service.add(&heavy).unwrap_err().is_validation());
    }

    #[test]
    fn test_update_keeps_date_of_birth() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let service = Records::new(&db, &clock).patients();
        let patient = service.add(&input()).unwrap();

        clock.set(
            NaiveDate::from_ymd_opt(2024, 6, 15)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );
        let updated = service
            .update(
                &patient.id,
                &PatientUpdate {
                    contact_number_1: "9123456789".into(),
                    contact_number_2: "9988776655".into(),
                    weight: 72,
                    height: 175,
                    email_id: "ravi@example.com".into(),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.date_of_birth, "15-06-1993");
        assert_eq!(updated.age, 31);
        assert_eq!(updated.weight, 72);
        assert_eq!(updated.contact_number_2, Some("9988776655".into()));
        assert_eq!(service.get(&patient.id).unwrap(), updated);
    }

    #[test]
    fn test_search_unknown() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let service = Records::new(&db, &clock).patients();
        assert!(matches!(
            service.get("P-070514-240309").unwrap_err(),
            RecordsError::NotFound { kind: KIND, .. }
        ));
    }
}
