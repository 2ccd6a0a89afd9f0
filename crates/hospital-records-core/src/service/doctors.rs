//! Doctor service.

use tracing::info;

use super::{age_from_stored, insert_failure, Records};
use crate::ids::EntityKind;
use crate::models::{calculate_age, Confirmation, Doctor, DoctorInput, DoctorUpdate, Gender, DATE_FORMAT};
use crate::validation::check_range;
use crate::{RecordsError, RecordsResult};

const KIND: EntityKind = EntityKind::Doctor;

/// Upper bound of the years-of-experience input.
pub const MAX_YEARS_OF_EXPERIENCE: u32 = 100;

/// Doctor operations.
pub struct DoctorService<'a> {
    records: Records<'a>,
}

impl<'a> DoctorService<'a> {
    pub fn new(records: Records<'a>) -> Self {
        Self { records }
    }

    /// True iff a doctor with exactly this ID exists.
    pub fn verify(&self, id: &str) -> RecordsResult<bool> {
        self.records.verify(KIND, id)
    }

    /// Validate and persist a new doctor.
    ///
    /// A supplied department ID must verify; its name is copied into the
    /// record and never refreshed afterwards.
    pub fn add(&self, input: &DoctorInput) -> RecordsResult<Doctor> {
        let rules = self.records.rules();
        let name = rules.required("Full name", &input.name)?;
        let gender = match &input.gender {
            Gender::Other(text) => Gender::Other(rules.text(text)).stored().to_string(),
            other => other.stored().to_string(),
        };
        let contact_number_1 = rules.phone("contact number", &input.contact_number_1)?;
        let contact_number_2 =
            rules.optional_phone("alternate contact number", &input.contact_number_2)?;
        let email_id = rules.email("email", &input.email_id)?;
        let years_of_experience = check_range(
            "Years of experience",
            input.years_of_experience,
            0,
            MAX_YEARS_OF_EXPERIENCE,
        )?;

        let db = self.records.db();
        let tx = db.transaction()?;
        let department = self
            .records
            .resolve_reference(EntityKind::Department, &input.department_id)?;

        let doctor = Doctor {
            id: self.records.next_id(KIND),
            name,
            age: calculate_age(input.date_of_birth, self.records.today()),
            gender,
            date_of_birth: input.date_of_birth.format(DATE_FORMAT).to_string(),
            blood_group: rules.text(&input.blood_group),
            department_id: department.as_ref().map(|d| d.id.clone()),
            department_name: department.and_then(|d| d.name),
            contact_number_1,
            contact_number_2,
            aadhar_or_voter_id: rules.text(&input.aadhar_or_voter_id),
            email_id,
            qualification: rules.text(&input.qualification),
            specialisation: rules.text(&input.specialisation),
            years_of_experience,
            address: rules.text(&input.address),
            city: rules.text(&input.city),
            state: rules.text(&input.state),
            pin_code: rules.text(&input.pin_code),
        };

        db.insert_doctor(&doctor).map_err(insert_failure(KIND))?;
        tx.commit()?;
        info!(id = %doctor.id, department = ?doctor.department_id, "doctor added");
        Ok(doctor)
    }

    /// Overwrite the mutable fields of an existing doctor.
    ///
    /// Age is recomputed from the stored date of birth. A blank department
    /// ID clears the reference.
    pub fn update(&self, id: &str, update: &DoctorUpdate) -> RecordsResult<Doctor> {
        let rules = self.records.rules();
        let db = self.records.db();
        let tx = db.transaction()?;

        let id = self.records.require_existing(KIND, id)?;
        let mut doctor = db
            .get_doctor(&id)?
            .ok_or_else(|| RecordsError::NotFound { kind: KIND, id: id.clone() })?;

        let department = self
            .records
            .resolve_reference(EntityKind::Department, &update.department_id)?;

        doctor.age =
            age_from_stored(&doctor.date_of_birth, self.records.today()).unwrap_or(doctor.age);
        doctor.department_id = department.as_ref().map(|d| d.id.clone());
        doctor.department_name = department.and_then(|d| d.name);
        doctor.contact_number_1 = rules.phone("contact number", &update.contact_number_1)?;
        doctor.contact_number_2 =
            rules.optional_phone("alternate contact number", &update.contact_number_2)?;
        doctor.email_id = rules.email("email", &update.email_id)?;
        doctor.qualification = rules.text(&update.qualification);
        doctor.specialisation = rules.text(&update.specialisation);
        doctor.years_of_experience = check_range(
            "Years of experience",
            update.years_of_experience,
            0,
            MAX_YEARS_OF_EXPERIENCE,
        )?;
        doctor.address = rules.text(&update.address);
        doctor.city = rules.text(&update.city);
        doctor.state = rules.text(&update.state);
        doctor.pin_code = rules.text(&update.pin_code);

        db.update_doctor(&doctor)?;
        tx.commit()?;
        info!(id = %doctor.id, "doctor updated");
        Ok(doctor)
    }

    /// Delete a doctor once both confirmation steps are done.
    pub fn delete(&self, id: &str, confirmation: Confirmation) -> RecordsResult<bool> {
        let id = self.records.require_existing(KIND, id)?;
        if !confirmation.is_confirmed() {
            return Ok(false);
        }
        let deleted = self.records.db().delete_doctor(&id)?;
        info!(id = %id, "doctor deleted");
        Ok(deleted)
    }

    /// Search by exact ID.
    pub fn get(&self, id: &str) -> RecordsResult<Doctor> {
        let id = self.records.require_existing(KIND, id)?;
        self.records
            .db()
            .get_doctor(&id)?
            .ok_or(RecordsError::NotFound { kind: KIND, id })
    }

    /// All doctors.
    pub fn list(&self) -> RecordsResult<Vec<Doctor>> {
        Ok(self.records.db().list_doctors()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::ids::FixedClock;
    use crate::models::DepartmentInput;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        )
    }

    fn doctor_input(department_id: &str) -> DoctorInput {
        DoctorInput {
            name: "Asha Rao".into(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1984, 6, 2).unwrap(),
            blood_group: "O+".into(),
            department_id: department_id.into(),
            contact_number_1: "9876543210".into(),
            contact_number_2: "".into(),
            aadhar_or_voter_id: "XYZ123".into(),
            email_id: "asha@hospital.org".into(),
            qualification: "MBBS, MD".into(),
            specialisation: "Cardiology".into(),
            years_of_experience: 12,
            address: "12 Main St".into(),
            city: "Pune".into(),
            state: "MH".into(),
            pin_code: "411001".into(),
        }
    }

    #[test]
    fn test_add_snapshots_department_name() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let records = Records::new(&db, &clock);
        let department = records
            .departments()
            .add(&DepartmentInput {
                name: "Cardiology".into(),
                ..Default::default()
            })
            .unwrap();
        clock.advance(1);

        let doctor = records.doctors().add(&doctor_input(&department.id)).unwrap();
        assert_eq!(doctor.department_id, Some(department.id.clone()));
        assert_eq!(doctor.department_name, Some("Cardiology".into()));
        assert_eq!(doctor.age, 39);
        assert_eq!(doctor.date_of_birth, "02-06-1984");
    }

    #[test]
    fn test_add_unknown_department_writes_nothing() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let service = Records::new(&db, &clock).doctors();

        let err = service.add(&doctor_input("D-000000-000000")).unwrap_err();
        assert!(matches!(
            err,
            RecordsError::UnknownReference {
                kind: EntityKind::Department,
                ..
            }
        ));
        assert_eq!(db.count(KIND).unwrap(), 0);
    }

    #[test]
    fn test_add_without_department() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let service = Records::new(&db, &clock).doctors();

        let doctor = service.add(&doctor_input("  ")).unwrap();
        assert_eq!(doctor.department_id, None);
        assert_eq!(doctor.department_name, None);
    }

    #[test]
    fn test_add_other_gender_uses_mentioned_text() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let service = Records::new(&db, &clock).doctors();

        let mut input = doctor_input("");
        input.gender = Gender::Other("  Non-binary ".into());
        assert_eq!(service.add(&input).unwrap().gender, "Non-binary");
    }

    #[test]
    fn test_add_rejects_experience_out_of_range() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let service = Records::new(&db, &clock).doctors();

        let mut input = doctor_input("");
        input.years_of_experience = 101;
        assert!(matches!(
            service.add(&input).unwrap_err(),
            RecordsError::OutOfRange { .. }
        ));
    }

    #[test]
    fn test_update_recomputes_age_and_clears_department() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let records = Records::new(&db, &clock);
        let department = records
            .departments()
            .add(&DepartmentInput {
                name: "Cardiology".into(),
                ..Default::default()
            })
            .unwrap();
        let doctor = records.doctors().add(&doctor_input(&department.id)).unwrap();

        clock.set(
            NaiveDate::from_ymd_opt(2024, 6, 2)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        );
        let updated = records
            .doctors()
            .update(
                &doctor.id,
                &DoctorUpdate {
                    contact_number_1: "9876543210".into(),
                    years_of_experience: 13,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.age, 40);
        assert_eq!(updated.department_id, None);
        assert_eq!(updated.department_name, None);
        assert_eq!(updated.name, "Asha Rao");
    }

    #[test]
    fn test_update_with_unknown_department_keeps_row() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let service = Records::new(&db, &clock).doctors();
        let doctor = service.add(&doctor_input("")).unwrap();

        let err = service
            .update(
                &doctor.id,
                &DoctorUpdate {
                    department_id: "D-999999-999999".into(),
                    qualification: "PhD".into(),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, RecordsError::UnknownReference { .. }));
        assert_eq!(service.get(&doctor.id).unwrap().qualification, "MBBS, MD");
    }
}
