//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{insert_error, write_error, Database, DbResult};
use crate::models::Patient;

const COLUMNS: &str = "id, name, age, gender, date_of_birth, blood_group, \
     contact_number_1, contact_number_2, aadhar_or_voter_id, weight, height, \
     address, city, state, pin_code, next_of_kin_name, \
     next_of_kin_relation_to_patient, next_of_kin_contact_number, email_id, \
     date_of_registration, time_of_registration";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: row.get(3)?,
        date_of_birth: row.get(4)?,
        blood_group: row.get(5)?,
        contact_number_1: row.get(6)?,
        contact_number_2: row.get(7)?,
        aadhar_or_voter_id: row.get(8)?,
        weight: row.get(9)?,
        height: row.get(10)?,
        address: row.get(11)?,
        city: row.get(12)?,
        state: row.get(13)?,
        pin_code: row.get(14)?,
        next_of_kin_name: row.get(15)?,
        next_of_kin_relation_to_patient: row.get(16)?,
        next_of_kin_contact_number: row.get(17)?,
        email_id: row.get(18)?,
        date_of_registration: row.get(19)?,
        time_of_registration: row.get(20)?,
    })
}

impl Database {
    /// Insert a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO patient_record (
                    id, name, age, gender, date_of_birth, blood_group,
                    contact_number_1, contact_number_2, aadhar_or_voter_id,
                    weight, height, address, city, state, pin_code,
                    next_of_kin_name, next_of_kin_relation_to_patient,
                    next_of_kin_contact_number, email_id,
                    date_of_registration, time_of_registration
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                          ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)
                "#,
                params![
                    patient.id,
                    patient.name,
                    patient.age,
                    patient.gender,
                    patient.date_of_birth,
                    patient.blood_group,
                    patient.contact_number_1,
                    patient.contact_number_2,
                    patient.aadhar_or_voter_id,
                    patient.weight,
                    patient.height,
                    patient.address,
                    patient.city,
                    patient.state,
                    patient.pin_code,
                    patient.next_of_kin_name,
                    patient.next_of_kin_relation_to_patient,
                    patient.next_of_kin_contact_number,
                    patient.email_id,
                    patient.date_of_registration,
                    patient.time_of_registration,
                ],
            )
            .map_err(|e| insert_error(e, &patient.id))?;
        Ok(())
    }

    /// Overwrite the mutable columns of a patient.
    ///
    /// Identity fields (name, gender, date of birth, blood group, identity
    /// document, registration stamp) are fixed at registration.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute(
                r#"
                UPDATE patient_record SET
                    age = ?2,
                    contact_number_1 = ?3,
                    contact_number_2 = ?4,
                    weight = ?5,
                    height = ?6,
                    address = ?7,
                    city = ?8,
                    state = ?9,
                    pin_code = ?10,
                    next_of_kin_name = ?11,
                    next_of_kin_relation_to_patient = ?12,
                    next_of_kin_contact_number = ?13,
                    email_id = ?14
                WHERE id = ?1
                "#,
                params![
                    patient.id,
                    patient.age,
                    patient.contact_number_1,
                    patient.contact_number_2,
                    patient.weight,
                    patient.height,
                    patient.address,
                    patient.city,
                    patient.state,
                    patient.pin_code,
                    patient.next_of_kin_name,
                    patient.next_of_kin_relation_to_patient,
                    patient.next_of_kin_contact_number,
                    patient.email_id,
                ],
            )
            .map_err(write_error)?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM patient_record WHERE id = ?"),
                [id],
                from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all patients.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM patient_record ORDER BY id"))?;
        let rows = stmt.query_map([], from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a patient.
    pub fn delete_patient(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patient_record WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
