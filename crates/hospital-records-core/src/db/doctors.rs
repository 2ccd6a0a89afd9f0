//! Doctor database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{insert_error, write_error, Database, DbResult};
use crate::models::Doctor;

const COLUMNS: &str = "id, name, age, gender, date_of_birth, blood_group, \
     department_id, department_name, contact_number_1, contact_number_2, \
     aadhar_or_voter_id, email_id, qualification, specialisation, \
     years_of_experience, address, city, state, pin_code";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: row.get(3)?,
        date_of_birth: row.get(4)?,
        blood_group: row.get(5)?,
        department_id: row.get(6)?,
        department_name: row.get(7)?,
        contact_number_1: row.get(8)?,
        contact_number_2: row.get(9)?,
        aadhar_or_voter_id: row.get(10)?,
        email_id: row.get(11)?,
        qualification: row.get(12)?,
        specialisation: row.get(13)?,
        years_of_experience: row.get(14)?,
        address: row.get(15)?,
        city: row.get(16)?,
        state: row.get(17)?,
        pin_code: row.get(18)?,
    })
}

impl Database {
    /// Insert a new doctor.
    pub fn insert_doctor(&self, doctor: &Doctor) -> DbResult<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO doctor_record (
                    id, name, age, gender, date_of_birth, blood_group,
                    department_id, department_name, contact_number_1,
                    contact_number_2, aadhar_or_voter_id, email_id,
                    qualification, specialisation, years_of_experience,
                    address, city, state, pin_code
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                          ?14, ?15, ?16, ?17, ?18, ?19)
                "#,
                params![
                    doctor.id,
                    doctor.name,
                    doctor.age,
                    doctor.gender,
                    doctor.date_of_birth,
                    doctor.blood_group,
                    doctor.department_id,
                    doctor.department_name,
                    doctor.contact_number_1,
                    doctor.contact_number_2,
                    doctor.aadhar_or_voter_id,
                    doctor.email_id,
                    doctor.qualification,
                    doctor.specialisation,
                    doctor.years_of_experience,
                    doctor.address,
                    doctor.city,
                    doctor.state,
                    doctor.pin_code,
                ],
            )
            .map_err(|e| insert_error(e, &doctor.id))?;
        Ok(())
    }

    /// Overwrite the mutable columns of a doctor.
    ///
    /// Name, gender, date of birth, blood group and identity document are
    /// fixed at creation.
    pub fn update_doctor(&self, doctor: &Doctor) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute(
                r#"
                UPDATE doctor_record SET
                    age = ?2,
                    department_id = ?3,
                    department_name = ?4,
                    contact_number_1 = ?5,
                    contact_number_2 = ?6,
                    email_id = ?7,
                    qualification = ?8,
                    specialisation = ?9,
                    years_of_experience = ?10,
                    address = ?11,
                    city = ?12,
                    state = ?13,
                    pin_code = ?14
                WHERE id = ?1
                "#,
                params![
                    doctor.id,
                    doctor.age,
                    doctor.department_id,
                    doctor.department_name,
                    doctor.contact_number_1,
                    doctor.contact_number_2,
                    doctor.email_id,
                    doctor.qualification,
                    doctor.specialisation,
                    doctor.years_of_experience,
                    doctor.address,
                    doctor.city,
                    doctor.state,
                    doctor.pin_code,
                ],
            )
            .map_err(write_error)?;
        Ok(rows_affected > 0)
    }

    /// Get a doctor by ID.
    pub fn get_doctor(&self, id: &str) -> DbResult<Option<Doctor>> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM doctor_record WHERE id = ?"),
                [id],
                from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all doctors.
    pub fn list_doctors(&self) -> DbResult<Vec<Doctor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM doctor_record ORDER BY id"))?;
        let rows = stmt.query_map([], from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a doctor.
    pub fn delete_doctor(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM doctor_record WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
