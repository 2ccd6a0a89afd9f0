//! Prescription database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{insert_error, write_error, Database, DbResult};
use crate::models::Prescription;

const COLUMNS: &str = "id, patient_id, patient_name, doctor_id, doctor_name, \
     diagnosis, comments, medicine_1_name, medicine_1_dosage_description, \
     medicine_2_name, medicine_2_dosage_description, medicine_3_name, \
     medicine_3_dosage_description";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Prescription> {
    Ok(Prescription {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        patient_name: row.get(2)?,
        doctor_id: row.get(3)?,
        doctor_name: row.get(4)?,
        diagnosis: row.get(5)?,
        comments: row.get(6)?,
        medicine_1_name: row.get(7)?,
        medicine_1_dosage_description: row.get(8)?,
        medicine_2_name: row.get(9)?,
        medicine_2_dosage_description: row.get(10)?,
        medicine_3_name: row.get(11)?,
        medicine_3_dosage_description: row.get(12)?,
    })
}

impl Database {
    /// Insert a new prescription.
    pub fn insert_prescription(&self, prescription: &Prescription) -> DbResult<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO prescription_record (
                    id, patient_id, patient_name, doctor_id, doctor_name,
                    diagnosis, comments, medicine_1_name, medicine_1_dosage_description,
                    medicine_2_name, medicine_2_dosage_description, medicine_3_name,
                    medicine_3_dosage_description
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                "#,
                params![
                    prescription.id,
                    prescription.patient_id,
                    prescription.patient_name,
                    prescription.doctor_id,
                    prescription.doctor_name,
                    prescription.diagnosis,
                    prescription.comments,
                    prescription.medicine_1_name,
                    prescription.medicine_1_dosage_description,
                    prescription.medicine_2_name,
                    prescription.medicine_2_dosage_description,
                    prescription.medicine_3_name,
                    prescription.medicine_3_dosage_description,
                ],
            )
            .map_err(|e| insert_error(e, &prescription.id))?;
        Ok(())
    }

    /// Overwrite the body of a prescription. Patient and doctor stay fixed.
    pub fn update_prescription(&self, prescription: &Prescription) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute(
                r#"
                UPDATE prescription_record SET
                    diagnosis = ?2,
                    comments = ?3,
                    medicine_1_name = ?4,
                    medicine_1_dosage_description = ?5,
                    medicine_2_name = ?6,
                    medicine_2_dosage_description = ?7,
                    medicine_3_name = ?8,
                    medicine_3_dosage_description = ?9
                WHERE id = ?1
                "#,
                params![
                    prescription.id,
                    prescription.diagnosis,
                    prescription.comments,
                    prescription.medicine_1_name,
                    prescription.medicine_1_dosage_description,
                    prescription.medicine_2_name,
                    prescription.medicine_2_dosage_description,
                    prescription.medicine_3_name,
                    prescription.medicine_3_dosage_description,
                ],
            )
            .map_err(write_error)?;
        Ok(rows_affected > 0)
    }

    /// Get a prescription by ID.
    pub fn get_prescription(&self, id: &str) -> DbResult<Option<Prescription>> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM prescription_record WHERE id = ?"),
                [id],
                from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all prescriptions.
    pub fn list_prescriptions(&self) -> DbResult<Vec<Prescription>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM prescription_record ORDER BY id"))?;
        let rows = stmt.query_map([], from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List prescriptions written for a patient.
    pub fn list_prescriptions_for_patient(&self, patient_id: &str) -> DbResult<Vec<Prescription>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM prescription_record WHERE patient_id = ? ORDER BY id"
        ))?;
        let rows = stmt.query_map([patient_id], from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a prescription.
    pub fn delete_prescription(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM prescription_record WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
