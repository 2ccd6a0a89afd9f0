//! Department database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{insert_error, write_error, Database, DbResult};
use crate::models::{Department, DoctorSummary};

const COLUMNS: &str =
    "id, name, description, contact_number_1, contact_number_2, address, email_id";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        contact_number_1: row.get(3)?,
        contact_number_2: row.get(4)?,
        address: row.get(5)?,
        email_id: row.get(6)?,
    })
}

impl Database {
    /// Insert a new department.
    pub fn insert_department(&self, department: &Department) -> DbResult<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO department_record (
                    id, name, description, contact_number_1, contact_number_2,
                    address, email_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    department.id,
                    department.name,
                    department.description,
                    department.contact_number_1,
                    department.contact_number_2,
                    department.address,
                    department.email_id,
                ],
            )
            .map_err(|e| insert_error(e, &department.id))?;
        Ok(())
    }

    /// Overwrite the mutable columns of a department. The name is left as is.
    pub fn update_department(&self, department: &Department) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute(
                r#"
                UPDATE department_record SET
                    description = ?2,
                    contact_number_1 = ?3,
                    contact_number_2 = ?4,
                    address = ?5,
                    email_id = ?6
                WHERE id = ?1
                "#,
                params![
                    department.id,
                    department.description,
                    department.contact_number_1,
                    department.contact_number_2,
                    department.address,
                    department.email_id,
                ],
            )
            .map_err(write_error)?;
        Ok(rows_affected > 0)
    }

    /// Get a department by ID.
    pub fn get_department(&self, id: &str) -> DbResult<Option<Department>> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM department_record WHERE id = ?"),
                [id],
                from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all departments.
    pub fn list_departments(&self) -> DbResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM department_record ORDER BY id"))?;
        let rows = stmt.query_map([], from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a department.
    pub fn delete_department(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM department_record WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Doctors whose stored department reference equals `department_id`.
    pub fn list_doctors_in_department(&self, department_id: &str) -> DbResult<Vec<DoctorSummary>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name
            FROM doctor_record
            WHERE department_id = ?
            ORDER BY name
            "#,
        )?;
        let rows = stmt.query_map([department_id], |row| {
            Ok(DoctorSummary {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn cardiology() -> Department {
        Department {
            id: "D-000000-240101".into(),
            name: "Cardiology".into(),
            description: "Heart and vessels".into(),
            contact_number_1: "1234567".into(),
            contact_number_2: None,
            address: "Block A".into(),
            email_id: Some("cardio@hospital.org".into()),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();
        db.insert_department(&cardiology()).unwrap();

        let retrieved = db.get_department("D-000000-240101").unwrap().unwrap();
        assert_eq!(retrieved, cardiology());
        assert_eq!(retrieved.contact_number_2, None);
    }

    #[test]
    fn test_update_keeps_name() {
        let db = setup_db();
        db.insert_department(&cardiology()).unwrap();

        let mut changed = cardiology();
        changed.name = "Renamed".into();
        changed.description = "Cardiac care".into();
        changed.contact_number_2 = Some("7654321".into());
        assert!(db.update_department(&changed).unwrap());

        let retrieved = db.get_department(&changed.id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Cardiology");
        assert_eq!(retrieved.description, "Cardiac care");
        assert_eq!(retrieved.contact_number_2, Some("7654321".into()));
    }

    #[test]
    fn test_delete() {
        let db = setup_db();
        db.insert_department(&cardiology()).unwrap();

        assert!(db.delete_department("D-000000-240101").unwrap());
        assert!(!db.delete_department("D-000000-240101").unwrap());
        assert!(db.list_departments().unwrap().is_empty());
    }

    #[test]
    fn test_list_doctors_in_department_empty() {
        let db = setup_db();
        db.insert_department(&cardiology()).unwrap();
        assert!(db
            .list_doctors_in_department("D-000000-240101")
            .unwrap()
            .is_empty());
    }
}
