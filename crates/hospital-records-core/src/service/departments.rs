//! Department service.

use tracing::info;

use super::{insert_failure, Records};
use crate::ids::EntityKind;
use crate::models::{Confirmation, Department, DepartmentInput, DepartmentUpdate, DoctorSummary};
use crate::{RecordsError, RecordsResult};

const KIND: EntityKind = EntityKind::Department;

/// Department operations.
pub struct DepartmentService<'a> {
    records: Records<'a>,
}

impl<'a> DepartmentService<'a> {
    pub fn new(records: Records<'a>) -> Self {
        Self { records }
    }

    /// True iff a department with exactly this ID exists.
    pub fn verify(&self, id: &str) -> RecordsResult<bool> {
        self.records.verify(KIND, id)
    }

    /// Validate and persist a new department.
    pub fn add(&self, input: &DepartmentInput) -> RecordsResult<Department> {
        let rules = self.records.rules();
        let department = Department {
            id: self.records.next_id(KIND),
            name: rules.required("Department name", &input.name)?,
            description: rules.text(&input.description),
            contact_number_1: rules.phone("contact number", &input.contact_number_1)?,
            contact_number_2: rules
                .optional_phone("alternate contact number", &input.contact_number_2)?,
            address: rules.text(&input.address),
            email_id: rules.email("email", &input.email_id)?,
        };

        self.records
            .db()
            .insert_department(&department)
            .map_err(insert_failure(KIND))?;
        info!(id = %department.id, name = %department.name, "department added");
        Ok(department)
    }

    /// Overwrite the mutable fields of an existing department.
    pub fn update(&self, id: &str, update: &DepartmentUpdate) -> RecordsResult<Department> {
        let rules = self.records.rules();
        let db = self.records.db();
        let tx = db.transaction()?;

        let id = self.records.require_existing(KIND, id)?;
        let mut department = db
            .get_department(&id)?
            .ok_or_else(|| RecordsError::NotFound { kind: KIND, id: id.clone() })?;

        department.description = rules.text(&update.description);
        department.contact_number_1 = rules.phone("contact number", &update.contact_number_1)?;
        department.contact_number_2 =
            rules.optional_phone("alternate contact number", &update.contact_number_2)?;
        department.address = rules.text(&update.address);
        department.email_id = rules.email("email", &update.email_id)?;

        db.update_department(&department)?;
        tx.commit()?;
        info!(id = %department.id, "department updated");
        Ok(department)
    }

    /// Delete a department once both confirmation steps are done.
    ///
    /// Returns `false` without touching the table when unconfirmed.
    pub fn delete(&self, id: &str, confirmation: Confirmation) -> RecordsResult<bool> {
        let id = self.records.require_existing(KIND, id)?;
        if !confirmation.is_confirmed() {
            return Ok(false);
        }
        let deleted = self.records.db().delete_department(&id)?;
        info!(id = %id, "department deleted");
        Ok(deleted)
    }

    /// Search by exact ID.
    pub fn get(&self, id: &str) -> RecordsResult<Department> {
        let id = self.records.require_existing(KIND, id)?;
        self.records
            .db()
            .get_department(&id)?
            .ok_or(RecordsError::NotFound { kind: KIND, id })
    }

    /// All departments.
    pub fn list(&self) -> RecordsResult<Vec<Department>> {
        Ok(self.records.db().list_departments()?)
    }

    /// Department name and the doctors working in it.
    pub fn doctors(&self, id: &str) -> RecordsResult<(String, Vec<DoctorSummary>)> {
        let department = self.get(id)?;
        let doctors = self.records.db().list_doctors_in_department(&department.id)?;
        Ok((department.name, doctors))
    }
}
