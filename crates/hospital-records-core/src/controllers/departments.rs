//! Department forms.

use super::{delete, fail, search, settle, show_all, show_target, verified_target, Entity, Outcome};
use crate::ids::EntityKind;
use crate::models::{Department, DepartmentInput, DepartmentUpdate, DoctorSummary};
use crate::service::Records;
use crate::ui::{TableView, Ui};

const ENTITY: Entity = Entity::new(EntityKind::Department, "department");

/// Add/Update/Delete/Show/Search over departments, plus the doctor listing.
pub struct DepartmentController<'a> {
    records: Records<'a>,
}

impl<'a> DepartmentController<'a> {
    pub fn new(records: Records<'a>) -> Self {
        Self { records }
    }

    pub fn add(&self, ui: &mut dyn Ui) -> Outcome<Department> {
        ui.write("Enter department details:");
        let input = DepartmentInput {
            name: ui.text("Department name"),
            description: ui.text_area("Description"),
            contact_number_1: ui.text("Contact number"),
            contact_number_2: ui.text("Alternate contact number (optional)"),
            address: ui.text_area("Address"),
            email_id: ui.text("Email ID"),
        };
        if !ui.button("Save") {
            return Outcome::Pending;
        }

        let outcome = settle(ui, &ENTITY.context("saving"), self.records.departments().add(&input));
        if let Outcome::Completed(department) = &outcome {
            ui.success(&ENTITY.done("saved"));
            ui.write(&format!("The Department ID is: {}", department.id));
        }
        outcome
    }

    pub fn update(&self, ui: &mut dyn Ui) -> Outcome<Department> {
        let service = self.records.departments();
        let (id, _) = match show_target(
            ui,
            self.records,
            ENTITY,
            "updated",
            "Here are the current details of the department:",
            |id| service.get(id),
        ) {
            Ok(target) => target,
            Err(outcome) => return outcome,
        };

        ui.write("Enter new details of the department:");
        let update = DepartmentUpdate {
            description: ui.text_area("Description"),
            contact_number_1: ui.text("Contact number"),
            contact_number_2: ui.text("Alternate contact number (optional)"),
            address: ui.text_area("Address"),
            email_id: ui.text("Email ID"),
        };
        if !ui.button("Update") {
            return Outcome::Pending;
        }

        let outcome = settle(ui, &ENTITY.context("updating"), service.update(&id, &update));
        if outcome.is_completed() {
            ui.success(&ENTITY.done("updated"));
        }
        outcome
    }

    pub fn delete(&self, ui: &mut dyn Ui) -> Outcome<String> {
        let service = self.records.departments();
        delete(
            ui,
            self.records,
            ENTITY,
            |id| service.get(id),
            |id, confirmation| service.delete(id, confirmation),
        )
    }

    pub fn show_all(&self, ui: &mut dyn Ui) -> Outcome<usize> {
        show_all(ui, ENTITY, self.records.departments().list())
    }

    pub fn search(&self, ui: &mut dyn Ui) -> Outcome<Department> {
        let service = self.records.departments();
        search(ui, self.records, ENTITY, |id| service.get(id))
    }

    /// Doctors working in a department.
    pub fn list_doctors(&self, ui: &mut dyn Ui) -> Outcome<Vec<DoctorSummary>> {
        let id = match verified_target(
            ui,
            self.records,
            ENTITY.kind,
            "Enter Department ID to get a list of doctors working in that department",
        ) {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };

        match self.records.departments().doctors(&id) {
            Ok((name, doctors)) => {
                ui.write(&format!(
                    "Here is the list of doctors working in the {name} department:"
                ));
                ui.table(&TableView::of(&doctors).as_table());
                Outcome::Completed(doctors)
            }
            Err(err) => fail(ui, "fetching doctor list", err),
        }
    }
}
