//! Doctor forms.

use super::{
    delete, gender_field, reference_field, search, settle, show_all, show_target, Entity, Outcome,
};
use crate::ids::EntityKind;
use crate::models::{Doctor, DoctorInput, DoctorUpdate};
use crate::service::{Records, MAX_YEARS_OF_EXPERIENCE};
use crate::ui::Ui;

const ENTITY: Entity = Entity::new(EntityKind::Doctor, "doctor");

/// Add/Update/Delete/Show/Search over doctors.
pub struct DoctorController<'a> {
    records: Records<'a>,
}

impl<'a> DoctorController<'a> {
    pub fn new(records: Records<'a>) -> Self {
        Self { records }
    }

    /// Collect and save a new doctor. An unknown department ID aborts the
    /// form before any further field is asked.
    pub fn add(&self, ui: &mut dyn Ui) -> Outcome<Doctor> {
        ui.write("Enter doctor details:");
        let name = ui.text("Full name");
        let gender = gender_field(ui);
        let date_of_birth = ui.date("Date of birth (YYYY/MM/DD)");
        let blood_group = ui.text("Blood group");
        let department_id =
            match reference_field(ui, self.records, EntityKind::Department, "Department ID") {
                Ok(id) => id,
                Err(outcome) => return outcome,
            };
        let input = DoctorInput {
            name,
            gender,
            date_of_birth,
            blood_group,
            department_id,
            contact_number_1: ui.text("Contact number"),
            contact_number_2: ui.text("Alternate contact number (optional)"),
            aadhar_or_voter_id: ui.text("Aadhar ID / Voter ID"),
            email_id: ui.text("Email ID"),
            qualification: ui.text("Qualification"),
            specialisation: ui.text("Specialisation"),
            years_of_experience: ui.number("Years of experience", 0, MAX_YEARS_OF_EXPERIENCE),
            address: ui.text_area("Address"),
            city: ui.text("City"),
            state: ui.text("State"),
            pin_code: ui.text("PIN code"),
        };
        if !ui.button("Save") {
            return Outcome::Pending;
        }

        let outcome = settle(ui, &ENTITY.context("saving"), self.records.doctors().add(&input));
        if let Outcome::Completed(doctor) = &outcome {
            ui.success(&ENTITY.done("saved"));
            ui.write(&format!("Your Doctor ID is: {}", doctor.id));
        }
        outcome
    }

    pub fn update(&self, ui: &mut dyn Ui) -> Outcome<Doctor> {
        let service = self.records.doctors();
        let (id, _) = match show_target(
            ui,
            self.records,
            ENTITY,
            "updated",
            "Here are the current details of the doctor:",
            |id| service.get(id),
        ) {
            Ok(target) => target,
            Err(outcome) => return outcome,
        };

        ui.write("Enter new details of the doctor:");
        let department_id =
            match reference_field(ui, self.records, EntityKind::Department, "Department ID") {
                Ok(id) => id,
                Err(outcome) => return outcome,
            };
        let update = DoctorUpdate {
            department_id,
            contact_number_1: ui.text("Contact number"),
            contact_number_2: ui.text("Alternate contact number (optional)"),
            email_id: ui.text("Email ID"),
            qualification: ui.text("Qualification"),
            specialisation: ui.text("Specialisation"),
            years_of_experience: ui.number("Years of experience", 0, MAX_YEARS_OF_EXPERIENCE),
            address: ui.text_area("Address"),
            city: ui.text("City"),
            state: ui.text("State"),
            pin_code: ui.text("PIN code"),
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
        let service = self.records.doctors();
        delete(
            ui,
            self.records,
            ENTITY,
            |id| service.get(id),
            |id, confirmation| service.delete(id, confirmation),
        )
    }

    pub fn show_all(&self, ui: &mut dyn Ui) -> Outcome<usize> {
        show_all(ui, ENTITY, self.records.doctors().list())
    }

    pub fn search(&self, ui: &mut dyn Ui) -> Outcome<Doctor> {
        let service = self.records.doctors();
        search(ui, self.records, ENTITY, |id| service.get(id))
    }
}
