//! Patient forms.

use super::{delete, gender_field, search, settle, show_all, show_target, Entity, Outcome};
use crate::ids::EntityKind;
use crate::models::{Patient, PatientInput, PatientUpdate};
use crate::service::{Records, MAX_HEIGHT_CM, MAX_WEIGHT_KG};
use crate::ui::Ui;

const ENTITY: Entity = Entity::new(EntityKind::Patient, "patient");

/// Add/Update/Delete/Show/Search over patients.
pub struct PatientController<'a> {
    records: Records<'a>,
}

impl<'a> PatientController<'a> {
    pub fn new(records: Records<'a>) -> Self {
        Self { records }
    }

    pub fn add(&self, ui: &mut dyn Ui) -> Outcome<Patient> {
        ui.write("Enter patient details:");
        let input = PatientInput {
            name: ui.text("Full name"),
            gender: gender_field(ui),
            date_of_birth: ui.date("Date of birth (YYYY/MM/DD)"),
            blood_group: ui.text("Blood group"),
            contact_number_1: ui.text("Contact number"),
            contact_number_2: ui.text("Alternate contact number (optional)"),
            aadhar_or_voter_id: ui.text("Aadhar ID / Voter ID"),
            weight: ui.number("Weight (in kg)", 0, MAX_WEIGHT_KG),
            height: ui.number("Height (in cm)", 0, MAX_HEIGHT_CM),
            address: ui.text_area("Address"),
            city: ui.text("City"),
            state: ui.text("State"),
            pin_code: ui.text("PIN code"),
            next_of_kin_name: ui.text("Next of kin's name"),
            next_of_kin_relation_to_patient: ui.text("Next of kin's relation to patient"),
            next_of_kin_contact_number: ui.text("Next of kin's contact number"),
            email_id: ui.text("Email ID (optional)"),
        };
        if !ui.button("Save") {
            return Outcome::Pending;
        }

        let outcome = settle(ui, &ENTITY.context("saving"), self.records.patients().add(&input));
        if let Outcome::Completed(patient) = &outcome {
            ui.success(&ENTITY.done("saved"));
            ui.write(&format!("Your Patient ID is: {}", patient.id));
        }
        outcome
    }

    pub fn update(&self, ui: &mut dyn Ui) -> Outcome<Patient> {
        let service = self.records.patients();
        let (id, _) = match show_target(
            ui,
            self.records,
            ENTITY,
            "updated",
            "Here are the current details of the patient:",
            |id| service.get(id),
        ) {
            Ok(target) => target,
            Err(outcome) => return outcome,
        };

        ui.write("Enter new details of the patient:");
        let update = PatientUpdate {
            contact_number_1: ui.text("Contact number"),
            contact_number_2: ui.text("Alternate contact number (optional)"),
            weight: ui.number("Weight (in kg)", 0, MAX_WEIGHT_KG),
            height: ui.number("Height (in cm)", 0, MAX_HEIGHT_CM),
            address: ui.text_area("Address"),
            city: ui.text("City"),
            state: ui.text("State"),
            pin_code: ui.text("PIN code"),
            next_of_kin_name: ui.text("Next of kin's name"),
            next_of_kin_relation_to_patient: ui.text("Next of kin's relation to patient"),
            next_of_kin_contact_number: ui.text("Next of kin's contact number"),
            email_id: ui.text("Email ID (optional)"),
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
        let service = self.records.patients();
        delete(
            ui,
            self.records,
            ENTITY,
            |id| service.get(id),
            |id, confirmation| service.delete(id, confirmation),
        )
    }

    pub fn show_all(&self, ui: &mut dyn Ui) -> Outcome<usize> {
        show_all(ui, ENTITY, self.records.patients().list())
    }

    pub fn search(&self, ui: &mut dyn Ui) -> Outcome<Patient> {
        let service = self.records.patients();
        search(ui, self.records, ENTITY, |id| service.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::ids::FixedClock;
    use crate::ui::{Level, ScriptedUi};
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(14, 5, 7)
                .unwrap(),
        )
    }

    fn add_form() -> ScriptedUi {
        ScriptedUi::new()
            .with_text("Full name", "Ravi Kumar")
            .with_choice("Gender", 1)
            .with_date(
                "Date of birth (YYYY/MM/DD)",
                NaiveDate::from_ymd_opt(1993, 6, 15).unwrap(),
            )
            .with_text("Contact number", "9123456789")
            .with_number("Weight (in kg)", 70)
            .with_number("Height (in cm)", 175)
            .with_flag("Save", true)
    }

    #[test]
    fn test_add_reports_patient_id() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let controller = PatientController::new(Records::new(&db, &clock));

        let mut ui = add_form();
        let patient = controller.add(&mut ui).completed().unwrap();
        assert_eq!(patient.gender, "Male");
        assert_eq!(patient.age, 30);
        assert!(ui.has_message(Level::Write, "Your Patient ID is: P-070514-240309"));
    }

    #[test]
    fn test_delete_unconfirmed_keeps_patient() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let records = Records::new(&db, &clock);
        let controller = PatientController::new(records);
        let patient = controller.add(&mut add_form()).completed().unwrap();

        let mut ui = ScriptedUi::new().with_text(&ENTITY.prompt("deleted"), &patient.id);
        assert!(controller.delete(&mut ui).is_pending());
        assert!(records.patients().verify(&patient.id).unwrap());
        assert!(ui.has_message(Level::Write, "Here are the details of the patient to be deleted:"));
    }

    #[test]
    fn test_update_bad_kin_phone_keeps_row() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let records = Records::new(&db, &clock);
        let controller = PatientController::new(records);
        let patient = controller.add(&mut add_form()).completed().unwrap();

        let mut ui = ScriptedUi::new()
            .with_text(&ENTITY.prompt("updated"), &patient.id)
            .with_text("Contact number", "9123456789")
            .with_text("Next of kin's contact number", "abc")
            .with_flag("Update", true);
        assert!(controller.update(&mut ui).is_failed());
        assert_eq!(
            ui.messages_at(Level::Error),
            ["Invalid next of kin's contact number format."]
        );
        assert_eq!(records.patients().get(&patient.id).unwrap(), patient);
    }

    #[test]
    fn test_show_all_single_row() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let controller = PatientController::new(Records::new(&db, &clock));
        controller.add(&mut add_form()).completed().unwrap();

        let mut ui = ScriptedUi::new();
        assert_eq!(controller.show_all(&mut ui).completed(), Some(1));
        assert_eq!(ui.tables()[0].layout(), crate::ui::Layout::Record);
    }
}
