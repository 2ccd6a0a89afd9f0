//! Medical test forms.

use super::{
    delete, fail, reference_field, search, settle, show_all, show_target, verified_target, Entity,
    Outcome,
};
use crate::ids::EntityKind;
use crate::models::{MedicalTest, MedicalTestInput, MedicalTestUpdate};
use crate::service::{Records, MAX_COST_INR};
use crate::ui::{TableView, Ui};

const ENTITY: Entity = Entity::new(EntityKind::MedicalTest, "medical test");

/// Add/Update/Delete/Show/Search over medical tests, plus the per-patient
/// listing.
pub struct MedicalTestController<'a> {
    records: Records<'a>,
}

impl<'a> MedicalTestController<'a> {
    pub fn new(records: Records<'a>) -> Self {
        Self { records }
    }

    pub fn add(&self, ui: &mut dyn Ui) -> Outcome<MedicalTest> {
        ui.write("Enter medical test details:");
        let test_name = ui.text("Test name");
        let patient_id = match reference_field(ui, self.records, EntityKind::Patient, "Patient ID")
        {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let doctor_id = match reference_field(ui, self.records, EntityKind::Doctor, "Doctor ID") {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let input = MedicalTestInput {
            test_name,
            patient_id,
            doctor_id,
            medical_lab_scientist_id: ui.text("Medical lab scientist ID"),
            test_date: ui.date("Test date (YYYY/MM/DD)"),
            test_time: ui.time("Test time (hh:mm)"),
            result_date: ui.date("Result date (YYYY/MM/DD)"),
            result_time: ui.time("Result time (hh:mm)"),
            cost: ui.number("Cost (INR)", 0, MAX_COST_INR),
            result_and_diagnosis: ui.text_area("Result and diagnosis"),
            description: ui.text_area("Description"),
            comments: ui.text_area("Comments (if any)"),
        };
        if !ui.button("Save") {
            return Outcome::Pending;
        }

        let outcome = settle(
            ui,
            &ENTITY.context("saving"),
            self.records.medical_tests().add(&input),
        );
        if let Outcome::Completed(test) = &outcome {
            ui.success(&ENTITY.done("saved"));
            ui.write(&format!("The Medical Test ID is: {}", test.id));
        }
        outcome
    }

    /// Record a test's result. Only the outcome fields are editable.
    pub fn update(&self, ui: &mut dyn Ui) -> Outcome<MedicalTest> {
        let service = self.records.medical_tests();
        let (id, _) = match show_target(
            ui,
            self.records,
            ENTITY,
            "updated",
            "Here are the current details of the medical test:",
            |id| service.get(id),
        ) {
            Ok(target) => target,
            Err(outcome) => return outcome,
        };

        ui.write("Enter new details of the medical test:");
        let update = MedicalTestUpdate {
            result_and_diagnosis: ui.text_area("Result and diagnosis"),
            description: ui.text_area("Description"),
            comments: ui.text_area("Comments (if any)"),
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
        let service = self.records.medical_tests();
        delete(
            ui,
            self.records,
            ENTITY,
            |id| service.get(id),
            |id, confirmation| service.delete(id, confirmation),
        )
    }

    pub fn show_all(&self, ui: &mut dyn Ui) -> Outcome<usize> {
        show_all(ui, ENTITY, self.records.medical_tests().list())
    }

    pub fn search(&self, ui: &mut dyn Ui) -> Outcome<MedicalTest> {
        let service = self.records.medical_tests();
        search(ui, self.records, ENTITY, |id| service.get(id))
    }

    /// Every test ordered for one patient.
    pub fn for_patient(&self, ui: &mut dyn Ui) -> Outcome<Vec<MedicalTest>> {
        let id = match verified_target(
            ui,
            self.records,
            EntityKind::Patient,
            "Enter Patient ID to view all their medical test records",
        ) {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };

        match self.records.medical_tests().for_patient(&id) {
            Ok((name, tests)) => {
                ui.write(&format!("Medical test records for {name}:"));
                ui.table(&TableView::of(&tests));
                Outcome::Completed(tests)
            }
            Err(err) => fail(ui, "fetching medical test records", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::ids::FixedClock;
    use crate::models::RESULT_AWAITED;
    use crate::ui::{Level, ScriptedUi, NO_DATA};
    use chrono::{NaiveDate, NaiveTime};

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 2, 20)
                .unwrap()
                .and_hms_opt(11, 45, 30)
                .unwrap(),
        )
    }

    fn add_form(patient_id: &str) -> ScriptedUi {
        ScriptedUi::new()
            .with_default_date(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap())
            .with_text("Test name", "Blood count")
            .with_text("Patient ID", patient_id)
            .with_time("Test time (hh:mm)", NaiveTime::from_hms_opt(9, 15, 0).unwrap())
            .with_number("Cost (INR)", 450)
            .with_flag("Save", true)
    }

    #[test]
    fn test_add_defaults_result() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let controller = MedicalTestController::new(Records::new(&db, &clock));

        let mut ui = add_form("");
        let test = controller.add(&mut ui).completed().unwrap();
        assert_eq!(test.result_and_diagnosis, RESULT_AWAITED);
        assert_eq!(test.test_date_time, "20-02-2024 (09:15)");
        assert_eq!(test.result_date_time, "20-02-2024 (00:00)");
        assert!(ui.has_message(Level::Write, "The Medical Test ID is: T-304511-240220"));
    }

    #[test]
    fn test_add_unknown_patient_aborts() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let controller = MedicalTestController::new(Records::new(&db, &clock));

        let mut ui = add_form("P-000000-000000");
        assert!(controller.add(&mut ui).is_failed());
        assert_eq!(ui.messages_at(Level::Error), ["Invalid Patient ID"]);
        assert!(!ui.prompts().iter().any(|p| p == "Doctor ID"));
        assert_eq!(db.count(EntityKind::MedicalTest).unwrap(), 0);
    }

    #[test]
    fn test_update_records_result() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let controller = MedicalTestController::new(Records::new(&db, &clock));
        let test = controller.add(&mut add_form("")).completed().unwrap();

        let mut ui = ScriptedUi::new()
            .with_text(&ENTITY.prompt("updated"), &test.id)
            .with_text("Result and diagnosis", "Within normal range")
            .with_flag("Update", true);
        let updated = controller.update(&mut ui).completed().unwrap();
        assert_eq!(updated.result_and_diagnosis, "Within normal range");
        assert_eq!(updated.cost, 450);
        assert!(ui.has_message(Level::Success, "Medical test details updated successfully."));
    }

    #[test]
    fn test_for_patient_invalid_id() {
        let db = Database::open_in_memory().unwrap();
        let clock = clock();
        let controller = MedicalTestController::new(Records::new(&db, &clock));

        let mut ui = ScriptedUi::new().with_text(
            "Enter Patient ID to view all their medical test records",
            "P-000000-000000",
        );
        assert!(controller.for_patient(&mut ui).is_failed());
        assert_eq!(ui.messages_at(Level::Error), ["Invalid Patient ID"]);
        assert!(!ui.has_message(Level::Warning, NO_DATA));
    }
}
