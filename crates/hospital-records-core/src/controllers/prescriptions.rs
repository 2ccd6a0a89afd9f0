//! Prescription forms.

use super::{
    delete, fail, reference_field, search, settle, show_all, show_target, verified_target, Entity,
    Outcome,
};
use crate::ids::EntityKind;
use crate::models::{Prescription, PrescriptionDetails, PrescriptionInput};
use crate::service::Records;
use crate::ui::{TableView, Ui};

const ENTITY: Entity = Entity::new(EntityKind::Prescription, "prescription");

/// Add/Update/Delete/Show/Search over prescriptions, plus the per-patient
/// listing.
pub struct PrescriptionController<'a> {
    records: Records<'a>,
}

impl<'a> PrescriptionController<'a> {
    pub fn new(records: Records<'a>) -> Self {
        Self { records }
    }

    pub fn add(&self, ui: &mut dyn Ui) -> Outcome<Prescription> {
        ui.write("Enter prescription details:");
        let patient_id = match reference_field(ui, self.records, EntityKind::Patient, "Patient ID")
        {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let doctor_id = match reference_field(ui, self.records, EntityKind::Doctor, "Doctor ID") {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };
        let input = PrescriptionInput {
            patient_id,
            doctor_id,
            details: details_form(ui),
        };
        if !ui.button("Save") {
            return Outcome::Pending;
        }

        let outcome = settle(
            ui,
            &ENTITY.context("saving"),
            self.records.prescriptions().add(&input),
        );
        if let Outcome::Completed(prescription) = &outcome {
            ui.success(&ENTITY.done("saved"));
            ui.write(&format!("The Prescription ID is: {}", prescription.id));
        }
        outcome
    }

    /// Rewrite diagnosis, comments and medicines. Patient and doctor stay.
    pub fn update(&self, ui: &mut dyn Ui) -> Outcome<Prescription> {
        let service = self.records.prescriptions();
        let (id, _) = match show_target(
            ui,
            self.records,
            ENTITY,
            "updated",
            "Here are the current details of the prescription:",
            |id| service.get(id),
        ) {
            Ok(target) => target,
            Err(outcome) => return outcome,
        };

        ui.write("Enter new details of the prescription:");
        let details = details_form(ui);
        if !ui.button("Update") {
            return Outcome::Pending;
        }

        let outcome = settle(ui, &ENTITY.context("updating"), service.update(&id, &details));
        if outcome.is_completed() {
            ui.success(&ENTITY.done("updated"));
        }
        outcome
    }

    pub fn delete(&self, ui: &mut dyn Ui) -> Outcome<String> {
        let service = self.records.prescriptions();
        delete(
            ui,
            self.records,
            ENTITY,
            |id| service.get(id),
            |id, confirmation| service.delete(id, confirmation),
        )
    }

    pub fn show_all(&self, ui: &mut dyn Ui) -> Outcome<usize> {
        show_all(ui, ENTITY, self.records.prescriptions().list())
    }

    pub fn search(&self, ui: &mut dyn Ui) -> Outcome<Prescription> {
        let service = self.records.prescriptions();
        search(ui, self.records, ENTITY, |id| service.get(id))
    }

    /// Every prescription written for one patient.
    pub fn for_patient(&self, ui: &mut dyn Ui) -> Outcome<Vec<Prescription>> {
        let id = match verified_target(
            ui,
            self.records,
            EntityKind::Patient,
            "Enter Patient ID to view all their prescriptions",
        ) {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };

        match self.records.prescriptions().for_patient(&id) {
            Ok((name, prescriptions)) => {
                ui.write(&format!("Here is the prescription record of {name}:"));
                ui.table(&TableView::of(&prescriptions));
                Outcome::Completed(prescriptions)
            }
            Err(err) => fail(ui, "fetching prescriptions", err),
        }
    }
}

/// Body fields shared by the Add and Update forms.
fn details_form(ui: &mut dyn Ui) -> PrescriptionDetails {
    PrescriptionDetails {
        diagnosis: ui.text_area("Diagnosis"),
        comments: ui.text_area("Comments (if any)"),
        medicine_1_name: ui.text("Medicine 1 name"),
        medicine_1_dosage_description: ui.text_area("Medicine 1 dosage and description"),
        medicine_2_name: ui.text("Medicine 2 name (optional)"),
        medicine_2_dosage_description: ui.text_area("Medicine 2 dosage and description"),
        medicine_3_name: ui.text("Medicine 3 name (optional)"),
        medicine_3_dosage_description: ui.text_area("Medicine 3 dosage and description"),
    }
}
