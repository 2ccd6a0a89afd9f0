//! Prescription service.

use tracing::info;

use super::{insert_failure, Records};
use crate::ids::EntityKind;
use crate::models::{Confirmation, Prescription, PrescriptionDetails, PrescriptionInput};
use crate::validation::TextRules;
use crate::{RecordsError, RecordsResult};

const KIND: EntityKind = EntityKind::Prescription;

/// Prescription operations.
pub struct PrescriptionService<'a> {
    records: Records<'a>,
}

impl<'a> PrescriptionService<'a> {
    pub fn new(records: Records<'a>) -> Self {
        Self { records }
    }

    /// True iff a prescription with exactly this ID exists.
    pub fn verify(&self, id: &str) -> RecordsResult<bool> {
        self.records.verify(KIND, id)
    }

    /// Validate and persist a new prescription.
    pub fn add(&self, input: &PrescriptionInput) -> RecordsResult<Prescription> {
        let rules = self.records.rules();
        let body = Body::sanitize(rules, &input.details)?;

        let db = self.records.db();
        let tx = db.transaction()?;
        let patient = self
            .records
            .resolve_reference(EntityKind::Patient, &input.patient_id)?;
        let doctor = self
            .records
            .resolve_reference(EntityKind::Doctor, &input.doctor_id)?;

        let mut prescription = Prescription {
            id: self.records.next_id(KIND),
            patient_id: patient.as_ref().map(|p| p.id.clone()),
            patient_name: patient.and_then(|p| p.name),
            doctor_id: doctor.as_ref().map(|d| d.id.clone()),
            doctor_name: doctor.and_then(|d| d.name),
            diagnosis: String::new(),
            comments: None,
            medicine_1_name: String::new(),
            medicine_1_dosage_description: String::new(),
            medicine_2_name: None,
            medicine_2_dosage_description: None,
            medicine_3_name: None,
            medicine_3_dosage_description: None,
        };
        body.apply(&mut prescription);

        db.insert_prescription(&prescription)
            .map_err(insert_failure(KIND))?;
        tx.commit()?;
        info!(id = %prescription.id, patient = ?prescription.patient_id, "prescription added");
        Ok(prescription)
    }

    /// Overwrite the body of an existing prescription.
    ///
    /// Patient and doctor are fixed once written. An unset optional medicine
    /// is stored as absent, never as an empty name.
    pub fn update(&self, id: &str, details: &PrescriptionDetails) -> RecordsResult<Prescription> {
        let body = Body::sanitize(self.records.rules(), details)?;
        let db = self.records.db();
        let tx = db.transaction()?;

        let id = self.records.require_existing(KIND, id)?;
        let mut prescription = db
            .get_prescription(&id)?
            .ok_or_else(|| RecordsError::NotFound { kind: KIND, id: id.clone() })?;
        body.apply(&mut prescription);

        db.update_prescription(&prescription)?;
        tx.commit()?;
        info!(id = %prescription.id, "prescription updated");
        Ok(prescription)
    }

    /// Delete a prescription once both confirmation steps are done.
    pub fn delete(&self, id: &str, confirmation: Confirmation) -> RecordsResult<bool> {
        let id = self.records.require_existing(KIND, id)?;
        if !confirmation.is_confirmed() {
            return Ok(false);
        }
        let deleted = self.records.db().delete_prescription(&id)?;
        info!(id = %id, "prescription deleted");
        Ok(deleted)
    }

    /// Search by exact ID.
    pub fn get(&self, id: &str) -> RecordsResult<Prescription> {
        let id = self.records.require_existing(KIND, id)?;
        self.records
            .db()
            .get_prescription(&id)?
            .ok_or(RecordsError::NotFound { kind: KIND, id })
    }

    /// All prescriptions.
    pub fn list(&self) -> RecordsResult<Vec<Prescription>> {
        Ok(self.records.db().list_prescriptions()?)
    }

    /// Patient name and every prescription written for them.
    pub fn for_patient(&self, patient_id: &str) -> RecordsResult<(String, Vec<Prescription>)> {
        let patient = self.records.patients().get(patient_id)?;
        let prescriptions = self
            .records
            .db()
            .list_prescriptions_for_patient(&patient.id)?;
        Ok((patient.name, prescriptions))
    }
}

/// Sanitized prescription body.
struct Body {
    diagnosis: String,
    comments: Option<String>,
    medicine_1_name: String,
    medicine_1_dosage_description: String,
    medicine_2_name: Option<String>,
    medicine_2_dosage_description: Option<String>,
    medicine_3_name: Option<String>,
    medicine_3_dosage_description: Option<String>,
}

impl Body {
    fn sanitize(rules: TextRules, details: &PrescriptionDetails) -> RecordsResult<Self> {
        Ok(Self {
            diagnosis: rules.text(&details.diagnosis),
            comments: rules.optional(&details.comments),
            medicine_1_name: rules.required("Medicine 1 name", &details.medicine_1_name)?,
            medicine_1_dosage_description: rules.text(&details.medicine_1_dosage_description),
            medicine_2_name: rules.optional(&details.medicine_2_name),
            medicine_2_dosage_description: rules.optional(&details.medicine_2_dosage_description),
            medicine_3_name: rules.optional(&details.medicine_3_name),
            medicine_3_dosage_description: rules.optional(&details.medicine_3_dosage_description),
        })
    }

    fn apply(self, prescription: &mut Prescription) {
        prescription.diagnosis = self.diagnosis;
        prescription.comments = self.comments;
        prescription.medicine_1_name = self.medicine_1_name;
        prescription.medicine_1_dosage_description = self.medicine_1_dosage_description;
        prescription.medicine_2_name = self.medicine_2_name;
        prescription.medicine_2_dosage_description = self.medicine_2_dosage_description;
        prescription.medicine_3_name = self.medicine_3_name;
        prescription.medicine_3_dosage_description = self.medicine_3_dosage_description;
    }
}
