//! Prescription models.

use serde::{Deserialize, Serialize};

use super::common::{cell, Tabular};

/// A prescription of up to three medicines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    /// `M-SSMMHH-YYMMDD`
    pub id: String,
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub doctor_id: Option<String>,
    pub doctor_name: Option<String>,
    pub diagnosis: String,
    pub comments: Option<String>,
    pub medicine_1_name: String,
    pub medicine_1_dosage_description: String,
    pub medicine_2_name: Option<String>,
    pub medicine_2_dosage_description: Option<String>,
    pub medicine_3_name: Option<String>,
    pub medicine_3_dosage_description: Option<String>,
}

/// Editable prescription body, shared by the Add and Update forms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrescriptionDetails {
    pub diagnosis: String,
    pub comments: String,
    pub medicine_1_name: String,
    pub medicine_1_dosage_description: String,
    pub medicine_2_name: String,
    pub medicine_2_dosage_description: String,
    pub medicine_3_name: String,
    pub medicine_3_dosage_description: String,
}

/// Raw form input for adding a prescription.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrescriptionInput {
    pub patient_id: String,
    pub doctor_id: String,
    pub details: PrescriptionDetails,
}

impl Tabular for Prescription {
    const TITLES: &'static [&'static str] = &[
        "Prescription ID",
        "Patient ID",
        "Patient name",
        "Doctor ID",
        "Doctor name",
        "Diagnosis",
        "Comments",
        "Medicine 1 name",
        "Medicine 1 dosage and description",
        "Medicine 2 name",
        "Medicine 2 dosage and description",
        "Medicine 3 name",
        "Medicine 3 dosage and description",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            cell(&self.patient_id),
            cell(&self.patient_name),
            cell(&self.doctor_id),
            cell(&self.doctor_name),
            self.diagnosis.clone(),
            cell(&self.comments),
            self.medicine_1_name.clone(),
            self.medicine_1_dosage_description.clone(),
            cell(&self.medicine_2_name),
            cell(&self.medicine_2_dosage_description),
            cell(&self.medicine_3_name),
            cell(&self.medicine_3_dosage_description),
        ]
    }
}
