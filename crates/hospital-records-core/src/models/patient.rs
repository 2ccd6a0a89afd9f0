//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{cell, Gender, Tabular};

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// `P-SSMMHH-YYMMDD`, derived from the registration stamp
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    /// `DD-MM-YYYY`; immutable after registration
    pub date_of_birth: String,
    pub blood_group: String,
    pub contact_number_1: String,
    pub contact_number_2: Option<String>,
    pub aadhar_or_voter_id: String,
    /// Weight in kg
    pub weight: u32,
    /// Height in cm
    pub height: u32,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub next_of_kin_name: String,
    pub next_of_kin_relation_to_patient: String,
    pub next_of_kin_contact_number: String,
    pub email_id: Option<String>,
    /// `DD-MM-YYYY`
    pub date_of_registration: String,
    /// `HH:MM:SS`
    pub time_of_registration: String,
}

/// Raw form input for registering a patient.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientInput {
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub blood_group: String,
    pub contact_number_1: String,
    pub contact_number_2: String,
    pub aadhar_or_voter_id: String,
    pub weight: u32,
    pub height: u32,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub next_of_kin_name: String,
    pub next_of_kin_relation_to_patient: String,
    pub next_of_kin_contact_number: String,
    pub email_id: String,
}

/// Raw form input for updating a patient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientUpdate {
    pub contact_number_1: String,
    pub contact_number_2: String,
    pub weight: u32,
    pub height: u32,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub next_of_kin_name: String,
    pub next_of_kin_relation_to_patient: String,
    pub next_of_kin_contact_number: String,
    pub email_id: String,
}

impl Tabular for Patient {
    const TITLES: &'static [&'static str] = &[
        "Patient ID",
        "Name",
        "Age",
        "Gender",
        "Date of birth (DD-MM-YYYY)",
        "Blood group",
        "Contact number",
        "Alternate contact number",
        "Aadhar ID / Voter ID",
        "Weight (kg)",
        "Height (cm)",
        "Address",
        "City",
        "State",
        "PIN code",
        "Next of kin's name",
        "Next of kin's relation to patient",
        "Next of kin's contact number",
        "Email ID",
        "Date of registration (DD-MM-YYYY)",
        "Time of registration (hh:mm:ss)",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.age.to_string(),
            self.gender.clone(),
            self.date_of_birth.clone(),
            self.blood_group.clone(),
            self.contact_number_1.clone(),
            cell(&self.contact_number_2),
            self.aadhar_or_voter_id.clone(),
            self.weight.to_string(),
            self.height.to_string(),
            self.address.clone(),
            self.city.clone(),
            self.state.clone(),
            self.pin_code.clone(),
            self.next_of_kin_name.clone(),
            self.next_of_kin_relation_to_patient.clone(),
            self.next_of_kin_contact_number.clone(),
            cell(&self.email_id),
            self.date_of_registration.clone(),
            self.time_of_registration.clone(),
        ]
    }
}
