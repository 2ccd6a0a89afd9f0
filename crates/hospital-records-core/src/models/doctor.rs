//! Doctor models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{cell, Gender, Tabular};

/// A doctor, optionally attached to a department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    /// `DR-SSMMHH-YYMMDD`
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    /// `DD-MM-YYYY`
    pub date_of_birth: String,
    pub blood_group: String,
    /// Verified at write time only
    pub department_id: Option<String>,
    /// Department name when the reference was written; never refreshed
    pub department_name: Option<String>,
    pub contact_number_1: String,
    pub contact_number_2: Option<String>,
    pub aadhar_or_voter_id: String,
    pub email_id: Option<String>,
    pub qualification: String,
    pub specialisation: String,
    pub years_of_experience: u32,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

/// Raw form input for adding a doctor.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorInput {
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub blood_group: String,
    pub department_id: String,
    pub contact_number_1: String,
    pub contact_number_2: String,
    pub aadhar_or_voter_id: String,
    pub email_id: String,
    pub qualification: String,
    pub specialisation: String,
    pub years_of_experience: u32,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

/// Raw form input for updating a doctor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorUpdate {
    /// Blank clears the department reference
    pub department_id: String,
    pub contact_number_1: String,
    pub contact_number_2: String,
    pub email_id: String,
    pub qualification: String,
    pub specialisation: String,
    pub years_of_experience: u32,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

impl Tabular for Doctor {
    const TITLES: &'static [&'static str] = &[
        "Doctor ID",
        "Name",
        "Age",
        "Gender",
        "Date of birth (DD-MM-YYYY)",
        "Blood group",
        "Department ID",
        "Department name",
        "Contact number",
        "Alternate contact number",
        "Aadhar ID / Voter ID",
        "Email ID",
        "Qualification",
        "Specialisation",
        "Years of experience",
        "Address",
        "City",
        "State",
        "PIN code",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.age.to_string(),
            self.gender.clone(),
            self.date_of_birth.clone(),
            self.blood_group.clone(),
            cell(&self.department_id),
            cell(&self.department_name),
            self.contact_number_1.clone(),
            cell(&self.contact_number_2),
            self.aadhar_or_voter_id.clone(),
            cell(&self.email_id),
            self.qualification.clone(),
            self.specialisation.clone(),
            self.years_of_experience.to_string(),
            self.address.clone(),
            self.city.clone(),
            self.state.clone(),
            self.pin_code.clone(),
        ]
    }
}
