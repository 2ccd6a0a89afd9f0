//! Department models.

use serde::{Deserialize, Serialize};

use super::common::{cell, Tabular};

/// A hospital department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Department {
    /// `D-SSMMHH-YYMMDD`
    pub id: String,
    pub name: String,
    pub description: String,
    pub contact_number_1: String,
    /// Alternate contact number
    pub contact_number_2: Option<String>,
    pub address: String,
    pub email_id: Option<String>,
}

/// Raw form input for adding a department.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentInput {
    pub name: String,
    pub description: String,
    pub contact_number_1: String,
    pub contact_number_2: String,
    pub address: String,
    pub email_id: String,
}

/// Raw form input for updating a department. The name is fixed at creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentUpdate {
    pub description: String,
    pub contact_number_1: String,
    pub contact_number_2: String,
    pub address: String,
    pub email_id: String,
}

/// ID and name of a doctor, as listed per department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorSummary {
    pub id: String,
    pub name: String,
}

impl Tabular for Department {
    const TITLES: &'static [&'static str] = &[
        "Department ID",
        "Department name",
        "Description",
        "Contact number",
        "Alternate contact number",
        "Address",
        "Email ID",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.description.clone(),
            self.contact_number_1.clone(),
            cell(&self.contact_number_2),
            self.address.clone(),
            cell(&self.email_id),
        ]
    }
}

impl Tabular for DoctorSummary {
    const TITLES: &'static [&'static str] = &["Doctor ID", "Name"];

    fn to_row(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone()]
    }
}
