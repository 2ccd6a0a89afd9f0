//! Domain models for the hospital records system.

mod common;
mod department;
mod doctor;
mod patient;
mod prescription;

pub use common::*;
pub use department::*;
pub use doctor::*;
pub use medical_test::*;
pub use patient::*;
pub use prescription::*;
