//! SQLite schema definition.

/// Complete database schema for hospital records.
///
/// Foreign IDs carry no `REFERENCES` clause: they are verified by the
/// service layer at write time and never re-validated on read.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Departments
-- ============================================================================

CREATE TABLE IF NOT EXISTS department_record (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    contact_number_1 TEXT NOT NULL DEFAULT '',
    contact_number_2 TEXT,                       -- NULL when not given
    address TEXT NOT NULL DEFAULT '',
    email_id TEXT
);

-- ============================================================================
-- Doctors
-- ============================================================================

CREATE TABLE IF NOT EXISTS doctor_record (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL,
    date_of_birth TEXT NOT NULL,                 -- DD-MM-YYYY
    blood_group TEXT NOT NULL DEFAULT '',
    department_id TEXT,
    department_name TEXT,                        -- snapshot at write time
    contact_number_1 TEXT NOT NULL DEFAULT '',
    contact_number_2 TEXT,
    aadhar_or_voter_id TEXT NOT NULL DEFAULT '',
    email_id TEXT,
    qualification TEXT NOT NULL DEFAULT '',
    specialisation TEXT NOT NULL DEFAULT '',
    years_of_experience INTEGER NOT NULL DEFAULT 0
        CHECK (years_of_experience BETWEEN 0 AND 100),
    address TEXT NOT NULL DEFAULT '',
    city TEXT NOT NULL DEFAULT '',
    state TEXT NOT NULL DEFAULT '',
    pin_code TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_doctor_department ON doctor_record(department_id);

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patient_record (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL,
    date_of_birth TEXT NOT NULL,                 -- DD-MM-YYYY
    blood_group TEXT NOT NULL DEFAULT '',
    contact_number_1 TEXT NOT NULL DEFAULT '',
    contact_number_2 TEXT,
    aadhar_or_voter_id TEXT NOT NULL DEFAULT '',
    weight INTEGER NOT NULL DEFAULT 0 CHECK (weight BETWEEN 0 AND 400),
    height INTEGER NOT NULL DEFAULT 0 CHECK (height BETWEEN 0 AND 275),
    address TEXT NOT NULL DEFAULT '',
    city TEXT NOT NULL DEFAULT '',
    state TEXT NOT NULL DEFAULT '',
    pin_code TEXT NOT NULL DEFAULT '',
    next_of_kin_name TEXT NOT NULL DEFAULT '',
    next_of_kin_relation_to_patient TEXT NOT NULL DEFAULT '',
    next_of_kin_contact_number TEXT NOT NULL DEFAULT '',
    email_id TEXT,
    date_of_registration TEXT NOT NULL,          -- DD-MM-YYYY
    time_of_registration TEXT NOT NULL           -- HH:MM:SS
);

-- ============================================================================
-- Medical Tests
-- ============================================================================

CREATE TABLE IF NOT EXISTS medical_test_record (
    id TEXT PRIMARY KEY,
    test_name TEXT NOT NULL,
    patient_id TEXT,
    patient_name TEXT,                           -- snapshot at write time
    doctor_id TEXT,
    doctor_name TEXT,                            -- snapshot at write time
    medical_lab_scientist_id TEXT,
    test_date_time TEXT NOT NULL,                -- DD-MM-YYYY (HH:MM)
    result_date_time TEXT NOT NULL,              -- DD-MM-YYYY (HH:MM)
    result_and_diagnosis TEXT NOT NULL DEFAULT 'Test result awaited',
    description TEXT,
    comments TEXT,
    cost INTEGER NOT NULL DEFAULT 0 CHECK (cost BETWEEN 0 AND 10000)
);

CREATE INDEX IF NOT EXISTS idx_medical_test_patient ON medical_test_record(patient_id);

-- ============================================================================
-- Prescriptions
-- ============================================================================

CREATE TABLE IF NOT EXISTS prescription_record (
    id TEXT PRIMARY KEY,
    patient_id TEXT,
    patient_name TEXT,                           -- snapshot at write time
    doctor_id TEXT,
    doctor_name TEXT,                            -- snapshot at write time
    diagnosis TEXT NOT NULL DEFAULT '',
    comments TEXT,
    medicine_1_name TEXT NOT NULL,
    medicine_1_dosage_description TEXT NOT NULL DEFAULT '',
    medicine_2_name TEXT,
    medicine_2_dosage_description TEXT,
    medicine_3_name TEXT,
    medicine_3_dosage_description TEXT
);

CREATE INDEX IF NOT EXISTS idx_prescription_patient ON prescription_record(patient_id);
"#;
