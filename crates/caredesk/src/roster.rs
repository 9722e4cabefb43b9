//! Patient roster import from legacy CSV exports.
//!
//! The previous system hands over patients as a flat CSV with the columns
//! `Patient ID, Full Name, Date of Birth, Department, Status, Phone` and
//! optional `Blood Type` / `Diagnosis` columns. Departments and statuses are
//! matched by their labels, case-insensitively.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::registry::domain::{Department, Patient, PatientId, PatientStatus};

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<Patient>, RosterImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Patient>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut patients = Vec::new();
        for row in csv_reader.deserialize::<RosterRow>() {
            patients.push(row?.into_patient()?);
        }

        if patients.is_empty() {
            return Err(RosterImportError::Empty);
        }

        Ok(patients)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Patient ID")]
    patient_id: String,
    #[serde(rename = "Full Name")]
    full_name: String,
    #[serde(rename = "Date of Birth")]
    date_of_birth: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Phone")]
    phone: String,
    #[serde(rename = "Blood Type", default, deserialize_with = "empty_string_as_none")]
    blood_type: Option<String>,
    #[serde(rename = "Diagnosis", default, deserialize_with = "empty_string_as_none")]
    diagnosis: Option<String>,
}

impl RosterRow {
    fn into_patient(self) -> Result<Patient, RosterImportError> {
        if self.patient_id.is_empty() {
            return Err(RosterImportError::MissingField("Patient ID"));
        }
        if self.full_name.is_empty() {
            return Err(RosterImportError::MissingField("Full Name"));
        }

        let date_of_birth = NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d")
            .map_err(|_| RosterImportError::InvalidDate {
                value: self.date_of_birth.clone(),
            })?;

        let department = Department::parse_label(&self.department).ok_or_else(|| {
            RosterImportError::UnknownDepartment {
                value: self.department.clone(),
            }
        })?;

        let status = PatientStatus::parse_label(&self.status).ok_or_else(|| {
            RosterImportError::UnknownStatus {
                value: self.status.clone(),
            }
        })?;

        Ok(Patient {
            id: PatientId(self.patient_id),
            full_name: self.full_name,
            date_of_birth,
            phone: self.phone,
            department,
            status,
            blood_type: self.blood_type,
            primary_diagnosis: self.diagnosis,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("unable to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed roster csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("'{value}' is not a YYYY-MM-DD date")]
    InvalidDate { value: String },
    #[error("'{value}' is not a known department")]
    UnknownDepartment { value: String },
    #[error("'{value}' is not a known patient status")]
    UnknownStatus { value: String },
    #[error("roster row is missing required column '{0}'")]
    MissingField(&'static str),
    #[error("roster contained no patient rows")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Patient ID,Full Name,Date of Birth,Department,Status,Phone,Blood Type,Diagnosis\n";

    #[test]
    fn imports_well_formed_rows() {
        let csv = format!(
            "{HEADER}BN-0001,Nguyen Van An,1985-03-14,Cardiology,admitted,0901 234 567,O+,Hypertension\n\
             BN-0002,Tran Thi Binh,1992-11-02,Pediatrics,outpatient,0902 345 678,,\n"
        );

        let patients = RosterImporter::from_reader(Cursor::new(csv)).expect("roster imports");
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].id.0, "BN-0001");
        assert_eq!(patients[0].department, Department::Cardiology);
        assert_eq!(patients[0].blood_type.as_deref(), Some("O+"));
        assert_eq!(patients[1].status, PatientStatus::Outpatient);
        assert_eq!(patients[1].blood_type, None);
        assert_eq!(patients[1].primary_diagnosis, None);
    }

    #[test]
    fn rejects_malformed_dates() {
        let csv = format!("{HEADER}BN-0001,Nguyen Van An,14/03/1985,Cardiology,admitted,0901,,\n");

        match RosterImporter::from_reader(Cursor::new(csv)) {
            Err(RosterImportError::InvalidDate { value }) => assert_eq!(value, "14/03/1985"),
            other => panic!("expected invalid date error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_departments() {
        let csv = format!("{HEADER}BN-0001,Nguyen Van An,1985-03-14,Radiology,admitted,0901,,\n");

        match RosterImporter::from_reader(Cursor::new(csv)) {
            Err(RosterImportError::UnknownDepartment { value }) => assert_eq!(value, "Radiology"),
            other => panic!("expected unknown department error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_statuses() {
        let csv = format!("{HEADER}BN-0001,Nguyen Van An,1985-03-14,Cardiology,active,0901,,\n");

        match RosterImporter::from_reader(Cursor::new(csv)) {
            Err(RosterImportError::UnknownStatus { value }) => assert_eq!(value, "active"),
            other => panic!("expected unknown status error, got {other:?}"),
        }
    }

    #[test]
    fn empty_roster_is_an_error() {
        match RosterImporter::from_reader(Cursor::new(HEADER.to_string())) {
            Err(RosterImportError::Empty) => {}
            other => panic!("expected empty roster error, got {other:?}"),
        }
    }
}
