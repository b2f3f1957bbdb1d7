//! Report-card entries submitted by the presentation layer

use serde::{Deserialize, Serialize};

use crate::chain::Timestamp;
use crate::constants::{FIELD_GRADE, FIELD_STUDENT, FIELD_SUBJECT, FIELD_TIMESTAMP};
use crate::error::{LedgerError, Result};
use crate::payload::{payload_of, Payload};

/// One grade for one student in one subject
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCardEntry {
    #[serde(default)]
    pub student: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub grade: String,
}

impl ReportCardEntry {
    pub fn new(
        student: impl Into<String>,
        subject: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            student: student.into(),
            subject: subject.into(),
            grade: grade.into(),
        }
    }

    /// Every field must hold something other than whitespace
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            (FIELD_STUDENT, &self.student),
            (FIELD_SUBJECT, &self.subject),
            (FIELD_GRADE, &self.grade),
        ] {
            if value.trim().is_empty() {
                return Err(LedgerError::InvalidEntry { field });
            }
        }
        Ok(())
    }

    /// Block payload for this entry, stamped with the submission time.
    ///
    /// Field values are stored exactly as submitted.
    pub fn to_payload(&self, submitted_at: Timestamp) -> Payload {
        payload_of([
            (FIELD_STUDENT, self.student.clone()),
            (FIELD_SUBJECT, self.subject.clone()),
            (FIELD_GRADE, self.grade.clone()),
            (FIELD_TIMESTAMP, submitted_at.to_iso()),
        ])
    }
}
