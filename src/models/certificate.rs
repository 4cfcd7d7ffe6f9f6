// src/models/certificate.rs
//! Certificate data model.
//!
//! A certificate is a fixed, ordered schema of named attributes. The order
//! matters: the issuance commitment is computed over the attribute values in
//! exactly the order `attributes` returns them, and every verifier
//! recomputes roots against that same order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An academic certificate as issued by a university to a student.
///
/// Attributes are immutable once issued. Revocation does not edit the
/// record; it is a second fact appended on the ledger, mirrored here by the
/// `revoked` flag for display purposes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub student_name: String,
    pub student_email: String,
    pub university_name: String,
    pub university_email: String,
    pub major: String,
    pub department_name: String,
    /// Cumulative grade point average, kept as the string the university
    /// entered so the committed bytes never drift through reformatting.
    pub cgpa: String,
    /// ISO 8601 date of issuance.
    pub date_of_issue: String,
    pub certificate_id: String,
    #[serde(default)]
    pub revoked: bool,
}

impl Certificate {
    /// Returns every schema attribute as `(name, value)` pairs in the agreed
    /// commitment order.
    pub fn attributes(&self) -> [(&'static str, &str); 9] {
        [
            ("studentName", self.student_name.as_str()),
            ("studentEmail", self.student_email.as_str()),
            ("universityName", self.university_name.as_str()),
            ("universityEmail", self.university_email.as_str()),
            ("major", self.major.as_str()),
            ("departmentName", self.department_name.as_str()),
            ("cgpa", self.cgpa.as_str()),
            ("dateOfIssue", self.date_of_issue.as_str()),
            ("certificateId", self.certificate_id.as_str()),
        ]
    }

    /// Looks up a single attribute value by its wire name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|(attribute_name, _)| *attribute_name == name)
            .map(|(_, value)| *value)
    }

    /// All attribute values in commitment order.
    pub fn ordered_values(&self) -> Vec<String> {
        self.attributes()
            .iter()
            .map(|(_, value)| value.to_string())
            .collect()
    }
}

/// Progression of a certificate through issuance and beyond.
///
/// `Drafted -> Committed -> SignedIssuer -> SignedBoth -> Recorded`,
/// with `Revoked` reachable only after `Recorded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateState {
    Drafted,
    Committed,
    SignedIssuer,
    SignedBoth,
    Recorded,
    Revoked,
}

impl fmt::Display for CertificateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CertificateState::Drafted => "drafted",
            CertificateState::Committed => "committed",
            CertificateState::SignedIssuer => "signed(issuer)",
            CertificateState::SignedBoth => "signed(both)",
            CertificateState::Recorded => "recorded",
            CertificateState::Revoked => "revoked",
        };
        f.write_str(label)
    }
}
