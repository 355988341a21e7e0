use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Government-ID category for an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pan,
    Aadhar,
    Voter,
    Birth,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Pan,
        DocumentType::Aadhar,
        DocumentType::Voter,
        DocumentType::Birth,
    ];

    /// Human-readable name shown in listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentType::Pan => "PAN Card",
            DocumentType::Aadhar => "Aadhar Card",
            DocumentType::Voter => "Voter ID",
            DocumentType::Birth => "Birth Certificate",
        }
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pan" => Ok(DocumentType::Pan),
            "aadhar" => Ok(DocumentType::Aadhar),
            "voter" => Ok(DocumentType::Voter),
            "birth" => Ok(DocumentType::Birth),
            other => Err(format!("Unknown document type: {}", other)),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocumentType::Pan => "pan",
            DocumentType::Aadhar => "aadhar",
            DocumentType::Voter => "voter",
            DocumentType::Birth => "birth",
        };
        write!(f, "{}", s)
    }
}

/// Verification outcome. Records start `Pending`; only the external
/// verification event (`mark`) advances them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub const ALL: [VerificationStatus; 3] = [
        VerificationStatus::Pending,
        VerificationStatus::Verified,
        VerificationStatus::Rejected,
    ];
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// Status filter for the history view: everything, or one exact status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Status(VerificationStatus),
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

/// One uploaded document's metadata and verification status.
///
/// The binary content is never persisted here; only descriptive metadata
/// about the file travels with the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Identifier as printed on the physical document. Free text,
    /// only checked for non-emptiness at upload time.
    pub document_id: String,
    pub issue_date: NaiveDate,
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub file_type: String,
    /// Assigned at creation, immutable thereafter.
    pub upload_date: DateTime<Utc>,
    pub status: VerificationStatus,
}

impl DocumentRecord {
    /// Build a freshly uploaded record: generated id, `Pending` status,
    /// upload date stamped now.
    pub fn new(
        doc_type: DocumentType,
        document_id: String,
        issue_date: NaiveDate,
        file_name: String,
        file_size: u64,
        file_type: String,
    ) -> Self {
        Self {
            id: format!("doc-{}", Uuid::new_v4()),
            doc_type,
            document_id,
            issue_date,
            file_name,
            file_size,
            file_type,
            upload_date: Utc::now(),
            status: VerificationStatus::Pending,
        }
    }
}

/// One historical verification event, independent of live document status.
///
/// `document_id` is a soft reference to a [`DocumentRecord`] id; a dangling
/// reference is tolerated and simply fails to resolve on lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub document_id: String,
    pub document_type: DocumentType,
    pub verification_date: DateTime<Utc>,
    pub status: VerificationStatus,
    pub document_name: String,
}

/// Session profile persisted alongside the bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
}

/// An authenticated session: who is logged in, plus the bearer token the
/// remote client sends with every authenticated request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_wire_names_are_lowercase() {
        let json = serde_json::to_string(&DocumentType::Pan).unwrap();
        assert_eq!(json, "\"pan\"");
        let parsed: DocumentType = serde_json::from_str("\"birth\"").unwrap();
        assert_eq!(parsed, DocumentType::Birth);
    }

    #[test]
    fn status_filter_parses_all_and_statuses() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "verified".parse::<StatusFilter>().unwrap(),
            StatusFilter::Status(VerificationStatus::Verified)
        );
        assert!("bogus".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn new_record_starts_pending_with_generated_id() {
        let rec = DocumentRecord::new(
            DocumentType::Voter,
            "VOTER-123".into(),
            NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            "voter_id.pdf".into(),
            1024,
            "application/pdf".into(),
        );
        assert_eq!(rec.status, VerificationStatus::Pending);
        assert!(rec.id.starts_with("doc-"));
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let rec = DocumentRecord::new(
            DocumentType::Pan,
            "ABCDE1234F".into(),
            NaiveDate::from_ymd_opt(2022, 5, 15).unwrap(),
            "pan_card.pdf".into(),
            2048,
            "application/pdf".into(),
        );
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("documentId").is_some());
        assert!(json.get("uploadDate").is_some());
        assert_eq!(json.get("type").unwrap(), "pan");
    }
}
