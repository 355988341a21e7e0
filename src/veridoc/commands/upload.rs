use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VeridocError};
use crate::model::{DocumentRecord, DocumentType};
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;
use chrono::NaiveDate;

/// Input for an upload: what the upload form collects before submission.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub doc_type: DocumentType,
    pub document_id: String,
    pub issue_date: String,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
}

/// Validate and append a new record. Validation failures block the write,
/// mirroring the form's client-side checks: nothing reaches the store
/// until the fields pass.
pub fn run<S: KeyValueStore>(store: &mut RecordStore<S>, req: UploadRequest) -> Result<CmdResult> {
    let issue_date = validate(&req)?;

    let record = DocumentRecord::new(
        req.doc_type,
        req.document_id,
        issue_date,
        req.file_name,
        req.file_size,
        req.file_type,
    );
    store.append_document(record.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Document uploaded and sent for verification: {}",
        record.id
    )));
    result.documents.push(record);
    Ok(result)
}

fn validate(req: &UploadRequest) -> Result<NaiveDate> {
    if req.document_id.trim().is_empty() {
        return Err(VeridocError::Api("Document ID cannot be empty".into()));
    }
    if req.file_name.trim().is_empty() {
        return Err(VeridocError::Api("A document file is required".into()));
    }
    NaiveDate::parse_from_str(&req.issue_date, "%Y-%m-%d")
        .map_err(|_| VeridocError::Api(format!("Invalid issue date: {}", req.issue_date)))
}
