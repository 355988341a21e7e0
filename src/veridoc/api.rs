//! # API Facade
//!
//! Thin facade over the command layer: the single entry point for every
//! veridoc operation regardless of the UI driving it. It dispatches to the
//! right command and returns structured `Result<CmdResult>` values —
//! no business logic, no I/O, no presentation concerns.
//!
//! `VeridocApi<S: KeyValueStore>` is generic over the storage backend:
//! production uses `FileStore`, tests use `InMemoryStore`.

use crate::commands;
use crate::error::Result;
use crate::model::{AuthSession, SortDirection, StatusFilter, VerificationStatus};
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;

/// The main API facade for veridoc operations.
pub struct VeridocApi<S: KeyValueStore> {
    store: RecordStore<S>,
}

impl<S: KeyValueStore> VeridocApi<S> {
    pub fn new(store: RecordStore<S>) -> Self {
        Self { store }
    }

    pub fn upload_document(&mut self, req: commands::upload::UploadRequest) -> Result<CmdResult> {
        commands::upload::run(&mut self.store, req)
    }

    pub fn list_documents(&mut self, search: Option<&str>) -> Result<CmdResult> {
        commands::list::run(&mut self.store, search)
    }

    pub fn view_document(&mut self, id: &str) -> Result<CmdResult> {
        commands::view::run(&mut self.store, id)
    }

    pub fn history(&mut self, filter: StatusFilter, direction: SortDirection) -> Result<CmdResult> {
        commands::history::run(&mut self.store, filter, direction)
    }

    pub fn mark_document(&mut self, id: &str, status: VerificationStatus) -> Result<CmdResult> {
        commands::mark::run(&mut self.store, id, status)
    }

    pub fn session(&self) -> Result<Option<AuthSession>> {
        self.store.load_session()
    }

    pub fn save_session(&mut self, session: &AuthSession) -> Result<()> {
        self.store.save_session(session)
    }

    pub fn clear_session(&mut self) -> Result<()> {
        self.store.clear_session()
    }
}

pub use crate::commands::upload::UploadRequest;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentType;
    use crate::store::memory::InMemoryStore;

    fn api() -> VeridocApi<InMemoryStore> {
        VeridocApi::new(RecordStore::new(InMemoryStore::new()))
    }

    #[test]
    fn dispatches_upload_then_view() {
        let mut api = api();
        let uploaded = api
            .upload_document(UploadRequest {
                doc_type: DocumentType::Birth,
                document_id: "B-99".into(),
                issue_date: "2018-11-05".into(),
                file_name: "birth.pdf".into(),
                file_size: 100,
                file_type: "application/pdf".into(),
            })
            .unwrap();
        let id = uploaded.documents[0].id.clone();

        let viewed = api.view_document(&id).unwrap();
        assert_eq!(viewed.documents[0].document_id, "B-99");
    }

    #[test]
    fn dispatches_history_with_filter() {
        let mut api = api();
        let result = api
            .history(StatusFilter::All, SortDirection::Desc)
            .unwrap();
        assert_eq!(result.history.len(), 15);
    }
}
