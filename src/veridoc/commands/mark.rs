use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::VerificationStatus;
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;

/// Apply a status transition reported by the verification backend. This is
/// the only code path that moves a record out of `pending`; no history
/// entry is written (the two collections stay independent).
pub fn run<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    id: &str,
    status: VerificationStatus,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.update_status(id, status)? {
        Some(doc) => {
            result.add_message(CmdMessage::success(format!(
                "Document {} marked {}",
                doc.id, doc.status
            )));
            result.documents.push(doc);
        }
        None => result.add_message(CmdMessage::warning(format!("Document not found: {}", id))),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn marking_updates_the_stored_record() {
        let mut store = RecordStore::new(InMemoryStore::new());
        store.load_documents().unwrap();

        let result = run(&mut store, "doc-2", VerificationStatus::Rejected).unwrap();
        assert_eq!(result.documents.len(), 1);
        assert_eq!(result.documents[0].status, VerificationStatus::Rejected);
    }

    #[test]
    fn marking_never_touches_history() {
        let mut store = RecordStore::new(InMemoryStore::new());
        store.load_documents().unwrap();
        let before = store.load_history().unwrap();

        run(&mut store, "doc-1", VerificationStatus::Rejected).unwrap();

        let after = store.load_history().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn unknown_id_is_a_warning() {
        let mut store = RecordStore::new(InMemoryStore::new()).with_seeding(false);
        let result = run(&mut store, "doc-404", VerificationStatus::Verified).unwrap();
        assert!(result.documents.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
