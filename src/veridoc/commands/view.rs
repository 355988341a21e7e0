use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;

/// Look up one document by id. An unknown id is the not-found view, not an
/// error: the result carries a warning and no documents.
pub fn run<S: KeyValueStore>(store: &mut RecordStore<S>, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.lookup_document(id)? {
        Some(doc) => result.documents.push(doc),
        None => result.add_message(CmdMessage::warning(format!("Document not found: {}", id))),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn unknown_id_is_a_warning_not_an_error() {
        let mut store = RecordStore::new(InMemoryStore::new()).with_seeding(false);
        let result = run(&mut store, "doc-404").unwrap();
        assert!(result.documents.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn seeded_document_resolves() {
        let mut fixture = crate::store::memory::fixtures::StoreFixture::seeded();
        let result = run(&mut fixture.store, "doc-1").unwrap();
        assert_eq!(result.documents.len(), 1);
        assert_eq!(result.documents[0].id, "doc-1");
    }
}
