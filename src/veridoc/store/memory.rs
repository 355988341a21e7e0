use super::KeyValueStore;
use crate::error::Result;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    values: HashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{DocumentRecord, DocumentType, VerificationStatus};
    use crate::store::records::RecordStore;
    use chrono::{Duration, NaiveDate, Utc};

    /// A record with every field filled in, offset so fixtures created in
    /// sequence get distinct, increasing upload dates.
    pub fn document(id: &str, doc_type: DocumentType, status: VerificationStatus) -> DocumentRecord {
        DocumentRecord {
            id: id.to_string(),
            doc_type,
            document_id: format!("{}-{}", doc_type, id),
            issue_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            file_name: format!("{}.pdf", id),
            file_size: 4096,
            file_type: "application/pdf".to_string(),
            upload_date: Utc::now(),
            status,
        }
    }

    pub struct StoreFixture {
        pub store: RecordStore<InMemoryStore>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        /// A store with seeding disabled, so tests start from empty
        /// collections unless they say otherwise.
        pub fn new() -> Self {
            Self {
                store: RecordStore::new(InMemoryStore::new()).with_seeding(false),
            }
        }

        pub fn seeded() -> Self {
            Self {
                store: RecordStore::new(InMemoryStore::new()),
            }
        }

        pub fn with_documents(mut self, count: usize) -> Self {
            for i in 0..count {
                let mut rec = document(
                    &format!("doc-{}", i + 1),
                    DocumentType::ALL[i % DocumentType::ALL.len()],
                    VerificationStatus::Pending,
                );
                rec.upload_date = Utc::now() + Duration::seconds(i as i64);
                self.store.append_document(rec).unwrap();
            }
            self
        }
    }
}
