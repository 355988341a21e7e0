//! The record store: the persisted document and verification-history
//! collections and their access rules.
//!
//! Both collections live behind the same [`KeyValueStore`] so every view
//! (upload, list, detail, history) reads and writes one source of truth.
//! When a collection is absent — or its payload fails to parse — the store
//! falls back to demo data: two fixed documents, fifteen generated history
//! entries. Seeding is a policy, not a hard-wired behavior; a production
//! build turns it off with [`RecordStore::with_seeding`] and gets empty
//! collections instead.
//!
//! The document and history collections are populated independently and
//! never reconciled: appending a document writes no history entry, and
//! marking a document does not either. Keeping them separate is
//! deliberate; reconciliation needs product direction.

use super::{KeyValueStore, KEY_ACCESS_TOKEN, KEY_DOCUMENTS, KEY_HISTORY, KEY_USER};
use crate::error::Result;
use crate::model::{
    AuthSession, DocumentRecord, DocumentType, HistoryEntry, SortDirection, StatusFilter,
    UserProfile, VerificationStatus,
};
use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;
use tracing::warn;

const HISTORY_SEED_COUNT: usize = 15;
const HISTORY_SEED_WINDOW_DAYS: i64 = 60;

/// Document and history collections over a key-value backend.
pub struct RecordStore<S: KeyValueStore> {
    backend: S,
    seed_demo_data: bool,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            seed_demo_data: true,
        }
    }

    /// Seeding policy: when disabled, absent collections load as empty
    /// instead of being populated with demo data.
    pub fn with_seeding(mut self, seed_demo_data: bool) -> Self {
        self.seed_demo_data = seed_demo_data;
        self
    }

    /// Load the document collection in insertion order.
    ///
    /// Absence is not an error: an empty store is seeded with two demo
    /// records (when seeding is enabled), persisted, and returned. A
    /// payload that fails to parse is treated the same as absent.
    pub fn load_documents(&mut self) -> Result<Vec<DocumentRecord>> {
        if let Some(raw) = self.backend.get(KEY_DOCUMENTS)? {
            match serde_json::from_str::<Vec<DocumentRecord>>(&raw) {
                Ok(docs) => return Ok(docs),
                Err(e) => {
                    warn!(key = KEY_DOCUMENTS, error = %e, "corrupt payload, reseeding");
                }
            }
        }

        let docs = if self.seed_demo_data {
            demo_documents()
        } else {
            Vec::new()
        };
        self.save_documents(&docs)?;
        Ok(docs)
    }

    /// Append a record at the end of the collection, preserving insertion
    /// order. Uniqueness of `record.id` is the caller's responsibility.
    pub fn append_document(&mut self, record: DocumentRecord) -> Result<()> {
        let mut docs = self.load_documents()?;
        docs.push(record);
        self.save_documents(&docs)
    }

    /// Linear scan by id. `None` is a normal outcome (the not-found view),
    /// never an error — including on an empty store.
    pub fn lookup_document(&mut self, id: &str) -> Result<Option<DocumentRecord>> {
        let docs = self.load_documents()?;
        Ok(docs.into_iter().find(|d| d.id == id))
    }

    /// Apply an out-of-band status transition from the verification
    /// backend. Returns the updated record, or `None` for an unknown id.
    /// No history entry is written.
    pub fn update_status(
        &mut self,
        id: &str,
        status: VerificationStatus,
    ) -> Result<Option<DocumentRecord>> {
        let mut docs = self.load_documents()?;
        let updated = match docs.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                doc.status = status;
                Some(doc.clone())
            }
            None => None,
        };
        if updated.is_some() {
            self.save_documents(&docs)?;
        }
        Ok(updated)
    }

    /// Load the verification history, newest first.
    ///
    /// Absent or corrupt payloads are replaced by a generated set of
    /// [`HISTORY_SEED_COUNT`] pseudo-random entries within the last
    /// [`HISTORY_SEED_WINDOW_DAYS`] days (when seeding is enabled).
    pub fn load_history(&mut self) -> Result<Vec<HistoryEntry>> {
        if let Some(raw) = self.backend.get(KEY_HISTORY)? {
            match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => return Ok(entries),
                Err(e) => {
                    warn!(key = KEY_HISTORY, error = %e, "corrupt payload, reseeding");
                }
            }
        }

        let entries = if self.seed_demo_data {
            sort_history(
                generate_history(&mut rand::thread_rng()),
                SortDirection::Desc,
            )
        } else {
            Vec::new()
        };
        let raw = serde_json::to_string(&entries)?;
        self.backend.set(KEY_HISTORY, &raw)?;
        Ok(entries)
    }

    // --- Session ---

    pub fn save_session(&mut self, session: &AuthSession) -> Result<()> {
        let raw = serde_json::to_string(&session.user)?;
        self.backend.set(KEY_USER, &raw)?;
        self.backend.set(KEY_ACCESS_TOKEN, &session.token)
    }

    pub fn load_session(&self) -> Result<Option<AuthSession>> {
        let token = match self.backend.get(KEY_ACCESS_TOKEN)? {
            Some(t) => t,
            None => return Ok(None),
        };
        let user = match self.backend.get(KEY_USER)? {
            Some(raw) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    warn!(key = KEY_USER, error = %e, "corrupt session profile");
                    return Ok(None);
                }
            },
            None => return Ok(None),
        };
        Ok(Some(AuthSession { user, token }))
    }

    pub fn clear_session(&mut self) -> Result<()> {
        self.backend.remove(KEY_USER)?;
        self.backend.remove(KEY_ACCESS_TOKEN)
    }

    fn save_documents(&mut self, docs: &[DocumentRecord]) -> Result<()> {
        let raw = serde_json::to_string(docs)?;
        self.backend.set(KEY_DOCUMENTS, &raw)
    }
}

/// The two fixed demo records an empty store is seeded with.
pub fn demo_documents() -> Vec<DocumentRecord> {
    let now = Utc::now();
    vec![
        DocumentRecord {
            id: "doc-1".to_string(),
            doc_type: DocumentType::Pan,
            document_id: "ABCDE1234F".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2022, 5, 15).unwrap(),
            file_name: "pan_card.pdf".to_string(),
            file_size: 245_120,
            file_type: "application/pdf".to_string(),
            upload_date: now - Duration::days(7),
            status: VerificationStatus::Verified,
        },
        DocumentRecord {
            id: "doc-2".to_string(),
            doc_type: DocumentType::Aadhar,
            document_id: "1234 5678 9012".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2021, 8, 22).unwrap(),
            file_name: "aadhar_card.pdf".to_string(),
            file_size: 512_000,
            file_type: "application/pdf".to_string(),
            upload_date: now - Duration::days(14),
            status: VerificationStatus::Pending,
        },
    ]
}

/// Generate the demo verification history: uniformly random type and
/// status, verification date uniformly within the last 60 days.
pub fn generate_history<R: Rng>(rng: &mut R) -> Vec<HistoryEntry> {
    let now = Utc::now();
    (0..HISTORY_SEED_COUNT)
        .map(|i| {
            let doc_type = DocumentType::ALL[rng.gen_range(0..DocumentType::ALL.len())];
            let status = VerificationStatus::ALL[rng.gen_range(0..VerificationStatus::ALL.len())];
            let days_ago = rng.gen_range(0..HISTORY_SEED_WINDOW_DAYS);
            HistoryEntry {
                id: format!("hist-{}", i + 1),
                document_id: format!("doc-{}", i + 1),
                document_type: doc_type,
                verification_date: now - Duration::days(days_ago),
                status,
                document_name: format!(
                    "{}_{}.pdf",
                    doc_type.display_name().replace(' ', "_"),
                    rng.gen_range(0..10_000)
                ),
            }
        })
        .collect()
}

/// Keep only entries matching the filter; identity for `All`. Relative
/// order is preserved.
pub fn filter_history(entries: Vec<HistoryEntry>, filter: StatusFilter) -> Vec<HistoryEntry> {
    match filter {
        StatusFilter::All => entries,
        StatusFilter::Status(status) => entries
            .into_iter()
            .filter(|e| e.status == status)
            .collect(),
    }
}

/// Stable sort by verification date. Entries with equal timestamps keep
/// their pre-sort relative order.
pub fn sort_history(mut entries: Vec<HistoryEntry>, direction: SortDirection) -> Vec<HistoryEntry> {
    match direction {
        SortDirection::Asc => entries.sort_by(|a, b| a.verification_date.cmp(&b.verification_date)),
        SortDirection::Desc => {
            entries.sort_by(|a, b| b.verification_date.cmp(&a.verification_date))
        }
    }
    entries
}
