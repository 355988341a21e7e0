use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::records::RecordStore;
use crate::store::KeyValueStore;

/// List the document collection, optionally narrowed by a case-insensitive
/// search over type name, document id, and file name — the same fields the
/// documents view matches against.
pub fn run<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    search: Option<&str>,
) -> Result<CmdResult> {
    let docs = store.load_documents()?;

    let listed = match search {
        Some(term) if !term.trim().is_empty() => {
            let term = term.to_lowercase();
            docs.into_iter()
                .filter(|d| {
                    d.doc_type.display_name().to_lowercase().contains(&term)
                        || d.document_id.to_lowercase().contains(&term)
                        || d.file_name.to_lowercase().contains(&term)
                })
                .collect()
        }
        _ => docs,
    };

    Ok(CmdResult::default().with_documents(listed))
}
