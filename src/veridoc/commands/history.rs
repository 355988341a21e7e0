use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{SortDirection, StatusFilter};
use crate::store::records::{filter_history, sort_history, RecordStore};
use crate::store::KeyValueStore;

/// The history view: load, filter by status, then sort by date.
pub fn run<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    filter: StatusFilter,
    direction: SortDirection,
) -> Result<CmdResult> {
    let entries = store.load_history()?;
    let entries = sort_history(filter_history(entries, filter), direction);
    Ok(CmdResult::default().with_history(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VerificationStatus;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn generates_and_filters() {
        let mut store = RecordStore::new(InMemoryStore::new());
        let all = run(&mut store, StatusFilter::All, SortDirection::Desc).unwrap();
        assert_eq!(all.history.len(), 15);

        let verified = run(
            &mut store,
            StatusFilter::Status(VerificationStatus::Verified),
            SortDirection::Desc,
        )
        .unwrap();
        assert!(verified
            .history
            .iter()
            .all(|e| e.status == VerificationStatus::Verified));
    }

    #[test]
    fn ascending_sort_is_oldest_first() {
        let mut store = RecordStore::new(InMemoryStore::new());
        let result = run(&mut store, StatusFilter::All, SortDirection::Asc).unwrap();
        for pair in result.history.windows(2) {
            assert!(pair[0].verification_date <= pair[1].verification_date);
        }
    }
}
