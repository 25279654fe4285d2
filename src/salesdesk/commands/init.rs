use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::{RecordStore, Seed};

pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, seed: &Seed) -> Result<CmdResult> {
    let report = store.init(seed)?;
    let mut result = CmdResult::default();

    for collection in &report.seeded {
        result.add_message(CmdMessage::success(format!(
            "Initialized {} ({} record(s))",
            collection,
            store.len(*collection)
        )));
    }
    for collection in &report.loaded {
        result.add_message(CmdMessage::info(format!(
            "Loaded {} ({} record(s))",
            collection,
            store.len(*collection)
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::StoreFixture;

    #[test]
    fn reinit_only_loads() {
        let mut store = StoreFixture::new().store;
        let result = run(&mut store, &Seed::default()).unwrap();
        assert_eq!(result.messages.len(), 3);
        assert!(result.messages.iter().all(|m| m.content.starts_with("Loaded")));
    }
}
