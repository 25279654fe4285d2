use crate::aggregate;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_dashboard(aggregate::dashboard(store.tables())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaymentStatus;
    use crate::store::fixtures::StoreFixture;
    use rust_decimal_macros::dec;

    #[test]
    fn computes_from_current_contents() {
        let store = StoreFixture::new()
            .with_product("Widget", dec!(10))
            .with_client("Ana", PaymentStatus::Pending)
            .with_sale(1, 1, dec!(30), PaymentStatus::Paid)
            .store;

        let dash = run(&store).unwrap().dashboard.unwrap();
        assert_eq!(dash.total_received, dec!(30));
        assert_eq!(dash.sale_count, 1);
        assert_eq!(dash.outstanding_clients.len(), 1);
        assert_eq!(dash.revenue_by_product[0].name, "Widget");
    }
}
