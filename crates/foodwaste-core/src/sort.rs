use crate::model::Store;

/// Reorders a store's products by stock, largest first.
///
/// The sort is stable, so products with equal stock keep the order the API
/// returned them in. No other field of the store is touched.
#[must_use]
pub fn sort_by_stock(mut store: Store) -> Store {
    store
        .products
        .sort_by(|a, b| b.stock_sort_key().cmp(&a.stock_sort_key()));
    store
}

/// Applies [`sort_by_stock`] to every store, preserving store order.
#[must_use]
pub fn sort_stores(stores: Vec<Store>) -> Vec<Store> {
    stores.into_iter().map(sort_by_stock).collect()
}
