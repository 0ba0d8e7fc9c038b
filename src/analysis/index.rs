//! Lookup indexes over the input collections.

use crate::models::{Product, Seller, SellerAccumulator};
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::warn;

/// Builds one zeroed accumulator per seller id, in seller-list order.
///
/// A repeated id replaces the earlier accumulator but keeps the position of
/// the first occurrence.
pub fn build_seller_index(sellers: &[Seller]) -> IndexMap<String, SellerAccumulator> {
    let mut index = IndexMap::with_capacity(sellers.len());

    for seller in sellers {
        if index
            .insert(seller.id.clone(), SellerAccumulator::new(seller))
            .is_some()
        {
            warn!("Duplicate seller id '{}', keeping the last entry", seller.id);
        }
    }

    index
}

/// Indexes the product catalog by sku. The last entry for a repeated sku wins.
pub fn build_product_index(products: &[Product]) -> HashMap<&str, &Product> {
    let mut index = HashMap::with_capacity(products.len());

    for product in products {
        if index.insert(product.sku.as_str(), product).is_some() {
            warn!("Duplicate product sku '{}', keeping the last entry", product.sku);
        }
    }

    index
}
