//! In-memory repository over a decoded [`Catalog`].

use super::{GroupRecord, ProductRecord, ProductRepository};
use crate::error::Result;
use crate::model::Catalog;

impl ProductRepository for Catalog {
    fn list_constructor_groups(&self) -> Result<Vec<GroupRecord>> {
        let mut groups: Vec<_> = self
            .groups
            .iter()
            .filter(|g| g.use_in_constructor)
            .collect();
        groups.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });

        let records = groups
            .into_iter()
            .map(|group| GroupRecord {
                id: group.id.clone(),
                name: group.name.clone(),
                base_percent: group.base_percent,
                display_order: group.display_order,
                // Dangling product ids are skipped
                products: group
                    .product_ids
                    .iter()
                    .filter_map(|id| self.find_product(id))
                    .map(|product| ProductRecord {
                        product: product.clone(),
                        category: self.find_category(&product.category_id).cloned(),
                    })
                    .collect(),
            })
            .collect();

        Ok(records)
    }
}
