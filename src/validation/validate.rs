//! Validation of a catalog before it is offered to the constructor.

use std::collections::HashSet;

use crate::config::MAX_BASE_PERCENT;
use crate::model::{Catalog, Product, ProductGroup, Unit};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }
}

/// Validate references, weights and stock of a catalog.
///
/// Dangling references are errors. Anything the constructor tolerates
/// (clamped weights, default pack weight, groups without stock) is a warning.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut result = ValidationResult::ok();

    let category_ids: HashSet<&str> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
    let product_ids: HashSet<&str> = catalog.products.iter().map(|p| p.id.as_str()).collect();

    for product in &catalog.products {
        if !category_ids.contains(product.category_id.as_str()) {
            result.add_error(format!(
                "Product {}: Category {} not found",
                product.id, product.category_id
            ));
        }

        if product.unit == Unit::Kg && product.avg_pack_weight_grams.unwrap_or(0) == 0 {
            result.add_warning(format!(
                "Product {}: No pack weight, portion price assumes the default",
                product.id
            ));
        }
    }

    let constructor_groups: Vec<&ProductGroup> = catalog
        .groups
        .iter()
        .filter(|g| g.use_in_constructor)
        .collect();

    for group in &catalog.groups {
        for product_id in &group.product_ids {
            if !product_ids.contains(product_id.as_str()) {
                result.add_error(format!(
                    "Group {}: Product {} not found",
                    group.id, product_id
                ));
            }
        }

        if group.base_percent.is_nan()
            || group.base_percent < 0.0
            || group.base_percent > MAX_BASE_PERCENT
        {
            result.add_warning(format!(
                "Group {}: Base percent {} outside 0-100, will be clamped",
                group.id, group.base_percent
            ));
        }
    }

    if constructor_groups.is_empty() {
        result.add_warning("No groups are enabled for the constructor");
        return result;
    }

    let all_zero = constructor_groups
        .iter()
        .all(|g| g.base_percent.is_nan() || g.base_percent <= 0.0);
    if all_zero {
        result.add_warning("All group weights are zero, groups are weighted equally");
    }

    for group in &constructor_groups {
        let has_stock = group
            .product_ids
            .iter()
            .filter_map(|id| catalog.find_product(id))
            .any(|p| is_sellable(catalog, p));
        if !has_stock {
            result.add_warning(format!(
                "Group {}: No active product in stock, group is skipped",
                group.id
            ));
        }
    }

    result
}

/// Active, in stock, with an active category.
fn is_sellable(catalog: &Catalog, product: &Product) -> bool {
    product.is_active
        && product.in_stock()
        && catalog
            .find_category(&product.category_id)
            .is_some_and(|c| c.is_active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Product, ProductGroup};

    fn mentions(messages: &[String], text: &str) -> bool {
        messages.iter().any(|m| m.contains(text))
    }

    fn create_basic_catalog() -> Catalog {
        Catalog {
            categories: vec![Category::new("c1", "Hard")],
            products: vec![Product::new("p1", "Gouda", "c1", 900).with_pack_weight(200)],
            groups: vec![ProductGroup::new("g1", "Hard", 50.0).with_products(["p1"])],
        }
    }

    // ==================== ValidationResult tests ====================

    #[test]
    fn test_validation_result_add_warning() {
        let mut result = ValidationResult::ok();
        result.add_warning("This is a warning");
        assert!(result.passed); // Warnings don't fail validation
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_validation_result_add_error() {
        let mut result = ValidationResult::ok();
        result.add_error("This is an error");
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 1);
    }

    // ==================== validate_catalog tests ====================

    #[test]
    fn test_valid_catalog() {
        let result = validate_catalog(&create_basic_catalog());
        assert!(result.passed);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_unknown_category() {
        let mut catalog = create_basic_catalog();
        catalog.products[0].category_id = "c9".into();
        let result = validate_catalog(&catalog);
        assert!(!result.passed);
        assert!(mentions(&result.errors, "Category c9 not found"));
    }

    #[test]
    fn test_unknown_product_in_group() {
        let mut catalog = create_basic_catalog();
        catalog.groups[0].product_ids.push("p9".into());
        let result = validate_catalog(&catalog);
        assert!(!result.passed);
        assert!(mentions(&result.errors, "Product p9 not found"));
    }

    #[test]
    fn test_weight_out_of_range() {
        let mut catalog = create_basic_catalog();
        catalog.groups[0].base_percent = 120.0;
        let result = validate_catalog(&catalog);
        assert!(result.passed);
        assert!(mentions(&result.warnings, "will be clamped"));
    }

    #[test]
    fn test_zero_weights() {
        let mut catalog = create_basic_catalog();
        catalog.groups[0].base_percent = 0.0;
        let result = validate_catalog(&catalog);
        assert!(mentions(&result.warnings, "weighted equally"));
    }

    #[test]
    fn test_group_without_stock() {
        let mut catalog = create_basic_catalog();
        catalog.products[0].remainder = 0.0;
        let result = validate_catalog(&catalog);
        assert!(result.passed);
        assert!(mentions(&result.warnings, "No active product in stock"));
    }

    #[test]
    fn test_missing_pack_weight() {
        let mut catalog = create_basic_catalog();
        catalog.products[0].avg_pack_weight_grams = None;
        let result = validate_catalog(&catalog);
        assert!(mentions(&result.warnings, "No pack weight"));
    }

    #[test]
    fn test_no_constructor_groups() {
        let mut catalog = create_basic_catalog();
        catalog.groups[0].use_in_constructor = false;
        let result = validate_catalog(&catalog);
        assert!(mentions(&result.warnings, "No groups are enabled"));
    }
}
