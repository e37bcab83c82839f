//! Working set of eligible products for one build.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::MAX_BASE_PERCENT;
use crate::error::Result;
use crate::model::{PlateItem, Unit};
use crate::pricing::portion_price;
use crate::repository::{GroupRecord, ProductRecord, ProductRepository};

/// An eligible product, priced once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub unit: Unit,
    pub price: i64,
    /// Pack weight in grams, 0 when unknown.
    pub avg_pack_weight_grams: u32,
    pub remainder: f64,
    pub category_id: String,
    pub category_name: String,
    pub is_mold: bool,
    pub approx_portion_price: i64,
}

impl Candidate {
    /// Build a candidate if the record is eligible.
    fn from_record(record: &ProductRecord, exclude_mold: bool) -> Option<Self> {
        let product = &record.product;
        let category = record.category.as_ref()?;

        if !product.is_active || !category.is_active || !product.in_stock() {
            return None;
        }
        if exclude_mold && category.is_mold {
            return None;
        }

        let avg_pack_weight_grams = product.avg_pack_weight_grams.unwrap_or(0);
        Some(Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            unit: product.unit,
            price: product.price,
            avg_pack_weight_grams,
            remainder: product.remainder,
            category_id: product.category_id.clone(),
            category_name: category.name.clone(),
            is_mold: category.is_mold,
            approx_portion_price: portion_price(
                product.unit,
                product.price,
                Some(avg_pack_weight_grams),
            ),
        })
    }

    /// Project onto a plate item.
    pub fn to_item(&self) -> PlateItem {
        PlateItem {
            id: self.id.clone(),
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            unit: self.unit,
            catalog_price: self.price,
            approx_portion_price: self.approx_portion_price,
            category_id: self.category_id.clone(),
            category_name: self.category_name.clone(),
        }
    }
}

/// A constructor group with at least one eligible candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCandidates {
    pub id: String,
    pub name: String,
    /// Weight clamped into `[0, 100]`.
    pub base_percent: f64,
    /// Indices into [`ConstructorDataset::candidates`], without repeats.
    pub candidates: Vec<usize>,
}

/// A category offered as "favorite" in the constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCategory {
    pub id: String,
    pub name: String,
    pub is_mold: bool,
    pub candidate_count: usize,
}

/// Immutable working set for one build or suggestion batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructorDataset {
    groups: Vec<GroupCandidates>,
    candidates: Vec<Candidate>,
    by_category: HashMap<String, Vec<usize>>,
}

impl ConstructorDataset {
    /// Filter repository groups into a dataset.
    ///
    /// A product shared by several groups becomes a single candidate. Groups
    /// left without candidates are dropped.
    pub fn from_groups(records: &[GroupRecord], exclude_mold: bool) -> Self {
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut index_by_id: HashMap<String, usize> = HashMap::new();
        let mut groups = Vec::new();

        for record in records {
            let mut members: Vec<usize> = Vec::new();

            for product in &record.products {
                let existing = index_by_id.get(&product.product.id).copied();
                let idx = match existing {
                    Some(idx) => idx,
                    None => match Candidate::from_record(product, exclude_mold) {
                        Some(candidate) => {
                            let idx = candidates.len();
                            index_by_id.insert(candidate.id.clone(), idx);
                            candidates.push(candidate);
                            idx
                        }
                        None => continue,
                    },
                };
                if !members.contains(&idx) {
                    members.push(idx);
                }
            }

            if !members.is_empty() {
                groups.push(GroupCandidates {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    base_percent: clamp_base_percent(record.base_percent),
                    candidates: members,
                });
            }
        }

        let mut by_category: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, candidate) in candidates.iter().enumerate() {
            by_category
                .entry(candidate.category_id.clone())
                .or_default()
                .push(idx);
        }

        Self {
            groups,
            candidates,
            by_category,
        }
    }

    /// Non-empty groups in repository order.
    pub fn groups(&self) -> &[GroupCandidates] {
        &self.groups
    }

    /// All distinct candidates.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Get a candidate by index.
    pub fn candidate(&self, idx: usize) -> &Candidate {
        &self.candidates[idx]
    }

    /// Candidate indices for a category (empty if unknown).
    pub fn candidates_in_category(&self, category_id: &str) -> &[usize] {
        self.by_category
            .get(category_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if nothing can be built from this dataset.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty() || self.groups.is_empty()
    }

    /// Categories with at least one candidate, sorted by name.
    pub fn favorite_categories(&self) -> Vec<FavoriteCategory> {
        let mut categories: Vec<FavoriteCategory> = self
            .by_category
            .iter()
            .map(|(id, members)| {
                let first = &self.candidates[members[0]];
                FavoriteCategory {
                    id: id.clone(),
                    name: first.category_name.clone(),
                    is_mold: first.is_mold,
                    candidate_count: members.len(),
                }
            })
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        categories
    }
}

fn clamp_base_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, MAX_BASE_PERCENT)
}

/// Load the constructor dataset from a repository.
///
/// Repository errors propagate; no partial dataset is returned.
pub fn load_dataset<P: ProductRepository + ?Sized>(
    repo: &P,
    exclude_mold: bool,
) -> Result<ConstructorDataset> {
    let records = repo.list_constructor_groups()?;
    let dataset = ConstructorDataset::from_groups(&records, exclude_mold);

    tracing::debug!(
        "Loaded dataset: {} candidate(s) in {} group(s) out of {} (exclude_mold={})",
        dataset.candidates.len(),
        dataset.groups.len(),
        records.len(),
        exclude_mold
    );

    Ok(dataset)
}
