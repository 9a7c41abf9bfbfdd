//! The catalog as an addressable collection: records in file order plus an
//! index by website SKU.

use std::collections::HashMap;

use crate::products::ProductRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<ProductRecord>,
    by_sku: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl Catalog {
    /// Builds the collection and its SKU index. When a SKU repeats, the
    /// first occurrence is the one `get` returns; later ones are listed by
    /// [`Catalog::duplicate_skus`]. Records with an empty SKU are kept but
    /// not indexed.
    #[must_use]
    pub fn from_records(records: Vec<ProductRecord>) -> Self {
        let mut by_sku = HashMap::with_capacity(records.len());
        let mut duplicates = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            if record.website_sku().is_empty() {
                continue;
            }
            if by_sku.contains_key(record.website_sku()) {
                duplicates.push(record.website_sku().to_string());
            } else {
                by_sku.insert(record.website_sku().to_string(), idx);
            }
        }
        Self {
            records,
            by_sku,
            duplicates,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, sku: &str) -> Option<&ProductRecord> {
        self.by_sku.get(sku).map(|&idx| &self.records[idx])
    }

    #[must_use]
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductRecord> {
        self.records.iter()
    }

    /// Records whose category equals `bottle_category`, in file order.
    pub fn bottles<'a>(
        &'a self,
        bottle_category: &'a str,
    ) -> impl Iterator<Item = &'a ProductRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.category() == bottle_category)
    }

    /// SKUs that appear more than once, in the order their repeats occur.
    #[must_use]
    pub fn duplicate_skus(&self) -> &[String] {
        &self.duplicates
    }

    #[must_use]
    pub fn into_records(self) -> Vec<ProductRecord> {
        self.records
    }
}

impl FromIterator<ProductRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ProductRecord;
    type IntoIter = std::slice::Iter<'a, ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
