use super::center::CenterSpec;
use super::error::CatalogError;
use super::identity::CenterId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered, immutable set of centers.
///
/// Centers are held behind `Arc` so that derived catalogs (see
/// [`Catalog::with_replaced`]) share every untouched center with their
/// parent. Cloning a catalog is cheap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CenterSpec>", into = "Vec<CenterSpec>")]
pub struct Catalog {
    centers: Vec<Arc<CenterSpec>>,
}

impl Catalog {
    /// Builds a catalog, checking that center ids and option ids are unique
    /// and that every limit and price is a non-negative number.
    pub fn try_new(centers: Vec<CenterSpec>) -> Result<Self, CatalogError> {
        let catalog = Self {
            centers: centers.into_iter().map(Arc::new).collect(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut center_ids = HashSet::new();
        let mut option_ids = HashSet::new();
        for center in &self.centers {
            if !center_ids.insert(center.id()) {
                return Err(CatalogError::DuplicateCenter(center.id().clone()));
            }
            for (_, option) in center.all_options() {
                option.validate()?;
                if !option_ids.insert(option.id()) {
                    return Err(CatalogError::DuplicateOption(option.id().clone()));
                }
            }
        }
        Ok(())
    }

    pub fn centers(&self) -> impl Iterator<Item = &CenterSpec> {
        self.centers.iter().map(|c| c.as_ref())
    }

    pub fn get(&self, id: &CenterId) -> Option<&CenterSpec> {
        self.shared(id).map(|c| c.as_ref())
    }

    /// Shared handle to a center, for identity comparisons.
    pub fn shared(&self, id: &CenterId) -> Option<&Arc<CenterSpec>> {
        self.centers.iter().find(|c| c.id() == id)
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Returns a new catalog where the center with the same id as `center` is
    /// replaced. Every other center is shared with `self`.
    pub fn with_replaced(&self, center: CenterSpec) -> Result<Self, CatalogError> {
        let index = self
            .centers
            .iter()
            .position(|c| c.id() == center.id())
            .ok_or_else(|| CatalogError::UnknownCenter(center.id().clone()))?;

        let mut centers = self.centers.clone();
        centers[index] = Arc::new(center);
        Ok(Self { centers })
    }
}

impl TryFrom<Vec<CenterSpec>> for Catalog {
    type Error = CatalogError;

    fn try_from(centers: Vec<CenterSpec>) -> Result<Self, Self::Error> {
        Self::try_new(centers)
    }
}

impl From<Catalog> for Vec<CenterSpec> {
    fn from(catalog: Catalog) -> Self {
        catalog.centers.iter().map(|c| c.as_ref().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::identity::OptionId;
    use crate::model::option::{ResourceCategory, ResourceOption};

    fn center(id: &str, option_id: &str) -> CenterSpec {
        CenterSpec::metered(id, id, "").with_options(
            ResourceCategory::Cpu,
            vec![ResourceOption::new(option_id, "General", 100.0, 10.0)],
        )
    }

    #[test]
    fn test_option_ids_unique_across_centers() {
        let err = Catalog::try_new(vec![center("a", "x"), center("b", "x")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateOption(OptionId::new("x")));
    }

    #[test]
    fn test_duplicate_center_rejected() {
        let err = Catalog::try_new(vec![center("a", "x"), center("a", "y")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCenter(CenterId::new("a")));
    }

    #[test]
    fn test_negative_price_rejected() {
        let bad = CenterSpec::metered("a", "a", "").with_options(
            ResourceCategory::Gpu,
            vec![ResourceOption::new("g", "GPU", 10.0, -1.0)],
        );
        assert!(matches!(
            Catalog::try_new(vec![bad]),
            Err(CatalogError::InvalidAmount { field: "price", .. })
        ));
    }

    #[test]
    fn test_with_replaced_shares_untouched_centers() {
        let catalog = Catalog::try_new(vec![center("a", "x"), center("b", "y")]).unwrap();
        let replaced = catalog.with_replaced(center("a", "z")).unwrap();

        let a = CenterId::new("a");
        let b = CenterId::new("b");
        assert!(Arc::ptr_eq(
            catalog.shared(&b).unwrap(),
            replaced.shared(&b).unwrap()
        ));
        assert!(!Arc::ptr_eq(
            catalog.shared(&a).unwrap(),
            replaced.shared(&a).unwrap()
        ));
        // Source catalog untouched.
        assert_eq!(catalog.get(&a).unwrap().options(ResourceCategory::Cpu)[0].id().as_str(), "x");
    }

    #[test]
    fn test_catalog_json_shape() {
        let catalog = Catalog::try_new(vec![center("a", "x")]).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"type\":\"HPCI\""));

        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[
            {"id":"a","name":"A","class":{"type":"HPCI"},
             "cpu_options":[{"id":"x","name":"X","limit":-5,"price":1}]}
        ]"#;
        assert!(serde_json::from_str::<Catalog>(json).is_err());
    }
}
