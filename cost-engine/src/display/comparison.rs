use crate::models::{Catalog, CenterId, CenterKind, OptionId, ResourceCategory};
use serde::Serialize;

/// One option, flattened for side-by-side comparison across centers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub center_id: CenterId,
    pub center_name: String,
    pub option_id: OptionId,
    pub option_name: String,
    pub limit: f64,
    pub price: f64,
}

/// Every metered option of one category, in catalog order.
pub fn comparison_rows(catalog: &Catalog, category: ResourceCategory) -> Vec<ComparisonRow> {
    catalog
        .centers()
        .filter(|c| c.kind() == CenterKind::Metered)
        .flat_map(|c| {
            c.options(category).iter().map(move |o| ComparisonRow {
                center_id: c.id().clone(),
                center_name: c.name().to_string(),
                option_id: o.id().clone(),
                option_name: o.name().to_string(),
                limit: o.limit(),
                price: o.price(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_catalog;

    #[test]
    fn test_gpu_rows_skip_flat_fee_and_gpu_less_centers() {
        let rows = comparison_rows(&default_catalog(), ResourceCategory::Gpu);
        assert!(rows.iter().all(|r| !r.center_id.as_str().starts_with("mdx")));
        assert!(rows.iter().all(|r| r.center_id.as_str() != "hpci-tohoku"));
        assert_eq!(rows[0].option_id.as_str(), "hok-gpu-1");
        // Hokkaido, Tokyo x3, Science Tokyo, Nagoya, Osaka.
        assert_eq!(rows.len(), 7);
    }
}
