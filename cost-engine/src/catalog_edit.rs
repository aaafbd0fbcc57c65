use crate::models::{Catalog, CatalogError, CenterId, OptionId, ResourceCategory};
use log::info;

/// Copy-on-write limit edit. Returns a new catalog in which only the named
/// option's limit differs; every other center is shared with the input.
pub fn set_option_limit(
    catalog: &Catalog,
    center_id: &CenterId,
    category: ResourceCategory,
    option_id: &OptionId,
    new_limit: f64,
) -> Result<Catalog, CatalogError> {
    if !new_limit.is_finite() || new_limit < 0.0 {
        return Err(CatalogError::InvalidLimit(new_limit));
    }

    let center = catalog
        .get(center_id)
        .ok_or_else(|| CatalogError::UnknownCenter(center_id.clone()))?;

    let index = center
        .options(category)
        .iter()
        .position(|o| o.id() == option_id)
        .ok_or_else(|| CatalogError::UnknownOption {
            center_id: center_id.clone(),
            category,
            option_id: option_id.clone(),
        })?;

    let mut edited = center.clone();
    let option = &mut edited.options_mut(category)[index];
    let old_limit = option.limit();
    *option = option.with_limit(new_limit);

    info!(
        "Limit of {} / {} changed: {} -> {}",
        center_id, option_id, old_limit, new_limit
    );
    catalog.with_replaced(edited)
}
