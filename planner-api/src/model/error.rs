use super::identity::{CenterId, OptionId};
use super::option::ResourceCategory;
use thiserror::Error;

/// Errors raised while building or editing a catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Unknown center: {0}")]
    UnknownCenter(CenterId),

    #[error("Center {center_id} has no {category} option {option_id}")]
    UnknownOption {
        center_id: CenterId,
        category: ResourceCategory,
        option_id: OptionId,
    },

    #[error("Duplicate center id: {0}")]
    DuplicateCenter(CenterId),

    /// Option ids must be unique across the whole catalog.
    #[error("Duplicate option id: {0}")]
    DuplicateOption(OptionId),

    #[error("Option {option_id}: {field} must be a non-negative number, got {value}")]
    InvalidAmount {
        option_id: OptionId,
        field: &'static str,
        value: f64,
    },

    #[error("Limit must be a non-negative number, got {0}")]
    InvalidLimit(f64),

    #[error("Limit is not a number: '{0}'")]
    UnparsableLimit(String),
}

/// Errors raised while editing a center's request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("No request for center {0}")]
    UnknownCenter(CenterId),

    #[error("Center {0} is metered and cannot be activated")]
    NotActivatable(CenterId),

    #[error("Quantity must be a non-negative number, got {0}")]
    InvalidQuantity(f64),
}
