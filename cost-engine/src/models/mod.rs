pub mod config;
pub mod error;

pub use self::config::*;
pub use self::error::*;

pub use planner::{
    Catalog, CatalogError, CenterClass, CenterId, CenterKind, CenterSpec, CostBreakdown,
    HardwareProfile, NodeProfile, OptionId, RequestError, RequestKind, ResourceCategory,
    ResourceOption, ResourceRequest, Selections,
};
