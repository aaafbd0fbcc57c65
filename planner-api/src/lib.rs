pub mod model;

pub use model::catalog::Catalog;
pub use model::center::{CenterClass, CenterKind, CenterSpec, HardwareProfile, NodeProfile};
pub use model::cost::CostBreakdown;
pub use model::error::{CatalogError, RequestError};
pub use model::identity::{CenterId, OptionId};
pub use model::option::{ResourceCategory, ResourceOption};
pub use model::request::{RequestKind, ResourceRequest, Selections};

pub mod prelude {
    pub use crate::model::catalog::Catalog;
    pub use crate::model::center::{CenterClass, CenterKind, CenterSpec};
    pub use crate::model::identity::{CenterId, OptionId};
    pub use crate::model::option::{ResourceCategory, ResourceOption};
    pub use crate::model::request::ResourceRequest;
}
