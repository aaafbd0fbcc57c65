use super::error::CatalogError;
use super::identity::OptionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three resource categories a center can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Cpu,
    Gpu,
    Storage,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 3] = [Self::Cpu, Self::Gpu, Self::Storage];

    /// Unit in which limits and quantities are denominated for metered centers.
    pub fn metered_unit(&self) -> &'static str {
        match self {
            Self::Cpu => "Node-Hours",
            Self::Gpu => "GPU-Hours",
            Self::Storage => "TB",
        }
    }

    /// Unit used by flat-fee centers, which hand out compute in packs.
    pub fn flat_fee_unit(&self) -> &'static str {
        match self {
            Self::Cpu | Self::Gpu => "Packs",
            Self::Storage => "TB",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
            Self::Storage => "storage",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ResourceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "gpu" => Ok(Self::Gpu),
            "storage" => Ok(Self::Storage),
            other => Err(format!("unknown resource category '{}'", other)),
        }
    }
}

/// One billable or capacity-limited resource queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceOption {
    id: OptionId,
    /// Display label, e.g. "General Queue", "Vector Engine".
    name: String,
    /// Upper bound on usage, in the category's natural unit.
    limit: f64,
    /// Unit price in the billing currency. Zero is valid.
    price: f64,
}

impl ResourceOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>, limit: f64, price: f64) -> Self {
        Self {
            id: OptionId::new(id),
            name: name.into(),
            limit,
            price,
        }
    }

    pub fn id(&self) -> &OptionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns a copy of this option carrying a different limit.
    pub fn with_limit(&self, limit: f64) -> Self {
        Self {
            limit,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        check_non_negative(&self.id, "limit", self.limit)?;
        check_non_negative(&self.id, "price", self.price)
    }
}

fn check_non_negative(id: &OptionId, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CatalogError::InvalidAmount {
            option_id: id.clone(),
            field,
            value,
        });
    }
    Ok(())
}
