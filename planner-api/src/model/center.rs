use super::identity::CenterId;
use super::option::{ResourceCategory, ResourceOption};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hardware description of one node type at a flat-fee center.
/// Purely informational, the cost engine never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeProfile {
    pub total_nodes: u32,
    /// Free-form description, e.g. "Xeon Platinum 8480+ x2".
    #[serde(default)]
    pub node_spec: String,
    pub packs_per_node: u32,
    /// Physical cores per node.
    pub cores_per_node: u32,
    pub memory_per_node_gb: f64,
    /// e.g. "A100", "H200". Only set for accelerator nodes.
    #[serde(default)]
    pub accelerator_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareProfile {
    pub cpu: NodeProfile,
    pub gpu: NodeProfile,
    #[serde(default)]
    pub storage_info: String,
}

impl HardwareProfile {
    /// Node profile backing a category. Storage has none.
    pub fn node(&self, category: ResourceCategory) -> Option<&NodeProfile> {
        match category {
            ResourceCategory::Cpu => Some(&self.cpu),
            ResourceCategory::Gpu => Some(&self.gpu),
            ResourceCategory::Storage => None,
        }
    }
}

/// Billing class of a center. Closed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CenterClass {
    /// Pay-per-use, unit priced, individually limited (HPCI).
    #[serde(rename = "HPCI")]
    Metered,
    /// Activation draws the whole shared pool (mdx).
    #[serde(rename = "mdx")]
    FlatFee {
        #[serde(default)]
        hardware: Option<HardwareProfile>,
    },
}

/// Payload-free discriminant of [`CenterClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CenterKind {
    Metered,
    FlatFee,
}

impl fmt::Display for CenterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metered => write!(f, "HPCI"),
            Self::FlatFee => write!(f, "mdx"),
        }
    }
}

/// One computing facility and the resources it offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterSpec {
    id: CenterId,
    name: String,
    #[serde(default)]
    description: String,
    class: CenterClass,
    #[serde(default)]
    cpu_options: Vec<ResourceOption>,
    #[serde(default)]
    gpu_options: Vec<ResourceOption>,
    #[serde(default)]
    storage_options: Vec<ResourceOption>,
}

impl CenterSpec {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        class: CenterClass,
    ) -> Self {
        Self {
            id: CenterId::new(id),
            name: name.into(),
            description: description.into(),
            class,
            cpu_options: Vec::new(),
            gpu_options: Vec::new(),
            storage_options: Vec::new(),
        }
    }

    pub fn metered(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(id, name, description, CenterClass::Metered)
    }

    pub fn flat_fee(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(id, name, description, CenterClass::FlatFee { hardware: None })
    }

    pub fn with_options(mut self, category: ResourceCategory, options: Vec<ResourceOption>) -> Self {
        *self.options_mut(category) = options;
        self
    }

    pub fn with_hardware(mut self, profile: HardwareProfile) -> Self {
        if let CenterClass::FlatFee { hardware } = &mut self.class {
            *hardware = Some(profile);
        }
        self
    }

    pub fn id(&self) -> &CenterId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn class(&self) -> &CenterClass {
        &self.class
    }

    pub fn kind(&self) -> CenterKind {
        match self.class {
            CenterClass::Metered => CenterKind::Metered,
            CenterClass::FlatFee { .. } => CenterKind::FlatFee,
        }
    }

    pub fn is_metered(&self) -> bool {
        self.kind() == CenterKind::Metered
    }

    pub fn hardware(&self) -> Option<&HardwareProfile> {
        match &self.class {
            CenterClass::FlatFee { hardware } => hardware.as_ref(),
            CenterClass::Metered => None,
        }
    }

    pub fn options(&self, category: ResourceCategory) -> &[ResourceOption] {
        match category {
            ResourceCategory::Cpu => &self.cpu_options,
            ResourceCategory::Gpu => &self.gpu_options,
            ResourceCategory::Storage => &self.storage_options,
        }
    }

    pub fn options_mut(&mut self, category: ResourceCategory) -> &mut Vec<ResourceOption> {
        match category {
            ResourceCategory::Cpu => &mut self.cpu_options,
            ResourceCategory::Gpu => &mut self.gpu_options,
            ResourceCategory::Storage => &mut self.storage_options,
        }
    }

    /// All options of all categories, in category order.
    pub fn all_options(&self) -> impl Iterator<Item = (ResourceCategory, &ResourceOption)> {
        ResourceCategory::ALL
            .into_iter()
            .flat_map(move |category| self.options(category).iter().map(move |o| (category, o)))
    }

    pub fn unit(&self, category: ResourceCategory) -> &'static str {
        match self.kind() {
            CenterKind::Metered => category.metered_unit(),
            CenterKind::FlatFee => category.flat_fee_unit(),
        }
    }
}
