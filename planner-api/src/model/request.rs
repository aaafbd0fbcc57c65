use super::center::{CenterKind, CenterSpec};
use super::error::RequestError;
use super::identity::{CenterId, OptionId};
use super::option::ResourceCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Class-specific part of a request. A metered request has no activation
/// flag at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RequestKind {
    Metered,
    FlatFee { active: bool },
}

/// Quantities chosen per option id. Absent keys mean zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SelectionMaps")]
pub struct Selections {
    cpu: BTreeMap<OptionId, f64>,
    gpu: BTreeMap<OptionId, f64>,
    storage: BTreeMap<OptionId, f64>,
}

#[derive(Deserialize)]
struct SelectionMaps {
    #[serde(default)]
    cpu: BTreeMap<OptionId, f64>,
    #[serde(default)]
    gpu: BTreeMap<OptionId, f64>,
    #[serde(default)]
    storage: BTreeMap<OptionId, f64>,
}

impl TryFrom<SelectionMaps> for Selections {
    type Error = RequestError;

    fn try_from(maps: SelectionMaps) -> Result<Self, Self::Error> {
        let all = maps.cpu.values().chain(maps.gpu.values()).chain(maps.storage.values());
        if let Some(bad) = all.copied().find(|q| !q.is_finite() || *q < 0.0) {
            return Err(RequestError::InvalidQuantity(bad));
        }
        Ok(Self {
            cpu: maps.cpu,
            gpu: maps.gpu,
            storage: maps.storage,
        })
    }
}

impl Selections {
    pub fn category(&self, category: ResourceCategory) -> &BTreeMap<OptionId, f64> {
        match category {
            ResourceCategory::Cpu => &self.cpu,
            ResourceCategory::Gpu => &self.gpu,
            ResourceCategory::Storage => &self.storage,
        }
    }

    fn category_mut(&mut self, category: ResourceCategory) -> &mut BTreeMap<OptionId, f64> {
        match category {
            ResourceCategory::Cpu => &mut self.cpu,
            ResourceCategory::Gpu => &mut self.gpu,
            ResourceCategory::Storage => &mut self.storage,
        }
    }

    pub fn get(&self, category: ResourceCategory, option_id: &OptionId) -> f64 {
        self.category(category).get(option_id).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.cpu.is_empty() && self.gpu.is_empty() && self.storage.is_empty()
    }
}

/// One center's current selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequest {
    center_id: CenterId,
    kind: RequestKind,
    #[serde(default)]
    selections: Selections,
}

impl ResourceRequest {
    /// Empty request matching the center's class, inactive if flat-fee.
    pub fn empty(center: &CenterSpec) -> Self {
        let kind = match center.kind() {
            CenterKind::Metered => RequestKind::Metered,
            CenterKind::FlatFee => RequestKind::FlatFee { active: false },
        };
        Self {
            center_id: center.id().clone(),
            kind,
            selections: Selections::default(),
        }
    }

    pub fn center_id(&self) -> &CenterId {
        &self.center_id
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Activation flag. Always false for metered requests.
    pub fn is_active(&self) -> bool {
        matches!(self.kind, RequestKind::FlatFee { active: true })
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn quantity(&self, category: ResourceCategory, option_id: &OptionId) -> f64 {
        self.selections.get(category, option_id)
    }

    pub fn set_quantity(
        &mut self,
        category: ResourceCategory,
        option_id: OptionId,
        quantity: f64,
    ) -> Result<(), RequestError> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(RequestError::InvalidQuantity(quantity));
        }
        self.selections.category_mut(category).insert(option_id, quantity);
        Ok(())
    }

    pub fn with_quantity(
        mut self,
        category: ResourceCategory,
        option_id: impl Into<String>,
        quantity: f64,
    ) -> Result<Self, RequestError> {
        self.set_quantity(category, OptionId::new(option_id), quantity)?;
        Ok(self)
    }

    /// Flips the activation flag of a flat-fee request and returns the new
    /// state.
    pub fn toggle_active(&mut self) -> Result<bool, RequestError> {
        match &mut self.kind {
            RequestKind::FlatFee { active } => {
                *active = !*active;
                Ok(*active)
            }
            RequestKind::Metered => Err(RequestError::NotActivatable(self.center_id.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_selection_reads_as_zero() {
        let center = CenterSpec::metered("c1", "Center", "");
        let req = ResourceRequest::empty(&center);
        assert_eq!(req.quantity(ResourceCategory::Storage, &OptionId::new("nope")), 0.0);
        assert!(req.selections().is_empty());
    }

    #[test]
    fn test_metered_request_cannot_be_activated() {
        let center = CenterSpec::metered("c1", "Center", "");
        let mut req = ResourceRequest::empty(&center);
        assert_eq!(
            req.toggle_active(),
            Err(RequestError::NotActivatable(CenterId::new("c1")))
        );
        assert!(!req.is_active());
    }

    #[test]
    fn test_flat_fee_toggle() {
        let center = CenterSpec::flat_fee("m1", "mdx", "");
        let mut req = ResourceRequest::empty(&center);
        assert!(!req.is_active());
        assert_eq!(req.toggle_active(), Ok(true));
        assert!(req.is_active());
        assert_eq!(req.toggle_active(), Ok(false));
    }

    #[test]
    fn test_deserialize_rejects_negative_quantity() {
        let json = r#"{"center_id":"c1","kind":{"type":"Metered"},"selections":{"cpu":{"o1":-2}}}"#;
        assert!(serde_json::from_str::<ResourceRequest>(json).is_err());

        let json = r#"{"center_id":"c1","kind":{"type":"Metered"},"selections":{"gpu":{"o1":2}}}"#;
        let req: ResourceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.quantity(ResourceCategory::Gpu, &OptionId::new("o1")), 2.0);
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let center = CenterSpec::metered("c1", "Center", "");
        let mut req = ResourceRequest::empty(&center);
        let err = req
            .set_quantity(ResourceCategory::Cpu, OptionId::new("o1"), -1.0)
            .unwrap_err();
        assert_eq!(err, RequestError::InvalidQuantity(-1.0));
        assert!(req.selections().is_empty());
    }
}
