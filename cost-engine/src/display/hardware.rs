use crate::models::{CenterSpec, ResourceCategory};
use serde::Serialize;

/// Hardware footprint of a number of packs on a flat-fee center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardwareStats {
    pub packs: f64,
    pub node_equivalent: f64,
    pub total_cores: f64,
    pub total_memory_gb: f64,
    /// One pack is one accelerator. Zero for CPU packs.
    pub total_gpus: f64,
    pub accelerator_name: Option<String>,
    pub max_packs_per_vm: u32,
    pub min_vms: u64,
}

impl HardwareStats {
    /// `None` unless the center has a hardware profile for the category and
    /// at least one pack is requested.
    pub fn for_packs(center: &CenterSpec, category: ResourceCategory, packs: f64) -> Option<Self> {
        if packs.is_nan() || packs <= 0.0 {
            return None;
        }
        let node = center.hardware()?.node(category)?;
        if node.packs_per_node == 0 {
            return None;
        }

        let packs_per_node = f64::from(node.packs_per_node);
        let node_equivalent = packs / packs_per_node;
        let is_gpu = category == ResourceCategory::Gpu;

        Some(Self {
            packs,
            node_equivalent,
            total_cores: node_equivalent * f64::from(node.cores_per_node),
            total_memory_gb: node_equivalent * node.memory_per_node_gb,
            total_gpus: if is_gpu { packs } else { 0.0 },
            accelerator_name: if is_gpu {
                node.accelerator_name.clone()
            } else {
                None
            },
            max_packs_per_vm: node.packs_per_node,
            min_vms: (packs / packs_per_node).ceil() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HardwareProfile, NodeProfile};

    fn center() -> CenterSpec {
        CenterSpec::flat_fee("m", "mdx", "").with_hardware(HardwareProfile {
            cpu: NodeProfile {
                total_nodes: 368,
                node_spec: "Xeon Platinum 8368 x2".into(),
                packs_per_node: 152,
                cores_per_node: 76,
                memory_per_node_gb: 256.0,
                accelerator_name: None,
            },
            gpu: NodeProfile {
                total_nodes: 40,
                node_spec: "Xeon Platinum 8368 x2, A100 x8".into(),
                packs_per_node: 8,
                cores_per_node: 76,
                memory_per_node_gb: 512.0,
                accelerator_name: Some("A100".into()),
            },
            storage_info: String::new(),
        })
    }

    #[test]
    fn test_gpu_pack_stats() {
        let stats = HardwareStats::for_packs(&center(), ResourceCategory::Gpu, 12.0).unwrap();
        assert_eq!(stats.node_equivalent, 1.5);
        assert_eq!(stats.total_cores, 114.0);
        assert_eq!(stats.total_memory_gb, 768.0);
        assert_eq!(stats.total_gpus, 12.0);
        assert_eq!(stats.accelerator_name.as_deref(), Some("A100"));
        assert_eq!(stats.min_vms, 2);
    }

    #[test]
    fn test_cpu_pack_stats() {
        let stats = HardwareStats::for_packs(&center(), ResourceCategory::Cpu, 76.0).unwrap();
        assert_eq!(stats.node_equivalent, 0.5);
        assert_eq!(stats.total_gpus, 0.0);
        assert_eq!(stats.min_vms, 1);
    }

    #[test]
    fn test_no_stats_without_packs_or_profile() {
        assert!(HardwareStats::for_packs(&center(), ResourceCategory::Cpu, 0.0).is_none());
        assert!(HardwareStats::for_packs(&center(), ResourceCategory::Storage, 5.0).is_none());
        let bare = CenterSpec::flat_fee("n", "n", "");
        assert!(HardwareStats::for_packs(&bare, ResourceCategory::Gpu, 5.0).is_none());
    }
}
