//! Built-in catalog: the HPCI and mdx reference table.

use crate::models::{Catalog, CenterSpec, ResourceCategory, ResourceOption};

fn opt(id: &str, name: &str, limit: f64, price: f64) -> ResourceOption {
    ResourceOption::new(id, name, limit, price)
}

fn center(
    spec: CenterSpec,
    cpu: Vec<ResourceOption>,
    gpu: Vec<ResourceOption>,
    storage: Vec<ResourceOption>,
) -> CenterSpec {
    spec.with_options(ResourceCategory::Cpu, cpu)
        .with_options(ResourceCategory::Gpu, gpu)
        .with_options(ResourceCategory::Storage, storage)
}

pub fn default_centers() -> Vec<CenterSpec> {
    vec![
        center(
            CenterSpec::metered("hpci-hokkaido", "Hokkaido University", "Grand Chariot"),
            vec![opt("hok-cpu-1", "General", 42000.0, 18.0)],
            vec![opt("hok-gpu-1", "GPU Queue", 13000.0, 56.0)],
            vec![opt("hok-str-1", "Storage", 40.0, 7500.0)],
        ),
        center(
            CenterSpec::metered("hpci-tohoku", "Tohoku University", "AOBA"),
            vec![
                opt("toh-cpu-1", "Type A", 40000.0, 75.0),
                opt("toh-cpu-2", "Type B", 136000.0, 22.0),
                opt("toh-cpu-3", "Type C", 30000.0, 100.0),
            ],
            vec![],
            vec![
                opt("toh-str-1", "Storage A", 150.0, 3000.0),
                opt("toh-str-2", "Storage B", 300.0, 3000.0),
            ],
        ),
        center(
            CenterSpec::metered("hpci-tokyo", "University of Tokyo", "Wisteria/BDEC-01"),
            vec![
                opt("tok-cpu-1", "Odyssey", 276480.0, 10.0),
                opt("tok-cpu-2", "Miyabi-C (Xeon Max 9480)", 103680.0, 28.0),
            ],
            vec![
                opt("tok-gpu-1", "Aquarius: Shared Use", 95040.0, 31.0),
                opt("tok-gpu-2", "Aquarius: Occupied Use", 69120.0, 42.0),
                opt("tok-gpu-3", "Miyabi-G (GH200)", 86400.0, 35.0),
            ],
            vec![
                opt("tok-str-1", "Storage A", 100.0, 6480.0),
                opt("tok-str-2", "Storage B", 50.0, 6480.0),
            ],
        ),
        center(
            CenterSpec::metered("hpci-science-tokyo", "Science Tokyo (Tokyo Tech)", "TSUBAME4.0"),
            vec![],
            vec![opt("st-gpu-1", "GPU Node", 34000.0, 275.0)],
            vec![opt("st-str-1", "Storage", 103.0, 1650.0)],
        ),
        center(
            CenterSpec::metered("hpci-nagoya", "Nagoya University", "Flow"),
            vec![opt("nag-cpu-1", "Type I", 24590.0, 122.0)],
            vec![opt("nag-gpu-1", "Type II (GPU)", 9490.0, 316.0)],
            vec![opt("nag-str-1", "Storage", 600.0, 3500.0)],
        ),
        center(
            CenterSpec::metered("hpci-osaka", "Osaka University", "SQUID"),
            vec![
                opt("osa-cpu-1", "SQUID General Purpose", 114000.0, 70.0),
                opt("osa-cpu-2", "OCTOPUS General Purpose", 65000.0, 70.0),
                opt("osa-cpu-3", "SQUID Vector", 30000.0, 70.0),
            ],
            vec![opt("osa-gpu-1", "SQUID GPU", 18000.0, 220.0)],
            vec![
                opt("osa-str-1", "Storage A", 500.0, 12000.0),
                opt("osa-str-2", "Storage B", 100.0, 12000.0),
                opt("osa-str-3", "Storage C", 80.0, 12000.0),
            ],
        ),
        center(
            CenterSpec::metered("hpci-kyoto", "Kyoto University", "Camphor 3"),
            vec![
                opt("kyo-cpu-1", "Type A", 144230.0, 21.0),
                opt("kyo-cpu-2", "Type B", 56074.0, 54.0),
            ],
            vec![],
            vec![
                opt("kyo-str-1", "Storage A", 1000.0, 1000.0),
                opt("kyo-str-2", "Storage B", 100.0, 5000.0),
            ],
        ),
        center(
            CenterSpec::metered("hpci-kyushu", "Kyushu University", "ITO"),
            vec![
                opt("kyu-cpu-1", "Subsystem A", 16000.0, 30.0),
                opt("kyu-cpu-2", "Subsystem B", 4000.0, 120.0),
            ],
            vec![],
            vec![
                opt("kyu-str-1", "Storage A", 100.0, 9000.0),
                opt("kyu-str-2", "Storage B", 10.0, 9000.0),
            ],
        ),
        center(
            CenterSpec::flat_fee("mdx-tokyo", "mdx-I (Tokyo)", "Kashiwa II (Xeon Gold/V100)"),
            vec![opt("mdx-t-cpu-1", "CPU Pack (16 vCPU, 32GB)", 50000.0, 40.0)],
            vec![opt("mdx-t-gpu-1", "GPU Pack (1x V100)", 10000.0, 200.0)],
            vec![opt("mdx-t-str-1", "Storage", 500.0, 5000.0)],
        ),
        center(
            CenterSpec::flat_fee(
                "mdx-osaka",
                "mdx-II (Osaka)",
                "Grand Front Osaka (Xeon Platinum/H100)",
            ),
            vec![opt("mdx-o-cpu-1", "CPU Pack (High Perf.)", 50000.0, 50.0)],
            vec![opt("mdx-o-gpu-1", "GPU Pack (1x H100)", 10000.0, 300.0)],
            vec![opt("mdx-o-str-1", "Storage", 500.0, 5000.0)],
        ),
    ]
}

/// The reference table as a validated catalog.
pub fn default_catalog() -> Catalog {
    Catalog::try_new(default_centers()).expect("built-in catalog is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CenterKind;

    #[test]
    fn test_seed_shape() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 10);
        let flat_fee = catalog
            .centers()
            .filter(|c| c.kind() == CenterKind::FlatFee)
            .count();
        assert_eq!(flat_fee, 2);
    }
}
