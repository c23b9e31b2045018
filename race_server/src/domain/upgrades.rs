// Car upgrade catalog. Upgrades are paid from the team budget; they do not
// feed into race progress.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeCategory {
    Engine,
    Aerodynamics,
    Safety,
    Electronics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upgrade {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: u64,
    pub category: UpgradeCategory,
    /// Display text only.
    pub benefit: &'static str,
}

pub const CATALOG: &[Upgrade] = &[
    Upgrade {
        id: "turbo-engine",
        name: "Turbo Engine Upgrade",
        description: "Increases top speed and acceleration on straights",
        cost: 250_000,
        category: UpgradeCategory::Engine,
        benefit: "+5% Speed Boost",
    },
    Upgrade {
        id: "aero-package",
        name: "Advanced Aerodynamics",
        description: "Improved downforce and cornering performance",
        cost: 180_000,
        category: UpgradeCategory::Aerodynamics,
        benefit: "+3% Cornering",
    },
    Upgrade {
        id: "safety-systems",
        name: "Enhanced Safety Systems",
        description: "Better crash protection and driver confidence",
        cost: 120_000,
        category: UpgradeCategory::Safety,
        benefit: "+2% Reliability",
    },
    Upgrade {
        id: "electronics",
        name: "Advanced Electronics",
        description: "Improved telemetry and race strategy systems",
        cost: 200_000,
        category: UpgradeCategory::Electronics,
        benefit: "+4% Strategy",
    },
    Upgrade {
        id: "carbon-fiber-body",
        name: "Carbon Fiber Body",
        description: "Reduces weight for better performance",
        cost: 300_000,
        category: UpgradeCategory::Aerodynamics,
        benefit: "+6% Overall Performance",
    },
    Upgrade {
        id: "hybrid-system",
        name: "Hybrid Power Unit",
        description: "Energy recovery system for extra power",
        cost: 400_000,
        category: UpgradeCategory::Engine,
        benefit: "+8% Power Output",
    },
];

pub fn find(id: &str) -> Option<&'static Upgrade> {
    CATALOG.iter().find(|upgrade| upgrade.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique_and_costs_in_range() {
        let ids: HashSet<&str> = CATALOG.iter().map(|u| u.id).collect();

        assert_eq!(CATALOG.len(), 6);
        assert_eq!(ids.len(), CATALOG.len());
        assert!(
            CATALOG
                .iter()
                .all(|u| (120_000..=400_000).contains(&u.cost))
        );
    }

    #[test]
    fn find_looks_up_by_id() {
        assert_eq!(find("hybrid-system").map(|u| u.cost), Some(400_000));
        assert!(find("nitro").is_none());
    }
}
