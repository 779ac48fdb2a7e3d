//! Category index: a read-only derived view over the registry that
//! organizes calculator ids into named groups with UX hints (badges,
//! search terms). Not core logic; discovery endpoints serve it as-is.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub priority: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    pub calculators: &'static [&'static str],
    pub features: &'static [&'static str],
}

pub const GROUPS: &[CategoryGroup] = &[
    CategoryGroup {
        id: "complete_projects",
        name: "Complete Project Calculators",
        icon: "target",
        description: "All-in-one calculators - tile, mortar, grout, waterproofing, labor, and NJ compliance",
        priority: 1,
        badge: Some("RECOMMENDED"),
        calculators: &["integrated_tile_project"],
        features: &[
            "Calculate entire bathroom/kitchen remodel in one go",
            "Intelligent integration - works with floor, wall, shower, or all",
            "Automatic TCNA compliance",
            "NJ HIC contract requirements included",
            "Labor estimates included",
        ],
    },
    CategoryGroup {
        id: "nj_compliance",
        name: "NJ Compliance & Legal",
        icon: "scale",
        description: "Stay compliant with NJ Home Improvement Contractor regulations",
        priority: 2,
        badge: None,
        calculators: &["nj_hic_contract", "nj_sales_tax", "nj_permit_estimator"],
        features: &[
            "NJ HIC #13VH10808800 compliant contracts",
            "Deposit limits per NJ law",
            "Required disclosures",
            "Permit cost estimates by municipality",
        ],
    },
    CategoryGroup {
        id: "estimating",
        name: "Smart Bidding & Pricing",
        icon: "chart",
        description: "Win more contracts with data-driven pricing strategies",
        priority: 3,
        badge: Some("WIN MORE BIDS"),
        calculators: &["competitive_bid_analyzer", "seasonal_pricing_optimizer"],
        features: &[
            "Analyze competitor pricing",
            "Optimize profit margins",
            "Seasonal demand pricing",
            "Win probability calculator",
        ],
    },
    CategoryGroup {
        id: "tile_installation",
        name: "Tile Installation",
        icon: "grid",
        description: "Individual tile, mortar, and installation calculators",
        priority: 4,
        badge: None,
        calculators: &["tile_floor", "large_format_tile", "thinset_mortar"],
        features: &[
            "TCNA-compliant calculations",
            "Waste factor optimization",
            "Trowel size selection",
            "Large format tile support",
        ],
    },
    CategoryGroup {
        id: "waterproofing",
        name: "Waterproofing & Membranes",
        icon: "droplet",
        description: "Keep water where it belongs",
        priority: 5,
        badge: None,
        calculators: &["shower_pan_liner"],
        features: &[
            "Liquid vs sheet membrane",
            "Shower system calculations",
            "TCNA compliant methods",
        ],
    },
    CategoryGroup {
        id: "drywall",
        name: "Drywall & Plaster",
        icon: "brick",
        description: "Drywall, mud, and plaster work",
        priority: 6,
        badge: None,
        calculators: &["drywall_compound"],
        features: &[],
    },
];

/// All groups sorted by priority (ascending).
pub fn all_categories() -> Vec<&'static CategoryGroup> {
    let mut groups: Vec<_> = GROUPS.iter().collect();
    groups.sort_by_key(|group| group.priority);
    groups
}

pub fn category_info(category_id: &str) -> Option<&'static CategoryGroup> {
    GROUPS.iter().find(|group| group.id == category_id)
}

/// The group a calculator belongs to; `"other"` when unlisted.
pub fn category_of(calculator_id: &str) -> &'static str {
    GROUPS
        .iter()
        .find(|group| group.calculators.contains(&calculator_id))
        .map_or("other", |group| group.id)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CalculatorMeta {
    pub difficulty: &'static str,
    pub time: &'static str,
    pub tcna_compliant: bool,
    pub tags: &'static [&'static str],
    pub new: bool,
    pub featured: bool,
}

pub fn calculator_meta(calculator_id: &str) -> Option<CalculatorMeta> {
    let meta = match calculator_id {
        "integrated_tile_project" => CalculatorMeta {
            difficulty: "medium",
            time: "5 min",
            tcna_compliant: true,
            tags: &["tile", "complete", "popular"],
            new: false,
            featured: true,
        },
        "tile_floor" => CalculatorMeta {
            difficulty: "easy",
            time: "2 min",
            tcna_compliant: true,
            tags: &["tile", "floor", "popular"],
            new: false,
            featured: false,
        },
        "thinset_mortar" => CalculatorMeta {
            difficulty: "easy",
            time: "2 min",
            tcna_compliant: true,
            tags: &["tile", "mortar"],
            new: false,
            featured: false,
        },
        "large_format_tile" => CalculatorMeta {
            difficulty: "medium",
            time: "3 min",
            tcna_compliant: true,
            tags: &["tile", "large-format", "premium"],
            new: true,
            featured: false,
        },
        "shower_pan_liner" => CalculatorMeta {
            difficulty: "medium",
            time: "3 min",
            tcna_compliant: true,
            tags: &["waterproofing", "shower"],
            new: false,
            featured: false,
        },
        "drywall_compound" => CalculatorMeta {
            difficulty: "easy",
            time: "2 min",
            tcna_compliant: false,
            tags: &["drywall", "popular"],
            new: false,
            featured: false,
        },
        "nj_hic_contract" => CalculatorMeta {
            difficulty: "easy",
            time: "5 min",
            tcna_compliant: false,
            tags: &["nj", "legal", "contract", "compliance"],
            new: true,
            featured: true,
        },
        "nj_sales_tax" => CalculatorMeta {
            difficulty: "easy",
            time: "1 min",
            tcna_compliant: false,
            tags: &["nj", "tax", "compliance"],
            new: true,
            featured: true,
        },
        "nj_permit_estimator" => CalculatorMeta {
            difficulty: "medium",
            time: "5 min",
            tcna_compliant: false,
            tags: &["nj", "permit", "compliance"],
            new: true,
            featured: true,
        },
        "competitive_bid_analyzer" => CalculatorMeta {
            difficulty: "medium",
            time: "3 min",
            tcna_compliant: false,
            tags: &["bidding", "pricing"],
            new: false,
            featured: false,
        },
        "seasonal_pricing_optimizer" => CalculatorMeta {
            difficulty: "easy",
            time: "2 min",
            tcna_compliant: false,
            tags: &["pricing", "seasonal"],
            new: false,
            featured: false,
        },
        _ => return None,
    };
    Some(meta)
}

/// Badge precedence: NEW, then FEATURED, then POPULAR, then PRO.
pub fn badge_for(calculator_id: &str) -> &'static str {
    let Some(meta) = calculator_meta(calculator_id) else {
        return "";
    };
    if meta.new {
        "NEW"
    } else if meta.featured {
        "FEATURED"
    } else if meta.tags.contains(&"popular") {
        "POPULAR"
    } else if meta.difficulty == "advanced" {
        "PRO"
    } else {
        ""
    }
}

/// Lowercased searchable terms: id words, category id and name, tags.
pub fn search_terms_for(calculator_id: &str) -> Vec<String> {
    let category = category_of(calculator_id);
    let mut terms = vec![calculator_id.replace('_', " "), category.to_string()];
    if let Some(info) = category_info(category) {
        terms.push(info.name.to_string());
    }
    if let Some(meta) = calculator_meta(calculator_id) {
        terms.extend(meta.tags.iter().map(|tag| (*tag).to_string()));
    }
    terms.retain(|term| !term.is_empty());
    terms.iter_mut().for_each(|term| *term = term.to_lowercase());
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn categories_sorted_by_priority() {
        let cats = all_categories();
        assert_eq!(cats[0].id, "complete_projects");
        let priorities: Vec<_> = cats.iter().map(|c| c.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn every_registered_calculator_has_a_group() {
        let registry = Registry::with_builtins();
        for info in registry.list_all() {
            assert_ne!(
                category_of(&info.type_id),
                "other",
                "calculator {} is not grouped",
                info.type_id
            );
        }
    }

    #[test]
    fn unlisted_calculator_falls_back_to_other() {
        assert_eq!(category_of("unobtainium"), "other");
        assert_eq!(badge_for("unobtainium"), "");
    }

    #[test]
    fn new_badge_wins_over_featured() {
        assert_eq!(badge_for("nj_sales_tax"), "NEW");
        assert_eq!(badge_for("integrated_tile_project"), "FEATURED");
        assert_eq!(badge_for("tile_floor"), "POPULAR");
    }

    #[test]
    fn search_terms_include_tags_and_category() {
        let terms = search_terms_for("nj_sales_tax");
        assert!(terms.contains(&"nj sales tax".to_string()));
        assert!(terms.contains(&"nj_compliance".to_string()));
        assert!(terms.contains(&"tax".to_string()));
    }
}
