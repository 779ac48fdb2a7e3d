use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category tags attached to every line item. The BOM rollup splits
/// material and labor subtotals on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Tile,
    Mortar,
    Grout,
    Waterproofing,
    BackerBoard,
    SelfLeveler,
    Drywall,
    JointCompound,
    Trim,
    Fasteners,
    Labor,
    Compliance,
    Other,
}

impl ProductCategory {
    /// Parse a category label, substituting `Other` for anything
    /// unrecognized. Callers detect the substitution through the echoed
    /// resolved inputs.
    pub fn parse_or_other(label: &str) -> Self {
        match label {
            "tile" => ProductCategory::Tile,
            "mortar" => ProductCategory::Mortar,
            "grout" => ProductCategory::Grout,
            "waterproofing" => ProductCategory::Waterproofing,
            "backer_board" => ProductCategory::BackerBoard,
            "self_leveler" => ProductCategory::SelfLeveler,
            "drywall" => ProductCategory::Drywall,
            "joint_compound" => ProductCategory::JointCompound,
            "trim" => ProductCategory::Trim,
            "fasteners" => ProductCategory::Fasteners,
            "labor" => ProductCategory::Labor,
            "compliance" => ProductCategory::Compliance,
            _ => ProductCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Tile => "tile",
            ProductCategory::Mortar => "mortar",
            ProductCategory::Grout => "grout",
            ProductCategory::Waterproofing => "waterproofing",
            ProductCategory::BackerBoard => "backer_board",
            ProductCategory::SelfLeveler => "self_leveler",
            ProductCategory::Drywall => "drywall",
            ProductCategory::JointCompound => "joint_compound",
            ProductCategory::Trim => "trim",
            ProductCategory::Fasteners => "fasteners",
            ProductCategory::Labor => "labor",
            ProductCategory::Compliance => "compliance",
            ProductCategory::Other => "other",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_label_falls_back_to_other() {
        assert_eq!(ProductCategory::parse_or_other("mortar"), ProductCategory::Mortar);
        assert_eq!(ProductCategory::parse_or_other("unobtainium"), ProductCategory::Other);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ProductCategory::BackerBoard).unwrap();
        assert_eq!(json, "\"backer_board\"");
    }
}
