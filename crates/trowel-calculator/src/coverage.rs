//! Coverage reference tables, based on TCNA installation standards.
//!
//! Pure data: trowel-notch bag coverage, substrate and condition
//! multipliers, grout weight per square foot, joint-compound container
//! coverage, and accessory consumption rates. Lookup misses fall back to
//! the documented defaults; the composite-keyed grout table falls back to
//! a closed-form estimate at the call site instead.

/// Sqft covered by one 50lb thinset bag for a trowel notch size.
/// Approximate, varies by substrate.
pub fn trowel_coverage(notch: &str) -> f64 {
    match notch {
        "1/4x1/4" => 95.0,   // small tile, thin bed
        "1/4x3/8" => 70.0,   // medium tile
        "1/2x1/2" => 50.0,   // large tile (12x12+)
        "3/4x3/4" => 35.0,   // very large tile, back-butter
        "1/4x1/4_U" => 80.0, // U-notch variants
        "1/2x1/2_U" => 40.0,
        _ => DEFAULT_TROWEL_COVERAGE,
    }
}

/// Default coverage for an unrecognized trowel notch.
pub const DEFAULT_TROWEL_COVERAGE: f64 = 50.0;

/// Coverage divisor for the substrate material. Above 1.0 means more
/// mortar is consumed.
pub fn substrate_factor(substrate: &str) -> f64 {
    match substrate {
        "cement_board" => 1.0,
        "plywood" => 1.1,       // slightly more absorption
        "concrete" => 0.9,      // smooth, less absorption
        "existing_tile" => 1.2, // more mortar needed
        "ditra" => 0.85,        // less mortar for uncoupling membranes
        _ => 1.0,
    }
}

/// Coverage divisor for the substrate condition.
pub fn condition_factor(condition: &str) -> f64 {
    match condition {
        "good" => 1.0,
        "fair" => 1.1,
        "poor" => 1.25,
        _ => 1.0,
    }
}

/// Medium-bed mortar coverage for large-format tile, sqft per 50lb bag
/// with a 1/2" x 1/2" trowel.
pub const MEDIUM_BED_COVERAGE: f64 = 45.0;

/// Grout consumption in lbs per sqft, keyed by (tile length, tile width,
/// joint width). Returns `None` on a miss; callers then use their
/// calculator-specific closed-form estimate.
pub fn grout_coverage(tile_length_in: f64, tile_width_in: f64, joint_width_in: f64) -> Option<f64> {
    // Keys are exact: whole-inch tile sizes and sixteenth-inch joints.
    let sixteenths = joint_width_in * 16.0;
    if sixteenths.fract().abs() > 1e-9 || tile_length_in.fract() != 0.0 || tile_width_in.fract() != 0.0
    {
        return None;
    }
    let key = (tile_length_in as i64, tile_width_in as i64, sixteenths as i64);
    match key {
        // 12x12 tiles
        (12, 12, 2) => Some(0.15), // 1/8" joint
        (12, 12, 3) => Some(0.22), // 3/16" joint
        (12, 12, 4) => Some(0.30), // 1/4" joint
        // 12x24 tiles
        (12, 24, 2) => Some(0.12),
        (12, 24, 3) => Some(0.18),
        (12, 24, 4) => Some(0.24),
        // 24x24 tiles
        (24, 24, 2) => Some(0.10),
        (24, 24, 3) => Some(0.15),
        (24, 24, 4) => Some(0.20),
        // 6x6 tiles
        (6, 6, 2) => Some(0.30),
        (6, 6, 3) => Some(0.45),
        // 4x4 tiles
        (4, 4, 2) => Some(0.45),
        _ => None,
    }
}

/// Joint compound coverage in sqft of finished drywall per container.
pub fn compound_container_coverage(container: &str) -> f64 {
    match container {
        "premix_bucket_61lb" => 230.0, // 5-gallon bucket
        "premix_bucket_30lb" => 115.0, // 2.5-gallon bucket
        "dry_mix_25lb" => 100.0,
        "dry_mix_45lb" => 180.0,
        _ => 100.0,
    }
}

/// Linear feet of joint tape consumed per sqft of drywall.
pub const TAPE_LF_PER_SQFT: f64 = 0.5;

/// Standard corner bead piece length in feet.
pub const CORNER_BEAD_PIECE_FT: f64 = 8.0;

/// Sqft of drywall sanded per screen/sheet.
pub const SANDPAPER_SQFT_PER_SHEET: f64 = 100.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grout_table_hits_known_keys() {
        assert_eq!(grout_coverage(12.0, 12.0, 0.125), Some(0.15));
        assert_eq!(grout_coverage(24.0, 24.0, 0.25), Some(0.20));
    }

    #[test]
    fn grout_table_misses_fall_through() {
        assert_eq!(grout_coverage(18.0, 18.0, 0.125), None);
        // non-sixteenth joint widths never match
        assert_eq!(grout_coverage(12.0, 12.0, 0.13), None);
    }

    #[test]
    fn unknown_trowel_uses_default() {
        assert_eq!(trowel_coverage("5x5"), DEFAULT_TROWEL_COVERAGE);
    }
}
