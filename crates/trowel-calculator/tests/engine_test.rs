use proptest::prelude::*;
use trowel_calculator::{CalcError, CalcInputs, Registry};
use trowel_calculator::built_in::large_format_tile::LargeFormatTileCalculator;
use trowel_calculator::built_in::tile_floor::TileFloorCalculator;
use trowel_calculator::contract::Calculator;

#[test]
fn registry_lists_builtins_in_registration_order() {
    let registry = Registry::with_builtins();
    let listed = registry.list_all();
    assert_eq!(listed.len(), 11);
    assert_eq!(listed[0].type_id, "integrated_tile_project");
    assert_eq!(listed[1].type_id, "tile_floor");
    assert_eq!(listed.last().map(|info| info.type_id.as_str()), Some("seasonal_pricing_optimizer"));
}

#[test]
fn unknown_type_lookup_fails() {
    let registry = Registry::with_builtins();
    let err = registry.get("quantum_tile").unwrap_err();
    assert!(matches!(err, CalcError::UnknownCalculator { .. }));
}

#[test]
fn every_builtin_computes_from_its_own_defaults() {
    let registry = Registry::with_builtins();
    for info in registry.list_all() {
        let calculator = registry.get(&info.type_id).unwrap();
        let defaults = calculator.default_inputs();
        assert!(
            calculator.validate(&defaults).is_empty(),
            "{} defaults fail validation",
            info.type_id
        );
        let result = calculator.run(&defaults);
        assert!(result.is_ok(), "{} defaults fail to compute", info.type_id);
        assert_eq!(result.unwrap().calculator_type, info.type_id);
    }
}

#[test]
fn empty_inputs_fall_back_to_defaults() {
    let registry = Registry::with_builtins();
    for info in registry.list_all() {
        let calculator = registry.get(&info.type_id).unwrap();
        let result = calculator.run(&CalcInputs::new());
        assert!(result.is_ok(), "{} fails on empty inputs", info.type_id);
    }
}

#[test]
fn results_serialize_deterministically() {
    let registry = Registry::with_builtins();
    for info in registry.list_all() {
        let calculator = registry.get(&info.type_id).unwrap();
        let first = calculator.run(&CalcInputs::new()).unwrap();
        let second = calculator.run(&CalcInputs::new()).unwrap();
        let a = serde_json::to_vec(&first).unwrap();
        let b = serde_json::to_vec(&second).unwrap();
        assert_eq!(a, b, "{} serialization is unstable", info.type_id);
    }
}

#[test]
fn validation_errors_surface_as_calc_error() {
    let registry = Registry::with_builtins();
    let calculator = registry.get("thinset_mortar").unwrap();
    let inputs = CalcInputs::new().with("area_sqft", -5.0);
    match calculator.run(&inputs) {
        Err(CalcError::Validation { errors }) => {
            assert!(errors.iter().any(|e| e.contains("positive")));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

proptest! {
    // Ordered quantities never lose coverage to rounding: tiles ordered
    // always cover the area plus waste.
    #[test]
    fn tile_order_always_covers_the_area(
        area in 1.0f64..2000.0,
        waste in 0.0f64..50.0,
    ) {
        let calc = TileFloorCalculator;
        let inputs = CalcInputs::new()
            .with("area_sqft", area)
            .with("waste_percent", waste)
            .with("round_up_to_box", false);
        let result = calc.run(&inputs).unwrap();
        let tiles = result.summary["tiles_needed"].as_i64().unwrap();
        // 12x12 default tile is exactly 1 sqft
        let needed = area * (1.0 + waste / 100.0);
        prop_assert!(tiles as f64 >= needed - 1e-9);
        prop_assert!((tiles as f64) < needed + 1.0);
    }

    // Large-format tile never computes with waste under the 15% floor.
    #[test]
    fn large_format_waste_floor_holds(
        area in 10.0f64..500.0,
        waste in 0.0f64..50.0,
        length in 15.0f64..48.0,
        width in 2.0f64..48.0,
    ) {
        let calc = TileFloorCalculator;
        let inputs = CalcInputs::new()
            .with("area_sqft", area)
            .with("tile_length_in", length)
            .with("tile_width_in", width)
            .with("waste_percent", waste);
        let result = calc.run(&inputs).unwrap();
        let effective = result.inputs["waste_percent"].as_f64().unwrap();
        prop_assert!(effective >= 15.0 - 1e-9);
        prop_assert!((effective - waste.max(15.0)).abs() < 1e-9);
    }

    // The dedicated large-format calculator enforces the same floor.
    #[test]
    fn dedicated_large_format_calculator_holds_waste_floor(
        area in 10.0f64..500.0,
        waste in 0.0f64..50.0,
        length in 15.0f64..60.0,
        width in 2.0f64..60.0,
    ) {
        let calc = LargeFormatTileCalculator;
        let inputs = CalcInputs::new()
            .with("area_sqft", area)
            .with("tile_length_in", length)
            .with("tile_width_in", width)
            .with("waste_percent", waste);
        let result = calc.run(&inputs).unwrap();
        let effective = result.inputs["waste_percent"].as_f64().unwrap();
        prop_assert!(effective >= 15.0 - 1e-9);
        prop_assert!((effective - waste.max(15.0)).abs() < 1e-9);
    }
}
