//! Document keys understood by the loader

pub const DESIGN_NAME: &str = "DESIGN_NAME";
pub const VERILOG_FILES: &str = "VERILOG_FILES";
pub const CLOCK_PORT: &str = "CLOCK_PORT";
pub const CLOCK_PERIOD: &str = "CLOCK_PERIOD";
pub const DIE_AREA: &str = "DIE_AREA";
pub const FP_PIN_ORDER_CFG: &str = "FP_PIN_ORDER_CFG";
pub const FP_SIZING: &str = "FP_SIZING";
pub const PDK: &str = "PDK";
pub const STD_CELL_LIBRARY: &str = "STD_CELL_LIBRARY";
pub const PL_TARGET_DENSITY: &str = "PL_TARGET_DENSITY";
pub const GRT_ALLOW_CONGESTION: &str = "GRT_ALLOW_CONGESTION";
pub const RT_MIN_LAYER: &str = "RT_MIN_LAYER";
pub const RT_MAX_LAYER: &str = "RT_MAX_LAYER";
pub const SYNTH_STRATEGY: &str = "SYNTH_STRATEGY";
pub const SYNTH_MAX_FANOUT: &str = "SYNTH_MAX_FANOUT";
pub const PL_BASIC_PLACEMENT: &str = "PL_BASIC_PLACEMENT";
pub const CELL_PAD: &str = "CELL_PAD";
pub const DIODE_INSERTION_STRATEGY: &str = "DIODE_INSERTION_STRATEGY";

/// Keys that must be present in every document, in report order.
pub const REQUIRED: &[&str] =
    &[DESIGN_NAME, VERILOG_FILES, CLOCK_PORT, CLOCK_PERIOD, PDK, STD_CELL_LIBRARY];

/// Scalar and list keys with a dedicated field on the configuration.
pub const FIELDS: &[&str] = &[
    DESIGN_NAME,
    VERILOG_FILES,
    CLOCK_PORT,
    CLOCK_PERIOD,
    DIE_AREA,
    FP_PIN_ORDER_CFG,
    FP_SIZING,
    PDK,
    STD_CELL_LIBRARY,
    PL_TARGET_DENSITY,
    GRT_ALLOW_CONGESTION,
    RT_MIN_LAYER,
    RT_MAX_LAYER,
    SYNTH_STRATEGY,
    SYNTH_MAX_FANOUT,
    PL_BASIC_PLACEMENT,
    CELL_PAD,
    DIODE_INSERTION_STRATEGY,
];

/// Optional verification and sign-off passes, each a boolean switch.
pub const VERIFICATION_TOGGLES: &[&str] = &[
    "RUN_CVC",
    "RUN_KLAYOUT_XOR",
    "RUN_KLAYOUT_DRC",
    "RUN_MAGIC_DRC",
    "RUN_LVS",
    "RUN_LINTER",
    "FP_PDN_CHECK_NODES",
    "MAGIC_ZEROIZE_ORIGIN",
];

pub fn is_recognized(key: &str) -> bool {
    FIELDS.contains(&key) || VERIFICATION_TOGGLES.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_keys_are_fields() {
        for key in REQUIRED {
            assert!(FIELDS.contains(key), "{key} should be a field");
        }
    }

    #[test]
    fn test_is_recognized() {
        assert!(is_recognized("PL_TARGET_DENSITY"));
        assert!(is_recognized("RUN_KLAYOUT_XOR"));
        assert!(!is_recognized("PL_TARGET_DENSITY_TYPO"));
    }
}
