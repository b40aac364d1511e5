//! Design configuration model
//!
//! [`DesignConfiguration`] is produced only by the loader and is read-only
//! afterwards. Enum-like document values are parsed into tagged variants that
//! keep an `Extension` escape hatch for process-specific values.

pub mod keys;

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::utils::sha256_hex;

/// Physical die boundary in layout length units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DieArea {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl DieArea {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

impl fmt::Display for DieArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x0, self.y0, self.x1, self.y1)
    }
}

/// How `DIE_AREA` is interpreted during floorplanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorplanSizing {
    Absolute,
    Relative,
    Extension(String),
}

impl FromStr for FloorplanSizing {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Exact spellings only; anything else is carried through as written.
        Ok(match s {
            "absolute" => Self::Absolute,
            "relative" => Self::Relative,
            _ => Self::Extension(s.to_string()),
        })
    }
}

impl fmt::Display for FloorplanSizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => f.write_str("absolute"),
            Self::Relative => f.write_str("relative"),
            Self::Extension(name) => f.write_str(name),
        }
    }
}

/// Optimization objective of a synthesis strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthObjective {
    Area,
    Delay,
    Extension(String),
}

impl SynthObjective {
    pub fn parse(token: &str) -> Self {
        match token {
            "AREA" => Self::Area,
            "DELAY" => Self::Delay,
            _ => Self::Extension(token.to_string()),
        }
    }

    /// Highest variant level the flow engine defines for this objective.
    ///
    /// Extension objectives carry no bound.
    pub fn max_variant(&self) -> Option<u32> {
        match self {
            Self::Area => Some(3),
            Self::Delay => Some(4),
            Self::Extension(_) => None,
        }
    }
}

impl fmt::Display for SynthObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Area => f.write_str("AREA"),
            Self::Delay => f.write_str("DELAY"),
            Self::Extension(name) => f.write_str(name),
        }
    }
}

/// Synthesis strategy token such as `AREA 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthStrategy {
    pub objective: SynthObjective,
    pub variant: u32,
}

impl fmt::Display for SynthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.objective, self.variant)
    }
}

/// Antenna diode insertion policy, keyed by its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiodeInsertion {
    /// 0: no diodes.
    Disabled,
    /// 1: a diode on every cell input.
    SprayInputs,
    /// 2: fake diodes on every input, swapped for real ones on violations.
    SwapFakeDiodes,
    /// 3: antenna repair driven by the global router.
    RouterRepair,
    /// 4: custom insertion on nets driving design inputs.
    CustomInputs,
    /// 5: custom insertion followed by fake diode swapping.
    CustomWithSwap,
    /// 6: custom insertion followed by router repair.
    CustomWithRepair,
    Extension(u32),
}

impl DiodeInsertion {
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Self::Disabled,
            1 => Self::SprayInputs,
            2 => Self::SwapFakeDiodes,
            3 => Self::RouterRepair,
            4 => Self::CustomInputs,
            5 => Self::CustomWithSwap,
            6 => Self::CustomWithRepair,
            other => Self::Extension(other),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Self::Disabled => 0,
            Self::SprayInputs => 1,
            Self::SwapFakeDiodes => 2,
            Self::RouterRepair => 3,
            Self::CustomInputs => 4,
            Self::CustomWithSwap => 5,
            Self::CustomWithRepair => 6,
            Self::Extension(code) => *code,
        }
    }
}

/// A fully resolved, validated design descriptor.
///
/// Instances are only created by [`crate::validate::load`]; all access is
/// through the read accessors below.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignConfiguration {
    pub(crate) design_name: String,
    pub(crate) source_files: Vec<PathBuf>,
    pub(crate) clock_port_name: String,
    pub(crate) clock_period: f64,
    pub(crate) die_area: Option<DieArea>,
    pub(crate) pin_order_reference: Option<PathBuf>,
    pub(crate) floorplan_sizing_mode: Option<FloorplanSizing>,
    pub(crate) process_id: String,
    pub(crate) standard_cell_library: String,
    pub(crate) placement_density_target: Option<f64>,
    pub(crate) congestion_tolerance: Option<bool>,
    pub(crate) min_routing_layer: Option<String>,
    pub(crate) max_routing_layer: Option<String>,
    pub(crate) synthesis_strategy: Option<SynthStrategy>,
    pub(crate) max_fanout: Option<u32>,
    pub(crate) enable_basic_placement: Option<bool>,
    pub(crate) cell_padding: Option<u32>,
    pub(crate) diode_insertion_strategy: Option<DiodeInsertion>,
    pub(crate) verification_toggles: BTreeMap<String, bool>,
    pub(crate) extensions: BTreeMap<String, Value>,
}

impl DesignConfiguration {
    pub fn design_name(&self) -> &str {
        &self.design_name
    }

    /// HDL sources in elaboration order.
    pub fn source_files(&self) -> &[PathBuf] {
        &self.source_files
    }

    pub fn clock_port_name(&self) -> &str {
        &self.clock_port_name
    }

    /// Target clock period in nanoseconds.
    pub fn clock_period(&self) -> f64 {
        self.clock_period
    }

    pub fn die_area(&self) -> Option<DieArea> {
        self.die_area
    }

    pub fn pin_order_reference(&self) -> Option<&Path> {
        self.pin_order_reference.as_deref()
    }

    pub fn floorplan_sizing_mode(&self) -> Option<&FloorplanSizing> {
        self.floorplan_sizing_mode.as_ref()
    }

    pub fn process_id(&self) -> &str {
        &self.process_id
    }

    pub fn standard_cell_library(&self) -> &str {
        &self.standard_cell_library
    }

    pub fn placement_density_target(&self) -> Option<f64> {
        self.placement_density_target
    }

    pub fn congestion_tolerance(&self) -> Option<bool> {
        self.congestion_tolerance
    }

    pub fn min_routing_layer(&self) -> Option<&str> {
        self.min_routing_layer.as_deref()
    }

    pub fn max_routing_layer(&self) -> Option<&str> {
        self.max_routing_layer.as_deref()
    }

    pub fn synthesis_strategy(&self) -> Option<&SynthStrategy> {
        self.synthesis_strategy.as_ref()
    }

    pub fn max_fanout(&self) -> Option<u32> {
        self.max_fanout
    }

    pub fn enable_basic_placement(&self) -> Option<bool> {
        self.enable_basic_placement
    }

    pub fn cell_padding(&self) -> Option<u32> {
        self.cell_padding
    }

    pub fn diode_insertion_strategy(&self) -> Option<DiodeInsertion> {
        self.diode_insertion_strategy
    }

    /// Verification passes named in the document, with their switch value.
    pub fn verification_toggles(&self) -> &BTreeMap<String, bool> {
        &self.verification_toggles
    }

    /// Whether a named pass was explicitly enabled. Absent toggles are `None`.
    pub fn verification_enabled(&self, name: &str) -> Option<bool> {
        self.verification_toggles.get(name).copied()
    }

    /// Unrecognized keys kept verbatim under the permissive policy.
    pub fn extensions(&self) -> &BTreeMap<String, Value> {
        &self.extensions
    }

    /// Canonical JSON form handed to the flow engine.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Stable SHA-256 of the canonical JSON form.
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        Ok(sha256_hex(&self.to_json()?.to_string()))
    }
}
