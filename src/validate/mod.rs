//! Configuration loader and validator
//!
//! [`load`] turns a raw document into a [`DesignConfiguration`] in one pass:
//! path resolution, per-field type and domain checks, unknown-key handling,
//! and, once every field is valid on its own, cross-field checks against the
//! process catalog. Failures are collected into a single [`Diagnostics`]
//! batch; no partial configuration is ever returned.

mod cross;
mod fields;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::catalog::ProcessCatalog;
use crate::domain::keys;
use crate::domain::DesignConfiguration;
use crate::error::{ConfigError, Diagnostics};
use crate::resolve::{MarkerResolver, PathResolver};
use fields::{describe, FieldReader};

/// Handling of document keys the loader does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeyPolicy {
    /// Report each unknown key as a schema error.
    #[default]
    Strict,
    /// Keep unknown keys verbatim as extension data.
    Permissive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub unknown_keys: UnknownKeyPolicy,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self { unknown_keys: UnknownKeyPolicy::Strict }
    }

    pub fn permissive() -> Self {
        Self { unknown_keys: UnknownKeyPolicy::Permissive }
    }
}

/// Validate `document` and resolve its `dir::` references against
/// `base_directory`.
pub fn load(
    document: &Value,
    base_directory: &Path,
    catalog: &ProcessCatalog,
    options: &LoadOptions,
) -> Result<DesignConfiguration, Diagnostics> {
    load_with_resolver(document, base_directory, catalog, options, &MarkerResolver)
}

/// [`load`] with a caller-supplied path resolver.
pub fn load_with_resolver(
    document: &Value,
    base_directory: &Path,
    catalog: &ProcessCatalog,
    options: &LoadOptions,
    resolver: &dyn PathResolver,
) -> Result<DesignConfiguration, Diagnostics> {
    let Some(doc) = document.as_object() else {
        let mut diags = Diagnostics::new();
        diags.push(ConfigError::schema(
            "<document>",
            "object with string keys",
            describe(document),
        ));
        return Err(diags);
    };

    let mut reader = FieldReader::new(doc, base_directory, resolver);

    let design_name = reader.string(keys::DESIGN_NAME, true);
    let source_files = reader.path_list(keys::VERILOG_FILES, true);
    let clock_port_name = reader.identifier(keys::CLOCK_PORT, true);
    let clock_period = reader.positive_real(keys::CLOCK_PERIOD, true);
    let die_area = reader.die_area(keys::DIE_AREA);
    let pin_order_reference = reader.path(keys::FP_PIN_ORDER_CFG);
    let floorplan_sizing_mode = reader.floorplan_sizing(keys::FP_SIZING);
    let process_id = reader.string(keys::PDK, true);
    let standard_cell_library = reader.string(keys::STD_CELL_LIBRARY, true);
    let placement_density_target = reader.unit_fraction(keys::PL_TARGET_DENSITY);
    let congestion_tolerance = reader.boolean(keys::GRT_ALLOW_CONGESTION);
    let min_routing_layer = reader.string(keys::RT_MIN_LAYER, false);
    let max_routing_layer = reader.string(keys::RT_MAX_LAYER, false);
    let synthesis_strategy = reader.synth_strategy(keys::SYNTH_STRATEGY);
    let max_fanout = reader.integer(keys::SYNTH_MAX_FANOUT, 1);
    let enable_basic_placement = reader.boolean(keys::PL_BASIC_PLACEMENT);
    let cell_padding = reader.integer(keys::CELL_PAD, 0);
    let diode_insertion_strategy = reader.diode_insertion(keys::DIODE_INSERTION_STRATEGY);

    let mut verification_toggles = BTreeMap::new();
    for name in keys::VERIFICATION_TOGGLES {
        if let Some(enabled) = reader.boolean(name) {
            verification_toggles.insert(name.to_string(), enabled);
        }
    }

    let mut extensions = BTreeMap::new();
    for (key, value) in doc.iter().filter(|(key, _)| !keys::is_recognized(key)) {
        match options.unknown_keys {
            UnknownKeyPolicy::Strict => reader.push(ConfigError::schema(
                key,
                "a recognized configuration key",
                "unrecognized key",
            )),
            UnknownKeyPolicy::Permissive => {
                tracing::warn!("passing through unrecognized key {}", key);
                extensions.insert(key.clone(), value.clone());
            }
        }
    }

    let mut diags = reader.into_diagnostics();
    let (
        Some(design_name),
        Some(source_files),
        Some(clock_port_name),
        Some(clock_period),
        Some(process_id),
        Some(standard_cell_library),
    ) = (design_name, source_files, clock_port_name, clock_period, process_id, standard_cell_library)
    else {
        return Err(diags);
    };
    if !diags.is_empty() {
        return Err(diags);
    }

    let config = DesignConfiguration {
        design_name,
        source_files,
        clock_port_name,
        clock_period,
        die_area,
        pin_order_reference,
        floorplan_sizing_mode,
        process_id,
        standard_cell_library,
        placement_density_target,
        congestion_tolerance,
        min_routing_layer,
        max_routing_layer,
        synthesis_strategy,
        max_fanout,
        enable_basic_placement,
        cell_padding,
        diode_insertion_strategy,
        verification_toggles,
        extensions,
    };

    cross::check(&config, catalog, &mut diags);
    if !diags.is_empty() {
        return Err(diags);
    }

    tracing::debug!(
        "loaded design {} ({} sources, pdk {})",
        config.design_name(),
        config.source_files().len(),
        config.process_id()
    );
    Ok(config)
}
