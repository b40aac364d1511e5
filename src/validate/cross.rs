//! Cross-field compatibility checks against the process catalog

use crate::catalog::ProcessCatalog;
use crate::domain::keys;
use crate::domain::{DesignConfiguration, FloorplanSizing};
use crate::error::{ConfigError, Diagnostics};

/// Run once every field has passed its own checks.
pub(crate) fn check(config: &DesignConfiguration, catalog: &ProcessCatalog, diags: &mut Diagnostics) {
    if config.floorplan_sizing_mode() == Some(&FloorplanSizing::Absolute)
        && config.die_area().is_none()
    {
        diags.push(ConfigError::compatibility(
            keys::FP_SIZING,
            keys::DIE_AREA,
            "absolute sizing requires a die area",
        ));
    }

    let pdk = config.process_id();
    let Some(process) = catalog.process(pdk) else {
        diags.push(ConfigError::compatibility(
            keys::PDK,
            keys::STD_CELL_LIBRARY,
            format!(
                "process '{}' is not in the catalog (known: {})",
                pdk,
                catalog.process_ids().collect::<Vec<_>>().join(", ")
            ),
        ));
        return;
    };

    let library = config.standard_cell_library();
    if !catalog.allows_library(pdk, library) {
        diags.push(ConfigError::compatibility(
            keys::STD_CELL_LIBRARY,
            keys::PDK,
            format!(
                "library '{}' is not offered by process '{}' (offered: {})",
                library,
                pdk,
                process.libraries.join(", ")
            ),
        ));
    }

    let mut layer_index = |key: &str, layer: Option<&str>| -> Option<usize> {
        let layer = layer?;
        let index = catalog.layer_index(pdk, layer);
        if index.is_none() {
            diags.push(ConfigError::compatibility(
                key,
                keys::PDK,
                format!(
                    "layer '{}' is not a routing layer of '{}' (layers: {})",
                    layer,
                    pdk,
                    process.layers.join(", ")
                ),
            ));
        }
        index
    };

    let min = layer_index(keys::RT_MIN_LAYER, config.min_routing_layer());
    let max = layer_index(keys::RT_MAX_LAYER, config.max_routing_layer());

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            diags.push(ConfigError::compatibility(
                keys::RT_MIN_LAYER,
                keys::RT_MAX_LAYER,
                format!(
                    "minimum layer '{}' is above maximum layer '{}'",
                    process.layers[min], process.layers[max]
                ),
            ));
        }
    }
}
