//! Boot-time configuration
//!
//! `kettle.toml` is compiled into the image and parsed on every boot. The
//! build script already rejected a file that fails to parse, so the
//! fallback only guards against a parser/schema mismatch slipping through.

use defmt::*;

use kettlestat_core::config::{self, KettleConfig};

/// Embedded calibration (compiled into firmware)
/// Edit kettle.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../kettle.toml");

/// Parse the embedded calibration, falling back to the reference values
pub fn load() -> KettleConfig {
    match config::parse(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded from kettle.toml");
            config
        }
        Err(e) => {
            warn!("kettle.toml rejected ({}), using built-in calibration", e);
            KettleConfig::default()
        }
    }
}
