//! Run plans: seed, buffer size and request list for `hashmix generate`.

use std::fs;
use std::path::Path;

use hashmix_core::{Device, DeviceConfig, ErrorInfo, HashmixError, Request};
use serde::{Deserialize, Serialize};

/// Everything needed to reproduce one dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPlan {
    /// Seed as hex, either `01,A3,FF` or `01a3ff`.
    pub seed: String,
    #[serde(flatten)]
    pub config: DeviceConfig,
    #[serde(default)]
    pub requests: Vec<Request>,
}

impl RunPlan {
    pub fn from_yaml_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)?;
        let plan: RunPlan = serde_yaml::from_str(&text)?;
        Ok(plan)
    }

    /// Builds the device and renders the full dump.
    pub fn render(&self) -> Result<String, HashmixError> {
        let seed = parse_seed_hex(&self.seed)?;
        let mut device = Device::with_config(&seed, self.config)?;
        let mut text = device.render_state();
        for request in &self.requests {
            text.push_str(&device.extract_and_render(*request));
        }
        Ok(text)
    }
}

/// Decodes comma separated hex bytes (`1,a3,FF`) or a contiguous hex string.
pub fn parse_seed_hex(text: &str) -> Result<Vec<u8>, HashmixError> {
    let text = text.trim();
    let invalid = |reason: String| {
        HashmixError::InvalidSeed(
            ErrorInfo::new("seed-hex", "seed is not valid hex")
                .with_context("seed", text)
                .with_context("reason", reason)
                .with_hint("use 01,A3,FF or 01a3ff"),
        )
    };
    if text.contains(',') {
        text.split(',')
            .map(|item| {
                let item = item.trim();
                if item.is_empty() || item.len() > 2 {
                    return Err(invalid(format!("bad byte {item:?}")));
                }
                u8::from_str_radix(item, 16).map_err(|err| invalid(err.to_string()))
            })
            .collect()
    } else {
        hex::decode(text).map_err(|err| invalid(err.to_string()))
    }
}
