use anyhow::Context;
use intensitycore::prelude::StageConfig;
use intensitycore::time::DisplayZone;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://api.carbonintensity.org.uk";
pub const DEFAULT_BRIDGE_PORT: u16 = 9000;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    /// Display offset east of UTC in minutes; `None` uses this machine's offset.
    pub display_offset_minutes: Option<i32>,
    pub primary_region: u32,
    pub secondary_region: u32,
    pub bridge_port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            display_offset_minutes: None,
            primary_region: 1,
            secondary_region: 2,
            bridge_port: DEFAULT_BRIDGE_PORT,
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dashboard config {}", path_ref.display()))?;
        let config: DashboardConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing dashboard config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        api_base_url: String,
        display_offset_minutes: Option<i32>,
        primary_region: u32,
        secondary_region: u32,
        bridge_port: u16,
    ) -> Self {
        Self {
            api_base_url,
            display_offset_minutes,
            primary_region,
            secondary_region,
            bridge_port,
        }
    }

    pub fn display_zone(&self) -> anyhow::Result<DisplayZone> {
        match self.display_offset_minutes {
            Some(minutes) => DisplayZone::from_offset_minutes(minutes)
                .with_context(|| format!("display offset {} minutes is out of range", minutes)),
            None => Ok(DisplayZone::local_now()),
        }
    }

    pub fn to_stage_config(&self) -> anyhow::Result<StageConfig> {
        Ok(StageConfig::new(self.display_zone()?))
    }
}
