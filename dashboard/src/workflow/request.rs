use crate::workflow::config::DashboardConfig;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum View {
    National,
    Regional,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::National => write!(f, "national"),
            View::Regional => write!(f, "regional"),
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "national" => Ok(View::National),
            "regional" => Ok(View::Regional),
            other => Err(format!("unknown view {other:?}")),
        }
    }
}

/// Everything needed to render one view for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRequest {
    pub view: View,
    pub date: NaiveDate,
    pub primary_region: u32,
    pub secondary_region: u32,
}

impl ViewRequest {
    pub fn new(view: View, date: NaiveDate, config: &DashboardConfig) -> Self {
        Self {
            view,
            date,
            primary_region: config.primary_region,
            secondary_region: config.secondary_region,
        }
    }

    pub fn with_regions(mut self, primary: Option<u32>, secondary: Option<u32>) -> Self {
        if let Some(primary) = primary {
            self.primary_region = primary;
        }
        if let Some(secondary) = secondary {
            self.secondary_region = secondary;
        }
        self
    }
}
