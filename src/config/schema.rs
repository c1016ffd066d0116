use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::scoring::HighlightConfig;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Dataset JSON exported by the fetch job
    #[serde(default)]
    pub data: Option<PathBuf>,

    /// Weight overrides layered over the dataset's stored weights
    #[serde(default)]
    pub weights: HashMap<String, f64>,

    #[serde(default)]
    pub highlights: HighlightConfig,
}
