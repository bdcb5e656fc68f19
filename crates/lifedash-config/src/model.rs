use serde::{de::Deserializer, Deserialize, Serialize};
use std::path::PathBuf;

use lifedash_domain::MonthlyTargets;

const APP_DIR: &str = "LifeDash";
const RECORDS_DIR: &str = "records";
const OBJECTS_DIR: &str = "objects";

/// Stores user-configurable dashboard preferences and storage locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Root for stored records and images. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,

    #[serde(
        default = "Config::default_image_bucket",
        deserialize_with = "deserialize_bucket"
    )]
    pub image_bucket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Prefix for public object URLs; a `file://` URL under the data dir otherwise.
    pub public_base_url: Option<String>,

    #[serde(default = "Config::default_weekly_workout_goal")]
    pub weekly_workout_goal: u32,
    #[serde(default)]
    pub monthly_targets: MonthlyTargets,
    #[serde(default = "Config::default_breakdown_limit")]
    pub breakdown_limit: usize,
    #[serde(default = "Config::default_recent_transactions")]
    pub recent_transactions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
            image_bucket: Self::default_image_bucket(),
            public_base_url: None,
            weekly_workout_goal: Self::default_weekly_workout_goal(),
            monthly_targets: MonthlyTargets::default(),
            breakdown_limit: Self::default_breakdown_limit(),
            recent_transactions: Self::default_recent_transactions(),
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_image_bucket() -> String {
        "dashboard-images".into()
    }

    pub fn default_weekly_workout_goal() -> u32 {
        4
    }

    pub fn default_breakdown_limit() -> usize {
        8
    }

    pub fn default_recent_transactions() -> usize {
        20
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(APP_DIR)
    }

    pub fn records_dir(&self) -> PathBuf {
        self.resolve_data_dir().join(RECORDS_DIR)
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.resolve_data_dir().join(OBJECTS_DIR)
    }

    pub fn resolve_public_base_url(&self) -> String {
        match &self.public_base_url {
            Some(url) if !url.trim().is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("file://{}", self.objects_dir().display()),
        }
    }
}

fn deserialize_bucket<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|bucket| bucket.trim().trim_matches('/').to_string())
        .filter(|bucket| !bucket.is_empty())
        .unwrap_or_else(Config::default_image_bucket))
}
