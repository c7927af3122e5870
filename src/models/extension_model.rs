use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `plugin.json` as understood by the Plotune core.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtensionConfig {
    pub name: String,
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    pub mode: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub cmd: Vec<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub git_path: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub post_url: String,
    #[serde(default)]
    pub webpage: String,
    #[serde(default = "default_file_formats")]
    pub file_formats: Vec<String>,
    #[serde(default)]
    pub ask_form: bool,
    pub connection: Connection,
    #[serde(default)]
    pub configuration: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Connection {
    pub ip: String,
    pub port: u16,
    pub target: String,
    pub target_port: u16,
}

impl ExtensionConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.connection.ip, self.connection.port)
    }

    pub fn core_url(&self) -> String {
        format!("{}:{}", self.connection.target, self.connection.target_port)
    }

    pub fn accepts(&self, path: &str) -> bool {
        let lower = path.to_ascii_lowercase();
        self.file_formats
            .iter()
            .any(|ext| lower.ends_with(&format!(".{}", ext.trim_start_matches('.').to_ascii_lowercase())))
    }
}

fn enabled_by_default() -> bool {
    true
}

fn default_file_formats() -> Vec<String> {
    vec!["csv".to_string(), "csv.gz".to_string()]
}
