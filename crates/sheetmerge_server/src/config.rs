use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Upper bound on one request body, multipart framing included.
    pub max_upload_bytes: usize,
    pub route_merge: String,
    /// Multipart field carrying the workbooks (repeatable).
    pub field_files: String,
    /// File name offered in `Content-Disposition`.
    pub output_file_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_upload_bytes: 50 << 20,
            route_merge: "/merge-excel".into(),
            field_files: "files".into(),
            output_file_name: "merged.xlsx".into(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot be served.
    ///
    /// `output_file_name` is quoted into `Content-Disposition`, so it must be
    /// non-empty printable ASCII without `"` or `\`.
    pub fn validate(&self) -> ServerResult<()> {
        let c_name = &self.output_file_name;
        let if_bad_char = c_name
            .chars()
            .any(|c| !(c.is_ascii_graphic() || c == ' ') || c == '"' || c == '\\');
        if c_name.trim().is_empty() || if_bad_char {
            return Err(ServerError::Config(format!(
                "output_file_name {c_name:?} must be printable ASCII without quotes or backslashes"
            )));
        }
        Ok(())
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(c.route_merge, "/merge-excel");
        assert_eq!(c.field_files, "files");
        assert_eq!(c.output_file_name, "merged.xlsx");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str(
            r#"
            bind_addr = "127.0.0.1:9000"
            output_file_name = "combined.xlsx"
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.output_file_name, "combined.xlsx");
        assert_eq!(c.field_files, "files");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn unsafe_output_file_name_is_rejected() {
        for c_name in [r#"a"b.xlsx"#, "r\\x.xlsx", "résumé.xlsx", "a\nb.xlsx", "  "] {
            let text = format!("output_file_name = {}", toml::Value::from(c_name));
            let err = ServerConfig::from_toml_str(&text).unwrap_err();
            assert!(matches!(err, ServerError::Config(_)), "{c_name:?}");
        }
        let c = ServerConfig::from_toml_str(r#"output_file_name = "merged 2024.xlsx""#).unwrap();
        assert_eq!(c.output_file_name, "merged 2024.xlsx");
        assert!(ServerConfig::default().validate().is_ok());
    }
}
