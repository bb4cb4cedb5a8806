//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_string_parses_pipeline_sections() {
        let content = r#"
[store]
path = db/eodscan.db
pool_size = 2

[provider]
data_dir = data/raw

[universe]
symbols = AAPL,MSFT,NVDA
lookback_days = 120
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("store", "path"),
            Some("db/eodscan.db".to_string())
        );
        assert_eq!(adapter.get_int("store", "pool_size", 4), 2);
        assert_eq!(
            adapter.get_string("universe", "symbols"),
            Some("AAPL,MSFT,NVDA".to_string())
        );
        assert_eq!(adapter.get_int("universe", "lookback_days", 0), 120);
    }

    #[test]
    fn missing_key_returns_none_or_default() {
        let adapter = FileConfigAdapter::from_string("[store]\npath = x.db\n").unwrap();
        assert_eq!(adapter.get_string("store", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
        assert_eq!(adapter.get_int("universe", "lookback_days", 120), 120);
        assert_eq!(adapter.get_double("store", "missing", 9.5), 9.5);
    }

    #[test]
    fn non_numeric_value_falls_back_to_default() {
        let adapter =
            FileConfigAdapter::from_string("[universe]\nlookback_days = soon\n").unwrap();
        assert_eq!(adapter.get_int("universe", "lookback_days", 120), 120);
    }

    #[test]
    fn bool_values() {
        let adapter =
            FileConfigAdapter::from_string("[a]\nx = yes\ny = 0\nz = maybe\n").unwrap();
        assert!(adapter.get_bool("a", "x", false));
        assert!(!adapter.get_bool("a", "y", true));
        assert!(adapter.get_bool("a", "z", true));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[provider]\ndata_dir = /var/data/raw\n").unwrap();

        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("provider", "data_dir"),
            Some("/var/data/raw".to_string())
        );
    }

    #[test]
    fn from_file_errors_on_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/eodscan.ini").is_err());
    }
}
