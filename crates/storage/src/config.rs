//! Storage configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the toilet store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// sqlx SQLite URL, e.g. `sqlite://peepal.db` or `sqlite::memory:`
    pub url: String,
    /// Pool size (ignored for in-memory databases)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://peepal.db".to_string(),
            max_connections: default_max_connections(),
        }
    }
}

impl StorageConfig {
    /// Config for a private in-memory database
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    /// Whether the URL points at an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorageConfig::default();
        assert_eq!(config.url, "sqlite://peepal.db");
        assert_eq!(config.max_connections, 5);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_in_memory_config() {
        assert!(StorageConfig::in_memory().is_in_memory());
        let shared = StorageConfig {
            url: "sqlite:file:toilets?mode=memory&cache=shared".to_string(),
            max_connections: 4,
        };
        assert!(shared.is_in_memory());
    }
}
