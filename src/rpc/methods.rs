//! Fully-qualified names of the whitelisted backend methods.

use crate::config::DeskConfig;

pub const UPLOAD_FILE: &str = "upload_file";

/// Resolves method names against the configured python module paths.
#[derive(Debug, Clone)]
pub struct MethodPaths {
    customers_module: String,
    feed_module: String,
}

impl MethodPaths {
    pub fn new(customers_module: impl Into<String>, feed_module: impl Into<String>) -> Self {
        Self {
            customers_module: customers_module.into(),
            feed_module: feed_module.into(),
        }
    }

    pub fn from_config(cfg: &DeskConfig) -> Self {
        Self::new(cfg.customers_module.clone(), cfg.feed_module.clone())
    }

    fn customers(&self, method: &str) -> String {
        format!("{}.{}", self.customers_module, method)
    }

    pub fn get_customers(&self) -> String {
        self.customers("get_customers")
    }

    pub fn get_customer(&self) -> String {
        self.customers("get_customer")
    }

    pub fn save_customer(&self) -> String {
        self.customers("save_customer")
    }

    pub fn delete_customer(&self) -> String {
        self.customers("delete_customer")
    }

    pub fn get_published_blogs(&self) -> String {
        format!("{}.get_published_blogs", self.feed_module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_CUSTOMERS_MODULE, DEFAULT_FEED_MODULE};

    #[test]
    fn default_paths_match_backend_modules() {
        let m = MethodPaths::new(DEFAULT_CUSTOMERS_MODULE, DEFAULT_FEED_MODULE);
        assert_eq!(
            m.save_customer(),
            "demo.www.customers1.customers1.save_customer"
        );
        assert_eq!(
            m.get_published_blogs(),
            "social_media.www.social.social.get_published_blogs"
        );
    }
}
