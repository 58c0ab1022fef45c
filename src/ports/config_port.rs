//! Configuration access port trait.
//!
//! Lookups are by `[section] key` and return the raw string. Typed reads
//! go through `config_validation::read_key`, which rejects malformed
//! values instead of substituting a default.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    fn has_key(&self, section: &str, key: &str) -> bool {
        self.get_string(section, key)
            .is_some_and(|v| !v.trim().is_empty())
    }
}
