//! Registry configuration.

/// Registry configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Initial table capacity in records
    pub initial_table_capacity: usize,
    /// Request body read timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_table_capacity: 1024,
            request_timeout_ms: 5000, // 5 seconds default
        }
    }
}
