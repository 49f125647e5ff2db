/// Tunables for the store system.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Mailbox size of each session's cart actor.
    pub cart_buffer_size: usize,
    /// Log filter used when `RUST_LOG` is not set.
    pub default_log_filter: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cart_buffer_size: 32,
            default_log_filter: "info".to_string(),
        }
    }
}
