use std::time::Duration;

/// Configuration for the inference client.
#[derive(Clone, Debug)]
pub struct InferConfig {
    endpoint: String,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3800".to_string(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(5),
        }
    }
}

impl InferConfig {
    /// Set the detection server base URL (e.g., "http://192.168.0.101:3800").
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Set the connect timeout. An unreachable server fails within this bound.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout. A stalled response fails within this bound.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    // Getters
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }
}
