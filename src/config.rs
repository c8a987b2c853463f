// Configuration module for kafka-topic-sync
//
// AdminConfig holds the connection and authentication settings for the admin
// client. It is filled from command-line flags (with environment fallbacks)
// and turned into an rdkafka ClientConfig by `client_config()`.

use std::time::Duration;

use rdkafka::config::ClientConfig;

use crate::kafka::constants::{
    DEFAULT_CLIENT_ID, DEFAULT_OPERATION_TIMEOUT_MS, DEFAULT_SASL_MECHANISM,
    DEFAULT_SECURITY_PROTOCOL, SASL_MECHANISMS, SECURITY_PROTOCOLS,
};
use crate::kafka::error::ConnectionError;

/// Admin connection settings
#[derive(Clone)]
pub struct AdminConfig {
    /// Bootstrap servers (e.g., "kafka1:9092,kafka2:9092")
    pub bootstrap_servers: String,
    /// Security protocol (SASL_SSL, SASL_PLAINTEXT, SSL, PLAINTEXT)
    pub security_protocol: String,
    /// SASL mechanism (PLAIN, SCRAM-SHA-256, SCRAM-SHA-512)
    pub sasl_mechanism: String,
    /// SASL username
    pub sasl_username: String,
    /// SASL password
    pub sasl_password: String,
    /// SSL CA certificate location (only used with *_SSL protocols)
    pub ssl_ca_location: Option<String>,
    /// Timeout for each admin round trip, in milliseconds
    pub operation_timeout_ms: u64,
    /// client.id reported to the brokers
    pub client_id: String,
}

/// Custom Debug implementation that redacts sensitive credentials
impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("bootstrap_servers", &self.bootstrap_servers)
            .field("security_protocol", &self.security_protocol)
            .field("sasl_mechanism", &self.sasl_mechanism)
            // REDACT sensitive credentials to prevent log exposure
            .field("sasl_username", &"[REDACTED]")
            .field("sasl_password", &"[REDACTED]")
            .field("ssl_ca_location", &self.ssl_ca_location)
            .field("operation_timeout_ms", &self.operation_timeout_ms)
            .field("client_id", &self.client_id)
            .finish()
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: String::new(),
            security_protocol: DEFAULT_SECURITY_PROTOCOL.to_string(),
            sasl_mechanism: DEFAULT_SASL_MECHANISM.to_string(),
            sasl_username: String::new(),
            sasl_password: String::new(),
            ssl_ca_location: None,
            operation_timeout_ms: DEFAULT_OPERATION_TIMEOUT_MS,
            client_id: DEFAULT_CLIENT_ID.to_string(),
        }
    }
}

impl AdminConfig {
    /// Create a SASL config for the given brokers and credentials, other settings default
    pub fn new(
        bootstrap_servers: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            bootstrap_servers: bootstrap_servers.into(),
            sasl_username: username.into(),
            sasl_password: password.into(),
            ..Self::default()
        }
    }

    /// Whether the protocol negotiates SASL credentials
    pub fn uses_sasl(&self) -> bool {
        self.security_protocol.starts_with("SASL")
    }

    /// Whether the protocol runs over TLS
    pub fn uses_ssl(&self) -> bool {
        self.security_protocol.ends_with("SSL")
    }

    /// Admin round-trip timeout
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Check that the settings can produce a working client
    pub fn validate(&self) -> Result<(), ConnectionError> {
        if self.bootstrap_servers.trim().is_empty() {
            return Err(ConnectionError::InvalidConfig(
                "bootstrap.servers is empty".to_string(),
            ));
        }

        if !SECURITY_PROTOCOLS.contains(&self.security_protocol.as_str()) {
            return Err(ConnectionError::InvalidConfig(format!(
                "unsupported security.protocol '{}' (expected one of {})",
                self.security_protocol,
                SECURITY_PROTOCOLS.join(", ")
            )));
        }

        if self.uses_sasl() {
            if !SASL_MECHANISMS.contains(&self.sasl_mechanism.as_str()) {
                return Err(ConnectionError::InvalidConfig(format!(
                    "unsupported sasl.mechanism '{}' (expected one of {})",
                    self.sasl_mechanism,
                    SASL_MECHANISMS.join(", ")
                )));
            }
            if self.sasl_username.is_empty() {
                return Err(ConnectionError::InvalidConfig(
                    "sasl.username is required for SASL protocols".to_string(),
                ));
            }
            if self.sasl_password.is_empty() {
                return Err(ConnectionError::InvalidConfig(
                    "sasl.password is required for SASL protocols".to_string(),
                ));
            }
        }

        if self.operation_timeout_ms == 0 {
            return Err(ConnectionError::InvalidConfig(
                "operation timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the rdkafka client configuration
    pub fn client_config(&self) -> ClientConfig {
        let mut client_config = ClientConfig::new();

        client_config.set("bootstrap.servers", &self.bootstrap_servers);
        client_config.set("client.id", &self.client_id);
        client_config.set("security.protocol", &self.security_protocol);

        // SASL configuration (if using SASL_* protocol)
        if self.uses_sasl() {
            client_config.set("sasl.mechanism", &self.sasl_mechanism);
            client_config.set("sasl.username", &self.sasl_username);
            client_config.set("sasl.password", &self.sasl_password);
        }

        // SSL configuration (if using *_SSL protocol)
        if self.uses_ssl() {
            if let Some(ca_location) = &self.ssl_ca_location {
                client_config.set("ssl.ca.location", ca_location);
            }
            client_config.set("ssl.endpoint.identification.algorithm", "https");
        }

        // Describe must never create topics as a side effect
        client_config.set("allow.auto.create.topics", "false");
        client_config.set(
            "socket.timeout.ms",
            self.operation_timeout_ms.to_string(),
        );

        client_config
    }
}
