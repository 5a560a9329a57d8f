//! Typed configuration for the hub, the connection pumps and the server.

use std::time::Duration;

use thiserror::Error;

/// Default capacity of each client's outbound queue
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 256;

/// Default capacity of each of the hub's intake channels
pub const DEFAULT_INTAKE_CAPACITY: usize = 64;

/// Default WebSocket read/write buffer size in bytes
pub const DEFAULT_SOCKET_BUFFER_SIZE: usize = 1024;

/// Default maximum size of one inbound message in bytes
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Default interval between liveness pings
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(54);

/// Default time a connection may stay silent before it is dropped
pub const DEFAULT_PONG_TIMEOUT: Duration = Duration::from_secs(60);

/// Default time allowed for writing one frame
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors returned by configuration validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    ZeroCapacity { name: &'static str },

    #[error("{name} must be a non-zero duration")]
    ZeroDuration { name: &'static str },

    #[error("ping interval ({ping:?}) must be shorter than pong timeout ({pong:?})")]
    PingNotBeforePong { ping: Duration, pong: Duration },
}

/// Sizing of the hub's channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubConfig {
    /// Messages a client may have pending before it is evicted
    pub outbound_capacity: usize,
    /// Buffered join, leave and forward requests per intake
    pub intake_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
            intake_capacity: DEFAULT_INTAKE_CAPACITY,
        }
    }
}

impl HubConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero(self.outbound_capacity, "outbound capacity")?;
        non_zero(self.intake_capacity, "intake capacity")
    }
}

/// Settings handed to the WebSocket upgrade and the per-connection pumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub read_buffer_size: usize,
    pub write_buffer_size: usize,
    pub max_message_size: usize,
    pub ping_interval: Duration,
    pub pong_timeout: Duration,
    pub write_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: DEFAULT_SOCKET_BUFFER_SIZE,
            write_buffer_size: DEFAULT_SOCKET_BUFFER_SIZE,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            ping_interval: DEFAULT_PING_INTERVAL,
            pong_timeout: DEFAULT_PONG_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

impl ConnectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero(self.read_buffer_size, "read buffer size")?;
        non_zero(self.write_buffer_size, "write buffer size")?;
        non_zero(self.max_message_size, "max message size")?;
        non_zero_duration(self.ping_interval, "ping interval")?;
        non_zero_duration(self.pong_timeout, "pong timeout")?;
        non_zero_duration(self.write_timeout, "write timeout")?;

        // A ping must go out before the peer's silence is treated as death
        if self.ping_interval >= self.pong_timeout {
            return Err(ConfigError::PingNotBeforePong {
                ping: self.ping_interval,
                pong: self.pong_timeout,
            });
        }
        Ok(())
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Emit hub trace events through the logger
    pub trace: bool,
    pub hub: HubConfig,
    pub connection: ConnectionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            trace: false,
            hub: HubConfig::default(),
            connection: ConnectionConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hub.validate()?;
        self.connection.validate()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_zero(value: usize, name: &'static str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::ZeroCapacity { name });
    }
    Ok(())
}

fn non_zero_duration(value: Duration, name: &'static str) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::ZeroDuration { name });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        // テスト項目: デフォルト設定が検証を通る
        // given (前提条件):
        let config = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.hub.outbound_capacity, 256);
        assert_eq!(config.connection.read_buffer_size, 1024);
        assert_eq!(config.connection.write_buffer_size, 1024);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_zero_outbound_capacity_fails() {
        // テスト項目: 送信キュー容量 0 は拒否される
        // given (前提条件):
        let config = HubConfig {
            outbound_capacity: 0,
            ..HubConfig::default()
        };

        // when (操作):
        let result = config.validate();

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConfigError::ZeroCapacity {
                name: "outbound capacity"
            })
        );
    }

    #[test]
    fn test_zero_write_timeout_fails() {
        // テスト項目: 書き込みタイムアウト 0 は拒否される
        // given (前提条件):
        let config = ConnectionConfig {
            write_timeout: Duration::ZERO,
            ..ConnectionConfig::default()
        };

        // then (期待する結果):
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDuration {
                name: "write timeout"
            })
        );
    }

    #[test]
    fn test_ping_interval_must_be_shorter_than_pong_timeout() {
        // テスト項目: ping 間隔が pong タイムアウト以上だと拒否される
        // given (前提条件):
        let config = ConnectionConfig {
            ping_interval: Duration::from_secs(60),
            pong_timeout: Duration::from_secs(60),
            ..ConnectionConfig::default()
        };

        // when (操作):
        let result = ServerConfig {
            connection: config,
            ..ServerConfig::default()
        }
        .validate();

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConfigError::PingNotBeforePong {
                ping: Duration::from_secs(60),
                pong: Duration::from_secs(60),
            })
        );
    }
}
