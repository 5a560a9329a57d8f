//! Logger setup shared by the server and client binaries.

use std::fmt;

use tracing_subscriber::{
    EnvFilter,
    fmt::{format::Writer, time::FormatTime},
};

use crate::time::now_jst;

/// Formats log timestamps in JST with millisecond precision.
struct JstTimer;

impl FormatTime for JstTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", now_jst().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// Build the default filter directive for a binary.
///
/// Log output from the binary itself, the server library and the HTTP trace
/// layer is enabled at `level`.
pub fn default_directive(bin_name: &str, level: &str) -> String {
    let crate_name = bin_name.replace('-', "_");
    if crate_name == "hubcast_server" {
        return format!("hubcast_server={level},tower_http={level}");
    }
    format!("{crate_name}={level},hubcast_server={level},tower_http={level}")
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the default directive. Calling this more
/// than once is harmless; later calls are ignored.
pub fn setup_logger(bin_name: &str, level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(JstTimer)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに変換される
        // when (操作):
        let directive = default_directive("hubcast-client", "debug");

        // then (期待する結果):
        assert_eq!(
            directive,
            "hubcast_client=debug,hubcast_server=debug,tower_http=debug"
        );
    }

    #[test]
    fn test_default_directive_server_is_not_duplicated() {
        // テスト項目: サーバーのバイナリ名ではディレクティブが重複しない
        // when (操作):
        let directive = default_directive("hubcast-server", "info");

        // then (期待する結果):
        assert_eq!(directive, "hubcast_server=info,tower_http=info");
    }

    #[test]
    fn test_setup_logger_twice_is_harmless() {
        // テスト項目: setup_logger を2回呼んでも panic しない
        setup_logger("hubcast-client", "info");
        setup_logger("hubcast-client", "info");
    }
}
