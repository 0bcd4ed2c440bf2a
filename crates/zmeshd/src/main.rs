// # zmeshd - zmesh Daemon
//
// Thin integration layer around the zmesh-core registry. The daemon is
// responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing the runtime and log subscriber
// 3. Hydrating the registry from the state file
// 4. Flushing the registry back to the state file on shutdown
//
// Everything with actual semantics lives in zmesh-core; the transport
// layer that would feed membership changes into the registry attaches to
// the same `Network` value this daemon owns.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `ZMESH_STATE_FILE`: Path of the JSON state file
//   (default: simple-network.json in the working directory)
// - `ZMESH_RESET`: Set to "1" or "true" to skip hydration at startup
// - `ZMESH_LOG_LEVEL`: trace, debug, info, warn or error (default: info)
//
// ## Example
//
// ```bash
// export ZMESH_STATE_FILE=/var/lib/zmesh/simple-network.json
// export ZMESH_LOG_LEVEL=debug
//
// zmeshd
// ```

use anyhow::Result;
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;
use zmesh_core::{Device, Network, NetworkConfig, NetworkListener};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum ZmeshExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<ZmeshExitCode> for ExitCode {
    fn from(code: ZmeshExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    state_file: Option<String>,
    reset: bool,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        Self {
            state_file: env::var("ZMESH_STATE_FILE").ok(),
            reset: env::var("ZMESH_RESET")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            log_level: env::var("ZMESH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.state_file {
            if path.is_empty() {
                anyhow::bail!("ZMESH_STATE_FILE cannot be empty");
            }

            if let Some(parent) = std::path::Path::new(path).parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                anyhow::bail!(
                    "ZMESH_STATE_FILE parent directory does not exist: {}. \
                    Create it first: mkdir -p {}",
                    parent.display(),
                    parent.display()
                );
            }
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "ZMESH_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Build the registry configuration
    fn network_config(&self) -> NetworkConfig {
        let mut config = NetworkConfig::new().with_reset(self.reset);
        if let Some(ref path) = self.state_file {
            config = config.with_state_file(path);
        }
        config
    }
}

/// Listener that mirrors membership changes into the log stream.
struct LogListener;

impl NetworkListener for LogListener {
    fn device_added(&self, device: &Device) {
        info!("device added: {}", device);
    }

    fn device_updated(&self, device: &Device) {
        info!("device updated: {}", device);
    }

    fn device_removed(&self, device: &Device) {
        info!("device removed: {}", device);
    }
}

fn main() -> ExitCode {
    // Load and validate configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return ZmeshExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ZmeshExitCode::ConfigError.into();
    }

    info!("starting zmeshd daemon");

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {}", e);
            return ZmeshExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run_daemon(config).await {
            Ok(()) => ZmeshExitCode::CleanShutdown,
            Err(e) => {
                error!("daemon error: {:#}", e);
                ZmeshExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Run the daemon
async fn run_daemon(config: Config) -> Result<()> {
    let network_config = config.network_config();
    network_config.validate()?;

    info!("state file: {}", network_config.state_file.display());
    if network_config.reset {
        info!("reset requested, starting with an empty registry");
    }

    let network = Network::new(network_config);

    // Hydration failure aborts startup; there is no empty-state fallback
    // at this layer.
    network.startup().await?;
    info!(
        devices = network.devices().len(),
        groups = network.groups().len(),
        "registry hydrated"
    );

    // Membership changes become log lines for the lifetime of the
    // process. The transport layer registers its own listeners the same
    // way.
    network.add_network_listener(std::sync::Arc::new(LogListener));

    let signal_name = wait_for_shutdown().await?;
    info!("received {}, shutting down", signal_name);

    // Flush failure means topology knowledge is lost on the next start,
    // so it bubbles out as a runtime error.
    network.shutdown().await?;

    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("failed to setup SIGINT handler: {}", e))?;

    let name = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };

    Ok(name)
}

/// Wait for shutdown signals (CTRL-C only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
