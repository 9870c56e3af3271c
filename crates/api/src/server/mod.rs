use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

// =============================================================================
// Server
// =============================================================================

pub struct Server {
    config: ServerConfig,
}

impl Server {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub async fn run(self, router: Router) -> anyhow::Result<()> {
        let address = self.config.socket_addr();

        let listener = TcpListener::bind(&address).await?;

        tracing::info!("Server listening on {}", address);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

// =============================================================================
// Shutdown Signal
// =============================================================================

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
