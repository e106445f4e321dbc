use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Workbook merge HTTP server.
pub struct MergeServer {
    config: ServerConfig,
}

impl MergeServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.config.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        self.config.validate()?;
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("Server running on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = MergeServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn router_builds() {
        let server = MergeServer::new(ServerConfig::default());
        let _router = server.router();
    }

    #[tokio::test]
    async fn serve_rejects_invalid_config_before_binding() {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            output_file_name: "bad\"name.xlsx".into(),
            ..ServerConfig::default()
        };
        let err = MergeServer::new(config).serve().await.unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
