use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::handler::SharedCatalog;
use crate::router::build_router;
use log::{info, warn};
use recipebook_core::FileCatalogService;
use std::sync::Arc;
use tokio::net::TcpListener;

/// RecipeBook HTTP server.
pub struct RecipeBookServer {
    config: ServerConfig,
    catalog: SharedCatalog,
}

impl RecipeBookServer {
    /// Opens both collection files. Fails fast on configuration errors.
    pub fn open(config: ServerConfig) -> ServerResult<Self> {
        config.storage.validate()?;
        let catalog = Arc::new(FileCatalogService::open(&config.storage)?);
        Ok(Self { config, catalog })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.catalog))
    }

    /// Serves until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        info!(
            "event=server_start module=http status=ok bind_addr={} recipes_path={} categories_path={}",
            self.config.bind_addr, self.config.storage.recipes_path, self.config.storage.categories_path
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("event=server_stop module=http status=ok");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_stop module=http status=error error={}", err);
    }
}
