//! Stateless JSON-RPC pass-through: `POST /api/eth` and `POST /api/sol`.
//!
//! The request body goes upstream untouched, the upstream body comes back
//! untouched. The only thing the proxy adds is the provider credential.

use crate::config::ProxyConfig;
use crate::error::{BlockWalletError, Result};
use crate::rpc::JsonRpcResponse;
use crate::types::Chain;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct RpcProxy {
    client: reqwest::Client,
    config: ProxyConfig,
}

/// Upstream reply, relayed as-is.
#[derive(Debug, Clone)]
pub struct Relayed {
    pub status: u16,
    pub body: Bytes,
}

impl RpcProxy {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BlockWalletError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    pub async fn forward(&self, chain: Chain, body: Bytes) -> Result<Relayed> {
        let endpoint = self.config.upstream(chain).endpoint();

        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        tracing::debug!("{} upstream answered {} ({} bytes)", chain, status, body.len());

        Ok(Relayed { status, body })
    }

    pub fn router(self) -> Router {
        Router::new()
            .route("/api/eth", post(eth_handler))
            .route("/api/sol", post(sol_handler))
            .with_state(Arc::new(self))
    }

    /// Binds the configured address and serves until Ctrl-C.
    pub async fn serve(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.listen_addr).await?;
        tracing::info!("RPC proxy listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }

    /// Serves on an already bound listener; used when the caller picks the port.
    pub async fn serve_on(self, listener: TcpListener) -> Result<()> {
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolves once `signal` fires. If the listener could not be installed
/// the server keeps running until the process is killed.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("Shutting down RPC proxy"),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn eth_handler(State(proxy): State<Arc<RpcProxy>>, body: Bytes) -> Response {
    relay(&proxy, Chain::Ethereum, body).await
}

async fn sol_handler(State(proxy): State<Arc<RpcProxy>>, body: Bytes) -> Response {
    relay(&proxy, Chain::Solana, body).await
}

async fn relay(proxy: &RpcProxy, chain: Chain, body: Bytes) -> Response {
    tracing::info!("Handling POST request for {}", chain.ticker().to_lowercase());

    match proxy.forward(chain, body).await {
        Ok(relayed) => {
            let status = StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                relayed.body,
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("{} upstream unreachable: {}", chain, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(JsonRpcResponse::internal_error(e.to_string())),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_on_signal() {
        let done = tokio::time::timeout(
            Duration::from_millis(200),
            wait_for_shutdown(async { Ok::<(), std::io::Error>(()) }),
        )
        .await;
        assert!(done.is_ok());
    }

    #[tokio::test]
    async fn test_failed_signal_listener_keeps_serving() {
        let done = tokio::time::timeout(
            Duration::from_millis(200),
            wait_for_shutdown(async {
                Err::<(), _>(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "no signal driver",
                ))
            }),
        )
        .await;
        assert!(done.is_err());
    }
}
