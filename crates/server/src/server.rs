use std::sync::Arc;

use axum::{Router, routing::get};

use crate::{categorias, gastos};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Builds the API router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/categorias", get(categorias::list).post(categorias::create))
        .route(
            "/categorias/{id}",
            get(categorias::get)
                .put(categorias::update)
                .patch(categorias::update_partial)
                .delete(categorias::delete),
        )
        .route("/gastos", get(gastos::list).post(gastos::create))
        .route("/gastos/total", get(gastos::total))
        .route(
            "/gastos/{id}",
            get(gastos::get)
                .put(gastos::update)
                .patch(gastos::update_partial)
                .delete(gastos::delete),
        )
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
