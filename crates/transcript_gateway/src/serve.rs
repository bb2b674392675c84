use std::io;
use std::net::SocketAddr;

use transcript_logging::transcript_info;

use crate::routes::routes;
use crate::state::SharedState;

/// Bind `listen` and serve the gateway until ctrl-c.
pub async fn serve(listen: SocketAddr, state: SharedState) -> io::Result<()> {
    let app = routes(state);
    let listener = tokio::net::TcpListener::bind(listen).await?;
    transcript_info!("gateway listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    transcript_info!("shutdown requested");
}
