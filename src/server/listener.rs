use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::Handler;

/// Accepts connections until the returned future is dropped.
///
/// Each connection runs one request/response cycle on its own task; nothing
/// is shared between connections beyond the listener itself. Dropping the
/// future (e.g. when a shutdown signal wins a `select!`) closes the listener;
/// in-flight connections finish on their own.
pub async fn run(cfg: &Config, handler: Handler) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let handler = handler.clone();
        tokio::spawn(async move {
            if let Err(e) = Connection::new(socket, handler).run().await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
