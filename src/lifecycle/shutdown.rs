//! Shutdown coordination for the gateway.

use tokio::sync::broadcast;

/// Stop signal shared by the signal listener and the HTTP server.
///
/// The listener triggers it on SIGINT/SIGTERM; the server subscribes before
/// it starts serving and drains in-flight requests once it fires. Integration
/// tests trigger it when a spawned gateway is dropped.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver handed to `HttpServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Stop the gateway. A no-op when the server has already exited.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
