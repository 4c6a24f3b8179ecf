//! Graceful drain on termination signals.
//!
//! Actix's own signal handling is disabled in [`super::create_server`] so the
//! probes can fail before the listener stops accepting connections.

use std::future::Future;

use actix_web::dev::ServerHandle;
use actix_web::web;
use tracing::{info, warn};

use feed_backend::inbound::http::health::HealthState;

/// Resolves on SIGINT, or SIGTERM on Unix.
///
/// Never resolves when the handlers cannot be installed; the process then
/// keeps the platform's default signal behaviour.
pub async fn termination_signal() {
    if let Err(error) = wait_for_signal().await {
        warn!(%error, "cannot listen for termination signals");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Once `signal` resolves, fail the health probes and stop the server,
/// letting in-flight requests finish.
pub async fn drain_on<S>(signal: S, handle: ServerHandle, health_state: web::Data<HealthState>)
where
    S: Future<Output = ()>,
{
    signal.await;
    info!("termination requested; draining");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpServer};
    use tokio::sync::oneshot;

    #[actix_web::test]
    async fn signal_fails_probes_then_stops_server() {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();

        let server = HttpServer::new(App::new)
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .expect("bind ephemeral port")
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        let (trigger, fired) = oneshot::channel::<()>();
        let drain = actix_web::rt::spawn(drain_on(
            async move {
                let _ = fired.await;
            },
            handle,
            health_state.clone(),
        ));
        assert!(health_state.is_alive());

        trigger.send(()).expect("drain task is waiting");
        drain.await.expect("drain task completes");
        running
            .await
            .expect("server task completes")
            .expect("server stops cleanly");

        assert!(!health_state.is_alive());
        assert!(!health_state.is_ready());
    }
}
