//! Web front end
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | question form |
//! | `POST /solve` | form submission (text or image), renders the solution |
//! | `POST /api/solve` | JSON API returning a `SolveResult` |
//! | `GET /health` | health check |

mod handlers;
mod router;
mod state;


pub use handlers::{api_status, page_status};
pub use router::{MAX_UPLOAD_BYTES, router};
pub use state::AppState;

use tokio::net::TcpListener;
use tracing::info;

/// Serve the app on `addr` until Ctrl-C
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            tracing::warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
