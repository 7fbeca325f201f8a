//! Static file server for pages that must be loaded over HTTP.

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ProbeError, Result};

/// Serves a directory on an ephemeral loopback port until shut down.
#[derive(Debug)]
pub struct FixtureServer {
	base_url: Url,
	shutdown: oneshot::Sender<()>,
	task: JoinHandle<()>,
}

impl FixtureServer {
	pub async fn start(root: &Path) -> Result<Self> {
		let serve_error = |source| ProbeError::Serve {
			path: root.to_path_buf(),
			source,
		};

		let root = root.canonicalize().map_err(serve_error)?;
		if !root.is_dir() {
			return Err(serve_error(std::io::Error::new(
				std::io::ErrorKind::NotADirectory,
				"not a directory",
			)));
		}

		let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
			.await
			.map_err(serve_error)?;
		let addr = listener.local_addr().map_err(serve_error)?;
		let base_url = Url::parse(&format!("http://{addr}/"))
			.map_err(|e| ProbeError::Config(format!("server address {addr}: {e}")))?;

		let app = Router::new().fallback_service(ServeDir::new(&root).append_index_html_on_directories(true));
		let (shutdown, shutdown_rx) = oneshot::channel::<()>();

		let task = tokio::spawn(async move {
			let result = axum::serve(listener, app)
				.with_graceful_shutdown(async {
					let _ = shutdown_rx.await;
				})
				.await;
			if let Err(e) = result {
				warn!(target = "hoverprobe", "fixture server stopped: {e}");
			}
		});

		info!(target = "hoverprobe", root = %root.display(), %base_url, "serving fixtures");
		Ok(Self {
			base_url,
			shutdown,
			task,
		})
	}

	/// `http://127.0.0.1:<port>/`
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	pub async fn shutdown(self) {
		let _ = self.shutdown.send(());
		if let Err(e) = self.task.await {
			warn!(target = "hoverprobe", "fixture server task failed: {e}");
		}
		debug!(target = "hoverprobe", "fixture server stopped");
	}
}
