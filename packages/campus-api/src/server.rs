//! Hyper server setup and request handling.

use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming as IncomingBody};
use hyper::{Request, Response, Result as HyperResult};
use hyper_util::rt::TokioExecutor;
use hyper_util::rt::TokioIo;
use hyper_util::server::conn::auto::Builder as ConnectionBuilder;
use tokio::net::TcpListener;

use crate::router::Router;

/// HTTP server for the campus registry API.
pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
}

impl Server {
    /// Binds a listener and prepares the server.
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to (port 0 picks an ephemeral port)
    /// * `router` - Request router
    pub async fn bind(addr: SocketAddr, router: Router) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            router: Arc::new(router),
        })
    }

    /// Returns the bound local address.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    /// Runs the accept loop.
    ///
    /// # Returns
    /// `Result<(), std::io::Error>` indicating success or failure.
    pub async fn serve(self) -> Result<(), std::io::Error> {
        tracing::info!("Server listening on http://{}", self.local_addr()?);

        loop {
            let (stream, _) = self.listener.accept().await?;
            let io = TokioIo::new(stream);
            let router = Arc::clone(&self.router);

            tokio::task::spawn(async move {
                let builder = ConnectionBuilder::new(TokioExecutor::new());
                if let Err(err) = builder
                    .serve_connection(
                        io,
                        hyper::service::service_fn(move |req| handle_request(req, router.clone())),
                    )
                    .await
                {
                    tracing::error!("Error serving connection: {}", err);
                }
            });
        }
    }
}

/// Handles an incoming HTTP request.
async fn handle_request(
    req: Request<IncomingBody>,
    router: Arc<Router>,
) -> HyperResult<Response<Full<Bytes>>> {
    match router.route(req).await {
        Ok(response) => Ok(response.map(Full::new)),
        Err(err) => {
            tracing::debug!("Request failed: {}", err);
            Ok(Response::<Bytes>::from(err).map(Full::new))
        }
    }
}
