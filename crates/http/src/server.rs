//! The TCP server driving requests through the header filter chain.
//!
//! Each connection serves exactly one request: the request head is decoded,
//! the location is looked up, the content phase produces a fixed response, the
//! head passes through the header filter chain and the connection is closed.

use crate::codec::{HeaderDecoder, HeaderEncoder};
use crate::conf::{HttpConf, Locations};
use crate::filter::HeaderFilterChain;
use crate::module::Modules;
use crate::protocol::{HttpError, ParseError, RequestHeader, ResponseHead, SendError};
use crate::request::RequestContext;
use bytes::BytesMut;
use futures::StreamExt;
use http::{HeaderValue, Response, StatusCode, header};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_util::codec::{Encoder, FramedRead};
use tracing::{debug, error, info, warn};

/// Body of every successful response.
const CONTENT: &[u8] = b"ok\n";

const TEXT_PLAIN_UTF_8: HeaderValue = HeaderValue::from_static("text/plain; charset=utf-8");
const CONNECTION_CLOSE: HeaderValue = HeaderValue::from_static("close");

#[derive(Debug)]
pub struct Server {
    listen: SocketAddr,
    locations: Locations,
    header_filters: HeaderFilterChain,
}

impl Server {
    /// Creates a server for a loaded configuration, building the header filter
    /// chain from the same modules the configuration was loaded with.
    pub fn new(conf: HttpConf, modules: &Modules) -> Self {
        let listen = conf.listen();
        Self { listen, locations: conf.into_locations(), header_filters: modules.header_filter_chain() }
    }

    pub fn listen(&self) -> SocketAddr {
        self.listen
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    /// Binds the configured address and serves until the process exits.
    ///
    /// # Errors
    ///
    /// Returns the error of binding the listener.
    pub async fn start(self) -> io::Result<()> {
        info!(listen = %self.listen, "start listening");
        let tcp_listener = match TcpListener::bind(self.listen).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return Err(e);
            }
        };

        Arc::new(self).serve(tcp_listener).await;
        Ok(())
    }

    /// Accepts connections from `tcp_listener` forever, one task per connection.
    pub async fn serve(self: Arc<Self>, tcp_listener: TcpListener) {
        loop {
            let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let server = Arc::clone(&self);

            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                match server.process(reader, writer).await {
                    Ok(()) => {
                        debug!(%remote_addr, "finished process, connection shutdown");
                    }
                    Err(e) => {
                        warn!(%remote_addr, cause = %e, "connection failed");
                    }
                }
            });
        }
    }

    /// Reads one request from `reader` and writes its response to `writer`.
    ///
    /// # Errors
    ///
    /// Fails if the request head can't be decoded (a `400` is still sent) or
    /// the response can't be written.
    pub async fn process<R, W>(&self, reader: R, mut writer: W) -> Result<(), HttpError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut framed = FramedRead::new(reader, HeaderDecoder);

        let header = match framed.next().await {
            Some(Ok(header)) => header,
            Some(Err(e)) => {
                warn!(cause = %e, "failed to decode request header");
                let response = bare_response(StatusCode::BAD_REQUEST);
                writer.write_all(&response).await.map_err(SendError::io)?;
                writer.shutdown().await.map_err(SendError::io)?;
                return Err(e.into());
            }
            None => return Err(ParseError::Incomplete.into()),
        };

        let response = self.respond(&header);
        writer.write_all(&response).await.map_err(SendError::io)?;
        writer.shutdown().await.map_err(SendError::io)?;
        Ok(())
    }

    /// Produces the raw response for a decoded request head.
    ///
    /// A failing header filter replaces the response with a bare one carrying
    /// the failure's status.
    pub fn respond(&self, header: &RequestHeader) -> BytesMut {
        let location = self.locations.find(header.path());
        let mut req = RequestContext::new(header, location);
        let mut head = content_head(CONTENT.len());

        match self.header_filters.run(&mut req, &mut head) {
            Ok(()) => {
                debug!(path = header.path(), location = location.prefix(), status = head.status().as_u16(), "request done");
                let mut output = req.into_output();
                if header.expects_body() {
                    output.extend_from_slice(CONTENT);
                }
                output
            }
            Err(e) => {
                error!(cause = %e, path = header.path(), location = location.prefix(), "header filter failed");
                bare_response(e.status())
            }
        }
    }
}

fn content_head(content_length: usize) -> ResponseHead {
    let mut head = Response::new(());
    let headers = head.headers_mut();
    headers.insert(header::CONTENT_TYPE, TEXT_PLAIN_UTF_8);
    headers.insert(header::CONTENT_LENGTH, content_length.into());
    headers.insert(header::CONNECTION, CONNECTION_CLOSE);
    head
}

/// An empty response that bypasses the header filters.
fn bare_response(status: StatusCode) -> BytesMut {
    let mut head = content_head(0);
    head.headers_mut().remove(header::CONTENT_TYPE);
    *head.status_mut() = status;

    let mut dst = BytesMut::new();
    if let Err(e) = HeaderEncoder.encode(&head, &mut dst) {
        error!(cause = %e, status = status.as_u16(), "failed to encode bare response");
    }
    dst
}
