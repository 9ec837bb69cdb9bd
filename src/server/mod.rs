//! Host call interface.
//!
//! - [`handshake`] - version negotiation and the handshake line
//! - [`protocol`] - request/response messages
//!
//! After the handshake every stdin line is one request and every stdout
//! line is one response. Requests are handled in order on a single task.
//! The transport is JSON lines, not Terraform's gRPC plugin protocol.

mod handshake;
mod protocol;

pub use handshake::{
    handshake_line, negotiate_version, CORE_PROTOCOL_VERSION, SUPPORTED_PROTOCOL_VERSIONS,
};
pub use protocol::{decode_request, Request, Response};

use crate::error::FuncError;
use crate::logging::{CallContext, Logger};
use crate::provider::Provider;
use colored::Colorize;
use std::error::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Handle one request. The flag is true when the host asked us to stop.
pub fn handle_request(
    provider: &Provider,
    logger: &dyn Logger,
    request: Request,
) -> (Response, bool) {
    log::debug!("request {method}", method = request.method().on_blue());
    match request {
        Request::GetMetadata => (Response::Metadata(provider.metadata()), false),
        Request::GetProviderSchema => (Response::Schema(provider.schema()), false),
        Request::GetFunctions => (
            Response::Functions {
                functions: provider.definitions(),
            },
            false,
        ),
        Request::ConfigureProvider { config } => {
            provider.configure(&config);
            (Response::Empty {}, false)
        }
        Request::CallFunction { name, arguments } => {
            let ctx = CallContext::new(logger);
            let outcome = provider.call_function(&ctx, &name, arguments).map_err(|e| {
                log::debug!("{failed} {name}: {e}", failed = "failed".on_red());
                FuncError::from(e)
            });
            (Response::call(outcome), false)
        }
        Request::StopProvider => (Response::Empty {}, true),
    }
}

/// Serve requests from `reader`, writing responses to `writer`, until the
/// input ends or a `StopProvider` request arrives.
pub async fn serve_io<R, W>(
    provider: &Provider,
    logger: &dyn Logger,
    mut reader: R,
    mut writer: W,
) -> Result<usize, Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut handled = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        // A line that is not UTF-8 is answered like any other bad request.
        let decoded = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => decode_request(line.trim()),
            Err(e) => Err(format!("Error parsing request: invalid UTF-8: {e}")),
        };

        let (response, stop) = match decoded {
            Ok(request) => handle_request(provider, logger, request),
            Err(protocol_error) => {
                log::warn!("{protocol_error}");
                (Response::ProtocolError { protocol_error }, false)
            }
        };

        let mut json = serde_json::to_string(&response)
            .map_err(|e| format!("Error serializing response: {e}"))?;
        json.push('\n');
        writer.write_all(json.as_bytes()).await?;
        writer.flush().await?;
        handled += 1;

        if stop {
            log::info!("stop requested after {handled} request(s)");
            break;
        }
    }

    Ok(handled)
}

/// Print the handshake line and serve on stdin/stdout.
pub async fn serve(
    provider: &Provider,
    logger: &dyn Logger,
    offered_versions: Option<&[u32]>,
) -> Result<(), Box<dyn Error>> {
    let version = negotiate_version(offered_versions)?;

    let mut stdout = tokio::io::stdout();
    let line = format!("{}\n", handshake_line(version));
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;
    log::info!(
        "serving provider version {} on protocol {version}",
        provider.version()
    );

    let handled = serve_io(provider, logger, BufReader::new(tokio::io::stdin()), stdout).await?;
    log::info!("served {handled} request(s)");
    Ok(())
}
