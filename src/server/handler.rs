//! GET and POST handling.
//!
//! GET serves a file below the content root. POST stores the request body
//! at the configured upload path, either verbatim or, for
//! `multipart/form-data`, the payload of the first part.

use std::io;
use std::path::Path;

use log::{debug, info, warn};
use tokio::fs::{self, File};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use crate::parser::{
    extract_boundary, is_multipart, locate_payload, parse_request, sanitize_path,
    Error as ParserError, Method, ParsedRequest,
};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::mime::content_type_for;
use crate::server::reader::RequestBuffer;
use crate::server::response::{HttpResponse, StatusCode};

/// Plain-text acknowledgement for a raw upload.
pub const RAW_UPLOAD_ACK: &str = "OK";

/// Parse a buffered request and produce its response.
///
/// `stream` is only read from, and only when a POST body is longer than what
/// is already buffered.
pub async fn handle_request<S>(
    stream: &mut S,
    buffer: &RequestBuffer,
    config: &ServerConfig,
) -> Result<HttpResponse, Error>
where
    S: AsyncRead + Unpin,
{
    let request = parse_request(buffer.as_bytes())?;
    debug!(
        "{} {} {} (Content-Length: {})",
        request.method,
        request.target,
        request.version,
        buffer.content_length()
    );

    match request.method() {
        Ok(Method::GET) => serve_file(&request, config).await,
        Ok(Method::POST) => receive_upload(stream, &request, buffer, config).await,
        Err(_) => Err(Error::MethodNotAllowed(request.method)),
    }
}

/// Answer a GET with the contents of the requested file.
pub async fn serve_file(request: &ParsedRequest, config: &ServerConfig) -> Result<HttpResponse, Error> {
    let path = sanitize_path(&request.target)?;
    let full_path = path.resolve(&config.content_root);

    let contents = match fs::read(&full_path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(Error::Forbidden(path.to_string()));
        }
        Err(e) => {
            debug!("Reading {} failed: {e}", full_path.display());
            return Err(Error::NotFound(path.to_string()));
        }
    };

    info!("Serving {path} ({} bytes)", contents.len());
    Ok(HttpResponse::new(StatusCode::Ok)
        .with_content_type(content_type_for(path.as_str()))
        .with_body_bytes(contents))
}

/// Answer a POST by storing its body, or the file inside it, at the upload path.
pub async fn receive_upload<S>(
    stream: &mut S,
    request: &ParsedRequest,
    buffer: &RequestBuffer,
    config: &ServerConfig,
) -> Result<HttpResponse, Error>
where
    S: AsyncRead + Unpin,
{
    if buffer.header_end().is_none() {
        return Err(ParserError::IncompleteHeaders.into());
    }

    // Length and early body bytes both come from the reader's header pass.
    let declared = buffer.content_length();
    let buffered = buffer.buffered_body();
    let buffered = &buffered[..buffered.len().min(declared)];

    match request.content_type.as_deref().filter(|ct| is_multipart(ct)) {
        Some(content_type) => {
            let boundary = extract_boundary(content_type).map_err(ParserError::from)?;
            let body = read_body(stream, buffered, declared, config.read_chunk_size).await?;
            let payload = locate_payload(&body, boundary).map_err(ParserError::from)?;

            fs::write(&config.upload_path, &body[payload.clone()])
                .await
                .map_err(|source| storage_error(&config.upload_path, source))?;
            info!(
                "Stored {} byte multipart upload at {}",
                payload.len(),
                config.upload_path.display()
            );

            Ok(HttpResponse::new(StatusCode::Ok)
                .with_content_type("text/html")
                .with_body_string(upload_page(&config.upload_path)))
        }
        None => {
            let written = store_raw_body(stream, buffered, declared, config).await?;
            info!(
                "Stored {written} byte upload at {}",
                config.upload_path.display()
            );

            Ok(HttpResponse::new(StatusCode::Ok)
                .with_content_type("text/plain")
                .with_body_string(RAW_UPLOAD_ACK))
        }
    }
}

/// Stream the body to the upload path as it arrives.
///
/// Stops at `declared` bytes or when the peer closes, whichever is first.
async fn store_raw_body<S>(
    stream: &mut S,
    buffered: &[u8],
    declared: usize,
    config: &ServerConfig,
) -> Result<usize, Error>
where
    S: AsyncRead + Unpin,
{
    let path = config.upload_path.as_path();
    let mut file = File::create(path)
        .await
        .map_err(|source| storage_error(path, source))?;
    file.write_all(buffered)
        .await
        .map_err(|source| storage_error(path, source))?;

    let mut chunk = vec![0u8; config.read_chunk_size.max(1)];
    let mut received = buffered.len();
    while received < declared {
        let data = next_body_chunk(stream, &mut chunk, declared - received).await?;
        if data.is_empty() {
            warn!("Peer closed after {received} of {declared} body bytes");
            break;
        }
        file.write_all(data)
            .await
            .map_err(|source| storage_error(path, source))?;
        received += data.len();
    }

    file.flush()
        .await
        .map_err(|source| storage_error(path, source))?;
    Ok(received)
}

/// Collect the whole body in memory, reading past what is buffered as needed.
async fn read_body<S>(
    stream: &mut S,
    buffered: &[u8],
    declared: usize,
    chunk_size: usize,
) -> Result<Vec<u8>, Error>
where
    S: AsyncRead + Unpin,
{
    let mut body = buffered.to_vec();
    let mut chunk = vec![0u8; chunk_size.max(1)];
    while body.len() < declared {
        let data = next_body_chunk(stream, &mut chunk, declared - body.len()).await?;
        if data.is_empty() {
            warn!("Peer closed after {} of {declared} body bytes", body.len());
            break;
        }
        body.extend_from_slice(data);
    }
    Ok(body)
}

/// Read at most `remaining` bytes; an empty slice means the peer closed.
async fn next_body_chunk<'a, S>(
    stream: &mut S,
    chunk: &'a mut [u8],
    remaining: usize,
) -> Result<&'a [u8], Error>
where
    S: AsyncRead + Unpin,
{
    let want = remaining.min(chunk.len());
    let n = stream.read(&mut chunk[..want]).await?;
    Ok(&chunk[..n])
}

fn storage_error(path: &Path, source: io::Error) -> Error {
    Error::Storage {
        path: path.to_path_buf(),
        source,
    }
}

fn upload_page(upload_path: &Path) -> String {
    let name = upload_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Upload complete</title></head>\n\
         <body>\n\
         <h1>Upload complete</h1>\n\
         <p>Saved as <a href=\"/{name}\">{name}</a></p>\n\
         <img src=\"/{name}\" alt=\"{name}\">\n\
         </body>\n\
         </html>\n"
    )
}
