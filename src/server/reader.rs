//! Incremental request reading.

use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::parser::{content_length, find_header_end, HEADER_TERMINATOR};
use crate::server::error::Error;

/// Bytes read off a connection for one request.
///
/// Holds the complete header block plus whatever body bytes arrived in the
/// same reads.
#[derive(Debug)]
pub struct RequestBuffer {
    bytes: Vec<u8>,
    header_end: Option<usize>,
    content_length: usize,
}

impl RequestBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Offset just past the header terminator, if one was seen.
    pub fn header_end(&self) -> Option<usize> {
        self.header_end
    }

    /// Content-Length found in the header block, 0 if absent or unparsable.
    pub fn content_length(&self) -> usize {
        self.content_length
    }

    /// Body bytes that arrived together with the headers.
    pub fn buffered_body(&self) -> &[u8] {
        match self.header_end {
            Some(end) => &self.bytes[end..],
            None => &[],
        }
    }
}

/// Read from `stream` until the header terminator has been seen or the peer
/// closes the connection.
///
/// The buffer starts at `initial_capacity` and doubles whenever the next
/// chunk would not fit. A peer closing early is not an error; the returned
/// buffer then has no `header_end`.
pub async fn read_request<S>(
    stream: &mut S,
    initial_capacity: usize,
    chunk_size: usize,
) -> Result<RequestBuffer, Error>
where
    S: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(initial_capacity)
        .map_err(|_| Error::BufferGrowth { capacity: initial_capacity })?;

    let mut chunk = vec![0u8; chunk_size.max(1)];
    let mut header_end = None;

    while header_end.is_none() {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            debug!("Peer closed after {} bytes without ending the header block", bytes.len());
            break;
        }

        grow_to_fit(&mut bytes, n)?;

        // The terminator may straddle the previous chunk.
        let scan_from = bytes.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
        bytes.extend_from_slice(&chunk[..n]);
        header_end = find_header_end(&bytes[scan_from..]).map(|end| scan_from + end);
    }

    let content_length = header_end
        .and_then(|end| content_length(&bytes[..end]))
        .unwrap_or(0);

    Ok(RequestBuffer {
        bytes,
        header_end,
        content_length,
    })
}

/// Double the buffer's capacity until `incoming` more bytes fit.
fn grow_to_fit(buf: &mut Vec<u8>, incoming: usize) -> Result<(), Error> {
    let needed = buf.len() + incoming;
    if needed <= buf.capacity() {
        return Ok(());
    }

    let mut capacity = buf.capacity().max(1);
    while capacity < needed {
        capacity = capacity
            .checked_mul(2)
            .ok_or(Error::BufferGrowth { capacity: usize::MAX })?;
    }

    buf.try_reserve_exact(capacity - buf.len())
        .map_err(|_| Error::BufferGrowth { capacity })?;
    debug!("Request buffer grown to {capacity} bytes");
    Ok(())
}
