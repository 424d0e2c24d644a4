//! Line transport for the MCP server.
//!
//! Implements the stdio framing used by MCP:
//!
//! - Messages are JSON-RPC objects, one per line
//! - Messages are delimited by newlines (a trailing `\r` is tolerated)
//! - Outgoing messages never contain embedded newlines
//! - stdin: receives messages from client
//! - stdout: sends messages to client
//! - stderr: may be used for logging (not MCP messages)
//!
//! The transport is generic over its streams so the server loop can be
//! driven from in-memory buffers in tests.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::TransportError;
use crate::mcp::protocol::Message;

/// Transport bound to the process's stdin and stdout.
pub type StdioTransport = Transport<BufReader<tokio::io::Stdin>, tokio::io::Stdout>;

/// A newline-delimited JSON transport over a reader/writer pair.
pub struct Transport<R, W> {
    /// Buffered input stream.
    reader: R,
    /// Output stream.
    writer: W,
}

impl StdioTransport {
    /// Creates a transport over stdin/stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Transport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a transport over the given streams.
    #[must_use]
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads the next line, without its terminator.
    ///
    /// Returns `None` at end of input. The bytes are returned as-is; they
    /// are not required to be valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the stream fails.
    pub async fn read_line(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let bytes_read = self.reader.read_until(b'\n', &mut line).await?;

        if bytes_read == 0 {
            return Ok(None);
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }

        Ok(Some(line))
    }

    /// Serialises a message as one line of JSON and flushes it.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Encode`] if the message cannot be
    /// serialised (nothing is written), or [`TransportError::Io`] if the
    /// write fails.
    pub async fn write_message(&mut self, message: &Message) -> Result<(), TransportError> {
        let json = serde_json::to_string(message).map_err(TransportError::Encode)?;

        // MCP spec: messages must not contain embedded newlines
        debug_assert!(
            !json.contains('\n'),
            "JSON message must not contain embedded newlines"
        );

        let mut frame = json.into_bytes();
        frame.push(b'\n');
        self.writer.write_all(&frame).await?;
        self.writer.flush().await?;

        Ok(())
    }

    /// Consumes the transport, returning the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::RequestId;
    use serde_json::json;

    #[tokio::test]
    async fn read_lines_strips_terminators() {
        let input: &[u8] = b"first\r\nsecond\n\nlast";
        let mut transport = Transport::new(input, Vec::new());

        assert_eq!(transport.read_line().await.unwrap(), Some(b"first".to_vec()));
        assert_eq!(transport.read_line().await.unwrap(), Some(b"second".to_vec()));
        assert_eq!(transport.read_line().await.unwrap(), Some(Vec::new()));
        assert_eq!(transport.read_line().await.unwrap(), Some(b"last".to_vec()));
        assert_eq!(transport.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn read_line_keeps_invalid_utf8() {
        let input: &[u8] = b"\xff\xfe\n";
        let mut transport = Transport::new(input, Vec::new());
        assert_eq!(
            transport.read_line().await.unwrap(),
            Some(vec![0xff, 0xfe])
        );
    }

    #[tokio::test]
    async fn write_message_is_single_line() {
        let mut transport = Transport::new(&b""[..], Vec::new());
        let response = Message::success(
            Some(RequestId::from(1)),
            json!({
                "message": "hello\nworld",
                "nested": {"key": "value"}
            }),
        );

        transport.write_message(&response).await.unwrap();

        let (_, written) = transport.into_inner();
        assert_eq!(written.iter().filter(|&&b| b == b'\n').count(), 1);
        assert_eq!(written.last(), Some(&b'\n'));
        let decoded: Message = serde_json::from_slice(&written).unwrap();
        assert_eq!(decoded, response);
    }

    #[tokio::test]
    async fn write_message_matches_mock_stream() {
        let writer = tokio_test::io::Builder::new()
            .write(b"{\"jsonrpc\":\"2.0\",\"id\":\"a\",\"result\":{}}\n")
            .build();
        let mut transport = Transport::new(&b""[..], writer);

        transport
            .write_message(&Message::success(Some(RequestId::from("a")), json!({})))
            .await
            .unwrap();
    }
}
