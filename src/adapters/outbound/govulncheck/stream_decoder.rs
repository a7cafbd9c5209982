use super::report::ReportVuln;
use crate::shared::error::SourceAnalysisError;
use crate::shared::Result;
use crate::source_analysis::domain::Finding;
use serde::Deserialize;

/// One message of the govulncheck JSON stream. Only vulnerability findings
/// are of interest; config and progress messages decode to `None`.
#[derive(Debug, Deserialize)]
struct StreamMessage {
    #[serde(default)]
    vulnerability: Option<ReportVuln>,
}

/// Incremental decoder for the govulncheck JSON message stream.
///
/// Messages are concatenated JSON values, usually pretty-printed and
/// separated by whitespace. Chunks may split a message anywhere; the
/// incomplete tail is kept until more bytes arrive.
///
/// New bytes are scanned once for top-level value boundaries, and the JSON
/// parser only runs when a value may have ended, so a large message spread
/// over many chunks is parsed once.
#[derive(Debug, Default)]
pub struct FindingStreamDecoder {
    buffer: Vec<u8>,
    boundary: BoundaryScanner,
    findings: Vec<Finding>,
}

/// Tracks nesting over the bytes of the buffer seen so far.
#[derive(Debug, Default)]
struct BoundaryScanner {
    scanned: usize,
    depth: usize,
    in_string: bool,
    escaped: bool,
    /// A top-level value may be complete; set until the buffer is parsed.
    ready: bool,
}

impl BoundaryScanner {
    fn scan(&mut self, buffer: &[u8]) {
        for &byte in &buffer[self.scanned..] {
            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if byte == b'\\' {
                    self.escaped = true;
                } else if byte == b'"' {
                    self.in_string = false;
                }
                continue;
            }
            match byte {
                b'{' | b'[' => self.depth += 1,
                b'}' | b']' if self.depth > 0 => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        self.ready = true;
                    }
                }
                b'"' if self.depth > 0 => self.in_string = true,
                b if b.is_ascii_whitespace() => {}
                // Top-level scalars and stray bytes go straight to the parser
                _ if self.depth == 0 => self.ready = true,
                _ => {}
            }
        }
        self.scanned = buffer.len();
    }
}

impl FindingStreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes every complete message available after appending `chunk`.
    ///
    /// # Errors
    /// Returns `AnalysisFailed` as soon as the stream holds bytes that can
    /// never form a valid message.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(chunk);
        self.boundary.scan(&self.buffer);
        if !self.boundary.ready {
            return Ok(());
        }
        self.drain()
    }

    /// Ends the stream and returns the decoded findings in stream order.
    ///
    /// # Errors
    /// Returns `AnalysisFailed` if the stream ended inside a message.
    pub fn finish(mut self) -> Result<Vec<Finding>> {
        self.drain()?;
        if self.buffer.iter().any(|b| !b.is_ascii_whitespace()) {
            return Err(SourceAnalysisError::AnalysisFailed {
                details: format!(
                    "govulncheck output ended inside a message ({} bytes left)",
                    self.buffer.len()
                ),
            }
            .into());
        }
        Ok(self.findings)
    }

    fn drain(&mut self) -> Result<()> {
        let consumed = {
            let mut consumed = 0;
            let mut stream =
                serde_json::Deserializer::from_slice(&self.buffer).into_iter::<StreamMessage>();

            loop {
                match stream.next() {
                    Some(Ok(message)) => {
                        consumed = stream.byte_offset();
                        if let Some(vuln) = message.vulnerability {
                            self.findings.push(vuln.into());
                        }
                    }
                    // Incomplete message, wait for the next chunk
                    Some(Err(e)) if e.is_eof() => break,
                    Some(Err(e)) => {
                        return Err(SourceAnalysisError::AnalysisFailed {
                            details: format!("undecodable govulncheck output: {}", e),
                        }
                        .into());
                    }
                    None => {
                        consumed = stream.byte_offset();
                        break;
                    }
                }
            }
            consumed
        };

        self.buffer.drain(..consumed);
        // The tail starts at a message boundary; rescan it from scratch.
        self.boundary = BoundaryScanner::default();
        self.boundary.scan(&self.buffer);
        Ok(())
    }
}
