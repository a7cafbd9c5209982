//! govulncheck adapters
//!
//! Runs govulncheck against a module root using a locally written
//! vulnerability database and decodes its JSON output into findings.
//! Two invocation styles exist:
//! - legacy: `GOVULNDB=file://<db> govulncheck -json ./...`, one buffered document
//! - streaming: `govulncheck -db file://<db> -json ./...`, a message stream
//!   decoded incrementally

mod legacy_producer;
mod report;
mod stream_decoder;
mod streaming_producer;
mod toolchain;

pub use legacy_producer::LegacyGovulncheckProducer;
pub use stream_decoder::FindingStreamDecoder;
pub use streaming_producer::StreamingGovulncheckProducer;
pub use toolchain::{GovulncheckConfig, DEFAULT_TIMEOUT_SECS};
