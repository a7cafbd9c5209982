/// Mock implementations for testing
mod mock_advisory_reader;
mod mock_cache_writer;
mod mock_finding_producer;
mod mock_progress_reporter;

pub use mock_advisory_reader::MockAdvisoryReader;
pub use mock_cache_writer::MockCacheWriter;
pub use mock_finding_producer::{MockFailure, MockFindingProducer, ProducerCall};
pub use mock_progress_reporter::MockProgressReporter;
