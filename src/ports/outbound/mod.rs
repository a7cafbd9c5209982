/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, analyzer process, console).
pub mod advisory_cache_writer;
pub mod advisory_reader;
pub mod finding_stream_producer;
pub mod output_presenter;
pub mod progress_reporter;

pub use advisory_cache_writer::AdvisoryCacheWriter;
pub use advisory_reader::{AdvisoryReader, PackageSourceReader};
pub use finding_stream_producer::FindingStreamProducer;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
