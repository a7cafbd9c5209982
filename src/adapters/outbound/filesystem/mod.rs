/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod vulndb_writer;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use vulndb_writer::FileSystemVulnDbWriter;
