/// Filesystem adapters for file I/O operations
mod directory_source;
mod file_writer;
mod snapshot_store;

pub use directory_source::DirectoryIssueSource;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use snapshot_store::JsonSnapshotStore;
