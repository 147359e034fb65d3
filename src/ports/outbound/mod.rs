/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (issue tracker, file system, console).
pub mod graph_snapshot_store;
pub mod issue_source;
pub mod output_presenter;
pub mod progress_reporter;

pub use graph_snapshot_store::{GraphSnapshotStore, LoadedSnapshot};
pub use issue_source::IssueSource;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
