/// Ports module defining interfaces for hexagonal architecture
///
/// Only outbound ports (driven ports) exist: the CLI drives the use case
/// directly, and the use case reaches the tracker, the filesystem and the
/// console through these interfaces.
pub mod outbound;
