/// Domain layer: issue model, the issue graph, and the pure services that
/// build, filter, project and render it
pub mod domain;
pub mod services;
