/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod blocker_tree_request;
mod blocker_tree_response;
mod tree_direction;

pub use blocker_tree_request::{BlockerTreeRequest, BlockerTreeRequestBuilder};
pub use blocker_tree_response::BlockerTreeResponse;
pub use tree_direction::TreeDirection;
