/// Use cases module containing application business logic orchestration
mod render_blocker_tree;

pub use render_blocker_tree::{render_blocker_tree, RenderBlockerTreeUseCase};
