use crate::issue_graph::services::Projection;

/// Which way the tree grows from the root issue
///
/// `Ancestors` lists what blocks the root (the default), `Descendants` what
/// the root blocks. Shared by the CLI, the config file and the use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeDirection {
    /// Issues blocking the root, transitively
    #[default]
    Ancestors,
    /// Issues blocked by the root, transitively
    Descendants,
}

impl TreeDirection {
    pub fn projection(self) -> Projection {
        match self {
            TreeDirection::Ancestors => Projection::Ancestors,
            TreeDirection::Descendants => Projection::Descendants,
        }
    }
}

impl std::str::FromStr for TreeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ancestors" | "blockers" => Ok(TreeDirection::Ancestors),
            "descendants" | "blocked" => Ok(TreeDirection::Descendants),
            _ => Err(format!(
                "Invalid direction: {}. Please specify 'ancestors' or 'descendants'",
                s
            )),
        }
    }
}

impl std::fmt::Display for TreeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeDirection::Ancestors => write!(f, "ancestors"),
            TreeDirection::Descendants => write!(f, "descendants"),
        }
    }
}
