use std::fmt;
use std::path::PathBuf;

/// What happened to a single module during a link run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new link was created in `node_modules`.
    Linked { name: String, version: String },
    /// The module was already linked and its recorded range changed or was added.
    Updated { name: String, version: String },
    /// The module was already linked and its range is unchanged.
    Unchanged { name: String },
    /// The module was already linked and version refresh is disabled.
    AlreadyLinked { name: String },
}

impl LinkOutcome {
    pub fn name(&self) -> &str {
        match self {
            LinkOutcome::Linked { name, .. }
            | LinkOutcome::Updated { name, .. }
            | LinkOutcome::Unchanged { name }
            | LinkOutcome::AlreadyLinked { name } => name,
        }
    }

    /// Whether the run printed a line for this module.
    pub fn is_notable(&self) -> bool {
        matches!(
            self,
            LinkOutcome::Linked { .. } | LinkOutcome::Updated { .. }
        )
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkOutcome::Linked { name, version } => {
                write!(f, "✅ Linked \"{}@{}\".", name, version)
            }
            LinkOutcome::Updated { name, version } => {
                write!(f, "🔄 Updated \"{}@{}\".", name, version)
            }
            LinkOutcome::Unchanged { name } => write!(f, "\"{}\" is up to date.", name),
            LinkOutcome::AlreadyLinked { name } => write!(f, "\"{}\" is already linked.", name),
        }
    }
}

/// Result of a link run
#[derive(Debug)]
pub struct LinkReport {
    /// The manifest that was rewritten
    pub manifest_path: PathBuf,
    /// One outcome per processed module, in processing order
    pub outcomes: Vec<LinkOutcome>,
}

impl LinkReport {
    pub fn linked_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, LinkOutcome::Linked { .. }))
            .count()
    }
}
