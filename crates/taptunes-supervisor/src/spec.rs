//! Static worker descriptors.

use std::fmt;
use std::path::PathBuf;

/// Whether a worker is required for the system to be considered up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerRole {
    /// Required: a startup failure aborts the whole run.
    Primary,

    /// Best-effort: started if possible, the system runs without it.
    Auxiliary,
}

/// A launch precondition evaluated before a worker is started.
///
/// A failed precondition on an auxiliary worker is a logged skip, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// The supervising process must run with an effective uid of root
    /// (required for direct pin access on the button service).
    RootUser,
}

impl Precondition {
    /// Evaluate the precondition in the current process.
    #[must_use]
    pub fn is_met(&self) -> bool {
        match self {
            Precondition::RootUser => nix::unistd::Uid::effective().is_root(),
        }
    }
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Precondition::RootUser => write!(f, "root privileges"),
        }
    }
}

/// Static descriptor of one supervised worker.
///
/// Immutable after construction; the supervisor owns a fixed roster of
/// these and restarts exited workers from the same descriptor.
///
/// # Examples
///
/// ```
/// use taptunes_supervisor::spec::{Precondition, WorkerSpec};
///
/// let backend = WorkerSpec::primary("backend", "node")
///     .with_arg("dist/index.js")
///     .with_current_dir("/home/pi/taptunes/backend")
///     .with_env("PORT", "3001");
///
/// let buttons = WorkerSpec::auxiliary("buttons", "/usr/local/bin/taptunes")
///     .with_arg("buttons")
///     .with_precondition(Precondition::RootUser);
///
/// assert!(backend.is_primary());
/// assert!(!buttons.is_primary());
/// ```
#[derive(Debug, Clone)]
pub struct WorkerSpec {
    /// Worker name, unique within the roster.
    pub name: String,

    /// Program to execute.
    pub program: String,

    /// Program arguments.
    pub args: Vec<String>,

    /// Working directory for the child, if any.
    pub cwd: Option<PathBuf>,

    /// Environment entries set on top of the inherited environment.
    pub env: Vec<(String, String)>,

    /// Primary or auxiliary.
    pub role: WorkerRole,

    /// Optional launch precondition.
    pub precondition: Option<Precondition>,
}

impl WorkerSpec {
    fn new(name: impl Into<String>, program: impl Into<String>, role: WorkerRole) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            role,
            precondition: None,
        }
    }

    /// Create a primary worker descriptor.
    pub fn primary(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self::new(name, program, WorkerRole::Primary)
    }

    /// Create an auxiliary worker descriptor.
    pub fn auxiliary(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self::new(name, program, WorkerRole::Auxiliary)
    }

    /// Append one argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    #[must_use]
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Add one environment entry.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Set the launch precondition.
    #[must_use]
    pub fn with_precondition(mut self, precondition: Precondition) -> Self {
        self.precondition = Some(precondition);
        self
    }

    /// Returns `true` for [`WorkerRole::Primary`].
    #[must_use]
    pub fn is_primary(&self) -> bool {
        matches!(self.role, WorkerRole::Primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_builder() {
        let spec = WorkerSpec::primary("backend", "node")
            .with_arg("dist/index.js")
            .with_current_dir("/srv/backend")
            .with_env("NODE_ENV", "production")
            .with_env("PORT", "3001");

        assert_eq!(spec.name, "backend");
        assert_eq!(spec.args, vec!["dist/index.js"]);
        assert_eq!(spec.cwd.as_deref(), Some(std::path::Path::new("/srv/backend")));
        assert_eq!(spec.env.len(), 2);
        assert!(spec.is_primary());
        assert!(spec.precondition.is_none());
    }

    #[test]
    fn test_auxiliary_with_precondition() {
        let spec = WorkerSpec::auxiliary("buttons", "taptunes")
            .with_args(["buttons", "--backend-url", "http://localhost:3001"])
            .with_precondition(Precondition::RootUser);

        assert!(!spec.is_primary());
        assert_eq!(spec.precondition, Some(Precondition::RootUser));
        assert_eq!(spec.args.len(), 3);
    }

    #[test]
    fn test_precondition_display() {
        assert_eq!(Precondition::RootUser.to_string(), "root privileges");
    }
}
