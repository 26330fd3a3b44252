use crate::config::Command;
use crate::host::Host;
use crate::state::ViewState;
use std::fmt;

/// What the caller should do after an action ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// Nothing visible changed.
    Handled,
    /// Redraw from the current projection.
    RedrawOnly,
    /// Run a reconciliation pass, then redraw.
    RebuildAndRedraw,
    /// End the session.
    Terminate,
}

pub type ActionFn = Box<dyn FnMut(&mut ViewState, &mut dyn Host) -> CommandResult>;

/// Every user interaction produces an Action. Either a callable run directly against the view,
/// or a name looked up in the session's dispatch table.
pub enum Action {
    Direct(ActionFn),
    Named(String),
}

impl Action {
    pub fn direct(f: impl FnMut(&mut ViewState, &mut dyn Host) -> CommandResult + 'static) -> Self {
        Action::Direct(Box::new(f))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Action::Named(name.into())
    }
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        Action::Named(command.to_string())
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Direct(_) => f.write_str("Direct(..)"),
            Action::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}
