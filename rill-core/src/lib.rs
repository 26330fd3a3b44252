pub mod action;
pub mod commands;
pub mod config;
pub mod entry;
pub mod event;
pub mod filter;
pub mod flags;
pub mod group;
pub mod host;
pub mod keyboard;
pub mod layout;
pub mod message;
pub mod navigation;
pub mod paths;
pub mod projection;
pub mod reconcile;
pub mod scroll;
pub mod selection;
pub mod session;
pub mod source;
pub mod state;

// Re-export commonly used types at crate root
pub use action::{Action, CommandResult};
pub use config::{Command, Config};
pub use entry::{Entry, EntryId};
pub use event::AppEvent;
pub use filter::{Filter, FilterCycle};
pub use group::{Group, GroupCollection};
pub use host::{Hooks, Host, Membership, Renderer, ViewContext};
pub use keyboard::KeyEvent;
pub use layout::Layout;
pub use projection::{Slot, ViewProjection};
pub use session::Session;
pub use source::EntrySource;
pub use state::{Mode, ViewState};
