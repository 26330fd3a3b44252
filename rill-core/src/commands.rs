use crate::action::CommandResult;
use crate::config::Command;
use crate::filter::Direction;
use crate::flags;
use crate::host::Host;
use crate::navigation::{self, is_marked, is_unread};
use crate::reconcile::{self, FilterScope};
use crate::state::ViewState;

/// Built-in dispatch table: run one named command against the view.
pub fn run(command: Command, state: &mut ViewState, host: &mut dyn Host) -> CommandResult {
    match command {
        Command::NextItem => navigation::next_entry(state, host),
        Command::PrevItem => navigation::prev_entry(state, host),
        Command::NextTag => navigation::next_group(state, host),
        Command::PrevTag => navigation::prev_group(state, host),
        Command::NextMark => navigation::next_filtered(state, host, &is_marked),
        Command::PrevMark => navigation::prev_filtered(state, host, &is_marked),
        Command::NextUnread => navigation::next_filtered(state, host, &is_unread),
        Command::PrevUnread => navigation::prev_filtered(state, host, &is_unread),

        Command::JustRead => flags::mark_read(state, true),
        Command::JustUnread => flags::mark_read(state, false),
        Command::TagRead => flags::group_read(state, true),
        Command::TagUnread => flags::group_read(state, false),
        Command::AllRead => flags::all_read(state, true),
        Command::AllUnread => flags::all_read(state, false),
        Command::ToggleMark => flags::toggle_mark(state),
        Command::AllUnmarked => flags::clear_marks(state),

        Command::ToggleCollapseTag => reconcile::toggle_collapse_current(state, host),
        Command::SetCollapseAll => reconcile::set_collapse_all(state, host, true),
        Command::UnsetCollapseAll => reconcile::set_collapse_all(state, host, false),
        Command::NextFilter => reconcile::cycle_filter(state, Direction::Forward, FilterScope::Global),
        Command::PrevFilter => {
            reconcile::cycle_filter(state, Direction::Backward, FilterScope::Global)
        }
        Command::NextTagFilter => {
            reconcile::cycle_filter(state, Direction::Forward, FilterScope::CurrentGroup)
        }
        Command::PrevTagFilter => {
            reconcile::cycle_filter(state, Direction::Backward, FilterScope::CurrentGroup)
        }
        Command::ForceUpdate => CommandResult::RebuildAndRedraw,

        Command::Quit => {
            host.on_session_end(state);
            CommandResult::Terminate
        }

        // Prompt handling belongs to the host; the view has nothing to do
        Command::InlineSearch
        | Command::DeleteBackwardChar
        | Command::DeleteBackwardWord
        | Command::Confirm
        | Command::Cancel
        | Command::Noop => CommandResult::Handled,
    }
}
