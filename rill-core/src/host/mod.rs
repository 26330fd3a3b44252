pub mod mock;

use crate::entry::Entry;
use crate::filter::Filter;
use crate::group::Group;
use crate::layout::Layout;
use crate::state::ViewState;

/// What a renderer may consult while sizing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContext {
    pub layout: Layout,
    /// Active global filter. The entry's own group filter is `group.filters.current()`.
    pub filter: Filter,
}

/// Decides how many lines an entry occupies. Zero hides it from the projection.
///
/// `target_row` is the virtual row the entry would start at, counting the lines of every
/// entry projected before it.
pub trait Renderer {
    fn render(&mut self, group: &Group, entry: &Entry, target_row: usize, ctx: &ViewContext)
    -> usize;
}

/// Notification points fired by the engine. Every hook defaults to doing nothing.
pub trait Hooks {
    fn on_select(&mut self, _group: &Group, _entry: &Entry) {}
    fn on_unselect(&mut self, _group: &Group, _entry: &Entry) {}
    fn on_new(&mut self, _group: &Group, _entry: &Entry) {}
    fn on_update(&mut self, _state: &ViewState) {}
    fn on_session_start(&mut self, _state: &ViewState) {}
    fn on_session_end(&mut self, _state: &ViewState) {}
}

/// Decides which groups an entry belongs to during repopulation.
pub trait Membership {
    fn admits(&self, _group: &Group, _entry: &Entry) -> bool {
        true
    }
}

/// Everything the engine needs from its embedding application.
///
/// The engine never catches a panic raised by a renderer, hook, membership check or
/// navigation predicate. It unwinds out of whichever operation triggered it and reaches the
/// caller of `Session::dispatch` or `Session::refresh`, possibly mid-transaction.
pub trait Host: Renderer + Hooks + Membership {}

impl<T: Renderer + Hooks + Membership + ?Sized> Host for T {}

/// Membership by tag: a group with no tags admits everything, otherwise the entry needs one
/// of the group's tags.
pub fn tag_membership(group: &Group, entry: &Entry) -> bool {
    group.tags.is_empty() || group.tags.iter().any(|tag| entry.has_tag(tag))
}
