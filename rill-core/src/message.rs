/// Shown whenever an operation needs a selection but nothing is projected.
pub const NO_ITEMS: &str = "No Items.";

/// Transient message channel. `active` is what the host shows now; `deferred` is promoted to
/// `active` at the end of the next reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages {
    active: Option<String>,
    deferred: Option<String>,
}

impl Messages {
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn deferred(&self) -> Option<&str> {
        self.deferred.as_deref()
    }

    pub fn show(&mut self, text: impl Into<String>) {
        self.active = Some(text.into());
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn defer(&mut self, text: impl Into<String>) {
        self.deferred = Some(text.into());
    }

    /// Move the deferred message into the active slot. Returns whether there was one.
    pub fn promote_deferred(&mut self) -> bool {
        match self.deferred.take() {
            Some(text) => {
                self.active = Some(text);
                true
            }
            None => false,
        }
    }
}
