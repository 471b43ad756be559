//! Per-note color scheme selection.
//!
//! The scheme set is closed: ten named sticky-note variants, each stored in
//! the brain as a theme resource path under the note's id.

use crate::brain::{Brain, BrainError, COLOR_SCHEME_KEY};

pub const SCHEMES: [&str; 10] = [
    "Orange",
    "Yellow",
    "Green",
    "GreenLight",
    "Blue",
    "BlueLight",
    "Purple",
    "Pink",
    "Gray",
    "White",
];

/// Resource path stored in the brain for a scheme name.
pub fn scheme_path(name: &str) -> String {
    format!("themes/Sticky-{name}.theme")
}

/// Recover the scheme name from a stored resource path.
pub fn scheme_name(path: &str) -> Option<&str> {
    path.rsplit('/')
        .next()?
        .strip_prefix("Sticky-")?
        .strip_suffix(".theme")
}

/// The display the host applies a scheme to. Process-local, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayState {
    pub color_scheme: Option<String>,
}

/// One open picker session over the scheme set.
///
/// Captures the display state when it opens so a cancelled session can put
/// things back exactly; highlighting previews a scheme without touching the
/// brain, and only a committed selection is persisted.
#[derive(Debug)]
pub struct SchemeSelector {
    original: DisplayState,
}

impl SchemeSelector {
    pub fn open(state: &DisplayState) -> Self {
        Self { original: state.clone() }
    }

    /// Live preview while a choice is highlighted.
    pub fn highlight(&self, state: &mut DisplayState, name: &str) {
        state.color_scheme = Some(scheme_path(name));
    }

    /// Commit the session: `Some(name)` records the scheme under `id` and
    /// saves the brain immediately; `None` (cancel) restores the captured
    /// display state and leaves the brain untouched.
    pub fn finish(
        self,
        brain: &mut Brain,
        id: &str,
        choice: Option<&str>,
        state: &mut DisplayState,
    ) -> Result<(), BrainError> {
        match choice {
            Some(name) => {
                let path = scheme_path(name);
                state.color_scheme = Some(path.clone());
                brain.set(id, COLOR_SCHEME_KEY, &path);
                brain.save()
            }
            None => {
                *state = self.original;
                Ok(())
            }
        }
    }
}
