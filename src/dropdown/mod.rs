// src/dropdown/mod.rs
//! Headless interaction state for a category dropdown.
//!
//! Pure transition logic, no rendering and no I/O: the UI host feeds
//! events in and executes the returned [`Action`]s (start a fetch, or
//! navigate to a post route). Fetch deduplication is not this machine's
//! job; the content client already guarantees at most one network call
//! per fresh cache key, so redundant `StartFetch` actions are cheap.

/// Where the dropdown's post data is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    NotFetched,
    Fetching,
    Fetched,
}

impl Default for FetchPhase {
    fn default() -> Self {
        FetchPhase::NotFetched
    }
}

/// Events the UI host feeds into the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent {
    /// Mount-time prefetch timer fired.
    MountPrefetch,
    /// Pointer entered the trigger button.
    HoverEnter,
    /// Trigger button clicked (toggles open/closed).
    Click,
    /// A previously started fetch finished.
    FetchCompleted,
    /// Escape key pressed.
    Escape,
    /// Click landed outside the dropdown.
    OutsideClick,
    /// A post (or nothing) was chosen from the open list.
    SelectPost { slug: Option<String> },
}

/// What the host must do after applying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Kick off `posts_by_category` for this dropdown's category.
    StartFetch,
    /// Route to the given path (client-side navigation).
    Navigate(String),
}

/// Open/closed × fetch-phase state machine.
///
/// Prefetch events never change the visual open state. A click that
/// arrives before data is available keeps the dropdown closed and opens
/// it when `FetchCompleted` lands.
#[derive(Debug, Default)]
pub struct DropdownState {
    open: bool,
    phase: FetchPhase,
    open_pending: bool,
}

impl DropdownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Applies one event and returns the action the host must take.
    pub fn apply(&mut self, event: DropdownEvent) -> Action {
        match event {
            DropdownEvent::MountPrefetch | DropdownEvent::HoverEnter => {
                if self.phase == FetchPhase::NotFetched {
                    self.phase = FetchPhase::Fetching;
                    Action::StartFetch
                } else {
                    Action::None
                }
            }
            DropdownEvent::Click => {
                if self.open {
                    self.open = false;
                    return Action::None;
                }
                match self.phase {
                    FetchPhase::Fetched => {
                        self.open = true;
                        Action::None
                    }
                    FetchPhase::Fetching => {
                        // Open is gated behind the in-flight fetch.
                        self.open_pending = true;
                        Action::None
                    }
                    FetchPhase::NotFetched => {
                        self.phase = FetchPhase::Fetching;
                        self.open_pending = true;
                        Action::StartFetch
                    }
                }
            }
            DropdownEvent::FetchCompleted => {
                self.phase = FetchPhase::Fetched;
                if self.open_pending {
                    self.open_pending = false;
                    self.open = true;
                }
                Action::None
            }
            DropdownEvent::Escape | DropdownEvent::OutsideClick => {
                self.open = false;
                self.open_pending = false;
                Action::None
            }
            DropdownEvent::SelectPost { slug } => {
                self.open = false;
                match slug {
                    Some(slug) => Action::Navigate(format!("/{}/", slug)),
                    None => Action::None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mount_prefetch_starts_fetch_without_opening() {
        let mut state = DropdownState::new();
        assert_eq!(state.apply(DropdownEvent::MountPrefetch), Action::StartFetch);
        assert_eq!(state.phase(), FetchPhase::Fetching);
        assert!(!state.is_open());
    }

    #[test]
    fn hover_while_fetching_is_a_noop() {
        let mut state = DropdownState::new();
        state.apply(DropdownEvent::HoverEnter);
        assert_eq!(state.apply(DropdownEvent::HoverEnter), Action::None);
        assert_eq!(state.apply(DropdownEvent::MountPrefetch), Action::None);
    }

    #[test]
    fn click_before_any_fetch_starts_one_and_gates_open() {
        let mut state = DropdownState::new();
        assert_eq!(state.apply(DropdownEvent::Click), Action::StartFetch);
        assert!(!state.is_open());

        assert_eq!(state.apply(DropdownEvent::FetchCompleted), Action::None);
        assert!(state.is_open());
        assert_eq!(state.phase(), FetchPhase::Fetched);
    }

    #[test]
    fn click_during_prefetch_waits_for_completion() {
        let mut state = DropdownState::new();
        state.apply(DropdownEvent::MountPrefetch);
        assert_eq!(state.apply(DropdownEvent::Click), Action::None);
        assert!(!state.is_open());

        state.apply(DropdownEvent::FetchCompleted);
        assert!(state.is_open());
    }

    #[test]
    fn prefetch_completion_without_click_stays_closed() {
        let mut state = DropdownState::new();
        state.apply(DropdownEvent::MountPrefetch);
        state.apply(DropdownEvent::FetchCompleted);
        assert!(!state.is_open());
    }

    #[test]
    fn click_toggles_once_fetched() {
        let mut state = DropdownState::new();
        state.apply(DropdownEvent::MountPrefetch);
        state.apply(DropdownEvent::FetchCompleted);

        state.apply(DropdownEvent::Click);
        assert!(state.is_open());
        state.apply(DropdownEvent::Click);
        assert!(!state.is_open());
    }

    #[test]
    fn escape_and_outside_click_force_close() {
        let mut state = DropdownState::new();
        state.apply(DropdownEvent::MountPrefetch);
        state.apply(DropdownEvent::FetchCompleted);
        state.apply(DropdownEvent::Click);
        assert!(state.is_open());

        state.apply(DropdownEvent::Escape);
        assert!(!state.is_open());

        state.apply(DropdownEvent::Click);
        state.apply(DropdownEvent::OutsideClick);
        assert!(!state.is_open());
    }

    #[test]
    fn escape_cancels_a_pending_open() {
        let mut state = DropdownState::new();
        state.apply(DropdownEvent::Click);
        state.apply(DropdownEvent::Escape);
        state.apply(DropdownEvent::FetchCompleted);
        assert!(!state.is_open());
    }

    #[test]
    fn selecting_a_post_closes_and_navigates() {
        let mut state = DropdownState::new();
        state.apply(DropdownEvent::MountPrefetch);
        state.apply(DropdownEvent::FetchCompleted);
        state.apply(DropdownEvent::Click);

        let action = state.apply(DropdownEvent::SelectPost {
            slug: Some("merkpositionering-in-2024".to_string()),
        });
        assert_eq!(
            action,
            Action::Navigate("/merkpositionering-in-2024/".to_string())
        );
        assert!(!state.is_open());
    }

    #[test]
    fn selecting_nothing_closes_without_navigation() {
        let mut state = DropdownState::new();
        state.apply(DropdownEvent::Click);
        state.apply(DropdownEvent::FetchCompleted);
        assert_eq!(
            state.apply(DropdownEvent::SelectPost { slug: None }),
            Action::None
        );
        assert!(!state.is_open());
    }
}
