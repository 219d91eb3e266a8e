//! Navigation history management
//!
//! A list of resolved routes with a cursor:
//! - `push` drops everything after the cursor, then appends
//! - `replace` overwrites the entry under the cursor
//! - `go(n)` moves the cursor, clamped to the ends of the list
//! - optional size limit evicting the oldest entries

use crate::{NavigationDirection, ResolvedRoute, RouteChangeEvent};

/// Navigation history entry
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Route this entry resolved to
    pub route: ResolvedRoute,
}

impl HistoryEntry {
    /// Create a new history entry
    pub fn new(route: ResolvedRoute) -> Self {
        Self { route }
    }

    /// Full path of the entry
    pub fn full_path(&self) -> &str {
        &self.route.full_path
    }
}

/// Navigation history stack
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    current: usize,
    /// Maximum history size (0 = unlimited)
    max_size: usize,
}

impl History {
    /// Default limit on the number of entries
    pub const DEFAULT_MAX_SIZE: usize = 1000;

    /// Create a new history with an initial route
    pub fn new(initial: ResolvedRoute) -> Self {
        Self::with_max_size(initial, Self::DEFAULT_MAX_SIZE)
    }

    /// Create with custom max size
    pub fn with_max_size(initial: ResolvedRoute, max_size: usize) -> Self {
        Self {
            entries: vec![HistoryEntry::new(initial)],
            current: 0,
            max_size,
        }
    }

    /// Get the route under the cursor
    pub fn current(&self) -> &ResolvedRoute {
        &self.entries[self.current].route
    }

    /// Get the full path under the cursor
    pub fn current_path(&self) -> &str {
        self.entries[self.current].full_path()
    }

    /// Push a new route onto history
    ///
    /// This truncates any forward history and adds the new entry
    pub fn push(&mut self, route: ResolvedRoute) -> RouteChangeEvent {
        let from = Some(self.current_path().to_string());
        let to = route.full_path.clone();

        self.entries.truncate(self.current + 1);
        self.entries.push(HistoryEntry::new(route));
        self.current += 1;

        self.enforce_size_limit();

        RouteChangeEvent {
            from,
            to,
            direction: NavigationDirection::Forward,
        }
    }

    /// Replace the entry under the cursor
    pub fn replace(&mut self, route: ResolvedRoute) -> RouteChangeEvent {
        let from = Some(self.current_path().to_string());
        let to = route.full_path.clone();

        self.entries[self.current] = HistoryEntry::new(route);

        RouteChangeEvent {
            from,
            to,
            direction: NavigationDirection::Replace,
        }
    }

    /// Move the cursor by `delta`, clamped to the available entries
    ///
    /// Returns `None` when the cursor did not move.
    pub fn go(&mut self, delta: isize) -> Option<RouteChangeEvent> {
        let last = self.entries.len() - 1;
        let target = if delta.is_negative() {
            self.current.saturating_sub(delta.unsigned_abs())
        } else {
            self.current.saturating_add(delta.unsigned_abs()).min(last)
        };

        if target == self.current {
            return None;
        }

        let from = Some(self.current_path().to_string());
        let direction = if target < self.current {
            NavigationDirection::Back
        } else {
            NavigationDirection::Forward
        };
        self.current = target;

        Some(RouteChangeEvent {
            from,
            to: self.current_path().to_string(),
            direction,
        })
    }

    /// Go back one entry
    pub fn back(&mut self) -> Option<RouteChangeEvent> {
        self.go(-1)
    }

    /// Go forward one entry
    pub fn forward(&mut self) -> Option<RouteChangeEvent> {
        self.go(1)
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check if can go forward
    pub fn can_go_forward(&self) -> bool {
        self.current < self.entries.len() - 1
    }

    /// Get history length
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: history holds at least the initial entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get all entries
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Get current index
    pub fn current_index(&self) -> usize {
        self.current
    }

    fn enforce_size_limit(&mut self) {
        if self.max_size > 0 && self.entries.len() > self.max_size {
            let excess = self.entries.len() - self.max_size;
            self.entries.drain(0..excess);
            self.current = self.current.saturating_sub(excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str) -> ResolvedRoute {
        ResolvedRoute {
            path: path.to_string(),
            full_path: path.to_string(),
            ..ResolvedRoute::default()
        }
    }

    fn history_of(paths: &[&str]) -> History {
        let mut history = History::new(route(paths[0]));
        for path in &paths[1..] {
            history.push(route(path));
        }
        history
    }

    #[test]
    fn test_history_creation() {
        let history = History::new(route("/"));
        assert_eq!(history.current_path(), "/");
        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_history_push() {
        let history = history_of(&["/", "/users", "/users/add"]);
        assert_eq!(history.current_path(), "/users/add");
        assert_eq!(history.current_index(), 2);
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_history_back_forward() {
        let mut history = history_of(&["/", "/page1", "/page2"]);

        history.back();
        assert_eq!(history.current_path(), "/page1");
        assert!(history.can_go_forward());

        history.forward();
        assert_eq!(history.current_path(), "/page2");
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_go_clamps() {
        let mut history = history_of(&["/", "/users", "/users/add"]);

        history.go(-100);
        assert_eq!(history.current_path(), "/");

        history.go(2);
        assert_eq!(history.current_path(), "/users/add");

        history.go(-1);
        assert_eq!(history.current_path(), "/users");

        history.go(isize::MAX);
        assert_eq!(history.current_path(), "/users/add");

        history.go(isize::MIN);
        assert_eq!(history.current_path(), "/");
    }

    #[test]
    fn test_go_without_movement() {
        let mut history = history_of(&["/", "/users"]);
        assert!(history.go(0).is_none());
        assert!(history.forward().is_none());

        history.go(-5);
        assert!(history.back().is_none());
    }

    #[test]
    fn test_history_truncation_on_push() {
        let mut history = history_of(&["/", "/page1", "/page2"]);
        history.back();

        history.push(route("/page3"));
        assert_eq!(history.current_path(), "/page3");
        assert_eq!(history.len(), 3);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_history_replace_keeps_forward_entries() {
        let mut history = history_of(&["/", "/users", "/users/add"]);
        history.go(-1);

        history.replace(route("/users/add"));
        assert_eq!(history.len(), 3);

        history.go(1);
        assert_eq!(history.current_path(), "/users/add");
        history.back();
        assert_eq!(history.current_path(), "/users/add");
        history.back();
        assert_eq!(history.current_path(), "/");
    }

    #[test]
    fn test_history_max_size() {
        let mut history = History::with_max_size(route("/"), 3);

        for path in ["/page1", "/page2", "/page3", "/page4"] {
            history.push(route(path));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.current_path(), "/page4");

        history.go(-10);
        assert_eq!(history.current_path(), "/page2");
    }

    #[test]
    fn test_navigation_events() {
        let mut history = History::new(route("/"));

        let event = history.push(route("/users"));
        assert_eq!(event.from.as_deref(), Some("/"));
        assert_eq!(event.to, "/users");
        assert_eq!(event.direction, NavigationDirection::Forward);

        let event = history.back().unwrap();
        assert_eq!(event.from.as_deref(), Some("/users"));
        assert_eq!(event.to, "/");
        assert_eq!(event.direction, NavigationDirection::Back);

        let event = history.replace(route("/home"));
        assert_eq!(event.direction, NavigationDirection::Replace);
        assert_eq!(history.entries()[0].full_path(), "/home");
    }
}
