// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter configuration for the conversation list.
//!
//! Each dimension is either `All` (matches everything) or `Only(value)`.
//! Updates merge shallowly: a dimension absent from the update keeps its
//! current selection.

use omnidesk_core::{ConversationStatus, Platform, Priority};

/// One filter dimension: everything, or exactly one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes this dimension.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(only) => only == value,
        }
    }
}

/// The store's current filter configuration. Defaults to all-pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversationFilters {
    pub platform: Selection<Platform>,
    pub status: Selection<ConversationStatus>,
    pub priority: Selection<Priority>,
}

impl ConversationFilters {
    /// Applies a partial update; unset dimensions are left untouched.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(platform) = update.platform {
            self.platform = platform;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
    }
}

/// A shallow-merge update for [`ConversationFilters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    pub platform: Option<Selection<Platform>>,
    pub status: Option<Selection<ConversationStatus>>,
    pub priority: Option<Selection<Priority>>,
}

impl FilterUpdate {
    /// Update selecting a single platform.
    pub fn platform(platform: Platform) -> Self {
        Self {
            platform: Some(Selection::Only(platform)),
            ..Self::default()
        }
    }

    /// Update selecting a single status.
    pub fn status(status: ConversationStatus) -> Self {
        Self {
            status: Some(Selection::Only(status)),
            ..Self::default()
        }
    }

    /// Update selecting a single priority.
    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(Selection::Only(priority)),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_admit_everything() {
        let filters = ConversationFilters::default();
        assert!(filters.platform.admits(&Platform::Whatsapp));
        assert!(filters.status.admits(&ConversationStatus::Archived));
        assert!(filters.priority.admits(&Priority::High));
    }

    #[test]
    fn apply_merges_shallowly() {
        let mut filters = ConversationFilters::default();
        filters.apply(FilterUpdate::platform(Platform::Telegram));
        filters.apply(FilterUpdate::status(ConversationStatus::Pending));

        // The platform selection survived the status-only update.
        assert_eq!(filters.platform, Selection::Only(Platform::Telegram));
        assert_eq!(filters.status, Selection::Only(ConversationStatus::Pending));
        assert_eq!(filters.priority, Selection::All);
    }

    #[test]
    fn resetting_a_dimension_to_all() {
        let mut filters = ConversationFilters::default();
        filters.apply(FilterUpdate::priority(Priority::High));
        filters.apply(FilterUpdate {
            priority: Some(Selection::All),
            ..FilterUpdate::default()
        });
        assert_eq!(filters.priority, Selection::All);
    }
}
