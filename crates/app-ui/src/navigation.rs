//! Navigation framework for Courier Shell
//!
//! The shell is one root stack whose only route hosts a bottom tab bar with
//! a Customers tab and an Orders tab. Neither route takes parameters, so each
//! screen can be mounted from its route alone.

use serde::{Deserialize, Serialize};

use crate::theme::{Color, ThemeState};

// =============================================================================
// Route Tables
// =============================================================================

/// Routes of the root stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RootRoute {
    /// The tab navigator
    #[default]
    Tab,
}

impl RootRoute {
    /// Registered screen name
    pub fn name(&self) -> &'static str {
        match self {
            RootRoute::Tab => "Tab",
        }
    }

    /// Whether the stack header is drawn above this route
    pub fn header_shown(&self) -> bool {
        match self {
            RootRoute::Tab => false,
        }
    }
}

/// Bottom tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TabRoute {
    /// Customers tab
    #[default]
    Customers,
    /// Orders tab
    Orders,
}

impl TabRoute {
    /// Stable screen identity
    pub fn screen_id(&self) -> &'static str {
        match self {
            TabRoute::Customers => "Customers",
            TabRoute::Orders => "Orders",
        }
    }

    /// Icon set the tab icons come from
    pub fn icon_set(&self) -> &'static str {
        "entypo"
    }

    /// Get icon name for this tab
    pub fn icon(&self) -> &'static str {
        match self {
            TabRoute::Customers => "users",
            TabRoute::Orders => "box",
        }
    }

    /// Get label for this tab
    pub fn label(&self) -> &'static str {
        match self {
            TabRoute::Customers => "Customers",
            TabRoute::Orders => "Orders",
        }
    }

    /// Get all tabs in order
    pub fn all() -> [TabRoute; 2] {
        [TabRoute::Customers, TabRoute::Orders]
    }
}

impl std::fmt::Display for TabRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tab bar colors for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabBarStyle {
    /// Tint of the focused tab
    pub active_tint: Color,
    /// Background of the focused tab
    pub active_background: Color,
    /// Background of the other tabs
    pub inactive_background: Color,
}

impl TabBarStyle {
    /// Derive the tab bar colors from the palette
    pub fn from_theme(theme: &ThemeState) -> Self {
        Self {
            active_tint: theme.palette.primary,
            active_background: theme.palette.white,
            inactive_background: theme.palette.white,
        }
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// A root stack entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: RootRoute,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: RootRoute) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Complete navigation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Root stack entries (bottom to top)
    root_stack: Vec<StackEntry>,
    /// Current active tab
    active_tab: TabRoute,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            root_stack: vec![StackEntry::new(RootRoute::Tab)],
            active_tab: TabRoute::default(),
        }
    }
}

impl NavigationState {
    /// Create a new navigation state on the first tab
    pub fn new() -> Self {
        Self::default()
    }

    /// Current active tab
    pub fn active_tab(&self) -> TabRoute {
        self.active_tab
    }

    /// Root stack entries
    pub fn root_entries(&self) -> &[StackEntry] {
        &self.root_stack
    }

    /// Switch to a tab
    ///
    /// Returns `true` if the active tab changed.
    pub fn switch_tab(&mut self, tab: TabRoute) -> bool {
        if self.active_tab == tab {
            return false;
        }
        tracing::debug!(from = %self.active_tab, to = %tab, "Switching tab");
        self.active_tab = tab;
        true
    }
}
