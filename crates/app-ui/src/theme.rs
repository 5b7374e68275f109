//! Theme coordination for Courier Shell
//!
//! Two styling subsystems keep their own copy of the current appearance: the
//! component library reads a [`ThemeState`] (mode plus derived palette) and
//! the utility-class layer reads a [`ColorScheme`] flag. Neither store is
//! writable from outside this module. The [`ThemeCoordinator`] owns both and
//! flips them together under one lock, so no reader ever sees them disagree.
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{ThemeCoordinator, ThemeMode};
//!
//! let theme = ThemeCoordinator::new(ThemeMode::Light);
//! theme.toggle();
//!
//! let snapshot = theme.snapshot();
//! assert_eq!(snapshot.theme.mode, ThemeMode::Dark);
//! assert_eq!(snapshot.theme.palette.primary, "#346B71");
//! assert!(snapshot.is_consistent());
//! ```

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tokio::sync::watch;

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as a hex string (e.g., "#FFFFFF")
pub type Color = &'static str;

/// Semantic palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Palette {
    /// Header and accent color
    pub primary: Color,
    /// Secondary accent (toggle icon)
    pub secondary: Color,
    /// Surface color
    pub white: Color,
}

/// Fixed light/dark color table
pub mod colors {
    use super::Palette;

    /// Light palette
    pub const LIGHT: Palette = Palette {
        primary: "#59C1CC",
        secondary: "#ffb641",
        white: "#FFFFFF",
    };

    /// Dark palette
    pub const DARK: Palette = Palette {
        primary: "#346B71",
        secondary: "#61593f",
        white: "#080808",
    };
}

// =============================================================================
// Theme Mode
// =============================================================================

/// Theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light mode
    #[default]
    Light,
    /// Dark mode
    Dark,
}

impl ThemeMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Check if this is the dark mode
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    /// Palette for this mode
    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => colors::LIGHT,
            ThemeMode::Dark => colors::DARK,
        }
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Component-library theme: the mode and the palette looked up from it
///
/// The palette is never set on its own; it always comes from [`colors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ThemeState {
    /// Current mode
    pub mode: ThemeMode,
    /// Palette for `mode`
    pub palette: Palette,
}

impl ThemeState {
    /// Theme for a mode
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            palette: mode.palette(),
        }
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

/// Utility-class color scheme flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light classes
    #[default]
    Light,
    /// `dark:` classes active
    Dark,
}

impl ColorScheme {
    /// Check if `dark:` classes apply
    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }

    /// Check if this flag agrees with a theme mode
    pub fn matches(self, mode: ThemeMode) -> bool {
        self.is_dark() == mode.is_dark()
    }
}

impl From<ThemeMode> for ColorScheme {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => ColorScheme::Light,
            ThemeMode::Dark => ColorScheme::Dark,
        }
    }
}

/// Both stores read at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ThemeSnapshot {
    /// Component-library theme
    pub theme: ThemeState,
    /// Utility-class flag
    pub color_scheme: ColorScheme,
}

impl ThemeSnapshot {
    /// Check that both stores agree
    pub fn is_consistent(&self) -> bool {
        self.color_scheme.matches(self.theme.mode)
    }
}

// =============================================================================
// Stores
// =============================================================================

#[derive(Debug)]
struct ComponentThemeStore {
    state: ThemeState,
}

impl ComponentThemeStore {
    fn set_mode(&mut self, mode: ThemeMode) {
        self.state = ThemeState::new(mode);
    }
}

#[derive(Debug)]
struct ColorSchemeStore {
    scheme: ColorScheme,
}

impl ColorSchemeStore {
    fn set(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
    }
}

#[derive(Debug)]
struct Stores {
    component: ComponentThemeStore,
    color_scheme: ColorSchemeStore,
}

impl Stores {
    fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            theme: self.component.state,
            color_scheme: self.color_scheme.scheme,
        }
    }
}

// =============================================================================
// Theme Coordinator
// =============================================================================

static GLOBAL: OnceLock<ThemeCoordinator> = OnceLock::new();

/// Owner of both theme stores
#[derive(Debug)]
pub struct ThemeCoordinator {
    stores: RwLock<Stores>,
    changes: watch::Sender<ThemeSnapshot>,
}

impl Default for ThemeCoordinator {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

impl ThemeCoordinator {
    /// Create a coordinator with both stores set to `initial`
    pub fn new(initial: ThemeMode) -> Self {
        let stores = Stores {
            component: ComponentThemeStore {
                state: ThemeState::new(initial),
            },
            color_scheme: ColorSchemeStore {
                scheme: ColorScheme::from(initial),
            },
        };
        let (changes, _) = watch::channel(stores.snapshot());
        Self {
            stores: RwLock::new(stores),
            changes,
        }
    }

    /// The process-wide coordinator, created light on first use
    pub fn global() -> &'static ThemeCoordinator {
        GLOBAL.get_or_init(ThemeCoordinator::default)
    }

    /// Current component-library theme
    pub fn theme(&self) -> ThemeState {
        self.stores.read().component.state
    }

    /// Current utility-class flag
    pub fn color_scheme(&self) -> ColorScheme {
        self.stores.read().color_scheme.scheme
    }

    /// Read both stores at once
    pub fn snapshot(&self) -> ThemeSnapshot {
        self.stores.read().snapshot()
    }

    /// Flip the mode in both stores
    ///
    /// Returns the state after the toggle.
    pub fn toggle(&self) -> ThemeSnapshot {
        let mut stores = self.stores.write();
        let mode = stores.component.state.mode.toggled();
        stores.component.set_mode(mode);
        stores.color_scheme.set(ColorScheme::from(mode));

        let snapshot = stores.snapshot();
        // Sent under the lock so subscribers see toggles in order
        self.changes.send_replace(snapshot);
        drop(stores);

        tracing::debug!(mode = %mode, "Theme toggled");
        snapshot
    }

    /// Watch for completed toggles
    pub fn subscribe(&self) -> watch::Receiver<ThemeSnapshot> {
        self.changes.subscribe()
    }
}
