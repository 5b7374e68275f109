//! User interface for Courier Shell
//!
//! This crate provides the UI layer: theme coordination, the tab route
//! tables, render view models and the Customers and Orders screens.
//!
//! Two themes are supported, each a fixed palette:
//! - [`theme::ThemeMode::Light`] - primary `#59C1CC` on white
//! - [`theme::ThemeMode::Dark`] - primary `#346B71` on near-black
//!
//! # Modules
//!
//! - [`theme`] - Theme coordinator and palettes
//! - [`navigation`] - Root stack and tab routes
//! - [`components`] - Render view models
//! - [`screens`] - Screen controller and the two tab screens
//!
//! # Example
//!
//! ```rust
//! use app_ui::screens::CustomersScreen;
//! use app_ui::theme::ThemeCoordinator;
//!
//! let theme = ThemeCoordinator::global();
//! let screen = CustomersScreen::new();
//!
//! let view = screen.render(&theme.snapshot());
//! assert_eq!(view.screen_id, "Customers");
//! assert!(view.search.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod navigation;
pub mod screens;
pub mod theme;

// Re-export commonly used types
pub use theme::{ColorScheme, Palette, ThemeCoordinator, ThemeMode, ThemeSnapshot, ThemeState};

pub use navigation::{NavigationState, RootRoute, StackEntry, TabBarStyle, TabRoute};

pub use components::{BodyView, HeaderView, RowView, ScreenView, SearchFieldView, ThemeToggleView};

pub use screens::{Customers, CustomersScreen, Orders, OrdersScreen, ScreenController, ScreenSpec};
