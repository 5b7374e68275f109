//! View models for Courier Shell screens
//!
//! Screens render into plain serializable structs rather than drawing
//! directly, so the same output can feed a native view layer, a test
//! assertion or the terminal shell (through `Display`).

use serde::Serialize;
use std::fmt;

use crate::theme::{Color, Palette, ThemeSnapshot};

/// Icon drawn on the theme toggle
pub const THEME_TOGGLE_ICON: &str = "moon";

// =============================================================================
// Header
// =============================================================================

/// Light/dark switch in the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeToggleView {
    /// Switch position (`true` when dark)
    pub value: bool,
    /// Icon name
    pub icon: &'static str,
    /// Icon color
    pub icon_color: Color,
}

/// Screen header chrome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    /// Title text
    pub title: String,
    /// Background color
    pub background: Color,
    /// Theme switch
    pub toggle: ThemeToggleView,
    /// Whether `dark:` utility classes apply
    pub dark_class: bool,
}

impl HeaderView {
    /// Build the header for a theme
    ///
    /// Colors come from the component theme, the `dark` class from the
    /// color-scheme flag.
    pub fn new(title: impl Into<String>, theme: &ThemeSnapshot) -> Self {
        let palette = theme.theme.palette;
        Self {
            title: title.into(),
            background: palette.primary,
            toggle: ThemeToggleView {
                value: theme.theme.mode.is_dark(),
                icon: THEME_TOGGLE_ICON,
                icon_color: palette.secondary,
            },
            dark_class: theme.color_scheme.is_dark(),
        }
    }
}

/// Local search input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFieldView {
    /// Placeholder text
    pub placeholder: String,
    /// Current value
    pub value: String,
}

// =============================================================================
// Rows
// =============================================================================

/// One rendered list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// Entity identity
    pub key: String,
    /// First line
    pub title: String,
    /// Further lines
    pub lines: Vec<String>,
    /// Title color
    pub accent: Color,
    /// Row background
    pub background: Color,
}

impl RowView {
    /// Create a row colored from the palette
    pub fn new(key: impl Into<String>, title: impl Into<String>, palette: &Palette) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            lines: Vec::new(),
            accent: palette.primary,
            background: palette.white,
        }
    }

    /// Add a line
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// Screen body for each controller state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BodyView {
    /// Nothing requested yet
    Idle,
    /// Busy indicator, with the previous rows while refetching
    Busy {
        /// Rows from the last successful load
        stale_rows: Vec<RowView>,
    },
    /// Visible failure
    Failed {
        /// Error message
        message: String,
    },
    /// Loaded list
    Rows {
        /// Rows in response order
        rows: Vec<RowView>,
    },
}

impl BodyView {
    /// Rows currently on screen, stale or fresh
    pub fn rows(&self) -> &[RowView] {
        match self {
            BodyView::Busy { stale_rows } => stale_rows,
            BodyView::Rows { rows } => rows,
            BodyView::Idle | BodyView::Failed { .. } => &[],
        }
    }

    /// Keys of the rows on screen
    pub fn row_keys(&self) -> Vec<&str> {
        self.rows().iter().map(|row| row.key.as_str()).collect()
    }
}

/// A fully rendered screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenView {
    /// Stable screen identity
    pub screen_id: &'static str,
    /// Header chrome
    pub header: HeaderView,
    /// Search input, on screens that have one
    pub search: Option<SearchFieldView>,
    /// Body
    pub body: BodyView,
}

impl fmt::Display for ScreenView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = &self.header;
        writeln!(
            f,
            "== {} == [{} {}] header {}{}",
            header.title,
            header.toggle.icon,
            if header.toggle.value { "on" } else { "off" },
            header.background,
            if header.dark_class { " .dark" } else { "" },
        )?;

        if let Some(search) = &self.search {
            if search.value.is_empty() {
                writeln!(f, "{}: _", search.placeholder)?;
            } else {
                writeln!(f, "{}: \"{}\"", search.placeholder, search.value)?;
            }
        }

        match &self.body {
            BodyView::Idle => writeln!(f, "(idle)")?,
            BodyView::Busy { stale_rows } => {
                writeln!(f, "Loading...")?;
                write_rows(f, stale_rows)?;
            }
            BodyView::Failed { message } => writeln!(f, "Error: {}", message)?,
            BodyView::Rows { rows } if rows.is_empty() => writeln!(f, "No results")?,
            BodyView::Rows { rows } => write_rows(f, rows)?,
        }
        Ok(())
    }
}

fn write_rows(f: &mut fmt::Formatter<'_>, rows: &[RowView]) -> fmt::Result {
    for row in rows {
        writeln!(f, "- {}", row.title)?;
        for line in &row.lines {
            writeln!(f, "    {}", line)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ColorScheme, ThemeMode, ThemeState};

    fn snapshot(mode: ThemeMode) -> ThemeSnapshot {
        ThemeSnapshot {
            theme: ThemeState::new(mode),
            color_scheme: ColorScheme::from(mode),
        }
    }

    #[test]
    fn test_header_uses_palette() {
        let light = HeaderView::new("Customers", &snapshot(ThemeMode::Light));
        assert_eq!(light.background, "#59C1CC");
        assert_eq!(light.toggle.icon_color, "#ffb641");
        assert!(!light.toggle.value);
        assert!(!light.dark_class);

        let dark = HeaderView::new("Customers", &snapshot(ThemeMode::Dark));
        assert_eq!(dark.background, "#346B71");
        assert_eq!(dark.toggle.icon, "moon");
        assert!(dark.toggle.value);
        assert!(dark.dark_class);
    }

    #[test]
    fn test_body_rows() {
        let palette = ThemeMode::Light.palette();
        let row = RowView::new("Ana", "Ana", &palette).with_line("a@x.com");

        let busy = BodyView::Busy {
            stale_rows: vec![row.clone()],
        };
        assert_eq!(busy.row_keys(), vec!["Ana"]);
        assert!(BodyView::Failed {
            message: "down".to_string()
        }
        .rows()
        .is_empty());
        assert!(BodyView::Idle.rows().is_empty());
    }

    #[test]
    fn test_display() {
        let palette = ThemeMode::Light.palette();
        let view = ScreenView {
            screen_id: "Customers",
            header: HeaderView::new("Customers", &snapshot(ThemeMode::Light)),
            search: Some(SearchFieldView {
                placeholder: "Search by Customer".to_string(),
                value: "an".to_string(),
            }),
            body: BodyView::Rows {
                rows: vec![RowView::new("Ana", "Ana", &palette).with_line("a@x.com")],
            },
        };

        let text = view.to_string();
        assert!(text.starts_with("== Customers =="));
        assert!(text.contains("Search by Customer: \"an\""));
        assert!(text.contains("- Ana\n    a@x.com\n"));
    }

    #[test]
    fn test_display_failure_is_visible() {
        let view = ScreenView {
            screen_id: "Orders",
            header: HeaderView::new("Orders", &snapshot(ThemeMode::Dark)),
            search: None,
            body: BodyView::Failed {
                message: "Network error: connection refused".to_string(),
            },
        };
        let text = view.to_string();
        assert!(text.contains(".dark"));
        assert!(text.contains("Error: Network error: connection refused"));
    }

    #[test]
    fn test_serialize_body_tag() {
        let json = serde_json::to_value(BodyView::Idle).unwrap();
        assert_eq!(json["kind"], "idle");
    }
}
