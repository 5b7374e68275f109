//! Customers tab

use graphql_client::{Customer, GetCustomers};

use super::controller::{ScreenController, ScreenSpec};
use crate::components::RowView;
use crate::navigation::TabRoute;
use crate::theme::Palette;

/// Customers list with a name search
#[derive(Debug, Clone, Copy, Default)]
pub struct Customers;

/// Controller of the Customers tab
pub type CustomersScreen = ScreenController<Customers>;

impl ScreenSpec for Customers {
    type Query = GetCustomers;

    const TITLE: &'static str = "Customers";
    const TAB: TabRoute = TabRoute::Customers;
    const SEARCH_PLACEHOLDER: Option<&'static str> = Some("Search by Customer");

    fn row_key(item: &Customer) -> String {
        item.name.clone()
    }

    fn render_row(item: &Customer, palette: &Palette) -> RowView {
        RowView::new(Self::row_key(item), item.name.as_str(), palette)
            .with_line(item.email.as_str())
    }

    fn search_text(item: &Customer) -> Option<&str> {
        Some(&item.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMode;
    use graphql_client::test_utils::customers;

    #[test]
    fn test_row_shows_name_and_email() {
        let palette = ThemeMode::Dark.palette();
        let row = Customers::render_row(&customers::ana(), &palette);
        assert_eq!(row.key, "Ana");
        assert_eq!(row.title, "Ana");
        assert_eq!(row.lines, vec!["a@x.com".to_string()]);
        assert_eq!(row.accent, "#346B71");
        assert_eq!(row.background, "#080808");
    }

    #[test]
    fn test_searches_by_name_only() {
        let ana = customers::ana();
        assert_eq!(Customers::search_text(&ana), Some("Ana"));
    }
}
