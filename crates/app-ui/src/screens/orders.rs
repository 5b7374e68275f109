//! Orders tab

use graphql_client::{GetOrders, Order};

use super::controller::{ScreenController, ScreenSpec};
use crate::components::RowView;
use crate::navigation::TabRoute;
use crate::theme::Palette;

/// Orders list
#[derive(Debug, Clone, Copy, Default)]
pub struct Orders;

/// Controller of the Orders tab
pub type OrdersScreen = ScreenController<Orders>;

impl ScreenSpec for Orders {
    type Query = GetOrders;

    const TITLE: &'static str = "Orders";
    const TAB: TabRoute = TabRoute::Orders;

    fn row_key(item: &Order) -> String {
        item.tracking_id.clone()
    }

    fn render_row(item: &Order, palette: &Palette) -> RowView {
        RowView::new(Self::row_key(item), format!("{} {}", item.carrier, item.tracking_id), palette)
            .with_line(format!("{}, {}", item.address, item.city))
            .with_line(format!("Shipping ${:.2}", item.shipping_cost))
            .with_line(format!("Created {}", item.created_at.format("%Y-%m-%d %H:%M UTC")))
            .with_line(format!("At {:.4}, {:.4}", item.lat, item.lng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMode;
    use graphql_client::test_utils::orders;

    #[test]
    fn test_row_layout() {
        let palette = ThemeMode::Light.palette();
        let row = Orders::render_row(&orders::order("1Z999", "London", "UPS"), &palette);

        assert_eq!(row.key, "1Z999");
        assert_eq!(row.title, "UPS 1Z999");
        assert_eq!(
            row.lines,
            vec![
                "221B Baker Street, London".to_string(),
                "Shipping $9.99".to_string(),
                "Created 2023-01-02 03:04 UTC".to_string(),
                "At 51.5237, -0.1585".to_string(),
            ]
        );
        assert_eq!(row.accent, "#59C1CC");
    }

    #[test]
    fn test_has_no_search_field() {
        assert!(Orders::SEARCH_PLACEHOLDER.is_none());
        assert!(Orders::search_text(&orders::order("1Z1", "Leeds", "UPS")).is_none());
    }
}
