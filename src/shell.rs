//! The composed tab shell

use app_state::RemoteDataClient;
use app_ui::{
    CustomersScreen, NavigationState, OrdersScreen, ScreenView, TabBarStyle, TabRoute,
    ThemeCoordinator, ThemeSnapshot,
};

/// Root stack, both tab screens and their shared collaborators
#[derive(Debug)]
pub struct Shell<'a> {
    client: RemoteDataClient,
    theme: &'a ThemeCoordinator,
    navigation: NavigationState,
    customers: CustomersScreen,
    orders: OrdersScreen,
}

impl<'a> Shell<'a> {
    /// Mount the shell with both screens idle
    pub fn new(client: RemoteDataClient, theme: &'a ThemeCoordinator) -> Self {
        Self {
            client,
            theme,
            navigation: NavigationState::new(),
            customers: CustomersScreen::new(),
            orders: OrdersScreen::new(),
        }
    }

    /// Switch to a tab and load its screen
    pub async fn open(&mut self, tab: TabRoute) -> ScreenView {
        self.navigation.switch_tab(tab);
        match tab {
            TabRoute::Customers => {
                self.customers.load(&self.client).await;
            }
            TabRoute::Orders => {
                self.orders.load(&self.client).await;
            }
        }
        self.render(tab)
    }

    /// Reload a tab from the network
    pub async fn refresh(&mut self, tab: TabRoute) -> ScreenView {
        match tab {
            TabRoute::Customers => {
                self.customers.refetch(&self.client).await;
            }
            TabRoute::Orders => {
                self.orders.refetch(&self.client).await;
            }
        }
        self.render(tab)
    }

    /// Render a tab with the current theme
    pub fn render(&self, tab: TabRoute) -> ScreenView {
        let theme = self.theme.snapshot();
        match tab {
            TabRoute::Customers => self.customers.render(&theme),
            TabRoute::Orders => self.orders.render(&theme),
        }
    }

    /// Tab bar colors for the current theme
    pub fn tab_bar(&self) -> TabBarStyle {
        TabBarStyle::from_theme(&self.theme.theme())
    }

    /// Flip the theme
    pub fn toggle_theme(&self) -> ThemeSnapshot {
        self.theme.toggle()
    }

    /// Type into the Customers search field
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.customers.set_search(text);
    }

    /// Current tab
    pub fn active_tab(&self) -> TabRoute {
        self.navigation.active_tab()
    }
}
