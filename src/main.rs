use anyhow::{Context, Result};
use app_state::RemoteDataClient;
use app_ui::ThemeCoordinator;
use clap::Parser;
use courier_shell::{Args, Shell};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let client = RemoteDataClient::from_config(args.graphql_config())
        .context("invalid GraphQL endpoint configuration")?
        .install()?;

    let theme = ThemeCoordinator::global();
    if theme.theme().mode != args.theme {
        theme.toggle();
    }

    let mut changes = theme.subscribe();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let snapshot = *changes.borrow_and_update();
            tracing::info!(mode = %snapshot.theme.mode, "Theme changed");
        }
    });

    let mut shell = Shell::new(client.clone(), theme);
    shell.set_search(args.search.as_str());

    let tabs = args.tab.tabs();
    for tab in &tabs {
        let view = shell.open(*tab).await;
        println!("{view}");
    }

    if args.toggle_theme {
        shell.toggle_theme();
        for tab in &tabs {
            println!("{}", shell.render(*tab));
        }
    }

    let bar = shell.tab_bar();
    tracing::info!(
        active = %shell.active_tab(),
        tint = bar.active_tint,
        "Shell rendered"
    );

    Ok(())
}
