//! `hv show`: splash, one fetch, render, teardown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use hv_md::HttpHoldingsSource;
use hv_view::{render_screen, DisplayOptions, HoldingsScreen, SplashOutcome, SplashTimer, ViewState};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::resolve_config;

pub async fn show(
    config_paths: Vec<String>,
    url: Option<String>,
    expanded: bool,
    no_splash: bool,
) -> Result<()> {
    let cfg = resolve_config(&config_paths, url)?;
    let opts = DisplayOptions {
        currency_symbol: cfg.view.currency_symbol.clone(),
    };

    // Ctrl-C tears down whatever view is current.
    let host = CancellationToken::new();
    let on_signal = host.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    if !no_splash {
        println!("Holdings");
        let timer = SplashTimer::new(Duration::from_millis(cfg.view.splash_delay_ms));
        if timer.wait(&host).await == SplashOutcome::Cancelled {
            info!("interrupted during splash");
            return Ok(());
        }
    }

    let source = HttpHoldingsSource::new_with_endpoint(cfg.source.endpoint.clone())
        .with_holdings_field(cfg.source.holdings_field.clone())
        .with_timeout(Duration::from_millis(cfg.source.timeout_ms));
    info!(endpoint = %source.endpoint(), "mounting holdings screen");

    let screen = HoldingsScreen::mount(Arc::new(source));
    let mut state = ViewState::loading();
    eprint!("{}", render_screen(None, &state, &opts));

    let data = tokio::select! {
        d = screen.wait_loaded() => d,
        _ = host.cancelled() => None,
    };

    let Some(data) = data else {
        info!("interrupted while loading");
        screen.teardown();
        return Ok(());
    };

    state.finish_loading();
    if expanded {
        state.toggle_expanded();
    }
    print!("{}", render_screen(Some(&data), &state, &opts));

    screen.teardown();
    Ok(())
}
