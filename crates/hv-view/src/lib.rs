//! hv-view
//!
//! Thin presentation layer for the holdings screen: explicit view state, a
//! cancellable screen session, the splash timer and text rendering. All
//! numbers arrive already computed by hv-portfolio.

mod render;
mod screen;
mod splash;
mod state;

pub use render::{
    format_amount, format_money, render_item, render_screen, render_summary, render_total_pnl,
    DisplayOptions, LOSS_MARKER, PROFIT_MARKER,
};
pub use screen::{HoldingsScreen, ScreenData};
pub use splash::{SplashOutcome, SplashTimer, DEFAULT_SPLASH_DELAY};
pub use state::ViewState;
