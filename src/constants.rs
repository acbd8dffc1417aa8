//! Crate-wide constants.

/// Number of report rows per page when a portfolio is rendered as a flat
/// table. The aggregator always exposes the full row sequence; this only
/// drives the `pages()` helper.
pub const PORTFOLIO_PAGE_SIZE: usize = 10;

/// Decimal places used by the display-label helpers on report rows.
pub const DISPLAY_DECIMALS: u32 = 2;
