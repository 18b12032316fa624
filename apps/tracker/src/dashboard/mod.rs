// Client dashboard: fetch/state glue, local filtering and table rendering.
// Used by the `dashboard` binary.

pub mod board;
pub mod client;
pub mod filter;
pub mod view;
