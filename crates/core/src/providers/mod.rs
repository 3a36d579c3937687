pub mod traits;

// Provider implementations
pub mod static_quotes;
#[cfg(not(target_arch = "wasm32"))]
pub mod yahoo_finance;
