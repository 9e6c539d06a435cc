pub mod debug_trace;
pub mod price_quote;
pub mod purchase_dialog;
