pub mod holdings;
pub mod land_detail;
pub mod not_found;
