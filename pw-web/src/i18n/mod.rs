//! Bundled zh/en translations with `{name}` interpolation.
mod bundle;
mod format;
mod locales;
mod render;

pub use bundle::{I18nBundle, current_lang, set_lang};
pub use format::fmt_tdb;
pub use locales::{DEFAULT_LANG, LocaleMeta, locales};
pub use render::{t, tr};
