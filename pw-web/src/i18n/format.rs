use crate::i18n::render::tr;
use pw_market::numbers::fmt_amount;
use std::collections::BTreeMap;

/// Format a TDB amount with two decimals and the currency suffix.
#[must_use]
pub fn fmt_tdb(amount: f64) -> String {
    let formatted = fmt_amount(amount);
    let mut args = BTreeMap::new();
    args.insert("amount", formatted.as_str());
    tr("currency", Some(&args))
}
