use crate::i18n::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

/// Look up a dotted key (`land.status.owned`) in a translation tree.
fn lookup<'a>(tree: &'a Value, key: &str) -> Option<&'a str> {
    let pointer = format!("/{}", key.replace('.', "/"));
    tree.pointer(&pointer)?.as_str()
}

/// Substitute `{name}` placeholders in one pass; `{{name}}` is accepted too.
/// Unknown placeholders are left as written.
fn interpolate(template: &str, args: &BTreeMap<&str, &str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let inner_start = if tail.starts_with("{{") { 2 } else { 1 };
        let Some(close) = tail[inner_start..].find('}') else {
            out.push_str(tail);
            return out;
        };
        let name = &tail[inner_start..inner_start + close];
        let mut end = inner_start + close + 1;
        if inner_start == 2 && tail[end..].starts_with('}') {
            end += 1;
        }
        match args.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&tail[..end]),
        }
        rest = &tail[end..];
    }
    out.push_str(rest);
    out
}

/// Translate a key in the current language.
///
/// Falls back to the default locale, then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key and fill in its placeholders.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    let template = with_bundle(|bundle| {
        lookup(&bundle.messages, key)
            .or_else(|| lookup(&bundle.fallback, key))
            .map(str::to_string)
    });
    match (template, args) {
        (Some(text), Some(args)) => interpolate(&text, args),
        (Some(text), None) => text,
        (None, _) => key.to_string(),
    }
}
