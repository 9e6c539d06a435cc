use crate::i18n::locales::{DEFAULT_LANG, find};
use serde_json::{Map, Value};
use std::cell::RefCell;

#[cfg(target_arch = "wasm32")]
const LOCALE_KEY: &str = "pw.locale";

/// Active translations plus the default locale used for missing keys.
pub struct I18nBundle {
    pub lang: &'static str,
    pub messages: Value,
    pub fallback: Value,
}

impl I18nBundle {
    fn load(lang: &str) -> Option<Self> {
        let meta = find(lang)?;
        let messages = meta.messages()?;
        let fallback = if meta.code == DEFAULT_LANG {
            messages.clone()
        } else {
            find(DEFAULT_LANG)
                .and_then(|default| default.messages())
                .unwrap_or_else(|| Value::Object(Map::new()))
        };
        Some(Self {
            lang: meta.code,
            messages,
            fallback,
        })
    }

    /// Empty bundle: every lookup echoes its key.
    fn empty() -> Self {
        Self {
            lang: DEFAULT_LANG,
            messages: Value::Object(Map::new()),
            fallback: Value::Object(Map::new()),
        }
    }
}

#[cfg(all(not(test), target_arch = "wasm32"))]
fn startup_lang() -> String {
    crate::dom::local_storage()
        .ok()
        .and_then(|storage| storage.get_item(LOCALE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_LANG.to_string())
}

#[cfg(any(test, not(target_arch = "wasm32")))]
fn startup_lang() -> String {
    DEFAULT_LANG.to_string()
}

thread_local! {
    static ACTIVE: RefCell<I18nBundle> = RefCell::new(
        I18nBundle::load(&startup_lang())
            .or_else(|| I18nBundle::load(DEFAULT_LANG))
            .unwrap_or_else(I18nBundle::empty),
    );
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    ACTIVE.with(|cell| f(&cell.borrow()))
}

/// Switch the active language.
///
/// Unknown codes are logged and ignored. In the browser the `<html lang>`
/// attribute follows the choice and it is remembered in localStorage.
pub fn set_lang(lang: &str) {
    let Some(bundle) = I18nBundle::load(lang) else {
        log::warn!("unsupported locale `{lang}`");
        return;
    };
    ACTIVE.with(|cell| *cell.borrow_mut() = bundle);
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(root) = crate::dom::document().and_then(|doc| doc.document_element()) {
            let _ = root.set_attribute("lang", lang);
        }
        if let Ok(storage) = crate::dom::local_storage() {
            let _ = storage.set_item(LOCALE_KEY, lang);
        }
    }
}

#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_bundle_falls_back_to_chinese() {
        let bundle = I18nBundle::load("en").expect("en bundled");
        assert_eq!(bundle.lang, "en");
        assert_eq!(
            bundle.fallback.pointer("/land/buy"),
            Some(&Value::from("立即购买"))
        );
    }

    #[test]
    fn unsupported_locale_keeps_current_bundle() {
        set_lang("zh");
        set_lang("xx");
        assert_eq!(current_lang(), "zh");
    }

    #[test]
    fn empty_bundle_has_no_messages() {
        let bundle = I18nBundle::empty();
        assert_eq!(bundle.messages, Value::Object(Map::new()));
    }
}
