use serde_json::Value;

/// A bundled translation file and the name shown in the language picker.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
    source: &'static str,
}

/// Language shown before the user picks one, and the fallback for missing keys.
pub const DEFAULT_LANG: &str = "zh";

static LOCALES: [LocaleMeta; 2] = [
    LocaleMeta {
        code: "zh",
        name: "中文",
        source: include_str!("../../i18n/zh.json"),
    },
    LocaleMeta {
        code: "en",
        name: "English",
        source: include_str!("../../i18n/en.json"),
    },
];

/// Supported locales, default first.
#[must_use]
pub fn locales() -> &'static [LocaleMeta] {
    &LOCALES
}

pub(super) fn find(lang: &str) -> Option<&'static LocaleMeta> {
    LOCALES.iter().find(|meta| meta.code == lang)
}

impl LocaleMeta {
    /// Parsed translation tree; `None` if the bundled JSON is malformed.
    pub(super) fn messages(&self) -> Option<Value> {
        match serde_json::from_str(self.source) {
            Ok(value) => Some(value),
            Err(err) => {
                log::error!("locale `{}` is not valid JSON: {err}", self.code);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_paths(value: &Value, prefix: &str, out: &mut Vec<String>) {
        let Value::Object(map) = value else {
            out.push(prefix.to_string());
            return;
        };
        for (key, child) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            leaf_paths(child, &path, out);
        }
    }

    fn keys_of(meta: &LocaleMeta) -> Vec<String> {
        let mut keys = Vec::new();
        leaf_paths(&meta.messages().expect("locale parses"), "", &mut keys);
        keys.sort();
        keys
    }

    #[test]
    fn locales_share_one_key_set() {
        let default = find(DEFAULT_LANG).expect("default locale bundled");
        let expected = keys_of(default);
        assert!(expected.contains(&"purchase.confirm".to_string()));
        for meta in locales() {
            assert_eq!(keys_of(meta), expected, "locale {} diverges", meta.code);
        }
    }

    #[test]
    fn default_locale_is_listed_first() {
        assert_eq!(locales()[0].code, DEFAULT_LANG);
        assert!(find("en").is_some());
        assert!(find("xx").is_none());
    }
}
