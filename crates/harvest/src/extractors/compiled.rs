// ABOUTME: Process-wide cache of compiled scraper selectors keyed by selector text.
// ABOUTME: Invalid selectors are cached as None so a bad caller-supplied selector is parsed only once.

//! Selector caching.
//!
//! Every strategy runs the same handful of selectors against every page, and
//! parsing a selector costs more than matching it. Compiled selectors are
//! immutable, so sharing them across concurrent extractions is safe; the
//! cache carries no per-extraction state.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use scraper::Selector;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Returns the compiled form of `css`, or `None` if it does not parse.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    {
        let cache = SELECTOR_CACHE
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    if compiled.is_none() {
        tracing::debug!(selector = css, "ignoring unparseable selector");
    }

    let mut cache = SELECTOR_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    cache
        .entry(css.to_string())
        .or_insert(compiled)
        .clone()
}

/// Compiles a batch of selectors ahead of time.
pub fn precompile_selectors<I, S>(selectors: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cache = SELECTOR_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    for css in selectors {
        let css = css.as_ref();
        if !cache.contains_key(css) {
            cache.insert(css.to_string(), Selector::parse(css).ok());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_selector_is_cached() {
        assert!(get_or_compile("div.container > a[href]").is_some());
        assert!(get_or_compile("div.container > a[href]").is_some());
    }

    #[test]
    fn substring_attribute_selectors_compile() {
        assert!(get_or_compile(r#"[class*="article"]"#).is_some());
        assert!(get_or_compile(r#"[role="article"]"#).is_some());
    }

    #[test]
    fn invalid_selector_returns_none() {
        assert!(get_or_compile("[[[invalid").is_none());
        assert!(get_or_compile("[[[invalid").is_none());
    }

    #[test]
    fn precompile_warms_cache() {
        precompile_selectors(["h1, h2, h3", "p", "img[src]"]);
        assert!(get_or_compile("h1, h2, h3").is_some());
        assert!(get_or_compile("img[src]").is_some());
    }
}
