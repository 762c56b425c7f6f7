//! Locator → domain derivation and whitelist membership.
//!
//! Parsing is total. Locators that have no meaningful host map to one of a
//! fixed set of sentinel domains:
//!
//! | Locator class                                   | Domain             |
//! |-------------------------------------------------|--------------------|
//! | empty, `about:blank`, new-tab pages             | `blank:page`       |
//! | other browser-internal schemes (`chrome:` ...)  | `internal:browser` |
//! | `file:` URLs                                    | `local:file`       |
//! | unparsable, or parsed without a host            | `invalid:url`      |
//!
//! Sentinels are matched against the whitelist by their literal string,
//! except `invalid:url`, which is never exempt.

use std::collections::BTreeSet;
use std::fmt;
use url::Url;

pub const BLANK_PAGE_DOMAIN: &str = "blank:page";
pub const BROWSER_INTERNAL_DOMAIN: &str = "internal:browser";
pub const LOCAL_FILE_DOMAIN: &str = "local:file";
pub const INVALID_URL_DOMAIN: &str = "invalid:url";

const INTERNAL_SCHEMES: &[&str] = &[
    "about",
    "chrome",
    "chrome-extension",
    "chrome-search",
    "chrome-untrusted",
    "devtools",
    "edge",
    "brave",
    "opera",
    "vivaldi",
    "moz-extension",
    "view-source",
];

const NEW_TAB_PAGES: &[&str] = &["newtab", "new-tab-page", "home", "startpage"];

/// Identity used for exemption matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Domain {
    Host(String),
    BlankPage,
    BrowserInternal,
    LocalFile,
    Invalid,
}

impl Domain {
    pub fn as_str(&self) -> &str {
        match self {
            Domain::Host(host) => host,
            Domain::BlankPage => BLANK_PAGE_DOMAIN,
            Domain::BrowserInternal => BROWSER_INTERNAL_DOMAIN,
            Domain::LocalFile => LOCAL_FILE_DOMAIN,
            Domain::Invalid => INVALID_URL_DOMAIN,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Domain::Host(_))
    }

    /// Whether this domain is protected by `whitelist`.
    pub fn is_exempt_in(&self, whitelist: &BTreeSet<String>) -> bool {
        match self {
            Domain::Invalid => false,
            other => whitelist.contains(other.as_str()),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn domain_of(locator: &str) -> Domain {
    let locator = locator.trim();
    if locator.is_empty() {
        return Domain::BlankPage;
    }

    let url = match Url::parse(locator) {
        Ok(url) => url,
        Err(_) => return Domain::Invalid,
    };

    let scheme = url.scheme();
    if scheme == "file" {
        return Domain::LocalFile;
    }
    if is_blank_or_new_tab(&url) {
        return Domain::BlankPage;
    }
    if INTERNAL_SCHEMES.contains(&scheme) {
        return Domain::BrowserInternal;
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {
            Domain::Host(host.trim_end_matches('.').to_ascii_lowercase())
        }
        _ => Domain::Invalid,
    }
}

pub fn is_exempt(locator: &str, whitelist: &BTreeSet<String>) -> bool {
    domain_of(locator).is_exempt_in(whitelist)
}

fn is_blank_or_new_tab(url: &Url) -> bool {
    match url.scheme() {
        "about" => matches!(url.path(), "blank" | "newtab" | "home"),
        scheme if INTERNAL_SCHEMES.contains(&scheme) => url
            .host_str()
            .map(|host| NEW_TAB_PAGES.contains(&host))
            .unwrap_or(false),
        _ => false,
    }
}
