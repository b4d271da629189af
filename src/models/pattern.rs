use crate::constants::SHORT_FORM_URL_PATTERNS;
use serde::{Deserialize, Serialize};
use url::Url;

/// How tab URLs are compared against patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Pattern is a case-sensitive substring of the URL
    #[default]
    Substring,
    /// Pattern is `host[/path]`, compared against the parsed URL
    UrlAware,
}

/// Ordered set of URL patterns identifying short-form content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<String>,
    mode: MatchMode,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new(SHORT_FORM_URL_PATTERNS, MatchMode::default())
    }
}

impl PatternSet {
    pub fn new<I, S>(patterns: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn matches(&self, url: &str) -> bool {
        match self.mode {
            MatchMode::Substring => self.patterns.iter().any(|p| url.contains(p.as_str())),
            MatchMode::UrlAware => {
                let Ok(parsed) = Url::parse(url) else {
                    return false;
                };
                self.patterns.iter().any(|p| url_matches(p, &parsed))
            }
        }
    }

    pub fn any_match<'a, I>(&self, urls: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        urls.into_iter().any(|url| self.matches(url))
    }
}

fn url_matches(pattern: &str, url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };

    let (pattern_host, pattern_path) = match pattern.split_once('/') {
        Some((h, p)) => (h, Some(p.trim_end_matches('/'))),
        None => (pattern, None),
    };

    let host_matches = host == pattern_host
        || host
            .strip_suffix(pattern_host)
            .is_some_and(|rest| rest.ends_with('.'));
    if !host_matches {
        return false;
    }

    match pattern_path {
        None | Some("") => true,
        Some(prefix) => {
            let path = url.path().trim_start_matches('/');
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
    }
}
