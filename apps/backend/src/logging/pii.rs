use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used for redaction. All are vetted literals.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Credentials embedded in a connection URL: `scheme://user:password@`
    pub fn url_credentials() -> &'static Regex {
        static URL_CREDENTIALS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"(?P<scheme>[a-z][a-z0-9+.-]*://)[^/\s:@]+:[^/\s@]*@").unwrap()
        });
        &URL_CREDENTIALS_REGEX
    }

    /// `password=...` style pairs in driver messages
    pub fn password_pair() -> &'static Regex {
        static PASSWORD_PAIR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"(?i)(?P<key>password|passwd|pwd)\s*=\s*\S+").unwrap()
        });
        &PASSWORD_PAIR_REGEX
    }

    /// Standard email addresses
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }
}

/// Redacts sensitive information from a string.
///
/// - Connection URL credentials become `scheme://[REDACTED]@`
/// - `password=...` values become `password=[REDACTED]`
/// - Emails keep the first character of the local part and the full domain
///
/// URLs go first so their `user:pass@host` part is not mistaken for an email.
pub fn redact(input: &str) -> String {
    let urls = PiiRegexRegistry::url_credentials().replace_all(input, "${scheme}[REDACTED]@");
    let passwords = PiiRegexRegistry::password_pair().replace_all(&urls, "${key}=[REDACTED]");

    PiiRegexRegistry::email()
        .replace_all(&passwords, |caps: &regex::Captures| {
            let full_match = &caps[0];
            match full_match.split_once('@') {
                Some((local, domain)) if !local.is_empty() => {
                    format!("{}***@{domain}", &local[..1])
                }
                _ => full_match.to_string(),
            }
        })
        .to_string()
}

/// A wrapper that redacts sensitive strings when displayed.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
