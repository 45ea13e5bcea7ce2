//! Session cookie loading and injection
//!
//! Cookies come from a JSON export (browser extension format: an array of
//! cookie objects). Values are normalized before injection: any `sameSite`
//! outside the CDP-accepted set is coerced to `Lax`, which matches what the
//! browser would do with a malformed attribute.

use crate::error::{Result, SessionError};
use chromiumoxide::cdp::browser_protocol::network::{CookieParam, CookieSameSite, TimeSinceEpoch};
use chromiumoxide::Page;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// One cookie as stored in the session file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Cookie domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Cookie path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// SameSite attribute; exporters emit values like "no_restriction"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
    /// Expiry as seconds since epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,
    /// HttpOnly flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    /// Secure flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    /// Associated URL (alternative to domain in some exports)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SessionCookie {
    /// Coerce `sameSite` into the CDP-accepted set
    pub fn normalize(&mut self) {
        if let Some(ref s) = self.same_site {
            if !matches!(s.as_str(), "Strict" | "Lax" | "None") {
                self.same_site = Some("Lax".to_string());
            }
        }
    }

    /// Convert into a CDP cookie parameter
    pub fn to_param(&self) -> Result<CookieParam> {
        let mut builder = CookieParam::builder().name(&self.name).value(&self.value);
        if let Some(ref domain) = self.domain {
            builder = builder.domain(domain);
        }
        if let Some(ref path) = self.path {
            builder = builder.path(path);
        }
        if let Some(ref url) = self.url {
            builder = builder.url(url);
        }
        if let Some(ref same_site) = self.same_site {
            builder = builder.same_site(match same_site.as_str() {
                "Strict" => CookieSameSite::Strict,
                "None" => CookieSameSite::None,
                _ => CookieSameSite::Lax,
            });
        }
        if let Some(expires) = self.expires {
            builder = builder.expires(TimeSinceEpoch::new(expires));
        }
        if let Some(http_only) = self.http_only {
            builder = builder.http_only(http_only);
        }
        if let Some(secure) = self.secure {
            builder = builder.secure(secure);
        }
        builder.build().map_err(|reason| {
            SessionError::InvalidCookie {
                name: self.name.clone(),
                reason,
            }
            .into()
        })
    }
}

/// Load and normalize the cookie file
///
/// A missing file is a fatal precondition failure: without a session the
/// feed serves a login wall and the run would silently collect nothing.
#[instrument]
pub fn load_cookies<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Vec<SessionCookie>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SessionError::CookieFileMissing(path.to_path_buf()).into());
    }
    let raw = std::fs::read_to_string(path).map_err(|source| SessionError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut cookies: Vec<SessionCookie> =
        serde_json::from_str(&raw).map_err(SessionError::Parse)?;
    for cookie in &mut cookies {
        cookie.normalize();
    }
    debug!("Loaded {} cookies from {}", cookies.len(), path.display());
    Ok(cookies)
}

/// Inject cookies into a page before navigation
#[instrument(skip(page, cookies))]
pub async fn inject_cookies(page: &Page, cookies: &[SessionCookie]) -> Result<()> {
    let params = cookies
        .iter()
        .map(SessionCookie::to_param)
        .collect::<Result<Vec<_>>>()?;
    page.set_cookies(params).await?;
    info!("Injected {} session cookies", cookies.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn cookie(same_site: Option<&str>) -> SessionCookie {
        SessionCookie {
            name: "auth_token".to_string(),
            value: "abc123".to_string(),
            domain: Some(".x.test".to_string()),
            path: Some("/".to_string()),
            same_site: same_site.map(String::from),
            expires: None,
            http_only: Some(true),
            secure: Some(true),
            url: None,
        }
    }

    #[test]
    fn test_normalize_keeps_valid_values() {
        for value in ["Strict", "Lax", "None"] {
            let mut c = cookie(Some(value));
            c.normalize();
            assert_eq!(c.same_site.as_deref(), Some(value));
        }
    }

    #[test]
    fn test_normalize_coerces_unknown_to_lax() {
        let mut c = cookie(Some("no_restriction"));
        c.normalize();
        assert_eq!(c.same_site.as_deref(), Some("Lax"));

        let mut c = cookie(Some("unspecified"));
        c.normalize();
        assert_eq!(c.same_site.as_deref(), Some("Lax"));
    }

    #[test]
    fn test_normalize_leaves_absent_alone() {
        let mut c = cookie(None);
        c.normalize();
        assert!(c.same_site.is_none());
    }

    #[test]
    fn test_to_param() {
        let c = cookie(Some("Lax"));
        let param = c.to_param().unwrap();
        assert_eq!(param.name, "auth_token");
        assert_eq!(param.value, "abc123");
        assert_eq!(param.domain.as_deref(), Some(".x.test"));
    }

    #[test]
    fn test_parse_camel_case_fields() {
        let raw = r#"[{"name":"n","value":"v","domain":"d","path":"/","sameSite":"weird","httpOnly":true,"secure":false}]"#;
        let cookies: Vec<SessionCookie> = serde_json::from_str(raw).unwrap();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].same_site.as_deref(), Some("weird"));
        assert_eq!(cookies[0].http_only, Some(true));
    }

    #[test]
    fn test_load_cookies_missing_file_is_fatal() {
        let err = load_cookies("/nonexistent/cookies.json").unwrap_err();
        assert!(matches!(
            err,
            Error::Session(SessionError::CookieFileMissing(_))
        ));
    }
}
