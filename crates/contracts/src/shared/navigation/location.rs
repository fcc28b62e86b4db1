//! Parsed location (path + query) supplied by the host.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub type QueryMap = BTreeMap<String, String>;

/// Текущее местоположение: путь и уже разобранные query-параметры
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub path: String,
    pub query: QueryMap,
}

impl NavigationRequest {
    pub fn new(path: impl Into<String>, query: QueryMap) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Split `"/compras?tab=ordenes"` into path and percent-decoded query.
    ///
    /// Pairs that fail to decode are kept raw; a repeated key keeps the last value.
    pub fn parse(url: &str) -> Self {
        let url = url.split('#').next().unwrap_or_default();
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, query),
            None => (url, ""),
        };

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect();

        Self {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            query,
        }
    }

    /// Non-empty path segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(raw)
}

/// Destination of a permanent redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTarget {
    pub path: String,
    pub query: QueryMap,
}

impl RedirectTarget {
    pub fn new(path: impl Into<String>, query: QueryMap) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Absolute path or URL, query sorted by key.
    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

impl From<NavigationRequest> for RedirectTarget {
    fn from(request: NavigationRequest) -> Self {
        Self {
            path: request.path,
            query: request.query,
        }
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_and_query() {
        let req = NavigationRequest::parse("/compras?tab=action-center&preset=pending_approval");
        assert_eq!(req.path, "/compras");
        assert_eq!(req.query_param("tab"), Some("action-center"));
        assert_eq!(req.query_param("preset"), Some("pending_approval"));
        assert_eq!(req.segments().collect::<Vec<_>>(), vec!["compras"]);
    }

    #[test]
    fn test_parse_decodes_and_drops_fragment() {
        let req = NavigationRequest::parse("/finanzas/pagos?q=caf%C3%A9+bar&flag#top");
        assert_eq!(req.query_param("q"), Some("café bar"));
        assert_eq!(req.query_param("flag"), Some(""));
        assert_eq!(
            req.segments().collect::<Vec<_>>(),
            vec!["finanzas", "pagos"]
        );
    }

    #[test]
    fn test_parse_empty() {
        let req = NavigationRequest::parse("");
        assert_eq!(req.path, "/");
        assert!(req.query.is_empty());
        assert_eq!(req.segments().count(), 0);
    }

    #[test]
    fn test_redirect_url_is_sorted_and_encoded() {
        let mut query = QueryMap::new();
        query.insert("tab".into(), "action-center".into());
        query.insert("preset".into(), "pending approval".into());
        let target = RedirectTarget::new("/compras", query);
        assert_eq!(
            target.to_url(),
            "/compras?preset=pending%20approval&tab=action-center"
        );
    }
}
