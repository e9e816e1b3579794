//! Splits a request-target into the pieces the waterfall labels need.

use url::Url;

/// Host, path and display file of a request-target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriParts {
    /// Host named by the target itself, if any (absolute- or authority-form).
    pub host: Option<String>,
    /// Path component without query or fragment.
    pub path: String,
    /// Last path segment, used as a display label. Empty for `/`.
    pub file: String,
}

/// Splits a request-target as found on a request-line.
///
/// Handles the forms seen in the wild:
///
/// - absolute-form, `http://example.com/a/b` (proxied requests)
/// - origin-form, `/a/b?x=1`
/// - authority-form, `example.com:443` (CONNECT)
/// - asterisk-form, `*`
///
/// Never fails; an unparseable target yields empty parts.
pub fn split_uri(target: &str) -> UriParts {
    if target.starts_with('/') {
        return from_literal_path(target);
    }

    if target.contains("://") {
        return match Url::parse(target) {
            Ok(url) => from_url(&url, url.host_str().map(str::to_string)),
            Err(e) => {
                tracing::debug!(target_uri = target, error = %e, "Unparseable absolute URI");
                UriParts::default()
            }
        };
    }

    if target.is_empty() || target == "*" {
        return UriParts::default();
    }

    // authority-form: host[:port]
    let host = target
        .rsplit_once(':')
        .filter(|(_, port)| port.chars().all(|c| c.is_ascii_digit()))
        .map(|(host, _)| host)
        .unwrap_or(target);

    UriParts {
        host: Some(host.to_string()),
        ..UriParts::default()
    }
}

fn from_url(url: &Url, host: Option<String>) -> UriParts {
    let path = url.path().to_string();

    UriParts {
        host,
        file: last_segment(&path).to_string(),
        path,
    }
}

/// Origin-form targets are kept as written: no dot-segment removal, no
/// re-encoding, and a leading `//` is not read as an authority.
fn from_literal_path(target: &str) -> UriParts {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    let path = &target[..end];

    UriParts {
        host: None,
        path: path.to_string(),
        file: last_segment(path).to_string(),
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}
