//! Route table validation with detailed error reporting.
//!
//! The [`validate`] function checks a key → hostname mapping for empty
//! or malformed keys, hostnames that are not bare hosts, and duplicate
//! keys. Every problem is collected into a [`ValidationError`] so a
//! broken table is reported in one pass instead of one error per restart.

use std::collections::HashSet;

use url::Url;

use crate::error::ValidationError;

/// Validate an upstream key. Returns `Ok(())` or a human-readable error.
pub fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("key cannot be empty".into());
    }
    if key.contains('/') {
        return Err("key cannot contain '/'".into());
    }
    if key
        .chars()
        .any(|c| c.is_whitespace() || c == '?' || c == '#' || c.is_control())
    {
        return Err(format!("'{key}' contains characters not allowed in a path"));
    }
    Ok(())
}

/// Validate an upstream hostname (optionally `host:port`).
pub fn validate_host(host: &str) -> Result<(), String> {
    if host.is_empty() {
        return Err("host cannot be empty".into());
    }
    if host.contains("://") {
        return Err("host must not include a scheme".into());
    }
    let Ok(parsed) = Url::parse(&format!("https://{host}")) else {
        return Err(format!("'{host}' is not a valid hostname"));
    };
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(format!("'{host}' is not a valid hostname"));
    }
    if parsed.path() != "/"
        || parsed.query().is_some()
        || parsed.fragment().is_some()
        || !parsed.username().is_empty()
        || parsed.password().is_some()
    {
        return Err("host must not include a path, query or userinfo".into());
    }
    Ok(())
}

/// Validate a route prefix such as `/d1`.
pub fn validate_prefix(prefix: &str) -> Result<(), String> {
    if prefix.is_empty() {
        return Err("prefix cannot be empty".into());
    }
    if !prefix.starts_with('/') {
        return Err(format!("prefix must start with '/' (did you mean '/{prefix}'?)"));
    }
    if prefix.ends_with('/') {
        return Err("prefix must not end with '/'".into());
    }
    Ok(())
}

/// Validate an upstream base URL. Must be absolute http(s) with a host.
pub fn validate_base_url(url: &str) -> Result<(), String> {
    let Ok(parsed) = Url::parse(url) else {
        return Err(format!("'{url}' is not a valid URL"));
    };
    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(format!(
            "unsupported scheme '{scheme}' (expected http or https)"
        ));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(format!("'{url}' has no host"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err("base URL must not include a query or fragment".into());
    }
    Ok(())
}

pub fn validate<K, H>(upstreams: &[(K, H)]) -> Result<(), Vec<ValidationError>>
where
    K: AsRef<str>,
    H: AsRef<str>,
{
    let mut errors = Vec::new();

    if upstreams.is_empty() {
        errors.push(ValidationError {
            entry: "(root)".into(),
            field: "upstreams".into(),
            message: "at least one upstream must be configured".into(),
            suggestion: None,
        });
        return Err(errors);
    }

    let mut seen_keys = HashSet::new();

    for (i, (key, host)) in upstreams.iter().enumerate() {
        let key: &str = key.as_ref();
        let host: &str = host.as_ref();
        let entry_id = if key.is_empty() {
            format!("upstreams[{i}]")
        } else {
            key.to_string()
        };

        if let Err(msg) = validate_key(key) {
            let trimmed = key.trim_matches('/');
            errors.push(ValidationError {
                entry: entry_id.clone(),
                field: "key".into(),
                message: msg,
                suggestion: if key.contains('/') && validate_key(trimmed).is_ok() {
                    Some(format!("did you mean '{trimmed}'?"))
                } else {
                    None
                },
            });
        }

        if !seen_keys.insert(key) {
            errors.push(ValidationError {
                entry: entry_id.clone(),
                field: "key".into(),
                message: "duplicate upstream key".into(),
                suggestion: None,
            });
        }

        if let Err(msg) = validate_host(host) {
            let bare = host
                .split_once("://")
                .map_or(host, |(_, rest)| rest)
                .trim_end_matches('/');
            errors.push(ValidationError {
                entry: entry_id,
                field: "host".into(),
                message: msg,
                suggestion: if bare != host && validate_host(bare).is_ok() {
                    Some(format!("did you mean '{bare}'?"))
                } else {
                    None
                },
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_mapping_passes() {
        let upstreams = [("d1", "d1.api.example.com"), ("i1", "i1.api.example.com:8443")];
        assert!(validate(&upstreams).is_ok());
    }

    #[test]
    fn empty_mapping_fails() {
        let upstreams: [(&str, &str); 0] = [];
        let errors = validate(&upstreams).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("at least one upstream"));
    }

    #[test]
    fn empty_host_fails() {
        let errors = validate(&[("d1", "")]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "host");
        assert!(errors[0].message.contains("cannot be empty"));
    }

    #[test]
    fn host_with_scheme_suggests_bare_host() {
        let errors = validate(&[("d1", "https://d1.api.example.com/")]).unwrap_err();
        assert_eq!(
            errors[0].suggestion.as_deref(),
            Some("did you mean 'd1.api.example.com'?")
        );
    }

    #[test]
    fn host_with_path_fails() {
        let errors = validate(&[("d1", "d1.api.example.com/v1")]).unwrap_err();
        assert!(errors[0].message.contains("must not include a path"));
    }

    #[test]
    fn malformed_host_fails() {
        let errors = validate(&[("d1", "bad host name")]).unwrap_err();
        assert!(errors[0].message.contains("not a valid hostname"));
    }

    #[test]
    fn key_with_slash_suggests_trimmed() {
        let errors = validate(&[("/d1", "d1.api.example.com")]).unwrap_err();
        assert_eq!(errors[0].field, "key");
        assert_eq!(errors[0].suggestion.as_deref(), Some("did you mean 'd1'?"));
    }

    #[test]
    fn duplicate_keys_fail() {
        let upstreams = [("d1", "a.example.com"), ("d1", "b.example.com")];
        let errors = validate(&upstreams).unwrap_err();
        assert!(errors.iter().any(|e| e.message == "duplicate upstream key"));
    }

    #[test]
    fn every_bad_entry_is_reported() {
        let upstreams = [("", "a.example.com"), ("d2", ""), ("d3", "ok.example.com")];
        let errors = validate(&upstreams).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].entry, "upstreams[0]");
        assert_eq!(errors[1].entry, "d2");
    }

    #[test]
    fn prefix_rules() {
        assert!(validate_prefix("/d1").is_ok());
        assert!(validate_prefix("/api/v1").is_ok());
        assert!(validate_prefix("").is_err());
        assert!(validate_prefix("d1").unwrap_err().contains("did you mean '/d1'?"));
        assert!(validate_prefix("/d1/").is_err());
        assert!(validate_prefix("/").is_err());
    }

    #[test]
    fn base_url_rules() {
        assert!(validate_base_url("https://d1.api.example.com").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080/base").is_ok());
        assert!(validate_base_url("ftp://files.example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("https://example.com/?x=1").is_err());
    }
}
