//! URL 验证模块
//!
//! 活动的 Webhook 地址只接受绝对的 http(s) URL

use url::Url;

/// URL 验证错误
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    MissingHost,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::MissingHost => write!(f, "URL must contain a host"),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 验证绝对 URL
///
/// 必须能被解析、协议为 http/https，并且带主机名
pub fn validate_absolute_url(url: &str) -> Result<Url, UrlValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::InvalidProtocol(format!("{}:", other))),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_webhook_urls() {
        assert!(validate_absolute_url("https://hooks.zapier.com/hooks/catch/1/abc/").is_ok());
        assert!(validate_absolute_url("http://localhost:8080/hook").is_ok());
        assert!(validate_absolute_url("  HTTPS://Example.com ").is_ok());
    }

    #[test]
    fn test_rejects_relative_and_empty() {
        assert_eq!(validate_absolute_url("   "), Err(UrlValidationError::EmptyUrl));
        assert!(matches!(
            validate_absolute_url("/hooks/catch"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_other_protocols() {
        assert!(matches!(
            validate_absolute_url("javascript:alert(1)"),
            Err(UrlValidationError::InvalidProtocol(_))
        ));
        assert!(matches!(
            validate_absolute_url("ftp://example.com/file"),
            Err(UrlValidationError::InvalidProtocol(_))
        ));
    }
}
