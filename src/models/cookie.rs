//! 会话 Cookie 数据模型
//!
//! 对应磁盘上 cookies.json 中的一条记录，也是注入浏览器时的最小形状

use serde::{Deserialize, Serialize};

fn default_domain() -> String {
    ".tiktok.com".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

/// 会话 Cookie
///
/// `name` 和 `value` 是必填字段；`domain` / `path` 缺失时按 TikTok 的默认值补齐，
/// 安全属性缺失时交给浏览器自行决定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(rename = "httpOnly", skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: default_domain(),
            path: default_path(),
            secure: None,
            http_only: None,
        }
    }

    /// Cookie 是否可用：`name` 和 `value` 都非空
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_validity() {
        assert!(SessionCookie::new("sessionid", "abc123").is_valid());
        assert!(!SessionCookie::new("", "abc123").is_valid());
        assert!(!SessionCookie::new("sessionid", "").is_valid());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let cookie: SessionCookie =
            serde_json::from_str(r#"{"name":"sessionid","value":"abc123"}"#).unwrap();
        assert_eq!(cookie.domain, ".tiktok.com");
        assert_eq!(cookie.path, "/");
        assert!(cookie.secure.is_none());
        assert!(cookie.http_only.is_none());
    }

    #[test]
    fn test_deserialize_keeps_optional_flags() {
        let cookie: SessionCookie = serde_json::from_str(
            r#"{"name":"tt_csrf","value":"x","domain":"www.tiktok.com","path":"/upload","secure":true,"httpOnly":false}"#,
        )
        .unwrap();
        assert_eq!(cookie.domain, "www.tiktok.com");
        assert_eq!(cookie.secure, Some(true));
        assert_eq!(cookie.http_only, Some(false));
    }
}
