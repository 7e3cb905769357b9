//! HTTP method tokens recognized in action ids.

use core::fmt;

/// The subset of HTTP methods the action-name convention can encode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    /// Decode an uppercase method token (`GET`, `POST`, ...).
    ///
    /// Tokens are matched exactly; action ids are expected to carry the
    /// method in uppercase, as in `GET_item`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            "OPTIONS" => Some(Self::Options),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_the_convention_method_set() {
        for (token, method) in [
            ("GET", HttpMethod::Get),
            ("POST", HttpMethod::Post),
            ("PUT", HttpMethod::Put),
            ("PATCH", HttpMethod::Patch),
            ("DELETE", HttpMethod::Delete),
            ("OPTIONS", HttpMethod::Options),
        ] {
            assert_eq!(HttpMethod::from_token(token), Some(method));
            assert_eq!(method.as_str(), token);
        }
    }

    #[test]
    fn lowercase_and_unknown_tokens_are_rejected() {
        assert_eq!(HttpMethod::from_token("get"), None);
        assert_eq!(HttpMethod::from_token("HEAD"), None);
        assert_eq!(HttpMethod::from_token(""), None);
    }
}
