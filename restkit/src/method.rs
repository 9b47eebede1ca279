// restkit/src/method.rs
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The fixed set of supported HTTP verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl Method {
    /// Canonical uppercase form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Case-insensitive match against the supported verb set.
    fn from_str(s: &str) -> Result<Self, Error> {
        if s.trim().is_empty() {
            return Err(Error::missing("method"));
        }
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "HEAD" => Ok(Method::Head),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "OPTIONS" => Ok(Method::Options),
            "TRACE" => Ok(Method::Trace),
            _ => Err(Error::out_of_range("method", s)),
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Head => http::Method::HEAD,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Patch => http::Method::PATCH,
            Method::Delete => http::Method::DELETE,
            Method::Options => http::Method::OPTIONS,
            Method::Trace => http::Method::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("dElEtE".parse::<Method>().unwrap(), Method::Delete);
    }

    #[test]
    fn test_parse_blank_is_missing() {
        let err = "".parse::<Method>().unwrap_err();
        assert!(matches!(err, Error::Missing { name: "method" }));
        let err = "   ".parse::<Method>().unwrap_err();
        assert!(matches!(err, Error::Missing { name: "method" }));
    }

    #[test]
    fn test_parse_unknown_is_out_of_range() {
        let err = "SAYHELLO".parse::<Method>().unwrap_err();
        assert!(matches!(err, Error::OutOfRange { name: "method", .. }));
    }

    #[test]
    fn test_as_str_roundtrip() {
        for method in [
            Method::Get,
            Method::Head,
            Method::Post,
            Method::Put,
            Method::Patch,
            Method::Delete,
            Method::Options,
            Method::Trace,
        ] {
            assert_eq!(method.as_str().parse::<Method>().unwrap(), method);
        }
    }
}
