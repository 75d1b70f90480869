//! Routable HTTP methods.
//!
//! Only the methods this service registers routes for are modelled. Any
//! other method fails to convert and falls through to the router's
//! not-found handler.

use std::str::FromStr;

/// A method that can carry a route.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Method {
    Get,
    Head,
}

/// Parses an uppercase method string (e.g. `"GET"`). Case-sensitive per RFC 9110 §9.1.
impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET"  => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            _      => Err(()),
        }
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = ();

    fn try_from(m: &http::Method) -> Result<Self, Self::Error> {
        m.as_str().parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_routable_methods() {
        assert_eq!("HEAD".parse::<Method>(), Ok(Method::Head));
        assert_eq!(Method::try_from(&http::Method::GET), Ok(Method::Get));
    }

    #[test]
    fn rejects_lowercase_and_unrouted_methods() {
        assert!("get".parse::<Method>().is_err());
        assert!(Method::try_from(&http::Method::POST).is_err());
        assert!("PURGE".parse::<Method>().is_err());
    }
}
