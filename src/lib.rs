//! This crate implements [IETF RFC 3986](https://tools.ietf.org/html/rfc3986),
//! "Uniform Resource Identifier (URI): Generic Syntax", as immutable [`Uri`]
//! values bound to a [`SchemePolicy`] which adds the rules of a particular
//! scheme on top of the generic grammar.
//!
//! Three policies come with the crate:
//!
//! * [`Generic`]: any scheme, nothing beyond RFC 3986;
//! * [`Http`]: `http` and `https`, with default ports and a mandatory host;
//! * [`Data`]: `data` URIs as described by
//!   [RFC 2397](https://tools.ietf.org/html/rfc2397).
//!
//! Every `Uri` is validated and normalized when it is built, so that
//! equivalent URIs have the same string form:
//!
//! ```text
//! HTTP://www.Example.com:80/%7efoo  ->  http://www.example.com/%7Efoo
//! ```
//!
//! # Examples
//!
//! ## Parsing a URI into its components
//!
//! ```rust
//! use uri_schemes::Uri;
//!
//! let uri: Uri = Uri::parse("http://www.example.com/foo?bar#baz").unwrap();
//! let authority = uri.authority().unwrap();
//! assert_eq!("www.example.com", authority.host());
//! assert_eq!("/foo", uri.path_to_string().unwrap());
//! assert_eq!(Some("bar"), uri.query_to_string().unwrap().as_deref());
//! assert_eq!(Some("baz"), uri.fragment_to_string().unwrap().as_deref());
//! ```
//!
//! ## Generating a URI from its components
//!
//! ```rust
//! use uri_schemes::{Components, Http, Uri};
//!
//! let components = Components {
//!     scheme: Some("HTTP".into()),
//!     host: Some("www.example.com".into()),
//!     port: Some(80),
//!     path: "/foo".into(),
//!     query: Some("bar".into()),
//!     fragment: Some("baz".into()),
//!     ..Components::default()
//! };
//! let uri = Uri::from_components(components, Http::default()).unwrap();
//! assert_eq!("http://www.example.com/foo?bar#baz", uri.to_string());
//! ```
//!
//! ## Telling syntax errors from scheme rule violations
//!
//! ```rust
//! use uri_schemes::{Http, SemanticRule, Uri};
//!
//! assert!(Uri::<Http>::parse("http://exa mple.com/").unwrap_err().is_syntax());
//! let error = Uri::<Http>::parse("ftp://example.com/").unwrap_err();
//! assert_eq!(
//!     SemanticRule::UnsupportedScheme("ftp".into()),
//!     error.as_semantic().unwrap().rule
//! );
//! ```
//!
//! [`Uri`]: struct.Uri.html
//! [`SchemePolicy`]: trait.SchemePolicy.html
//! [`Generic`]: struct.Generic.html
//! [`Http`]: struct.Http.html
//! [`Data`]: struct.Data.html

// #![warn(clippy::pedantic)]
#![allow(clippy::non_ascii_literal)]
#![warn(missing_docs)]

mod authority;
pub use authority::Authority;

mod character_classes;

pub mod codec;

mod component;
pub use component::Component;

mod data;
pub use data::Data;

mod error;
pub use error::{Error, SemanticError, SemanticRule, SyntaxError, SyntaxReason};

mod http;
pub use http::Http;

mod media_type;
mod normalizer;
mod parse_host_port;
mod parser;

mod policy;
pub use policy::{Generic, SchemePolicy, SchemeRegistry};

mod server;
mod uri;
pub use uri::{Components, Uri};
mod validate_ipv4_address;
mod validate_ipv6_address;
