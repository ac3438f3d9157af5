/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use crate::HttpBodyType;

const DEFAULT_HTTP_PORT: u16 = 80;
const DEFAULT_CONNECT_PORT: u16 = 443;

/// One client request, both the parsed fields and the original head bytes.
///
/// The request body is drained while parsing and is never kept.
#[derive(Debug)]
pub struct HttpPacket {
    pub(super) raw: Vec<u8>,
    pub(super) method: String,
    pub(super) domain: String,
    pub(super) port: String,
    pub(super) path: String,
    pub(super) version: String,
    pub(super) header_size: usize,
    pub(super) body_type: Option<HttpBodyType>,
    pub(super) drained_body_size: u64,
}

impl HttpPacket {
    /// The request line, the header lines and the ending blank line.
    ///
    /// These are the exact bytes received from the client, until `tidy()` is called.
    #[inline]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[inline]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The port in the target authority, empty if no explicit port is set
    #[inline]
    pub fn port(&self) -> &str {
        &self.port
    }

    /// The path, with query and fragment appended if they are present
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_valid_method(&self) -> bool {
        super::is_valid_method(&self.method)
    }

    pub fn is_connect_method(&self) -> bool {
        self.method == "CONNECT"
    }

    pub fn port_u16(&self) -> Option<u16> {
        u16::from_str(&self.port).ok()
    }

    /// The explicit port, or the default port for the request type
    pub fn upstream_port(&self) -> u16 {
        self.port_u16().unwrap_or(if self.is_connect_method() {
            DEFAULT_CONNECT_PORT
        } else {
            DEFAULT_HTTP_PORT
        })
    }

    /// Size of the request head as received
    #[inline]
    pub fn header_size(&self) -> usize {
        self.header_size
    }

    #[inline]
    pub fn body_type(&self) -> Option<HttpBodyType> {
        self.body_type
    }

    /// Size of the drained body on the wire, including the chunked encoding
    #[inline]
    pub fn drained_body_size(&self) -> u64 {
        self.drained_body_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(method: &str, port: &str) -> HttpPacket {
        HttpPacket {
            raw: Vec::new(),
            method: method.to_string(),
            domain: "example.com".to_string(),
            port: port.to_string(),
            path: "/".to_string(),
            version: "HTTP/1.1".to_string(),
            header_size: 0,
            body_type: None,
            drained_body_size: 0,
        }
    }

    #[test]
    fn method() {
        let p = packet("PROPFIND", "");
        assert!(p.is_valid_method());
        assert!(!p.is_connect_method());

        let p = packet("FOOBAR", "");
        assert!(!p.is_valid_method());
        assert!(!p.is_connect_method());

        let p = packet("CONNECT", "");
        assert!(p.is_valid_method());
        assert!(p.is_connect_method());

        let p = packet("connect", "");
        assert!(!p.is_valid_method());
        assert!(!p.is_connect_method());
    }

    #[test]
    fn upstream_port() {
        let p = packet("GET", "8080");
        assert_eq!(p.port_u16(), Some(8080));
        assert_eq!(p.upstream_port(), 8080);

        let p = packet("GET", "");
        assert_eq!(p.port_u16(), None);
        assert_eq!(p.upstream_port(), 80);

        let p = packet("CONNECT", "");
        assert_eq!(p.upstream_port(), 443);

        let p = packet("CONNECT", "http");
        assert_eq!(p.port_u16(), None);
        assert_eq!(p.upstream_port(), 443);
    }
}
