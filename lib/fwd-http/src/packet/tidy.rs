/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use bytes::BufMut;
use log::trace;
use memchr::memmem;

use super::HttpPacket;

const PROXY_CONNECTION: &[u8] = b"Proxy-Connection";

impl HttpPacket {
    /// Rewrite the raw request head so it can be sent to the upstream server.
    ///
    /// The request line is rebuilt in origin-form from the parsed fields,
    /// `Proxy-Connection` headers and empty lines are removed, and all other
    /// header lines are kept in their original order.
    pub fn tidy(&mut self) {
        let mut buf = Vec::<u8>::with_capacity(self.raw.len());
        buf.put_slice(self.method.as_bytes());
        buf.put_u8(b' ');
        buf.put_slice(self.path.as_bytes());
        buf.put_u8(b' ');
        buf.put_slice(self.version.as_bytes());
        buf.put_slice(b"\r\n");

        let mut start = 0usize;
        let mut first = true;
        let mut push_line = |line: &[u8]| {
            if first {
                // replaced by the rebuilt request line
                first = false;
                return;
            }
            if line.is_empty() || line.starts_with(PROXY_CONNECTION) {
                return;
            }
            buf.put_slice(line);
            buf.put_slice(b"\r\n");
        };
        for end in memmem::find_iter(&self.raw, b"\r\n") {
            push_line(&self.raw[start..end]);
            start = end + 2;
        }
        push_line(&self.raw[start..]);
        buf.put_slice(b"\r\n");

        trace!(
            "tidied {} {} request head: {} -> {} bytes",
            self.method,
            self.domain,
            self.raw.len(),
            buf.len()
        );
        self.raw = buf;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwd_types::net::HttpPacketConfig;
    use tokio::io::BufReader;
    use tokio_test::io::Builder;

    async fn parse_bytes(content: &[u8]) -> HttpPacket {
        let stream = Builder::new().read(content).build();
        let mut buf_stream = BufReader::new(stream);
        HttpPacket::parse(&mut buf_stream, &HttpPacketConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn strip_proxy_connection() {
        let mut p = parse_bytes(
            b"GET /foo?x=1 HTTP/1.1\r\n\
            Host: example.com:8080\r\n\
            Proxy-Connection: keep-alive\r\n\
            Accept: */*\r\n\r\n",
        )
        .await;
        p.tidy();
        assert_eq!(
            p.raw(),
            b"GET /foo?x=1 HTTP/1.1\r\n\
            Host: example.com:8080\r\n\
            Accept: */*\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn absolute_form_rewritten() {
        let mut p = parse_bytes(
            b"GET http://example.com/index.html?a=b#top HTTP/1.0\r\n\
            Proxy-Connection: close\r\n\
            Host: example.com\r\n\
            Proxy-Connection-Extra: 1\r\n\
            User-Agent: curl/8.0\r\n\r\n",
        )
        .await;
        p.tidy();
        assert_eq!(
            p.raw(),
            b"GET /index.html?a=b#top HTTP/1.0\r\n\
            Host: example.com\r\n\
            User-Agent: curl/8.0\r\n\r\n"
        );
        assert!(!p.raw().split(|c| *c == b'\n').any(|l| l.starts_with(PROXY_CONNECTION)));
    }

    #[tokio::test]
    async fn case_sensitive_match() {
        let mut p = parse_bytes(
            b"GET / HTTP/1.1\r\nHost: example.com\r\nproxy-connection: keep-alive\r\n\r\n",
        )
        .await;
        p.tidy();
        assert_eq!(
            p.raw(),
            b"GET / HTTP/1.1\r\nHost: example.com\r\nproxy-connection: keep-alive\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn body_not_kept() {
        let mut p = parse_bytes(
            b"POST /upload HTTP/1.1\r\nHost: example.com\r\nContent-Length: 3\r\n\r\nabc",
        )
        .await;
        p.tidy();
        assert_eq!(
            p.raw(),
            b"POST /upload HTTP/1.1\r\nHost: example.com\r\nContent-Length: 3\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn reparse_tidied() {
        let mut p = parse_bytes(
            b"PROPFIND http://dav.example.com:8080/files/ HTTP/1.1\r\n\
            Host: dav.example.com:8080\r\n\
            Proxy-Connection: keep-alive\r\n\
            Depth: 1\r\n\r\n",
        )
        .await;
        p.tidy();

        let raw = p.raw().to_vec();
        let mut p2 = parse_bytes(&raw).await;
        assert_eq!(p2.method(), p.method());
        assert_eq!(p2.path(), p.path());
        assert_eq!(p2.version(), p.version());
        assert_eq!(p2.domain(), "dav.example.com");
        assert_eq!(p2.port(), "8080");
        assert_eq!(p2.raw(), raw.as_slice());

        p2.tidy();
        assert_eq!(p2.raw(), raw.as_slice());
    }

    #[tokio::test]
    async fn reparse_needs_host_header() {
        let mut p =
            parse_bytes(b"GET http://example.com/a?b=1 HTTP/1.0\r\nAccept: */*\r\n\r\n").await;
        assert_eq!(p.domain(), "example.com");
        p.tidy();
        assert_eq!(p.raw(), b"GET /a?b=1 HTTP/1.0\r\nAccept: */*\r\n\r\n");

        // the authority was only in the request target
        let stream = Builder::new().read(p.raw()).build();
        let mut buf_stream = BufReader::new(stream);
        let e = HttpPacket::parse(&mut buf_stream, &HttpPacketConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(e, crate::HttpPacketParseError::MissedHost));
    }

    #[test]
    fn tidy_without_crlf() {
        let mut p = HttpPacket {
            raw: b"GET / HTTP/1.1\r\nHost: example.com".to_vec(),
            method: "GET".to_string(),
            domain: "example.com".to_string(),
            port: String::new(),
            path: "/".to_string(),
            version: "HTTP/1.1".to_string(),
            header_size: 0,
            body_type: None,
            drained_body_size: 0,
        };
        p.tidy();
        assert_eq!(p.raw(), b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n");
    }
}
