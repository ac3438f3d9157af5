/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use atoi::FromRadix10Checked;
use http::{HeaderName, HeaderValue, Method, Uri};
use log::debug;
use tokio::io::AsyncBufRead;

use fwd_io_ext::LimitedBufReadExt;
use fwd_types::net::HttpPacketConfig;

use super::{HttpPacket, HttpPacketParseError};
use crate::{
    HttpBodyReader, HttpBodyType, HttpHeaderLine, HttpLineParseError, HttpMethodLine,
};

struct RequestHead {
    method: String,
    uri: Uri,
    fragment: Option<String>,
    version: String,
    host: Option<String>,
    content_length: u64,
    chunked_transfer: bool,
    has_transfer_encoding: bool,
    has_content_length: bool,
}

impl RequestHead {
    fn build_from_method_line(line_buf: &[u8]) -> Result<Self, HttpPacketParseError> {
        let req =
            HttpMethodLine::parse(line_buf).map_err(HttpPacketParseError::InvalidMethodLine)?;

        if req.version > 1 {
            return Err(HttpPacketParseError::UnsupportedVersion(
                req.protocol.to_string(),
            ));
        }

        // only check the token syntax, the method string is kept as is
        Method::from_str(req.method)
            .map_err(|_| HttpPacketParseError::InvalidMethod(req.method.to_string()))?;

        let (target, fragment) = match memchr::memchr(b'#', req.uri.as_bytes()) {
            Some(p) => (&req.uri[..p], Some(req.uri[p + 1..].to_string())),
            None => (req.uri, None),
        };
        let uri = Uri::from_str(target).map_err(|_| HttpPacketParseError::InvalidRequestTarget)?;
        check_request_target(req.method, target, &uri)?;

        Ok(RequestHead {
            method: req.method.to_string(),
            uri,
            fragment,
            version: req.protocol.to_string(),
            host: None,
            content_length: 0,
            chunked_transfer: false,
            has_transfer_encoding: false,
            has_content_length: false,
        })
    }

    fn body_type(&self) -> Option<HttpBodyType> {
        if self.chunked_transfer {
            Some(HttpBodyType::Chunked)
        } else if self.content_length > 0 {
            Some(HttpBodyType::ContentLength(self.content_length))
        } else {
            None
        }
    }

    fn parse_header_line(&mut self, line_buf: &[u8]) -> Result<(), HttpPacketParseError> {
        if !line_buf.ends_with(b"\r\n") {
            return Err(HttpPacketParseError::InvalidHeaderLine(
                HttpLineParseError::InvalidLineEnding,
            ));
        }
        let header =
            HttpHeaderLine::parse(line_buf).map_err(HttpPacketParseError::InvalidHeaderLine)?;
        self.handle_header(header)
    }

    fn handle_header(&mut self, header: HttpHeaderLine) -> Result<(), HttpPacketParseError> {
        let name = HeaderName::from_str(header.name).map_err(|_| {
            HttpPacketParseError::InvalidHeaderLine(HttpLineParseError::InvalidHeaderName)
        })?;
        HeaderValue::from_bytes(header.value.as_bytes()).map_err(|_| {
            HttpPacketParseError::InvalidHeaderLine(HttpLineParseError::InvalidHeaderValue)
        })?;

        match name.as_str() {
            "host" => {
                if self.host.is_some() {
                    return Err(HttpPacketParseError::InvalidHost);
                }
                self.host = Some(header.value.to_string());
            }
            "transfer-encoding" => {
                self.has_transfer_encoding = true;
                if self.has_content_length {
                    // content-length is ignored if transfer-encoding is present
                    self.content_length = 0;
                }

                // chunked must be the final coding
                let last_coding = header.value.rsplit(',').next().unwrap_or_default().trim();
                if last_coding.eq_ignore_ascii_case("chunked") {
                    self.chunked_transfer = true;
                } else {
                    return Err(HttpPacketParseError::InvalidChunkedTransferEncoding);
                }
            }
            "content-length" => {
                if self.has_transfer_encoding {
                    return Ok(());
                }

                let (content_length, len) = u64::from_radix_10_checked(header.value.as_bytes());
                let content_length = match content_length {
                    Some(v) if len > 0 && len == header.value.len() => v,
                    _ => return Err(HttpPacketParseError::InvalidContentLength),
                };

                if self.has_content_length && self.content_length != content_length {
                    return Err(HttpPacketParseError::InvalidContentLength);
                }
                self.has_content_length = true;
                self.content_length = content_length;
            }
            _ => {}
        }

        Ok(())
    }

    fn authority(&self) -> Result<&str, HttpPacketParseError> {
        if let Some(authority) = self.uri.authority() {
            let s = authority.as_str();
            // strip the userinfo part
            let host = match memchr::memrchr(b'@', s.as_bytes()) {
                Some(p) => &s[p + 1..],
                None => s,
            };
            if !host.is_empty() {
                return Ok(host);
            }
        }
        match self.host.as_deref() {
            Some(host) if !host.is_empty() => Ok(host),
            _ => Err(HttpPacketParseError::MissedHost),
        }
    }

    fn path(&self) -> String {
        let mut path = self.uri.path().to_string();
        if let Some(query) = self.uri.query() {
            if !query.is_empty() {
                path.push('?');
                path.push_str(query);
            }
        }
        if let Some(fragment) = &self.fragment {
            if !fragment.is_empty() {
                path.push('#');
                path.push_str(fragment);
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }

    fn into_packet(self, raw: Vec<u8>) -> Result<HttpPacket, HttpPacketParseError> {
        let authority = self.authority()?;
        let (domain, port) = match super::split_host_port(authority) {
            Some(("", _)) => return Err(HttpPacketParseError::InvalidHost),
            Some((host, port)) => (host, port),
            None => (authority, ""),
        };

        Ok(HttpPacket {
            method: self.method.clone(),
            domain: domain.to_string(),
            port: port.to_string(),
            path: self.path(),
            version: self.version.clone(),
            header_size: raw.len(),
            body_type: self.body_type(),
            drained_body_size: 0,
            raw,
        })
    }
}

fn check_request_target(
    method: &str,
    target: &str,
    uri: &Uri,
) -> Result<(), HttpPacketParseError> {
    if target.starts_with('/') {
        // origin-form
        return Ok(());
    }
    if method == "CONNECT" {
        // authority-form
        if uri.scheme().is_none() && uri.authority().is_some() {
            return Ok(());
        }
    } else if target == "*" {
        // asterisk-form
        return Ok(());
    } else if uri.scheme().is_some() && uri.authority().is_some() {
        // absolute-form
        return Ok(());
    }
    Err(HttpPacketParseError::InvalidRequestTarget)
}

impl HttpPacket {
    /// Read one client request from the reader.
    ///
    /// The request head is kept as raw bytes, and the request body, if any, will be drained
    /// before return. The reader will be positioned right after the end of the request on
    /// success, and in an undefined state on error.
    pub async fn parse<R>(
        reader: &mut R,
        config: &HttpPacketConfig,
    ) -> Result<Self, HttpPacketParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        Self::do_parse(reader, config)
            .await
            .inspect_err(|e| debug!("failed to parse http request packet: {e}"))
    }

    async fn do_parse<R>(
        reader: &mut R,
        config: &HttpPacketConfig,
    ) -> Result<Self, HttpPacketParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        let max_header_size = config.req_header_max_size();
        let mut raw = Vec::<u8>::with_capacity(1024);
        let mut line_buf = Vec::<u8>::with_capacity(1024);
        let mut header_size: usize = 0;

        let (found, nr) = reader
            .limited_read_until(b'\n', max_header_size, &mut line_buf)
            .await?;
        if nr == 0 {
            return Err(HttpPacketParseError::ClientClosed);
        }
        if !found {
            return if nr < max_header_size {
                Err(HttpPacketParseError::ClientClosed)
            } else {
                Err(HttpPacketParseError::TooLargeHeader(max_header_size))
            };
        }
        header_size += nr;
        raw.extend_from_slice(&line_buf);

        let mut head = RequestHead::build_from_method_line(line_buf.as_ref())?;

        loop {
            if header_size >= max_header_size {
                return Err(HttpPacketParseError::TooLargeHeader(max_header_size));
            }
            line_buf.clear();
            let max_len = max_header_size - header_size;
            let (found, nr) = reader
                .limited_read_until(b'\n', max_len, &mut line_buf)
                .await?;
            if nr == 0 {
                return Err(HttpPacketParseError::ClientClosed);
            }
            if !found {
                return if nr < max_len {
                    Err(HttpPacketParseError::ClientClosed)
                } else {
                    Err(HttpPacketParseError::TooLargeHeader(max_header_size))
                };
            }
            header_size += nr;
            raw.extend_from_slice(&line_buf);
            if line_buf.as_slice() == b"\r\n" {
                // header end line
                break;
            }

            head.parse_header_line(line_buf.as_ref())?;
        }

        let mut packet = head.into_packet(raw)?;

        if let Some(body_type) = packet.body_type {
            let mut body_reader =
                HttpBodyReader::new(&mut *reader, body_type, config.body_line_max_len());
            let mut sink = tokio::io::sink();
            packet.drained_body_size = tokio::io::copy(&mut body_reader, &mut sink)
                .await
                .map_err(HttpPacketParseError::BodyDrainFailed)?;
            debug!(
                "drained {} bytes of {:?} request body for {} {}",
                packet.drained_body_size, body_type, packet.method, packet.domain
            );
        }

        Ok(packet)
    }
}
