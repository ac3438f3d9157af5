/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use super::HttpLineParseError;

pub struct HttpMethodLine<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    /// the literal version token, like `HTTP/1.1`
    pub protocol: &'a str,
    /// 0 for HTTP/1.0, 1 for HTTP/1.1, 2 for HTTP/2
    pub version: u8,
}

impl<'a> HttpMethodLine<'a> {
    pub fn parse(buf: &'a [u8]) -> Result<HttpMethodLine<'a>, HttpLineParseError> {
        const MINIMAL_LENGTH: usize = 14; // X / HTTP/1.x\r\n

        if buf.len() < MINIMAL_LENGTH {
            return Err(HttpLineParseError::NotLongEnough);
        }
        let Some(line) = buf.strip_suffix(b"\r\n") else {
            return Err(HttpLineParseError::InvalidLineEnding);
        };
        let line = std::str::from_utf8(line)?;

        let Some((method, left)) = line.split_once(' ') else {
            return Err(HttpLineParseError::NoDelimiterFound(' '));
        };
        let Some((uri, protocol)) = left.split_once(' ') else {
            return Err(HttpLineParseError::NoDelimiterFound(' '));
        };
        if method.is_empty() || uri.is_empty() {
            return Err(HttpLineParseError::EmptyToken);
        }

        let version: u8 = match protocol {
            "HTTP/1.0" => 0,
            "HTTP/1.1" => 1,
            "HTTP/2.0" | "HTTP/2" => 2,
            _ => return Err(HttpLineParseError::InvalidVersion),
        };

        Ok(HttpMethodLine {
            method,
            uri,
            protocol,
            version,
        })
    }
}
