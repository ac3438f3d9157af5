/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use super::HttpLineParseError;

pub struct HttpHeaderLine<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> HttpHeaderLine<'a> {
    /// Parse a `field-name ":" OWS field-value OWS` line.
    ///
    /// No whitespace is allowed around the field name, which also rejects obs-fold lines.
    pub fn parse(buf: &'a [u8]) -> Result<HttpHeaderLine<'a>, HttpLineParseError> {
        let line = std::str::from_utf8(buf)?;
        let Some(p) = memchr::memchr(b':', line.as_bytes()) else {
            return Err(HttpLineParseError::NoDelimiterFound(':'));
        };

        let name = &line[0..p];
        if name.is_empty() || name.trim() != name {
            return Err(HttpLineParseError::InvalidHeaderName);
        }

        let value = line[p + 1..]
            .trim_end_matches(['\r', '\n'])
            .trim_matches([' ', '\t']);

        Ok(HttpHeaderLine { name, value })
    }
}
