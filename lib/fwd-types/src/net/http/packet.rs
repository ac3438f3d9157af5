/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

const DEFAULT_REQ_HEADER_MAX_SIZE: usize = 65536; // 64KiB
const DEFAULT_BODY_LINE_MAX_LEN: usize = 8192;

/// Limits applied while reading one client request packet
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HttpPacketConfig {
    req_header_max_size: usize,
    body_line_max_len: usize,
}

impl Default for HttpPacketConfig {
    fn default() -> Self {
        HttpPacketConfig {
            req_header_max_size: DEFAULT_REQ_HEADER_MAX_SIZE,
            body_line_max_len: DEFAULT_BODY_LINE_MAX_LEN,
        }
    }
}

impl HttpPacketConfig {
    pub fn new(req_header_max_size: usize) -> Self {
        HttpPacketConfig {
            req_header_max_size,
            ..Default::default()
        }
    }

    pub fn set_req_header_max_size(&mut self, size: usize) {
        self.req_header_max_size = size;
    }

    /// max size of the request line and all header lines, including the line endings
    #[inline]
    pub fn req_header_max_size(&self) -> usize {
        self.req_header_max_size
    }

    pub fn set_body_line_max_len(&mut self, len: usize) {
        self.body_line_max_len = len;
    }

    /// max length of a chunk size line or a trailer line in a chunked body
    #[inline]
    pub fn body_line_max_len(&self) -> usize {
        self.body_line_max_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default() {
        let config = HttpPacketConfig::default();
        assert_eq!(config.req_header_max_size(), 65536);
        assert_eq!(config.body_line_max_len(), 8192);
    }

    #[test]
    fn set() {
        let mut config = HttpPacketConfig::new(1024);
        assert_eq!(config.req_header_max_size(), 1024);
        assert_eq!(config.body_line_max_len(), 8192);

        config.set_req_header_max_size(2048);
        config.set_body_line_max_len(64);
        assert_eq!(config.req_header_max_size(), 2048);
        assert_eq!(config.body_line_max_len(), 64);
    }
}
