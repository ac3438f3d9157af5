/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use http::StatusCode;
use thiserror::Error;

use crate::HttpLineParseError;

#[derive(Debug, Error)]
pub enum HttpPacketParseError {
    #[error("client closed")]
    ClientClosed,
    #[error("too large header, should be less than {0}")]
    TooLargeHeader(usize),
    #[error("invalid method line: {0}")]
    InvalidMethodLine(HttpLineParseError),
    #[error("invalid method: {0}")]
    InvalidMethod(String),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),
    #[error("invalid request target")]
    InvalidRequestTarget,
    #[error("invalid header line: {0}")]
    InvalidHeaderLine(HttpLineParseError),
    #[error("invalid host header")]
    InvalidHost,
    #[error("missed host header")]
    MissedHost,
    #[error("invalid chunked transfer-encoding")]
    InvalidChunkedTransferEncoding,
    #[error("invalid content length")]
    InvalidContentLength,
    #[error("failed to drain request body: {0:?}")]
    BodyDrainFailed(io::Error),
    #[error("io failed: {0:?}")]
    IoFailed(#[from] io::Error),
}

impl HttpPacketParseError {
    /// The status code to reply to the client, or None if the client should just be closed
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            HttpPacketParseError::IoFailed(_) | HttpPacketParseError::ClientClosed => None,
            HttpPacketParseError::BodyDrainFailed(e) => {
                if e.kind() == io::ErrorKind::InvalidData {
                    Some(StatusCode::BAD_REQUEST)
                } else {
                    None
                }
            }
            HttpPacketParseError::TooLargeHeader(_) => {
                Some(StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE)
            }
            HttpPacketParseError::UnsupportedVersion(_) => {
                Some(StatusCode::HTTP_VERSION_NOT_SUPPORTED)
            }
            _ => Some(StatusCode::BAD_REQUEST),
        }
    }
}
