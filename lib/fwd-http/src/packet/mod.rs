/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod error;
pub use error::HttpPacketParseError;

mod method;
pub use method::is_valid_method;

mod authority;
pub use authority::split_host_port;

mod request;
pub use request::HttpPacket;

mod parse;
mod tidy;
