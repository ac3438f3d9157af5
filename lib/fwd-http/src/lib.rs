/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod body;
pub use body::{HttpBodyReader, HttpBodyType};

mod parse;
pub use parse::{HttpChunkedLine, HttpHeaderLine, HttpLineParseError, HttpMethodLine};

mod packet;
pub use packet::{HttpPacket, HttpPacketParseError, is_valid_method, split_host_port};
