/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

/// Split `host:port` or `[host]:port` into host and port.
///
/// None is returned if there is no port delimiter, or if the authority has unexpected
/// colons or brackets. The brackets around IPv6 addresses are removed. The port is not
/// checked and may be empty.
pub fn split_host_port(authority: &str) -> Option<(&str, &str)> {
    let i = memchr::memrchr(b':', authority.as_bytes())?;

    let (host, host_start, host_end) = if authority.starts_with('[') {
        let end = memchr::memchr(b']', authority.as_bytes())?;
        if end + 1 != i {
            // missing port or too many colons
            return None;
        }
        (&authority[1..end], 1, end + 1)
    } else {
        let host = &authority[..i];
        if memchr::memchr(b':', host.as_bytes()).is_some() {
            return None;
        }
        (host, 0, 0)
    };

    if memchr::memchr(b'[', authority[host_start..].as_bytes()).is_some() {
        return None;
    }
    if memchr::memchr(b']', authority[host_end..].as_bytes()).is_some() {
        return None;
    }

    Some((host, &authority[i + 1..]))
}
