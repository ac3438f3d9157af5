/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

/// Check if the method is one of the standard HTTP or WebDAV methods.
///
/// The match is case-sensitive.
pub fn is_valid_method(method: &str) -> bool {
    matches!(
        method,
        "DELETE"
            | "GET"
            | "HEAD"
            | "POST"
            | "PUT"
            | "CONNECT"
            | "OPTIONS"
            | "TRACE"
            | "COPY"
            | "LOCK"
            | "MKCOL"
            | "MOVE"
            | "PROPFIND"
            | "PROPPATCH"
            | "SEARCH"
            | "UNLOCK"
            | "BIND"
            | "REBIND"
            | "UNBIND"
            | "ACL"
            | "REPORT"
            | "MKACTIVITY"
            | "CHECKOUT"
            | "MERGE"
            | "M-SEARCH"
            | "NOTIFY"
            | "SUBSCRIBE"
            | "UNSUBSCRIBE"
            | "PATCH"
            | "PURGE"
            | "MKCALENDAR"
            | "LINK"
            | "UNLINK"
    )
}
