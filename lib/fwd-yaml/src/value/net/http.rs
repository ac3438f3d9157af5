/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use anyhow::{Context, anyhow};
use humanize_rs::bytes::Bytes;
use yaml_rust::Yaml;

use fwd_types::net::HttpPacketConfig;

fn as_header_size(v: &Yaml) -> anyhow::Result<usize> {
    match v {
        Yaml::Integer(i) => Ok(usize::try_from(*i)?),
        Yaml::String(s) => Ok(s.parse::<Bytes>()?.size()),
        _ => Err(anyhow!(
            "header size should be an integer or a humanized size string"
        )),
    }
}

fn set_packet_config_field(
    config: &mut HttpPacketConfig,
    key: &str,
    v: &Yaml,
) -> anyhow::Result<()> {
    // keys are matched with '-' and '_' treated the same, case-insensitive
    match key.to_ascii_lowercase().replace('-', "_").as_str() {
        "req_header_max_size" | "header_max_size" => {
            let size = as_header_size(v).context("invalid header size value")?;
            config.set_req_header_max_size(size);
        }
        "body_line_max_length" | "body_line_max_len" => {
            let len = crate::value::as_usize(v).context("invalid line length value")?;
            config.set_body_line_max_len(len);
        }
        _ => return Err(anyhow!("unknown key")),
    }
    Ok(())
}

pub fn as_http_packet_config(value: &Yaml) -> anyhow::Result<HttpPacketConfig> {
    let mut config = HttpPacketConfig::default();

    match value {
        Yaml::Hash(map) => {
            for (k, v) in map.iter() {
                let Yaml::String(key) = k else {
                    return Err(anyhow!("http packet config keys should be strings"));
                };
                set_packet_config_field(&mut config, key, v)
                    .context(format!("invalid value for http packet config key {key}"))?;
            }
        }
        Yaml::Integer(_) | Yaml::String(_) => {
            let size = as_header_size(value).context("invalid single header size value")?;
            config.set_req_header_max_size(size);
        }
        _ => return Err(anyhow!("invalid yaml value: {:?}", value)),
    }

    Ok(config)
}
