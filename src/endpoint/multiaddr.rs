//! Multiaddr to `host:port` conversion
//!
//! Only the TCP forms an IPFS node writes to its `api` file are supported:
//! `/ip4/<addr>/tcp/<port>`, `/ip6/<addr>/tcp/<port>` and the `/dns*`
//! variants, optionally followed by `/http`.

use crate::error::{GxrError, GxrResult};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Convert a multiaddr into a `host:port` string usable in an HTTP URL
pub fn multiaddr_to_host(addr: &str) -> GxrResult<String> {
    let rest = addr
        .strip_prefix('/')
        .ok_or_else(|| GxrError::multiaddr(addr, "must start with '/'"))?;

    let parts: Vec<&str> = rest.split('/').collect();
    let parts = match parts.as_slice() {
        [head @ .., "http"] => head,
        all => all,
    };

    let [proto, host, transport, port] = parts else {
        return Err(GxrError::multiaddr(
            addr,
            "expected /<ip4|ip6|dns>/<host>/tcp/<port>",
        ));
    };

    if *transport != "tcp" {
        return Err(GxrError::multiaddr(
            addr,
            format!("unsupported transport '{}'", transport),
        ));
    }

    let port: u16 = port
        .parse()
        .map_err(|_| GxrError::multiaddr(addr, format!("invalid port '{}'", port)))?;
    if port == 0 {
        return Err(GxrError::multiaddr(addr, "port 0 is not dialable"));
    }

    let host = match *proto {
        "ip4" => {
            host.parse::<Ipv4Addr>()
                .map_err(|_| GxrError::multiaddr(addr, format!("invalid IPv4 address '{}'", host)))?;
            host.to_string()
        }
        "ip6" => {
            host.parse::<Ipv6Addr>()
                .map_err(|_| GxrError::multiaddr(addr, format!("invalid IPv6 address '{}'", host)))?;
            format!("[{}]", host)
        }
        "dns" | "dns4" | "dns6" => {
            if host.is_empty() {
                return Err(GxrError::multiaddr(addr, "empty DNS name"));
            }
            host.to_string()
        }
        other => {
            return Err(GxrError::multiaddr(
                addr,
                format!("unsupported protocol '{}'", other),
            ))
        }
    };

    Ok(format!("{}:{}", host, port))
}
