//! Built-in upstream mapping for the reference deployment.
//!
//! Changing the topology means editing this table and redeploying, or
//! passing `--upstream KEY=HOST` at startup.

pub const BUILTIN_UPSTREAMS: &[(&str, &str)] = &[
    ("d1", "d1.api.example.com"),
    ("d2", "d2.api.example.com"),
    ("d3", "d3.api.example.com"),
    ("d4", "d4.api.example.com"),
    ("d5", "d5.api.example.com"),
    ("d6", "d6.api.example.com"),
    ("d7", "d7.api.example.com"),
    ("d8", "d8.api.example.com"),
    ("d9", "d9.api.example.com"),
    ("d10", "d10.api.example.com"),
    ("d11", "d11.api.example.com"),
    ("d12", "d12.api.example.com"),
    ("d13", "d13.api.example.com"),
    ("d14", "d14.api.example.com"),
    ("d15", "d15.api.example.com"),
    ("d16", "d16.api.example.com"),
    ("d17", "d17.api.example.com"),
    ("d18", "d18.api.example.com"),
    ("d19", "d19.api.example.com"),
    ("d20", "d20.api.example.com"),
    ("i1", "i1.api.example.com"),
    ("i2", "i2.api.example.com"),
    ("i3", "i3.api.example.com"),
    ("i4", "i4.api.example.com"),
    ("i5", "i5.api.example.com"),
    ("i6", "i6.api.example.com"),
    ("i7", "i7.api.example.com"),
    ("i8", "i8.api.example.com"),
    ("i9", "i9.api.example.com"),
    ("i10", "i10.api.example.com"),
];

/// Parse a `KEY=HOST` command-line mapping.
#[must_use]
pub fn parse_upstream_arg(arg: &str) -> Option<(String, String)> {
    let (key, host) = arg.split_once('=')?;
    Some((key.trim().to_string(), host.trim().to_string()))
}
