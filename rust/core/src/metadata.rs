// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plane metadata stored in a proxy's free-text slot.
//!
//! The proxy is the only channel that survives between the visualize call and
//! the reconcile call, so everything reconciliation needs travels in one
//! tagged key-value string:
//!
//! ```text
//! VRP/1;role=cut;elev=90;view=42;level=Level%201
//! ```
//!
//! Values escape `%`, `;` and `=` as `%25`, `%3B` and `%3D`. Decoding fails
//! closed: any malformed input yields `None` and unknown keys are ignored.

use nom::{
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{eof, map_res},
    multi::many0,
    sequence::{preceded, separated_pair, terminated, tuple},
    IResult,
};

use crate::ids::ElementId;
use crate::role::PlaneRole;

/// Name prefix identifying proxies created by this crate.
pub const PROXY_NAME_PREFIX: &str = "ViewRange::";

/// Leading tag of the metadata string.
pub const METADATA_MAGIC: &str = "VRP";

/// Current metadata format version.
pub const METADATA_VERSION: u32 = 1;

/// State carried on a proxy from creation to reconciliation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneMetadata {
    pub role: PlaneRole,
    /// Absolute elevation when the proxy was created.
    pub original_elevation: f64,
    /// Plan view the proxy was created for.
    pub source_view: ElementId,
    /// Display only.
    pub source_level_name: String,
}

impl PlaneMetadata {
    /// Serializes to the tagged key-value form.
    pub fn encode(&self) -> String {
        format!(
            "{}/{};role={};elev={};view={};level={}",
            METADATA_MAGIC,
            METADATA_VERSION,
            self.role.key(),
            self.original_elevation,
            self.source_view,
            escape(&self.source_level_name),
        )
    }

    /// Parses a metadata string, returning `None` for anything unrecognized.
    pub fn decode(text: &str) -> Option<Self> {
        let (_, (version, fields)) = metadata(text.trim()).ok()?;
        if version != METADATA_VERSION {
            return None;
        }

        let mut role = None;
        let mut elevation = None;
        let mut view = None;
        let mut level_name = String::new();

        for (key, value) in fields {
            match key {
                "role" => role = Some(PlaneRole::from_key(value)?),
                "elev" => {
                    let z = fast_float::parse::<f64, _>(value).ok()?;
                    if !z.is_finite() {
                        return None;
                    }
                    elevation = Some(z);
                }
                "view" => view = Some(value.parse::<ElementId>().ok()?),
                "level" => level_name = unescape(value)?,
                _ => {}
            }
        }

        Some(PlaneMetadata {
            role: role?,
            original_elevation: elevation?,
            source_view: view?,
            source_level_name: level_name,
        })
    }
}

/// Returns `true` if a shape name carries the proxy marker.
#[inline]
pub fn is_proxy_name(name: &str) -> bool {
    name.starts_with(PROXY_NAME_PREFIX)
}

/// Marker name for the proxy of a role.
pub fn proxy_name(role: PlaneRole) -> String {
    format!("{}{}", PROXY_NAME_PREFIX, role.key())
}

/// `VRP/<version>`
fn header(input: &str) -> IResult<&str, u32> {
    preceded(
        tuple((tag(METADATA_MAGIC), char('/'))),
        map_res(digit1, |s: &str| s.parse::<u32>()),
    )(input)
}

/// `;key=value`
fn field(input: &str) -> IResult<&str, (&str, &str)> {
    preceded(
        char(';'),
        separated_pair(
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
            char('='),
            take_while(|c: char| c != ';'),
        ),
    )(input)
}

fn metadata(input: &str) -> IResult<&str, (u32, Vec<(&str, &str)>)> {
    terminated(tuple((header, many0(field))), eof)(input)
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            ';' => out.push_str("%3B"),
            '=' => out.push_str("%3D"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(value: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let hex: String = chars.by_ref().take(2).collect();
        match hex.as_str() {
            "25" => out.push('%'),
            "3B" | "3b" => out.push(';'),
            "3D" | "3d" => out.push('='),
            _ => return None,
        }
    }
    Some(out)
}
