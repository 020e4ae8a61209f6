//! Sip size catalog
//!
//! Fixed table of reference drinking volumes used to turn a daily goal into
//! a number of drinking actions.

use serde::{Deserialize, Serialize};

/// Volume assumed for an identifier that matches no catalog entry
pub const FALLBACK_SIP_ML: u32 = 100;

/// Reference drinking volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SipSize {
    #[default]
    FullCup,
    HalfCup,
    BigSip,
}

impl SipSize {
    pub const ALL: [SipSize; 3] = [SipSize::FullCup, SipSize::HalfCup, SipSize::BigSip];

    /// Identifier shared with settings and tool parameters
    pub fn identifier(&self) -> &'static str {
        match self {
            SipSize::FullCup => "FullCup",
            SipSize::HalfCup => "HalfCup",
            SipSize::BigSip => "BigSip",
        }
    }

    /// Parse an exact identifier
    pub fn from_str(s: &str) -> Option<Self> {
        SIP_SIZES.iter().find(|e| e.size.identifier() == s).map(|e| e.size)
    }

    /// Catalog entry for this size
    pub fn entry(&self) -> &'static SipSizeEntry {
        match self {
            SipSize::FullCup => &SIP_SIZES[0],
            SipSize::HalfCup => &SIP_SIZES[1],
            SipSize::BigSip => &SIP_SIZES[2],
        }
    }

    pub fn ml(&self) -> u32 {
        self.entry().ml
    }
}

/// A row of the sip catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SipSizeEntry {
    pub size: SipSize,
    pub ml: u32,
    pub text: &'static str,
    pub description: &'static str,
}

pub static SIP_SIZES: [SipSizeEntry; 3] = [
    SipSizeEntry {
        size: SipSize::FullCup,
        ml: 330,
        text: "1 Glass",
        description: "a glass",
    },
    SipSizeEntry {
        size: SipSize::HalfCup,
        ml: 165,
        text: "1/2 Glass",
        description: "half a glass",
    },
    SipSizeEntry {
        size: SipSize::BigSip,
        ml: 15 * 3,
        text: "a big sip",
        description: "a big sip",
    },
];

fn find(identifier: &str) -> Option<&'static SipSizeEntry> {
    SIP_SIZES.iter().find(|e| e.size.identifier() == identifier)
}

/// Milliliters for a sip identifier, or [`FALLBACK_SIP_ML`] when unknown
pub fn ml_for_size(identifier: &str) -> u32 {
    find(identifier).map(|e| e.ml).unwrap_or(FALLBACK_SIP_ML)
}

/// Description for a sip identifier; unknown identifiers have none
pub fn description_for_size(identifier: &str) -> Option<&'static str> {
    find(identifier).map(|e| e.description)
}
