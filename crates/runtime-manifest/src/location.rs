//! Deployment locations and the manifest datacenter each one reads from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ManifestError;

/// Datacenter region keyed in the manifest's `blobcontainer` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Datacenter {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "EU")]
    Eu,
    #[serde(rename = "APAC")]
    Apac,
}

impl Datacenter {
    /// Upper-cased region identifier as published in the manifest.
    pub fn as_str(self) -> &'static str {
        match self {
            Datacenter::Us => "US",
            Datacenter::Eu => "EU",
            Datacenter::Apac => "APAC",
        }
    }
}

impl fmt::Display for Datacenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location a cloud service is deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    AnywhereUs,
    AnywhereEurope,
    AnywhereAsia,
    NorthCentralUs,
    SouthCentralUs,
    EastUs,
    WestUs,
    NorthEurope,
    WestEurope,
    EastAsia,
    SoutheastAsia,
}

impl Location {
    pub const ALL: [Location; 11] = [
        Location::AnywhereUs,
        Location::AnywhereEurope,
        Location::AnywhereAsia,
        Location::NorthCentralUs,
        Location::SouthCentralUs,
        Location::EastUs,
        Location::WestUs,
        Location::NorthEurope,
        Location::WestEurope,
        Location::EastAsia,
        Location::SoutheastAsia,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Location::AnywhereUs => "Anywhere US",
            Location::AnywhereEurope => "Anywhere Europe",
            Location::AnywhereAsia => "Anywhere Asia",
            Location::NorthCentralUs => "North Central US",
            Location::SouthCentralUs => "South Central US",
            Location::EastUs => "East US",
            Location::WestUs => "West US",
            Location::NorthEurope => "North Europe",
            Location::WestEurope => "West Europe",
            Location::EastAsia => "East Asia",
            Location::SoutheastAsia => "Southeast Asia",
        }
    }

    pub fn datacenter(self) -> Datacenter {
        match self {
            Location::AnywhereUs
            | Location::NorthCentralUs
            | Location::SouthCentralUs
            | Location::EastUs
            | Location::WestUs => Datacenter::Us,
            Location::AnywhereEurope | Location::NorthEurope | Location::WestEurope => {
                Datacenter::Eu
            }
            Location::AnywhereAsia | Location::EastAsia | Location::SoutheastAsia => {
                Datacenter::Apac
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Location {
    type Err = ManifestError;

    /// Accepts "North Central US", "northcentralus" or "north-central-us".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        Location::ALL
            .into_iter()
            .find(|loc| squash(loc.display_name()) == wanted)
            .ok_or_else(|| ManifestError::UnknownLocation(s.to_string()))
    }
}
