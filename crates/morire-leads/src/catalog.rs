//! Unit types offered on the estate and the listing copy shown to visitors.
//!
//! The labels double as the wire representation of a registration's preferred
//! unit, so they must stay byte-for-byte identical to the selector options the
//! site renders.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    #[serde(rename = "2 Bedroom Apartment")]
    TwoBedroom,
    #[serde(rename = "3 Bedroom Apartment")]
    ThreeBedroom,
    #[serde(rename = "3 Bedroom Apartment with BQ")]
    ThreeBedroomWithBq,
}

impl UnitType {
    pub const ALL: [UnitType; 3] = [
        UnitType::TwoBedroom,
        UnitType::ThreeBedroom,
        UnitType::ThreeBedroomWithBq,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UnitType::TwoBedroom => "2 Bedroom Apartment",
            UnitType::ThreeBedroom => "3 Bedroom Apartment",
            UnitType::ThreeBedroomWithBq => "3 Bedroom Apartment with BQ",
        }
    }

    /// Exact (case-sensitive) match after trimming surrounding whitespace.
    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|unit| unit.label() == raw)
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Marketing card for a unit type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitListing {
    pub unit: UnitType,
    pub description: &'static str,
    pub price: &'static str,
    pub image: &'static str,
}

pub fn unit_listings() -> Vec<UnitListing> {
    vec![
        UnitListing {
            unit: UnitType::TwoBedroom,
            description: "Experience modern comfort in our thoughtfully designed 2-bedroom apartment. \
                Perfect for small families or professionals, featuring contemporary finishes and \
                optimal space utilization.",
            price: "₦15.5M",
            image: "/images/units/2-bedroom.jpg",
        },
        UnitListing {
            unit: UnitType::ThreeBedroom,
            description: "Embrace spacious living in our elegant 3-bedroom apartment. Ideal for \
                growing families, offering generous living spaces and modern amenities for \
                comfortable family living.",
            price: "₦18.5M",
            image: "/images/units/3-bedroom.jpg",
        },
        UnitListing {
            unit: UnitType::ThreeBedroomWithBq,
            description: "Discover premium living in our exclusive 3-bedroom apartment with BQ. \
                Perfect for families desiring extra space and privacy, featuring additional \
                quarters for staff or guests.",
            price: "₦19.5M",
            image: "/images/units/3-bedroom-bq.jpg",
        },
    ]
}
