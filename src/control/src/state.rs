use core::fmt;

use fixed::types::I16F16;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

// Electricity price in cents per kWh
// Can be negative .. that happens, sometimes
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Price(I16F16);

/// Cutoff substituted when the threshold rank has no forecast entry. It
/// sits far above any market price, so every sub period of the affected
/// period qualifies for operation.
pub const INFEASIBLE_PRICE: Price = Price(I16F16::from_bits(20_000 << 16));

impl Price {
    pub const ZERO: Price = Price(I16F16::ZERO);

    pub fn new(cents_per_kwh: f32) -> Self {
        Self(I16F16::saturating_from_num(cents_per_kwh))
    }

    pub fn to_f32(self) -> f32 {
        self.0.to_num()
    }
}

impl From<i16> for Price {
    fn from(value: i16) -> Price {
        Price(I16F16::from_num(value))
    }
}

impl From<Price> for f32 {
    fn from(value: Price) -> f32 {
        value.0.to_num()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Prices cross the wire as plain JSON numbers, not fixed-point bits.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(self.to_f32())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Price, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(de::Error::custom("price must be a finite number"));
        }
        Ok(Price(I16F16::saturating_from_num(value)))
    }
}
