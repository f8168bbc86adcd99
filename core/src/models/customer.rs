// talat_core/src/models/customer.rs

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fixed set of shipping carriers the storefront delivers through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingCarrier {
  Anousith,
  Mixay,
  HoungAloun,
  Rungaroun,
}

impl ShippingCarrier {
  pub const ALL: [ShippingCarrier; 4] = [
    ShippingCarrier::Anousith,
    ShippingCarrier::Mixay,
    ShippingCarrier::HoungAloun,
    ShippingCarrier::Rungaroun,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      ShippingCarrier::Anousith => "anousith",
      ShippingCarrier::Mixay => "mixay",
      ShippingCarrier::HoungAloun => "houngaloun",
      ShippingCarrier::Rungaroun => "rungaroun",
    }
  }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown shipping carrier: '{0}'")]
pub struct UnknownCarrier(pub String);

impl FromStr for ShippingCarrier {
  type Err = UnknownCarrier;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let needle = s.trim().to_ascii_lowercase();
    ShippingCarrier::ALL
      .into_iter()
      .find(|c| c.as_str() == needle)
      .ok_or_else(|| UnknownCarrier(s.to_string()))
  }
}

impl std::fmt::Display for ShippingCarrier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Customer contact and delivery details as submitted by the checkout
/// form. Validated by the checkout assembler; an assembled payload always
/// carries a `carrier` of `Some`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
  pub name: String,
  pub surname: String,
  pub contact_number: String,
  pub email: String,
  pub village: String,
  pub district: String,
  pub province: String,
  #[serde(default)]
  pub carrier: Option<ShippingCarrier>,
}
