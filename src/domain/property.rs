// src/domain/property.rs

use crate::domain::units::{acres_from_sqft, per_unit, round_to, sqft_from_acres};
use chrono::NaiveDate;
use std::fmt;

/// Which label vocabulary and price meaning apply to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    /// The property being valued: asking price, appraisal, site conditions.
    Subject,
    /// A sold property: sale price and close date.
    Comparable,
    /// A property currently for sale: list price, list date, DOM.
    ActiveListing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    Subject,
    Comp1,
    Comp2,
    Comp3,
    ActiveListing,
}

impl SlotId {
    pub const ALL: [SlotId; 5] = [
        SlotId::Subject,
        SlotId::Comp1,
        SlotId::Comp2,
        SlotId::Comp3,
        SlotId::ActiveListing,
    ];

    pub fn role(self) -> SlotRole {
        match self {
            SlotId::Subject => SlotRole::Subject,
            SlotId::Comp1 | SlotId::Comp2 | SlotId::Comp3 => SlotRole::Comparable,
            SlotId::ActiveListing => SlotRole::ActiveListing,
        }
    }

    /// Path segment used by the UI routes.
    pub fn key(self) -> &'static str {
        match self {
            SlotId::Subject => "subject",
            SlotId::Comp1 => "comp1",
            SlotId::Comp2 => "comp2",
            SlotId::Comp3 => "comp3",
            SlotId::ActiveListing => "active",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "subject" => Some(SlotId::Subject),
            "comp1" => Some(SlotId::Comp1),
            "comp2" => Some(SlotId::Comp2),
            "comp3" => Some(SlotId::Comp3),
            "active" => Some(SlotId::ActiveListing),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotId::Subject => "Subject Property",
            SlotId::Comp1 => "Comp 1",
            SlotId::Comp2 => "Comp 2",
            SlotId::Comp3 => "Comp 3",
            SlotId::ActiveListing => "Active Listing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebrisLevel {
    None,
    Moderate,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slope {
    None,
    Moderate,
    Steep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trees {
    None,
    Moderate,
    Heavy,
}

// The site condition enums share a form encoding: "none", "moderate" and
// the category's top tier.
macro_rules! condition_codes {
    ($ty:ident, $top:ident, $top_code:literal) => {
        impl $ty {
            pub const ALL: [$ty; 3] = [$ty::None, $ty::Moderate, $ty::$top];

            pub fn code(self) -> &'static str {
                match self {
                    $ty::None => "none",
                    $ty::Moderate => "moderate",
                    $ty::$top => $top_code,
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code.trim() {
                    "none" => Some($ty::None),
                    "moderate" => Some($ty::Moderate),
                    $top_code => Some($ty::$top),
                    _ => None,
                }
            }
        }
    };
}

condition_codes!(DebrisLevel, Heavy, "heavy");
condition_codes!(Slope, Steep, "steep");
condition_codes!(Trees, Heavy, "heavy");

/// Regulatory floodplain classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodZone {
    Clear,
    HundredYear,
    HundredYearWay,
    FiveHundredYear,
    CoastalHundredYear,
    CoastalHundredYearWay,
    Undetermined,
}

impl FloodZone {
    pub const ALL: [FloodZone; 7] = [
        FloodZone::Clear,
        FloodZone::HundredYear,
        FloodZone::HundredYearWay,
        FloodZone::FiveHundredYear,
        FloodZone::CoastalHundredYear,
        FloodZone::CoastalHundredYearWay,
        FloodZone::Undetermined,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FloodZone::Clear => "Clear from Flood zone",
            FloodZone::HundredYear => "100-Year Floodplain",
            FloodZone::HundredYearWay => "100-Year Floodway",
            FloodZone::FiveHundredYear => "500-Year Floodplain",
            FloodZone::CoastalHundredYear => "Coastal 100-Year Floodplain",
            FloodZone::CoastalHundredYearWay => "Coastal 100-Year Floodway",
            FloodZone::Undetermined => "Undetermined",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            FloodZone::Clear => "clear",
            FloodZone::HundredYear => "100-year",
            FloodZone::HundredYearWay => "100-year-way",
            FloodZone::FiveHundredYear => "500-year",
            FloodZone::CoastalHundredYear => "coastal-100",
            FloodZone::CoastalHundredYearWay => "coastal-100-way",
            FloodZone::Undetermined => "undetermined",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        FloodZone::ALL.into_iter().find(|z| z.code() == code.trim())
    }
}

impl fmt::Display for FloodZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the extractor recovered from one paste. Every field is optional;
/// `None` means "not found in the text", never "false" or "zero".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialPropertyRecord {
    pub address: Option<String>,
    pub acres: Option<f64>,
    pub square_feet: Option<f64>,
    pub price: Option<f64>,
    pub appraisal_value: Option<f64>,
    pub debris_level: Option<DebrisLevel>,
    pub slope: Option<Slope>,
    pub trees: Option<Trees>,
    pub needs_well: Option<bool>,
    pub needs_septic: Option<bool>,
    pub flood_zone: Option<FloodZone>,
    pub days_on_market: Option<u32>,
    pub price_per_sqft: Option<f64>,
    pub price_per_acre: Option<f64>,
    pub close_date: Option<NaiveDate>,
    pub list_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl PartialPropertyRecord {
    pub fn is_empty(&self) -> bool {
        *self == PartialPropertyRecord::default()
    }
}

/// One property slot's editable state.
///
/// Area and per-unit figures are written through the setters so the
/// dependent values stay consistent; whichever field was set last wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyRecord {
    pub address: Option<String>,
    acres: Option<f64>,
    square_feet: Option<f64>,
    price: Option<f64>,
    pub appraisal_value: Option<f64>,
    pub debris_level: Option<DebrisLevel>,
    pub slope: Option<Slope>,
    pub trees: Option<Trees>,
    pub needs_well: Option<bool>,
    pub needs_septic: Option<bool>,
    pub flood_zone: Option<FloodZone>,
    pub days_on_market: Option<u32>,
    price_per_sqft: Option<f64>,
    price_per_acre: Option<f64>,
    pub close_date: Option<NaiveDate>,
    pub list_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl PropertyRecord {
    pub fn acres(&self) -> Option<f64> {
        self.acres
    }

    pub fn square_feet(&self) -> Option<f64> {
        self.square_feet
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn price_per_sqft(&self) -> Option<f64> {
        self.price_per_sqft
    }

    pub fn price_per_acre(&self) -> Option<f64> {
        self.price_per_acre
    }

    /// Set acreage; square footage follows, and per-unit figures are
    /// recomputed from the price.
    pub fn set_acres(&mut self, acres: Option<f64>) {
        self.acres = acres;
        self.square_feet = acres.map(sqft_from_acres);
        self.refresh_per_unit_from_price();
    }

    /// Set square footage; acreage follows.
    pub fn set_square_feet(&mut self, square_feet: Option<f64>) {
        self.square_feet = square_feet;
        self.acres = square_feet.map(acres_from_sqft);
        self.refresh_per_unit_from_price();
    }

    pub fn set_price(&mut self, price: Option<f64>) {
        self.price = price;
        self.refresh_per_unit_from_price();
    }

    /// Set price per acre; the total price and price per square foot are
    /// recomputed when the acreage is known.
    pub fn set_price_per_acre(&mut self, value: Option<f64>) {
        self.price_per_acre = value;
        if let (Some(v), Some(acres)) = (value, self.acres) {
            self.price = Some(round_to(v * acres, 2));
            self.price_per_sqft = self
                .price
                .and_then(|p| self.square_feet.and_then(|s| per_unit(p, s)));
        }
    }

    /// Set price per square foot; the total price and price per acre are
    /// recomputed when the square footage is known.
    pub fn set_price_per_sqft(&mut self, value: Option<f64>) {
        self.price_per_sqft = value;
        if let (Some(v), Some(sqft)) = (value, self.square_feet) {
            self.price = Some(round_to(v * sqft, 2));
            self.price_per_acre = self
                .price
                .and_then(|p| self.acres.and_then(|a| per_unit(p, a)));
        }
    }

    fn refresh_per_unit_from_price(&mut self) {
        let Some(price) = self.price else {
            return;
        };
        if let Some(acres) = self.acres {
            self.price_per_acre = per_unit(price, acres);
        }
        if let Some(sqft) = self.square_feet {
            self.price_per_sqft = per_unit(price, sqft);
        }
    }

    /// Apply whatever an extraction found. Fields the text did not mention
    /// keep their current value.
    ///
    /// Area and per-unit figures are copied as parsed rather than run
    /// through the setters, so a parsed per-unit figure is never replaced
    /// by a derived one. Per-unit figures the paste left out are derived
    /// again from the merged price and area.
    pub fn merge(&mut self, parsed: &PartialPropertyRecord) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(v) = &parsed.$field {
                        self.$field = Some(v.clone());
                    }
                )*
            };
        }

        take!(
            address,
            acres,
            square_feet,
            price,
            appraisal_value,
            debris_level,
            slope,
            trees,
            needs_well,
            needs_septic,
            flood_zone,
            days_on_market,
            price_per_sqft,
            price_per_acre,
            close_date,
            list_date,
            status,
        );

        // Area arrived without its counterpart: keep the pair consistent.
        if parsed.acres.is_some() && parsed.square_feet.is_none() {
            self.square_feet = self.acres.map(sqft_from_acres);
        } else if parsed.square_feet.is_some() && parsed.acres.is_none() {
            self.acres = self.square_feet.map(acres_from_sqft);
        }

        // A new price or area makes the slot's old per-unit figures stale.
        // Recompute the ones this paste did not state itself.
        let price_or_area_changed =
            parsed.price.is_some() || parsed.acres.is_some() || parsed.square_feet.is_some();
        if !price_or_area_changed {
            return;
        }
        if let Some(price) = self.price {
            if parsed.price_per_acre.is_none() {
                if let Some(acres) = self.acres {
                    self.price_per_acre = per_unit(price, acres);
                }
            }
            if parsed.price_per_sqft.is_none() {
                if let Some(sqft) = self.square_feet {
                    self.price_per_sqft = per_unit(price, sqft);
                }
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == PropertyRecord::default()
    }
}
