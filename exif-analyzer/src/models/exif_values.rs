//! Typed exposure values parsed from ExifTool output
//!
//! Each type is a statistics category: it is hashable, totally ordered (the
//! ordering is the ranking tie-break) and displays the way the report prints it.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Round to one decimal place so `4`, `4.0` and `4.00` land in the same bucket
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Equality, hashing and ordering for positive finite float wrappers.
///
/// Constructors reject NaN and infinities, so comparing bit patterns is sound.
macro_rules! float_category {
    ($name:ident) => {
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0.to_bits() == other.0.to_bits()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.to_bits().hash(state);
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }
    };
}

/// Aperture as an f-number (f/5.6 is stored as 5.6)
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Aperture(f64);

impl Aperture {
    pub fn new(f_number: f64) -> Option<Self> {
        (f_number.is_finite() && f_number > 0.0).then(|| Self(round_tenths(f_number)))
    }

    pub fn f_number(&self) -> f64 {
        self.0
    }
}

float_category!(Aperture);

impl fmt::Display for Aperture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("f/{:.1}", self.0))
    }
}

/// Focal length in millimetres
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct FocalLength(f64);

impl FocalLength {
    pub fn new(millimetres: f64) -> Option<Self> {
        (millimetres.is_finite() && millimetres > 0.0).then(|| Self(round_tenths(millimetres)))
    }

    pub fn millimetres(&self) -> f64 {
        self.0
    }
}

float_category!(FocalLength);

impl fmt::Display for FocalLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "37mm" for whole values, "19.5mm" otherwise
        let text = if self.0.fract() == 0.0 {
            format!("{}mm", self.0 as u64)
        } else {
            format!("{:.1}mm", self.0)
        };
        f.pad(&text)
    }
}

/// ISO sensitivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Iso(pub u32);

impl fmt::Display for Iso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("ISO {}", self.0))
    }
}

/// Shutter speed as reported by the camera ("1/250", "0.5", "30")
///
/// The text is kept verbatim; `seconds` only drives ordering. Values that do
/// not parse as a number or fraction sort after every parsed one.
#[derive(Debug, Clone)]
pub struct ShutterSpeed {
    text: String,
    seconds: f64,
}

impl ShutterSpeed {
    /// Returns `None` for empty input
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let seconds = match text.split_once('/') {
            Some((num, den)) => match (num.trim().parse::<f64>(), den.trim().parse::<f64>()) {
                (Ok(num), Ok(den)) if den != 0.0 => num / den,
                _ => f64::INFINITY,
            },
            None => text.parse::<f64>().unwrap_or(f64::INFINITY),
        };
        let seconds = if seconds.is_nan() { f64::INFINITY } else { seconds };

        Some(Self {
            text: text.to_string(),
            seconds,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Exposure duration in seconds (`f64::INFINITY` when unparseable)
    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

impl PartialEq for ShutterSpeed {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ShutterSpeed {}

impl Hash for ShutterSpeed {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for ShutterSpeed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ShutterSpeed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seconds
            .total_cmp(&other.seconds)
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl Serialize for ShutterSpeed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl fmt::Display for ShutterSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.text)
    }
}
