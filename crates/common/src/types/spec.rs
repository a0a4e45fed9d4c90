use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! grade_enum {
    ($name:ident, $doc:expr, { $($variant:ident => $label:expr),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Unrecognized grade, preserved verbatim. Scoring and
            /// pricing substitute neutral defaults for it.
            Other(String),
        }

        impl $name {
            pub fn as_label(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Other(raw) => raw.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($label => Self::$variant,)+
                    _ => Self::Other(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_label().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_label())
            }
        }
    };
}

grade_enum!(Cut, "Cut grade or shape, as grading labs report it.", {
    Excellent => "Excellent",
    VeryGood => "Very Good",
    Good => "Good",
    Fair => "Fair",
    Poor => "Poor",
    Round => "Round",
    Princess => "Princess",
    Cushion => "Cushion",
    Emerald => "Emerald",
    Oval => "Oval",
    Radiant => "Radiant",
    Asscher => "Asscher",
    Marquise => "Marquise",
    Heart => "Heart",
    Pear => "Pear",
});

grade_enum!(Color, "Color grade on the D (colorless) to M (tinted) scale.", {
    D => "D",
    E => "E",
    F => "F",
    G => "G",
    H => "H",
    I => "I",
    J => "J",
    K => "K",
    L => "L",
    M => "M",
});

grade_enum!(Clarity, "Clarity grade from FL (flawless) to I2 (included).", {
    FL => "FL",
    IF => "IF",
    VVS1 => "VVS1",
    VVS2 => "VVS2",
    VS1 => "VS1",
    VS2 => "VS2",
    SI1 => "SI1",
    SI2 => "SI2",
    I1 => "I1",
    I2 => "I2",
});

impl Cut {
    /// Price multiplier applied by the pricing model. Unrecognized
    /// cuts are neutral.
    pub fn price_multiplier(&self) -> f64 {
        match self {
            Self::Excellent => 1.15,
            Self::VeryGood => 1.10,
            Self::Good => 1.05,
            Self::Fair => 0.95,
            Self::Poor => 0.85,
            Self::Round => 1.10,
            Self::Princess => 1.05,
            Self::Cushion => 1.02,
            Self::Emerald => 0.98,
            Self::Oval => 1.00,
            Self::Radiant => 0.98,
            Self::Asscher => 0.95,
            Self::Marquise => 0.92,
            Self::Heart => 0.90,
            Self::Pear => 0.88,
            Self::Other(_) => 1.0,
        }
    }

    /// Quality score contribution in [0, 100].
    pub fn quality_score(&self) -> u8 {
        match self {
            Self::Excellent => 95,
            Self::VeryGood => 85,
            Self::Good => 75,
            Self::Fair => 65,
            Self::Poor => 45,
            Self::Round => 90,
            Self::Princess => 85,
            Self::Cushion => 82,
            Self::Emerald => 78,
            Self::Oval => 80,
            Self::Radiant => 78,
            Self::Asscher => 75,
            Self::Marquise => 72,
            Self::Heart => 70,
            Self::Pear => 68,
            Self::Other(_) => 70,
        }
    }

    /// Cuts that leave no light-performance angle to negotiate on.
    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Excellent | Self::VeryGood | Self::Round)
    }
}

impl Color {
    pub fn price_multiplier(&self) -> f64 {
        match self {
            Self::D => 1.20,
            Self::E => 1.15,
            Self::F => 1.10,
            Self::G => 1.05,
            Self::H => 1.00,
            Self::I => 0.95,
            Self::J => 0.90,
            Self::K => 0.85,
            Self::L => 0.80,
            Self::M => 0.75,
            Self::Other(_) => 1.0,
        }
    }

    pub fn quality_score(&self) -> u8 {
        match self {
            Self::D => 100,
            Self::E => 95,
            Self::F => 90,
            Self::G => 85,
            Self::H => 80,
            Self::I => 75,
            Self::J => 70,
            Self::K => 65,
            Self::L => 60,
            Self::M => 55,
            Self::Other(_) => 70,
        }
    }

    /// Grades I through M can show warm tinting visible to the eye.
    pub fn shows_tinting(&self) -> bool {
        matches!(self, Self::I | Self::J | Self::K | Self::L | Self::M)
    }
}

impl Clarity {
    pub fn price_multiplier(&self) -> f64 {
        match self {
            Self::FL => 1.25,
            Self::IF => 1.20,
            Self::VVS1 => 1.15,
            Self::VVS2 => 1.10,
            Self::VS1 => 1.05,
            Self::VS2 => 1.00,
            Self::SI1 => 0.95,
            Self::SI2 => 0.85,
            Self::I1 => 0.70,
            Self::I2 => 0.55,
            Self::Other(_) => 1.0,
        }
    }

    pub fn quality_score(&self) -> u8 {
        match self {
            Self::FL => 100,
            Self::IF => 95,
            Self::VVS1 => 90,
            Self::VVS2 => 85,
            Self::VS1 => 80,
            Self::VS2 => 75,
            Self::SI1 => 70,
            Self::SI2 => 60,
            Self::I1 => 45,
            Self::I2 => 30,
            Self::Other(_) => 60,
        }
    }

    /// Grades where inclusions may be visible without magnification.
    pub fn has_visible_inclusions(&self) -> bool {
        matches!(self, Self::SI1 | Self::SI2 | Self::I1 | Self::I2)
    }
}

/// Buyer-supplied description of a lab-grown stone. Immutable input to
/// every valuation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiamondSpecification {
    pub carat: f64,
    pub cut: Cut,
    pub color: Color,
    pub clarity: Clarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourcing_info: Option<String>,
}

impl DiamondSpecification {
    pub fn new(carat: f64, cut: Cut, color: Color, clarity: Clarity) -> Self {
        Self {
            carat,
            cut,
            color,
            clarity,
            measurements: None,
            listing_price: None,
            certificate: None,
            sourcing_info: None,
        }
    }

    /// Carat weight used for scoring and pricing. Non-finite or
    /// non-positive input falls back to 1.0 rather than failing.
    pub fn carat_weight(&self) -> f64 {
        if self.carat.is_finite() && self.carat > 0.0 {
            self.carat
        } else {
            1.0
        }
    }

    /// Composite key identifying a market-data cache bucket.
    pub fn bucket_key(&self) -> String {
        format!("{}-{}-{}-{}", self.carat, self.cut, self.color, self.clarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_labels_round_trip() {
        assert_eq!(Cut::from("Very Good"), Cut::VeryGood);
        assert_eq!(Cut::VeryGood.to_string(), "Very Good");
        assert_eq!(Color::from("G"), Color::G);
        assert_eq!(Clarity::from("VS1"), Clarity::VS1);
    }

    #[test]
    fn test_unrecognized_grade_preserved() {
        let cut = Cut::from("Trillion");
        assert_eq!(cut, Cut::Other("Trillion".into()));
        assert_eq!(cut.to_string(), "Trillion");
        assert_eq!(cut.price_multiplier(), 1.0);
        assert_eq!(cut.quality_score(), 70);
        assert_eq!(Color::from("Z").quality_score(), 70);
        assert_eq!(Clarity::from("SI3").quality_score(), 60);
        assert_eq!(Clarity::from("SI3").price_multiplier(), 1.0);
    }

    #[test]
    fn test_grade_serde_as_strings() {
        let json = serde_json::to_string(&Cut::VeryGood).unwrap();
        assert_eq!(json, "\"Very Good\"");
        let back: Cut = serde_json::from_str("\"Trillion\"").unwrap();
        assert_eq!(back, Cut::Other("Trillion".into()));
    }

    #[test]
    fn test_carat_weight_guard() {
        let mut spec =
            DiamondSpecification::new(1.5, Cut::Round, Color::G, Clarity::VS1);
        assert_eq!(spec.carat_weight(), 1.5);
        spec.carat = -2.0;
        assert_eq!(spec.carat_weight(), 1.0);
        spec.carat = f64::NAN;
        assert_eq!(spec.carat_weight(), 1.0);
    }

    #[test]
    fn test_bucket_key_shape() {
        let spec = DiamondSpecification::new(1.0, Cut::Round, Color::G, Clarity::VS1);
        assert_eq!(spec.bucket_key(), "1-Round-G-VS1");
    }
}
