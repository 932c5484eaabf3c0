//! Spacing values: a length with a unit, resolved to pixels on demand.

use std::fmt;
use std::str::FromStr;

use super::tokenizer::{tokenize, Token};

/// Errors from spacing parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpacingError {
    #[error("empty spacing value")]
    Empty,
    #[error("unexpected character at byte {0}")]
    InvalidCharacter(usize),
    #[error("spacing cannot be negative: {0}")]
    Negative(String),
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    #[error("expected a number, got: {0}")]
    ExpectedNumber(String),
    #[error("unexpected trailing input: {0}")]
    Trailing(String),
}

/// A spacing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpacingUnit {
    /// Host pixels (a bare number means pixels).
    #[default]
    Px,
    /// Multiples of the root font size.
    Rem,
    /// Multiples of the container's font size.
    Em,
    /// Percentage of the container width.
    Percent,
    /// Percentage of the viewport width.
    Vw,
}

impl SpacingUnit {
    fn parse(unit: &str) -> Option<Self> {
        match unit.to_ascii_lowercase().as_str() {
            "px" => Some(SpacingUnit::Px),
            "rem" => Some(SpacingUnit::Rem),
            "em" => Some(SpacingUnit::Em),
            "vw" => Some(SpacingUnit::Vw),
            _ => None,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            SpacingUnit::Px => "px",
            SpacingUnit::Rem => "rem",
            SpacingUnit::Em => "em",
            SpacingUnit::Percent => "%",
            SpacingUnit::Vw => "vw",
        }
    }
}

/// The environment a relative spacing is resolved against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingContext {
    pub root_font_size: f32,
    pub font_size: f32,
    pub container_width: f32,
    pub viewport_width: f32,
}

impl SpacingContext {
    /// Browser-like defaults (16px fonts) for a container filling the viewport.
    pub fn for_viewport(viewport_width: f32) -> Self {
        Self {
            root_font_size: 16.0,
            font_size: 16.0,
            container_width: viewport_width,
            viewport_width,
        }
    }

    /// Override the container width (builder).
    pub fn with_container_width(mut self, width: f32) -> Self {
        self.container_width = width;
        self
    }

    /// Override both font sizes (builder).
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.root_font_size = size;
        self.font_size = size;
        self
    }
}

impl Default for SpacingContext {
    fn default() -> Self {
        Self::for_viewport(0.0)
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// A non-negative length such as `16`, `1.5rem` or `5%`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SpacingRepr", into = "String")
)]
pub struct Spacing {
    pub value: f32,
    pub unit: SpacingUnit,
}

impl Spacing {
    pub const ZERO: Spacing = Spacing {
        value: 0.0,
        unit: SpacingUnit::Px,
    };

    pub fn px(value: f32) -> Self {
        Self::new(value, SpacingUnit::Px)
    }

    pub fn rem(value: f32) -> Self {
        Self::new(value, SpacingUnit::Rem)
    }

    pub fn em(value: f32) -> Self {
        Self::new(value, SpacingUnit::Em)
    }

    pub fn percent(value: f32) -> Self {
        Self::new(value, SpacingUnit::Percent)
    }

    pub fn vw(value: f32) -> Self {
        Self::new(value, SpacingUnit::Vw)
    }

    /// Negative and non-finite values clamp to zero.
    fn new(value: f32, unit: SpacingUnit) -> Self {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        Self { value, unit }
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    /// Resolve to pixels.
    pub fn to_pixels(&self, ctx: &SpacingContext) -> f32 {
        match self.unit {
            SpacingUnit::Px => self.value,
            SpacingUnit::Rem => self.value * ctx.root_font_size,
            SpacingUnit::Em => self.value * ctx.font_size,
            SpacingUnit::Percent => self.value * ctx.container_width / 100.0,
            SpacingUnit::Vw => self.value * ctx.viewport_width / 100.0,
        }
    }
}

impl From<f32> for Spacing {
    fn from(px: f32) -> Self {
        Spacing::px(px)
    }
}

impl From<u32> for Spacing {
    fn from(px: u32) -> Self {
        Spacing::px(px as f32)
    }
}

impl FromStr for Spacing {
    type Err = SpacingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s).map_err(SpacingError::InvalidCharacter)?;
        let mut iter = tokens.into_iter();

        let (token, text) = iter.next().ok_or(SpacingError::Empty)?;
        let value = match token {
            Token::Number => parse_number(text)?,
            Token::Minus => return Err(SpacingError::Negative(s.trim().to_owned())),
            _ => return Err(SpacingError::ExpectedNumber(text.to_owned())),
        };

        let unit = match iter.next() {
            None => SpacingUnit::Px,
            Some((Token::Percent, _)) => SpacingUnit::Percent,
            Some((Token::Unit, unit)) => {
                SpacingUnit::parse(unit).ok_or_else(|| SpacingError::UnknownUnit(unit.to_owned()))?
            }
            Some((_, other)) => return Err(SpacingError::Trailing(other.to_owned())),
        };

        if let Some((_, extra)) = iter.next() {
            return Err(SpacingError::Trailing(extra.to_owned()));
        }

        Ok(Spacing::new(value, unit))
    }
}

fn parse_number(text: &str) -> Result<f32, SpacingError> {
    text.parse::<f32>()
        .map_err(|_| SpacingError::ExpectedNumber(text.to_owned()))
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl From<Spacing> for String {
    fn from(spacing: Spacing) -> Self {
        spacing.to_string()
    }
}

/// Wire shape: a bare pixel number or a CSS-like string.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum SpacingRepr {
    Number(f32),
    Text(String),
}

#[cfg(feature = "serde")]
impl TryFrom<SpacingRepr> for Spacing {
    type Error = SpacingError;

    fn try_from(repr: SpacingRepr) -> Result<Self, Self::Error> {
        match repr {
            SpacingRepr::Number(n) if n < 0.0 => Err(SpacingError::Negative(n.to_string())),
            SpacingRepr::Number(n) => Ok(Spacing::px(n)),
            SpacingRepr::Text(s) => s.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Parsing ──────────────────────────────────────────────────────

    #[test]
    fn parse_bare_number_is_px() {
        assert_eq!("16".parse::<Spacing>().unwrap(), Spacing::px(16.0));
    }

    #[test]
    fn parse_units() {
        assert_eq!("12px".parse::<Spacing>().unwrap(), Spacing::px(12.0));
        assert_eq!("1.5rem".parse::<Spacing>().unwrap(), Spacing::rem(1.5));
        assert_eq!(".5em".parse::<Spacing>().unwrap(), Spacing::em(0.5));
        assert_eq!("5%".parse::<Spacing>().unwrap(), Spacing::percent(5.0));
        assert_eq!("2VW".parse::<Spacing>().unwrap(), Spacing::vw(2.0));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Spacing>(), Err(SpacingError::Empty));
        assert_eq!("   ".parse::<Spacing>(), Err(SpacingError::Empty));
        assert_eq!(
            "3pt".parse::<Spacing>(),
            Err(SpacingError::UnknownUnit("pt".into()))
        );
        assert_eq!(
            "-3px".parse::<Spacing>(),
            Err(SpacingError::Negative("-3px".into()))
        );
        assert_eq!(
            "px".parse::<Spacing>(),
            Err(SpacingError::ExpectedNumber("px".into()))
        );
        assert_eq!(
            "3px 4px".parse::<Spacing>(),
            Err(SpacingError::Trailing("4".into()))
        );
        assert_eq!(
            "3%%".parse::<Spacing>(),
            Err(SpacingError::Trailing("%".into()))
        );
        assert_eq!(
            "3 4".parse::<Spacing>(),
            Err(SpacingError::Trailing("4".into()))
        );
        assert_eq!("3#".parse::<Spacing>(), Err(SpacingError::InvalidCharacter(1)));
    }

    #[test]
    fn error_messages() {
        let err = "3pt".parse::<Spacing>().unwrap_err();
        assert_eq!(err.to_string(), "unknown unit: pt");
    }

    // ── Resolution ───────────────────────────────────────────────────

    #[test]
    fn resolve_to_pixels() {
        let ctx = SpacingContext::for_viewport(1000.0).with_container_width(800.0);
        assert_eq!(Spacing::px(10.0).to_pixels(&ctx), 10.0);
        assert_eq!(Spacing::rem(2.0).to_pixels(&ctx), 32.0);
        assert_eq!(Spacing::em(0.5).to_pixels(&ctx), 8.0);
        assert_eq!(Spacing::percent(5.0).to_pixels(&ctx), 40.0);
        assert_eq!(Spacing::vw(2.0).to_pixels(&ctx), 20.0);
    }

    #[test]
    fn font_size_override() {
        let ctx = SpacingContext::for_viewport(0.0).with_font_size(10.0);
        assert_eq!(Spacing::rem(1.5).to_pixels(&ctx), 15.0);
    }

    #[test]
    fn negative_and_nan_clamp() {
        assert_eq!(Spacing::px(-4.0), Spacing::ZERO);
        assert!(Spacing::px(f32::NAN).is_zero());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for s in ["0px", "12px", "1.5rem", "2em", "5%", "3vw"] {
            let spacing: Spacing = s.parse().unwrap();
            assert_eq!(spacing.to_string(), s);
        }
    }

    #[test]
    fn display_keeps_large_whole_values() {
        let spacing: Spacing = "100000000000000000000px".parse().unwrap();
        assert_eq!(spacing.to_string(), "100000000000000000000px");
        let back: Spacing = spacing.to_string().parse().unwrap();
        assert_eq!(back, spacing);
        assert_eq!(Spacing::px(1e20).value, 1e20);
    }

    #[test]
    fn from_numbers() {
        assert_eq!(Spacing::from(8u32), Spacing::px(8.0));
        assert_eq!(Spacing::from(2.5f32), Spacing::px(2.5));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_number_or_string() {
        let n: Spacing = serde_json::from_str("12").unwrap();
        assert_eq!(n, Spacing::px(12.0));
        let s: Spacing = serde_json::from_str(r#""1rem""#).unwrap();
        assert_eq!(s, Spacing::rem(1.0));
        assert!(serde_json::from_str::<Spacing>(r#""1pt""#).is_err());
        assert_eq!(serde_json::to_string(&Spacing::percent(5.0)).unwrap(), r#""5%""#);
    }
}
