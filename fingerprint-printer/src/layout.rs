//! Label layout constants
//!
//! Everything the command builder emits that does not depend on the label
//! index lives here. Defaults match the production printer (840 dot wide
//! gapped labels, direct thermal, centered double-size number).

use crate::error::{PrintError, PrintResult};
use serde::{Deserialize, Serialize};

/// Media type reported to the printer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    #[default]
    LabelWithGaps,
    TicketWithMark,
    TicketWithGaps,
    FixLengthStrip,
    VarLengthStrip,
}

impl MediaType {
    pub fn as_setup_value(&self) -> &'static str {
        match self {
            MediaType::LabelWithGaps => "Label (w Gaps)",
            MediaType::TicketWithMark => "Ticket (w Mark)",
            MediaType::TicketWithGaps => "Ticket (w Gaps)",
            MediaType::FixLengthStrip => "Fix Length Strip",
            MediaType::VarLengthStrip => "Var Length Strip",
        }
    }
}

/// Print method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintMethod {
    #[default]
    DirectThermal,
    ThermalTransfer,
}

impl PrintMethod {
    pub fn as_setup_value(&self) -> &'static str {
        match self {
            PrintMethod::DirectThermal => "Direct Thermal",
            PrintMethod::ThermalTransfer => "Thermal Transfer",
        }
    }
}

/// Anchor point of a text field (`ALIGN 1..9`)
///
/// Numbered like a phone keypad turned upside down: 1 is bottom-left,
/// 5 the center, 9 top-right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    BottomLeft,
    BottomCenter,
    BottomRight,
    MiddleLeft,
    #[default]
    Center,
    MiddleRight,
    TopLeft,
    TopCenter,
    TopRight,
}

impl Anchor {
    pub fn code(&self) -> u8 {
        match self {
            Anchor::BottomLeft => 1,
            Anchor::BottomCenter => 2,
            Anchor::BottomRight => 3,
            Anchor::MiddleLeft => 4,
            Anchor::Center => 5,
            Anchor::MiddleRight => 6,
            Anchor::TopLeft => 7,
            Anchor::TopCenter => 8,
            Anchor::TopRight => 9,
        }
    }
}

/// Fixed parameters of the numbered label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelLayout {
    pub media_type: MediaType,
    /// Media width in dots
    pub media_width: u32,
    pub print_method: PrintMethod,
    /// Resident font name
    pub font: String,
    pub magnify_height: u8,
    pub magnify_width: u8,
    /// Insertion point, in dots from the label origin
    pub x: u32,
    pub y: u32,
    pub anchor: Anchor,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self {
            media_type: MediaType::LabelWithGaps,
            media_width: 840,
            print_method: PrintMethod::DirectThermal,
            font: "IPLFNT34H".to_string(),
            magnify_height: 2,
            magnify_width: 2,
            x: 420,
            y: 150,
            anchor: Anchor::Center,
        }
    }
}

impl LabelLayout {
    /// Largest enlargement factor `MAGNIFY` accepts
    pub const MAX_MAGNIFY: u8 = 4;

    /// Parse a layout from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> PrintResult<Self> {
        let layout: LabelLayout = serde_json::from_str(json)
            .map_err(|e| PrintError::InvalidConfig(format!("Invalid label layout: {}", e)))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check the values against what the command grammar accepts
    pub fn validate(&self) -> PrintResult<()> {
        if self.media_width == 0 {
            return Err(PrintError::InvalidConfig(
                "media width must be positive".to_string(),
            ));
        }
        if self.font.is_empty() || self.font.contains('"') || !self.font.is_ascii() {
            return Err(PrintError::InvalidConfig(format!(
                "Invalid font name: {:?}",
                self.font
            )));
        }
        for factor in [self.magnify_height, self.magnify_width] {
            if !(1..=Self::MAX_MAGNIFY).contains(&factor) {
                return Err(PrintError::InvalidConfig(format!(
                    "magnification {} out of range 1..={}",
                    factor,
                    Self::MAX_MAGNIFY
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = LabelLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.anchor.code(), 5);
        assert_eq!(layout.media_type.as_setup_value(), "Label (w Gaps)");
        assert_eq!(layout.print_method.as_setup_value(), "Direct Thermal");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let layout = LabelLayout::from_json(r#"{"x": 300, "print_method": "thermal_transfer"}"#)
            .unwrap();
        assert_eq!(layout.x, 300);
        assert_eq!(layout.y, 150);
        assert_eq!(layout.print_method, PrintMethod::ThermalTransfer);
        assert_eq!(layout.font, "IPLFNT34H");
    }

    #[test]
    fn test_invalid_layouts_rejected() {
        assert!(LabelLayout::from_json("not json").is_err());
        assert!(LabelLayout::from_json(r#"{"magnify_width": 9}"#).is_err());
        assert!(LabelLayout::from_json(r#"{"font": "A\"B"}"#).is_err());
        assert!(LabelLayout::from_json(r#"{"media_width": 0}"#).is_err());
    }
}
