//! Burned-in subtitle style definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Caller-supplied style fields. Anything left out keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleStyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// `#RRGGBB`, `RRGGBB` or an ASS `&HAABBGGRR` literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<u32>,
    #[serde(default, rename = "marginV", skip_serializing_if = "Option::is_none")]
    pub margin_v: Option<u32>,
    #[serde(default, rename = "marginL", skip_serializing_if = "Option::is_none")]
    pub margin_l: Option<u32>,
    #[serde(default, rename = "marginR", skip_serializing_if = "Option::is_none")]
    pub margin_r: Option<u32>,
}

/// Resolved subtitle style. Colours are in ASS `&HAABBGGRR` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleStyle {
    pub font_name: String,
    pub font_size: u32,
    pub primary_color: String,
    pub outline_color: String,
    pub back_color: String,
    pub border_style: u32,
    pub outline: u32,
    pub shadow: u32,
    pub alignment: u32,
    #[serde(rename = "marginV")]
    pub margin_v: u32,
    #[serde(rename = "marginL")]
    pub margin_l: u32,
    #[serde(rename = "marginR")]
    pub margin_r: u32,
}

impl SubtitleStyle {
    /// Render as a libass `force_style` value.
    pub fn to_force_style(&self) -> String {
        [
            format!("FontName={}", self.font_name),
            format!("Fontsize={}", self.font_size),
            format!("PrimaryColour={}", self.primary_color),
            format!("OutlineColour={}", self.outline_color),
            format!("BackColour={}", self.back_color),
            format!("BorderStyle={}", self.border_style),
            format!("Outline={}", self.outline),
            format!("Shadow={}", self.shadow),
            format!("Alignment={}", self.alignment),
            format!("MarginV={}", self.margin_v),
            format!("MarginL={}", self.margin_l),
            format!("MarginR={}", self.margin_r),
        ]
        .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_wire_names() {
        let json = r##"{"fontName":"Inter","marginV":140,"primaryColor":"#FFCC00"}"##;
        let overrides: SubtitleStyleOverrides = serde_json::from_str(json).unwrap();
        assert_eq!(overrides.font_name.as_deref(), Some("Inter"));
        assert_eq!(overrides.margin_v, Some(140));
        assert_eq!(overrides.primary_color.as_deref(), Some("#FFCC00"));
        assert!(overrides.shadow.is_none());
    }

    #[test]
    fn test_force_style() {
        let style = SubtitleStyle {
            font_name: "Roboto".into(),
            font_size: 32,
            primary_color: "&H00FFFFFF".into(),
            outline_color: "&H00000000".into(),
            back_color: "&H80000000".into(),
            border_style: 3,
            outline: 2,
            shadow: 1,
            alignment: 2,
            margin_v: 100,
            margin_l: 20,
            margin_r: 20,
        };
        let rendered = style.to_force_style();
        assert!(rendered.starts_with("FontName=Roboto,Fontsize=32,"));
        assert!(rendered.ends_with("MarginV=100,MarginL=20,MarginR=20"));
    }
}
