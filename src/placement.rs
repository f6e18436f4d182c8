use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Corner of a frame used to anchor watermarks and logos. Deserializes
/// through [`Corner::from_name`], so unknown names never fail a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Corner {
    /// Lenient lookup; anything unrecognised lands in the bottom-right corner.
    pub fn from_name(value: &str) -> Self {
        match value {
            "top-left" => Self::TopLeft,
            "top-right" => Self::TopRight,
            "bottom-left" => Self::BottomLeft,
            _ => Self::BottomRight,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    /// ffmpeg `overlay` filter expression with a 10px margin.
    pub fn overlay_expr(&self) -> &'static str {
        match self {
            Self::TopLeft => "10:10",
            Self::TopRight => "W-w-10:10",
            Self::BottomLeft => "10:H-h-10",
            Self::BottomRight => "W-w-10:H-h-10",
        }
    }

    /// Pixel offset of an `item` sized box inside a `frame` sized canvas.
    pub fn offset(&self, frame: (u32, u32), item: (u32, u32), padding: u32) -> (i64, i64) {
        let (fw, fh) = (i64::from(frame.0), i64::from(frame.1));
        let (iw, ih) = (i64::from(item.0), i64::from(item.1));
        let pad = i64::from(padding);
        match self {
            Self::TopLeft => (pad, pad),
            Self::TopRight => (fw - iw - pad, pad),
            Self::BottomLeft => (pad, fh - ih - pad),
            Self::BottomRight => (fw - iw - pad, fh - ih - pad),
        }
    }
}

impl From<String> for Corner {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}
