//! Transformation URL construction
//!
//! The remote service describes image/video manipulations as a flat
//! comma-joined parameter string embedded in the delivery URL, e.g.
//! `w_300,h_200,c_fill`. The short-code table below is wire-compatible
//! with the existing service and must be kept as data so new options
//! stay additive.

use crate::cloud::models::ResourceType;

/// Base URL assets are delivered from.
const DELIVERY_BASE_URL: &str = "https://res.cloudinary.com";

/// Crop modes accepted by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    Fill,
    Fit,
    Scale,
    Crop,
    Thumb,
    Limit,
    Pad,
}

impl CropMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropMode::Fill => "fill",
            CropMode::Fit => "fit",
            CropMode::Scale => "scale",
            CropMode::Crop => "crop",
            CropMode::Thumb => "thumb",
            CropMode::Limit => "limit",
            CropMode::Pad => "pad",
        }
    }
}

impl std::str::FromStr for CropMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fill" => Ok(CropMode::Fill),
            "fit" => Ok(CropMode::Fit),
            "scale" => Ok(CropMode::Scale),
            "crop" => Ok(CropMode::Crop),
            "thumb" => Ok(CropMode::Thumb),
            "limit" => Ok(CropMode::Limit),
            "pad" => Ok(CropMode::Pad),
            other => Err(format!("Unknown crop mode: {}", other)),
        }
    }
}

/// Quality selector: automatic or a fixed 1-100 level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Auto,
    Fixed(u8),
}

impl Quality {
    fn to_param(self) -> String {
        match self {
            Quality::Auto => "auto".to_string(),
            Quality::Fixed(level) => level.to_string(),
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "auto" {
            return Ok(Quality::Auto);
        }
        s.parse::<u8>()
            .map(Quality::Fixed)
            .map_err(|_| format!("Quality must be 'auto' or a number 1-100, got '{}'", s))
    }
}

/// A single requested transformation, validated once via [`Transformation::validate`]
/// before serialization. Unset fields are omitted from the parameter string.
#[derive(Debug, Clone, Default)]
pub struct Transformation {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: Option<CropMode>,
    pub quality: Option<Quality>,
    pub format: Option<String>,
    /// Effects are repeatable; each serializes to its own `e_` segment
    pub effects: Vec<String>,
    pub overlay: Option<String>,
    pub underlay: Option<String>,
    /// Corner radius in pixels or the literal `max`
    pub radius: Option<String>,
    pub angle: Option<i32>,
    /// Opacity percentage, 0-100
    pub opacity: Option<u8>,
    pub border: Option<String>,
    pub background: Option<String>,
    pub gravity: Option<String>,
    pub color: Option<String>,
    pub dpr: Option<f32>,
    pub fps: Option<u32>,
}

impl Transformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check field ranges the short-code table cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(opacity) = self.opacity {
            if opacity > 100 {
                return Err(format!("Opacity must be 0-100, got {}", opacity));
            }
        }
        if let Some(Quality::Fixed(level)) = self.quality {
            if level == 0 || level > 100 {
                return Err(format!("Quality level must be 1-100, got {}", level));
            }
        }
        if let Some(dpr) = self.dpr {
            if dpr <= 0.0 {
                return Err(format!("DPR must be positive, got {}", dpr));
            }
        }
        Ok(())
    }

    /// Serialize to the comma-joined parameter string.
    /// Returns an empty string when no option is set.
    pub fn serialize(&self) -> String {
        self.segments().join(",")
    }

    pub fn is_empty(&self) -> bool {
        self.segments().is_empty()
    }

    /// The encoding table: prefix plus rendered value, in wire order.
    fn segments(&self) -> Vec<String> {
        let scalars: [(&str, Option<String>); 16] = [
            ("w_", self.width.map(|v| v.to_string())),
            ("h_", self.height.map(|v| v.to_string())),
            ("c_", self.crop.map(|c| c.as_str().to_string())),
            ("q_", self.quality.map(Quality::to_param)),
            ("f_", self.format.clone()),
            ("l_", self.overlay.clone()),
            ("u_", self.underlay.clone()),
            ("r_", self.radius.clone()),
            ("a_", self.angle.map(|v| v.to_string())),
            ("o_", self.opacity.map(|v| v.to_string())),
            ("bo_", self.border.clone()),
            ("b_", self.background.clone()),
            ("g_", self.gravity.clone()),
            ("co_", self.color.clone()),
            ("dpr_", self.dpr.map(|v| v.to_string())),
            ("fps_", self.fps.map(|v| v.to_string())),
        ];

        let mut segments = Vec::new();
        for (prefix, value) in scalars.iter().take(5) {
            if let Some(value) = value {
                segments.push(format!("{}{}", prefix, value));
            }
        }
        // Effects sit between format and overlay in the wire order
        for effect in &self.effects {
            segments.push(format!("e_{}", effect));
        }
        for (prefix, value) in scalars.iter().skip(5) {
            if let Some(value) = value {
                segments.push(format!("{}{}", prefix, value));
            }
        }
        segments
    }
}

/// Build the full delivery URL for a stored asset, with the transformation
/// string (if any) inserted before the percent-encoded public id.
pub fn delivery_url(
    cloud_name: &str,
    resource_type: ResourceType,
    transformation: &Transformation,
    public_id: &str,
) -> Result<String, String> {
    transformation.validate()?;

    let encoded_id = urlencoding::encode(public_id);
    let params = transformation.serialize();
    let url = if params.is_empty() {
        format!(
            "{}/{}/{}/upload/{}",
            DELIVERY_BASE_URL,
            cloud_name,
            resource_type.as_str(),
            encoded_id
        )
    } else {
        format!(
            "{}/{}/{}/upload/{}/{}",
            DELIVERY_BASE_URL,
            cloud_name,
            resource_type.as_str(),
            params,
            encoded_id
        )
    };
    Ok(url)
}
