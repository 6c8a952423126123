use serde::Serialize;

use super::version::PackFormat;
use crate::core::error::SkinPackResult;

/// Contents of `pack.mcmeta`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackManifest {
    pub description: String,
    pub format: PackFormat,
}

#[derive(Serialize)]
struct McmetaFile<'a> {
    pack: McmetaPack<'a>,
}

#[derive(Serialize)]
struct McmetaPack<'a> {
    description: [TextComponent<'a>; 1],
    #[serde(flatten)]
    format: FormatFields,
}

#[derive(Serialize)]
struct TextComponent<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(untagged)]
enum FormatFields {
    Single { pack_format: u32 },
    Range { min_format: u32, max_format: u32 },
}

impl From<PackFormat> for FormatFields {
    fn from(format: PackFormat) -> Self {
        match format {
            PackFormat::Single(pack_format) => FormatFields::Single { pack_format },
            PackFormat::Range { min, max } => FormatFields::Range {
                min_format: min,
                max_format: max,
            },
        }
    }
}

impl PackManifest {
    pub fn new(description: impl Into<String>, format: PackFormat) -> Self {
        Self {
            description: description.into(),
            format,
        }
    }

    /// Pretty-printed `pack.mcmeta` JSON.
    pub fn to_json(&self) -> SkinPackResult<String> {
        let file = McmetaFile {
            pack: McmetaPack {
                description: [TextComponent {
                    text: &self.description,
                }],
                format: self.format.into(),
            },
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn rendered(format: PackFormat) -> Value {
        let json = PackManifest::new("desc", format).to_json().unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn single_format_has_only_pack_format() {
        assert_eq!(
            rendered(PackFormat::Single(64)),
            json!({ "pack": { "description": [{ "text": "desc" }], "pack_format": 64 } })
        );
    }

    #[test]
    fn range_format_has_only_min_and_max() {
        let value = rendered(PackFormat::Range { min: 69, max: 69 });
        assert_eq!(
            value,
            json!({ "pack": { "description": [{ "text": "desc" }], "min_format": 69, "max_format": 69 } })
        );
        assert!(value["pack"].get("pack_format").is_none());
    }

    #[test]
    fn output_is_two_space_indented_with_description_first() {
        let json = PackManifest::new("desc", PackFormat::Single(1)).to_json().unwrap();
        let expected = "{\n  \"pack\": {\n    \"description\": [\n      {\n        \"text\": \"desc\"\n      }\n    ],\n    \"pack_format\": 1\n  }\n}";
        assert_eq!(json, expected);
    }
}
