//! YAML front matter and the document metadata record.
//!
//! ```text
//! ---
//! title: Hello
//! bgType: dot
//! ogImage: false
//! ---
//! Body markdown...
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use glaze_config::BgType;
use glaze_og::OgImageSetting;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::SiteError;

/// Typed document metadata.
///
/// Keys other than the known ones are kept in `extra` and written back out
/// unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `false` in YAML means no background was chosen.
    #[serde(
        default,
        deserialize_with = "deserialize_bg_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub bg_type: Option<BgType>,

    #[serde(default, with = "og_image_field", skip_serializing_if = "is_auto")]
    pub og_image: OgImageSetting,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_read: Option<u32>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub draft: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Metadata {
    /// Parse the YAML between the front matter fences.
    ///
    /// Empty content yields the default record.
    pub fn from_yaml(content: &str) -> Result<Self, SiteError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| SiteError::FrontMatter(e.to_string()))
    }
}

/// A source file split into front matter and markdown body.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceDocument<'a> {
    pub metadata: Metadata,
    pub body: &'a str,
    /// Number of source lines before `body` starts.
    pub body_line_offset: usize,
}

impl<'a> SourceDocument<'a> {
    pub fn parse(source: &'a str) -> Result<Self, SiteError> {
        let (yaml, body, body_line_offset) = split_front_matter(source)?;
        let metadata = match yaml {
            Some(yaml) => Metadata::from_yaml(yaml)?,
            None => Metadata::default(),
        };
        Ok(Self {
            metadata,
            body,
            body_line_offset,
        })
    }
}

/// Split `---` fenced front matter off the top of `source`.
///
/// Returns the YAML (if any), the body, and the body's line offset.
fn split_front_matter(source: &str) -> Result<(Option<&str>, &str, usize), SiteError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(rest) = source
        .strip_prefix("---\r\n")
        .or_else(|| source.strip_prefix("---\n"))
    else {
        return Ok((None, source, 0));
    };

    let mut offset = 0;
    for (index, line) in rest.split_inclusive('\n').enumerate() {
        let fence = line.trim_end_matches(['\r', '\n']);
        if fence == "---" || fence == "..." {
            let body = &rest[offset + line.len()..];
            return Ok((Some(&rest[..offset]), body, index + 2));
        }
        offset += line.len();
    }
    Err(SiteError::FrontMatter(
        "missing closing `---` fence".to_owned(),
    ))
}

fn deserialize_bg_type<'de, D>(deserializer: D) -> Result<Option<BgType>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Flag(bool),
        Name(String),
    }

    match Option::<Field>::deserialize(deserializer)? {
        None | Some(Field::Flag(false)) => Ok(None),
        Some(Field::Flag(true)) => Err(D::Error::custom(
            "bgType must be one of plum, dot, rose, particle, or false",
        )),
        Some(Field::Name(name)) => BgType::from_str(&name).map(Some).map_err(D::Error::custom),
    }
}

fn is_auto(setting: &OgImageSetting) -> bool {
    *setting == OgImageSetting::Auto
}

/// `ogImage`: absent or `true` is automatic, `false` disables, a string
/// names an existing file.
mod og_image_field {
    use glaze_og::OgImageSetting;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        setting: &OgImageSetting,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match setting {
            OgImageSetting::Auto => serializer.serialize_none(),
            OgImageSetting::Disabled => serializer.serialize_bool(false),
            OgImageSetting::File(file) => serializer.serialize_str(file),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<OgImageSetting, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Field {
            Flag(bool),
            File(String),
        }

        Ok(match Option::<Field>::deserialize(deserializer)? {
            None | Some(Field::Flag(true)) => OgImageSetting::Auto,
            Some(Field::Flag(false)) => OgImageSetting::Disabled,
            Some(Field::File(file)) if file.trim().is_empty() => OgImageSetting::Auto,
            Some(Field::File(file)) => OgImageSetting::File(file),
        })
    }
}
