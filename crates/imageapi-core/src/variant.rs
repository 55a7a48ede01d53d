use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Resized rendition of an uploaded image.
///
/// `Variant::ALL` lists the renditions in the order the smoke test fetches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Original,
    Thumbnail,
    Small,
    Medium,
    Large,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Original,
        Variant::Thumbnail,
        Variant::Small,
        Variant::Medium,
        Variant::Large,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Original => "original",
            Variant::Thumbnail => "thumbnail",
            Variant::Small => "small",
            Variant::Medium => "medium",
            Variant::Large => "large",
        }
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "original" => Ok(Variant::Original),
            "thumbnail" => Ok(Variant::Thumbnail),
            "small" => Ok(Variant::Small),
            "medium" => Ok(Variant::Medium),
            "large" => Ok(Variant::Large),
            _ => Err(anyhow::anyhow!("Invalid image variant: {}", s)),
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_fetch_order() {
        let names: Vec<&str> = Variant::ALL.iter().map(Variant::as_str).collect();
        assert_eq!(
            names,
            vec!["original", "thumbnail", "small", "medium", "large"]
        );
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Thumbnail".parse::<Variant>().unwrap(), Variant::Thumbnail);
        assert_eq!(" LARGE ".parse::<Variant>().unwrap(), Variant::Large);
    }

    #[test]
    fn rejects_unknown_variant() {
        let err = "huge".parse::<Variant>().unwrap_err();
        assert!(err.to_string().contains("huge"));
    }

    #[test]
    fn display_matches_path_segment() {
        for variant in Variant::ALL {
            assert_eq!(variant.to_string(), variant.as_str());
            assert_eq!(variant.to_string().parse::<Variant>().unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Variant::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let parsed: Variant = serde_json::from_str("\"small\"").unwrap();
        assert_eq!(parsed, Variant::Small);
    }
}
