use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Layout identifier for the header + left/right split.
pub const LAYOUT_ONE_THIRD_TWO_THIRD: &str = "one-third-two-third";

/// A die size, or one of the two non-numeric sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DieFace {
    /// No die; rendered as a dash.
    Unrated,
    D4,
    D6,
    D8,
    D10,
    D12,
    PlotPoint,
}

impl DieFace {
    pub const RATED: [DieFace; 5] = [
        DieFace::D4,
        DieFace::D6,
        DieFace::D8,
        DieFace::D10,
        DieFace::D12,
    ];

    /// Maps a face count to a rated die. Anything outside 4/6/8/10/12 is `None`.
    pub fn from_sides(sides: i64) -> Option<Self> {
        match sides {
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            _ => None,
        }
    }

    pub fn sides(self) -> Option<u8> {
        match self {
            Self::D4 => Some(4),
            Self::D6 => Some(6),
            Self::D8 => Some(8),
            Self::D10 => Some(10),
            Self::D12 => Some(12),
            Self::Unrated | Self::PlotPoint => None,
        }
    }

    pub fn is_unrated(self) -> bool {
        matches!(self, Self::Unrated)
    }

    pub fn is_plot_point(self) -> bool {
        matches!(self, Self::PlotPoint)
    }
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sides() {
            Some(sides) => write!(f, "{sides}"),
            None if self.is_plot_point() => f.write_str("PP"),
            None => f.write_str("null"),
        }
    }
}

impl Serialize for DieFace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unrated => serializer.serialize_none(),
            Self::PlotPoint => serializer.serialize_str("PP"),
            rated => serializer.serialize_u8(rated.sides().unwrap_or_default()),
        }
    }
}

/// Canonical rating: always a face, optionally with a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub die_rating: DieFace,
    pub description: Option<String>,
}

impl Rating {
    pub fn new(die_rating: DieFace) -> Self {
        Self {
            die_rating,
            description: None,
        }
    }

    pub fn unrated() -> Self {
        Self::new(DieFace::Unrated)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<DieFace> for Rating {
    fn from(value: DieFace) -> Self {
        Self::new(value)
    }
}

// A rating without description is written back as a bare face so serialized sheets stay terse.
impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.description {
            None => self.die_rating.serialize(serializer),
            Some(description) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("dieRating", &self.die_rating)?;
                map.serialize_entry("description", description)?;
                map.end()
            }
        }
    }
}

/// Region a trait is routed to by the two-region layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutRegion {
    Left,
    #[default]
    Right,
}

impl LayoutRegion {
    /// Unset and unrecognized tags fall back to the right-hand region.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("left") => Self::Left,
            _ => Self::Right,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trait {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sfx: Option<IndexMap<String, String>>,
    pub ratings: IndexMap<String, Rating>,
}

impl Trait {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            layout_region: None,
            sfx: None,
            ratings: IndexMap::new(),
        }
    }

    pub fn in_region(mut self, region: LayoutRegion) -> Self {
        self.layout_region = Some(region.as_str().to_string());
        self
    }

    pub fn with_sfx(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.sfx
            .get_or_insert_with(IndexMap::new)
            .insert(label.into(), text.into());
        self
    }

    pub fn with_rating(mut self, label: impl Into<String>, rating: impl Into<Rating>) -> Self {
        self.ratings.insert(label.into(), rating.into());
        self
    }

    pub fn region(&self) -> LayoutRegion {
        LayoutRegion::from_tag(self.layout_region.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatBlock {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    pub traits: Vec<Trait>,
}

impl StatBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layout: None,
            traits: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn with_trait(mut self, t: Trait) -> Self {
        self.traits.push(t);
        self
    }
}
