use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::{
    foundation::error::RespondiffError,
    scene::model::{FontWeight, NodeProps, UnitValue, ValueUnit},
    units::{LengthMode, format_length, format_number, non_zero_length},
};

/// CSS properties the differ knows about, in output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleProperty {
    Width,
    Height,
    BorderRadius,
    Gap,
    Padding,
    FontSize,
    FontWeight,
    LineHeight,
    LetterSpacing,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 9] = [
        Self::Width,
        Self::Height,
        Self::BorderRadius,
        Self::Gap,
        Self::Padding,
        Self::FontSize,
        Self::FontWeight,
        Self::LineHeight,
        Self::LetterSpacing,
    ];

    pub fn css_name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::BorderRadius => "border-radius",
            Self::Gap => "gap",
            Self::Padding => "padding",
            Self::FontSize => "font-size",
            Self::FontWeight => "font-weight",
            Self::LineHeight => "line-height",
            Self::LetterSpacing => "letter-spacing",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

impl FromStr for StyleProperty {
    type Err = RespondiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.css_name() == s)
            .ok_or_else(|| RespondiffError::validation(format!("unknown style property '{s}'")))
    }
}

impl serde::Serialize for StyleProperty {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.css_name())
    }
}

impl<'de> serde::Deserialize<'de> for StyleProperty {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Formatted CSS declarations derived from one node. Absent keys mean "not specified".
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct StyleRecord {
    values: BTreeMap<StyleProperty, String>,
}

impl StyleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, prop: StyleProperty, value: impl Into<String>) {
        self.values.insert(prop, value.into());
    }

    pub fn get(&self, prop: StyleProperty) -> Option<&str> {
        self.values.get(&prop).map(String::as_str)
    }

    pub fn contains(&self, prop: StyleProperty) -> bool {
        self.values.contains_key(&prop)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &str)> {
        self.values.iter().map(|(p, v)| (*p, v.as_str()))
    }

    pub fn properties(&self) -> impl Iterator<Item = StyleProperty> + '_ {
        self.values.keys().copied()
    }

    /// Copy of this record keeping only properties in `allowed`.
    pub fn restricted_to(&self, allowed: &BTreeSet<StyleProperty>) -> Self {
        Self {
            values: self
                .values
                .iter()
                .filter(|(p, _)| allowed.contains(p))
                .map(|(p, v)| (*p, v.clone()))
                .collect(),
        }
    }
}

impl FromIterator<(StyleProperty, String)> for StyleRecord {
    fn from_iter<I: IntoIterator<Item = (StyleProperty, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Rendering of `line-height` values that are not in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineHeightPolicy {
    /// Non-pixel line heights are left out.
    #[default]
    PixelsOnly,
    /// Non-pixel line heights render as `normal`.
    Normal,
    /// Percent line heights render as `<v>%`; `AUTO` renders as `normal`.
    Percent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractOpts {
    pub length_mode: LengthMode,
    pub line_height: LineHeightPolicy,
}

pub fn extract_styles(props: &NodeProps, opts: &ExtractOpts) -> StyleRecord {
    let mode = opts.length_mode;
    let mut record = StyleRecord::new();
    let mut put = |prop: StyleProperty, value: Option<String>| {
        if let Some(v) = value {
            record.insert(prop, v);
        }
    };

    put(StyleProperty::Width, non_zero_length(props.width, mode));
    put(StyleProperty::Height, non_zero_length(props.height, mode));
    put(
        StyleProperty::BorderRadius,
        non_zero_length(props.corner_radius, mode),
    );
    put(StyleProperty::Gap, non_zero_length(props.item_spacing, mode));
    put(StyleProperty::Padding, format_padding(props, mode));
    put(StyleProperty::FontSize, non_zero_length(props.font_size, mode));
    put(
        StyleProperty::FontWeight,
        props.font_weight.as_ref().map(format_font_weight),
    );
    put(
        StyleProperty::LineHeight,
        props
            .line_height
            .and_then(|lh| format_line_height(lh, mode, opts.line_height)),
    );
    put(
        StyleProperty::LetterSpacing,
        props
            .letter_spacing
            .and_then(|ls| non_zero_length(ls.value, mode)),
    );

    record
}

fn format_font_weight(w: &FontWeight) -> String {
    match w {
        FontWeight::Number(n) => format_number(*n),
        FontWeight::Name(s) => s.clone(),
    }
}

fn format_line_height(lh: UnitValue, mode: LengthMode, policy: LineHeightPolicy) -> Option<String> {
    if let (ValueUnit::Pixels, Some(v)) = (lh.unit, lh.value) {
        return Some(format_length(v, mode));
    }
    match policy {
        LineHeightPolicy::PixelsOnly => None,
        LineHeightPolicy::Normal => Some("normal".to_string()),
        LineHeightPolicy::Percent => match (lh.unit, lh.value) {
            (ValueUnit::Percent, Some(v)) => Some(format!("{}%", format_number(v))),
            _ => Some("normal".to_string()),
        },
    }
}

fn format_padding(props: &NodeProps, mode: LengthMode) -> Option<String> {
    collapse_edges(
        non_zero_length(props.padding_top, mode).as_deref(),
        non_zero_length(props.padding_right, mode).as_deref(),
        non_zero_length(props.padding_bottom, mode).as_deref(),
        non_zero_length(props.padding_left, mode).as_deref(),
    )
}

/// CSS box shorthand over four formatted edges.
///
/// Edges compare by formatted text; two absent edges are equal to each other. An absent edge that
/// still has to be spelled out renders as `undefined`.
pub fn collapse_edges(
    top: Option<&str>,
    right: Option<&str>,
    bottom: Option<&str>,
    left: Option<&str>,
) -> Option<String> {
    if top.is_none() && right.is_none() && bottom.is_none() && left.is_none() {
        return None;
    }
    let show = |edge: Option<&str>| edge.unwrap_or("undefined").to_string();

    let collapsed = if top == right && top == bottom && top == left {
        show(top)
    } else if top == bottom && right == left {
        format!("{} {}", show(top), show(right))
    } else if right == left {
        format!("{} {} {}", show(top), show(right), show(bottom))
    } else {
        format!(
            "{} {} {} {}",
            show(top),
            show(right),
            show(bottom),
            show(left)
        )
    };
    Some(collapsed)
}
