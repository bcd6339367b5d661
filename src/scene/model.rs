use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Page,
    Section,
    Frame,
    Group,
    Component,
    Instance,
    Text,
    Rectangle,
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Pages and sections bound the ancestor walk; they are never part of it.
    pub fn is_boundary(self) -> bool {
        matches!(self, Self::Page | Self::Section)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueUnit {
    Pixels,
    Percent,
    Auto,
}

/// Typographic measure carrying its unit, e.g. `{ "value": 24, "unit": "PIXELS" }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub unit: ValueUnit,
}

impl UnitValue {
    pub fn pixels(value: f64) -> Self {
        Self {
            value: Some(value),
            unit: ValueUnit::Pixels,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            value: Some(value),
            unit: ValueUnit::Percent,
        }
    }

    pub fn auto() -> Self {
        Self {
            value: None,
            unit: ValueUnit::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    Number(f64),
    Name(String),
}

/// Style-relevant attributes a host node may expose. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<UnitValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<UnitValue>,
}

impl NodeProps {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Set all four paddings in CSS order (top, right, bottom, left).
    pub fn with_padding(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.padding_top = Some(top);
        self.padding_right = Some(right);
        self.padding_bottom = Some(bottom);
        self.padding_left = Some(left);
        self
    }
}

/// JSON-facing node tree. Flattened into a [`crate::Scene`] arena on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDef {
    pub id: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub props: NodeProps,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDef>,
}

impl NodeDef {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: None,
            props: NodeProps::default(),
            children: Vec::new(),
        }
    }

    pub fn page(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Page)
    }

    pub fn frame(id: impl Into<String>, width: f64) -> Self {
        Self::new(id, NodeKind::Frame).props(NodeProps {
            width: Some(width),
            ..NodeProps::default()
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn props(mut self, props: NodeProps) -> Self {
        self.props = props;
        self
    }

    pub fn child(mut self, child: NodeDef) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDef {
    #[serde(default)]
    pub roots: Vec<NodeDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_def_reads_host_style_props() {
        let s = r#"{
            "id": "n1",
            "kind": "text",
            "name": "Title",
            "width": 200,
            "cornerRadius": 4,
            "paddingTop": 8,
            "fontWeight": 700,
            "lineHeight": { "value": 24, "unit": "PIXELS" },
            "letterSpacing": { "unit": "AUTO" }
        }"#;
        let def: NodeDef = serde_json::from_str(s).unwrap();
        assert_eq!(def.kind, NodeKind::Text);
        assert_eq!(def.props.width, Some(200.0));
        assert_eq!(def.props.corner_radius, Some(4.0));
        assert_eq!(def.props.padding_top, Some(8.0));
        assert_eq!(def.props.font_weight, Some(FontWeight::Number(700.0)));
        assert_eq!(def.props.line_height, Some(UnitValue::pixels(24.0)));
        assert_eq!(def.props.letter_spacing, Some(UnitValue::auto()));
        assert!(def.children.is_empty());
    }

    #[test]
    fn unknown_kind_maps_to_other() {
        let def: NodeDef = serde_json::from_str(r#"{"id": "v", "kind": "vector"}"#).unwrap();
        assert_eq!(def.kind, NodeKind::Other);
    }

    #[test]
    fn font_weight_accepts_names() {
        let def: NodeDef =
            serde_json::from_str(r#"{"id": "t", "kind": "text", "fontWeight": "bold"}"#).unwrap();
        assert_eq!(def.props.font_weight, Some(FontWeight::Name("bold".to_string())));
    }

    #[test]
    fn boundaries_are_pages_and_sections() {
        assert!(NodeKind::Page.is_boundary());
        assert!(NodeKind::Section.is_boundary());
        assert!(!NodeKind::Frame.is_boundary());
        assert!(!NodeKind::Group.is_boundary());
    }
}
