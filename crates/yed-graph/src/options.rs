//! String-keyed styling for nodes and edges.
//!
//! Keys and values are validated when set, so a bad option fails before any
//! entity is created. Typed fields are public for callers that prefer them.

use yed_core::number::{format_bool, format_number, parse_bool, parse_integer, parse_number};
use yed_core::{string_enum, Color};

use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};
use crate::label::{EdgeLabel, LabelStyle};
use crate::node::{Node, NodeKind};
use crate::property::PropertyValues;
use crate::style::{EdgeRealizer, EdgeStyle, NodeRealizer, NodeStyle, UmlData};

string_enum! {
    /// Recognized node option keys.
    pub enum NodeOptionKey: "node option" {
        Shape => "shape",
        Fill => "fill",
        Transparent => "transparent",
        BorderColor => "border_color",
        BorderType => "border_type",
        BorderWidth => "border_width",
        Height => "height",
        Width => "width",
        X => "x",
        Y => "y",
        LabelAlignment => "label_alignment",
        FontFamily => "font_family",
        FontSize => "font_size",
        FontStyle => "font_style",
        UnderlinedText => "underlined_text",
        TextColor => "text_color",
        NodeType => "node_type",
        UmlStereotype => "uml_stereotype",
        UmlAttributes => "uml_attributes",
        UmlMethods => "uml_methods",
        Url => "url",
        Description => "description",
        Closed => "closed",
    }
}

string_enum! {
    /// Recognized edge option keys.
    pub enum EdgeOptionKey: "edge option" {
        Arrowhead => "arrowhead",
        Arrowfoot => "arrowfoot",
        Color => "color",
        LineType => "line_type",
        Width => "width",
        EdgeType => "edge_type",
        Label => "label",
        SourceLabel => "source_label",
        TargetLabel => "target_label",
        LabelBackgroundColor => "label_background_color",
        LabelBorderColor => "label_border_color",
        Directed => "directed",
        Url => "url",
        Description => "description",
    }
}

/// Style and metadata for a node or group about to be created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeOptions {
    pub style: NodeStyle,
    /// Style of the label created from the node's name.
    pub label: LabelStyle,
    pub realizer: NodeRealizer,
    pub uml: Option<UmlData>,
    pub url: Option<String>,
    pub description: Option<String>,
    /// Groups only: start collapsed.
    pub closed: bool,
    pub properties: PropertyValues,
}

impl NodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one option from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> GraphResult<()> {
        let key: NodeOptionKey = key.parse().map_err(|_| GraphError::UnknownOption {
            scope: "node",
            key: key.to_string(),
        })?;
        self.set_key(key, value)
    }

    pub fn set_key(&mut self, key: NodeOptionKey, value: &str) -> GraphResult<()> {
        let option = key.as_str();
        match key {
            NodeOptionKey::Shape => self.style.shape = value.parse()?,
            NodeOptionKey::Fill => self.style.fill.color = Color::parse(value)?,
            NodeOptionKey::Transparent => {
                self.style.fill.transparent = parse_bool(option, value)?
            }
            NodeOptionKey::BorderColor => self.style.border.color = Color::parse(value)?,
            NodeOptionKey::BorderType => self.style.border.line_type = value.parse()?,
            NodeOptionKey::BorderWidth => self.style.border.width = parse_number(option, value)?,
            NodeOptionKey::Height => self.style.geometry.height = Some(parse_number(option, value)?),
            NodeOptionKey::Width => self.style.geometry.width = Some(parse_number(option, value)?),
            NodeOptionKey::X => self.style.geometry.x = Some(parse_number(option, value)?),
            NodeOptionKey::Y => self.style.geometry.y = Some(parse_number(option, value)?),
            NodeOptionKey::LabelAlignment => self.label.alignment = value.parse()?,
            NodeOptionKey::FontFamily => self.label.font_family = value.to_string(),
            NodeOptionKey::FontSize => self.label.font_size = parse_integer(option, value)?,
            NodeOptionKey::FontStyle => self.label.font_style = value.parse()?,
            NodeOptionKey::UnderlinedText => self.label.underlined = parse_bool(option, value)?,
            NodeOptionKey::TextColor => self.label.text_color = Color::parse(value)?,
            NodeOptionKey::NodeType => self.realizer = value.parse()?,
            NodeOptionKey::UmlStereotype => self.uml_mut().stereotype = value.to_string(),
            NodeOptionKey::UmlAttributes => self.uml_mut().attributes = value.to_string(),
            NodeOptionKey::UmlMethods => self.uml_mut().methods = value.to_string(),
            NodeOptionKey::Url => self.url = Some(value.to_string()),
            NodeOptionKey::Description => self.description = Some(value.to_string()),
            NodeOptionKey::Closed => self.closed = parse_bool(option, value)?,
        }
        Ok(())
    }

    /// Builder form of [`NodeOptions::set`].
    pub fn with(mut self, key: &str, value: &str) -> GraphResult<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Apply every pair, stopping at the first failure.
    pub fn from_pairs<'a, I>(pairs: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::new();
        for (key, value) in pairs {
            options.set(key, value)?;
        }
        Ok(options)
    }

    /// Options that would recreate `node`'s style. Extra labels and
    /// preserved extensions have no option form and are not captured.
    pub fn from_node(node: &Node) -> Self {
        let mut options = Self {
            style: node.style.clone(),
            url: node.url.clone(),
            description: node.description.clone(),
            properties: node.properties.clone(),
            ..Self::default()
        };
        if let Some(label) = node.labels.first() {
            options.label = label.style.clone();
        }
        match &node.kind {
            NodeKind::Shape { realizer, uml } => {
                options.realizer = realizer.clone();
                options.uml = uml.clone();
            }
            NodeKind::Group(state) => options.closed = state.closed,
        }
        options
    }

    /// Options that differ from the defaults, in key order.
    pub fn to_pairs(&self) -> Vec<(NodeOptionKey, String)> {
        let base = Self::default();
        let mut pairs = Vec::new();
        let mut push = |key: NodeOptionKey, differs: bool, value: String| {
            if differs {
                pairs.push((key, value));
            }
        };

        let (style, label) = (&self.style, &self.label);
        push(NodeOptionKey::Shape, style.shape != base.style.shape, style.shape.to_string());
        push(
            NodeOptionKey::Fill,
            style.fill.color != base.style.fill.color,
            style.fill.color.to_string(),
        );
        push(
            NodeOptionKey::Transparent,
            style.fill.transparent,
            format_bool(style.fill.transparent).to_string(),
        );
        push(
            NodeOptionKey::BorderColor,
            style.border.color != base.style.border.color,
            style.border.color.to_string(),
        );
        push(
            NodeOptionKey::BorderType,
            style.border.line_type != base.style.border.line_type,
            style.border.line_type.to_string(),
        );
        push(
            NodeOptionKey::BorderWidth,
            style.border.width != base.style.border.width,
            format_number(style.border.width),
        );
        for (key, value) in [
            (NodeOptionKey::Height, style.geometry.height),
            (NodeOptionKey::Width, style.geometry.width),
            (NodeOptionKey::X, style.geometry.x),
            (NodeOptionKey::Y, style.geometry.y),
        ] {
            if let Some(value) = value {
                push(key, true, format_number(value));
            }
        }
        push(
            NodeOptionKey::LabelAlignment,
            label.alignment != base.label.alignment,
            label.alignment.to_string(),
        );
        push(
            NodeOptionKey::FontFamily,
            label.font_family != base.label.font_family,
            label.font_family.clone(),
        );
        push(
            NodeOptionKey::FontSize,
            label.font_size != base.label.font_size,
            label.font_size.to_string(),
        );
        push(
            NodeOptionKey::FontStyle,
            label.font_style != base.label.font_style,
            label.font_style.to_string(),
        );
        push(
            NodeOptionKey::UnderlinedText,
            label.underlined,
            format_bool(label.underlined).to_string(),
        );
        push(
            NodeOptionKey::TextColor,
            label.text_color != base.label.text_color,
            label.text_color.to_string(),
        );
        push(
            NodeOptionKey::NodeType,
            self.realizer != base.realizer,
            self.realizer.to_string(),
        );
        if let Some(uml) = &self.uml {
            push(NodeOptionKey::UmlStereotype, !uml.stereotype.is_empty(), uml.stereotype.clone());
            push(NodeOptionKey::UmlAttributes, !uml.attributes.is_empty(), uml.attributes.clone());
            push(NodeOptionKey::UmlMethods, !uml.methods.is_empty(), uml.methods.clone());
        }
        if let Some(url) = &self.url {
            push(NodeOptionKey::Url, true, url.clone());
        }
        if let Some(description) = &self.description {
            push(NodeOptionKey::Description, true, description.clone());
        }
        push(NodeOptionKey::Closed, self.closed, format_bool(self.closed).to_string());
        pairs
    }

    fn uml_mut(&mut self) -> &mut UmlData {
        self.realizer = NodeRealizer::UmlClassNode;
        self.uml.get_or_insert_with(UmlData::default)
    }
}

/// Style, labels and metadata for an edge about to be created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeOptions {
    pub style: EdgeStyle,
    pub realizer: EdgeRealizer,
    pub labels: Vec<EdgeLabel>,
    /// Per-edge `directed` attribute; `None` follows the graph default.
    pub directed: Option<bool>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub properties: PropertyValues,
    label_background: Option<Color>,
    label_border: Option<Color>,
}

impl EdgeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) -> GraphResult<()> {
        let key: EdgeOptionKey = key.parse().map_err(|_| GraphError::UnknownOption {
            scope: "edge",
            key: key.to_string(),
        })?;
        self.set_key(key, value)
    }

    pub fn set_key(&mut self, key: EdgeOptionKey, value: &str) -> GraphResult<()> {
        let option = key.as_str();
        match key {
            EdgeOptionKey::Arrowhead => self.style.arrowhead = value.parse()?,
            EdgeOptionKey::Arrowfoot => self.style.arrowfoot = value.parse()?,
            EdgeOptionKey::Color => self.style.color = Color::parse(value)?,
            EdgeOptionKey::LineType => self.style.line_type = value.parse()?,
            EdgeOptionKey::Width => self.style.width = parse_number(option, value)?,
            EdgeOptionKey::EdgeType => self.realizer = value.parse()?,
            EdgeOptionKey::Label => self.push_label(EdgeLabel::new(value)),
            EdgeOptionKey::SourceLabel => self.push_label(EdgeLabel::at_source(value)),
            EdgeOptionKey::TargetLabel => self.push_label(EdgeLabel::at_target(value)),
            EdgeOptionKey::LabelBackgroundColor => {
                let color = Color::parse(value)?;
                for label in &mut self.labels {
                    label.style.background_color = Some(color.clone());
                }
                self.label_background = Some(color);
            }
            EdgeOptionKey::LabelBorderColor => {
                let color = Color::parse(value)?;
                for label in &mut self.labels {
                    label.style.line_color = Some(color.clone());
                }
                self.label_border = Some(color);
            }
            EdgeOptionKey::Directed => self.directed = Some(parse_bool(option, value)?),
            EdgeOptionKey::Url => self.url = Some(value.to_string()),
            EdgeOptionKey::Description => self.description = Some(value.to_string()),
        }
        Ok(())
    }

    pub fn with(mut self, key: &str, value: &str) -> GraphResult<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn from_pairs<'a, I>(pairs: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::new();
        for (key, value) in pairs {
            options.set(key, value)?;
        }
        Ok(options)
    }

    pub fn from_edge(edge: &Edge) -> Self {
        Self {
            style: edge.style.clone(),
            realizer: edge.realizer.clone(),
            labels: edge.labels.clone(),
            directed: edge.directed,
            url: edge.url.clone(),
            description: edge.description.clone(),
            properties: edge.properties.clone(),
            label_background: None,
            label_border: None,
        }
    }

    /// Options that differ from the defaults. Only the first label of each
    /// kind has an option form.
    pub fn to_pairs(&self) -> Vec<(EdgeOptionKey, String)> {
        let base = EdgeStyle::default();
        let style = &self.style;
        let mut pairs = Vec::new();
        if style.arrowhead != base.arrowhead {
            pairs.push((EdgeOptionKey::Arrowhead, style.arrowhead.to_string()));
        }
        if style.arrowfoot != base.arrowfoot {
            pairs.push((EdgeOptionKey::Arrowfoot, style.arrowfoot.to_string()));
        }
        if style.color != base.color {
            pairs.push((EdgeOptionKey::Color, style.color.to_string()));
        }
        if style.line_type != base.line_type {
            pairs.push((EdgeOptionKey::LineType, style.line_type.to_string()));
        }
        if style.width != base.width {
            pairs.push((EdgeOptionKey::Width, format_number(style.width)));
        }
        if self.realizer != EdgeRealizer::default() {
            pairs.push((EdgeOptionKey::EdgeType, self.realizer.to_string()));
        }
        let mut seen = (false, false, false);
        for label in &self.labels {
            if label.is_source_label() {
                if !seen.1 {
                    pairs.push((EdgeOptionKey::SourceLabel, label.text.clone()));
                }
                seen.1 = true;
            } else if label.is_target_label() {
                if !seen.2 {
                    pairs.push((EdgeOptionKey::TargetLabel, label.text.clone()));
                }
                seen.2 = true;
            } else if !seen.0 {
                pairs.push((EdgeOptionKey::Label, label.text.clone()));
                seen.0 = true;
            }
        }
        let first = self.labels.first().map(|label| &label.style);
        if let Some(color) = first.and_then(|style| style.background_color.as_ref()) {
            pairs.push((EdgeOptionKey::LabelBackgroundColor, color.to_string()));
        }
        if let Some(color) = first.and_then(|style| style.line_color.as_ref()) {
            pairs.push((EdgeOptionKey::LabelBorderColor, color.to_string()));
        }
        if let Some(directed) = self.directed {
            pairs.push((EdgeOptionKey::Directed, format_bool(directed).to_string()));
        }
        if let Some(url) = &self.url {
            pairs.push((EdgeOptionKey::Url, url.clone()));
        }
        if let Some(description) = &self.description {
            pairs.push((EdgeOptionKey::Description, description.clone()));
        }
        pairs
    }

    fn push_label(&mut self, mut label: EdgeLabel) {
        label.style.background_color = self.label_background.clone();
        label.style.line_color = self.label_border.clone();
        // centered labels first, then source, then target
        let rank = label_rank(&label);
        let at = self
            .labels
            .iter()
            .position(|other| label_rank(other) > rank)
            .unwrap_or(self.labels.len());
        self.labels.insert(at, label);
    }
}

fn label_rank(label: &EdgeLabel) -> u8 {
    if label.is_source_label() {
        1
    } else if label.is_target_label() {
        2
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yed_core::{ArrowType, LineType, Shape, ValueError};

    #[test]
    fn node_options_parse_and_validate() {
        let options = NodeOptions::from_pairs([
            ("shape", "roundrectangle"),
            ("fill", "#FF0000"),
            ("border_type", "dashed"),
            ("width", "80"),
            ("font_size", "14"),
        ])
        .unwrap();
        assert_eq!(options.style.shape, Shape::RoundRectangle);
        assert_eq!(options.style.fill.color.as_str(), "#FF0000");
        assert_eq!(options.style.border.line_type, LineType::Dashed);
        assert_eq!(options.style.geometry.width, Some(80.0));
        assert_eq!(options.label.font_size, 14);
    }

    #[test]
    fn unknown_key_and_bad_value_fail() {
        let err = NodeOptions::new().with("colour", "#000000").unwrap_err();
        assert!(matches!(err, GraphError::UnknownOption { scope: "node", .. }));

        let err = NodeOptions::new().with("shape", "blob").unwrap_err();
        assert!(matches!(
            err,
            GraphError::Value(ValueError::UnsupportedValue { option: "shape", .. })
        ));

        assert!(EdgeOptions::new().with("color", "black").is_err());
        assert!(EdgeOptions::new().with("width", "wide").is_err());
    }

    #[test]
    fn uml_keys_switch_realizer() {
        let options = NodeOptions::new().with("uml_methods", "run()").unwrap();
        assert_eq!(options.realizer, NodeRealizer::UmlClassNode);
        assert_eq!(options.uml.unwrap().methods, "run()");
    }

    #[test]
    fn label_colors_apply_in_any_order() {
        let before = EdgeOptions::from_pairs([
            ("label_background_color", "#FFFFFF"),
            ("label", "x"),
        ])
        .unwrap();
        let after = EdgeOptions::from_pairs([
            ("label", "x"),
            ("label_background_color", "#FFFFFF"),
        ])
        .unwrap();
        assert_eq!(before.labels, after.labels);
        assert_eq!(
            before.labels[0].style.background_color.as_ref().map(Color::as_str),
            Some("#FFFFFF")
        );
    }

    #[test]
    fn labels_keep_kind_order() {
        let options = EdgeOptions::from_pairs([
            ("target_label", "*"),
            ("source_label", "1"),
            ("label", "owns"),
        ])
        .unwrap();
        let texts: Vec<_> = options.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["owns", "1", "*"]);
    }

    #[test]
    fn to_pairs_lists_only_changes() {
        assert!(NodeOptions::new().to_pairs().is_empty());
        assert!(EdgeOptions::new().to_pairs().is_empty());

        let edge = EdgeOptions::from_pairs([
            ("arrowhead", "none"),
            ("source_label", "1"),
            ("target_label", "n"),
        ])
        .unwrap();
        assert_eq!(edge.style.arrowhead, ArrowType::None);
        let keys: Vec<_> = edge.to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                EdgeOptionKey::Arrowhead,
                EdgeOptionKey::SourceLabel,
                EdgeOptionKey::TargetLabel
            ]
        );
    }
}
