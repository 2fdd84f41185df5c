//! Node and edge labels.

use yed_core::{
    Color, EdgeLabelModel, FontStyle, HorizontalAlignment, NodeLabelModel, ValueResult,
    VerticalAlignment,
};

use crate::defaults;
use crate::extension::{ForeignAttributes, Fragment};

/// Typography and box of a label, shared by node and edge labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub alignment: HorizontalAlignment,
    pub font_family: String,
    pub font_size: u32,
    pub font_style: FontStyle,
    pub underlined: bool,
    pub text_color: Color,
    pub icon_text_gap: u32,
    pub horizontal_text_position: HorizontalAlignment,
    pub vertical_text_position: VerticalAlignment,
    pub visible: bool,
    /// Present means `hasBackgroundColor="true"`.
    pub background_color: Option<Color>,
    /// Present means `hasLineColor="true"`.
    pub line_color: Option<Color>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            alignment: HorizontalAlignment::Center,
            font_family: defaults::FONT_FAMILY.to_string(),
            font_size: defaults::FONT_SIZE,
            font_style: FontStyle::Plain,
            underlined: false,
            text_color: Color::black(),
            icon_text_gap: defaults::ICON_TEXT_GAP,
            horizontal_text_position: HorizontalAlignment::Center,
            vertical_text_position: VerticalAlignment::Center,
            visible: true,
            background_color: None,
            line_color: None,
            width: Some(defaults::LABEL_WIDTH),
            height: Some(defaults::LABEL_HEIGHT),
        }
    }
}

/// A `y:NodeLabel`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLabel {
    pub text: String,
    pub style: LabelStyle,
    pub model: NodeLabelModel,
    pub position: Option<String>,
    pub foreign_attributes: ForeignAttributes,
    /// Child elements such as `y:LabelModel` or `y:ModelParameter`.
    pub extensions: Vec<Fragment>,
}

impl NodeLabel {
    /// Centered label inside the node.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LabelStyle::default(),
            model: NodeLabelModel::Internal,
            position: Some(defaults::NODE_LABEL_POSITION.to_string()),
            foreign_attributes: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Title label along the top of a group.
    pub fn group_title(text: impl Into<String>) -> Self {
        Self {
            position: Some(defaults::GROUP_LABEL_POSITION.to_string()),
            ..Self::new(text)
        }
    }

    /// Place the label with an explicit model and position.
    pub fn placed(mut self, model: NodeLabelModel, position: &str) -> ValueResult<Self> {
        model.check_position(position)?;
        self.model = model;
        self.position = Some(position.to_string());
        Ok(self)
    }
}

/// A `y:EdgeLabel`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub text: String,
    pub style: LabelStyle,
    pub model: EdgeLabelModel,
    pub position: Option<String>,
    pub preferred_placement: Option<String>,
    pub foreign_attributes: ForeignAttributes,
    pub extensions: Vec<Fragment>,
}

impl EdgeLabel {
    /// Label centered on the edge.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LabelStyle::default(),
            model: EdgeLabelModel::Centered,
            position: Some(defaults::EDGE_LABEL_POSITION.to_string()),
            preferred_placement: None,
            foreign_attributes: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Label near the source end.
    pub fn at_source(text: impl Into<String>) -> Self {
        Self {
            model: EdgeLabelModel::SixPos,
            position: Some(defaults::SOURCE_LABEL_POSITION.to_string()),
            preferred_placement: Some(defaults::SOURCE_LABEL_PLACEMENT.to_string()),
            ..Self::new(text)
        }
    }

    /// Label near the target end.
    pub fn at_target(text: impl Into<String>) -> Self {
        Self {
            model: EdgeLabelModel::SixPos,
            position: Some(defaults::TARGET_LABEL_POSITION.to_string()),
            preferred_placement: Some(defaults::TARGET_LABEL_PLACEMENT.to_string()),
            ..Self::new(text)
        }
    }

    pub fn placed(mut self, model: EdgeLabelModel, position: &str) -> ValueResult<Self> {
        model.check_position(position)?;
        self.model = model;
        self.position = Some(position.to_string());
        Ok(self)
    }

    pub(crate) fn is_source_label(&self) -> bool {
        self.model == EdgeLabelModel::SixPos
            && self.position.as_deref() == Some(defaults::SOURCE_LABEL_POSITION)
    }

    pub(crate) fn is_target_label(&self) -> bool {
        self.model == EdgeLabelModel::SixPos
            && self.position.as_deref() == Some(defaults::TARGET_LABEL_POSITION)
    }
}
