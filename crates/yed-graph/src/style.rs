//! Visual style of nodes and edges.

use core::fmt;
use core::str::FromStr;

use yed_core::{ArrowType, Color, LineType, Shape, ValueError};

use crate::defaults;
use crate::extension::ForeignAttributes;

/// `y:Fill`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub color: Color,
    pub transparent: bool,
    pub foreign_attributes: ForeignAttributes,
}

impl Default for Fill {
    fn default() -> Self {
        Self {
            color: Color::yed_yellow(),
            transparent: false,
            foreign_attributes: Vec::new(),
        }
    }
}

/// `y:BorderStyle`.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub color: Color,
    pub line_type: LineType,
    pub width: f64,
    pub foreign_attributes: ForeignAttributes,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            color: Color::black(),
            line_type: LineType::Line,
            width: defaults::BORDER_WIDTH,
            foreign_attributes: Vec::new(),
        }
    }
}

/// `y:Geometry`. Written only when at least one value is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        self.height.is_none() && self.width.is_none() && self.x.is_none() && self.y.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStyle {
    pub shape: Shape,
    pub fill: Fill,
    pub border: Border,
    pub geometry: Geometry,
}

/// Line and arrows of an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub color: Color,
    pub line_type: LineType,
    pub width: f64,
    pub arrowhead: ArrowType,
    pub arrowfoot: ArrowType,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: Color::black(),
            line_type: LineType::Line,
            width: defaults::LINE_WIDTH,
            arrowhead: ArrowType::Standard,
            arrowfoot: ArrowType::None,
        }
    }
}

/// Compartments of a `y:UML` class box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UmlData {
    pub stereotype: String,
    pub attributes: String,
    pub methods: String,
    pub foreign_attributes: ForeignAttributes,
}

/// Realizer element wrapping a leaf node's graphics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum NodeRealizer {
    #[default]
    ShapeNode,
    UmlClassNode,
    GenericNode,
    SvgNode,
    ImageNode,
    /// Any other `y:*Node` element, by local name.
    Other(String),
}

impl NodeRealizer {
    const KNOWN: &'static [&'static str] =
        &["ShapeNode", "UMLClassNode", "GenericNode", "SVGNode", "ImageNode"];

    pub fn element_name(&self) -> &str {
        match self {
            NodeRealizer::ShapeNode => "ShapeNode",
            NodeRealizer::UmlClassNode => "UMLClassNode",
            NodeRealizer::GenericNode => "GenericNode",
            NodeRealizer::SvgNode => "SVGNode",
            NodeRealizer::ImageNode => "ImageNode",
            NodeRealizer::Other(name) => name,
        }
    }

    /// Map a realizer element's local name, keeping unknown ones.
    pub fn from_element_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| NodeRealizer::Other(name.to_string()))
    }
}

impl FromStr for NodeRealizer {
    type Err = ValueError;

    /// Accepts the known realizers only.
    fn from_str(s: &str) -> Result<Self, ValueError> {
        match s {
            "ShapeNode" => Ok(NodeRealizer::ShapeNode),
            "UMLClassNode" => Ok(NodeRealizer::UmlClassNode),
            "GenericNode" => Ok(NodeRealizer::GenericNode),
            "SVGNode" => Ok(NodeRealizer::SvgNode),
            "ImageNode" => Ok(NodeRealizer::ImageNode),
            _ => Err(ValueError::unsupported("node_type", s, Self::KNOWN)),
        }
    }
}

impl fmt::Display for NodeRealizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// Realizer element wrapping an edge's graphics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum EdgeRealizer {
    #[default]
    PolyLine,
    Arc,
    Bezier,
    QuadCurve,
    Spline,
    Generic,
    Other(String),
}

impl EdgeRealizer {
    const KNOWN: &'static [&'static str] = &[
        "PolyLineEdge",
        "ArcEdge",
        "BezierEdge",
        "QuadCurveEdge",
        "SplineEdge",
        "GenericEdge",
    ];

    pub fn element_name(&self) -> &str {
        match self {
            EdgeRealizer::PolyLine => "PolyLineEdge",
            EdgeRealizer::Arc => "ArcEdge",
            EdgeRealizer::Bezier => "BezierEdge",
            EdgeRealizer::QuadCurve => "QuadCurveEdge",
            EdgeRealizer::Spline => "SplineEdge",
            EdgeRealizer::Generic => "GenericEdge",
            EdgeRealizer::Other(name) => name,
        }
    }

    pub fn from_element_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| EdgeRealizer::Other(name.to_string()))
    }
}

impl FromStr for EdgeRealizer {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, ValueError> {
        match s {
            "PolyLineEdge" => Ok(EdgeRealizer::PolyLine),
            "ArcEdge" => Ok(EdgeRealizer::Arc),
            "BezierEdge" => Ok(EdgeRealizer::Bezier),
            "QuadCurveEdge" => Ok(EdgeRealizer::QuadCurve),
            "SplineEdge" => Ok(EdgeRealizer::Spline),
            "GenericEdge" => Ok(EdgeRealizer::Generic),
            _ => Err(ValueError::unsupported("edge_type", s, Self::KNOWN)),
        }
    }
}

impl fmt::Display for EdgeRealizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_realizers_are_kept_by_name() {
        assert_eq!(NodeRealizer::from_element_name("SVGNode"), NodeRealizer::SvgNode);
        assert_eq!(
            NodeRealizer::from_element_name("TableNode"),
            NodeRealizer::Other("TableNode".into())
        );
        assert_eq!(NodeRealizer::Other("TableNode".into()).element_name(), "TableNode");
        assert!("TableNode".parse::<NodeRealizer>().is_err());
        assert_eq!(EdgeRealizer::from_element_name("ArcEdge"), EdgeRealizer::Arc);
    }

    #[test]
    fn empty_geometry_is_detected() {
        let mut geometry = Geometry::default();
        assert!(geometry.is_empty());
        geometry.x = Some(0.0);
        assert!(!geometry.is_empty());
    }
}
