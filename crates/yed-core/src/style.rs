//! Enumerated style values accepted by yEd.
//!
//! Every enum maps one-to-one onto the attribute text yEd writes, parses
//! from exactly that text, and reports the accepted set on failure.

use crate::error::{ValueError, ValueResult};

/// Declare a closed set of string-valued options.
///
/// Generates the enum, `ALL`, `OPTION`, `as_str`, `Display` and a
/// `FromStr` that fails with [`ValueError::UnsupportedValue`].
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $option:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            /// Option name used in error messages.
            pub const OPTION: &'static str = $option;

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::ValueError;

            fn from_str(s: &str) -> ::core::result::Result<Self, $crate::ValueError> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err($crate::ValueError::unsupported($option, s, &[$($text),+])),
                }
            }
        }
    };
}

/// Serde support for `string_enum!` types: (de)serialize as the yEd text.
macro_rules! serde_as_str {
    ($($name:ident),+ $(,)?) => {
        $(
            #[cfg(feature = "serde")]
            impl serde::Serialize for $name {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.as_str())
                }
            }

            #[cfg(feature = "serde")]
            impl<'de> serde::Deserialize<'de> for $name {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let text = <String as serde::Deserialize>::deserialize(deserializer)?;
                    text.parse().map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

string_enum! {
    /// Node outline shape (`y:Shape type`).
    pub enum Shape: "shape" {
        Rectangle => "rectangle",
        Rectangle3d => "rectangle3d",
        RoundRectangle => "roundrectangle",
        Diamond => "diamond",
        Ellipse => "ellipse",
        FatArrow => "fatarrow",
        FatArrow2 => "fatarrow2",
        Hexagon => "hexagon",
        Octagon => "octagon",
        Parallelogram => "parallelogram",
        Parallelogram2 => "parallelogram2",
        Star5 => "star5",
        Star6 => "star6",
        Star8 => "star8",
        Trapezoid => "trapezoid",
        Trapezoid2 => "trapezoid2",
        Triangle => "triangle",
    }
}

string_enum! {
    /// Stroke pattern for borders and edge lines.
    pub enum LineType: "line_type" {
        Line => "line",
        Dashed => "dashed",
        Dotted => "dotted",
        DashedDotted => "dashed_dotted",
    }
}

string_enum! {
    pub enum FontStyle: "font_style" {
        Plain => "plain",
        Bold => "bold",
        Italic => "italic",
        BoldItalic => "bolditalic",
    }
}

string_enum! {
    pub enum HorizontalAlignment: "alignment" {
        Left => "left",
        Center => "center",
        Right => "right",
    }
}

string_enum! {
    pub enum VerticalAlignment: "vertical_text_position" {
        Top => "top",
        Center => "center",
        Bottom => "bottom",
    }
}

string_enum! {
    /// Arrow decoration at either end of an edge.
    pub enum ArrowType: "arrow" {
        None => "none",
        Standard => "standard",
        Delta => "delta",
        WhiteDelta => "white_delta",
        Diamond => "diamond",
        WhiteDiamond => "white_diamond",
        Short => "short",
        Plain => "plain",
        Concave => "concave",
        Convex => "convex",
        Circle => "circle",
        TransparentCircle => "transparent_circle",
        Dash => "dash",
        SkewedDash => "skewed_dash",
        TShape => "t_shape",
        CrowsFootOneMandatory => "crows_foot_one_mandatory",
        CrowsFootManyMandatory => "crows_foot_many_mandatory",
        CrowsFootManyOptional => "crows_foot_many_optional",
        CrowsFootOneOptional => "crows_foot_one_optional",
        CrowsFootOne => "crows_foot_one",
        CrowsFootMany => "crows_foot_many",
        CrowsFootOptional => "crows_foot_optional",
    }
}

string_enum! {
    /// Placement model of a node label (`modelName`).
    pub enum NodeLabelModel: "node_label_model" {
        Internal => "internal",
        Corners => "corners",
        Sandwich => "sandwich",
        Sides => "sides",
        EightPos => "eight_pos",
        /// Model described by a nested `y:LabelModel` element.
        Custom => "custom",
    }
}

string_enum! {
    /// Placement model of an edge label (`modelName`).
    pub enum EdgeLabelModel: "edge_label_model" {
        TwoPos => "two_pos",
        Centered => "centered",
        SixPos => "six_pos",
        ThreeCenter => "three_center",
        CenterSlider => "center_slider",
        SideSlider => "side_slider",
        Custom => "custom",
    }
}

string_enum! {
    /// Which entities a custom property attaches to.
    pub enum PropertyScope: "property_scope" {
        Node => "node",
        Edge => "edge",
    }
}

string_enum! {
    /// GraphML `attr.type` of a custom property.
    pub enum PropertyType: "property_type" {
        String => "string",
        Int => "int",
        Double => "double",
        Boolean => "boolean",
    }
}

string_enum! {
    pub enum EdgeDefault: "edgedefault" {
        Directed => "directed",
        Undirected => "undirected",
    }
}

serde_as_str!(
    Shape,
    LineType,
    FontStyle,
    HorizontalAlignment,
    VerticalAlignment,
    ArrowType,
    NodeLabelModel,
    EdgeLabelModel,
    PropertyScope,
    PropertyType,
    EdgeDefault,
);

impl Default for Shape {
    fn default() -> Self {
        Shape::Rectangle
    }
}

impl Default for LineType {
    fn default() -> Self {
        LineType::Line
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        FontStyle::Plain
    }
}

impl Default for HorizontalAlignment {
    fn default() -> Self {
        HorizontalAlignment::Center
    }
}

impl Default for VerticalAlignment {
    fn default() -> Self {
        VerticalAlignment::Center
    }
}

impl Default for EdgeDefault {
    fn default() -> Self {
        EdgeDefault::Directed
    }
}

impl NodeLabelModel {
    /// Positions accepted by this model; `None` means any.
    pub fn positions(self) -> Option<&'static [&'static str]> {
        match self {
            NodeLabelModel::Internal => {
                Some(&["t", "b", "c", "l", "r", "tl", "tr", "bl", "br"])
            }
            NodeLabelModel::Corners => Some(&["nw", "ne", "sw", "se"]),
            NodeLabelModel::Sandwich => Some(&["n", "s"]),
            NodeLabelModel::Sides => Some(&["n", "e", "s", "w"]),
            NodeLabelModel::EightPos => Some(&["n", "e", "s", "w", "nw", "ne", "sw", "se"]),
            NodeLabelModel::Custom => None,
        }
    }

    pub fn check_position(self, position: &str) -> ValueResult<()> {
        check_position(self.positions(), "node_label_position", position)
    }
}

impl EdgeLabelModel {
    /// Positions accepted by this model; `None` means any.
    pub fn positions(self) -> Option<&'static [&'static str]> {
        match self {
            EdgeLabelModel::TwoPos => Some(&["head", "tail"]),
            EdgeLabelModel::Centered => Some(&["center"]),
            EdgeLabelModel::SixPos => Some(&["shead", "thead", "head", "stail", "ttail", "tail"]),
            EdgeLabelModel::ThreeCenter => Some(&["center", "scentr", "tcentr"]),
            EdgeLabelModel::CenterSlider | EdgeLabelModel::SideSlider | EdgeLabelModel::Custom => {
                None
            }
        }
    }

    pub fn check_position(self, position: &str) -> ValueResult<()> {
        check_position(self.positions(), "edge_label_position", position)
    }
}

fn check_position(
    allowed: Option<&'static [&'static str]>,
    option: &'static str,
    position: &str,
) -> ValueResult<()> {
    match allowed {
        Some(list) if !list.contains(&position) => {
            Err(ValueError::unsupported(option, position, list))
        }
        _ => Ok(()),
    }
}

impl PropertyType {
    /// Value used when a property is declared without a default.
    pub fn zero_value(self) -> &'static str {
        match self {
            PropertyType::String => "",
            PropertyType::Int => "0",
            PropertyType::Double => "0.0",
            PropertyType::Boolean => "false",
        }
    }

    /// Check that `value` is a valid literal of this type.
    pub fn check_value(self, value: &str) -> ValueResult<()> {
        match self {
            PropertyType::String => Ok(()),
            PropertyType::Int => value.trim().parse::<i64>().map(|_| ()).map_err(|_| {
                ValueError::InvalidNumber {
                    option: "int property",
                    value: value.to_string(),
                }
            }),
            PropertyType::Double => crate::number::parse_number("double property", value).map(|_| ()),
            PropertyType::Boolean => match value {
                "true" | "false" => Ok(()),
                _ => Err(ValueError::InvalidBool {
                    option: "boolean property",
                    value: value.to_string(),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_variant() {
        for shape in Shape::ALL {
            assert_eq!(shape.as_str().parse::<Shape>().unwrap(), *shape);
        }
        for arrow in ArrowType::ALL {
            assert_eq!(arrow.to_string().parse::<ArrowType>().unwrap(), *arrow);
        }
    }

    #[test]
    fn unknown_value_names_option_and_choices() {
        let err = "wavy".parse::<LineType>().unwrap_err();
        match err {
            ValueError::UnsupportedValue {
                option,
                value,
                allowed,
            } => {
                assert_eq!(option, "line_type");
                assert_eq!(value, "wavy");
                assert_eq!(allowed, "line, dashed, dotted, dashed_dotted");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn label_positions_follow_the_model() {
        assert!(NodeLabelModel::Internal.check_position("tl").is_ok());
        assert!(NodeLabelModel::Sandwich.check_position("e").is_err());
        assert!(NodeLabelModel::Custom.check_position("anything").is_ok());
        assert!(EdgeLabelModel::SixPos.check_position("stail").is_ok());
        assert!(EdgeLabelModel::Centered.check_position("head").is_err());
        assert!(EdgeLabelModel::SideSlider.check_position("0.5").is_ok());
    }

    #[test]
    fn property_values_are_typed() {
        assert!(PropertyType::Int.check_value("356").is_ok());
        assert!(PropertyType::Int.check_value("3.5").is_err());
        assert!(PropertyType::Double.check_value("85.7").is_ok());
        assert!(PropertyType::Boolean.check_value("false").is_ok());
        assert!(PropertyType::Boolean.check_value("no").is_err());
        assert!(PropertyType::String.check_value("").is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_yed_text() {
        let json = serde_json::to_string(&Shape::RoundRectangle).unwrap();
        assert_eq!(json, "\"roundrectangle\"");
        let back: PropertyType = serde_json::from_str("\"double\"").unwrap();
        assert_eq!(back, PropertyType::Double);
        assert!(serde_json::from_str::<LineType>("\"wavy\"").is_err());
    }
}
