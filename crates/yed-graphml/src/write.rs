//! Graph → GraphML element tree.

use tracing::{debug, trace};
use yed_core::number::{format_bool, format_number};
use yed_core::{Color, PropertyScope};
use yed_graph::{
    Edge, EdgeLabel, Fragment, Geometry, Graph, GroupState, LabelStyle, Node, NodeKind,
    NodeLabel, NodeRealizer, PropertyValues, Scope, UmlData,
};

use crate::error::{GraphmlError, GraphmlResult};
use crate::keys;
use crate::xml::Element;

/// Namespace declarations on every written `<graphml>`.
pub(crate) const NAMESPACES: &[(&str, &str)] = &[
    ("xmlns", "http://graphml.graphdrawing.org/xmlns"),
    ("xmlns:java", "http://www.yworks.com/xml/yfiles-common/1.0/java"),
    ("xmlns:sys", "http://www.yworks.com/xml/yfiles-common/markup/primitives/2.0"),
    ("xmlns:x", "http://www.yworks.com/xml/yfiles-common/markup/2.0"),
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("xmlns:y", "http://www.yworks.com/xml/graphml"),
    ("xmlns:yed", "http://www.yworks.com/xml/yed/3"),
    (
        "xsi:schemaLocation",
        "http://graphml.graphdrawing.org/xmlns http://www.yworks.com/xml/schema/graphml/1.1/ygraphml.xsd",
    ),
];

/// Build the `<graphml>` root for a validated graph.
pub(crate) fn document(graph: &Graph) -> GraphmlResult<Element> {
    graph.validate()?;

    let mut root = Element::new("graphml");
    for (key, value) in NAMESPACES {
        root = root.attr(key, *value);
    }
    root = root.merge(&graph.extensions.document_attributes);

    for key in keys::declarations(graph) {
        root.push(key);
    }
    root.push_fragments(&graph.extensions.keys);
    root.push(keys::edge_graphics_declaration());

    let mut top = Element::new("graph")
        .attr("edgedefault", graph.edge_default().as_str())
        .attr("id", graph.id());
    top.push_fragments(&graph.extensions.graph_data);
    write_scope(graph, Scope::Root, &mut top)?;
    root.push(top);
    root.push_fragments(&graph.extensions.document_data);

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "serialized graph"
    );
    Ok(root)
}

/// Nodes then edges of one scope, recursing into groups depth first.
fn write_scope(graph: &Graph, scope: Scope, parent: &mut Element) -> GraphmlResult<()> {
    let Some(members) = graph.members(scope) else {
        return Ok(());
    };
    for id in members.nodes() {
        let node = graph
            .node(*id)
            .ok_or_else(|| GraphmlError::structure(format!("scope lists unknown node {id}")))?;
        parent.push(node_element(graph, node)?);
    }
    for id in members.edges() {
        let edge = graph
            .edge(*id)
            .ok_or_else(|| GraphmlError::structure(format!("scope lists unknown edge {id}")))?;
        parent.push(edge_element(graph, edge));
    }
    Ok(())
}

fn data(key: &str) -> Element {
    Element::new("data").attr("key", key)
}

fn node_element(graph: &Graph, node: &Node) -> GraphmlResult<Element> {
    trace!(id = %node.id(), "writing node");
    let mut element = Element::new("node").attr("id", node.id().to_string());

    match &node.kind {
        NodeKind::Shape { realizer, uml } => {
            element.push(data(keys::NODE_GRAPHICS).child(shape_realizer(node, realizer, uml.as_ref())));
        }
        NodeKind::Group(state) => {
            let folder = if state.closed { "folder" } else { "group" };
            element = element.attr("yfiles.foldertype", folder);
            let realizers = Element::new("y:Realizers")
                .attr("active", "0")
                .child(group_realizer(node, state))
                .fragments(&state.extra_realizers);
            let proxy = Element::new("y:ProxyAutoBoundsNode").child(realizers);
            element.push(data(keys::NODE_GRAPHICS).child(proxy));
        }
    }

    push_metadata(
        &mut element,
        graph,
        PropertyScope::Node,
        Metadata {
            url: node.url.as_deref(),
            description: node.description.as_deref(),
            properties: &node.properties,
            extensions: &node.extensions,
        },
    );

    if node.is_group() {
        let mut nested = Element::new("graph")
            .attr("edgedefault", graph.edge_default().as_str())
            .attr("id", format!("{}:", node.id()));
        write_scope(graph, Scope::Group(node.id()), &mut nested)?;
        element.push(nested);
    }
    Ok(element)
}

/// Geometry, fill, border and labels shared by every node realizer.
fn node_graphics(node: &Node, realizer: &str) -> Element {
    let style = &node.style;
    let mut element = Element::new(format!("y:{realizer}")).merge(&node.graphics_attributes);
    if !style.geometry.is_empty() {
        element.push(geometry(&style.geometry));
    }
    element.push(
        Element::new("y:Fill")
            .attr("color", style.fill.color.as_str())
            .attr("transparent", format_bool(style.fill.transparent))
            .merge(&style.fill.foreign_attributes),
    );
    element.push(
        Element::new("y:BorderStyle")
            .attr("color", style.border.color.as_str())
            .attr("type", style.border.line_type.as_str())
            .attr("width", format_number(style.border.width))
            .merge(&style.border.foreign_attributes),
    );
    for label in &node.labels {
        element.push(node_label(label));
    }
    element
}

fn geometry(geometry: &Geometry) -> Element {
    Element::new("y:Geometry")
        .attr_opt("height", geometry.height.map(format_number))
        .attr_opt("width", geometry.width.map(format_number))
        .attr_opt("x", geometry.x.map(format_number))
        .attr_opt("y", geometry.y.map(format_number))
}

fn shape_realizer(node: &Node, realizer: &NodeRealizer, uml: Option<&UmlData>) -> Element {
    let mut element = node_graphics(node, realizer.element_name());
    match (realizer, uml) {
        (NodeRealizer::ShapeNode, _) => {
            element.push(Element::new("y:Shape").attr("type", node.style.shape.as_str()));
        }
        (NodeRealizer::UmlClassNode, Some(uml)) => element.push(uml_element(uml)),
        _ => {}
    }
    element.fragments(&node.graphics_extensions)
}

fn uml_element(uml: &UmlData) -> Element {
    Element::new("y:UML")
        .attr("stereotype", uml.stereotype.as_str())
        .merge(&uml.foreign_attributes)
        .child(Element::new("y:AttributeLabel").text(&uml.attributes))
        .child(Element::new("y:MethodLabel").text(&uml.methods))
}

fn group_realizer(node: &Node, state: &GroupState) -> Element {
    let mut element = node_graphics(node, "GroupNode");
    element.push(Element::new("y:Shape").attr("type", node.style.shape.as_str()));
    element.push(
        Element::new("y:State")
            .attr("closed", format_bool(state.closed))
            .merge(&state.state_attributes),
    );
    element.fragments(&node.graphics_extensions)
}

/// Attributes common to node and edge labels, alphabetical as yEd writes them.
struct LabelParts<'a> {
    style: &'a LabelStyle,
    model: &'a str,
    position: Option<&'a str>,
    placement: Option<&'a str>,
}

fn label_element(name: &str, parts: LabelParts<'_>) -> Element {
    let style = parts.style;
    Element::new(name)
        .attr("alignment", style.alignment.as_str())
        .attr_opt("backgroundColor", style.background_color.as_ref().map(Color::as_str))
        .attr("fontFamily", style.font_family.as_str())
        .attr("fontSize", style.font_size.to_string())
        .attr("fontStyle", style.font_style.as_str())
        .attr("hasBackgroundColor", format_bool(style.background_color.is_some()))
        .attr("hasLineColor", format_bool(style.line_color.is_some()))
        .attr_opt("height", style.height.map(format_number))
        .attr("horizontalTextPosition", style.horizontal_text_position.as_str())
        .attr("iconTextGap", style.icon_text_gap.to_string())
        .attr_opt("lineColor", style.line_color.as_ref().map(Color::as_str))
        .attr("modelName", parts.model)
        .attr_opt("modelPosition", parts.position)
        .attr_opt("preferredPlacement", parts.placement)
        .attr("textColor", style.text_color.as_str())
        .attr("underlinedText", format_bool(style.underlined))
        .attr("verticalTextPosition", style.vertical_text_position.as_str())
        .attr("visible", format_bool(style.visible))
        .attr_opt("width", style.width.map(format_number))
}

fn node_label(label: &NodeLabel) -> Element {
    let parts = LabelParts {
        style: &label.style,
        model: label.model.as_str(),
        position: label.position.as_deref(),
        placement: None,
    };
    label_element("y:NodeLabel", parts)
        .merge(&label.foreign_attributes)
        .text(&label.text)
        .fragments(&label.extensions)
}

fn edge_label(label: &EdgeLabel) -> Element {
    let parts = LabelParts {
        style: &label.style,
        model: label.model.as_str(),
        position: label.position.as_deref(),
        placement: label.preferred_placement.as_deref(),
    };
    label_element("y:EdgeLabel", parts)
        .merge(&label.foreign_attributes)
        .text(&label.text)
        .fragments(&label.extensions)
}

fn edge_element(graph: &Graph, edge: &Edge) -> Element {
    trace!(id = %edge.id(), "writing edge");
    let mut element = Element::new("edge")
        .attr("id", edge.id().to_string())
        .attr("source", edge.source().to_string())
        .attr("target", edge.target().to_string())
        .attr_opt("directed", edge.directed.map(format_bool));

    let style = &edge.style;
    let mut realizer = Element::new(format!("y:{}", edge.realizer.element_name()))
        .merge(&edge.graphics_attributes)
        .child(
            Element::new("y:LineStyle")
                .attr("color", style.color.as_str())
                .attr("type", style.line_type.as_str())
                .attr("width", format_number(style.width)),
        )
        .child(
            Element::new("y:Arrows")
                .attr("source", style.arrowfoot.as_str())
                .attr("target", style.arrowhead.as_str()),
        );
    for label in &edge.labels {
        realizer.push(edge_label(label));
    }
    realizer.push_fragments(&edge.graphics_extensions);
    element.push(data(keys::EDGE_GRAPHICS).child(realizer));

    push_metadata(
        &mut element,
        graph,
        PropertyScope::Edge,
        Metadata {
            url: edge.url.as_deref(),
            description: edge.description.as_deref(),
            properties: &edge.properties,
            extensions: &edge.extensions,
        },
    );
    element
}

struct Metadata<'a> {
    url: Option<&'a str>,
    description: Option<&'a str>,
    properties: &'a PropertyValues,
    extensions: &'a [Fragment],
}

/// url, description, every declared custom property, then foreign data.
fn push_metadata(element: &mut Element, graph: &Graph, scope: PropertyScope, meta: Metadata<'_>) {
    let (url_key, description_key) = match scope {
        PropertyScope::Node => (keys::NODE_URL, keys::NODE_DESCRIPTION),
        PropertyScope::Edge => (keys::EDGE_URL, keys::EDGE_DESCRIPTION),
    };
    if let Some(url) = meta.url {
        element.push(data(url_key).text(url));
    }
    if let Some(description) = meta.description {
        element.push(data(description_key).text(description));
    }
    for def in graph.custom_properties().iter().filter(|def| def.scope == scope) {
        let value = meta.properties.get(&def.name).unwrap_or(&def.default);
        element.push(data(&def.key_id()).text(value));
    }
    element.push_fragments(meta.extensions);
}
