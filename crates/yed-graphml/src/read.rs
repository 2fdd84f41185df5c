//! GraphML element tree → Graph.
//!
//! Keys are matched by meaning, so documents written by yEd itself (with
//! `d0`, `d1`… key ids) read the same as our own output. Anything not
//! modelled is kept as a fragment next to the entity it was found on.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, warn};
use yed_core::number::{parse_bool, parse_integer, parse_number};
use yed_core::{
    Color, CompactId, EdgeId, EdgeLabelModel, NodeId, NodeLabelModel, PropertyScope, ValueError,
};
use yed_graph::defaults::GRAPH_ID;
use yed_graph::{
    Border, Edge, EdgeLabel, EdgeRealizer, Fill, ForeignAttributes, Fragment, Geometry, Graph,
    GroupState, LabelStyle, Node, NodeKind, NodeLabel, NodeRealizer, Scope, UmlData,
};

use crate::error::{GraphmlError, GraphmlResult};
use crate::keys::{KeyMap, KeyRole};
use crate::write::NAMESPACES;
use crate::xml::Element;

pub(crate) fn graph_from_document(root: &Element) -> GraphmlResult<Graph> {
    if root.local_name() != "graphml" {
        return Err(GraphmlError::structure(format!(
            "root element is <{}>, expected <graphml>",
            root.name
        )));
    }
    let top = root
        .find("graph")
        .ok_or_else(|| GraphmlError::structure("missing <graph> element"))?;

    let keys = KeyMap::from_root(root)?;
    let edge_default = match top.get("edgedefault") {
        Some(text) => text.parse()?,
        None => Default::default(),
    };
    let mut graph = Graph::with_id(top.get("id").unwrap_or(GRAPH_ID), edge_default);

    let extensions = &mut graph.extensions;
    extensions.document_attributes = root
        .attributes
        .iter()
        .filter(|(key, _)| !NAMESPACES.iter().any(|(ns, _)| *ns == key.as_str()))
        .cloned()
        .collect();
    extensions.keys = keys.foreign.clone();
    let mut top_seen = false;
    for child in root.elements() {
        match child.local_name() {
            "key" => {}
            "graph" if !top_seen => top_seen = true,
            _ => extensions.document_data.push(child.to_fragment()?),
        }
    }
    for data in top.elements().filter(|e| e.local_name() == "data") {
        extensions.graph_data.push(data.to_fragment()?);
    }

    for def in &keys.custom {
        graph.define_custom_property(def.scope, def.name.clone(), def.kind, def.default.clone())?;
    }

    let ids = IdPlan::collect(top)?;
    let mut builder = Builder {
        keys: &keys,
        ids,
        graph,
        pending: Vec::new(),
    };
    builder.read_scope(top, Scope::Root)?;
    builder.finish_edges()?;

    let graph = builder.graph;
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "parsed graph"
    );
    Ok(graph)
}

/// Final ids for every node and edge, decided before anything is built.
///
/// Canonical `n<k>`/`e<k>` ids are kept; everything else is numbered
/// after the highest canonical id, in document order.
struct IdPlan {
    nodes: HashMap<String, NodeId>,
    edges: Vec<EdgeId>,
    next_edge: usize,
}

impl IdPlan {
    fn collect(top: &Element) -> GraphmlResult<Self> {
        let mut node_sources = Vec::new();
        let mut edge_sources = Vec::new();
        gather(top, &mut node_sources, &mut edge_sources)?;

        let mut seen = HashSet::new();
        for source in &node_sources {
            if !seen.insert(*source) {
                return Err(GraphmlError::structure(format!("duplicate node id '{source}'")));
            }
        }
        let mut seen = HashSet::new();
        for source in edge_sources.iter().flatten() {
            if !seen.insert(*source) {
                return Err(GraphmlError::structure(format!("duplicate edge id '{source}'")));
            }
        }

        let wrapped: Vec<Option<&str>> = node_sources.iter().map(|s| Some(*s)).collect();
        let node_ids = assign(&wrapped, |s| s.parse::<NodeId>().ok())?;
        let edges = assign(&edge_sources, |s| s.parse::<EdgeId>().ok())?;
        let nodes = node_sources
            .into_iter()
            .map(str::to_string)
            .zip(node_ids)
            .collect();
        Ok(Self {
            nodes,
            edges,
            next_edge: 0,
        })
    }

    fn node(&self, source: &str) -> GraphmlResult<NodeId> {
        self.nodes.get(source).copied().ok_or_else(|| {
            GraphmlError::structure(format!("edge references unknown node '{source}'"))
        })
    }

    fn next_edge(&mut self) -> GraphmlResult<EdgeId> {
        let id = self
            .edges
            .get(self.next_edge)
            .copied()
            .ok_or_else(|| GraphmlError::structure("edge count changed while reading"))?;
        self.next_edge += 1;
        Ok(id)
    }
}

/// Node and edge ids in the order `Builder::read_scope` visits them.
fn gather<'a>(
    graph: &'a Element,
    nodes: &mut Vec<&'a str>,
    edges: &mut Vec<Option<&'a str>>,
) -> GraphmlResult<()> {
    for child in graph.elements() {
        match child.local_name() {
            "node" => {
                nodes.push(child.require("id")?);
                if let Some(nested) = child.find("graph") {
                    gather(nested, nodes, edges)?;
                }
            }
            "edge" => edges.push(child.get("id")),
            _ => {}
        }
    }
    Ok(())
}

fn assign<T: CompactId + core::fmt::Display>(
    sources: &[Option<&str>],
    parse: impl Fn(&str) -> Option<T>,
) -> GraphmlResult<Vec<T>> {
    let canonical: Vec<Option<T>> = sources.iter().map(|s| s.and_then(&parse)).collect();
    let claimed: BTreeSet<u32> = canonical.iter().flatten().map(|id| id.index()).collect();
    let mut next = claimed.last().map_or(0, |max| max + 1);

    let mut assigned = Vec::with_capacity(sources.len());
    for (source, slot) in sources.iter().zip(canonical) {
        let id = match slot {
            Some(id) => id,
            None => {
                if next == u32::MAX {
                    return Err(ValueError::IdExhausted { what: T::WHAT }.into());
                }
                let id = T::from_index(next);
                next += 1;
                if let Some(source) = source {
                    warn!(source, assigned = %id, "reassigned non-canonical id");
                }
                id
            }
        };
        assigned.push(id);
    }
    Ok(assigned)
}

struct Builder<'a> {
    keys: &'a KeyMap,
    ids: IdPlan,
    graph: Graph,
    pending: Vec<(Scope, EdgeId, &'a Element)>,
}

impl<'a> Builder<'a> {
    fn read_scope(&mut self, graph: &'a Element, scope: Scope) -> GraphmlResult<()> {
        for child in graph.elements() {
            match child.local_name() {
                "node" => self.read_node(child, scope)?,
                "edge" => {
                    let id = self.ids.next_edge()?;
                    self.pending.push((scope, id, child));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn read_node(&mut self, element: &'a Element, scope: Scope) -> GraphmlResult<()> {
        let source = element.require("id")?;
        let id = self.ids.node(source)?;
        let folder_type = element.get("yfiles.foldertype");
        let nested = element.find("graph");

        let mut node = if folder_type.is_some() || nested.is_some() {
            let mut group = Node::new_group(id, source);
            if let Some(state) = group.group_state_mut() {
                state.closed = folder_type == Some("folder");
            }
            group
        } else {
            Node::new(id, source)
        };
        node.labels.clear();

        for data in element.elements().filter(|e| e.local_name() == "data") {
            let key = data.require("key")?;
            match self.keys.role(key, PropertyScope::Node) {
                Some(KeyRole::Graphics(_)) => read_node_graphics(&mut node, data)?,
                Some(KeyRole::Url(_)) => node.url = Some(data.text_content()),
                Some(KeyRole::Description(_)) => node.description = Some(data.text_content()),
                Some(KeyRole::Custom(_, name)) => {
                    node.properties.insert(name.clone(), data.text_content());
                }
                None => node.extensions.push(data.to_fragment()?),
            }
        }
        node.name = match node.labels.first() {
            Some(label) => label.text.clone(),
            None => source.to_string(),
        };

        let is_group = node.is_group();
        self.graph.restore_node(scope, node)?;
        if let Some(nested) = nested.filter(|_| is_group) {
            self.read_scope(nested, Scope::Group(id))?;
        }
        Ok(())
    }

    fn finish_edges(&mut self) -> GraphmlResult<()> {
        for (scope, id, element) in std::mem::take(&mut self.pending) {
            let source = self.ids.node(element.require("source")?)?;
            let target = self.ids.node(element.require("target")?)?;
            let mut edge = Edge::new(id, source, target);
            edge.directed = element
                .get("directed")
                .map(|value| parse_bool("directed", value))
                .transpose()?;

            for data in element.elements().filter(|e| e.local_name() == "data") {
                let key = data.require("key")?;
                match self.keys.role(key, PropertyScope::Edge) {
                    Some(KeyRole::Graphics(_)) => read_edge_graphics(&mut edge, data)?,
                    Some(KeyRole::Url(_)) => edge.url = Some(data.text_content()),
                    Some(KeyRole::Description(_)) => edge.description = Some(data.text_content()),
                    Some(KeyRole::Custom(_, name)) => {
                        edge.properties.insert(name.clone(), data.text_content());
                    }
                    None => edge.extensions.push(data.to_fragment()?),
                }
            }

            let scope = match scope {
                Scope::Group(group)
                    if !(self.graph.is_ancestor(group, source)
                        && self.graph.is_ancestor(group, target)) =>
                {
                    warn!(%id, %group, "edge declared outside a common ancestor, moved to root");
                    Scope::Root
                }
                other => other,
            };
            self.graph.restore_edge(scope, edge)?;
        }
        Ok(())
    }
}

fn read_node_graphics(node: &mut Node, data: &Element) -> GraphmlResult<()> {
    let Some(realizer) = data.elements().next() else {
        return Ok(());
    };
    if realizer.local_name() != "ProxyAutoBoundsNode" {
        return read_realizer(node, realizer);
    }

    let realizers = realizer
        .find("Realizers")
        .ok_or_else(|| GraphmlError::structure("y:ProxyAutoBoundsNode without y:Realizers"))?;
    let all: Vec<&Element> = realizers.elements().collect();
    let active = realizers
        .get("active")
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|index| *index < all.len())
        .unwrap_or(0);
    let primary = all
        .get(active)
        .ok_or_else(|| GraphmlError::structure("empty y:Realizers"))?;

    if !node.is_group() {
        node.kind = NodeKind::Group(GroupState::default());
    }
    read_realizer(node, primary)?;
    let mut extras = Vec::new();
    for (index, other) in all.iter().enumerate() {
        if index != active {
            extras.push(other.to_fragment()?);
        }
    }
    if let Some(state) = node.group_state_mut() {
        state.extra_realizers = extras;
    }
    Ok(())
}

fn read_realizer(node: &mut Node, realizer: &Element) -> GraphmlResult<()> {
    let kind = NodeRealizer::from_element_name(realizer.local_name());
    let is_group = node.is_group();
    let takes_shape = is_group || kind == NodeRealizer::ShapeNode;
    let mut uml = None;

    node.graphics_attributes = realizer.attributes.clone();
    for child in realizer.elements() {
        match child.local_name() {
            "Geometry" => node.style.geometry = read_geometry(child)?,
            "Fill" => node.style.fill = read_fill(child)?,
            "BorderStyle" => node.style.border = read_border(child)?,
            "NodeLabel" => node.labels.push(read_node_label(child)?),
            "Shape" if takes_shape => {
                if let Some(shape) = child.get("type") {
                    node.style.shape = shape.parse()?;
                }
            }
            "UML" if kind == NodeRealizer::UmlClassNode => uml = Some(read_uml(child)),
            "State" if is_group => {
                if let Some(state) = node.group_state_mut() {
                    for (key, value) in &child.attributes {
                        match key.as_str() {
                            "closed" => state.closed = parse_bool("closed", value)?,
                            _ => state.state_attributes.push((key.clone(), value.clone())),
                        }
                    }
                }
            }
            _ => node.graphics_extensions.push(child.to_fragment()?),
        }
    }

    if !is_group {
        node.kind = NodeKind::Shape {
            realizer: kind,
            uml,
        };
    }
    Ok(())
}

fn read_geometry(element: &Element) -> GraphmlResult<Geometry> {
    let number = |key: &'static str| -> GraphmlResult<Option<f64>> {
        Ok(element.get(key).map(|v| parse_number(key, v)).transpose()?)
    };
    Ok(Geometry {
        height: number("height")?,
        width: number("width")?,
        x: number("x")?,
        y: number("y")?,
    })
}

fn read_fill(element: &Element) -> GraphmlResult<Fill> {
    let mut fill = Fill::default();
    for (key, value) in &element.attributes {
        match key.as_str() {
            "color" => fill.color = Color::parse(value)?,
            "transparent" => fill.transparent = parse_bool("transparent", value)?,
            _ => fill.foreign_attributes.push((key.clone(), value.clone())),
        }
    }
    Ok(fill)
}

fn read_border(element: &Element) -> GraphmlResult<Border> {
    let mut border = Border::default();
    for (key, value) in &element.attributes {
        match key.as_str() {
            "color" => border.color = Color::parse(value)?,
            "type" => border.line_type = value.parse()?,
            "width" => border.width = parse_number("border_width", value)?,
            _ => border.foreign_attributes.push((key.clone(), value.clone())),
        }
    }
    Ok(border)
}

fn read_uml(element: &Element) -> UmlData {
    let mut uml = UmlData::default();
    for (key, value) in &element.attributes {
        match key.as_str() {
            "stereotype" => uml.stereotype = value.clone(),
            _ => uml.foreign_attributes.push((key.clone(), value.clone())),
        }
    }
    if let Some(attributes) = element.find("AttributeLabel") {
        uml.attributes = attributes.text_content();
    }
    if let Some(methods) = element.find("MethodLabel") {
        uml.methods = methods.text_content();
    }
    uml
}

/// Attributes shared by node and edge labels.
struct LabelAttributes {
    style: LabelStyle,
    model: Option<String>,
    position: Option<String>,
    placement: Option<String>,
    foreign: ForeignAttributes,
}

fn read_label_attributes(element: &Element) -> GraphmlResult<LabelAttributes> {
    let mut style = LabelStyle {
        width: None,
        height: None,
        ..LabelStyle::default()
    };
    let (mut model, mut position, mut placement) = (None, None, None);
    let (mut has_background, mut has_line) = (None, None);
    let (mut background, mut line) = (None, None);
    let mut foreign = ForeignAttributes::new();

    for (key, value) in &element.attributes {
        match key.as_str() {
            "alignment" => style.alignment = value.parse()?,
            "fontFamily" => style.font_family = value.clone(),
            "fontSize" => style.font_size = parse_integer("font_size", value)?,
            "fontStyle" => style.font_style = value.parse()?,
            "underlinedText" => style.underlined = parse_bool("underlined_text", value)?,
            "textColor" => style.text_color = Color::parse(value)?,
            "iconTextGap" => style.icon_text_gap = parse_integer("icon_text_gap", value)?,
            "horizontalTextPosition" => style.horizontal_text_position = value.parse()?,
            "verticalTextPosition" => style.vertical_text_position = value.parse()?,
            "visible" => style.visible = parse_bool("visible", value)?,
            "width" => style.width = Some(parse_number("label_width", value)?),
            "height" => style.height = Some(parse_number("label_height", value)?),
            "hasBackgroundColor" => has_background = Some(parse_bool("has_background_color", value)?),
            "hasLineColor" => has_line = Some(parse_bool("has_line_color", value)?),
            "backgroundColor" => background = Some(value.as_str()),
            "lineColor" => line = Some(value.as_str()),
            "modelName" => model = Some(value.clone()),
            "modelPosition" => position = Some(value.clone()),
            "preferredPlacement" => placement = Some(value.clone()),
            _ => foreign.push((key.clone(), value.clone())),
        }
    }
    style.background_color = label_color("backgroundColor", has_background, background, &mut foreign)?;
    style.line_color = label_color("lineColor", has_line, line, &mut foreign)?;

    Ok(LabelAttributes {
        style,
        model,
        position,
        placement,
        foreign,
    })
}

/// A color switched off by its `has…` flag is kept as a plain attribute.
fn label_color(
    key: &str,
    enabled: Option<bool>,
    value: Option<&str>,
    foreign: &mut ForeignAttributes,
) -> GraphmlResult<Option<Color>> {
    match (enabled, value) {
        (Some(false), Some(value)) => {
            foreign.push((key.to_string(), value.to_string()));
            Ok(None)
        }
        (_, Some(value)) => Ok(Some(Color::parse(value)?)),
        (_, None) => Ok(None),
    }
}

/// Unknown model names become `custom`; the raw name overrides on write.
fn label_model<M>(raw: Option<String>, fallback: M, custom: M, foreign: &mut ForeignAttributes) -> M
where
    M: core::str::FromStr,
{
    match raw {
        None => fallback,
        Some(name) => name.parse().unwrap_or_else(|_| {
            foreign.push(("modelName".to_string(), name));
            custom
        }),
    }
}

fn label_extensions(element: &Element) -> GraphmlResult<Vec<Fragment>> {
    element.elements().map(Element::to_fragment).collect()
}

fn read_node_label(element: &Element) -> GraphmlResult<NodeLabel> {
    let mut attrs = read_label_attributes(element)?;
    let model = label_model(
        attrs.model,
        NodeLabelModel::Internal,
        NodeLabelModel::Custom,
        &mut attrs.foreign,
    );
    if let Some(placement) = attrs.placement {
        attrs.foreign.push(("preferredPlacement".to_string(), placement));
    }
    Ok(NodeLabel {
        text: element.text_content(),
        style: attrs.style,
        model,
        position: attrs.position,
        foreign_attributes: attrs.foreign,
        extensions: label_extensions(element)?,
    })
}

fn read_edge_label(element: &Element) -> GraphmlResult<EdgeLabel> {
    let mut attrs = read_label_attributes(element)?;
    let model = label_model(
        attrs.model,
        EdgeLabelModel::Centered,
        EdgeLabelModel::Custom,
        &mut attrs.foreign,
    );
    Ok(EdgeLabel {
        text: element.text_content(),
        style: attrs.style,
        model,
        position: attrs.position,
        preferred_placement: attrs.placement,
        foreign_attributes: attrs.foreign,
        extensions: label_extensions(element)?,
    })
}

fn read_edge_graphics(edge: &mut Edge, data: &Element) -> GraphmlResult<()> {
    let Some(realizer) = data.elements().next() else {
        return Ok(());
    };
    edge.realizer = EdgeRealizer::from_element_name(realizer.local_name());
    edge.graphics_attributes = realizer.attributes.clone();

    for child in realizer.elements() {
        match child.local_name() {
            "LineStyle" => {
                if let Some(color) = child.get("color") {
                    edge.style.color = Color::parse(color)?;
                }
                if let Some(line_type) = child.get("type") {
                    edge.style.line_type = line_type.parse()?;
                }
                if let Some(width) = child.get("width") {
                    edge.style.width = parse_number("width", width)?;
                }
            }
            "Arrows" => {
                if let Some(foot) = child.get("source") {
                    edge.style.arrowfoot = foot.parse()?;
                }
                if let Some(head) = child.get("target") {
                    edge.style.arrowhead = head.parse()?;
                }
            }
            "EdgeLabel" => edge.labels.push(read_edge_label(child)?),
            _ => edge.graphics_extensions.push(child.to_fragment()?),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn canonical_ids_are_kept_and_others_follow() {
        let sources = [Some("foo"), Some("n4"), Some("n1"), Some("bar")];
        let ids = assign(&sources, |s| s.parse::<NodeId>().ok()).unwrap();
        let text: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(text, vec!["n5", "n4", "n1", "n6"]);
    }

    #[test]
    fn edges_without_ids_get_fresh_ones() {
        let sources = [None, Some("e3"), None];
        let ids = assign(&sources, |s| s.parse::<EdgeId>().ok()).unwrap();
        let text: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(text, vec!["e4", "e3", "e5"]);
    }

    #[test]
    fn unknown_label_model_keeps_raw_name() {
        let element = xml::parse(
            r#"<y:EdgeLabel modelName="free" modelPosition="anywhere" ratio="0.5">x</y:EdgeLabel>"#,
        )
        .unwrap();
        let label = read_edge_label(&element).unwrap();
        assert_eq!(label.model, EdgeLabelModel::Custom);
        assert_eq!(label.position.as_deref(), Some("anywhere"));
        assert!(label
            .foreign_attributes
            .contains(&("modelName".to_string(), "free".to_string())));
        assert!(label
            .foreign_attributes
            .contains(&("ratio".to_string(), "0.5".to_string())));
    }

    #[test]
    fn disabled_label_color_is_kept_verbatim() {
        let element = xml::parse(
            r##"<y:NodeLabel hasBackgroundColor="false" backgroundColor="#FF0000" hasLineColor="true" lineColor="#00FF00">a</y:NodeLabel>"##,
        )
        .unwrap();
        let label = read_node_label(&element).unwrap();
        assert_eq!(label.style.background_color, None);
        assert_eq!(label.style.line_color.as_ref().map(Color::as_str), Some("#00FF00"));
        assert_eq!(
            label.foreign_attributes,
            vec![("backgroundColor".to_string(), "#FF0000".to_string())]
        );
    }

    #[test]
    fn unsupported_enum_value_names_the_option() {
        let element = xml::parse(r#"<y:BorderStyle type="wavy"/>"#).unwrap();
        let err = read_border(&element).unwrap_err();
        assert!(err.to_string().contains("line_type"), "{err}");
    }
}
