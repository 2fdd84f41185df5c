//! GraphML `<key>` declarations: the fixed set we write, and recognition by
//! meaning when reading.

use std::collections::HashMap;

use yed_core::{PropertyScope, PropertyType};
use yed_graph::{CustomPropertyDef, Fragment, Graph};

use crate::error::GraphmlResult;
use crate::xml::Element;

pub(crate) const NODE_GRAPHICS: &str = "data_node";
pub(crate) const EDGE_GRAPHICS: &str = "data_edge";
pub(crate) const NODE_URL: &str = "url_node";
pub(crate) const NODE_DESCRIPTION: &str = "description_node";
pub(crate) const EDGE_URL: &str = "url_edge";
pub(crate) const EDGE_DESCRIPTION: &str = "description_edge";

fn text_key(id: &str, name: &str, target: &str) -> Element {
    Element::new("key")
        .attr("attr.name", name)
        .attr("attr.type", "string")
        .attr("for", target)
        .attr("id", id)
}

/// Every `<key>` of a written document, in order.
pub(crate) fn declarations(graph: &Graph) -> Vec<Element> {
    let mut keys = vec![
        Element::new("key")
            .attr("for", "node")
            .attr("id", NODE_GRAPHICS)
            .attr("yfiles.type", "nodegraphics"),
        text_key(NODE_URL, "url", "node"),
        text_key(NODE_DESCRIPTION, "description", "node"),
        text_key(EDGE_URL, "url", "edge"),
        text_key(EDGE_DESCRIPTION, "description", "edge"),
    ];
    for def in graph.custom_properties() {
        keys.push(
            Element::new("key")
                .attr("attr.name", def.name.as_str())
                .attr("attr.type", def.kind.as_str())
                .attr("for", def.scope.as_str())
                .attr("id", def.key_id())
                .child(Element::new("default").text(&def.default)),
        );
    }
    keys
}

pub(crate) fn edge_graphics_declaration() -> Element {
    Element::new("key")
        .attr("for", "edge")
        .attr("id", EDGE_GRAPHICS)
        .attr("yfiles.type", "edgegraphics")
}

/// What a key id means to us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum KeyRole {
    Graphics(PropertyScope),
    Url(PropertyScope),
    Description(PropertyScope),
    Custom(PropertyScope, String),
}

/// Key declarations of a parsed document.
#[derive(Debug, Default)]
pub(crate) struct KeyMap {
    roles: HashMap<String, KeyRole>,
    pub custom: Vec<CustomPropertyDef>,
    pub foreign: Vec<Fragment>,
}

impl KeyMap {
    pub fn from_root(root: &Element) -> GraphmlResult<Self> {
        let mut keys = Self::default();
        for key in root.elements().filter(|e| e.local_name() == "key") {
            match classify(key) {
                Some((id, role)) => {
                    if let KeyRole::Custom(scope, name) = &role {
                        let kind: PropertyType = key.get("attr.type").unwrap_or("string").parse()?;
                        let default = key
                            .find("default")
                            .map(Element::text_content)
                            .unwrap_or_else(|| kind.zero_value().to_string());
                        keys.custom.push(CustomPropertyDef {
                            scope: *scope,
                            name: name.clone(),
                            kind,
                            default,
                        });
                    }
                    keys.roles.insert(id, role);
                }
                None => keys.foreign.push(key.to_fragment()?),
            }
        }
        Ok(keys)
    }

    /// Role of a `<data key>` reference inside an entity of `scope`.
    pub fn role(&self, key: &str, scope: PropertyScope) -> Option<&KeyRole> {
        self.roles.get(key).filter(|role| match role {
            KeyRole::Graphics(s) | KeyRole::Url(s) | KeyRole::Description(s) => *s == scope,
            KeyRole::Custom(s, _) => *s == scope,
        })
    }
}

fn classify(key: &Element) -> Option<(String, KeyRole)> {
    let id = key.get("id")?.to_string();
    let scope: PropertyScope = key.get("for")?.parse().ok()?;
    if let Some(kind) = key.get("yfiles.type") {
        return match (kind, scope) {
            ("nodegraphics", PropertyScope::Node) | ("edgegraphics", PropertyScope::Edge) => {
                Some((id, KeyRole::Graphics(scope)))
            }
            _ => None,
        };
    }
    let name = key.get("attr.name")?;
    match name {
        "url" => Some((id, KeyRole::Url(scope))),
        "description" => Some((id, KeyRole::Description(scope))),
        _ => {
            // only types we can check become custom properties
            key.get("attr.type").unwrap_or("string").parse::<PropertyType>().ok()?;
            Some((id, KeyRole::Custom(scope, name.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn yed_keys_are_recognized_by_meaning() {
        let root = xml::parse(
            r#"<graphml>
              <key for="port" id="d0" yfiles.type="portgraphics"/>
              <key attr.name="Description" attr.type="string" for="graph" id="d3"/>
              <key attr.name="url" attr.type="string" for="node" id="d4"/>
              <key attr.name="description" attr.type="string" for="node" id="d5"/>
              <key for="node" id="d6" yfiles.type="nodegraphics"/>
              <key attr.name="weight" attr.type="double" for="edge" id="d7"><default>1.5</default></key>
              <key attr.name="tags" attr.type="long" for="node" id="d8"/>
              <key for="edge" id="d10" yfiles.type="edgegraphics"/>
            </graphml>"#,
        )
        .unwrap();
        let keys = KeyMap::from_root(&root).unwrap();

        assert_eq!(
            keys.role("d6", PropertyScope::Node),
            Some(&KeyRole::Graphics(PropertyScope::Node))
        );
        assert_eq!(keys.role("d6", PropertyScope::Edge), None);
        assert_eq!(keys.role("d4", PropertyScope::Node), Some(&KeyRole::Url(PropertyScope::Node)));
        assert!(matches!(
            keys.role("d7", PropertyScope::Edge),
            Some(KeyRole::Custom(PropertyScope::Edge, name)) if name == "weight"
        ));
        assert_eq!(keys.custom.len(), 1);
        assert_eq!(keys.custom[0].default, "1.5");
        // port graphics, graph description, long-typed attribute
        assert_eq!(keys.foreign.len(), 3);
    }

    #[test]
    fn written_keys_follow_fixed_order() {
        let mut graph = Graph::new();
        graph
            .define_custom_property(PropertyScope::Node, "cost", PropertyType::Int, "0")
            .unwrap();
        let ids: Vec<_> = declarations(&graph)
            .iter()
            .map(|key| key.get("id").unwrap().to_string())
            .collect();
        assert_eq!(
            ids,
            vec![
                "data_node",
                "url_node",
                "description_node",
                "url_edge",
                "description_edge",
                "node_cost"
            ]
        );
    }
}
