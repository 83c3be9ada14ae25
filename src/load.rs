//! Reads view trees back out of a live DOM.
//!
//! Only tags, attributes and text survive the round trip (compare against [`Node::structure`]):
//! properties and event listeners aren't observable through the DOM.

use crate::vdom::{Attribute, Element, Node};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Attr, NamedNodeMap, NodeList, Text};

#[must_use]
pub fn load_child_nodes<M>(child_nodes: &NodeList) -> Vec<Node<M>> {
	(0..child_nodes.length())
		.filter_map(|i| child_nodes.item(i))
		.filter_map(|child| {
			if let Some(element) = child.dyn_ref::<web_sys::Element>() {
				Some(Node::Element(load_element(element)))
			} else if let Some(text) = child.dyn_ref::<Text>() {
				Some(Node::Text(text.data()))
			} else {
				warn!("Skipping unrecognised child node: {:?}", child);
				None
			}
		})
		.collect()
}

#[must_use]
pub fn load_element<M>(element: &web_sys::Element) -> Element<M> {
	Element {
		name: element.local_name().into(),
		attributes: load_attributes(&element.attributes()),
		properties: Vec::new(),
		event_bindings: Vec::new(),
		children: load_child_nodes(&element.child_nodes()),
	}
}

#[must_use]
pub fn load_attributes(attributes: &NamedNodeMap) -> Vec<Attribute> {
	(0..attributes.length()).filter_map(|i| attributes.item(i)).map(|attribute| load_attribute(&attribute)).collect()
}

#[must_use]
pub fn load_attribute(attribute: &Attr) -> Attribute {
	Attribute {
		name: attribute.local_name().into(),
		value: attribute.value(),
	}
}
