//! Owned, data-only view trees.
//!
//! A [`Node`] tree is rebuilt in full from the model on every update and then reconciled against the previous one by [`diff`](`crate::diff::diff`).
//! Event handlers are plain data ([`EventBinding`]): the message to dispatch is stored in the tree itself,
//! so two trees built from equal models compare equal.

use core::{fmt::Debug, hash::Hash};
use std::borrow::Cow;

/// A message type that can be carried by [`EventBinding`]s.
pub trait Message: Clone + Debug + Eq + Hash + 'static {
	/// Fills in the text payload of a [`Payload::TargetValue`] binding.
	///
	/// Messages without a text slot are returned unchanged.
	#[must_use]
	fn with_value(self, _value: String) -> Self {
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<M> {
	Element(Element<M>),
	Text(String),
}

/// An element node.
///
/// [`attributes`](`Element::attributes`) are reflected into the DOM's attribute list,
/// while [`properties`](`Element::properties`) are assigned as script properties (like an `<input>`'s live `value`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<M> {
	pub name: Cow<'static, str>,
	pub attributes: Vec<Attribute>,
	pub properties: Vec<Attribute>,
	pub event_bindings: Vec<EventBinding<M>>,
	pub children: Vec<Node<M>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
	pub name: Cow<'static, str>,
	pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventBinding<M> {
	/// The DOM event type, i.e. `"click"` or `"input"`.
	pub name: &'static str,
	pub message: M,
	pub payload: Payload,
}

/// What the firing event contributes to an [`EventBinding`]'s message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Payload {
	/// The message is dispatched as-is.
	None,
	/// The event target's current `value` is passed to [`Message::with_value`].
	TargetValue,
}

impl<M> Element<M> {
	#[must_use]
	pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
		Self {
			name: name.into(),
			attributes: Vec::new(),
			properties: Vec::new(),
			event_bindings: Vec::new(),
			children: Vec::new(),
		}
	}

	#[must_use]
	pub fn attribute(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
		self.attributes.push(Attribute { name: name.into(), value: value.into() });
		self
	}

	#[must_use]
	pub fn class(self, class: impl Into<String>) -> Self {
		self.attribute("class", class)
	}

	#[must_use]
	pub fn property(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
		self.properties.push(Attribute { name: name.into(), value: value.into() });
		self
	}

	/// Dispatches `message` whenever `event` fires on this element.
	#[must_use]
	pub fn on(mut self, event: &'static str, message: M) -> Self {
		self.event_bindings.push(EventBinding { name: event, message, payload: Payload::None });
		self
	}

	/// Dispatches `message`, filled in with the element's current value, on each `input` event.
	#[must_use]
	pub fn on_input(mut self, message: M) -> Self {
		self.event_bindings.push(EventBinding {
			name: "input",
			message,
			payload: Payload::TargetValue,
		});
		self
	}

	#[must_use]
	pub fn child(mut self, child: impl Into<Node<M>>) -> Self {
		self.children.push(child.into());
		self
	}

	#[must_use]
	pub fn children(mut self, children: impl IntoIterator<Item = Node<M>>) -> Self {
		self.children.extend(children);
		self
	}

	#[must_use]
	pub fn text(self, text: impl Into<String>) -> Self {
		self.child(Node::Text(text.into()))
	}
}

impl<M> From<Element<M>> for Node<M> {
	fn from(element: Element<M>) -> Self {
		Node::Element(element)
	}
}

impl<M: Clone> Node<M> {
	/// Copies the tree's tags, attributes and text while dropping properties and event bindings.
	///
	/// This is exactly the part of a tree that [`load`](`crate::load`) can recover from a live DOM.
	#[must_use]
	pub fn structure(&self) -> Self {
		match self {
			Node::Text(text) => Node::Text(text.clone()),
			Node::Element(element) => Node::Element(Element {
				name: element.name.clone(),
				attributes: element.attributes.clone(),
				properties: Vec::new(),
				event_bindings: Vec::new(),
				children: element.children.iter().map(Node::structure).collect(),
			}),
		}
	}
}

impl<M> Node<M> {
	/// Calls `f` with each event binding in this subtree, in document order.
	pub fn for_each_binding(&self, f: &mut impl FnMut(&EventBinding<M>)) {
		if let Node::Element(element) = self {
			element.event_bindings.iter().for_each(&mut *f);
			for child in &element.children {
				child.for_each_binding(f);
			}
		}
	}
}

macro_rules! tags {
	($($name:ident),*$(,)?) => {$(
		#[must_use]
		pub fn $name<M>() -> Element<M> {
			Element::new(stringify!($name))
		}
	)*};
}

/// Shorthand constructors for the HTML elements used by views.
pub mod html {
	use super::Element;

	tags![button, div, img, input, p, table, tbody, td, th, thead, tr];
}
