use crate::{
	diff::{Patch, Path},
	logging::{LoggedPath, Sensitive},
	rc_hash_map::{CountSaturatedError, RcHashMap},
	runtime::Patcher,
	vdom::{EventBinding, Message, Node, Payload},
};
use core::cell::RefCell;
use hashbrown::HashMap;
use js_sys::{Function, Reflect};
use std::rc::Rc;
use tracing::{error, info, instrument, level_filters::STATIC_MAX_LEVEL, trace, trace_span, warn, Level};
use wasm_bindgen::{closure::Closure, JsCast, JsValue, UnwrapThrowExt};

type Slots<M> = Rc<RefCell<HashMap<u32, EventBinding<M>>>>;

/// Renders view trees into a container [`web_sys::Element`] and keeps them up to date by applying patch sets.
///
/// The container itself isn't touched except for appending (and possibly replacing) the one root node.
///
/// # Event Handling
///
/// All DOM listeners are bound instances of one shared handler, one per distinct [`EventBinding`],
/// reference-counted across elements and freed after the patch set that removed their last use.
/// When an event fires, the binding's message (see [`Payload`]) is passed to the `sink` given to [`DomPatcher::new`].
///
/// Listeners start throwing errors into JavaScript once the [`DomPatcher`] is dropped.
#[derive(Debug)]
pub struct DomPatcher<M: Message> {
	container: web_sys::Element,
	document: web_sys::Document,
	root: Option<web_sys::Node>,
	listeners: RcHashMap<EventBinding<M>, u16, (u32, Function)>,
	slots: Slots<M>,
	next_slot: u32,
	common_handler: Closure<dyn Fn(JsValue, web_sys::Event)>,
}

impl<M: Message> DomPatcher<M> {
	#[must_use]
	#[instrument(skip(sink))]
	pub fn new(container: web_sys::Element, sink: Rc<dyn Fn(M)>) -> Self {
		let document = container.owner_document().expect_throw("meal-log: No owner document found for container element.");
		let slots = Slots::<M>::default();
		let common_handler = {
			let slots = Rc::clone(&slots);
			Closure::wrap(Box::new(move |slot: JsValue, event: web_sys::Event| {
				let span = trace_span!("common_handler", ?slot, event = %event.type_());
				let _enter = span.enter();

				let binding = match slot.as_f64().and_then(|slot| slots.borrow().get(&(slot as u32)).cloned()) {
					Some(binding) => binding,
					None => return error!("Event fired for an unknown or freed listener slot."),
				};
				let message = match binding.payload {
					Payload::None => binding.message,
					Payload::TargetValue => binding.message.with_value(target_value(&event)),
				};

				let span = trace_span!("sink", message = ?Sensitive(&message));
				let _enter = span.enter();
				sink(message);
			}) as Box<dyn Fn(JsValue, web_sys::Event)>)
		};

		Self {
			container,
			document,
			root: None,
			listeners: RcHashMap::new(),
			slots,
			next_slot: 0,
			common_handler,
		}
	}

	/// The node that was mounted into the container, if any.
	#[must_use]
	pub fn root(&self) -> Option<&web_sys::Node> {
		self.root.as_ref()
	}

	/// The number of distinct event bindings that currently have a DOM listener.
	#[must_use]
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	fn resolve(&self, path: &Path) -> Option<web_sys::Node> {
		let mut node = self.root.clone()?;
		for &index in path.indices() {
			node = node.child_nodes().get(index as u32)?;
		}
		Some(node)
	}

	fn resolve_element(&self, path: &Path) -> Option<web_sys::Element> {
		match self.resolve(path) {
			Some(node) => match node.dyn_into::<web_sys::Element>() {
				Ok(element) => Some(element),
				Err(node) => {
					error!("Expected element at {} but found {:?}.", LoggedPath(path), node);
					None
				}
			},
			None => {
				error!("Expected element at {} beyond end of `web_sys::NodeList`.", LoggedPath(path));
				None
			}
		}
	}

	/// Builds a detached DOM tree for `node`, binding its event listeners.
	#[instrument(skip(self, node))]
	fn create(&mut self, node: &Node<M>) -> Option<web_sys::Node> {
		match node {
			Node::Text(text) => {
				trace!(text = %Sensitive(text.as_str()), "Creating text node.");
				Some(self.document.create_text_node(text).into())
			}

			Node::Element(element) => {
				let span = trace_span!("Creating element", tag = %element.name);
				let _enter = span.enter();

				let dom_element = match self.document.create_element(&element.name) {
					Ok(dom_element) => dom_element,
					Err(error) => {
						error!("Failed to create <{}>: {:?}", element.name, error);
						return None;
					}
				};

				for attribute in &element.attributes {
					if let Err(error) = dom_element.set_attribute(&attribute.name, &attribute.value) {
						error!("Could not add attribute {:?}={:?}: {:?}", attribute.name, Sensitive(&attribute.value), error);
					}
				}
				for property in &element.properties {
					set_property(&dom_element, &property.name, &property.value);
				}
				for binding in &element.event_bindings {
					self.add_event_listener(&dom_element, binding);
				}
				for child in &element.children {
					if let Some(dom_child) = self.create(child) {
						if let Err(error) = dom_element.append_child(&dom_child) {
							error!("Failed to insert child into <{}>: {:?}", element.name, error);
						}
					}
				}

				Some(dom_element.into())
			}
		}
	}

	#[allow(clippy::too_many_lines)]
	fn apply_one(&mut self, patch: Patch<M>) {
		let span = trace_span!("Applying patch", path = %LoggedPath(patch.path()));
		let _enter = span.enter();

		match patch {
			Patch::Replace { path, old, new } => {
				let dom_old = match self.resolve(&path) {
					Some(dom_old) => dom_old,
					None => return error!("Expected node to replace at {} beyond end of `web_sys::NodeList`. Skipping.", LoggedPath(&path)),
				};
				if STATIC_MAX_LEVEL >= Level::WARN {
					if let (Node::Text(expected), Some(found)) = (&old, dom_old.dyn_ref::<web_sys::Text>()) {
						if found.data() != *expected {
							warn!("Unexpected replaced text data: Expected {:?} but found {:?}", Sensitive(expected), Sensitive(&found.data()));
						}
					}
				}

				self.release_listeners(&old);
				let dom_new = match self.create(&new) {
					Some(dom_new) => dom_new,
					None => return,
				};

				let parent: Option<web_sys::Node> = if path.is_root() { Some(self.container.clone().into()) } else { dom_old.parent_node() };
				match parent {
					None => error!("Could not find parent node of node to replace. Ignoring."),
					Some(parent) => match parent.replace_child(&dom_new, &dom_old) {
						Ok(_) => {
							if path.is_root() {
								self.root = Some(dom_new);
							}
						}
						Err(error) => error!("Failed to replace node: {:?}", error),
					},
				}
			}

			Patch::SetText { path, text } => match self.resolve(&path).as_ref().and_then(|node| node.dyn_ref::<web_sys::Text>()) {
				Some(dom_text) => dom_text.set_data(&text),
				None => error!("Expected `web_sys::Text` at {}. Skipping.", LoggedPath(&path)),
			},

			Patch::SetAttribute { path, attribute } => {
				if let Some(element) = self.resolve_element(&path) {
					if let Err(error) = element.set_attribute(&attribute.name, &attribute.value) {
						error!("Could not set attribute {:?}={:?}: {:?}", attribute.name, Sensitive(&attribute.value), error);
					}
				}
			}

			Patch::RemoveAttribute { path, name } => {
				if let Some(element) = self.resolve_element(&path) {
					if let Err(error) = element.remove_attribute(&name) {
						warn!("Could not remove attribute with name {:?}: {:?}", name, error);
					}
				}
			}

			Patch::SetProperty { path, property } => {
				if let Some(element) = self.resolve_element(&path) {
					set_property(&element, &property.name, &property.value);
				}
			}

			Patch::ClearProperty { path, name } => {
				if let Some(element) = self.resolve_element(&path) {
					set_property(&element, &name, "");
				}
			}

			Patch::AddEventBinding { path, binding } => {
				if let Some(element) = self.resolve_element(&path) {
					self.add_event_listener(&element, &binding);
				}
			}

			Patch::RemoveEventBinding { path, binding } => {
				if let Some(element) = self.resolve_element(&path) {
					self.remove_event_listener(&element, &binding);
				}
			}

			Patch::RemoveChildren { path, from, removed } => {
				let parent = match self.resolve(&path) {
					Some(parent) => parent,
					None => return error!("Expected parent at {} beyond end of `web_sys::NodeList`. Skipping removals.", LoggedPath(&path)),
				};
				let child_nodes = parent.child_nodes();
				for i in (from..from + removed.len()).rev() {
					match child_nodes.get(i as u32) {
						Some(child) => {
							if let Err(error) = parent.remove_child(&child) {
								error!("Failed to remove the node: {:?}", error);
							}
						}
						None => error!("Expected to remove child {} beyond end of `web_sys::NodeList`. Skipping.", i),
					}
				}
				for removed in &removed {
					self.release_listeners(removed);
				}
			}

			Patch::AppendChild { path, node } => {
				let parent = match self.resolve(&path) {
					Some(parent) => parent,
					None => return error!("Expected parent at {} beyond end of `web_sys::NodeList`. Skipping insertion.", LoggedPath(&path)),
				};
				if let Some(dom_node) = self.create(&node) {
					if let Err(error) = parent.append_child(&dom_node) {
						error!("Failed to insert node: {:?}", error);
					}
				}
			}
		}
	}

	fn acquire_listener(&mut self, binding: &EventBinding<M>) -> Function {
		let Self {
			listeners,
			slots,
			next_slot,
			common_handler,
			..
		} = self;
		let (_, function) = listeners
			.increment_or_insert_with(binding.clone(), |binding| {
				let slot = *next_slot;
				*next_slot = next_slot.wrapping_add(1);
				slots.borrow_mut().insert(slot, binding.clone());
				trace!(slot, "Created listener.");
				let common_handler: &JsValue = common_handler.as_ref();
				(slot, common_handler.unchecked_ref::<Function>().bind1(&JsValue::UNDEFINED, &JsValue::from(slot)).unchecked_into::<Function>())
			})
			.expect_throw("Too many (more than 65k) active references to the same `EventBinding`");
		function.clone()
	}

	fn release_listener(&mut self, binding: &EventBinding<M>) -> Option<Function> {
		match self.listeners.weak_decrement(binding) {
			Ok(Some((_, function))) => Some(function.clone()),
			Ok(None) => {
				error!("Tried to release event binding that doesn't exist: {:?}", binding.name);
				None
			}
			Err(CountSaturatedError) => {
				error!("Tried to release event binding more often than bound: {:?}", binding.name);
				None
			}
		}
	}

	/// Decrements listener counts for every binding in a removed subtree. The DOM listeners go away with the removed nodes.
	fn release_listeners(&mut self, removed: &Node<M>) {
		removed.for_each_binding(&mut |binding: &EventBinding<M>| {
			self.release_listener(binding);
		});
	}

	#[instrument(skip(self, element))]
	fn add_event_listener(&mut self, element: &web_sys::Element, binding: &EventBinding<M>) {
		let listener = self.acquire_listener(binding);
		if let Err(error) = element.add_event_listener_with_callback(binding.name, &listener) {
			error!("Failed to add event listener {:?}: {:?}", binding.name, error);
		}
	}

	#[instrument(skip(self, element))]
	fn remove_event_listener(&mut self, element: &web_sys::Element, binding: &EventBinding<M>) {
		if let Some(listener) = self.release_listener(binding) {
			if let Err(error) = element.remove_event_listener_with_callback(binding.name, &listener) {
				error!("Failed to remove event listener {:?}: {:?}", binding.name, error);
			}
		}
	}

	fn free_unused_listeners(&mut self) {
		let freed = self.listeners.drain_weak();
		if !freed.is_empty() {
			let mut slots = self.slots.borrow_mut();
			for (_, (slot, _)) in &freed {
				slots.remove(slot);
			}
			trace!("Freed {} event listener(s).", freed.len());
		}
		info!("Event listener count/cached capacity: {}/{}", self.listeners.len(), self.listeners.capacity());
	}
}

impl<M: Message> Patcher<M> for DomPatcher<M> {
	#[instrument(skip(self, tree))]
	fn mount(&mut self, tree: &Node<M>) {
		if self.root.is_some() {
			return error!("Already mounted. Ignoring.");
		}
		let root = match self.create(tree) {
			Some(root) => root,
			None => return error!("Failed to create the root node."),
		};
		match self.container.append_child(&root) {
			Ok(root) => self.root = Some(root),
			Err(error) => error!("Failed to append root node: {:?}", error),
		}
		self.free_unused_listeners();
	}

	#[instrument(skip(self, patches), fields(count = patches.len()))]
	fn apply(&mut self, patches: Vec<Patch<M>>) {
		for patch in patches {
			self.apply_one(patch);
		}
		self.free_unused_listeners();
	}
}

fn set_property(element: &web_sys::Element, name: &str, value: &str) {
	if let Err(error) = Reflect::set(element, &JsValue::from_str(name), &JsValue::from_str(value)) {
		error!("Could not set property {:?}={:?}: {:?}", name, Sensitive(value), error);
	}
}

/// The `value` of the event's target, or empty text if there is none.
fn target_value(event: &web_sys::Event) -> String {
	event
		.target()
		.and_then(|target| Reflect::get(&target, &JsValue::from_str("value")).ok())
		.and_then(|value| value.as_string())
		.unwrap_or_default()
}
