//! The render loop: model → view tree → diff → patch, one intent at a time.

use crate::{
	diff::{diff, Patch, DEFAULT_DEPTH_LIMIT},
	logging::Sensitive,
	patch::DomPatcher,
	vdom::{Message, Node},
};
use core::{cell::RefCell, fmt::Debug};
use std::rc::{Rc, Weak};
use tracing::{debug, error, instrument, trace_span, warn};

/// An application driven by a [`Runtime`].
pub trait Program: 'static {
	type Model: Debug;
	type Message: Message;

	fn init() -> Self::Model;

	/// Must be pure.
	fn update(message: &Self::Message, model: &Self::Model) -> Self::Model;

	/// Must be pure and depend on nothing but `model`, since only the difference to the previous tree reaches the display.
	fn view(model: &Self::Model) -> Node<Self::Message>;
}

/// A live display that view trees are rendered into.
pub trait Patcher<M> {
	/// Renders `tree` for the first time.
	fn mount(&mut self, tree: &Node<M>);

	/// Applies a patch set computed against the previously mounted or patched tree.
	fn apply(&mut self, patches: Vec<Patch<M>>);
}

/// Owns the current model and rendered tree of a [`Program`] and mediates all messages sent to it.
///
/// # Re-entrancy
///
/// [`Runtime::dispatch`] runs to completion before the next message is processed.
/// Messages sent through [`dispatch_to`] while a dispatch is in progress are logged and dropped.
pub struct Runtime<P: Program, D> {
	model: P::Model,
	tree: Node<P::Message>,
	patcher: D,
	depth_limit: usize,
}

pub type DomRuntime<P> = Runtime<P, DomPatcher<<P as Program>::Message>>;

impl<P: Program, D: Patcher<P::Message>> Runtime<P, D> {
	/// Renders `model` and mounts the result into `patcher`.
	#[must_use]
	pub fn new(model: P::Model, mut patcher: D) -> Self {
		let tree = P::view(&model);
		patcher.mount(&tree);
		Self {
			model,
			tree,
			patcher,
			depth_limit: DEFAULT_DEPTH_LIMIT,
		}
	}

	/// Sets the view tree depth beyond which subtrees are replaced instead of diffed.
	#[must_use]
	pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
		self.depth_limit = depth_limit;
		self
	}

	#[instrument(skip(self, message), fields(message = ?Sensitive(&message)))]
	pub fn dispatch(&mut self, message: P::Message) {
		let model = P::update(&message, &self.model);
		let tree = {
			let span = trace_span!("view");
			let _enter = span.enter();
			P::view(&model)
		};
		let patches = diff(&self.tree, &tree, self.depth_limit);
		debug!("Applying {} patch(es).", patches.len());
		self.patcher.apply(patches);
		self.model = model;
		self.tree = tree;
	}

	#[must_use]
	pub fn model(&self) -> &P::Model {
		&self.model
	}

	#[must_use]
	pub fn tree(&self) -> &Node<P::Message> {
		&self.tree
	}

	#[must_use]
	pub fn patcher(&self) -> &D {
		&self.patcher
	}
}

impl<P: Program, D: Debug> Debug for Runtime<P, D> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Runtime")
			.field("model", &self.model)
			.field("tree", &self.tree)
			.field("patcher", &self.patcher)
			.field("depth_limit", &self.depth_limit)
			.finish()
	}
}

/// Renders [`Program::init`] into a new child of `container` and wires event bindings back into the returned runtime.
///
/// The runtime is held only weakly by its event handlers. Keep the returned [`Rc`] alive for as long as the display should respond.
#[must_use]
pub fn mount<P: Program>(container: web_sys::Element) -> Rc<RefCell<DomRuntime<P>>> {
	Rc::new_cyclic(|this: &Weak<RefCell<DomRuntime<P>>>| {
		let this = this.clone();
		let sink: Rc<dyn Fn(P::Message)> = Rc::new(move |message: P::Message| dispatch_to(&this, message));
		RefCell::new(Runtime::new(P::init(), DomPatcher::new(container, sink)))
	})
}

/// Dispatches `message` into `runtime` unless it is gone or already dispatching.
pub fn dispatch_to<P: Program, D: Patcher<P::Message>>(runtime: &Weak<RefCell<Runtime<P, D>>>, message: P::Message) {
	let runtime = match runtime.upgrade() {
		Some(runtime) => runtime,
		None => return warn!(message = ?Sensitive(&message), "Runtime was dropped. Ignoring message."),
	};
	match runtime.try_borrow_mut() {
		Ok(mut runtime) => runtime.dispatch(message),
		Err(_) => error!(message = ?Sensitive(&message), "Re-entrant dispatch is not supported. Dropping message."),
	};
}

/// Reads the current model of `runtime` unless a dispatch is in progress.
pub fn inspect<P: Program, D, R>(runtime: &RefCell<Runtime<P, D>>, read: impl FnOnce(&P::Model) -> R) -> Option<R> {
	match runtime.try_borrow() {
		Ok(runtime) => Some(read(&runtime.model)),
		Err(_) => {
			error!("Can't read the model while a dispatch is in progress.");
			None
		}
	}
}
