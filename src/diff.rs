use crate::{
	logging::LoggedPath,
	vdom::{Attribute, Element, EventBinding, Message, Node},
};
use core::fmt::{self, Display, Formatter};
use hashbrown::{HashMap, HashSet};
use tracing::{error, instrument, trace, trace_span};

/// Recursion bound for [`diff`] unless configured otherwise.
pub const DEFAULT_DEPTH_LIMIT: usize = 64;

/// Child indices leading from the root node to a node, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<usize>);
impl Path {
	#[must_use]
	pub fn root() -> Self {
		Self(Vec::new())
	}

	#[must_use]
	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}

	#[must_use]
	pub fn indices(&self) -> &[usize] {
		&self.0
	}

	/// Returns the path of this node's `index`th child.
	#[must_use]
	pub fn child(&self, index: usize) -> Self {
		let mut path = self.clone();
		path.0.push(index);
		path
	}
}
impl Display for Path {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			return f.write_str("/");
		}
		for index in &self.0 {
			write!(f, "/{}", index)?;
		}
		Ok(())
	}
}
impl From<Vec<usize>> for Path {
	fn from(indices: Vec<usize>) -> Self {
		Self(indices)
	}
}

/// One DOM mutation.
///
/// A patch set is meant to be applied in order. Paths refer to the DOM as it is after all previous patches in the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<M> {
	/// Replaces the node at `path` wholesale.
	Replace { path: Path, old: Node<M>, new: Node<M> },
	SetText { path: Path, text: String },
	SetAttribute { path: Path, attribute: Attribute },
	RemoveAttribute { path: Path, name: String },
	SetProperty { path: Path, property: Attribute },
	/// Resets a property that the new tree no longer sets to the empty string.
	ClearProperty { path: Path, name: String },
	AddEventBinding { path: Path, binding: EventBinding<M> },
	RemoveEventBinding { path: Path, binding: EventBinding<M> },
	/// Removes the children of the element at `path` starting at index `from`.
	RemoveChildren { path: Path, from: usize, removed: Vec<Node<M>> },
	AppendChild { path: Path, node: Node<M> },
}

impl<M> Patch<M> {
	#[must_use]
	pub fn path(&self) -> &Path {
		match self {
			Patch::Replace { path, .. }
			| Patch::SetText { path, .. }
			| Patch::SetAttribute { path, .. }
			| Patch::RemoveAttribute { path, .. }
			| Patch::SetProperty { path, .. }
			| Patch::ClearProperty { path, .. }
			| Patch::AddEventBinding { path, .. }
			| Patch::RemoveEventBinding { path, .. }
			| Patch::RemoveChildren { path, .. }
			| Patch::AppendChild { path, .. } => path,
		}
	}
}

/// Computes the patch set that turns a DOM rendered from `vdom_a` into one matching `vdom_b`.
///
/// This is total and deterministic. Subtrees deeper than `depth_limit` are replaced instead of diffed.
#[instrument(skip(vdom_a, vdom_b))]
pub fn diff<M: Message>(vdom_a: &Node<M>, vdom_b: &Node<M>, depth_limit: usize) -> Vec<Patch<M>> {
	let mut patches = Vec::new();
	diff_node(vdom_a, vdom_b, &Path::root(), &mut patches, depth_limit);
	trace!("Diff produced {} patch(es).", patches.len());
	patches
}

fn diff_node<M: Message>(vdom_a: &Node<M>, vdom_b: &Node<M>, path: &Path, patches: &mut Vec<Patch<M>>, depth_limit: usize) {
	if depth_limit == 0 {
		error!("Depth limit reached at {}; Replacing the subtree.", LoggedPath(path));
		if vdom_a != vdom_b {
			patches.push(Patch::Replace {
				path: path.clone(),
				old: vdom_a.clone(),
				new: vdom_b.clone(),
			});
		}
		return;
	}

	match (vdom_a, vdom_b) {
		(Node::Text(t_1), Node::Text(t_2)) => {
			if t_1 != t_2 {
				patches.push(Patch::SetText { path: path.clone(), text: t_2.clone() });
			}
		}

		(Node::Element(e_1), Node::Element(e_2)) if e_1.name == e_2.name => {
			let span = trace_span!("Diffing element", tag = %e_1.name, path = %LoggedPath(path));
			let _enter = span.enter();
			diff_element(e_1, e_2, path, patches, depth_limit);
		}

		// Mismatching nodes: Destroy and rebuild.
		(n_1, n_2) => {
			trace!("Replacing mismatching node at {}.", LoggedPath(path));
			patches.push(Patch::Replace {
				path: path.clone(),
				old: n_1.clone(),
				new: n_2.clone(),
			});
		}
	}
}

#[allow(clippy::similar_names)]
fn diff_element<M: Message>(e_1: &Element<M>, e_2: &Element<M>, path: &Path, patches: &mut Vec<Patch<M>>, depth_limit: usize) {
	let (removed, changed) = diff_attribute_list(&e_1.attributes, &e_2.attributes);
	patches.extend(removed.into_iter().map(|name| Patch::RemoveAttribute { path: path.clone(), name }));
	patches.extend(changed.into_iter().map(|attribute| Patch::SetAttribute { path: path.clone(), attribute }));

	let (cleared, changed) = diff_attribute_list(&e_1.properties, &e_2.properties);
	patches.extend(cleared.into_iter().map(|name| Patch::ClearProperty { path: path.clone(), name }));
	patches.extend(changed.into_iter().map(|property| Patch::SetProperty { path: path.clone(), property }));

	let mut eb_1 = e_1.event_bindings.as_slice();
	let mut eb_2 = e_2.event_bindings.as_slice();
	while !eb_1.is_empty() && eb_1.first() == eb_2.first() {
		eb_1 = &eb_1[1..];
		eb_2 = &eb_2[1..];
	}
	while !eb_1.is_empty() && eb_1.last() == eb_2.last() {
		eb_1 = &eb_1[..eb_1.len() - 1];
		eb_2 = &eb_2[..eb_2.len() - 1];
	}
	if !eb_1.is_empty() || !eb_2.is_empty() {
		let persisting: HashSet<&EventBinding<M>> = eb_1.iter().filter(|prior| eb_2.contains(prior)).collect();
		for prior in eb_1.iter().filter(|prior| !persisting.contains(prior)) {
			patches.push(Patch::RemoveEventBinding {
				path: path.clone(),
				binding: prior.clone(),
			});
		}
		for added in eb_2.iter().filter(|added| !persisting.contains(added)) {
			patches.push(Patch::AddEventBinding {
				path: path.clone(),
				binding: added.clone(),
			});
		}
	}

	let c_1 = &e_1.children;
	let c_2 = &e_2.children;
	let common = c_1.len().min(c_2.len());
	for (i, (child_1, child_2)) in c_1.iter().zip(c_2).enumerate() {
		diff_node(child_1, child_2, &path.child(i), patches, depth_limit - 1);
	}
	if c_1.len() > common {
		patches.push(Patch::RemoveChildren {
			path: path.clone(),
			from: common,
			removed: c_1[common..].to_vec(),
		});
	}
	for added in &c_2[common..] {
		patches.push(Patch::AppendChild {
			path: path.clone(),
			node: added.clone(),
		});
	}
}

/// Returns the names that disappeared and the entries that are new or changed, in `list_b` order.
fn diff_attribute_list(mut list_a: &[Attribute], mut list_b: &[Attribute]) -> (Vec<String>, Vec<Attribute>) {
	while !list_a.is_empty() && list_a.first() == list_b.first() {
		list_a = &list_a[1..];
		list_b = &list_b[1..];
	}
	while !list_a.is_empty() && list_a.last() == list_b.last() {
		list_a = &list_a[..list_a.len() - 1];
		list_b = &list_b[..list_b.len() - 1];
	}
	if list_a.is_empty() && list_b.is_empty() {
		return (Vec::new(), Vec::new());
	}

	let prior: HashMap<&str, &str> = list_a.iter().map(|a| (&*a.name, a.value.as_str())).collect();
	let next: HashSet<&str> = list_b.iter().map(|b| &*b.name).collect();

	let removed = list_a.iter().filter(|a| !next.contains(&*a.name)).map(|a| a.name.to_string()).collect();
	let changed = list_b
		.iter()
		.filter(|b| prior.get(&*b.name) != Some(&b.value.as_str()))
		.cloned()
		.collect();
	(removed, changed)
}
