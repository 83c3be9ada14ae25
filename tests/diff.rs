use meal_log::{
	diff::{diff, Patch, Path, DEFAULT_DEPTH_LIMIT},
	meals::{update, view, Intent, Model},
	vdom::{html, Attribute, EventBinding, Node, Payload},
};

fn logged(names: &[&str]) -> Model {
	names.iter().fold(Model::new(), |model, name| update(&Intent::Add, &model.with_drafts(*name, "100")))
}

#[test]
fn identical_trees_need_no_patches() {
	let model = logged(&["Eggs", "Toast"]);
	assert!(diff(&view(&model), &view(&model), DEFAULT_DEPTH_LIMIT).is_empty());
}

#[test]
fn typing_sets_only_the_property() {
	let model = Model::new();
	let typed = update(&Intent::UpdateMeal("Oat".to_string()), &model);
	let patches = diff(&view(&model), &view(&typed), DEFAULT_DEPTH_LIMIT);
	assert_eq!(
		patches,
		[Patch::SetProperty {
			path: vec![0, 0].into(),
			property: Attribute {
				name: "value".into(),
				value: "Oat".to_string(),
			},
		}]
	);
}

#[test]
fn adding_appends_a_row_and_updates_total() {
	let model = Model::new().with_drafts("Eggs", "200");
	let added = update(&Intent::Add, &model);
	let patches = diff(&view(&model), &view(&added), DEFAULT_DEPTH_LIMIT);

	assert!(patches.contains(&Patch::SetProperty {
		path: vec![0, 0].into(),
		property: Attribute { name: "value".into(), value: String::new() },
	}));
	assert!(patches.contains(&Patch::SetText {
		path: vec![3, 0].into(),
		text: "Total: 200 calories".to_string(),
	}));
	let appended: Vec<_> = patches
		.iter()
		.filter_map(|patch| match patch {
			Patch::AppendChild { path, node } => Some((path.clone(), node.clone())),
			_ => None,
		})
		.collect();
	assert_eq!(appended.len(), 1);
	assert_eq!(appended[0].0, Path::from(vec![2, 1]));
	assert_eq!(Node::Element(html::tbody().children(Some(appended[0].1.clone()))), match &view(&added) {
		Node::Element(root) => match &root.children[2] {
			Node::Element(table) => table.children[1].clone(),
			Node::Text(_) => unreachable!(),
		},
		Node::Text(_) => unreachable!(),
	});
}

#[test]
fn deleting_first_row_keeps_row_bindings() {
	let model = logged(&["Eggs", "Toast", "Soup"]);
	let deleted = update(&Intent::Delete(0), &model);
	let patches = diff(&view(&model), &view(&deleted), DEFAULT_DEPTH_LIMIT);

	// Rows 0 and 1 take over the following rows' content; row 2 is removed.
	assert!(patches.contains(&Patch::SetText { path: vec![2, 1, 0, 0, 0].into(), text: "Toast".to_string() }));
	assert!(patches.contains(&Patch::SetText { path: vec![2, 1, 1, 0, 0].into(), text: "Soup".to_string() }));

	// Each row keeps the delete binding for its own position, so only the surplus row's binding goes away.
	assert!(!patches.iter().any(|patch| matches!(patch, Patch::AddEventBinding { .. } | Patch::RemoveEventBinding { .. })));
	let click = EventBinding { name: "click", message: Intent::Delete(2), payload: Payload::None };
	let mut released: Vec<EventBinding<Intent>> = Vec::new();
	for patch in &patches {
		if let Patch::RemoveChildren { removed, .. } = patch {
			for node in removed {
				node.for_each_binding(&mut |binding: &EventBinding<Intent>| released.push(binding.clone()));
			}
		}
	}
	assert_eq!(released, [click]);

	let removals: Vec<_> = patches
		.iter()
		.filter_map(|patch| match patch {
			Patch::RemoveChildren { path, from, removed } => Some((path.clone(), *from, removed.len())),
			_ => None,
		})
		.collect();
	assert_eq!(removals, [(Path::from(vec![2, 1]), 2, 1)]);
	assert!(!patches.iter().any(|patch| matches!(patch, Patch::AppendChild { .. } | Patch::Replace { .. })));
}

#[test]
fn removals_follow_child_updates() {
	let model = logged(&["Eggs", "Toast"]);
	let deleted = update(&Intent::Delete(0), &model);
	let patches = diff(&view(&model), &view(&deleted), DEFAULT_DEPTH_LIMIT);

	let removal = patches.iter().position(|patch| matches!(patch, Patch::RemoveChildren { .. })).unwrap();
	assert!(patches[..removal].iter().all(|patch| patch.path().indices().len() > 2 || patch.path().indices() == [3, 0]));
}

#[test]
fn attributes() {
	let a: Node<Intent> = html::div().class("a").attribute("title", "x").attribute("id", "one").into();
	let b: Node<Intent> = html::div().class("b").attribute("id", "one").attribute("lang", "en").into();
	let patches = diff(&a, &b, DEFAULT_DEPTH_LIMIT);
	assert_eq!(
		patches,
		[
			Patch::RemoveAttribute { path: Path::root(), name: "title".to_string() },
			Patch::SetAttribute {
				path: Path::root(),
				attribute: Attribute { name: "class".into(), value: "b".to_string() },
			},
			Patch::SetAttribute {
				path: Path::root(),
				attribute: Attribute { name: "lang".into(), value: "en".to_string() },
			},
		]
	);
}

#[test]
fn dropped_property_is_cleared() {
	let a: Node<Intent> = html::input().property("value", "x").into();
	let b: Node<Intent> = html::input().into();
	assert_eq!(diff(&a, &b, DEFAULT_DEPTH_LIMIT), [Patch::ClearProperty { path: Path::root(), name: "value".to_string() }]);
}

#[test]
fn mismatching_nodes_are_replaced() {
	let a: Node<Intent> = html::div().child(html::p().text("one")).into();
	let b: Node<Intent> = html::div().child(html::button().text("one")).into();
	assert_eq!(
		diff(&a, &b, DEFAULT_DEPTH_LIMIT),
		[Patch::Replace {
			path: vec![0].into(),
			old: html::p().text("one").into(),
			new: html::button().text("one").into(),
		}]
	);

	let text: Node<Intent> = html::div().text("one").into();
	let element: Node<Intent> = html::div().child(html::p()).into();
	assert!(matches!(diff(&text, &element, DEFAULT_DEPTH_LIMIT).as_slice(), [Patch::Replace { .. }]));
}

#[test]
fn depth_limit_replaces_deep_subtrees() {
	let a: Node<Intent> = html::div().child(html::div().child(html::p().text("deep"))).into();
	let b: Node<Intent> = html::div().child(html::div().child(html::p().text("deeper"))).into();

	assert_eq!(diff(&a, &b, DEFAULT_DEPTH_LIMIT), [Patch::SetText { path: vec![0, 0, 0].into(), text: "deeper".to_string() }]);
	assert_eq!(
		diff(&a, &b, 2),
		[Patch::Replace {
			path: vec![0, 0].into(),
			old: html::p().text("deep").into(),
			new: html::p().text("deeper").into(),
		}]
	);
	assert!(diff(&a, &a, 1).is_empty());
}

#[test]
fn path_display() {
	assert_eq!(Path::root().to_string(), "/");
	assert_eq!(Path::from(vec![2, 1, 0]).to_string(), "/2/1/0");
	assert_eq!(Path::root().child(3).indices(), [3]);
}
