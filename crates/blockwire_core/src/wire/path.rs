use crate::wire::value::{Object, Value};

/// Root-relative field names locating a value inside nested objects.
pub type Path = Vec<String>;

/// Render a path as dotted text for diagnostics.
pub fn render_path(path: &[String]) -> String {
	path.join(".")
}

/// Return `base` extended with one trailing field name.
pub fn child_path(base: &[String], name: &str) -> Path {
	let mut out = Vec::with_capacity(base.len() + 1);
	out.extend_from_slice(base);
	out.push(name.to_owned());
	out
}

/// Resolve `path` against `root`; the empty path yields `root` itself.
///
/// Stepping through anything other than an object, or through a missing
/// field, yields `None`.
pub fn lookup<'a>(root: &'a Value, path: &[String]) -> Option<&'a Value> {
	path.iter().try_fold(root, |current, name| current.get(name))
}

/// Store `value` at `path` under `root`.
///
/// The empty path replaces `root`. Every intermediate step that is missing,
/// null, or not an object is replaced by a fresh empty object before
/// descending, so writes always succeed.
pub fn assign(root: &mut Value, path: &[String], value: Value) {
	let Some((last, parents)) = path.split_last() else {
		*root = value;
		return;
	};

	let mut current = ensure_object(root);
	for name in parents {
		let slot = current.entry(name.as_str().into()).or_insert(Value::Null);
		current = ensure_object(slot);
	}
	current.insert(last.as_str().into(), value);
}

fn ensure_object(slot: &mut Value) -> &mut Object {
	if !matches!(slot, Value::Object(_)) {
		*slot = Value::object();
	}
	match slot {
		Value::Object(fields) => fields,
		_ => unreachable!("slot was just replaced with an object"),
	}
}
