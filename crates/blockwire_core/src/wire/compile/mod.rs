use tracing::debug;

use crate::wire::path::{child_path, render_path};
use crate::wire::schema::{Effect, LiteralValue, NumberCheck, Schema, is_bytes_refinement};
use crate::wire::value::is_integral;
use crate::wire::{
	ArrayBlock, Block, DiscriminatorBlock, ElementKind, Literal, PRESENCE_ABSENT, PRESENCE_NULL, PRESENCE_VALUE, PrimitiveBlock, PrimitiveKind, Result,
	WireError,
};

/// Compile a type description into a flattened block program.
pub fn compile_schema(schema: &Schema) -> Result<Vec<Block>> {
	let mut blocks = Vec::new();
	compile_into(schema, &mut blocks, &[])?;
	debug!(blocks = blocks.len(), "compiled schema");
	Ok(blocks)
}

fn compile_into(schema: &Schema, blocks: &mut Vec<Block>, path: &[String]) -> Result<()> {
	match schema {
		Schema::Object(fields) => {
			for (name, field) in fields {
				compile_into(field, blocks, &child_path(path, name))?;
			}
		}
		Schema::DiscriminatedUnion { discriminator, options } => {
			let block = compile_union(discriminator, options, path)?;
			// Unions lead everything already accumulated in this frame.
			blocks.insert(0, Block::Discriminator(block));
		}
		Schema::String | Schema::Enum(_) => blocks.push(primitive(PrimitiveKind::String, path)),
		Schema::Boolean => blocks.push(primitive(PrimitiveKind::Boolean, path)),
		Schema::Date => blocks.push(primitive(PrimitiveKind::Date, path)),
		Schema::Null => blocks.push(primitive(PrimitiveKind::Null, path)),
		Schema::Number(checks) => blocks.push(primitive(number_kind(checks), path)),
		Schema::Literal(value) => blocks.push(primitive(literal_kind(value)?, path)),
		Schema::Array(element) => blocks.push(Block::Array(compile_array(element, path)?)),
		Schema::Optional(inner) | Schema::Nullable(inner) => blocks.push(Block::Discriminator(compile_presence(inner, path)?)),
		Schema::Effects { schema, effect } => match effect {
			Effect::Refinement(predicate) if is_bytes_refinement(predicate) => blocks.push(primitive(PrimitiveKind::Buffer, path)),
			Effect::Refinement(_) => compile_into(schema, blocks, path)?,
			Effect::Transform => return Err(WireError::UnsupportedEffect),
		},
		Schema::BigInt | Schema::Any => return Err(WireError::UnsupportedSchema { path: render_path(path) }),
	}
	Ok(())
}

fn primitive(kind: PrimitiveKind, path: &[String]) -> Block {
	Block::Primitive(PrimitiveBlock { kind, path: path.to_vec() })
}

fn number_kind(checks: &[NumberCheck]) -> PrimitiveKind {
	let is_int = checks.iter().any(|check| matches!(check, NumberCheck::Int));
	let min_zero = checks.iter().any(|check| matches!(check, NumberCheck::Min { value, .. } if *value == 0.0));
	match (is_int, min_zero) {
		(true, true) => PrimitiveKind::Uint,
		(true, false) => PrimitiveKind::Int,
		(false, _) => PrimitiveKind::Float,
	}
}

fn literal_kind(value: &LiteralValue) -> Result<PrimitiveKind> {
	match value {
		LiteralValue::String(_) => Ok(PrimitiveKind::String),
		LiteralValue::Boolean(_) => Ok(PrimitiveKind::Boolean),
		LiteralValue::Number(_) => Ok(PrimitiveKind::Float),
		LiteralValue::BigInt(_) | LiteralValue::Null => Err(WireError::UnsupportedLiteral),
	}
}

fn compile_array(element: &Schema, path: &[String]) -> Result<ArrayBlock> {
	let mut inner = Vec::new();
	compile_into(element, &mut inner, &[])?;

	if let [Block::Primitive(leaf)] = inner.as_slice()
		&& leaf.path.is_empty()
	{
		return Ok(ArrayBlock {
			kind: ElementKind::Primitive(leaf.kind.clone()),
			blocks: Vec::new(),
			path: path.to_vec(),
		});
	}

	Ok(ArrayBlock {
		kind: ElementKind::Object,
		blocks: inner,
		path: path.to_vec(),
	})
}

fn compile_presence(inner: &Schema, path: &[String]) -> Result<DiscriminatorBlock> {
	let mut wrapped = Vec::new();
	compile_into(inner, &mut wrapped, path)?;

	Ok(DiscriminatorBlock {
		kind: PrimitiveKind::Uint,
		options: vec![
			(Literal::Int(PRESENCE_ABSENT), Vec::new()),
			(Literal::Int(PRESENCE_VALUE), wrapped),
			(Literal::Int(PRESENCE_NULL), vec![primitive(PrimitiveKind::Null, path)]),
		],
		discriminator: String::new(),
		path: path.to_vec(),
	})
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagClass {
	Int,
	Float,
	Boolean,
	String,
}

fn compile_union(discriminator: &str, members: &[Schema], path: &[String]) -> Result<DiscriminatorBlock> {
	let tag_path = child_path(path, discriminator);
	let invalid_member = || WireError::InvalidUnionMember {
		path: render_path(path),
		discriminator: discriminator.to_owned(),
	};

	let mut tagged: Vec<(Literal, Vec<Block>)> = Vec::new();
	for member in members {
		let Schema::Object(fields) = member else {
			return Err(invalid_member());
		};
		let Some((_, tag_schema)) = fields.iter().find(|(name, _)| name == discriminator) else {
			return Err(invalid_member());
		};
		let tags = match tag_schema {
			Schema::Literal(value) => vec![literal_tag(value)?],
			Schema::Enum(values) if !values.is_empty() => values.iter().map(|value| Literal::String(value.as_str().into())).collect(),
			_ => return Err(invalid_member()),
		};

		let mut body = Vec::new();
		compile_into(member, &mut body, path)?;
		body.retain(|block| block.path() != tag_path.as_slice());

		for tag in tags {
			tagged.push((tag, body.clone()));
		}
	}

	let class = unify_tag_classes(tagged.iter().map(|(tag, _)| classify_tag(tag))).ok_or_else(|| WireError::UndecidableDiscriminator { path: render_path(path) })?;
	let options = tagged.into_iter().map(|(tag, blocks)| (coerce_tag(tag, class), blocks)).collect();

	Ok(DiscriminatorBlock {
		kind: tag_kind(class),
		options,
		discriminator: discriminator.to_owned(),
		path: path.to_vec(),
	})
}

fn literal_tag(value: &LiteralValue) -> Result<Literal> {
	match value {
		LiteralValue::String(value) => Ok(Literal::String(value.as_str().into())),
		LiteralValue::Boolean(value) => Ok(Literal::Bool(*value)),
		LiteralValue::Number(value) => Ok(Literal::Float(*value)),
		LiteralValue::BigInt(_) | LiteralValue::Null => Err(WireError::UnsupportedLiteral),
	}
}

fn classify_tag(tag: &Literal) -> TagClass {
	match tag {
		Literal::String(_) => TagClass::String,
		Literal::Bool(_) => TagClass::Boolean,
		Literal::Int(_) => TagClass::Int,
		Literal::Float(value) if is_integral(*value) => TagClass::Int,
		Literal::Float(_) => TagClass::Float,
	}
}

fn unify_tag_classes(classes: impl Iterator<Item = TagClass>) -> Option<TagClass> {
	let mut seen: Vec<TagClass> = Vec::new();
	for class in classes {
		if !seen.contains(&class) {
			seen.push(class);
		}
	}

	match seen.as_slice() {
		[single] => Some(*single),
		numeric if numeric.iter().all(|class| matches!(class, TagClass::Int | TagClass::Float)) => Some(TagClass::Float),
		_ => None,
	}
}

fn tag_kind(class: TagClass) -> PrimitiveKind {
	match class {
		TagClass::Int => PrimitiveKind::Int,
		TagClass::Float => PrimitiveKind::Float,
		TagClass::Boolean => PrimitiveKind::Boolean,
		TagClass::String => PrimitiveKind::String,
	}
}

fn coerce_tag(tag: Literal, class: TagClass) -> Literal {
	match (tag, class) {
		(Literal::Float(value), TagClass::Int) => Literal::Int(value as i64),
		(Literal::Int(value), TagClass::Float) => Literal::Float(value as f64),
		(tag, _) => tag,
	}
}
