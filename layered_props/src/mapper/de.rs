//! Lenient `serde` deserializer over a borrowed dynamic tree.
//!
//! A [`Node`] wraps one position in the source tree (or the absence of one)
//! together with its key path and depth. Scalars are coerced through
//! [`super::coerce`]; a failed coercion or a nested shape mismatch is handed
//! to the shared [`Context`], which either records it (strict) or lets the
//! target fall back to its zero value (lenient).
//!
//! Two failures cannot be absorbed in place, so the whole conversion is
//! replayed once the [`Context`] has learnt from them:
//!
//! - serde lists alias names among a struct's fields and rejects a second
//!   sighting of the same field. The context records which name the alias
//!   folds into and presents each field group once.
//! - an enum below the root whose variant cannot be resolved marks its path
//!   as blanked, and an `Option` at that path then reads as `None`.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::vec;

use serde::de::value::{StrDeserializer, StringDeserializer};
use serde::de::{self, DeserializeSeed, IntoDeserializer, Visitor};
use serde_json::Value;

use super::MapMode;
use super::coerce;
use super::naming::{bind_fields, resolve_variant};
use crate::convert::{kind_name, scalar_text};
use crate::{KeyPath, PropsError, Step};

/// Identifies a struct by its serde name and declared field list.
type StructId = (&'static str, &'static [&'static str]);

/// A declared field name paired with the index of the source key bound to it.
type Binding = (&'static str, Option<usize>);

/// Collects degraded failures for a single conversion, and what earlier
/// attempts at it have taught.
pub(super) struct Context {
    mode: MapMode,
    errors: RefCell<Vec<PropsError>>,
    /// Alias name to the primary name it folds into.
    aliases: RefCell<HashMap<(StructId, &'static str), &'static str>>,
    /// Primary names presented ahead of every other field of their struct.
    leaders: RefCell<HashSet<(StructId, &'static str)>>,
    /// Last declared field handed to a struct visitor.
    presented: Cell<Option<(StructId, &'static str)>>,
    /// Paths whose enum failed to resolve, with the rendered source value.
    blanked: RefCell<HashMap<String, String>>,
    replay: Cell<bool>,
}

impl Context {
    pub(super) fn new(mode: MapMode) -> Self {
        Self {
            mode,
            errors: RefCell::new(Vec::new()),
            aliases: RefCell::new(HashMap::new()),
            leaders: RefCell::new(HashSet::new()),
            presented: Cell::new(None),
            blanked: RefCell::new(HashMap::new()),
            replay: Cell::new(false),
        }
    }

    fn degrade(&self, err: PropsError) {
        match self.mode {
            MapMode::Strict => self.errors.borrow_mut().push(err),
            MapMode::Lenient => tracing::trace!(error = %err, "using zero value"),
        }
    }

    /// Decide whether a failed attempt should be replayed, resetting the
    /// per-attempt state when it should.
    pub(super) fn replay_after(&self, err: &PropsError) -> bool {
        let replay = self.replay.replace(false)
            || matches!(err, PropsError::DuplicateField { field } if self.learn_alias(*field));
        if replay {
            self.errors.borrow_mut().clear();
            self.presented.set(None);
        }
        replay
    }

    /// Learn from serde rejecting a second sighting of `field`.
    ///
    /// The field presented last is the culprit. When it differs from
    /// `field` it is an alias of it; when it is `field` itself an unknown
    /// alias was presented earlier, so `field` is moved to the front for the
    /// next attempt. Returns `false` when nothing new was learnt.
    fn learn_alias(&self, field: &'static str) -> bool {
        let Some((owner, culprit)) = self.presented.take() else {
            return false;
        };
        if culprit == field {
            return self.leaders.borrow_mut().insert((owner, field));
        }
        tracing::debug!(alias = culprit, field, "folding serde alias");
        self.aliases
            .borrow_mut()
            .insert((owner, culprit), field)
            .is_none()
    }

    /// Group a struct's declared fields by the primary name they fold into.
    ///
    /// Each group leads with its primary name; groups led by a known leader
    /// come first, the rest keep declaration order.
    fn field_groups(
        &self,
        owner: StructId,
        fields: impl IntoIterator<Item = Binding>,
    ) -> Vec<Vec<Binding>> {
        let aliases = self.aliases.borrow();
        let leaders = self.leaders.borrow();
        let mut groups: Vec<(&'static str, Vec<Binding>)> = Vec::new();
        for binding in fields {
            let (field, _) = binding;
            let primary = aliases.get(&(owner, field)).copied().unwrap_or(field);
            if let Some((_, members)) = groups.iter_mut().find(|(name, _)| *name == primary) {
                members.push(binding);
                continue;
            }
            groups.push((primary, vec![binding]));
        }
        groups.sort_by_key(|(primary, _)| !leaders.contains(&(owner, *primary)));
        groups
            .into_iter()
            .map(|(primary, mut members)| {
                members.sort_by_key(|(field, _)| *field != primary);
                members
            })
            .collect()
    }

    fn note_presented(&self, owner: Option<StructId>, field: &'static str) {
        self.presented.set(owner.map(|id| (id, field)));
    }

    /// Mark the enum at `path` as unresolvable and request a replay.
    fn blank(&self, path: String, shown: String) {
        if self.replay.get() {
            return;
        }
        let mut blanked = self.blanked.borrow_mut();
        if blanked.contains_key(&path) {
            return;
        }
        tracing::debug!(path = %path, value = %shown, "enum variant unresolved; replaying as absent");
        blanked.insert(path, shown);
        self.replay.set(true);
    }

    /// Whether `path` was blanked by an earlier attempt; degrades if so.
    fn take_blanked(&self, path: &KeyPath) -> bool {
        if self.blanked.borrow().is_empty() {
            return false;
        }
        let key = path.to_string();
        let shown = self.blanked.borrow().get(&key).cloned();
        shown.is_some_and(|value| {
            self.degrade(PropsError::Coercion {
                path: key,
                target: "enum",
                value,
            });
            true
        })
    }

    pub(super) fn finish(self) -> Option<PropsError> {
        PropsError::aggregate(self.errors.into_inner())
    }
}

#[derive(Clone, Copy)]
enum Shape {
    Sequence,
    Mapping,
}

impl Shape {
    const fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Sequence, Value::Array(_)) | (Self::Mapping, Value::Object(_))
        )
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

enum Found {
    Missing,
    Matches,
    Text(Value),
    Mismatch,
}

/// How an enum variant is written in the source.
enum Tag {
    /// Bare variant name.
    Unit(String),
    /// Single-key mapping from variant name to its content.
    Keyed,
    Invalid,
}

/// JSON text embedded in a string, when it parses as a container.
fn parse_embedded(text: &str) -> Option<Value> {
    let trimmed = text.trim_start();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    serde_json::from_str(text).ok()
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => format!("'{text}'"),
        other => scalar_text(other),
    }
}

/// A position in the source tree; `value` is `None` when the key is absent.
pub(super) struct Node<'a> {
    value: Option<Cow<'a, Value>>,
    path: KeyPath,
    depth: usize,
    ctx: &'a Context,
}

impl<'a> Node<'a> {
    pub(super) fn root(value: Option<&'a Value>, path: KeyPath, ctx: &'a Context) -> Self {
        Self {
            value: value.map(Cow::Borrowed),
            path,
            depth: 0,
            ctx,
        }
    }

    fn descend(
        parent: &KeyPath,
        depth: usize,
        ctx: &'a Context,
        step: Step,
        value: Option<Cow<'a, Value>>,
    ) -> Self {
        let mut path = parent.clone();
        match step {
            Step::Key(key) => path.push_key(key),
            Step::Index(index) => path.push_index(index),
        }
        Self {
            value,
            path,
            depth: depth + 1,
            ctx,
        }
    }

    fn absent(self) -> Self {
        Self { value: None, ..self }
    }

    fn found(&self) -> &'static str {
        self.value.as_deref().map_or("nothing", kind_name)
    }

    fn mismatch(&self, expected: &str) -> PropsError {
        PropsError::conversion(self.path.to_string(), expected, self.found())
    }

    /// Shape failure: fatal at the root, degraded anywhere below it.
    fn structural(&self, expected: &str) -> Result<(), PropsError> {
        let err = self.mismatch(expected);
        if self.depth == 0 {
            return Err(err);
        }
        self.ctx.degrade(err);
        Ok(())
    }

    fn scalar<T: Default>(
        &self,
        target: &'static str,
        coerce: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T, PropsError> {
        match self.value.as_deref() {
            None | Some(Value::Null) => Ok(T::default()),
            Some(Value::Array(_) | Value::Object(_)) => {
                self.structural(target)?;
                Ok(T::default())
            }
            Some(value) => Ok(coerce(value).unwrap_or_else(|| {
                self.ctx.degrade(PropsError::Coercion {
                    path: self.path.to_string(),
                    target,
                    value: render(value),
                });
                T::default()
            })),
        }
    }

    /// Resolve the node into a container of `shape`, or an absent node.
    fn container(self, shape: Shape) -> Result<Self, PropsError> {
        let found = match self.value.as_deref() {
            None | Some(Value::Null) => Found::Missing,
            Some(value) if shape.matches(value) => Found::Matches,
            Some(Value::String(text)) => parse_embedded(text)
                .filter(|parsed| shape.matches(parsed))
                .map_or(Found::Mismatch, Found::Text),
            Some(_) => Found::Mismatch,
        };
        match found {
            Found::Missing => Ok(self.absent()),
            Found::Matches => Ok(self),
            Found::Text(parsed) => Ok(Self {
                value: Some(Cow::Owned(parsed)),
                ..self
            }),
            Found::Mismatch => {
                self.structural(shape.name())?;
                Ok(self.absent())
            }
        }
    }

    fn elements(self) -> Vec<Self> {
        let Self {
            value,
            path,
            depth,
            ctx,
        } = self;
        let child = |index: usize, item: Cow<'a, Value>| {
            Self::descend(&path, depth, ctx, Step::Index(index), Some(item))
        };
        match value {
            Some(Cow::Borrowed(Value::Array(items))) => items
                .iter()
                .enumerate()
                .map(|(index, item)| child(index, Cow::Borrowed(item)))
                .collect(),
            Some(Cow::Owned(Value::Array(items))) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| child(index, Cow::Owned(item)))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn entries(value: Option<Cow<'a, Value>>) -> Vec<(String, Cow<'a, Value>)> {
        match value {
            Some(Cow::Borrowed(Value::Object(map))) => map
                .iter()
                .map(|(key, item)| (key.clone(), Cow::Borrowed(item)))
                .collect(),
            Some(Cow::Owned(Value::Object(map))) => map
                .into_iter()
                .map(|(key, item)| (key, Cow::Owned(item)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Mapping entries with their keys kept verbatim.
    fn into_map_access(self) -> MapNodes<'a> {
        let Self {
            value,
            path,
            depth,
            ctx,
        } = self;
        let pairs = Self::entries(value)
            .into_iter()
            .map(|(key, item)| {
                let node = Self::descend(&path, depth, ctx, Step::Key(key.clone()), Some(item));
                (EntryKey::Text(key), node)
            })
            .collect();
        MapNodes::new(pairs, None, depth, ctx)
    }

    /// Mapping entries bound to the declared `fields`; every field group is
    /// presented once, absent ones with no value.
    fn into_struct_access(
        self,
        owner: StructId,
        fields: &'static [&'static str],
    ) -> MapNodes<'a> {
        let Self {
            value,
            path,
            depth,
            ctx,
        } = self;
        let entries = Self::entries(value);
        let bindings = {
            let keys: Vec<&str> = entries.iter().map(|(key, _)| key.as_str()).collect();
            bind_fields(fields, &keys)
        };
        let mut slots: Vec<Option<(String, Cow<'a, Value>)>> =
            entries.into_iter().map(Some).collect();
        let mut pairs = Vec::with_capacity(fields.len());
        for members in ctx.field_groups(owner, fields.iter().copied().zip(bindings)) {
            let Some(&(primary, _)) = members.first() else {
                continue;
            };
            let taken = members.iter().find_map(|&(field, binding)| {
                let entry = slots.get_mut(binding?)?.take()?;
                Some((field, entry))
            });
            let (field, step, item) = taken.map_or_else(
                || (primary, primary.to_owned(), None),
                |(field, (key, item))| (field, key, Some(item)),
            );
            let node = Self::descend(&path, depth, ctx, Step::Key(step), item);
            pairs.push((EntryKey::Field(field), node));
        }
        for (key, _) in slots.into_iter().flatten() {
            tracing::trace!(path = %path, key = %key, "ignoring unbound source key");
        }
        MapNodes::new(pairs, Some(owner), depth, ctx)
    }

    /// Hand the variant named by this node to `visitor`.
    fn visit_variant<'de, V: Visitor<'de>>(
        self,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, PropsError> {
        let tag = match self.value.as_deref() {
            Some(Value::String(text)) => Tag::Unit(text.clone()),
            Some(Value::Object(map)) if map.len() == 1 => Tag::Keyed,
            _ => Tag::Invalid,
        };
        match tag {
            Tag::Unit(text) => {
                let name = resolve_variant(variants, &text).map_or(text, str::to_owned);
                let variant: StringDeserializer<PropsError> = name.into_deserializer();
                visitor.visit_enum(variant)
            }
            Tag::Keyed => {
                let Self {
                    value,
                    path,
                    depth,
                    ctx,
                } = self;
                let mut entries = Self::entries(value);
                let Some((key, item)) = entries.pop() else {
                    return Err(PropsError::conversion(path.to_string(), "enum variant", "mapping"));
                };
                let name = resolve_variant(variants, &key).map_or_else(|| key.clone(), str::to_owned);
                let node = Self::descend(&path, depth, ctx, Step::Key(key), Some(item));
                visitor.visit_enum(VariantNode { name, node })
            }
            Tag::Invalid => Err(self.mismatch("enum variant")),
        }
    }
}

macro_rules! deserialize_signed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
            let number = self.scalar(stringify!($ty), |value| {
                coerce::to_i64(value).and_then(|wide| <$ty>::try_from(wide).ok())
            })?;
            visitor.$visit(number)
        }
    )*};
}

macro_rules! deserialize_unsigned {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
            let number = self.scalar(stringify!($ty), |value| {
                coerce::to_u64(value).and_then(|wide| <$ty>::try_from(wide).ok())
            })?;
            visitor.$visit(number)
        }
    )*};
}

impl<'de> de::Deserializer<'de> for Node<'_> {
    type Error = PropsError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        match self.value.as_deref() {
            None | Some(Value::Null) => visitor.visit_unit(),
            Some(Value::Bool(flag)) => visitor.visit_bool(*flag),
            Some(Value::Number(number)) => match (number.as_i64(), number.as_u64()) {
                (Some(signed), _) => visitor.visit_i64(signed),
                (None, Some(unsigned)) => visitor.visit_u64(unsigned),
                (None, None) => visitor.visit_f64(number.as_f64().unwrap_or_default()),
            },
            Some(Value::String(text)) => visitor.visit_str(text),
            Some(Value::Array(_)) => visitor.visit_seq(SeqNodes::new(self.elements())),
            Some(Value::Object(_)) => visitor.visit_map(self.into_map_access()),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        visitor.visit_bool(self.scalar("bool", coerce::to_bool)?)
    }

    deserialize_signed! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
    }

    deserialize_unsigned! {
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        let float = self.scalar("f32", |value| coerce::to_f64(value).map(coerce::narrow_f32))?;
        visitor.visit_f32(float)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        visitor.visit_f64(self.scalar("f64", coerce::to_f64)?)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        visitor.visit_char(self.scalar("char", coerce::to_char)?)
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        visitor.visit_string(self.scalar("string", coerce::to_text)?)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        if let Some(Value::String(text)) = self.value.as_deref() {
            return visitor.visit_bytes(text.as_bytes());
        }
        self.deserialize_seq(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        if self.ctx.take_blanked(&self.path) {
            return visitor.visit_none();
        }
        match self.value.as_deref() {
            None | Some(Value::Null) => visitor.visit_none(),
            Some(_) => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, PropsError> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, PropsError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        let node = self.container(Shape::Sequence)?;
        visitor.visit_seq(SeqNodes::new(node.elements()))
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, PropsError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, PropsError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        let node = self.container(Shape::Mapping)?;
        visitor.visit_map(node.into_map_access())
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, PropsError> {
        let node = self.container(Shape::Mapping)?;
        visitor.visit_map(node.into_struct_access((name, fields), fields))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, PropsError> {
        if self.depth == 0 || matches!(self.value.as_deref(), None | Some(Value::Null)) {
            return self.visit_variant(variants, visitor);
        }
        let path = self.path.to_string();
        let shown = self.value.as_deref().map(render).unwrap_or_default();
        let ctx = self.ctx;
        self.visit_variant(variants, visitor).inspect_err(|err| {
            if !matches!(err, PropsError::DuplicateField { .. }) {
                ctx.blank(path, shown);
            }
        })
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, PropsError> {
        visitor.visit_unit()
    }
}

struct SeqNodes<'a> {
    iter: vec::IntoIter<Node<'a>>,
}

impl<'a> SeqNodes<'a> {
    fn new(nodes: Vec<Node<'a>>) -> Self {
        Self {
            iter: nodes.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqNodes<'_> {
    type Error = PropsError;

    fn next_element_seed<S: DeserializeSeed<'de>>(
        &mut self,
        seed: S,
    ) -> Result<Option<S::Value>, PropsError> {
        self.iter.next().map(|node| seed.deserialize(node)).transpose()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

enum EntryKey {
    /// Declared struct field, already resolved.
    Field(&'static str),
    /// Source mapping key, coerced like any scalar.
    Text(String),
}

struct MapNodes<'a> {
    iter: vec::IntoIter<(EntryKey, Node<'a>)>,
    pending: Option<Node<'a>>,
    owner: Option<StructId>,
    depth: usize,
    ctx: &'a Context,
}

impl<'a> MapNodes<'a> {
    fn new(
        pairs: Vec<(EntryKey, Node<'a>)>,
        owner: Option<StructId>,
        depth: usize,
        ctx: &'a Context,
    ) -> Self {
        Self {
            iter: pairs.into_iter(),
            pending: None,
            owner,
            depth,
            ctx,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapNodes<'_> {
    type Error = PropsError;

    fn next_key_seed<S: DeserializeSeed<'de>>(
        &mut self,
        seed: S,
    ) -> Result<Option<S::Value>, PropsError> {
        let Some((key, node)) = self.iter.next() else {
            return Ok(None);
        };
        let path = node.path.clone();
        self.pending = Some(node);
        match key {
            EntryKey::Field(name) => {
                self.ctx.note_presented(self.owner, name);
                let field: StrDeserializer<'static, PropsError> = name.into_deserializer();
                seed.deserialize(field).map(Some)
            }
            EntryKey::Text(text) => {
                self.ctx.note_presented(None, "");
                let key_node = Node {
                    value: Some(Cow::Owned(Value::String(text))),
                    path,
                    depth: self.depth + 1,
                    ctx: self.ctx,
                };
                seed.deserialize(key_node).map(Some)
            }
        }
    }

    fn next_value_seed<S: DeserializeSeed<'de>>(&mut self, seed: S) -> Result<S::Value, PropsError> {
        match self.pending.take() {
            Some(node) => seed.deserialize(node),
            None => Err(PropsError::Mapping("map value requested before its key".to_owned())),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct VariantNode<'a> {
    name: String,
    node: Node<'a>,
}

impl<'de, 'a> de::EnumAccess<'de> for VariantNode<'a> {
    type Error = PropsError;
    type Variant = Node<'a>;

    fn variant_seed<S: DeserializeSeed<'de>>(
        self,
        seed: S,
    ) -> Result<(S::Value, Node<'a>), PropsError> {
        let name: StringDeserializer<PropsError> = self.name.into_deserializer();
        Ok((seed.deserialize(name)?, self.node))
    }
}

impl<'de> de::VariantAccess<'de> for Node<'_> {
    type Error = PropsError;

    fn unit_variant(self) -> Result<(), PropsError> {
        Ok(())
    }

    fn newtype_variant_seed<S: DeserializeSeed<'de>>(self, seed: S) -> Result<S::Value, PropsError> {
        seed.deserialize(self)
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, PropsError> {
        de::Deserializer::deserialize_seq(self, visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, PropsError> {
        de::Deserializer::deserialize_struct(self, "variant", fields, visitor)
    }
}
