//! Serializer that renders typed values as dynamic trees.
//!
//! Struct field names are projected to lower camel case; map keys are kept
//! verbatim (scalar keys are stringified).

use serde::ser::{self, Serialize};
use serde_json::{Map, Number, Value};

use super::naming::to_lower_camel;
use crate::PropsError;

pub(super) struct DynamicSerializer;

fn float(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn tagged(variant: &str, inner: Value) -> Value {
    let mut map = Map::new();
    map.insert(variant.to_owned(), inner);
    Value::Object(map)
}

impl ser::Serializer for DynamicSerializer {
    type Ok = Value;
    type Error = PropsError;
    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = SeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = StructBuilder;
    type SerializeStructVariant = StructBuilder;

    fn serialize_bool(self, v: bool) -> Result<Value, PropsError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, PropsError> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, PropsError> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, PropsError> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, PropsError> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, PropsError> {
        i64::try_from(v)
            .map(Value::from)
            .map_err(|_| PropsError::Mapping(format!("{v} does not fit a 64-bit integer")))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, PropsError> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, PropsError> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, PropsError> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, PropsError> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, PropsError> {
        u64::try_from(v)
            .map(Value::from)
            .map_err(|_| PropsError::Mapping(format!("{v} does not fit a 64-bit integer")))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, PropsError> {
        Ok(float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, PropsError> {
        Ok(float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, PropsError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, PropsError> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, PropsError> {
        Ok(Value::Array(v.iter().copied().map(Value::from).collect()))
    }

    fn serialize_none(self) -> Result<Value, PropsError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, PropsError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, PropsError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, PropsError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, PropsError> {
        Ok(Value::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, PropsError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, PropsError> {
        Ok(tagged(variant, value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder, PropsError> {
        Ok(SeqBuilder {
            variant: None,
            items: Vec::with_capacity(len.unwrap_or_default()),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder, PropsError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqBuilder, PropsError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqBuilder, PropsError> {
        Ok(SeqBuilder {
            variant: Some(variant),
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapBuilder, PropsError> {
        Ok(MapBuilder {
            map: Map::new(),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<StructBuilder, PropsError> {
        Ok(StructBuilder {
            variant: None,
            map: Map::new(),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<StructBuilder, PropsError> {
        Ok(StructBuilder {
            variant: Some(variant),
            map: Map::new(),
        })
    }
}

pub(super) struct SeqBuilder {
    variant: Option<&'static str>,
    items: Vec<Value>,
}

impl SeqBuilder {
    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PropsError> {
        self.items.push(value.serialize(DynamicSerializer)?);
        Ok(())
    }

    fn finish(self) -> Value {
        let items = Value::Array(self.items);
        if let Some(variant) = self.variant {
            return tagged(variant, items);
        }
        items
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Value;
    type Error = PropsError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PropsError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, PropsError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Value;
    type Error = PropsError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PropsError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, PropsError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = Value;
    type Error = PropsError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PropsError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, PropsError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SeqBuilder {
    type Ok = Value;
    type Error = PropsError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PropsError> {
        self.push(value)
    }

    fn end(self) -> Result<Value, PropsError> {
        Ok(self.finish())
    }
}

pub(super) struct MapBuilder {
    map: Map<String, Value>,
    next_key: Option<String>,
}

/// Map keys must be scalars; they are stored as their text form.
fn key_text(key: Value) -> Result<String, PropsError> {
    match key {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok("null".to_owned()),
        Value::Array(_) | Value::Object(_) => {
            Err(PropsError::Mapping("map keys must be scalars".to_owned()))
        }
    }
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Value;
    type Error = PropsError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), PropsError> {
        self.next_key = Some(key_text(key.serialize(DynamicSerializer)?)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PropsError> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| PropsError::Mapping("map value serialized before its key".to_owned()))?;
        self.map.insert(key, value.serialize(DynamicSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, PropsError> {
        Ok(Value::Object(self.map))
    }
}

pub(super) struct StructBuilder {
    variant: Option<&'static str>,
    map: Map<String, Value>,
}

impl StructBuilder {
    fn field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), PropsError> {
        self.map
            .insert(to_lower_camel(key), value.serialize(DynamicSerializer)?);
        Ok(())
    }

    fn finish(self) -> Value {
        let fields = Value::Object(self.map);
        if let Some(variant) = self.variant {
            return tagged(variant, fields);
        }
        fields
    }
}

impl ser::SerializeStruct for StructBuilder {
    type Ok = Value;
    type Error = PropsError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), PropsError> {
        self.field(key, value)
    }

    fn end(self) -> Result<Value, PropsError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for StructBuilder {
    type Ok = Value;
    type Error = PropsError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), PropsError> {
        self.field(key, value)
    }

    fn end(self) -> Result<Value, PropsError> {
        Ok(self.finish())
    }
}
