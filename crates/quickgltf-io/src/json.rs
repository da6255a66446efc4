//! Typed field lookup on the JSON document.
//!
//! Every helper distinguishes an absent field from a field of the wrong type:
//! `optional_*` return `Ok(None)` when the key is missing and an error when it
//! is present with another type. `ctx` names the entity being parsed
//! (`"accessors[3]"`) and prefixes error messages.

use quickgltf_core::{GltfError, Result};
use serde_json::{Map, Value};

pub type Object = Map<String, Value>;

fn wrong_type(ctx: &str, key: &str, expected: &str) -> GltfError {
    GltfError::invalid(format!("{}: `{}` must be {}", ctx, key, expected))
}

fn missing(ctx: &str, key: &str) -> GltfError {
    GltfError::invalid(format!("{}: missing required field `{}`", ctx, key))
}

/// Requires an array element to be an object.
pub fn as_object<'a>(value: &'a Value, ctx: &str) -> Result<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| GltfError::invalid(format!("{}: expected an object", ctx)))
}

/// Converts a JSON unsigned integer to an index or size.
pub fn to_usize(value: u64, ctx: &str, key: &str) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| GltfError::invalid(format!("{}: `{}` is out of range", ctx, key)))
}

pub fn optional_u64(object: &Object, key: &str, ctx: &str) -> Result<Option<u64>> {
    match object.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| wrong_type(ctx, key, "an unsigned integer")),
    }
}

pub fn required_u64(object: &Object, key: &str, ctx: &str) -> Result<u64> {
    optional_u64(object, key, ctx)?.ok_or_else(|| missing(ctx, key))
}

pub fn optional_usize(object: &Object, key: &str, ctx: &str) -> Result<Option<usize>> {
    optional_u64(object, key, ctx)?
        .map(|v| to_usize(v, ctx, key))
        .transpose()
}

pub fn required_usize(object: &Object, key: &str, ctx: &str) -> Result<usize> {
    to_usize(required_u64(object, key, ctx)?, ctx, key)
}

pub fn optional_str<'a>(object: &'a Object, key: &str, ctx: &str) -> Result<Option<&'a str>> {
    match object.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| wrong_type(ctx, key, "a string")),
    }
}

pub fn required_str<'a>(object: &'a Object, key: &str, ctx: &str) -> Result<&'a str> {
    optional_str(object, key, ctx)?.ok_or_else(|| missing(ctx, key))
}

/// Owned copy of an optional string field, used for `name` and friends.
pub fn optional_string(object: &Object, key: &str, ctx: &str) -> Result<Option<String>> {
    Ok(optional_str(object, key, ctx)?.map(str::to_owned))
}

pub fn optional_bool(object: &Object, key: &str, ctx: &str) -> Result<Option<bool>> {
    match object.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| wrong_type(ctx, key, "a boolean")),
    }
}

pub fn optional_object<'a>(object: &'a Object, key: &str, ctx: &str) -> Result<Option<&'a Object>> {
    match object.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_object()
            .map(Some)
            .ok_or_else(|| wrong_type(ctx, key, "an object")),
    }
}

pub fn required_object<'a>(object: &'a Object, key: &str, ctx: &str) -> Result<&'a Object> {
    optional_object(object, key, ctx)?.ok_or_else(|| missing(ctx, key))
}

/// Lazily iterates the elements of an optional array field.
///
/// An absent key yields no elements; a key holding anything but an array is
/// an error. Callers map each element to `Result<T>` and collect into
/// `Result<Vec<T>>`, which stops at the first failing element.
pub fn array_elements<'a>(
    parent: &'a Object,
    name: &str,
    ctx: &str,
) -> Result<std::slice::Iter<'a, Value>> {
    match parent.get(name) {
        None => Ok(<&[Value]>::default().iter()),
        Some(Value::Array(array)) => Ok(array.iter()),
        Some(_) => Err(wrong_type(ctx, name, "an array")),
    }
}

/// Reads an optional array of unsigned integers, such as `children`.
pub fn index_array(parent: &Object, name: &str, ctx: &str) -> Result<Vec<usize>> {
    array_elements(parent, name, ctx)?
        .enumerate()
        .map(|(i, value)| {
            let key = format!("{}[{}]", name, i);
            let index = value
                .as_u64()
                .ok_or_else(|| wrong_type(ctx, &key, "an unsigned integer"))?;
            to_usize(index, ctx, &key)
        })
        .collect()
}

/// Reads an optional array of strings, such as `extensionsUsed`.
pub fn string_array(parent: &Object, name: &str, ctx: &str) -> Result<Vec<String>> {
    array_elements(parent, name, ctx)?
        .enumerate()
        .map(|(i, value)| {
            value
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| wrong_type(ctx, &format!("{}[{}]", name, i), "a string"))
        })
        .collect()
}
