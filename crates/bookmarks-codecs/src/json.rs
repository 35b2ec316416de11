//! Shared JSON field access and tree building

use serde_json::{Map, Value};

use bookmarks_model::{Bookmark, Folder, Url};

use crate::{CodecError, Result};

pub(crate) type Object = Map<String, Value>;

pub(crate) fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Object> {
    value.as_object().ok_or_else(|| CodecError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
    })
}

pub(crate) fn parse_object(json: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(json)?;
    as_object(&value, "<document>")?;
    Ok(value)
}

pub(crate) fn require<'a>(obj: &'a Object, field: &str) -> Result<&'a Value> {
    match obj.get(field) {
        Some(Value::Null) | None => Err(CodecError::MissingField(field.to_string())),
        Some(value) => Ok(value),
    }
}

/// Integer stored as a JSON number or a numeric string.
pub(crate) fn int_field(obj: &Object, field: &str) -> Result<Option<i64>> {
    let value = match obj.get(field) {
        Some(Value::Null) | None => return Ok(None),
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.map(Some).ok_or_else(|| CodecError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
    })
}

pub(crate) fn required_int(obj: &Object, field: &str) -> Result<i64> {
    int_field(obj, field)?.ok_or_else(|| CodecError::MissingField(field.to_string()))
}

pub(crate) fn str_field(obj: &Object, field: &str) -> Result<Option<String>> {
    match obj.get(field) {
        Some(Value::Null) | None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(CodecError::InvalidField {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

pub(crate) fn required_str(obj: &Object, field: &str) -> Result<String> {
    str_field(obj, field)?.ok_or_else(|| CodecError::MissingField(field.to_string()))
}

/// Tags as an array of strings or a single comma separated string.
pub(crate) fn tags_field(obj: &Object, field: &str) -> Result<Vec<String>> {
    match obj.get(field) {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(split_tags(s)),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| CodecError::InvalidField {
                        field: field.to_string(),
                        value: item.to_string(),
                    })
            })
            .collect(),
        Some(other) => Err(CodecError::InvalidField {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

pub(crate) fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn children_field<'a>(obj: &'a Object) -> Result<&'a [Value]> {
    match obj.get("children") {
        Some(Value::Null) | None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(CodecError::InvalidField {
            field: "children".to_string(),
            value: other.to_string(),
        }),
    }
}

/// A decoded JSON node: a url, a folder with its raw children, or nothing
/// (separators and other ignorable entries).
pub(crate) enum Decoded<'a> {
    Folder(Folder, &'a [Value]),
    Url(Url),
    Skip,
}

/// Build a tree from a JSON folder with an explicit stack.
///
/// `decode` turns one raw child into a [`Decoded`] node; indices are
/// assigned later by position.
pub(crate) fn load_tree<'a, F>(root: Folder, children: &'a [Value], decode: F) -> Result<Folder>
where
    F: Fn(&'a Value) -> Result<Decoded<'a>>,
{
    let mut current = (root, children.iter());
    let mut parents: Vec<(Folder, std::slice::Iter<'a, Value>)> = Vec::new();

    loop {
        match current.1.next() {
            Some(raw) => match decode(raw)? {
                Decoded::Folder(folder, grandchildren) => {
                    let child = (folder, grandchildren.iter());
                    parents.push(std::mem::replace(&mut current, child));
                }
                Decoded::Url(url) => current.0.children.push(url.into()),
                Decoded::Skip => {}
            },
            None => match parents.pop() {
                Some(parent) => {
                    let (done, _) = std::mem::replace(&mut current, parent);
                    current.0.children.push(done.into());
                }
                None => return Ok(current.0),
            },
        }
    }
}

/// Serialize a tree into nested records with an explicit stack.
///
/// Folder records must already contain an empty `children` array, which
/// fixes its position among the record's keys.
pub(crate) fn dump_tree<'a, F, U>(tree: &'a Folder, folder_record: F, url_record: U) -> Result<Value>
where
    F: Fn(&'a Folder) -> Result<Object>,
    U: Fn(&'a Url) -> Result<Object>,
{
    let mut current = (folder_record(tree)?, Vec::new(), tree.iter());
    let mut parents: Vec<(Object, Vec<Value>, std::slice::Iter<'a, Bookmark>)> = Vec::new();

    loop {
        match current.2.next() {
            Some(Bookmark::Url(url)) => current.1.push(Value::Object(url_record(url)?)),
            Some(Bookmark::Folder(folder)) => {
                let child = (folder_record(folder)?, Vec::new(), folder.iter());
                parents.push(std::mem::replace(&mut current, child));
            }
            None => {
                let (mut record, records, _) = match parents.pop() {
                    Some(parent) => std::mem::replace(&mut current, parent),
                    None => {
                        let (mut record, records, _) = current;
                        record.insert("children".to_string(), Value::Array(records));
                        return Ok(Value::Object(record));
                    }
                };
                record.insert("children".to_string(), Value::Array(records));
                current.1.push(Value::Object(record));
            }
        }
    }
}

/// Serialize a typed record into an ordered JSON object.
pub(crate) fn to_object<T: serde::Serialize>(record: &T) -> Result<Object> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(CodecError::InvalidField {
            field: "<record>".to_string(),
            value: other.to_string(),
        }),
    }
}
