//! XML property-list reader.
//!
//! Decodes the Apple XML plist dialect written by texture packers into a
//! tagged `PlistValue` tree. Lookups go through the key-aware accessors on
//! `PlistDict`, which report missing keys and type mismatches as
//! `PlistError` instead of falling back to defaults.
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

use crate::types::{IntRect, IntVector2};

/// Errors encountered when reading or querying a property list
#[derive(Debug, Error)]
pub enum PlistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Unexpected element <{0}> in property list")]
    UnexpectedElement(String),
    #[error("Unexpected text outside of a value: {0:?}")]
    UnexpectedText(String),
    #[error("Dictionary key `{0}` has no value")]
    DanglingKey(String),
    #[error("Dictionary value of type {0} has no key")]
    MissingKeyForValue(&'static str),
    #[error("Property list has more than one top-level value")]
    MultipleRoots,
    #[error("Property list contains no value")]
    Empty,
    #[error("Unexpected end of property list")]
    UnexpectedEof,
    #[error("Invalid {kind} literal: {value:?}")]
    InvalidLiteral { kind: &'static str, value: String },
    #[error("Missing key `{0}`")]
    MissingKey(String),
    #[error("Type mismatch for `{key}`: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Malformed {expected} for `{key}`: {value:?}")]
    Malformed {
        key: String,
        expected: &'static str,
        value: String,
    },
}

/// One node of a property-list document
#[derive(Debug, Clone, PartialEq)]
pub enum PlistValue {
    Dict(PlistDict),
    Array(Vec<PlistValue>),
    String(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    Date(String),
    /// Base64 payload, whitespace stripped, not decoded
    Data(String),
}

impl PlistValue {
    /// Element name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            PlistValue::Dict(_) => "dict",
            PlistValue::Array(_) => "array",
            PlistValue::String(_) => "string",
            PlistValue::Integer(_) => "integer",
            PlistValue::Real(_) => "real",
            PlistValue::Bool(_) => "bool",
            PlistValue::Date(_) => "date",
            PlistValue::Data(_) => "data",
        }
    }

    pub fn as_dict(&self) -> Option<&PlistDict> {
        match self {
            PlistValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PlistValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PlistValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            PlistValue::Real(r) => Some(*r),
            PlistValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromStr for PlistValue {
    type Err = PlistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        read_document(Reader::from_str(s))
    }
}

/// Keyed node of a property-list document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlistDict {
    entries: BTreeMap<String, PlistValue>,
}

impl PlistDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; an existing entry under the same key is replaced and returned
    pub fn insert(&mut self, key: impl Into<String>, value: PlistValue) -> Option<PlistValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, PlistValue> {
        self.entries.iter()
    }

    pub fn require(&self, key: &str) -> Result<&PlistValue, PlistError> {
        self.get(key)
            .ok_or_else(|| PlistError::MissingKey(key.to_string()))
    }

    pub fn dict(&self, key: &str) -> Result<&PlistDict, PlistError> {
        let value = self.require(key)?;
        value.as_dict().ok_or_else(|| mismatch(key, "dict", value))
    }

    pub fn bool(&self, key: &str) -> Result<bool, PlistError> {
        let value = self.require(key)?;
        value.as_bool().ok_or_else(|| mismatch(key, "bool", value))
    }

    pub fn string(&self, key: &str) -> Result<&str, PlistError> {
        let value = self.require(key)?;
        value.as_str().ok_or_else(|| mismatch(key, "string", value))
    }

    /// Rectangle stored as `"{{x,y},{w,h}}"`.
    ///
    /// With `rotated` set, width and height are swapped: the stored size is the
    /// sprite's own size, while its footprint in the texture was turned by 90°.
    pub fn int_rect(&self, key: &str, rotated: bool) -> Result<IntRect, PlistError> {
        let text = self.string(key)?;
        parse_int_rect(text, rotated).ok_or_else(|| PlistError::Malformed {
            key: key.to_string(),
            expected: "rectangle",
            value: text.to_string(),
        })
    }

    /// Vector stored as `"{x,y}"`
    pub fn int_vector2(&self, key: &str) -> Result<IntVector2, PlistError> {
        let text = self.string(key)?;
        parse_int_vector2(text).ok_or_else(|| PlistError::Malformed {
            key: key.to_string(),
            expected: "vector",
            value: text.to_string(),
        })
    }
}

impl<K: Into<String>> FromIterator<(K, PlistValue)> for PlistDict {
    fn from_iter<I: IntoIterator<Item = (K, PlistValue)>>(iter: I) -> Self {
        let mut dict = PlistDict::new();
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}

impl<'a> IntoIterator for &'a PlistDict {
    type Item = (&'a String, &'a PlistValue);
    type IntoIter = btree_map::Iter<'a, String, PlistValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn mismatch(key: &str, expected: &'static str, found: &PlistValue) -> PlistError {
    PlistError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

/// Parse `"{{x,y},{w,h}}"`, swapping width and height when `rotated`
pub fn parse_int_rect(text: &str, rotated: bool) -> Option<IntRect> {
    let [x, y, w, h] = parse_pair_of_pairs(text)?;
    Some(if rotated {
        IntRect::new(x, y, h, w)
    } else {
        IntRect::new(x, y, w, h)
    })
}

/// Parse `"{x,y}"`
pub fn parse_int_vector2(text: &str) -> Option<IntVector2> {
    let (x, y) = parse_pair(text)?;
    Some(IntVector2::new(x, y))
}

// `{a,b}`: exactly two numbers inside one pair of braces.
fn parse_pair(text: &str) -> Option<(i32, i32)> {
    let inner = strip_braces(text)?;
    if inner.contains(['{', '}']) {
        return None;
    }
    let (a, b) = inner.split_once(',')?;
    Some((parse_component(a.trim())?, parse_component(b.trim())?))
}

// `{{x,y},{w,h}}`: two pairs, comma separated, inside one outer pair of braces.
fn parse_pair_of_pairs(text: &str) -> Option<[i32; 4]> {
    let inner = strip_braces(text)?;
    let split = inner.find('}')? + 1;
    let (first, rest) = inner.split_at(split);
    let second = rest.trim_start().strip_prefix(',')?;
    let (x, y) = parse_pair(first)?;
    let (w, h) = parse_pair(second)?;
    Some([x, y, w, h])
}

fn strip_braces(text: &str) -> Option<&str> {
    text.trim().strip_prefix('{')?.strip_suffix('}')
}

fn parse_component(text: &str) -> Option<i32> {
    text.parse::<i32>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i32)
    })
}

/// Read a property list from any buffered reader
pub fn read_plist<R: BufRead>(reader: R) -> Result<PlistValue, PlistError> {
    read_document(Reader::from_reader(reader))
}

/// Load a property-list file whose root is a dictionary
pub fn load_plist<P: AsRef<Path>>(path: P) -> Result<PlistDict, PlistError> {
    let file = File::open(path.as_ref())?;
    match read_plist(BufReader::new(file))? {
        PlistValue::Dict(root) => Ok(root),
        other => Err(mismatch("<root>", "dict", &other)),
    }
}

enum Container {
    Dict {
        entries: PlistDict,
        pending_key: Option<String>,
    },
    Array(Vec<PlistValue>),
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Container>,
    root: Option<PlistValue>,
}

impl TreeBuilder {
    fn open_dict(&mut self) {
        self.stack.push(Container::Dict {
            entries: PlistDict::new(),
            pending_key: None,
        });
    }

    fn open_array(&mut self) {
        self.stack.push(Container::Array(Vec::new()));
    }

    fn close(&mut self, tag: &str) -> Result<(), PlistError> {
        let value = match self.stack.pop() {
            Some(Container::Dict {
                entries,
                pending_key,
            }) if tag == "dict" => {
                if let Some(key) = pending_key {
                    return Err(PlistError::DanglingKey(key));
                }
                PlistValue::Dict(entries)
            }
            Some(Container::Array(items)) if tag == "array" => PlistValue::Array(items),
            _ => return Err(PlistError::UnexpectedElement(format!("/{}", tag))),
        };
        self.push_value(value)
    }

    fn push_key(&mut self, key: String) -> Result<(), PlistError> {
        match self.stack.last_mut() {
            Some(Container::Dict { pending_key, .. }) => match pending_key.replace(key) {
                Some(previous) => Err(PlistError::DanglingKey(previous)),
                None => Ok(()),
            },
            _ => Err(PlistError::UnexpectedElement("key".to_string())),
        }
    }

    fn push_value(&mut self, value: PlistValue) -> Result<(), PlistError> {
        match self.stack.last_mut() {
            Some(Container::Dict {
                entries,
                pending_key,
            }) => {
                let key = pending_key
                    .take()
                    .ok_or(PlistError::MissingKeyForValue(value.kind()))?;
                // Later duplicates win
                entries.insert(key, value);
            }
            Some(Container::Array(items)) => items.push(value),
            None => {
                if self.root.is_some() {
                    return Err(PlistError::MultipleRoots);
                }
                self.root = Some(value);
            }
        }
        Ok(())
    }

    fn push_scalar(&mut self, tag: &str, text: &str) -> Result<(), PlistError> {
        let value = match tag {
            "key" => return self.push_key(text.to_string()),
            "string" => PlistValue::String(text.to_string()),
            "integer" => PlistValue::Integer(text.trim().parse().map_err(|_| {
                PlistError::InvalidLiteral {
                    kind: "integer",
                    value: text.to_string(),
                }
            })?),
            "real" => PlistValue::Real(text.trim().parse().map_err(|_| {
                PlistError::InvalidLiteral {
                    kind: "real",
                    value: text.to_string(),
                }
            })?),
            "true" => PlistValue::Bool(true),
            "false" => PlistValue::Bool(false),
            "date" => PlistValue::Date(text.trim().to_string()),
            "data" => PlistValue::Data(text.chars().filter(|c| !c.is_whitespace()).collect()),
            other => return Err(PlistError::UnexpectedElement(other.to_string())),
        };
        self.push_value(value)
    }

    fn finish(self, scalar_open: bool) -> Result<PlistValue, PlistError> {
        if scalar_open || !self.stack.is_empty() {
            return Err(PlistError::UnexpectedEof);
        }
        self.root.ok_or(PlistError::Empty)
    }
}

fn is_scalar_tag(tag: &str) -> bool {
    matches!(
        tag,
        "key" | "string" | "integer" | "real" | "true" | "false" | "date" | "data"
    )
}

fn read_document<R: BufRead>(mut reader: Reader<R>) -> Result<PlistValue, PlistError> {
    let mut buf = Vec::new();
    let mut builder = TreeBuilder::default();
    // Open scalar element and the text collected for it so far
    let mut scalar: Option<(String, String)> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if scalar.is_some() {
                    return Err(PlistError::UnexpectedElement(tag));
                }
                match tag.as_str() {
                    "plist" => {}
                    "dict" => builder.open_dict(),
                    "array" => builder.open_array(),
                    t if is_scalar_tag(t) => scalar = Some((t.to_string(), String::new())),
                    other => return Err(PlistError::UnexpectedElement(other.to_string())),
                }
            }
            Event::Empty(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if scalar.is_some() {
                    return Err(PlistError::UnexpectedElement(tag));
                }
                match tag.as_str() {
                    "plist" => {}
                    "dict" => builder.push_value(PlistValue::Dict(PlistDict::new()))?,
                    "array" => builder.push_value(PlistValue::Array(Vec::new()))?,
                    t if is_scalar_tag(t) => builder.push_scalar(t, "")?,
                    other => return Err(PlistError::UnexpectedElement(other.to_string())),
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                match scalar.as_mut() {
                    Some((_, collected)) => collected.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(PlistError::UnexpectedText(text.trim().to_string())),
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e);
                match scalar.as_mut() {
                    Some((_, collected)) => collected.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(PlistError::UnexpectedText(text.trim().to_string())),
                }
            }
            Event::End(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match scalar.take() {
                    Some((open, text)) if open == tag => builder.push_scalar(&open, &text)?,
                    Some(_) => return Err(PlistError::UnexpectedElement(format!("/{}", tag))),
                    None => match tag.as_str() {
                        "plist" => {}
                        "dict" | "array" => builder.close(&tag)?,
                        _ => return Err(PlistError::UnexpectedElement(format!("/{}", tag))),
                    },
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    builder.finish(scalar.is_some())
}
