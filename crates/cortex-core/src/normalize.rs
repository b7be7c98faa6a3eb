//! Loose JSON input → canonical [`StatBlock`].
//!
//! Rating values arrive in several shapes (`8`, `"d8"`, `null`, `{ "dieRating": 8 }`). They are
//! classified once into [`LooseRating`] and resolved to a [`Rating`]; everything downstream only
//! sees the canonical form. Validation is eager: the first violation aborts the whole block.

use crate::model::{DieFace, Rating, StatBlock, Trait};
use crate::template::TemplateKind;
use crate::{Error, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Number, Value};

const DIE_DOMAIN: &str = "4, 6, 8, 10, 12 or null";

fn die_string_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[dD]?([0-9]+)$").expect("valid regex"))
}

/// Result of parsing one code block body.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBlock {
    StatBlock(StatBlock),
    /// `{ "template": "<known name>" }`: the block asks to be replaced by a starter sheet.
    Template(TemplateKind),
}

/// Parses a code block body. Template requests are recognized before schema validation.
pub fn parse_block(text: &str) -> Result<ParsedBlock> {
    let value: Value = serde_json::from_str(text)?;
    if let Some(kind) = TemplateKind::requested_by(&value) {
        return Ok(ParsedBlock::Template(kind));
    }
    Ok(ParsedBlock::StatBlock(normalize(&value)?))
}

pub fn parse_stat_block(text: &str) -> Result<StatBlock> {
    let value: Value = serde_json::from_str(text)?;
    normalize(&value)
}

pub fn normalize(raw: &Value) -> Result<StatBlock> {
    let root = expect_object(raw, "statblock")?;

    let name = required_str(root, "name", "name")?;
    if name.is_empty() {
        return Err(Error::validation("name", "must not be empty"));
    }

    let layout = optional_str(root, "layout", "layout")?;

    let traits_value = root
        .get("traits")
        .ok_or_else(|| Error::validation("traits", "missing required field"))?;
    let Value::Array(items) = traits_value else {
        return Err(Error::validation(
            "traits",
            format!("expected an array, got {}", type_name(traits_value)),
        ));
    };

    let traits = items
        .iter()
        .enumerate()
        .map(|(idx, item)| normalize_trait(item, &format!("traits[{idx}]")))
        .collect::<Result<Vec<_>>>()?;

    Ok(StatBlock {
        name: name.to_string(),
        layout: layout.map(str::to_string),
        traits,
    })
}

fn normalize_trait(raw: &Value, path: &str) -> Result<Trait> {
    let obj = expect_object(raw, path)?;

    let title = required_str(obj, "title", &format!("{path}.title"))?;
    let layout_region = optional_str(obj, "layoutRegion", &format!("{path}.layoutRegion"))?;

    let sfx = match obj.get("sfx") {
        None => None,
        Some(value) => {
            let sfx_path = format!("{path}.sfx");
            let entries = expect_object(value, &sfx_path)?;
            let mut out = IndexMap::with_capacity(entries.len());
            for (label, text) in entries {
                let Value::String(text) = text else {
                    return Err(Error::validation(
                        format!("{sfx_path}.{label}"),
                        format!("expected a string, got {}", type_name(text)),
                    ));
                };
                out.insert(label.clone(), text.clone());
            }
            Some(out)
        }
    };

    let ratings_path = format!("{path}.ratings");
    let ratings_value = obj
        .get("ratings")
        .ok_or_else(|| Error::validation(&ratings_path, "missing required field"))?;
    let entries = expect_object(ratings_value, &ratings_path)?;
    let mut ratings = IndexMap::with_capacity(entries.len());
    for (label, value) in entries {
        let rating = normalize_rating(value, &format!("{ratings_path}.{label}"))?;
        ratings.insert(label.clone(), rating);
    }

    Ok(Trait {
        title: title.to_string(),
        layout_region: layout_region.map(str::to_string),
        sfx,
        ratings,
    })
}

/// Accepted input shapes for a single rating.
#[derive(Debug, Clone, PartialEq)]
pub enum LooseRating<'a> {
    /// A number, or a `d`-prefixed numeric string already stripped to its digits.
    Sides(i64),
    Null,
    Object(&'a Map<String, Value>),
}

impl<'a> LooseRating<'a> {
    pub fn classify(value: &'a Value, path: &str) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Number(n) => integral(n).map(Self::Sides).ok_or_else(|| {
                Error::validation(path, format!("expected a die rating ({DIE_DOMAIN}), got {n}"))
            }),
            Value::String(s) => {
                let digits = die_string_regex()
                    .captures(s)
                    .and_then(|caps| caps.get(1))
                    .ok_or_else(|| {
                        Error::validation(path, format!("{s:?} is not a die rating"))
                    })?;
                digits.as_str().parse::<i64>().map(Self::Sides).map_err(|_| {
                    Error::validation(path, format!("{s:?} is not a die rating"))
                })
            }
            Value::Object(map) => Ok(Self::Object(map)),
            other => Err(Error::validation(
                path,
                format!(
                    "expected a die rating ({DIE_DOMAIN}) or an object with dieRating, got {}",
                    type_name(other)
                ),
            )),
        }
    }

    pub fn resolve(self, path: &str) -> Result<Rating> {
        match self {
            Self::Null => Ok(Rating::unrated()),
            Self::Sides(sides) => die_face_from_sides(sides, path).map(Rating::new),
            Self::Object(map) => {
                let die_path = format!("{path}.dieRating");
                let die_rating = match map.get("dieRating") {
                    None => return Err(Error::validation(die_path, "missing required field")),
                    Some(Value::Null) => DieFace::Unrated,
                    Some(Value::Number(n)) => match integral(n) {
                        Some(sides) => die_face_from_sides(sides, &die_path)?,
                        None => {
                            return Err(Error::validation(
                                die_path,
                                format!("expected one of {DIE_DOMAIN}, got {n}"),
                            ));
                        }
                    },
                    Some(other) => {
                        return Err(Error::validation(
                            die_path,
                            format!("expected one of {DIE_DOMAIN}, got {}", type_name(other)),
                        ));
                    }
                };
                let description = optional_str(map, "description", &format!("{path}.description"))?;
                Ok(Rating {
                    die_rating,
                    description: description.map(str::to_string),
                })
            }
        }
    }
}

pub fn normalize_rating(value: &Value, path: &str) -> Result<Rating> {
    LooseRating::classify(value, path)?.resolve(path)
}

/// Integer value of `n`, including integer-valued floats such as `8.0` or `1e1`.
fn integral(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= i32::MAX as f64)
            .map(|f| f as i64)
    })
}

fn die_face_from_sides(sides: i64, path: &str) -> Result<DieFace> {
    DieFace::from_sides(sides).ok_or_else(|| {
        Error::validation(path, format!("expected one of {DIE_DOMAIN}, got {sides}"))
    })
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        Error::validation(path, format!("expected an object, got {}", type_name(value)))
    })
}

fn required_str<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a str> {
    match obj.get(key) {
        None => Err(Error::validation(path, "missing required field")),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(Error::validation(
            path,
            format!("expected a string, got {}", type_name(other)),
        )),
    }
}

fn optional_str<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a str>> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(Error::validation(
            path,
            format!("expected a string, got {}", type_name(other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
