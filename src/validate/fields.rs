//! Per-field type and domain checks
//!
//! Every reader records its failures and returns `None`, so one pass over the
//! document collects all problems.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::domain::{DieArea, DiodeInsertion, FloorplanSizing, SynthObjective, SynthStrategy};
use crate::error::{ConfigError, Diagnostics};
use crate::resolve::PathResolver;

static HDL_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").expect("valid regex"));

const DIE_AREA_SHAPE: &str = "four numbers \"x0 y0 x1 y1\"";
const STRATEGY_SHAPE: &str = "\"<OBJECTIVE> <variant>\" such as \"AREA 0\"";

/// Short human description of a document value, used in schema errors.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string \"{s}\""),
        Value::Array(items) => format!("list of {} items", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

pub(crate) struct FieldReader<'a> {
    doc: &'a Map<String, Value>,
    base_directory: &'a Path,
    resolver: &'a dyn PathResolver,
    diags: Diagnostics,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(
        doc: &'a Map<String, Value>,
        base_directory: &'a Path,
        resolver: &'a dyn PathResolver,
    ) -> Self {
        Self { doc, base_directory, resolver, diags: Diagnostics::new() }
    }

    pub(crate) fn push(&mut self, error: ConfigError) {
        self.diags.push(error);
    }

    pub(crate) fn into_diagnostics(self) -> Diagnostics {
        self.diags
    }

    fn get(&mut self, key: &str, required: bool) -> Option<&'a Value> {
        let value = self.doc.get(key);
        if value.is_none() && required {
            self.diags.push(ConfigError::missing(key));
        }
        value
    }

    fn schema(&mut self, key: &str, expected: &str, value: &Value) {
        self.diags.push(ConfigError::schema(key, expected, describe(value)));
    }

    /// Non-empty string.
    pub(crate) fn string(&mut self, key: &str, required: bool) -> Option<String> {
        let value = self.get(key, required)?;
        let Some(s) = value.as_str() else {
            self.schema(key, "string", value);
            return None;
        };
        if s.trim().is_empty() {
            self.diags.push(ConfigError::domain(key, "\"\"", "non-empty string"));
            return None;
        }
        Some(s.to_string())
    }

    /// Non-empty string that is also a plain HDL identifier.
    pub(crate) fn identifier(&mut self, key: &str, required: bool) -> Option<String> {
        let s = self.string(key, required)?;
        if !HDL_IDENTIFIER.is_match(&s) {
            self.diags.push(ConfigError::domain(
                key,
                format!("\"{s}\""),
                "identifier matching [A-Za-z_][A-Za-z0-9_$]*",
            ));
            return None;
        }
        Some(s)
    }

    pub(crate) fn boolean(&mut self, key: &str) -> Option<bool> {
        let value = self.get(key, false)?;
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.schema(key, "boolean", value);
                None
            }
        }
    }

    fn number(&mut self, key: &str, required: bool) -> Option<f64> {
        let value = self.get(key, required)?;
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                self.schema(key, "number", value);
                None
            }
        }
    }

    /// Real number strictly greater than zero.
    pub(crate) fn positive_real(&mut self, key: &str, required: bool) -> Option<f64> {
        let n = self.number(key, required)?;
        if n <= 0.0 {
            self.diags.push(ConfigError::domain(key, n, "> 0"));
            return None;
        }
        Some(n)
    }

    /// Real number in the half-open interval (0, 1].
    pub(crate) fn unit_fraction(&mut self, key: &str) -> Option<f64> {
        let n = self.number(key, false)?;
        if n <= 0.0 || n > 1.0 {
            self.diags.push(ConfigError::domain(key, n, "(0, 1]"));
            return None;
        }
        Some(n)
    }

    /// Integer literal no smaller than `min`, fitting in `u32`.
    pub(crate) fn integer(&mut self, key: &str, min: u32) -> Option<u32> {
        let value = self.get(key, false)?;
        let Some(n) = value.as_i64().map(i128::from).or_else(|| value.as_u64().map(i128::from))
        else {
            self.schema(key, "integer", value);
            return None;
        };
        if n < i128::from(min) {
            self.diags.push(ConfigError::domain(key, n, format!(">= {min}")));
            return None;
        }
        match u32::try_from(n) {
            Ok(n) => Some(n),
            Err(_) => {
                self.diags.push(ConfigError::domain(key, n, format!("<= {}", u32::MAX)));
                None
            }
        }
    }

    fn resolve(&mut self, key: &str, raw: &str) -> Option<PathBuf> {
        if raw.trim().is_empty() {
            self.diags.push(ConfigError::domain(key, "\"\"", "non-empty path"));
            return None;
        }
        match self.resolver.resolve(self.base_directory, raw) {
            Ok(path) => Some(path),
            Err(e) => {
                self.diags.push(ConfigError::UnresolvedReference {
                    field: key.to_string(),
                    reference: raw.to_string(),
                    reason: e.reason,
                });
                None
            }
        }
    }

    pub(crate) fn path(&mut self, key: &str) -> Option<PathBuf> {
        let value = self.get(key, false)?;
        let Some(raw) = value.as_str() else {
            self.schema(key, "path string", value);
            return None;
        };
        self.resolve(key, raw)
    }

    /// Non-empty ordered list of paths. Order is kept as written.
    pub(crate) fn path_list(&mut self, key: &str, required: bool) -> Option<Vec<PathBuf>> {
        let value = self.get(key, required)?;
        let Some(items) = value.as_array() else {
            self.schema(key, "list of path strings", value);
            return None;
        };
        if items.is_empty() {
            self.diags.push(ConfigError::domain(key, "[]", "at least one entry"));
            return None;
        }

        let mut paths = Vec::with_capacity(items.len());
        let mut failed = false;
        for (index, item) in items.iter().enumerate() {
            let resolved = match item.as_str() {
                Some(raw) => self.resolve(key, raw),
                None => {
                    self.diags.push(ConfigError::schema(
                        key,
                        "list of path strings",
                        format!("{} at index {}", describe(item), index),
                    ));
                    None
                }
            };
            match resolved {
                Some(path) => paths.push(path),
                None => failed = true,
            }
        }

        if failed {
            None
        } else {
            Some(paths)
        }
    }

    /// Rectangle given as `"x0 y0 x1 y1"` or as a list of four numbers.
    pub(crate) fn die_area(&mut self, key: &str) -> Option<DieArea> {
        let value = self.get(key, false)?;
        let coords: Option<Vec<f64>> = match value {
            Value::String(s) => s.split_whitespace().map(|t| t.parse::<f64>().ok()).collect(),
            Value::Array(items) => items.iter().map(Value::as_f64).collect(),
            _ => None,
        };
        let coords = match coords {
            Some(c) if c.len() == 4 && c.iter().all(|n| n.is_finite()) => c,
            _ => {
                self.schema(key, DIE_AREA_SHAPE, value);
                return None;
            }
        };

        let area = DieArea { x0: coords[0], y0: coords[1], x1: coords[2], y1: coords[3] };
        let mut valid = true;
        if area.width() <= 0.0 {
            self.diags.push(ConfigError::domain(key, area, "x1 > x0"));
            valid = false;
        }
        if area.height() <= 0.0 {
            self.diags.push(ConfigError::domain(key, area, "y1 > y0"));
            valid = false;
        }
        valid.then_some(area)
    }

    pub(crate) fn floorplan_sizing(&mut self, key: &str) -> Option<FloorplanSizing> {
        let s = self.string(key, false)?;
        let sizing = s.parse::<FloorplanSizing>().ok()?;
        if let FloorplanSizing::Extension(name) = &sizing {
            tracing::debug!("{} uses extension sizing mode '{}'", key, name);
        }
        Some(sizing)
    }

    pub(crate) fn synth_strategy(&mut self, key: &str) -> Option<SynthStrategy> {
        let value = self.get(key, false)?;
        let Some(raw) = value.as_str() else {
            self.schema(key, STRATEGY_SHAPE, value);
            return None;
        };

        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let parsed = match tokens.as_slice() {
            [objective, variant] => variant.parse::<i64>().ok().map(|v| (*objective, v)),
            _ => None,
        };
        let Some((objective, variant)) = parsed else {
            self.schema(key, STRATEGY_SHAPE, value);
            return None;
        };

        let objective = SynthObjective::parse(objective);
        let max = objective.max_variant().map_or(i64::from(u32::MAX), i64::from);
        if !(0..=max).contains(&variant) {
            self.diags.push(ConfigError::domain(
                key,
                format!("\"{raw}\""),
                format!("{objective} variant in 0..={max}"),
            ));
            return None;
        }

        let variant = u32::try_from(variant).ok()?;
        Some(SynthStrategy { objective, variant })
    }

    pub(crate) fn diode_insertion(&mut self, key: &str) -> Option<DiodeInsertion> {
        self.integer(key, 0).map(DiodeInsertion::from_code)
    }
}
