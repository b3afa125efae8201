//! Template data model and registry for devwiz.
//!
//! Device templates are externally authored YAML documents describing the
//! parameters a device needs, how those parameters depend on each other, and
//! which external capabilities (sponsorship, broker, certificate) they demand.
//! Templates are read-only input: the resolver works on an owned working copy
//! of the parameter list and never mutates the registry.
//!
//! # Structure
//!
//! - [`Template`] - ordered parameter list plus requirements and an optional
//!   variant catalog
//! - [`Param`] - a single typed parameter with dependencies, visibility flags
//!   and presentation aids
//! - [`Value`] / [`ResolvedConfig`] - the tagged value model and the
//!   insertion-ordered output map
//! - [`Registry`] - template loading, category filtering, and title sorting
//!
//! # Dependency semantics
//!
//! A parameter's dependencies are AND-ed predicates against values resolved
//! earlier in the same pass. A dependency may only usefully reference a
//! parameter declared *earlier* in the template; a forward or unknown
//! reference never matches and simply deactivates the parameter.

pub mod registry;

#[cfg(test)]
mod model_tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use registry::Registry;

/// Reserved parameter name: device usage/category.
///
/// When the selected device category carries a usage filter, this parameter is
/// set directly from the filter and never prompted.
pub const PARAM_USAGE: &str = "usage";

/// Reserved parameter name: bus-interface selector.
///
/// The variant expander writes the chosen interface key into this parameter;
/// the collector copies it into the output verbatim without prompting.
pub const PARAM_INTERFACE: &str = "interface";

/// A resolved configuration value.
///
/// Parameters resolve to strings, booleans, or ordered string lists. The
/// variant is determined by the parameter's declared [`ParamType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Plain string value (also used for choice parameters)
    String(String),
    /// Boolean value
    Bool(bool),
    /// Ordered list of non-empty strings
    List(Vec<String>),
}

impl Value {
    /// String form used by dependency comparisons.
    ///
    /// Lists have no string form and never satisfy an `equal` predicate.
    pub fn as_comparable(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Bool(b) => Some(b.to_string()),
            Self::List(_) => None,
        }
    }

    /// True iff this value is exactly the empty string.
    ///
    /// Booleans and lists are never "empty" in the dependency-predicate sense.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Self::String(s) if s.is_empty())
    }

    /// Build a typed value from a collected raw string.
    pub fn from_raw(value_type: ParamType, raw: &str) -> Self {
        match value_type {
            ParamType::Bool => Self::Bool(raw.trim().eq_ignore_ascii_case("true")),
            _ => Self::String(raw.to_string()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::List(items) => items.serialize(serializer),
        }
    }
}

/// The resolved configuration map: parameter name to [`Value`], in insertion
/// (declaration) order.
///
/// Presence in the map is the contract for "this value applies": skipped
/// parameters (dependency unmet, deprecated, suppressed) are absent, not
/// defaulted. Templates hold a few dozen parameters at most, so lookups scan.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    entries: Vec<(String, Value)>,
}

impl ResolvedConfig {
    /// Create an empty configuration map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, preserving first-insertion order.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Look up a resolved value by parameter name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Whether a parameter is present in the map.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of resolved entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl Serialize for ResolvedConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Value type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Free-form string (the default)
    #[default]
    String,
    /// Boolean, collected as yes/no
    Bool,
    /// Repeated string values collected in a loop
    #[serde(rename = "stringlist")]
    StringList,
    /// One value out of a fixed choice list
    Choice,
    /// Structural variant, expanded when declared under the reserved
    /// `interface` name
    Variant,
}

/// Dependency predicate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyCheck {
    /// Referenced value is the empty string
    Empty,
    /// Referenced value is a non-empty string
    NotEmpty,
    /// Referenced value equals a literal, compared as a string
    Equal,
}

/// A single dependency predicate on an earlier-declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dependency {
    /// Name of the referenced parameter
    pub name: String,
    /// Predicate kind
    pub check: DependencyCheck,
    /// Comparison literal for [`DependencyCheck::Equal`]
    pub value: String,
}

impl Default for Dependency {
    fn default() -> Self {
        Self {
            name: String::new(),
            check: DependencyCheck::NotEmpty,
            value: String::new(),
        }
    }
}

/// External capability a template or parameter requires before collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementTag {
    /// A valid sponsorship token must be configured (paid feature)
    Sponsorship,
    /// A message broker must be configured and reachable
    Broker,
    /// A device certificate must be issued
    Certificate,
}

impl fmt::Display for RequirementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sponsorship => "sponsorship",
            Self::Broker => "broker",
            Self::Certificate => "certificate",
        };
        f.write_str(s)
    }
}

/// Requirements block of a template or parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Requirements {
    /// Capability tags to satisfy before collection
    pub tags: Vec<RequirementTag>,
    /// Human-readable description shown before satisfying the tags
    pub description: String,
    /// Link with further setup instructions
    pub uri: String,
}

impl Requirements {
    /// Whether a specific tag is present.
    #[must_use]
    pub fn has(&self, tag: RequirementTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Whether there is nothing to satisfy or show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.description.is_empty()
    }
}

/// A single template parameter.
///
/// All fields are optional in YAML except `name`; the serde defaults mirror
/// what template authors may omit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Param {
    /// Unique name within the template
    pub name: String,
    /// Value type; defaults to string
    #[serde(rename = "type")]
    pub value_type: ParamType,
    /// Localized-description stand-in; falls back to `name` as the label
    pub description: String,
    /// Help text shown on request
    pub help: String,
    /// Default value offered at the prompt and used as dependency fallback
    pub default: String,
    /// Example value shown at the prompt
    pub example: String,
    /// Allowed keys for choice and variant parameters
    pub choice: Vec<String>,
    /// Validation values for the prompt boundary
    pub valid_values: Vec<String>,
    /// Dependency predicates, all of which must hold
    pub dependencies: Vec<Dependency>,
    /// Capabilities required before this parameter may be collected
    pub requirements: Requirements,
    /// Only collected in advanced mode
    pub advanced: bool,
    /// Never prompted; resolved from the default when one exists
    pub hidden: bool,
    /// Never collected, never present in the output
    pub deprecated: bool,
    /// Mask input at the prompt (secrets)
    pub mask: bool,
    /// An empty answer is not accepted
    pub required: bool,
    /// Value slot written by the variant expander, empty otherwise
    pub value: String,
}

impl Param {
    /// Prompt label: the description when present, the raw name otherwise.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.description.is_empty() {
            &self.name
        } else {
            &self.description
        }
    }
}

/// One selectable key of a structural variant: its description, the concrete
/// sub-parameters it contributes, and default values back-filled after
/// expansion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VariantInterface {
    /// Human-readable description used when asking which key to pick
    pub description: String,
    /// Concrete sub-parameters injected into the working list
    pub params: Vec<Param>,
    /// Defaults back-filled into the injected sub-parameters
    pub defaults: BTreeMap<String, String>,
}

/// Catalog of configured variant interfaces, keyed by variant key.
///
/// An empty catalog makes variant expansion a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantCatalog {
    /// Configured interfaces by key
    pub interfaces: BTreeMap<String, VariantInterface>,
}

impl VariantCatalog {
    /// Whether any interface is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

/// Device class a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Energy meters (grid, pv, battery)
    #[default]
    Meter,
    /// Charging hardware
    Charger,
    /// Vehicles
    Vehicle,
}

/// Device category the user configures a device for.
///
/// Categories map to a device class, a usage filter applied to the reserved
/// `usage` parameter, and a prefix for generated device names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCategory {
    /// Wallbox / charging station
    Charger,
    /// Photovoltaic production meter
    PvMeter,
    /// Grid connection meter
    GridMeter,
    /// Home-battery meter
    BatteryMeter,
    /// Electric vehicle
    Vehicle,
}

impl DeviceCategory {
    /// All categories, in the order the wizard offers them.
    pub const ALL: [Self; 5] = [
        Self::GridMeter,
        Self::PvMeter,
        Self::BatteryMeter,
        Self::Charger,
        Self::Vehicle,
    ];

    /// Device class this category selects templates from.
    #[must_use]
    pub fn class(self) -> DeviceClass {
        match self {
            Self::PvMeter | Self::GridMeter | Self::BatteryMeter => DeviceClass::Meter,
            Self::Charger => DeviceClass::Charger,
            Self::Vehicle => DeviceClass::Vehicle,
        }
    }

    /// Fixed value for the reserved `usage` parameter, when the category
    /// constrains usage.
    #[must_use]
    pub fn usage_filter(self) -> Option<&'static str> {
        match self {
            Self::PvMeter => Some("pv"),
            Self::GridMeter => Some("grid"),
            Self::BatteryMeter => Some("battery"),
            Self::Charger | Self::Vehicle => None,
        }
    }

    /// Prefix for generated device names (`pv1`, `charger2`, ...).
    #[must_use]
    pub fn default_name(self) -> &'static str {
        match self {
            Self::Charger => "charger",
            Self::PvMeter => "pv",
            Self::GridMeter => "grid",
            Self::BatteryMeter => "battery",
            Self::Vehicle => "vehicle",
        }
    }

    /// Label shown in category selection.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Charger => "Charger",
            Self::PvMeter => "PV meter",
            Self::GridMeter => "Grid meter",
            Self::BatteryMeter => "Battery meter",
            Self::Vehicle => "Vehicle",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A device template: ordered parameters plus requirements and an optional
/// variant catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Template {
    /// Template identifier
    pub template: String,
    /// Display title; falls back to the identifier
    pub title: String,
    /// Optional grouping ("generic", vendor line, ...); grouped templates
    /// sort after ungrouped ones
    pub group: String,
    /// Device class
    pub class: DeviceClass,
    /// Template-level requirements
    pub requirements: Requirements,
    /// Ordered parameter definitions
    pub params: Vec<Param>,
    /// Variant catalog for structural-variant parameters
    pub variants: Option<VariantCatalog>,
}

impl Template {
    /// Display title with the identifier as fallback.
    #[must_use]
    pub fn title(&self) -> &str {
        if self.title.is_empty() {
            &self.template
        } else {
            &self.title
        }
    }

    /// Find a parameter by name.
    #[must_use]
    pub fn param_by_name(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Choice values declared for a named parameter, across all declarations.
    #[must_use]
    pub fn choice_values(&self, name: &str) -> Vec<String> {
        self.params
            .iter()
            .filter(|p| p.name == name)
            .flat_map(|p| p.choice.iter().cloned())
            .collect()
    }

    /// Whether a named choice parameter contains the given value.
    #[must_use]
    pub fn choice_contains(&self, name: &str, filter: &str) -> bool {
        self.choice_values(name).iter().any(|c| c == filter)
    }
}
