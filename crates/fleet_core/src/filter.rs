use std::collections::BTreeMap;
use std::fmt;

use fleet_logging::fleet_debug;
use serde::Serialize;

/// A scalar value supplied by a filter control.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    Text(String),
    Number(i64),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(text) => f.write_str(text),
            FilterValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Number(i64::from(value))
    }
}

/// Filter controls known to the vehicle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    Brand,
    Model,
    Plate,
    Vin,
    Seats,
    Availability,
    Company,
}

impl FilterField {
    pub const ALL: [FilterField; 7] = [
        FilterField::Brand,
        FilterField::Model,
        FilterField::Plate,
        FilterField::Vin,
        FilterField::Seats,
        FilterField::Availability,
        FilterField::Company,
    ];

    /// Resolves a UI-level field name. Unknown names yield `None`.
    pub fn from_ui_name(name: &str) -> Option<Self> {
        match name {
            "brand" => Some(FilterField::Brand),
            "model" => Some(FilterField::Model),
            "plate" | "plateNumber" => Some(FilterField::Plate),
            "vin" => Some(FilterField::Vin),
            "seats" => Some(FilterField::Seats),
            "availability" => Some(FilterField::Availability),
            "company" | "companyId" => Some(FilterField::Company),
            _ => None,
        }
    }

    /// Backend query parameter name for this field.
    pub const fn api_name(self) -> &'static str {
        match self {
            FilterField::Brand => "info_brand",
            FilterField::Model => "info_model",
            FilterField::Plate => "info_plateNumber",
            FilterField::Vin => "info_vin",
            FilterField::Seats => "info_seats",
            FilterField::Availability => "info_availabilityStatus",
            FilterField::Company => "company_id",
        }
    }
}

/// UI-level constraints on the vehicle list. A `None` field means "no constraint".
///
/// Every change goes through a consuming builder so a new value is produced per edit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterSet {
    brand: Option<FilterValue>,
    model: Option<FilterValue>,
    plate: Option<FilterValue>,
    vin: Option<FilterValue>,
    seats: Option<FilterValue>,
    availability: Option<FilterValue>,
    company: Option<FilterValue>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter set from `(ui_name, value)` pairs, ignoring unknown names.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<FilterValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |set, (name, value)| set.with_ui_field(name.as_ref(), value))
    }

    pub fn with(mut self, field: FilterField, value: impl Into<FilterValue>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    pub fn with_ui_field(self, name: &str, value: impl Into<FilterValue>) -> Self {
        match FilterField::from_ui_name(name) {
            Some(field) => self.with(field, value),
            None => {
                fleet_debug!("Ignoring unknown filter field {:?}", name);
                self
            }
        }
    }

    pub fn get(&self, field: FilterField) -> Option<&FilterValue> {
        match field {
            FilterField::Brand => self.brand.as_ref(),
            FilterField::Model => self.model.as_ref(),
            FilterField::Plate => self.plate.as_ref(),
            FilterField::Vin => self.vin.as_ref(),
            FilterField::Seats => self.seats.as_ref(),
            FilterField::Availability => self.availability.as_ref(),
            FilterField::Company => self.company.as_ref(),
        }
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut Option<FilterValue> {
        match field {
            FilterField::Brand => &mut self.brand,
            FilterField::Model => &mut self.model,
            FilterField::Plate => &mut self.plate,
            FilterField::Vin => &mut self.vin,
            FilterField::Seats => &mut self.seats,
            FilterField::Availability => &mut self.availability,
            FilterField::Company => &mut self.company,
        }
    }
}

/// Session-level scope applied to every request unless a filter overrides it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ScopeContext {
    pub active_tenant: Option<String>,
}

impl ScopeContext {
    pub fn tenant(id: impl Into<String>) -> Self {
        Self {
            active_tenant: Some(id.into()),
        }
    }

    pub fn unscoped() -> Self {
        Self::default()
    }
}

/// Backend query filters, keyed by backend field name and kept in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct ApiFilterSet(BTreeMap<String, String>);

impl ApiFilterSet {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: &str, value: String) {
        self.0.insert(key.to_string(), value);
    }
}

/// Maps UI filters to backend query filters.
///
/// Never fails: malformed values are omitted. The only input besides the filters
/// themselves is `scope`, which supplies `company_id` when the filters do not.
pub fn map_filters(ui: &FilterSet, scope: &ScopeContext) -> ApiFilterSet {
    let mut api = ApiFilterSet::default();

    for field in FilterField::ALL {
        let Some(value) = ui.get(field) else {
            continue;
        };
        let mapped = match field {
            FilterField::Brand
            | FilterField::Model
            | FilterField::Plate
            | FilterField::Vin
            | FilterField::Company => free_text(value),
            FilterField::Seats => strict_count(value),
            FilterField::Availability => availability(value).map(ToOwned::to_owned),
        };
        match mapped {
            Some(mapped) => api.insert(field.api_name(), mapped),
            None => fleet_debug!("Dropping filter {:?}={}", field, value),
        }
    }

    if !api.contains_key(FilterField::Company.api_name()) {
        if let Some(tenant) = scope
            .active_tenant
            .as_deref()
            .filter(|tenant| !tenant.trim().is_empty())
        {
            api.insert(FilterField::Company.api_name(), tenant.to_string());
        }
    }

    api
}

fn free_text(value: &FilterValue) -> Option<String> {
    match value {
        FilterValue::Text(text) if text.trim().is_empty() => None,
        FilterValue::Text(text) => Some(text.clone()),
        FilterValue::Number(n) => Some(n.to_string()),
    }
}

fn strict_count(value: &FilterValue) -> Option<String> {
    match value {
        FilterValue::Text(text) if is_integer_string(text) => Some(text.clone()),
        FilterValue::Text(_) => None,
        FilterValue::Number(n) if *n >= 0 => Some(n.to_string()),
        FilterValue::Number(_) => None,
    }
}

fn is_integer_string(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn availability(value: &FilterValue) -> Option<&'static str> {
    let FilterValue::Text(text) = value else {
        return None;
    };
    match text.trim().to_ascii_lowercase().as_str() {
        "yes" | "available" => Some("available"),
        "no" | "unavailable" => Some("unavailable"),
        _ => None,
    }
}
