//! API-name derivation for objects and fields.
//!
//! Custom objects and fields carry the `__c` suffix on the platform; the
//! standard objects never do. [`NameResolver`] owns the single allow-list of
//! standard object names and is handed to everything that needs to turn a
//! human-supplied object name into an API name.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::domain::error::DomainError;

/// Suffix the platform appends to custom object and field API names.
pub const CUSTOM_SUFFIX: &str = "__c";

/// Standard objects recognised out of the box.
const BUILTIN_STANDARD_OBJECTS: &[&str] = &[
    "Account",
    "Asset",
    "Campaign",
    "CampaignMember",
    "Case",
    "Contact",
    "Contract",
    "Event",
    "Lead",
    "Opportunity",
    "OpportunityLineItem",
    "Order",
    "OrderItem",
    "Pricebook2",
    "PricebookEntry",
    "Product2",
    "Quote",
    "Task",
    "User",
];

/// Immutable set of standard object names.
///
/// Cloning is cheap; every clone shares the same underlying set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardObjects(Arc<BTreeSet<String>>);

impl StandardObjects {
    /// Build a table from an explicit list of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Arc::new(names.into_iter().map(Into::into).collect()))
    }

    /// The built-in table extended with extra names.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            BUILTIN_STANDARD_OBJECTS
                .iter()
                .map(|s| (*s).to_string())
                .chain(extra.into_iter().map(Into::into)),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StandardObjects {
    fn default() -> Self {
        Self::new(BUILTIN_STANDARD_OBJECTS.iter().copied())
    }
}

/// Result of resolving a raw object name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedName {
    pub api_name: String,
    pub folder_name: String,
    pub is_standard: bool,
}

impl ResolvedName {
    pub fn is_custom(&self) -> bool {
        !self.is_standard
    }
}

impl fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.api_name)
    }
}

/// Derives canonical API and folder names from human-supplied object names.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    standard: StandardObjects,
}

impl NameResolver {
    pub fn new(standard: StandardObjects) -> Self {
        Self { standard }
    }

    pub fn standard_objects(&self) -> &StandardObjects {
        &self.standard
    }

    pub fn is_standard(&self, raw_name: &str) -> bool {
        self.standard.contains(raw_name)
    }

    /// Resolve an object name.
    ///
    /// Standard names and names already carrying the custom suffix come back
    /// unchanged, everything else gets the suffix. Resolving a resolved name
    /// is a fixed point.
    pub fn resolve(&self, raw_name: &str) -> ResolvedName {
        let is_standard = self.is_standard(raw_name);
        let api_name = if is_standard || raw_name.ends_with(CUSTOM_SUFFIX) {
            raw_name.to_string()
        } else {
            format!("{raw_name}{CUSTOM_SUFFIX}")
        };

        ResolvedName {
            folder_name: api_name.clone(),
            api_name,
            is_standard,
        }
    }
}

/// API name of a custom field. Always suffixed, whatever the field type.
pub fn field_api_name(name: &str) -> String {
    if name.ends_with(CUSTOM_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{CUSTOM_SUFFIX}")
    }
}

/// Default display label: every underscore becomes a space.
pub fn humanize(name: &str) -> String {
    name.replace('_', " ")
}

/// Name without the custom suffix, e.g. `Property__c` -> `Property`.
pub fn simple_name(api_name: &str) -> &str {
    api_name.strip_suffix(CUSTOM_SUFFIX).unwrap_or(api_name)
}

/// Check that a name can be used as an API identifier.
pub fn validate_identifier(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let base = simple_name(name);
    let Some(first) = base.chars().next() else {
        return Err(invalid("name cannot be empty"));
    };
    if !first.is_ascii_alphabetic() {
        return Err(invalid("must start with a letter"));
    }
    if !base.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("only letters, digits and underscores are allowed"));
    }
    if base.ends_with('_') || base.contains("__") {
        return Err(invalid("cannot end with '_' or contain '__'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_object_is_unchanged() {
        let resolved = NameResolver::default().resolve("Account");
        assert_eq!(resolved.api_name, "Account");
        assert_eq!(resolved.folder_name, "Account");
        assert!(resolved.is_standard);
    }

    #[test]
    fn custom_object_gets_suffix() {
        let resolved = NameResolver::default().resolve("Property");
        assert_eq!(resolved.api_name, "Property__c");
        assert_eq!(resolved.folder_name, "Property__c");
        assert!(resolved.is_custom());
    }

    #[test]
    fn suffixed_name_is_not_suffixed_twice() {
        let resolved = NameResolver::default().resolve("Property__c");
        assert_eq!(resolved.api_name, "Property__c");
        assert_eq!(resolved.folder_name, "Property__c");
    }

    #[test]
    fn resolve_is_a_fixed_point() {
        let resolver = NameResolver::default();
        for raw in ["Account", "Property", "Offer__c", "Broker_Agency", "Task"] {
            let once = resolver.resolve(raw);
            let twice = resolver.resolve(&once.api_name);
            assert_eq!(once.api_name, twice.api_name, "not idempotent for {raw}");
        }
    }

    #[test]
    fn injected_table_replaces_builtin() {
        let resolver = NameResolver::new(StandardObjects::new(["Invoice"]));
        assert_eq!(resolver.resolve("Invoice").api_name, "Invoice");
        assert_eq!(resolver.resolve("Account").api_name, "Account__c");
    }

    #[test]
    fn with_extra_keeps_builtin_names() {
        let table = StandardObjects::with_extra(["Individual"]);
        assert!(table.contains("Individual"));
        assert!(table.contains("Opportunity"));
    }

    #[test]
    fn field_names_are_always_suffixed() {
        assert_eq!(field_api_name("Price"), "Price__c");
        assert_eq!(field_api_name("Price__c"), "Price__c");
    }

    #[test]
    fn humanize_replaces_every_underscore() {
        assert_eq!(humanize("Listing_Start_Date"), "Listing Start Date");
        assert_eq!(humanize("Price"), "Price");
    }

    #[test]
    fn identifier_rules() {
        assert!(validate_identifier("Property").is_ok());
        assert!(validate_identifier("Property__c").is_ok());
        assert!(validate_identifier("Days_On_Market").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1Property").is_err());
        assert!(validate_identifier("Has Space").is_err());
        assert!(validate_identifier("Double__Under").is_err());
        assert!(validate_identifier("Trailing_").is_err());
    }
}
