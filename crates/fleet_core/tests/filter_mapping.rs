use fleet_core::{map_filters, FilterField, FilterSet, ScopeContext};
use pretty_assertions::assert_eq;

fn mapped(filters: &FilterSet) -> Vec<(String, String)> {
    map_filters(filters, &ScopeContext::unscoped())
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn availability_all_emits_no_key() {
    let filters = FilterSet::new().with(FilterField::Availability, "all");
    let api = map_filters(&filters, &ScopeContext::unscoped());
    assert!(!api.contains_key("info_availabilityStatus"));
    assert!(api.is_empty());
}

#[test]
fn availability_synonyms_collapse() {
    for (input, expected) in [
        ("yes", "available"),
        ("available", "available"),
        ("no", "unavailable"),
        ("UNAVAILABLE", "unavailable"),
    ] {
        let filters = FilterSet::new().with(FilterField::Availability, input);
        let api = map_filters(&filters, &ScopeContext::unscoped());
        assert_eq!(api.get("info_availabilityStatus"), Some(expected), "{input}");
    }
}

#[test]
fn unknown_availability_token_emits_no_key() {
    let filters = FilterSet::new().with(FilterField::Availability, "maybe");
    assert!(mapped(&filters).is_empty());
}

#[test]
fn invalid_seat_counts_are_dropped() {
    let valid = FilterSet::new().with(FilterField::Seats, "5");
    assert_eq!(
        mapped(&valid),
        vec![("info_seats".to_string(), "5".to_string())]
    );

    for bad in ["", "five", "5.5", "-2", " 5"] {
        let filters = FilterSet::new().with(FilterField::Seats, bad);
        assert!(mapped(&filters).is_empty(), "{bad:?}");
    }

    let numeric = FilterSet::new().with(FilterField::Seats, 7u32);
    assert_eq!(
        mapped(&numeric),
        vec![("info_seats".to_string(), "7".to_string())]
    );
}

#[test]
fn free_text_passes_verbatim_when_non_empty() {
    let filters = FilterSet::new()
        .with(FilterField::Brand, "Toyota")
        .with(FilterField::Model, "Corolla Cross")
        .with(FilterField::Plate, "   ")
        .with(FilterField::Vin, "");

    assert_eq!(
        mapped(&filters),
        vec![
            ("info_brand".to_string(), "Toyota".to_string()),
            ("info_model".to_string(), "Corolla Cross".to_string()),
        ]
    );
}

#[test]
fn tenant_scope_is_injected_unless_overridden() {
    let scope = ScopeContext::tenant("acme");

    let api = map_filters(&FilterSet::new(), &scope);
    assert_eq!(api.get("company_id"), Some("acme"));

    let explicit = FilterSet::new().with(FilterField::Company, "globex");
    let api = map_filters(&explicit, &scope);
    assert_eq!(api.get("company_id"), Some("globex"));

    let blank = FilterSet::new().with(FilterField::Company, "");
    let api = map_filters(&blank, &scope);
    assert_eq!(api.get("company_id"), Some("acme"));

    let api = map_filters(&FilterSet::new(), &ScopeContext::unscoped());
    assert!(!api.contains_key("company_id"));
}

#[test]
fn unknown_ui_fields_are_ignored() {
    let filters = FilterSet::from_pairs([("brand", "x"), ("colour", "red")]);
    assert_eq!(filters, FilterSet::new().with(FilterField::Brand, "x"));
}

#[test]
fn mapping_is_deterministic() {
    let filters = FilterSet::from_pairs([("brand", "x"), ("seats", "4"), ("availability", "no")]);
    let scope = ScopeContext::tenant("t1");
    assert_eq!(map_filters(&filters, &scope), map_filters(&filters, &scope));
}
