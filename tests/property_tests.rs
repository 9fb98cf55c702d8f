/// Property-based tests using proptest
/// Invariants of the pure validation and paging helpers that must hold
/// for all inputs.
use chrono::NaiveDate;
use proptest::prelude::*;
use seguros_api::validation::{
    age_on, clamp_page_params, id_matches_fragment, is_valid_email, is_valid_name,
    is_valid_phone, validate_birth_date,
};

// Property: validators never panic on arbitrary input
proptest! {
    #[test]
    fn email_validation_never_panics(email in "\\PC*") {
        let _ = is_valid_email(&email);
    }

    #[test]
    fn name_validation_never_panics(name in "\\PC*") {
        let _ = is_valid_name(&name);
    }

    #[test]
    fn phone_validation_never_panics(phone in "\\PC*") {
        let _ = is_valid_phone(&phone);
    }
}

// Property: clamped paging parameters always land in their allowed ranges
proptest! {
    #[test]
    fn clamped_params_are_always_in_range(page in i64::MIN/2..i64::MAX/2, size in -1000i64..1000i64) {
        let (page_number, page_size) = clamp_page_params(page, size);
        prop_assert!(page_number >= 1);
        prop_assert!((1..=100).contains(&page_size));
    }

    #[test]
    fn in_range_params_pass_through_unchanged(page in 1i64..10_000, size in 1i64..=100) {
        prop_assert_eq!(clamp_page_params(page, size), (page, size));
    }

    #[test]
    fn total_pages_ceiling_holds(total in 0i64..1_000_000, size in 1i64..=100) {
        // Same integer arithmetic the service uses
        let total_pages = (total + size - 1) / size;
        prop_assert!(total_pages * size >= total);
        prop_assert!((total_pages - 1) * size < total);
    }
}

// Property: the search matcher agrees with plain string containment
proptest! {
    #[test]
    fn fragment_match_agrees_with_string_contains(id in 1i64..=i64::MAX, fragment in "[0-9]{1,9}") {
        prop_assert_eq!(
            id_matches_fragment(id, &fragment),
            id.to_string().contains(&fragment)
        );
    }

    #[test]
    fn full_id_always_matches_itself(id in 1i64..=i64::MAX) {
        prop_assert!(id_matches_fragment(id, &id.to_string()));
    }
}

// Property: the age rule is consistent with calendar arithmetic
proptest! {
    #[test]
    fn age_is_within_one_of_year_difference(
        birth_year in 1900i32..2100,
        birth_ord in 1u32..=365,
        today_year in 1900i32..2100,
        today_ord in 1u32..=365,
    ) {
        let birth = NaiveDate::from_yo_opt(birth_year, birth_ord).unwrap();
        let today = NaiveDate::from_yo_opt(today_year, today_ord).unwrap();
        let age = age_on(birth, today);
        let diff = today_year - birth_year;
        prop_assert!(age == diff || age == diff - 1);
    }

    #[test]
    fn underage_or_future_always_rejected(days_old in 0i64..6574) {
        // 6574 days is just under 18 years even across leap years
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let birth = today - chrono::Duration::days(days_old);
        prop_assert!(validate_birth_date(birth, today).is_err());
    }

    #[test]
    fn adults_always_accepted(years in 19i32..100, ord in 1u32..=365) {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let birth = NaiveDate::from_yo_opt(2026 - years, ord).unwrap();
        prop_assert!(validate_birth_date(birth, today).is_ok());
    }
}
