use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;
use std::time::SystemTime;

use super::Strategy;
use crate::derive::Queryable;
use crate::error::QueryError;
use crate::impls::{Language, Lazy};
use crate::info::Typed;
use crate::query::QuerySyntax;

#[derive(Queryable, Debug, Clone, Copy, PartialEq)]
#[query(value_names)]
enum Order {
    #[query(name = "asc")]
    Ascending,
    #[query(name = "desc")]
    Descending = 7,
}

#[derive(Queryable, Debug, Clone, Copy, PartialEq)]
enum Color {
    Red = 1,
    Green = 2,
}

#[derive(Queryable, Debug, Clone, Copy, PartialEq)]
#[repr(u64)]
enum Wide {
    Low = 0,
    High = i64::MAX as u64,
}

fn text(strategy: &Strategy, value: &dyn crate::Reflect) -> Option<String> {
    strategy.build(Some(value), &QuerySyntax::default()).unwrap()
}

#[test]
fn boolean_as_bit() {
    let syntax = QuerySyntax::default();
    assert_eq!(text(&Strategy::BooleanAsBit, &true).as_deref(), Some("1"));
    assert_eq!(text(&Strategy::BooleanAsBit, &false).as_deref(), Some("0"));

    let value = Strategy::BooleanAsBit.parse("1", bool::type_info(), &syntax).unwrap();
    assert_eq!(value.downcast_ref::<bool>(), Some(&true));
    let value = Strategy::BooleanAsBit.parse("yes", bool::type_info(), &syntax).unwrap();
    assert_eq!(value.downcast_ref::<bool>(), Some(&false));

    assert!(!Strategy::BooleanAsBit.can_handle(u8::type_info()));
    assert!(Strategy::BooleanAsBit.can_handle(<Option<bool>>::type_info()));
}

#[test]
fn enum_by_value_name() {
    let syntax = QuerySyntax::default();
    assert_eq!(text(&Strategy::EnumAsName, &Order::Descending).as_deref(), Some("desc"));

    let value = Strategy::EnumAsName.parse("asc", Order::type_info(), &syntax).unwrap();
    assert_eq!(value.downcast_ref::<Order>(), Some(&Order::Ascending));

    let err = Strategy::EnumAsName.parse("Ascending", Order::type_info(), &syntax).unwrap_err();
    assert!(matches!(err, QueryError::Conversion { .. }));
}

#[test]
fn enum_without_value_name_fails_by_name() {
    let err = Strategy::EnumAsName.build(Some(&Color::Red), &QuerySyntax::default()).unwrap_err();
    assert_eq!(
        err,
        QueryError::EnumNaming {
            enum_path: Color::type_info().type_path(),
            variant: "Red",
        }
    );
}

#[test]
fn enum_by_discriminant() {
    let syntax = QuerySyntax::default();
    assert_eq!(text(&Strategy::EnumAsUnderlying, &Color::Green).as_deref(), Some("2"));
    assert_eq!(text(&Strategy::EnumAsUnderlying, &Order::Descending).as_deref(), Some("7"));

    let value = Strategy::EnumAsUnderlying.parse("1", Color::type_info(), &syntax).unwrap();
    assert_eq!(value.downcast_ref::<Color>(), Some(&Color::Red));
    // the variant name is accepted as well
    let value = Strategy::EnumAsUnderlying.parse("Green", Color::type_info(), &syntax).unwrap();
    assert_eq!(value.downcast_ref::<Color>(), Some(&Color::Green));

    assert!(Strategy::EnumAsUnderlying.parse("3", Color::type_info(), &syntax).is_err());
}

#[test]
fn sequence_of_enums_round_trips() {
    let syntax = QuerySyntax::default();
    let strategy = Strategy::Sequence(Box::new(Strategy::EnumAsName));
    let orders = vec![Order::Descending, Order::Ascending];

    let raw = strategy.build(Some(&orders), &syntax).unwrap().unwrap();
    assert_eq!(raw, "desc+asc");

    let value = strategy.parse(&raw, <Vec<Order>>::type_info(), &syntax).unwrap();
    assert_eq!(value.downcast_ref::<Vec<Order>>(), Some(&orders));
}

#[test]
fn sequence_checks_the_item_type_lazily() {
    let syntax = QuerySyntax::default();
    let strategy = Strategy::Sequence(Box::new(Strategy::BooleanAsBit));
    // construction and the outer check succeed
    assert!(strategy.can_handle(<Vec<u8>>::type_info()));

    let err = strategy.parse("1+0", <Vec<u8>>::type_info(), &syntax).unwrap_err();
    assert_eq!(
        err,
        QueryError::CapabilityMismatch {
            strategy: "BooleanAsBit".into(),
            type_path: u8::type_info().type_path(),
        }
    );
}

#[test]
fn sequence_of_optional_items() {
    let syntax = QuerySyntax::default();
    let strategy = Strategy::Sequence(Box::new(Strategy::Default));
    let items = vec![Some(1_u8), None, Some(3)];
    assert_eq!(text(&strategy, &items).as_deref(), Some("1+3"));

    let value = strategy.parse("4+5", <Vec<Option<u8>>>::type_info(), &syntax).unwrap();
    assert_eq!(value.downcast_ref::<Vec<Option<u8>>>(), Some(&vec![Some(4), Some(5)]));
}

#[test]
fn empty_sequence() {
    let syntax = QuerySyntax::default();
    let strategy = Strategy::Sequence(Box::new(Strategy::Default));
    assert_eq!(text(&strategy, &Vec::<u8>::new()).as_deref(), Some(""));

    let value = strategy.parse("", <Vec<u8>>::type_info(), &syntax).unwrap();
    assert!(value.downcast_ref::<Vec<u8>>().unwrap().is_empty());
}

#[test]
fn lazy_forces_and_resolves() {
    let syntax = QuerySyntax::default();
    let strategy = Strategy::Lazy(Box::new(Strategy::BooleanAsBit));
    let lazy = Lazy::new(|| true);
    assert_eq!(text(&strategy, &lazy).as_deref(), Some("1"));

    let value = strategy.parse("0", <Lazy<bool>>::type_info(), &syntax).unwrap();
    assert!(!**value.downcast_ref::<Lazy<bool>>().unwrap());
}

#[test]
fn language_and_timestamp() {
    let syntax = QuerySyntax::default();
    let french: Language = "fr".parse().unwrap();
    assert_eq!(text(&Strategy::IsoLanguage, &french).as_deref(), Some("fr"));
    let value = Strategy::IsoLanguage.parse("fr-CA", Language::type_info(), &syntax).unwrap();
    assert_eq!(value.downcast_ref::<Language>(), Some(&french));

    let time = SystemTime::UNIX_EPOCH + Duration::from_millis(1_700_000_000_900);
    assert_eq!(text(&Strategy::UnixTimestamp, &time).as_deref(), Some("1700000000"));
    let value = Strategy::UnixTimestamp
        .parse("-60", SystemTime::type_info(), &syntax)
        .unwrap();
    assert_eq!(
        value.downcast_ref::<SystemTime>(),
        Some(&(SystemTime::UNIX_EPOCH - Duration::from_secs(60)))
    );
}

#[test]
fn null_marker_is_valueless() {
    let syntax = QuerySyntax::default();
    assert_eq!(text(&Strategy::NullMarker, &5_u8), None);
    assert_eq!(Strategy::NullMarker.build(None, &syntax).unwrap(), None);

    let value = Strategy::NullMarker
        .parse("ignored", <Option<u8>>::type_info(), &syntax)
        .unwrap();
    assert_eq!(value.downcast_ref::<Option<u8>>(), Some(&None));
}

#[test]
fn default_reports_conversion_errors() {
    let syntax = QuerySyntax::default();
    let err = Strategy::Default.parse("x", u8::type_info(), &syntax).unwrap_err();
    assert!(matches!(err, QueryError::Conversion { type_path: "u8", .. }));

    // `SystemTime` has no textual form of its own
    let err = Strategy::Default.build(Some(&SystemTime::UNIX_EPOCH), &syntax).unwrap_err();
    assert!(matches!(err, QueryError::Conversion { .. }));
}

#[test]
fn strategies_compare_structurally() {
    let a = Strategy::Sequence(Box::new(Strategy::Lazy(Box::new(Strategy::Default))));
    assert_eq!(a, a.clone());
    assert_ne!(a, Strategy::Sequence(Box::new(Strategy::Default)));
    assert_eq!(a.to_string(), "Sequence(Lazy(Default))");
}

#[test]
fn wide_discriminants_within_i64_are_exact() {
    let syntax = QuerySyntax::default();
    let high = i64::MAX.to_string();
    assert_eq!(text(&Strategy::EnumAsUnderlying, &Wide::High), Some(high.clone()));

    let value = Strategy::EnumAsUnderlying.parse(&high, Wide::type_info(), &syntax).unwrap();
    assert_eq!(value.downcast_ref::<Wide>(), Some(&Wide::High));
    assert_eq!(text(&Strategy::EnumAsUnderlying, &Wide::Low).as_deref(), Some("0"));
}
