use super::*;
use serde_json::json;

#[test]
fn datum_strings_follow_attribute_conventions() {
    assert_eq!(datum_to_string(&json!(1)), "1");
    assert_eq!(datum_to_string(&json!(100.0)), "100");
    assert_eq!(datum_to_string(&json!(1.5)), "1.5");
    assert_eq!(datum_to_string(&json!(-0.0)), "0");
    assert_eq!(datum_to_string(&json!("pink")), "pink");
    assert_eq!(datum_to_string(&json!(true)), "true");
    assert_eq!(datum_to_string(&json!(null)), "null");
    assert_eq!(datum_to_string(&json!([1, null, "a"])), "1,,a");
    assert_eq!(datum_to_string(&json!({"a": 1})), "[object Object]");
}

#[test]
fn extreme_magnitudes_use_exponent_form() {
    assert_eq!(datum_to_string(&json!(1e21)), "1e+21");
    assert_eq!(datum_to_string(&json!(-1.5e300)), "-1.5e+300");
    assert_eq!(datum_to_string(&json!(1e-7)), "1e-7");
    assert_eq!(datum_to_string(&json!(2.5e-9)), "2.5e-9");
    // Just inside the plain range on both ends.
    assert_eq!(datum_to_string(&json!(1e20)), "100000000000000000000");
    assert_eq!(datum_to_string(&json!(0.000001)), "0.000001");
}

#[test]
fn names_reject_markup_characters() {
    assert!(validate_name("tag", "svg").is_ok());
    assert!(validate_name("attribute", "data-value").is_ok());
    assert!(validate_name("tag", "").is_err());
    assert!(validate_name("tag", "g id").is_err());
    assert!(validate_name("attribute", "a=b").is_err());
    assert!(validate_name("tag", "<g>").is_err());
}
