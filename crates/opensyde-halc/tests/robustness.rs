// crates/opensyde-halc/tests/robustness.rs

use opensyde_halc::{
    Availability, AvailabilityError, ErrorKind, HalcError, format_availability,
    load_configuration_from_str, load_definition_from_str, parse_availability,
    save_definition_to_string,
};

const MINIMAL_DEFINITION: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<opensyde-HALC-description>
  <file-version>1</file-version>
  <content-version>1</content-version>
  <device-name>Minimal</device-name>
</opensyde-HALC-description>"#;

#[test]
fn test_minimal_definition_uses_defaults() {
    let definition = load_definition_from_str(MINIMAL_DEFINITION).expect("Failed to load");
    assert_eq!(definition.num_config_copies, 1);
    assert!(!definition.nvm.active);
    assert_eq!(definition.nvm.reserved_sizes.parameters, 100);
    assert!(definition.domains.is_empty());
}

#[test]
fn test_minimal_definition_round_trip_writes_every_node() {
    let definition = load_definition_from_str(MINIMAL_DEFINITION).unwrap();
    let xml = save_definition_to_string(&definition).unwrap();
    assert!(xml.contains("<safety-mode>"));
    assert!(xml.contains("<datapools-start-address-offset"));
    assert!(xml.contains("<lists-reserved-size"));
    let reloaded = load_definition_from_str(&xml).expect("Failed to reload minimal definition");
    assert_eq!(definition, reloaded);
}

#[test]
fn test_empty_input_is_not_found() {
    let err = load_definition_from_str("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = load_configuration_from_str("", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_broken_xml_is_malformed() {
    let xml = "<opensyde-HALC-description><file-version>1</device-name></opensyde-HALC-description>";
    let result = load_definition_from_str(xml);
    assert!(
        matches!(&result, Err(e) if e.kind() == ErrorKind::Malformed),
        "Expected a malformed document error, got {:?}",
        result
    );
}

#[test]
fn test_missing_device_name() {
    let xml = MINIMAL_DEFINITION.replace("<device-name>Minimal</device-name>", "");
    let result = load_definition_from_str(&xml);
    assert!(
        matches!(
            result,
            Err(HalcError::MissingElement {
                element: "device-name",
                ..
            })
        ),
        "Expected MissingElement, got {:?}",
        result
    );
}

#[test]
fn test_non_numeric_content_version() {
    let xml = MINIMAL_DEFINITION.replace(
        "<content-version>1</content-version>",
        "<content-version>one</content-version>",
    );
    let err = load_definition_from_str(&xml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[test]
fn test_unknown_safety_mode() {
    let xml = MINIMAL_DEFINITION.replace(
        "<device-name>Minimal</device-name>",
        "<device-name>Minimal</device-name><safety-mode>three-levels</safety-mode>",
    );
    let err = load_definition_from_str(&xml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[test]
fn test_inline_configuration_without_definition() {
    let xml = r#"<opensyde-node-io-config>
  <file-version>1</file-version>
  <ref-content-version>1</ref-content-version>
  <io-base-file original_file_name="a.syde_halc_def" original_file_content="00"/>
  <domains length="0"/>
</opensyde-node-io-config>"#;
    let err = load_configuration_from_str(xml, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_inline_configuration_with_invalid_hex() {
    let xml = format!(
        r#"<opensyde-node-io-config>
  <file-version>1</file-version>
  <ref-content-version>1</ref-content-version>
  <io-base-file original_file_name="a.syde_halc_def" original_file_content="XYZ">
    {}
  </io-base-file>
  <domains length="0"/>
</opensyde-node-io-config>"#,
        MINIMAL_DEFINITION.trim_start_matches(r#"<?xml version="1.0" encoding="utf-8"?>"#)
    );
    let result = load_configuration_from_str(&xml, None);
    assert!(
        matches!(result, Err(HalcError::HexParsing(_))),
        "Expected HexParsing, got {:?}",
        result
    );
}

#[test]
fn test_availability_examples() {
    let indices = |text: &str| -> Vec<u32> {
        parse_availability(text, 4)
            .unwrap()
            .iter()
            .map(|a| a.value_index)
            .collect()
    };
    assert_eq!(indices("all"), vec![0, 1, 2, 3]);
    assert_eq!(indices("1,3"), vec![1, 3]);
    assert_eq!(indices("0-2"), vec![0, 1, 2]);

    let group = parse_availability("{0,1,2}", 4).unwrap();
    assert_eq!(group.len(), 3);
    assert_eq!(group[1].dependent_values, vec![0, 2]);

    assert_eq!(
        parse_availability("4", 4),
        Err(AvailabilityError::IndexOutOfRange {
            value: 4,
            channel_count: 4
        })
    );
    assert_eq!(parse_availability("1-2-3", 4), Err(AvailabilityError::DoubleRange));
    assert_eq!(
        parse_availability("{1,2", 4),
        Err(AvailabilityError::UnterminatedGroup)
    );
}

#[test]
fn test_availability_printer_inverts_parser() {
    for text in ["all", "0,2", "0-2", "{0,1},3", "1-3", ""] {
        let entries: Vec<Availability> = parse_availability(text, 4).unwrap();
        let printed = format_availability(&entries, 4, true);
        assert_eq!(parse_availability(&printed, 4).unwrap(), entries, "for {:?}", text);
    }
}
