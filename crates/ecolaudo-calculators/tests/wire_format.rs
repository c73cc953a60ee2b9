//! The browser UI exchanges these types as JSON; the Portuguese wire values
//! are part of the contract.

use ecolaudo_calculators::birads::{BiradsCategory, BreastLesion, Margins, Shape, Side};
use ecolaudo_calculators::tirads::{calculate_tirads, TiradsInput};

#[test]
fn birads_category_serializes_to_its_display_form() {
    assert_eq!(serde_json::to_string(&BiradsCategory::C4b).unwrap(), "\"4B\"");
    let parsed: BiradsCategory = serde_json::from_str("\"4C\"").unwrap();
    assert_eq!(parsed, BiradsCategory::C4c);
}

#[test]
fn lesion_lexicons_use_portuguese_wire_values() {
    let lesion = BreastLesion {
        side: Some(Side::Left),
        shape: Some(Shape::Round),
        margins: Some(Margins::Spiculated),
        ..BreastLesion::default()
    };

    let json = serde_json::to_string(&lesion).unwrap();
    assert!(json.contains("\"side\":\"esquerda\""));
    assert!(json.contains("\"shape\":\"redonda\""));
    assert!(json.contains("\"margins\":\"espiculadas\""));
}

#[test]
fn lesion_deserializes_from_form_json() {
    let lesion: BreastLesion = serde_json::from_str(
        r#"{"kind":"nodulo","shape":"irregular","margins":"microlobuladas","echoPattern":"hipoecoico"}"#,
    )
    .unwrap();

    assert_eq!(lesion.shape, Some(Shape::Irregular));
    assert_eq!(lesion.margins, Some(Margins::Microlobulated));
}

#[test]
fn tirads_result_breakdown_round_trips() {
    let input: TiradsInput =
        serde_json::from_str(r#"{"composition":"solido","echogenicity":"hipoecogênico"}"#).unwrap();
    let result = calculate_tirads(&input);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["points"], 4);
    assert_eq!(json["category"], "4");
    assert_eq!(json["breakdown"]["composition"], 2);
    assert_eq!(json["conduct"], "follow_up");
}
