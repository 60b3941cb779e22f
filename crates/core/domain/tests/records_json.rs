use domain::{ControllerData, ControllerTemplate};

#[test]
fn controller_reads_camel_case_layout() {
    let json = r#"{
        "id": "1712345678901",
        "campus": "North",
        "building": "B1",
        "floor": "2",
        "zone": "A",
        "controllerNumber": "C-7",
        "channels": [
            {"id": "1", "channelNumber": 1, "fixtureType": "Strip", "voltage": "24", "current": "0.625"}
        ],
        "powerLimit": 130,
        "createdAt": "2024-03-01T10:00:00.000Z",
        "updatedAt": "2024-03-02T10:00:00.000Z"
    }"#;
    let controller: ControllerData = serde_json::from_str(json).expect("decode");
    assert_eq!(controller.controller_number, "C-7");
    assert_eq!(controller.channels[0].parallel_count, 1);
    assert_eq!(controller.power_limit, Some(130.0));

    let encoded = serde_json::to_value(&controller).expect("encode");
    assert_eq!(encoded["channels"][0]["parallelCount"], 1);
    assert!(encoded.get("controller_number").is_none());
}

#[test]
fn template_omits_unset_location() {
    let template = ControllerTemplate::from_controller(&ControllerData::new_draft(), "Blank", "");
    let encoded = serde_json::to_value(&template).expect("encode");
    assert!(encoded.get("campus").is_none());
    assert!(encoded.get("powerLimit").is_none());
    assert_eq!(encoded["channels"][0]["channelNumber"], 1);
}
