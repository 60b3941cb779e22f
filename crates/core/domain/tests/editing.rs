use domain::{
    Channel, ChannelPatch, ChannelShape, ControllerData, ControllerTemplate, DomainError,
    FixtureConfig, add_channel, apply_template, next_channel_number, normalize_channels,
    remove_channel, update_channel, validate_controller, validate_fixture, validate_template,
};

fn complete_draft() -> ControllerData {
    let mut draft = ControllerData::new_draft();
    draft.campus = "North".to_string();
    draft.building = "B1".to_string();
    draft.controller_number = "C-01".to_string();
    draft
}

#[test]
fn channel_numbers_are_monotonic() {
    let mut draft = ControllerData::new_draft();
    assert_eq!(draft.channels.len(), 1);
    assert_eq!(draft.channels[0].channel_number, 1);

    let second = add_channel(&mut draft, ChannelPatch::default()).id.clone();
    add_channel(&mut draft, ChannelPatch::default());
    remove_channel(&mut draft, &second).expect("remove");
    let numbers: Vec<u32> = draft.channels.iter().map(|c| c.channel_number).collect();
    assert_eq!(numbers, vec![1, 3]);
    assert_eq!(next_channel_number(&draft.channels), 4);
    assert_eq!(next_channel_number(&[]), 1);
}

#[test]
fn last_channel_cannot_be_removed() {
    let mut draft = ControllerData::new_draft();
    let only = draft.channels[0].id.clone();
    assert_eq!(remove_channel(&mut draft, &only), Err(DomainError::LastChannel));
    assert_eq!(draft.channels.len(), 1);
    assert!(matches!(
        remove_channel(&mut draft, "missing"),
        Err(DomainError::ChannelNotFound(_))
    ));
}

#[test]
fn update_channel_applies_patch() {
    let mut draft = ControllerData::new_draft();
    let id = draft.channels[0].id.clone();
    let channel = update_channel(
        &mut draft,
        &id,
        ChannelPatch {
            voltage: Some("24".to_string()),
            current: Some("0.625".to_string()),
            parallel_count: Some(0),
            ..ChannelPatch::default()
        },
    )
    .expect("update");
    assert_eq!(channel.parallel_count, 1);
    assert_eq!(channel.power(), 15.0);
}

#[test]
fn validation_requires_location_and_channels() {
    let mut draft = complete_draft();
    assert_eq!(validate_controller(&draft), Ok(()));

    draft.building = " ".to_string();
    assert_eq!(
        validate_controller(&draft),
        Err(DomainError::MissingField("building"))
    );

    let mut empty = complete_draft();
    empty.channels.clear();
    assert_eq!(validate_controller(&empty), Err(DomainError::NoChannels));
}

#[test]
fn template_round_trip_overwrites_draft() {
    let mut source = complete_draft();
    source.floor = "3".to_string();
    source.power_limit = Some(200.0);
    source.channels[0].voltage = "24".to_string();
    source.channels[0].current = "1".to_string();
    add_channel(
        &mut source,
        ChannelPatch {
            fixture_type: Some("Downlight".to_string()),
            ..ChannelPatch::default()
        },
    );
    let template = ControllerTemplate::from_controller(&source, "Office floor", "");
    assert_eq!(template.zone, None);
    assert_eq!(template.channels.len(), 2);

    let mut draft = ControllerData::new_draft();
    draft.zone = "East".to_string();
    apply_template(&mut draft, &template);
    assert_eq!(draft.campus, "North");
    assert_eq!(draft.floor, "3");
    assert_eq!(draft.zone, "East");
    assert_eq!(draft.power_limit, Some(200.0));
    assert_eq!(draft.channels.len(), 2);
    assert_eq!(draft.channels[1].fixture_type, "Downlight");
    assert_ne!(draft.channels[0].id, source.channels[0].id);
}

#[test]
fn template_with_broken_numbering_is_renumbered() {
    let shape = |number| ChannelShape {
        channel_number: number,
        fixture_type: String::new(),
        voltage: "12".to_string(),
        current: "1".to_string(),
        parallel_count: 1,
    };
    let mut template = ControllerTemplate::from_controller(&complete_draft(), "t", "");
    template.channels = vec![shape(4), shape(4), shape(0)];

    let mut draft = ControllerData::new_draft();
    apply_template(&mut draft, &template);
    let numbers: Vec<u32> = draft.channels.iter().map(|c| c.channel_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    template.channels.clear();
    apply_template(&mut draft, &template);
    assert_eq!(draft.channels.len(), 1);
}

#[test]
fn normalize_fills_ids_and_numbers() {
    let mut channels = vec![
        Channel { id: String::new(), ..Channel::blank(2) },
        Channel::blank(2),
        Channel { parallel_count: 0, ..Channel::blank(0) },
    ];
    normalize_channels(&mut channels);
    assert!(!channels[0].id.is_empty());
    let numbers: Vec<u32> = channels.iter().map(|c| c.channel_number).collect();
    assert_eq!(numbers, vec![2, 3, 4]);
    assert_eq!(channels[2].parallel_count, 1);
}

#[test]
fn template_and_fixture_validation() {
    let template = ControllerTemplate::from_controller(&complete_draft(), "  ", "");
    assert_eq!(validate_template(&template), Err(DomainError::MissingField("name")));

    assert_eq!(validate_fixture(&FixtureConfig::new("Spot", "24", "0.5")), Ok(()));
    assert_eq!(
        validate_fixture(&FixtureConfig::new("Spot", "", "0.5")),
        Err(DomainError::MissingField("voltage"))
    );
}

#[test]
fn numbering_past_u32_max_reuses_lowest_free_number() {
    let mut draft = ControllerData::new_draft();
    draft.channels = vec![Channel::blank(u32::MAX)];
    assert_eq!(next_channel_number(&draft.channels), 1);
    let added = add_channel(&mut draft, ChannelPatch::default()).channel_number;
    assert_eq!(added, 1);
    assert_eq!(next_channel_number(&draft.channels), 2);

    let mut channels = vec![
        Channel::blank(u32::MAX),
        Channel::blank(0),
        Channel::blank(1),
        Channel::blank(u32::MAX),
    ];
    normalize_channels(&mut channels);
    let numbers: Vec<u32> = channels.iter().map(|c| c.channel_number).collect();
    assert_eq!(numbers, vec![u32::MAX, 2, 1, 3]);
}

#[test]
fn normalize_replaces_duplicate_ids() {
    let mut channels = vec![Channel::blank(1), Channel::blank(2), Channel::blank(3)];
    channels[1].id = channels[0].id.clone();
    channels[2].id = "  ".to_string();
    let first = channels[0].id.clone();
    normalize_channels(&mut channels);

    assert_eq!(channels[0].id, first);
    assert_ne!(channels[1].id, first);
    assert!(!channels[2].id.trim().is_empty());
    assert_ne!(channels[1].id, channels[2].id);
}
