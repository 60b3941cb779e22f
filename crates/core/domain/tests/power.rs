use domain::{
    Channel, ControllerData, WarningLevel, channel_power, format_watts, load_percent,
    total_power, warning_level,
};
use proptest::prelude::*;

fn channel(number: u32, voltage: &str, current: &str, parallel_count: u32) -> Channel {
    Channel {
        id: format!("ch-{number}"),
        channel_number: number,
        fixture_type: "LED strip".to_string(),
        voltage: voltage.to_string(),
        current: current.to_string(),
        parallel_count,
    }
}

#[test]
fn example_channel_and_controller_totals() {
    let first = channel(1, "24", "0.625", 4);
    assert_eq!(format_watts(first.power()), "60.00");

    let mut controller = ControllerData::new_draft();
    controller.channels = vec![first, channel(2, "24", "0.625", 4)];
    controller.power_limit = Some(130.0);

    let summary = controller.power_summary();
    assert_eq!(format_watts(summary.total_watts), "120.00");
    assert_eq!(summary.level, WarningLevel::Warning);
    let percent = summary.load_percent.expect("percent");
    assert_eq!(format!("{percent:.1}"), "92.3");
}

#[test]
fn parallel_count_zero_counts_as_one() {
    assert_eq!(channel_power("12", "2", 0), 24.0);
    assert_eq!(channel_power("12", "2", 1), 24.0);
}

#[test]
fn missing_limit_never_warns() {
    assert_eq!(warning_level(10_000.0, None), WarningLevel::None);
    assert_eq!(warning_level(10_000.0, Some(0.0)), WarningLevel::None);
    assert_eq!(warning_level(10_000.0, Some(-5.0)), WarningLevel::None);
    assert_eq!(load_percent(50.0, None), None);
}

#[test]
fn thresholds_are_inclusive() {
    assert_eq!(warning_level(79.9, Some(100.0)), WarningLevel::None);
    assert_eq!(warning_level(80.0, Some(100.0)), WarningLevel::Caution);
    assert_eq!(warning_level(90.0, Some(100.0)), WarningLevel::Warning);
    assert_eq!(warning_level(100.0, Some(100.0)), WarningLevel::Critical);
    assert_eq!(warning_level(250.0, Some(100.0)), WarningLevel::Critical);
}

#[test]
fn empty_channel_list_has_zero_power() {
    assert_eq!(total_power(&[]), 0.0);
}

fn numeric_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (-500.0f64..500.0).prop_map(|value| format!("{value}")),
        "[a-zA-Z ]{0,6}",
        Just(String::new()),
        (0u32..400).prop_map(|value| format!("{value}V")),
    ]
}

fn arb_channel() -> impl Strategy<Value = Channel> {
    (1u32..64, numeric_text(), numeric_text(), 0u32..8).prop_map(
        |(number, voltage, current, parallel)| channel(number, &voltage, &current, parallel),
    )
}

proptest! {
    #[test]
    fn channel_power_is_non_negative(voltage in numeric_text(), current in numeric_text(), parallel in 0u32..16) {
        prop_assert!(channel_power(&voltage, &current, parallel) >= 0.0);
    }

    #[test]
    fn unparsable_or_non_positive_inputs_give_zero(text in "[a-zA-Z]{0,8}", value in -1000.0f64..=0.0, parallel in 0u32..16) {
        let non_positive = format!("{value}");
        prop_assert_eq!(channel_power(&text, "2", parallel), 0.0);
        prop_assert_eq!(channel_power("24", &text, parallel), 0.0);
        prop_assert_eq!(channel_power(&non_positive, "2", parallel), 0.0);
        prop_assert_eq!(channel_power("24", &non_positive, parallel), 0.0);
    }

    #[test]
    fn total_power_ignores_channel_order(mut channels in prop::collection::vec(arb_channel(), 0..12)) {
        let before = total_power(&channels);
        channels.reverse();
        let reversed = total_power(&channels);
        let mid = channels.len() / 2;
        channels.rotate_left(mid);
        let rotated = total_power(&channels);
        prop_assert_eq!(before.to_bits(), reversed.to_bits());
        prop_assert_eq!(before.to_bits(), rotated.to_bits());
    }

    #[test]
    fn tiers_never_move_backward_as_power_grows(limit in 1.0f64..10_000.0, a in 0.0f64..20_000.0, b in 0.0f64..20_000.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(warning_level(low, Some(limit)) <= warning_level(high, Some(limit)));
    }

    #[test]
    fn tiers_never_move_backward_as_limit_shrinks(total in 0.0f64..20_000.0, a in 1.0f64..10_000.0, b in 1.0f64..10_000.0) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(warning_level(total, Some(large)) <= warning_level(total, Some(small)));
    }
}
