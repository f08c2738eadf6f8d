use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

fn uniform(count: usize) -> Vec<Size> {
	vec![Size::new(300.0, 60.0); count]
}

#[rstest]
#[case(0, 0, true)]
#[case(3, 0, true)]
#[case(4, 0, false)]
#[case(4, 1, true)]
#[case(10, 2, true)]
fn expanded_follows_threshold_and_hover(#[case] count: usize, #[case] hovered: usize, #[case] expected: bool) {
	let result = layout(&uniform(count), Placement::TopRight, hovered, &StackConfig::default());
	assert_eq!(result.expanded, expected);
	assert_eq!(result.transforms.len(), count);
}

#[test]
fn newest_notice_stays_in_place() {
	let result = layout(&uniform(5), Placement::TopRight, 0, &StackConfig::default());
	let newest = result.transforms[4];
	assert_eq!(newest.translate_y, 0.0);
	assert_eq!(newest.scale_x, 1.0);
	assert_eq!(newest.height, None);
}

#[test]
fn collapsed_offsets_step_by_offset_and_use_newest_height() {
	let sizes = vec![
		Size::new(300.0, 90.0),
		Size::new(300.0, 70.0),
		Size::new(300.0, 80.0),
		Size::new(300.0, 40.0),
	];
	let result = layout(&sizes, Placement::TopLeft, 0, &StackConfig::default());
	assert!(!result.expanded);

	let offsets: Vec<f32> = result.transforms.iter().map(|t| t.translate_y).collect();
	assert_eq!(offsets, vec![24.0, 16.0, 8.0, 0.0]);

	for transform in &result.transforms[..3] {
		assert_eq!(transform.height, Some(40.0));
	}
}

#[rstest]
#[case(1, (300.0 - 16.0) / 300.0)]
#[case(2, (300.0 - 32.0) / 300.0)]
#[case(3, (300.0 - 48.0) / 300.0)]
#[case(4, (300.0 - 48.0) / 300.0)]
#[case(6, (300.0 - 48.0) / 300.0)]
fn collapsed_scale_clamps_after_three_steps(#[case] reverse_index: usize, #[case] expected: f32) {
	let sizes = uniform(7);
	let result = layout(&sizes, Placement::TopRight, 0, &StackConfig::default());
	let position = sizes.len() - 1 - reverse_index;
	assert_eq!(result.transforms[position].scale_x, expected);
}

#[test]
fn expanded_offsets_accumulate_real_heights_and_gap() {
	let sizes = vec![Size::new(300.0, 50.0), Size::new(300.0, 30.0), Size::new(300.0, 20.0)];
	let result = layout(&sizes, Placement::TopRight, 0, &StackConfig::default());
	assert!(result.expanded);

	assert_eq!(result.transforms[1].translate_y, 20.0 + 16.0);
	assert_eq!(result.transforms[1].height, Some(30.0));
	assert_eq!(result.transforms[0].translate_y, 20.0 + 16.0 + 30.0 + 16.0);
	assert_eq!(result.transforms[0].height, Some(50.0));
	assert!(result.transforms.iter().all(|t| t.scale_x == 1.0));
}

#[test]
fn bottom_placements_grow_upward() {
	let result = layout(&uniform(5), Placement::BottomLeft, 0, &StackConfig::default());
	assert_eq!(result.transforms[3].translate_y, -8.0);
	assert_eq!(result.transforms[0].translate_y, -32.0);
}

#[test]
fn centered_placements_shift_half_width() {
	let result = layout(&uniform(2), Placement::Top, 0, &StackConfig::default());
	assert!(result.transforms.iter().all(|t| t.translate_x == HorizontalShift::HalfSelf));

	let corner = layout(&uniform(2), Placement::BottomRight, 0, &StackConfig::default());
	assert!(corner.transforms.iter().all(|t| t.translate_x == HorizontalShift::None));
}

#[test]
fn unmeasured_notices_keep_unit_scale() {
	let sizes = vec![Size::ZERO, Size::ZERO, Size::ZERO, Size::new(300.0, 60.0)];
	let result = layout(&sizes, Placement::TopRight, 0, &StackConfig::default());
	assert!(!result.expanded);
	assert!(result.transforms.iter().all(|t| t.scale_x == 1.0));
}

#[test]
fn layout_is_deterministic() {
	let sizes = vec![Size::new(280.0, 64.0), Size::new(310.0, 48.0), Size::new(300.0, 52.0), Size::new(290.0, 70.0)];
	let config = StackConfig {
		threshold: 2,
		offset: 10.0,
		gap: 12.0,
	};
	assert_eq!(
		layout(&sizes, Placement::Bottom, 0, &config),
		layout(&sizes, Placement::Bottom, 0, &config)
	);
}

#[test]
fn flat_layout_is_in_place() {
	let result = StackLayout::flat(3, Placement::TopRight);
	assert!(result.expanded);
	assert!(result.transforms.iter().all(|t| t.translate_y == 0.0 && t.height.is_none()));
}

#[rstest]
#[case(StackConfig { threshold: 0, ..StackConfig::default() })]
#[case(StackConfig { offset: -1.0, ..StackConfig::default() })]
#[case(StackConfig { gap: f32::NAN, ..StackConfig::default() })]
fn invalid_stack_configs_are_rejected(#[case] config: StackConfig) {
	assert!(matches!(config.validate(), Err(Error::InvalidStack(_))));
}
