mod tests {
    use aquarium_lamp::AnimationKind;
    use aquarium_lamp::animation::{DEFAULT_DURATION, DEFAULT_TWILIGHT_DURATION};
    use embassy_time::Duration;

    #[test]
    fn test_animation_kind_parse_ignores_case() {
        assert_eq!(
            AnimationKind::parse_from_str("sunrise"),
            Some(AnimationKind::Sunrise)
        );
        assert_eq!(
            AnimationKind::parse_from_str("CHRISTMAS"),
            Some(AnimationKind::Christmas)
        );
        assert_eq!(
            AnimationKind::parse_from_str("Police"),
            Some(AnimationKind::Police)
        );
        assert_eq!(AnimationKind::parse_from_str("none"), Some(AnimationKind::None));
    }

    #[test]
    fn test_animation_kind_parse_unknown() {
        assert_eq!(AnimationKind::parse_from_str("rainbow"), None);
        assert_eq!(AnimationKind::parse_from_str(""), None);
    }

    #[test]
    fn test_animation_kind_raw_ids() {
        assert_eq!(AnimationKind::from_raw(0), Some(AnimationKind::None));
        assert_eq!(AnimationKind::from_raw(3), Some(AnimationKind::Waves));
        assert_eq!(AnimationKind::from_raw(5), Some(AnimationKind::Christmas));
        assert_eq!(AnimationKind::from_raw(6), None);
        for raw in 0..=5 {
            let kind = AnimationKind::from_raw(raw).unwrap();
            assert_eq!(kind.as_raw(), raw);
        }
    }

    #[test]
    fn test_animation_kind_display() {
        assert_eq!(AnimationKind::Sunset.as_str(), "Sunset");
        assert_eq!(format!("{}", AnimationKind::Waves), "Waves");
        assert_eq!(AnimationKind::default(), AnimationKind::None);
    }

    #[test]
    fn test_animation_kind_default_durations() {
        assert_eq!(DEFAULT_TWILIGHT_DURATION, Duration::from_secs(20 * 60));
        assert_eq!(DEFAULT_DURATION, Duration::from_secs(30));
        assert_eq!(
            AnimationKind::Sunrise.default_duration(),
            DEFAULT_TWILIGHT_DURATION
        );
        assert_eq!(
            AnimationKind::Sunset.default_duration(),
            DEFAULT_TWILIGHT_DURATION
        );
        assert_eq!(AnimationKind::Police.default_duration(), DEFAULT_DURATION);
    }
}
