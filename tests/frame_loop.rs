mod common;

mod tests {
    use aquarium_lamp::{
        AnimationKind, ChannelId, CommandError, Duration, FrameLoop, LampConfig, LampControl, Rgb,
        SharedStrip, StripReadback, StripState,
    };

    use crate::common::*;

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    fn config() -> LampConfig {
        LampConfig {
            default_schedule: false,
            ..LampConfig::default()
        }
    }

    fn frame_loop(control: &LampControl) -> FrameLoop<'_, MockSurface, MockDuty, 4> {
        FrameLoop::new(engine(8, 8), control, &config())
    }

    #[test]
    fn test_shared_strip_dirty_flag() {
        let strip = SharedStrip::new(StripState::STRIP_DEFAULT);
        assert!(!strip.is_dirty());
        assert_eq!(strip.take_dirty(), None);

        strip.set_color(RED);
        assert!(strip.is_dirty());
        let state = strip.take_dirty().unwrap();
        assert_eq!(state.color, RED);
        assert_eq!(state.brightness, 128);
        assert_eq!(strip.take_dirty(), None);
    }

    #[test]
    fn test_output_brightness_follows_power() {
        let mut state = StripState::DIM_DEFAULT;
        assert_eq!(state.output_brightness(), 255);
        state.on = false;
        assert_eq!(state.output_brightness(), 0);
        assert_eq!(StripState::default(), StripState::STRIP_DEFAULT);
    }

    #[test]
    fn test_startup_pushes_solid_colors() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);

        lamp.step(ms(0), None);
        let engine = lamp.engine();
        assert!(ws1(engine).all(WHITE));
        assert!(ws2(engine).all(WHITE));
        assert_eq!(ws1(engine).brightness, 128);
        assert_eq!(ws1(engine).commits, 1);
        assert!(!control.channel(ChannelId::Ws1).is_dirty());

        // Nothing changed, nothing pushed
        lamp.step(ms(16), None);
        assert_eq!(ws1(lamp.engine()).commits, 1);
    }

    #[test]
    fn test_startup_applies_dim_duty() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);
        assert!(control.channel(ChannelId::Dim).is_dirty());

        lamp.step(ms(0), None);
        assert_eq!(lamp.engine().duty(), 255);
        assert_eq!(lamp.status().dim_duty, 255);
        assert!(!control.channel(ChannelId::Dim).is_dirty());
    }

    #[test]
    fn test_christmas_yields_to_dim_light_at_boot() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);

        control
            .start_animation(AnimationKind::Christmas, None)
            .unwrap();
        lamp.step(ms(0), None);
        assert_eq!(lamp.engine().duty(), 255);
        assert_eq!(ws1(lamp.engine()).commits, 0);
        assert!(control.channel(ChannelId::Ws1).is_dirty());
        assert!(control.channel(ChannelId::Ws2).is_dirty());
    }

    #[test]
    fn test_solid_color_applied_on_next_frame() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);
        lamp.step(ms(0), None);

        control.set_solid(ChannelId::Ws2, 200, RED);
        lamp.step(ms(16), None);
        assert!(ws2(lamp.engine()).all(RED));
        assert_eq!(ws2(lamp.engine()).brightness, 200);
        assert!(ws1(lamp.engine()).all(WHITE));

        control.turn_off(ChannelId::Ws2);
        lamp.step(ms(32), None);
        assert_eq!(ws2(lamp.engine()).brightness, 0);
        assert_eq!(
            lamp.status().ws2,
            Some(StripReadback {
                on: false,
                brightness: 0
            })
        );
    }

    #[test]
    fn test_dim_channel_drives_pwm() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);

        control.set_brightness(ChannelId::Dim, 100);
        lamp.step(ms(0), None);
        assert_eq!(lamp.engine().duty(), 100);

        control.turn_off(ChannelId::Dim);
        lamp.step(ms(16), None);
        assert_eq!(lamp.engine().duty(), 0);

        control.turn_on(ChannelId::Dim);
        lamp.step(ms(32), None);
        assert_eq!(lamp.status().dim_duty, 100);
    }

    #[test]
    fn test_animation_suspends_solid_path() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);
        lamp.step(ms(0), None);

        assert_eq!(
            control.start_animation_by_name("police", None),
            Ok(AnimationKind::Police)
        );
        lamp.step(ms(16), None);
        assert_eq!(lamp.engine().current_animation(), AnimationKind::Police);
        assert_eq!(control.current_animation(), AnimationKind::Police);
        assert_eq!(lamp.status().animation, AnimationKind::Police);

        control.set_color(ChannelId::Ws1, RED);
        lamp.step(ms(200), None);
        assert!(!ws1(lamp.engine()).all(RED));
        assert!(control.channel(ChannelId::Ws1).is_dirty());

        control.stop_animation().unwrap();
        lamp.step(ms(216), None);
        assert_eq!(control.current_animation(), AnimationKind::None);
        assert!(ws1(lamp.engine()).all(RED));
        assert!(!control.channel(ChannelId::Ws1).is_dirty());
    }

    #[test]
    fn test_start_none_stops() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);

        control
            .start_animation(AnimationKind::Waves, Some(Duration::from_secs(5)))
            .unwrap();
        lamp.step(ms(0), None);
        assert_eq!(control.current_animation(), AnimationKind::Waves);

        control.start_animation(AnimationKind::None, None).unwrap();
        lamp.step(ms(16), None);
        assert_eq!(control.current_animation(), AnimationKind::None);
    }

    #[test]
    fn test_unknown_animation_rejected() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);

        assert_eq!(
            control.start_animation_by_name("disco", None),
            Err(CommandError::UnknownAnimation)
        );
        lamp.step(ms(0), None);
        assert_eq!(control.current_animation(), AnimationKind::None);
    }

    #[test]
    fn test_request_queue_full() {
        let control = LampControl::<2>::new();
        control.start_animation(AnimationKind::Waves, None).unwrap();
        control.stop_animation().unwrap();
        assert_eq!(
            control.start_animation(AnimationKind::Police, None),
            Err(CommandError::QueueFull)
        );
    }

    #[test]
    fn test_requests_run_in_order() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);

        control.start_animation(AnimationKind::Police, None).unwrap();
        control.start_animation(AnimationKind::Waves, None).unwrap();
        lamp.step(ms(0), None);
        assert_eq!(control.current_animation(), AnimationKind::Waves);
    }

    #[test]
    fn test_christmas_yield_keeps_strips_fresh() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);
        lamp.step(ms(0), None);
        assert!(!control.channel(ChannelId::Ws1).is_dirty());

        control.set_brightness(ChannelId::Dim, 100);
        control
            .start_animation(AnimationKind::Christmas, None)
            .unwrap();
        lamp.step(ms(16), None);
        assert_eq!(lamp.engine().current_animation(), AnimationKind::Christmas);
        assert!(control.channel(ChannelId::Ws1).is_dirty());
        assert!(control.channel(ChannelId::Ws2).is_dirty());

        control.stop_animation().unwrap();
        lamp.step(ms(32), None);
        assert!(ws1(lamp.engine()).all(WHITE));
        assert_eq!(ws1(lamp.engine()).brightness, 128);
        assert!(!control.channel(ChannelId::Ws2).is_dirty());
    }

    #[test]
    fn test_off_all_and_status() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);

        control.off_all();
        lamp.step(ms(0), None);
        let status = lamp.status();
        assert_eq!(status.animation, AnimationKind::None);
        assert_eq!(status.dim_duty, 0);
        assert_eq!(
            status.ws1,
            Some(StripReadback {
                on: false,
                brightness: 0
            })
        );

        control.on_all();
        lamp.step(ms(16), None);
        let status = lamp.status();
        assert_eq!(status.dim_duty, 255);
        assert_eq!(
            status.ws2,
            Some(StripReadback {
                on: true,
                brightness: 128
            })
        );
    }

    #[test]
    fn test_missing_strip_is_skipped() {
        let control: LampControl = LampControl::new();
        let engine = aquarium_lamp::AnimationEngine::new(
            Some(MockSurface::new(8)),
            None,
            MockDuty::default(),
        );
        let mut lamp = FrameLoop::new(engine, &control, &config());

        lamp.step(ms(0), None);
        assert!(ws1(lamp.engine()).all(WHITE));
        assert_eq!(lamp.status().ws2, None);
        // Stays flagged until a strip is there to take it
        assert!(control.channel(ChannelId::Ws2).is_dirty());
    }

    #[test]
    fn test_default_config_installs_schedule() {
        let control: LampControl = LampControl::new();
        let lamp = FrameLoop::new(engine(4, 4), &control, &LampConfig::default());
        assert_eq!(lamp.scheduler().len(), 3);
    }

    #[test]
    fn test_scheduled_animation_through_loop() {
        let control: LampControl = LampControl::new();
        let mut lamp = FrameLoop::new(engine(4, 4), &control, &LampConfig::default());

        lamp.step(ms(0), utc(10, 0));
        assert_eq!(control.current_animation(), AnimationKind::Police);
    }

    #[test]
    fn test_frame_pacing() {
        let control: LampControl = LampControl::new();
        let mut lamp = frame_loop(&control);

        let result = lamp.tick(ms(0), None);
        assert_eq!(result.next_deadline, ms(16));
        assert_eq!(result.sleep_duration, Duration::from_millis(16));

        let result = lamp.tick(ms(10), None);
        assert_eq!(result.next_deadline, ms(32));
        assert_eq!(result.sleep_duration, Duration::from_millis(22));

        // Far behind: the backlog is dropped
        let result = lamp.tick(ms(1_000), None);
        assert_eq!(result.next_deadline, ms(1_016));
        assert_eq!(result.sleep_duration, Duration::from_millis(16));
    }
}
