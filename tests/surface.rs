mod common;

mod tests {
    use std::collections::HashSet;

    use aquarium_lamp::surface::locate;
    use aquarium_lamp::{
        CombinedSurface, OutputDriver, PixelRef, PixelSurface, Rgb, StripBuffer, StripId,
    };

    use crate::common::{BLACK, MockSurface, WHITE};

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    #[test]
    fn test_locate_two_equal_strips() {
        let at = |index| locate(15, 15, index);
        assert_eq!(
            at(0),
            Some(PixelRef {
                strip: StripId::Ws2,
                index: 14
            })
        );
        assert_eq!(
            at(14),
            Some(PixelRef {
                strip: StripId::Ws2,
                index: 0
            })
        );
        assert_eq!(
            at(15),
            Some(PixelRef {
                strip: StripId::Ws1,
                index: 0
            })
        );
        assert_eq!(
            at(29),
            Some(PixelRef {
                strip: StripId::Ws1,
                index: 14
            })
        );
        assert_eq!(at(30), None);
    }

    #[test]
    fn test_locate_is_bijection() {
        for (ws2_len, ws1_len) in [(15, 15), (3, 10), (10, 3), (0, 7), (7, 0), (0, 0)] {
            let total = ws2_len + ws1_len;
            let mut seen = HashSet::new();
            for index in 0..total {
                let pixel = locate(ws2_len, ws1_len, index).expect("in range");
                let len = match pixel.strip {
                    StripId::Ws1 => ws1_len,
                    StripId::Ws2 => ws2_len,
                };
                assert!(pixel.index < len);
                assert!(seen.insert((pixel.strip, pixel.index)), "duplicate {pixel:?}");
            }
            assert_eq!(seen.len(), total);
            assert_eq!(locate(ws2_len, ws1_len, total), None);
        }
    }

    #[test]
    fn test_combined_surface_writes_through_mapping() {
        let mut ws1 = MockSurface::new(4);
        let mut ws2 = MockSurface::new(3);
        {
            let mut surface = CombinedSurface::new(Some(&mut ws1), Some(&mut ws2));
            assert_eq!(surface.len(), 7);
            surface.set(0, RED);
            surface.set(3, WHITE);
            assert_eq!(surface.get(0), RED);
            assert_eq!(surface.get(3), WHITE);
            assert_eq!(surface.get(99), BLACK);
            surface.set(99, RED);
        }
        assert_eq!(ws2.pixels, vec![BLACK, BLACK, RED]);
        assert_eq!(ws1.pixels, vec![WHITE, BLACK, BLACK, BLACK]);
    }

    #[test]
    fn test_combined_surface_missing_strip() {
        let mut ws1 = MockSurface::new(5);
        let mut surface = CombinedSurface::new(Some(&mut ws1), None);
        assert_eq!(surface.len(), 5);
        assert_eq!(
            surface.locate(0),
            Some(PixelRef {
                strip: StripId::Ws1,
                index: 0
            })
        );
        surface.fill(RED);
        surface.show(42);
        assert!(ws1.all(RED));
        assert_eq!(ws1.brightness, 42);
        assert_eq!(ws1.commits, 1);

        let mut empty: CombinedSurface<'_, MockSurface> = CombinedSurface::new(None, None);
        assert!(empty.is_empty());
        empty.set(0, RED);
        empty.commit();
    }

    #[derive(Default)]
    struct RecordingDriver {
        frames: Vec<Vec<Rgb>>,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }
    }

    #[test]
    fn test_strip_buffer_scales_on_commit() {
        let mut strip: StripBuffer<RecordingDriver, 3> = StripBuffer::new(RecordingDriver::default());
        strip.fill(WHITE);
        strip.set_pixel(7, RED);
        strip.set_brightness(128);
        strip.commit();

        assert_eq!(strip.pixels(), &[WHITE; 3]);
        assert_eq!(strip.pixel(7), BLACK);
        let frame = &strip.driver().frames[0];
        assert_eq!(frame, &vec![Rgb::new(128, 128, 128); 3]);

        strip.set_brightness(0);
        strip.commit();
        assert_eq!(strip.driver().frames[1], vec![BLACK; 3]);
    }
}
