mod tests {
    use aquarium_lamp::color::{BLACK, Rgb, WHITE, dim_color, rgb_from_u32};

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(
            rgb_from_u32(0xFF6E0A),
            Rgb {
                r: 255,
                g: 110,
                b: 10
            }
        );
        assert_eq!(rgb_from_u32(0x000000), BLACK);
        assert_eq!(rgb_from_u32(0xFFFFFF), WHITE);
    }

    #[test]
    fn test_dim_color() {
        assert_eq!(dim_color(RED, 255), RED);
        assert_eq!(dim_color(RED, 0), BLACK);
        assert_eq!(
            dim_color(WHITE, 128),
            Rgb {
                r: 128,
                g: 128,
                b: 128
            }
        );
        assert_eq!(dim_color(BLACK, 200), BLACK);
    }
}
