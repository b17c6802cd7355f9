use smart_leds::RGB8;

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Full white
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Scale every channel of `color` by `brightness` (0-255 = 0.0-1.0)
#[inline]
pub fn dim_color(color: Rgb, brightness: u8) -> Rgb {
    match brightness {
        255 => color,
        0 => BLACK,
        _ => Rgb {
            r: crate::math8::scale8(color.r, brightness),
            g: crate::math8::scale8(color.g, brightness),
            b: crate::math8::scale8(color.b, brightness),
        },
    }
}
