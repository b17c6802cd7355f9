//! Shared test doubles for the aquarium-lamp integration tests

#![allow(dead_code)] // Each test file uses a different subset

use aquarium_lamp::{
    AnimationEngine, DutyChannel, Instant, PixelSurface, Rgb, StripId, TimeOfDay, WallClock,
};

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// In-memory strip that counts commits and keeps the last committed frame
#[derive(Debug, Clone)]
pub struct MockSurface {
    pub pixels: Vec<Rgb>,
    pub brightness: u8,
    pub commits: usize,
    pub shown: Vec<Rgb>,
}

impl MockSurface {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![BLACK; len],
            brightness: 255,
            commits: 0,
            shown: vec![BLACK; len],
        }
    }

    pub fn all(&self, color: Rgb) -> bool {
        self.pixels.iter().all(|p| *p == color)
    }

    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|p| **p != BLACK).count()
    }
}

impl PixelSurface for MockSurface {
    fn num_pixels(&self) -> usize {
        self.pixels.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn pixel(&self, index: usize) -> Rgb {
        self.pixels.get(index).copied().unwrap_or(BLACK)
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn commit(&mut self) {
        self.commits += 1;
        self.shown = self.pixels.clone();
    }
}

/// PWM register that remembers every write
#[derive(Debug, Clone, Default)]
pub struct MockDuty {
    pub duty: u8,
    pub writes: Vec<u8>,
}

impl MockDuty {
    pub fn with_duty(duty: u8) -> Self {
        Self {
            duty,
            writes: Vec::new(),
        }
    }
}

impl DutyChannel for MockDuty {
    fn write(&mut self, duty: u8) {
        self.duty = duty;
        self.writes.push(duty);
    }

    fn read(&self) -> u8 {
        self.duty
    }
}

pub type TestEngine = AnimationEngine<MockSurface, MockDuty>;

/// Engine with two strips of the given lengths
pub fn engine(ws1_len: usize, ws2_len: usize) -> TestEngine {
    AnimationEngine::new(
        Some(MockSurface::new(ws1_len)),
        Some(MockSurface::new(ws2_len)),
        MockDuty::default(),
    )
}

pub fn ws1(engine: &TestEngine) -> &MockSurface {
    engine.strip(StripId::Ws1).expect("ws1 present")
}

pub fn ws2(engine: &TestEngine) -> &MockSurface {
    engine.strip(StripId::Ws2).expect("ws2 present")
}

/// Combined-order pixel colors, ws2 reversed then ws1
pub fn combined(engine: &TestEngine) -> Vec<Rgb> {
    let mut out: Vec<Rgb> = ws2(engine).pixels.iter().rev().copied().collect();
    out.extend(ws1(engine).pixels.iter().copied());
    out
}

pub fn ms(value: u64) -> Instant {
    Instant::from_millis(value)
}

pub fn utc(hour: u8, minute: u8) -> Option<WallClock> {
    TimeOfDay::new(hour, minute).map(WallClock::utc_only)
}
