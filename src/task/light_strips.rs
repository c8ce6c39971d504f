//! Front and back WS2812 strips
//!
//! Both strips hang off PIO0, one state machine each. Frames are computed by the
//! arbiter; this adapter only pushes them out, front first.

use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use mecanum_arbiter::config::LEDS_PER_STRIP;
use mecanum_arbiter::indicator::StripPair;

use crate::system::resources::{Irqs, LightStripResources};

/// Front and back strip drivers sharing one PIO block
pub struct LightStrips {
    front: PioWs2812<'static, PIO0, 0, LEDS_PER_STRIP>,
    back: PioWs2812<'static, PIO0, 1, LEDS_PER_STRIP>,
}

impl LightStrips {
    /// Loads the WS2812 program once and starts a state machine per strip.
    pub fn new(r: LightStripResources) -> Self {
        let Pio {
            mut common,
            sm0,
            sm1,
            ..
        } = Pio::new(r.pio, Irqs);
        let program = PioWs2812Program::new(&mut common);

        // front strip on state machine 0, back strip on state machine 1
        let front = PioWs2812::new(&mut common, sm0, r.front_dma, r.front_pin, &program);
        let back = PioWs2812::new(&mut common, sm1, r.back_dma, r.back_pin, &program);

        Self { front, back }
    }

    /// Transmits both strips. Called every cycle so a corrupted pixel is
    /// rewritten on the next tick.
    pub async fn show(&mut self, strips: &StripPair) {
        self.front.write(&strips.front).await;
        self.back.write(&strips.back).await;
    }
}
