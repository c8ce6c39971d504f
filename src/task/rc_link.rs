//! Radio link receiver
//!
//! Reads control frames from the radio bridge over UART and hands the newest
//! one to the control cycle.
//!
//! # Framing
//! ```text
//! 0xA5 | b1 b2 b3 b4 b5 b6 | x1 y1 x2 y2 s1 s2 (u16 LE)
//! sync | 18-byte payload
//! ```
//! The receiver scans byte by byte until it sees the sync byte, then reads the
//! payload. If the payload does not complete within [`PAYLOAD_TIMEOUT`] it is
//! dropped and scanning starts again, so a frame torn by a radio dropout never
//! reaches the arbiter.

use defmt::{debug, warn};
use embassy_futures::select::{select, Either};
use embassy_rp::uart::{self, UartRx};
use embassy_time::{Duration, Timer};
use mecanum_arbiter::frame::{ControlFrame, PAYLOAD_LEN};

use crate::system::link;
use crate::system::resources::{Irqs, RadioLinkResources};

/// Marks the start of every frame on the wire
const SYNC_BYTE: u8 = 0xA5;

/// Bridge serial speed
const BAUD_RATE: u32 = 9_600;

/// Upper bound for one payload at 9600 baud (18 bytes take about 19 ms)
const PAYLOAD_TIMEOUT: Duration = Duration::from_millis(40);

#[embassy_executor::task]
pub async fn rc_link(r: RadioLinkResources) {
    let mut config = uart::Config::default();
    config.baudrate = BAUD_RATE;
    let mut rx = UartRx::new(r.uart, r.rx_pin, Irqs, r.rx_dma, config);

    let mut sync = [0u8; 1];
    let mut payload = [0u8; PAYLOAD_LEN];

    loop {
        if let Err(e) = rx.read(&mut sync).await {
            warn!("radio uart error: {:?}", e);
            continue;
        }
        if sync[0] != SYNC_BYTE {
            continue;
        }

        match select(rx.read(&mut payload), Timer::after(PAYLOAD_TIMEOUT)).await {
            Either::First(Ok(())) => match ControlFrame::from_payload(&payload) {
                Ok(frame) => link::publish(frame),
                Err(e) => warn!("dropping control frame: {:?}", e),
            },
            Either::First(Err(e)) => warn!("radio uart error: {:?}", e),
            Either::Second(()) => debug!("payload stalled, resynchronising"),
        }
    }
}
