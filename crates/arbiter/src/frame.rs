//! Control frames
//!
//! One frame is a full snapshot of the remote: six buttons, two sticks and two
//! throttle sliders. Frames are produced by the transport, consumed once by the
//! control cycle and never modified.
//!
//! # Wire format
//! ```text
//! offset  size  field
//! 0       6     b1..b6, one byte each, non-zero = pressed
//! 6       2     x1  (u16 little-endian, 0-1023)
//! 8       2     y1
//! 10      2     x2
//! 12      2     y2
//! 14      2     s1
//! 16      2     s2
//! ```

use core::fmt;

use crate::config::{AXIS_CENTER, AXIS_MAX};

/// Payload length of one encoded frame (bytes)
pub const PAYLOAD_LEN: usize = 18;

/// Buttons that drive the feature state, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Button 1: drive mode
    Mode,
    /// Button 2: turn-signal enable
    Blink,
    /// Button 3: back light
    BackLight,
    /// Button 4: front light
    FrontLight,
    /// Button 5: alert tone
    Alert,
}

impl ButtonId {
    /// All active buttons, in wire order. Button 6 is reserved and not listed.
    pub const ALL: [ButtonId; 5] = [
        ButtonId::Mode,
        ButtonId::Blink,
        ButtonId::BackLight,
        ButtonId::FrontLight,
        ButtonId::Alert,
    ];

    /// Position of this button in [`ButtonId::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Analog channels carried by a frame, used to report decode errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    X1,
    Y1,
    X2,
    Y2,
    S1,
    S2,
}

const CHANNELS: [Channel; 6] = [
    Channel::X1,
    Channel::Y1,
    Channel::X2,
    Channel::Y2,
    Channel::S1,
    Channel::S2,
];

/// Why a payload could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload is not exactly [`PAYLOAD_LEN`] bytes
    Length { expected: usize, actual: usize },
    /// An analog field exceeds the 10-bit range
    AxisOutOfRange { channel: Channel, value: u16 },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Length { expected, actual } => {
                write!(f, "payload is {} bytes, expected {}", actual, expected)
            }
            FrameError::AxisOutOfRange { channel, value } => {
                write!(f, "{:?} reading {} exceeds {}", channel, value, AXIS_MAX)
            }
        }
    }
}

/// Snapshot of the remote control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlFrame {
    /// Buttons 1-5, indexed by [`ButtonId::index`]
    pub buttons: [bool; 5],
    /// Button 6. Carried on the wire, no behavior attached.
    pub reserved: bool,
    /// Left stick, horizontal (strafe / blend)
    pub x1: u16,
    /// Left stick, vertical (rear-axle creep)
    pub y1: u16,
    /// Right stick, horizontal (rear-axle pivot)
    pub x2: u16,
    /// Right stick, vertical (forward / backward)
    pub y2: u16,
    pub s1: u16,
    pub s2: u16,
}

impl ControlFrame {
    /// Sticks and sliders centered, all buttons released
    pub const CENTERED: Self = Self {
        buttons: [false; 5],
        reserved: false,
        x1: AXIS_CENTER,
        y1: AXIS_CENTER,
        x2: AXIS_CENTER,
        y2: AXIS_CENTER,
        s1: AXIS_CENTER,
        s2: AXIS_CENTER,
    };

    /// Decodes a payload in the layout documented at module level.
    pub fn from_payload(payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() != PAYLOAD_LEN {
            return Err(FrameError::Length {
                expected: PAYLOAD_LEN,
                actual: payload.len(),
            });
        }

        let mut buttons = [false; 5];
        for (slot, byte) in buttons.iter_mut().zip(&payload[..5]) {
            *slot = *byte != 0;
        }

        let mut analog = [0u16; 6];
        for (i, (value, channel)) in analog.iter_mut().zip(CHANNELS).enumerate() {
            let at = 6 + i * 2;
            *value = u16::from_le_bytes([payload[at], payload[at + 1]]);
            if *value > AXIS_MAX {
                return Err(FrameError::AxisOutOfRange {
                    channel,
                    value: *value,
                });
            }
        }

        Ok(Self {
            buttons,
            reserved: payload[5] != 0,
            x1: analog[0],
            y1: analog[1],
            x2: analog[2],
            y2: analog[3],
            s1: analog[4],
            s2: analog[5],
        })
    }

    /// Raw reading of one button
    pub fn button(&self, id: ButtonId) -> bool {
        self.buttons[id.index()]
    }

    /// Average of the two throttle sliders
    pub fn slider_average(&self) -> u16 {
        ((u32::from(self.s1) + u32::from(self.s2)) / 2) as u16
    }
}

impl Default for ControlFrame {
    fn default() -> Self {
        Self::CENTERED
    }
}
