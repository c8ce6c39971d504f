//! Mecanum wheel kinematics
//!
//! Maps the sticks and throttle sliders of a [`ControlFrame`] onto four wheel
//! commands. The mapping is a pure function of the frame and the drive mode.
//!
//! # Dead zone
//! Every axis reading from 500 to 550 inclusive is neutral. Above 550 and below
//! 500 the axis is deflected. The zone is deliberately not centered on 511, so the
//! two directions have slightly different usable ranges.
//!
//! # Priority
//! The first matching case wins:
//! 1. `y2` deflected: drive forward or backward, blended into an arc by `x1`
//! 2. `x1` deflected: strafe
//! 3. `y1` deflected in [`DriveMode::Pivot`]: rear axle only, pivoting on `x2`
//! 4. otherwise stop
//!
//! # Magnitudes
//! ```text
//! ceiling   = map(slider average, 1023 -> 0, speed_min -> 255)
//! magnitude = map(deflection, dead zone edge -> full scale, speed_min -> ceiling)
//! ```
//! `map` is integer linear interpolation truncating toward zero. Results are
//! clamped to 0..=255 only when turned into a [`WheelCommand`].

use crate::config::{ArbiterConfig, AXIS_MAX, SPEED_MAX};
use crate::frame::ControlFrame;
use crate::state::DriveMode;

/// Drive command for one wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelCommand {
    /// PWM magnitude, 0 = stopped
    pub magnitude: u8,
    /// true = forward
    pub forward: bool,
}

impl WheelCommand {
    pub const STOP: Self = Self {
        magnitude: 0,
        forward: false,
    };

    /// Clamps a computed magnitude into 0..=255.
    pub fn new(magnitude: i32, forward: bool) -> Self {
        Self {
            magnitude: magnitude.clamp(0, i32::from(SPEED_MAX)) as u8,
            forward,
        }
    }
}

/// Commands for all four wheels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelSet {
    pub front_left: WheelCommand,
    pub front_right: WheelCommand,
    pub back_left: WheelCommand,
    pub back_right: WheelCommand,
}

impl WheelSet {
    pub const STOPPED: Self = Self::uniform(WheelCommand::STOP);

    pub const fn uniform(command: WheelCommand) -> Self {
        Self {
            front_left: command,
            front_right: command,
            back_left: command,
            back_right: command,
        }
    }

    /// `inner` for the wheels of `pair`, `outer` for the other two.
    fn split(pair: WheelPair, inner: WheelCommand, outer: WheelCommand) -> Self {
        let [fl, fr, bl, br] = pair.members();
        let pick = |member: bool| if member { inner } else { outer };
        Self {
            front_left: pick(fl),
            front_right: pick(fr),
            back_left: pick(bl),
            back_right: pick(br),
        }
    }

    /// Front-left, front-right, back-left, back-right
    pub fn to_array(&self) -> [WheelCommand; 4] {
        [
            self.front_left,
            self.front_right,
            self.back_left,
            self.back_right,
        ]
    }

    pub fn is_stopped(&self) -> bool {
        self.to_array().iter().all(|wheel| wheel.magnitude == 0)
    }
}

/// Two wheels treated as a unit during a turn or strafe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WheelPair {
    LeftSide,
    RightSide,
    /// Front-left and back-right
    MainDiagonal,
    /// Front-right and back-left
    AntiDiagonal,
}

impl WheelPair {
    /// Membership flags in front-left, front-right, back-left, back-right order
    fn members(self) -> [bool; 4] {
        match self {
            WheelPair::LeftSide => [true, false, true, false],
            WheelPair::RightSide => [false, true, false, true],
            WheelPair::MainDiagonal => [true, false, false, true],
            WheelPair::AntiDiagonal => [false, true, true, false],
        }
    }

    /// Pair on the turn side: slowed in an arc, reversed in a strafe.
    fn turn_side(mode: DriveMode, turn: Turn, forward: bool) -> Self {
        match mode {
            DriveMode::Translate => match turn {
                Turn::Left => WheelPair::LeftSide,
                Turn::Right => WheelPair::RightSide,
            },
            // Reversing swaps which diagonal carries the turn.
            DriveMode::Pivot => {
                if (turn == Turn::Left) == forward {
                    WheelPair::MainDiagonal
                } else {
                    WheelPair::AntiDiagonal
                }
            }
        }
    }
}

/// Net turn direction of the commanded motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Turn {
    Left,
    Right,
}

/// Which turn signals should blink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorSide {
    pub left: bool,
    pub right: bool,
}

impl IndicatorSide {
    pub const NONE: Self = Self {
        left: false,
        right: false,
    };

    /// Signals for `turn`, or none when blinking is disabled.
    pub fn for_turn(turn: Option<Turn>, blink_enabled: bool) -> Self {
        match (turn, blink_enabled) {
            (Some(Turn::Left), true) => Self {
                left: true,
                right: false,
            },
            (Some(Turn::Right), true) => Self {
                left: false,
                right: true,
            },
            _ => Self::NONE,
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

/// Result of mapping one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Motion {
    pub wheels: WheelSet,
    pub turn: Option<Turn>,
}

impl Motion {
    pub const STOPPED: Self = Self {
        wheels: WheelSet::STOPPED,
        turn: None,
    };

    pub fn indicator_side(&self, blink_enabled: bool) -> IndicatorSide {
        IndicatorSide::for_turn(self.turn, blink_enabled)
    }
}

/// Position of one axis relative to the dead zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Deflection {
    Neutral,
    /// Above the dead zone
    High,
    /// Below the dead zone
    Low,
}

/// Arduino-style integer `map`: linear interpolation truncated toward zero.
pub fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Highest magnitude any wheel may reach for the given slider average.
///
/// Sliders down gives full speed, sliders up gives `speed_min`.
pub fn speed_ceiling(slider_average: u16, speed_min: u8) -> i32 {
    let average = i32::from(slider_average.min(AXIS_MAX));
    map_range(
        average,
        i32::from(AXIS_MAX),
        0,
        i32::from(speed_min),
        i32::from(SPEED_MAX),
    )
}

/// Stick-to-wheel mapper
#[derive(Debug, Clone, Copy)]
pub struct Kinematics {
    deadband_low: i32,
    deadband_high: i32,
    speed_min: u8,
}

impl Kinematics {
    pub fn new(config: &ArbiterConfig) -> Self {
        Self {
            deadband_low: i32::from(config.deadband_low),
            deadband_high: i32::from(config.deadband_high),
            speed_min: config.speed_min,
        }
    }

    pub fn classify(&self, reading: u16) -> Deflection {
        let reading = i32::from(reading);
        if reading > self.deadband_high {
            Deflection::High
        } else if reading < self.deadband_low {
            Deflection::Low
        } else {
            Deflection::Neutral
        }
    }

    /// Magnitude growing from `speed_min` at the dead zone edge to `ceiling`
    /// at full deflection. Neutral readings give zero.
    pub fn magnitude(&self, reading: u16, ceiling: i32) -> i32 {
        let floor = i32::from(self.speed_min);
        self.scale(reading, floor, ceiling)
    }

    /// Like [`Kinematics::magnitude`] but falling from `ceiling` to
    /// `speed_min`. Used for the horizontal term of an arc.
    fn inverse_magnitude(&self, reading: u16, ceiling: i32) -> i32 {
        let floor = i32::from(self.speed_min);
        self.scale(reading, ceiling, floor)
    }

    fn scale(&self, reading: u16, at_edge: i32, at_full: i32) -> i32 {
        let value = i32::from(reading.min(AXIS_MAX));
        match self.classify(reading) {
            Deflection::High => map_range(
                value,
                self.deadband_high,
                i32::from(AXIS_MAX),
                at_edge,
                at_full,
            ),
            Deflection::Low => map_range(value, self.deadband_low, 0, at_edge, at_full),
            Deflection::Neutral => 0,
        }
    }

    /// Maps one frame to wheel commands for `mode`.
    pub fn resolve(&self, frame: &ControlFrame, mode: DriveMode) -> Motion {
        let ceiling = speed_ceiling(frame.slider_average(), self.speed_min);

        match self.classify(frame.y2) {
            Deflection::High => return self.translate(frame, mode, ceiling, true),
            Deflection::Low => return self.translate(frame, mode, ceiling, false),
            Deflection::Neutral => {}
        }

        if let Some(turn) = turn_of(self.classify(frame.x1)) {
            return self.strafe(frame, mode, ceiling, turn);
        }

        if mode.rotate_assist_enabled() {
            match self.classify(frame.y1) {
                Deflection::High => return self.rear_axle(frame, ceiling, true),
                Deflection::Low => return self.rear_axle(frame, ceiling, false),
                Deflection::Neutral => {}
            }
        }

        Motion::STOPPED
    }

    /// Case 1: `y2` sets the speed, `x1` bends the path into an arc.
    fn translate(
        &self,
        frame: &ControlFrame,
        mode: DriveMode,
        ceiling: i32,
        forward: bool,
    ) -> Motion {
        let vertical = self.magnitude(frame.y2, ceiling);

        let Some(turn) = turn_of(self.classify(frame.x1)) else {
            return Motion {
                wheels: WheelSet::uniform(WheelCommand::new(vertical, forward)),
                turn: None,
            };
        };

        let horizontal = self.inverse_magnitude(frame.x1, ceiling);
        let diff = (vertical - horizontal).abs();
        let inner = WheelCommand::new(vertical - diff, forward);
        let outer = WheelCommand::new(vertical + diff, forward);

        Motion {
            wheels: WheelSet::split(WheelPair::turn_side(mode, turn, forward), inner, outer),
            turn: Some(turn),
        }
    }

    /// Case 2: the turn-side pair runs backward, the other pair forward.
    fn strafe(&self, frame: &ControlFrame, mode: DriveMode, ceiling: i32, turn: Turn) -> Motion {
        let horizontal = self.magnitude(frame.x1, ceiling);
        Motion {
            wheels: WheelSet::split(
                WheelPair::turn_side(mode, turn, true),
                WheelCommand::new(horizontal, false),
                WheelCommand::new(horizontal, true),
            ),
            turn: Some(turn),
        }
    }

    /// Case 3: front wheels held, rear wheels creep on `y1` or pivot on `x2`.
    fn rear_axle(&self, frame: &ControlFrame, ceiling: i32, forward: bool) -> Motion {
        let (back_left, back_right, turn) = match turn_of(self.classify(frame.x2)) {
            Some(turn) => {
                let pivot = self.magnitude(frame.x2, ceiling);
                // Left pivot: left wheel follows the creep direction, right wheel opposes it.
                let left_forward = (turn == Turn::Left) == forward;
                (
                    WheelCommand::new(pivot, left_forward),
                    WheelCommand::new(pivot, !left_forward),
                    Some(turn),
                )
            }
            None => {
                let creep = WheelCommand::new(self.magnitude(frame.y1, ceiling), forward);
                (creep, creep, None)
            }
        };

        Motion {
            wheels: WheelSet {
                front_left: WheelCommand::STOP,
                front_right: WheelCommand::STOP,
                back_left,
                back_right,
            },
            turn,
        }
    }
}

/// Turn requested by a horizontal axis: above the dead zone is left.
fn turn_of(deflection: Deflection) -> Option<Turn> {
    match deflection {
        Deflection::High => Some(Turn::Left),
        Deflection::Low => Some(Turn::Right),
        Deflection::Neutral => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> Kinematics {
        Kinematics::new(&ArbiterConfig::DEFAULT)
    }

    /// Frame with sliders down (ceiling 255) and the given sticks
    fn sticks(x1: u16, y1: u16, x2: u16, y2: u16) -> ControlFrame {
        ControlFrame {
            x1,
            y1,
            x2,
            y2,
            s1: 0,
            s2: 0,
            ..ControlFrame::CENTERED
        }
    }

    fn fwd(magnitude: u8) -> WheelCommand {
        WheelCommand {
            magnitude,
            forward: true,
        }
    }

    fn back(magnitude: u8) -> WheelCommand {
        WheelCommand {
            magnitude,
            forward: false,
        }
    }

    #[test]
    fn map_range_truncates_toward_zero() {
        assert_eq!(map_range(800, 550, 1023, 80, 255), 172);
        assert_eq!(map_range(800, 550, 1023, 255, 80), 163);
        assert_eq!(map_range(0, 500, 0, 80, 255), 255);
    }

    #[test]
    fn speed_ceiling_endpoints() {
        assert_eq!(speed_ceiling(1023, 80), 80);
        assert_eq!(speed_ceiling(0, 80), 255);
        assert_eq!(speed_ceiling(511, 80), 167);
    }

    #[test]
    fn speed_ceiling_never_rises_with_slider() {
        let mut previous = speed_ceiling(0, 80);
        for average in 1..=1023 {
            let ceiling = speed_ceiling(average, 80);
            assert!(ceiling <= previous, "ceiling rose at {}", average);
            previous = ceiling;
        }
    }

    #[test]
    fn dead_zone_bounds() {
        let k = mapper();
        assert_eq!(k.classify(499), Deflection::Low);
        assert_eq!(k.classify(500), Deflection::Neutral);
        assert_eq!(k.classify(511), Deflection::Neutral);
        assert_eq!(k.classify(550), Deflection::Neutral);
        assert_eq!(k.classify(551), Deflection::High);
        assert_eq!(k.magnitude(525, 255), 0);
    }

    #[test]
    fn all_axes_in_dead_zone_stop_in_both_modes() {
        let k = mapper();
        for mode in [DriveMode::Translate, DriveMode::Pivot] {
            for reading in [500, 511, 525, 550] {
                let motion = k.resolve(&sticks(reading, reading, reading, reading), mode);
                assert_eq!(motion, Motion::STOPPED);
            }
        }
    }

    #[test]
    fn straight_forward_scales_with_y2() {
        let motion = mapper().resolve(&sticks(511, 511, 511, 800), DriveMode::Translate);
        assert_eq!(motion.wheels, WheelSet::uniform(fwd(172)));
        assert_eq!(motion.turn, None);
    }

    #[test]
    fn straight_backward_full_deflection() {
        let motion = mapper().resolve(&sticks(511, 511, 511, 0), DriveMode::Translate);
        assert_eq!(motion.wheels, WheelSet::uniform(back(255)));
    }

    #[test]
    fn edge_of_dead_zone_starts_at_speed_min() {
        let motion = mapper().resolve(&sticks(511, 511, 511, 551), DriveMode::Translate);
        assert_eq!(motion.wheels, WheelSet::uniform(fwd(80)));
    }

    #[test]
    fn sliders_cap_the_speed() {
        let frame = ControlFrame {
            y2: 1023,
            s1: 1023,
            s2: 1023,
            ..ControlFrame::CENTERED
        };
        let motion = mapper().resolve(&frame, DriveMode::Translate);
        assert_eq!(motion.wheels, WheelSet::uniform(fwd(80)));
    }

    #[test]
    fn straight_motion_is_identical_across_modes() {
        let k = mapper();
        for y2 in [0, 250, 499, 551, 800, 1023] {
            let frame = sticks(511, 511, 511, y2);
            assert_eq!(
                k.resolve(&frame, DriveMode::Translate),
                k.resolve(&frame, DriveMode::Pivot)
            );
        }
    }

    #[test]
    fn forward_arc_left_slows_left_side_in_translate() {
        let motion = mapper().resolve(&sticks(800, 511, 511, 800), DriveMode::Translate);
        assert_eq!(motion.turn, Some(Turn::Left));
        assert_eq!(motion.wheels.front_left, fwd(163));
        assert_eq!(motion.wheels.back_left, fwd(163));
        assert_eq!(motion.wheels.front_right, fwd(181));
        assert_eq!(motion.wheels.back_right, fwd(181));
    }

    #[test]
    fn forward_arc_left_pairs_diagonals_in_pivot() {
        let motion = mapper().resolve(&sticks(800, 511, 511, 800), DriveMode::Pivot);
        assert_eq!(motion.turn, Some(Turn::Left));
        assert_eq!(motion.wheels.front_left, fwd(163));
        assert_eq!(motion.wheels.back_right, fwd(163));
        assert_eq!(motion.wheels.front_right, fwd(181));
        assert_eq!(motion.wheels.back_left, fwd(181));
    }

    #[test]
    fn forward_arc_right() {
        // x1 = 222 mirrors x1 = 800 below the dead zone: map(222, 500, 0, 255, 80) = 158
        let k = mapper();
        let frame = sticks(222, 511, 511, 800);

        let translate = k.resolve(&frame, DriveMode::Translate);
        assert_eq!(translate.turn, Some(Turn::Right));
        assert_eq!(translate.wheels.front_left, fwd(186));
        assert_eq!(translate.wheels.back_left, fwd(186));
        assert_eq!(translate.wheels.front_right, fwd(158));
        assert_eq!(translate.wheels.back_right, fwd(158));

        let pivot = k.resolve(&frame, DriveMode::Pivot);
        assert_eq!(pivot.wheels.front_right, fwd(158));
        assert_eq!(pivot.wheels.back_left, fwd(158));
        assert_eq!(pivot.wheels.front_left, fwd(186));
        assert_eq!(pivot.wheels.back_right, fwd(186));
    }

    #[test]
    fn backward_arc_swaps_the_pivot_diagonal() {
        // y2 = 0 gives vertical 255, x1 = 800 gives horizontal 163
        let k = mapper();
        let frame = sticks(800, 511, 511, 0);

        let translate = k.resolve(&frame, DriveMode::Translate);
        assert_eq!(translate.turn, Some(Turn::Left));
        assert_eq!(translate.wheels.front_left, back(163));
        assert_eq!(translate.wheels.back_left, back(163));
        assert_eq!(translate.wheels.front_right, back(255));
        assert_eq!(translate.wheels.back_right, back(255));

        let pivot = k.resolve(&frame, DriveMode::Pivot);
        assert_eq!(pivot.wheels.front_right, back(163));
        assert_eq!(pivot.wheels.back_left, back(163));
        assert_eq!(pivot.wheels.front_left, back(255));
        assert_eq!(pivot.wheels.back_right, back(255));
    }

    #[test]
    fn sharp_arc_clamps_inner_wheels_to_zero() {
        // vertical 80, horizontal 255: inner = 80 - 175 < 0, outer = 255
        let motion = mapper().resolve(&sticks(551, 511, 511, 551), DriveMode::Translate);
        assert_eq!(motion.wheels.front_left, fwd(0));
        assert_eq!(motion.wheels.back_left, fwd(0));
        assert_eq!(motion.wheels.front_right, fwd(255));
        assert_eq!(motion.wheels.back_right, fwd(255));
    }

    #[test]
    fn strafe_left() {
        let k = mapper();
        let frame = sticks(1023, 511, 511, 511);

        let translate = k.resolve(&frame, DriveMode::Translate);
        assert_eq!(translate.turn, Some(Turn::Left));
        assert_eq!(translate.wheels.front_left, back(255));
        assert_eq!(translate.wheels.back_left, back(255));
        assert_eq!(translate.wheels.front_right, fwd(255));
        assert_eq!(translate.wheels.back_right, fwd(255));

        let pivot = k.resolve(&frame, DriveMode::Pivot);
        assert_eq!(pivot.wheels.front_left, back(255));
        assert_eq!(pivot.wheels.back_right, back(255));
        assert_eq!(pivot.wheels.front_right, fwd(255));
        assert_eq!(pivot.wheels.back_left, fwd(255));
    }

    #[test]
    fn strafe_right() {
        let k = mapper();
        let frame = sticks(0, 511, 511, 511);

        let translate = k.resolve(&frame, DriveMode::Translate);
        assert_eq!(translate.turn, Some(Turn::Right));
        assert_eq!(translate.wheels.front_left, fwd(255));
        assert_eq!(translate.wheels.back_left, fwd(255));
        assert_eq!(translate.wheels.front_right, back(255));
        assert_eq!(translate.wheels.back_right, back(255));

        let pivot = k.resolve(&frame, DriveMode::Pivot);
        assert_eq!(pivot.wheels.front_left, fwd(255));
        assert_eq!(pivot.wheels.back_right, fwd(255));
        assert_eq!(pivot.wheels.front_right, back(255));
        assert_eq!(pivot.wheels.back_left, back(255));
    }

    #[test]
    fn y2_takes_priority_over_strafe_and_rear_axle() {
        let motion = mapper().resolve(&sticks(511, 1023, 1023, 1023), DriveMode::Pivot);
        assert_eq!(motion.wheels, WheelSet::uniform(fwd(255)));
    }

    #[test]
    fn rear_axle_is_locked_in_translate_mode() {
        let motion = mapper().resolve(&sticks(511, 1023, 1023, 511), DriveMode::Translate);
        assert_eq!(motion, Motion::STOPPED);
    }

    #[test]
    fn rear_axle_creep() {
        let k = mapper();

        let ahead = k.resolve(&sticks(511, 1023, 511, 511), DriveMode::Pivot);
        assert_eq!(ahead.turn, None);
        assert_eq!(ahead.wheels.front_left, WheelCommand::STOP);
        assert_eq!(ahead.wheels.front_right, WheelCommand::STOP);
        assert_eq!(ahead.wheels.back_left, fwd(255));
        assert_eq!(ahead.wheels.back_right, fwd(255));

        let reverse = k.resolve(&sticks(511, 0, 511, 511), DriveMode::Pivot);
        assert_eq!(reverse.wheels.front_left.magnitude, 0);
        assert_eq!(reverse.wheels.front_right.magnitude, 0);
        assert_eq!(reverse.wheels.back_left, back(255));
        assert_eq!(reverse.wheels.back_right, back(255));
    }

    #[test]
    fn rear_axle_pivot() {
        let k = mapper();

        let left = k.resolve(&sticks(511, 1023, 1023, 511), DriveMode::Pivot);
        assert_eq!(left.turn, Some(Turn::Left));
        assert_eq!(left.wheels.front_left.magnitude, 0);
        assert_eq!(left.wheels.front_right.magnitude, 0);
        assert_eq!(left.wheels.back_left, fwd(255));
        assert_eq!(left.wheels.back_right, back(255));

        let right = k.resolve(&sticks(511, 1023, 0, 511), DriveMode::Pivot);
        assert_eq!(right.turn, Some(Turn::Right));
        assert_eq!(right.wheels.back_left, back(255));
        assert_eq!(right.wheels.back_right, fwd(255));

        let reverse_left = k.resolve(&sticks(511, 0, 1023, 511), DriveMode::Pivot);
        assert_eq!(reverse_left.turn, Some(Turn::Left));
        assert_eq!(reverse_left.wheels.front_left.magnitude, 0);
        assert_eq!(reverse_left.wheels.back_left, back(255));
        assert_eq!(reverse_left.wheels.back_right, fwd(255));
    }

    #[test]
    fn indicator_side_follows_turn_only_when_enabled() {
        assert_eq!(
            IndicatorSide::for_turn(Some(Turn::Left), true),
            IndicatorSide {
                left: true,
                right: false
            }
        );
        assert_eq!(
            IndicatorSide::for_turn(Some(Turn::Right), true),
            IndicatorSide {
                left: false,
                right: true
            }
        );
        assert_eq!(IndicatorSide::for_turn(Some(Turn::Left), false), IndicatorSide::NONE);
        assert_eq!(IndicatorSide::for_turn(None, true), IndicatorSide::NONE);
    }
}
