//! Hardware Resource Management
//!
//! Allocates the rover's pins and peripherals to the tasks that own them.
//! Every resource has exactly one owner; the control cycle owns all actuators
//! and the battery ADC, the radio link owns its UART.
//!
//! # Resource Groups
//! - Radio link: UART receiver from the radio bridge
//! - Wheels: L298P direction pins and two PWM slices (four channels)
//! - Light strips: two WS2812 strips on PIO0
//! - Buzzer: one PWM channel
//! - Battery sense: divider tap on an ADC pin
//! - Status LED: on-board LED

use assign_resources::assign_resources;
use embassy_rp::adc::InterruptHandler as AdcInterruptHandler;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{self, PIO0, UART0};
use embassy_rp::pio::InterruptHandler as PioInterruptHandler;
use embassy_rp::uart::InterruptHandler as UartInterruptHandler;

assign_resources! {
    /// UART from the radio bridge delivering control frames
    radio_link: RadioLinkResources {
        uart: UART0,
        rx_pin: PIN_17,
        rx_dma: DMA_CH2,
    },
    /// L298P four-channel driver: one direction pin and one PWM channel per wheel
    wheels: WheelResources {
        front_slice: PWM_SLICE0,
        front_left_pwm: PIN_0,
        front_right_pwm: PIN_1,
        back_slice: PWM_SLICE1,
        back_left_pwm: PIN_2,
        back_right_pwm: PIN_3,
        front_left_dir: PIN_4,
        front_right_dir: PIN_5,
        back_left_dir: PIN_6,
        back_right_dir: PIN_7,
    },
    /// WS2812 strips, eight pixels each
    light_strips: LightStripResources {
        pio: PIO0,
        front_pin: PIN_14,
        front_dma: DMA_CH0,
        back_pin: PIN_15,
        back_dma: DMA_CH1,
    },
    /// Passive buzzer
    buzzer: BuzzerResources {
        slice: PWM_SLICE4,
        pin: PIN_8,
    },
    /// Battery voltage divider tap
    battery_sense: BatterySenseResources {
        adc: ADC,
        pin: PIN_26,
    },
    /// Activity / failsafe indicator
    status_led: StatusLedResources {
        pin: PIN_25,
    },
}

bind_interrupts!(pub struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
    UART0_IRQ => UartInterruptHandler<UART0>;
});
