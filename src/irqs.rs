//! Interrupt bindings for the peripherals the firmware drives asynchronously.

#![cfg(not(feature = "host"))]

::embassy_rp::bind_interrupts! {
    /// PIO0, which runs the WS2812 state machine.
    pub struct Pio0Irqs {
        PIO0_IRQ_0 => ::embassy_rp::pio::InterruptHandler<::embassy_rp::peripherals::PIO0>;
    }
}

::embassy_rp::bind_interrupts! {
    /// UART0, which carries the serial console.
    pub struct Uart0Irqs {
        UART0_IRQ => ::embassy_rp::uart::BufferedInterruptHandler<::embassy_rp::peripherals::UART0>;
    }
}
