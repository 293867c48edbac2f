//! PIO-backed WS2812 transmitter: the state machine generates every pulse, the CPU only
//! keeps its TX FIFO fed.

use core::cell::RefCell;

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::program::{Assembler, JmpCondition, OutDestination, SetDestination, SideSet};
use embassy_rp::pio::{
    Common, Config, FifoJoin, Instance, LoadedProgram, Pio, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::once_lock::OnceLock;
use embassy_time::{Duration, Timer};
use fixed::types::U24F8;
use static_cell::StaticCell;

use super::{BIT_PERIOD_NS, BIT_RATE_KHZ, CYCLES_PER_BIT, LATCH_WAIT_US, T1, T2, T3, Transmit};
use crate::Result;
use crate::color::ColorWord;
use crate::frame::Frame;
use crate::irqs::Pio0Irqs;

/// FIFO poll interval: one color word of wire time, rounded up to whole microseconds.
const WORD_TIME_US: u64 = (ColorWord::BITS as u64 * BIT_PERIOD_NS).div_ceil(1_000);

static PIO0_BUS: StaticCell<PioBus<'static, PIO0>> = StaticCell::new();

/// One PIO block shared by every WS2812 chain on it. The pulse program is loaded on first use.
pub struct PioBus<'d, PIO: Instance> {
    common: Mutex<CriticalSectionRawMutex, RefCell<Common<'d, PIO>>>,
    program: OnceLock<LoadedProgram<'d, PIO>>,
}

impl<'d, PIO: Instance> PioBus<'d, PIO> {
    /// Wraps a PIO block's common resource.
    pub fn new(common: Common<'d, PIO>) -> Self {
        Self {
            common: Mutex::new(RefCell::new(common)),
            program: OnceLock::new(),
        }
    }

    fn program(&self) -> &LoadedProgram<'d, PIO> {
        self.program.get_or_init(|| {
            self.common
                .lock(|cell| load_ws2812_program(&mut cell.borrow_mut()))
        })
    }

    /// Points `sm` at the pulse program with `pin` as its data line, clocked for
    /// [`CYCLES_PER_BIT`] cycles per bit at [`BIT_RATE_KHZ`].
    fn attach_chain<const SM: usize>(
        &self,
        sm: &mut StateMachine<'d, PIO, SM>,
        pin: Peri<'d, impl PioPin>,
    ) {
        let program = self.program();
        self.common.lock(|cell| {
            let data_pin = cell.borrow_mut().make_pio_pin(pin);
            let mut cfg = Config::default();
            cfg.set_out_pins(&[&data_pin]);
            cfg.set_set_pins(&[&data_pin]);
            cfg.use_program(program, &[&data_pin]);

            let sys_khz = U24F8::from_num(clk_sys_freq() / 1000);
            let cycle_khz = U24F8::from_num(BIT_RATE_KHZ) * U24F8::from_num(CYCLES_PER_BIT);
            cfg.clock_divider = sys_khz / cycle_khz;

            // Each FIFO word carries one GRB color in its top 24 bits.
            cfg.fifo_join = FifoJoin::TxOnly;
            cfg.shift_out = ShiftConfig {
                auto_fill: true,
                threshold: ColorWord::BITS as u8,
                direction: ShiftDirection::Left,
            };
            sm.set_config(&cfg);
        });
    }
}

impl PioBus<'static, PIO0> {
    /// Claims PIO0 with its IRQ bound and returns the shared bus plus state machine 0.
    ///
    /// Call once at startup; a second call panics because the bus cell is already taken.
    pub fn init_pio0(
        pio: Peri<'static, PIO0>,
    ) -> (&'static Self, StateMachine<'static, PIO0, 0>) {
        let Pio { common, sm0, .. } = Pio::new(pio, Pio0Irqs);
        let bus = PIO0_BUS.init_with(|| Self::new(common));
        (bus, sm0)
    }
}

const LINE_LOW: u8 = 0;
const LINE_HIGH: u8 = 1;

// One pass per bit, side-set driving the data line: T3 low while shifting the bit into X,
// T1 high, then T2 high for a "1" or low for a "0".
fn load_ws2812_program<'d, PIO: Instance>(common: &mut Common<'d, PIO>) -> LoadedProgram<'d, PIO> {
    let mut asm: Assembler<32> = Assembler::new_with_side_set(SideSet::new(false, 1, false));
    let mut next_bit = asm.label();
    let mut zero_tail = asm.label();
    let mut program_end = asm.label();

    asm.set_with_side_set(SetDestination::PINDIRS, 1, LINE_LOW);
    asm.bind(&mut next_bit);
    asm.out_with_delay_and_side_set(OutDestination::X, 1, T3 - 1, LINE_LOW);
    asm.jmp_with_delay_and_side_set(JmpCondition::XIsZero, &mut zero_tail, T1 - 1, LINE_HIGH);
    asm.jmp_with_delay_and_side_set(JmpCondition::Always, &mut next_bit, T2 - 1, LINE_HIGH);
    asm.bind(&mut zero_tail);
    asm.nop_with_delay_and_side_set(T2 - 1, LINE_LOW);
    asm.bind(&mut program_end);

    common.load_program(&asm.assemble_with_wrap(program_end, next_bit))
}

/// WS2812 transmitter on one PIO state machine for a chain of `N` LEDs.
///
/// Bit timing comes from the state machine clock, so interrupts on the CPU side can delay
/// a refill but never stretch a pulse: the line simply idles low until the next word.
pub struct Ws2812Pio<'d, PIO: Instance, const SM: usize, const N: usize> {
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize, const N: usize> Ws2812Pio<'d, PIO, SM, N> {
    /// Runs the WS2812 program on `sm`, driving `pin`, and enables it.
    pub fn new(
        bus: &PioBus<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        pin: Peri<'d, impl PioPin>,
    ) -> Self {
        bus.attach_chain(&mut sm, pin);
        sm.set_enable(true);
        defmt::info!(
            "ws2812: state machine {} ready for {} LEDs at {} kHz",
            SM,
            N,
            BIT_RATE_KHZ
        );
        Self { sm }
    }
}

impl<PIO: Instance, const SM: usize, const N: usize> Transmit<N> for Ws2812Pio<'_, PIO, SM, N> {
    async fn transmit(&mut self, frame: &Frame<N>) -> Result<()> {
        let tx = self.sm.tx();
        for word in frame.iter() {
            tx.wait_push(word.fifo_word()).await;
        }

        while !tx.empty() {
            Timer::after(Duration::from_micros(WORD_TIME_US)).await;
        }
        // The last word is still shifting out of the OSR.
        Timer::after(Duration::from_micros(LATCH_WAIT_US)).await;
        defmt::trace!("ws2812: frame of {} words sent", N);
        Ok(())
    }
}
