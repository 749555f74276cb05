//! Control transfer out of the loader
//!
//! Both ways a boot attempt ends: the one-way jump into the loaded
//! kernel, or the terminal fail state. Nothing here returns.

use x86_64::instructions::hlt;
use x86_64::instructions::port::PortWriteOnly;

/// Emulator exit channel. Certain virtualized environments watch this
/// port and halt with a report; on real hardware the writes go nowhere.
const EXIT_PORT: u16 = 0x8A00;

/// First value of the fixed failure pair
const EXIT_SELECT: u16 = 0x8A00;

/// Second value of the fixed failure pair
const EXIT_HALT: u16 = 0x8E00;

/// Jump to the loaded image's entry point.
///
/// Not a call in the ordinary sense: ownership of every loaded byte
/// passes to the kernel here, and control never comes back.
///
/// # Safety
///
/// `entry` must be the validated, masked entry address of an image whose
/// segments are fully placed in memory.
pub unsafe fn enter(entry: u32) -> ! {
    let kernel: extern "C" fn() -> ! = core::mem::transmute(entry as usize);
    kernel()
}

/// Terminal fail state: signal the emulator exit channel, then park.
///
/// There is no recovery and no further diagnostic channel; the serial
/// line (if anyone is listening) already carried the reason.
pub fn fail() -> ! {
    let mut port = PortWriteOnly::<u16>::new(EXIT_PORT);
    unsafe {
        port.write(EXIT_SELECT);
        port.write(EXIT_HALT);
    }
    halt()
}

/// Permanent idle loop.
pub fn halt() -> ! {
    loop {
        hlt();
    }
}
