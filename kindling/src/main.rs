#![no_std]
#![no_main]

//! Freestanding entry of the second-stage loader.
//!
//! The stage-one stub has already switched to a flat 32-bit environment,
//! built the descriptor tables and set up a stack; it jumps here with
//! nothing else alive on the machine. This binary wires the real devices
//! into the load path and performs the one jump that ends it.

use kindling::boot_println;
use kindling::drivers::{ata::AtaDisk, serial};
use kindling::handoff;
use kindling::loader::{self, BootLayout, PhysRegion};

/// Physical window the loader may write: everything from the scratch
/// area up to the 16 MiB addressable limit.
const PHYS_WINDOW_BASE: u32 = 0x1_0000;
const PHYS_WINDOW_LEN: usize = 0x0100_0000 - 0x1_0000;

/// Entry from the stage-one stub.
#[no_mangle]
pub extern "C" fn boot_main() -> ! {
    unsafe {
        serial::init();
    }
    boot_println!("[boot] kindling: staging kernel from primary ATA disk");

    let mut disk = AtaDisk::primary();
    disk.init();

    let layout = BootLayout::default();
    // Sole owner of the window: nothing else executes during boot, and
    // ownership passes to the kernel at the jump.
    let mut region = unsafe { PhysRegion::from_raw(PHYS_WINDOW_BASE, PHYS_WINDOW_LEN) };

    match loader::load_image(&mut disk, &mut region, &layout) {
        Ok(entry) => {
            boot_println!("[boot] entering kernel at {:#x}", entry);
            unsafe { handoff::enter(entry) }
        }
        Err(err) => {
            boot_println!("[boot] load failed: {}", err);
            handoff::fail()
        }
    }
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    boot_println!("[boot] panic: {}", info);
    handoff::fail()
}
