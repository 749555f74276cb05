//! Serial Port Driver (UART 16550)
//!
//! COM1 boot console: the only diagnostic channel that exists this early.
//! Output-only, polled, behind a spinlock that is uncontended by
//! construction (nothing else executes during boot).

use core::fmt;
use spin::Mutex;
use x86_64::instructions::port::Port;

/// COM1 base port
const COM1: u16 = 0x3F8;

/// Serial port registers (offsets from base)
const DATA: u16 = 0; // Data register (DLAB=0)
const INT_ENABLE: u16 = 1; // Interrupt Enable (DLAB=0)
const FIFO_CTRL: u16 = 2; // FIFO Control
const LINE_CTRL: u16 = 3; // Line Control
const MODEM_CTRL: u16 = 4; // Modem Control
const LINE_STATUS: u16 = 5; // Line Status
const DIVISOR_LSB: u16 = 0; // Divisor Latch LSB (DLAB=1)
const DIVISOR_MSB: u16 = 1; // Divisor Latch MSB (DLAB=1)

/// Serial port instance
pub struct SerialPort {
    data: Port<u8>,
    int_enable: Port<u8>,
    fifo_ctrl: Port<u8>,
    line_ctrl: Port<u8>,
    modem_ctrl: Port<u8>,
    line_status: Port<u8>,
}

impl SerialPort {
    /// Create a new serial port instance (doesn't initialize hardware)
    const fn new(base: u16) -> Self {
        Self {
            data: Port::new(base + DATA),
            int_enable: Port::new(base + INT_ENABLE),
            fifo_ctrl: Port::new(base + FIFO_CTRL),
            line_ctrl: Port::new(base + LINE_CTRL),
            modem_ctrl: Port::new(base + MODEM_CTRL),
            line_status: Port::new(base + LINE_STATUS),
        }
    }

    /// Initialize the serial port
    ///
    /// Sets up 115200 baud, 8N1 (8 data bits, no parity, 1 stop bit)
    pub unsafe fn init(&mut self) {
        // Disable UART interrupts; this phase is polled everywhere
        self.int_enable.write(0x00);

        // Enable DLAB to set the baud rate divisor
        self.line_ctrl.write(0x80);

        // Divisor 1 = 115200 baud
        Port::<u8>::new(COM1 + DIVISOR_LSB).write(0x01);
        Port::<u8>::new(COM1 + DIVISOR_MSB).write(0x00);

        // 8 bits, no parity, 1 stop bit, DLAB off
        self.line_ctrl.write(0x03);

        // Enable FIFO, clear buffers, 14-byte threshold
        self.fifo_ctrl.write(0xC7);

        // DTR, RTS, OUT2
        self.modem_ctrl.write(0x0B);
    }

    /// Write a byte to the serial port
    pub unsafe fn write_byte(&mut self, byte: u8) {
        // Wait for transmit buffer to be empty
        while self.line_status.read() & 0x20 == 0 {}

        self.data.write(byte);
    }
}

impl fmt::Write for SerialPort {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            unsafe {
                self.write_byte(byte);
            }
        }
        Ok(())
    }
}

/// Global serial port instance
static CONSOLE: Mutex<SerialPort> = Mutex::new(SerialPort::new(COM1));

/// Initialize the boot console (call once, before the first message)
pub unsafe fn init() {
    CONSOLE.lock().init();
}

/// Macro for boot console output (like print!)
#[macro_export]
macro_rules! boot_print {
    ($($arg:tt)*) => {
        $crate::drivers::serial::_print(format_args!($($arg)*))
    };
}

/// Macro for boot console output with newline (like println!)
#[macro_export]
macro_rules! boot_println {
    () => ($crate::boot_print!("\n"));
    ($($arg:tt)*) => ($crate::boot_print!("{}\n", format_args!($($arg)*)));
}

/// Internal print function for the macros
///
/// Under `cfg(test)` the console is the host's stdout: library tests run
/// in a process where the COM1 ports are not ours to touch.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    #[cfg(not(test))]
    {
        use core::fmt::Write;
        CONSOLE.lock().write_fmt(args).unwrap();
    }
    #[cfg(test)]
    {
        std::print!("{}", args);
    }
}
