//! ATA/IDE disk driver (PIO mode)
//!
//! Polled reads from the primary-master ATA drive, used to pull the kernel
//! image off disk before interrupts, DMA, or any filesystem exist.
//!
//! **Supported:**
//! - Primary bus (0x1F0-0x1F7)
//! - Master drive
//! - 28-bit LBA addressing
//! - Read operations
//!
//! **Not supported:**
//! - Secondary bus, slave drives, 48-bit LBA, DMA, writes
//!
//! Every wait is a busy-spin with no timeout: at this stage there is no
//! timer and no higher layer to escalate to, so a silent device hangs the
//! boot here. A device that answers but raises ERR or DF is surfaced as
//! [`DiskError::DeviceFault`].

use bitflags::bitflags;
use x86_64::instructions::port::{Port, PortReadOnly, PortWriteOnly};

use crate::block::{BlockDevice, DiskError, SECTOR_SIZE};

/// ATA command: READ SECTORS (with retry)
const ATA_CMD_READ_SECTORS: u8 = 0x20;

/// Primary ATA bus base I/O port
const ATA_PRIMARY_BASE: u16 = 0x1F0;

/// Primary bus device-control register
const ATA_PRIMARY_CTRL: u16 = 0x3F6;

/// I/O port offsets from base
const ATA_REG_DATA: u16 = 0; // 0x1F0
const ATA_REG_SECTOR_COUNT: u16 = 2; // 0x1F2
const ATA_REG_LBA_LOW: u16 = 3; // 0x1F3
const ATA_REG_LBA_MID: u16 = 4; // 0x1F4
const ATA_REG_LBA_HIGH: u16 = 5; // 0x1F5
const ATA_REG_DRIVE: u16 = 6; // 0x1F6
const ATA_REG_STATUS: u16 = 7; // 0x1F7 (read)
const ATA_REG_COMMAND: u16 = 7; // 0x1F7 (write)

/// Drive-select base: LBA mode, master drive
const DRIVE_SELECT_LBA_MASTER: u8 = 0xE0;

/// nIEN bit of the device-control register: mask controller interrupts
const CTRL_NIEN: u8 = 0x02;

bitflags! {
    /// ATA status register bits (0x1F7)
    pub struct Status: u8 {
        /// Previous command ended in error
        const ERR = 1 << 0;
        /// Data request: ready to transfer words
        const DRQ = 1 << 3;
        /// Drive fault
        const DF  = 1 << 5;
        /// Drive ready to accept commands
        const RDY = 1 << 6;
        /// Controller busy
        const BSY = 1 << 7;
    }
}

/// Primary-master ATA drive, PIO mode.
pub struct AtaDisk {
    data: Port<u16>,
    sector_count: PortWriteOnly<u8>,
    lba_low: PortWriteOnly<u8>,
    lba_mid: PortWriteOnly<u8>,
    lba_high: PortWriteOnly<u8>,
    drive_select: PortWriteOnly<u8>,
    status: PortReadOnly<u8>,
    command: PortWriteOnly<u8>,
    control: PortWriteOnly<u8>,
}

impl AtaDisk {
    /// Primary-master drive on the standard port block.
    pub const fn primary() -> Self {
        Self {
            data: Port::new(ATA_PRIMARY_BASE + ATA_REG_DATA),
            sector_count: PortWriteOnly::new(ATA_PRIMARY_BASE + ATA_REG_SECTOR_COUNT),
            lba_low: PortWriteOnly::new(ATA_PRIMARY_BASE + ATA_REG_LBA_LOW),
            lba_mid: PortWriteOnly::new(ATA_PRIMARY_BASE + ATA_REG_LBA_MID),
            lba_high: PortWriteOnly::new(ATA_PRIMARY_BASE + ATA_REG_LBA_HIGH),
            drive_select: PortWriteOnly::new(ATA_PRIMARY_BASE + ATA_REG_DRIVE),
            status: PortReadOnly::new(ATA_PRIMARY_BASE + ATA_REG_STATUS),
            command: PortWriteOnly::new(ATA_PRIMARY_BASE + ATA_REG_COMMAND),
            control: PortWriteOnly::new(ATA_PRIMARY_CTRL),
        }
    }

    /// Mask controller interrupts (nIEN). Call once before the first read;
    /// this phase of boot runs with interrupts off everywhere.
    pub fn init(&mut self) {
        unsafe {
            self.control.write(CTRL_NIEN);
        }
    }

    /// Spin until the controller reports ready-and-not-busy.
    ///
    /// No timeout: an absent or wedged device parks the boot in this loop.
    /// A responding device that raises ERR or DF is reported instead of
    /// being read from.
    fn wait_ready(&mut self) -> Result<(), DiskError> {
        loop {
            let status = Status::from_bits_truncate(unsafe { self.status.read() });
            if status.contains(Status::BSY) {
                core::hint::spin_loop();
                continue;
            }
            if status.intersects(Status::ERR | Status::DF) {
                return Err(DiskError::DeviceFault);
            }
            if status.contains(Status::RDY) {
                return Ok(());
            }
            core::hint::spin_loop();
        }
    }
}

impl BlockDevice for AtaDisk {
    fn read_sector(&mut self, lba: u64, buf: &mut [u8]) -> Result<(), DiskError> {
        self.wait_ready()?;

        // Program one sector at `lba`, 28-bit LBA split across the address
        // registers, high nibble in drive-select.
        unsafe {
            self.sector_count.write(1);
            self.lba_low.write(lba as u8);
            self.lba_mid.write((lba >> 8) as u8);
            self.lba_high.write((lba >> 16) as u8);
            self.drive_select
                .write(DRIVE_SELECT_LBA_MASTER | ((lba >> 24) & 0x0F) as u8);
            self.command.write(ATA_CMD_READ_SECTORS);
        }

        self.wait_ready()?;

        // One sector = 256 words off the data port.
        for chunk in buf[..SECTOR_SIZE].chunks_exact_mut(2) {
            let word = unsafe { self.data.read() };
            chunk[0] = word as u8;
            chunk[1] = (word >> 8) as u8;
        }

        Ok(())
    }
}
