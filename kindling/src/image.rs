//! ELF image parsing
//!
//! Interprets the staged prefix of the kernel image: the ELF32 file header
//! and its program-header table. Fields are pulled out of the raw bytes
//! little-endian, so nothing here depends on struct layout or alignment of
//! whatever buffer the sectors landed in.
//!
//! Validation is deliberately thin. The magic number and the bounds of
//! everything this loader reads are checked; class, machine and version
//! are not. Past its magic the image is trusted: it is the kernel we
//! were built to boot, and no protection model exists yet.

use bitflags::bitflags;

/// ELF magic number: \x7fELF as a little-endian u32
pub const ELF_MAGIC: u32 = 0x464C_457F;

/// Size of the ELF32 file header in bytes
pub const HEADER_SIZE: usize = 52;

/// Size of one ELF32 program header in bytes
pub const SEGMENT_DESC_SIZE: usize = 32;

/// Errors that can occur while interpreting the staged image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageError {
    /// Invalid ELF magic number
    BadMagic,
    /// Staged prefix too small to contain the file header
    Truncated,
    /// Program-header table extends past the staged prefix
    ProgramTableOutOfBounds,
}

impl core::fmt::Display for ImageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ImageError::BadMagic => write!(f, "invalid ELF magic"),
            ImageError::Truncated => write!(f, "image header truncated"),
            ImageError::ProgramTableOutOfBounds => {
                write!(f, "program-header table out of bounds")
            }
        }
    }
}

bitflags! {
    /// Program-header flags (PF_*). Logged for diagnostics, never
    /// enforced: this loader grants the image full trust.
    pub struct SegmentFlags: u32 {
        const EXEC  = 1 << 0;
        const WRITE = 1 << 1;
        const READ  = 1 << 2;
    }
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// The ELF32 file-header fields this loader consumes.
///
/// Offsets follow the ELF32 layout: entry at 24, program-header table
/// offset at 28, entry count at 44.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    /// Entry-point address, as given by the image (unmasked)
    pub entry: u32,
    /// File offset of the program-header table
    pub ph_offset: u32,
    /// Number of program headers
    pub ph_count: u16,
}

impl ImageHeader {
    /// Parse and validate the file header at the front of `staged`.
    pub fn parse(staged: &[u8]) -> Result<Self, ImageError> {
        if staged.len() < HEADER_SIZE {
            return Err(ImageError::Truncated);
        }

        if read_u32(staged, 0) != ELF_MAGIC {
            return Err(ImageError::BadMagic);
        }

        Ok(Self {
            entry: read_u32(staged, 24),
            ph_offset: read_u32(staged, 28),
            ph_count: read_u16(staged, 44),
        })
    }

    /// Check that the whole program-header table lies inside a staged
    /// prefix of `staged_len` bytes.
    pub fn check_table(&self, staged_len: usize) -> Result<(), ImageError> {
        let table_len = (self.ph_count as usize)
            .checked_mul(SEGMENT_DESC_SIZE)
            .ok_or(ImageError::ProgramTableOutOfBounds)?;
        let table_end = (self.ph_offset as usize)
            .checked_add(table_len)
            .ok_or(ImageError::ProgramTableOutOfBounds)?;

        if table_end > staged_len {
            return Err(ImageError::ProgramTableOutOfBounds);
        }
        Ok(())
    }

    /// Parse the `index`th program header out of the staged prefix.
    pub fn segment(&self, staged: &[u8], index: u16) -> Result<Segment, ImageError> {
        let offset = (self.ph_offset as usize)
            .checked_add(index as usize * SEGMENT_DESC_SIZE)
            .ok_or(ImageError::ProgramTableOutOfBounds)?;
        let end = offset
            .checked_add(SEGMENT_DESC_SIZE)
            .ok_or(ImageError::ProgramTableOutOfBounds)?;
        let desc = staged
            .get(offset..end)
            .ok_or(ImageError::ProgramTableOutOfBounds)?;

        // ELF32 program header: type, offset, vaddr, paddr (unused),
        // filesz, memsz, flags, align. Type and align are ignored; every
        // table entry is loaded, in table order.
        Ok(Segment {
            file_offset: read_u32(desc, 4),
            dest: read_u32(desc, 8),
            file_size: read_u32(desc, 16),
            mem_size: read_u32(desc, 20),
            flags: SegmentFlags::from_bits_truncate(read_u32(desc, 24)),
        })
    }
}

/// One loadable region of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// File offset where the segment's bytes begin
    pub file_offset: u32,
    /// Destination address, as given by the image (unmasked)
    pub dest: u32,
    /// Bytes present in the file
    pub file_size: u32,
    /// Bytes occupied in memory; the excess over `file_size` is
    /// zero-filled by the loader
    pub mem_size: u32,
    /// R/W/X flags, diagnostic only
    pub flags: SegmentFlags,
}
