//! Kernel image loading
//!
//! The second half of the boot path: stage the image prefix off disk,
//! validate it, replay the program-header table through the block device
//! to place each segment, and hand back the entry address for the jump.
//!
//! The sequence is linear with no way back. Any error lands the caller in
//! the terminal fail path; success ends with control leaving this crate
//! forever.

use crate::block::{BlockDevice, DiskError, SECTOR_SIZE};
use crate::boot_println;
use crate::image::{ImageError, ImageHeader, Segment, SegmentFlags};

/// Addressable physical range of the platform: destination and entry
/// addresses are masked to 24 bits (16 MiB) before use.
pub const PHYS_ADDR_MASK: u32 = 0x00FF_FFFF;

/// First LBA of the kernel image. Sector 0 holds the loader itself.
pub const IMAGE_FIRST_LBA: u64 = 1;

/// Sectors staged up front: covers the file header and the whole
/// program-header table.
pub const STAGE_SECTORS: usize = 8;

/// Bytes staged up front.
pub const STAGE_BYTES: usize = STAGE_SECTORS * SECTOR_SIZE;

/// Errors on the load path. Every variant is terminal: the caller reports
/// it once and enters the fail state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// The block device failed
    Disk(DiskError),
    /// The staged image failed validation
    Image(ImageError),
    /// A segment's destination falls outside the load window
    SegmentOutOfRange { addr: u32, len: u32 },
    /// A sector landing falls outside the physical region
    RegionOutOfBounds { addr: u32, len: u32 },
}

impl From<DiskError> for LoadError {
    fn from(err: DiskError) -> Self {
        LoadError::Disk(err)
    }
}

impl From<ImageError> for LoadError {
    fn from(err: ImageError) -> Self {
        LoadError::Image(err)
    }
}

impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoadError::Disk(err) => write!(f, "disk: {}", err),
            LoadError::Image(err) => write!(f, "image: {}", err),
            LoadError::SegmentOutOfRange { addr, len } => {
                write!(f, "segment {:#x}+{:#x} outside the load window", addr, len)
            }
            LoadError::RegionOutOfBounds { addr, len } => {
                write!(f, "write {:#x}+{:#x} outside the physical region", addr, len)
            }
        }
    }
}

/// A writable window onto physical memory.
///
/// The loader never touches a raw address directly: every sector landing
/// and every zero-fill goes through this window and is bounds-checked
/// against it. On hardware the window covers the real load area; in tests
/// it is an ordinary buffer.
pub struct PhysRegion<'a> {
    base: u32,
    mem: &'a mut [u8],
}

impl<'a> PhysRegion<'a> {
    pub fn new(base: u32, mem: &'a mut [u8]) -> Self {
        Self { base, mem }
    }

    /// Window over raw physical memory at `base`.
    ///
    /// # Safety
    ///
    /// The caller must own `[base, base + len)` exclusively for the
    /// lifetime of the region. During boot that holds trivially: this
    /// single sequential flow is all that executes.
    pub unsafe fn from_raw(base: u32, len: usize) -> Self {
        Self {
            base,
            mem: core::slice::from_raw_parts_mut(base as usize as *mut u8, len),
        }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn len(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    /// Borrow `[addr, addr + len)` of the window, read-only.
    pub fn slice(&self, addr: u32, len: usize) -> Result<&[u8], LoadError> {
        let (start, end) = self.range(addr, len)?;
        Ok(&self.mem[start..end])
    }

    /// Borrow `[addr, addr + len)` of the window for writing.
    pub fn slice_mut(&mut self, addr: u32, len: usize) -> Result<&mut [u8], LoadError> {
        let (start, end) = self.range(addr, len)?;
        Ok(&mut self.mem[start..end])
    }

    fn range(&self, addr: u32, len: usize) -> Result<(usize, usize), LoadError> {
        let oob = LoadError::RegionOutOfBounds {
            addr,
            len: len as u32,
        };
        let start = addr.checked_sub(self.base).ok_or(oob)? as usize;
        let end = start.checked_add(len).ok_or(oob)?;
        if end > self.mem.len() {
            return Err(oob);
        }
        Ok((start, end))
    }
}

/// Fixed layout of a boot attempt: where the image prefix is staged and
/// where segments are allowed to land.
///
/// There is no runtime configuration; the default describes the real
/// machine. Tests substitute a smaller layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootLayout {
    /// Address the header + program-table prefix is staged at
    pub stage_addr: u32,
    /// Segments must land at or above this address
    pub load_min: u32,
    /// Segments must end at or below this address
    pub load_max: u32,
}

impl Default for BootLayout {
    fn default() -> Self {
        Self {
            // Scratch below the kernel: the prefix is consumed before any
            // segment can land on it.
            stage_addr: 0x1_0000,
            load_min: 0x0010_0000,
            load_max: 0x0100_0000,
        }
    }
}

/// Read the sectors covering `[offset, offset + count)` of the image into
/// the region, starting at `dest - offset % SECTOR_SIZE`.
///
/// Transfers are sector-granular: the landing is rounded down to the
/// enclosing sector boundary and may extend up to one sector past the
/// requested end. Destinations are loaded in increasing address order, so
/// the spill lands in space nothing has claimed yet. `count == 0` reads
/// nothing.
pub fn read_range<D: BlockDevice>(
    disk: &mut D,
    region: &mut PhysRegion<'_>,
    dest: u32,
    count: u32,
    offset: u32,
) -> Result<(), LoadError> {
    if count == 0 {
        return Ok(());
    }

    let end = dest.checked_add(count).ok_or(LoadError::RegionOutOfBounds {
        addr: dest,
        len: count,
    })?;

    let mut addr = dest
        .checked_sub(offset % SECTOR_SIZE as u32)
        .ok_or(LoadError::RegionOutOfBounds {
            addr: dest,
            len: count,
        })?;
    let mut lba = IMAGE_FIRST_LBA + (offset / SECTOR_SIZE as u32) as u64;

    while addr < end {
        let buf = region.slice_mut(addr, SECTOR_SIZE)?;
        disk.read_sector(lba, buf)?;
        addr += SECTOR_SIZE as u32;
        lba += 1;
    }

    Ok(())
}

/// Run the boot sequence against `disk`: stage, validate, place segments.
///
/// Returns the masked entry address for the caller to jump to. Does not
/// jump itself: tests need to observe the result, and only the
/// freestanding entry point may actually leave.
pub fn load_image<D: BlockDevice>(
    disk: &mut D,
    region: &mut PhysRegion<'_>,
    layout: &BootLayout,
) -> Result<u32, LoadError> {
    // Stage the header and the full program-header table.
    read_range(disk, region, layout.stage_addr, STAGE_BYTES as u32, 0)?;

    let header = {
        let staged = region.slice(layout.stage_addr, STAGE_BYTES)?;
        let header = ImageHeader::parse(staged)?;
        header.check_table(staged.len())?;
        header
    };

    boot_println!(
        "[boot] image ok: {} segments, entry {:#x}",
        header.ph_count,
        header.entry & PHYS_ADDR_MASK
    );

    // Place every table entry, in table order. Later segments may extend
    // earlier ones' zero-fill regions, so order is part of the contract.
    for index in 0..header.ph_count {
        let segment = {
            let staged = region.slice(layout.stage_addr, STAGE_BYTES)?;
            header.segment(staged, index)?
        };
        load_segment(disk, region, layout, &segment)?;
    }

    Ok(header.entry & PHYS_ADDR_MASK)
}

fn load_segment<D: BlockDevice>(
    disk: &mut D,
    region: &mut PhysRegion<'_>,
    layout: &BootLayout,
    segment: &Segment,
) -> Result<(), LoadError> {
    let dest = segment.dest & PHYS_ADDR_MASK;

    // Validate the destination before any write reaches the device. The
    // descriptor comes off an untrusted disk; a bad one is an error, not
    // a memory write.
    let out_of_range = LoadError::SegmentOutOfRange {
        addr: dest,
        len: segment.mem_size,
    };
    let end = dest.checked_add(segment.mem_size).ok_or(out_of_range)?;
    if dest < layout.load_min || end > layout.load_max {
        return Err(out_of_range);
    }

    boot_println!(
        "[boot]   segment {:#09x}..{:#09x} {}{}{}",
        dest,
        end,
        if segment.flags.contains(SegmentFlags::READ) { "r" } else { "-" },
        if segment.flags.contains(SegmentFlags::WRITE) { "w" } else { "-" },
        if segment.flags.contains(SegmentFlags::EXEC) { "x" } else { "-" },
    );

    read_range(disk, region, dest, segment.mem_size, segment.file_offset)?;

    // The file may carry fewer bytes than the segment occupies; the rest
    // is uninitialized storage and must read as zeros.
    if segment.mem_size > segment.file_size {
        let tail_addr = dest + segment.file_size;
        let tail = region.slice_mut(tail_addr, (segment.mem_size - segment.file_size) as usize)?;
        tail.fill(0);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::RamDisk;
    use crate::image::{ELF_MAGIC, HEADER_SIZE, SEGMENT_DESC_SIZE};

    const TEST_LAYOUT: BootLayout = BootLayout {
        stage_addr: 0x1000,
        load_min: 0x3000,
        load_max: 0x8000,
    };

    const REGION_BASE: u32 = 0x1000;
    const REGION_LEN: usize = 0x7000;

    /// A block device that records every LBA it serves.
    struct CountingDisk<'a> {
        inner: RamDisk<'a>,
        reads: Vec<u64>,
    }

    impl<'a> CountingDisk<'a> {
        fn new(data: &'a [u8]) -> Self {
            Self {
                inner: RamDisk::new(data),
                reads: Vec::new(),
            }
        }
    }

    impl BlockDevice for CountingDisk<'_> {
        fn read_sector(&mut self, lba: u64, buf: &mut [u8]) -> Result<(), DiskError> {
            self.reads.push(lba);
            self.inner.read_sector(lba, buf)
        }
    }

    /// A block device that faults from a given LBA onward.
    struct FaultyDisk<'a> {
        inner: RamDisk<'a>,
        fail_from: u64,
    }

    impl BlockDevice for FaultyDisk<'_> {
        fn read_sector(&mut self, lba: u64, buf: &mut [u8]) -> Result<(), DiskError> {
            if lba >= self.fail_from {
                return Err(DiskError::DeviceFault);
            }
            self.inner.read_sector(lba, buf)
        }
    }

    fn header_bytes(entry: u32, ph_count: u16) -> [u8; HEADER_SIZE] {
        let mut h = [0u8; HEADER_SIZE];
        h[0..4].copy_from_slice(&ELF_MAGIC.to_le_bytes());
        h[24..28].copy_from_slice(&entry.to_le_bytes());
        h[28..32].copy_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
        h[44..46].copy_from_slice(&ph_count.to_le_bytes());
        h
    }

    fn descriptor_bytes(
        file_offset: u32,
        dest: u32,
        file_size: u32,
        mem_size: u32,
    ) -> [u8; SEGMENT_DESC_SIZE] {
        let mut d = [0u8; SEGMENT_DESC_SIZE];
        d[4..8].copy_from_slice(&file_offset.to_le_bytes());
        d[8..12].copy_from_slice(&dest.to_le_bytes());
        d[16..20].copy_from_slice(&file_size.to_le_bytes());
        d[20..24].copy_from_slice(&mem_size.to_le_bytes());
        d[24..28].copy_from_slice(&5u32.to_le_bytes()); // r-x
        d
    }

    /// Lay out a disk: sector 0 is the loader (junk here), the image
    /// starts at sector 1, padded to whole sectors and to at least the
    /// staged prefix.
    fn make_disk(image: &[u8]) -> Vec<u8> {
        let image_len = image.len().max(STAGE_BYTES).next_multiple_of(SECTOR_SIZE);
        let mut disk = vec![0u8; SECTOR_SIZE + image_len];
        disk[SECTOR_SIZE..SECTOR_SIZE + image.len()].copy_from_slice(image);
        disk
    }

    fn fresh_region_buf() -> Vec<u8> {
        // Canary fill so untouched memory is distinguishable from zeros.
        vec![0xAA; REGION_LEN]
    }

    fn segment_pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_read_range_zero_count_reads_nothing() {
        let disk_data = make_disk(&[]);
        let mut disk = CountingDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        read_range(&mut disk, &mut region, 0x3000, 0, 1234).unwrap();

        assert!(disk.reads.is_empty());
    }

    #[test]
    fn test_read_range_sector_translation() {
        // Bytes [700, 800) of the image live in its second sector (LBA 2)
        // and must land rounded down: first write at dest - 700 % 512.
        let mut image = vec![0u8; STAGE_BYTES];
        let pattern = segment_pattern(100);
        image[700..800].copy_from_slice(&pattern);

        let disk_data = make_disk(&image);
        let mut disk = CountingDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        let dest = 0x3200;
        read_range(&mut disk, &mut region, dest, 100, 700).unwrap();

        assert_eq!(disk.reads, vec![2]);

        let rounded = (dest - 700 % 512 - REGION_BASE) as usize;
        assert_eq!(&buf[rounded..rounded + 512], &image[512..1024]);

        let at_dest = (dest - REGION_BASE) as usize;
        assert_eq!(&buf[at_dest..at_dest + 100], &pattern[..]);
    }

    #[test]
    fn test_load_single_segment_image() {
        let pattern = segment_pattern(1000);
        let mut image = vec![0u8; 0x600 + 1000];
        image[..HEADER_SIZE].copy_from_slice(&header_bytes(0x3000, 1));
        image[HEADER_SIZE..HEADER_SIZE + SEGMENT_DESC_SIZE]
            .copy_from_slice(&descriptor_bytes(0x600, 0x3000, 1000, 1000));
        image[0x600..0x600 + 1000].copy_from_slice(&pattern);

        let disk_data = make_disk(&image);
        let mut disk = RamDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        let entry = load_image(&mut disk, &mut region, &TEST_LAYOUT).unwrap();

        assert_eq!(entry, 0x3000);
        let at_dest = (0x3000 - REGION_BASE) as usize;
        assert_eq!(&buf[at_dest..at_dest + 1000], &pattern[..]);
    }

    #[test]
    fn test_entry_address_is_masked() {
        let mut image = vec![0u8; STAGE_BYTES];
        image[..HEADER_SIZE].copy_from_slice(&header_bytes(0xFF00_3000, 0));

        let disk_data = make_disk(&image);
        let mut disk = RamDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        let entry = load_image(&mut disk, &mut region, &TEST_LAYOUT).unwrap();

        assert_eq!(entry, 0x3000);
    }

    #[test]
    fn test_segment_destination_is_masked() {
        // Destination carries high bits past the addressable range; the
        // loader must mask them off before placing the segment.
        let pattern = segment_pattern(512);
        let mut image = vec![0u8; 0x600 + 512];
        image[..HEADER_SIZE].copy_from_slice(&header_bytes(0x3000, 1));
        image[HEADER_SIZE..HEADER_SIZE + SEGMENT_DESC_SIZE]
            .copy_from_slice(&descriptor_bytes(0x600, 0xFF00_3000, 512, 512));
        image[0x600..0x600 + 512].copy_from_slice(&pattern);

        let disk_data = make_disk(&image);
        let mut disk = RamDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        load_image(&mut disk, &mut region, &TEST_LAYOUT).unwrap();

        let at_dest = (0x3000 - REGION_BASE) as usize;
        assert_eq!(&buf[at_dest..at_dest + 512], &pattern[..]);
    }

    #[test]
    fn test_zero_fill_past_file_size() {
        let pattern = segment_pattern(512);
        let mut image = vec![0xEEu8; STAGE_BYTES]; // 0xEE: junk past filesz
        image[..HEADER_SIZE].copy_from_slice(&header_bytes(0x3000, 1));
        image[HEADER_SIZE..HEADER_SIZE + SEGMENT_DESC_SIZE]
            .copy_from_slice(&descriptor_bytes(0x600, 0x3000, 512, 2048));
        image[0x600..0x600 + 512].copy_from_slice(&pattern);

        let disk_data = make_disk(&image);
        let mut disk = RamDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        load_image(&mut disk, &mut region, &TEST_LAYOUT).unwrap();

        let at_dest = (0x3000 - REGION_BASE) as usize;
        assert_eq!(&buf[at_dest..at_dest + 512], &pattern[..]);
        // [filesz, memsz) must read as zeros, not as disk junk or canary.
        assert!(buf[at_dest + 512..at_dest + 2048].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_segment_reads_follow_table_order() {
        let mut image = vec![0u8; STAGE_BYTES];
        image[..HEADER_SIZE].copy_from_slice(&header_bytes(0x3000, 2));
        let table = HEADER_SIZE;
        image[table..table + SEGMENT_DESC_SIZE]
            .copy_from_slice(&descriptor_bytes(0x600, 0x3000, 512, 512));
        image[table + SEGMENT_DESC_SIZE..table + 2 * SEGMENT_DESC_SIZE]
            .copy_from_slice(&descriptor_bytes(0x800, 0x3400, 768, 768));

        let disk_data = make_disk(&image);
        let mut disk = CountingDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        load_image(&mut disk, &mut region, &TEST_LAYOUT).unwrap();

        // Stage prefix first (LBA 1..=8), then each descriptor's covering
        // sectors, in table order.
        let expected: Vec<u64> = (1..=8).chain([4, 5, 6]).collect();
        assert_eq!(disk.reads, expected);
    }

    #[test]
    fn test_bad_magic_reads_no_segments() {
        let mut image = vec![0u8; STAGE_BYTES];
        image[..HEADER_SIZE].copy_from_slice(&header_bytes(0x3000, 1));
        image[HEADER_SIZE..HEADER_SIZE + SEGMENT_DESC_SIZE]
            .copy_from_slice(&descriptor_bytes(0x600, 0x3000, 512, 512));
        image[0] ^= 0xFF; // corrupt the magic

        let disk_data = make_disk(&image);
        let mut disk = CountingDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        let result = load_image(&mut disk, &mut region, &TEST_LAYOUT);

        assert_eq!(result, Err(LoadError::Image(ImageError::BadMagic)));
        // Only the staged prefix was ever read.
        assert_eq!(disk.reads, (1..=8).collect::<Vec<u64>>());
    }

    #[test]
    fn test_segment_below_window_rejected_without_write() {
        let mut image = vec![0u8; STAGE_BYTES];
        image[..HEADER_SIZE].copy_from_slice(&header_bytes(0x3000, 1));
        image[HEADER_SIZE..HEADER_SIZE + SEGMENT_DESC_SIZE]
            .copy_from_slice(&descriptor_bytes(0x600, 0x2000, 512, 512));

        let disk_data = make_disk(&image);
        let mut disk = CountingDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        let result = load_image(&mut disk, &mut region, &TEST_LAYOUT);

        assert_eq!(
            result,
            Err(LoadError::SegmentOutOfRange {
                addr: 0x2000,
                len: 512
            })
        );
        assert_eq!(disk.reads, (1..=8).collect::<Vec<u64>>());
        // The rejected destination was never written.
        let at_dest = (0x2000 - REGION_BASE) as usize;
        assert!(buf[at_dest..at_dest + 512].iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_segment_past_window_end_rejected() {
        let mut image = vec![0u8; STAGE_BYTES];
        image[..HEADER_SIZE].copy_from_slice(&header_bytes(0x3000, 1));
        image[HEADER_SIZE..HEADER_SIZE + SEGMENT_DESC_SIZE]
            .copy_from_slice(&descriptor_bytes(0x600, 0x7F00, 512, 512));

        let disk_data = make_disk(&image);
        let mut disk = RamDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        let result = load_image(&mut disk, &mut region, &TEST_LAYOUT);

        assert_eq!(
            result,
            Err(LoadError::SegmentOutOfRange {
                addr: 0x7F00,
                len: 512
            })
        );
    }

    #[test]
    fn test_oversized_table_rejected() {
        // 200 descriptors cannot fit the staged prefix.
        let mut image = vec![0u8; STAGE_BYTES];
        image[..HEADER_SIZE].copy_from_slice(&header_bytes(0x3000, 200));

        let disk_data = make_disk(&image);
        let mut disk = RamDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        let result = load_image(&mut disk, &mut region, &TEST_LAYOUT);

        assert_eq!(
            result,
            Err(LoadError::Image(ImageError::ProgramTableOutOfBounds))
        );
    }

    #[test]
    fn test_device_fault_stops_the_load() {
        // Segment lives past the staged prefix (LBA 9), so staging
        // succeeds and the fault hits on the segment read itself.
        let mut image = vec![0u8; STAGE_BYTES + 512];
        image[..HEADER_SIZE].copy_from_slice(&header_bytes(0x3000, 1));
        image[HEADER_SIZE..HEADER_SIZE + SEGMENT_DESC_SIZE]
            .copy_from_slice(&descriptor_bytes(STAGE_BYTES as u32, 0x3000, 512, 512));

        let disk_data = make_disk(&image);
        let mut disk = FaultyDisk {
            inner: RamDisk::new(&disk_data),
            fail_from: 9,
        };
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        let result = load_image(&mut disk, &mut region, &TEST_LAYOUT);

        assert_eq!(result, Err(LoadError::Disk(DiskError::DeviceFault)));
    }

    #[test]
    fn test_truncated_device_surfaces_as_disk_error() {
        // Too small to hold the staged prefix.
        let disk_data = vec![0u8; SECTOR_SIZE * 3];
        let mut disk = RamDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        let result = load_image(&mut disk, &mut region, &TEST_LAYOUT);

        assert_eq!(result, Err(LoadError::Disk(DiskError::OutOfRange)));
    }

    #[test]
    fn test_region_bounds_guard_sector_spill() {
        // A landing that would spill past the region is refused before
        // the device writes anything.
        let disk_data = make_disk(&[]);
        let mut disk = CountingDisk::new(&disk_data);
        let mut buf = fresh_region_buf();
        let mut region = PhysRegion::new(REGION_BASE, &mut buf);

        // Region ends at 0x8000; the single covering sector would run to
        // 0x81F0.
        let result = read_range(&mut disk, &mut region, 0x7FF0, 0x20, 0);

        assert_eq!(
            result,
            Err(LoadError::RegionOutOfBounds {
                addr: 0x7FF0,
                len: SECTOR_SIZE as u32
            })
        );
        assert!(disk.reads.is_empty());
    }
}
