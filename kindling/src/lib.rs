//! # Kindling, the second-stage boot loader
//!
//! Runs immediately after the stage-one stub hands over a flat 32-bit
//! execution environment: pulls the kernel image off the boot disk with
//! raw polled I/O, validates it, places its segments, and jumps to its
//! entry point. There is no allocator, no filesystem, and nothing else
//! running on the machine.
//!
//! The library half is hardware-free above the [`block::BlockDevice`]
//! seam, so the whole load path runs against an in-memory disk under
//! `cargo test`. Only the freestanding binary touches real ports.

#![cfg_attr(not(test), no_std)]

pub mod block;
pub mod drivers;
pub mod handoff;
pub mod image;
pub mod loader;

pub use block::{BlockDevice, DiskError, RamDisk, SECTOR_SIZE};
pub use image::{ImageError, ImageHeader, Segment, SegmentFlags};
pub use loader::{BootLayout, LoadError, PhysRegion};
