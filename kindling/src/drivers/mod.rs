//! Hardware device drivers

pub mod ata;
pub mod serial;
