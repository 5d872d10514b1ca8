/// Physical geometry and per-format sector permutation tables

use crate::format::ImageFormat;

/// Sectors per track on a 16-sector disk
pub const SECTORS_PER_TRACK: usize = 16;

/// A per-track permutation of sector indices
pub type SectorMap = [u8; SECTORS_PER_TRACK];

/// Physical geometry of a disk image format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    /// Bytes per sector
    pub bytes_per_sector: u16,
    /// Sectors per track
    pub sectors: u8,
    /// Number of heads
    pub heads: u8,
    /// Number of cylinders (tracks per head)
    pub cylinders: u8,
    /// Physical to logical sector mapping, if this format is interleaved
    pub deinterleave: Option<&'static SectorMap>,
    /// Logical to physical sector mapping, inverse of `deinterleave`
    pub interleave: Option<&'static SectorMap>,
}

impl Geometry {
    /// Total image size in bytes
    pub fn bytes_per_disk(&self) -> usize {
        self.bytes_per_sector as usize
            * self.sectors as usize
            * self.heads as usize
            * self.cylinders as usize
    }

    /// Map a logical sector index to its physical position within a track
    pub fn logical_to_physical(&self, sector: u8) -> u8 {
        match self.interleave {
            Some(map) => map[sector as usize],
            None => sector,
        }
    }

    /// Map a physical sector position to its logical index within a track
    pub fn physical_to_logical(&self, sector: u8) -> u8 {
        match self.deinterleave {
            Some(map) => map[sector as usize],
            None => sector,
        }
    }
}

static DOS_ORDER_PHYS_TO_LOG: SectorMap = [
    0x0, 0x7, 0xe, 0x6, 0xd, 0x5, 0xc, 0x4, 0xb, 0x3, 0xa, 0x2, 0x9, 0x1, 0x8, 0xf,
];

static DOS_ORDER_LOG_TO_PHYS: SectorMap = [
    0x0, 0xd, 0xb, 0x9, 0x7, 0x5, 0x3, 0x1, 0xe, 0xc, 0xa, 0x8, 0x6, 0x4, 0x2, 0xf,
];

static PRODOS_ORDER_PHYS_TO_LOG: SectorMap = [
    0x0, 0x8, 0x1, 0x9, 0x2, 0xa, 0x3, 0xb, 0x4, 0xc, 0x5, 0xd, 0x6, 0xe, 0x7, 0xf,
];

static PRODOS_ORDER_LOG_TO_PHYS: SectorMap = [
    0x0, 0x2, 0x4, 0x6, 0x8, 0xa, 0xc, 0xe, 0x1, 0x3, 0x5, 0x7, 0x9, 0xb, 0xd, 0xf,
];

static CPM_ORDER_PHYS_TO_LOG: SectorMap = [
    0x0, 0xb, 0x6, 0x1, 0xc, 0x7, 0x2, 0xd, 0x8, 0x3, 0xe, 0x9, 0x4, 0xf, 0xa, 0x5,
];

static CPM_ORDER_LOG_TO_PHYS: SectorMap = [
    0x0, 0x3, 0x6, 0x9, 0xc, 0xf, 0x2, 0x5, 0x8, 0xb, 0xe, 0x1, 0x4, 0x7, 0xa, 0xd,
];

// The Apex descending table is its own inverse.
static APEX_ORDER_PHYS_TO_LOG: SectorMap = [
    0x0, 0xe, 0xd, 0xc, 0xb, 0xa, 0x9, 0x8, 0x7, 0x6, 0x5, 0x4, 0x3, 0x2, 0x1, 0xf,
];

static RAW: Geometry = Geometry {
    bytes_per_sector: 256,
    sectors: 16,
    heads: 1,
    cylinders: 35,
    deinterleave: None,
    interleave: None,
};

static DOS_ORDER: Geometry = Geometry {
    bytes_per_sector: 256,
    sectors: 16,
    heads: 1,
    cylinders: 35,
    deinterleave: Some(&DOS_ORDER_PHYS_TO_LOG),
    interleave: Some(&DOS_ORDER_LOG_TO_PHYS),
};

static PRODOS_ORDER: Geometry = Geometry {
    bytes_per_sector: 256,
    sectors: 16,
    heads: 1,
    cylinders: 35,
    deinterleave: Some(&PRODOS_ORDER_PHYS_TO_LOG),
    interleave: Some(&PRODOS_ORDER_LOG_TO_PHYS),
};

static CPM_ORDER: Geometry = Geometry {
    bytes_per_sector: 256,
    sectors: 16,
    heads: 1,
    cylinders: 35,
    deinterleave: Some(&CPM_ORDER_PHYS_TO_LOG),
    interleave: Some(&CPM_ORDER_LOG_TO_PHYS),
};

static APEX_ORDER: Geometry = Geometry {
    bytes_per_sector: 256,
    sectors: 16,
    heads: 1,
    cylinders: 35,
    deinterleave: Some(&APEX_ORDER_PHYS_TO_LOG),
    interleave: Some(&APEX_ORDER_PHYS_TO_LOG),
};

/// Get the geometry for a format
pub fn get(format: ImageFormat) -> &'static Geometry {
    match format {
        ImageFormat::Raw => &RAW,
        ImageFormat::DosOrder => &DOS_ORDER,
        ImageFormat::ProdosOrder => &PRODOS_ORDER,
        ImageFormat::CpmOrder => &CPM_ORDER,
        ImageFormat::ApexOrder => &APEX_ORDER,
    }
}
