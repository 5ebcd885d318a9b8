use std::ops::{BitOr, BitOrAssign};

/// Per-request options passed to `PositionResolver::resolve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RequestFlags(u32);

impl RequestFlags {
    /// Never ask the geolocation server; only a fresh GPS fix can answer.
    pub const NO_NET_ACCESS: RequestFlags = RequestFlags(0x0001);
    /// Ignore GPS for this request even if the resolver tracks it.
    pub const NO_GPS_ACCESS: RequestFlags = RequestFlags(0x0002);
    /// Don't fall back to IP-based location when no WLANs are visible.
    /// The resolver never performs IP-only lookups, so this always holds.
    pub const NO_IP_LOCATION: RequestFlags = RequestFlags(0x0004);
    /// Refresh AGPS assistance data once per session. No effect without GPS.
    pub const UPDATE_AGPS: RequestFlags = RequestFlags(0x0008);

    const ALL: u32 = 0x000F;

    pub const fn empty() -> Self {
        RequestFlags(0)
    }

    /// Build from a raw bitmask, dropping unknown bits.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        RequestFlags(bits & Self::ALL)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: RequestFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for RequestFlags {
    type Output = RequestFlags;

    fn bitor(self, rhs: RequestFlags) -> RequestFlags {
        RequestFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for RequestFlags {
    fn bitor_assign(&mut self, rhs: RequestFlags) {
        self.0 |= rhs.0;
    }
}
