//! Layer visibility bitset
//!
//! Hosts organize scene nodes into numbered visibility layers; the export
//! pipeline carries the membership bitset through to the document unchanged.

use bitflags::bitflags;

bitflags! {
    /// Visibility layer membership for a scene node
    ///
    /// Twenty layer slots, emitted as a whitespace-separated list of `0`/`1`
    /// tokens in slot order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LayerMask: u32 {
        /// First layer; the conventional default for new nodes
        const LAYER_0 = 1 << 0;
        /// Layer slot 1
        const LAYER_1 = 1 << 1;
        /// Layer slot 2
        const LAYER_2 = 1 << 2;
        /// Layer slot 3
        const LAYER_3 = 1 << 3;
        /// Layer slot 4
        const LAYER_4 = 1 << 4;
        /// Layer slot 5
        const LAYER_5 = 1 << 5;
        /// Layer slot 6
        const LAYER_6 = 1 << 6;
        /// Layer slot 7
        const LAYER_7 = 1 << 7;
        /// Layer slot 8
        const LAYER_8 = 1 << 8;
        /// Layer slot 9
        const LAYER_9 = 1 << 9;
        /// Layer slot 10
        const LAYER_10 = 1 << 10;
        /// Layer slot 11
        const LAYER_11 = 1 << 11;
        /// Layer slot 12
        const LAYER_12 = 1 << 12;
        /// Layer slot 13
        const LAYER_13 = 1 << 13;
        /// Layer slot 14
        const LAYER_14 = 1 << 14;
        /// Layer slot 15
        const LAYER_15 = 1 << 15;
        /// Layer slot 16
        const LAYER_16 = 1 << 16;
        /// Layer slot 17
        const LAYER_17 = 1 << 17;
        /// Layer slot 18
        const LAYER_18 = 1 << 18;
        /// Layer slot 19
        const LAYER_19 = 1 << 19;
    }
}

impl LayerMask {
    /// Number of layer slots carried by the format
    pub const SLOT_COUNT: usize = 20;

    /// Check whether a layer slot is set
    ///
    /// Slots at or beyond [`LayerMask::SLOT_COUNT`] are always clear.
    pub fn slot(self, index: usize) -> bool {
        index < Self::SLOT_COUNT && self.bits() & (1 << index) != 0
    }

    /// Iterate the slots in emission order as booleans
    pub fn slots(self) -> impl Iterator<Item = bool> {
        (0..Self::SLOT_COUNT).map(move |index| self.slot(index))
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::LAYER_0
    }
}
