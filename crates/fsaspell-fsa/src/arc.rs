// Arc records for zero-copy access to the arc table.

use bytemuck::{Pod, Zeroable};

/// Arc (12 bytes).
///
/// A state is stored implicitly as the run of consecutive arcs starting at
/// its first arc and ending at the arc carrying the `LAST` flag. Arcs of a
/// state are ordered by label.
///
/// - `label` (u32): Unicode scalar value consumed by the arc
/// - `target` (u32): index of the target state's first arc, or `NO_ARCS`
///   when the target state has no outgoing arcs
/// - `flags` (u32): `FINAL` and `LAST` bits
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Arc {
    pub label: u32,
    pub target: u32,
    pub flags: u32,
}

/// Sentinel target for states without outgoing arcs.
pub const NO_ARCS: u32 = u32::MAX;

/// The arc completes a word: the label sequence ending with this arc is
/// accepted.
pub const FLAG_FINAL: u32 = 0x1;

/// The arc is the last one of its state.
pub const FLAG_LAST: u32 = 0x2;

/// Size of one serialized arc.
pub const ARC_SIZE: usize = size_of::<Arc>();

impl Arc {
    pub fn new(label: char, target: u32, is_final: bool, is_last: bool) -> Self {
        let mut flags = 0;
        if is_final {
            flags |= FLAG_FINAL;
        }
        if is_last {
            flags |= FLAG_LAST;
        }
        Self {
            label: label as u32,
            target,
            flags,
        }
    }

    /// The label as a character. Labels are validated on load, so the
    /// replacement character only shows up for hand-crafted tables.
    #[inline]
    pub fn label_char(&self) -> char {
        char::from_u32(self.label).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.flags & FLAG_FINAL != 0
    }

    #[inline]
    pub fn is_last(&self) -> bool {
        self.flags & FLAG_LAST != 0
    }

    /// Whether following this arc leads to further arcs.
    #[inline]
    pub fn has_target(&self) -> bool {
        self.target != NO_ARCS
    }
}
