use crate::SyntaxKind;

const _: () = assert!((SyntaxKind::TOMBSTONE as u16) < u128::BITS as u16);

/// A set of kinds, one bit per kind, buildable in `const` context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SyntaxSet(u128);

impl SyntaxSet {
    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self(0);
        let mut i = 0;
        while i < N {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    pub const fn with(self, kind: SyntaxKind) -> Self {
        Self(self.0 | 1u128 << kind as u16)
    }

    pub const fn contains(self, kind: SyntaxKind) -> bool {
        self.0 & 1u128 << kind as u16 != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}
