use core::fmt;
use core::marker::PhantomData;
use core::num::NonZeroU32;
use core::str::FromStr;

use crate::error::{ValueError, ValueResult};

/// Compact, stable identifier shared by the graph handles.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
pub trait CompactId: Copy + Ord {
    /// Human name used in error messages.
    const WHAT: &'static str;
    /// GraphML id prefix (`n` or `e`).
    const PREFIX: char;

    fn from_index(index: u32) -> Self;
    fn index(self) -> u32;
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $what:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create an id from a 0-based index by storing index+1.
            ///
            /// `u32::MAX` saturates; the allocator never hands it out.
            pub fn from_index(index: u32) -> Self {
                Self(NonZeroU32::MIN.saturating_add(index))
            }

            /// Recover the 0-based index.
            pub fn index(self) -> u32 {
                self.0.get() - 1
            }
        }

        impl CompactId for $name {
            const WHAT: &'static str = $what;
            const PREFIX: char = $prefix;

            fn from_index(index: u32) -> Self {
                $name::from_index(index)
            }

            fn index(self) -> u32 {
                $name::index(self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.index())
            }
        }

        impl FromStr for $name {
            type Err = ValueError;

            /// Parse the canonical GraphML form (`n7`, never `n07`).
            fn from_str(s: &str) -> ValueResult<Self> {
                parse_canonical(s, $prefix)
                    .map($name::from_index)
                    .ok_or_else(|| ValueError::UnsupportedValue {
                        option: $what,
                        value: s.to_string(),
                        allowed: format!("{}<index>", $prefix),
                    })
            }
        }
    };
}

define_id!(
    /// Handle of a node or group inside a `Graph`. Displays as `n<k>`.
    NodeId,
    'n',
    "node id"
);

define_id!(
    /// Handle of an edge inside a `Graph`. Displays as `e<k>`.
    EdgeId,
    'e',
    "edge id"
);

fn parse_canonical(s: &str, prefix: char) -> Option<u32> {
    let digits = s.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    let index: u32 = digits.parse().ok()?;
    (index < u32::MAX).then_some(index)
}

/// Monotonic allocator for one id space.
///
/// Ids are never reused: removal does not give an index back, and
/// `reserve` only ever moves the counter forward.
#[derive(Debug, Clone)]
pub struct IdCounter<T> {
    next: u32,
    _marker: PhantomData<T>,
}

impl<T> Default for IdCounter<T> {
    fn default() -> Self {
        Self {
            next: 0,
            _marker: PhantomData,
        }
    }
}

impl<T: CompactId> IdCounter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next id.
    pub fn allocate(&mut self) -> ValueResult<T> {
        if self.next == u32::MAX {
            return Err(ValueError::IdExhausted { what: T::WHAT });
        }
        let id = T::from_index(self.next);
        self.next += 1;
        Ok(id)
    }

    /// Make sure `id` will never be handed out later.
    pub fn reserve(&mut self, id: T) {
        self.next = self.next.max(id.index().saturating_add(1));
    }

    /// Index the next allocation will use.
    pub fn peek(&self) -> u32 {
        self.next
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn display_parses_back(index in 0_u32..u32::MAX) {
            let id = NodeId::from_index(index);
            prop_assert_eq!(id.to_string().parse::<NodeId>().unwrap(), id);
        }
    }
}
