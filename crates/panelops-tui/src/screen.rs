//! Screen identifier enum.

use std::fmt;

/// One top-level screen, addressable from the tab bar's number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard,
    Queue,
}

impl ScreenId {
    /// Tab-bar order.
    pub const ALL: [ScreenId; 2] = [Self::Dashboard, Self::Queue];

    /// Number key bound to this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Queue => 2,
        }
    }

    /// Screen bound to a number key, if any.
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(Self::Dashboard),
            2 => Some(Self::Queue),
            _ => None,
        }
    }

    /// Following screen, wrapping at the end.
    pub fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Queue,
            Self::Queue => Self::Dashboard,
        }
    }

    /// Preceding screen. With two screens this coincides with `next`,
    /// but BackTab still reads correctly at call sites.
    pub fn prev(self) -> Self {
        self.next()
    }

    /// Label shown in the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Queue => "Queue",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn number_keys_round_trip() {
        for screen in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(u32::from(screen.number())), Some(screen));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(3), None);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ScreenId::Dashboard.next(), ScreenId::Queue);
        assert_eq!(ScreenId::Queue.next(), ScreenId::Dashboard);
        assert_eq!(ScreenId::Dashboard.prev(), ScreenId::Queue);
    }
}
