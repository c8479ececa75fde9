//! Bounded index state machine shared by carousels and pagers.
//!
//! A [`Cursor`] is a position in `0..len` that only moves through its own
//! operations. What happens at either end is decided by its [`Boundary`]:
//!
//! ```text
//! Wrap:   ... → len-2 → len-1 → 0 → 1 → ...      (carousels)
//! Clamp:  0 ← 0 ← 1 ... len-2 → len-1 → len-1    (pagination)
//! ```
//!
//! An empty cursor (`len == 0`) accepts every operation as a no-op and
//! reports position 0. Out-of-range seeks are clamped to the last position
//! instead of rejected: every caller is UI code that only offers valid
//! targets, so a bad value is a programmer error that should still leave
//! the view showing something valid.

use serde::{Deserialize, Serialize};

/// Behavior when stepping past either end of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Step from the last position to the first and vice versa.
    #[default]
    Wrap,
    /// Stay on the first/last position.
    Clamp,
}

impl Boundary {
    pub fn as_str(self) -> &'static str {
        match self {
            Boundary::Wrap => "wrap",
            Boundary::Clamp => "clamp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
    len: usize,
    boundary: Boundary,
}

impl Cursor {
    pub fn new(len: usize, boundary: Boundary) -> Self {
        Self {
            position: 0,
            len,
            boundary,
        }
    }

    /// Start at `position` (clamped into range).
    pub fn starting_at(len: usize, boundary: Boundary, position: usize) -> Self {
        let mut cursor = Self::new(len, boundary);
        cursor.seek(position);
        cursor
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn last(&self) -> usize {
        self.len.saturating_sub(1)
    }

    /// Whether a forward step would move the cursor.
    pub fn can_advance(&self) -> bool {
        match self.boundary {
            Boundary::Wrap => self.len > 1,
            Boundary::Clamp => self.position < self.last(),
        }
    }

    /// Whether a backward step would move the cursor.
    pub fn can_retreat(&self) -> bool {
        match self.boundary {
            Boundary::Wrap => self.len > 1,
            Boundary::Clamp => self.position > 0,
        }
    }

    pub fn advance(&mut self) -> usize {
        if self.len == 0 {
            return self.position;
        }
        self.position = match self.boundary {
            Boundary::Wrap => (self.position + 1) % self.len,
            Boundary::Clamp => (self.position + 1).min(self.last()),
        };
        self.position
    }

    pub fn retreat(&mut self) -> usize {
        if self.len == 0 {
            return self.position;
        }
        self.position = match self.boundary {
            Boundary::Wrap => (self.position + self.len - 1) % self.len,
            Boundary::Clamp => self.position.saturating_sub(1),
        };
        self.position
    }

    /// Jump to `target`, clamped to the last position. Returns where the
    /// cursor ended up.
    pub fn seek(&mut self, target: usize) -> usize {
        if self.len == 0 {
            return self.position;
        }
        self.position = target.min(self.last());
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_advance_cycles_to_start() {
        let mut c = Cursor::new(3, Boundary::Wrap);
        assert_eq!(c.advance(), 1);
        assert_eq!(c.advance(), 2);
        assert_eq!(c.advance(), 0);
    }

    #[test]
    fn wrap_retreat_from_zero_goes_to_last() {
        let mut c = Cursor::new(4, Boundary::Wrap);
        assert_eq!(c.retreat(), 3);
    }

    #[test]
    fn clamp_stays_at_ends() {
        let mut c = Cursor::new(2, Boundary::Clamp);
        assert_eq!(c.retreat(), 0);
        assert_eq!(c.advance(), 1);
        assert_eq!(c.advance(), 1);
    }

    #[test]
    fn seek_past_end_clamps_to_last() {
        let mut c = Cursor::new(5, Boundary::Wrap);
        assert_eq!(c.seek(42), 4);
        assert_eq!(c.seek(2), 2);
    }

    #[test]
    fn empty_cursor_ignores_everything() {
        let mut c = Cursor::new(0, Boundary::Wrap);
        assert_eq!(c.advance(), 0);
        assert_eq!(c.retreat(), 0);
        assert_eq!(c.seek(7), 0);
        assert!(c.is_empty());
        assert!(!c.can_advance());
        assert!(!c.can_retreat());
    }

    #[test]
    fn single_item_wrap_cannot_move() {
        let mut c = Cursor::new(1, Boundary::Wrap);
        assert!(!c.can_advance());
        assert_eq!(c.advance(), 0);
        assert_eq!(c.retreat(), 0);
    }

    #[test]
    fn clamp_can_flags_follow_position() {
        let mut c = Cursor::new(3, Boundary::Clamp);
        assert!(!c.can_retreat());
        assert!(c.can_advance());
        c.seek(2);
        assert!(c.can_retreat());
        assert!(!c.can_advance());
    }

    #[test]
    fn starting_at_is_clamped() {
        let c = Cursor::starting_at(3, Boundary::Clamp, 10);
        assert_eq!(c.position(), 2);
    }

    #[test]
    fn boundary_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            boundary: Boundary,
        }
        let w: Wrapper = toml::from_str(r#"boundary = "clamp""#).unwrap();
        assert_eq!(w.boundary, Boundary::Clamp);
        assert_eq!(Boundary::Wrap.as_str(), "wrap");
    }
}
