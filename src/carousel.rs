//! Carousel controller: one active slide out of a fixed collection.
//!
//! The carousel owns its slides and a wrapping [`Cursor`]. Renderers read
//! [`Carousel::current_index`] and either translate a strip of slides by
//! [`Carousel::translate_percent`] or show only the slide for which
//! [`Carousel::is_active`] holds.
//!
//! ```
//! use diecast_site::carousel::Carousel;
//!
//! let mut c = Carousel::new(vec!["hpdc", "gravity", "machining"]);
//! c.previous();
//! assert_eq!(c.current(), Some(&"machining"));
//! assert_eq!(c.translate_percent(), -200);
//! ```

use crate::cursor::{Boundary, Cursor};

#[derive(Debug, Clone)]
pub struct Carousel<T> {
    slides: Vec<T>,
    cursor: Cursor,
}

impl<T> Carousel<T> {
    /// Cyclic carousel starting at the first slide.
    pub fn new(slides: Vec<T>) -> Self {
        Self::with_boundary(slides, Boundary::Wrap)
    }

    pub fn with_boundary(slides: Vec<T>, boundary: Boundary) -> Self {
        let cursor = Cursor::new(slides.len(), boundary);
        Self { slides, cursor }
    }

    /// Start on `index` instead of the first slide. Clamped into range.
    pub fn starting_at(mut self, index: usize) -> Self {
        self.cursor.seek(index);
        self
    }

    pub fn next(&mut self) -> usize {
        self.cursor.advance()
    }

    pub fn previous(&mut self) -> usize {
        self.cursor.retreat()
    }

    /// Jump to `index`. Values past the end land on the last slide; the
    /// returned index is the one actually applied.
    pub fn go_to(&mut self, index: usize) -> usize {
        self.cursor.seek(index)
    }

    pub fn current_index(&self) -> usize {
        self.cursor.position()
    }

    pub fn current(&self) -> Option<&T> {
        self.slides.get(self.cursor.position())
    }

    pub fn is_active(&self, index: usize) -> bool {
        !self.slides.is_empty() && index == self.cursor.position()
    }

    /// Horizontal offset of the slide strip, in percent of one slide.
    pub fn translate_percent(&self) -> i64 {
        -(self.cursor.position() as i64) * 100
    }

    pub fn can_go_next(&self) -> bool {
        self.cursor.can_advance()
    }

    pub fn can_go_previous(&self) -> bool {
        self.cursor.can_retreat()
    }

    pub fn boundary(&self) -> Boundary {
        self.cursor.boundary()
    }

    pub fn items(&self) -> &[T] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slides paired with whether each is the active one.
    pub fn iter_with_state(&self) -> impl Iterator<Item = (usize, &T, bool)> {
        let active = self.cursor.position();
        self.slides
            .iter()
            .enumerate()
            .map(move |(i, slide)| (i, slide, i == active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five() -> Carousel<u32> {
        Carousel::new(vec![10, 20, 30, 40, 50])
    }

    #[test]
    fn next_five_times_returns_to_start() {
        let mut c = five();
        for _ in 0..5 {
            c.next();
        }
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn previous_from_start_goes_to_last() {
        let mut c = five();
        assert_eq!(c.previous(), 4);
        assert_eq!(c.current(), Some(&50));
    }

    #[test]
    fn previous_undoes_next_from_every_index() {
        for start in 0..5 {
            let mut c = five().starting_at(start);
            c.next();
            c.previous();
            assert_eq!(c.current_index(), start);
        }
    }

    #[test]
    fn index_stays_in_range_for_mixed_walks() {
        for n in 1..=7usize {
            let mut c = Carousel::new((0..n).collect::<Vec<_>>());
            // Deterministic pseudo-random walk
            let mut state = 0x2545_f491u32;
            for _ in 0..200 {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                if state % 2 == 0 {
                    c.next();
                } else {
                    c.previous();
                }
                assert!(c.current_index() < n);
            }
        }
    }

    #[test]
    fn go_to_out_of_range_lands_on_last() {
        let mut c = five();
        assert_eq!(c.go_to(3), 3);
        assert_eq!(c.go_to(99), 4);
    }

    #[test]
    fn translate_follows_index() {
        let mut c = five();
        assert_eq!(c.translate_percent(), 0);
        c.go_to(2);
        assert_eq!(c.translate_percent(), -200);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut c: Carousel<u32> = Carousel::new(vec![]);
        c.next();
        c.previous();
        c.go_to(3);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.current(), None);
        assert!(!c.is_active(0));
    }

    #[test]
    fn clamped_carousel_stops_at_last() {
        let mut c = Carousel::with_boundary(vec!['a', 'b'], Boundary::Clamp);
        c.next();
        c.next();
        assert_eq!(c.current(), Some(&'b'));
        assert!(!c.can_go_next());
    }

    #[test]
    fn exactly_one_slide_is_active() {
        let c = five().starting_at(3);
        let active: Vec<usize> = c
            .iter_with_state()
            .filter(|(_, _, on)| *on)
            .map(|(i, _, _)| i)
            .collect();
        assert_eq!(active, vec![3]);
    }
}
