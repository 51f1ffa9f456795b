//! pages::carousel
//!
//! Slide carousel state used by the testimonial strip and the project image
//! gallery.

use crate::render::{Element, RenderNode};

/// Which slide is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    active: usize,
    looping: bool,
}

impl Carousel {
    /// A carousel over `len` slides starting at the first.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            active: 0,
            looping: false,
        }
    }

    /// Wrap around at either end.
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Start at `index` (clamped to the last slide).
    pub fn starting_at(mut self, index: usize) -> Self {
        self.active = index.min(self.len.saturating_sub(1));
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        if self.active + 1 < self.len {
            self.active += 1;
        } else if self.looping {
            self.active = 0;
        }
    }

    pub fn prev(&mut self) {
        if self.len == 0 {
            return;
        }
        if self.active > 0 {
            self.active -= 1;
        } else if self.looping {
            self.active = self.len - 1;
        }
    }

    /// Jump to a slide; out-of-range indexes are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.len {
            self.active = index;
        }
    }

    /// Wrap rendered slides, marking the active one.
    pub fn render(&self, class: &str, slides: Vec<RenderNode>) -> RenderNode {
        let slides = slides.into_iter().enumerate().map(|(i, slide)| {
            let class = if i == self.active {
                "carousel-slide active"
            } else {
                "carousel-slide"
            };
            Element::new("div").class(class).child(slide)
        });
        Element::new("div")
            .class(format!("carousel {class}"))
            .children(slides)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_ends_without_looping() {
        let mut c = Carousel::new(2);
        c.prev();
        assert_eq!(c.active(), 0);
        c.next();
        c.next();
        assert_eq!(c.active(), 1);
    }

    #[test]
    fn loops_both_ways() {
        let mut c = Carousel::new(3).looping();
        c.prev();
        assert_eq!(c.active(), 2);
        c.next();
        assert_eq!(c.active(), 0);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut c = Carousel::new(0).looping().starting_at(4);
        c.next();
        c.prev();
        c.go_to(0);
        assert_eq!(c.active(), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn start_is_clamped() {
        assert_eq!(Carousel::new(3).starting_at(9).active(), 2);
    }

    #[test]
    fn active_slide_is_marked() {
        let c = Carousel::new(2).starting_at(1);
        let node = c.render("modal-swiper", vec!["a".into(), "b".into()]);
        let active = node.select("div.active");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].child_nodes()[0], RenderNode::text("b"));
    }
}
