//! Loading indicator.

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// A visibility toggle with an animation frame.
///
/// The frame only advances while visible, driven by the host timer tick.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    visible: bool,
    frame: usize,
}

impl LoadingIndicator {
    pub fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.frame = 0;
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.show();
        } else {
            self.hide();
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Advances the animation. Returns `true` if a redraw is needed.
    pub fn tick(&mut self) -> bool {
        if self.visible {
            self.frame = (self.frame + 1) % FRAMES.len();
        }
        self.visible
    }

    /// Current glyph, `None` while hidden.
    #[must_use]
    pub fn glyph(&self) -> Option<char> {
        self.visible.then(|| FRAMES[self.frame])
    }
}
