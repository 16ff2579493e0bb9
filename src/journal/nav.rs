/// Gestures that turn journal pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavInput {
    PrevKey,
    NextKey,
    FirstKey,
    LastKey,
    /// Horizontal travel of a touch swipe in pixels; negative is leftwards.
    Swipe { delta_x: f32 },
    /// Click on a page dot.
    Dot(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavTarget {
    Prev,
    Next,
    Page(usize),
    Last,
    Ignore,
}

impl NavInput {
    pub(crate) fn target(self, swipe_threshold_px: f32) -> NavTarget {
        match self {
            NavInput::PrevKey => NavTarget::Prev,
            NavInput::NextKey => NavTarget::Next,
            NavInput::FirstKey => NavTarget::Page(0),
            NavInput::LastKey => NavTarget::Last,
            NavInput::Dot(i) => NavTarget::Page(i),
            NavInput::Swipe { delta_x } if !delta_x.is_finite() => NavTarget::Ignore,
            NavInput::Swipe { delta_x } if delta_x.abs() < swipe_threshold_px => NavTarget::Ignore,
            // Finger moving left drags the next page in.
            NavInput::Swipe { delta_x } if delta_x < 0.0 => NavTarget::Next,
            NavInput::Swipe { .. } => NavTarget::Prev,
        }
    }
}
