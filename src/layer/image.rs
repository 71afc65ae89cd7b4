//! Image layer state. Decoding happens in the host; layers only track
//! whether the source has arrived.

use crate::geometry::Size;

/// Load state of an image source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageState {
    /// Waiting on the host. Nothing is drawn.
    Pending,
    /// Decoded, with the image's natural size.
    Loaded { natural: Size },
    /// The load failed. Sticky until the source changes.
    Failed,
}

/// An image layer's source and load state.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    src: Option<String>,
    state: ImageState,
}

impl ImageSource {
    pub fn new(src: Option<String>) -> Self {
        Self { src, state: ImageState::Pending }
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn state(&self) -> ImageState {
        self.state
    }

    /// Point at a new source. Any previous load result is discarded.
    pub fn set_src(&mut self, src: String) -> bool {
        if self.src.as_deref() == Some(src.as_str()) {
            return false;
        }
        self.src = Some(src);
        self.state = ImageState::Pending;
        true
    }

    /// Record a successful load. Ignored once the load has failed.
    pub fn loaded(&mut self, natural: Size) -> bool {
        match self.state {
            ImageState::Failed => false,
            _ => {
                self.state = ImageState::Loaded { natural };
                true
            }
        }
    }

    /// Record a failed load. Returns whether the state changed.
    pub fn failed(&mut self) -> bool {
        if self.state == ImageState::Failed {
            return false;
        }
        self.state = ImageState::Failed;
        true
    }

    /// Height over width, once loaded.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match self.state {
            ImageState::Loaded { natural } if natural.width > 0.0 => Some(natural.height / natural.width),
            _ => None,
        }
    }

    pub fn natural_size(&self) -> Option<Size> {
        match self.state {
            ImageState::Loaded { natural } => Some(natural),
            _ => None,
        }
    }

    /// Whether the host still owes a load result.
    pub fn is_pending(&self) -> bool {
        self.src.is_some() && self.state == ImageState::Pending
    }
}
