//! Display surfaces that live streams are bound to.

use super::stream::MediaStream;

/// A named display surface (a video element in a capture view).
///
/// A surface owns at most one live stream. Dropping the surface stops
/// whatever stream is still bound to it.
#[derive(Debug)]
pub struct VideoSurface {
    name: String,
    stream: Option<Box<dyn MediaStream>>,
}

impl VideoSurface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stream: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a stream is currently bound.
    pub fn is_bound(&self) -> bool {
        self.stream.is_some()
    }

    /// The bound stream, if any.
    pub fn src_object(&self) -> Option<&dyn MediaStream> {
        self.stream.as_deref()
    }

    pub(crate) fn bind(&mut self, stream: Box<dyn MediaStream>) {
        debug_assert!(self.stream.is_none(), "surface already bound");
        self.stream = Some(stream);
    }

    pub(crate) fn unbind(&mut self) -> Option<Box<dyn MediaStream>> {
        self.stream.take()
    }
}

impl Drop for VideoSurface {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            log::debug!("Surface '{}' dropped with a bound stream, stopping it", self.name);
            stream.stop();
        }
    }
}
