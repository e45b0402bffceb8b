// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! State snapshot model: one tracking update as a read-only indexed view.
//!
//! A [`State`] is handed to the session callback by reference and dropped
//! when the callback returns. Frames, images and results borrow from it.
//! Index accessors are bounds-checked against the native count and return
//! `Ok(None)` for out-of-range or null entries; resolution into typed
//! wrappers happens per call through [`crate::resolve`].

use std::fmt;
use vuforia_port::{FrameHandle, ImageHandle, StateHandle};

use crate::resolve::{resolve_trackable, resolve_trackable_result, ResolveError};
use crate::result::TrackableResult;
use crate::trackable::Trackable;

/// One tracking update.
pub struct State {
    handle: Box<dyn StateHandle>,
}

impl State {
    /// Wrap a native state handle.
    pub fn new(handle: Box<dyn StateHandle>) -> Self {
        Self { handle }
    }

    /// Camera frame for this update (possibly with zero images).
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            handle: self.handle.frame(),
        }
    }

    /// Number of known trackables.
    pub fn num_trackables(&self) -> usize {
        self.handle.num_trackables()
    }

    /// Trackable at `index`.
    pub fn trackable(&self, index: usize) -> Result<Option<Trackable>, ResolveError> {
        if index >= self.handle.num_trackables() {
            return Ok(None);
        }
        self.handle
            .trackable(index)
            .map(resolve_trackable)
            .transpose()
    }

    /// Number of current results.
    pub fn num_trackable_results(&self) -> usize {
        self.handle.num_trackable_results()
    }

    /// Result at `index`.
    pub fn trackable_result(
        &self,
        index: usize,
    ) -> Result<Option<TrackableResult<'_>>, ResolveError> {
        if index >= self.handle.num_trackable_results() {
            return Ok(None);
        }
        self.handle
            .trackable_result(index)
            .map(resolve_trackable_result)
            .transpose()
    }

    /// Every present trackable, skipping null entries.
    pub fn trackables(&self) -> impl Iterator<Item = Result<Trackable, ResolveError>> + '_ {
        (0..self.num_trackables()).filter_map(move |i| self.trackable(i).transpose())
    }

    /// Every present result, skipping null entries.
    pub fn trackable_results(
        &self,
    ) -> impl Iterator<Item = Result<TrackableResult<'_>, ResolveError>> + '_ {
        (0..self.num_trackable_results()).filter_map(move |i| self.trackable_result(i).transpose())
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("num_trackables", &self.num_trackables())
            .field("num_trackable_results", &self.num_trackable_results())
            .finish_non_exhaustive()
    }
}

/// Native pixel layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Format not known.
    Unknown,
    /// 16-bit RGB.
    Rgb565,
    /// 24-bit RGB.
    Rgb888,
    /// 8-bit luminance.
    Grayscale,
    /// YUV 4:2:0.
    Yuv,
    /// 32-bit RGBA.
    Rgba8888,
    /// 8-bit palette index.
    Index,
    /// Any other native code.
    Other(i32),
}

impl PixelFormat {
    /// Decode a native format code.
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Unknown,
            1 => Self::Rgb565,
            2 => Self::Rgb888,
            4 => Self::Grayscale,
            8 => Self::Yuv,
            16 => Self::Rgba8888,
            32 => Self::Index,
            other => Self::Other(other),
        }
    }
}

/// Camera frame of one update.
#[derive(Clone, Copy)]
pub struct Frame<'s> {
    handle: &'s dyn FrameHandle,
}

impl<'s> Frame<'s> {
    /// Frame index.
    pub fn index(&self) -> i32 {
        self.handle.index()
    }

    /// Capture timestamp in seconds.
    pub fn time_stamp(&self) -> f64 {
        self.handle.time_stamp()
    }

    /// Number of images.
    pub fn num_images(&self) -> usize {
        self.handle.num_images()
    }

    /// Image at `index`, `None` when out of range or null.
    pub fn image(&self, index: usize) -> Option<Image<'s>> {
        if index >= self.handle.num_images() {
            return None;
        }
        let frame: &'s dyn FrameHandle = self.handle;
        frame.image(index).map(|handle| Image { handle })
    }

    /// Every present image.
    pub fn images(&self) -> impl Iterator<Item = Image<'s>> + 's {
        let frame = *self;
        (0..frame.num_images()).filter_map(move |i| frame.image(i))
    }
}

impl fmt::Debug for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("index", &self.index())
            .field("num_images", &self.num_images())
            .finish_non_exhaustive()
    }
}

/// Camera image borrowed from its frame.
#[derive(Clone, Copy)]
pub struct Image<'s> {
    handle: &'s dyn ImageHandle,
}

impl<'s> Image<'s> {
    /// Width in pixels.
    pub fn width(&self) -> i32 {
        self.handle.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> i32 {
        self.handle.height()
    }

    /// Buffer width in pixels.
    pub fn buffer_width(&self) -> i32 {
        self.handle.buffer_width()
    }

    /// Buffer height in pixels.
    pub fn buffer_height(&self) -> i32 {
        self.handle.buffer_height()
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> i32 {
        self.handle.stride()
    }

    /// Pixel layout.
    pub fn format(&self) -> PixelFormat {
        PixelFormat::from_raw(self.handle.format())
    }

    /// Pixel bytes; valid only while the state is.
    pub fn pixels(&self) -> &'s [u8] {
        let image: &'s dyn ImageHandle = self.handle;
        image.pixels()
    }
}

impl fmt::Debug for Image<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("format", &self.format())
            .finish_non_exhaustive()
    }
}
