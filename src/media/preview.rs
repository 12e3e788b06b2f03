// SPDX-License-Identifier: MPL-2.0
//! Preview generation for photo listings.
//!
//! A preview is a small fixed-size RGBA image, cropped to fill its box.
//! [`PreviewLoader`] produces previews for a list of files on one background
//! thread and reports each one over a channel, in list order.

use crate::error::{Error, Result};
use image_rs::imageops::FilterType;
use image_rs::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Width and height of a preview, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSize {
    pub width: u32,
    pub height: u32,
}

impl PreviewSize {
    /// Creates a preview size; zero dimensions are raised to one.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

/// Decodes `path` and scales it to fill `size`, cropping the overflow.
pub fn generate_preview(path: &Path, size: PreviewSize) -> Result<RgbaImage> {
    let image = image_rs::open(path)?;
    let preview = image.resize_to_fill(size.width, size.height, FilterType::Triangle);
    Ok(preview.to_rgba8())
}

/// Message sent by a [`PreviewLoader`].
#[derive(Debug)]
pub enum PreviewEvent {
    /// A preview is ready. `index` is the file's position in the loaded list.
    Loaded {
        index: usize,
        path: PathBuf,
        image: RgbaImage,
    },
    /// The file could not be decoded.
    Failed {
        index: usize,
        path: PathBuf,
        error: Error,
    },
    /// Every file has been processed.
    Finished,
}

/// Background preview producer.
///
/// Dropping the receiver returned by [`PreviewLoader::events`] stops the
/// thread before the next file.
pub struct PreviewLoader {
    events: Receiver<PreviewEvent>,
    handle: Option<JoinHandle<()>>,
}

impl PreviewLoader {
    /// Starts loading previews for `paths` on a new thread.
    #[must_use]
    pub fn spawn(paths: Vec<PathBuf>, size: PreviewSize) -> Self {
        let (sender, events) = mpsc::channel();
        let handle = thread::spawn(move || load_all(&paths, size, &sender));
        Self {
            events,
            handle: Some(handle),
        }
    }

    /// Returns the event receiver.
    #[must_use]
    pub fn events(&self) -> &Receiver<PreviewEvent> {
        &self.events
    }

    /// Collects every remaining event until [`PreviewEvent::Finished`], then
    /// waits for the thread.
    pub fn join(mut self) -> Vec<PreviewEvent> {
        let mut collected = Vec::new();
        for event in self.events.iter() {
            let finished = matches!(event, PreviewEvent::Finished);
            collected.push(event);
            if finished {
                break;
            }
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Preview loader thread panicked");
            }
        }
        collected
    }
}

impl std::fmt::Debug for PreviewLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewLoader")
            .field("running", &self.handle.as_ref().is_some_and(|h| !h.is_finished()))
            .finish()
    }
}

fn load_all(paths: &[PathBuf], size: PreviewSize, sender: &Sender<PreviewEvent>) {
    for (index, path) in paths.iter().enumerate() {
        let event = match generate_preview(path, size) {
            Ok(image) => PreviewEvent::Loaded {
                index,
                path: path.clone(),
                image,
            },
            Err(error) => {
                tracing::warn!("Can't load preview for {}: {error}", path.display());
                PreviewEvent::Failed {
                    index,
                    path: path.clone(),
                    error,
                }
            }
        };
        if sender.send(event).is_err() {
            tracing::debug!("Preview receiver dropped, stopping after {index} files");
            return;
        }
    }
    let _ = sender.send(PreviewEvent::Finished);
}
