//! Image resources and background loading.
//!
//! An [`ImageResource`] is a handle that may not be drawable yet. Loading runs
//! on a background thread and publishes its result into the handle; the draw
//! path polls [`ImageResource::is_ready`] each frame and skips the image until
//! the pixels arrive. A failed load stays failed until [`ImageLoader::reload`].

use layerkit_core::{thread_safe, Color, ResourceError, ThreadSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

/// Decoded RGBA8 pixels (straight alpha, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageData {
    /// Wraps raw RGBA8 pixels. Returns `None` if the buffer length does not
    /// match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image filled with one colour.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl From<image::RgbaImage> for ImageData {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }
}

/// Load state of an image resource
#[derive(Debug, Clone)]
pub enum ImageState {
    Pending,
    Ready(Arc<ImageData>),
    Failed(ResourceError),
}

/// Shared handle to an image that becomes ready asynchronously.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct ImageResource {
    source_id: String,
    state: ThreadSafe<ImageState>,
}

impl ImageResource {
    /// A handle whose pixels have not arrived yet.
    pub fn pending(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            state: thread_safe(ImageState::Pending),
        }
    }

    /// A handle that is ready immediately.
    pub fn ready(source_id: impl Into<String>, data: ImageData) -> Self {
        Self {
            source_id: source_id.into(),
            state: thread_safe(ImageState::Ready(Arc::new(data))),
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.lock(), ImageState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(*self.state.lock(), ImageState::Failed(_))
    }

    pub fn state(&self) -> ImageState {
        self.state.lock().clone()
    }

    /// The decoded pixels, if loading has finished successfully.
    pub fn data(&self) -> Result<Arc<ImageData>, ResourceError> {
        match &*self.state.lock() {
            ImageState::Ready(data) => Ok(Arc::clone(data)),
            ImageState::Pending => Err(ResourceError::Pending {
                source_id: self.source_id.clone(),
            }),
            ImageState::Failed(err) => Err(err.clone()),
        }
    }

    /// Publishes the outcome of a load.
    pub fn complete(&self, result: Result<ImageData, ResourceError>) {
        let next = match result {
            Ok(data) => ImageState::Ready(Arc::new(data)),
            Err(err) => {
                tracing::warn!("Image load failed: {}", err);
                ImageState::Failed(err)
            }
        };
        *self.state.lock() = next;
    }

    fn reset(&self) {
        *self.state.lock() = ImageState::Pending;
    }
}

/// Loads image files on background threads.
#[derive(Debug, Clone, Default)]
pub struct ImageLoader {
    base_dir: Option<PathBuf>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative sources against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub fn resolve(&self, source: &str) -> PathBuf {
        let path = Path::new(source);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Starts loading `source` and returns its handle immediately.
    pub fn load(&self, source: &str) -> ImageResource {
        let resource = ImageResource::pending(source);
        self.spawn(&resource);
        resource
    }

    /// Restarts loading for an existing handle, e.g. after a failure.
    pub fn reload(&self, resource: &ImageResource) {
        resource.reset();
        self.spawn(resource);
    }

    /// Loads and decodes on the calling thread.
    pub fn load_blocking(&self, source: &str) -> Result<ImageData, ResourceError> {
        decode_file(&self.resolve(source), source)
    }

    fn spawn(&self, resource: &ImageResource) {
        let path = self.resolve(resource.source_id());
        let handle = resource.clone();
        tracing::debug!("Loading image {}", path.display());

        let spawned = thread::Builder::new()
            .name("image-loader".to_string())
            .spawn(move || {
                let result = decode_file(&path, handle.source_id());
                handle.complete(result);
            });

        if let Err(e) = spawned {
            resource.complete(Err(ResourceError::Io {
                source_id: resource.source_id().to_string(),
                reason: format!("failed to spawn loader thread: {}", e),
            }));
        }
    }
}

fn decode_file(path: &Path, source_id: &str) -> Result<ImageData, ResourceError> {
    let img = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => ResourceError::Io {
            source_id: source_id.to_string(),
            reason: io.to_string(),
        },
        other => ResourceError::Decode {
            source_id: source_id.to_string(),
            reason: other.to_string(),
        },
    })?;
    Ok(img.to_rgba8().into())
}
