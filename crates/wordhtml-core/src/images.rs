//! Turning document images into `img` attributes

use std::io::{self, Read};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use wordhtml_ast::Image;

use crate::html::Attributes;

/// An image about to be written, with its resolved content type
pub struct ImageSource<'a> {
    image: &'a Image,
    content_type: &'a str,
}

impl<'a> ImageSource<'a> {
    pub fn new(image: &'a Image, content_type: &'a str) -> Self {
        Self {
            image,
            content_type,
        }
    }

    pub fn alt_text(&self) -> Option<&str> {
        self.image.alt_text.as_deref()
    }

    pub fn content_type(&self) -> &str {
        self.content_type
    }

    /// Open the image bytes; the stream is released when dropped
    pub fn open(&self) -> io::Result<Box<dyn Read>> {
        self.image.open()
    }

    /// Read the whole image
    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.open()?.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// Produces the attributes of an `img` element
///
/// `alt` is added by the converter from the image's alt text.
pub trait ImageConverter: Send + Sync {
    fn convert(&self, image: &ImageSource<'_>) -> io::Result<Attributes>;
}

impl<F> ImageConverter for F
where
    F: Fn(&ImageSource<'_>) -> io::Result<Attributes> + Send + Sync,
{
    fn convert(&self, image: &ImageSource<'_>) -> io::Result<Attributes> {
        self(image)
    }
}

/// Embeds images inline as base64 `data:` URIs
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriImageConverter;

impl ImageConverter for DataUriImageConverter {
    fn convert(&self, image: &ImageSource<'_>) -> io::Result<Attributes> {
        let bytes = image.read_bytes()?;
        let src = format!(
            "data:{};base64,{}",
            image.content_type(),
            STANDARD.encode(bytes)
        );
        let mut attributes = Attributes::new();
        attributes.insert("src".to_string(), src);
        Ok(attributes)
    }
}
