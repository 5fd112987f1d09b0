//! Conversion options

use std::fmt;
use std::sync::Arc;

use crate::images::{DataUriImageConverter, ImageConverter};
use crate::style_map::StyleMap;

/// Default class of the element wrapping a table of contents
pub const DEFAULT_TOC_CLASS: &str = "toc";

/// Options for a conversion
#[derive(Clone)]
pub struct ConversionOptions {
    /// Prepended to every generated id (bookmarks, notes, comments)
    pub id_prefix: String,
    /// Write empty paragraphs instead of dropping them
    pub preserve_empty_paragraphs: bool,
    /// Class of the element wrapping a table of contents
    pub toc_class: String,
    /// Append the built-in rules after the rules of `style_map`
    pub include_default_style_map: bool,
    pub style_map: StyleMap,
    pub image_converter: Arc<dyn ImageConverter>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            id_prefix: String::new(),
            preserve_empty_paragraphs: false,
            toc_class: DEFAULT_TOC_CLASS.to_string(),
            include_default_style_map: true,
            style_map: StyleMap::new(),
            image_converter: Arc::new(DataUriImageConverter),
        }
    }
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn preserve_empty_paragraphs(mut self, preserve: bool) -> Self {
        self.preserve_empty_paragraphs = preserve;
        self
    }

    pub fn toc_class(mut self, class: impl Into<String>) -> Self {
        self.toc_class = class.into();
        self
    }

    pub fn style_map(mut self, style_map: StyleMap) -> Self {
        self.style_map = style_map;
        self
    }

    /// Use only the rules of the configured style map
    pub fn without_default_style_map(mut self) -> Self {
        self.include_default_style_map = false;
        self
    }

    pub fn image_converter(mut self, converter: impl ImageConverter + 'static) -> Self {
        self.image_converter = Arc::new(converter);
        self
    }

    /// The rules the converter consults
    pub fn effective_style_map(&self) -> StyleMap {
        if self.include_default_style_map {
            self.style_map.clone().with_defaults()
        } else {
            self.style_map.clone()
        }
    }
}

impl fmt::Debug for ConversionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionOptions")
            .field("id_prefix", &self.id_prefix)
            .field("preserve_empty_paragraphs", &self.preserve_empty_paragraphs)
            .field("toc_class", &self.toc_class)
            .field("include_default_style_map", &self.include_default_style_map)
            .field("style_map", &self.style_map)
            .finish_non_exhaustive()
    }
}
