//! TOML settings for conversions
//!
//! ```toml
//! id_prefix = "doc-"
//! preserve_empty_paragraphs = false
//! toc_class = "toc"
//! include_default_style_map = true
//!
//! [[style_map.paragraph]]
//! style_name = "Title"
//! html = [{ tag = "h1", fresh = true, class = "title" }]
//!
//! [[style_map.paragraph]]
//! style_name_prefix = "Code"
//! html = [{ tag = "pre", separator = "\n" }]
//!
//! [[style_map.run]]
//! style_id = "Comment"
//! ignore = true
//!
//! [[style_map.break]]
//! break_type = "page"
//! html = [{ tag = "hr", fresh = true }]
//!
//! [style_map.underline]
//! html = [{ tag = "u" }]
//! ```
//!
//! Path elements are collapsible unless `fresh = true`; a `tag` of
//! `"ul|ol"` is written as `ul` but merges into either.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wordhtml_ast::{BreakType, NumberingLevel};

use crate::error::{ConversionError, Result};
use crate::html_path::{HtmlPath, HtmlPathElement};
use crate::options::{ConversionOptions, DEFAULT_TOC_CLASS};
use crate::style_map::{
    BreakMatcher, ParagraphMatcher, RunMatcher, StringMatcher, StyleMap, StyleMatcher,
    TableMatcher,
};

/// Conversion settings as read from a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub id_prefix: String,
    pub preserve_empty_paragraphs: bool,
    pub toc_class: String,
    pub include_default_style_map: bool,
    pub style_map: StyleMapSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id_prefix: String::new(),
            preserve_empty_paragraphs: false,
            toc_class: DEFAULT_TOC_CLASS.to_string(),
            include_default_style_map: true,
            style_map: StyleMapSettings::default(),
        }
    }
}

/// Style rules in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleMapSettings {
    pub paragraph: Vec<StyleRule>,
    pub run: Vec<StyleRule>,
    pub table: Vec<StyleRule>,
    #[serde(rename = "break")]
    pub breaks: Vec<BreakRule>,
    pub bold: Option<PathSettings>,
    pub italic: Option<PathSettings>,
    pub underline: Option<PathSettings>,
    pub strikethrough: Option<PathSettings>,
    pub small_caps: Option<PathSettings>,
    pub comment_reference: Option<PathSettings>,
}

/// A paragraph, run or table rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_name_prefix: Option<String>,
    /// Only meaningful for paragraph rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering: Option<NumberingSettings>,
    #[serde(flatten)]
    pub path: PathSettings,
}

/// List level of a paragraph rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberingSettings {
    /// 1-based list level
    pub level: u32,
    #[serde(default)]
    pub ordered: bool,
}

/// A break rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakRule {
    pub break_type: BreakType,
    #[serde(flatten)]
    pub path: PathSettings,
}

/// The output of a rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub html: Vec<ElementSettings>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignore: bool,
}

/// One element of an output path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSettings {
    pub tag: String,
    #[serde(default)]
    pub fresh: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

impl Settings {
    /// Parse settings from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Read settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Build conversion options, using the default image converter
    pub fn to_options(&self) -> Result<ConversionOptions> {
        let mut options = ConversionOptions::new()
            .id_prefix(self.id_prefix.clone())
            .preserve_empty_paragraphs(self.preserve_empty_paragraphs)
            .toc_class(self.toc_class.clone())
            .style_map(self.style_map.to_style_map()?);
        options.include_default_style_map = self.include_default_style_map;
        Ok(options)
    }
}

impl StyleMapSettings {
    pub fn to_style_map(&self) -> Result<StyleMap> {
        let mut style_map = StyleMap::new();
        for rule in &self.paragraph {
            style_map.map_paragraph(
                ParagraphMatcher {
                    style: rule.style_matcher()?,
                    numbering: rule.numbering.as_ref().map(NumberingSettings::to_level).transpose()?,
                },
                rule.path.to_html_path()?,
            );
        }
        for rule in &self.run {
            reject_numbering(rule, "run")?;
            style_map.map_run(
                RunMatcher {
                    style: rule.style_matcher()?,
                },
                rule.path.to_html_path()?,
            );
        }
        for rule in &self.table {
            reject_numbering(rule, "table")?;
            style_map.map_table(
                TableMatcher {
                    style: rule.style_matcher()?,
                },
                rule.path.to_html_path()?,
            );
        }
        for rule in &self.breaks {
            style_map.map_break(BreakMatcher::new(rule.break_type), rule.path.to_html_path()?);
        }

        let fixed = |path: &Option<PathSettings>| path.as_ref().map(PathSettings::to_html_path).transpose();
        style_map.bold = fixed(&self.bold)?;
        style_map.italic = fixed(&self.italic)?;
        style_map.underline = fixed(&self.underline)?;
        style_map.strikethrough = fixed(&self.strikethrough)?;
        style_map.small_caps = fixed(&self.small_caps)?;
        style_map.comment_reference = fixed(&self.comment_reference)?;
        Ok(style_map)
    }
}

fn reject_numbering(rule: &StyleRule, kind: &str) -> Result<()> {
    if rule.numbering.is_some() {
        return Err(ConversionError::StyleRule(format!(
            "numbering can only be matched by paragraph rules, not {} rules",
            kind
        )));
    }
    Ok(())
}

impl StyleRule {
    fn style_matcher(&self) -> Result<StyleMatcher> {
        let style_name = match (&self.style_name, &self.style_name_prefix) {
            (Some(_), Some(_)) => {
                return Err(ConversionError::StyleRule(
                    "style_name and style_name_prefix cannot both be set".to_string(),
                ))
            }
            (Some(name), None) => Some(StringMatcher::EqualTo(name.clone())),
            (None, Some(prefix)) => Some(StringMatcher::StartsWith(prefix.clone())),
            (None, None) => None,
        };
        Ok(StyleMatcher {
            style_id: self.style_id.clone(),
            style_name,
        })
    }
}

impl NumberingSettings {
    fn to_level(&self) -> Result<NumberingLevel> {
        if self.level == 0 {
            return Err(ConversionError::StyleRule(
                "list levels start at 1".to_string(),
            ));
        }
        Ok(NumberingLevel {
            level_index: (self.level - 1).to_string(),
            is_ordered: self.ordered,
        })
    }
}

impl PathSettings {
    pub fn to_html_path(&self) -> Result<HtmlPath> {
        if self.ignore {
            if !self.html.is_empty() {
                return Err(ConversionError::StyleRule(
                    "a rule cannot both ignore content and give html".to_string(),
                ));
            }
            return Ok(HtmlPath::Ignore);
        }
        self.html
            .iter()
            .map(ElementSettings::to_path_element)
            .collect::<Result<Vec<_>>>()
            .map(HtmlPath::elements)
    }
}

impl ElementSettings {
    fn to_path_element(&self) -> Result<HtmlPathElement> {
        let names: Vec<&str> = self.tag.split('|').map(str::trim).collect();
        if names.iter().any(|name| name.is_empty()) {
            return Err(ConversionError::StyleRule(format!(
                "invalid tag name: {:?}",
                self.tag
            )));
        }

        let mut element = HtmlPathElement::collapsible_any(&names);
        element.tag.collapsible = !self.fresh;
        if let Some(class) = &self.class {
            element = element.with_class(class);
        }
        if let Some(separator) = &self.separator {
            element = element.with_separator(separator);
        }
        Ok(element)
    }
}
