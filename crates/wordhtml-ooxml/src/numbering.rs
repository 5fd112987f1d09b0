//! Numbering definitions (word/numbering.xml)
//!
//! A paragraph refers to a `w:num` by ID; the num points at an
//! `w:abstractNum` whose `w:lvl` entries say whether each level is
//! bulleted or numbered.

use std::collections::HashMap;

use wordhtml_ast::NumberingLevel;

use crate::error::Result;
use crate::xml::{parse_xml, XmlElement};

/// Resolved numbering definitions
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    /// `w:num/@w:numId` → `w:abstractNumId/@w:val`
    nums: HashMap<String, String>,
    /// abstract num ID → level index → level
    abstract_nums: HashMap<String, HashMap<String, NumberingLevel>>,
}

impl Numbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse numbering.xml bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Ok(Self::from_element(&parse_xml(xml)?))
    }

    /// Build from a parsed `w:numbering` element
    pub fn from_element(root: &XmlElement) -> Self {
        let mut numbering = Numbering::new();

        for abstract_num in root.find_children("w:abstractNum") {
            let Some(id) = abstract_num.attribute("w:abstractNumId") else {
                continue;
            };
            let levels = abstract_num
                .find_children("w:lvl")
                .filter_map(|level| {
                    let index = level.attribute("w:ilvl")?;
                    let format = level
                        .find_child_or_empty("w:numFmt")
                        .attribute("w:val")
                        .unwrap_or_default();
                    Some((
                        index.to_string(),
                        NumberingLevel {
                            level_index: index.to_string(),
                            is_ordered: format != "bullet",
                        },
                    ))
                })
                .collect();
            numbering.abstract_nums.insert(id.to_string(), levels);
        }

        for num in root.find_children("w:num") {
            let abstract_num_id = num.find_child_or_empty("w:abstractNumId").attribute("w:val");
            if let (Some(num_id), Some(abstract_num_id)) = (num.attribute("w:numId"), abstract_num_id) {
                numbering
                    .nums
                    .insert(num_id.to_string(), abstract_num_id.to_string());
            }
        }

        numbering
    }

    /// Look up a list level; absent definitions are not an error
    pub fn find_level(&self, num_id: &str, level: &str) -> Option<NumberingLevel> {
        let abstract_num_id = self.nums.get(num_id)?;
        self.abstract_nums.get(abstract_num_id)?.get(level).cloned()
    }
}
