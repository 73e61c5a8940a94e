//! @ai:module:intent Define the kata content schema
//! @ai:module:layer domain
//! @ai:module:public_api Kata, Module
//! @ai:module:depends_on blank
//! @ai:module:stateless true

use crate::blank::BlankMarker;
use serde::{Deserialize, Serialize};

/// @ai:intent One exercise: prose, a snippet with blanks, and the expected answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kata {
    pub preparagraph: String,
    pub code: String,
    /// Source-language literals, one per blank, in reading order.
    pub solutions: Vec<String>,
    pub postparagraph: String,
}

/// @ai:intent An ordered group of katas on one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub title: String,
    #[serde(rename = "modules")]
    pub katas: Vec<Kata>,
}

impl Kata {
    /// @ai:intent Count blanks in this kata's code
    /// @ai:effects pure
    pub fn blank_count(&self, marker: &BlankMarker) -> usize {
        marker.count(&self.code)
    }

    /// @ai:intent Check that solutions line up with blanks
    /// @ai:effects pure
    pub fn is_consistent(&self, marker: &BlankMarker) -> bool {
        self.blank_count(marker) == self.solutions.len()
    }

    /// @ai:intent Fill the blanks with this kata's own solutions
    /// @ai:pre self.is_consistent(marker)
    /// @ai:effects pure
    pub fn solved_code(&self, marker: &BlankMarker) -> crate::Result<String> {
        marker.fill(&self.code, &self.solutions)
    }
}

impl Module {
    pub fn new(title: impl Into<String>, katas: Vec<Kata>) -> Self {
        Self {
            title: title.into(),
            katas,
        }
    }

    pub fn len(&self) -> usize {
        self.katas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.katas.is_empty()
    }
}
