use std::fmt;

use serde::{Deserialize, Serialize};

/// Category label.
///
/// Opaque: compared by string equality only and never parsed while
/// classifying. The reference tweet data uses `"0"` (negative) and `"1"`
/// (positive); `Sentiment` gives a typed view of those two.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(Box<str>);

impl Category {
    pub fn new<S: AsRef<str>>(label: S) -> Self {
        Category(Box::from(label.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::new(label)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category(label.into_boxed_str())
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Binary tweet sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    /// Label used by the tweet corpus
    pub const fn label(self) -> &'static str {
        match self {
            Sentiment::Negative => "0",
            Sentiment::Positive => "1",
        }
    }

    pub fn category(self) -> Category {
        Category::new(self.label())
    }

    /// Typed view of a category, `None` for labels outside the tweet scheme
    pub fn from_category(category: &Category) -> Option<Self> {
        match category.as_str() {
            "0" => Some(Sentiment::Negative),
            "1" => Some(Sentiment::Positive),
            _ => None,
        }
    }
}

impl From<Sentiment> for Category {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.category()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Negative => f.write_str("-ve"),
            Sentiment::Positive => f.write_str("+ve"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_maps_to_reference_labels() {
        assert_eq!(Sentiment::Positive.category(), Category::from("1"));
        assert_eq!(Category::from(Sentiment::Negative).as_str(), "0");
        assert_eq!(Sentiment::from_category(&Category::from("1")), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_category(&Category::from("0")), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_category(&Category::from("neutral")), None);
    }

    #[test]
    fn category_display_is_the_label() {
        assert_eq!(Category::from("pos".to_string()).to_string(), "pos");
        assert_eq!(Sentiment::Positive.to_string(), "+ve");
    }
}
