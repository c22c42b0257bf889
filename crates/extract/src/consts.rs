use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// The first table in the document holds the data.
selector!(TABLE_SELECTOR, "table");
selector!(LIST_ITEM_SELECTOR, "li");
selector!(NESTED_LIST_SELECTOR, "ul, ol");
selector!(IMAGE_SELECTOR, "img[src]");
regex!(LEVEL_HEADER_REGEX, r"(?i)^level ");
