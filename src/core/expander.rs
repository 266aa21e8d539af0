use std::collections::BTreeSet;
use std::fmt;

pub const MULTI_VALUE_DELIMITER: &str = ", ";

/// 把 "A, B, C" 拆成 ["A", "B", "C"]，去除空白與空片段
pub fn split_multi(value: &str) -> Vec<String> {
    value
        .split(MULTI_VALUE_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drops missing cells and splits the rest. Output order follows input order.
pub fn expand<'a, I>(values: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values.into_iter().flatten().map(split_multi).collect()
}

/// Like [`expand`] but keeps row positions, so two fields can be joined by index.
pub fn expand_aligned<'a, I>(values: I) -> Vec<Option<Vec<String>>>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values.into_iter().map(|v| v.map(split_multi)).collect()
}

/// Order-sensitive combination: ("USA", "UK") != ("UK", "USA").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderedGroup(pub Vec<String>);

/// Order-insensitive combination: {"USA", "UK"} == {"UK", "USA"}.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnorderedGroup(pub BTreeSet<String>);

impl From<Vec<String>> for OrderedGroup {
    fn from(values: Vec<String>) -> Self {
        OrderedGroup(values)
    }
}

impl From<Vec<String>> for UnorderedGroup {
    fn from(values: Vec<String>) -> Self {
        UnorderedGroup(values.into_iter().collect())
    }
}

impl fmt::Display for OrderedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(MULTI_VALUE_DELIMITER))
    }
}

impl fmt::Display for UnorderedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(String::as_str).collect();
        write!(f, "{{{}}}", joined.join(MULTI_VALUE_DELIMITER))
    }
}

pub fn group_ordered(lists: Vec<Vec<String>>) -> Vec<OrderedGroup> {
    lists.into_iter().map(OrderedGroup::from).collect()
}

pub fn group_unordered(lists: Vec<Vec<String>>) -> Vec<UnorderedGroup> {
    lists.into_iter().map(UnorderedGroup::from).collect()
}
