use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, IntoEnumIterator};
use uuid::Uuid;

/// Opaque identifier for a live table or chart widget owned by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(Uuid);

impl WidgetId {
    /// Create a new unique widget ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the ID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WidgetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s).map_err(|e| e.to_string())?))
    }
}

/// Identity attached to a table row by the builder that produced it.
///
/// For the column table this is the column position, for the frequency
/// table it is the index of the value in the column's value counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(usize);

impl RowKey {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The rebuildable table regions of a report view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TableContainer {
    #[strum(serialize = "columns")]
    Columns,
    #[strum(serialize = "frequencies")]
    Frequencies,
}

impl TableContainer {
    /// Heading shown above the table
    pub fn title(&self) -> &'static str {
        match self {
            TableContainer::Columns => "Columns",
            TableContainer::Frequencies => "Frequencies",
        }
    }
}

/// Distribution categories shown in the per-column chart, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Bucket {
    Null,
    Duplicate,
    #[strum(serialize = "Non-Unique")]
    NonUnique,
    Unique,
}

impl Bucket {
    /// All buckets in chart order
    pub fn ordered() -> impl Iterator<Item = Bucket> {
        Bucket::iter()
    }
}

/// Which column, if any, is currently displayed in the detail panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    NoSelection,
    Selected(usize),
}

impl SelectionState {
    pub fn position(&self) -> Option<usize> {
        match self {
            SelectionState::NoSelection => None,
            SelectionState::Selected(position) => Some(*position),
        }
    }

    pub fn is_selected(&self, position: usize) -> bool {
        self.position() == Some(position)
    }
}
