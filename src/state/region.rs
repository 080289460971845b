//! Content of one display region.

/// What a region currently shows.
///
/// A failed fetch replaces whatever was shown with the failure notice; the
/// next successful fetch replaces the notice.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Region<T> {
    /// Nothing fetched yet for the current target.
    #[default]
    Empty,
    /// Last fetch succeeded.
    Ready(T),
    /// Last fetch failed with this notice.
    Failed(String),
}

impl<T> Region<T> {
    pub fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(notice) => Self::Failed(notice),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(notice) => Some(notice),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::Empty;
    }
}

impl<T> Region<Vec<T>> {
    /// Number of loaded rows; zero unless ready.
    pub fn len(&self) -> usize {
        self.ready().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
