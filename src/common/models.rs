use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PagedResponse<T> {
    items: Vec<T>,
    has_next: bool,
}

impl<T> PagedResponse<T> {
    pub fn new(items: Vec<T>, has_next: bool) -> Self {
        Self { items, has_next }
    }

    /// Builds a page from a query that fetched one row more than `page_size`.
    pub fn from_overfetch(mut items: Vec<T>, page_size: usize) -> Self {
        let has_next = items.len() > page_size;
        items.truncate(page_size);
        Self::new(items, has_next)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[cfg(test)]
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResponse<U> {
        PagedResponse::new(self.items.into_iter().map(f).collect(), self.has_next)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PageQuery {
    #[serde(default)]
    pub page_num: u16,
}
