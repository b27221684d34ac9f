//! Common types used across the dashboard

use serde::{Deserialize, Serialize};

/// Visual tone of a status badge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Info,
    Neutral,
}

/// A status badge as rendered next to a row or card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }
}

/// Anything that renders as a status badge
pub trait Badged {
    fn badge(&self) -> Badge;
}

/// Pagination metadata as reported by the remote API
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    #[serde(alias = "totalItems", alias = "totalDocs")]
    pub total: u64,
    pub total_pages: u32,
}

/// A list response in any of the shapes the remote API uses
///
/// Depending on the endpoint the body is `{data, pagination}`, a bare array,
/// or `{data}`. Variant order matters for untagged decoding.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiList<T> {
    Paginated {
        data: Vec<T>,
        pagination: PaginationMeta,
    },
    Raw(Vec<T>),
    Wrapped {
        data: Vec<T>,
    },
}

/// Normalised list page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ApiList<T> {
    pub fn into_page(self) -> Page<T> {
        match self {
            ApiList::Paginated { data, pagination } => Page {
                data,
                pagination: Some(pagination),
            },
            ApiList::Raw(data) | ApiList::Wrapped { data } => Page {
                data,
                pagination: None,
            },
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.into_page().data
    }
}

impl<T> Page<T> {
    /// Map the rows of a page while keeping its pagination
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// A single-object response: `{data}` or the bare object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiItem<T> {
    Wrapped { data: T },
    Raw(T),
}

impl<T> ApiItem<T> {
    pub fn into_inner(self) -> T {
        match self {
            ApiItem::Wrapped { data } | ApiItem::Raw(data) => data,
        }
    }
}

/// List filters shared by every table screen
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}

impl ListQuery {
    /// Query string pairs for the fields that are set
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("search", search.trim().to_string()));
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("status", status.to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("to", to.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    #[test]
    fn decodes_all_list_shapes() {
        let paginated: ApiList<Row> = serde_json::from_str(
            r#"{"data":[{"id":1}],"pagination":{"page":2,"limit":10,"total":11,"totalPages":2}}"#,
        )
        .unwrap();
        let page = paginated.into_page();
        assert_eq!(page.data, vec![Row { id: 1 }]);
        assert_eq!(page.pagination.unwrap().total_pages, 2);

        let raw: ApiList<Row> = serde_json::from_str(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert_eq!(raw.into_vec().len(), 2);

        let wrapped: ApiList<Row> = serde_json::from_str(r#"{"data":[{"id":3}]}"#).unwrap();
        let page = wrapped.into_page();
        assert!(page.pagination.is_none());
        assert_eq!(page.data, vec![Row { id: 3 }]);
    }

    #[test]
    fn decodes_item_shapes() {
        let wrapped: ApiItem<Row> = serde_json::from_str(r#"{"data":{"id":7}}"#).unwrap();
        assert_eq!(wrapped.into_inner(), Row { id: 7 });
        let raw: ApiItem<Row> = serde_json::from_str(r#"{"id":8}"#).unwrap();
        assert_eq!(raw.into_inner(), Row { id: 8 });
    }

    #[test]
    fn query_pairs_skip_unset_and_blank() {
        let query = ListQuery {
            page: Some(1),
            search: Some("  ".into()),
            status: Some("pending".into()),
            ..Default::default()
        };
        assert_eq!(
            query.to_pairs(),
            vec![("page", "1".to_string()), ("status", "pending".to_string())]
        );
    }
}
