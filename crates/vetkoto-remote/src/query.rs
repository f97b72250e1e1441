//! List query parameters and filter translation

/// Rows fetched by a plain `list` call.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Rows fetched when an operation needs "everything" (export, counts).
pub const EXPORT_LIMIT: usize = 10_000;

/// Single-column substring filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column: String,
    pub value: String,
}

impl ColumnFilter {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Filters with an empty column or value are not applied.
    pub fn is_active(&self) -> bool {
        !self.column.is_empty() && !self.value.is_empty()
    }

    pub fn op(&self) -> FilterOp {
        FilterOp::for_value(&self.value)
    }
}

/// Comparison a filter value translates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOp {
    /// Value parsed as an integer: exact match.
    Eq(i64),
    /// Anything else: case-insensitive substring match.
    ILike(String),
}

impl FilterOp {
    pub fn for_value(value: &str) -> Self {
        match value.trim().parse::<i64>() {
            Ok(n) => FilterOp::Eq(n),
            Err(_) => FilterOp::ILike(value.to_string()),
        }
    }

    /// PostgREST operator text, e.g. `eq.5` or `ilike.*ali*`.
    pub fn to_param(&self) -> String {
        match self {
            FilterOp::Eq(n) => format!("eq.{n}"),
            FilterOp::ILike(v) => format!("ilike.*{v}*"),
        }
    }

    /// Evaluate the operator against a cell's display text.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            FilterOp::Eq(n) => text.trim() == n.to_string(),
            FilterOp::ILike(v) => text.to_lowercase().contains(&v.to_lowercase()),
        }
    }
}

/// Parameters of a `list` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: usize,
    pub offset: usize,
    /// Ordering column; the entity's primary key when `None`.
    pub order_by: Option<String>,
    pub ascending: bool,
    pub filter: Option<ColumnFilter>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
            order_by: None,
            ascending: true,
            filter: None,
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query used for export and dashboard counts.
    pub fn all() -> Self {
        Self::default().limit(EXPORT_LIMIT)
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order_by = Some(column.into());
        self.ascending = ascending;
        self
    }

    pub fn filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter = Some(ColumnFilter::new(column, value));
        self
    }

    pub fn with_filter(mut self, filter: Option<ColumnFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// The filter, when it should be applied.
    pub fn active_filter(&self) -> Option<&ColumnFilter> {
        self.filter.as_ref().filter(|f| f.is_active())
    }

    pub fn order_column<'a>(&'a self, primary_key: &'a str) -> &'a str {
        self.order_by.as_deref().unwrap_or(primary_key)
    }
}
