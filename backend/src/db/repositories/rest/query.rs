//! PostgREST query construction.

/// Sort direction of an `order=` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// A read against one table or view of the data store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    table: &'static str,
    select: String,
    filters: Vec<(String, String)>,
    order: Option<(String, Order, bool)>,
    limit: Option<u64>,
    offset: Option<u64>,
    count_exact: bool,
}

impl TableQuery {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
            offset: None,
            count_exact: false,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = columns.into();
        self
    }

    /// `column=eq.value`
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// `column=in.("a","b")`
    pub fn any_of(mut self, column: &str, values: &[String]) -> Self {
        let quoted: Vec<String> = values
            .iter()
            .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
            .collect();
        self.filters
            .push((column.to_string(), format!("in.({})", quoted.join(","))));
        self
    }

    /// `column=not.is.null`
    pub fn not_null(mut self, column: &str) -> Self {
        self.filters
            .push((column.to_string(), "not.is.null".to_string()));
        self
    }

    pub fn order(mut self, column: &str, direction: Order) -> Self {
        self.order = Some((column.to_string(), direction, false));
        self
    }

    /// Like [`order`](Self::order), with NULLs sorted after every value.
    pub fn order_nulls_last(mut self, column: &str, direction: Order) -> Self {
        self.order = Some((column.to_string(), direction, true));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Ask the store for the exact row count (`Prefer: count=exact`).
    pub fn count_exact(mut self) -> Self {
        self.count_exact = true;
        self
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn wants_count(&self) -> bool {
        self.count_exact
    }

    /// Query string parameters in a stable order.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select.clone())];
        params.extend(self.filters.iter().cloned());
        if let Some((column, direction, nulls_last)) = &self.order {
            let mut clause = format!("{}.{}", column, direction.as_str());
            if *nulls_last {
                clause.push_str(".nullslast");
            }
            params.push(("order".to_string(), clause));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        params
    }
}

/// Total row count from a `Content-Range` header (`0-9/42`, `*/0`).
pub fn parse_content_range(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.parse().ok()
}
