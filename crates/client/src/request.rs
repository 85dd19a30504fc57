//! Describe a table request without sending it.

use std::fmt::Display;

use crate::client::InventoryClient;
use crate::error::ClientError;

/// What a request does to its table.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Select,
    Insert(serde_json::Value),
    Update(serde_json::Value),
    Delete,
}

/// A request against `/api/{table}`.
///
/// Every builder method returns a new request; the original is left untouched,
/// so a base request can be shared and refined.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRequest {
    table: String,
    operation: Operation,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
}

impl TableRequest {
    fn new(table: &str, operation: Operation) -> Self {
        TableRequest {
            table: table.to_string(),
            operation,
            select: None,
            filters: vec![],
            order: vec![],
        }
    }

    /// Read rows, projecting `columns` (e.g. `*,categories(id,name)`).
    pub fn select(table: &str, columns: &str) -> Self {
        Self::new(table, Operation::Select).columns(columns)
    }

    /// Insert one object, or an array of objects.
    pub fn insert(table: &str, body: serde_json::Value) -> Self {
        Self::new(table, Operation::Insert(body))
    }

    pub fn update(table: &str, body: serde_json::Value) -> Self {
        Self::new(table, Operation::Update(body))
    }

    pub fn delete(table: &str) -> Self {
        Self::new(table, Operation::Delete)
    }

    pub fn columns(&self, columns: &str) -> Self {
        TableRequest {
            select: Some(columns.to_string()),
            ..self.clone()
        }
    }

    fn filter(&self, column: &str, expression: String) -> Self {
        let mut request = self.clone();
        request.filters.push((column.to_string(), expression));
        request
    }

    pub fn eq(&self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("eq.{value}"))
    }

    pub fn neq(&self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("neq.{value}"))
    }

    pub fn gte(&self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("gte.{value}"))
    }

    pub fn lte(&self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("lte.{value}"))
    }

    pub fn is_null(&self, column: &str) -> Self {
        self.filter(column, "is.null".to_string())
    }

    pub fn not_null(&self, column: &str) -> Self {
        self.filter(column, "not.is.null".to_string())
    }

    /// Append a sort key. Keys apply in the order they were added.
    pub fn order(&self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        let mut request = self.clone();
        request.order.push(format!("{column}.{direction}"));
        request
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn path(&self) -> String {
        format!("/api/{}", self.table)
    }

    pub fn method(&self) -> reqwest::Method {
        match self.operation {
            Operation::Select => reqwest::Method::GET,
            Operation::Insert(_) => reqwest::Method::POST,
            Operation::Update(_) => reqwest::Method::PATCH,
            Operation::Delete => reqwest::Method::DELETE,
        }
    }

    /// The decoded query string: `select`, then the filters in the order they
    /// were added, then `order`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![];
        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), select.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            pairs.push(("order".to_string(), self.order.join(",")));
        }
        pairs
    }

    /// Send the request. This is the only method that touches the network.
    pub async fn execute(&self, client: &InventoryClient) -> Result<serde_json::Value, ClientError> {
        let mut request = client
            .request(self.method(), &self.path())?
            .query(&self.to_query_pairs());
        match &self.operation {
            Operation::Insert(body) | Operation::Update(body) => request = request.json(body),
            Operation::Select | Operation::Delete => {}
        }

        tracing::debug!(method = %self.method(), path = %self.path(), "sending table request");
        client.send(request).await
    }
}
