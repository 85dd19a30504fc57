//! Split a query string into the parts the translator cares about.

/// The decoded query string of a table request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    /// Raw `select` expression, if any.
    pub select: Option<String>,
    /// Raw `order` expression, if any.
    pub order: Option<String>,
    /// Every other key, in query-string order. Keys may repeat.
    pub filters: Vec<(String, String)>,
}

impl Arguments {
    /// Sort already-decoded key/value pairs into select, order and filters.
    /// A repeated `select` or `order` keeps the last value. `count` is accepted and ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut arguments = Arguments::default();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                "select" => arguments.select = Some(value),
                "order" => arguments.order = Some(value),
                "count" => {}
                _ => arguments.filters.push((key, value)),
            }
        }
        arguments
    }

    /// Decode a raw (percent-encoded) query string.
    pub fn parse(query: Option<&str>) -> Self {
        match query {
            None => Arguments::default(),
            Some(query) => Self::from_pairs(url::form_urlencoded::parse(query.as_bytes())),
        }
    }
}
