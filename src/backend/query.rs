/// Sort direction for [`Query::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn as_str(&self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        }
    }
}

/// A read against one table, built fluently and rendered as PostgREST
/// query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<(String, Order)>,
    limit: Option<usize>,
    single: bool,
}

impl Query {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
            single: false,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.chars().filter(|c| !c.is_whitespace()).collect();
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_string(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Expect exactly one row; anything else is an error.
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &str {
        &self.columns
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<(&str, Order)> {
        self.order.as_ref().map(|(c, o)| (c.as_str(), *o))
    }

    pub fn row_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn is_single(&self) -> bool {
        self.single
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.columns.clone())];
        for (column, value) in &self.filters {
            pairs.push((column.clone(), format!("eq.{}", value)));
        }
        if let Some((column, order)) = &self.order {
            pairs.push(("order".to_string(), format!("{}.{}", column, order.as_str())));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Column {
    All,
    Field(String),
    /// A to-one relation, e.g. `exercises(name)`.
    Embed { relation: String, columns: Vec<Column> },
}

pub(crate) fn parse_columns(select: &str) -> Vec<Column> {
    split_top_level(select)
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(|part| {
            if part == "*" {
                return Column::All;
            }
            match (part.find('('), part.ends_with(')')) {
                (Some(open), true) => Column::Embed {
                    relation: part[..open].to_string(),
                    columns: parse_columns(&part[open + 1..part.len() - 1]),
                },
                _ => Column::Field(part.to_string()),
            }
        })
        .collect()
}

fn split_top_level(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in input.chars().filter(|c| !c.is_whitespace()) {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_select_is_star() {
        let query = Query::new("exercises");
        assert_eq!(
            query.to_query_pairs(),
            vec![("select".to_string(), "*".to_string())]
        );
    }

    #[test]
    fn test_query_pairs_for_recent_routine() {
        let query = Query::new("member_exercises")
            .select(
                "id,
                 exercises (name),
                 sets, reps, created_at",
            )
            .eq("profile_id", "user-1")
            .order("created_at", Order::Descending)
            .limit(5);

        assert_eq!(
            query.to_query_pairs(),
            vec![
                (
                    "select".to_string(),
                    "id,exercises(name),sets,reps,created_at".to_string()
                ),
                ("profile_id".to_string(), "eq.user-1".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
        assert!(!query.is_single());
    }

    #[test]
    fn test_parse_columns_with_embed() {
        let columns = parse_columns("id,exercises(name,difficulty),sets");
        assert_eq!(
            columns,
            vec![
                Column::Field("id".to_string()),
                Column::Embed {
                    relation: "exercises".to_string(),
                    columns: vec![
                        Column::Field("name".to_string()),
                        Column::Field("difficulty".to_string()),
                    ],
                },
                Column::Field("sets".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_star() {
        assert_eq!(parse_columns("*"), vec![Column::All]);
    }
}
