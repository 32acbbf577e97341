//! Validation gate
//!
//! Turns raw `field -> text` input into typed tracer [`Params`] ([`parse`])
//! and range-checks typed params ([`validate`]). Nothing reaches a tracer
//! without passing [`validate`]; [`generate_trace`] calls it first.
//!
//! # Text formats
//!
//! | Field | Example |
//! |---|---|
//! | integer lists (`array`, `coins`) | `5, 3 4,1` |
//! | `edges` | `0-1:4, 0-2:1` (`from-to:weight`) |
//! | `activities` | `1-4, 3-5` (`start-end`) |
//! | `items` | `10:60, 20:100` (`weight:value`) |
//! | `jobs` | `2:100, 1:19` (`deadline:profit`) |
//! | `tree` | `1,2,3,null,5` (level order, `null` or `_` for a hole) |
//!
//! [`generate_trace`]: crate::tracers::generate_trace

use crate::constants::{
    MAX_ARRAY_LEN, MAX_COIN_AMOUNT, MAX_COIN_TYPES, MAX_DEADLINE, MAX_EDGE_WEIGHT,
    MAX_GREEDY_ITEMS, MAX_LCS_LEN, MAX_NODES, MAX_PROFIT, MAX_TREE_SLOTS,
};
use crate::errors::ValidationError;
use crate::snapshot::SortOrder;
use crate::tracers::{
    Activity, CoinParams, Edge, Family, GraphParams, Item, Job, KnapsackParams, LcsParams,
    Params, SearchParams, SortParams, TreeParams,
};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Raw textual input, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    fields: BTreeMap<String, String>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, text: &str) -> Self {
        self.insert(field, text);
        self
    }

    pub fn insert(&mut self, field: &str, text: &str) {
        self.fields
            .insert(field.trim().to_ascii_lowercase(), text.to_string());
    }

    /// Collect `key=value` arguments
    pub fn from_args<I, S>(args: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut input = RawInput::new();
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| ValidationError::new(arg, "expected key=value"))?;
            input.insert(key, value);
        }
        Ok(input)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    fn require(&self, field: &str) -> Result<&str, ValidationError> {
        self.get(field)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ValidationError::new(field, "is required"))
    }
}

// ========== Token parsing ==========

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn number<T: FromStr>(field: &str, token: &str) -> Result<T, ValidationError> {
    token
        .trim()
        .parse()
        .map_err(|_| ValidationError::new(field, format!("'{}' is not a valid number", token)))
}

fn number_list<T: FromStr>(field: &str, text: &str) -> Result<Vec<T>, ValidationError> {
    tokens(text).map(|t| number(field, t)).collect()
}

fn pair<A: FromStr, B: FromStr>(
    field: &str,
    token: &str,
    separator: char,
) -> Result<(A, B), ValidationError> {
    let (a, b) = token.split_once(separator).ok_or_else(|| {
        ValidationError::new(
            field,
            format!("'{}' must look like a{}b", token, separator),
        )
    })?;
    Ok((number(field, a)?, number(field, b)?))
}

fn flag(field: &str, text: &str) -> Result<bool, ValidationError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(ValidationError::new(
            field,
            format!("'{}' is not true or false", other),
        )),
    }
}

fn parse_edges(text: &str) -> Result<Vec<Edge>, ValidationError> {
    tokens(text)
        .map(|token| {
            let (ends, weight) = token.split_once(':').ok_or_else(|| {
                ValidationError::new("edges", format!("'{}' must look like from-to:weight", token))
            })?;
            let (from, to) = pair("edges", ends, '-')?;
            Ok(Edge {
                from,
                to,
                weight: number("edges", weight)?,
            })
        })
        .collect()
}

fn parse_tree(text: &str) -> Result<Vec<Option<i64>>, ValidationError> {
    tokens(text)
        .map(|token| match token.to_ascii_lowercase().as_str() {
            "null" | "none" | "_" | "-" => Ok(None),
            _ => number("tree", token).map(Some),
        })
        .collect()
}

fn parse_order(text: Option<&str>) -> Result<SortOrder, ValidationError> {
    match text.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("asc") | Some("ascending") => Ok(SortOrder::Ascending),
        Some("desc") | Some("descending") => Ok(SortOrder::Descending),
        Some(other) => Err(ValidationError::new(
            "order",
            format!("'{}' is not asc or desc", other),
        )),
    }
}

/// Parse raw text into typed params for `family`, then validate them
pub fn parse(family: Family, input: &RawInput) -> Result<Params, ValidationError> {
    let params = match family {
        Family::BubbleSort => Params::Sort(SortParams {
            values: number_list("array", input.require("array")?)?,
            order: parse_order(input.get("order"))?,
        }),
        Family::BinarySearch | Family::InterpolationSearch | Family::TernarySearch => {
            Params::Search(SearchParams {
                values: number_list("array", input.require("array")?)?,
                target: number("target", input.require("target")?)?,
            })
        }
        Family::Dijkstra => Params::Graph(GraphParams {
            node_count: number("nodes", input.require("nodes")?)?,
            edges: parse_edges(input.require("edges")?)?,
            source: match input.get("source") {
                Some(text) => number("source", text)?,
                None => 0,
            },
            target: input
                .get("target")
                .map(|text| number("target", text))
                .transpose()?,
            directed: match input.get("directed") {
                Some(text) => flag("directed", text)?,
                None => false,
            },
        }),
        Family::CoinChange => Params::Coins(CoinParams {
            coins: number_list("coins", input.require("coins")?)?,
            amount: number("amount", input.require("amount")?)?,
        }),
        Family::Lcs => Params::Strings(LcsParams {
            a: input.require("a")?.trim().to_string(),
            b: input.require("b")?.trim().to_string(),
        }),
        Family::ActivitySelection => Params::Activities(
            tokens(input.require("activities")?)
                .map(|t| pair("activities", t, '-').map(|(start, end)| Activity { start, end }))
                .collect::<Result<_, _>>()?,
        ),
        Family::FractionalKnapsack => Params::Knapsack(KnapsackParams {
            items: tokens(input.require("items")?)
                .map(|t| pair("items", t, ':').map(|(weight, value)| Item { weight, value }))
                .collect::<Result<_, _>>()?,
            capacity: number("capacity", input.require("capacity")?)?,
        }),
        Family::JobScheduling => Params::Jobs(
            tokens(input.require("jobs")?)
                .map(|t| pair("jobs", t, ':').map(|(deadline, profit)| Job { deadline, profit }))
                .collect::<Result<_, _>>()?,
        ),
        Family::PreorderTraversal | Family::InorderTraversal | Family::PostorderTraversal => {
            Params::Tree(TreeParams {
                level_order: parse_tree(input.require("tree")?)?,
            })
        }
    };

    validate(family, &params)?;
    Ok(params)
}

// ========== Typed validation ==========

fn non_empty<T>(field: &str, items: &[T], max: usize) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    if items.len() > max {
        return Err(ValidationError::new(
            field,
            format!("has {} entries, at most {} allowed", items.len(), max),
        ));
    }
    Ok(())
}

fn check_graph(graph: &GraphParams) -> Result<(), ValidationError> {
    let n = graph.node_count;
    if n == 0 || n > MAX_NODES {
        return Err(ValidationError::new(
            "nodes",
            format!("must be between 1 and {}", MAX_NODES),
        ));
    }
    non_empty("edges", &graph.edges, n * n)?;

    for edge in &graph.edges {
        if edge.from >= n || edge.to >= n {
            return Err(ValidationError::new(
                "edges",
                format!(
                    "edge {}-{} references a vertex outside 0..{}",
                    edge.from,
                    edge.to,
                    n - 1
                ),
            ));
        }
        if edge.weight == 0 {
            return Err(ValidationError::new(
                "edges",
                format!("edge {}-{} must have a positive weight", edge.from, edge.to),
            ));
        }
        if edge.weight > MAX_EDGE_WEIGHT {
            return Err(ValidationError::new(
                "edges",
                format!(
                    "edge {}-{} weighs more than {}",
                    edge.from, edge.to, MAX_EDGE_WEIGHT
                ),
            ));
        }
    }

    if graph.source >= n {
        return Err(ValidationError::new(
            "source",
            format!("vertex {} is outside 0..{}", graph.source, n - 1),
        ));
    }
    if let Some(target) = graph.target.filter(|&t| t >= n) {
        return Err(ValidationError::new(
            "target",
            format!("vertex {} is outside 0..{}", target, n - 1),
        ));
    }
    Ok(())
}

/// Range-check typed params for `family`
pub fn validate(family: Family, params: &Params) -> Result<(), ValidationError> {
    match (family, params) {
        (Family::BubbleSort, Params::Sort(p)) => non_empty("array", &p.values, MAX_ARRAY_LEN),
        (
            Family::BinarySearch | Family::InterpolationSearch | Family::TernarySearch,
            Params::Search(p),
        ) => {
            non_empty("array", &p.values, MAX_ARRAY_LEN)?;
            if p.values.windows(2).any(|w| w[0] > w[1]) {
                return Err(ValidationError::new(
                    "array",
                    "must be sorted in non-decreasing order",
                ));
            }
            Ok(())
        }
        (Family::Dijkstra, Params::Graph(p)) => check_graph(p),
        (Family::CoinChange, Params::Coins(p)) => {
            non_empty("coins", &p.coins, MAX_COIN_TYPES)?;
            if p.coins.contains(&0) {
                return Err(ValidationError::new("coins", "denominations must be positive"));
            }
            if p.amount > MAX_COIN_AMOUNT {
                return Err(ValidationError::new(
                    "amount",
                    format!("must be at most {}", MAX_COIN_AMOUNT),
                ));
            }
            Ok(())
        }
        (Family::Lcs, Params::Strings(p)) => {
            for (field, text) in [("a", &p.a), ("b", &p.b)] {
                let chars: Vec<char> = text.chars().collect();
                non_empty(field, &chars, MAX_LCS_LEN)?;
            }
            Ok(())
        }
        (Family::ActivitySelection, Params::Activities(p)) => {
            non_empty("activities", p, MAX_GREEDY_ITEMS)?;
            if let Some(bad) = p.iter().find(|a| a.end <= a.start) {
                return Err(ValidationError::new(
                    "activities",
                    format!("activity {}-{} must end after it starts", bad.start, bad.end),
                ));
            }
            Ok(())
        }
        (Family::FractionalKnapsack, Params::Knapsack(p)) => {
            non_empty("items", &p.items, MAX_GREEDY_ITEMS)?;
            if p.items.iter().any(|item| item.weight == 0) {
                return Err(ValidationError::new("items", "weights must be positive"));
            }
            if p.items.iter().any(|item| item.value > MAX_PROFIT) {
                return Err(ValidationError::new(
                    "items",
                    format!("values must be at most {}", MAX_PROFIT),
                ));
            }
            if p.capacity == 0 {
                return Err(ValidationError::new("capacity", "must be positive"));
            }
            Ok(())
        }
        (Family::JobScheduling, Params::Jobs(p)) => {
            non_empty("jobs", p, MAX_GREEDY_ITEMS)?;
            if p.iter().any(|job| job.deadline == 0) {
                return Err(ValidationError::new("jobs", "deadlines must be positive"));
            }
            if p.iter().any(|job| job.deadline > MAX_DEADLINE) {
                return Err(ValidationError::new(
                    "jobs",
                    format!("deadlines must be at most {}", MAX_DEADLINE),
                ));
            }
            if p.iter().any(|job| job.profit > MAX_PROFIT) {
                return Err(ValidationError::new(
                    "jobs",
                    format!("profits must be at most {}", MAX_PROFIT),
                ));
            }
            Ok(())
        }
        (
            Family::PreorderTraversal | Family::InorderTraversal | Family::PostorderTraversal,
            Params::Tree(p),
        ) => {
            non_empty("tree", &p.level_order, MAX_TREE_SLOTS)?;
            if p.level_order[0].is_none() {
                return Err(ValidationError::new("tree", "root must not be null"));
            }
            Ok(())
        }
        (family, params) => Err(ValidationError::new(
            "family",
            format!("{} does not take {} parameters", family, params.shape()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_params() {
        let input = RawInput::new().with("array", "5, 3 4,1,-2").with("order", "desc");
        let params = parse(Family::BubbleSort, &input).unwrap();
        assert_eq!(
            params,
            Params::Sort(SortParams {
                values: vec![5, 3, 4, 1, -2],
                order: SortOrder::Descending,
            })
        );
    }

    #[test]
    fn test_non_numeric_token() {
        let input = RawInput::new().with("array", "1,2,x").with("target", "2");
        let err = parse(Family::BinarySearch, &input).unwrap_err();
        assert_eq!(err.field, "array");
        assert!(err.reason.contains("'x'"));
    }

    #[test]
    fn test_unsorted_search_array() {
        let input = RawInput::new().with("array", "3,1,2").with("target", "2");
        let err = parse(Family::TernarySearch, &input).unwrap_err();
        assert_eq!(err.field, "array");
    }

    #[test]
    fn test_missing_field() {
        let err = parse(Family::CoinChange, &RawInput::new().with("coins", "1,2")).unwrap_err();
        assert_eq!(err, ValidationError::new("amount", "is required"));
    }

    #[test]
    fn test_parse_graph() {
        let input = RawInput::new()
            .with("nodes", "3")
            .with("edges", "0-1:4, 1-2:1")
            .with("target", "2")
            .with("directed", "yes");
        let Params::Graph(graph) = parse(Family::Dijkstra, &input).unwrap() else {
            panic!("Expected graph params");
        };
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.source, 0);
        assert_eq!(graph.target, Some(2));
        assert!(graph.directed);
    }

    #[test]
    fn test_out_of_range_vertex() {
        let input = RawInput::new().with("nodes", "3").with("edges", "0-5:1");
        let err = parse(Family::Dijkstra, &input).unwrap_err();
        assert_eq!(err.field, "edges");
    }

    #[test]
    fn test_non_positive_weight() {
        let input = RawInput::new().with("nodes", "2").with("edges", "0-1:0");
        assert_eq!(parse(Family::Dijkstra, &input).unwrap_err().field, "edges");

        let input = RawInput::new().with("items", "0:5").with("capacity", "3");
        assert_eq!(
            parse(Family::FractionalKnapsack, &input).unwrap_err().field,
            "items"
        );
    }

    #[test]
    fn test_non_positive_deadline() {
        let input = RawInput::new().with("jobs", "0:5, 1:3");
        let err = parse(Family::JobScheduling, &input).unwrap_err();
        assert_eq!(err.field, "jobs");
    }

    #[test]
    fn test_oversized_weight_and_profit() {
        let input = RawInput::new()
            .with("nodes", "3")
            .with("edges", "0-1:18446744073709551615, 1-2:1")
            .with("target", "2");
        let err = parse(Family::Dijkstra, &input).unwrap_err();
        assert_eq!(err.field, "edges");
        assert!(err.reason.contains("weighs more than"));

        let heaviest = format!("0-1:{}", MAX_EDGE_WEIGHT);
        let input = RawInput::new().with("nodes", "2").with("edges", &heaviest);
        assert!(parse(Family::Dijkstra, &input).is_ok());

        let input = RawInput::new().with("jobs", "1:18446744073709551615, 2:1");
        assert_eq!(parse(Family::JobScheduling, &input).unwrap_err().field, "jobs");

        let input = RawInput::new()
            .with("items", "1:18446744073709551615")
            .with("capacity", "3");
        assert_eq!(
            parse(Family::FractionalKnapsack, &input).unwrap_err().field,
            "items"
        );
    }

    #[test]
    fn test_zero_length_activity() {
        let input = RawInput::new().with("activities", "1-4, 3-3");
        let err = parse(Family::ActivitySelection, &input).unwrap_err();
        assert_eq!(err.field, "activities");
        assert!(err.reason.contains("3-3"));
    }

    #[test]
    fn test_empty_collection() {
        let input = RawInput::new().with("activities", " , ");
        let err = parse(Family::ActivitySelection, &input).unwrap_err();
        assert_eq!(err.field, "activities");
    }

    #[test]
    fn test_parse_tree_with_holes() {
        let input = RawInput::new().with("tree", "1,2,3,null,5,_,7");
        let Params::Tree(tree) = parse(Family::InorderTraversal, &input).unwrap() else {
            panic!("Expected tree params");
        };
        assert_eq!(
            tree.level_order,
            vec![Some(1), Some(2), Some(3), None, Some(5), None, Some(7)]
        );
    }

    #[test]
    fn test_from_args() {
        let input = RawInput::from_args(["a=ABC", "B=abd"]).unwrap();
        assert_eq!(input.get("a"), Some("ABC"));
        assert_eq!(input.get("b"), Some("abd"));
        assert!(RawInput::from_args(["oops"]).is_err());
    }
}
