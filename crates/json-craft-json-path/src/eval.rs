//! JSONPath evaluation.
//!
//! Evaluation keeps a frontier of (path, value) pairs and advances it one
//! selector at a time, left to right. Results stream into an
//! [`Accumulator`]; the three concrete sinks differ only in which half of
//! the (path, value) pair they keep.

use std::collections::HashSet;

use serde_json::Value;

use crate::types::{JsonPath, Node, NormalizedPath, PathComponent, SelectOptions, Selector};

/// A sink for evaluation results.
pub trait Accumulator {
    fn push(&mut self, path: &NormalizedPath, value: &Value);
}

/// Collects matched values.
#[derive(Debug, Default)]
pub struct ValueAccumulator {
    pub values: Vec<Value>,
}

impl Accumulator for ValueAccumulator {
    fn push(&mut self, _path: &NormalizedPath, value: &Value) {
        self.values.push(value.clone());
    }
}

/// Collects normalized paths.
#[derive(Debug, Default)]
pub struct PathAccumulator {
    pub paths: Vec<NormalizedPath>,
}

impl Accumulator for PathAccumulator {
    fn push(&mut self, path: &NormalizedPath, _value: &Value) {
        self.paths.push(path.clone());
    }
}

/// Collects (path, value) nodes.
#[derive(Debug, Default)]
pub struct NodeAccumulator {
    pub nodes: Vec<Node>,
}

impl Accumulator for NodeAccumulator {
    fn push(&mut self, path: &NormalizedPath, value: &Value) {
        self.nodes.push(Node {
            path: path.clone(),
            value: value.clone(),
        });
    }
}

impl JsonPath {
    /// Evaluate against `root`, returning matched values.
    pub fn select(&self, root: &Value, options: SelectOptions) -> Vec<Value> {
        let mut acc = ValueAccumulator::default();
        self.evaluate(root, options, &mut acc);
        acc.values
    }

    /// Evaluate against `root`, returning normalized paths.
    pub fn select_paths(&self, root: &Value, options: SelectOptions) -> Vec<NormalizedPath> {
        let mut acc = PathAccumulator::default();
        self.evaluate(root, options, &mut acc);
        acc.paths
    }

    /// Evaluate against `root`, returning (path, value) nodes.
    pub fn select_nodes(&self, root: &Value, options: SelectOptions) -> Vec<Node> {
        let mut acc = NodeAccumulator::default();
        self.evaluate(root, options, &mut acc);
        acc.nodes
    }

    /// Run the pipeline and stream the shaped result set into `acc`.
    pub fn evaluate<A: Accumulator>(&self, root: &Value, options: SelectOptions, acc: &mut A) {
        let mut matches = eval_selectors(self.selectors(), root);
        if options.contains(SelectOptions::SORT) {
            matches.sort_by(|a, b| a.0.cmp(&b.0));
        }
        if options.contains(SelectOptions::NO_DUPS) {
            let mut seen = HashSet::new();
            matches.retain(|(path, _)| seen.insert(path.clone()));
        }
        for (path, value) in &matches {
            acc.push(path, value);
        }
    }
}

fn eval_selectors<'a>(
    selectors: &[Selector],
    root: &'a Value,
) -> Vec<(NormalizedPath, &'a Value)> {
    let mut frontier = vec![(NormalizedPath::root(), root)];
    for selector in selectors {
        let mut next = Vec::new();
        for (path, value) in &frontier {
            apply_selector(selector, path, value, root, &mut next);
        }
        frontier = next;
    }
    frontier
}

fn apply_selector<'a>(
    selector: &Selector,
    path: &NormalizedPath,
    value: &'a Value,
    root: &'a Value,
    out: &mut Vec<(NormalizedPath, &'a Value)>,
) {
    match selector {
        Selector::Root => out.push((NormalizedPath::root(), root)),
        Selector::Name(name) => {
            if let Value::Object(map) = value {
                if let Some(child) = map.get(name) {
                    out.push((path.child_name(name), child));
                }
            }
        }
        Selector::Index(index) => {
            if let Value::Array(items) = value {
                if let Some(resolved) = resolve_index(*index, items.len()) {
                    if let Some(child) = items.get(resolved) {
                        out.push((path.child_index(resolved), child));
                    }
                }
            }
        }
        Selector::Wildcard => match value {
            Value::Object(map) => {
                for (name, child) in map {
                    out.push((path.child_name(name), child));
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    out.push((path.child_index(index), child));
                }
            }
            _ => {}
        },
        Selector::RecursiveDescent => descend(path, value, out),
    }
}

// Negative indices count back from the end.
fn resolve_index(index: isize, len: usize) -> Option<usize> {
    if index >= 0 {
        Some(index as usize)
    } else {
        len.checked_sub(index.unsigned_abs())
    }
}

// Pre-order walk: the value itself, then every descendant in document
// order.
fn descend<'a>(
    path: &NormalizedPath,
    value: &'a Value,
    out: &mut Vec<(NormalizedPath, &'a Value)>,
) {
    out.push((path.clone(), value));
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                descend(&path.child_name(name), child, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                descend(&path.child_index(index), child, out);
            }
        }
        _ => {}
    }
}

/// Look up the single value a normalized path addresses.
///
/// Returns `None` at the first kind mismatch, missing name, or
/// out-of-range index.
pub fn try_select_single<'a>(root: &'a Value, path: &NormalizedPath) -> Option<&'a Value> {
    let mut components = path.components().iter();
    if components.next() != Some(&PathComponent::Root) {
        return None;
    }
    let mut current = root;
    for component in components {
        current = match component {
            PathComponent::Root => return None,
            PathComponent::Name(name) => current.as_object()?.get(name)?,
            PathComponent::Index(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(expr: &str) -> JsonPath {
        JsonPath::parse(expr).unwrap()
    }

    #[test]
    fn name_and_index_chain() {
        let doc = json!({"a": {"b": [10, 20, 30]}});
        assert_eq!(
            path("$.a.b[1]").select(&doc, SelectOptions::NONE),
            vec![json!(20)]
        );
        assert_eq!(
            path("$['a']['b'][-1]").select(&doc, SelectOptions::NONE),
            vec![json!(30)]
        );
    }

    #[test]
    fn missing_steps_select_nothing() {
        let doc = json!({"a": [1]});
        assert!(path("$.b").select(&doc, SelectOptions::NONE).is_empty());
        assert!(path("$.a[5]").select(&doc, SelectOptions::NONE).is_empty());
        assert!(path("$.a[-2]").select(&doc, SelectOptions::NONE).is_empty());
        // Kind mismatches: name on array, index on object.
        assert!(path("$.a.b").select(&doc, SelectOptions::NONE).is_empty());
        assert!(path("$[0]").select(&doc, SelectOptions::NONE).is_empty());
    }

    #[test]
    fn wildcard_preserves_document_order() {
        let doc = json!({"z": 1, "a": 2, "m": 3});
        assert_eq!(
            path("$.*").select(&doc, SelectOptions::NONE),
            vec![json!(1), json!(2), json!(3)]
        );
    }

    #[test]
    fn recursive_descent_is_preorder() {
        let doc = json!({"a": {"b": 1}, "c": [2]});
        let paths: Vec<String> = path("$..*")
            .select_paths(&doc, SelectOptions::PATH)
            .iter()
            .map(|p| p.to_string())
            .collect();
        // `..` visits self and descendants; `.*`-style wildcard then picks
        // every child of each visited value.
        assert_eq!(
            paths,
            vec!["$['a']", "$['c']", "$['a']['b']", "$['c'][0]"]
        );
    }

    #[test]
    fn descent_to_named_descendants() {
        let doc = json!({
            "x": {"price": 1},
            "y": [{"price": 2}, {"deep": {"price": 3}}]
        });
        assert_eq!(
            path("$..price").select(&doc, SelectOptions::NONE),
            vec![json!(1), json!(2), json!(3)]
        );
    }

    #[test]
    fn nodes_pair_paths_with_values() {
        let doc = json!({"a": [true]});
        let nodes = path("$.a[0]").select_nodes(&doc, SelectOptions::PATH);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].path.to_string(), "$['a'][0]");
        assert_eq!(nodes[0].value, json!(true));
    }

    #[test]
    fn sort_orders_by_path() {
        let doc = json!({"b": {"x": 1}, "a": {"x": 2}});
        let sorted = path("$..x").select_paths(&doc, SelectOptions::SORT);
        let rendered: Vec<String> = sorted.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["$['a']['x']", "$['b']['x']"]);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        // A root reset mid-pipeline re-matches the same node once per
        // frontier entry, producing genuine duplicates.
        let doc = json!({"a": 1, "b": 2});
        let mut expr = path("$.*");
        expr.push_selector(Selector::Root);
        expr.push_selector(Selector::Name("a".to_string()));

        let plain = expr.select_paths(&doc, SelectOptions::PATH);
        assert_eq!(plain.len(), 2);
        assert_eq!(plain[0], plain[1]);

        let deduped = expr.select_nodes(&doc, SelectOptions::NO_DUPS);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].path.to_string(), "$['a']");

        // Deduping an already-deduped result changes nothing.
        let mut seen = HashSet::new();
        let mut twice = deduped.clone();
        twice.retain(|n| seen.insert(n.path.clone()));
        assert_eq!(twice, deduped);
    }

    #[test]
    fn try_select_single_walks_components() {
        let doc = json!({"store": {"book": [{"t": "A"}, {"t": "B"}]}});
        let found = path("$.store.book[1].t").select_paths(&doc, SelectOptions::PATH);
        assert_eq!(found.len(), 1);
        assert_eq!(try_select_single(&doc, &found[0]), Some(&json!("B")));

        let missing = NormalizedPath::root().child_name("nope");
        assert_eq!(try_select_single(&doc, &missing), None);

        let wrong_kind = NormalizedPath::root().child_name("store").child_index(0);
        assert_eq!(try_select_single(&doc, &wrong_kind), None);
    }
}
