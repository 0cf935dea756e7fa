//! JSONPath parsing and evaluation.
//!
//! [`JsonPath::parse`] compiles an expression into an immutable selector
//! pipeline; a compiled expression may be evaluated any number of times,
//! against any root, from any thread. Evaluation yields matched values,
//! normalized paths, or [`Node`]s — (path, value) pairs — depending on the
//! entry point.
//!
//! # Example
//!
//! ```
//! use json_craft_json_path::{JsonPath, SelectOptions};
//! use serde_json::json;
//!
//! let path = JsonPath::parse("$.store.book[0].title").unwrap();
//! let doc = json!({"store": {"book": [{"title": "Sayings"}]}});
//! assert_eq!(path.select(&doc, SelectOptions::NONE), vec![json!("Sayings")]);
//! ```

mod eval;
mod parser;
mod types;

pub use eval::{
    try_select_single, Accumulator, NodeAccumulator, PathAccumulator, ValueAccumulator,
};
pub use parser::{ParseError, ParseErrorKind};
pub use types::{JsonPath, Node, NormalizedPath, PathComponent, SelectOptions, Selector};
