//! # cargo-e-msg
//!
//! Parses the JSON diagnostics emitted by `rustc --error-format=json` (or
//! `cargo --message-format=json`) into a tree of [`MainMessage`]s and flattens
//! each tree into [`DisplayMessage`]s anchored at source locations, ready to be
//! shown as editor problem annotations.
//!
//! ```
//! use cargo_e_msg::prelude::*;
//!
//! let json = r#"{"message":"unresolved name `xpto`","code":{"code":"E0425","explanation":null},
//!   "level":"error","spans":[{"file_name":"src/main.rs","line_start":8,"line_end":8,
//!   "column_start":19,"column_end":23,"is_primary":true,"label":"unresolved name",
//!   "expansion":null}],"children":[]}"#;
//!
//! let messages = parse_structured_str(json).unwrap();
//! let display = retrieve_all_display_messages(&messages);
//! assert_eq!(display[0].to_string(), "src/main.rs:8:19: error: unresolved name `xpto` [E0425]:\nunresolved name");
//! ```

// Re-export common items
pub mod prelude {
    pub use crate::e_flatten::retrieve_all_display_messages;
    pub use crate::e_location::{SourceRange, STD_MACROS_PATH};
    pub use crate::e_message::{DisplayMessage, MainMessage, SpanInfo, SubMessage};
    pub use crate::e_msg_parser::{parse_structured_messages, parse_structured_str, ParseError};
    pub use crate::e_severity::{Severity, SeverityCounts};
}

pub mod e_cli;
pub use e_cli::Cli;
pub mod e_collect;
pub mod e_flatten;
pub mod e_location;
pub mod e_message;
pub use e_message::{DisplayMessage, MainMessage, SubMessage};
pub mod e_msg_parser;
pub use e_msg_parser::{parse_structured_messages, parse_structured_str, ParseError};
pub mod e_render;
mod e_rustc_json;
pub mod e_severity;
pub use e_severity::Severity;
