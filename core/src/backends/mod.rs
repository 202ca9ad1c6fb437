//! Adapters for the expression libraries under comparison.
//!
//! Run order is fixed: the numeric-only backend first, then the three
//! string-capable ones.

use crate::api::{Backend, EvalMode, HarnessOptions};

pub mod cel;
pub mod evalexpr;
pub mod meval;
pub mod rhai;

pub use self::cel::CelBackend;
pub use self::evalexpr::EvalexprBackend;
pub use self::meval::MevalBackend;
pub use self::rhai::RhaiBackend;

/// Backend names in run order.
pub const BACKEND_NAMES: [&str; 4] = ["meval", "evalexpr", "rhai", "cel"];

/// Construct a backend by name.
pub fn backend_by_name(name: &str, mode: EvalMode) -> Option<Box<dyn Backend>> {
    let backend: Box<dyn Backend> = match name {
        "meval" => Box::new(MevalBackend::new()),
        "evalexpr" => Box::new(EvalexprBackend::new()),
        "rhai" => Box::new(RhaiBackend::new(mode)),
        "cel" => Box::new(CelBackend::new()),
        _ => return None,
    };
    Some(backend)
}

/// Every backend, in run order.
pub fn default_backends(options: &HarnessOptions) -> Vec<Box<dyn Backend>> {
    BACKEND_NAMES
        .iter()
        .filter_map(|name| backend_by_name(name, options.mode))
        .collect()
}

/// Byte offset of a 1-based line and column (counted in chars) in `source`.
pub(crate) fn offset_of(source: &str, line: usize, column: usize) -> Option<usize> {
    let mut offset = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let in_line = match text.char_indices().nth(column.checked_sub(1)?) {
                Some((i, _)) => i,
                None => text.len(),
            };
            return Some(offset + in_line);
        }
        offset += text.len();
    }
    None
}
