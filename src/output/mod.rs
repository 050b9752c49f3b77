//! Combined results and their on-disk layout

mod combined;
mod writer;

pub use combined::{
    aggregate, aggregate_at, render_text, CombinedOutput, OutputMetadata, FORMAT_VERSION,
};
pub use writer::{read_combined, OutputError, OutputFormat, OutputWriter, WrittenOutputs};
