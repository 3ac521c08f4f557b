//! Value codecs shared by the reader, the writer and the scribes.

pub mod charset;
pub mod escape;
pub mod quoted_printable;

pub use escape::{
    decode_caret, encode_param_value, escape_text, join_list, join_structured, split_list,
    split_structured, split_unescaped, unescape_text,
};
