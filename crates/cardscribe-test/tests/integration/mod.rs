mod conversion;
mod escaping;
mod folding;
mod helpers;
mod parameters;
mod quoted_printable;
mod scenarios;
mod streaming;
