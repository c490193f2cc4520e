//! Synonym lookup backed by a lexical resource.
//!
//! - `LexicalResource`: the sense-grouping source (trait)
//! - `Thesaurus`: file-backed resource with a binary sidecar
//! - `SynonymRepository`: memoizing front over a resource, sharing a
//!   `SynonymCache` across concurrent rewrites

/// Lexical resource trait, the file-backed `Thesaurus`, and the
/// `UnavailableResource` placeholder.
pub mod lexical_resource;

/// Cache records, the shared `SynonymCache`, and `SynonymRepository`.
pub mod repository;
