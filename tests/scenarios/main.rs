//! End-to-end reading scenarios over realistic documents

mod helpers;
mod nested_documents;
mod query_files;
