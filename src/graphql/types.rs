//! GraphQL type definitions
//!
//! Result shapes for the catalog queries. Union and interface membership is
//! a tagged variant chosen at construction time, never inferred from which
//! optional fields happen to be set.

use async_graphql::{Interface, SimpleObject, Union};
use serde::{Deserialize, Serialize};

/// A book in the catalog
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
}

/// An author of books or school works
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

/// A class a text work is assigned to
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct SchoolClass {
    pub name: String,
}

/// A color used in a coloring work
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Color {
    pub name: String,
}

/// A catalog search hit
#[derive(Debug, Clone, Union, Serialize, Deserialize)]
pub enum SearchResult {
    Book(Book),
    Author(Author),
}

/// A written work with class assignments
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct TextWork {
    pub title: String,
    pub author: Author,
    pub classes: Vec<SchoolClass>,
}

/// A coloring work
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct ColoringWork {
    pub title: String,
    pub author: Author,
    pub colors: Vec<Color>,
}

/// Anything produced for school
#[derive(Debug, Clone, Interface, Serialize, Deserialize)]
#[graphql(
    field(name = "title", ty = "&String"),
    field(name = "author", ty = "&Author")
)]
pub enum Work {
    Text(TextWork),
    Coloring(ColoringWork),
}
